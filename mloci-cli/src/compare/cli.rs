use clap::{Arg, Command};

pub const COMPARE_CMD: &str = "compare";

pub fn create_compare_cli() -> Command {
    Command::new(COMPARE_CMD)
        .about("Compare locus datasets, merging loci whose boundaries lie within a proximity threshold. Outputs one numbered row per merged locus with its recurrence across datasets.")
        .arg(
            Arg::new("inputs")
                .long("inputs")
                .required(true)
                .num_args(2..)
                .help("Two or more input files; tab-separated with a chr:start-end locus column, or BED-like"),
        )
        .arg(
            Arg::new("threshold")
                .long("threshold")
                .required(false)
                .default_value("250")
                .help("Merge distance in base pairs between start or between end coordinates"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .required(false)
                .default_value("table")
                .help("Output format: 'table' or 'tsv'"),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .required(false)
                .help("Output file (default: stdout)"),
        )
}
