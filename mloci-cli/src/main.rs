mod compare;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "mloci";
    pub const BIN_NAME: &str = "mloci";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Merge and compare genomic locus collections across datasets.")
        .subcommand_required(true)
        .subcommand(compare::cli::create_compare_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // COMPARE
        //
        Some((compare::cli::COMPARE_CMD, matches)) => {
            compare::handlers::run_compare(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
