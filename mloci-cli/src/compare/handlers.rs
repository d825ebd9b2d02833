use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;

use mloci_compare::{ComparisonRow, compare};
use mloci_core::models::LocusSet;
use tabled::builder::Builder;
use tabled::settings::Style;

enum OutputFormat {
    Table,
    Tsv,
}

pub fn run_compare(matches: &ArgMatches) -> Result<()> {
    let input_paths: Vec<&String> = matches
        .get_many::<String>("inputs")
        .expect("--inputs is required")
        .collect();

    let threshold: u32 = matches
        .get_one::<String>("threshold")
        .unwrap()
        .parse()
        .context("--threshold must be a whole number of base pairs")?;

    let format = match matches.get_one::<String>("format").unwrap().as_str() {
        "table" => OutputFormat::Table,
        "tsv" => OutputFormat::Tsv,
        other => anyhow::bail!("Unknown output format '{}'; expected 'table' or 'tsv'", other),
    };

    let output_path = matches.get_one::<String>("output");

    // Load all datasets
    let mut sets: Vec<LocusSet> = Vec::with_capacity(input_paths.len());
    for p in &input_paths {
        let set = LocusSet::try_from(p.as_str())
            .map_err(|e| anyhow::anyhow!("Failed to load dataset {}: {}", p, e))?;
        eprintln!("{}: {} loci", set.label, set.len());
        sets.push(set);
    }

    eprintln!(
        "Comparing {} datasets at a merge distance of {} bp...",
        sets.len(),
        threshold
    );

    let rows = compare(&sets, threshold);
    eprintln!("{} merged loci", rows.len());

    let labels: Vec<&str> = sets.iter().map(|set| set.label.as_str()).collect();
    let rendered = match format {
        OutputFormat::Table => render_table(&rows, &labels),
        OutputFormat::Tsv => render_tsv(&rows, &labels),
    };

    match output_path {
        Some(p) => {
            let mut file = File::create(Path::new(p))
                .with_context(|| format!("Failed to create output file: {}", p))?;
            file.write_all(rendered.as_bytes())?;
            eprintln!("Output written to {}", p);
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            out.write_all(rendered.as_bytes())?;
        }
    }

    Ok(())
}

/// Render rows as a rounded table: row number, frequency, merged locus,
/// then one column per dataset holding Y where the dataset contributed
/// and nothing where it did not.
fn render_table(rows: &[ComparisonRow], labels: &[&str]) -> String {
    let mut builder = Builder::default();

    let mut header: Vec<String> = vec![
        String::from("#"),
        String::from("Frequency"),
        String::from("Locus"),
    ];
    header.extend(labels.iter().map(|label| label.to_string()));
    builder.push_record(header);

    for row in rows {
        let mut cells: Vec<String> = vec![
            row.index.to_string(),
            row.frequency.to_string(),
            row.locus.to_string(),
        ];
        cells.extend(
            row.presence
                .iter()
                .map(|present| String::from(if *present { "Y" } else { "" })),
        );
        builder.push_record(cells);
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Render rows as tab-separated values with an explicit Y/N per dataset.
fn render_tsv(rows: &[ComparisonRow], labels: &[&str]) -> String {
    let mut out = String::new();

    out.push_str("#\tFrequency\tLocus");
    for label in labels {
        out.push('\t');
        out.push_str(label);
    }
    out.push('\n');

    for row in rows {
        out.push_str(&format!("{}\t{}\t{}", row.index, row.frequency, row.locus));
        for present in &row.presence {
            out.push_str(if *present { "\tY" } else { "\tN" });
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mloci_core::models::Locus;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn sample_rows() -> Vec<ComparisonRow> {
        vec![
            ComparisonRow {
                index: 1,
                locus: Locus {
                    chrom: String::from("chr1"),
                    start: 1000,
                    end: 2000,
                },
                frequency: 2,
                presence: vec![true, true],
            },
            ComparisonRow {
                index: 2,
                locus: Locus {
                    chrom: String::from("chr2"),
                    start: 300,
                    end: 450,
                },
                frequency: 1,
                presence: vec![false, true],
            },
        ]
    }

    #[rstest]
    fn test_render_tsv_marks_presence_with_y_and_n() {
        let rendered = render_tsv(&sample_rows(), &["a.txt", "b.txt"]);

        assert_eq!(
            rendered,
            "#\tFrequency\tLocus\ta.txt\tb.txt\n\
             1\t2\tchr1:1000-2000\tY\tY\n\
             2\t1\tchr2:300-450\tN\tY\n"
        );
    }

    #[rstest]
    fn test_render_table_leaves_absent_cells_blank() {
        let rendered = render_table(&sample_rows(), &["a.txt", "b.txt"]);

        assert!(rendered.contains("Frequency"));
        assert!(rendered.contains("chr1:1000-2000"));
        assert!(rendered.contains("chr2:300-450"));
        // Absent datasets render as empty cells, never as N.
        assert!(!rendered.contains('N'));
    }

    #[rstest]
    fn test_render_tsv_without_rows_still_has_header() {
        let rendered = render_tsv(&[], &["a.txt", "b.txt"]);
        assert_eq!(rendered, "#\tFrequency\tLocus\ta.txt\tb.txt\n");
    }
}
