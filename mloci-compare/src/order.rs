//! Flattening merged intervals into presentable result rows.

use mloci_core::models::{Locus, LocusSet};

use crate::merge::{MergeMap, MergedInterval, merge};

/// One row of a comparison result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    /// 1-based row number, contiguous over the whole result.
    pub index: usize,
    /// The merged span in browser form.
    pub locus: Locus,
    /// Number of input sets that contributed to the span.
    pub frequency: u32,
    /// Per-source contribution, slot-aligned with the merge's source order.
    pub presence: Vec<bool>,
}

/// Flatten a merge map into numbered rows.
///
/// Chromosomes are ordered by plain string comparison of their labels, so
/// `chr10` sorts before `chr2`. Within a chromosome, rows keep the order
/// the merge finalized them in: an interval that absorbed a late locus
/// sits behind intervals it was first created before.
pub fn order(map: MergeMap) -> Vec<ComparisonRow> {
    let mut buckets: Vec<(String, Vec<MergedInterval>)> = map.into_iter().collect();
    buckets.sort_by(|a, b| a.0.cmp(&b.0));

    let mut rows: Vec<ComparisonRow> = Vec::new();
    for (chrom, intervals) in buckets {
        for interval in intervals {
            let frequency = interval.frequency();
            let (start, end) = (interval.start, interval.end);
            rows.push(ComparisonRow {
                index: rows.len() + 1,
                locus: Locus {
                    chrom: chrom.clone(),
                    start,
                    end,
                },
                frequency,
                presence: interval.into_presence(),
            });
        }
    }

    rows
}

/// Merge `sources` at `threshold` and flatten the result into rows.
pub fn compare(sources: &[LocusSet], threshold: u32) -> Vec<ComparisonRow> {
    order(merge(sources, threshold))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use std::path::PathBuf;

    fn get_test_path(file_name: &str) -> PathBuf {
        std::env::current_dir()
            .unwrap()
            .join("../tests/data")
            .join(file_name)
    }

    fn make_locusset(label: &str, loci: Vec<(&str, u32, u32)>) -> LocusSet {
        let loci: Vec<Locus> = loci
            .into_iter()
            .map(|(chrom, start, end)| Locus {
                chrom: chrom.to_string(),
                start,
                end,
            })
            .collect();
        LocusSet::new(label, loci)
    }

    #[rstest]
    fn test_chromosomes_sort_as_strings() {
        let a = make_locusset(
            "a",
            vec![("chr2", 100, 200), ("chr10", 100, 200), ("chr1", 100, 200)],
        );

        let rows = compare(&[a], 250);
        let chroms: Vec<&str> = rows.iter().map(|row| row.locus.chrom.as_str()).collect();
        assert_eq!(chroms, vec!["chr1", "chr10", "chr2"]);
    }

    #[rstest]
    fn test_indices_are_one_based_and_contiguous() {
        let a = make_locusset(
            "a",
            vec![("chr1", 100, 200), ("chr2", 100, 200), ("chrX", 100, 200)],
        );
        let b = make_locusset("b", vec![("chr9", 5000, 6000)]);

        let rows = compare(&[a, b], 250);
        let indices: Vec<usize> = rows.iter().map(|row| row.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[rstest]
    fn test_frequency_counts_contributing_sets() {
        let a = make_locusset("a", vec![("chr1", 1000, 2000)]);
        let b = make_locusset("b", vec![("chr1", 1100, 2100)]);
        let c = make_locusset("c", vec![("chr1", 900000, 910000)]);

        let rows = compare(&[a, b, c], 250);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].frequency, 2);
        assert_eq!(rows[0].presence, vec![true, true, false]);
        assert_eq!(rows[1].frequency, 1);
        assert_eq!(rows[1].presence, vec![false, false, true]);
    }

    #[rstest]
    fn test_frequency_stays_within_source_count() {
        let sets = vec![
            make_locusset("a", vec![("chr1", 1000, 2000), ("chr3", 70000, 71000)]),
            make_locusset("b", vec![("chr1", 1050, 2050), ("chr2", 500, 600)]),
            make_locusset("c", vec![("chr1", 1010, 1990), ("chr2", 480, 620)]),
        ];

        for row in compare(&sets, 250) {
            let marked = row.presence.iter().filter(|present| **present).count() as u32;
            assert_eq!(row.frequency, marked);
            assert!(row.frequency >= 1);
            assert!(row.frequency <= sets.len() as u32);
        }
    }

    #[rstest]
    fn test_rows_render_in_browser_form() {
        let a = make_locusset("a", vec![("chr7", 117120016, 117308718)]);

        let rows = compare(&[a], 250);
        assert_eq!(rows[0].locus.to_string(), "chr7:117120016-117308718");
    }

    #[rstest]
    fn test_empty_input_gives_empty_rows() {
        assert!(compare(&[], 250).is_empty());
        assert!(order(MergeMap::default()).is_empty());
    }

    #[rstest]
    fn test_compare_is_deterministic() {
        let sets = vec![
            make_locusset("a", vec![("chr2", 100, 200), ("chr1", 4000, 5000)]),
            make_locusset("b", vec![("chr1", 4100, 5100), ("chr2", 9000, 9100)]),
        ];

        assert_eq!(compare(&sets, 250), compare(&sets, 250));
    }

    #[rstest]
    fn test_compare_fixture_datasets() {
        // cnv_calls_a.txt carries five loci, cnv_calls_b.txt three. At the
        // default distance of 250 bp the chr7 CFTR-region call and both
        // chr2 calls pair up; the chr10 calls are ~375 kb apart and stay
        // separate.
        let a = LocusSet::try_from(get_test_path("cnv_calls_a.txt").as_path()).unwrap();
        let b = LocusSet::try_from(get_test_path("cnv_calls_b.txt").as_path()).unwrap();

        let rows = compare(&[a, b], 250);
        assert_eq!(rows.len(), 6);

        let rendered: Vec<(usize, String, u32)> = rows
            .iter()
            .map(|row| (row.index, row.locus.to_string(), row.frequency))
            .collect();
        assert_eq!(
            rendered,
            vec![
                (1, String::from("chr10:89623194-89728532"), 1),
                (2, String::from("chr10:90000000-90100000"), 1),
                (3, String::from("chr2:47600000-47640180"), 2),
                // chr7: the merged CFTR call finalized after the lone
                // 117.35 Mb call, so it renders second.
                (4, String::from("chr7:117350000-117360000"), 1),
                (5, String::from("chr7:117120016-117308718"), 2),
                (6, String::from("chrX:153990000-154010000"), 1),
            ]
        );
    }
}
