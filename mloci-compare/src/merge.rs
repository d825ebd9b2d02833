//! Proximity merging of loci from multiple datasets.
//!
//! Given N locus sets, folds every locus into per-chromosome merged
//! intervals. Two loci land in the same interval when their start
//! coordinates or their end coordinates lie within a caller-supplied
//! distance of each other, which tolerates the boundary wobble between
//! runs of the same calling pipeline. Each merged interval remembers
//! which input sets contributed to it.

use fxhash::FxHashMap;
use mloci_core::models::{Locus, LocusSet};

/// Merged intervals bucketed by chromosome label.
pub type MergeMap = FxHashMap<String, Vec<MergedInterval>>;

/// One merged interval: a span plus a per-source presence vector.
///
/// The presence vector always has one slot per input set; slot `i` is true
/// once any locus of set `i` has been folded into this interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedInterval {
    pub start: u32,
    pub end: u32,
    presence: Vec<bool>,
}

impl MergedInterval {
    /// A fresh interval covering exactly `locus`, with no sources marked.
    pub fn new(locus: &Locus, n_sources: usize) -> Self {
        MergedInterval {
            start: locus.start,
            end: locus.end,
            presence: vec![false; n_sources],
        }
    }

    /// Copy of this interval with the presence slot for `source_index` set.
    ///
    /// Panics if `source_index` does not name a slot; every interval in a
    /// merge is created with one slot per input set, so this only fires on
    /// misuse.
    pub fn with_membership(&self, source_index: usize) -> Self {
        assert!(
            source_index < self.presence.len(),
            "source index {} out of bounds for presence vector of length {}",
            source_index,
            self.presence.len()
        );

        let mut presence = self.presence.clone();
        presence[source_index] = true;
        MergedInterval {
            start: self.start,
            end: self.end,
            presence,
        }
    }

    /// Copy of this interval widened to also cover `locus`. Presence is
    /// carried over unchanged.
    pub fn merged_with(&self, locus: &Locus) -> Self {
        MergedInterval {
            start: self.start.min(locus.start),
            end: self.end.max(locus.end),
            presence: self.presence.clone(),
        }
    }

    /// Proximity predicate: the start coordinates or the end coordinates
    /// lie within `threshold` base pairs of each other.
    pub fn within_threshold(&self, locus: &Locus, threshold: u32) -> bool {
        self.start.abs_diff(locus.start) <= threshold
            || self.end.abs_diff(locus.end) <= threshold
    }

    /// Number of input sets that contributed to this interval.
    pub fn frequency(&self) -> u32 {
        self.presence.iter().filter(|present| **present).count() as u32
    }

    pub fn presence(&self) -> &[bool] {
        &self.presence
    }

    /// Consume the interval, yielding its presence vector.
    pub fn into_presence(self) -> Vec<bool> {
        self.presence
    }
}

/// Fold all loci from `sources` into per-chromosome merged intervals.
///
/// 1. Sources are visited in order; within a source, loci in file order.
/// 2. Each locus is checked against the already-merged intervals of its
///    chromosome and folded into the first one within `threshold`; the
///    widened interval moves to the back of the bucket. If none is close
///    enough, the locus starts a new interval.
/// 3. Matching is first-match only. A locus near two existing intervals
///    joins the earlier one and never chains them together, so two
///    intervals that drift within reach of each other stay separate.
///
/// Returns an empty map if `sources` is empty.
pub fn merge(sources: &[LocusSet], threshold: u32) -> MergeMap {
    let n_sources = sources.len();
    let mut map: MergeMap = FxHashMap::default();

    for (source_index, set) in sources.iter().enumerate() {
        for locus in set {
            let bucket = map.entry(locus.chrom.clone()).or_default();

            match bucket
                .iter()
                .position(|interval| interval.within_threshold(locus, threshold))
            {
                Some(found) => {
                    let existing = bucket.remove(found);
                    bucket.push(existing.merged_with(locus).with_membership(source_index));
                }
                None => {
                    bucket.push(MergedInterval::new(locus, n_sources).with_membership(source_index));
                }
            }
        }
    }

    map
}
