//! Cross-dataset comparison of genomic locus collections.
//!
//! This crate folds loci from N independently produced datasets into one
//! deduplicated interval list. Loci from different runs of the same
//! pipeline rarely agree on exact boundaries, so two loci are treated as
//! the same event when their start coordinates or their end coordinates
//! lie within a proximity threshold of each other. Each merged interval
//! tracks which datasets it was seen in, giving a recurrence count per
//! event.
//!
//! # Example
//!
//! ```
//! use mloci_core::models::{Locus, LocusSet};
//! use mloci_compare::compare;
//!
//! let first = LocusSet::new(
//!     "first",
//!     vec![Locus {
//!         chrom: String::from("chr1"),
//!         start: 1000,
//!         end: 2000,
//!     }],
//! );
//! let second = LocusSet::new(
//!     "second",
//!     vec![Locus {
//!         chrom: String::from("chr1"),
//!         start: 1150,
//!         end: 2080,
//!     }],
//! );
//!
//! let rows = compare(&[first, second], 250);
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].locus.to_string(), "chr1:1000-2080");
//! assert_eq!(rows[0].frequency, 2);
//! ```

pub mod merge;
pub mod order;

// re-exports
pub use merge::{MergeMap, MergedInterval, merge};
pub use order::{ComparisonRow, compare, order};
