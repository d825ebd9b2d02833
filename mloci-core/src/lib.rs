//! Core models and input parsing for locus comparison tools.
//!
//! This crate provides the shared building blocks for working with genomic
//! locus collections:
//!
//! - [`Locus`]: a single interval on a chromosome, displayed in genome-browser
//!   form (`chr7:117120016-117308718`)
//! - [`LocusSet`]: a labelled collection of loci loaded from a tabular file
//! - Readers that detect the locus column inside arbitrary tab-separated
//!   files, fall back to BED-style columns, and transparently handle gzip
//!
//! # Example
//!
//! ```no_run
//! use mloci_core::models::LocusSet;
//!
//! let set = LocusSet::try_from("cnv_calls.txt").unwrap();
//! for locus in &set {
//!     println!("{locus}");
//! }
//! ```

pub mod errors;
pub mod models;
pub mod utils;

// re-exports
pub use errors::LocusSetError;
pub use models::{Locus, LocusSet};
