use std::io::BufRead;
use std::path::{Path, PathBuf};

use regex::Regex;

use crate::errors::LocusSetError;
use crate::models::Locus;
use crate::utils::get_dynamic_reader;

/// Browser-form locus cell, e.g. `chr7:117120016-117308718`.
///
/// Only used to find the locus column on the first data line; once the
/// column is known, cells are parsed leniently so unusual chromosome
/// names later in the file still load.
const LOCUS_CELL_PATTERN: &str = r"^chr[0-9XY][0-9]?:[0-9]+-[0-9]+$";

///
/// LocusSet struct, the representation of one input dataset: a labelled
/// list of loci loaded from a tabular file.
///
/// Two file shapes are accepted:
/// - any tab-separated file where some column holds browser-form loci
///   (`chr:start-end`), found by scanning the first data line
/// - BED-style files, where the first three columns are chrom, start, end
///
/// A single leading column-header line is skipped, as are `track`,
/// `browser`, `#` and blank lines. Gzip'd files are read transparently.
///
#[derive(Clone, Debug)]
pub struct LocusSet {
    pub label: String,
    pub loci: Vec<Locus>,
    pub path: Option<PathBuf>,
}

pub struct LocusSetIterator<'a> {
    locus_set: &'a LocusSet,
    index: usize,
}

#[derive(Clone, Copy)]
enum ColumnShape {
    /// Browser-form loci live in this column.
    Locus(usize),
    /// Leading chrom/start/end columns.
    Bed,
}

/// Find the shape of a data line, preferring a browser-form locus column
/// over BED-style leading columns.
fn detect_shape(fields: &[&str], locus_cell: &Regex) -> Option<ColumnShape> {
    if let Some(column) = fields
        .iter()
        .position(|cell| locus_cell.is_match(&cell.replace(' ', "")))
    {
        return Some(ColumnShape::Locus(column));
    }

    if fields.len() >= 3 && fields[1].parse::<u32>().is_ok() && fields[2].parse::<u32>().is_ok() {
        return Some(ColumnShape::Bed);
    }

    None
}

/// Parse one browser-form cell. Embedded spaces are stripped first, since
/// loci pasted from spreadsheets often carry them.
fn parse_locus_cell(cell: &str, line_no: usize) -> Result<Locus, LocusSetError> {
    let cell = cell.replace(' ', "");

    let (chrom, span) = cell
        .split_once(':')
        .ok_or_else(|| LocusSetError::LocusParseError(line_no, cell.clone()))?;
    let (start, end) = span
        .split_once('-')
        .ok_or_else(|| LocusSetError::LocusParseError(line_no, cell.clone()))?;

    let start: u32 = start
        .parse()
        .map_err(|_| LocusSetError::LocusParseError(line_no, cell.clone()))?;
    let end: u32 = end
        .parse()
        .map_err(|_| LocusSetError::LocusParseError(line_no, cell.clone()))?;

    let chrom = chrom.to_string();
    if end < start {
        return Err(LocusSetError::InvalidCoordinates(line_no, cell));
    }

    Ok(Locus { chrom, start, end })
}

fn parse_bed_fields(fields: &[&str], line_no: usize) -> Result<Locus, LocusSetError> {
    if fields.len() < 3 {
        return Err(LocusSetError::LocusParseError(line_no, fields.join("\t")));
    }

    let start: u32 = fields[1]
        .parse()
        .map_err(|_| LocusSetError::LocusParseError(line_no, fields.join("\t")))?;
    let end: u32 = fields[2]
        .parse()
        .map_err(|_| LocusSetError::LocusParseError(line_no, fields.join("\t")))?;

    if end < start {
        return Err(LocusSetError::InvalidCoordinates(
            line_no,
            format!("{}:{}-{}", fields[0], start, end),
        ));
    }

    Ok(Locus {
        chrom: fields[0].to_string(),
        start,
        end,
    })
}

impl TryFrom<&Path> for LocusSet {
    type Error = LocusSetError;

    ///
    /// Create a new [LocusSet] from a tabular file on disk.
    ///
    /// # Arguments:
    /// - value: path to the file; `.gz` files are decompressed on the fly.
    fn try_from(value: &Path) -> Result<Self, LocusSetError> {
        let path = value;
        let reader = get_dynamic_reader(path)?;

        let locus_cell = Regex::new(LOCUS_CELL_PATTERN).unwrap();

        let mut loci: Vec<Locus> = Vec::new();
        let mut shape: Option<ColumnShape> = None;
        let mut header_seen = false;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let line_no = index + 1;

            if line.trim().is_empty()
                || line.starts_with("browser")
                || line.starts_with("track")
                || line.starts_with('#')
            {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();

            let current = match shape {
                Some(current) => current,
                None => match detect_shape(&fields, &locus_cell) {
                    Some(detected) => {
                        shape = Some(detected);
                        detected
                    }
                    // The first unrecognized line is taken to be the
                    // column-header line; a second one means the file has
                    // no locus column at all.
                    None if !header_seen => {
                        header_seen = true;
                        continue;
                    }
                    None => {
                        return Err(LocusSetError::NoLocusColumn(path.display().to_string()));
                    }
                },
            };

            let locus = match current {
                ColumnShape::Locus(column) => {
                    let cell = fields.get(column).copied().unwrap_or("");
                    parse_locus_cell(cell, line_no)?
                }
                ColumnShape::Bed => parse_bed_fields(&fields, line_no)?,
            };
            loci.push(locus);
        }

        if loci.is_empty() {
            return Err(LocusSetError::EmptyLocusSet(path.display().to_string()));
        }

        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(LocusSet {
            label,
            loci,
            path: Some(value.to_owned()),
        })
    }
}

impl TryFrom<&str> for LocusSet {
    type Error = LocusSetError;

    fn try_from(value: &str) -> Result<Self, LocusSetError> {
        LocusSet::try_from(Path::new(value))
    }
}

impl TryFrom<String> for LocusSet {
    type Error = LocusSetError;

    fn try_from(value: String) -> Result<Self, LocusSetError> {
        LocusSet::try_from(Path::new(&value))
    }
}

impl TryFrom<PathBuf> for LocusSet {
    type Error = LocusSetError;

    fn try_from(value: PathBuf) -> Result<Self, LocusSetError> {
        LocusSet::try_from(value.as_path())
    }
}

impl<'a> Iterator for LocusSetIterator<'a> {
    type Item = &'a Locus;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.locus_set.loci.len() {
            let locus = &self.locus_set.loci[self.index];
            self.index += 1;
            Some(locus)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a LocusSet {
    type Item = &'a Locus;
    type IntoIter = LocusSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        LocusSetIterator {
            locus_set: self,
            index: 0,
        }
    }
}

impl LocusSet {
    ///
    /// Build a set directly from loci already in memory.
    ///
    /// # Arguments
    /// - label: dataset name shown in result columns
    /// - loci: the loci of the set
    pub fn new(label: &str, loci: Vec<Locus>) -> Self {
        LocusSet {
            label: label.to_string(),
            loci,
            path: None,
        }
    }

    ///
    /// Get number of loci in LocusSet
    ///
    pub fn len(&self) -> usize {
        self.loci.len()
    }

    ///
    /// Is LocusSet empty?
    ///
    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }
}
