use std::fmt::{self, Display};

///
/// Locus struct, representation of one genomic interval in LocusSet files
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
pub struct Locus {
    pub chrom: String,
    pub start: u32,
    pub end: u32,
}

impl Locus {
    ///
    /// Get the size of the locus in base pairs, counting both endpoints
    ///
    pub fn size(&self) -> u32 {
        self.end - self.start + 1
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.chrom, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_locus_size_counts_both_endpoints() {
        let locus = Locus {
            chrom: String::from("chr1"),
            start: 100,
            end: 199,
        };
        assert_eq!(locus.size(), 100);
    }

    #[test]
    fn test_locus_display_is_browser_form() {
        let locus = Locus {
            chrom: String::from("chr7"),
            start: 117120016,
            end: 117308718,
        };
        assert_eq!(locus.to_string(), "chr7:117120016-117308718");
    }
}
