use thiserror::Error;

#[derive(Error, Debug)]
pub enum LocusSetError {
    #[error("Can't read file: {0}")]
    FileReadError(String),

    #[error("No locus column found on the first data line of: {0}")]
    NoLocusColumn(String),

    #[error("Error parsing locus on line {0}: {1}")]
    LocusParseError(usize, String),

    #[error("Invalid locus on line {0} (end is before start): {1}")]
    InvalidCoordinates(usize, String),

    #[error("Corrupted file. 0 loci found in the file: {0}")]
    EmptyLocusSet(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
