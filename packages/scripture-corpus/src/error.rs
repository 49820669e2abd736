use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Failed to open corpus file at {path:?}.")]
	Io { path: PathBuf, source: std::io::Error },
	#[error("Failed to read a CSV record from {origin}.")]
	Csv { origin: String, source: csv::Error },
	#[error("Row {row} of {origin} has no column {column}.")]
	MissingColumn { origin: String, row: u64, column: usize },
	#[error("Row {row} of {origin} has a malformed vector literal.")]
	InvalidVector { origin: String, row: u64 },
	#[error("Unit {location} has dimension {actual}, expected {expected}.")]
	DimensionMismatch { location: String, expected: usize, actual: usize },
	#[error("Corpus {origin} contains no rows.")]
	EmptyCorpus { origin: String },
	#[error(transparent)]
	Domain(scripture_domain::Error),
}
impl From<scripture_domain::Error> for Error {
	fn from(err: scripture_domain::Error) -> Self {
		match err {
			scripture_domain::Error::DimensionMismatch { location, expected, actual } =>
				Self::DimensionMismatch { location, expected, actual },
			other => Self::Domain(other),
		}
	}
}
