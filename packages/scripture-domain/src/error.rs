pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
	#[error("Vector dimension mismatch at {location}: expected {expected}, got {actual}.")]
	DimensionMismatch { location: String, expected: usize, actual: usize },
	#[error("{message}")]
	InvalidArgument { message: String },
}
