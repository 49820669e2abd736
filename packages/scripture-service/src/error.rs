pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Malformed query: {message}")]
	MalformedQuery { message: String },
	#[error("Vector for {location} has dimension {actual}, expected {expected}.")]
	DimensionMismatch { location: String, expected: usize, actual: usize },
	#[error("Embedding provider failed after {attempts} attempt(s): {message}")]
	EmbeddingProvider { attempts: u32, message: String },
	#[error("Internal error: {message}")]
	Internal { message: String },
}
impl From<scripture_domain::Error> for Error {
	fn from(err: scripture_domain::Error) -> Self {
		match err {
			scripture_domain::Error::DimensionMismatch { location, expected, actual } =>
				Self::DimensionMismatch { location, expected, actual },
			scripture_domain::Error::InvalidArgument { message } => Self::Internal { message },
		}
	}
}
