use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	InvalidHeaderName(#[from] reqwest::header::InvalidHeaderName),
	#[error(transparent)]
	InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),
	#[error("{message}")]
	InvalidConfig { message: String },
	#[error("{message}")]
	InvalidResponse { message: String },
	#[error("Provider unavailable ({status}): {message}")]
	Unavailable { status: StatusCode, message: String },
	#[error("Provider rejected the request ({status}): {message}")]
	Rejected { status: StatusCode, message: String },
	#[error("Provider call timed out after {timeout_ms} ms.")]
	Timeout { timeout_ms: u64 },
}
impl Error {
	/// Builds the error for a non-success HTTP status. 429 and 5xx are transient.
	pub fn from_status(status: StatusCode, message: String) -> Self {
		if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
			Self::Unavailable { status, message }
		} else {
			Self::Rejected { status, message }
		}
	}

	/// Whether the same request may succeed if sent again.
	pub fn is_retryable(&self) -> bool {
		match self {
			Self::Unavailable { .. } | Self::Timeout { .. } => true,
			Self::Reqwest(err) => err.is_timeout() || err.is_connect() || err.is_request(),
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn rate_limits_and_server_errors_are_retryable() {
		assert!(Error::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()).is_retryable());
		assert!(Error::from_status(StatusCode::BAD_GATEWAY, String::new()).is_retryable());
		assert!(Error::Timeout { timeout_ms: 10 }.is_retryable());
	}

	#[test]
	fn client_errors_are_final() {
		let err = Error::from_status(StatusCode::UNAUTHORIZED, "bad key".to_string());

		assert!(matches!(err, Error::Rejected { .. }));
		assert!(!err.is_retryable());
		assert!(!Error::InvalidResponse { message: String::new() }.is_retryable());
	}
}
