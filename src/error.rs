//! Client-level error types shared across the token, transport, pagination, and resource layers.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Caller input was rejected before any network call.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token endpoint failure.
	#[error(transparent)]
	Token(#[from] TokenError),
	/// Transport or HTTP failure on a business endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Pagination contract could not be followed.
	#[error(transparent)]
	Pagination(#[from] PaginationError),
}
impl Error {
	/// Returns the HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Transport(TransportError::Status { status, .. }) => Some(*status),
			Self::Token(TokenError::Status { status, .. }) => Some(*status),
			_ => None,
		}
	}
}

/// Input validation failures raised eagerly, never retried.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// A required string was empty or whitespace.
	#[error("{field} must be a non-empty string.")]
	Empty {
		/// Parameter name.
		field: &'static str,
	},
	/// A list element was empty or whitespace.
	#[error("{field} must be a non-empty string (at index {index}).")]
	EmptyAt {
		/// Parameter name.
		field: &'static str,
		/// Offending position.
		index: usize,
	},
	/// A required list was empty.
	#[error("{field} must contain at least one value.")]
	EmptyList {
		/// Parameter name.
		field: &'static str,
	},
	/// Zero or several members of a mutually exclusive set were supplied.
	#[error("Exactly one of {fields} must be provided.")]
	Exclusive {
		/// Comma separated member names.
		fields: &'static str,
	},
	/// A numeric parameter fell outside its accepted range.
	#[error("{field} must be between {min} and {max}, got {value}.")]
	OutOfRange {
		/// Parameter name.
		field: &'static str,
		/// Rejected value.
		value: i64,
		/// Inclusive lower bound.
		min: i64,
		/// Inclusive upper bound.
		max: i64,
	},
	/// A string did not belong to an enumerated value set.
	#[error("Invalid {kind} value `{value}`.")]
	InvalidEnum {
		/// Enumeration name.
		kind: &'static str,
		/// Rejected input.
		value: String,
	},
	/// A date string was not `YYYY-MM-DD`.
	#[error("{field} must be a date in YYYY-MM-DD format, got `{value}`.")]
	InvalidDate {
		/// Parameter name.
		field: &'static str,
		/// Rejected input.
		value: String,
	},
	/// A clock string was not zero padded `HH:MM` within 00:00..=23:59.
	#[error("{field} must be a time in HH:MM format, got `{value}`.")]
	InvalidTime {
		/// Parameter name.
		field: &'static str,
		/// Rejected input.
		value: String,
	},
	/// A time window was inverted or too wide.
	#[error("Invalid time window: {reason}.")]
	InvalidWindow {
		/// Description of the violation.
		reason: String,
	},
	/// CSV header row did not match the expected column set.
	#[error("CSV header must be exactly [{expected}], got [{found}].")]
	CsvHeader {
		/// Expected columns.
		expected: String,
		/// Columns found in the file.
		found: String,
	},
	/// Structured object violated its schema.
	#[error("Invalid {field}: {reason}.")]
	Invalid {
		/// Field or object name.
		field: &'static str,
		/// Description of the violation.
		reason: String,
	},
}
impl ValidationError {
	/// Shorthand for [`ValidationError::Invalid`].
	pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
		Self::Invalid { field, reason: reason.into() }
	}
}

/// Configuration failures raised while building the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// No API key was supplied or found in the environment.
	#[error("An API key is required; set VERKADA_API_KEY or pass one explicitly.")]
	MissingApiKey,
	/// The operation needs an organization id and none was configured.
	#[error("An organization id is required; set VERKADA_ORG_ID or configure one explicitly.")]
	MissingOrgId,
	/// A configured URL cannot be parsed.
	#[error("URL `{url}` is invalid.")]
	InvalidUrl {
		/// Offending URL text.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Token endpoint failures.
#[derive(Debug, ThisError)]
pub enum TokenError {
	/// Token endpoint answered with a non-success status.
	#[error("Token endpoint returned HTTP {status}: {body}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Response body, possibly truncated.
		body: String,
	},
	/// Token endpoint response did not contain the configured key.
	#[error("Token endpoint response is missing the `{key}` field.")]
	MissingField {
		/// Expected JSON key.
		key: String,
	},
	/// Token endpoint responded with malformed JSON.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Network failure while calling the token endpoint.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl From<ReqwestError> for TokenError {
	fn from(e: ReqwestError) -> Self {
		Self::Network { source: Box::new(e) }
	}
}

/// Transport-level failures on business endpoints.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {url}.")]
	Network {
		/// Target URL.
		url: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Request exceeded its timeout.
	#[error("Request to {url} timed out.")]
	Timeout {
		/// Target URL.
		url: String,
	},
	/// Endpoint answered with a non-success status after retries.
	#[error("{method} {url} failed with HTTP {status}: {body}.")]
	Status {
		/// HTTP method.
		method: &'static str,
		/// Target URL.
		url: String,
		/// HTTP status code.
		status: u16,
		/// Response body, possibly truncated.
		body: String,
	},
	/// Response body was expected to be JSON but was not.
	#[error("Response from {url} is not valid JSON.")]
	Decode {
		/// Target URL.
		url: String,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Attachment could not be read.
	#[error("I/O error occurred while preparing the request.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(
		url: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { url: url.into(), source: Box::new(src) }
	}
}

/// Pagination contract failures.
#[derive(Debug, ThisError)]
pub enum PaginationError {
	/// Items or cursor key could not be inferred from a page's key set.
	#[error("Unable to infer the {which} key from page keys [{keys}]; pass explicit keys.")]
	Inference {
		/// `items` or `cursor`.
		which: &'static str,
		/// Keys present in the page.
		keys: String,
	},
	/// Page response was not a JSON object.
	#[error("Page response is not a JSON object.")]
	NotAnObject,
	/// Items value was not an array.
	#[error("Page value under `{key}` is not an array.")]
	ItemsNotArray {
		/// Items key.
		key: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_is_exposed_for_http_failures() {
		let err = Error::from(TransportError::Status {
			method: "GET",
			url: "https://api.verkada.com/x".into(),
			status: 404,
			body: "not found".into(),
		});

		assert_eq!(err.status(), Some(404));
		assert_eq!(Error::from(ConfigError::MissingApiKey).status(), None);
	}

	#[test]
	fn validation_messages_name_the_field() {
		let err = ValidationError::OutOfRange { field: "page_size", value: 201, min: 0, max: 200 };

		assert_eq!(err.to_string(), "page_size must be between 0 and 200, got 201.");
	}
}
