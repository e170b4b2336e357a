//! Secret wrappers that redact sensitive material from logs.

// self
use crate::{_prelude::*, error::ConfigError};

macro_rules! def_secret {
	($name:ident, $doc:literal) => {
		#[doc = $doc]
		#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
		pub struct $name(String);
		impl $name {
			/// Returns the inner value. Callers must avoid logging this string.
			pub fn expose(&self) -> &str {
				&self.0
			}
		}
		impl AsRef<str> for $name {
			fn as_ref(&self) -> &str {
				self.expose()
			}
		}
		impl Debug for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.debug_tuple(stringify!($name)).field(&"<redacted>").finish()
			}
		}
		impl Display for $name {
			fn fmt(&self, f: &mut Formatter) -> FmtResult {
				f.write_str("<redacted>")
			}
		}
	};
}

def_secret!(ApiKey, "Long-lived API key exchanged for short-lived tokens.");
def_secret!(TokenSecret, "Short-lived bearer token sent in the `x-verkada-auth` header.");

impl ApiKey {
	/// Wraps an API key, rejecting empty or whitespace-only input.
	pub fn new(value: impl Into<String>) -> Result<Self, ConfigError> {
		let value = value.into();

		if value.trim().is_empty() {
			return Err(ConfigError::MissingApiKey);
		}

		Ok(Self(value))
	}
}

impl TokenSecret {
	/// Wraps a new token string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn secret_formatters_redact() {
		let secret = TokenSecret::new("super-secret");
		let key = ApiKey::new("api-key").expect("Non-empty key should be accepted.");

		assert_eq!(format!("{secret:?}"), "TokenSecret(\"<redacted>\")");
		assert_eq!(format!("{secret}"), "<redacted>");
		assert_eq!(format!("{key:?}"), "ApiKey(\"<redacted>\")");
		assert_eq!(key.expose(), "api-key");
	}

	#[test]
	fn blank_api_key_is_missing() {
		assert!(matches!(ApiKey::new(""), Err(ConfigError::MissingApiKey)));
		assert!(matches!(ApiKey::new(" \t"), Err(ConfigError::MissingApiKey)));
	}
}
