//! Mutually exclusive identifier selectors.

// self
use crate::{_prelude::*, error::ValidationError, http::Query, validate};

/// Identifies an access user by exactly one of its two ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum UserRef {
	/// Verkada user id.
	UserId(String),
	/// Caller-defined external id.
	ExternalId(String),
}
impl UserRef {
	/// Picks the single supplied id; zero or two ids is an error.
	pub fn from_options(
		user_id: Option<&str>,
		external_id: Option<&str>,
	) -> Result<Self, ValidationError> {
		match (user_id, external_id) {
			(Some(id), None) => {
				validate::require_non_empty(id, "user_id")?;

				Ok(Self::UserId(id.to_owned()))
			},
			(None, Some(id)) => {
				validate::require_non_empty(id, "external_id")?;

				Ok(Self::ExternalId(id.to_owned()))
			},
			_ => Err(ValidationError::Exclusive { fields: "user_id, external_id" }),
		}
	}

	/// Shorthand for [`UserRef::UserId`].
	pub fn user_id(id: impl Into<String>) -> Self {
		Self::UserId(id.into())
	}

	/// Shorthand for [`UserRef::ExternalId`].
	pub fn external_id(id: impl Into<String>) -> Self {
		Self::ExternalId(id.into())
	}

	/// Wire key for the supplied id.
	pub fn key(&self) -> &'static str {
		match self {
			Self::UserId(_) => "user_id",
			Self::ExternalId(_) => "external_id",
		}
	}

	/// Supplied id.
	pub fn value(&self) -> &str {
		match self {
			Self::UserId(id) | Self::ExternalId(id) => id,
		}
	}

	/// Checks the id is non-empty.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty(self.value(), self.key())
	}

	/// Query holding only the supplied key.
	pub fn to_query(&self) -> Query {
		Query::new().with(self.key(), self.value())
	}

	/// JSON object holding only the supplied key.
	pub fn to_json(&self) -> Value {
		let mut body = Map::new();

		body.insert(self.key().into(), Value::String(self.value().into()));

		Value::Object(body)
	}
}

/// Card number in exactly one of its accepted encodings.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum CardNumber {
	/// Decimal card number.
	Decimal(String),
	/// Hexadecimal card number.
	Hex(String),
	/// Base-36 card number.
	Base36(String),
}
impl CardNumber {
	/// Picks the single supplied encoding; zero or several is an error.
	pub fn from_options(
		card_number: Option<&str>,
		card_number_hex: Option<&str>,
		card_number_base36: Option<&str>,
	) -> Result<Self, ValidationError> {
		let number = match (card_number, card_number_hex, card_number_base36) {
			(Some(n), None, None) => Self::Decimal(n.to_owned()),
			(None, Some(n), None) => Self::Hex(n.to_owned()),
			(None, None, Some(n)) => Self::Base36(n.to_owned()),
			_ =>
				return Err(ValidationError::Exclusive {
					fields: "card_number, card_number_hex, card_number_base36",
				}),
		};

		number.validate()?;

		Ok(number)
	}

	/// Wire key for the supplied encoding.
	pub fn key(&self) -> &'static str {
		match self {
			Self::Decimal(_) => "card_number",
			Self::Hex(_) => "card_number_hex",
			Self::Base36(_) => "card_number_base36",
		}
	}

	/// Supplied number.
	pub fn value(&self) -> &str {
		match self {
			Self::Decimal(n) | Self::Hex(n) | Self::Base36(n) => n,
		}
	}

	/// Checks the number is non-empty.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty(self.value(), self.key())
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn user_ref_requires_exactly_one_id() {
		assert!(UserRef::from_options(None, None).is_err());
		assert!(UserRef::from_options(Some("u"), Some("e")).is_err());
		assert!(UserRef::from_options(Some(" "), None).is_err());

		let user = UserRef::from_options(None, Some("ext-1")).expect("One id should be accepted.");

		assert_eq!(user.to_query().pairs(), &[("external_id".to_owned(), "ext-1".to_owned())]);
		assert_eq!(user.to_json(), json!({"external_id": "ext-1"}));
	}

	#[test]
	fn card_number_requires_exactly_one_encoding() {
		assert!(CardNumber::from_options(None, None, None).is_err());
		assert!(CardNumber::from_options(Some("1"), Some("a"), None).is_err());
		assert!(CardNumber::from_options(Some("1"), Some("a"), Some("z")).is_err());
		assert_eq!(
			CardNumber::from_options(None, None, Some("zz")).expect("One encoding should pass."),
			CardNumber::Base36("zz".into())
		);
	}
}
