//! Access credentials attached to a user: cards, license plates, and MFA codes.

// self
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::Query,
	types::{CardNumber, CardType, UserRef},
	validate,
};

/// Card to create for a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessCard {
	/// Card number in exactly one encoding.
	pub number: CardNumber,
	/// Facility code printed on the card.
	pub facility_code: String,
	/// Card format.
	pub card_type: CardType,
	/// Activate immediately.
	pub active: bool,
}
impl AccessCard {
	/// Creates an inactive card.
	pub fn new(number: CardNumber, facility_code: impl Into<String>, card_type: CardType) -> Self {
		Self { number, facility_code: facility_code.into(), card_type, active: false }
	}

	/// Builds a card from the three optional number encodings; exactly one must be set.
	pub fn from_options(
		card_number: Option<&str>,
		card_number_hex: Option<&str>,
		card_number_base36: Option<&str>,
		facility_code: impl Into<String>,
		card_type: CardType,
	) -> Result<Self, ValidationError> {
		let number = CardNumber::from_options(card_number, card_number_hex, card_number_base36)?;

		Ok(Self::new(number, facility_code, card_type))
	}

	/// Sets the `active` flag.
	pub fn with_active(mut self, active: bool) -> Self {
		self.active = active;

		self
	}

	/// Request body: `active`, `facility_code`, `type`, and the single number key.
	pub fn payload(&self) -> Value {
		let mut body = Map::new();

		body.insert("active".into(), Value::Bool(self.active));
		body.insert("facility_code".into(), Value::String(self.facility_code.clone()));
		body.insert("type".into(), Value::String(self.card_type.as_str().into()));
		body.insert(self.number.key().into(), Value::String(self.number.value().into()));

		Value::Object(body)
	}
}

fn user_query_with(
	user: &UserRef,
	key: &'static str,
	value: &str,
) -> Result<Query, ValidationError> {
	user.validate()?;
	validate::require_non_empty(value, key)?;

	Ok(user.to_query().with(key, value))
}

fn sub_path(base: &str, action: &str) -> String {
	format!("{base}/{action}")
}

impl VerkadaClient {
	/// Creates an access card for a user.
	pub async fn add_card_to_user(&self, user: &UserRef, card: &AccessCard) -> Result<Value> {
		user.validate()?;
		card.number.validate()?;

		self.requests().post(endpoints::ACCESS_CARD, user.to_query(), Some(card.payload())).await
	}

	/// Activates a user's card.
	pub async fn activate_access_card(&self, user: &UserRef, card_id: &str) -> Result<Value> {
		let query = user_query_with(user, "card_id", card_id)?;

		self.requests().put(&sub_path(endpoints::ACCESS_CARD, "activate"), query, None).await
	}

	/// Deactivates a user's card.
	pub async fn deactivate_access_card(&self, user: &UserRef, card_id: &str) -> Result<Value> {
		let query = user_query_with(user, "card_id", card_id)?;

		self.requests().put(&sub_path(endpoints::ACCESS_CARD, "deactivate"), query, None).await
	}

	/// Deletes a user's card.
	pub async fn delete_access_card(&self, user: &UserRef, card_id: &str) -> Result<Value> {
		let query = user_query_with(user, "card_id", card_id)?;

		self.requests().delete(endpoints::ACCESS_CARD, query).await
	}

	/// Adds a license plate credential; `name` is omitted when `None`.
	pub async fn add_license_plate_to_user(
		&self,
		user: &UserRef,
		license_plate_number: &str,
		name: Option<&str>,
		active: bool,
	) -> Result<Value> {
		user.validate()?;
		validate::require_non_empty(license_plate_number, "license_plate_number")?;

		let mut body = Map::new();

		body.insert("license_plate_number".into(), Value::String(license_plate_number.into()));
		body.insert("active".into(), Value::Bool(active));

		if let Some(name) = name {
			body.insert("name".into(), Value::String(name.into()));
		}

		self.requests()
			.post(endpoints::ACCESS_LICENSE_PLATE, user.to_query(), Some(Value::Object(body)))
			.await
	}

	/// Activates a license plate credential.
	pub async fn activate_license_plate(
		&self,
		user: &UserRef,
		license_plate_number: &str,
	) -> Result<Value> {
		let query = user_query_with(user, "license_plate_number", license_plate_number)?;
		let path = sub_path(endpoints::ACCESS_LICENSE_PLATE, "activate");

		self.requests().put(&path, query, None).await
	}

	/// Deactivates a license plate credential.
	pub async fn deactivate_license_plate(
		&self,
		user: &UserRef,
		license_plate_number: &str,
	) -> Result<Value> {
		let query = user_query_with(user, "license_plate_number", license_plate_number)?;
		let path = sub_path(endpoints::ACCESS_LICENSE_PLATE, "deactivate");

		self.requests().put(&path, query, None).await
	}

	/// Removes a license plate credential.
	pub async fn delete_license_plate_from_user(
		&self,
		user: &UserRef,
		license_plate_number: &str,
	) -> Result<Value> {
		let query = user_query_with(user, "license_plate_number", license_plate_number)?;

		self.requests().delete(endpoints::ACCESS_LICENSE_PLATE, query).await
	}

	/// Adds an MFA code.
	pub async fn add_mfa_code_to_user(&self, user: &UserRef, code: &str) -> Result<Value> {
		user.validate()?;
		validate::require_non_empty(code, "code")?;

		let body = json!({ "code": code });

		self.requests().post(endpoints::ACCESS_MFA_CODE, user.to_query(), Some(body)).await
	}

	/// Removes an MFA code.
	pub async fn delete_mfa_code_from_user(&self, user: &UserRef, code: &str) -> Result<Value> {
		let query = user_query_with(user, "code", code)?;

		self.requests().delete(endpoints::ACCESS_MFA_CODE, query).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn card_payload_has_exactly_one_number_key() {
		let card = AccessCard::from_options(
			None,
			Some("1a2b"),
			None,
			"111",
			CardType::Standard26BitWiegand,
		)
		.expect("One encoding should be accepted.")
		.with_active(true);

		assert_eq!(
			card.payload(),
			json!({
				"active": true,
				"facility_code": "111",
				"type": "Standard 26-bit Wiegand",
				"card_number_hex": "1a2b",
			})
		);
	}

	#[test]
	fn card_rejects_zero_or_two_numbers() {
		let none = AccessCard::from_options(None, None, None, "1", CardType::Hid37Bit);
		let two = AccessCard::from_options(Some("1"), None, Some("z"), "1", CardType::Hid37Bit);

		assert!(matches!(none, Err(ValidationError::Exclusive { .. })));
		assert!(matches!(two, Err(ValidationError::Exclusive { .. })));
	}
}
