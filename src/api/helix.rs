//! Helix event types and the events posted against them.

// self
use super::to_body;
use crate::{
	_prelude::*, client::VerkadaClient, endpoints, error::ValidationError, http::Query, validate,
};

/// Most attributes an event type may declare.
pub const MAX_SCHEMA_ATTRIBUTES: usize = 10;
/// Longest attribute name or type.
pub const MAX_ATTRIBUTE_LEN: usize = 20;

/// Attribute name to type, e.g. `"product" => "string"`.
pub type EventSchema = BTreeMap<String, String>;

fn require_schema(schema: &EventSchema) -> Result<(), ValidationError> {
	if schema.is_empty() {
		return Err(ValidationError::EmptyList { field: "event_schema" });
	}
	if schema.len() > MAX_SCHEMA_ATTRIBUTES {
		return Err(ValidationError::invalid(
			"event_schema",
			format!("at most {MAX_SCHEMA_ATTRIBUTES} attributes are allowed"),
		));
	}

	for (name, kind) in schema {
		validate::require_non_empty(name, "attribute name")?;
		validate::require_non_empty(kind, "attribute type")?;

		if name.chars().count() > MAX_ATTRIBUTE_LEN || kind.chars().count() > MAX_ATTRIBUTE_LEN {
			return Err(ValidationError::invalid(
				"event_schema",
				format!("`{name}: {kind}` exceeds {MAX_ATTRIBUTE_LEN} characters"),
			));
		}
	}

	Ok(())
}

fn require_positive_ms(value: i64, field: &'static str) -> Result<(), ValidationError> {
	validate::require_range(value, field, 1, i64::MAX)
}

/// Identifies one posted event: camera, event type, and epoch milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HelixEventKey {
	/// Camera the event is attached to.
	pub camera_id: String,
	/// Event type uid.
	pub event_type_uid: String,
	/// Event time in epoch milliseconds.
	pub time_ms: i64,
}
impl HelixEventKey {
	/// Creates a key.
	pub fn new(
		camera_id: impl Into<String>,
		event_type_uid: impl Into<String>,
		time_ms: i64,
	) -> Self {
		Self { camera_id: camera_id.into(), event_type_uid: event_type_uid.into(), time_ms }
	}

	fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty(&self.camera_id, "camera_id")?;
		validate::require_non_empty(&self.event_type_uid, "event_type_uid")?;

		require_positive_ms(self.time_ms, "time_ms")
	}

	fn to_query(&self) -> Result<Query, ValidationError> {
		self.validate()?;

		Ok(Query::new()
			.with("camera_id", &self.camera_id)
			.with("time_ms", self.time_ms)
			.with("event_type_uid", &self.event_type_uid))
	}
}

/// Search over posted events.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HelixSearch {
	/// Cameras to search; at least one.
	pub camera_ids: Vec<String>,
	/// Window start in epoch milliseconds.
	pub start_time_ms: i64,
	/// Window end in epoch milliseconds.
	pub end_time_ms: i64,
	/// Event type uid.
	pub event_type_uid: String,
	/// Only flagged events when `true`.
	pub flagged: bool,
	/// Free-text keywords.
	pub keywords: Vec<String>,
	/// Extra attribute predicates, passed through as-is.
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub attribute_filters: Vec<Value>,
}
impl HelixSearch {
	/// Checks ids, keywords, and the millisecond window.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty_each(&self.camera_ids, "camera_ids")?;
		validate::require_non_empty(&self.event_type_uid, "event_type_uid")?;
		require_positive_ms(self.start_time_ms, "start_time_ms")?;
		require_positive_ms(self.end_time_ms, "end_time_ms")?;
		validate::resolve_window(
			Some(self.start_time_ms),
			Some(self.end_time_ms),
			self.end_time_ms,
		)?;
		validate::require_each(&self.keywords, "keywords")?;

		Ok(())
	}
}

impl VerkadaClient {
	/// Creates an event type.
	pub async fn create_helix_event_type(
		&self,
		event_schema: &EventSchema,
		name: &str,
	) -> Result<Value> {
		validate::require_non_empty(name, "name")?;
		require_schema(event_schema)?;

		let body = json!({ "event_schema": event_schema, "name": name });

		self.requests().post(endpoints::HELIX_EVENT_TYPE, Query::new(), Some(body)).await
	}

	/// Lists event types, optionally narrowed by uid or name.
	pub async fn get_helix_event_types(
		&self,
		event_type_uid: Option<&str>,
		name: Option<&str>,
	) -> Result<Value> {
		validate::require_non_empty_opt(event_type_uid, "event_type_uid")?;
		validate::require_non_empty_opt(name, "name")?;

		let query = Query::new().with_opt("event_type_uid", event_type_uid).with_opt("name", name);

		self.requests().get(endpoints::HELIX_EVENT_TYPE, query).await
	}

	/// Replaces an event type's name and schema.
	pub async fn update_helix_event_type(
		&self,
		event_type_uid: &str,
		event_schema: &EventSchema,
		name: &str,
	) -> Result<Value> {
		validate::require_non_empty(event_type_uid, "event_type_uid")?;
		validate::require_non_empty(name, "name")?;
		require_schema(event_schema)?;

		let query = Query::new().with("event_type_uid", event_type_uid);
		let body = json!({ "event_schema": event_schema, "name": name });

		self.requests().patch(endpoints::HELIX_EVENT_TYPE, query, Some(body)).await
	}

	/// Deletes an event type.
	pub async fn delete_helix_event_type(&self, event_type_uid: &str) -> Result<Value> {
		validate::require_non_empty(event_type_uid, "event_type_uid")?;

		let query = Query::new().with("event_type_uid", event_type_uid);

		self.requests().delete(endpoints::HELIX_EVENT_TYPE, query).await
	}

	/// Posts an event; `attributes` must follow the event type's schema.
	pub async fn create_helix_event(
		&self,
		key: &HelixEventKey,
		flagged: bool,
		attributes: Option<Map<String, Value>>,
	) -> Result<Value> {
		key.validate()?;

		let mut body = Map::new();

		body.insert("camera_id".into(), json!(key.camera_id));
		body.insert("event_type_uid".into(), json!(key.event_type_uid));
		body.insert("time_ms".into(), json!(key.time_ms));
		body.insert("flagged".into(), json!(flagged));

		if let Some(attributes) = attributes {
			body.insert("attributes".into(), Value::Object(attributes));
		}

		self.requests().post(endpoints::HELIX_EVENT, Query::new(), Some(Value::Object(body))).await
	}

	/// Fetches one event.
	pub async fn get_helix_event(&self, key: &HelixEventKey) -> Result<Value> {
		self.requests().get(endpoints::HELIX_EVENT, key.to_query()?).await
	}

	/// Updates an event's flag and attributes.
	pub async fn update_helix_event(
		&self,
		key: &HelixEventKey,
		flagged: bool,
		attributes: Option<Map<String, Value>>,
	) -> Result<Value> {
		let query = key.to_query()?;
		let body = json!({ "attributes": attributes.unwrap_or_default(), "flagged": flagged });

		self.requests().patch(endpoints::HELIX_EVENT, query, Some(body)).await
	}

	/// Deletes an event.
	pub async fn delete_helix_event(&self, key: &HelixEventKey) -> Result<Value> {
		self.requests().delete(endpoints::HELIX_EVENT, key.to_query()?).await
	}

	/// Searches posted events.
	pub async fn search_helix_events(&self, search: &HelixSearch) -> Result<Value> {
		search.validate()?;

		let body = to_body(search, "helix search")?;

		self.requests().post(endpoints::HELIX_EVENT_SEARCH, Query::new(), Some(body)).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn schema(n: usize) -> EventSchema {
		(0..n).map(|i| (format!("attr{i}"), "string".to_owned())).collect()
	}

	#[test]
	fn schema_limits_are_enforced() {
		assert!(require_schema(&schema(1)).is_ok());
		assert!(require_schema(&schema(10)).is_ok());
		assert!(require_schema(&schema(0)).is_err());
		assert!(require_schema(&schema(11)).is_err());

		let mut long = schema(1);

		long.insert("a".repeat(21), "string".into());

		assert!(require_schema(&long).is_err());
	}

	#[test]
	fn event_keys_need_positive_times() {
		assert!(HelixEventKey::new("cam", "type", 0).to_query().is_err());
		assert!(HelixEventKey::new("", "type", 1).to_query().is_err());

		let query = HelixEventKey::new("cam", "type", 1_700_000_000_000)
			.to_query()
			.expect("Key should be valid.");

		assert_eq!(query.get("time_ms"), Some("1700000000000"));
	}

	#[test]
	fn search_validates_window_and_lists() {
		let search = HelixSearch {
			camera_ids: vec!["cam".into()],
			start_time_ms: 1_000,
			end_time_ms: 2_000,
			event_type_uid: "type".into(),
			keywords: vec!["pallet".into()],
			..Default::default()
		};

		assert!(search.validate().is_ok());
		assert!(HelixSearch { start_time_ms: 3_000, ..search.clone() }.validate().is_err());
		assert!(HelixSearch { camera_ids: vec![], ..search.clone() }.validate().is_err());
		assert!(HelixSearch { keywords: vec![" ".into()], ..search.clone() }.validate().is_err());
		assert_eq!(
			to_body(&search, "helix search").expect("Search should serialize."),
			json!({
				"camera_ids": ["cam"],
				"start_time_ms": 1_000,
				"end_time_ms": 2_000,
				"event_type_uid": "type",
				"flagged": false,
				"keywords": ["pallet"],
			})
		);
	}
}
