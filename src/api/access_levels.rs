//! Access levels and their weekly schedule events.

// self
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::Query,
	types::{AccessScheduleEvent, Weekday},
	validate,
};

/// Body of an access level create or update.
///
/// Unset lists are sent as `[]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLevel {
	/// Group ids granted this level.
	pub access_groups: Vec<String>,
	/// Weekly windows.
	pub access_schedule_events: Vec<AccessScheduleEvent>,
	/// Door ids covered.
	pub doors: Vec<String>,
	/// Display name.
	pub name: String,
	/// Site ids covered.
	pub sites: Vec<String>,
}
impl AccessLevel {
	/// Creates an empty level with a name.
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into(), ..Default::default() }
	}

	/// Sets the group ids.
	pub fn with_access_groups(mut self, ids: Vec<String>) -> Self {
		self.access_groups = ids;

		self
	}

	/// Sets the schedule events.
	pub fn with_schedule_events(mut self, events: Vec<AccessScheduleEvent>) -> Self {
		self.access_schedule_events = events;

		self
	}

	/// Sets the door ids.
	pub fn with_doors(mut self, ids: Vec<String>) -> Self {
		self.doors = ids;

		self
	}

	/// Sets the site ids.
	pub fn with_sites(mut self, ids: Vec<String>) -> Self {
		self.sites = ids;

		self
	}

	/// Checks the name and every schedule event.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty(&self.name, "name")?;
		validate::require_each(&self.access_groups, "access_groups")?;
		validate::require_each(&self.doors, "doors")?;
		validate::require_each(&self.sites, "sites")?;

		self.access_schedule_events.iter().try_for_each(AccessScheduleEvent::validate)
	}

	fn to_json(&self) -> Result<Value> {
		super::to_body(self, "access level")
	}
}

fn level_path(access_level_id: &str) -> Result<String> {
	validate::require_non_empty(access_level_id, "access_level_id")?;

	Ok(format!("{}/{access_level_id}", endpoints::ACCESS_LEVELS))
}

fn schedule_event_path(access_level_id: &str, event_id: Option<&str>) -> Result<String> {
	let base = format!("{}/access_schedule_event", level_path(access_level_id)?);

	match event_id {
		Some(id) => {
			validate::require_non_empty(id, "event_id")?;

			Ok(format!("{base}/{id}"))
		},
		None => Ok(base),
	}
}

fn schedule_event_body(start_time: &str, end_time: &str, weekday: Weekday) -> Result<Value> {
	let event = AccessScheduleEvent::new(start_time, end_time, weekday);

	event.validate()?;

	Ok(json!({
		"door_status": event.door_status,
		"start_time": event.start_time,
		"end_time": event.end_time,
		"weekday": event.weekday,
	}))
}

impl VerkadaClient {
	/// Lists every access level.
	pub async fn get_all_access_levels(&self) -> Result<Value> {
		self.requests().get(endpoints::ACCESS_LEVELS, Query::new()).await
	}

	/// Fetches one access level.
	pub async fn get_access_level(&self, access_level_id: &str) -> Result<Value> {
		self.requests().get(&level_path(access_level_id)?, Query::new()).await
	}

	/// Creates an access level.
	pub async fn create_access_level(&self, level: &AccessLevel) -> Result<Value> {
		level.validate()?;

		self.requests().post(endpoints::ACCESS_LEVELS, Query::new(), Some(level.to_json()?)).await
	}

	/// Replaces an access level.
	pub async fn update_access_level(
		&self,
		access_level_id: &str,
		level: &AccessLevel,
	) -> Result<Value> {
		let path = level_path(access_level_id)?;

		level.validate()?;

		self.requests().put(&path, Query::new(), Some(level.to_json()?)).await
	}

	/// Deletes an access level; returns the raw confirmation body.
	pub async fn delete_access_level(&self, access_level_id: &str) -> Result<Vec<u8>> {
		let path = level_path(access_level_id)?;
		let query = Query::new().with("access_level_id", access_level_id);

		self.requests().delete_raw(&path, query).await
	}

	/// Adds a weekly window to an access level.
	pub async fn add_access_schedule_event_to_access_level(
		&self,
		access_level_id: &str,
		start_time: &str,
		end_time: &str,
		weekday: Weekday,
	) -> Result<Value> {
		let path = schedule_event_path(access_level_id, None)?;
		let body = schedule_event_body(start_time, end_time, weekday)?;

		self.requests().post(&path, Query::new(), Some(body)).await
	}

	/// Replaces a weekly window on an access level.
	pub async fn update_access_schedule_event_on_access_level(
		&self,
		access_level_id: &str,
		event_id: &str,
		start_time: &str,
		end_time: &str,
		weekday: Weekday,
	) -> Result<Value> {
		let path = schedule_event_path(access_level_id, Some(event_id))?;
		let body = schedule_event_body(start_time, end_time, weekday)?;

		self.requests().put(&path, Query::new(), Some(body)).await
	}

	/// Removes a weekly window from an access level; returns the raw confirmation body.
	pub async fn delete_access_schedule_event_on_access_level(
		&self,
		access_level_id: &str,
		event_id: &str,
	) -> Result<Vec<u8>> {
		let path = schedule_event_path(access_level_id, Some(event_id))?;

		self.requests().delete_raw(&path, Query::new()).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unset_lists_serialize_as_empty_arrays() {
		let body = AccessLevel::new("Night shift").to_json().expect("Level should serialize.");

		assert_eq!(
			body,
			json!({
				"access_groups": [],
				"access_schedule_events": [],
				"doors": [],
				"name": "Night shift",
				"sites": [],
			})
		);
	}

	#[test]
	fn schedule_event_body_is_fixed_to_access_granted() {
		let body =
			schedule_event_body("08:00", "17:30", Weekday::Monday)
				.expect("Valid times should pass.");

		assert_eq!(
			body,
			json!({
				"door_status": "access_granted",
				"start_time": "08:00",
				"end_time": "17:30",
				"weekday": "MO",
			})
		);
		assert!(schedule_event_body("8:00", "17:30", Weekday::Monday).is_err());
	}

	#[test]
	fn blank_name_or_ids_are_rejected() {
		assert!(AccessLevel::new(" ").validate().is_err());
		assert!(AccessLevel::new("a").with_doors(vec![String::new()]).validate().is_err());
		assert!(schedule_event_path("level", Some("")).is_err());
		assert_eq!(
			schedule_event_path("level", Some("ev")).expect("Ids should be accepted."),
			"/access/v1/door/access_level/level/access_schedule_event/ev"
		);
	}
}
