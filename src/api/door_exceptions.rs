//! Door exception calendars and the exceptions on them.

// self
use super::to_body;
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	http::Query,
	types::{self, DoorException},
	validate,
};

fn calendar_query(calendar_id: &str) -> Result<Query> {
	validate::require_non_empty(calendar_id, "calendar_id")?;

	Ok(Query::new().with("calendar_id", calendar_id))
}

fn exception_path(calendar_id: &str, exception_id: Option<&str>) -> Result<String> {
	validate::require_non_empty(calendar_id, "calendar_id")?;

	let base = format!("{}/{calendar_id}/exception", endpoints::ACCESS_EXCEPTION_CALENDARS);

	match exception_id {
		Some(id) => {
			validate::require_non_empty(id, "exception_id")?;

			Ok(format!("{base}/{id}"))
		},
		None => Ok(base),
	}
}

fn calendar_body<D>(doors: &[D], exceptions: &[DoorException], name: &str) -> Result<Value>
where
	D: AsRef<str>,
{
	validate::require_non_empty_each(doors, "doors")?;
	validate::require_non_empty(name, "name")?;
	types::validate_exceptions(exceptions)?;

	let doors = doors.iter().map(|d| d.as_ref()).collect::<Vec<_>>();

	Ok(json!({
		"doors": doors,
		"exceptions": to_body(&exceptions, "exceptions")?,
		"name": name,
	}))
}

impl VerkadaClient {
	/// Lists every calendar, optionally only those changed after `last_updated_at` (unix seconds).
	pub async fn get_all_door_exception_calendars(
		&self,
		last_updated_at: Option<i64>,
	) -> Result<Value> {
		let query = Query::new().with_opt("last_updated_at", last_updated_at);

		self.requests().get(endpoints::ACCESS_EXCEPTION_CALENDARS, query).await
	}

	/// Fetches one calendar.
	pub async fn get_door_exception_calendar(&self, calendar_id: &str) -> Result<Value> {
		let query = calendar_query(calendar_id)?;

		self.requests().get(endpoints::ACCESS_EXCEPTION_CALENDARS, query).await
	}

	/// Creates a calendar covering `doors`.
	pub async fn create_door_exception_calendar<D>(
		&self,
		doors: &[D],
		exceptions: &[DoorException],
		name: &str,
	) -> Result<Value>
	where
		D: AsRef<str>,
	{
		let body = calendar_body(doors, exceptions, name)?;

		self.requests().post(endpoints::ACCESS_EXCEPTION_CALENDARS, Query::new(), Some(body)).await
	}

	/// Replaces a calendar.
	pub async fn update_door_exception_calendar<D>(
		&self,
		calendar_id: &str,
		doors: &[D],
		exceptions: &[DoorException],
		name: &str,
	) -> Result<Value>
	where
		D: AsRef<str>,
	{
		let query = calendar_query(calendar_id)?;
		let body = calendar_body(doors, exceptions, name)?;

		self.requests().put(endpoints::ACCESS_EXCEPTION_CALENDARS, query, Some(body)).await
	}

	/// Deletes a calendar.
	pub async fn delete_door_exception_calendar(&self, calendar_id: &str) -> Result<Value> {
		self.requests()
			.delete(endpoints::ACCESS_EXCEPTION_CALENDARS, calendar_query(calendar_id)?)
			.await
	}

	/// Fetches one exception from a calendar.
	pub async fn get_exception_on_door_exception_calendar(
		&self,
		calendar_id: &str,
		exception_id: &str,
	) -> Result<Value> {
		self.requests().get(&exception_path(calendar_id, Some(exception_id))?, Query::new()).await
	}

	/// Adds an exception to a calendar.
	pub async fn add_exception_to_door_exception_calendar(
		&self,
		calendar_id: &str,
		exception: &DoorException,
	) -> Result<Value> {
		let path = exception_path(calendar_id, None)?;

		exception.validate()?;

		self.requests().post(&path, Query::new(), Some(to_body(exception, "exception")?)).await
	}

	/// Replaces an exception on a calendar.
	pub async fn update_exception_on_door_exception_calendar(
		&self,
		calendar_id: &str,
		exception_id: &str,
		exception: &DoorException,
	) -> Result<Value> {
		let path = exception_path(calendar_id, Some(exception_id))?;

		exception.validate()?;

		self.requests().put(&path, Query::new(), Some(to_body(exception, "exception")?)).await
	}

	/// Removes an exception from a calendar.
	pub async fn delete_exception_on_door_exception_calendar(
		&self,
		calendar_id: &str,
		exception_id: &str,
	) -> Result<Value> {
		let path = exception_path(calendar_id, Some(exception_id))?;

		self.requests().delete(&path, Query::new()).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn calendar_body_rejects_bad_input_before_sending() {
		let ok = [DoorException::all_day("2025-12-25")];
		let mut bad = DoorException::all_day("2025-12-26");

		bad.start_time = Some("08:00".into());

		assert!(calendar_body::<&str>(&[], &ok, "Holidays").is_err());
		assert!(calendar_body(&["door"], &ok, " ").is_err());

		let err = calendar_body(&["door"], &[ok[0].clone(), bad], "Holidays")
			.expect_err("Second exception should fail.");

		assert!(err.to_string().contains("index 1"), "{err}");
	}

	#[test]
	fn calendar_body_keeps_door_order() {
		let body = calendar_body(&["d2", "d1"], &[], "Holidays").expect("Body should build.");

		assert_eq!(body["doors"], json!(["d2", "d1"]));
		assert_eq!(body["exceptions"], json!([]));
	}

	#[test]
	fn exception_paths_nest_under_the_calendar() {
		assert_eq!(
			exception_path("cal", Some("exc")).expect("Ids should be accepted."),
			"/access/v1/door/exception_calendar/cal/exception/exc"
		);
		assert!(exception_path("", None).is_err());
	}
}
