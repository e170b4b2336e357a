//! Eager input checks shared by the resource wrappers.
//!
//! Every check runs before any network call and fails with a [`ValidationError`].

// crates.io
use time::{Date, Time, macros::format_description};
// self
use crate::{_prelude::*, error::ValidationError};

/// Largest page size accepted by list endpoints.
pub const MAX_PAGE_SIZE: i64 = 200;
/// Default look-back window for time-ranged queries, in seconds.
pub const DEFAULT_WINDOW_SECS: i64 = 3600;

/// Rejects empty or whitespace-only strings.
pub fn require_non_empty(value: &str, field: &'static str) -> Result<(), ValidationError> {
	if value.trim().is_empty() {
		return Err(ValidationError::Empty { field });
	}

	Ok(())
}

/// Rejects an empty list or any blank element.
pub fn require_non_empty_each<T>(values: &[T], field: &'static str) -> Result<(), ValidationError>
where
	T: AsRef<str>,
{
	if values.is_empty() {
		return Err(ValidationError::EmptyList { field });
	}

	require_each(values, field)
}

/// Rejects any blank element; an empty list passes.
pub fn require_each<T>(values: &[T], field: &'static str) -> Result<(), ValidationError>
where
	T: AsRef<str>,
{
	match values.iter().position(|v| v.as_ref().trim().is_empty()) {
		Some(index) => Err(ValidationError::EmptyAt { field, index }),
		None => Ok(()),
	}
}

/// Checks an optional string is non-empty when present.
pub fn require_non_empty_opt(
	value: Option<&str>,
	field: &'static str,
) -> Result<(), ValidationError> {
	value.map_or(Ok(()), |v| require_non_empty(v, field))
}

/// Checks `min <= value <= max`.
pub fn require_range(
	value: i64,
	field: &'static str,
	min: i64,
	max: i64,
) -> Result<(), ValidationError> {
	if !(min..=max).contains(&value) {
		return Err(ValidationError::OutOfRange { field, value, min, max });
	}

	Ok(())
}

/// Page size in `0..=200`.
pub fn require_page_size(page_size: i64) -> Result<u32, ValidationError> {
	require_range(page_size, "page_size", 0, MAX_PAGE_SIZE)?;

	// In range, so the conversion cannot fail.
	Ok(u32::try_from(page_size).unwrap_or_default())
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str, field: &'static str) -> Result<Date, ValidationError> {
	let shaped = value.len() == 10
		&& value.bytes().enumerate().all(|(i, b)| match i {
			4 | 7 => b == b'-',
			_ => b.is_ascii_digit(),
		});
	let invalid = || ValidationError::InvalidDate { field, value: value.to_owned() };

	if !shaped {
		return Err(invalid());
	}

	Date::parse(value, format_description!("[year]-[month]-[day]")).map_err(|_| invalid())
}

/// Parses a zero-padded `HH:MM` clock time between `00:00` and `23:59`.
pub fn parse_clock(value: &str, field: &'static str) -> Result<Time, ValidationError> {
	let shaped = value.len() == 5
		&& value
			.bytes()
			.enumerate()
			.all(|(i, b)| if i == 2 { b == b':' } else { b.is_ascii_digit() });
	let invalid = || ValidationError::InvalidTime { field, value: value.to_owned() };

	if !shaped {
		return Err(invalid());
	}

	Time::parse(value, format_description!("[hour]:[minute]")).map_err(|_| invalid())
}

/// Resolves an optional `[start, end]` window in unix seconds.
///
/// Missing bounds default to the hour ending at `now`: `end = now`, `start = end - 3600`.
pub fn resolve_window(
	start: Option<i64>,
	end: Option<i64>,
	now: i64,
) -> Result<(i64, i64), ValidationError> {
	let end = end.unwrap_or(now);
	let start = start.unwrap_or(end - DEFAULT_WINDOW_SECS);

	if start > end {
		return Err(ValidationError::InvalidWindow {
			reason: format!("start {start} is after end {end}"),
		});
	}

	Ok((start, end))
}

/// Rejects windows longer than `max_secs`.
pub fn require_max_window(start: i64, end: i64, max_secs: i64) -> Result<(), ValidationError> {
	if end - start > max_secs {
		return Err(ValidationError::InvalidWindow {
			reason: format!("span of {} seconds exceeds {max_secs}", end - start),
		});
	}

	Ok(())
}

/// Current unix time in seconds.
pub fn unix_now() -> i64 {
	OffsetDateTime::now_utc().unix_timestamp()
}

/// Checks a CSV document's header row holds exactly `expected` (order ignored).
pub fn require_csv_headers(contents: &[u8], expected: &[&str]) -> Result<(), ValidationError> {
	let text = String::from_utf8_lossy(contents);
	let header = text.trim_start_matches('\u{feff}').lines().next().unwrap_or_default();
	let mut found = header
		.split(',')
		.map(|column| column.trim().trim_matches('"').to_owned())
		.filter(|column| !column.is_empty())
		.collect::<Vec<_>>();
	let mut wanted = expected.iter().map(|c| (*c).to_owned()).collect::<Vec<_>>();

	found.sort();
	wanted.sort();

	if found != wanted {
		return Err(ValidationError::CsvHeader {
			expected: expected.join(", "),
			found: header.trim().to_owned(),
		});
	}

	Ok(())
}

/// Drops `null` members from a JSON object.
pub fn remove_null_fields(mut object: Map<String, Value>) -> Map<String, Value> {
	object.retain(|_, v| !v.is_null());

	object
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn page_size_bounds_are_inclusive() {
		assert_eq!(require_page_size(0), Ok(0));
		assert_eq!(require_page_size(200), Ok(200));
		assert!(require_page_size(-1).is_err());
		assert!(require_page_size(201).is_err());
	}

	#[test]
	fn dates_need_full_padding_and_a_real_day() {
		assert!(parse_date("2025-03-01", "date").is_ok());
		assert!(parse_date("2025-3-01", "date").is_err());
		assert!(parse_date("2025-02-30", "date").is_err());
		assert!(parse_date("20250301", "date").is_err());
	}

	#[test]
	fn clock_times_need_leading_zeros() {
		assert!(parse_clock("00:00", "start_time").is_ok());
		assert!(parse_clock("23:59", "start_time").is_ok());
		assert!(parse_clock("9:30", "start_time").is_err());
		assert!(parse_clock("24:00", "start_time").is_err());
		assert!(parse_clock("12:60", "start_time").is_err());
	}

	#[test]
	fn window_defaults_to_last_hour() {
		assert_eq!(resolve_window(None, None, 10_000), Ok((6_400, 10_000)));
		assert_eq!(resolve_window(Some(5), None, 10_000), Ok((5, 10_000)));
		assert_eq!(resolve_window(None, Some(7_200), 10_000), Ok((3_600, 7_200)));
		assert!(resolve_window(Some(10), Some(5), 10_000).is_err());
		assert!(require_max_window(0, 86_401, 86_400).is_err());
	}

	#[test]
	fn csv_headers_must_match_exactly() {
		let ok = b"Name,License Plate\nalice,ABC123\n";
		let extra = b"License Plate,Name,Color\n";

		assert!(require_csv_headers(ok, &["License Plate", "Name"]).is_ok());
		assert!(require_csv_headers(extra, &["License Plate", "Name"]).is_err());
		assert!(require_csv_headers(b"", &["License Plate"]).is_err());
	}

	#[test]
	fn blank_list_members_report_their_index() {
		assert_eq!(
			require_non_empty_each(&["a", " "], "device_ids"),
			Err(ValidationError::EmptyAt { field: "device_ids", index: 1 })
		);
		assert_eq!(
			require_non_empty_each::<&str>(&[], "device_ids"),
			Err(ValidationError::EmptyList { field: "device_ids" })
		);
	}

	#[test]
	fn null_fields_are_removed() {
		let object = json!({"a": 1, "b": null}).as_object().cloned().expect("Object literal.");

		assert_eq!(Value::Object(remove_null_fields(object)), json!({"a": 1}));
	}
}
