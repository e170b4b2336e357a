//! Resource operations grouped by product area.
//!
//! Each submodule adds an `impl VerkadaClient` block. Operations validate their inputs before
//! any network call, then delegate to the client's [`RequestManager`](crate::http::RequestManager).
//! List endpoints that page also expose an `iter_*` helper returning a
//! [`ClientPaginator`](crate::pagination::ClientPaginator) with explicit keys.

pub mod access_credentials;
pub mod access_doors;
pub mod access_events;
pub mod access_groups;
pub mod access_levels;
pub mod access_users;
pub mod alarms;
pub mod camera_stream;
pub mod cameras;
pub mod core_command;
pub mod door_exceptions;
pub mod guest;
pub mod helix;
pub mod sensors;
pub mod viewing_stations;

// self
use crate::{
	_prelude::*,
	error::ValidationError,
	http::Query,
	pagination::{PAGE_SIZE, PAGE_TOKEN},
	validate,
};

/// Adds the optional cursor and page size of a single-page call.
fn insert_page(
	query: &mut Query,
	page_token: Option<&str>,
	page_size: Option<i64>,
) -> Result<(), ValidationError> {
	let page_size = page_size.map(validate::require_page_size).transpose()?;

	query.insert_opt(PAGE_TOKEN, page_token).insert_opt(PAGE_SIZE, page_size);

	Ok(())
}

/// Adds optional `start_time`/`end_time` bounds, rejecting an inverted window.
fn insert_window(
	query: &mut Query,
	start_time: Option<i64>,
	end_time: Option<i64>,
) -> Result<(), ValidationError> {
	if let (Some(start), Some(end)) = (start_time, end_time) {
		validate::resolve_window(Some(start), Some(end), end)?;
	}

	query.insert_opt("start_time", start_time).insert_opt("end_time", end_time);

	Ok(())
}

fn to_body<T>(value: &T, what: &'static str) -> Result<Value>
where
	T: Serialize,
{
	serde_json::to_value(value).map_err(|e| ValidationError::invalid(what, e.to_string()).into())
}
