//! Guest sites, visits, and deny lists.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use super::insert_page;
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::{Attachment, Query},
	pagination::{ClientPaginator, DEFAULT_PAGE_SIZE, PageKeys},
	validate,
};

/// Longest visit window accepted by the API.
pub const MAX_VISIT_WINDOW_SECS: i64 = 86_400;

fn visits_query(site_id: &str, start_time: i64, end_time: i64) -> Result<Query, ValidationError> {
	validate::require_non_empty(site_id, "site_id")?;
	validate::resolve_window(Some(start_time), Some(end_time), end_time)?;
	validate::require_max_window(start_time, end_time, MAX_VISIT_WINDOW_SECS)?;

	Ok(Query::new()
		.with("site_id", site_id)
		.with("start_time", start_time)
		.with("end_time", end_time))
}

fn deny_list_body(csv: &[u8]) -> Result<Value, ValidationError> {
	if csv.is_empty() {
		return Err(ValidationError::Empty { field: "deny_list_csv" });
	}

	Ok(json!({ "base64_ascii_deny_list_csv": STANDARD.encode(csv) }))
}

impl VerkadaClient {
	/// Every guest site.
	pub async fn get_guest_sites(&self) -> Result<Value> {
		self.requests().get(endpoints::GUEST_SITES, Query::new()).await
	}

	/// Fetches one page of visits; the window may span at most one day.
	pub async fn get_guest_visits(
		&self,
		site_id: &str,
		start_time: i64,
		end_time: i64,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = visits_query(site_id, start_time, end_time)?;

		insert_page(&mut query, page_token, Some(page_size.unwrap_or(DEFAULT_PAGE_SIZE.into())))?;

		self.requests().get(endpoints::GUEST_VISITS, query).await
	}

	/// Walks every visit in the window.
	pub fn iter_guest_visits(
		&self,
		site_id: &str,
		start_time: i64,
		end_time: i64,
	) -> Result<ClientPaginator<'_>> {
		Ok(self.paginate(
			endpoints::GUEST_VISITS,
			visits_query(site_id, start_time, end_time)?,
			PageKeys::new("visits", "next_page_token"),
		))
	}

	/// Replaces a site's deny list with `csv`, sent base64-encoded.
	pub async fn create_guest_deny_list(&self, site_id: &str, csv: &[u8]) -> Result<Value> {
		validate::require_non_empty(site_id, "site_id")?;

		let body = deny_list_body(csv)?;
		let query = Query::new().with("site_id", site_id);

		self.requests().post(endpoints::GUEST_DENY_LIST, query, Some(body)).await
	}

	/// Reads a CSV from disk and passes it to [`VerkadaClient::create_guest_deny_list`].
	pub async fn create_guest_deny_list_from_path(
		&self,
		site_id: &str,
		path: impl AsRef<std::path::Path>,
	) -> Result<Value> {
		validate::require_non_empty(site_id, "site_id")?;

		let csv = Attachment::from_path(path).await?;

		self.create_guest_deny_list(site_id, &csv.bytes).await
	}

	/// Removes a site's deny list.
	pub async fn delete_guest_deny_list(&self, site_id: &str) -> Result<Value> {
		validate::require_non_empty(site_id, "site_id")?;

		let query = Query::new().with("site_id", site_id);

		self.requests().delete(endpoints::GUEST_DENY_LIST, query).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn visit_window_is_capped_at_one_day() {
		assert!(visits_query("site", 0, 86_400).is_ok());
		assert!(visits_query("site", 0, 86_401).is_err());
		assert!(visits_query("site", 10, 0).is_err());
		assert!(visits_query("", 0, 10).is_err());
	}

	#[test]
	fn deny_list_is_base64_encoded() {
		assert_eq!(
			deny_list_body(b"name\nbob\n").expect("CSV should encode."),
			json!({"base64_ascii_deny_list_csv": "bmFtZQpib2IK"})
		);
		assert!(deny_list_body(b"").is_err());
	}
}
