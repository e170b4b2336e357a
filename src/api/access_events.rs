//! Access control event history.

// self
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::Query,
	pagination::{ClientPaginator, DEFAULT_PAGE_SIZE, PAGE_SIZE, PAGE_TOKEN, PageKeys},
	types::AccessEventType,
	validate,
};

/// Filters for [`VerkadaClient::get_access_events`].
///
/// Missing bounds default to the hour ending now.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessEventsQuery {
	/// Window start, unix seconds.
	pub start_time: Option<i64>,
	/// Window end, unix seconds.
	pub end_time: Option<i64>,
	/// Cursor from a previous page.
	pub page_token: Option<String>,
	/// Page size in `0..=200`; defaults to 100.
	pub page_size: Option<i64>,
	/// Event types to include.
	pub event_types: Vec<AccessEventType>,
	/// Site filter.
	pub site_id: Option<String>,
	/// Device filter.
	pub device_id: Option<String>,
	/// User filter.
	pub user_id: Option<String>,
}
impl AccessEventsQuery {
	/// Resolves defaults against `now` (unix seconds) and builds the query string.
	pub fn to_query(&self, now: i64) -> Result<Query, ValidationError> {
		let (start, end) = validate::resolve_window(self.start_time, self.end_time, now)?;
		let page_size =
			validate::require_page_size(self.page_size.unwrap_or(DEFAULT_PAGE_SIZE.into()))?;
		let mut query = Query::new();

		query
			.insert("start_time", start)
			.insert("end_time", end)
			.insert_opt(PAGE_TOKEN, self.page_token.as_deref())
			.insert(PAGE_SIZE, page_size)
			.insert_list("event_type", &self.event_types)
			.insert_opt("site_id", self.site_id.as_deref())
			.insert_opt("device_id", self.device_id.as_deref())
			.insert_opt("user_id", self.user_id.as_deref());

		Ok(query)
	}
}

impl VerkadaClient {
	/// Fetches one page of access events.
	pub async fn get_access_events(&self, filter: &AccessEventsQuery) -> Result<Value> {
		let query = filter.to_query(validate::unix_now())?;

		self.requests().get(endpoints::ACCESS_EVENTS, query).await
	}

	/// Walks every access event matching `filter`; the window is fixed when this is called.
	pub fn iter_access_events(&self, filter: &AccessEventsQuery) -> Result<ClientPaginator<'_>> {
		let query = filter.to_query(validate::unix_now())?;

		let keys = PageKeys::new("events", "next_page_token");

		Ok(self.paginate(endpoints::ACCESS_EVENTS, query, keys))
	}
}
