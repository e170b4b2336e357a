//! Cursor pagination over any async page-fetching function.
//!
//! A [`Paginator`] adds `page_size` and `page_token` to a fixed set of parameters, calls the
//! page function, yields each element under the items key in server order, and stops once the
//! cursor key is `null`, absent, or empty. The first failure ends the walk.
//!
//! Explicit keys are the contract. [`PageKeys::infer`] is a fallback that guesses from the
//! first page's key set and fails loudly when the guess is ambiguous.

// std
use std::collections::VecDeque;
// crates.io
use futures::{Stream, stream};
// self
use crate::{
	_prelude::*,
	error::PaginationError,
	http::Query,
	obs::{self, RequestKind, RequestOutcome},
};

/// Boxed page future used by client-backed paginators.
pub type PageFuture<'a> = Pin<Box<dyn Future<Output = Result<Value>> + Send + 'a>>;
/// Boxed page function used by client-backed paginators.
pub type PageFn<'a> = Box<dyn FnMut(Query) -> PageFuture<'a> + Send + 'a>;
/// Paginator returned by [`VerkadaClient`](crate::client::VerkadaClient) list helpers.
pub type ClientPaginator<'a> = Paginator<PageFn<'a>>;

/// Query key carrying the cursor.
pub const PAGE_TOKEN: &str = "page_token";
/// Query key carrying the page size.
pub const PAGE_SIZE: &str = "page_size";
/// Page size used when the parameters do not set one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Response keys holding a page's items and the next cursor.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PageKeys {
	/// Key of the items array.
	pub items_key: String,
	/// Key of the next-page cursor.
	pub cursor_key: String,
}
impl PageKeys {
	/// Explicit keys.
	pub fn new(items_key: impl Into<String>, cursor_key: impl Into<String>) -> Self {
		Self { items_key: items_key.into(), cursor_key: cursor_key.into() }
	}

	/// Guesses both keys from a page.
	///
	/// The cursor key is the only key containing `token`; the items key is the other key of a
	/// two-key page.
	pub fn infer(page: &Map<String, Value>) -> Result<Self, PaginationError> {
		Ok(Self { items_key: infer_items_key(page)?, cursor_key: infer_cursor_key(page)? })
	}
}

fn infer_cursor_key(page: &Map<String, Value>) -> Result<String, PaginationError> {
	let mut candidates = page.keys().filter(|key| key.contains("token"));

	match (candidates.next(), candidates.next()) {
		(Some(key), None) => Ok(key.clone()),
		_ => Err(PaginationError::Inference { which: "cursor", keys: key_list(page) }),
	}
}

fn infer_items_key(page: &Map<String, Value>) -> Result<String, PaginationError> {
	let mut candidates = page.keys().filter(|key| !key.contains("token"));

	match (page.len(), candidates.next(), candidates.next()) {
		(2, Some(key), None) => Ok(key.clone()),
		_ => Err(PaginationError::Inference { which: "items", keys: key_list(page) }),
	}
}

fn key_list(page: &Map<String, Value>) -> String {
	page.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum PageState {
	Start,
	Next(String),
	Done,
}

/// Lazily walks every page produced by `fetch`.
pub struct Paginator<F> {
	fetch: F,
	params: Query,
	items_key: Option<String>,
	cursor_key: Option<String>,
	delay: StdDuration,
	state: PageState,
	buffer: VecDeque<Value>,
	pages: u64,
}
impl<F, Fut> Paginator<F>
where
	F: FnMut(Query) -> Fut,
	Fut: Future<Output = Result<Value>>,
{
	/// Creates a paginator over `fetch` with fixed `params`.
	///
	/// A `page_token` in `params` is discarded; a missing `page_size` defaults to 100.
	pub fn new(fetch: F, mut params: Query) -> Self {
		params.remove(PAGE_TOKEN);

		if params.get(PAGE_SIZE).is_none() {
			params.insert(PAGE_SIZE, DEFAULT_PAGE_SIZE);
		}

		Self {
			fetch,
			params,
			items_key: None,
			cursor_key: None,
			delay: StdDuration::ZERO,
			state: PageState::Start,
			buffer: VecDeque::new(),
			pages: 0,
		}
	}

	/// Uses explicit keys.
	pub fn with_keys(mut self, keys: PageKeys) -> Self {
		self.items_key = Some(keys.items_key);
		self.cursor_key = Some(keys.cursor_key);

		self
	}

	/// Uses an explicit items key; the cursor key is still inferred unless set.
	pub fn with_items_key(mut self, key: impl Into<String>) -> Self {
		self.items_key = Some(key.into());

		self
	}

	/// Uses an explicit cursor key; the items key is still inferred unless set.
	pub fn with_cursor_key(mut self, key: impl Into<String>) -> Self {
		self.cursor_key = Some(key.into());

		self
	}

	/// Overrides the page size.
	pub fn with_page_size(mut self, page_size: u32) -> Self {
		self.params.insert(PAGE_SIZE, page_size);

		self
	}

	/// Waits `delay` before every page after the first.
	pub fn with_delay(mut self, delay: StdDuration) -> Self {
		self.delay = delay;

		self
	}

	/// Pages fetched so far.
	pub fn pages_fetched(&self) -> u64 {
		self.pages
	}

	/// Returns the next item, fetching pages as needed; `None` once the cursor runs out.
	pub async fn next_item(&mut self) -> Result<Option<Value>> {
		loop {
			if let Some(item) = self.buffer.pop_front() {
				return Ok(Some(item));
			}

			let cursor = match &self.state {
				PageState::Done => return Ok(None),
				PageState::Start => None,
				PageState::Next(cursor) => Some(cursor.clone()),
			};

			if cursor.is_some() && !self.delay.is_zero() {
				tokio::time::sleep(self.delay).await;
			}

			let mut query = self.params.clone();

			query.insert_opt(PAGE_TOKEN, cursor);
			obs::record_request_outcome(RequestKind::Page, RequestOutcome::Attempt);

			let page = match (self.fetch)(query).await {
				Ok(page) => page,
				Err(e) => return Err(self.fail(e)),
			};

			if let Err(e) = self.absorb(page) {
				return Err(self.fail(e.into()));
			}

			obs::record_request_outcome(RequestKind::Page, RequestOutcome::Success);
		}
	}

	/// Drains every remaining item.
	pub async fn collect_all(mut self) -> Result<Vec<Value>> {
		let mut items = Vec::new();

		while let Some(item) = self.next_item().await? {
			items.push(item);
		}

		Ok(items)
	}

	/// Converts the paginator into a [`Stream`] of items.
	pub fn into_stream(self) -> impl Stream<Item = Result<Value>> {
		stream::try_unfold(self, |mut paginator| async move {
			Ok::<_, Error>(paginator.next_item().await?.map(|item| (item, paginator)))
		})
	}

	fn fail(&mut self, e: Error) -> Error {
		self.state = PageState::Done;

		obs::record_request_outcome(RequestKind::Page, RequestOutcome::Failure);

		e
	}

	fn absorb(&mut self, page: Value) -> Result<(), PaginationError> {
		let Value::Object(mut page) = page else {
			return Err(PaginationError::NotAnObject);
		};
		let cursor_key = match &self.cursor_key {
			Some(key) => key.clone(),
			None => infer_cursor_key(&page)?,
		};
		let items_key = match &self.items_key {
			Some(key) => key.clone(),
			None => infer_items_key(&page)?,
		};
		let items = match page.remove(&items_key) {
			Some(Value::Array(items)) => items,
			None | Some(Value::Null) => Vec::new(),
			Some(_) => return Err(PaginationError::ItemsNotArray { key: items_key }),
		};

		self.pages += 1;
		self.buffer.extend(items);
		self.state = match page.get(&cursor_key) {
			Some(Value::String(cursor)) if !cursor.is_empty() => PageState::Next(cursor.clone()),
			Some(Value::Number(cursor)) => PageState::Next(cursor.to_string()),
			_ => PageState::Done,
		};

		#[cfg(feature = "tracing")]
		tracing::debug!(
			page = self.pages,
			items = self.buffer.len(),
			more = self.state != PageState::Done,
			"Fetched page."
		);

		self.items_key = Some(items_key);
		self.cursor_key = Some(cursor_key);

		Ok(())
	}
}
impl<F> Debug for Paginator<F> {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Paginator")
			.field("params", &self.params)
			.field("items_key", &self.items_key)
			.field("cursor_key", &self.cursor_key)
			.field("state", &self.state)
			.field("pages", &self.pages)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use futures::TryStreamExt;
	// self
	use super::*;

	fn pages() -> Vec<Value> {
		vec![
			json!({"items": [1, 2], "next_page_token": "p2"}),
			json!({"items": [], "next_page_token": "p3"}),
			json!({"items": [3], "next_page_token": null}),
		]
	}

	fn fetcher(
		pages: Vec<Value>,
		seen: Arc<Mutex<Vec<Query>>>,
	) -> impl FnMut(Query) -> futures::future::Ready<Result<Value>> {
		let mut pages = pages.into_iter();

		move |query| {
			seen.lock().push(query);

			futures::future::ready(Ok(pages.next().unwrap_or(Value::Null)))
		}
	}

	#[tokio::test]
	async fn yields_pages_in_order_and_threads_cursor() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let params = Query::new().with("site_id", "s1").with(PAGE_TOKEN, "stale");
		let items = Paginator::new(fetcher(pages(), seen.clone()), params)
			.with_keys(PageKeys::new("items", "next_page_token"))
			.collect_all()
			.await
			.expect("Walk should succeed.");

		assert_eq!(items, vec![json!(1), json!(2), json!(3)]);

		let seen = seen.lock();

		assert_eq!(seen.len(), 3);
		assert_eq!(seen[0].get(PAGE_TOKEN), None);
		assert_eq!(seen[0].get(PAGE_SIZE), Some("100"));
		assert_eq!(seen[0].get("site_id"), Some("s1"));
		assert_eq!(seen[1].get(PAGE_TOKEN), Some("p2"));
		assert_eq!(seen[2].get(PAGE_TOKEN), Some("p3"));
	}

	#[tokio::test]
	async fn infers_keys_from_two_key_pages() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let stream = Paginator::new(fetcher(pages(), seen), Query::new()).into_stream();
		let items: Vec<Value> = stream.try_collect().await.expect("Walk should succeed.");

		assert_eq!(items.len(), 3);
	}

	#[tokio::test]
	async fn ambiguous_page_fails_loudly() {
		let seen = Arc::new(Mutex::new(Vec::new()));
		let page = json!({"items": [], "other": [], "next_page_token": null});
		let err = Paginator::new(fetcher(vec![page], seen), Query::new())
			.collect_all()
			.await
			.expect_err("Three keys should not be inferable.");

		assert!(matches!(
			err,
			Error::Pagination(PaginationError::Inference { which: "items", .. })
		));
	}

	#[tokio::test]
	async fn fetch_error_stops_iteration() {
		let mut calls = 0;
		let mut paginator = Paginator::new(
			|_query| {
				calls += 1;

				futures::future::ready(if calls == 1 {
					Ok(json!({"data": [1], "page_cursor": "next"}))
				} else {
					Err(Error::from(PaginationError::NotAnObject))
				})
			},
			Query::new(),
		)
		.with_keys(PageKeys::new("data", "page_cursor"));

		assert_eq!(paginator.next_item().await.expect("First item should load."), Some(json!(1)));
		assert!(paginator.next_item().await.is_err());
		assert_eq!(paginator.next_item().await.expect("Walk should be finished."), None);
	}

	#[tokio::test(start_paused = true)]
	async fn delay_applies_between_pages_only() {
		let start = tokio::time::Instant::now();
		let fetched_at = Arc::new(Mutex::new(Vec::new()));
		let mut pages = pages().into_iter();
		let recorder = fetched_at.clone();
		let items = Paginator::new(
			move |_query| {
				recorder.lock().push(start.elapsed());

				futures::future::ready(Ok(pages.next().unwrap_or(Value::Null)))
			},
			Query::new(),
		)
		.with_keys(PageKeys::new("items", "next_page_token"))
		.with_delay(StdDuration::from_secs(5))
		.collect_all()
		.await
		.expect("Walk should succeed.");

		assert_eq!(items.len(), 3);
		assert_eq!(
			*fetched_at.lock(),
			vec![StdDuration::ZERO, StdDuration::from_secs(5), StdDuration::from_secs(10)]
		);
	}

	#[test]
	fn infer_requires_single_token_key() {
		let page = json!({"a_token": null, "b_token": null});

		assert!(PageKeys::infer(page.as_object().expect("Page should be an object.")).is_err());

		let page = json!({"cameras": [], "next_page_token": "x"});

		assert_eq!(
			PageKeys::infer(page.as_object().expect("Page should be an object."))
				.expect("Keys should infer."),
			PageKeys::new("cameras", "next_page_token")
		);
	}
}
