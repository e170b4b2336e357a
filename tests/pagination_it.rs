#![cfg(feature = "test")]

// crates.io
use futures::TryStreamExt;
use httpmock::prelude::*;
// self
use verkada_api::{
	_preludet::*,
	api::access_events::AccessEventsQuery,
	error::PaginationError,
	http::Query,
	pagination::PageKeys,
};

async fn mock_token(server: &MockServer) {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body("{\"token\":\"tok\"}");
		})
		.await;
}

#[tokio::test]
async fn access_events_follow_the_cursor_until_it_runs_out() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let first = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/events/v1/access")
				.query_param("start_time", "100")
				.query_param("end_time", "200")
				.query_param("page_size", "2")
				.query_param_missing("page_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"events\":[{\"id\":1},{\"id\":2}],\"next_page_token\":\"p2\"}");
		})
		.await;
	let second = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/events/v1/access")
				.query_param("start_time", "100")
				.query_param("page_token", "p2");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"events\":[{\"id\":3}],\"next_page_token\":null}");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let filter = AccessEventsQuery {
		start_time: Some(100),
		end_time: Some(200),
		page_size: Some(2),
		..Default::default()
	};
	let mut pages = client.iter_access_events(&filter).expect("Filter should be valid.");
	let mut ids = Vec::new();

	while let Some(item) = pages.next_item().await.expect("Pages should load.") {
		ids.push(item["id"].as_i64().expect("Fixture ids are numbers."));
	}

	assert_eq!(ids, vec![1, 2, 3]);
	assert_eq!(pages.pages_fetched(), 2);
	first.assert_calls_async(1).await;
	second.assert_calls_async(1).await;
}

#[tokio::test]
async fn keys_are_inferred_when_not_given() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/alarms/v1/devices").query_param_missing("page_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"devices\":[\"a\"],\"next_page_token\":\"n\"}");
		})
		.await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/alarms/v1/devices").query_param("page_token", "n");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"devices\":[\"b\"],\"next_page_token\":\"\"}");
		})
		.await;

	let client = build_test_client(&server.base_url());
	let items = client
		.paginate_with("/alarms/v1/devices", Query::new())
		.into_stream()
		.try_collect::<Vec<_>>()
		.await
		.expect("Stream should drain.");

	assert_eq!(items, vec![json!("a"), json!("b")]);
}

#[tokio::test]
async fn ambiguous_pages_fail_inference() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/guest/v1/sites");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"sites\":[],\"other\":[],\"next_page_token\":null}");
		})
		.await;

	let client = build_test_client(&server.base_url());
	let err = client
		.paginate_with("/guest/v1/sites", Query::new())
		.collect_all()
		.await
		.expect_err("Three keys should not be inferred.");

	assert!(matches!(err, Error::Pagination(PaginationError::Inference { .. })), "{err:?}");
}

#[tokio::test]
async fn explicit_keys_skip_missing_items() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(GET).path("/cameras/v1/devices");
			then.status(200).header("content-type", "application/json").body("{\"next_page_token\":null}");
		})
		.await;

	let client = build_test_client(&server.base_url());
	let items = client
		.paginate("/cameras/v1/devices", Query::new(), PageKeys::new("cameras", "next_page_token"))
		.collect_all()
		.await
		.expect("Empty page should end iteration.");

	assert!(items.is_empty());
}
