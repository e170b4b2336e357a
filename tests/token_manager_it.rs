#![cfg(feature = "test")]

// crates.io
use httpmock::prelude::*;
// self
use verkada_api::{
	_preludet::*,
	api::camera_stream::StreamOptions,
	client::VerkadaClient,
	error::TokenError,
	http::Query,
};

async fn mock_token<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let body = format!("{{\"token\":\"{token}\"}}");

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token").header("x-api-key", TEST_API_KEY);
			then.status(200).header("content-type", "application/json").body(body);
		})
		.await
}

async fn mock_doors<'a>(server: &'a MockServer, token: &str) -> httpmock::Mock<'a> {
	let token = token.to_owned();

	server
		.mock_async(|when, then| {
			when.method(GET).path("/access/v1/doors").header("x-verkada-auth", token);
			then.status(200).header("content-type", "application/json").body("{\"doors\":[]}");
		})
		.await
}

#[tokio::test]
async fn token_is_cached_across_requests() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token(&server, "cached-token").await;
	let doors_mock = mock_doors(&server, "cached-token").await;
	let client = build_test_client(&server.base_url());

	for _ in 0..3 {
		client.get_doors::<&str, &str>(&[], &[]).await.expect("Doors request should succeed.");
	}

	token_mock.assert_calls_async(1).await;
	doors_mock.assert_calls_async(3).await;
	assert_eq!(client.tokens().metrics().cache_hits(), 2);
}

#[tokio::test]
async fn buffer_at_least_lifetime_refreshes_every_call() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token(&server, "short-token").await;
	let doors_mock = mock_doors(&server, "short-token").await;
	let config = test_config(&server.base_url())
		.with_token_lifetime(Duration::minutes(30))
		.with_refresh_buffer(Duration::minutes(30));
	let client = VerkadaClient::new(config).expect("Client should build.");

	client.get_doors::<&str, &str>(&[], &[]).await.expect("First request should succeed.");
	client.get_doors::<&str, &str>(&[], &[]).await.expect("Second request should succeed.");

	token_mock.assert_calls_async(2).await;
	doors_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn concurrent_callers_share_one_fetch() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token(&server, "shared-token").await;
	let client = build_test_client(&server.base_url());
	let tokens = client.tokens();
	let (first, second, third) = tokio::join!(tokens.get_token(), tokens.get_token(), tokens.get_token());

	for token in [first, second, third] {
		assert_eq!(token.expect("Token should be fetched.").expose(), "shared-token");
	}

	token_mock.assert_calls_async(1).await;
	assert_eq!(tokens.metrics().attempts(), 1);
}

#[tokio::test]
async fn invalidate_forces_a_new_fetch() {
	let server = MockServer::start_async().await;
	let token_mock = mock_token(&server, "first").await;
	let client = build_test_client(&server.base_url());

	client.tokens().get_token().await.expect("Token should be fetched.");
	client.tokens().invalidate();
	assert!(client.tokens().cached().is_none());
	client.tokens().get_token().await.expect("Token should be fetched again.");

	token_mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn token_endpoint_errors_are_not_retried() {
	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(503).body("maintenance");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let err = client
		.requests()
		.get("/access/v1/doors", Query::new())
		.await
		.expect_err("Token failure should surface.");

	assert!(matches!(err, Error::Token(TokenError::Status { status: 503, .. })), "{err:?}");
	assert_eq!(err.status(), Some(503));
	token_mock.assert_calls_async(1).await;
	assert_eq!(client.tokens().metrics().failures(), 1);
}

#[tokio::test]
async fn token_response_without_key_is_rejected() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body("{\"jwt\":\"x\"}");
		})
		.await;

	let client = build_test_client(&server.base_url());
	let err = client.tokens().get_token().await.expect_err("Missing key should fail.");

	assert!(matches!(err, Error::Token(TokenError::MissingField { ref key }) if key == "token"));
}

#[tokio::test]
async fn stream_url_uses_streaming_jwt_and_org() {
	let server = MockServer::start_async().await;
	let jwt_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/cameras/v1/footage/token").header("x-api-key", TEST_API_KEY);
			then.status(200).header("content-type", "application/json").body("{\"jwt\":\"stream-jwt\"}");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let url = client
		.get_stream_playlist_url("cam-1", &StreamOptions::default())
		.await
		.expect("Playlist URL should build.");

	assert_eq!(url.path(), "/stream/cameras/v1/footage/stream/stream.m3u8");
	assert_eq!(
		url.query(),
		Some(
			"jwt=stream-jwt&org_id=test-org&camera_id=cam-1&start_time=0&end_time=0&codec=hevc&resolution=low_res&type=stream"
		)
	);

	client
		.get_stream_playlist_url("cam-2", &StreamOptions::default())
		.await
		.expect("Second URL should reuse the cached jwt.");
	jwt_mock.assert_calls_async(1).await;
}
