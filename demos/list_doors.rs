//! Lists doors and walks recent access events against a local mock of the Verkada API.
//!
//! Point [`ClientConfig::with_base_url`] at the real API root (or use
//! [`VerkadaClient::from_env`]) to run the same calls against an organization.

// crates.io
use color_eyre::Result;
use futures::TryStreamExt;
use httpmock::prelude::*;
// self
use verkada_api::{
	api::access_events::AccessEventsQuery,
	client::VerkadaClient,
	config::ClientConfig,
	serde_json::json,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/token").header("x-api-key", "demo-api-key");
			then.status(200).json_body(json!({ "token": "demo-token" }));
		})
		.await;
	let doors_mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/access/v1/doors")
				.query_param("site_ids", "site-hq")
				.header("x-verkada-auth", "demo-token");
			then.status(200).json_body(json!({
				"doors": [
					{ "door_id": "door-lobby", "name": "Lobby" },
					{ "door_id": "door-dock", "name": "Loading dock" },
				],
			}));
		})
		.await;
	let first_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/events/v1/access").query_param_missing("page_token");
			then.status(200).json_body(json!({
				"events": [{ "event_type": "door_opened", "door_id": "door-lobby" }],
				"next_page_token": "cursor-2",
			}));
		})
		.await;
	let second_page = server
		.mock_async(|when, then| {
			when.method(GET).path("/events/v1/access").query_param("page_token", "cursor-2");
			then.status(200).json_body(json!({
				"events": [{ "event_type": "door_rejected", "door_id": "door-dock" }],
				"next_page_token": null,
			}));
		})
		.await;
	let config = ClientConfig::new("demo-api-key")?.with_base_url(&server.base_url())?;
	let client = VerkadaClient::new(config)?;
	let doors = client.get_doors::<&str, &str>(&[], &["site-hq"]).await?;

	println!("doors: {doors}");

	let events = client
		.iter_access_events(&AccessEventsQuery::default())?
		.into_stream()
		.try_collect::<Vec<_>>()
		.await?;

	for event in &events {
		println!("event: {event}");
	}

	token_mock.assert_async().await;
	doors_mock.assert_async().await;
	first_page.assert_async().await;
	second_page.assert_async().await;

	Ok(())
}
