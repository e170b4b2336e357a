#![cfg(feature = "test")]

// crates.io
use httpmock::prelude::*;
// self
use verkada_api::{
	_preludet::*,
	api::{access_credentials::AccessCard, access_levels::AccessLevel},
	error::{TransportError, ValidationError},
	http::Attachment,
	types::{CardNumber, CardType, UserRef},
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
async fn add_card_sends_only_the_chosen_number_encoding() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let card = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/access/v1/credentials/card")
				.query_param("user_id", "u-1")
				.header("x-verkada-auth", "tok")
				.json_body(json!({
					"active": true,
					"facility_code": "111",
					"type": "HID 37-bit",
					"card_number": "4242",
				}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"card_id\":\"c-1\"}");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let access_card = AccessCard::new(CardNumber::Decimal("4242".into()), "111", CardType::Hid37Bit)
		.with_active(true);
	let created = client
		.add_card_to_user(&UserRef::user_id("u-1"), &access_card)
		.await
		.expect("Card creation should succeed.");

	card.assert_async().await;

	assert_eq!(created, json!({"card_id": "c-1"}));
}

#[tokio::test]
async fn user_unlock_merges_door_and_user_ids() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let unlock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/access/v1/door/user_unlock")
				.json_body(json!({"door_id": "d-1", "external_id": "ext-9"}));
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = build_test_client(&server.base_url());

	client
		.unlock_door_as_user("d-1", &UserRef::external_id("ext-9"))
		.await
		.expect("Unlock should succeed.");

	unlock.assert_async().await;
}

#[tokio::test]
async fn new_access_levels_send_empty_lists() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let create = server
		.mock_async(|when, then| {
			when.method(POST).path("/access/v1/door/access_level").json_body(json!({
				"access_groups": [],
				"access_schedule_events": [],
				"doors": [],
				"name": "Lobby",
				"sites": [],
			}));
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_level_id\":\"al-1\"}");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let created = client
		.create_access_level(&AccessLevel::new("Lobby"))
		.await
		.expect("Access level creation should succeed.");

	create.assert_async().await;

	assert_eq!(created["access_level_id"], "al-1");
}

#[tokio::test]
async fn bulk_plate_csv_with_wrong_columns_never_leaves_the_client() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/token");
			then.status(200).header("content-type", "application/json").body("{\"token\":\"tok\"}");
		})
		.await;
	let batch = server
		.mock_async(|when, then| {
			when.path("/cameras/v1/analytics/lpr/license_plate_of_interest/batch");
			then.status(200).body("{}");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let csv = Attachment::from_bytes("plates.csv", b"Plate,Owner\nABC123,alice\n".to_vec());
	let err = client.create_bulk_lpois(csv).await.expect_err("Wrong columns should be rejected.");

	assert!(matches!(err, Error::Validation(ValidationError::CsvHeader { .. })));

	token.assert_calls_async(0).await;
	batch.assert_calls_async(0).await;
}

#[tokio::test]
async fn guest_deny_list_is_base64_encoded() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let deny_list = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/guest/v1/deny_list")
				.query_param("site_id", "site-1")
				.json_body(json!({
					"base64_ascii_deny_list_csv": "Rmlyc3QgTmFtZSxMYXN0IE5hbWUKTWFsbG9yeSxTbWl0aAo=",
				}));
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let client = build_test_client(&server.base_url());

	client
		.create_guest_deny_list("site-1", b"First Name,Last Name\nMallory,Smith\n")
		.await
		.expect("Deny list upload should succeed.");

	deny_list.assert_async().await;

	let err = client
		.create_guest_deny_list("site-1", b"")
		.await
		.expect_err("An empty deny list should be rejected.");

	assert!(matches!(err, Error::Validation(ValidationError::Empty { .. })));
}

#[tokio::test]
async fn access_level_deletes_return_plain_text_confirmations() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;

	let level = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/access/v1/door/access_level/lvl-1")
				.query_param("access_level_id", "lvl-1");
			then.status(200).header("content-type", "text/plain").body("Deleted");
		})
		.await;
	let event = server
		.mock_async(|when, then| {
			when.method(DELETE)
				.path("/access/v1/door/access_level/lvl-1/access_schedule_event/ev-1");
			then.status(200).header("content-type", "text/plain").body("Deleted");
		})
		.await;
	let client = build_test_client(&server.base_url());
	let level_body =
		client.delete_access_level("lvl-1").await.expect("Level delete should succeed.");
	let event_body = client
		.delete_access_schedule_event_on_access_level("lvl-1", "ev-1")
		.await
		.expect("Schedule event delete should succeed.");

	assert_eq!(level_body, b"Deleted".to_vec());
	assert_eq!(event_body, b"Deleted".to_vec());

	level.assert_async().await;
	event.assert_async().await;
}

#[tokio::test]
async fn json_endpoints_reject_plain_text_bodies() {
	let server = MockServer::start_async().await;

	mock_token(&server).await;
	server
		.mock_async(|when, then| {
			when.method(DELETE).path("/access/v1/access_groups/group");
			then.status(200).header("content-type", "text/plain").body("Deleted");
		})
		.await;

	let client = build_test_client(&server.base_url());
	let err = client
		.delete_access_group("g-1")
		.await
		.expect_err("A non-JSON body should not decode.");

	assert!(matches!(err, Error::Transport(TransportError::Decode { .. })));
}
