//! Async Verkada API client: cached auth tokens, a retrying transport, cursor pagination, and
//! typed wrappers for access control, cameras, sensors, alarms, guest, and helix endpoints.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod obs;
pub mod pagination;
pub mod types;
pub mod validate;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		client::VerkadaClient,
		config::{ClientConfig, RetryPolicy},
	};

	/// API key used by every test client.
	pub const TEST_API_KEY: &str = "test-api-key";

	/// Builds a config whose base URL (and therefore token URLs) point at `base_url`, with
	/// instant retries so backoff never slows a test down.
	pub fn test_config(base_url: &str) -> ClientConfig {
		ClientConfig::new(TEST_API_KEY)
			.expect("Test API key should be accepted.")
			.with_base_url(base_url)
			.expect("Mock server URL should parse.")
			.with_org_id("test-org")
			.with_retry_policy(RetryPolicy::default().with_backoff_factor(0.0))
	}

	/// Constructs a [`VerkadaClient`] against a mock server root such as `httpmock`'s
	/// `server.base_url()`.
	pub fn build_test_client(base_url: &str) -> VerkadaClient {
		VerkadaClient::new(test_config(base_url)).expect("Test client should build.")
	}
}

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
		time::Duration as StdDuration,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map, Value, json};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use serde_json;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
