//! Viewing station devices.

// self
use crate::{_prelude::*, client::VerkadaClient, endpoints, http::Query};

impl VerkadaClient {
	/// Every viewing station in the organization.
	pub async fn get_viewing_stations(&self) -> Result<Value> {
		self.requests().get(endpoints::VIEWING_STATIONS, Query::new()).await
	}
}
