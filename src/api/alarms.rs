//! Classic alarm devices and sites.

// self
use crate::{_prelude::*, client::VerkadaClient, endpoints, http::Query, validate};

impl VerkadaClient {
	/// Alarm devices on a site, optionally narrowed to `device_ids`.
	pub async fn get_alarm_devices<D>(&self, site_id: &str, device_ids: &[D]) -> Result<Value>
	where
		D: AsRef<str>,
	{
		validate::require_non_empty(site_id, "site_id")?;
		validate::require_each(device_ids, "device_ids")?;

		let mut query = Query::new().with("site_id", site_id);

		query.insert_list("device_ids", device_ids);

		self.requests().get(endpoints::ALARM_DEVICES, query).await
	}

	/// Alarm site information, optionally narrowed to `site_ids`.
	pub async fn get_alarm_site_information<S>(&self, site_ids: &[S]) -> Result<Value>
	where
		S: AsRef<str>,
	{
		validate::require_each(site_ids, "site_ids")?;

		let mut query = Query::new();

		query.insert_list("site_ids", site_ids);

		self.requests().get(endpoints::ALARM_SITES, query).await
	}
}
