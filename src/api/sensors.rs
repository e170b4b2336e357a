//! Environmental sensor alerts and readings.

// self
use super::{insert_page, insert_window};
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::Query,
	pagination::{ClientPaginator, PageKeys},
	types::SensorField,
	validate,
};

/// Response key holding the next cursor on sensor endpoints.
const SENSOR_CURSOR: &str = "page_cursor";

fn alerts_query<D>(
	device_ids: &[D],
	start_time: Option<i64>,
	end_time: Option<i64>,
	fields: &[SensorField],
) -> Result<Query, ValidationError>
where
	D: AsRef<str>,
{
	validate::require_non_empty_each(device_ids, "device_ids")?;

	let mut query = Query::new();

	query.insert_list("device_ids", device_ids);
	insert_window(&mut query, start_time, end_time)?;
	query.insert_list("fields", fields);

	Ok(query)
}

fn data_query(
	device_id: &str,
	start_time: Option<i64>,
	end_time: Option<i64>,
	fields: &[SensorField],
	interval: Option<&str>,
) -> Result<Query, ValidationError> {
	validate::require_non_empty(device_id, "device_id")?;

	if let Some(interval) = interval {
		require_interval(interval)?;
	}

	let mut query = Query::new().with("device_id", device_id);

	insert_window(&mut query, start_time, end_time)?;
	query.insert_list("fields", fields).insert_opt("interval", interval);

	Ok(query)
}

/// A count followed by `s`, `m`, or `h`, such as `5m`.
fn require_interval(interval: &str) -> Result<(), ValidationError> {
	let valid = interval
		.strip_suffix(['s', 'm', 'h'])
		.is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()));

	if !valid {
		return Err(ValidationError::invalid("interval", format!("`{interval}` is not like `5m`")));
	}

	Ok(())
}

impl VerkadaClient {
	/// Fetches one page of alerts for a set of sensors.
	pub async fn get_sensor_alerts<D>(
		&self,
		device_ids: &[D],
		start_time: Option<i64>,
		end_time: Option<i64>,
		fields: &[SensorField],
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value>
	where
		D: AsRef<str>,
	{
		let mut query = alerts_query(device_ids, start_time, end_time, fields)?;

		insert_page(&mut query, page_token.filter(|t| !t.is_empty()), page_size)?;

		self.requests().get(endpoints::SENSOR_ALERTS, query).await
	}

	/// Walks every alert for a set of sensors.
	pub fn iter_sensor_alerts<D>(
		&self,
		device_ids: &[D],
		start_time: Option<i64>,
		end_time: Option<i64>,
		fields: &[SensorField],
	) -> Result<ClientPaginator<'_>>
	where
		D: AsRef<str>,
	{
		Ok(self.paginate(
			endpoints::SENSOR_ALERTS,
			alerts_query(device_ids, start_time, end_time, fields)?,
			PageKeys::new("alert_events", SENSOR_CURSOR),
		))
	}

	/// Fetches one page of readings for a sensor.
	///
	/// `interval` sets the sample resolution, e.g. `30s` or `1h`; the server picks one from the
	/// time range when it is absent.
	pub async fn get_sensor_data(
		&self,
		device_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		fields: &[SensorField],
		interval: Option<&str>,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = data_query(device_id, start_time, end_time, fields, interval)?;

		insert_page(&mut query, page_token.filter(|t| !t.is_empty()), page_size)?;

		self.requests().get(endpoints::SENSOR_DATA, query).await
	}

	/// Walks every reading for a sensor.
	pub fn iter_sensor_data(
		&self,
		device_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		fields: &[SensorField],
		interval: Option<&str>,
	) -> Result<ClientPaginator<'_>> {
		Ok(self.paginate(
			endpoints::SENSOR_DATA,
			data_query(device_id, start_time, end_time, fields, interval)?,
			PageKeys::new("data", SENSOR_CURSOR),
		))
	}
}
