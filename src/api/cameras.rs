//! Camera devices, footage, analytics, license plate recognition, and persons of interest.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use super::{insert_page, insert_window};
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::{Attachment, Method, Query, RequestSpec},
	pagination::{ClientPaginator, PageKeys},
	types::{
		BackupVideoQuality, BackupVideoToUpload, OccupancyInterval, OccupancyType,
		ThumbnailResolution,
	},
	validate,
};

const LPOI_CREATE_COLUMNS: &[&str] = &["License Plate", "Name"];
const LPOI_DELETE_COLUMNS: &[&str] = &["License Plate"];
const SECONDS_PER_DAY: i64 = 86_400;
const DEFAULT_THUMBNAIL_LINK_EXPIRY: i64 = 3600;

fn camera_query(camera_id: &str) -> Result<Query, ValidationError> {
	validate::require_non_empty(camera_id, "camera_id")?;

	Ok(Query::new().with("camera_id", camera_id))
}

/// Filters shared by camera alert listings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CameraAlertsQuery {
	/// Window start, unix seconds.
	pub start_time: Option<i64>,
	/// Window end, unix seconds.
	pub end_time: Option<i64>,
	/// Whether alerts carry an image URL.
	pub include_image_url: Option<bool>,
	/// Notification types to include.
	pub notification_types: Vec<String>,
}
impl CameraAlertsQuery {
	fn to_query(&self) -> Result<Query, ValidationError> {
		let mut query = Query::new();

		insert_window(&mut query, self.start_time, self.end_time)?;
		validate::require_each(&self.notification_types, "notification_type")?;

		if let Some(include) = self.include_image_url {
			query.insert_bool("include_image_url", include);
		}

		query.insert_list("notification_type", &self.notification_types);

		Ok(query)
	}
}

/// Cloud backup configuration for one camera.
///
/// `days_to_preserve` is seven comma-separated `0`/`1` flags starting on Sunday.
/// `time_to_preserve` and `upload_timeslot` are `start,end` second offsets within a day.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudBackupSettings {
	/// Camera the settings apply to.
	pub camera_id: String,
	/// Per-weekday flags.
	pub days_to_preserve: String,
	/// `1` enabled, `0` disabled.
	pub enabled: u8,
	/// Daily window to preserve.
	pub time_to_preserve: String,
	/// Daily window to upload in.
	pub upload_timeslot: String,
	/// Upload quality.
	pub video_quality: BackupVideoQuality,
	/// Footage selection.
	pub video_to_upload: BackupVideoToUpload,
}
impl CloudBackupSettings {
	/// Checks every field against the accepted formats.
	pub fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty(&self.camera_id, "camera_id")?;

		let days = self.days_to_preserve.split(',').collect::<Vec<_>>();

		if days.len() != 7 || days.iter().any(|d| !matches!(*d, "0" | "1")) {
			return Err(ValidationError::invalid(
				"days_to_preserve",
				"expected 7 comma-separated values of 0 or 1",
			));
		}

		validate::require_range(self.enabled.into(), "enabled", 0, 1)?;
		day_window(&self.time_to_preserve, "time_to_preserve")?;
		day_window(&self.upload_timeslot, "upload_timeslot")?;

		Ok(())
	}

	/// Motion-only uploads are always high quality.
	fn normalized(&self) -> Self {
		let mut settings = self.clone();

		if settings.video_to_upload == BackupVideoToUpload::Motion {
			settings.video_quality = BackupVideoQuality::HighQuality;
		}

		settings
	}
}

fn day_window(value: &str, field: &'static str) -> Result<(i64, i64), ValidationError> {
	let invalid = || ValidationError::invalid(field, "expected `start,end` seconds within a day");
	let (start, end) = value.split_once(',').ok_or_else(invalid)?;
	let start = start.trim().parse::<i64>().map_err(|_| invalid())?;
	let end = end.trim().parse::<i64>().map_err(|_| invalid())?;

	if !(0..SECONDS_PER_DAY).contains(&start) || !(0..=SECONDS_PER_DAY).contains(&end) {
		return Err(invalid());
	}

	Ok((start, end))
}

/// MQTT broker receiving object position events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MqttConfig {
	/// CA-signed broker certificate.
	pub broker_cert: String,
	/// `host:port` of the broker.
	pub broker_host_port: String,
	/// Camera publishing positions.
	pub camera_id: String,
	/// Optional broker username.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_username: Option<String>,
	/// Optional broker password.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub client_password: Option<String>,
}
impl MqttConfig {
	fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty(&self.broker_cert, "broker_cert")?;
		validate::require_non_empty(&self.broker_host_port, "broker_host_port")?;
		validate::require_non_empty(&self.camera_id, "camera_id")?;

		Ok(())
	}
}

impl VerkadaClient {
	/// Fetches one page of camera alerts.
	pub async fn get_camera_alerts(
		&self,
		filter: &CameraAlertsQuery,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = filter.to_query()?;

		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_ALERTS, query).await
	}

	/// Walks every camera alert.
	pub fn iter_camera_alerts(&self, filter: &CameraAlertsQuery) -> Result<ClientPaginator<'_>> {
		Ok(self.paginate(
			endpoints::CAMERA_ALERTS,
			filter.to_query()?,
			PageKeys::new("notifications", "next_page_token"),
		))
	}

	/// Adds a license plate of interest.
	pub async fn create_lpoi(&self, license_plate: &str, description: &str) -> Result<Value> {
		validate::require_non_empty(license_plate, "license_plate")?;
		validate::require_non_empty(description, "description")?;

		let body = json!({ "license_plate": license_plate, "description": description });

		self.requests().post(endpoints::CAMERA_LPOI, Query::new(), Some(body)).await
	}

	/// Fetches one page of license plates of interest.
	pub async fn get_lpois(
		&self,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = Query::new();

		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_LPOI, query).await
	}

	/// Walks every license plate of interest.
	pub fn iter_lpois(&self) -> ClientPaginator<'_> {
		self.paginate(
			endpoints::CAMERA_LPOI,
			Query::new(),
			PageKeys::new("license_plate_of_interest", "next_page_token"),
		)
	}

	/// Changes the description of a license plate of interest.
	pub async fn update_lpoi(&self, license_plate: &str, description: &str) -> Result<Value> {
		validate::require_non_empty(license_plate, "license_plate")?;
		validate::require_non_empty(description, "description")?;

		let query = Query::new().with("license_plate", license_plate);

		self.requests()
			.patch(endpoints::CAMERA_LPOI, query, Some(json!({ "description": description })))
			.await
	}

	/// Removes a license plate of interest.
	pub async fn delete_lpoi(&self, license_plate: &str) -> Result<Value> {
		validate::require_non_empty(license_plate, "license_plate")?;

		let query = Query::new().with("license_plate", license_plate);

		self.requests().delete(endpoints::CAMERA_LPOI, query).await
	}

	/// Adds plates in bulk from a CSV with exactly the columns `License Plate` and `Name`.
	pub async fn create_bulk_lpois(&self, csv: Attachment) -> Result<Value> {
		self.send_lpoi_csv(Method::Post, csv, LPOI_CREATE_COLUMNS).await
	}

	/// Removes plates in bulk from a CSV with exactly the column `License Plate`.
	pub async fn delete_bulk_lpois(&self, csv: Attachment) -> Result<Value> {
		self.send_lpoi_csv(Method::Delete, csv, LPOI_DELETE_COLUMNS).await
	}

	/// Reads a CSV from disk and passes it to [`VerkadaClient::create_bulk_lpois`].
	pub async fn create_bulk_lpois_from_path(
		&self,
		path: impl AsRef<std::path::Path>,
	) -> Result<Value> {
		self.create_bulk_lpois(Attachment::from_path(path).await?).await
	}

	/// Reads a CSV from disk and passes it to [`VerkadaClient::delete_bulk_lpois`].
	pub async fn delete_bulk_lpois_from_path(
		&self,
		path: impl AsRef<std::path::Path>,
	) -> Result<Value> {
		self.delete_bulk_lpois(Attachment::from_path(path).await?).await
	}

	async fn send_lpoi_csv(
		&self,
		method: Method,
		csv: Attachment,
		columns: &[&str],
	) -> Result<Value> {
		validate::require_csv_headers(&csv.bytes, columns)?;

		let spec = RequestSpec::new(method, endpoints::CAMERA_LPOI_BATCH)
			.with_attachment(csv.with_mime("text/csv"));

		self.requests().send_json(spec).await
	}

	/// Fetches one page of plates seen by an LPR camera.
	pub async fn get_seen_license_plates(
		&self,
		camera_id: &str,
		license_plate: Option<&str>,
		start_time: Option<i64>,
		end_time: Option<i64>,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = lpr_query(camera_id, license_plate, start_time, end_time)?;

		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_LPR_IMAGES, query).await
	}

	/// Walks every plate detection seen by an LPR camera.
	pub fn iter_seen_license_plates(
		&self,
		camera_id: &str,
		license_plate: Option<&str>,
		start_time: Option<i64>,
		end_time: Option<i64>,
	) -> Result<ClientPaginator<'_>> {
		Ok(self.paginate(
			endpoints::CAMERA_LPR_IMAGES,
			lpr_query(camera_id, license_plate, start_time, end_time)?,
			PageKeys::new("detections", "next_page_token"),
		))
	}

	/// Fetches one page of sighting timestamps for a plate.
	pub async fn get_lpr_timestamps(
		&self,
		camera_id: &str,
		license_plate: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		validate::require_non_empty(license_plate, "license_plate")?;

		let mut query = lpr_query(camera_id, Some(license_plate), start_time, end_time)?;

		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_LPR_TIMESTAMPS, query).await
	}

	/// Walks every sighting timestamp for a plate.
	pub fn iter_lpr_timestamps(
		&self,
		camera_id: &str,
		license_plate: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
	) -> Result<ClientPaginator<'_>> {
		validate::require_non_empty(license_plate, "license_plate")?;

		Ok(self.paginate(
			endpoints::CAMERA_LPR_TIMESTAMPS,
			lpr_query(camera_id, Some(license_plate), start_time, end_time)?,
			PageKeys::new("detections", "next_page_token"),
		))
	}

	/// Fetches one page of people and vehicle counts.
	pub async fn get_object_counts(
		&self,
		camera_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = camera_query(camera_id)?;

		insert_window(&mut query, start_time, end_time)?;
		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_OBJECT_COUNTS, query).await
	}

	/// Walks every object count bucket.
	pub fn iter_object_counts(
		&self,
		camera_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
	) -> Result<ClientPaginator<'_>> {
		let mut query = camera_query(camera_id)?;

		insert_window(&mut query, start_time, end_time)?;

		Ok(self.paginate(
			endpoints::CAMERA_OBJECT_COUNTS,
			query,
			PageKeys::new("object_counts", "next_page_token"),
		))
	}

	/// Points a camera's object position events at an MQTT broker.
	pub async fn set_object_position_mqtt(&self, config: &MqttConfig) -> Result<Value> {
		config.validate()?;

		let body = super::to_body(config, "mqtt config")?;

		self.requests().post(endpoints::CAMERA_OBJECT_POSITION_MQTT, Query::new(), Some(body)).await
	}

	/// Occupancy trend buckets for a camera.
	pub async fn get_occupancy_trends(
		&self,
		camera_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		interval: Option<OccupancyInterval>,
		kind: Option<OccupancyType>,
		preset_id: Option<&str>,
	) -> Result<Value> {
		let mut query = camera_query(camera_id)?;

		insert_window(&mut query, start_time, end_time)?;
		validate::require_non_empty_opt(preset_id, "preset_id")?;
		query
			.insert_opt("interval", interval)
			.insert_opt("type", kind)
			.insert_opt("preset_id", preset_id);

		self.requests().get(endpoints::CAMERA_OCCUPANCY_TRENDS, query).await
	}

	/// Occupancy trend buckets for a dashboard.
	pub async fn get_dashboard_occupancy_trend_data(
		&self,
		dashboard_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		interval: Option<OccupancyInterval>,
	) -> Result<Value> {
		validate::require_non_empty(dashboard_id, "dashboard_id")?;

		let mut query = Query::new().with("dashboard_id", dashboard_id);

		insert_window(&mut query, start_time, end_time)?;
		query.insert_opt("interval", interval);

		self.requests().get(endpoints::CAMERA_DASHBOARD_OCCUPANCY, query).await
	}

	/// Cameras with occupancy trends enabled.
	pub async fn get_occupancy_trend_enabled_cameras(&self) -> Result<Value> {
		self.requests().get(endpoints::CAMERA_OCCUPANCY_ENABLED, Query::new()).await
	}

	/// Peak people and vehicle counts, optionally within polygon search zones.
	pub async fn get_max_people_vehicle_counts(
		&self,
		camera_id: &str,
		start_time: Option<i64>,
		end_time: Option<i64>,
		search_zones: Option<&[Vec<i64>]>,
	) -> Result<Value> {
		let mut query = camera_query(camera_id)?;

		insert_window(&mut query, start_time, end_time)?;

		if let Some(zones) = search_zones {
			query.insert("search_zones", json!(zones));
		}

		self.requests().get(endpoints::CAMERA_MAX_COUNTS, query).await
	}

	/// Current cloud backup settings.
	pub async fn get_cloud_backup_settings(&self, camera_id: &str) -> Result<Value> {
		self.requests().get(endpoints::CAMERA_CLOUD_BACKUP, camera_query(camera_id)?).await
	}

	/// Replaces the cloud backup settings; motion-only uploads are forced to high quality.
	pub async fn update_cloud_backup_settings(
		&self,
		settings: &CloudBackupSettings,
	) -> Result<Value> {
		settings.validate()?;

		let body = super::to_body(&settings.normalized(), "cloud backup settings")?;

		self.requests().post(endpoints::CAMERA_CLOUD_BACKUP, Query::new(), Some(body)).await
	}

	/// Fetches one page of camera devices.
	pub async fn get_camera_data(
		&self,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = Query::new();

		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_DEVICES, query).await
	}

	/// Walks every camera device.
	pub fn iter_camera_data(&self) -> ClientPaginator<'_> {
		self.paginate(
			endpoints::CAMERA_DEVICES,
			Query::new(),
			PageKeys::new("cameras", "next_page_token"),
		)
	}

	/// Link to footage, live when `timestamp` is absent.
	pub async fn get_footage_link(&self, camera_id: &str, timestamp: Option<i64>) -> Result<Value> {
		let query = camera_query(camera_id)?.with_opt("timestamp", timestamp);

		self.requests().get(endpoints::CAMERA_FOOTAGE_LINK, query).await
	}

	/// Thumbnail image near `timestamp`.
	pub async fn get_historical_thumbnail(
		&self,
		camera_id: &str,
		timestamp: Option<i64>,
		resolution: Option<ThumbnailResolution>,
	) -> Result<Vec<u8>> {
		let query = camera_query(camera_id)?
			.with_opt("timestamp", timestamp)
			.with_opt("resolution", resolution);

		self.requests().get_bytes(endpoints::CAMERA_THUMBNAIL, query).await
	}

	/// Latest thumbnail image.
	pub async fn get_latest_thumbnail(
		&self,
		camera_id: &str,
		resolution: Option<ThumbnailResolution>,
	) -> Result<Vec<u8>> {
		let query = camera_query(camera_id)?.with_opt("resolution", resolution);

		self.requests().get_bytes(endpoints::CAMERA_THUMBNAIL_LATEST, query).await
	}

	/// Expiring link to a thumbnail; `expiry` defaults to one hour.
	pub async fn get_thumbnail_link(
		&self,
		camera_id: &str,
		timestamp: Option<i64>,
		expiry: Option<i64>,
	) -> Result<Value> {
		let query = camera_query(camera_id)?
			.with_opt("timestamp", timestamp)
			.with("expiry", expiry.unwrap_or(DEFAULT_THUMBNAIL_LINK_EXPIRY));

		self.requests().get(endpoints::CAMERA_THUMBNAIL_LINK, query).await
	}

	/// Fetches one page of persons of interest.
	pub async fn get_pois(
		&self,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = Query::new();

		insert_page(&mut query, page_token, page_size)?;

		self.requests().get(endpoints::CAMERA_POI, query).await
	}

	/// Walks every person of interest.
	pub fn iter_pois(&self) -> ClientPaginator<'_> {
		self.paginate(
			endpoints::CAMERA_POI,
			Query::new(),
			PageKeys::new("persons_of_interest", "next_page_token"),
		)
	}

	/// Creates a person of interest from an image, sent base64-encoded.
	pub async fn create_poi(&self, image: &[u8], label: &str) -> Result<Value> {
		validate::require_non_empty(label, "label")?;

		if image.is_empty() {
			return Err(ValidationError::Empty { field: "image" }.into());
		}

		let body = json!({ "base64_image": STANDARD.encode(image), "label": label });

		self.requests().post(endpoints::CAMERA_POI, Query::new(), Some(body)).await
	}

	/// Reads an image from disk and passes it to [`VerkadaClient::create_poi`].
	pub async fn create_poi_from_path(
		&self,
		path: impl AsRef<std::path::Path>,
		label: &str,
	) -> Result<Value> {
		let image = Attachment::from_path(path).await?;

		self.create_poi(&image.bytes, label).await
	}

	/// Changes the label of a person of interest.
	pub async fn update_poi(&self, person_id: &str, label: &str) -> Result<Value> {
		validate::require_non_empty(person_id, "person_id")?;
		validate::require_non_empty(label, "label")?;

		let query = Query::new().with("person_id", person_id);

		self.requests().patch(endpoints::CAMERA_POI, query, Some(json!({ "label": label }))).await
	}

	/// Removes a person of interest.
	pub async fn delete_poi(&self, person_id: &str) -> Result<Value> {
		validate::require_non_empty(person_id, "person_id")?;

		let query = Query::new().with("person_id", person_id);

		self.requests().delete(endpoints::CAMERA_POI, query).await
	}

	/// Whether audio recording is enabled.
	pub async fn get_camera_audio_status(&self, camera_id: &str) -> Result<Value> {
		self.requests().get(endpoints::CAMERA_AUDIO, camera_query(camera_id)?).await
	}

	/// Enables or disables audio recording.
	pub async fn set_camera_audio_status(
		&self,
		camera_id: &str,
		enable_audio: bool,
	) -> Result<Value> {
		validate::require_non_empty(camera_id, "camera_id")?;

		let body = json!({ "camera_id": camera_id, "enable_audio": enable_audio });

		self.requests().post(endpoints::CAMERA_AUDIO, Query::new(), Some(body)).await
	}
}

fn lpr_query(
	camera_id: &str,
	license_plate: Option<&str>,
	start_time: Option<i64>,
	end_time: Option<i64>,
) -> Result<Query, ValidationError> {
	let mut query = camera_query(camera_id)?;

	validate::require_non_empty_opt(license_plate, "license_plate")?;
	query.insert_opt("license_plate", license_plate);
	insert_window(&mut query, start_time, end_time)?;

	Ok(query)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	fn backup() -> CloudBackupSettings {
		CloudBackupSettings {
			camera_id: "cam".into(),
			days_to_preserve: "1,1,1,1,1,0,0".into(),
			enabled: 1,
			time_to_preserve: "25200,68400".into(),
			upload_timeslot: "0,86400".into(),
			video_quality: BackupVideoQuality::StandardQuality,
			video_to_upload: BackupVideoToUpload::All,
		}
	}

	#[test]
	fn cloud_backup_accepts_well_formed_settings() {
		assert!(backup().validate().is_ok());
	}

	#[test]
	fn cloud_backup_rejects_malformed_fields() {
		let cases: [fn(&mut CloudBackupSettings); 5] = [
			|s| s.days_to_preserve = "1,1,1".into(),
			|s| s.days_to_preserve = "1,1,1,1,1,1,2".into(),
			|s| s.enabled = 2,
			|s| s.time_to_preserve = "86400,86400".into(),
			|s| s.upload_timeslot = "noon,night".into(),
		];

		for (i, mutate) in cases.iter().enumerate() {
			let mut settings = backup();

			mutate(&mut settings);

			assert!(settings.validate().is_err(), "case {i} should be rejected");
		}
	}

	#[test]
	fn motion_uploads_force_high_quality() {
		let mut settings = backup();

		settings.video_to_upload = BackupVideoToUpload::Motion;

		assert_eq!(settings.normalized().video_quality, BackupVideoQuality::HighQuality);
		assert_eq!(backup().normalized().video_quality, BackupVideoQuality::StandardQuality);
	}

	#[test]
	fn alert_filter_serializes_bools_and_lists() {
		let filter = CameraAlertsQuery {
			include_image_url: Some(false),
			notification_types: vec!["motion".into(), "tamper".into()],
			..Default::default()
		};
		let query = filter.to_query().expect("Filter should be valid.");

		assert_eq!(query.get("include_image_url"), Some("false"));
		assert_eq!(query.get("notification_type"), Some("motion,tamper"));
		assert_eq!(query.get("start_time"), None);
	}

	#[test]
	fn inverted_windows_are_rejected() {
		assert!(lpr_query("cam", None, Some(10), Some(5)).is_err());
		assert!(lpr_query("cam", Some(""), None, None).is_err());
		assert!(lpr_query("cam", Some("ABC123"), Some(5), None).is_ok());
	}
}
