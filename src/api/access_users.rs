//! Access user lookups and per-user settings: BLE, dates, entry codes, Pass app, photos, and
//! remote unlock.

// self
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	http::{Attachment, Method, RequestSpec},
	types::UserRef,
	validate,
};

fn user_path(suffix: &str) -> String {
	format!("{}/{suffix}", endpoints::ACCESS_USER)
}

impl VerkadaClient {
	/// Lists every access user.
	pub async fn get_all_access_users(&self) -> Result<Value> {
		self.requests().get(endpoints::ACCESS_USERS, Default::default()).await
	}

	/// Fetches one access user.
	pub async fn get_access_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().get(endpoints::ACCESS_USER, user.to_query()).await
	}

	/// Enables Bluetooth unlock for a user.
	pub async fn activate_ble_for_access_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().put(&user_path("ble/activate"), user.to_query(), None).await
	}

	/// Disables Bluetooth unlock for a user.
	pub async fn deactivate_ble_for_access_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().put(&user_path("ble/deactivate"), user.to_query(), None).await
	}

	/// Sets the user's access start date.
	pub async fn set_start_date_for_user(&self, user: &UserRef, start_date: &str) -> Result<Value> {
		user.validate()?;
		validate::require_non_empty(start_date, "start_date")?;

		let body = json!({ "start_date": start_date });

		self.requests().put(&user_path("start_date"), user.to_query(), Some(body)).await
	}

	/// Sets the user's access end date.
	pub async fn set_end_date_for_user(&self, user: &UserRef, end_date: &str) -> Result<Value> {
		user.validate()?;
		validate::require_non_empty(end_date, "end_date")?;

		let body = json!({ "end_date": end_date });

		self.requests().put(&user_path("end_date"), user.to_query(), Some(body)).await
	}

	/// Sets the user's keypad entry code; `override_existing` replaces a code already in use.
	pub async fn set_entry_code_for_user(
		&self,
		user: &UserRef,
		entry_code: &str,
		override_existing: bool,
	) -> Result<Value> {
		user.validate()?;
		validate::require_non_empty(entry_code, "entry_code")?;

		let mut query = user.to_query();

		query.insert_bool("override", override_existing);

		let body = json!({ "entry_code": entry_code });

		self.requests().put(&user_path("entry_code"), query, Some(body)).await
	}

	/// Removes the user's entry code.
	pub async fn remove_entry_code_for_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().delete(&user_path("entry_code"), user.to_query()).await
	}

	/// Emails the user a Pass app invite.
	pub async fn send_pass_app_invite_for_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().post(&user_path("pass/invite"), user.to_query(), None).await
	}

	/// Downloads the user's profile photo; `original` requests the unscaled upload.
	pub async fn get_profile_photo(&self, user: &UserRef, original: bool) -> Result<Vec<u8>> {
		user.validate()?;

		let mut query = user.to_query();

		query.insert_bool("original", original);

		self.requests().get_bytes(&user_path("profile_photo"), query).await
	}

	/// Uploads a profile photo as multipart field `file`.
	pub async fn upload_profile_photo(
		&self,
		user: &UserRef,
		photo: Attachment,
		overwrite: bool,
	) -> Result<Value> {
		user.validate()?;

		let mut query = user.to_query();

		query.insert_bool("overwrite", overwrite);

		let spec = RequestSpec::new(Method::Put, user_path("profile_photo"))
			.with_query(query)
			.with_attachment(photo);

		self.requests().send_json(spec).await
	}

	/// Reads `path` and uploads it as the user's profile photo.
	pub async fn upload_profile_photo_from_path(
		&self,
		user: &UserRef,
		path: impl AsRef<std::path::Path>,
		overwrite: bool,
	) -> Result<Value> {
		user.validate()?;

		let photo = Attachment::from_path(path).await?;

		self.upload_profile_photo(user, photo, overwrite).await
	}

	/// Deletes the user's profile photo.
	pub async fn delete_profile_photo(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().delete(&user_path("profile_photo"), user.to_query()).await
	}

	/// Enables remote unlock for a user.
	pub async fn activate_remote_unlock_for_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().put(&user_path("remote_unlock/activate"), user.to_query(), None).await
	}

	/// Disables remote unlock for a user.
	pub async fn deactivate_remote_unlock_for_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().put(&user_path("remote_unlock/deactivate"), user.to_query(), None).await
	}
}
