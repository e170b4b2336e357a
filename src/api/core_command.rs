//! Organization audit log and core user records.

// self
use super::{insert_page, to_body};
use crate::{
	_prelude::*,
	client::VerkadaClient,
	endpoints,
	error::ValidationError,
	http::Query,
	pagination::{ClientPaginator, DEFAULT_PAGE_SIZE, PageKeys},
	types::UserRef,
	validate,
};

/// Core user fields; unset fields are left out of the request body.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct UserProfile {
	#[serde(skip_serializing_if = "Option::is_none")]
	pub external_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub company_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub department: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub department_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub email: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee_id: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee_title: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub employee_type: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub first_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub last_name: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub middle_name: Option<String>,
	/// E.164 preferred.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
}
impl UserProfile {
	fn validate(&self) -> Result<(), ValidationError> {
		validate::require_non_empty_opt(self.external_id.as_deref(), "external_id")
	}
}

fn audit_log_query(
	start_time: Option<i64>,
	end_time: Option<i64>,
	now: i64,
) -> Result<Query, ValidationError> {
	let (start, end) = validate::resolve_window(start_time, end_time, now)?;

	Ok(Query::new().with("start_time", start).with("end_time", end))
}

impl VerkadaClient {
	/// Fetches one page of audit log entries; the window defaults to the last hour.
	pub async fn get_audit_logs(
		&self,
		start_time: Option<i64>,
		end_time: Option<i64>,
		page_token: Option<&str>,
		page_size: Option<i64>,
	) -> Result<Value> {
		let mut query = audit_log_query(start_time, end_time, validate::unix_now())?;

		insert_page(&mut query, page_token, Some(page_size.unwrap_or(DEFAULT_PAGE_SIZE.into())))?;

		self.requests().get(endpoints::CORE_AUDIT_LOG, query).await
	}

	/// Walks every audit log entry in the window.
	pub fn iter_audit_logs(
		&self,
		start_time: Option<i64>,
		end_time: Option<i64>,
	) -> Result<ClientPaginator<'_>> {
		let query = audit_log_query(start_time, end_time, validate::unix_now())?;

		Ok(self.paginate(
			endpoints::CORE_AUDIT_LOG,
			query,
			PageKeys::new("audit_logs", "next_page_token"),
		))
	}

	/// Fetches a core user.
	pub async fn get_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().get(endpoints::CORE_USER, user.to_query()).await
	}

	/// Creates a core user.
	pub async fn create_user(&self, profile: &UserProfile) -> Result<Value> {
		profile.validate()?;

		let body = to_body(profile, "user")?;

		self.requests().post(endpoints::CORE_USER, Query::new(), Some(body)).await
	}

	/// Updates the set fields of a core user.
	pub async fn update_user(&self, user: &UserRef, profile: &UserProfile) -> Result<Value> {
		user.validate()?;
		profile.validate()?;

		let body = to_body(profile, "user")?;

		self.requests().put(endpoints::CORE_USER, user.to_query(), Some(body)).await
	}

	/// Deletes a core user.
	pub async fn delete_user(&self, user: &UserRef) -> Result<Value> {
		user.validate()?;

		self.requests().delete(endpoints::CORE_USER, user.to_query()).await
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn profile_body_omits_unset_fields() {
		let profile = UserProfile {
			external_id: Some("ext-9".into()),
			first_name: Some("Ada".into()),
			..Default::default()
		};

		assert_eq!(
			to_body(&profile, "user").expect("Profile should serialize."),
			json!({"external_id": "ext-9", "first_name": "Ada"})
		);
		assert_eq!(to_body(&UserProfile::default(), "user").expect("Empty profile."), json!({}));
	}

	#[test]
	fn audit_log_window_defaults_to_last_hour() {
		let query = audit_log_query(None, None, 7_200).expect("Defaults should be valid.");

		assert_eq!(query.get("start_time"), Some("3600"));
		assert_eq!(query.get("end_time"), Some("7200"));
		assert!(audit_log_query(Some(9), Some(1), 7_200).is_err());
	}
}
