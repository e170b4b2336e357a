//! Door listing and remote unlocks.

// self
use crate::{
	_prelude::*, client::VerkadaClient, endpoints, http::Query, types::UserRef, validate,
};

impl VerkadaClient {
	/// Lists doors, optionally filtered by door and site ids.
	pub async fn get_doors<D, S>(&self, door_ids: &[D], site_ids: &[S]) -> Result<Value>
	where
		D: AsRef<str>,
		S: AsRef<str>,
	{
		validate::require_each(door_ids, "door_ids")?;
		validate::require_each(site_ids, "site_ids")?;

		let mut query = Query::new();

		query.insert_list("door_ids", door_ids).insert_list("site_ids", site_ids);

		self.requests().get(endpoints::ACCESS_DOORS, query).await
	}

	/// Unlocks a door without a user context.
	pub async fn unlock_door_as_admin(&self, door_id: &str) -> Result<Value> {
		validate::require_non_empty(door_id, "door_id")?;

		let body = json!({ "door_id": door_id });

		self.requests().post(endpoints::ACCESS_DOOR_ADMIN_UNLOCK, Query::new(), Some(body)).await
	}

	/// Unlocks a door on behalf of a user, subject to that user's access.
	pub async fn unlock_door_as_user(&self, door_id: &str, user: &UserRef) -> Result<Value> {
		validate::require_non_empty(door_id, "door_id")?;
		user.validate()?;

		let mut body = user.to_json();

		if let Value::Object(map) = &mut body {
			map.insert("door_id".into(), Value::String(door_id.into()));
		}

		self.requests().post(endpoints::ACCESS_DOOR_USER_UNLOCK, Query::new(), Some(body)).await
	}
}
