//! Access groups and their membership.

// self
use crate::{
	_prelude::*, client::VerkadaClient, endpoints, http::Query, types::UserRef, validate,
};

fn group_query(group_id: &str) -> Result<Query> {
	validate::require_non_empty(group_id, "group_id")?;

	Ok(Query::new().with("group_id", group_id))
}

impl VerkadaClient {
	/// Lists every access group.
	pub async fn get_access_groups(&self) -> Result<Value> {
		self.requests().get(endpoints::ACCESS_GROUPS, Query::new()).await
	}

	/// Fetches one access group.
	pub async fn get_access_group(&self, group_id: &str) -> Result<Value> {
		self.requests().get(endpoints::ACCESS_GROUP, group_query(group_id)?).await
	}

	/// Creates an access group.
	pub async fn create_access_group(&self, name: &str) -> Result<Value> {
		validate::require_non_empty(name, "name")?;

		let body = json!({ "name": name });

		self.requests().post(endpoints::ACCESS_GROUP, Query::new(), Some(body)).await
	}

	/// Deletes an access group.
	pub async fn delete_access_group(&self, group_id: &str) -> Result<Value> {
		self.requests().delete(endpoints::ACCESS_GROUP, group_query(group_id)?).await
	}

	/// Adds a user to a group.
	pub async fn add_user_to_access_group(&self, group_id: &str, user: &UserRef) -> Result<Value> {
		let query = group_query(group_id)?;

		user.validate()?;

		self.requests().put(endpoints::ACCESS_GROUP_USER, query, Some(user.to_json())).await
	}

	/// Removes a user from a group.
	pub async fn remove_user_from_access_group(
		&self,
		group_id: &str,
		user: &UserRef,
	) -> Result<Value> {
		let mut query = group_query(group_id)?;

		user.validate()?;
		query.insert(user.key(), user.value());

		self.requests().delete(endpoints::ACCESS_GROUP_USER, query).await
	}
}
