//! Immutable cached credential and its freshness rules.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Freshness of a [`Credential`] at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CredentialStatus {
	/// Remaining lifetime exceeds the refresh buffer.
	Fresh,
	/// Still valid but inside the refresh buffer.
	Stale,
	/// Past its expiry instant.
	Expired,
}

/// Bearer token together with its client-side lifetime.
///
/// Expiry is computed locally as `acquired_at + lifetime`; server-provided lifetimes are not
/// consulted. A refresh replaces the whole value.
#[derive(Clone)]
pub struct Credential {
	/// Token value.
	pub value: TokenSecret,
	/// Instant the token was fetched.
	pub acquired_at: OffsetDateTime,
	/// Instant the token is assumed to expire.
	pub expires_at: OffsetDateTime,
}
impl Credential {
	/// Creates a credential acquired at `acquired_at` with the given lifetime.
	pub fn new(value: TokenSecret, acquired_at: OffsetDateTime, lifetime: Duration) -> Self {
		Self { value, acquired_at, expires_at: acquired_at + lifetime }
	}

	/// Remaining lifetime at `instant` (negative once expired).
	pub fn time_until_expiry(&self, instant: OffsetDateTime) -> Duration {
		self.expires_at - instant
	}

	/// Computes the freshness at `instant` for a given refresh buffer.
	pub fn status_at(&self, instant: OffsetDateTime, refresh_buffer: Duration) -> CredentialStatus {
		let remaining = self.time_until_expiry(instant);

		if !remaining.is_positive() {
			return CredentialStatus::Expired;
		}
		if remaining <= refresh_buffer {
			return CredentialStatus::Stale;
		}

		CredentialStatus::Fresh
	}

	/// Returns `true` while the remaining lifetime exceeds `refresh_buffer`.
	pub fn is_fresh_at(&self, instant: OffsetDateTime, refresh_buffer: Duration) -> bool {
		matches!(self.status_at(instant, refresh_buffer), CredentialStatus::Fresh)
	}
}
impl Debug for Credential {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credential")
			.field("value", &"<redacted>")
			.field("acquired_at", &self.acquired_at)
			.field("expires_at", &self.expires_at)
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;

	fn credential() -> Credential {
		Credential::new(
			TokenSecret::new("token"),
			datetime!(2025-01-01 00:00 UTC),
			Duration::minutes(30),
		)
	}

	#[test]
	fn freshness_follows_buffer() {
		let credential = credential();
		let buffer = Duration::seconds(1500);

		assert!(credential.is_fresh_at(datetime!(2025-01-01 00:04:59 UTC), buffer));
		assert_eq!(
			credential.status_at(datetime!(2025-01-01 00:05 UTC), buffer),
			CredentialStatus::Stale
		);
		assert_eq!(
			credential.status_at(datetime!(2025-01-01 00:30 UTC), buffer),
			CredentialStatus::Expired
		);
	}

	#[test]
	fn buffer_at_least_lifetime_is_never_fresh() {
		let credential = credential();

		assert!(!credential.is_fresh_at(credential.acquired_at, Duration::minutes(30)));
	}

	#[test]
	fn debug_redacts_value() {
		assert!(!format!("{:?}", credential()).contains("\"token\""));
	}
}
