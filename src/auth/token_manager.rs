//! Token manager: exchanges the API key for short-lived tokens and caches them.
//!
//! [`TokenManager::get_token`] hands out the cached [`Credential`] while its remaining lifetime
//! exceeds the refresh buffer and fetches a replacement otherwise. Refreshes run behind a
//! singleflight guard so concurrent callers that observe a stale credential share one call to
//! the token endpoint. The token endpoint itself is never retried.

mod metrics;

pub use metrics::*;

// self
use crate::{
	_prelude::*,
	auth::{ApiKey, Credential, TokenSecret},
	config::ClientConfig,
	error::TokenError,
	http::{self, Method},
	obs::{self, RequestKind, RequestOutcome, RequestSpan},
};

/// Which token the manager maintains.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// API token: `POST`, response key `token`.
	Standard,
	/// Streaming JWT: `GET`, response key `jwt`.
	Streaming,
}
impl TokenKind {
	/// HTTP method used against the token endpoint.
	pub const fn method(self) -> Method {
		match self {
			TokenKind::Standard => Method::Post,
			TokenKind::Streaming => Method::Get,
		}
	}

	/// JSON key holding the token in the response.
	pub const fn response_key(self) -> &'static str {
		match self {
			TokenKind::Standard => "token",
			TokenKind::Streaming => "jwt",
		}
	}
}

/// Caches a bearer credential and refreshes it ahead of expiry.
pub struct TokenManager {
	http: ReqwestClient,
	api_key: ApiKey,
	token_url: Url,
	kind: TokenKind,
	response_key: String,
	lifetime: Duration,
	refresh_buffer: Duration,
	cached: RwLock<Option<Credential>>,
	refresh_guard: AsyncMutex<()>,
	metrics: TokenMetrics,
}
impl TokenManager {
	/// Creates a manager with the default 30 minute lifetime and 1500 second buffer.
	pub fn new(http: ReqwestClient, api_key: ApiKey, token_url: Url, kind: TokenKind) -> Self {
		Self {
			http,
			api_key,
			token_url,
			kind,
			response_key: kind.response_key().into(),
			lifetime: ClientConfig::DEFAULT_TOKEN_LIFETIME,
			refresh_buffer: ClientConfig::DEFAULT_REFRESH_BUFFER,
			cached: RwLock::new(None),
			refresh_guard: AsyncMutex::new(()),
			metrics: TokenMetrics::default(),
		}
	}

	/// Builds a manager for `kind` from a client config.
	pub fn from_config(
		http: ReqwestClient,
		config: &ClientConfig,
		kind: TokenKind,
	) -> Result<Self> {
		let token_url = match kind {
			TokenKind::Standard => config.token_url()?,
			TokenKind::Streaming => config.streaming_token_url()?,
		};

		Ok(Self::new(http, config.api_key.clone(), token_url, kind)
			.with_lifetime(config.token_lifetime)
			.with_refresh_buffer(config.refresh_buffer))
	}

	/// Overrides the assumed token lifetime.
	pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
		self.lifetime = lifetime;

		self
	}

	/// Overrides the refresh buffer; negative values clamp to zero.
	pub fn with_refresh_buffer(mut self, buffer: Duration) -> Self {
		self.refresh_buffer = if buffer.is_negative() { Duration::ZERO } else { buffer };

		self
	}

	/// Overrides the JSON key that holds the token.
	pub fn with_response_key(mut self, key: impl Into<String>) -> Self {
		self.response_key = key.into();

		self
	}

	/// Token kind maintained by this manager.
	pub fn kind(&self) -> TokenKind {
		self.kind
	}

	/// Fetch counters.
	pub fn metrics(&self) -> &TokenMetrics {
		&self.metrics
	}

	/// Snapshot of the cached credential, if any.
	pub fn cached(&self) -> Option<Credential> {
		self.cached.read().clone()
	}

	/// Drops the cached credential so the next [`get_token`](Self::get_token) fetches.
	pub fn invalidate(&self) {
		self.cached.write().take();
	}

	/// Returns a token whose remaining lifetime exceeds the refresh buffer, fetching one when
	/// the cache is empty or stale.
	pub async fn get_token(&self) -> Result<TokenSecret> {
		if let Some(token) = self.fresh_token(OffsetDateTime::now_utc()) {
			self.metrics.record(TokenEvent::CacheHit);

			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;

		// Another caller may have refreshed while this one waited.
		if let Some(token) = self.fresh_token(OffsetDateTime::now_utc()) {
			self.metrics.record(TokenEvent::CacheHit);

			return Ok(token);
		}

		self.fetch_new_token().await
	}

	/// Unconditionally fetches a new token and replaces the cached credential.
	pub async fn fetch_new_token(&self) -> Result<TokenSecret> {
		let method = self.kind.method();
		let span = RequestSpan::new(RequestKind::Token, method, self.token_url.path());

		self.metrics.record(TokenEvent::Fetch);
		obs::record_request_outcome(RequestKind::Token, RequestOutcome::Attempt);

		let result = span.instrument(self.request_token()).await;

		match result {
			Ok(value) => {
				let credential = Credential::new(value, OffsetDateTime::now_utc(), self.lifetime);
				let token = credential.value.clone();

				#[cfg(feature = "tracing")]
				tracing::debug!(
					kind = ?self.kind,
					expires_at = %credential.expires_at,
					"Fetched a new token."
				);

				*self.cached.write() = Some(credential);

				self.metrics.record(TokenEvent::Fetched);
				obs::record_request_outcome(RequestKind::Token, RequestOutcome::Success);

				Ok(token)
			},
			Err(e) => {
				#[cfg(feature = "tracing")]
				tracing::warn!(kind = ?self.kind, error = %e, "Token fetch failed.");

				self.metrics.record(TokenEvent::FetchFailed);
				obs::record_request_outcome(RequestKind::Token, RequestOutcome::Failure);

				Err(e.into())
			},
		}
	}

	fn fresh_token(&self, now: OffsetDateTime) -> Option<TokenSecret> {
		self.cached
			.read()
			.as_ref()
			.filter(|credential| credential.is_fresh_at(now, self.refresh_buffer))
			.map(|credential| credential.value.clone())
	}

	async fn request_token(&self) -> Result<TokenSecret, TokenError> {
		let builder = match self.kind.method() {
			Method::Get => self.http.get(self.token_url.clone()),
			_ => self.http.post(self.token_url.clone()),
		};
		let response = builder
			.header("accept", "application/json")
			.header("x-api-key", self.api_key.expose())
			.send()
			.await?;
		let status = response.status();
		let body = response.bytes().await?;

		if !status.is_success() {
			return Err(TokenError::Status {
				status: status.as_u16(),
				body: http::body_excerpt(&body),
			});
		}

		let mut de = serde_json::Deserializer::from_slice(&body);
		let payload: Map<String, Value> =
			serde_path_to_error::deserialize(&mut de)
				.map_err(|source| TokenError::Parse { source })?;

		payload
			.get(&self.response_key)
			.and_then(Value::as_str)
			.filter(|token| !token.is_empty())
			.map(TokenSecret::new)
			.ok_or_else(|| TokenError::MissingField { key: self.response_key.clone() })
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("token_url", &self.token_url.as_str())
			.field("kind", &self.kind)
			.field("lifetime", &self.lifetime)
			.field("refresh_buffer", &self.refresh_buffer)
			.field("cached", &*self.cached.read())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn token_kinds_pick_method_and_key() {
		assert_eq!(TokenKind::Standard.method(), Method::Post);
		assert_eq!(TokenKind::Standard.response_key(), "token");
		assert_eq!(TokenKind::Streaming.method(), Method::Get);
		assert_eq!(TokenKind::Streaming.response_key(), "jwt");
	}

	#[test]
	fn config_selects_endpoint_per_kind() {
		let config = ClientConfig::new("key").expect("Key should be accepted.");
		let streaming =
			TokenManager::from_config(ReqwestClient::new(), &config, TokenKind::Streaming)
				.expect("Streaming manager should build.");

		assert_eq!(streaming.token_url.path(), "/cameras/v1/footage/token");
		assert!(streaming.cached().is_none());
	}
}
