//! Client configuration: credentials, endpoints, timeouts, token lifetime, and retry policy.
//!
//! [`ClientConfig::from_env`] reads a `.env` file (when present) before consulting the process
//! environment:
//!
//! - `VERKADA_API_KEY` (required)
//! - `VERKADA_ORG_ID` (optional, needed for streaming URLs)
//! - `VERKADA_BASE_URL` (optional, defaults to [`DEFAULT_BASE_URL`])

// self
use crate::{_prelude::*, auth::ApiKey, endpoints, error::ConfigError};

/// Default Verkada API root.
pub const DEFAULT_BASE_URL: &str = "https://api.verkada.com";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "VERKADA_API_KEY";
/// Environment variable holding the organization id.
pub const ORG_ID_ENV: &str = "VERKADA_ORG_ID";
/// Environment variable overriding the API root.
pub const BASE_URL_ENV: &str = "VERKADA_BASE_URL";

/// Retry behavior applied by the request manager to business endpoints.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
	/// Retries allowed after the first attempt.
	pub max_retries: u32,
	/// Exponential backoff factor in seconds.
	pub backoff_factor: f64,
	/// Upper bound for a single backoff sleep.
	pub max_backoff: StdDuration,
	/// Statuses that trigger a retry.
	pub retry_statuses: Vec<u16>,
}
impl RetryPolicy {
	const DEFAULT_BACKOFF_FACTOR: f64 = 2.0;
	const DEFAULT_MAX_BACKOFF: StdDuration = StdDuration::from_secs(120);
	const DEFAULT_MAX_RETRIES: u32 = 3;
	const DEFAULT_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

	/// Policy that never retries.
	pub fn none() -> Self {
		Self { max_retries: 0, ..Self::default() }
	}

	/// Overrides the retry count.
	pub fn with_max_retries(mut self, max_retries: u32) -> Self {
		self.max_retries = max_retries;

		self
	}

	/// Overrides the backoff factor; negative or non-finite values clamp to zero.
	pub fn with_backoff_factor(mut self, factor: f64) -> Self {
		self.backoff_factor = if factor.is_finite() && factor > 0.0 { factor } else { 0.0 };

		self
	}

	/// Overrides the backoff ceiling.
	pub fn with_max_backoff(mut self, max_backoff: StdDuration) -> Self {
		self.max_backoff = max_backoff;

		self
	}

	/// Returns true when `status` should be retried.
	pub fn retries_status(&self, status: u16) -> bool {
		self.retry_statuses.contains(&status)
	}

	/// Sleep before retry number `retry` (1-based).
	///
	/// The first retry is immediate; later retries wait `backoff_factor * 2^(retry - 1)`
	/// seconds, capped at [`RetryPolicy::max_backoff`].
	pub fn backoff(&self, retry: u32) -> StdDuration {
		if retry <= 1 || self.backoff_factor == 0.0 {
			return StdDuration::ZERO;
		}

		let exponent = i32::try_from(retry - 1).unwrap_or(i32::MAX);
		let secs = self.backoff_factor * 2f64.powi(exponent);

		if !secs.is_finite() || secs >= self.max_backoff.as_secs_f64() {
			return self.max_backoff;
		}

		StdDuration::from_secs_f64(secs)
	}

	/// Sleep before retry number `retry`, preferring a server `Retry-After` hint.
	///
	/// The hint is capped at [`RetryPolicy::max_backoff`] like the computed backoff.
	pub fn delay_for(&self, retry: u32, retry_after: Option<StdDuration>) -> StdDuration {
		match retry_after {
			Some(hint) => hint.min(self.max_backoff),
			None => self.backoff(retry),
		}
	}
}
impl Default for RetryPolicy {
	fn default() -> Self {
		Self {
			max_retries: Self::DEFAULT_MAX_RETRIES,
			backoff_factor: Self::DEFAULT_BACKOFF_FACTOR,
			max_backoff: Self::DEFAULT_MAX_BACKOFF,
			retry_statuses: Self::DEFAULT_STATUSES.to_vec(),
		}
	}
}

/// Everything needed to construct a [`VerkadaClient`](crate::client::VerkadaClient).
#[derive(Clone, Debug)]
pub struct ClientConfig {
	/// API key exchanged for short-lived tokens.
	pub api_key: ApiKey,
	/// Root for every relative endpoint path.
	pub base_url: Url,
	/// Organization id used by streaming URLs.
	pub org_id: Option<String>,
	/// Per-request timeout.
	pub timeout: StdDuration,
	/// Retry behavior for business endpoints.
	pub retry: RetryPolicy,
	/// Assumed token lifetime, counted from acquisition.
	pub token_lifetime: Duration,
	/// Tokens are refreshed once their remaining lifetime drops to this buffer.
	pub refresh_buffer: Duration,
	token_url: Option<Url>,
	streaming_token_url: Option<Url>,
}
impl ClientConfig {
	/// Default per-request timeout.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(60);
	/// Default token lifetime.
	pub const DEFAULT_TOKEN_LIFETIME: Duration = Duration::minutes(30);
	/// Default refresh buffer.
	pub const DEFAULT_REFRESH_BUFFER: Duration = Duration::seconds(25 * 60);

	/// Creates a config for `api_key` against the public API root.
	pub fn new(api_key: impl Into<String>) -> Result<Self, ConfigError> {
		let api_key = ApiKey::new(api_key)?;
		let base_url = parse_url(DEFAULT_BASE_URL)?;

		Ok(Self {
			api_key,
			base_url,
			org_id: None,
			timeout: Self::DEFAULT_TIMEOUT,
			retry: RetryPolicy::default(),
			token_lifetime: Self::DEFAULT_TOKEN_LIFETIME,
			refresh_buffer: Self::DEFAULT_REFRESH_BUFFER,
			token_url: None,
			streaming_token_url: None,
		})
	}

	/// Loads `.env` (if any) and builds a config from the environment.
	pub fn from_env() -> Result<Self, ConfigError> {
		dotenvy::dotenv().ok();

		let api_key = std::env::var(API_KEY_ENV).map_err(|_| ConfigError::MissingApiKey)?;
		let mut config = Self::new(api_key)?;

		if let Some(org_id) = std::env::var(ORG_ID_ENV).ok().filter(|v| !v.trim().is_empty()) {
			config = config.with_org_id(org_id);
		}
		if let Some(base) = std::env::var(BASE_URL_ENV).ok().filter(|v| !v.trim().is_empty()) {
			config = config.with_base_url(&base)?;
		}

		Ok(config)
	}

	/// Overrides the API root. Token URLs follow unless set explicitly.
	pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
		self.base_url = parse_url(base_url)?;

		Ok(self)
	}

	/// Overrides the standard token endpoint.
	pub fn with_token_url(mut self, token_url: &str) -> Result<Self, ConfigError> {
		self.token_url = Some(parse_url(token_url)?);

		Ok(self)
	}

	/// Overrides the streaming token endpoint.
	pub fn with_streaming_token_url(mut self, url: &str) -> Result<Self, ConfigError> {
		self.streaming_token_url = Some(parse_url(url)?);

		Ok(self)
	}

	/// Sets the organization id.
	pub fn with_org_id(mut self, org_id: impl Into<String>) -> Self {
		self.org_id = Some(org_id.into());

		self
	}

	/// Overrides the per-request timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Overrides the retry policy.
	pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;

		self
	}

	/// Overrides the assumed token lifetime.
	pub fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
		self.token_lifetime = lifetime;

		self
	}

	/// Overrides the refresh buffer; negative values clamp to zero.
	pub fn with_refresh_buffer(mut self, buffer: Duration) -> Self {
		self.refresh_buffer = if buffer.is_negative() { Duration::ZERO } else { buffer };

		self
	}

	/// Standard token endpoint.
	pub fn token_url(&self) -> Result<Url, ConfigError> {
		match &self.token_url {
			Some(url) => Ok(url.clone()),
			None => self.endpoint(endpoints::TOKEN),
		}
	}

	/// Streaming token endpoint.
	pub fn streaming_token_url(&self) -> Result<Url, ConfigError> {
		match &self.streaming_token_url {
			Some(url) => Ok(url.clone()),
			None => self.endpoint(endpoints::STREAMING_TOKEN),
		}
	}

	/// Organization id, or [`ConfigError::MissingOrgId`].
	pub fn require_org_id(&self) -> Result<&str, ConfigError> {
		self.org_id.as_deref().filter(|id| !id.trim().is_empty()).ok_or(ConfigError::MissingOrgId)
	}

	/// Resolves `path` against the API root. Absolute URLs pass through unchanged.
	pub fn endpoint(&self, path: &str) -> Result<Url, ConfigError> {
		if path.starts_with("http://") || path.starts_with("https://") {
			return parse_url(path);
		}

		let root = self.base_url.as_str().trim_end_matches('/');
		let joined = format!("{root}/{}", path.trim_start_matches('/'));

		parse_url(&joined)
	}
}

fn parse_url(raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { url: raw.to_owned(), source })
}
