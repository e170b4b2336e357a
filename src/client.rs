//! Client facade tying configuration, tokens, transport, and pagination together.
//!
//! [`VerkadaClient`] is built once at process entry and passed down; it owns the shared
//! reqwest client, the API token manager (through its [`RequestManager`]), and a separate
//! streaming token manager. Resource operations live in [`crate::api`] as `impl VerkadaClient`
//! blocks grouped by product area.

// self
use crate::{
	_prelude::*,
	auth::{TokenKind, TokenManager},
	config::ClientConfig,
	http::{self, Query, RequestManager},
	pagination::{ClientPaginator, PageFn, PageFuture, PageKeys, Paginator},
};

/// Entry point for every API operation.
#[derive(Clone, Debug)]
pub struct VerkadaClient {
	requests: Arc<RequestManager>,
	streaming_tokens: Arc<TokenManager>,
}
impl VerkadaClient {
	/// Builds a client from an explicit config.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let http = http::build_http_client(&config)?;
		let tokens =
			Arc::new(TokenManager::from_config(http.clone(), &config, TokenKind::Standard)?);
		let streaming_tokens =
			Arc::new(TokenManager::from_config(http.clone(), &config, TokenKind::Streaming)?);
		let requests = Arc::new(RequestManager::new(http, config, tokens));

		Ok(Self { requests, streaming_tokens })
	}

	/// Builds a client from `VERKADA_API_KEY` and friends (see [`ClientConfig::from_env`]).
	pub fn from_env() -> Result<Self> {
		Self::new(ClientConfig::from_env()?)
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		self.requests.config()
	}

	/// Request manager used by every operation.
	pub fn requests(&self) -> &RequestManager {
		&self.requests
	}

	/// API token manager.
	pub fn tokens(&self) -> &TokenManager {
		self.requests.tokens()
	}

	/// Streaming token manager.
	pub fn streaming_tokens(&self) -> &TokenManager {
		&self.streaming_tokens
	}

	/// Walks a `GET` list endpoint page by page with explicit keys.
	pub fn paginate<'a>(
		&'a self,
		path: &'a str,
		query: Query,
		keys: PageKeys,
	) -> ClientPaginator<'a> {
		self.paginate_with(path, query).with_keys(keys)
	}

	/// Walks a `GET` list endpoint, inferring whichever keys are not set on the result.
	pub fn paginate_with<'a>(&'a self, path: &'a str, query: Query) -> ClientPaginator<'a> {
		let requests = &self.requests;
		let fetch: PageFn<'a> = Box::new(move |page_query: Query| -> PageFuture<'a> {
			Box::pin(requests.get(path, page_query))
		});

		Paginator::new(fetch, query)
	}
}
