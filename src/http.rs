//! Request manager and the request/response primitives it speaks.
//!
//! [`RequestManager`] executes one call against the API with default headers, an auth token
//! from the [`TokenManager`], and retries for transient statuses. Redirects are never
//! followed: a 3xx answer is returned to the caller as the final response because some delete
//! endpoints signal success that way.

// crates.io
use reqwest::{
	RequestBuilder, StatusCode,
	header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, RETRY_AFTER},
	multipart::{Form, Part},
	redirect::Policy,
};
use time::format_description::well_known::Rfc2822;
// self
use crate::{
	_prelude::*,
	auth::TokenManager,
	config::{ClientConfig, RetryPolicy},
	error::{ConfigError, TransportError, ValidationError},
	obs::{self, RequestKind, RequestOutcome, RequestSpan},
};

/// Header carrying the short-lived API token.
pub const AUTH_HEADER: &str = "x-verkada-auth";

const BODY_EXCERPT_LEN: usize = 512;

/// HTTP verbs used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
	/// `GET`.
	Get,
	/// `POST`.
	Post,
	/// `PUT`.
	Put,
	/// `PATCH`.
	Patch,
	/// `DELETE`.
	Delete,
}
impl Method {
	/// Upper-case verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
			Method::Put => "PUT",
			Method::Patch => "PATCH",
			Method::Delete => "DELETE",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
impl From<Method> for reqwest::Method {
	fn from(method: Method) -> Self {
		match method {
			Method::Get => reqwest::Method::GET,
			Method::Post => reqwest::Method::POST,
			Method::Put => reqwest::Method::PUT,
			Method::Patch => reqwest::Method::PATCH,
			Method::Delete => reqwest::Method::DELETE,
		}
	}
}

/// Ordered query string. `None` values never reach the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Query(Vec<(String, String)>);
impl Query {
	/// Empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets `key`, replacing an earlier value.
	pub fn insert(&mut self, key: &str, value: impl Display) -> &mut Self {
		let value = value.to_string();

		match self.0.iter_mut().find(|(k, _)| k == key) {
			Some(slot) => slot.1 = value,
			None => self.0.push((key.to_owned(), value)),
		}

		self
	}

	/// Sets `key` when `value` is present.
	pub fn insert_opt<T>(&mut self, key: &str, value: Option<T>) -> &mut Self
	where
		T: Display,
	{
		if let Some(value) = value {
			self.insert(key, value);
		}

		self
	}

	/// Sets `key` to the comma-joined values; an empty list is dropped.
	pub fn insert_list<T>(&mut self, key: &str, values: &[T]) -> &mut Self
	where
		T: AsRef<str>,
	{
		if !values.is_empty() {
			let joined = values.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",");

			self.insert(key, joined);
		}

		self
	}

	/// Sets `key` to `"true"` or `"false"`.
	pub fn insert_bool(&mut self, key: &str, value: bool) -> &mut Self {
		self.insert(key, if value { "true" } else { "false" })
	}

	/// Builder form of [`Query::insert`].
	pub fn with(mut self, key: &str, value: impl Display) -> Self {
		self.insert(key, value);

		self
	}

	/// Builder form of [`Query::insert_opt`].
	pub fn with_opt<T>(mut self, key: &str, value: Option<T>) -> Self
	where
		T: Display,
	{
		self.insert_opt(key, value);

		self
	}

	/// Removes `key`.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		let idx = self.0.iter().position(|(k, _)| k == key)?;

		Some(self.0.remove(idx).1)
	}

	/// Value of `key`, if set.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
	}

	/// Returns `true` when no parameters are set.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Key/value pairs in insertion order.
	pub fn pairs(&self) -> &[(String, String)] {
		&self.0
	}
}
impl<K, V> FromIterator<(K, V)> for Query
where
	K: AsRef<str>,
	V: Display,
{
	fn from_iter<I>(iter: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
	{
		let mut query = Query::new();

		for (k, v) in iter {
			query.insert(k.as_ref(), v);
		}

		query
	}
}

/// File sent as a multipart part.
#[derive(Clone)]
pub struct Attachment {
	/// Multipart field name.
	pub field: String,
	/// File name reported to the server.
	pub file_name: String,
	/// File contents.
	pub bytes: Vec<u8>,
	/// MIME type, if known.
	pub mime: Option<String>,
}
impl Attachment {
	/// Field name used by every upload endpoint.
	pub const DEFAULT_FIELD: &str = "file";

	/// Wraps in-memory contents.
	pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
		Self {
			field: Self::DEFAULT_FIELD.into(),
			file_name: file_name.into(),
			bytes: bytes.into(),
			mime: None,
		}
	}

	/// Reads a file from disk; the handle is closed before this returns.
	pub async fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, TransportError> {
		let path = path.as_ref();
		let bytes = tokio::fs::read(path).await?;
		let file_name = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_else(|| Self::DEFAULT_FIELD.into());

		Ok(Self::from_bytes(file_name, bytes))
	}

	/// Sets the MIME type.
	pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
		self.mime = Some(mime.into());

		self
	}
}
impl Debug for Attachment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Attachment")
			.field("field", &self.field)
			.field("file_name", &self.file_name)
			.field("len", &self.bytes.len())
			.field("mime", &self.mime)
			.finish()
	}
}

/// One call against the API.
#[derive(Clone, Debug)]
pub struct RequestSpec {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the API root, or an absolute URL.
	pub path: String,
	/// Query parameters.
	pub query: Query,
	/// JSON body; ignored when attachments are present.
	pub json: Option<Value>,
	/// Multipart attachments.
	pub attachments: Vec<Attachment>,
	/// Header overrides merged over the defaults.
	pub headers: Vec<(String, String)>,
	/// Return raw bytes instead of decoding JSON.
	pub raw: bool,
	/// Per-request timeout override.
	pub timeout: Option<StdDuration>,
	/// Per-request retry override.
	pub retry: Option<RetryPolicy>,
}
impl RequestSpec {
	/// Creates a spec for `method` on `path`.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			query: Query::new(),
			json: None,
			attachments: Vec::new(),
			headers: Vec::new(),
			raw: false,
			timeout: None,
			retry: None,
		}
	}

	/// Replaces the query.
	pub fn with_query(mut self, query: Query) -> Self {
		self.query = query;

		self
	}

	/// Sets the JSON body.
	pub fn with_json(mut self, body: Value) -> Self {
		self.json = Some(body);

		self
	}

	/// Adds a multipart attachment.
	pub fn with_attachment(mut self, attachment: Attachment) -> Self {
		self.attachments.push(attachment);

		self
	}

	/// Overrides a header.
	pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Requests the raw body.
	pub fn raw(mut self) -> Self {
		self.raw = true;

		self
	}

	/// Overrides the timeout.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = Some(timeout);

		self
	}

	/// Overrides the retry policy.
	pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
		self.retry = Some(retry);

		self
	}

	fn is_multipart(&self) -> bool {
		!self.attachments.is_empty()
	}

	fn overrides(&self, name: &str) -> bool {
		self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
	}
}

/// Decoded response body.
#[derive(Clone, Debug, PartialEq)]
pub enum Response {
	/// JSON value; an empty body decodes to `null`.
	Json(Value),
	/// Raw bytes.
	Bytes(Vec<u8>),
}
impl Response {
	/// Raw bytes, or the JSON value re-encoded.
	pub fn into_bytes(self) -> Vec<u8> {
		match self {
			Response::Bytes(bytes) => bytes,
			Response::Json(value) => value.to_string().into_bytes(),
		}
	}
}

/// Builds the shared reqwest client: no redirect following, config timeout.
pub fn build_http_client(config: &ClientConfig) -> Result<ReqwestClient, ConfigError> {
	ReqwestClient::builder()
		.redirect(Policy::none())
		.timeout(config.timeout)
		.build()
		.map_err(ConfigError::from)
}

/// Executes API calls with default headers, auth, and retry/backoff.
#[derive(Debug)]
pub struct RequestManager {
	http: ReqwestClient,
	config: ClientConfig,
	tokens: Arc<TokenManager>,
}
impl RequestManager {
	/// Creates a manager sharing `http` with its token manager.
	pub fn new(http: ReqwestClient, config: ClientConfig, tokens: Arc<TokenManager>) -> Self {
		Self { http, config, tokens }
	}

	/// Token manager backing the auth header.
	pub fn tokens(&self) -> &Arc<TokenManager> {
		&self.tokens
	}

	/// Active configuration.
	pub fn config(&self) -> &ClientConfig {
		&self.config
	}

	/// Sends `spec`, retrying transient failures.
	///
	/// Retried: statuses in the policy's list (429 and 5xx gateway errors by default) and
	/// connection failures, for every verb. Not retried: timeouts and any other status >= 400.
	/// Statuses below 400, including 3xx, are final successes.
	pub async fn send(&self, spec: RequestSpec) -> Result<Response> {
		let url = self.config.endpoint(&spec.path)?;
		let span = RequestSpan::new(RequestKind::Api, spec.method, url.path());
		let result = span.instrument(self.send_with_retry(&url, &spec)).await;

		match &result {
			Ok(_) => obs::record_request_outcome(RequestKind::Api, RequestOutcome::Success),
			Err(_) => obs::record_request_outcome(RequestKind::Api, RequestOutcome::Failure),
		}

		result
	}

	/// `GET` returning JSON.
	pub async fn get(&self, path: &str, query: Query) -> Result<Value> {
		self.send_json(RequestSpec::new(Method::Get, path).with_query(query)).await
	}

	/// `GET` returning raw bytes.
	pub async fn get_bytes(&self, path: &str, query: Query) -> Result<Vec<u8>> {
		let spec = RequestSpec::new(Method::Get, path).with_query(query).raw();

		Ok(self.send(spec).await?.into_bytes())
	}

	/// `POST` with a JSON body.
	pub async fn post(&self, path: &str, query: Query, body: Option<Value>) -> Result<Value> {
		self.send_json(with_body(RequestSpec::new(Method::Post, path).with_query(query), body))
			.await
	}

	/// `PUT` with a JSON body.
	pub async fn put(&self, path: &str, query: Query, body: Option<Value>) -> Result<Value> {
		self.send_json(with_body(RequestSpec::new(Method::Put, path).with_query(query), body))
			.await
	}

	/// `PATCH` with a JSON body.
	pub async fn patch(&self, path: &str, query: Query, body: Option<Value>) -> Result<Value> {
		self.send_json(with_body(RequestSpec::new(Method::Patch, path).with_query(query), body))
			.await
	}

	/// `DELETE` returning JSON (`null` for empty bodies).
	pub async fn delete(&self, path: &str, query: Query) -> Result<Value> {
		self.send_json(RequestSpec::new(Method::Delete, path).with_query(query)).await
	}

	/// `DELETE` returning the confirmation body untouched, for endpoints that answer in plain
	/// text or with a redirect page.
	pub async fn delete_raw(&self, path: &str, query: Query) -> Result<Vec<u8>> {
		let spec = RequestSpec::new(Method::Delete, path).with_query(query).raw();

		Ok(self.send(spec).await?.into_bytes())
	}

	/// Sends `spec` and returns its JSON value; a body that is not JSON is a decode error.
	pub async fn send_json(&self, spec: RequestSpec) -> Result<Value> {
		let url = self.config.endpoint(&spec.path)?;

		match self.send(spec).await? {
			Response::Json(value) => Ok(value),
			Response::Bytes(bytes) => Ok(parse_json(&url, &bytes)?),
		}
	}

	async fn send_with_retry(&self, url: &Url, spec: &RequestSpec) -> Result<Response> {
		let headers = self.headers_for(spec).await?;
		let policy = spec.retry.as_ref().unwrap_or(&self.config.retry);
		let mut retries = 0;

		loop {
			obs::record_request_outcome(RequestKind::Api, RequestOutcome::Attempt);

			let request = self.build(url, spec, &headers)?;
			let wait = match request.send().await {
				Ok(response) => {
					let status = response.status();

					if status.as_u16() < 400 {
						return decode(url, spec, response).await;
					}
					if retries >= policy.max_retries || !policy.retries_status(status.as_u16()) {
						return Err(status_error(url, spec, response).await.into());
					}

					retries += 1;

					policy.delay_for(retries, parse_retry_after(response.headers()))
				},
				Err(e) if e.is_timeout() =>
					return Err(TransportError::Timeout { url: url.to_string() }.into()),
				Err(e) if e.is_connect() && retries < policy.max_retries => {
					retries += 1;

					policy.backoff(retries)
				},
				Err(e) => return Err(TransportError::network(url.as_str(), e).into()),
			};

			obs::record_retry(RequestKind::Api, retries, wait);

			if !wait.is_zero() {
				tokio::time::sleep(wait).await;
			}
		}
	}

	async fn headers_for(&self, spec: &RequestSpec) -> Result<HeaderMap> {
		let mut headers = HeaderMap::new();

		headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

		if !spec.is_multipart() {
			headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
		}
		if !spec.overrides(AUTH_HEADER) {
			let token = self.tokens.get_token().await?;

			headers.insert(AUTH_HEADER, header_value(AUTH_HEADER, token.expose())?);
		}

		for (name, value) in &spec.headers {
			let name = HeaderName::from_bytes(name.as_bytes())
				.map_err(|e| ValidationError::invalid("headers", e.to_string()))?;

			// Multipart boundaries come from the client.
			if spec.is_multipart() && name == CONTENT_TYPE {
				continue;
			}

			headers.insert(name, header_value("headers", value)?);
		}

		Ok(headers)
	}

	fn build(&self, url: &Url, spec: &RequestSpec, headers: &HeaderMap) -> Result<RequestBuilder> {
		let mut builder =
			self.http.request(spec.method.into(), url.clone()).headers(headers.clone());

		if !spec.query.is_empty() {
			builder = builder.query(spec.query.pairs());
		}
		if let Some(timeout) = spec.timeout {
			builder = builder.timeout(timeout);
		}

		if spec.is_multipart() {
			let mut form = Form::new();

			for attachment in &spec.attachments {
				let mut part =
					Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());

				if let Some(mime) = &attachment.mime {
					part = part
						.mime_str(mime)
						.map_err(|e| ValidationError::invalid("attachment mime", e.to_string()))?;
				}

				form = form.part(attachment.field.clone(), part);
			}

			builder = builder.multipart(form);
		} else if let Some(body) = &spec.json {
			builder = builder.body(body.to_string());
		}

		Ok(builder)
	}
}

fn with_body(spec: RequestSpec, body: Option<Value>) -> RequestSpec {
	match body {
		Some(body) => spec.with_json(body),
		None => spec,
	}
}

fn header_value(field: &'static str, value: &str) -> Result<HeaderValue, ValidationError> {
	HeaderValue::from_str(value).map_err(|e| ValidationError::invalid(field, e.to_string()))
}

async fn decode(url: &Url, spec: &RequestSpec, response: reqwest::Response) -> Result<Response> {
	let bytes = response.bytes().await.map_err(|e| TransportError::network(url.as_str(), e))?;

	if spec.raw {
		return Ok(Response::Bytes(bytes.to_vec()));
	}

	Ok(Response::Json(parse_json(url, &bytes)?))
}

/// Parses a JSON body; a blank body is `null`.
fn parse_json(url: &Url, bytes: &[u8]) -> Result<Value, TransportError> {
	if bytes.iter().all(u8::is_ascii_whitespace) {
		return Ok(Value::Null);
	}

	let mut de = serde_json::Deserializer::from_slice(bytes);

	serde_path_to_error::deserialize(&mut de)
		.map_err(|source| TransportError::Decode { url: url.to_string(), source })
}

async fn status_error(
	url: &Url,
	spec: &RequestSpec,
	response: reqwest::Response,
) -> TransportError {
	let status: StatusCode = response.status();
	let body = response.bytes().await.map(|b| body_excerpt(&b)).unwrap_or_default();

	TransportError::Status {
		method: spec.method.as_str(),
		url: url.to_string(),
		status: status.as_u16(),
		body,
	}
}

/// Lossy UTF-8 prefix of a response body for error messages.
pub(crate) fn body_excerpt(bytes: &[u8]) -> String {
	let text = String::from_utf8_lossy(bytes);
	let trimmed = text.trim();

	match trimmed.char_indices().nth(BODY_EXCERPT_LEN) {
		Some((idx, _)) => format!("{}...", &trimmed[..idx]),
		None => trimmed.to_owned(),
	}
}

/// Parses `Retry-After` as delay seconds or an HTTP date.
pub(crate) fn parse_retry_after(headers: &HeaderMap) -> Option<StdDuration> {
	let value = headers.get(RETRY_AFTER)?;
	let raw = value.to_str().ok()?.trim();

	if let Ok(secs) = raw.parse::<u64>() {
		return Some(StdDuration::from_secs(secs));
	}
	if let Ok(moment) = OffsetDateTime::parse(raw, &Rfc2822) {
		let delta = moment - OffsetDateTime::now_utc();

		if delta.is_positive() {
			return Some(delta.unsigned_abs());
		}
	}

	None
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn query_drops_none_and_joins_lists() {
		let mut query = Query::new();

		query
			.insert("site_id", "s1")
			.insert_opt::<&str>("user_id", None)
			.insert_list("door_ids", &["a", "b"])
			.insert_list::<&str>("empty", &[])
			.insert_bool("include_image_url", false)
			.insert("site_id", "s2");

		assert_eq!(
			query.pairs(),
			&[
				("site_id".to_owned(), "s2".to_owned()),
				("door_ids".to_owned(), "a,b".to_owned()),
				("include_image_url".to_owned(), "false".to_owned()),
			]
		);
	}

	#[test]
	fn retry_after_seconds_are_parsed() {
		let mut headers = HeaderMap::new();

		headers.insert(RETRY_AFTER, HeaderValue::from_static("7"));

		assert_eq!(parse_retry_after(&headers), Some(StdDuration::from_secs(7)));

		headers.insert(RETRY_AFTER, HeaderValue::from_static("Wed, 21 Oct 2015 07:28:00 GMT"));

		assert_eq!(parse_retry_after(&headers), None);
	}

	#[test]
	fn body_excerpt_truncates_long_bodies() {
		let long = "x".repeat(BODY_EXCERPT_LEN + 10);
		let excerpt = body_excerpt(long.as_bytes());

		assert!(excerpt.ends_with("..."));
		assert_eq!(excerpt.len(), BODY_EXCERPT_LEN + 3);
		assert_eq!(body_excerpt(b"  short \n"), "short");
	}

	#[test]
	fn raw_response_reencodes_json() {
		assert_eq!(Response::Json(json!({"a": 1})).into_bytes(), br#"{"a":1}"#.to_vec());
	}

	#[test]
	fn non_json_bodies_fail_to_decode() {
		let url = Url::parse("https://api.verkada.com/x").expect("URL should parse.");

		assert_eq!(parse_json(&url, b" \n").expect("Blank body should be null."), Value::Null);
		assert_eq!(parse_json(&url, b"{\"b\":2}").expect("JSON should parse."), json!({"b": 2}));
		assert!(matches!(parse_json(&url, b"Deleted"), Err(TransportError::Decode { .. })));
	}
}
