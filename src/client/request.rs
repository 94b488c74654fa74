//! Verb methods and the request pipeline shared by every API call.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	client::HotmartClient,
	error::{ApiError, ConfigError, TransportError},
	http::{HttpRequest, HttpTransport, Method},
	obs::{self, CallStage},
};

pub(crate) const AUTHORIZATION: &str = "Authorization";
pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const APPLICATION_JSON: &str = "application/json";

/// Per-call request configuration (query parameters and extra headers).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestOptions {
	/// Query pairs appended to the URL in insertion order; repeated keys are allowed.
	pub query: Vec<(String, String)>,
	/// Extra headers merged over the base headers.
	pub headers: Vec<(String, String)>,
}
impl RequestOptions {
	/// Creates empty options.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a query pair.
	pub fn query(mut self, key: impl Into<String>, value: impl Display) -> Self {
		self.query.push((key.into(), value.to_string()));

		self
	}

	/// Appends a query pair when `value` is present.
	pub fn query_opt<V>(self, key: impl Into<String>, value: Option<V>) -> Self
	where
		V: Display,
	{
		match value {
			Some(value) => self.query(key, value),
			None => self,
		}
	}

	/// Appends one query pair per value under the same key.
	pub fn query_all<I>(mut self, key: impl Into<String>, values: I) -> Self
	where
		I: IntoIterator,
		I::Item: Display,
	{
		let key = key.into();

		for value in values {
			self.query.push((key.clone(), value.to_string()));
		}

		self
	}

	/// Adds or replaces a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}
}

/// Outbound call description handed to [`HotmartClient::send`].
#[derive(Clone, Debug)]
pub struct PendingRequest {
	/// HTTP verb.
	pub method: Method,
	/// Path relative to the API host (absolute URLs pass through).
	pub path: String,
	/// Query parameters and extra headers.
	pub options: RequestOptions,
	/// JSON body, if any.
	pub body: Option<Vec<u8>>,
}
impl PendingRequest {
	/// Creates a bodyless request.
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self { method, path: path.into(), options: RequestOptions::default(), body: None }
	}

	/// Replaces the per-call options.
	pub fn with_options(mut self, options: RequestOptions) -> Self {
		self.options = options;

		self
	}

	/// Serializes `body` as the JSON payload.
	pub fn json<B>(mut self, body: &B) -> Result<Self>
	where
		B: ?Sized + Serialize,
	{
		self.body = Some(serde_json::to_vec(body).map_err(ConfigError::SerializeBody)?);

		Ok(self)
	}
}

impl<T> HotmartClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Issues a `GET` and decodes the response body.
	pub async fn get<R>(&self, path: &str, options: RequestOptions) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.send(PendingRequest::new(Method::Get, path).with_options(options)).await
	}

	/// Issues a `POST` with a JSON body and decodes the response body.
	pub async fn post<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.send(PendingRequest::new(Method::Post, path).with_options(options).json(body)?).await
	}

	/// Issues a `PUT` with a JSON body and decodes the response body.
	pub async fn put<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.send(PendingRequest::new(Method::Put, path).with_options(options).json(body)?).await
	}

	/// Issues a `PATCH` with a JSON body and decodes the response body.
	pub async fn patch<B, R>(&self, path: &str, body: &B, options: RequestOptions) -> Result<R>
	where
		B: ?Sized + Serialize,
		R: DeserializeOwned,
	{
		self.send(PendingRequest::new(Method::Patch, path).with_options(options).json(body)?)
			.await
	}

	/// Issues a `DELETE` and decodes the response body.
	pub async fn delete<R>(&self, path: &str, options: RequestOptions) -> Result<R>
	where
		R: DeserializeOwned,
	{
		self.send(PendingRequest::new(Method::Delete, path).with_options(options)).await
	}

	/// Runs `request` through the pipeline: ensure token, dispatch, classify, decode.
	///
	/// Empty success bodies decode as JSON `null`, so `R = ()` or `Option<_>` accept them.
	pub async fn send<R>(&self, request: PendingRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		obs::observe_call(CallStage::Request, request.method, self.dispatch(request)).await
	}

	async fn dispatch<R>(&self, request: PendingRequest) -> Result<R>
	where
		R: DeserializeOwned,
	{
		let PendingRequest { method, path, options, body } = request;
		let RequestOptions { query, headers: extra_headers } = options;
		let mut url = self.endpoints.resolve(&path)?;

		if !query.is_empty() {
			url.query_pairs_mut().extend_pairs(query);
		}

		let token = self.ensure_token().await?;
		let mut headers = vec![(CONTENT_TYPE.to_owned(), APPLICATION_JSON.to_owned())];

		merge_headers(&mut headers, extra_headers);
		merge_headers(&mut headers, [(AUTHORIZATION.to_owned(), token.access_token.bearer())]);

		let request = HttpRequest { method, url, headers, body, timeout: self.timeout };

		self.metrics.record_request();

		let response = self.transport.execute(request).await?;

		if !response.is_success() {
			if response.status == 401 {
				self.invalidate_rejected(token.generation, response.status);
			}

			return Err(classify_failure(response.status, &response.body));
		}

		decode(response.status, &response.body)
	}
}

/// Builds the normalized error for a non-2xx response.
pub(crate) fn classify_failure(status: u16, body: &[u8]) -> Error {
	match ApiError::from_body(status, body) {
		Some(api) => api.into(),
		None => TransportError::status(status, body).into(),
	}
}

/// Decodes a success body with path-aware errors; blank bodies decode as `null`.
pub(crate) fn decode<R>(status: u16, body: &[u8]) -> Result<R>
where
	R: DeserializeOwned,
{
	let body = if body.iter().all(u8::is_ascii_whitespace) { b"null".as_slice() } else { body };
	let mut deserializer = serde_json::Deserializer::from_slice(body);

	serde_path_to_error::deserialize(&mut deserializer).map_err(|source| Error::Decode { status, source })
}

fn merge_headers<I>(headers: &mut Vec<(String, String)>, extra: I)
where
	I: IntoIterator<Item = (String, String)>,
{
	for (name, value) in extra {
		headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
		headers.push((name, value));
	}
}
