//! Client-level error types shared by the transport pipeline and endpoint clients.
//!
//! Every failure surfaces as a single [`Error`] whose `Display` output is the normalized,
//! human-readable message. Structured fields (HTTP status, upstream error code) stay available
//! for callers that want to branch on them.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Caller input rejected before any request was sent.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Network failure or a non-2xx response without a structured error body.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Hotmart answered with a structured `{error, error_description}` body.
	#[error(transparent)]
	Api(#[from] ApiError),
	/// A successful response body did not match the expected shape.
	#[error("Response body could not be decoded: {source}.")]
	Decode {
		/// HTTP status of the undecodable response.
		status: u16,
		/// Path-aware parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Token endpoint answered 2xx without a usable access token.
	#[error("Token endpoint returned an empty access token.")]
	EmptyAccessToken,
	/// The client-credentials exchange failed; no token was cached.
	#[error("Authentication failed: {source}")]
	Authentication {
		/// Failure raised while calling the authentication endpoint.
		#[source]
		source: Box<Error>,
	},
}
impl Error {
	pub(crate) fn authentication(source: Error) -> Self {
		Self::Authentication { source: Box::new(source) }
	}

	/// Returns the HTTP status tied to the failure, when a response was received.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Api(e) => Some(e.status),
			Self::Transport(TransportError::Status { status, .. }) => Some(*status),
			Self::Decode { status, .. } => Some(*status),
			Self::Authentication { source } => source.status(),
			_ => None,
		}
	}

	/// Returns `true` when an API request was rejected with HTTP 401.
	///
	/// The cached token has already been discarded by the time callers observe this error, so
	/// the next call re-authenticates. Failures of the token exchange itself are reported as
	/// [`Error::Authentication`] and never match.
	pub fn is_unauthorized(&self) -> bool {
		matches!(self, Self::Api(_) | Self::Transport(_)) && self.status() == Some(401)
	}
}

/// Configuration and request-construction failures.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// A configured URL cannot be parsed.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Configuration field holding the URL.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL uses a scheme other than http(s).
	#[error("The {field} URL must use http or https, got `{scheme}`.")]
	UnsupportedScheme {
		/// Configuration field holding the URL.
		field: &'static str,
		/// Offending scheme.
		scheme: String,
	},
	/// Client id or secret is empty.
	#[error("The client {field} must not be empty.")]
	MissingCredential {
		/// Credential label (`id` or `secret`).
		field: &'static str,
	},
	/// Required environment variable is absent.
	#[error("Environment variable {name} is required.")]
	MissingEnv {
		/// Variable name.
		name: &'static str,
	},
	/// Environment variable holds an unparsable value.
	#[error("Environment variable {name} has an invalid value `{value}`.")]
	InvalidEnv {
		/// Variable name.
		name: &'static str,
		/// Raw value read from the environment.
		value: String,
	},
	/// Relative request path cannot be resolved against the base URL.
	#[error("Request path `{path}` cannot be resolved against the base URL.")]
	InvalidPath {
		/// Path supplied by the caller.
		path: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Request body could not be serialized to JSON.
	#[error("Request body could not be serialized.")]
	SerializeBody(#[source] serde_json::Error),
	/// Header name or value rejected by the transport.
	#[error("Header `{name}` is invalid.")]
	InvalidHeader {
		/// Offending header name.
		name: String,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Domain input rejected synchronously, before the transport pipeline runs.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Billing day outside `1..=31`.
	#[error("Due day must be between 1 and 31, got {due_day}.")]
	DueDayOutOfRange {
		/// Rejected value.
		due_day: u8,
	},
}

/// Transport-level failures.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// No response was received (DNS, TCP, TLS, timeout).
	#[error("Request failed: {message}")]
	Network {
		/// Every cause in the source chain, joined by `": "`.
		message: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Upstream answered with a non-2xx status and no structured error body.
	#[error("Request failed with status code {status}.")]
	Status {
		/// HTTP status code.
		status: u16,
		/// Leading part of the response body, when one was sent.
		body_preview: Option<String>,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("Request failed: {0}")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Wraps a transport-specific network error, rendering its whole source chain.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		let mut message = src.to_string();
		let mut cause = src.source();

		while let Some(err) = cause {
			let text = err.to_string();

			// Some layers repeat the inner message verbatim.
			if !text.is_empty() && !message.ends_with(&text) {
				message.push_str(": ");
				message.push_str(&text);
			}

			cause = err.source();
		}

		Self::Network { message, source: Box::new(src) }
	}

	pub(crate) fn status(status: u16, body: &[u8]) -> Self {
		let text = String::from_utf8_lossy(body);
		let text = text.trim();
		let body_preview = (!text.is_empty()).then(|| truncate_preview(text));

		Self::Status { status, body_preview }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		// Token exchanges carry the client secret in the query string.
		Self::network(e.without_url())
	}
}

/// Structured error returned by the Hotmart API.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Hotmart API Error: {}", self.message())]
pub struct ApiError {
	/// HTTP status code of the response.
	pub status: u16,
	/// Upstream `error` code (e.g. `invalid_client`).
	pub error: String,
	/// Upstream `error_description`, when present.
	pub error_description: Option<String>,
	/// Upstream `error_uri`, when present.
	pub error_uri: Option<String>,
}
impl ApiError {
	/// Returns the human-readable message, preferring `error_description` over `error`.
	pub fn message(&self) -> &str {
		self.error_description.as_deref().filter(|value| !value.is_empty()).unwrap_or(&self.error)
	}

	/// Parses a structured error body; returns `None` unless `error` or `error_description`
	/// carries a value.
	pub(crate) fn from_body(status: u16, body: &[u8]) -> Option<Self> {
		#[derive(Deserialize)]
		struct Body {
			#[serde(default)]
			error: Option<String>,
			#[serde(default)]
			error_description: Option<String>,
			#[serde(default)]
			error_uri: Option<String>,
		}

		let body = serde_json::from_slice::<Body>(body).ok()?;
		let error = body.error.filter(|value| !value.is_empty());
		let error_description = body.error_description.filter(|value| !value.is_empty());

		if error.is_none() && error_description.is_none() {
			return None;
		}

		Some(Self {
			status,
			error: error.unwrap_or_default(),
			error_description,
			error_uri: body.error_uri,
		})
	}
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= TransportError::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = body.chars().take(TransportError::BODY_PREVIEW_LIMIT).collect::<String>();

	buf.push('…');

	buf
}
