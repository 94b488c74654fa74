//! Client configuration: credentials, environment selection, and endpoint overrides.
//!
//! [`ClientConfig`] is the only input required to build a client. It can be assembled with the
//! builder-style setters, deserialized from any serde format, or read from `HOTMART_*`
//! environment variables via [`ClientConfig::from_env`].

// std
use std::time::Duration as StdDuration;
// self
use crate::{_prelude::*, auth::ClientSecret, error::ConfigError};

/// Hotmart deployment targeted by a client.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
	/// Live platform.
	#[default]
	Production,
	/// Sandbox platform for integration testing.
	Sandbox,
}
impl Environment {
	/// Maps the `is_sandbox` flag onto an environment.
	pub const fn from_sandbox(is_sandbox: bool) -> Self {
		if is_sandbox { Self::Sandbox } else { Self::Production }
	}

	/// Default API host for the environment.
	pub const fn api_base(self) -> &'static str {
		match self {
			Self::Production => "https://developers.hotmart.com",
			Self::Sandbox => "https://sandbox.hotmart.com",
		}
	}

	/// Client-credentials token endpoint for the environment.
	pub const fn auth_endpoint(self) -> &'static str {
		match self {
			Self::Production => "https://api-sec-vlc.hotmart.com/security/oauth/token",
			Self::Sandbox => "https://sandbox.hotmart.com/security/oauth/token",
		}
	}

	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Production => "production",
			Self::Sandbox => "sandbox",
		}
	}
}
impl Display for Environment {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Construction options for a Hotmart client.
#[derive(Clone, Debug, Deserialize)]
pub struct ClientConfig {
	/// OAuth client identifier.
	pub client_id: String,
	/// OAuth client secret.
	pub client_secret: ClientSecret,
	/// Selects the sandbox hosts when `true`.
	#[serde(default)]
	pub is_sandbox: bool,
	/// Overrides the API host chosen by the environment.
	#[serde(default)]
	pub base_url: Option<Url>,
	/// Overrides the authentication endpoint chosen by the environment.
	#[serde(default)]
	pub auth_url: Option<Url>,
	/// Per-request timeout; deserialized from whole seconds under `timeout_secs`.
	#[serde(
		rename = "timeout_secs",
		default = "ClientConfig::default_timeout",
		deserialize_with = "deserialize_secs"
	)]
	pub timeout: StdDuration,
}
impl ClientConfig {
	/// Timeout applied to every HTTP dispatch unless overridden.
	pub const DEFAULT_TIMEOUT: StdDuration = StdDuration::from_secs(30);

	/// Creates a production configuration for the provided credential pair.
	pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
		Self {
			client_id: client_id.into(),
			client_secret: ClientSecret::new(client_secret),
			is_sandbox: false,
			base_url: None,
			auth_url: None,
			timeout: Self::DEFAULT_TIMEOUT,
		}
	}

	/// Reads the configuration from `HOTMART_*` environment variables.
	///
	/// `HOTMART_CLIENT_ID` and `HOTMART_CLIENT_SECRET` are required; `HOTMART_SANDBOX`,
	/// `HOTMART_BASE_URL`, `HOTMART_AUTH_URL`, and `HOTMART_TIMEOUT_SECS` are optional.
	pub fn from_env() -> Result<Self, ConfigError> {
		Self::from_env_with(|name| std::env::var(name).ok())
	}

	/// Same as [`ClientConfig::from_env`] but resolves variables through `lookup`.
	pub fn from_env_with<F>(lookup: F) -> Result<Self, ConfigError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let read = |name: &'static str| lookup(name).map(|v| v.trim().to_owned());
		let required = |name: &'static str| {
			read(name).filter(|v| !v.is_empty()).ok_or(ConfigError::MissingEnv { name })
		};
		let mut config = Self::new(required("HOTMART_CLIENT_ID")?, required("HOTMART_CLIENT_SECRET")?);

		if let Some(raw) = read("HOTMART_SANDBOX") {
			config.is_sandbox = parse_flag(&raw)
				.ok_or(ConfigError::InvalidEnv { name: "HOTMART_SANDBOX", value: raw })?;
		}
		if let Some(raw) = read("HOTMART_BASE_URL").filter(|v| !v.is_empty()) {
			config.base_url = Some(
				Url::parse(&raw)
					.map_err(|source| ConfigError::InvalidUrl { field: "base", source })?,
			);
		}
		if let Some(raw) = read("HOTMART_AUTH_URL").filter(|v| !v.is_empty()) {
			config.auth_url = Some(
				Url::parse(&raw)
					.map_err(|source| ConfigError::InvalidUrl { field: "auth", source })?,
			);
		}
		if let Some(raw) = read("HOTMART_TIMEOUT_SECS").filter(|v| !v.is_empty()) {
			config.timeout = raw
				.parse::<u64>()
				.ok()
				.filter(|secs| *secs > 0)
				.map(StdDuration::from_secs)
				.ok_or(ConfigError::InvalidEnv { name: "HOTMART_TIMEOUT_SECS", value: raw })?;
		}

		Ok(config)
	}

	/// Toggles the sandbox environment.
	pub fn sandbox(mut self, is_sandbox: bool) -> Self {
		self.is_sandbox = is_sandbox;

		self
	}

	/// Overrides the API host.
	pub fn with_base_url(mut self, url: Url) -> Self {
		self.base_url = Some(url);

		self
	}

	/// Overrides the authentication endpoint.
	pub fn with_auth_url(mut self, url: Url) -> Self {
		self.auth_url = Some(url);

		self
	}

	/// Overrides the per-request timeout; sub-second precision is kept.
	pub fn with_timeout(mut self, timeout: StdDuration) -> Self {
		self.timeout = timeout;

		self
	}

	/// Environment selected by [`ClientConfig::is_sandbox`].
	pub fn environment(&self) -> Environment {
		Environment::from_sandbox(self.is_sandbox)
	}

	/// Per-request timeout.
	pub fn timeout(&self) -> StdDuration {
		self.timeout
	}

	/// Validates credentials and resolves the endpoints the client will call.
	pub fn endpoints(&self) -> Result<Endpoints, ConfigError> {
		if self.client_id.trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "id" });
		}
		if self.client_secret.expose().trim().is_empty() {
			return Err(ConfigError::MissingCredential { field: "secret" });
		}

		let environment = self.environment();
		let api_base = match &self.base_url {
			Some(url) => url.clone(),
			None => parse_url("base", environment.api_base())?,
		};
		let auth = match &self.auth_url {
			Some(url) => url.clone(),
			None => parse_url("auth", environment.auth_endpoint())?,
		};

		ensure_http("base", &api_base)?;
		ensure_http("auth", &auth)?;

		Ok(Endpoints { api_base, auth })
	}

	fn default_timeout() -> StdDuration {
		Self::DEFAULT_TIMEOUT
	}
}

/// Validated endpoint set consumed by the client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
	/// Host every relative request path is appended to.
	pub api_base: Url,
	/// Client-credentials token endpoint.
	pub auth: Url,
}
impl Endpoints {
	/// Resolves a request path against the API host.
	///
	/// Relative paths are appended to the base (keeping any base path prefix); absolute http(s)
	/// URLs pass through unchanged.
	pub fn resolve(&self, path: &str) -> Result<Url, ConfigError> {
		if let Ok(url) = Url::parse(path)
			&& matches!(url.scheme(), "http" | "https")
		{
			return Ok(url);
		}

		let base = self.api_base.as_str().trim_end_matches('/');
		let joined = format!("{base}/{}", path.trim_start_matches('/'));

		Url::parse(&joined).map_err(|source| ConfigError::InvalidPath { path: path.into(), source })
	}
}

fn deserialize_secs<'de, D>(deserializer: D) -> Result<StdDuration, D::Error>
where
	D: serde::Deserializer<'de>,
{
	u64::deserialize(deserializer).map(StdDuration::from_secs)
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source })
}

fn ensure_http(field: &'static str, url: &Url) -> Result<(), ConfigError> {
	match url.scheme() {
		"http" | "https" => Ok(()),
		scheme => Err(ConfigError::UnsupportedScheme { field, scheme: scheme.into() }),
	}
}

fn parse_flag(raw: &str) -> Option<bool> {
	match raw.to_ascii_lowercase().as_str() {
		"" | "0" | "false" | "no" | "off" => Some(false),
		"1" | "true" | "yes" | "on" => Some(true),
		_ => None,
	}
}
