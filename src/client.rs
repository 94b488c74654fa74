//! Token-managed HTTP request pipeline.
//!
//! [`HotmartClient`] owns the transport, the resolved endpoints, and the single cached bearer
//! token. Every verb call runs the same pipeline: ensure a valid token (authenticating lazily
//! when the cache is absent or stale), dispatch with `Authorization: Bearer`, discard the token
//! when the API answers 401, and normalize failures into [`Error`].
//!
//! Concurrent callers that find the token stale share one in-flight exchange: the refresh runs
//! under an async single-flight guard and re-checks the cache after acquiring it. A 401 is never
//! retried; the rejected call fails and only the next call re-authenticates.

mod metrics;
mod request;
mod token;

pub use metrics::*;
pub use request::*;

// std
use std::{sync::atomic::AtomicU64, time::Duration as StdDuration};
// self
use crate::{
	_prelude::*,
	auth::{ClientSecret, TokenState},
	config::{ClientConfig, Endpoints, Environment},
	http::HttpTransport,
};
#[cfg(feature = "reqwest")]
use crate::{error::ConfigError, http::ReqwestTransport};

#[cfg(feature = "reqwest")]
/// Client specialized for the crate's default reqwest transport.
pub type ReqwestHotmartClient = HotmartClient<ReqwestTransport>;

/// Authenticated transport shared by every endpoint client.
pub struct HotmartClient<T>
where
	T: ?Sized + HttpTransport,
{
	transport: Arc<T>,
	client_id: String,
	client_secret: ClientSecret,
	environment: Environment,
	endpoints: Endpoints,
	timeout: StdDuration,
	token: RwLock<TokenState>,
	refresh_guard: AsyncMutex<()>,
	generation: AtomicU64,
	metrics: ClientMetrics,
}
impl<T> HotmartClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Creates a client that dispatches through the caller-provided transport.
	pub fn with_transport(config: ClientConfig, transport: impl Into<Arc<T>>) -> Result<Self> {
		let endpoints = config.endpoints()?;
		let environment = config.environment();
		let timeout = config.timeout();

		Ok(Self {
			transport: transport.into(),
			client_id: config.client_id,
			client_secret: config.client_secret,
			environment,
			endpoints,
			timeout,
			token: RwLock::new(TokenState::Absent),
			refresh_guard: AsyncMutex::new(()),
			generation: AtomicU64::new(0),
			metrics: ClientMetrics::default(),
		})
	}

	/// Environment the client was configured for.
	pub fn environment(&self) -> Environment {
		self.environment
	}

	/// Resolved API host and authentication endpoint.
	pub fn endpoints(&self) -> &Endpoints {
		&self.endpoints
	}

	/// Pipeline counters (exchanges, requests, invalidations).
	pub fn metrics(&self) -> &ClientMetrics {
		&self.metrics
	}

	/// Transport used for every dispatch.
	pub fn transport(&self) -> &Arc<T> {
		&self.transport
	}
}
#[cfg(feature = "reqwest")]
impl HotmartClient<ReqwestTransport> {
	/// Creates a client backed by a fresh reqwest transport.
	pub fn new(config: ClientConfig) -> Result<Self> {
		let client = ReqwestClient::builder().build().map_err(ConfigError::from)?;

		Self::with_transport(config, ReqwestTransport::with_client(client))
	}
}
impl<T> Debug for HotmartClient<T>
where
	T: ?Sized + HttpTransport,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("HotmartClient")
			.field("client_id", &self.client_id)
			.field("environment", &self.environment)
			.field("endpoints", &self.endpoints)
			.field("timeout", &self.timeout)
			.field("token_phase", &self.token_phase())
			.finish()
	}
}
