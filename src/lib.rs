//! Typed async client for the Hotmart REST API: client-credentials auth with single-flight token
//! refresh, plus students, subscriptions, and club pages in one crate.
//!
//! [`client::HotmartClient`] is the token-managed pipeline every call flows through;
//! [`api`] holds the endpoint clients and [`sdk::Hotmart`] bundles them behind one facade.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod sdk;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{client::ReqwestHotmartClient, config::ClientConfig, http::ReqwestTransport};

	/// Path of the token endpoint on mock servers.
	pub const TEST_AUTH_PATH: &str = "/security/oauth/token";

	/// Builds a reqwest transport that accepts the self-signed certificates produced by
	/// `httpmock` during tests.
	pub fn test_reqwest_transport() -> ReqwestTransport {
		let client = ReqwestClient::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()
			.expect("Failed to build insecure Reqwest client for tests.");

		ReqwestTransport::with_client(client)
	}

	/// Configuration pointing both the API host and the token endpoint at `server_base`.
	pub fn test_config(server_base: &str) -> ClientConfig {
		let base = Url::parse(server_base).expect("Failed to parse mock server base URL.");
		let auth = base.join(TEST_AUTH_PATH).expect("Failed to build mock token endpoint URL.");

		ClientConfig::new("test-client", "test-secret").with_base_url(base).with_auth_url(auth)
	}

	/// Constructs a pipeline against a mock server.
	pub fn build_test_client(server_base: &str) -> Arc<ReqwestHotmartClient> {
		let client =
			ReqwestHotmartClient::with_transport(test_config(server_base), test_reqwest_transport())
				.expect("Failed to build test client.");

		Arc::new(client)
	}
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use parking_lot::RwLock;
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _};
