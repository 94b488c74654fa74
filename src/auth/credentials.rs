//! Client credential helpers for the client-credentials exchange.

// crates.io
use base64::{Engine, engine::general_purpose::STANDARD};
// self
use crate::_prelude::*;

/// Redacted client secret wrapper keeping credentials out of logs.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(String);
impl ClientSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner secret. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl Debug for ClientSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("ClientSecret").field(&"<redacted>").finish()
	}
}

/// Builds the `Authorization: Basic base64(id:secret)` header value.
pub fn basic_authorization(client_id: &str, client_secret: &ClientSecret) -> String {
	let encoded = STANDARD.encode(format!("{client_id}:{}", client_secret.expose()));

	format!("Basic {encoded}")
}
