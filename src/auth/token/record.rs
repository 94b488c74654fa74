//! Token endpoint payload and the cached record derived from it.

// self
use crate::{_prelude::*, auth::token::secret::TokenSecret};

/// JSON body returned by the client-credentials token endpoint.
#[derive(Clone, Deserialize)]
pub struct AccessTokenResponse {
	/// Bearer token value.
	pub access_token: TokenSecret,
	/// Token type advertised by the endpoint (normally `bearer`).
	#[serde(default)]
	pub token_type: Option<String>,
	/// Advertised lifetime in seconds.
	pub expires_in: u64,
	/// Granted scope string.
	#[serde(default)]
	pub scope: Option<String>,
	/// JWT identifier.
	#[serde(default)]
	pub jti: Option<String>,
}
impl Debug for AccessTokenResponse {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AccessTokenResponse")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("expires_in", &self.expires_in)
			.field("scope", &self.scope)
			.field("jti", &self.jti)
			.finish()
	}
}

/// Bearer token held by the client between calls.
#[derive(Clone)]
pub struct CachedToken {
	/// Token value attached to outbound requests.
	pub access_token: TokenSecret,
	/// Token type advertised by the endpoint.
	pub token_type: Option<String>,
	/// Granted scope string.
	pub scope: Option<String>,
	/// Instant the exchange completed.
	pub issued_at: OffsetDateTime,
	/// Instant after which the token is treated as stale (advertised lifetime minus
	/// [`CachedToken::EXPIRY_MARGIN`]).
	pub expires_at: OffsetDateTime,
	/// Monotonic issuance counter used to match 401s against the token that caused them.
	pub generation: u64,
}
impl CachedToken {
	/// Subtracted from the advertised lifetime so requests never race the real expiry.
	pub const EXPIRY_MARGIN: Duration = Duration::seconds(60);

	/// Builds a record from a token endpoint response received at `issued_at`.
	///
	/// Returns `None` when the endpoint sent an empty token.
	pub fn from_response(
		response: AccessTokenResponse,
		issued_at: OffsetDateTime,
		generation: u64,
	) -> Option<Self> {
		if response.access_token.expose().is_empty() {
			return None;
		}

		let lifetime = Duration::seconds(i64::try_from(response.expires_in).unwrap_or(i64::MAX));
		let expires_at = issued_at.saturating_add(lifetime.saturating_sub(Self::EXPIRY_MARGIN));

		Some(Self {
			access_token: response.access_token,
			token_type: response.token_type,
			scope: response.scope,
			issued_at,
			expires_at,
			generation,
		})
	}

	/// Returns `true` while `instant` is strictly before the expiry.
	pub fn is_valid_at(&self, instant: OffsetDateTime) -> bool {
		instant < self.expires_at
	}

	/// Expiry expressed as Unix epoch milliseconds.
	pub fn expires_at_epoch_millis(&self) -> i128 {
		self.expires_at.unix_timestamp_nanos() / 1_000_000
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("access_token", &"<redacted>")
			.field("token_type", &self.token_type)
			.field("scope", &self.scope)
			.field("issued_at", &self.issued_at)
			.field("expires_at", &self.expires_at)
			.field("generation", &self.generation)
			.finish()
	}
}
