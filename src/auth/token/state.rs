//! Lifecycle state of the cached bearer token.
//!
//! The client holds exactly one [`TokenState`]. It starts [`TokenState::Absent`], becomes
//! [`TokenState::Issued`] after a successful exchange, and turns stale either when the clock
//! passes the record's expiry or when a 401 moves it to [`TokenState::Invalidated`].

// self
use crate::{_prelude::*, auth::token::record::CachedToken};

/// Observable lifecycle phase of the cached token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenPhase {
	/// No token has been issued yet.
	Absent,
	/// A token is cached and not yet expired.
	Valid,
	/// The cached token expired or was invalidated; the next call re-authenticates.
	Stale,
}

/// Storage slot for the single cached token.
#[derive(Clone, Debug, Default)]
pub enum TokenState {
	/// Initial state.
	#[default]
	Absent,
	/// Token issued by the most recent exchange; may have expired since.
	Issued(CachedToken),
	/// Token discarded after an authentication rejection.
	Invalidated,
}
impl TokenState {
	/// Computes the lifecycle phase at a given instant.
	pub fn phase_at(&self, instant: OffsetDateTime) -> TokenPhase {
		match self {
			Self::Absent => TokenPhase::Absent,
			Self::Issued(token) if token.is_valid_at(instant) => TokenPhase::Valid,
			Self::Issued(_) | Self::Invalidated => TokenPhase::Stale,
		}
	}

	/// Returns the cached token if it is still valid at `instant`.
	pub fn valid_at(&self, instant: OffsetDateTime) -> Option<&CachedToken> {
		match self {
			Self::Issued(token) if token.is_valid_at(instant) => Some(token),
			_ => None,
		}
	}

	/// Replaces whatever is cached with a freshly issued token.
	pub fn store(&mut self, token: CachedToken) {
		*self = Self::Issued(token);
	}

	/// Discards the cached token if it is the one identified by `generation`.
	///
	/// Returns `true` when the cache was cleared. A rejection for an older token leaves a newer
	/// one untouched.
	pub fn invalidate(&mut self, generation: u64) -> bool {
		match self {
			Self::Issued(token) if token.generation == generation => {
				*self = Self::Invalidated;

				true
			},
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use time::macros::datetime;
	// self
	use super::*;
	use crate::auth::{AccessTokenResponse, TokenSecret};

	fn token(generation: u64) -> CachedToken {
		let response = AccessTokenResponse {
			access_token: TokenSecret::new(format!("token-{generation}")),
			token_type: Some("bearer".into()),
			expires_in: 3600,
			scope: None,
			jti: None,
		};

		CachedToken::from_response(response, datetime!(2025-01-01 00:00 UTC), generation)
			.expect("Token fixture should build.")
	}

	#[test]
	fn phases_follow_the_clock() {
		let mut state = TokenState::default();
		let now = datetime!(2025-01-01 00:10 UTC);

		assert_eq!(state.phase_at(now), TokenPhase::Absent);
		assert!(state.valid_at(now).is_none());

		state.store(token(1));

		assert_eq!(state.phase_at(now), TokenPhase::Valid);
		assert_eq!(state.phase_at(datetime!(2025-01-01 01:00 UTC)), TokenPhase::Stale);
		assert!(state.valid_at(datetime!(2025-01-01 01:00 UTC)).is_none());
	}

	#[test]
	fn invalidation_only_matches_the_rejected_generation() {
		let now = datetime!(2025-01-01 00:10 UTC);
		let mut state = TokenState::default();

		state.store(token(2));

		assert!(!state.invalidate(1));
		assert_eq!(state.phase_at(now), TokenPhase::Valid);
		assert!(state.invalidate(2));
		assert_eq!(state.phase_at(now), TokenPhase::Stale);
		assert!(!state.invalidate(2));
	}
}
