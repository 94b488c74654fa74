//! Token lifecycle: lazy acquisition, single-flight refresh, and 401 invalidation.

// std
use std::sync::atomic::Ordering;
// self
use crate::{
	_prelude::*,
	auth::{self, AccessTokenResponse, CachedToken, TokenPhase},
	client::{HotmartClient, request},
	http::{HttpRequest, HttpTransport, Method},
	obs::{self, CallStage},
};

impl<T> HotmartClient<T>
where
	T: ?Sized + HttpTransport,
{
	/// Current lifecycle phase of the cached token.
	pub fn token_phase(&self) -> TokenPhase {
		self.token.read().phase_at(OffsetDateTime::now_utc())
	}

	/// Returns a copy of the cached token while it is still valid.
	pub fn cached_token(&self) -> Option<CachedToken> {
		self.token.read().valid_at(OffsetDateTime::now_utc()).cloned()
	}

	/// Discards the cached token so the next call re-authenticates.
	pub fn clear_token(&self) {
		let mut state = self.token.write();

		if let auth::TokenState::Issued(token) = &*state {
			let generation = token.generation;

			state.invalidate(generation);
		}
	}

	/// Returns a valid token, running the client-credentials exchange when the cache is absent
	/// or stale.
	///
	/// Concurrent callers that observe a stale cache queue on the single-flight guard; whoever
	/// enters first performs the exchange and the rest reuse its result.
	pub(crate) async fn ensure_token(&self) -> Result<CachedToken> {
		let cached = self.cached_token();

		if let Some(token) = cached {
			return Ok(token);
		}

		let _singleflight = self.refresh_guard.lock().await;
		let cached = self.cached_token();

		if let Some(token) = cached {
			return Ok(token);
		}

		let token = self.authenticate().await?;

		self.token.write().store(token.clone());

		Ok(token)
	}

	/// Discards the cached token if it is still the one a 401 rejected.
	pub(crate) fn invalidate_rejected(&self, generation: u64, status: u16) {
		let cleared = self.token.write().invalidate(generation);

		if cleared {
			self.metrics.record_invalidation();
			obs::token_invalidated(generation, status);
		}
	}

	async fn authenticate(&self) -> Result<CachedToken> {
		self.metrics.record_authentication();

		let result = obs::observe_call(
			CallStage::Authenticate,
			Method::Post,
			self.exchange_client_credentials(),
		)
		.await;

		if result.is_err() {
			self.metrics.record_authentication_failure();
		}

		result.map_err(Error::authentication)
	}

	async fn exchange_client_credentials(&self) -> Result<CachedToken> {
		let mut url = self.endpoints.auth.clone();

		url.query_pairs_mut()
			.append_pair("grant_type", "client_credentials")
			.append_pair("client_id", &self.client_id)
			.append_pair("client_secret", self.client_secret.expose());

		let request = HttpRequest {
			method: Method::Post,
			url,
			headers: vec![
				(request::CONTENT_TYPE.into(), request::APPLICATION_JSON.into()),
				(
					request::AUTHORIZATION.into(),
					auth::basic_authorization(&self.client_id, &self.client_secret),
				),
			],
			body: None,
			timeout: self.timeout,
		};
		let response = self.transport.execute(request).await?;

		if !response.is_success() {
			return Err(request::classify_failure(response.status, &response.body));
		}

		let payload: AccessTokenResponse = request::decode(response.status, &response.body)?;
		let issued_at = OffsetDateTime::now_utc();
		let generation = self.generation.fetch_add(1, Ordering::Relaxed) + 1;

		CachedToken::from_response(payload, issued_at, generation).ok_or(Error::EmptyAccessToken)
	}
}
