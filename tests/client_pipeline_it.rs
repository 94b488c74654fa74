mod common;

// std
use std::time::Duration;
// crates.io
use futures::future;
use httpmock::prelude::*;
use serde_json::{Value, json};
// self
use common::*;
use hotmart_client::{
	auth::TokenPhase,
	client::{PendingRequest, RequestOptions, ReqwestHotmartClient},
	config::ClientConfig,
	error::{Error, TransportError},
	http::Method,
	url::Url,
};

#[tokio::test]
async fn first_call_authenticates_once_and_sends_bearer() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST)
				.path(AUTH_PATH)
				.query_param("grant_type", "client_credentials")
				.query_param("client_id", CLIENT_ID)
				.query_param("client_secret", CLIENT_SECRET)
				.header("authorization", BASIC_AUTH)
				.header("content-type", "application/json");
			then.status(200).header("content-type", "application/json").json_body(json!({
				"access_token": "tok-1",
				"token_type": "bearer",
				"expires_in": 3600,
			}));
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/club/api/v1/users")
				.query_param("subdomain", "club")
				.header("authorization", "Bearer tok-1")
				.header("content-type", "application/json");
			then.status(200).json_body(json!({ "items": [], "page_info": { "results_per_page": 0 } }));
		})
		.await;
	let client = build_client(&server);
	let body: Value = client
		.get("/club/api/v1/users", RequestOptions::new().query("subdomain", "club"))
		.await
		.expect("Authenticated GET should succeed.");

	assert_eq!(body["items"], json!([]));
	assert_eq!(client.token_phase(), TokenPhase::Valid);

	let cached = client.cached_token().expect("Token should be cached after the first call.");

	assert_eq!(cached.access_token.expose(), "tok-1");
	assert_eq!(cached.expires_at - cached.issued_at, time::Duration::minutes(59));

	token.assert_calls_async(1).await;
	api.assert_calls_async(1).await;
}

#[tokio::test]
async fn valid_token_is_reused() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-reuse", 3600).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping").header("authorization", "Bearer tok-reuse");
			then.status(200).json_body(json!({ "ok": true }));
		})
		.await;
	let client = build_client(&server);

	for _ in 0..3 {
		let _: Value =
			client.get("/ping", RequestOptions::default()).await.expect("GET should succeed.");
	}

	token.assert_calls_async(1).await;
	api.assert_calls_async(3).await;
	assert_eq!(client.metrics().authentications(), 1);
	assert_eq!(client.metrics().requests(), 3);
}

#[tokio::test]
async fn concurrent_calls_share_one_exchange() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200)
				.header("content-type", "application/json")
				.json_body(json!({ "access_token": "tok-shared", "expires_in": 3600 }))
				.delay(Duration::from_millis(200));
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping").header("authorization", "Bearer tok-shared");
			then.status(200).json_body(json!({}));
		})
		.await;
	let client = build_client(&server);
	let calls = (0..5).map(|_| client.get::<Value>("/ping", RequestOptions::default()));
	let results = future::join_all(calls).await;

	assert!(results.iter().all(Result::is_ok));

	token.assert_calls_async(1).await;
	api.assert_calls_async(5).await;
}

#[tokio::test]
async fn token_inside_margin_reauthenticates_every_call() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-short", 60).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping");
			then.status(200).json_body(json!({}));
		})
		.await;
	let client = build_client(&server);

	for _ in 0..2 {
		let _: Value =
			client.get("/ping", RequestOptions::default()).await.expect("GET should succeed.");
	}

	token.assert_calls_async(2).await;
	api.assert_calls_async(2).await;
}

#[tokio::test]
async fn unauthorized_response_invalidates_without_retry() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "tok-401", 3600).await;
	let rejected = server
		.mock_async(|when, then| {
			when.method(GET).path("/rejected");
			then.status(401).json_body(json!({
				"error": "invalid_token",
				"error_description": "Token expired",
			}));
		})
		.await;
	let accepted = server
		.mock_async(|when, then| {
			when.method(GET).path("/accepted");
			then.status(200).json_body(json!({ "ok": true }));
		})
		.await;
	let client = build_client(&server);
	let err = client
		.get::<Value>("/rejected", RequestOptions::default())
		.await
		.expect_err("401 should surface to the caller.");

	assert!(err.is_unauthorized());
	assert!(err.to_string().contains("Token expired"));
	assert_eq!(client.token_phase(), TokenPhase::Stale);

	rejected.assert_calls_async(1).await;
	token.assert_calls_async(1).await;

	let _: Value = client
		.get("/accepted", RequestOptions::default())
		.await
		.expect("Next call should re-authenticate and succeed.");

	token.assert_calls_async(2).await;
	accepted.assert_calls_async(1).await;
	assert_eq!(client.metrics().invalidations(), 1);
}

#[tokio::test]
async fn authentication_failure_carries_upstream_description() {
	let server = MockServer::start_async().await;
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(400).json_body(json!({
				"error": "invalid_client",
				"error_description": "Client not found",
			}));
		})
		.await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping");
			then.status(200).json_body(json!({}));
		})
		.await;
	let client = build_client(&server);
	let err = client
		.get::<Value>("/ping", RequestOptions::default())
		.await
		.expect_err("Failed exchange should fail the call.");

	assert!(matches!(err, Error::Authentication { .. }));
	assert!(err.to_string().contains("Client not found"), "Unexpected message `{err}`.");
	assert!(!err.is_unauthorized());
	assert_eq!(client.token_phase(), TokenPhase::Absent);
	assert_eq!(client.metrics().authentication_failures(), 1);

	token.assert_calls_async(1).await;
	api.assert_calls_async(0).await;
}

#[tokio::test]
async fn empty_access_token_is_not_cached() {
	let server = MockServer::start_async().await;
	let token = mock_token(&server, "", 3600).await;
	let client = build_client(&server);
	let err = client
		.get::<Value>("/ping", RequestOptions::default())
		.await
		.expect_err("Empty token should fail the call.");

	assert!(err.to_string().contains("empty access token"), "Unexpected message `{err}`.");
	assert_eq!(client.token_phase(), TokenPhase::Absent);

	token.assert_calls_async(1).await;
}

#[tokio::test]
async fn unstructured_failure_reports_status() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "tok-503", 3600).await;
	let _api = server
		.mock_async(|when, then| {
			when.method(GET).path("/down");
			then.status(503).body("upstream unavailable");
		})
		.await;
	let client = build_client(&server);
	let err = client
		.get::<Value>("/down", RequestOptions::default())
		.await
		.expect_err("503 should fail the call.");

	assert!(matches!(err, Error::Transport(TransportError::Status { status: 503, .. })));
	assert_eq!(err.to_string(), "Request failed with status code 503.");
	assert_eq!(client.token_phase(), TokenPhase::Valid);
}

#[tokio::test]
async fn verbs_send_json_bodies_and_accept_empty_responses() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "tok-verbs", 3600).await;
	let post = server
		.mock_async(|when, then| {
			when.method(POST).path("/items").json_body(json!({ "name": "a" }));
			then.status(201).json_body(json!({ "id": 1 }));
		})
		.await;
	let put = server
		.mock_async(|when, then| {
			when.method(PUT).path("/items/1").json_body(json!({ "name": "b" }));
			then.status(200).json_body(json!({ "id": 1 }));
		})
		.await;
	let patch = server
		.mock_async(|when, then| {
			when.method(PATCH).path("/items/1").json_body(json!({ "due_day": 5 }));
			then.status(204);
		})
		.await;
	let delete = server
		.mock_async(|when, then| {
			when.method(DELETE).path("/items/1").header("x-trace", "abc");
			then.status(200);
		})
		.await;
	let client = build_client(&server);
	let created: Value = client
		.post("/items", &json!({ "name": "a" }), RequestOptions::default())
		.await
		.expect("POST should succeed.");
	let replaced: Value = client
		.put("/items/1", &json!({ "name": "b" }), RequestOptions::default())
		.await
		.expect("PUT should succeed.");

	client
		.patch::<_, ()>("/items/1", &json!({ "due_day": 5 }), RequestOptions::default())
		.await
		.expect("PATCH with an empty body should succeed.");
	client
		.delete::<()>("/items/1", RequestOptions::new().header("X-Trace", "abc"))
		.await
		.expect("DELETE should succeed.");

	assert_eq!(created["id"], 1);
	assert_eq!(replaced["id"], 1);

	post.assert_async().await;
	put.assert_async().await;
	patch.assert_async().await;
	delete.assert_async().await;
}

#[tokio::test]
async fn bearer_header_overrides_caller_authorization() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "tok-header", 3600).await;
	let api = server
		.mock_async(|when, then| {
			when.method(GET).path("/ping").header("authorization", "Bearer tok-header");
			then.status(200).json_body(json!({}));
		})
		.await;
	let client = build_client(&server);
	let request = PendingRequest::new(Method::Get, "/ping")
		.with_options(RequestOptions::new().header("Authorization", "Bearer spoofed"));
	let _: Value = client.send(request).await.expect("GET should succeed.");

	api.assert_async().await;
}

#[tokio::test]
async fn decode_mismatch_is_reported() {
	let server = MockServer::start_async().await;
	let _token = mock_token(&server, "tok-decode", 3600).await;
	let _api = server
		.mock_async(|when, then| {
			when.method(GET).path("/numbers");
			then.status(200).json_body(json!(["one"]));
		})
		.await;
	let client = build_client(&server);
	let err = client
		.get::<Vec<u32>>("/numbers", RequestOptions::default())
		.await
		.expect_err("Mismatched body should fail to decode.");

	assert!(matches!(err, Error::Decode { status: 200, .. }));
}

#[tokio::test]
async fn refused_connection_reports_cause_without_leaking_secret() {
	let base = Url::parse("http://127.0.0.1:1").expect("Closed-port URL should parse.");
	let auth = base.join(AUTH_PATH).expect("Token endpoint URL should build.");
	let config = ClientConfig::new(CLIENT_ID, CLIENT_SECRET).with_base_url(base).with_auth_url(auth);
	let client = ReqwestHotmartClient::with_transport(config, test_transport())
		.expect("Client should build.");
	let err = client
		.get::<Value>("/ping", RequestOptions::default())
		.await
		.expect_err("Closed port should refuse the exchange.");
	let message = err.to_string();

	assert!(matches!(err, Error::Authentication { .. }));
	assert!(message.starts_with("Authentication failed: Request failed: "), "{message}");
	assert!(message.to_ascii_lowercase().contains("refused"), "{message}");
	assert!(!message.contains(CLIENT_SECRET), "{message}");
	assert!(!message.contains("client_secret"), "{message}");
}
