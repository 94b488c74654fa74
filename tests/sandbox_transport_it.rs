// std
use std::{
	io::{Error as IoError, ErrorKind},
	sync::{Arc, Mutex},
};
// crates.io
use serde_json::Value;
// self
use hotmart_client::{
	client::{HotmartClient, RequestOptions},
	config::{ClientConfig, Environment},
	error::{Error, TransportError},
	http::{HttpRequest, HttpResponse, HttpTransport, Method, TransportFuture},
};

/// Answers token exchanges with a fixed token and records every request.
#[derive(Default)]
struct RecordingTransport {
	requests: Mutex<Vec<HttpRequest>>,
}
impl RecordingTransport {
	fn recorded(&self) -> Vec<HttpRequest> {
		self.requests.lock().expect("Recording lock should not be poisoned.").clone()
	}
}
impl HttpTransport for RecordingTransport {
	fn execute(&self, request: HttpRequest) -> TransportFuture<'_> {
		let is_token = request.url.path() == "/security/oauth/token";

		self.requests.lock().expect("Recording lock should not be poisoned.").push(request);

		Box::pin(async move {
			let body = if is_token {
				r#"{"access_token":"sandbox-token","token_type":"bearer","expires_in":3600,"scope":"read","jti":"j"}"#
			} else {
				r#"{"items":[],"page_info":{"results_per_page":0}}"#
			};

			Ok(HttpResponse::new(200, body))
		})
	}
}

/// Fails every request before a response arrives.
struct RefusingTransport;
impl HttpTransport for RefusingTransport {
	fn execute(&self, _request: HttpRequest) -> TransportFuture<'_> {
		Box::pin(async {
			let source = IoError::new(ErrorKind::ConnectionRefused, "connection refused");

			Err(TransportError::network(source))
		})
	}
}

#[tokio::test]
async fn sandbox_first_get_exchanges_then_calls_sandbox_host() {
	let transport = Arc::new(RecordingTransport::default());
	let config = ClientConfig::new("sandbox-id", "sandbox-secret").sandbox(true);
	let client = HotmartClient::<RecordingTransport>::with_transport(config, transport.clone())
		.expect("Sandbox client should build.");

	assert_eq!(client.environment(), Environment::Sandbox);

	let _: Value = client
		.get("/club/api/v1/users", RequestOptions::new().query("subdomain", "club"))
		.await
		.expect("Sandbox GET should succeed.");
	let recorded = transport.recorded();

	assert_eq!(recorded.len(), 2);

	let exchange = &recorded[0];

	assert_eq!(exchange.method, Method::Post);
	assert_eq!(
		exchange.url.as_str(),
		"https://sandbox.hotmart.com/security/oauth/token?grant_type=client_credentials&client_id=sandbox-id&client_secret=sandbox-secret",
	);
	assert!(exchange.body.is_none());
	assert_eq!(
		exchange.header("authorization"),
		Some("Basic c2FuZGJveC1pZDpzYW5kYm94LXNlY3JldA=="),
	);

	let call = &recorded[1];

	assert_eq!(call.method, Method::Get);
	assert_eq!(call.url.as_str(), "https://sandbox.hotmart.com/club/api/v1/users?subdomain=club");
	assert_eq!(call.header("Authorization"), Some("Bearer sandbox-token"));
	assert_eq!(call.header("content-type"), Some("application/json"));
	assert_eq!(call.timeout, ClientConfig::DEFAULT_TIMEOUT);
}

#[tokio::test]
async fn production_uses_production_hosts() {
	let transport = Arc::new(RecordingTransport::default());
	let client = HotmartClient::<RecordingTransport>::with_transport(
		ClientConfig::new("id", "secret"),
		transport.clone(),
	)
	.expect("Production client should build.");
	let _: Value = client
		.get("/payments/api/v1/subscriptions", RequestOptions::default())
		.await
		.expect("GET should succeed.");
	let recorded = transport.recorded();

	assert_eq!(recorded[0].url.host_str(), Some("api-sec-vlc.hotmart.com"));
	assert_eq!(
		recorded[1].url.as_str(),
		"https://developers.hotmart.com/payments/api/v1/subscriptions",
	);
}

#[tokio::test]
async fn connection_failure_surfaces_underlying_message() {
	let client = HotmartClient::<RefusingTransport>::with_transport(
		ClientConfig::new("id", "secret"),
		RefusingTransport,
	)
	.expect("Client should build.");
	let err = client
		.get::<Value>("/ping", RequestOptions::default())
		.await
		.expect_err("Refused connection should fail the call.");

	assert!(matches!(err, Error::Authentication { .. }));
	assert!(err.to_string().contains("connection refused"), "Unexpected message `{err}`.");
	assert_eq!(err.status(), None);
	assert_eq!(client.metrics().requests(), 0);
}

#[test]
fn empty_credentials_are_rejected() {
	let err = HotmartClient::<RefusingTransport>::with_transport(
		ClientConfig::new("", "secret"),
		RefusingTransport,
	)
	.expect_err("Empty client id should be rejected.");

	assert!(matches!(err, Error::Config(_)));
}
