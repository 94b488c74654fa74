#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::{Mock, prelude::*};
use serde_json::json;
// self
use hotmart_client::{
	client::ReqwestHotmartClient, config::ClientConfig, http::ReqwestTransport,
	reqwest::Client as ReqwestClient, sdk::ReqwestHotmart, url::Url,
};

pub const AUTH_PATH: &str = "/security/oauth/token";
pub const CLIENT_ID: &str = "test-client";
pub const CLIENT_SECRET: &str = "test-secret";
/// `Basic base64("test-client:test-secret")`.
pub const BASIC_AUTH: &str = "Basic dGVzdC1jbGllbnQ6dGVzdC1zZWNyZXQ=";

pub fn test_config(server: &MockServer) -> ClientConfig {
	let base = Url::parse(&server.base_url()).expect("Mock server base URL should parse.");
	let auth = Url::parse(&server.url(AUTH_PATH)).expect("Mock token endpoint URL should parse.");

	ClientConfig::new(CLIENT_ID, CLIENT_SECRET).with_base_url(base).with_auth_url(auth)
}

pub fn test_transport() -> ReqwestTransport {
	let client = ReqwestClient::builder()
		.danger_accept_invalid_certs(true)
		.danger_accept_invalid_hostnames(true)
		.build()
		.expect("Failed to build insecure Reqwest client for tests.");

	ReqwestTransport::with_client(client)
}

pub fn build_client(server: &MockServer) -> Arc<ReqwestHotmartClient> {
	let client = ReqwestHotmartClient::with_transport(test_config(server), test_transport())
		.expect("Test client should build.");

	Arc::new(client)
}

pub fn build_sdk(server: &MockServer) -> ReqwestHotmart {
	ReqwestHotmart::from_client(build_client(server))
}

/// Registers a token endpoint answering every exchange with `token`.
pub async fn mock_token<'a>(server: &'a MockServer, token: &str, expires_in: u64) -> Mock<'a> {
	let body = json!({
		"access_token": token,
		"token_type": "bearer",
		"expires_in": expires_in,
		"scope": "read write",
		"jti": "jti-1",
	});

	server
		.mock_async(|when, then| {
			when.method(POST).path(AUTH_PATH);
			then.status(200).header("content-type", "application/json").json_body(body);
		})
		.await
}
