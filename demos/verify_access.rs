//! Demonstrates checking whether an email has club or subscription access, against a local mock
//! of the Hotmart token endpoint and API.
//!
//! Point [`ClientConfig::with_base_url`] and [`ClientConfig::with_auth_url`] at the real hosts (or
//! use [`ClientConfig::from_env`]) to run the same calls against Hotmart.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
use serde_json::json;
// self
use hotmart_client::{
	client::ReqwestHotmartClient, config::ClientConfig, http::ReqwestTransport,
	reqwest::Client, sdk::ReqwestHotmart, url::Url,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/security/oauth/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":3600}",
			);
		})
		.await;
	let students_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/club/api/v1/users").query_param("subdomain", "demo-club");
			then.status(200).json_body(json!({
				"items": [{
					"user_id": "u-42",
					"name": "Demo Student",
					"email": "student@example.com",
					"role": "STUDENT",
					"status": "ACTIVE",
					"type": "BUYER",
				}],
				"page_info": { "results_per_page": 10 },
			}));
		})
		.await;
	let subscriptions_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/payments/api/v1/subscriptions");
			then.status(200).json_body(json!({
				"items": [],
				"page_info": { "results_per_page": 10 },
			}));
		})
		.await;
	let config = ClientConfig::new("demo-client", "demo-secret")
		.with_base_url(Url::parse(&server.base_url())?)
		.with_auth_url(Url::parse(&server.url("/security/oauth/token"))?);
	let transport = ReqwestTransport::with_client(
		Client::builder()
			.danger_accept_invalid_certs(true)
			.danger_accept_invalid_hostnames(true)
			.build()?,
	);
	let client = ReqwestHotmartClient::with_transport(config, transport)?;
	let hotmart = ReqwestHotmart::from_client(Arc::new(client));
	let summary = hotmart.access_summary("demo-club", "student@example.com").await?;

	println!(
		"{} has access: {} (via {}).",
		summary.email, summary.has_access, summary.access_type
	);

	token_mock.assert_async().await;
	students_mock.assert_async().await;
	subscriptions_mock.assert_async().await;

	Ok(())
}
