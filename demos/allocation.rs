//! Demonstrates reading the terms and creating an enterprise allocation against a mock gateway,
//! reusing one cached access token for both calls.

// std
use std::sync::Arc;
// crates.io
use color_eyre::Result;
use httpmock::prelude::*;
// self
use getsmarter_api_clients::{
	cache::MemoryCache,
	credentials::Credentials,
	gateway::{EnterpriseAllocationRequest, GatewayClient, OrderItem},
	http::ReqwestHttpClient,
	reqwest::Client,
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let server = MockServer::start_async().await;
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(
				"{\"access_token\":\"demo-access\",\"token_type\":\"bearer\",\"expires_in\":900}",
			);
		})
		.await;
	let terms_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/terms");
			then.status(200).header("content-type", "application/json").body(
				"{\"privacyPolicy\":\"...\",\"websiteTermsOfUse\":\"...\",\"cookiePolicy\":\"...\"}",
			);
		})
		.await;
	let allocation_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/enterprise_allocations");
			then.status(204);
		})
		.await;
	let credentials =
		Credentials::new("demo-client", "super-secret", server.base_url(), server.base_url())?;
	let http_client = ReqwestHttpClient::with_client(Client::builder().build()?);
	let client = GatewayClient::new(credentials)
		.with_http_client(http_client)
		.with_token_cache(Arc::new(MemoryCache::default()));
	let terms = client.get_terms_and_policies().await?;

	println!("Privacy policy present: {}.", terms.privacy_policy.is_some());

	let enterprise_customer_uuid = "69C3E666-4740-4531-9435-A3EDF6D28C01";
	let request = EnterpriseAllocationRequest::builder("GS-12304", enterprise_customer_uuid)
		.first_name("Jan")
		.last_name("Pan")
		.email("janpan@gs.com")
		.date_of_birth("2021-05-12")
		.terms_accepted_at("2021-05-21T17:32:28Z")
		.data_share_consent(true)
		.currency("ZAR")
		.org_id("12KJ2j9js0")
		.order_item(OrderItem::new("product_id", 1_u32, 1000_u64, 500_u64, 500_u64))
		.build()?;
	let response = client.create_enterprise_allocation(&request).await?;

	println!("Enterprise allocation accepted with HTTP {}.", response.status_code());

	token_mock.assert_calls_async(1).await;
	terms_mock.assert_async().await;
	allocation_mock.assert_async().await;

	Ok(())
}
