// std
use std::sync::Arc;
// crates.io
use httpmock::prelude::*;
use serde_json::json;
use time::{Duration, OffsetDateTime};
// self
use getsmarter_api_clients::{
	auth::CachedToken,
	cache::{CacheKey, MemoryCache, TokenCache},
	credentials::Credentials,
	error::Error,
	gateway::{AllocationRequest, EnterpriseAllocationRequest, GatewayClient, OrderItem},
};

const TOKEN_BODY: &str = "{\"access_token\":\"abcd\",\"expires_in\":3600}";

fn build_client(server: &MockServer) -> (GatewayClient, MemoryCache) {
	let credentials =
		Credentials::new("client-id", "client-secret", server.base_url(), server.base_url())
			.expect("Mock server credentials should be valid.");
	let cache = MemoryCache::default();
	let client = GatewayClient::new(credentials).with_token_cache(Arc::new(cache.clone()));

	(client, cache)
}

async fn mock_token(server: &MockServer) -> httpmock::Mock<'_> {
	server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(200).header("content-type", "application/json").body(TOKEN_BODY);
		})
		.await
}

fn allocation() -> AllocationRequest {
	AllocationRequest::builder("GS-1")
		.address_line1("10 Lovely Street")
		.city("Herndon")
		.postal_code("35005")
		.country("country")
		.country_code("country_code")
		.first_name("John")
		.last_name("Smith")
		.email("johnsmith@example.com")
		.date_of_birth("2000-01-01")
		.terms_accepted_at("2022-07-25T10:29:56Z")
		.currency("USD")
		.order_item(OrderItem::new("product_id", 1_u32, 1000_u64, 500_u64, 500_u64))
		.build()
		.expect("Allocation fixture should build.")
}

fn enterprise_allocation() -> EnterpriseAllocationRequest {
	EnterpriseAllocationRequest::builder("GS-12304", "69C3E666-4740-4531-9435-A3EDF6D28C01")
		.first_name("Jan")
		.last_name("Pan")
		.email("janpan@gs.com")
		.date_of_birth("2021-05-12")
		.terms_accepted_at("2021-05-21T17:32:28Z")
		.data_share_consent(true)
		.currency("ZAR")
		.org_id("12KJ2j9js0")
		.order_item(OrderItem::new("product_id", 1_u32, 1000_u64, 500_u64, 500_u64))
		.build()
		.expect("Enterprise allocation fixture should build.")
}

#[tokio::test]
async fn terms_are_fetched_with_a_bearer_token() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let token = mock_token(&server).await;
	let terms = server
		.mock_async(|when, then| {
			when.method(GET).path("/terms").header("authorization", "Bearer abcd");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"privacyPolicy\":\"abcd\",\"websiteTermsOfUse\":\"efgh\"}");
		})
		.await;
	let document = client.get_terms_and_policies().await.expect("Terms request should succeed.");

	token.assert_calls_async(1).await;
	terms.assert_async().await;

	assert_eq!(document.privacy_policy.as_deref(), Some("abcd"));
	assert_eq!(document.website_terms_of_use.as_deref(), Some("efgh"));
}

#[tokio::test]
async fn cached_token_is_reused_across_calls() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let token = mock_token(&server).await;
	let terms = server
		.mock_async(|when, then| {
			when.method(GET).path("/terms");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;

	client.get_terms_and_policies().await.expect("First terms request should succeed.");
	client.get_terms_and_policies().await.expect("Second terms request should succeed.");

	token.assert_calls_async(1).await;
	terms.assert_calls_async(2).await;
}

#[tokio::test]
async fn terms_rejection_raises_gateway_error() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let terms = server
		.mock_async(|when, then| {
			when.method(GET).path("/terms");
			then.status(500).body("boom");
		})
		.await;
	let err = client.get_terms_and_policies().await.expect_err("A 500 should be raised.");

	terms.assert_async().await;

	assert!(matches!(
		err,
		Error::Gateway { operation: "get_terms_and_policies", status: 500, ref body } if body == "boom"
	));
}

#[tokio::test]
async fn token_failure_prevents_the_gateway_call() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let token = server
		.mock_async(|when, then| {
			when.method(POST).path("/oauth2/token");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":\"invalid_client\"}");
		})
		.await;
	let terms = server
		.mock_async(|when, then| {
			when.method(GET).path("/terms");
			then.status(200).header("content-type", "application/json").body("{}");
		})
		.await;
	let err = client.get_terms_and_policies().await.expect_err("Token failure should propagate.");

	token.assert_async().await;
	terms.assert_calls_async(0).await;

	assert!(matches!(err, Error::TokenEndpoint { status: Some(401), .. }));
}

#[tokio::test]
async fn create_allocation_posts_the_exact_payload() {
	let server = MockServer::start_async().await;
	let (client, cache) = build_client(&server);
	let token = mock_token(&server).await;

	cache
		.set(
			&CacheKey::default(),
			CachedToken::new("cached", OffsetDateTime::now_utc() + Duration::seconds(60)),
		)
		.await
		.expect("Seeding the cache should succeed.");

	let allocation_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/allocations")
				.header("authorization", "Bearer cached")
				.json_body(json!({
					"paymentReference": "GS-1",
					"addressLine1": "10 Lovely Street",
					"city": "Herndon",
					"postalCode": "35005",
					"country": "country",
					"countryCode": "country_code",
					"firstName": "John",
					"lastName": "Smith",
					"email": "johnsmith@example.com",
					"dateOfBirth": "2000-01-01",
					"termsAcceptedAt": "2022-07-25T10:29:56Z",
					"currency": "USD",
					"orderItems": [{
						"productId": "product_id",
						"quantity": 1,
						"normalPrice": 1000,
						"discount": 500,
						"finalPrice": 500
					}]
				}));
			then.status(204);
		})
		.await;
	let response = client.create_allocation(&allocation()).await.expect("204 should succeed.");

	allocation_mock.assert_async().await;
	token.assert_calls_async(0).await;

	assert_eq!(response.status_code(), 204);
	assert!(response.bytes().is_empty());
}

#[tokio::test]
async fn create_allocation_forwards_optional_fields() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let request = AllocationRequest {
		address_line2: Some("Unit 4".into()),
		state: Some("Alabama".into()),
		state_code: Some("AL".into()),
		mobile_phone: Some("+12015551234".into()),
		work_experience: Some("None".into()),
		education_highest_level: Some("Honours degree".into()),
		..allocation()
	};
	let allocation_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/allocations").json_body(json!({
				"paymentReference": "GS-1",
				"addressLine1": "10 Lovely Street",
				"addressLine2": "Unit 4",
				"city": "Herndon",
				"postalCode": "35005",
				"state": "Alabama",
				"stateCode": "AL",
				"country": "country",
				"countryCode": "country_code",
				"firstName": "John",
				"lastName": "Smith",
				"email": "johnsmith@example.com",
				"dateOfBirth": "2000-01-01",
				"mobilePhone": "+12015551234",
				"workExperience": "None",
				"educationHighestLevel": "Honours degree",
				"termsAcceptedAt": "2022-07-25T10:29:56Z",
				"currency": "USD",
				"orderItems": [{
					"productId": "product_id",
					"quantity": 1,
					"normalPrice": 1000,
					"discount": 500,
					"finalPrice": 500
				}]
			}));
			then.status(201);
		})
		.await;

	client.create_allocation(&request).await.expect("Allocation with optionals should succeed.");

	allocation_mock.assert_async().await;
}

#[tokio::test]
async fn create_allocation_forwards_order_items_untouched() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let item: OrderItem = serde_json::from_value(json!({
		"productId": "product_id",
		"productVariantId": "v1",
		"quantity": 1.0,
		"normalPrice": 999.5,
		"discount": 0,
		"finalPrice": 999.5
	}))
	.expect("Order item should deserialize.");
	let request = AllocationRequest {
		order_items: vec![
			item,
			OrderItem::new("addon", 2_u32, 10_u64, 0_u64, 10_u64).with_field("seatType", "team"),
		],
		..allocation()
	};
	let allocation_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/allocations").json_body(json!({
				"paymentReference": "GS-1",
				"addressLine1": "10 Lovely Street",
				"city": "Herndon",
				"postalCode": "35005",
				"country": "country",
				"countryCode": "country_code",
				"firstName": "John",
				"lastName": "Smith",
				"email": "johnsmith@example.com",
				"dateOfBirth": "2000-01-01",
				"termsAcceptedAt": "2022-07-25T10:29:56Z",
				"currency": "USD",
				"orderItems": [
					{
						"productId": "product_id",
						"productVariantId": "v1",
						"quantity": 1.0,
						"normalPrice": 999.5,
						"discount": 0,
						"finalPrice": 999.5
					},
					{
						"productId": "addon",
						"quantity": 2,
						"normalPrice": 10,
						"discount": 0,
						"finalPrice": 10,
						"seatType": "team"
					}
				]
			}));
			then.status(204);
		})
		.await;

	client.create_allocation(&request).await.expect("Allocation should succeed.");

	allocation_mock.assert_async().await;
}

#[tokio::test]
async fn create_allocation_rejection_raises_with_body() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let allocation_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/allocations");
			then.status(400)
				.header("content-type", "application/json")
				.body("{\"email\":[\"Invalid email\"]}");
		})
		.await;
	let err = client.create_allocation(&allocation()).await.expect_err("A 400 should be raised.");

	allocation_mock.assert_async().await;

	assert_eq!(err.status(), Some(400));
	assert!(matches!(
		err,
		Error::Gateway { operation: "create_allocation", ref body, .. } if body.contains("Invalid email")
	));
}

#[tokio::test]
async fn enterprise_allocation_checked_and_unchecked_variants() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let enterprise_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/enterprise_allocations")
				.header("authorization", "Bearer abcd")
				.json_body(json!({
					"paymentReference": "GS-12304",
					"enterpriseCustomerUuid": "69C3E666-4740-4531-9435-A3EDF6D28C01",
					"firstName": "Jan",
					"lastName": "Pan",
					"email": "janpan@gs.com",
					"dateOfBirth": "2021-05-12",
					"termsAcceptedAt": "2021-05-21T17:32:28Z",
					"dataShareConsent": true,
					"currency": "ZAR",
					"orgId": "12KJ2j9js0",
					"orderItems": [{
						"productId": "product_id",
						"quantity": 1,
						"normalPrice": 1000,
						"discount": 500,
						"finalPrice": 500
					}]
				}));
			then.status(400).body("{\"orgId\":[\"Unknown organization\"]}");
		})
		.await;
	let request = enterprise_allocation();
	let response = client
		.create_enterprise_allocation_unchecked(&request)
		.await
		.expect("Unchecked variant should hand back the rejection.");

	assert_eq!(response.status_code(), 400);
	assert!(!response.is_success());
	assert!(response.text().contains("Unknown organization"));

	let err = client
		.create_enterprise_allocation(&request)
		.await
		.expect_err("Checked variant should raise the rejection.");

	enterprise_mock.assert_calls_async(2).await;

	assert!(matches!(
		err,
		Error::Gateway { operation: "create_enterprise_allocation", status: 400, .. }
	));
}

#[tokio::test]
async fn cancel_enterprise_allocation_sends_order_uuid() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let cancel_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/enterprise_allocations/cancel")
				.header("authorization", "Bearer abcd")
				.json_body(json!({"orderUuid": "abc-123"}));
			then.status(204);
		})
		.await;
	let response = client
		.cancel_enterprise_allocation("abc-123")
		.await
		.expect("Cancellation should succeed.");

	cancel_mock.assert_async().await;

	assert_eq!(response.status_code(), 204);
}

#[tokio::test]
async fn cancel_enterprise_allocation_rejections() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let cancel_mock = server
		.mock_async(|when, then| {
			when.method(POST).path("/enterprise_allocations/cancel");
			then.status(404).body("not found");
		})
		.await;
	let response = client
		.cancel_enterprise_allocation_unchecked("abc-123")
		.await
		.expect("Unchecked cancellation should hand back the rejection.");

	assert_eq!(response.status_code(), 404);

	let err = client
		.cancel_enterprise_allocation("abc-123")
		.await
		.expect_err("Checked cancellation should raise the rejection.");

	cancel_mock.assert_calls_async(2).await;

	assert!(matches!(
		err,
		Error::Gateway { operation: "cancel_enterprise_allocation", status: 404, .. }
	));
}

#[tokio::test]
async fn generic_helpers_authenticate_arbitrary_paths() {
	let server = MockServer::start_async().await;
	let (client, _cache) = build_client(&server);
	let _token = mock_token(&server).await;
	let get_mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/status").header("authorization", "Bearer abcd");
			then.status(503).body("maintenance");
		})
		.await;
	let post_mock = server
		.mock_async(|when, then| {
			when.method(POST)
				.path("/echo")
				.header("authorization", "Bearer abcd")
				.json_body(json!({"ping": true}));
			then.status(200).header("content-type", "application/json").body("{\"pong\":true}");
		})
		.await;
	let status = client.get("/status").await.expect("Generic GET should return any status.");
	let echo = client
		.post_json("/echo", &json!({"ping": true}))
		.await
		.expect("Generic POST should succeed.");

	get_mock.assert_async().await;
	post_mock.assert_async().await;

	assert_eq!(status.status_code(), 503);
	assert_eq!(
		echo.json::<serde_json::Value>().expect("Echo body should decode."),
		json!({"pong": true})
	);
}
