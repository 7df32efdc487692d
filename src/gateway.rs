//! Authenticated client for the GetSmarter Enterprise API Gateway.
//!
//! Every call asks the [`TokenManager`] for a valid token, sends it as a bearer credential,
//! and buffers the reply into a [`GatewayResponse`]. Allocation calls log a redacted view of
//! their payload before sending and log the full payload with the response body when the
//! gateway rejects them.
//!
//! Enterprise operations come in two flavors: the plain methods turn a non-2xx reply into
//! [`Error::Gateway`], while the `_unchecked` methods hand back the response for any status so
//! callers can inspect it themselves.

macro_rules! string_setters {
	($($(#[$doc:meta])* $field:ident),+ $(,)?) => {
		$(
			$(#[$doc])*
			pub fn $field(mut self, value: impl Into<String>) -> Self {
				self.$field = Some(value.into());

				self
			}
		)+
	};
}

pub mod allocation;
pub mod enterprise;
pub mod order;
pub mod payload;
pub mod terms;

pub use allocation::*;
pub use enterprise::*;
pub use order::*;
pub use payload::*;
pub use terms::*;

// crates.io
use reqwest::Method;
// self
use crate::{
	_prelude::*,
	cache::TokenCache,
	credentials::Credentials,
	error::{ConfigError, TransportError},
	http::{GatewayResponse, ReqwestHttpClient},
	manager::TokenManager,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Errors produced by the request builders.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum RequestBuilderError {
	/// A required field was never set.
	#[error("Required field `{field}` is missing.")]
	MissingField {
		/// Payload key of the missing field.
		field: &'static str,
	},
}

/// Client for the gateway's terms and allocation endpoints.
#[derive(Clone, Debug)]
pub struct GatewayClient {
	credentials: Credentials,
	http_client: ReqwestHttpClient,
	tokens: TokenManager,
}
impl GatewayClient {
	/// Creates a client whose token manager uses the process-wide token cache.
	pub fn new(credentials: Credentials) -> Self {
		let http_client = ReqwestHttpClient::default();
		let tokens = TokenManager::new(credentials.clone()).with_http_client(http_client.clone());

		Self { credentials, http_client, tokens }
	}

	/// Replaces the HTTP client for both gateway calls and token exchanges.
	pub fn with_http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.tokens = self.tokens.with_http_client(http_client.clone());
		self.http_client = http_client;

		self
	}

	/// Replaces the cache the token manager reads and writes.
	pub fn with_token_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
		self.tokens = self.tokens.with_cache(cache);

		self
	}

	/// Replaces the token manager entirely.
	pub fn with_token_manager(mut self, tokens: TokenManager) -> Self {
		self.tokens = tokens;

		self
	}

	/// Credentials this client was built with.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Token manager used to authenticate every call.
	pub fn token_manager(&self) -> &TokenManager {
		&self.tokens
	}

	/// Sends an authenticated `GET {api_url}{path}` and returns the response for any status.
	pub async fn get(&self, path: &str) -> Result<GatewayResponse> {
		self.dispatch(CallKind::Custom, path, Method::GET, path, None).await
	}

	/// Sends an authenticated JSON `POST {api_url}{path}` and returns the response for any
	/// status.
	pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<GatewayResponse>
	where
		B: ?Sized + Serialize,
	{
		let payload = to_payload(body)?;

		self.dispatch(CallKind::Custom, path, Method::POST, path, Some(&payload)).await
	}

	/// Fetches the terms and policies the learner must accept.
	pub async fn get_terms_and_policies(&self) -> Result<TermsAndPolicies> {
		const KIND: CallKind = CallKind::TermsAndPolicies;

		self.dispatch(KIND, "terms", Method::GET, "/terms", None)
			.await?
			.error_for_status(KIND.as_str())?
			.json()
	}

	/// Creates an allocation, failing with [`Error::Gateway`] on any non-2xx reply.
	///
	/// A `204 No Content` reply is a success.
	pub async fn create_allocation(&self, request: &AllocationRequest) -> Result<GatewayResponse> {
		const KIND: CallKind = CallKind::CreateAllocation;

		let payload = to_payload(request)?;

		obs::log_attempt(
			KIND,
			&request.payment_reference,
			&payload_for_logging(&payload, ALLOCATION_LOG_FIELDS),
		);

		self.dispatch(KIND, &request.payment_reference, Method::POST, "/allocations", Some(&payload))
			.await?
			.error_for_status(KIND.as_str())
	}

	/// Creates an enterprise allocation, failing with [`Error::Gateway`] on any non-2xx reply.
	pub async fn create_enterprise_allocation(
		&self,
		request: &EnterpriseAllocationRequest,
	) -> Result<GatewayResponse> {
		self.create_enterprise_allocation_unchecked(request)
			.await?
			.error_for_status(CallKind::CreateEnterpriseAllocation.as_str())
	}

	/// Creates an enterprise allocation and returns the response whatever its status.
	///
	/// Rejections are still logged. Token and transport failures remain errors.
	pub async fn create_enterprise_allocation_unchecked(
		&self,
		request: &EnterpriseAllocationRequest,
	) -> Result<GatewayResponse> {
		const KIND: CallKind = CallKind::CreateEnterpriseAllocation;

		let payload = to_payload(request)?;

		obs::log_attempt(
			KIND,
			&request.payment_reference,
			&payload_for_logging(&payload, ENTERPRISE_ALLOCATION_LOG_FIELDS),
		);

		self.dispatch(
			KIND,
			&request.payment_reference,
			Method::POST,
			"/enterprise_allocations",
			Some(&payload),
		)
		.await
	}

	/// Cancels an enterprise allocation, failing with [`Error::Gateway`] on any non-2xx reply.
	pub async fn cancel_enterprise_allocation(
		&self,
		order_uuid: impl Display,
	) -> Result<GatewayResponse> {
		self.cancel_enterprise_allocation_unchecked(order_uuid)
			.await?
			.error_for_status(CallKind::CancelEnterpriseAllocation.as_str())
	}

	/// Cancels an enterprise allocation and returns the response whatever its status.
	pub async fn cancel_enterprise_allocation_unchecked(
		&self,
		order_uuid: impl Display,
	) -> Result<GatewayResponse> {
		let body = CancelEnterpriseAllocation::new(order_uuid);
		let payload = to_payload(&body)?;

		self.dispatch(
			CallKind::CancelEnterpriseAllocation,
			&body.order_uuid,
			Method::POST,
			"/enterprise_allocations/cancel",
			Some(&payload),
		)
		.await
	}

	async fn dispatch(
		&self,
		kind: CallKind,
		reference: &str,
		method: Method,
		path: &str,
		payload: Option<&JsonMap<String, JsonValue>>,
	) -> Result<GatewayResponse> {
		let span = CallSpan::new(kind, "dispatch");

		obs::record_call_outcome(kind, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.tokens.access_token().await?;
				let mut request = self
					.http_client
					.request(method, self.credentials.api_endpoint(path))
					.bearer_auth(token.expose());

				if let Some(payload) = payload {
					request = request.json(payload);
				}

				let response = request.send().await.map_err(map_gateway_error)?;
				let response = GatewayResponse::read(response).await.map_err(map_gateway_error)?;

				if !response.is_success() {
					let empty = JsonMap::new();

					obs::log_rejection(
						kind,
						reference,
						response.status_code(),
						&response.text(),
						payload.unwrap_or(&empty),
					);
				}

				Ok(response)
			})
			.await;

		match &result {
			Ok(response) if response.is_success() =>
				obs::record_call_outcome(kind, CallOutcome::Success),
			_ => obs::record_call_outcome(kind, CallOutcome::Failure),
		}

		result
	}
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, RequestBuilderError> {
	value.ok_or(RequestBuilderError::MissingField { field })
}

fn map_gateway_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::gateway(err).into()
}
