//! Client-credentials exchange against the provider's token endpoint.

pub use oauth2;

// std
use std::time::Duration as StdDuration;
// crates.io
use oauth2::{
	AccessToken, AuthType, Client, ClientId, ClientSecret, EndpointNotSet, EndpointSet,
	HttpClientError, RefreshToken, RequestTokenError, Scope, StandardRevocableToken,
	TokenResponse, TokenUrl,
	basic::{
		BasicErrorResponse, BasicRequestTokenError, BasicRevocationErrorResponse,
		BasicTokenIntrospectionResponse, BasicTokenType,
	},
};
// self
use crate::{
	_prelude::*,
	auth::CachedToken,
	credentials::Credentials,
	error::{ConfigError, TransportError},
	http::{ReqwestHttpClient, ResponseMetadata, ResponseMetadataSlot},
};

type ProviderClient<HasTokenUrl = EndpointNotSet> = Client<
	BasicErrorResponse,
	ProviderTokenResponse,
	BasicTokenIntrospectionResponse,
	StandardRevocableToken,
	BasicRevocationErrorResponse,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	EndpointNotSet,
	HasTokenUrl,
>;

/// Token endpoint reply as the GetSmarter provider sends it.
///
/// Only `access_token` and `expires_in` are read. `token_type` is often omitted and falls back
/// to `bearer`; scopes are ignored.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub(crate) struct ProviderTokenResponse {
	access_token: AccessToken,
	#[serde(default = "bearer")]
	token_type: BasicTokenType,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	expires_in: Option<u64>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	refresh_token: Option<RefreshToken>,
	#[serde(skip)]
	scopes: Option<Vec<Scope>>,
}
impl TokenResponse for ProviderTokenResponse {
	type TokenType = BasicTokenType;

	fn access_token(&self) -> &AccessToken {
		&self.access_token
	}

	fn token_type(&self) -> &Self::TokenType {
		&self.token_type
	}

	fn expires_in(&self) -> Option<StdDuration> {
		self.expires_in.map(StdDuration::from_secs)
	}

	fn refresh_token(&self) -> Option<&RefreshToken> {
		self.refresh_token.as_ref()
	}

	fn scopes(&self) -> Option<&Vec<Scope>> {
		self.scopes.as_ref()
	}
}

fn bearer() -> BasicTokenType {
	BasicTokenType::Bearer
}

/// Performs the `client_credentials` grant for one set of credentials.
///
/// The client id and secret travel as form parameters in the request body.
#[derive(Clone)]
pub(crate) struct ClientCredentialsExchange {
	oauth_client: ProviderClient<EndpointSet>,
	http_client: ReqwestHttpClient,
}
impl ClientCredentialsExchange {
	pub(crate) fn new(credentials: &Credentials, http_client: ReqwestHttpClient) -> Result<Self> {
		let token_url = TokenUrl::new(credentials.token_endpoint())
			.map_err(|source| ConfigError::InvalidUrl { field: "provider", source })?;
		let oauth_client = <ProviderClient>::new(ClientId::new(credentials.client_id().to_owned()))
			.set_client_secret(ClientSecret::new(credentials.client_secret().expose().to_owned()))
			.set_token_uri(token_url)
			.set_auth_type(AuthType::RequestBody);

		Ok(Self { oauth_client, http_client })
	}

	/// Requests a new access token and stamps its expiry relative to the current clock.
	pub(crate) async fn exchange(&self) -> Result<CachedToken> {
		let meta = ResponseMetadataSlot::default();
		let instrumented = self.http_client.instrumented(meta.clone());
		let response = self
			.oauth_client
			.exchange_client_credentials()
			.request_async(&instrumented)
			.await
			.map_err(|err| map_request_error(meta.take(), err))?;

		map_token_response(response, OffsetDateTime::now_utc())
	}
}
impl Debug for ClientCredentialsExchange {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientCredentialsExchange")
			.field("token_url", &self.oauth_client.token_uri().as_str())
			.finish()
	}
}

fn map_token_response(
	response: ProviderTokenResponse,
	issued_at: OffsetDateTime,
) -> Result<CachedToken> {
	let expires_in = response.expires_in().ok_or(ConfigError::MissingExpiresIn)?.as_secs();
	let expires_in = i64::try_from(expires_in).map_err(|_| ConfigError::ExpiresInOutOfRange)?;

	if expires_in <= 0 {
		return Err(ConfigError::NonPositiveExpiresIn.into());
	}

	Ok(CachedToken::issued_at(
		response.access_token().secret().to_owned(),
		issued_at,
		Duration::seconds(expires_in),
	))
}

fn map_request_error(
	meta: Option<ResponseMetadata>,
	err: BasicRequestTokenError<HttpClientError<ReqwestError>>,
) -> Error {
	let status = meta.and_then(|value| value.status);

	match err {
		RequestTokenError::ServerResponse(response) => map_server_response_error(status, response),
		RequestTokenError::Request(error) => map_transport_error(error),
		// A rejected request whose body is not an OAuth error document still counts as a
		// token-endpoint failure; only a 2xx body that fails to parse is a decoding problem.
		RequestTokenError::Parse(source, body) => match status {
			Some(code) if !(200..300).contains(&code) => Error::TokenEndpoint {
				status,
				body: String::from_utf8_lossy(&body).into_owned(),
			},
			_ => Error::Decode { source, status },
		},
		RequestTokenError::Other(message) => Error::TokenEndpoint { status, body: message },
	}
}

fn map_server_response_error(status: Option<u16>, response: BasicErrorResponse) -> Error {
	let body = match response.error_description() {
		Some(description) => format!("{}: {description}", response.error().as_ref()),
		None => response.error().as_ref().to_owned(),
	};

	Error::TokenEndpoint { status, body }
}

fn map_transport_error(err: HttpClientError<ReqwestError>) -> Error {
	match err {
		HttpClientError::Reqwest(inner) => map_reqwest_error(*inner),
		HttpClientError::Http(inner) => ConfigError::from(inner).into(),
		HttpClientError::Io(inner) => TransportError::Io(inner).into(),
		HttpClientError::Other(message) => TransportError::Other { message }.into(),
		_ => TransportError::Other { message: "unknown HTTP client failure".into() }.into(),
	}
}

fn map_reqwest_error(err: ReqwestError) -> Error {
	if err.is_builder() {
		return ConfigError::from(err).into();
	}

	TransportError::token_endpoint(err).into()
}
