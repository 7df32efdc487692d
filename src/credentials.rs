//! Client credentials and gateway endpoints supplied at construction.
//!
//! [`Credentials`] is the only configuration the client needs. It deserializes from any serde
//! format, so applications can embed it in their own settings files, but this crate never reads
//! environment variables or files itself.

// self
use crate::{_prelude::*, auth::TokenSecret, error::ConfigError};

/// Path of the OAuth2 token endpoint relative to the provider URL.
pub const TOKEN_PATH: &str = "/oauth2/token";

/// Immutable credentials and base URLs for one gateway client.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawCredentials")]
pub struct Credentials {
	client_id: String,
	client_secret: TokenSecret,
	provider_url: Url,
	api_url: Url,
}
impl Credentials {
	/// Validates both base URLs and captures the client credentials.
	pub fn new(
		client_id: impl Into<String>,
		client_secret: impl Into<String>,
		provider_url: impl AsRef<str>,
		api_url: impl AsRef<str>,
	) -> Result<Self, ConfigError> {
		Ok(Self {
			client_id: client_id.into(),
			client_secret: TokenSecret::new(client_secret),
			provider_url: parse_base_url("provider", provider_url.as_ref())?,
			api_url: parse_base_url("api", api_url.as_ref())?,
		})
	}

	/// OAuth2 client identifier.
	pub fn client_id(&self) -> &str {
		&self.client_id
	}

	/// OAuth2 client secret.
	pub fn client_secret(&self) -> &TokenSecret {
		&self.client_secret
	}

	/// Base URL of the OAuth2 provider.
	pub fn provider_url(&self) -> &Url {
		&self.provider_url
	}

	/// Base URL of the gateway API.
	pub fn api_url(&self) -> &Url {
		&self.api_url
	}

	/// Full URL of the token endpoint (`{provider_url}/oauth2/token`).
	pub fn token_endpoint(&self) -> String {
		join(&self.provider_url, TOKEN_PATH)
	}

	/// Full URL of a gateway path (`{api_url}{path}`).
	pub fn api_endpoint(&self, path: &str) -> String {
		join(&self.api_url, path)
	}
}
impl Debug for Credentials {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Credentials")
			.field("client_id", &self.client_id)
			.field("client_secret", &self.client_secret)
			.field("provider_url", &self.provider_url.as_str())
			.field("api_url", &self.api_url.as_str())
			.finish()
	}
}
impl TryFrom<RawCredentials> for Credentials {
	type Error = ConfigError;

	fn try_from(raw: RawCredentials) -> Result<Self, Self::Error> {
		Self::new(raw.client_id, raw.client_secret, raw.provider_url, raw.api_url)
	}
}

#[derive(Deserialize)]
struct RawCredentials {
	client_id: String,
	client_secret: String,
	provider_url: String,
	api_url: String,
}

fn parse_base_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
	let url = Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { field, source })?;

	match url.scheme() {
		"http" | "https" => Ok(url),
		_ => Err(ConfigError::UnsupportedScheme { field, url: url.to_string() }),
	}
}

// `Url` always renders a bare host with a trailing slash; strip it so paths join cleanly.
fn join(base: &Url, path: &str) -> String {
	format!("{}{path}", base.as_str().trim_end_matches('/'))
}
