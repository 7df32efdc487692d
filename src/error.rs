//! Client-level error types shared by the token manager, caches, and gateway operations.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical client error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Token cache failure.
	#[error("{0}")]
	Cache(
		#[from]
		#[source]
		crate::cache::CacheError,
	),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),

	/// Token endpoint answered with a non-success status or an OAuth error document.
	#[error("Token endpoint rejected the request{}: {body}.", fmt_status(.status))]
	TokenEndpoint {
		/// HTTP status code, when available.
		status: Option<u16>,
		/// Response body or OAuth error summary.
		body: String,
	},
	/// Gateway answered a raising operation with a non-success status.
	#[error("Gateway call `{operation}` failed with HTTP {status}: {body}.")]
	Gateway {
		/// Operation label (for example `create_allocation`).
		operation: &'static str,
		/// HTTP status code returned by the gateway.
		status: u16,
		/// Raw response body.
		body: String,
	},
	/// Response body could not be decoded as the expected JSON document.
	#[error("Response body could not be decoded.")]
	Decode {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl Error {
	/// Returns the HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::TokenEndpoint { status, .. } | Self::Decode { status, .. } => *status,
			Self::Gateway { status, .. } => Some(*status),
			_ => None,
		}
	}
}

/// Configuration and validation failures raised by the client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A configured URL cannot be parsed.
	#[error("The {field} URL is invalid.")]
	InvalidUrl {
		/// Which configuration value failed validation.
		field: &'static str,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// A configured URL uses a scheme other than HTTP(S).
	#[error("The {field} URL must use http or https: {url}.")]
	UnsupportedScheme {
		/// Which configuration value failed validation.
		field: &'static str,
		/// URL that failed validation.
		url: String,
	},
	/// Request builder validation failed.
	#[error("Unable to build gateway request.")]
	RequestBuild(#[from] crate::gateway::RequestBuilderError),
	/// Request payload could not be encoded as JSON.
	#[error("Request payload could not be encoded.")]
	PayloadEncode(#[source] serde_json::Error),
	/// Token endpoint response omitted `expires_in`.
	#[error("Token endpoint response is missing expires_in.")]
	MissingExpiresIn,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
	/// Token endpoint returned a non-positive duration.
	#[error("The expires_in value must be positive.")]
	NonPositiveExpiresIn,
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling {target}.")]
	Network {
		/// Which remote endpoint was being called.
		target: &'static str,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the token endpoint.")]
	Io(#[from] std::io::Error),
	/// HTTP client reported a failure without a structured error.
	#[error("HTTP client error occurred while calling the token endpoint: {message}.")]
	Other {
		/// Message reported by the HTTP client.
		message: String,
	},
}
impl TransportError {
	/// Wraps a network error raised while calling the token endpoint.
	pub fn token_endpoint(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { target: "the token endpoint", source: Box::new(src) }
	}

	/// Wraps a network error raised while calling the gateway.
	pub fn gateway(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { target: "the gateway", source: Box::new(src) }
	}
}

fn fmt_status(status: &Option<u16>) -> String {
	status.map(|code| format!(" with HTTP {code}")).unwrap_or_default()
}
