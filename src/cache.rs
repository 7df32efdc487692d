//! Token cache contract and the built-in in-memory implementation.

pub mod memory;

pub use memory::MemoryCache;

// self
use crate::{_prelude::*, auth::CachedToken};

/// Boxed future returned by [`TokenCache`] operations.
pub type CacheFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, CacheError>> + 'a + Send>>;

/// Key-value storage for cached access tokens.
///
/// Implementations only need to make each read and write atomic per key. The token manager
/// does not coordinate concurrent refreshes, so two callers may both miss and both `set` the
/// same key; the last write wins.
pub trait TokenCache
where
	Self: Send + Sync,
{
	/// Fetches the token stored under `key`, if present.
	fn get<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, Option<CachedToken>>;

	/// Stores `value` under `key`, replacing any previous entry.
	fn set<'a>(&'a self, key: &'a CacheKey, value: CachedToken) -> CacheFuture<'a, ()>;
}

/// Error type produced by [`TokenCache`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum CacheError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the cache engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

/// Key under which an access token is cached.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CacheKey(String);
impl CacheKey {
	/// Fixed key shared by every client that does not override it.
	pub const DEFAULT: &'static str = "getsmarter_api_clients.oauth.access_token";

	/// Wraps an arbitrary key string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the key as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}
impl Default for CacheKey {
	fn default() -> Self {
		Self::new(Self::DEFAULT)
	}
}
impl AsRef<str> for CacheKey {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
impl Display for CacheKey {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(&self.0)
	}
}
