//! Access-token lifecycle: cache lookup, expiry detection, and client-credentials renewal.
//!
//! [`TokenManager::access_token`] returns the cached token while it is still valid and only
//! contacts the token endpoint when the cache is empty or the token has expired. Concurrent
//! callers are not coordinated; two tasks that miss at the same time both request a token and
//! the last one to finish wins the cache slot.

// self
use crate::{
	_prelude::*,
	auth::{CachedToken, TokenSecret},
	cache::{CacheKey, MemoryCache, TokenCache},
	credentials::Credentials,
	http::ReqwestHttpClient,
	oauth::ClientCredentialsExchange,
	obs::{self, CallKind, CallOutcome, CallSpan},
};

/// Owns acquisition and caching of the gateway access token.
#[derive(Clone)]
pub struct TokenManager {
	credentials: Credentials,
	http_client: ReqwestHttpClient,
	cache: Arc<dyn TokenCache>,
	cache_key: CacheKey,
	expiry_margin: Duration,
}
impl TokenManager {
	/// Creates a manager backed by the process-wide [`MemoryCache`] and a default reqwest client.
	pub fn new(credentials: Credentials) -> Self {
		Self {
			credentials,
			http_client: ReqwestHttpClient::default(),
			cache: Arc::new(MemoryCache::process_wide()),
			cache_key: CacheKey::default(),
			expiry_margin: Duration::ZERO,
		}
	}

	/// Replaces the HTTP client used for token exchanges.
	pub fn with_http_client(mut self, http_client: ReqwestHttpClient) -> Self {
		self.http_client = http_client;

		self
	}

	/// Replaces the token cache.
	pub fn with_cache(mut self, cache: Arc<dyn TokenCache>) -> Self {
		self.cache = cache;

		self
	}

	/// Overrides the key the token is cached under.
	pub fn with_cache_key(mut self, key: CacheKey) -> Self {
		self.cache_key = key;

		self
	}

	/// Treats cached tokens as expired `margin` before their real expiry (defaults to zero).
	pub fn with_expiry_margin(mut self, margin: Duration) -> Self {
		self.expiry_margin = if margin.is_negative() { Duration::ZERO } else { margin };

		self
	}

	/// Credentials used for the client-credentials grant.
	pub fn credentials(&self) -> &Credentials {
		&self.credentials
	}

	/// Key the token is cached under.
	pub fn cache_key(&self) -> &CacheKey {
		&self.cache_key
	}

	/// Safety margin applied to expiry checks.
	pub fn expiry_margin(&self) -> Duration {
		self.expiry_margin
	}

	/// Returns the cached token, valid or not, without contacting the provider.
	pub async fn cached_token(&self) -> Result<Option<CachedToken>> {
		Ok(self.cache.get(&self.cache_key).await?)
	}

	/// Returns a valid access token, requesting a new one when the cached token is missing or
	/// expired.
	pub async fn access_token(&self) -> Result<TokenSecret> {
		let now = OffsetDateTime::now_utc();

		if let Some(current) = self
			.cached_token()
			.await?
			.filter(|token| !token.expires_within(now, self.expiry_margin))
		{
			obs::log_token_cache(self.cache_key.as_str(), true);

			return Ok(current.access_token);
		}

		obs::log_token_cache(self.cache_key.as_str(), false);

		Ok(self.refresh_access_token().await?.access_token)
	}

	/// Requests a new token regardless of the cache and stores it under the cache key.
	pub async fn refresh_access_token(&self) -> Result<CachedToken> {
		const KIND: CallKind = CallKind::TokenExchange;

		let span = CallSpan::new(KIND, "refresh_access_token");

		obs::record_call_outcome(KIND, CallOutcome::Attempt);

		let result = span
			.instrument(async move {
				let exchange =
					ClientCredentialsExchange::new(&self.credentials, self.http_client.clone())?;
				let token = exchange.exchange().await?;

				self.cache.set(&self.cache_key, token.clone()).await?;

				Ok(token)
			})
			.await;

		match &result {
			Ok(_) => obs::record_call_outcome(KIND, CallOutcome::Success),
			Err(_) => obs::record_call_outcome(KIND, CallOutcome::Failure),
		}

		result
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("credentials", &self.credentials)
			.field("cache_key", &self.cache_key)
			.field("expiry_margin", &self.expiry_margin)
			.finish()
	}
}
