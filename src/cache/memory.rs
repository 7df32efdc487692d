//! Thread-safe in-memory [`TokenCache`] implementation.

// std
use std::sync::OnceLock;
// self
use crate::{
	_prelude::*,
	auth::CachedToken,
	cache::{CacheError, CacheFuture, CacheKey, TokenCache},
};

type CacheMap = Arc<RwLock<HashMap<CacheKey, CachedToken>>>;

static PROCESS_WIDE: OnceLock<MemoryCache> = OnceLock::new();

/// Thread-safe cache backend that keeps tokens in-process.
///
/// Clones share the same underlying map.
#[derive(Clone, Debug, Default)]
pub struct MemoryCache(CacheMap);
impl MemoryCache {
	/// Returns the cache shared by every client in this process that was not given its own.
	pub fn process_wide() -> Self {
		PROCESS_WIDE.get_or_init(Self::default).clone()
	}

	/// Number of cached entries.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns `true` if nothing is cached.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}

	/// Drops every cached entry.
	pub fn clear(&self) {
		self.0.write().clear();
	}

	fn get_now(map: CacheMap, key: &CacheKey) -> Option<CachedToken> {
		map.read().get(key).cloned()
	}

	fn set_now(map: CacheMap, key: &CacheKey, value: CachedToken) -> Result<(), CacheError> {
		map.write().insert(key.to_owned(), value);

		Ok(())
	}
}
impl TokenCache for MemoryCache {
	fn get<'a>(&'a self, key: &'a CacheKey) -> CacheFuture<'a, Option<CachedToken>> {
		let map = self.0.clone();

		Box::pin(async move { Ok(Self::get_now(map, key)) })
	}

	fn set<'a>(&'a self, key: &'a CacheKey, value: CachedToken) -> CacheFuture<'a, ()> {
		let map = self.0.clone();

		Box::pin(async move { Self::set_now(map, key, value) })
	}
}
