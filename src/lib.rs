//! Async client for the GetSmarter Enterprise API Gateway.
//!
//! Access tokens come from the OAuth2 client-credentials grant and are cached until they
//! expire. Allocation payloads are typed, built through builders, and logged with learner
//! details redacted.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod cache;
pub mod credentials;
pub mod error;
pub mod gateway;
pub mod http;
pub mod manager;
pub mod oauth;
pub mod obs;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		cache::{MemoryCache, TokenCache},
		credentials::Credentials,
		gateway::GatewayClient,
		manager::TokenManager,
	};

	/// Client identifier used by test fixtures.
	pub const TEST_CLIENT_ID: &str = "client-id";
	/// Client secret used by test fixtures.
	pub const TEST_CLIENT_SECRET: &str = "client-secret";

	/// Builds credentials whose provider and gateway both point at `base_url`.
	pub fn test_credentials(base_url: &str) -> Credentials {
		Credentials::new(TEST_CLIENT_ID, TEST_CLIENT_SECRET, base_url, base_url)
			.expect("Failed to build test credentials.")
	}

	/// Constructs a [`TokenManager`] backed by a private [`MemoryCache`] so tests never observe
	/// the process-wide cache.
	pub fn build_test_token_manager(base_url: &str) -> (TokenManager, Arc<MemoryCache>) {
		let cache_backend = Arc::new(MemoryCache::default());
		let cache: Arc<dyn TokenCache> = cache_backend.clone();
		let manager = TokenManager::new(test_credentials(base_url)).with_cache(cache);

		(manager, cache_backend)
	}

	/// Constructs a [`GatewayClient`] backed by a private [`MemoryCache`].
	pub fn build_test_gateway_client(base_url: &str) -> (GatewayClient, Arc<MemoryCache>) {
		let cache_backend = Arc::new(MemoryCache::default());
		let cache: Arc<dyn TokenCache> = cache_backend.clone();
		let client = GatewayClient::new(test_credentials(base_url)).with_token_cache(cache);

		(client, cache_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use serde_json::{Map as JsonMap, Value as JsonValue};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use {color_eyre as _, httpmock as _, tokio as _, tracing_subscriber as _};
