//! Cached access-token record and its expiry rules.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Access token as stored in a [`TokenCache`](crate::cache::TokenCache).
///
/// Only the token manager writes these records. A record is expired once the clock reaches
/// `expires_at`; there is no built-in grace period unless the manager is configured with an
/// expiry margin.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedToken {
	/// Bearer token value; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Instant after which the token must not be used.
	pub expires_at: OffsetDateTime,
}
impl CachedToken {
	/// Creates a record from an absolute expiry instant.
	pub fn new(access_token: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { access_token: TokenSecret::new(access_token), expires_at }
	}

	/// Creates a record that expires `expires_in` after `issued_at`.
	pub fn issued_at(
		access_token: impl Into<String>,
		issued_at: OffsetDateTime,
		expires_in: Duration,
	) -> Self {
		Self::new(access_token, issued_at + expires_in)
	}

	/// Returns `true` if the record is unusable at `instant`.
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant >= self.expires_at
	}

	/// Returns `true` if the record is expired relative to the current clock.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}

	/// Returns `true` if the record expires within `margin` of `instant`.
	///
	/// A zero margin is equivalent to [`is_expired_at`](Self::is_expired_at).
	pub fn expires_within(&self, instant: OffsetDateTime, margin: Duration) -> bool {
		self.is_expired_at(instant + margin)
	}
}
impl Debug for CachedToken {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CachedToken")
			.field("access_token", &"<redacted>")
			.field("expires_at", &self.expires_at)
			.finish()
	}
}
