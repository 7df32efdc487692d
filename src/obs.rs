//! Observability helpers for token exchanges and gateway calls.
//!
//! # Feature Flags
//!
//! - `tracing` (default) emits spans named `getsmarter_api_clients.call` with the `call` and
//!   `stage` fields, plus the attempt/rejection events every gateway operation logs.
//! - `metrics` increments the `getsmarter_api_clients_call_total` counter for every
//!   attempt/success/failure, labeled by `call` + `outcome`.

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Remote calls observed by the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallKind {
	/// Client-credentials exchange against the token endpoint.
	TokenExchange,
	/// `GET /terms`.
	TermsAndPolicies,
	/// `POST /allocations`.
	CreateAllocation,
	/// `POST /enterprise_allocations`.
	CreateEnterpriseAllocation,
	/// `POST /enterprise_allocations/cancel`.
	CancelEnterpriseAllocation,
	/// Caller-issued authenticated request.
	Custom,
}
impl CallKind {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallKind::TokenExchange => "token_exchange",
			CallKind::TermsAndPolicies => "get_terms_and_policies",
			CallKind::CreateAllocation => "create_allocation",
			CallKind::CreateEnterpriseAllocation => "create_enterprise_allocation",
			CallKind::CancelEnterpriseAllocation => "cancel_enterprise_allocation",
			CallKind::Custom => "custom",
		}
	}
}
impl Display for CallKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CallOutcome {
	/// Entry to a client operation.
	Attempt,
	/// Successful completion.
	Success,
	/// Failure, whether propagated or handed back as a response.
	Failure,
}
impl CallOutcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CallOutcome::Attempt => "attempt",
			CallOutcome::Success => "success",
			CallOutcome::Failure => "failure",
		}
	}
}
impl Display for CallOutcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
