// self
use crate::{_prelude::*, obs::CallKind};

/// Type alias that resolves to an instrumented future when tracing is enabled.
#[cfg(feature = "tracing")]
pub type InstrumentedCall<F> = tracing::instrument::Instrumented<F>;
/// Passthrough future type when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub type InstrumentedCall<F> = F;

/// A span builder used by client operations.
#[derive(Clone, Debug)]
pub struct CallSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CallSpan {
	/// Creates a new span tagged with the provided call kind + stage.
	pub fn new(kind: CallKind, stage: &'static str) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::info_span!("getsmarter_api_clients.call", call = kind.as_str(), stage);

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = (kind, stage);

			Self {}
		}
	}

	/// Instruments an async block without holding a guard across `.await` points.
	pub fn instrument<Fut>(&self, fut: Fut) -> InstrumentedCall<Fut>
	where
		Fut: Future,
	{
		#[cfg(feature = "tracing")]
		{
			use tracing::Instrument;

			fut.instrument(self.span.clone())
		}
		#[cfg(not(feature = "tracing"))]
		{
			fut
		}
	}
}

/// Logs that an allocation-style request is about to be sent.
///
/// `payload` must already be restricted to non-sensitive fields.
pub fn log_attempt(kind: CallKind, reference: &str, payload: &JsonMap<String, JsonValue>) {
	#[cfg(feature = "tracing")]
	{
		let payload = JsonValue::Object(payload.clone());

		tracing::info!(
			call = kind.as_str(),
			reference,
			%payload,
			"[{kind}] Attempting allocation for order {reference}."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, reference, payload);
	}
}

/// Logs a gateway rejection together with the response body and the full request payload.
pub fn log_rejection(
	kind: CallKind,
	reference: &str,
	status: u16,
	body: &str,
	payload: &JsonMap<String, JsonValue>,
) {
	#[cfg(feature = "tracing")]
	{
		let payload = JsonValue::Object(payload.clone());

		tracing::error!(
			call = kind.as_str(),
			reference,
			status,
			reasons = body,
			%payload,
			"[{kind}] Gateway rejected the request for {reference}."
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (kind, reference, status, body, payload);
	}
}

/// Logs whether the token cache satisfied a lookup.
pub fn log_token_cache(key: &str, hit: bool) {
	#[cfg(feature = "tracing")]
	{
		if hit {
			tracing::debug!(key, "Using cached access token.");
		} else {
			tracing::debug!(key, "Cached access token missing or expired; requesting a new one.");
		}
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (key, hit);
	}
}
