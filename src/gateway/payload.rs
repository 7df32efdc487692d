//! JSON payload assembly and log redaction.

// crates.io
use serde::ser::Error as _;
// self
use crate::{_prelude::*, error::ConfigError};

/// Fields of an allocation payload that are safe to log.
pub const ALLOCATION_LOG_FIELDS: &[&str] = &["paymentReference", "orderItems"];
/// Fields of an enterprise allocation payload that are safe to log.
pub const ENTERPRISE_ALLOCATION_LOG_FIELDS: &[&str] =
	&["paymentReference", "enterpriseCustomerUuid", "orgId", "orderItems"];

/// Serializes a request into the JSON object sent to the gateway.
///
/// Request types skip unset optional fields, so absent values never reach the payload.
pub fn to_payload<T>(request: &T) -> Result<JsonMap<String, JsonValue>>
where
	T: ?Sized + Serialize,
{
	match serde_json::to_value(request).map_err(ConfigError::PayloadEncode)? {
		JsonValue::Object(map) => Ok(map),
		other => Err(ConfigError::PayloadEncode(serde_json::Error::custom(format!(
			"payload must be a JSON object, got {other}"
		)))
		.into()),
	}
}

/// Restricts `payload` to `fields`; names missing from the payload map to `null`.
pub fn payload_for_logging(
	payload: &JsonMap<String, JsonValue>,
	fields: &[&str],
) -> JsonMap<String, JsonValue> {
	fields
		.iter()
		.map(|field| ((*field).to_owned(), payload.get(*field).cloned().unwrap_or(JsonValue::Null)))
		.collect()
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	fn payload() -> JsonMap<String, JsonValue> {
		match json!({
			"paymentReference": "GS-1",
			"firstName": "John",
			"email": "johnsmith@example.com",
			"orderItems": [{"productId": "p", "quantity": 1}]
		}) {
			JsonValue::Object(map) => map,
			_ => unreachable!(),
		}
	}

	#[test]
	fn logging_view_keeps_only_requested_fields() {
		let view = payload_for_logging(&payload(), ALLOCATION_LOG_FIELDS);

		assert_eq!(
			JsonValue::Object(view),
			json!({
				"paymentReference": "GS-1",
				"orderItems": [{"productId": "p", "quantity": 1}]
			})
		);
	}

	#[test]
	fn logging_view_maps_missing_fields_to_null() {
		let view = payload_for_logging(&payload(), ENTERPRISE_ALLOCATION_LOG_FIELDS);

		assert_eq!(view.get("enterpriseCustomerUuid"), Some(&JsonValue::Null));
		assert_eq!(view.get("orgId"), Some(&JsonValue::Null));
		assert!(!view.contains_key("email"));
		assert!(payload_for_logging(&payload(), &[]).is_empty());
	}

	#[test]
	fn non_object_payloads_are_rejected() {
		let err = to_payload(&["not", "an", "object"]).expect_err("Arrays are not payloads.");

		assert!(matches!(err, Error::Config(ConfigError::PayloadEncode(_))));
	}
}
