//! Terms and policies document served by `GET /terms`.

// self
use crate::_prelude::*;

/// Policy texts the learner must accept before an allocation.
///
/// Every known field is optional because the gateway may return a subset; unknown fields are
/// kept in `other`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TermsAndPolicies {
	/// Privacy policy text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub privacy_policy: Option<String>,
	/// Website terms of use text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub website_terms_of_use: Option<String>,
	/// Student terms and conditions text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub student_terms_and_conditions: Option<String>,
	/// Cookie policy text.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub cookie_policy: Option<String>,
	/// Any field this crate does not model.
	#[serde(flatten)]
	pub other: JsonMap<String, JsonValue>,
}
