//! Enterprise allocation requests sent to `POST /enterprise_allocations` and its cancel route.

// self
use crate::{
	_prelude::*,
	gateway::{OrderItem, RequestBuilderError, required},
};

/// Allocation scoped to an enterprise customer.
///
/// Compared with [`AllocationRequest`](crate::gateway::AllocationRequest) the address is
/// optional, and consent plus enterprise identifiers are added. Optional fields left as `None`
/// are omitted from the payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseAllocationRequest {
	/// Reference used by the enterprise partner when paying GetSmarter.
	pub payment_reference: String,
	/// Enterprise customer the order was placed for.
	pub enterprise_customer_uuid: String,
	/// Learner first name.
	pub first_name: String,
	/// Learner last name.
	pub last_name: String,
	/// Learner email.
	pub email: String,
	/// Learner date of birth.
	pub date_of_birth: String,
	/// ISO 8601 timestamp of when the terms and policies were accepted.
	pub terms_accepted_at: String,
	/// Learner consent for data sharing.
	pub data_share_consent: bool,
	/// Currency code, forwarded as given.
	pub currency: String,
	/// Items ordered.
	pub order_items: Vec<OrderItem>,
	/// First address line.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address_line1: Option<String>,
	/// Second address line.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address_line2: Option<String>,
	/// City.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub city: Option<String>,
	/// Postal code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub postal_code: Option<String>,
	/// State.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// State code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state_code: Option<String>,
	/// Country name.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country: Option<String>,
	/// Country code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub country_code: Option<String>,
	/// Mobile phone number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mobile_phone: Option<String>,
	/// Work experience bracket.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub work_experience: Option<String>,
	/// Highest education level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub education_highest_level: Option<String>,
	/// `auth_org_id` from the learner's enterprise customer record.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub org_id: Option<String>,
}
impl EnterpriseAllocationRequest {
	/// Returns a builder seeded with the payment reference and enterprise customer.
	pub fn builder(
		payment_reference: impl Into<String>,
		enterprise_customer_uuid: impl Into<String>,
	) -> EnterpriseAllocationRequestBuilder {
		EnterpriseAllocationRequestBuilder::new(
			payment_reference.into(),
			enterprise_customer_uuid.into(),
		)
	}
}
impl Debug for EnterpriseAllocationRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("EnterpriseAllocationRequest")
			.field("payment_reference", &self.payment_reference)
			.field("enterprise_customer_uuid", &self.enterprise_customer_uuid)
			.field("org_id", &self.org_id)
			.field("order_items", &self.order_items)
			.finish_non_exhaustive()
	}
}

/// Builder for [`EnterpriseAllocationRequest`].
#[derive(Clone, Debug, Default)]
pub struct EnterpriseAllocationRequestBuilder {
	payment_reference: String,
	enterprise_customer_uuid: String,
	first_name: Option<String>,
	last_name: Option<String>,
	email: Option<String>,
	date_of_birth: Option<String>,
	terms_accepted_at: Option<String>,
	data_share_consent: Option<bool>,
	currency: Option<String>,
	order_items: Option<Vec<OrderItem>>,
	address_line1: Option<String>,
	address_line2: Option<String>,
	city: Option<String>,
	postal_code: Option<String>,
	state: Option<String>,
	state_code: Option<String>,
	country: Option<String>,
	country_code: Option<String>,
	mobile_phone: Option<String>,
	work_experience: Option<String>,
	education_highest_level: Option<String>,
	org_id: Option<String>,
}
impl EnterpriseAllocationRequestBuilder {
	fn new(payment_reference: String, enterprise_customer_uuid: String) -> Self {
		Self { payment_reference, enterprise_customer_uuid, ..Default::default() }
	}

	string_setters! {
		/// Sets the learner first name.
		first_name,
		/// Sets the learner last name.
		last_name,
		/// Sets the learner email.
		email,
		/// Sets the learner date of birth.
		date_of_birth,
		/// Sets when the terms and policies were accepted.
		terms_accepted_at,
		/// Sets the currency code.
		currency,
		/// Sets the optional first address line.
		address_line1,
		/// Sets the optional second address line.
		address_line2,
		/// Sets the optional city.
		city,
		/// Sets the optional postal code.
		postal_code,
		/// Sets the optional state.
		state,
		/// Sets the optional state code.
		state_code,
		/// Sets the optional country name.
		country,
		/// Sets the optional country code.
		country_code,
		/// Sets the optional mobile phone number.
		mobile_phone,
		/// Sets the optional work experience bracket.
		work_experience,
		/// Sets the optional highest education level.
		education_highest_level,
		/// Sets the optional enterprise organization identifier.
		org_id,
	}

	/// Records whether the learner consented to data sharing.
	pub fn data_share_consent(mut self, consent: bool) -> Self {
		self.data_share_consent = Some(consent);

		self
	}

	/// Replaces the ordered items.
	pub fn order_items(mut self, items: impl IntoIterator<Item = OrderItem>) -> Self {
		self.order_items = Some(items.into_iter().collect());

		self
	}

	/// Appends one ordered item.
	pub fn order_item(mut self, item: OrderItem) -> Self {
		self.order_items.get_or_insert_with(Vec::new).push(item);

		self
	}

	/// Consumes the builder, failing on the first missing required field.
	pub fn build(self) -> Result<EnterpriseAllocationRequest, RequestBuilderError> {
		Ok(EnterpriseAllocationRequest {
			payment_reference: self.payment_reference,
			enterprise_customer_uuid: self.enterprise_customer_uuid,
			first_name: required(self.first_name, "firstName")?,
			last_name: required(self.last_name, "lastName")?,
			email: required(self.email, "email")?,
			date_of_birth: required(self.date_of_birth, "dateOfBirth")?,
			terms_accepted_at: required(self.terms_accepted_at, "termsAcceptedAt")?,
			data_share_consent: required(self.data_share_consent, "dataShareConsent")?,
			currency: required(self.currency, "currency")?,
			order_items: required(self.order_items, "orderItems")?,
			address_line1: self.address_line1,
			address_line2: self.address_line2,
			city: self.city,
			postal_code: self.postal_code,
			state: self.state,
			state_code: self.state_code,
			country: self.country,
			country_code: self.country_code,
			mobile_phone: self.mobile_phone,
			work_experience: self.work_experience,
			education_highest_level: self.education_highest_level,
			org_id: self.org_id,
		})
	}
}

/// Body of `POST /enterprise_allocations/cancel`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CancelEnterpriseAllocation {
	/// Order UUID of the allocation, in its string form.
	pub order_uuid: String,
}
impl CancelEnterpriseAllocation {
	/// Wraps any displayable order identifier (for example a UUID).
	pub fn new(order_uuid: impl Display) -> Self {
		Self { order_uuid: order_uuid.to_string() }
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;
	use crate::gateway::to_payload;

	fn minimal() -> EnterpriseAllocationRequestBuilder {
		EnterpriseAllocationRequest::builder("GS-12304", "69C3E666-4740-4531-9435-A3EDF6D28C01")
			.first_name("Jan")
			.last_name("Pan")
			.email("janpan@gs.com")
			.date_of_birth("2021-05-12")
			.terms_accepted_at("2021-05-21T17:32:28Z")
			.data_share_consent(true)
			.currency("ZAR")
			.order_item(OrderItem::new("product_id", 1_u32, 1000_u64, 500_u64, 500_u64))
	}

	#[test]
	fn payload_omits_unset_optionals() {
		let request = minimal().build().expect("Minimal enterprise allocation should build.");
		let payload = to_payload(&request).expect("Enterprise allocation should encode.");

		assert_eq!(
			JsonValue::Object(payload),
			json!({
				"paymentReference": "GS-12304",
				"enterpriseCustomerUuid": "69C3E666-4740-4531-9435-A3EDF6D28C01",
				"firstName": "Jan",
				"lastName": "Pan",
				"email": "janpan@gs.com",
				"dateOfBirth": "2021-05-12",
				"termsAcceptedAt": "2021-05-21T17:32:28Z",
				"dataShareConsent": true,
				"currency": "ZAR",
				"orderItems": [{
					"productId": "product_id",
					"quantity": 1,
					"normalPrice": 1000,
					"discount": 500,
					"finalPrice": 500
				}]
			})
		);
	}

	#[test]
	fn optional_address_and_org_fields_are_forwarded() {
		let request = minimal()
			.address_line1("Oak Glen")
			.city("Cape Town")
			.postal_code("7570")
			.country("South Africa")
			.country_code("ZA")
			.org_id("12KJ2j9js0")
			.build()
			.expect("Enterprise allocation with optionals should build.");
		let payload = to_payload(&request).expect("Enterprise allocation should encode.");

		assert_eq!(payload.get("addressLine1"), Some(&json!("Oak Glen")));
		assert_eq!(payload.get("city"), Some(&json!("Cape Town")));
		assert_eq!(payload.get("postalCode"), Some(&json!("7570")));
		assert_eq!(payload.get("country"), Some(&json!("South Africa")));
		assert_eq!(payload.get("countryCode"), Some(&json!("ZA")));
		assert_eq!(payload.get("orgId"), Some(&json!("12KJ2j9js0")));
		assert!(!payload.contains_key("addressLine2"));
		assert!(!payload.contains_key("stateCode"));
	}

	#[test]
	fn consent_is_required_even_when_false_is_intended() {
		let err = EnterpriseAllocationRequest::builder("GS-1", "uuid")
			.first_name("a")
			.last_name("b")
			.email("c")
			.date_of_birth("d")
			.terms_accepted_at("e")
			.currency("USD")
			.order_items([])
			.build()
			.expect_err("Consent must be set explicitly.");

		assert_eq!(err, RequestBuilderError::MissingField { field: "dataShareConsent" });

		let declined = minimal()
			.data_share_consent(false)
			.build()
			.expect("Declined consent is still a valid value.");
		let payload = to_payload(&declined).expect("Enterprise allocation should encode.");

		assert_eq!(payload.get("dataShareConsent"), Some(&json!(false)));
	}

	#[test]
	fn cancel_body_stringifies_order_uuid() {
		let body = CancelEnterpriseAllocation::new("abc-123");

		assert_eq!(
			serde_json::to_value(&body).expect("Cancel body should serialize."),
			json!({"orderUuid": "abc-123"})
		);
	}
}
