//! Learner allocation request sent to `POST /allocations`.

// self
use crate::{
	_prelude::*,
	gateway::{OrderItem, RequestBuilderError, required},
};

/// Allocation (enrollment) of a learner who supplied a full postal address.
///
/// Optional fields left as `None` are omitted from the payload rather than sent as `null`.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationRequest {
	/// Reference used by the enterprise partner when paying GetSmarter.
	pub payment_reference: String,
	/// First address line.
	pub address_line1: String,
	/// City.
	pub city: String,
	/// Postal code.
	pub postal_code: String,
	/// Country name.
	pub country: String,
	/// Country code.
	pub country_code: String,
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
	/// Currency code, forwarded as given.
	pub currency: String,
	/// Items ordered.
	pub order_items: Vec<OrderItem>,
	/// Second address line.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub address_line2: Option<String>,
	/// State.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state: Option<String>,
	/// State code.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub state_code: Option<String>,
	/// Mobile phone number.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mobile_phone: Option<String>,
	/// Work experience bracket.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub work_experience: Option<String>,
	/// Highest education level.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub education_highest_level: Option<String>,
}
impl AllocationRequest {
	/// Returns a builder seeded with the payment reference.
	pub fn builder(payment_reference: impl Into<String>) -> AllocationRequestBuilder {
		AllocationRequestBuilder::new(payment_reference.into())
	}
}
impl Debug for AllocationRequest {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AllocationRequest")
			.field("payment_reference", &self.payment_reference)
			.field("order_items", &self.order_items)
			.finish_non_exhaustive()
	}
}

/// Builder for [`AllocationRequest`].
#[derive(Clone, Debug, Default)]
pub struct AllocationRequestBuilder {
	payment_reference: String,
	address_line1: Option<String>,
	city: Option<String>,
	postal_code: Option<String>,
	country: Option<String>,
	country_code: Option<String>,
	first_name: Option<String>,
	last_name: Option<String>,
	email: Option<String>,
	date_of_birth: Option<String>,
	terms_accepted_at: Option<String>,
	currency: Option<String>,
	order_items: Option<Vec<OrderItem>>,
	address_line2: Option<String>,
	state: Option<String>,
	state_code: Option<String>,
	mobile_phone: Option<String>,
	work_experience: Option<String>,
	education_highest_level: Option<String>,
}
impl AllocationRequestBuilder {
	fn new(payment_reference: String) -> Self {
		Self { payment_reference, ..Default::default() }
	}

	string_setters! {
		/// Sets the first address line.
		address_line1,
		/// Sets the city.
		city,
		/// Sets the postal code.
		postal_code,
		/// Sets the country name.
		country,
		/// Sets the country code.
		country_code,
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
		/// Sets the optional second address line.
		address_line2,
		/// Sets the optional state.
		state,
		/// Sets the optional state code.
		state_code,
		/// Sets the optional mobile phone number.
		mobile_phone,
		/// Sets the optional work experience bracket.
		work_experience,
		/// Sets the optional highest education level.
		education_highest_level,
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
	pub fn build(self) -> Result<AllocationRequest, RequestBuilderError> {
		Ok(AllocationRequest {
			payment_reference: self.payment_reference,
			address_line1: required(self.address_line1, "addressLine1")?,
			city: required(self.city, "city")?,
			postal_code: required(self.postal_code, "postalCode")?,
			country: required(self.country, "country")?,
			country_code: required(self.country_code, "countryCode")?,
			first_name: required(self.first_name, "firstName")?,
			last_name: required(self.last_name, "lastName")?,
			email: required(self.email, "email")?,
			date_of_birth: required(self.date_of_birth, "dateOfBirth")?,
			terms_accepted_at: required(self.terms_accepted_at, "termsAcceptedAt")?,
			currency: required(self.currency, "currency")?,
			order_items: required(self.order_items, "orderItems")?,
			address_line2: self.address_line2,
			state: self.state,
			state_code: self.state_code,
			mobile_phone: self.mobile_phone,
			work_experience: self.work_experience,
			education_highest_level: self.education_highest_level,
		})
	}
}
