//! Order line items attached to allocation requests.

// crates.io
use serde_json::Number;
// self
use crate::_prelude::*;

/// One purchased product inside an allocation.
///
/// The gateway owns the shape of order items, so nothing here is validated. Numbers are
/// forwarded untouched (integers stay integers on the wire) and keys this type does not name are
/// kept in `other`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
	/// Gateway product (variant) identifier.
	pub product_id: String,
	/// Number of seats purchased.
	pub quantity: Number,
	/// List price.
	pub normal_price: Number,
	/// Discount applied to the list price.
	pub discount: Number,
	/// Price actually charged.
	pub final_price: Number,
	/// Any further keys, forwarded as given.
	#[serde(flatten)]
	pub other: JsonMap<String, JsonValue>,
}
impl OrderItem {
	/// Creates a line item from any integer-like quantity and prices.
	pub fn new(
		product_id: impl Into<String>,
		quantity: impl Into<Number>,
		normal_price: impl Into<Number>,
		discount: impl Into<Number>,
		final_price: impl Into<Number>,
	) -> Self {
		Self {
			product_id: product_id.into(),
			quantity: quantity.into(),
			normal_price: normal_price.into(),
			discount: discount.into(),
			final_price: final_price.into(),
			other: JsonMap::new(),
		}
	}

	/// Adds a key the gateway accepts but this type does not name.
	pub fn with_field(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
		self.other.insert(key.into(), value.into());

		self
	}
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn serializes_with_camel_case_keys_and_integer_prices() {
		let item =
			OrderItem::new("87c24e19-b82c-4acd-ab90-714af629f11a", 1_u32, 1000_u64, 1000_u64, 0_u64);

		assert_eq!(
			serde_json::to_value(&item).expect("Order item should serialize."),
			json!({
				"productId": "87c24e19-b82c-4acd-ab90-714af629f11a",
				"quantity": 1,
				"normalPrice": 1000,
				"discount": 1000,
				"finalPrice": 0
			})
		);
	}

	#[test]
	fn fractional_prices_pass_through() {
		let item: OrderItem = serde_json::from_value(json!({
			"productId": "product_id",
			"quantity": 2,
			"normalPrice": 999.5,
			"discount": 0,
			"finalPrice": 999.5
		}))
		.expect("Order item with fractional prices should deserialize.");

		assert_eq!(item.normal_price.as_f64(), Some(999.5));
		assert_eq!(item.discount.as_u64(), Some(0));
	}

	#[test]
	fn unknown_keys_and_float_quantities_round_trip() {
		let raw = json!({
			"productId": "p",
			"quantity": 1.0,
			"normalPrice": 1000,
			"discount": 0,
			"finalPrice": 1000,
			"productVariantId": "v1"
		});
		let item: OrderItem =
			serde_json::from_value(raw.clone()).expect("Order item with extra keys should deserialize.");

		assert_eq!(item.other.get("productVariantId"), Some(&json!("v1")));
		assert_eq!(item.quantity.as_f64(), Some(1.0));
		assert_eq!(serde_json::to_value(&item).expect("Order item should serialize."), raw);
	}

	#[test]
	fn extra_fields_can_be_added_when_building() {
		let item = OrderItem::new("p", 1_u32, 10_u64, 0_u64, 10_u64).with_field("seatType", "team");

		assert_eq!(
			serde_json::to_value(&item).expect("Order item should serialize."),
			json!({
				"productId": "p",
				"quantity": 1,
				"normalPrice": 10,
				"discount": 0,
				"finalPrice": 10,
				"seatType": "team"
			})
		);
	}
}
