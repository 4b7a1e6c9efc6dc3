//! Cart lifecycle on the client API: open, list bookable times, check out.

// crates.io
use serde_json::json;
// self
use crate::{
	_prelude::*,
	auth::{CartId, ClientToken, LocationId},
	booking::non_blank,
	gateway::{Gateway, GraphqlTransport},
	graphql,
	obs::{self, OperationKind},
};

/// Time zone applied to bookable-time searches when the caller names none.
pub const DEFAULT_TIME_ZONE: &str = "America/New_York";

/// Cart as exposed to the frontend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
	/// Cart identifier.
	pub id: CartId,
	/// Instant after which the cart is discarded upstream.
	#[serde(default)]
	pub expires_at: Option<String>,
	/// Bookable catalog grouped by category.
	#[serde(default)]
	pub available_categories: Vec<CartCategory>,
}

/// Category of bookable items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCategory {
	/// Category name.
	#[serde(default)]
	pub name: Option<String>,
	/// Items offered in the category.
	#[serde(default)]
	pub available_items: Vec<CartItem>,
}

/// Bookable item; pricing fields are only present for bookable services.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
	/// Item identifier.
	pub id: String,
	/// Item name.
	#[serde(default)]
	pub name: Option<String>,
	/// Item description.
	#[serde(default)]
	pub description: Option<String>,
	/// List price in minor currency units.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub list_price: Option<i64>,
	/// List duration in minutes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub list_duration: Option<i64>,
	/// Per-staff pricing variants.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub staff_variants: Vec<StaffVariant>,
}

/// Price and duration of an item when performed by a given staff member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffVariant {
	/// Variant identifier.
	pub id: String,
	/// Price in minor currency units.
	#[serde(default)]
	pub price: Option<i64>,
	/// Duration in minutes.
	#[serde(default)]
	pub duration: Option<i64>,
	/// Staff member.
	#[serde(default)]
	pub staff: Option<crate::booking::StaffSummary>,
}

/// Result of opening a cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCart {
	/// Identifier of the new cart.
	pub cart_id: CartId,
	/// Full cart.
	pub cart: Cart,
}

/// Bookable start time for a cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookableTime {
	/// Time identifier to reserve.
	pub id: String,
	/// Start instant.
	pub start_time: String,
}

/// Checked-out cart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedCart {
	/// Cart identifier.
	pub id: CartId,
	/// Checkout instant.
	#[serde(default)]
	pub completed_at: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCartData {
	create_cart: CartPayload<Cart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookableTimesData {
	cart_bookable_times: Vec<BookableTime>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutCartData {
	checkout_cart: CartPayload<CompletedCart>,
}

#[derive(Deserialize)]
struct CartPayload<C> {
	cart: C,
}

impl<T> Gateway<T>
where
	T: ?Sized + GraphqlTransport,
{
	/// Opens a cart at `location_id`; bare identifiers are promoted to location URNs.
	pub async fn create_cart(
		&self,
		location_id: &LocationId,
		token: Option<&ClientToken>,
	) -> Result<CreatedCart> {
		obs::observe(OperationKind::CreateCart, &graphql::CREATE_CART, async {
			let data: CreateCartData = self
				.client(&graphql::CREATE_CART, json!({ "locationId": location_id.to_urn() }), token)
				.await?;
			let cart = data.create_cart.cart;

			#[cfg(feature = "tracing")]
			tracing::info!(cart_id = %cart.id, "Cart created.");

			Ok(CreatedCart { cart_id: cart.id.clone(), cart })
		})
		.await
	}

	/// Lists bookable start times for `cart_id` on `search_date` (`YYYY-MM-DD`).
	pub async fn available_times(
		&self,
		cart_id: &CartId,
		search_date: &str,
		tz: Option<&str>,
		token: Option<&ClientToken>,
	) -> Result<Vec<BookableTime>> {
		obs::observe(OperationKind::AvailableTimes, &graphql::CART_BOOKABLE_TIMES, async {
			let search_date = non_blank(Some(search_date))
				.ok_or_else(|| Error::invalid_request("Search date required"))?;
			let tz = non_blank(tz).unwrap_or(DEFAULT_TIME_ZONE);
			let data: BookableTimesData = self
				.client(
					&graphql::CART_BOOKABLE_TIMES,
					json!({ "cartId": cart_id, "searchDate": search_date, "tz": tz }),
					token,
				)
				.await?;

			Ok(data.cart_bookable_times)
		})
		.await
	}

	/// Checks `cart_id` out.
	pub async fn complete_booking(
		&self,
		cart_id: &CartId,
		token: Option<&ClientToken>,
	) -> Result<CompletedCart> {
		obs::observe(OperationKind::CompleteBooking, &graphql::CHECKOUT_CART, async {
			let data: CheckoutCartData =
				self.client(&graphql::CHECKOUT_CART, json!({ "cartId": cart_id }), token).await?;

			Ok(data.checkout_cart.cart)
		})
		.await
	}
}
