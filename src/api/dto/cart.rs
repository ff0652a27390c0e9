//! DTOs for session and cart endpoints.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::cart_manager::CartManager;
use crate::domain::entities::{BookId, CartItem};

/// Largest quantity a cart line can hold.
pub const MAX_QUANTITY: i64 = u32::MAX as i64;

/// Response of `POST /api/session`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub session_id: String,
}

/// Body of `POST /api/cart/items`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    #[validate(range(min = 1, message = "bookId must be positive"))]
    pub book_id: BookId,
}

/// Body of `PATCH /api/cart/items/{bookId}`.
///
/// Zero or negative quantities remove the line.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuantityRequest {
    #[validate(range(max = MAX_QUANTITY, message = "quantity is too large"))]
    pub quantity: i64,
}

/// Cart contents with totals.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub total_items: u64,
    /// Rounded to 2 decimal places.
    pub total_price: f64,
}

impl From<&CartManager> for CartResponse {
    fn from(cart: &CartManager) -> Self {
        Self {
            items: cart.items().to_vec(),
            total_items: cart.total_items(),
            total_price: display_price(cart.total_price()),
        }
    }
}

fn display_price(value: Decimal) -> f64 {
    value.round_dp(2).to_f64().unwrap_or_default()
}
