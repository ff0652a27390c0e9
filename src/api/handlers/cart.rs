//! Handlers for the session cart.
//!
//! Every endpoint reads the session id from the `X-Session-Id` header and
//! responds with the full cart after the operation.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use validator::Validate;

use crate::api::dto::cart::{AddCartItemRequest, CartResponse, UpdateQuantityRequest};
use crate::domain::entities::BookId;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::session_id::extract_session_id;

/// `GET /api/cart`
pub async fn get_cart_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, AppError> {
    let session_id = extract_session_id(&headers)?;
    let cart = state.cart_service.open(&session_id).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Adds one copy of a catalog book.
///
/// # Endpoint
///
/// `POST /api/cart/items`
///
/// # Request Body
///
/// ```json
/// { "bookId": 12 }
/// ```
///
/// Adding a book already in the cart increments its quantity.
///
/// # Errors
///
/// - 400 if the session header or body is invalid
/// - 404 if the book is not in the catalog
/// - 503 if cart storage is unavailable
pub async fn add_cart_item_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<AddCartItemRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let session_id = extract_session_id(&headers)?;
    payload.validate()?;

    let cart = state
        .cart_service
        .add_book(&session_id, payload.book_id)
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// Sets the quantity of a cart line.
///
/// # Endpoint
///
/// `PATCH /api/cart/items/{bookId}`
///
/// Zero or negative quantities remove the line; ids not in the cart are
/// ignored. Quantities above
/// [`MAX_QUANTITY`](crate::api::dto::cart::MAX_QUANTITY) are a 400.
pub async fn update_cart_item_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(book_id): Path<BookId>,
    Json(payload): Json<UpdateQuantityRequest>,
) -> Result<Json<CartResponse>, AppError> {
    let session_id = extract_session_id(&headers)?;
    payload.validate()?;

    let cart = state
        .cart_service
        .update_quantity(&session_id, book_id, payload.quantity)
        .await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// `DELETE /api/cart/items/{bookId}`
pub async fn remove_cart_item_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(book_id): Path<BookId>,
) -> Result<Json<CartResponse>, AppError> {
    let session_id = extract_session_id(&headers)?;
    let cart = state.cart_service.remove_book(&session_id, book_id).await?;
    Ok(Json(CartResponse::from(&cart)))
}

/// `DELETE /api/cart`
pub async fn clear_cart_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<CartResponse>, AppError> {
    let session_id = extract_session_id(&headers)?;
    let cart = state.cart_service.clear(&session_id).await?;
    Ok(Json(CartResponse::from(&cart)))
}
