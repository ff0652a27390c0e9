//! Cart entities: line items and the per-session collection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::book::{Book, BookId};

/// A book placed in a cart together with its quantity.
///
/// The book fields are a copy taken when the item was added, so later
/// catalog edits do not reach carts that already hold the book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    #[serde(flatten)]
    pub book: Book,
    pub quantity: u32,
}

impl CartItem {
    /// Creates a line item with quantity 1.
    pub fn new(book: Book) -> Self {
        Self { book, quantity: 1 }
    }

    pub fn book_id(&self) -> BookId {
        self.book.book_id
    }

    /// Price multiplied by quantity.
    pub fn subtotal(&self) -> Decimal {
        self.book.price * Decimal::from(self.quantity)
    }
}

/// Reasons a persisted cart blob is rejected.
#[derive(Debug, thiserror::Error)]
pub enum CartBlobError {
    #[error("malformed cart blob: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("book {0} appears more than once")]
    DuplicateBook(BookId),

    #[error("book {0} has a non-positive quantity")]
    InvalidQuantity(BookId),

    #[error("book {0} has a negative price")]
    NegativePrice(BookId),
}

/// Ordered cart contents, keyed by book id.
///
/// Holds at most one [`CartItem`] per book and never stores a quantity
/// below 1. Serializes as a plain JSON array of items; deserialization
/// rejects arrays that break either rule or carry a negative price.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<CartItem>", try_from = "Vec<CartItem>")]
pub struct CartCollection {
    items: Vec<CartItem>,
}

impl CartCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a persisted blob, enforcing the collection invariants.
    pub fn from_blob(blob: &str) -> Result<Self, CartBlobError> {
        let items: Vec<CartItem> = serde_json::from_str(blob)?;
        Self::try_from(items)
    }

    /// Serializes the collection for persistence.
    pub fn to_blob(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.items)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn get(&self, book_id: BookId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.book_id() == book_id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Adds one copy of `book`: bumps the quantity of an existing line or
    /// appends a new line with quantity 1.
    pub fn add(&mut self, book: &Book) {
        match self.items.iter_mut().find(|item| item.book_id() == book.book_id) {
            Some(item) => item.quantity = item.quantity.saturating_add(1),
            None => self.items.push(CartItem::new(book.clone())),
        }
    }

    /// Removes the line for `book_id`. Returns whether a line was removed.
    pub fn remove(&mut self, book_id: BookId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.book_id() != book_id);
        self.items.len() != before
    }

    /// Sets the quantity for `book_id`; a quantity of zero or less removes the line.
    ///
    /// Returns whether the collection changed. Unknown ids are ignored.
    /// Quantities above `u32::MAX` are stored as `u32::MAX`.
    pub fn set_quantity(&mut self, book_id: BookId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(book_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        match self.items.iter_mut().find(|item| item.book_id() == book_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of quantities across all lines.
    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price × quantity across all lines, in exact decimal arithmetic.
    pub fn total_price(&self) -> Decimal {
        self.items.iter().map(CartItem::subtotal).sum()
    }
}

impl TryFrom<Vec<CartItem>> for CartCollection {
    type Error = CartBlobError;

    fn try_from(items: Vec<CartItem>) -> Result<Self, Self::Error> {
        for (index, item) in items.iter().enumerate() {
            if item.quantity == 0 {
                return Err(CartBlobError::InvalidQuantity(item.book_id()));
            }
            if item.book.price < Decimal::ZERO {
                return Err(CartBlobError::NegativePrice(item.book_id()));
            }
            if items[..index]
                .iter()
                .any(|seen| seen.book_id() == item.book_id())
            {
                return Err(CartBlobError::DuplicateBook(item.book_id()));
            }
        }

        Ok(Self { items })
    }
}

impl From<CartCollection> for Vec<CartItem> {
    fn from(collection: CartCollection) -> Self {
        collection.items
    }
}
