use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::discount::normalize_price;
use crate::pagination::Pagination;

/// Domain representation of a catalog product.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Product {
    /// Unique identifier of the product, never reused after deletion.
    pub id: i32,
    /// Human-readable name of the product.
    pub name: String,
    /// Currently effective price, possibly discounted.
    pub price: Decimal,
    /// Undiscounted reference price captured at creation.
    pub original_price: Decimal,
    /// Whether the product is offered for sale.
    pub is_active: bool,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product.
///
/// There is no way to pass a separate original price: it always starts out
/// equal to `price`.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub original_price: Decimal,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl NewProduct {
    /// Build a new active product payload priced at `price`.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        let now = chrono::Local::now().naive_utc();
        let price = normalize_price(price);
        Self {
            name: name.into(),
            price,
            original_price: price,
            is_active: true,
            updated_at: now,
        }
    }

    /// Set the initial activity flag.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = is_active;
        self
    }
}

/// Full set of fields rewritten when updating an existing product.
///
/// `original_price` is intentionally absent.
#[derive(Debug, Clone)]
pub struct UpdateProduct {
    pub name: String,
    pub price: Decimal,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl UpdateProduct {
    /// Build an update payload with the current timestamp.
    pub fn new(name: impl Into<String>, price: Decimal, is_active: bool) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            name: name.into(),
            price: normalize_price(price),
            is_active,
            updated_at: now,
        }
    }
}

/// How the caller wants the price of an existing product to change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PriceChange {
    /// Take the supplied price literally, leaving the original price alone.
    Manual(Decimal),
    /// Drop any discount and go back to the original price.
    ClearDiscount,
    /// Price the product from its original price using this coupon code.
    Coupon(String),
}

impl PriceChange {
    /// Interpret the raw `price` and optional `coupon_code` of an update.
    ///
    /// A missing code keeps the manual price, an empty code clears the
    /// discount and anything else is treated as a coupon.
    pub fn from_request(price: Decimal, coupon_code: Option<String>) -> Self {
        match coupon_code {
            None => PriceChange::Manual(price),
            Some(code) if code.is_empty() => PriceChange::ClearDiscount,
            Some(code) => PriceChange::Coupon(code),
        }
    }
}

/// Update request for a product after boundary validation.
#[derive(Debug, Clone)]
pub struct ProductChanges {
    pub name: String,
    pub is_active: bool,
    pub price: PriceChange,
}

/// Query definition used to list products.
#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    /// Optional filter on the activity flag.
    pub is_active: Option<bool>,
    /// Optional case-insensitive name search term.
    pub search: Option<String>,
    /// Optional pagination options applied to the query.
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    /// Construct a query that targets every product.
    pub fn new() -> Self {
        Self::default()
    }

    /// Only return products with the given activity flag.
    pub fn active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Filter the results by a search term applied to the name.
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Apply pagination to the query with the given page number and page size.
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}
