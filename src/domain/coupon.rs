use std::fmt;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Percentage outside of the `[0, 100)` range.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("discount percent `{0}` is outside of [0, 100)")]
pub struct InvalidDiscountPercent(pub Decimal);

/// Discount percentage guaranteed to lie in `[0, 100)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    /// No discount at all.
    pub const ZERO: DiscountPercent = DiscountPercent(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self, InvalidDiscountPercent> {
        if value < Decimal::ZERO || value >= Decimal::ONE_HUNDRED {
            return Err(InvalidDiscountPercent(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Decimal> for DiscountPercent {
    type Error = InvalidDiscountPercent;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(value: DiscountPercent) -> Self {
        value.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Coupon code mapped to a flat discount percentage.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Coupon {
    pub id: i32,
    /// Normalized (trimmed, upper-cased) coupon code.
    pub code: String,
    pub discount_percent: DiscountPercent,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Parameters required to insert or replace a coupon.
#[derive(Debug, Clone)]
pub struct NewCoupon {
    pub code: String,
    pub discount_percent: DiscountPercent,
    pub updated_at: NaiveDateTime,
}

impl NewCoupon {
    /// Build a new coupon payload, normalizing the code.
    pub fn new(code: &str, discount_percent: DiscountPercent) -> Self {
        let now = chrono::Local::now().naive_utc();
        Self {
            code: normalize_code(code),
            discount_percent,
            updated_at: now,
        }
    }
}

/// Canonical form of a coupon code used for storage and lookups.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}
