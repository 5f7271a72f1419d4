use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::forms::products::{ProductFormError, RawPrice, parse_price};

/// Errors raised while reading a discount query.
#[derive(Debug, Error)]
pub enum DiscountQueryError {
    #[error("Missing price")]
    MissingPrice,
    #[error("{0}")]
    Price(#[from] ProductFormError),
}

/// Query string of `GET /product_discount`.
#[derive(Debug, Default, Deserialize)]
pub struct DiscountQuery {
    pub price: Option<String>,
    pub coupon_code: Option<String>,
}

impl DiscountQuery {
    /// Validate the query into a base price and a (possibly empty) coupon code.
    pub fn into_request(self) -> Result<(Decimal, String), DiscountQueryError> {
        let price = match self.price {
            Some(price) if !price.trim().is_empty() => price,
            _ => return Err(DiscountQueryError::MissingPrice),
        };
        let price = parse_price(&RawPrice::Text(price))?;

        Ok((price, self.coupon_code.unwrap_or_default()))
    }
}
