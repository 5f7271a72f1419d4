use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::{NewProduct, PriceChange, ProductChanges};

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: u64 = 100;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// Validation failures from the `validator` crate.
    #[error("Invalid name length (1-100)")]
    Validation(#[from] ValidationErrors),
    #[error("Missing name or price")]
    MissingField,
    /// The provided name is empty after sanitization.
    #[error("Product name cannot be empty")]
    EmptyName,
    #[error("Price must be a valid number")]
    InvalidPrice { value: String },
    #[error("Price must be positive")]
    NegativePrice,
}

/// Price as sent by clients, either a JSON string or a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Text(String),
    Number(serde_json::Number),
}

impl RawPrice {
    fn as_text(&self) -> String {
        match self {
            RawPrice::Text(value) => value.trim().to_string(),
            RawPrice::Number(value) => value.to_string(),
        }
    }
}

impl From<&str> for RawPrice {
    fn from(value: &str) -> Self {
        RawPrice::Text(value.to_string())
    }
}

/// JSON payload of `POST /product`.
#[derive(Debug, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    pub price: Option<RawPrice>,
    pub is_active: Option<bool>,
}

impl AddProductForm {
    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(mut self) -> ProductFormResult<NewProduct> {
        self.name = self.name.map(|name| name.trim().to_string());
        let (name, price) = required_fields(self.name.as_deref(), self.price.as_ref())?;
        self.validate()?;

        let name = sanitize_inline_text(name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }
        let price = parse_price(price)?;

        Ok(NewProduct::new(name, price).active(self.is_active.unwrap_or(true)))
    }
}

/// JSON payload of `PUT /product/{id}`.
#[derive(Debug, Deserialize, Validate)]
pub struct EditProductForm {
    #[validate(length(min = 1, max = NAME_MAX_LEN))]
    pub name: Option<String>,
    pub price: Option<RawPrice>,
    pub is_active: Option<bool>,
    /// Missing or `null` keeps the supplied price, `""` removes any discount.
    pub coupon_code: Option<String>,
}

impl EditProductForm {
    /// Validates the payload into the changes applied by the price reconciler.
    pub fn into_product_changes(mut self) -> ProductFormResult<ProductChanges> {
        self.name = self.name.map(|name| name.trim().to_string());
        let (name, price) = required_fields(self.name.as_deref(), self.price.as_ref())?;
        self.validate()?;

        let name = sanitize_inline_text(name);
        if name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }
        let price = parse_price(price)?;

        Ok(ProductChanges {
            name,
            is_active: self.is_active.unwrap_or(true),
            price: PriceChange::from_request(price, self.coupon_code),
        })
    }
}

fn required_fields<'a>(
    name: Option<&'a str>,
    price: Option<&'a RawPrice>,
) -> ProductFormResult<(&'a str, &'a RawPrice)> {
    match (name, price) {
        (Some(name), Some(price)) if !name.is_empty() && !price.as_text().is_empty() => {
            Ok((name, price))
        }
        _ => Err(ProductFormError::MissingField),
    }
}

/// Parse a non-negative decimal price.
pub fn parse_price(raw: &RawPrice) -> ProductFormResult<Decimal> {
    let text = raw.as_text();
    let price = Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| ProductFormError::InvalidPrice { value: text.clone() })?;

    if price < Decimal::ZERO {
        return Err(ProductFormError::NegativePrice);
    }

    Ok(price)
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}
