//! Client side of the discount service.
//!
//! Pricing a product from a coupon goes through [`DiscountProvider`]. The
//! provider never fails: when the discount backend cannot answer, the
//! original price is returned and the incident is logged.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::coupon::{DiscountPercent, normalize_code};
use crate::domain::discount::apply_discount;

/// Capability that prices a product from its original price and a coupon.
#[async_trait]
pub trait DiscountProvider: Send + Sync {
    /// Return the discounted price, or `original_price` when no discount
    /// can be applied for whatever reason.
    async fn compute_price(&self, original_price: Decimal, coupon_code: &str) -> Decimal;
}

/// Errors from the remote discount service.
#[derive(Debug, Error)]
pub enum DiscountClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(reqwest::Error),
    #[error("network error: {0}")]
    Network(reqwest::Error),
    #[error("discount service responded with HTTP {0}")]
    Status(StatusCode),
    #[error("malformed discount response: {0}")]
    Parse(reqwest::Error),
    #[error("discount service returned a negative price `{0}`")]
    NegativePrice(Decimal),
}

/// Successful body of `GET /product_discount`.
#[derive(Deserialize)]
struct DiscountResponse {
    price: Decimal,
}

/// [`DiscountProvider`] calling the discount service over HTTP.
#[derive(Clone)]
pub struct HttpDiscountProvider {
    client: Client,
    base_url: String,
}

impl HttpDiscountProvider {
    /// Create a client for the service at `base_url` (e.g. `http://discounts:5001`).
    /// Every request is bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, DiscountClientError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(DiscountClientError::Build)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Ask the discount service for the price of `price` with `coupon_code`.
    pub async fn request_price(
        &self,
        price: Decimal,
        coupon_code: &str,
    ) -> Result<Decimal, DiscountClientError> {
        let price = price.to_string();
        let response = self
            .client
            .get(format!("{}/product_discount", self.base_url))
            .query(&[("price", price.as_str()), ("coupon_code", coupon_code)])
            .send()
            .await
            .map_err(DiscountClientError::Network)?;

        if !response.status().is_success() {
            return Err(DiscountClientError::Status(response.status()));
        }

        let body: DiscountResponse = response
            .json()
            .await
            .map_err(DiscountClientError::Parse)?;

        if body.price < Decimal::ZERO {
            return Err(DiscountClientError::NegativePrice(body.price));
        }

        Ok(body.price)
    }
}

#[async_trait]
impl DiscountProvider for HttpDiscountProvider {
    async fn compute_price(&self, original_price: Decimal, coupon_code: &str) -> Decimal {
        match self.request_price(original_price, coupon_code).await {
            Ok(price) => price,
            Err(err) => {
                log::warn!(
                    "Discount fallback for coupon `{coupon_code}`, keeping price {original_price}: {err}"
                );
                original_price
            }
        }
    }
}

/// [`DiscountProvider`] resolving coupons from an in-process table.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDiscountProvider {
    coupons: HashMap<String, DiscountPercent>,
}

impl InMemoryDiscountProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `code` with the given percent.
    pub fn with_coupon(mut self, code: &str, percent: DiscountPercent) -> Self {
        self.coupons.insert(normalize_code(code), percent);
        self
    }
}

#[async_trait]
impl DiscountProvider for InMemoryDiscountProvider {
    async fn compute_price(&self, original_price: Decimal, coupon_code: &str) -> Decimal {
        let percent = self
            .coupons
            .get(&normalize_code(coupon_code))
            .copied()
            .unwrap_or(DiscountPercent::ZERO);
        apply_discount(original_price, percent)
    }
}
