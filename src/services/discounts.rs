use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::coupon::{Coupon, DiscountPercent};
use crate::domain::discount::apply_discount;
use crate::forms::coupons::UploadCouponsForm;
use crate::forms::discounts::DiscountQuery;
use crate::repository::{CouponReader, CouponWriter};
use crate::services::{ServiceError, ServiceResult};

/// Discount computed for a single `(price, coupon)` pair.
#[derive(Debug, Serialize, PartialEq)]
pub struct DiscountQuote {
    pub status: &'static str,
    pub price: Decimal,
    pub discount_percent: DiscountPercent,
}

/// Resolve a coupon code to its discount percentage.
///
/// Empty codes and unknown codes both mean "no discount". A stored percent
/// outside `[0, 100)` fails with [`ServiceError::DataIntegrity`].
pub fn resolve_coupon<R>(repo: &R, code: &str) -> ServiceResult<DiscountPercent>
where
    R: CouponReader + ?Sized,
{
    if code.trim().is_empty() {
        return Ok(DiscountPercent::ZERO);
    }

    match repo.get_coupon_by_code(code).map_err(ServiceError::from)? {
        Some(coupon) => Ok(coupon.discount_percent),
        None => {
            log::info!("Unknown coupon `{code}`, no discount applied");
            Ok(DiscountPercent::ZERO)
        }
    }
}

/// Price `base_price` with the discount of `coupon_code`.
pub fn quote_price<R>(
    repo: &R,
    base_price: Decimal,
    coupon_code: &str,
) -> ServiceResult<DiscountQuote>
where
    R: CouponReader + ?Sized,
{
    let discount_percent = resolve_coupon(repo, coupon_code)?;

    Ok(DiscountQuote {
        status: "success",
        price: apply_discount(base_price, discount_percent),
        discount_percent,
    })
}

/// Validate a discount query and price it.
pub fn quote_discount<R>(repo: &R, query: DiscountQuery) -> ServiceResult<DiscountQuote>
where
    R: CouponReader + ?Sized,
{
    let (price, coupon_code) = query
        .into_request()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    quote_price(repo, price, &coupon_code)
}

/// Lists every known coupon ordered by code.
pub fn list_coupons<R>(repo: &R) -> ServiceResult<Vec<Coupon>>
where
    R: CouponReader + ?Sized,
{
    repo.list_coupons().map_err(ServiceError::from)
}

/// Imports coupons from a CSV file, replacing the percent of existing codes.
pub fn import_coupons<R>(repo: &R, form: UploadCouponsForm) -> ServiceResult<usize>
where
    R: CouponWriter + ?Sized,
{
    let coupons = form
        .into_new_coupons()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    repo.upsert_coupons(&coupons).map_err(ServiceError::from)
}
