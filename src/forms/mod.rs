pub mod coupons;
pub mod discounts;
pub mod products;
