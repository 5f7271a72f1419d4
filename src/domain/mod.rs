pub mod coupon;
pub mod discount;
pub mod product;
