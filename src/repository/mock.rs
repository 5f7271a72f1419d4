use mockall::mock;

use super::{CouponReader, CouponWriter, ProductReader, ProductWriter};
use crate::domain::{
    coupon::{Coupon, NewCoupon},
    product::{NewProduct, Product, ProductListQuery, UpdateProduct},
};
use crate::repository::errors::RepositoryResult;

mock! {
    pub ProductReader {}

    impl ProductReader for ProductReader {
        fn get_product_by_id(&self, id: i32) -> RepositoryResult<Option<Product>>;
        fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
    }
}

mock! {
    pub ProductWriter {}

    impl ProductWriter for ProductWriter {
        fn create_product(&self, new_product: &NewProduct) -> RepositoryResult<Product>;
        fn update_product(&self, product_id: i32, updates: &UpdateProduct) -> RepositoryResult<Product>;
        fn delete_product(&self, product_id: i32) -> RepositoryResult<()>;
    }
}

mock! {
    pub CouponReader {}

    impl CouponReader for CouponReader {
        fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<Coupon>>;
        fn list_coupons(&self) -> RepositoryResult<Vec<Coupon>>;
    }
}

mock! {
    pub CouponWriter {}

    impl CouponWriter for CouponWriter {
        fn upsert_coupons(&self, coupons: &[NewCoupon]) -> RepositoryResult<usize>;
    }
}
