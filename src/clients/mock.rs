use async_trait::async_trait;
use mockall::mock;
use rust_decimal::Decimal;

use super::discount::DiscountProvider;

mock! {
    pub DiscountProvider {}

    #[async_trait]
    impl DiscountProvider for DiscountProvider {
        async fn compute_price(&self, original_price: Decimal, coupon_code: &str) -> Decimal;
    }
}
