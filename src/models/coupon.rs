use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::coupon::{
    Coupon as DomainCoupon, DiscountPercent, NewCoupon as DomainNewCoupon,
};
use crate::models::parse_decimal;
use crate::repository::errors::RepositoryError;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::coupons)]
pub struct Coupon {
    pub id: i32,
    pub code: String,
    pub discount_percent: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::coupons)]
pub struct NewCoupon<'a> {
    pub code: &'a str,
    pub discount_percent: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Coupon> for DomainCoupon {
    type Error = RepositoryError;

    fn try_from(value: Coupon) -> Result<Self, Self::Error> {
        let raw = parse_decimal("coupons.discount_percent", &value.discount_percent)?;
        let discount_percent = DiscountPercent::new(raw).map_err(|err| {
            RepositoryError::InvalidData(format!("coupon `{}`: {err}", value.code))
        })?;

        Ok(Self {
            id: value.id,
            code: value.code,
            discount_percent,
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCoupon> for NewCoupon<'a> {
    fn from(value: &'a DomainNewCoupon) -> Self {
        Self {
            code: value.code.as_str(),
            discount_percent: value.discount_percent.value().to_string(),
            updated_at: value.updated_at,
        }
    }
}
