use diesel::prelude::*;

use crate::{
    domain::coupon::{Coupon as DomainCoupon, NewCoupon as DomainNewCoupon, normalize_code},
    models::coupon::{Coupon as DbCoupon, NewCoupon as DbNewCoupon},
    repository::errors::{RepositoryError, RepositoryResult},
    repository::{CouponReader, CouponWriter, DieselRepository},
};

impl CouponReader for DieselRepository {
    fn get_coupon_by_code(&self, code: &str) -> RepositoryResult<Option<DomainCoupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        let coupon = coupons::table
            .filter(coupons::code.eq(normalize_code(code)))
            .first::<DbCoupon>(&mut conn)
            .optional()?;

        coupon.map(DomainCoupon::try_from).transpose()
    }

    fn list_coupons(&self) -> RepositoryResult<Vec<DomainCoupon>> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;
        coupons::table
            .order(coupons::code.asc())
            .load::<DbCoupon>(&mut conn)?
            .into_iter()
            .map(DomainCoupon::try_from)
            .collect()
    }
}

impl CouponWriter for DieselRepository {
    fn upsert_coupons(&self, new_coupons: &[DomainNewCoupon]) -> RepositoryResult<usize> {
        use crate::schema::coupons;

        let mut conn = self.conn()?;

        conn.transaction::<usize, RepositoryError, _>(|conn| {
            let mut count_written: usize = 0;

            for new in new_coupons {
                let db_new: DbNewCoupon = new.into();

                diesel::insert_into(coupons::table)
                    .values(&db_new)
                    .on_conflict(coupons::code)
                    .do_update()
                    .set(&db_new)
                    .execute(conn)?;
                count_written += 1;
            }

            Ok(count_written)
        })
    }
}
