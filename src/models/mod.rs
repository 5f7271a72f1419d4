pub mod coupon;
pub mod product;

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::repository::errors::{RepositoryError, RepositoryResult};

/// Parse a decimal stored as TEXT.
pub(crate) fn parse_decimal(column: &str, raw: &str) -> RepositoryResult<Decimal> {
    Decimal::from_str(raw)
        .map_err(|err| RepositoryError::InvalidData(format!("{column} `{raw}`: {err}")))
}
