use std::io::{Cursor, Read};
use std::path::Path;
use std::str::FromStr;

use csv::Trim;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::domain::coupon::{DiscountPercent, NewCoupon};

/// Errors that can occur while parsing a coupons CSV file.
#[derive(Debug, Error)]
pub enum UploadCouponsFormError {
    #[error("row {row} is missing a coupon code")]
    MissingCode { row: usize },
    #[error("row {row} has invalid discount percent `{value}`")]
    InvalidPercent { row: usize, value: String },
    #[error("upload contains no coupons")]
    EmptyUpload,
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Raw CSV with `code,discount_percent` columns.
#[derive(Debug)]
pub struct UploadCouponsForm {
    pub bytes: Vec<u8>,
}

impl UploadCouponsForm {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Read the CSV from disk, e.g. the seed file given at startup.
    pub fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        std::fs::read(path).map(Self::new)
    }

    /// Parse the uploaded CSV into [`NewCoupon`] records.
    pub fn into_new_coupons(self) -> Result<Vec<NewCoupon>, UploadCouponsFormError> {
        parse_coupons(Cursor::new(self.bytes))
    }
}

#[derive(Deserialize)]
struct CouponCsvRow {
    #[serde(default)]
    code: String,
    #[serde(default)]
    discount_percent: String,
}

fn parse_coupons<R: Read>(reader: R) -> Result<Vec<NewCoupon>, UploadCouponsFormError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(Trim::All)
        .from_reader(reader);

    let mut coupons = Vec::new();

    for (index, row) in csv_reader.deserialize::<CouponCsvRow>().enumerate() {
        let row_number = index + 2; // account for header row
        let record = row?;

        if record.code.is_empty() {
            return Err(UploadCouponsFormError::MissingCode { row: row_number });
        }

        let percent = Decimal::from_str(&record.discount_percent)
            .ok()
            .and_then(|value| DiscountPercent::new(value).ok())
            .ok_or_else(|| UploadCouponsFormError::InvalidPercent {
                row: row_number,
                value: record.discount_percent.clone(),
            })?;

        coupons.push(NewCoupon::new(&record.code, percent));
    }

    if coupons.is_empty() {
        return Err(UploadCouponsFormError::EmptyUpload);
    }

    Ok(coupons)
}
