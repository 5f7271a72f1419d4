use std::env;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_ADDRESS: &str = "127.0.0.1";
const DEFAULT_DISCOUNT_SERVICE_URL: &str = "http://localhost:5001";
const DEFAULT_DISCOUNT_TIMEOUT_MS: u64 = 2_000;

/// Settings of the product service.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    pub discount_service_url: String,
    /// Upper bound for a single call to the discount service.
    pub discount_timeout: Duration,
}

impl ServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or("app.db".to_string()),
            address: env::var("ADDRESS").unwrap_or(DEFAULT_ADDRESS.to_string()),
            port: parse_var("PORT", 5000),
            discount_service_url: env::var("DISCOUNT_SERVICE_URL")
                .unwrap_or(DEFAULT_DISCOUNT_SERVICE_URL.to_string()),
            discount_timeout: Duration::from_millis(parse_var(
                "DISCOUNT_TIMEOUT_MS",
                DEFAULT_DISCOUNT_TIMEOUT_MS,
            )),
        }
    }
}

/// Settings of the discount service.
#[derive(Debug, Clone)]
pub struct DiscountServerConfig {
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Optional CSV of `code,discount_percent` rows imported at startup.
    pub coupons_csv: Option<String>,
}

impl DiscountServerConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").unwrap_or("discounts.db".to_string()),
            address: env::var("ADDRESS").unwrap_or(DEFAULT_ADDRESS.to_string()),
            port: parse_var("PORT", 5001),
            coupons_csv: env::var("COUPONS_CSV").ok().filter(|path| !path.is_empty()),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> T
where
    T: FromStr + Copy + std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.parse::<T>().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid {name}=`{raw}`, using {default}");
            default
        }),
        Err(_) => default,
    }
}
