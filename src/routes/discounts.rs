use actix_web::error::{InternalError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, Responder, get, web};

use crate::forms::discounts::DiscountQuery;
use crate::repository::DieselRepository;
use crate::routes::{health, internal_error, json_error};
use crate::services::{ServiceError, discounts};

/// Register the discount API on an actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(query_config())
        .service(health)
        .service(product_discount)
        .service(show_coupons);
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        let response = json_error(HttpResponse::BadRequest(), &err.to_string());
        InternalError::from_response(err, response).into()
    })
}

#[get("/product_discount")]
/// Price `price` with the discount of `coupon_code`.
///
/// Unknown or empty coupons return the price unchanged. Corrupt coupon data
/// answers `500` so that callers fall back to the undiscounted price.
pub async fn product_discount(
    params: web::Query<DiscountQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match discounts::quote_discount(repo.get_ref(), params.into_inner()) {
        Ok(quote) => HttpResponse::Ok().json(quote),
        Err(ServiceError::Form(message)) => json_error(HttpResponse::BadRequest(), &message),
        Err(err) => {
            log::error!("Failed to compute discount: {err}");
            internal_error()
        }
    }
}

#[get("/coupons")]
pub async fn show_coupons(repo: web::Data<DieselRepository>) -> impl Responder {
    match discounts::list_coupons(repo.get_ref()) {
        Ok(coupons) => HttpResponse::Ok().json(coupons),
        Err(err) => {
            log::error!("Failed to list coupons: {err}");
            internal_error()
        }
    }
}
