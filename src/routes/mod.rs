use actix_web::{HttpResponse, HttpResponseBuilder, Responder, get};
use serde::Serialize;

pub mod api;
pub mod discounts;

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// Build a `{"error": message}` JSON response.
pub fn json_error(mut builder: HttpResponseBuilder, message: &str) -> HttpResponse {
    builder.json(ErrorBody { error: message })
}

pub fn internal_error() -> HttpResponse {
    json_error(HttpResponse::InternalServerError(), "Internal server error")
}

#[get("/health")]
/// Liveness probe shared by both services.
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "healthy" }))
}
