use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use serde::Serialize;

use crate::clients::discount::DiscountProvider;
use crate::forms::products::{AddProductForm, EditProductForm};
use crate::repository::DieselRepository;
use crate::routes::{health, internal_error, json_error};
use crate::services::{ServiceError, products};

/// Response body of successful create and update calls.
#[derive(Serialize)]
struct ProductSaved {
    status: &'static str,
    id: i32,
}

/// Register the product API on an actix service config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health)
        .service(show_product)
        .service(add_product)
        .service(edit_product)
        .service(remove_product)
        .service(show_products);
}

/// JSON extractor settings answering malformed bodies with `{"error": ...}`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
        let response = json_error(HttpResponse::BadRequest(), &err.to_string());
        InternalError::from_response(err, response).into()
    })
}

fn product_not_found() -> HttpResponse {
    json_error(HttpResponse::NotFound(), "Product not found")
}

#[get("/product/{product_id}")]
pub async fn show_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::get_product(repo.get_ref(), product_id) {
        Ok(product) => HttpResponse::Ok().json(product),
        Err(ServiceError::NotFound) => product_not_found(),
        Err(err) => {
            log::error!("Failed to load product {product_id}: {err}");
            internal_error()
        }
    }
}

#[post("/product")]
pub async fn add_product(
    repo: web::Data<DieselRepository>,
    form: web::Json<AddProductForm>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), form.into_inner()) {
        Ok(product) => HttpResponse::Created().json(ProductSaved {
            status: "success",
            id: product.id,
        }),
        Err(ServiceError::Form(message)) => json_error(HttpResponse::BadRequest(), &message),
        Err(err) => {
            log::error!("Failed to create product: {err}");
            internal_error()
        }
    }
}

#[put("/product/{product_id}")]
pub async fn edit_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    discounts: web::Data<dyn DiscountProvider>,
    form: web::Json<EditProductForm>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::update_product(
        repo.get_ref(),
        discounts.get_ref(),
        product_id,
        form.into_inner(),
    )
    .await
    {
        Ok(product) => HttpResponse::Ok().json(ProductSaved {
            status: "success",
            id: product.id,
        }),
        Err(ServiceError::NotFound) => product_not_found(),
        Err(ServiceError::Form(message)) => json_error(HttpResponse::BadRequest(), &message),
        Err(err) => {
            log::error!("Failed to update product {product_id}: {err}");
            internal_error()
        }
    }
}

#[delete("/product/{product_id}")]
pub async fn remove_product(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let product_id = path.into_inner();

    match products::delete_product(repo.get_ref(), product_id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        // Deletes are idempotent for clients.
        Err(ServiceError::NotFound) => HttpResponse::NoContent().finish(),
        Err(err) => {
            log::error!("Failed to delete product {product_id}: {err}");
            internal_error()
        }
    }
}

#[get("/products")]
pub async fn show_products(
    params: web::Query<products::ProductsQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match products::list_products(repo.get_ref(), params.into_inner()) {
        Ok((total, items)) => HttpResponse::Ok()
            .insert_header(("X-Total-Count", total.to_string()))
            .json(items),
        Err(err) => {
            log::error!("Failed to list products: {err}");
            internal_error()
        }
    }
}
