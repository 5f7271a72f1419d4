use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use pushkind_pricing::clients::discount::{DiscountProvider, HttpDiscountProvider};
use pushkind_pricing::config::ServerConfig;
use pushkind_pricing::db::establish_connection_pool;
use pushkind_pricing::repository::DieselRepository;
use pushkind_pricing::routes::api;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = ServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    let discounts =
        match HttpDiscountProvider::new(&config.discount_service_url, config.discount_timeout) {
            Ok(client) => client,
            Err(e) => {
                log::error!("Failed to create discount service client: {e}");
                std::process::exit(1);
            }
        };
    let discounts: web::Data<dyn DiscountProvider> =
        web::Data::from(Arc::new(discounts) as Arc<dyn DiscountProvider>);

    log::info!(
        "Pricing discounts via {} (timeout {:?})",
        config.discount_service_url,
        config.discount_timeout
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(discounts.clone())
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
