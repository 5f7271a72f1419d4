use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use pushkind_pricing::config::DiscountServerConfig;
use pushkind_pricing::db::establish_connection_pool;
use pushkind_pricing::forms::coupons::UploadCouponsForm;
use pushkind_pricing::repository::DieselRepository;
use pushkind_pricing::routes::discounts;
use pushkind_pricing::services::discounts::import_coupons;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = DiscountServerConfig::from_env();

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    if let Some(path) = &config.coupons_csv {
        let form = match UploadCouponsForm::from_path(path) {
            Ok(form) => form,
            Err(e) => {
                log::error!("Failed to read coupons file {path}: {e}");
                std::process::exit(1);
            }
        };
        match import_coupons(&repo, form) {
            Ok(count) => log::info!("Imported {count} coupons from {path}"),
            Err(e) => {
                log::error!("Failed to import coupons from {path}: {e}");
                std::process::exit(1);
            }
        }
    }

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .configure(discounts::configure)
            .app_data(web::Data::new(repo.clone()))
    })
    .bind((config.address, config.port))?
    .run()
    .await
}
