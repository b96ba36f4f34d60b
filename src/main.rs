// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config, supplier and app state, then start the HTTP server

mod config;
mod db;
mod errors;
mod handlers;
mod models;
mod services;

use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use config::Config;
use db::AuthRepository;
use dotenv::dotenv;
use handlers::{SharedController, SharedSupplier};
use services::{supplier_from_config, AppController};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 1. Load environment variables
    dotenv().ok();

    // 2. Load configuration
    let config = Config::from_env();
    if let Err(e) = config.validate() {
        anyhow::bail!("Configuration error: {}", e);
    }

    // 3. Initialize logging
    if std::env::var("RUST_LOG").is_err() {
        let log_level = if !config.log_level.is_empty() {
            &config.log_level
        } else {
            "info,actix_web=info"
        };
        std::env::set_var("RUST_LOG", log_level);
    }
    env_logger::init();

    log::info!("Starting solo-trips...");
    log::info!("Environment: {}", config.environment);
    log::info!(
        "Server Address: {}:{}",
        config.server_address,
        config.server_port
    );

    // 4. Pick the itinerary supplier once
    let supplier: SharedSupplier = supplier_from_config(&config);
    log::info!("Itinerary supplier mode: {:?}", supplier.mode());

    // 5. Restore session and build application state
    let auth = AuthRepository::new(config.auth_state_path.clone());
    log::info!("Auth flag stored at {}", auth.path().display());
    let controller: web::Data<SharedController> =
        web::Data::new(tokio::sync::Mutex::new(AppController::new(auth)));
    let supplier = web::Data::new(supplier);

    // 6. Start HTTP server
    let server_addr = format!("{}:{}", config.server_address, config.server_port);

    HttpServer::new(move || {
        App::new()
            // Application state (controller and supplier)
            .app_data(controller.clone())
            .app_data(supplier.clone())
            // Middleware
            .wrap(Logger::default())
            .wrap(actix_web::middleware::Compress::default())
            // Routes
            .configure(handlers::health_config)
            .configure(handlers::session_config)
            .configure(handlers::bucket_config)
            .configure(handlers::create_config)
            .configure(handlers::plans_config)
            .configure(handlers::social_config)
    })
    .bind(&server_addr)
    .with_context(|| format!("failed to bind {}", server_addr))?
    .run()
    .await
    .context("server terminated with an error")
}
