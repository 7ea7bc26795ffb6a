use std::sync::Arc;

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;

use ag_api::app::create_app;
use ag_api::routes::auth::AppState;
use ag_core::services::auth::{AuthService, AuthServiceConfig};
use ag_core::services::token::{TokenService, TokenServiceConfig};
use ag_infra::database::create_pool;
use ag_infra::database::mysql::{MySqlTokenRepository, MySqlUserRepository};
use ag_infra::security::BcryptPasswordHasher;
use ag_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting AuthGate API server");

    // Load configuration; signing secrets and the database URL have no
    // usable defaults, so a misconfigured process stops here.
    let config = AppConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    });
    info!("Environment: {}", config.environment);

    // Connect to the database before binding the listener
    let pool = create_pool(&config.database).await.map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("Database connection failed: {}", e),
        )
    })?;
    info!("Database connected");

    // Wire repositories and services
    let user_repository = Arc::new(MySqlUserRepository::new(pool.clone()));
    let token_repository = Arc::new(MySqlTokenRepository::new(pool));
    let password_hasher = Arc::new(BcryptPasswordHasher::new());

    let token_service = Arc::new(TokenService::new(
        token_repository,
        TokenServiceConfig::from(&config.jwt),
    ));
    let auth_service = Arc::new(AuthService::new(
        user_repository,
        token_service,
        password_hasher,
        AuthServiceConfig::default(),
    ));

    let app_state = web::Data::new(AppState { auth_service });

    let bind_address = config.server.bind_address();
    info!("Server will bind to: {}", bind_address);

    HttpServer::new(move || create_app(app_state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}
