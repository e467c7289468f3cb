use std::io;
use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use log::{error, info, warn};
use mongodb::bson::doc;
use mongodb::Client;

use veranode::config::{StorageBackend, CONFIG};
use veranode::middleware::RouteGuard;
use veranode::repositories::{InMemoryUserRepository, UserRepository, UserStore};
use veranode::routes::{self, RouteSettings};
use veranode::services::{AuthService, TokenBlacklist, TokenService};

fn io_error(context: &str, err: impl std::fmt::Display) -> io::Error {
    error!("{}: {}", context, err);
    io::Error::new(io::ErrorKind::Other, format!("{}: {}", context, err))
}

async fn connect_store() -> io::Result<Arc<dyn UserStore>> {
    match CONFIG.storage_backend {
        StorageBackend::Memory => {
            warn!("Using in-memory user store; accounts are lost on restart");
            Ok(Arc::new(InMemoryUserRepository::new()))
        }
        StorageBackend::MongoDb => {
            info!("Connecting to MongoDB...");
            let client = Client::with_uri_str(&CONFIG.mongodb_uri)
                .await
                .map_err(|e| io_error("Failed to connect to MongoDB", e))?;
            let db = client.database(&CONFIG.database_name);

            db.run_command(doc! { "ping": 1 })
                .await
                .map_err(|e| io_error("Failed to ping MongoDB", e))?;
            info!("Connected to MongoDB successfully!");

            let repository = UserRepository::new(&db);
            repository
                .create_indexes()
                .await
                .map_err(|e| io_error("Failed to create indexes", e))?;
            Ok(Arc::new(repository))
        }
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Initialize environment variables and logger
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let store = connect_store().await?;

    let auth_service = web::Data::new(AuthService::new(
        store,
        TokenService::from_config(&CONFIG),
        TokenBlacklist::new(),
        CONFIG.bcrypt_cost,
    ));
    // Built once so every worker shares the same rate limit quota
    let settings = RouteSettings::from_config(&CONFIG);
    if !settings.rate_limit {
        warn!("Auth rate limiting is disabled");
    }

    let server_addr = format!("{}:{}", CONFIG.server_host, CONFIG.server_port);
    info!("Starting server at http://{}", server_addr);
    info!(
        "OpenAPI document at http://{}{}/openapi.json",
        server_addr, CONFIG.api_prefix
    );

    HttpServer::new(move || {
        let auth_service = auth_service.clone();
        let settings = settings.clone();
        App::new()
            .wrap(RouteGuard)
            .wrap(Logger::default())
            .configure(move |cfg| routes::configure_routes(cfg, auth_service, &settings))
    })
    .bind(&server_addr)?
    .run()
    .await
}
