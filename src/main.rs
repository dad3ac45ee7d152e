use std::net::TcpListener;
use std::sync::Arc;

use jokes_auth::configuration::get_configuration;
use jokes_auth::startup::run;
use jokes_auth::store::{InMemoryUserStore, PgUserStore, UserStore};
use jokes_auth::telemetry::init_telemetry;
use sqlx::postgres::PgPoolOptions;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    tracing::info!("Starting application");

    let configuration = match get_configuration() {
        Ok(config) => {
            tracing::info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            tracing::error!("Failed to read configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "Configuration error",
            ));
        }
    };

    if configuration.auth.uses_default_secret() {
        tracing::warn!("JWT_SECRET is not set; signing tokens with the insecure development default");
    }

    let store: Arc<dyn UserStore> = match &configuration.database {
        Some(database) => {
            tracing::info!("Attempting to connect to database");
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(&database.connection_string())
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create connection pool: {}", e);
                    std::io::Error::new(
                        std::io::ErrorKind::ConnectionRefused,
                        "Database connection error",
                    )
                })?;

            let store = PgUserStore::new(pool);
            store.migrate().await.map_err(|e| {
                tracing::error!("Failed to migrate database: {}", e);
                std::io::Error::new(std::io::ErrorKind::Other, "Database migration error")
            })?;
            tracing::info!("Database connection pool created successfully");
            Arc::new(store)
        }
        None => {
            tracing::warn!("No database configured; users are kept in memory");
            Arc::new(InMemoryUserStore::new())
        }
    };

    let address = configuration.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Server listening on: {}", address);

    let server = run(listener, store, configuration.auth.clone())?;
    server.await
}
