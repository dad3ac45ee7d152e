use actix_web::dev::Server;
use actix_web::{middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;
use std::sync::Arc;

use crate::auth::CredentialService;
use crate::configuration::AuthSettings;
use crate::logger::LoggerMiddleware;
use crate::middleware::TokenGuard;
use crate::routes::{get_jokes, health_check, json_error_handler, login, register};
use crate::store::UserStore;

pub fn run(
    listener: TcpListener,
    store: Arc<dyn UserStore>,
    auth_settings: AuthSettings,
) -> Result<Server, std::io::Error> {
    let credential_service = web::Data::new(CredentialService::new(store, auth_settings.clone()));

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(credential_service.clone())
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))

            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .route("/auth/register", web::post().to(register))
                    .route("/auth/login", web::post().to(login))
                    // Protected routes
                    .service(
                        web::scope("/jokes")
                            .wrap(TokenGuard::new(auth_settings.clone()))
                            .route("", web::get().to(get_jokes)),
                    ),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
