/// Authentication Routes
///
/// Thin HTTP adapters over `CredentialService`.

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};

use crate::auth::{CredentialService, Credentials};
use crate::error::{AppError, ValidationError};

/// POST /api/auth/register
///
/// # Errors
/// - 400: username or password missing, or username taken
/// - 500: store or hashing failure
pub async fn register(
    form: web::Json<Credentials>,
    service: web::Data<CredentialService>,
) -> Result<HttpResponse, AppError> {
    let user = service.register(form.into_inner()).await?;
    Ok(HttpResponse::Created().json(user))
}

/// POST /api/auth/login
///
/// # Errors
/// - 400: username or password missing
/// - 401: unknown username or wrong password (same response for both)
/// - 500: store or verification failure
pub async fn login(
    form: web::Json<Credentials>,
    service: web::Data<CredentialService>,
) -> Result<HttpResponse, AppError> {
    let response = service.login(form.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// An unreadable body is treated like one without credentials.
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(path = %req.path(), error = %err, "Rejected credentials payload");
    AppError::from(ValidationError::MissingCredentials).into()
}
