/// Token Guard Middleware
///
/// Reads the session token from the `Authorization` header, validates it and
/// injects the claims into request extensions for downstream handlers.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use std::rc::Rc;

use crate::auth::validate_token;
use crate::configuration::AuthSettings;
use crate::error::{AppError, AuthError};

/// Guard for protected routes
///
/// The header carries the raw token; a `Bearer ` prefix is accepted too.
pub struct TokenGuard {
    settings: AuthSettings,
}

impl TokenGuard {
    pub fn new(settings: AuthSettings) -> Self {
        Self { settings }
    }
}

impl<S, B> Transform<S, ServiceRequest> for TokenGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TokenGuardService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(TokenGuardService {
            service: Rc::new(service),
            settings: self.settings.clone(),
        }))
    }
}

pub struct TokenGuardService<S> {
    service: Rc<S>,
    settings: AuthSettings,
}

/// Token carried by the request, if any. A present but unreadable header
/// yields `Some("")`, which then fails validation.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?;
    if value.is_empty() {
        return None;
    }

    let token = value.to_str().unwrap_or_default().trim();
    let token = token.strip_prefix("Bearer ").unwrap_or(token);
    Some(token.to_string())
}

/// Check a request against the guard's state machine
fn authorize(req: &ServiceRequest, settings: &AuthSettings) -> Result<(), AuthError> {
    let token = extract_token(req).ok_or(AuthError::MissingToken)?;
    let claims = validate_token(&token, settings)?;

    tracing::debug!(
        user_id = claims.subject,
        username = %claims.username,
        "Token validated successfully"
    );
    req.extensions_mut().insert(claims);
    Ok(())
}

impl<S, B> Service<ServiceRequest> for TokenGuardService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authorize(&req, &self.settings) {
            Ok(()) => {
                let service = self.service.clone();
                Box::pin(async move { service.call(req).await })
            }
            Err(e) => {
                tracing::warn!(path = %req.path(), error = %e, "Request rejected by token guard");
                Box::pin(async move { Err(AppError::from(e).into()) })
            }
        }
    }
}
