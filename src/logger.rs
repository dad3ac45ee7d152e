use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, HttpMessage,
};
use futures::future::LocalBoxFuture;
use log::{info, warn};
use std::rc::Rc;
use std::time::Instant;

use crate::auth::Claims;

/// Access log middleware
///
/// Logs method, path, query string, status and latency for every request, plus the acting
/// user when the token guard admitted the request.
pub struct LoggerMiddleware;

impl<S, B> Transform<S, ServiceRequest> for LoggerMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = LoggerMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(LoggerMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// `METHOD path[?query]`
fn request_line(req: &ServiceRequest) -> String {
    let query = req.query_string();
    if query.is_empty() {
        format!("{} {}", req.method(), req.path())
    } else {
        format!("{} {}?{}", req.method(), req.path(), query)
    }
}

pub struct LoggerMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for LoggerMiddlewareService<S>
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
        let start_time = Instant::now();
        let line = request_line(&req);
        info!("Request started: {}", line);

        let service = self.service.clone();

        Box::pin(async move {
            let res = match service.call(req).await {
                Ok(res) => res,
                Err(e) => {
                    // Guard rejections surface here as errors, before a response exists
                    warn!(
                        "Request failed: {} - Status: {} ({}ms)",
                        line,
                        e.as_response_error().status_code().as_u16(),
                        start_time.elapsed().as_millis()
                    );
                    return Err(e);
                }
            };

            let user = res
                .request()
                .extensions()
                .get::<Claims>()
                .map(|claims| claims.subject.to_string())
                .unwrap_or_else(|| "-".to_string());

            info!(
                "Request completed: {} - Status: {} - User: {} ({}ms)",
                line,
                res.status().as_u16(),
                user,
                start_time.elapsed().as_millis()
            );

            Ok(res)
        })
    }
}
