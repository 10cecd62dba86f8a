/// JWT authentication middleware for Bearer token validation
/// Extracts user_id from JWT claims and adds it to request extensions
use actix_web::{
    dev::{forward_ready, Payload, Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use std::rc::Rc;
use uuid::Uuid;

use crate::security::jwt;

/// User ID extracted from JWT claims
#[derive(Debug, Clone)]
pub struct UserId(pub Uuid);

/// Pull the Bearer token out of the Authorization header and resolve it to
/// a user id. Only access tokens are accepted here; refresh tokens are
/// valid solely at the token refresh endpoint.
fn authenticate(auth_header: Option<&actix_web::http::header::HeaderValue>) -> Result<Uuid, Error> {
    let auth_header = match auth_header {
        Some(header) => header
            .to_str()
            .map_err(|_| ErrorUnauthorized("Invalid Authorization header"))?,
        None => return Err(ErrorUnauthorized("Missing Authorization header")),
    };

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ErrorUnauthorized("Invalid Authorization scheme, expected Bearer"))?;

    let token_data = jwt::validate_token(token).map_err(|e| {
        tracing::debug!("Token validation failed: {}", e);
        ErrorUnauthorized("Invalid or expired token")
    })?;

    if token_data.claims.token_type != "access" {
        return Err(ErrorUnauthorized("Access token required"));
    }

    Uuid::parse_str(&token_data.claims.sub)
        .map_err(|_| ErrorUnauthorized("Invalid user ID in token"))
}

/// JWT authentication middleware factory
pub struct JwtAuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for JwtAuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddlewareService<S>;
    type Future = std::future::Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        std::future::ready(Ok(JwtAuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddlewareService<S>
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
        let service = self.service.clone();

        Box::pin(async move {
            // Resolve the token before taking any mutable borrow of the
            // request; extensions_mut() must not overlap with header access.
            let user_id = authenticate(req.headers().get("Authorization"))?;

            req.extensions_mut().insert(UserId(user_id));

            let res = service.call(req).await?;
            Ok(res)
        })
    }
}

impl FromRequest for UserId {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        // Routes wrapped in JwtAuthMiddleware already carry the extension;
        // on mixed public/authenticated scopes the extractor authenticates
        // the request itself.
        if let Some(user_id) = req.extensions().get::<UserId>().cloned() {
            return ready(Ok(user_id));
        }

        ready(authenticate(req.headers().get("Authorization")).map(UserId))
    }
}
