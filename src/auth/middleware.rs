use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{HeaderValue, AUTHORIZATION},
    Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};
use lazy_static::lazy_static;
use regex::Regex;
use std::rc::Rc;

use crate::auth::extractors::Caller;
use crate::auth::token::{TokenError, TokenKeys};
use crate::error::AppError;

lazy_static! {
    // Auth scheme is case-insensitive; the credential is a single token68 run
    static ref BEARER_RE: Regex = Regex::new(r"^(?i:bearer)[ \t]+(\S+)[ \t]*$").unwrap();
}

/// Pulls the token out of an `Authorization` header value.
pub fn bearer_token(value: &str) -> Result<&str, TokenError> {
    BEARER_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .ok_or(TokenError::Malformed)
}

/// The authorization check itself: header plus signing keys in, caller identity or
/// the reason for rejection out. The token subject is trusted as the caller; the
/// user record is not re-read.
pub fn authenticate(header: Option<&HeaderValue>, keys: &TokenKeys) -> Result<Caller, TokenError> {
    let value = header
        .ok_or(TokenError::Missing)?
        .to_str()
        .map_err(|_| TokenError::Malformed)?;
    let claims = keys.verify(bearer_token(value)?)?;
    Ok(Caller(claims.sub))
}

/// Guards a scope: requests without a valid bearer token are answered with 401
/// before any wrapped handler runs.
pub struct AuthMiddleware {
    keys: Rc<TokenKeys>,
}

impl AuthMiddleware {
    pub fn new(keys: TokenKeys) -> Self {
        Self {
            keys: Rc::new(keys),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service,
            keys: Rc::clone(&self.keys),
        }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
    keys: Rc<TokenKeys>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(req.headers().get(AUTHORIZATION), &self.keys) {
            Ok(caller) => {
                req.extensions_mut().insert(caller);
                let fut = self.service.call(req);
                Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
            }
            Err(kind) => {
                log::warn!("rejected {} {}: {:?}", req.method(), req.path(), kind);
                let response = AppError::Unauthorized(kind).error_response();
                Box::pin(async move { Ok(req.into_response(response).map_into_right_body()) })
            }
        }
    }
}
