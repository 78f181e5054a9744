use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::TokenError;
use crate::error::AppError;

/// The authenticated caller of a protected request.
///
/// `AuthMiddleware` produces exactly one `Caller` per request after the bearer token
/// has been verified. Handlers take it as an argument, so every task operation
/// receives the owner identity explicitly instead of digging it out of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller(pub Uuid);

impl Caller {
    pub fn user_id(&self) -> Uuid {
        self.0
    }
}

impl FromRequest for Caller {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Caller>().copied() {
            Some(caller) => ready(Ok(caller)),
            None => {
                // Handler mounted outside the guarded scope. Fail closed.
                log::error!("no caller resolved for {}; is AuthMiddleware mounted?", req.path());
                ready(Err(AppError::Unauthorized(TokenError::Missing).into()))
            }
        }
    }
}
