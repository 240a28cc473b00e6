//! Access guard for admin operations.
//!
//! A single static credential pair protects every mutating `/works`
//! operation. The check is a pluggable [`Authenticator`] capability with
//! one built-in implementation so call sites never change if the scheme
//! does: [`BasicAuthenticator`] decodes the HTTP Basic header and compares
//! both halves in constant time.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::Engine;
use subtle::ConstantTimeEq;

use atelier_core::AppError;

use crate::error::HttpAppError;

/// Credential check for admin requests.
pub trait Authenticator: Send + Sync {
    /// `authorization` is the raw `Authorization` header value, if any.
    /// `Unauthorized` means the header is missing or malformed (the client
    /// should be prompted for credentials); `Forbidden` means the
    /// credentials were presented and do not match.
    fn authenticate(&self, authorization: Option<&str>) -> Result<(), AppError>;
}

pub type DynAuthenticator = Arc<dyn Authenticator>;

fn secure_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// HTTP Basic authentication against the configured admin pair.
pub struct BasicAuthenticator {
    user: String,
    pass: String,
}

impl BasicAuthenticator {
    pub fn new(user: String, pass: String) -> Self {
        Self { user, pass }
    }
}

impl Authenticator for BasicAuthenticator {
    fn authenticate(&self, authorization: Option<&str>) -> Result<(), AppError> {
        let header = authorization
            .ok_or_else(|| AppError::Unauthorized("Missing authorization header".to_string()))?;

        let encoded = header
            .strip_prefix("Basic ")
            .ok_or_else(|| AppError::Unauthorized("Expected Basic authorization".to_string()))?;

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| AppError::Unauthorized("Malformed Basic credentials".to_string()))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| AppError::Unauthorized("Malformed Basic credentials".to_string()))?;

        let (user, pass) = decoded
            .split_once(':')
            .ok_or_else(|| AppError::Unauthorized("Malformed Basic credentials".to_string()))?;

        let user_ok = secure_compare(user, &self.user);
        let pass_ok = secure_compare(pass, &self.pass);
        if user_ok && pass_ok {
            Ok(())
        } else {
            Err(AppError::Forbidden("Invalid admin credentials".to_string()))
        }
    }
}

/// Middleware applied to the admin route subtree. Rejections are produced
/// before any repository or storage call runs.
pub async fn admin_auth_middleware(
    State(authenticator): State<DynAuthenticator>,
    request: Request,
    next: Next,
) -> Response {
    let header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match authenticator.authenticate(header) {
        Ok(()) => next.run(request).await,
        Err(err) => {
            let unauthorized = matches!(err, AppError::Unauthorized(_));
            let mut response = HttpAppError::from(err).into_response();
            if unauthorized {
                // Prompt the client for credentials
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Basic realm=\"Admin\""),
                );
            }
            response
        }
    }
}
