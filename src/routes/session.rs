use crate::error::AppError;
use crate::routes::AppState;
use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use std::future::{ready, Ready};

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "friendly_session";

/// Header carrying the anti-forgery token on mutating requests
pub const CSRF_HEADER: &str = "X-Csrf-Token";

/// An authenticated session, extracted from the session cookie
///
/// Carries only the username and the session's anti-forgery token; the
/// profile itself is looked up per request. Handlers that mutate state must
/// call `require_csrf` before acting.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    csrf: String,
}

impl Session {
    /// Check the anti-forgery header against the session's CSRF token
    pub fn require_csrf(&self, req: &HttpRequest) -> Result<(), AppError> {
        let presented = req
            .headers()
            .get(CSRF_HEADER)
            .and_then(|value| value.to_str().ok());

        match presented {
            Some(token) if token == self.csrf => Ok(()),
            _ => {
                tracing::info!("CSRF check failed for {} on {}", self.username, req.path());
                Err(AppError::Authorization)
            }
        }
    }

    /// Require that the session belongs to the given username
    pub fn require_self(&self, username: &str) -> Result<(), AppError> {
        if self.username == username {
            Ok(())
        } else {
            tracing::info!(
                "{} attempted to access a page belonging to {}",
                self.username,
                username
            );
            Err(AppError::Authorization)
        }
    }

    #[cfg(test)]
    pub fn for_testing(username: &str, csrf: &str) -> Self {
        Self {
            username: username.to_string(),
            csrf: csrf.to_string(),
        }
    }
}

impl FromRequest for Session {
    type Error = AppError;
    type Future = Ready<Result<Self, AppError>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_session(req))
    }
}

fn extract_session(req: &HttpRequest) -> Result<Session, AppError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AppError::Authorization)?;

    let cookie = req.cookie(SESSION_COOKIE).ok_or(AppError::Authorization)?;

    let claims = state
        .sessions
        .verify(cookie.value())
        .map_err(|_| AppError::Authorization)?;

    Ok(Session {
        username: claims.sub,
        csrf: claims.csrf,
    })
}
