//! Signed session cookie.
//!
//! The session holds at most one value, the username of the logged in user,
//! carried as an HS256 JWT in an HTTP-only cookie. No server side storage.

use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, IntoResponseParts, Redirect, Response, ResponseParts},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{config::SessionConfig, flash, routes::AppState};

pub const SESSION_COOKIE_NAME: &str = "session";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    sub: String,
    iat: u64,
    exp: u64,
}

pub fn generate_token(config: &SessionConfig, username: &str) -> anyhow::Result<String> {
    let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
    let claims = Claims {
        sub: username.to_owned(),
        iat: now,
        exp: now + config.lifetime_seconds,
    };

    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;

    Ok(token)
}

/// Returns the username carried by `token`, `None` when the signature or
/// expiry check fails.
pub fn validate_token(config: &SessionConfig, token: &str) -> Option<String> {
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => Some(data.claims.sub),
        Err(e) => {
            tracing::debug!(err = %e, "ignoring invalid session token");
            None
        }
    }
}

/// Request scoped session state.
///
/// Mutations return the updated session, which must be part of the response
/// for the cookie change to reach the browser.
pub struct Session {
    jar: CookieJar,
    config: SessionConfig,
    current_user: Option<String>,
}

impl Session {
    pub fn from_jar(jar: CookieJar, config: SessionConfig) -> Self {
        let current_user = jar
            .get(SESSION_COOKIE_NAME)
            .and_then(|cookie| validate_token(&config, cookie.value()));

        Self {
            jar,
            config,
            current_user,
        }
    }

    /// Username of the logged in user, `None` means anonymous.
    pub fn get(&self) -> Option<&str> {
        self.current_user.as_deref()
    }

    pub fn set(self, username: impl Into<String>) -> anyhow::Result<Self> {
        let username = username.into();
        let token = generate_token(&self.config, &username)?;
        let cookie = Cookie::build((SESSION_COOKIE_NAME, token))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Strict)
            .build();

        Ok(Self {
            jar: self.jar.add(cookie),
            config: self.config,
            current_user: Some(username),
        })
    }

    /// Drops the association. Clearing an anonymous session is a no-op.
    pub fn clear(self) -> Self {
        let jar = match self.jar.get(SESSION_COOKIE_NAME) {
            Some(_) => self
                .jar
                .remove(Cookie::build(SESSION_COOKIE_NAME).path("/").build()),
            None => self.jar,
        };

        Self {
            jar,
            config: self.config,
            current_user: None,
        }
    }

    pub fn into_jar(self) -> CookieJar {
        self.jar
    }
}

impl FromRequestParts<AppState> for Session {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        Ok(Session::from_jar(jar, state.config.session.clone()))
    }
}

impl IntoResponseParts for Session {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        self.jar.into_response_parts(res)
    }
}

/// Extractor for handlers reserved to logged in users.
///
/// Anonymous requests never reach the handler, they are redirected to the
/// login page with a flash prompt.
pub struct AuthUser(pub String);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Ok(session) = Session::from_request_parts(parts, state).await;

        match session.get() {
            Some(username) => Ok(AuthUser(username.to_owned())),
            None => {
                tracing::warn!(path = %parts.uri.path(), "anonymous access to a protected page");

                let jar = flash::push(CookieJar::from_headers(&parts.headers), "Please Log In");

                Err((jar, Redirect::to("/login")).into_response())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> SessionConfig {
        SessionConfig {
            secret: "test_secret_key_minimum_32_characters_long".to_owned(),
            lifetime_seconds: 3600,
        }
    }

    fn jar_with_token(token: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(SESSION_COOKIE_NAME, token.to_owned()))
    }

    #[test]
    fn empty_jar_is_anonymous() {
        let session = Session::from_jar(CookieJar::new(), config());
        assert_eq!(session.get(), None);
    }

    #[test]
    fn set_then_read_back() -> anyhow::Result<()> {
        let session = Session::from_jar(CookieJar::new(), config()).set("chef1")?;
        assert_eq!(session.get(), Some("chef1"));

        let jar = session.into_jar();
        let token = jar.get(SESSION_COOKIE_NAME).unwrap().value().to_owned();
        let next_request = Session::from_jar(jar_with_token(&token), config());
        assert_eq!(next_request.get(), Some("chef1"));

        Ok(())
    }

    #[test]
    fn token_signed_with_other_secret_is_anonymous() -> anyhow::Result<()> {
        let other = SessionConfig {
            secret: "another_secret_key_minimum_32_characters".to_owned(),
            lifetime_seconds: 3600,
        };
        let token = generate_token(&other, "chef1")?;

        assert_eq!(Session::from_jar(jar_with_token(&token), config()).get(), None);

        Ok(())
    }

    #[test]
    fn tampered_token_is_anonymous() -> anyhow::Result<()> {
        let token = generate_token(&config(), "chef1")?;
        let tampered = format!("{token}x");

        assert_eq!(validate_token(&config(), &tampered), None);

        Ok(())
    }

    #[test]
    fn expired_token_is_anonymous() -> anyhow::Result<()> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let claims = Claims {
            sub: "chef1".to_owned(),
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config().secret.as_bytes()),
        )?;

        assert_eq!(validate_token(&config(), &token), None);

        Ok(())
    }

    #[test]
    fn clear_is_idempotent() -> anyhow::Result<()> {
        let session = Session::from_jar(CookieJar::new(), config()).set("chef1")?;
        let session = session.clear();
        assert_eq!(session.get(), None);

        let session = session.clear();
        assert_eq!(session.get(), None);

        let never_logged_in = Session::from_jar(CookieJar::new(), config()).clear();
        assert_eq!(never_logged_in.get(), None);

        Ok(())
    }
}
