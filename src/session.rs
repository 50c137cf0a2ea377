use std::{convert::Infallible, sync::Arc};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{error::ApiError, AppState};

pub const SESSION_COOKIE: &str = "token";

const SESSION_WEEKS: i64 = 4;

#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Username of the authenticated caller.
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Builds the session cookie for a freshly authenticated user.
pub fn issue(username: &str, secret: &str) -> Result<Cookie<'static>, ApiError> {
    let now = chrono::Utc::now();
    let claims = TokenClaims {
        sub: username.to_owned(),
        iat: now.timestamp() as usize,
        exp: (now + chrono::Duration::weeks(SESSION_WEEKS)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .max_age(time::Duration::weeks(SESSION_WEEKS))
        .same_site(SameSite::Lax)
        .http_only(true)
        .finish())
}

/// Expires the session cookie. Safe to send whether or not a session exists.
pub fn clear() -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, "")
        .path("/")
        .max_age(time::Duration::hours(-1))
        .same_site(SameSite::Lax)
        .http_only(true)
        .finish()
}

/// The caller's identity for this request: `Some(username)` when a valid
/// session cookie is present, `None` for anonymous callers. Extraction never
/// rejects the request; unauthenticated callers reach the handler and are
/// redirected by the authorization check there.
pub struct Session(Option<String>);

impl Session {
    pub fn anonymous() -> Self {
        Session(None)
    }

    pub fn authenticated(username: impl Into<String>) -> Self {
        Session(Some(username.into()))
    }

    pub fn username(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The ownership rule: passes iff the caller is authenticated as exactly
    /// the owning user.
    pub fn authorize(&self, owner: &str) -> Result<&str, ApiError> {
        match self.0.as_deref() {
            Some(username) if username == owner => Ok(username),
            _ => Err(ApiError::Unauthorized),
        }
    }
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for Session {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = match CookieJar::from_request_parts(parts, state).await {
            Ok(jar) => jar,
            Err(never) => match never {},
        };

        let username = jar.get(SESSION_COOKIE).and_then(|cookie| {
            decode::<TokenClaims>(
                cookie.value(),
                &DecodingKey::from_secret(state.secret.as_bytes()),
                &Validation::default(),
            )
            .ok()
            .map(|data| data.claims.sub)
        });

        Ok(Session(username))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_cookie_decodes_to_the_same_user() {
        let cookie = issue("alice", SECRET).unwrap();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert!(cookie.http_only().unwrap());

        let data = decode::<TokenClaims>(
            cookie.value(),
            &DecodingKey::from_secret(SECRET.as_bytes()),
            &Validation::default(),
        )
        .unwrap();
        assert_eq!(data.claims.sub, "alice");
        assert!(data.claims.exp > data.claims.iat);
    }

    #[test]
    fn token_does_not_decode_with_another_secret() {
        let cookie = issue("alice", SECRET).unwrap();
        let result = decode::<TokenClaims>(
            cookie.value(),
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear();
        assert_eq!(cookie.name(), SESSION_COOKIE);
        assert_eq!(cookie.value(), "");
        assert!(cookie.max_age().unwrap().is_negative());
    }

    #[test]
    fn owner_is_authorized() {
        let session = Session::authenticated("alice");
        assert_eq!(session.authorize("alice").unwrap(), "alice");
    }

    #[test]
    fn other_user_is_not_authorized() {
        let session = Session::authenticated("bob");
        assert!(matches!(
            session.authorize("alice"),
            Err(ApiError::Unauthorized)
        ));
    }

    #[test]
    fn anonymous_is_not_authorized() {
        let session = Session::anonymous();
        assert!(matches!(
            session.authorize("alice"),
            Err(ApiError::Unauthorized)
        ));
    }
}
