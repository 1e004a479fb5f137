//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix cookie session so handlers only deal with domain
//! operations: persisting a login, reading the stored tokens and account,
//! and purging everything on logout or token expiry.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::auth::{AuthSession, AuthTokens};
use crate::domain::error::Error;
use crate::domain::user::User;

pub(crate) const AUTH_TOKEN_KEY: &str = "auth_token";
pub(crate) const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub(crate) const USER_DATA_KEY: &str = "user_data";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist a fresh login: tokens and the account record together.
    pub fn persist(&self, auth: &AuthSession) -> Result<(), Error> {
        self.insert(AUTH_TOKEN_KEY, &auth.tokens.token)?;
        self.insert(REFRESH_TOKEN_KEY, &auth.tokens.refresh_token)?;
        self.insert(USER_DATA_KEY, &auth.user)
    }

    /// Fetch the stored login, if any. A session holding a token without a
    /// readable account record is treated as absent.
    pub fn auth(&self) -> Result<Option<AuthSession>, Error> {
        let Some(token) = self.get::<String>(AUTH_TOKEN_KEY)? else {
            return Ok(None);
        };
        let refresh_token = self.get::<String>(REFRESH_TOKEN_KEY)?.unwrap_or_default();
        let Some(user) = self.get::<User>(USER_DATA_KEY)? else {
            tracing::warn!("session holds a token without user data, purging");
            self.purge();
            return Ok(None);
        };
        Ok(Some(AuthSession {
            user,
            tokens: AuthTokens {
                token,
                refresh_token,
            },
        }))
    }

    /// Remove everything stored for this operator.
    pub fn purge(&self) {
        self.0.purge();
    }

    fn insert<T: serde::Serialize>(&self, key: &str, value: &T) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        self.0
            .get::<T>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
