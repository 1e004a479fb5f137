//! Auth adapter: login, profile verification, logout.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::client::RestClient;
use crate::domain::auth::{AuthSession, AuthTokens, LoginCredentials};
use crate::domain::ports::{AuthGateway, GatewayResult};
use crate::domain::user::User;

/// Login payload returned by `POST /auth/login`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginDto {
    user: User,
    token: String,
    refresh_token: String,
}

/// [`AuthGateway`] implementation over the REST backend.
#[derive(Debug, Clone)]
pub struct RestAuthGateway {
    client: RestClient,
}

impl RestAuthGateway {
    /// Wrap a shared [`RestClient`].
    #[must_use]
    pub const fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for RestAuthGateway {
    async fn login(&self, credentials: &LoginCredentials) -> GatewayResult<AuthSession> {
        let body = json!({
            "email": credentials.email(),
            "password": credentials.password(),
        });
        let dto: LoginDto = self
            .client
            .post(None, "/auth/login", Some(body))
            .await?
            .into_data()?;
        Ok(AuthSession {
            user: dto.user,
            tokens: AuthTokens {
                token: dto.token,
                refresh_token: dto.refresh_token,
            },
        })
    }

    async fn profile(&self, tokens: &AuthTokens) -> GatewayResult<User> {
        self.client
            .get(Some(&tokens.token), "/auth/profile", &[])
            .await?
            .into_data()
    }

    async fn logout(&self, tokens: &AuthTokens) -> GatewayResult<()> {
        self.client
            .post::<serde_json::Value>(Some(&tokens.token), "/auth/logout", None)
            .await?
            .into_unit()
    }
}
