use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;

use crate::{auth::claims::DataStoredInToken, config::JwtConfig, state::AppState};

/// Name of the session cookie.
pub const AUTH_COOKIE: &str = "Authorization";

/// Signed session token and its lifetime in seconds.
#[derive(Debug, Clone)]
pub struct TokenData {
    pub token: String,
    pub expires_in: u64,
}

#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            ttl_seconds,
        } = &state.config.jwt;
        Self::new(secret, Duration::from_secs(*ttl_seconds))
    }
}

impl JwtKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    /// Signs `{ id, iat, exp }` for the user with HS256.
    pub fn create_token(&self, user_id: i64) -> anyhow::Result<TokenData> {
        let now = OffsetDateTime::now_utc();
        let expires_in = self.ttl.as_secs();
        let exp = now + TimeDuration::seconds(expires_in as i64);
        let claims = DataStoredInToken {
            id: user_id,
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(TokenData { token, expires_in })
    }

    pub fn verify(&self, token: &str) -> anyhow::Result<DataStoredInToken> {
        let data = decode::<DataStoredInToken>(token, &self.decoding, &Validation::default())?;
        debug!(user_id = data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}

pub fn create_cookie(token: &TokenData) -> String {
    format!(
        "{AUTH_COOKIE}={}; HttpOnly; Max-Age={};",
        token.token, token.expires_in
    )
}

/// Cookie that makes the client drop the session.
pub fn clear_cookie() -> String {
    format!("{AUTH_COOKIE}=; Max-age=0")
}
