use serde::Deserialize;

/// Session token lifetime used when `TOKEN_TTL_SECONDS` is unset.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub ttl_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt: JwtConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")?;
        let jwt = JwtConfig {
            secret: std::env::var("SECRET_KEY")?,
            ttl_seconds: std::env::var("TOKEN_TTL_SECONDS")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(DEFAULT_TOKEN_TTL_SECONDS),
        };
        if jwt.secret.is_empty() {
            anyhow::bail!("SECRET_KEY must not be empty");
        }
        Ok(Self { database_url, jwt })
    }
}
