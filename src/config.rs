use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8000;

/// Startup configuration, read once from the environment and passed down
/// explicitly instead of living in process-wide globals.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let jwt_secret = std::env::var("JWT_SECRET").context("JWT_SECRET must be set")?;
        let port = match std::env::var("PORT") {
            Ok(port) => port.parse::<u16>().context("PORT must be a valid number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Config {
            database_url,
            port,
            jwt_secret,
        })
    }
}
