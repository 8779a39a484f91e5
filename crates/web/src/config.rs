use anyhow::{Context, Result};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const DEFAULT_DATABASE_URL: &str = "sqlite://wipr.db";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:3001";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub cors_allowed_origins: Vec<String>,
    pub seed: SeedConfig,
}

/// Demo user inserted into an empty store at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedConfig {
    pub enabled: bool,
    pub name: String,
    pub role: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port.parse().context("PORT must be a number")?,
            None => DEFAULT_PORT,
        };

        let enabled = match lookup("SEED_DEFAULT_USER") {
            Some(flag) => flag
                .trim()
                .parse()
                .context("SEED_DEFAULT_USER must be true or false")?,
            None => true,
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            cors_allowed_origins: parse_origins(
                &lookup("CORS_ALLOWED_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            seed: SeedConfig {
                enabled,
                name: lookup("SEED_USER_NAME").unwrap_or_else(|| "Ash".to_string()),
                role: lookup("SEED_USER_ROLE").unwrap_or_else(|| "Lead Engineer".to_string()),
            },
        })
    }
}

fn parse_origins(origins: &str) -> Vec<String> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
