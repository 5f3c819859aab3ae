use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every setting has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Free screenings allowed per calendar day.
    pub free_limit_per_day: u32,
    /// Largest accepted resume upload, in megabytes.
    pub max_upload_mb: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            free_limit_per_day: 5,
            max_upload_mb: 5.0,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let max_upload_mb = parse_env("DEMO_MAX_MB", defaults.max_upload_mb)?;
        anyhow::ensure!(
            max_upload_mb.is_finite() && max_upload_mb > 0.0,
            "DEMO_MAX_MB must be a positive number"
        );

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            free_limit_per_day: parse_env("FREE_LIMIT_PER_DAY", defaults.free_limit_per_day)?,
            max_upload_mb,
        })
    }

    pub fn max_upload_bytes(&self) -> usize {
        (self.max_upload_mb * 1024.0 * 1024.0) as usize
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid {}", std::any::type_name::<T>())),
        Err(_) => Ok(default),
    }
}
