//! Service configuration

use chrono_tz::Tz;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Timezone business dates are interpreted in
    pub business_timezone: Tz,
    /// Upper bound on pooled Postgres connections
    pub db_max_connections: u32,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self, BoxError> {
        let http_port = match get("HTTP_PORT") {
            Some(p) => p
                .parse()
                .map_err(|_| format!("HTTP_PORT is not a valid port: {p}"))?,
            None => 8080,
        };

        let business_timezone = match get("BUSINESS_TIMEZONE") {
            Some(tz) => tz
                .parse::<Tz>()
                .map_err(|_| format!("BUSINESS_TIMEZONE is not a known IANA zone: {tz}"))?,
            None => chrono_tz::Europe::Madrid,
        };

        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(n) => n
                .parse()
                .map_err(|_| format!("DB_MAX_CONNECTIONS is not a number: {n}"))?,
            None => 10,
        };

        Ok(Self {
            database_url: get("DATABASE_URL").ok_or("DATABASE_URL must be set")?,
            http_port,
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".into()),
            business_timezone,
            db_max_connections,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, BoxError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[("DATABASE_URL", "postgres://localhost/laundry")]).unwrap();
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.environment, "development");
        assert_eq!(config.business_timezone, chrono_tz::Europe::Madrid);
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn test_database_url_required() {
        let err = load(&[]).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("DATABASE_URL", "postgres://db/laundry"),
            ("HTTP_PORT", "9000"),
            ("ENVIRONMENT", "production"),
            ("BUSINESS_TIMEZONE", "America/Mexico_City"),
            ("DB_MAX_CONNECTIONS", "4"),
        ])
        .unwrap();
        assert_eq!(config.http_port, 9000);
        assert_eq!(config.environment, "production");
        assert_eq!(config.business_timezone, chrono_tz::America::Mexico_City);
        assert_eq!(config.db_max_connections, 4);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let base = ("DATABASE_URL", "postgres://db/laundry");
        assert!(load(&[base, ("HTTP_PORT", "http")]).is_err());
        assert!(load(&[base, ("BUSINESS_TIMEZONE", "Mars/Olympus")]).is_err());
        assert!(load(&[base, ("DB_MAX_CONNECTIONS", "-1")]).is_err());
    }
}
