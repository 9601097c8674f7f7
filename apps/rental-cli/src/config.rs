//! Application configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults. A `.env` file in the working directory is read first, so
//! SMTP credentials can live outside the shell history.
//!
//! | Variable           | Default          |
//! |--------------------|------------------|
//! | `RENTAL_DB_PATH`   | `car_rental.db`  |
//! | `RENTAL_SEED_DEMO` | `true`           |
//! | `BILL_EXPORT_DIR`  | `.`              |
//! | `EMAIL_DRY_RUN`    | `false`          |
//! | `EMAIL_USER`       | unset            |
//! | `EMAIL_PASS`       | unset            |
//! | `SMTP_HOST`        | `smtp.gmail.com` |

use std::env;
use std::fmt;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// SQLite database file
    pub db_path: PathBuf,

    /// Insert demo cars and default accounts on startup
    pub seed_demo: bool,

    /// Where saved bills are written
    pub bill_export_dir: PathBuf,

    /// Outgoing mail settings
    pub email: EmailConfig,
}

/// Outgoing mail settings.
#[derive(Clone)]
pub struct EmailConfig {
    /// Log messages instead of delivering them
    pub dry_run: bool,

    /// SMTP relay host (implicit TLS on port 465)
    pub smtp_host: String,

    /// Sender address and SMTP login
    pub user: Option<String>,

    /// SMTP password
    pub pass: Option<String>,
}

impl fmt::Debug for EmailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmailConfig")
            .field("dry_run", &self.dry_run)
            .field("smtp_host", &self.smtp_host)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `.env` and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env is the normal case
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Ok(AppConfig {
            db_path: non_empty("RENTAL_DB_PATH")
                .unwrap_or_else(|| "car_rental.db".to_string())
                .into(),

            seed_demo: parse_bool("RENTAL_SEED_DEMO", lookup("RENTAL_SEED_DEMO"), true)?,

            bill_export_dir: non_empty("BILL_EXPORT_DIR")
                .unwrap_or_else(|| ".".to_string())
                .into(),

            email: EmailConfig {
                dry_run: parse_bool("EMAIL_DRY_RUN", lookup("EMAIL_DRY_RUN"), false)?,
                smtp_host: non_empty("SMTP_HOST")
                    .unwrap_or_else(|| "smtp.gmail.com".to_string()),
                user: non_empty("EMAIL_USER"),
                pass: non_empty("EMAIL_PASS"),
            },
        })
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> Result<bool, ConfigError> {
    let Some(value) = value else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "" => Ok(default),
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.db_path, PathBuf::from("car_rental.db"));
        assert!(config.seed_demo);
        assert_eq!(config.bill_export_dir, PathBuf::from("."));
        assert!(!config.email.dry_run);
        assert_eq!(config.email.smtp_host, "smtp.gmail.com");
        assert!(config.email.user.is_none());
        assert!(config.email.pass.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("RENTAL_DB_PATH", "/tmp/rental.db"),
            ("RENTAL_SEED_DEMO", "false"),
            ("EMAIL_DRY_RUN", "True"),
            ("EMAIL_USER", "desk@example.com"),
            ("EMAIL_PASS", "secret"),
        ])
        .unwrap();

        assert_eq!(config.db_path, PathBuf::from("/tmp/rental.db"));
        assert!(!config.seed_demo);
        assert!(config.email.dry_run);
        assert_eq!(config.email.user.as_deref(), Some("desk@example.com"));
    }

    #[test]
    fn test_blank_credentials_count_as_missing() {
        let config = config_from(&[("EMAIL_USER", "  "), ("EMAIL_PASS", "")]).unwrap();
        assert!(config.email.user.is_none());
        assert!(config.email.pass.is_none());
    }

    #[test]
    fn test_invalid_bool_is_an_error() {
        let err = config_from(&[("EMAIL_DRY_RUN", "maybe")]).unwrap_err();
        assert_eq!(err.to_string(), "Invalid value for EMAIL_DRY_RUN");
    }

    #[test]
    fn test_password_is_redacted_in_debug() {
        let config = config_from(&[("EMAIL_PASS", "hunter22")]).unwrap();
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("hunter22"));
        assert!(rendered.contains("<redacted>"));
    }
}
