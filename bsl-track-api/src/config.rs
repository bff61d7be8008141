//! Service configuration
//!
//! Settings are read from the environment once at startup (with `.env`
//! support via `dotenv` in the binary) and passed explicitly to the
//! components that need them. There is no runtime reconfiguration.

use std::env;

/// Configuration variables for the BSL Track service
#[derive(Debug, Clone)]
pub struct Settings {
    /// Service name reported by the root endpoint
    pub service_name: String,

    /// Service version reported by the root endpoint
    pub service_version: String,

    /// Path to the SQLite database file
    pub db_path: String,

    /// TCP port the server listens on
    pub port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_name: "bsl-track".to_string(),
            service_version: "1.0".to_string(),
            db_path: "data/bsl_track.db".to_string(),
            port: 3000,
        }
    }
}

impl Settings {
    /// Build the settings from environment variables, falling back to the
    /// defaults for anything unset
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            service_name: env::var("SERVICE_NAME").unwrap_or(defaults.service_name),
            service_version: env::var("SERVICE_VERSION").unwrap_or(defaults.service_version),
            db_path: env::var("DB_PATH").unwrap_or(defaults.db_path),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(defaults.port),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.service_name, "bsl-track");
        assert_eq!(settings.service_version, "1.0");
        assert_eq!(settings.db_path, "data/bsl_track.db");
        assert_eq!(settings.port, 3000);
    }
}
