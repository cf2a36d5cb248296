use crate::app_config::{AppConfig, Environment};
use crate::geo::LatLng;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var).map_err(|_| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        let value = raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("{raw} is not a finite number"),
            })
        }
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let positive = |var: &str, value: f64| -> Result<f64, ConfigError> {
        if value > 0.0 {
            Ok(value)
        } else {
            Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("must be greater than zero, got {value}"),
            })
        }
    };

    let api_base_url = require("SERVICEPRO_API_BASE_URL")?;

    let env = parse_environment(&or_default("SERVICEPRO_ENV", "development"));
    let log_level = or_default("SERVICEPRO_LOG_LEVEL", "info");
    let routing_base_url = or_default(
        "SERVICEPRO_ROUTING_BASE_URL",
        "https://router.project-osrm.org",
    );

    let center_lat = parse_f64("SERVICEPRO_MAP_CENTER_LAT", "31.4880")?;
    let center_lng = parse_f64("SERVICEPRO_MAP_CENTER_LNG", "74.3430")?;
    let map_center =
        LatLng::try_new(center_lat, center_lng).map_err(|reason| ConfigError::InvalidEnvVar {
            var: "SERVICEPRO_MAP_CENTER_LAT/SERVICEPRO_MAP_CENTER_LNG".to_string(),
            reason,
        })?;

    let max_allowed_radius_km = positive(
        "SERVICEPRO_MAX_ALLOWED_RADIUS_KM",
        parse_f64("SERVICEPRO_MAX_ALLOWED_RADIUS_KM", "2.5")?,
    )?;
    let default_radius_km = positive(
        "SERVICEPRO_DEFAULT_RADIUS_KM",
        parse_f64("SERVICEPRO_DEFAULT_RADIUS_KM", "1")?,
    )?;

    let request_timeout_secs = parse_u64("SERVICEPRO_REQUEST_TIMEOUT_SECS", "10")?;
    let user_agent = or_default("SERVICEPRO_USER_AGENT", "servicepro/0.1 (directory)");
    let session_path = PathBuf::from(or_default(
        "SERVICEPRO_SESSION_PATH",
        "./.servicepro-session.json",
    ));

    Ok(AppConfig {
        api_base_url,
        env,
        log_level,
        routing_base_url,
        map_center,
        max_allowed_radius_km,
        default_radius_km,
        request_timeout_secs,
        user_agent,
        session_path,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
