use crate::app_config::{AppConfig, Environment};
use crate::settings::Settings;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds an invalid value.
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
/// Returns `ConfigError` if a variable holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Settings variables are optional: missing ones stay blank and simply make
/// [`Settings::is_valid`] return `false`, which disables quoting and
/// delivery actions without failing startup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let env = parse_environment(&or_default("UPTOGO_ENV", "production"))?;

    let api_base_url = or_default("UPTOGO_API_BASE_URL", env.api_base_url());
    let app_base_url = or_default("UPTOGO_APP_BASE_URL", env.app_base_url());
    let log_level = or_default("UPTOGO_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("UPTOGO_REQUEST_TIMEOUT_SECS", "30")?;

    let settings = Settings {
        api_key: or_default("UPTOGO_API_KEY", ""),
        store_id: or_default("UPTOGO_STORE_ID", ""),
        store_location: or_default("UPTOGO_STORE_LOCATION", ""),
    };

    Ok(AppConfig {
        env,
        api_base_url,
        app_base_url,
        log_level,
        request_timeout_secs,
        settings,
    })
}

/// Parse a string into an `Environment` variant.
///
/// `dev` is accepted as an alias for `development`.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "dev" | "development" => Ok(Environment::Development),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "UPTOGO_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
