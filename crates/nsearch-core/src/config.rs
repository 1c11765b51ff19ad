use crate::app_config::{AppConfig, ReleaseWindowScheme, DEFAULT_BASE_URL};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default; only malformed values are errors.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let base_url = or_default("NSEARCH_BASE_URL", DEFAULT_BASE_URL);
    if base_url.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "NSEARCH_BASE_URL".to_string(),
            reason: "must not be empty".to_string(),
        });
    }

    let log_level = or_default("NSEARCH_LOG_LEVEL", "info");
    let request_timeout_secs = parse_number(
        "NSEARCH_REQUEST_TIMEOUT_SECS",
        &or_default("NSEARCH_REQUEST_TIMEOUT_SECS", "30"),
    )?;
    let user_agent = or_default("NSEARCH_USER_AGENT", "nsearch/0.1 (title-search)");
    let release_window_scheme =
        parse_release_window_scheme(&or_default("NSEARCH_RELEASE_WINDOW_SCHEME", "biannual"))?;
    let max_pages = parse_number("NSEARCH_MAX_PAGES", &or_default("NSEARCH_MAX_PAGES", "50"))?;

    Ok(AppConfig {
        base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        release_window_scheme,
        max_pages,
    })
}

/// Parse an unsigned integer env-var value.
fn parse_number<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr<Err = std::num::ParseIntError>,
{
    raw.trim().parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

/// Parse a string into a `ReleaseWindowScheme` variant (case-insensitive).
fn parse_release_window_scheme(s: &str) -> Result<ReleaseWindowScheme, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "biannual" => Ok(ReleaseWindowScheme::Biannual),
        "quarterly" => Ok(ReleaseWindowScheme::Quarterly),
        other => Err(ConfigError::InvalidEnvVar {
            var: "NSEARCH_RELEASE_WINDOW_SCHEME".to_string(),
            reason: format!("expected 'biannual' or 'quarterly', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
