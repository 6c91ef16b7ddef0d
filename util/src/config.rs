//! Global application configuration manager.
//!
//! `AppConfig` is a lazily initialized, globally accessible singleton containing
//! runtime configuration values loaded from environment variables. It provides
//! thread-safe access and mutation for testing or overrides in runtime environments.

use crate::judge_settings::{
    JudgeSettings, default_abs_tol, default_rel_tol, default_time_limit_seconds,
};
use std::env;
use std::str::FromStr;
use std::sync::{OnceLock, RwLock};

/// Represents the complete application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub host: String,
    pub port: u16,
    pub judge_time_limit_seconds: f64,
    pub judge_abs_tol: f64,
    pub judge_rel_tol: f64,
    pub max_concurrent_judgements: usize,
}

/// Lazily-initialized, thread-safe singleton instance of `AppConfig`.
static CONFIG_INSTANCE: OnceLock<RwLock<AppConfig>> = OnceLock::new();

/// Parses an optional environment variable, falling back to `default` when it is unset
/// or malformed. Malformed values are reported rather than silently swallowed.
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "ignoring malformed configuration value");
            default
        }),
        Err(_) => default,
    }
}

impl AppConfig {
    /// Loads the configuration from `.env` and environment variables.
    ///
    /// Every key is optional; unset or malformed values use the documented defaults.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            env: env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
            project_name: env::var("PROJECT_NAME").unwrap_or_else(|_| "numeric-judge".into()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info,judge=info,tasks=info".into()),
            log_file: env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into()),
            log_to_stdout: env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true",
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into()),
            port: parse_var("PORT", 3000),
            judge_time_limit_seconds: parse_var(
                "JUDGE_TIME_LIMIT_SECONDS",
                default_time_limit_seconds(),
            ),
            judge_abs_tol: parse_var("JUDGE_ABS_TOL", default_abs_tol()),
            judge_rel_tol: parse_var("JUDGE_REL_TOL", default_rel_tol()),
            max_concurrent_judgements: parse_var("MAX_CONCURRENT_JUDGEMENTS", 4usize).max(1),
        }
    }

    /// Returns a shared reference to the global configuration.
    ///
    /// # Panics
    /// Panics if the lock cannot be acquired.
    pub fn global() -> std::sync::RwLockReadGuard<'static, AppConfig> {
        CONFIG_INSTANCE
            .get_or_init(|| RwLock::new(AppConfig::from_env()))
            .read()
            .expect("Failed to acquire AppConfig read lock")
    }

    /// Resets the configuration by reloading from environment variables.
    ///
    /// Useful in tests to clear overrides.
    pub fn reset() {
        if let Some(lock) = CONFIG_INSTANCE.get() {
            let mut guard = lock
                .write()
                .expect("Failed to acquire AppConfig write lock");
            *guard = AppConfig::from_env();
        }
    }

    /// The judge settings described by this configuration.
    pub fn judge_settings(&self) -> JudgeSettings {
        JudgeSettings {
            time_limit_seconds: self.judge_time_limit_seconds,
            abs_tol: self.judge_abs_tol,
            rel_tol: self.judge_rel_tol,
        }
    }

    /// Generic internal setter for any field in the config.
    ///
    /// Used by public per-field setter methods.
    fn set_field<F>(setter: F)
    where
        F: FnOnce(&mut AppConfig),
    {
        let lock = CONFIG_INSTANCE.get_or_init(|| RwLock::new(AppConfig::from_env()));
        let mut guard = lock
            .write()
            .expect("Failed to acquire AppConfig write lock");
        setter(&mut guard);
    }

    // --- Per-field setters below ---

    /// Override `env` value.
    pub fn set_env(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.env = value.into());
    }

    pub fn set_log_level(value: impl Into<String>) {
        AppConfig::set_field(|cfg| cfg.log_level = value.into());
    }

    pub fn set_log_to_stdout(value: bool) {
        AppConfig::set_field(|cfg| cfg.log_to_stdout = value);
    }

    pub fn set_port(value: u16) {
        AppConfig::set_field(|cfg| cfg.port = value);
    }

    pub fn set_judge_time_limit_seconds(value: f64) {
        AppConfig::set_field(|cfg| cfg.judge_time_limit_seconds = value);
    }

    pub fn set_judge_tolerances(abs_tol: f64, rel_tol: f64) {
        AppConfig::set_field(|cfg| {
            cfg.judge_abs_tol = abs_tol;
            cfg.judge_rel_tol = rel_tol;
        });
    }

    pub fn set_max_concurrent_judgements(value: usize) {
        AppConfig::set_field(|cfg| cfg.max_concurrent_judgements = value.max(1));
    }
}

// --- Free-function accessors, mirroring the fields ---

pub fn env() -> String {
    AppConfig::global().env.clone()
}

pub fn project_name() -> String {
    AppConfig::global().project_name.clone()
}

pub fn log_level() -> String {
    AppConfig::global().log_level.clone()
}

pub fn log_file() -> String {
    AppConfig::global().log_file.clone()
}

pub fn log_to_stdout() -> bool {
    AppConfig::global().log_to_stdout
}

pub fn host() -> String {
    AppConfig::global().host.clone()
}

pub fn port() -> u16 {
    AppConfig::global().port
}

pub fn judge_settings() -> JudgeSettings {
    AppConfig::global().judge_settings()
}

pub fn max_concurrent_judgements() -> usize {
    AppConfig::global().max_concurrent_judgements
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn judge_settings_from_env() {
        unsafe {
            env::set_var("JUDGE_TIME_LIMIT_SECONDS", "2.5");
            env::set_var("JUDGE_ABS_TOL", "0.001");
            env::remove_var("JUDGE_REL_TOL");
        }
        let cfg = AppConfig::from_env();
        let settings = cfg.judge_settings();
        assert_eq!(settings.time_limit_seconds, 2.5);
        assert_eq!(settings.abs_tol, 0.001);
        assert_eq!(settings.rel_tol, 1e-6);
        unsafe {
            env::remove_var("JUDGE_TIME_LIMIT_SECONDS");
            env::remove_var("JUDGE_ABS_TOL");
        }
    }

    #[test]
    #[serial]
    fn malformed_values_fall_back_to_defaults() {
        unsafe {
            env::set_var("PORT", "not-a-port");
            env::set_var("MAX_CONCURRENT_JUDGEMENTS", "0");
        }
        let cfg = AppConfig::from_env();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.max_concurrent_judgements, 1);
        unsafe {
            env::remove_var("PORT");
            env::remove_var("MAX_CONCURRENT_JUDGEMENTS");
        }
    }

    #[test]
    #[serial]
    fn setters_override_global_until_reset() {
        AppConfig::set_judge_time_limit_seconds(0.0);
        AppConfig::set_judge_tolerances(0.5, 0.25);
        let settings = judge_settings();
        assert_eq!(settings.time_limit_seconds, 0.0);
        assert_eq!(settings.abs_tol, 0.5);
        assert_eq!(settings.rel_tol, 0.25);

        AppConfig::reset();
        assert_eq!(judge_settings().abs_tol, 1e-6);
    }
}
