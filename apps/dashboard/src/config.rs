use std::{fs, io::ErrorKind, path::Path, time::Duration};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_SETTINGS_FILE: &str = "dashboard.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server_url: String,
    pub poll_interval_ms: u64,
    pub initial_load_delay_ms: u64,
    pub notification_ttl_ms: u64,
    pub busy_indicator_linger_ms: u64,
    pub request_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            poll_interval_ms: 10_000,
            initial_load_delay_ms: 1_000,
            notification_ttl_ms: 4_000,
            busy_indicator_linger_ms: 1_000,
            request_timeout_ms: 30_000,
        }
    }
}

impl Settings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn initial_load_delay(&self) -> Duration {
        Duration::from_millis(self.initial_load_delay_ms)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_millis(self.notification_ttl_ms)
    }

    pub fn busy_indicator_linger(&self) -> Duration {
        Duration::from_millis(self.busy_indicator_linger_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Periods and timeouts must be non-zero.
    pub fn validate(&self) -> anyhow::Result<()> {
        for (key, value) in [
            ("poll_interval_ms", self.poll_interval_ms),
            ("notification_ttl_ms", self.notification_ttl_ms),
            ("request_timeout_ms", self.request_timeout_ms),
        ] {
            if value == 0 {
                bail!("setting '{key}' must be greater than zero");
            }
        }
        Ok(())
    }
}

/// Defaults, then the settings file, then `APP__*` environment variables.
///
/// A missing file at `path` is not an error; a malformed one is.
pub fn load_settings(path: &Path) -> anyhow::Result<Settings> {
    let mut settings = match fs::read_to_string(path) {
        Ok(raw) => toml::from_str::<Settings>(&raw)
            .with_context(|| format!("failed to parse settings file '{}'", path.display()))?,
        Err(err) if err.kind() == ErrorKind::NotFound => Settings::default(),
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read settings file '{}'", path.display()))
        }
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());
    settings
        .validate()
        .with_context(|| format!("invalid settings from '{}'", path.display()))?;
    Ok(settings)
}

fn apply_env_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("APP__SERVER_URL") {
        settings.server_url = v;
    }

    let numeric = [
        ("APP__POLL_INTERVAL_MS", &mut settings.poll_interval_ms),
        (
            "APP__INITIAL_LOAD_DELAY_MS",
            &mut settings.initial_load_delay_ms,
        ),
        ("APP__NOTIFICATION_TTL_MS", &mut settings.notification_ttl_ms),
        (
            "APP__BUSY_INDICATOR_LINGER_MS",
            &mut settings.busy_indicator_linger_ms,
        ),
        ("APP__REQUEST_TIMEOUT_MS", &mut settings.request_timeout_ms),
    ];
    for (key, slot) in numeric {
        if let Some(parsed) = lookup(key).and_then(|v| v.trim().parse::<u64>().ok()) {
            *slot = parsed;
        }
    }
}
