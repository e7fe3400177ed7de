#![forbid(unsafe_code)]

//! Kiosk runtime configuration.
//!
//! Values come from `KIOSK_*` environment variables layered over defaults.
//! Parsing never fails outright: unparseable values are collected as
//! [`ConfigError`]s and the default is kept, so a misconfigured kiosk still
//! boots with sane behavior.
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `KIOSK_BACKSPACE_REPEAT_MS` | backspace hold-to-repeat interval | `100` |
//! | `KIOSK_REJECT_FEEDBACK` | `silent` or `signal` for rejected keystrokes | `silent` |
//! | `KIOSK_LOG_FORMAT` | `pretty` or `json` | `pretty` |

use std::env;
use std::fmt;
use std::time::Duration;

const ENV_BACKSPACE_REPEAT_MS: &str = "KIOSK_BACKSPACE_REPEAT_MS";
const ENV_REJECT_FEEDBACK: &str = "KIOSK_REJECT_FEEDBACK";
const ENV_LOG_FORMAT: &str = "KIOSK_LOG_FORMAT";

/// Default backspace repeat interval.
pub const DEFAULT_BACKSPACE_REPEAT: Duration = Duration::from_millis(100);

/// What the screen reports when a keystroke is rejected by a field rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RejectFeedback {
    /// Drop the keystroke without telling the host.
    #[default]
    Silent,
    /// Report the rejection so the host can shake the field or beep.
    Signal,
}

impl RejectFeedback {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "silent" | "off" | "none" => Some(Self::Silent),
            "signal" | "on" | "shake" | "beep" => Some(Self::Signal),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Silent => "silent",
            Self::Signal => "signal",
        }
    }
}

impl fmt::Display for RejectFeedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" | "human" => Some(Self::Pretty),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime configuration shared by every screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KioskConfig {
    /// Interval between synthesized backspaces while Backspace is held.
    pub backspace_repeat: Duration,
    /// Whether rejected keystrokes are reported to the host.
    pub reject_feedback: RejectFeedback,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            backspace_repeat: DEFAULT_BACKSPACE_REPEAT,
            reject_feedback: RejectFeedback::Silent,
            log_format: LogFormat::Pretty,
        }
    }
}

/// Result of parsing configuration: the effective config plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigParse {
    pub config: KioskConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl KioskConfig {
    /// Parse config from environment variables, logging any diagnostics.
    #[must_use]
    pub fn from_env() -> KioskConfig {
        let parsed = Self::from_env_with_diagnostics();
        for error in &parsed.errors {
            tracing::warn!(%error, "ignoring invalid kiosk setting");
        }
        parsed.config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> ConfigParse {
        Self::from_env_with(|key| env::var(key).ok())
    }

    /// Parse config from an arbitrary key lookup.
    pub fn from_env_with<F>(mut get: F) -> ConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = KioskConfig::default();
        let mut errors = Vec::new();

        if let Some(value) = get(ENV_BACKSPACE_REPEAT_MS) {
            match parse_millis(&value) {
                Some(parsed) => config.backspace_repeat = parsed,
                None => errors.push(ConfigError::new(
                    "backspace_repeat_ms",
                    value,
                    "expected positive integer milliseconds",
                )),
            }
        }

        if let Some(value) = get(ENV_REJECT_FEEDBACK) {
            match RejectFeedback::parse(&value) {
                Some(parsed) => config.reject_feedback = parsed,
                None => errors.push(ConfigError::new(
                    "reject_feedback",
                    value,
                    "expected silent|signal",
                )),
            }
        }

        if let Some(value) = get(ENV_LOG_FORMAT) {
            match LogFormat::parse(&value) {
                Some(parsed) => config.log_format = parsed,
                None => errors.push(ConfigError::new(
                    "log_format",
                    value,
                    "expected pretty|json",
                )),
            }
        }

        ConfigParse { config, errors }
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if self.backspace_repeat.is_zero() {
            errors.push(ConfigError::new(
                "backspace_repeat_ms",
                "0",
                "must be >= 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Builder: set the backspace repeat interval.
    #[must_use]
    pub fn with_backspace_repeat(mut self, interval: Duration) -> Self {
        self.backspace_repeat = interval;
        self
    }

    /// Builder: set rejection feedback.
    #[must_use]
    pub fn with_reject_feedback(mut self, feedback: RejectFeedback) -> Self {
        self.reject_feedback = feedback;
        self
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(ms) => Some(Duration::from_millis(ms)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse(pairs: &[(&'static str, &'static str)]) -> ConfigParse {
        let env: HashMap<&str, &str> = pairs.iter().copied().collect();
        KioskConfig::from_env_with(|key| env.get(key).map(|v| (*v).to_string()))
    }

    #[test]
    fn defaults_when_env_empty() {
        let parsed = parse(&[]);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.config, KioskConfig::default());
        assert_eq!(parsed.config.backspace_repeat, Duration::from_millis(100));
    }

    #[test]
    fn env_overrides_apply() {
        let parsed = parse(&[
            (ENV_BACKSPACE_REPEAT_MS, "75"),
            (ENV_REJECT_FEEDBACK, "Signal"),
            (ENV_LOG_FORMAT, "json"),
        ]);
        assert!(parsed.errors.is_empty(), "{:?}", parsed.errors);
        assert_eq!(parsed.config.backspace_repeat, Duration::from_millis(75));
        assert_eq!(parsed.config.reject_feedback, RejectFeedback::Signal);
        assert_eq!(parsed.config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_values_keep_defaults_and_report() {
        let parsed = parse(&[
            (ENV_BACKSPACE_REPEAT_MS, "0"),
            (ENV_REJECT_FEEDBACK, "loud"),
            (ENV_LOG_FORMAT, "xml"),
        ]);
        assert_eq!(parsed.config, KioskConfig::default());
        let fields: Vec<_> = parsed.errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["backspace_repeat_ms", "reject_feedback", "log_format"]
        );
    }

    #[test]
    fn validate_rejects_zero_interval() {
        let config = KioskConfig::default().with_backspace_repeat(Duration::ZERO);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].to_string(), "backspace_repeat_ms=0 (must be >= 1)");
    }

    #[test]
    fn builders_chain() {
        let config = KioskConfig::default()
            .with_backspace_repeat(Duration::from_millis(40))
            .with_reject_feedback(RejectFeedback::Signal);
        assert!(config.validate().is_ok());
        assert_eq!(config.reject_feedback.to_string(), "signal");
    }
}
