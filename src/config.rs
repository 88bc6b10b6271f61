//! Shift-defaults configuration.
//!
//! Each work session carries a default start/end window that slots inherit
//! and individual assignments may override. The defaults themselves can be
//! replaced process-wide from a TOML configuration file.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::slot::{TimeWindow, WorkSession};

/// Errors loading shift configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid window for {session} session: {start}..{end}")]
    InvalidWindow {
        session: &'static str,
        start: String,
        end: String,
    },

    #[error("no shifts.toml found in standard locations")]
    NotFound,
}

/// Raw per-session settings as they appear in the TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionSettings {
    start: String,
    end: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShiftSettings {
    #[serde(default = "default_morning")]
    morning: SessionSettings,
    #[serde(default = "default_afternoon")]
    afternoon: SessionSettings,
    #[serde(default = "default_evening")]
    evening: SessionSettings,
    #[serde(default = "default_duration")]
    default_duration_minutes: u32,
}

fn default_morning() -> SessionSettings {
    SessionSettings {
        start: "08:00".to_string(),
        end: "12:00".to_string(),
    }
}

fn default_afternoon() -> SessionSettings {
    SessionSettings {
        start: "13:00".to_string(),
        end: "17:00".to_string(),
    }
}

fn default_evening() -> SessionSettings {
    SessionSettings {
        start: "18:00".to_string(),
        end: "21:00".to_string(),
    }
}

fn default_duration() -> u32 {
    20
}

impl Default for ShiftSettings {
    fn default() -> Self {
        Self {
            morning: default_morning(),
            afternoon: default_afternoon(),
            evening: default_evening(),
            default_duration_minutes: default_duration(),
        }
    }
}

/// Parsed, validated shift defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct ShiftConfig {
    morning: TimeWindow,
    afternoon: TimeWindow,
    evening: TimeWindow,
    default_duration_minutes: u32,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        // The built-in settings are always valid.
        Self::from_settings(&ShiftSettings::default()).unwrap()
    }
}

impl ShiftConfig {
    /// Default window for a work session.
    pub fn window_for(&self, session: WorkSession) -> TimeWindow {
        match session {
            WorkSession::Morning => self.morning,
            WorkSession::Afternoon => self.afternoon,
            WorkSession::Evening => self.evening,
        }
    }

    /// Default appointment duration for new assignments.
    pub fn default_duration_minutes(&self) -> u32 {
        self.default_duration_minutes
    }

    /// Load shift configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let settings: ShiftSettings = toml::from_str(&content)?;
        Self::from_settings(&settings)
    }

    /// Load shift configuration from the default location.
    ///
    /// Searches for `shifts.toml` in:
    /// 1. Current directory
    /// 2. `config/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = vec![
            PathBuf::from("shifts.toml"),
            PathBuf::from("config/shifts.toml"),
            PathBuf::from("../shifts.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(ConfigError::NotFound)
    }

    fn from_settings(settings: &ShiftSettings) -> Result<Self, ConfigError> {
        let parse = |session: &'static str, s: &SessionSettings| {
            TimeWindow::parse(&s.start, &s.end).ok_or_else(|| ConfigError::InvalidWindow {
                session,
                start: s.start.clone(),
                end: s.end.clone(),
            })
        };

        Ok(Self {
            morning: parse("morning", &settings.morning)?,
            afternoon: parse("afternoon", &settings.afternoon)?,
            evening: parse("evening", &settings.evening)?,
            default_duration_minutes: settings.default_duration_minutes,
        })
    }
}

/// Process-wide shift defaults, replaceable by the embedding application.
static GLOBAL_SHIFTS: RwLock<Option<ShiftConfig>> = RwLock::new(None);

/// Current global shift defaults (built-in defaults until overridden).
pub fn global_shifts() -> ShiftConfig {
    GLOBAL_SHIFTS
        .read()
        .clone()
        .unwrap_or_else(ShiftConfig::default)
}

/// Override the global shift defaults.
pub fn set_global_shifts(config: ShiftConfig) {
    *GLOBAL_SHIFTS.write() = Some(config);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_windows() {
        let config = ShiftConfig::default();
        assert_eq!(
            config.window_for(WorkSession::Morning),
            TimeWindow::parse("08:00", "12:00").unwrap()
        );
        assert_eq!(
            config.window_for(WorkSession::Evening),
            TimeWindow::parse("18:00", "21:00").unwrap()
        );
        assert_eq!(config.default_duration_minutes(), 20);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
default_duration_minutes = 30

[morning]
start = "07:30"
end = "11:30"

[afternoon]
start = "12:30"
end = "16:30"

[evening]
start = "17:00"
end = "20:00"
"#;
        let settings: ShiftSettings = toml::from_str(toml).unwrap();
        let config = ShiftConfig::from_settings(&settings).unwrap();

        assert_eq!(
            config.window_for(WorkSession::Morning),
            TimeWindow::parse("07:30", "11:30").unwrap()
        );
        assert_eq!(config.default_duration_minutes(), 30);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let toml = r#"
[morning]
start = "06:00"
end = "10:00"
"#;
        let settings: ShiftSettings = toml::from_str(toml).unwrap();
        let config = ShiftConfig::from_settings(&settings).unwrap();

        assert_eq!(
            config.window_for(WorkSession::Morning),
            TimeWindow::parse("06:00", "10:00").unwrap()
        );
        // Untouched sessions keep built-in defaults.
        assert_eq!(
            config.window_for(WorkSession::Afternoon),
            TimeWindow::parse("13:00", "17:00").unwrap()
        );
    }

    #[test]
    fn test_inverted_window_rejected() {
        let toml = r#"
[morning]
start = "12:00"
end = "08:00"
"#;
        let settings: ShiftSettings = toml::from_str(toml).unwrap();
        let result = ShiftConfig::from_settings(&settings);
        assert!(matches!(
            result,
            Err(ConfigError::InvalidWindow {
                session: "morning",
                ..
            })
        ));
    }
}
