use crate::domain::Phase;
use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FOCUS_MIN: u32 = 25;
pub const DEFAULT_SHORT_BREAK_MIN: u32 = 5;
pub const DEFAULT_LONG_BREAK_MIN: u32 = 15;
pub const DEFAULT_LONG_BREAK_INTERVAL: u32 = 4;

/// Bounds of the long-break interval offered by the settings form
pub const MIN_LONG_BREAK_INTERVAL: u32 = 2;
pub const MAX_LONG_BREAK_INTERVAL: u32 = 10;

/// Timer configuration, persisted under the `settings` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_focus")]
    pub focus_time_min: u32,
    #[serde(default = "default_short_break")]
    pub short_break_time_min: u32,
    #[serde(default = "default_long_break")]
    pub long_break_time_min: u32,
    #[serde(default = "default_interval")]
    pub long_break_interval: u32,
    #[serde(default)]
    pub dark_mode_enabled: bool,
}

fn default_focus() -> u32 {
    DEFAULT_FOCUS_MIN
}

fn default_short_break() -> u32 {
    DEFAULT_SHORT_BREAK_MIN
}

fn default_long_break() -> u32 {
    DEFAULT_LONG_BREAK_MIN
}

fn default_interval() -> u32 {
    DEFAULT_LONG_BREAK_INTERVAL
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_time_min: DEFAULT_FOCUS_MIN,
            short_break_time_min: DEFAULT_SHORT_BREAK_MIN,
            long_break_time_min: DEFAULT_LONG_BREAK_MIN,
            long_break_interval: DEFAULT_LONG_BREAK_INTERVAL,
            dark_mode_enabled: false,
        }
    }
}

impl Settings {
    /// Configured duration of a phase in seconds
    pub fn duration_secs(&self, phase: Phase) -> u32 {
        let minutes = match phase {
            Phase::Focus => self.focus_time_min,
            Phase::ShortBreak => self.short_break_time_min,
            Phase::LongBreak => self.long_break_time_min,
        };
        minutes.saturating_mul(60)
    }

    /// Reject non-positive durations and intervals below two
    pub fn validate(&self) -> CoreResult<()> {
        if self.focus_time_min == 0 || self.short_break_time_min == 0 || self.long_break_time_min == 0 {
            return Err(CoreError::validation("All times must be positive integers!"));
        }
        if self.long_break_interval < MIN_LONG_BREAK_INTERVAL {
            return Err(CoreError::validation(format!(
                "Long break interval must be at least {}!",
                MIN_LONG_BREAK_INTERVAL
            )));
        }
        Ok(())
    }

    /// Build settings from raw form text.
    ///
    /// Durations are typed by the user and must parse as integers; the interval
    /// comes from a bounded selector. `dark_mode_enabled` is carried over from
    /// the current settings since the form does not edit it.
    pub fn from_form_input(
        focus: &str,
        short_break: &str,
        long_break: &str,
        long_break_interval: u32,
        dark_mode_enabled: bool,
    ) -> CoreResult<Self> {
        let focus = parse_minutes(focus)?;
        let short_break = parse_minutes(short_break)?;
        let long_break = parse_minutes(long_break)?;

        if focus <= 0 || short_break <= 0 || long_break <= 0 {
            return Err(CoreError::validation("All times must be positive integers!"));
        }

        let settings = Self {
            focus_time_min: focus as u32,
            short_break_time_min: short_break as u32,
            long_break_time_min: long_break as u32,
            long_break_interval,
            dark_mode_enabled,
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn parse_minutes(input: &str) -> CoreResult<i64> {
    let value: i64 = input
        .trim()
        .parse()
        .map_err(|_| CoreError::validation("Please enter valid numbers for times!"))?;
    if value > u32::MAX as i64 {
        return Err(CoreError::validation("Please enter valid numbers for times!"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.focus_time_min, 25);
        assert_eq!(settings.short_break_time_min, 5);
        assert_eq!(settings.long_break_time_min, 15);
        assert_eq!(settings.long_break_interval, 4);
        assert!(!settings.dark_mode_enabled);
    }

    #[test]
    fn test_duration_secs() {
        let settings = Settings::default();
        assert_eq!(settings.duration_secs(Phase::Focus), 25 * 60);
        assert_eq!(settings.duration_secs(Phase::ShortBreak), 5 * 60);
        assert_eq!(settings.duration_secs(Phase::LongBreak), 15 * 60);
    }

    #[test]
    fn test_validate_rejects_zero_duration() {
        let settings = Settings {
            short_break_time_min: 0,
            ..Settings::default()
        };
        assert!(settings.validate().unwrap_err().is_validation());
    }

    #[test]
    fn test_validate_rejects_small_interval() {
        let settings = Settings {
            long_break_interval: 1,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_from_form_input() {
        let settings = Settings::from_form_input("50", " 10 ", "20", 3, true).unwrap();
        assert_eq!(settings.focus_time_min, 50);
        assert_eq!(settings.short_break_time_min, 10);
        assert_eq!(settings.long_break_time_min, 20);
        assert_eq!(settings.long_break_interval, 3);
        assert!(settings.dark_mode_enabled);
    }

    #[test]
    fn test_from_form_input_non_integer() {
        let err = Settings::from_form_input("abc", "5", "15", 4, false).unwrap_err();
        assert_eq!(err.to_string(), "Please enter valid numbers for times!");
    }

    #[test]
    fn test_from_form_input_non_positive() {
        let err = Settings::from_form_input("25", "-5", "15", 4, false).unwrap_err();
        assert_eq!(err.to_string(), "All times must be positive integers!");

        let err = Settings::from_form_input("0", "5", "15", 4, false).unwrap_err();
        assert_eq!(err.to_string(), "All times must be positive integers!");
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"focus_time_min": 40}"#).unwrap();
        assert_eq!(settings.focus_time_min, 40);
        assert_eq!(settings.short_break_time_min, 5);
        assert_eq!(settings.long_break_interval, 4);
        assert!(!settings.dark_mode_enabled);
    }
}
