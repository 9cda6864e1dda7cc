use serde::{Deserialize, Serialize};

/// Timer phase of the Pomodoro cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Focus,
    ShortBreak,
    LongBreak,
}

impl Phase {
    /// Display name used on the mode tabs
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Focus => "Focus",
            Phase::ShortBreak => "Short Break",
            Phase::LongBreak => "Long Break",
        }
    }

    /// Sound played when this phase concludes
    pub fn completion_cue(&self) -> SoundCue {
        match self {
            Phase::Focus => SoundCue::FocusEnd,
            Phase::ShortBreak | Phase::LongBreak => SoundCue::BreakEnd,
        }
    }

    /// All phases in tab order
    pub fn all() -> &'static [Phase] {
        &[Phase::Focus, Phase::ShortBreak, Phase::LongBreak]
    }
}

/// Sound cue fired when a phase completes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    FocusEnd,
    BreakEnd,
}

impl SoundCue {
    /// File name of the cue inside the sounds directory
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundCue::FocusEnd => "focus_end.mp3",
            SoundCue::BreakEnd => "break_end.mp3",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_cue() {
        assert_eq!(Phase::Focus.completion_cue(), SoundCue::FocusEnd);
        assert_eq!(Phase::ShortBreak.completion_cue(), SoundCue::BreakEnd);
        assert_eq!(Phase::LongBreak.completion_cue(), SoundCue::BreakEnd);
    }

    #[test]
    fn test_cue_file_names() {
        assert_eq!(SoundCue::FocusEnd.file_name(), "focus_end.mp3");
        assert_eq!(SoundCue::BreakEnd.file_name(), "break_end.mp3");
    }
}
