use crate::domain::Phase;
use ratatui::style::{Color, Modifier, Style};

/// Background shown in dark mode regardless of phase
pub const DARK_BACKGROUND: Color = Color::Rgb(0x1c, 0x1c, 0x1c);

/// Accent color for a phase
pub fn phase_color(phase: Phase) -> Color {
    match phase {
        Phase::Focus => Color::Rgb(0xD1, 0x5A, 0x51),
        Phase::ShortBreak => Color::Rgb(0x51, 0xA4, 0x99),
        Phase::LongBreak => Color::Rgb(0x46, 0x82, 0xB4),
    }
}

/// Whole-screen style: the phase color in light mode, near-black in dark mode
pub fn base_style(phase: Phase, dark_mode: bool) -> Style {
    if dark_mode {
        Style::default().bg(DARK_BACKGROUND).fg(Color::White)
    } else {
        Style::default().bg(phase_color(phase)).fg(Color::White)
    }
}

/// Active phase tab: white pill with phase-colored text (white in dark mode)
pub fn active_tab_style(phase: Phase, dark_mode: bool) -> Style {
    let fg = if dark_mode { DARK_BACKGROUND } else { phase_color(phase) };
    Style::default()
        .bg(Color::White)
        .fg(fg)
        .add_modifier(Modifier::BOLD)
}

/// Inactive phase tab
pub fn tab_style() -> Style {
    Style::default().fg(Color::White)
}

/// Large countdown digits
pub fn timer_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Selected row highlight style
pub fn selected_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Task credited by focus phases
pub fn active_task_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Checked-off task
pub fn done_style() -> Style {
    Style::default()
        .fg(Color::Rgb(0x88, 0x88, 0x88))
        .add_modifier(Modifier::CROSSED_OUT)
}

/// Title style for panes
pub fn title_style() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

/// Border style
pub fn border_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Modal background style
pub fn modal_bg_style() -> Style {
    Style::default().bg(Color::Rgb(0x3b, 0x3b, 0x3b)).fg(Color::White)
}

/// Modal title style
pub fn modal_title_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Keybinding hint style
pub fn hint_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Error message style
pub fn error_style() -> Style {
    Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_light_mode_follows_phase() {
        for &phase in Phase::all() {
            assert_eq!(base_style(phase, false).bg, Some(phase_color(phase)));
        }
    }

    #[test]
    fn test_dark_mode_ignores_phase() {
        assert_eq!(base_style(Phase::Focus, true), base_style(Phase::LongBreak, true));
        assert_eq!(base_style(Phase::Focus, true).bg, Some(DARK_BACKGROUND));
    }
}
