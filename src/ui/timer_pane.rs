use crate::app::AppState;
use crate::domain::Phase;
use crate::ui::styles::{active_tab_style, border_style, hint_style, tab_style, timer_style};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render phase tabs, the countdown and the task being worked on
pub fn render_timer_pane(f: &mut Frame, app: &AppState, area: Rect, base: Style) {
    let settings = app.controller.settings();
    let session = app.controller.session();

    let lines = vec![
        Line::raw(""),
        phase_tabs(session.phase(), settings.dark_mode_enabled),
        Line::raw(""),
        Line::from(Span::styled(session.formatted_remaining(), timer_style())),
        Line::from(Span::styled(
            if session.is_running() { "[space] PAUSE" } else { "[space] START" },
            hint_style(),
        )),
        Line::raw(app.current_task_label()),
        Line::from(Span::styled(
            format!(
                "#{} of {} before long break",
                session.completed_focus_count_in_cycle(),
                settings.long_break_interval
            ),
            hint_style(),
        )),
    ];

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(base)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(" Pomotodo "),
        );

    f.render_widget(paragraph, area);
}

/// One tab per phase; the current phase is highlighted
fn phase_tabs(current: Phase, dark_mode: bool) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, &phase) in Phase::all().iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let label = format!(" {} {} ", i + 1, phase.name());
        let style = if phase == current {
            active_tab_style(phase, dark_mode)
        } else {
            tab_style()
        };
        spans.push(Span::styled(label, style));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_tabs_highlight_current() {
        let line = phase_tabs(Phase::ShortBreak, false);
        let tabs: Vec<_> = line.spans.iter().filter(|s| s.content.trim() != "").collect();

        assert_eq!(tabs.len(), 3);
        assert_eq!(tabs[0].style, tab_style());
        assert_eq!(tabs[1].style, active_tab_style(Phase::ShortBreak, false));
        assert!(tabs[1].content.contains(Phase::ShortBreak.name()));
    }
}
