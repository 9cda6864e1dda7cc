use crate::app::{AppState, FormKind};
use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the input form for tasks and settings
pub fn render_input_form(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(form) = &app.input_form {
        let height = form.fields.len() as u16 * 3 + 5;
        let modal_area = create_modal_area(area, height);

        // Clear the area behind the form
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];

        for (i, field) in form.fields.iter().enumerate() {
            let editing = i == form.editing_field;
            if editing {
                lines.push(Line::raw(format!("{}: (editing)", field.label)));
            } else {
                lines.push(Line::raw(format!("{}:", field.label)));
            }

            lines.push(Line::from(vec![
                Span::raw("> "),
                Span::styled(field.value.as_str(), modal_title_style()),
                if editing {
                    Span::styled("█", modal_title_style()) // Cursor
                } else {
                    Span::raw("")
                },
            ]));
            lines.push(Line::raw(""));
        }

        lines.push(Line::raw("Tab to switch fields  ·  Enter to submit  ·  Esc to cancel"));
        if form.kind == FormKind::AddTask {
            lines.push(Line::raw("(Estimate: 1 to 10 pomodoros)"));
        }

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(form.title(), modal_title_style()))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
