use crate::app::{AppState, ModalKind};
use crate::ui::{
    layout::create_modal_area,
    styles::{error_style, modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// Render the message or confirmation modal
pub fn render_modal(f: &mut Frame, app: &AppState, area: Rect) {
    if let Some(modal) = &app.modal {
        let message_lines = modal.message.lines().count() as u16;
        let modal_area = create_modal_area(area, message_lines + 6);

        // Clear the area behind the modal
        f.render_widget(Clear, modal_area);

        let mut lines = vec![Line::raw("")];
        for text in modal.message.lines() {
            lines.push(Line::raw(format!("  {}", text)));
        }
        lines.push(Line::raw(""));

        let options = match modal.kind {
            ModalKind::ConfirmDelete(_) => Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(" Yes  "),
                Span::styled("[n]", modal_title_style()),
                Span::raw(" No"),
            ]),
            ModalKind::Info | ModalKind::Error => Line::from(vec![
                Span::styled("  [Enter]", modal_title_style()),
                Span::raw(" OK"),
            ]),
        };
        lines.push(options);

        let title_style = match modal.kind {
            ModalKind::Error => error_style(),
            _ => modal_title_style(),
        };

        let paragraph = Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(Span::styled(format!(" {} ", modal.title), title_style))
                    .style(modal_bg_style()),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(paragraph, modal_area);
    }
}
