use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::{Line, Span}, widgets::Paragraph, Frame};

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, area: Rect) {
    let hints = Line::from(vec![
        Span::raw(" space start/pause   "),
        Span::raw("s skip   "),
        Span::raw("1/2/3 mode   "),
        Span::raw("↑/↓ select   "),
        Span::raw("Shift+↑/↓ move   "),
        Span::raw("Enter doing   "),
        Span::raw("x done   "),
        Span::raw("a add   "),
        Span::raw("e edit   "),
        Span::raw("m mark   "),
        Span::raw("d delete   "),
        Span::raw("o settings   "),
        Span::raw("t theme   "),
        Span::raw("q quit"),
    ]);

    let paragraph = Paragraph::new(hints).style(hint_style());
    f.render_widget(paragraph, area);
}
