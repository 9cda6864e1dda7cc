pub mod input_form;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod timer_pane;

use crate::app::AppState;
use input_form::render_input_form;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_modal;
use ratatui::{text::Span, widgets::{Block, Paragraph}, Frame};
use styles::{base_style, error_style};
use timer_pane::render_timer_pane;

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    let base = base_style(
        app.controller.session().phase(),
        app.controller.settings().dark_mode_enabled,
    );
    f.render_widget(Block::default().style(base), size);

    render_keybindings(f, layout.keybindings_area);
    render_timer_pane(f, app, layout.timer_area, base);
    render_list_pane(f, app, layout.list_area, base);

    if let Some(status) = &app.status_message {
        f.render_widget(
            Paragraph::new(Span::styled(format!(" {}", status), error_style())),
            layout.status_area,
        );
    }

    // Input form renders first so errors about its content show on top
    if app.input_form.is_some() {
        render_input_form(f, app, size);
    }

    if app.modal.is_some() {
        render_modal(f, app, size);
    }
}
