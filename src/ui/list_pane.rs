use crate::app::AppState;
use crate::domain::Task;
use crate::ui::styles::{active_task_style, border_style, done_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Render the task list pane
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect, base: Style) {
    let tasks = app.controller.tasks();
    let active = tasks.active_index();

    let items: Vec<ListItem> = tasks
        .tasks()
        .iter()
        .enumerate()
        .map(|(idx, task)| {
            let line = create_task_line(task, active == Some(idx), app.marked.contains(&idx));
            let item = ListItem::new(line);
            if idx == app.selected_index {
                item.style(selected_style())
            } else {
                item
            }
        })
        .collect();

    let done = tasks.tasks().iter().filter(|t| t.done).count();
    let title = format!(" Tasks ({}/{} done) ", done, tasks.len());

    let list = List::new(items).style(base).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(title, title_style())),
    );

    f.render_widget(list, area);
}

/// Create a single line for a task
/// Format: ▶ * [✓] Write proposal   🍅 2/4
fn create_task_line(task: &Task, is_active: bool, is_marked: bool) -> Line<'static> {
    let mut spans = Vec::new();

    spans.push(Span::raw(if is_active { "▶ " } else { "  " }));
    spans.push(Span::raw(if is_marked { "* " } else { "  " }));
    spans.push(Span::raw(if task.done { "[✓] " } else { "[ ] " }));

    let text_style = if task.done {
        done_style()
    } else if is_active {
        active_task_style()
    } else {
        Style::default()
    };
    spans.push(Span::styled(task.text.clone(), text_style));
    spans.push(Span::raw(format!("   🍅 {}", task.progress_label())));

    Line::from(spans)
}
