use std::rc::Rc;

use crate::model::book::Model;
use crate::model::task::Task;

/// Render the filtered list, numbered from 1 the way commands address it.
pub fn format_task_list(model: &Model) -> String {
    let visible = model.filtered_task_list();
    let mut out = String::new();
    out.push_str(&header(model, visible.len()));
    for (i, task) in visible.iter().enumerate() {
        out.push('\n');
        out.push_str(&format_task_line(i + 1, task));
    }
    out
}

fn header(model: &Model, shown: usize) -> String {
    let filters = model.selected_task_filters();
    if filters.is_empty() {
        return format!("{} tasks", shown);
    }
    let names: Vec<String> = filters.iter().map(ToString::to_string).collect();
    format!(
        "{} of {} tasks [{}]",
        shown,
        model.task_count(),
        names.join(" ")
    )
}

fn format_task_line(number: usize, task: &Rc<Task>) -> String {
    format!("{:>3}. {}", number, task)
}
