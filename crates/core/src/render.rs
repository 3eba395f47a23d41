//! Projection of the task collection into declarative rows.

use std::fmt::Display;

use chrono::{Local, TimeZone};
use serde::Serialize;

use crate::format::{format_due_time, format_timestamp_in};
use crate::model::{Tally, Task, MAX_TEXT_CHARS};

pub const EMPTY_SUMMARY: &str = "No tasks yet — add your first ✨";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub meta: String,
    pub toggle_hint: &'static str,
}

impl TaskRow {
    fn from_task<Tz>(task: &Task, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        Self {
            id: task.id.clone(),
            text: task.text.clone(),
            completed: task.completed,
            meta: meta_line(task, tz),
            toggle_hint: if task.completed {
                "Mark as incomplete"
            } else {
                "Mark as complete"
            },
        }
    }
}

/// A row swapped into edit mode: the text is replaced by an editable draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditRow {
    pub id: String,
    pub completed: bool,
    pub draft: String,
    pub max_chars: usize,
}

impl EditRow {
    pub fn from_task(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            completed: task.completed,
            draft: task.text.clone(),
            max_chars: MAX_TEXT_CHARS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Row {
    View(TaskRow),
    Edit(EditRow),
}

impl Row {
    pub fn id(&self) -> &str {
        match self {
            Row::View(row) => &row.id,
            Row::Edit(row) => &row.id,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Row::Edit(_))
    }
}

/// Everything the host needs to draw the list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub rows: Vec<Row>,
    pub summary: String,
}

impl Listing {
    /// Swap the row at `index` in place, leaving its neighbours untouched.
    /// Returns the row that was there, or `None` when `index` is out of range.
    pub fn replace(&mut self, index: usize, row: Row) -> Option<Row> {
        let slot = self.rows.get_mut(index)?;
        Some(std::mem::replace(slot, row))
    }

    pub fn editing_index(&self) -> Option<usize> {
        self.rows.iter().position(Row::is_editing)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn render(tasks: &[Task]) -> Listing {
    render_in(tasks, &Local)
}

pub fn render_in<Tz>(tasks: &[Task], tz: &Tz) -> Listing
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Listing {
        rows: tasks
            .iter()
            .map(|task| Row::View(TaskRow::from_task(task, tz)))
            .collect(),
        summary: summary(tasks),
    }
}

pub fn summary(tasks: &[Task]) -> String {
    let tally = Tally::from_tasks(tasks);
    if tally.total == 0 {
        return EMPTY_SUMMARY.to_string();
    }
    format!(
        "{} remaining · {} completed · {} total",
        tally.remaining(),
        tally.done,
        tally.total
    )
}

fn meta_line<Tz>(task: &Task, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let created = format_timestamp_in(task.created_at, tz);
    match task.due_time.as_deref().map(format_due_time) {
        Some(due) if !due.is_empty() => format!("{created} · Due {due}"),
        _ => created,
    }
}
