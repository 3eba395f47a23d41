use std::time::Instant;

use ratatui::style::{Color, Style};
use ratatui::widgets::ListState;
use tracing::debug;

use super::buffer::TextBuffer;
use super::constants::*;
use crate::core::{
    Board, EditKey, Effect, Event, KeyValueStore, Outcome, Row, Update, MAX_TEXT_CHARS,
};

mod input;
mod render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Add,
    Edit,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AddField {
    Text,
    Due,
}

impl AddField {
    fn toggle(self) -> Self {
        match self {
            AddField::Text => AddField::Due,
            AddField::Due => AddField::Text,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App<S: KeyValueStore> {
    board: Board<S>,
    storage_label: String,
    selected: usize,
    list_state: ListState,
    input_mode: InputMode,
    add_field: AddField,
    text_input: TextBuffer,
    due_input: TextBuffer,
    edit_input: TextBuffer,
    revealed_at: Option<Instant>,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl<S: KeyValueStore> App<S> {
    pub(crate) fn new(board: Board<S>, storage_label: String) -> Self {
        let mut app = Self {
            board,
            storage_label,
            selected: 0,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            add_field: AddField::Text,
            text_input: TextBuffer::new(MAX_TEXT_CHARS),
            due_input: TextBuffer::new(DUE_INPUT_CHARS),
            edit_input: TextBuffer::new(MAX_TEXT_CHARS),
            revealed_at: None,
            status: None,
            should_quit: false,
        };
        app.clamp_selection();
        app
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
        if self
            .revealed_at
            .is_some_and(|at| at.elapsed() >= REVEAL_DURATION)
        {
            self.revealed_at = None;
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn selected_id(&self) -> Option<String> {
        self.board
            .listing()
            .rows
            .get(self.selected)
            .map(|row| row.id().to_string())
    }

    fn reveal_active(&self) -> bool {
        self.revealed_at
            .is_some_and(|at| at.elapsed() < REVEAL_DURATION)
    }

    fn select_next(&mut self) {
        let len = self.board.listing().rows.len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.list_state.select(Some(self.selected));
    }

    fn select_prev(&mut self) {
        if self.board.listing().rows.is_empty() {
            return;
        }
        self.selected = self.selected.saturating_sub(1);
        self.list_state.select(Some(self.selected));
    }

    fn select_first(&mut self) {
        self.selected = 0;
        self.clamp_selection();
    }

    fn select_last(&mut self) {
        self.selected = self.board.listing().rows.len().saturating_sub(1);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let len = self.board.listing().rows.len();
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    fn begin_add(&mut self) {
        self.input_mode = InputMode::Add;
        self.add_field = AddField::Text;
        self.text_input.clear();
        self.due_input.clear();
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn cancel_add(&mut self) {
        self.input_mode = InputMode::Normal;
        self.status = None;
    }

    fn submit_add(&mut self) {
        let event = Event::Add {
            text: self.text_input.as_str().to_string(),
            due_time: self.due_input.as_str().to_string(),
        };
        let outcome = self.dispatch(event);
        if outcome.effect == Effect::None {
            self.set_status_error(STATUS_EMPTY_ADD);
            return;
        }
        self.text_input.clear();
        self.due_input.clear();
        self.input_mode = InputMode::Normal;
    }

    fn toggle_selected(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.dispatch(Event::Toggle(id));
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn delete_selected(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.dispatch(Event::Delete(id));
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn edit_selected(&mut self) {
        match self.selected_id() {
            Some(id) => {
                self.dispatch(Event::BeginEdit(id));
            }
            None => self.set_status_info(STATUS_NOTHING_SELECTED),
        }
    }

    fn clear_completed(&mut self) {
        self.dispatch(Event::ClearCompleted);
    }

    /// Send an event to the board and bring selection, mode and status in line
    /// with what it reports.
    fn dispatch(&mut self, event: Event) -> Outcome {
        let outcome = self.board.apply(event);
        debug!(?outcome, "tui dispatch");

        match outcome.update {
            Update::Unchanged => {}
            Update::Rebuilt | Update::Replaced { .. } => {
                if self.board.edit_mode().is_editing() {
                    self.enter_edit_mode();
                } else if self.input_mode == InputMode::Edit {
                    self.input_mode = InputMode::Normal;
                    self.edit_input.clear();
                }
                self.clamp_selection();
            }
        }

        match &outcome.effect {
            Effect::None => {}
            Effect::Added { .. } => {
                self.selected = 0;
                self.clamp_selection();
                self.revealed_at = Some(Instant::now());
                self.set_status_info("Added task ✨");
            }
            Effect::Toggled { completed: true } => self.set_status_info("Marked complete ✅"),
            Effect::Toggled { completed: false } => self.set_status_info("Marked incomplete"),
            Effect::Removed => self.set_status_info("Deleted task 🗑️"),
            Effect::EditStarted { .. } => self.set_status_info(STATUS_ENTER_EDIT),
            Effect::Renamed => self.set_status_info("Updated task ✏️"),
            Effect::EditCancelled => self.status = None,
            Effect::Cleared(0) => self.set_status_info("No completed tasks to clear"),
            Effect::Cleared(count) => self.set_status_info(format!(
                "Cleared {} completed task{}",
                count,
                if *count == 1 { "" } else { "s" }
            )),
            Effect::Missing => self.set_status_error(STATUS_NOT_FOUND),
        }

        outcome
    }

    fn enter_edit_mode(&mut self) {
        let listing = self.board.listing();
        let Some(index) = listing.editing_index() else {
            return;
        };
        if let Some(Row::Edit(row)) = listing.rows.get(index) {
            self.edit_input.set(row.draft.clone());
        }
        self.selected = index;
        self.input_mode = InputMode::Edit;
    }

    /// Hand the edit field's key and current value to the board.
    fn finish_edit(&mut self, key: EditKey) {
        let value = self.edit_input.as_str().to_string();
        self.dispatch(Event::EditKey { key, value });
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
