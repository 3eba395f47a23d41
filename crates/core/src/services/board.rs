//! Event dispatch between the host surface and the task store.
//!
//! The board keeps the last rendered [`Listing`] next to the store. Any store
//! mutation rebuilds the listing from scratch, which also drops edit mode.
//! Entering edit mode is the only partial update: the row at the task's index
//! is swapped for an [`EditRow`] and every other row stays as it was.

use tracing::debug;

use crate::edit::{EditKey, EditMode};
use crate::model::{Task, TextChange};
use crate::render::{render, EditRow, Listing, Row};
use crate::storage::KeyValueStore;
use crate::store::TaskStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Add { text: String, due_time: String },
    Toggle(String),
    Delete(String),
    BeginEdit(String),
    SaveEdit { value: String },
    CancelEdit,
    EditKey { key: EditKey, value: String },
    ClearCompleted,
}

/// How the host should refresh what it shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Update {
    Unchanged,
    Rebuilt,
    Replaced { index: usize },
}

/// What the event did to the collection, for status lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Added { id: String },
    Toggled { completed: bool },
    Removed,
    EditStarted { index: usize },
    Renamed,
    EditCancelled,
    Cleared(usize),
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub update: Update,
    pub effect: Effect,
}

impl Outcome {
    fn unchanged(effect: Effect) -> Self {
        Self {
            update: Update::Unchanged,
            effect,
        }
    }

    fn rebuilt(effect: Effect) -> Self {
        Self {
            update: Update::Rebuilt,
            effect,
        }
    }
}

pub struct Board<S> {
    store: TaskStore<S>,
    listing: Listing,
    edit: EditMode,
}

impl<S: KeyValueStore> Board<S> {
    pub fn open(backend: S) -> Self {
        Self::from_store(TaskStore::open(backend))
    }

    pub fn from_store(store: TaskStore<S>) -> Self {
        let listing = render(store.tasks());
        Self {
            store,
            listing,
            edit: EditMode::Viewing,
        }
    }

    pub fn listing(&self) -> &Listing {
        &self.listing
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn edit_mode(&self) -> &EditMode {
        &self.edit
    }

    pub fn apply(&mut self, event: Event) -> Outcome {
        debug!(?event, "board event");
        match event {
            Event::Add { text, due_time } => self.add(&text, &due_time),
            Event::Toggle(id) => {
                let effect = match self.store.toggle_completed(&id) {
                    Some(completed) => Effect::Toggled { completed },
                    None => Effect::Missing,
                };
                self.rebuild();
                Outcome::rebuilt(effect)
            }
            Event::Delete(id) => {
                let effect = if self.store.remove(&id) {
                    Effect::Removed
                } else {
                    Effect::Missing
                };
                self.rebuild();
                Outcome::rebuilt(effect)
            }
            Event::BeginEdit(id) => self.begin_edit(id),
            Event::SaveEdit { value } => self.save_edit(&value),
            Event::CancelEdit => self.cancel_edit(),
            Event::EditKey { key, value } => match key {
                EditKey::Submit => self.save_edit(&value),
                EditKey::Cancel => self.cancel_edit(),
            },
            Event::ClearCompleted => match self.store.clear_completed() {
                0 => Outcome::unchanged(Effect::Cleared(0)),
                cleared => {
                    self.rebuild();
                    Outcome::rebuilt(Effect::Cleared(cleared))
                }
            },
        }
    }

    fn add(&mut self, text: &str, due_time: &str) -> Outcome {
        let Some(id) = self.store.add(text, due_time).map(|task| task.id.clone()) else {
            return Outcome::unchanged(Effect::None);
        };
        self.rebuild();
        Outcome::rebuilt(Effect::Added { id })
    }

    fn begin_edit(&mut self, id: String) -> Outcome {
        let Some(index) = self.store.position(&id) else {
            return Outcome::unchanged(Effect::Missing);
        };
        if self.edit.editing_id() == Some(id.as_str()) {
            return Outcome::unchanged(Effect::None);
        }

        let switching = self.edit.is_editing();
        if switching {
            self.rebuild();
        }

        let row = EditRow::from_task(&self.store.tasks()[index]);
        if self.listing.replace(index, Row::Edit(row)).is_none() {
            // Listing out of step with the store; a full render resynchronizes it.
            self.rebuild();
            return Outcome::rebuilt(Effect::Missing);
        }
        self.edit.begin(id);

        let update = if switching {
            Update::Rebuilt
        } else {
            Update::Replaced { index }
        };
        Outcome {
            update,
            effect: Effect::EditStarted { index },
        }
    }

    fn save_edit(&mut self, value: &str) -> Outcome {
        let Some(id) = self.edit.finish() else {
            return Outcome::unchanged(Effect::None);
        };
        let effect = match self.store.set_text(&id, value) {
            TextChange::Updated => Effect::Renamed,
            TextChange::Removed => Effect::Removed,
            TextChange::Missing => Effect::Missing,
        };
        self.rebuild();
        Outcome::rebuilt(effect)
    }

    fn cancel_edit(&mut self) -> Outcome {
        if self.edit.finish().is_none() {
            return Outcome::unchanged(Effect::None);
        }
        self.rebuild();
        Outcome::rebuilt(Effect::EditCancelled)
    }

    fn rebuild(&mut self) {
        self.edit = EditMode::Viewing;
        self.listing = render(self.store.tasks());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::EMPTY_SUMMARY;
    use crate::storage::MemoryStore;
    use pretty_assertions::assert_eq;

    fn board_with(texts: &[&str]) -> Board<MemoryStore> {
        let mut board = Board::open(MemoryStore::new());
        for text in texts.iter().rev() {
            board.apply(add(text, ""));
        }
        board
    }

    fn add(text: &str, due: &str) -> Event {
        Event::Add {
            text: text.into(),
            due_time: due.into(),
        }
    }

    fn id_at(board: &Board<MemoryStore>, index: usize) -> String {
        board.tasks()[index].id.clone()
    }

    #[test]
    fn add_toggle_clear_walkthrough() {
        let mut board = board_with(&[]);
        assert_eq!(board.listing().summary, EMPTY_SUMMARY);

        let outcome = board.apply(add("Buy milk", "14:30"));
        assert_eq!(outcome.update, Update::Rebuilt);
        assert_eq!(board.tasks().len(), 1);
        assert_eq!(board.tasks()[0].due_time.as_deref(), Some("14:30"));
        assert_eq!(board.listing().summary, "1 remaining · 0 completed · 1 total");

        let id = id_at(&board, 0);
        let outcome = board.apply(Event::Toggle(id));
        assert_eq!(outcome.effect, Effect::Toggled { completed: true });
        assert_eq!(board.listing().summary, "0 remaining · 1 completed · 1 total");

        let outcome = board.apply(Event::ClearCompleted);
        assert_eq!(outcome, Outcome::rebuilt(Effect::Cleared(1)));
        assert!(board.tasks().is_empty());
        assert_eq!(board.listing().summary, EMPTY_SUMMARY);
    }

    #[test]
    fn blank_add_leaves_listing_alone() {
        let mut board = board_with(&["a"]);
        let before = board.listing().clone();
        let outcome = board.apply(add("   ", "10:00"));
        assert_eq!(outcome, Outcome::unchanged(Effect::None));
        assert_eq!(board.listing(), &before);
    }

    #[test]
    fn begin_edit_replaces_only_that_row() {
        let mut board = board_with(&["a", "b", "c"]);
        let full = board.listing().clone();
        let id = id_at(&board, 1);

        let outcome = board.apply(Event::BeginEdit(id.clone()));

        assert_eq!(outcome.update, Update::Replaced { index: 1 });
        let rows = &board.listing().rows;
        assert_eq!(rows[0], full.rows[0]);
        assert_eq!(rows[2], full.rows[2]);
        match &rows[1] {
            Row::Edit(row) => {
                assert_eq!(row.id, id);
                assert_eq!(row.draft, "b");
            }
            other => panic!("expected edit row, got {other:?}"),
        }
        assert_eq!(board.edit_mode().editing_id(), Some(id.as_str()));
    }

    #[test]
    fn begin_edit_on_second_row_exits_the_first() {
        let mut board = board_with(&["a", "b", "c"]);
        let first = id_at(&board, 0);
        let third = id_at(&board, 2);

        board.apply(Event::BeginEdit(first));
        let outcome = board.apply(Event::BeginEdit(third.clone()));

        assert_eq!(outcome.update, Update::Rebuilt);
        let editing: Vec<usize> = board
            .listing()
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.is_editing())
            .map(|(idx, _)| idx)
            .collect();
        assert_eq!(editing, vec![2]);
        assert_eq!(board.edit_mode().editing_id(), Some(third.as_str()));
    }

    #[test]
    fn begin_edit_twice_on_same_row_keeps_state() {
        let mut board = board_with(&["a"]);
        let id = id_at(&board, 0);
        board.apply(Event::BeginEdit(id.clone()));
        let outcome = board.apply(Event::BeginEdit(id));
        assert_eq!(outcome, Outcome::unchanged(Effect::None));
        assert_eq!(board.listing().editing_index(), Some(0));
    }

    #[test]
    fn begin_edit_unknown_id_is_noop() {
        let mut board = board_with(&["a"]);
        let outcome = board.apply(Event::BeginEdit("missing".into()));
        assert_eq!(outcome, Outcome::unchanged(Effect::Missing));
        assert!(!board.edit_mode().is_editing());
    }

    #[test]
    fn save_edit_commits_trimmed_text() {
        let mut board = board_with(&["a", "b"]);
        let id = id_at(&board, 1);
        board.apply(Event::BeginEdit(id.clone()));

        let outcome = board.apply(Event::SaveEdit {
            value: "  renamed ".into(),
        });

        assert_eq!(outcome, Outcome::rebuilt(Effect::Renamed));
        assert_eq!(board.tasks()[1].text, "renamed");
        assert_eq!(board.tasks()[1].id, id);
        assert!(!board.edit_mode().is_editing());
        assert_eq!(board.listing().editing_index(), None);
    }

    #[test]
    fn save_edit_with_blank_value_deletes() {
        let mut board = board_with(&["a", "b"]);
        let id = id_at(&board, 0);
        board.apply(Event::BeginEdit(id.clone()));

        let outcome = board.apply(Event::EditKey {
            key: EditKey::Submit,
            value: "   ".into(),
        });

        assert_eq!(outcome.effect, Effect::Removed);
        assert!(board.store().get(&id).is_none());
        assert_eq!(board.listing().rows.len(), 1);
    }

    #[test]
    fn cancel_edit_restores_full_render() {
        let mut board = board_with(&["a", "b"]);
        let full = board.listing().clone();
        board.apply(Event::BeginEdit(id_at(&board, 0)));

        let outcome = board.apply(Event::EditKey {
            key: EditKey::Cancel,
            value: "discarded".into(),
        });

        assert_eq!(outcome, Outcome::rebuilt(Effect::EditCancelled));
        assert_eq!(board.listing(), &full);
        assert_eq!(board.tasks()[0].text, "a");
    }

    #[test]
    fn save_or_cancel_while_viewing_is_noop() {
        let mut board = board_with(&["a"]);
        assert_eq!(
            board.apply(Event::SaveEdit { value: "x".into() }),
            Outcome::unchanged(Effect::None)
        );
        assert_eq!(board.apply(Event::CancelEdit), Outcome::unchanged(Effect::None));
        assert_eq!(board.tasks()[0].text, "a");
    }

    #[test]
    fn mutation_while_editing_exits_edit_mode() {
        let mut board = board_with(&["a", "b"]);
        let editing = id_at(&board, 0);
        board.apply(Event::BeginEdit(editing.clone()));

        board.apply(Event::Toggle(editing));

        assert!(!board.edit_mode().is_editing());
        assert_eq!(board.listing().editing_index(), None);
        assert!(board.tasks()[0].completed);
    }

    #[test]
    fn double_delete_is_harmless() {
        let mut board = board_with(&["a", "b"]);
        let id = id_at(&board, 0);
        assert_eq!(board.apply(Event::Delete(id.clone())).effect, Effect::Removed);
        assert_eq!(board.apply(Event::Delete(id)).effect, Effect::Missing);
        assert_eq!(board.tasks().len(), 1);
    }

    #[test]
    fn clear_completed_with_nothing_done_keeps_edit_mode() {
        let mut board = board_with(&["a"]);
        board.apply(Event::BeginEdit(id_at(&board, 0)));
        let writes = board.store().persistence().backend().writes();

        let outcome = board.apply(Event::ClearCompleted);

        assert_eq!(outcome, Outcome::unchanged(Effect::Cleared(0)));
        assert!(board.edit_mode().is_editing());
        assert_eq!(board.store().persistence().backend().writes(), writes);
    }
}
