/// Per-row edit state. At most one row is ever being edited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditMode {
    #[default]
    Viewing,
    Editing { id: String },
}

impl EditMode {
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            EditMode::Viewing => None,
            EditMode::Editing { id } => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, EditMode::Editing { .. })
    }

    pub fn begin(&mut self, id: impl Into<String>) {
        *self = EditMode::Editing { id: id.into() };
    }

    /// Leave edit mode, handing back the id that was being edited.
    pub fn finish(&mut self) -> Option<String> {
        match std::mem::take(self) {
            EditMode::Viewing => None,
            EditMode::Editing { id } => Some(id),
        }
    }
}

/// Keys an edit field reacts to, independent of the host's key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKey {
    Submit,
    Cancel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_then_finish_returns_to_viewing() {
        let mut mode = EditMode::default();
        assert!(!mode.is_editing());

        mode.begin("a");
        assert_eq!(mode.editing_id(), Some("a"));

        assert_eq!(mode.finish().as_deref(), Some("a"));
        assert_eq!(mode, EditMode::Viewing);
        assert_eq!(mode.finish(), None);
    }

    #[test]
    fn begin_on_another_row_replaces_the_first() {
        let mut mode = EditMode::default();
        mode.begin("a");
        mode.begin("b");
        assert_eq!(mode.editing_id(), Some("b"));
    }
}
