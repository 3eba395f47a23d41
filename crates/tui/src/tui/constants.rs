use std::time::Duration;

pub(crate) const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub(crate) const TICK_RATE: Duration = Duration::from_millis(200);
pub(crate) const REVEAL_DURATION: Duration = Duration::from_millis(600);
pub(crate) const STATUS_TTL: Duration = Duration::from_secs(5);

/// Longest due-time entry, `HH:MM`.
pub(crate) const DUE_INPUT_CHARS: usize = 5;

pub(crate) const STATUS_ENTER_ADD: &str =
    "Type the task • Tab to set a due time (HH:MM) • Enter to add • Esc to cancel";
pub(crate) const STATUS_ENTER_EDIT: &str = "Editing task • Enter to save • Esc to cancel";
pub(crate) const STATUS_EMPTY_ADD: &str = "Enter some text before adding a task";
pub(crate) const STATUS_HELP: &str = "Keyboard reference — Enter/Esc to close";
pub(crate) const STATUS_NOT_FOUND: &str = "Task not found";
pub(crate) const STATUS_NOTHING_SELECTED: &str = "Nothing selected";
