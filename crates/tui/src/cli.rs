use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskdeck",
    version,
    about = "A small local task list for the terminal.",
    after_help = "Examples:\n  taskdeck                      Launch the TUI (same as `taskdeck tui`)\n  taskdeck add Buy milk --due 14:30\n  taskdeck list --json\n  taskdeck clear-completed"
)]
pub struct Cli {
    /// Override the data directory (defaults to platform-specific app dir)
    #[arg(long, value_name = "PATH", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Override the tracing filter (e.g. "info", "debug")
    #[arg(long = "log", value_name = "DIRECTIVE", global = true)]
    pub log_filter: Option<String>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum CliCommand {
    /// Launch the keyboard-first terminal UI (default command)
    Tui,
    /// Add a task to the top of the list
    Add(AddArgs),
    /// Print every task with the summary line
    List(ListArgs),
    /// Flip a task between open and completed
    Toggle(IdArg),
    /// Replace a task's text (empty text deletes the task)
    Edit(EditArgs),
    /// Delete one or more tasks by id
    Delete(DeleteArgs),
    /// Remove every completed task
    ClearCompleted,
    /// Forget all stored tasks
    Reset,
}

#[derive(Args, Debug, Clone)]
pub struct AddArgs {
    /// Task text; words are joined with single spaces
    #[arg(value_name = "TEXT", required = true)]
    pub text: Vec<String>,

    /// Due time of day as HH:MM (24-hour)
    #[arg(long = "due", value_name = "HH:MM")]
    pub due_time: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Emit the stored tasks as JSON instead of rows
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct IdArg {
    /// Task id (see `taskdeck list`)
    #[arg(value_name = "ID")]
    pub id: String,
}

#[derive(Args, Debug, Clone)]
pub struct EditArgs {
    /// Task id (see `taskdeck list`)
    #[arg(value_name = "ID")]
    pub id: String,

    /// Replacement text; leave empty to delete the task
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct DeleteArgs {
    /// One or more task ids to delete
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

impl AddArgs {
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}

impl EditArgs {
    pub fn joined_text(&self) -> String {
        self.text.join(" ")
    }
}
