use std::fmt;
use std::io::Write;

use anyhow::{anyhow, Result};

use crate::cli::{AddArgs, CliCommand, DeleteArgs, EditArgs, IdArg, ListArgs};
use crate::config::AppConfig;
use crate::core::render::{render, Row};
use crate::core::{open_or_memory, KeyValueStore, TaskStore, TextChange};

/// Run one scripted command. When the database cannot be opened the command
/// still runs against an in-memory store and its changes are not kept.
pub fn execute<W: Write>(config: &AppConfig, command: CliCommand, writer: W) -> Result<()> {
    let mut store = TaskStore::open(open_or_memory(config).store);
    dispatch(&mut store, command, writer)
}

fn dispatch<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    command: CliCommand,
    mut writer: W,
) -> Result<()> {
    match command {
        CliCommand::Add(args) => handle_add(store, &args, &mut writer),
        CliCommand::List(args) => handle_list(store, &args, &mut writer),
        CliCommand::Toggle(args) => handle_toggle(store, &args, &mut writer),
        CliCommand::Edit(args) => handle_edit(store, &args, &mut writer),
        CliCommand::Delete(args) => handle_delete(store, &args, &mut writer),
        CliCommand::ClearCompleted => {
            let cleared = store.clear_completed();
            writeln!(writer, "{}", SummaryLine::cleared(cleared))?;
            Ok(())
        }
        CliCommand::Reset => {
            let count = store.len();
            store.reset();
            writeln!(writer, "Forgot {} task{}", count, plural(count))?;
            Ok(())
        }
        CliCommand::Tui => Err(anyhow!("launch interactive surfaces directly")),
    }
}

fn handle_add<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    args: &AddArgs,
    mut writer: W,
) -> Result<()> {
    let due = args.due_time.clone().unwrap_or_default();
    match store.add(&args.joined_text(), &due) {
        Some(task) => {
            writeln!(writer, "Added {} ({})", task.text, task.id)?;
            if !due.trim().is_empty() && task.due_time.is_none() {
                writeln!(writer, "Ignored due time '{}': expected HH:MM", due.trim())?;
            }
        }
        None => writeln!(writer, "Nothing to add: task text is empty")?,
    }
    Ok(())
}

fn handle_list<S: KeyValueStore, W: Write>(
    store: &TaskStore<S>,
    args: &ListArgs,
    mut writer: W,
) -> Result<()> {
    if args.json {
        serde_json::to_writer_pretty(&mut writer, store.tasks())?;
        writeln!(writer)?;
        return Ok(());
    }

    let listing = render(store.tasks());
    for row in &listing.rows {
        if let Row::View(row) = row {
            let mark = if row.completed { "x" } else { " " };
            writeln!(writer, "[{}] {}", mark, row.text)?;
            writeln!(writer, "    {} · {}", row.meta, row.id)?;
        }
    }
    writeln!(writer, "{}", listing.summary)?;
    Ok(())
}

fn handle_toggle<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    args: &IdArg,
    mut writer: W,
) -> Result<()> {
    match store.toggle_completed(&args.id) {
        Some(true) => writeln!(writer, "Marked {} complete", args.id)?,
        Some(false) => writeln!(writer, "Marked {} incomplete", args.id)?,
        None => writeln!(writer, "Not found: {}", args.id)?,
    }
    Ok(())
}

fn handle_edit<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    args: &EditArgs,
    mut writer: W,
) -> Result<()> {
    match store.set_text(&args.id, &args.joined_text()) {
        TextChange::Updated => writeln!(writer, "Updated {}", args.id)?,
        TextChange::Removed => writeln!(writer, "Deleted {} (empty text)", args.id)?,
        TextChange::Missing => writeln!(writer, "Not found: {}", args.id)?,
    }
    Ok(())
}

fn handle_delete<S: KeyValueStore, W: Write>(
    store: &mut TaskStore<S>,
    args: &DeleteArgs,
    mut writer: W,
) -> Result<()> {
    let mut deleted = 0usize;
    let mut missing = Vec::new();
    for id in &args.ids {
        if store.remove(id) {
            deleted += 1;
        } else {
            missing.push(id.clone());
        }
    }

    writeln!(writer, "{}", SummaryLine::deleted(deleted))?;
    if !missing.is_empty() {
        writeln!(writer, "Not found: {}", missing.join(", "))?;
    }
    Ok(())
}

enum SummaryLine {
    Deleted(usize),
    NoneDeleted,
    Cleared(usize),
    NoneCompleted,
}

impl SummaryLine {
    fn deleted(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Deleted(count)
        } else {
            SummaryLine::NoneDeleted
        }
    }

    fn cleared(count: usize) -> Self {
        if count > 0 {
            SummaryLine::Cleared(count)
        } else {
            SummaryLine::NoneCompleted
        }
    }
}

impl fmt::Display for SummaryLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryLine::Deleted(count) => write!(f, "Deleted {} task{}", count, plural(*count)),
            SummaryLine::NoneDeleted => write!(f, "No tasks deleted"),
            SummaryLine::Cleared(count) => {
                write!(f, "Cleared {} completed task{}", count, plural(*count))
            }
            SummaryLine::NoneCompleted => write!(f, "No completed tasks to clear"),
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::render::EMPTY_SUMMARY;
    use crate::core::SqliteStore;
    use std::fs;
    use tempfile::TempDir;

    fn temp_config() -> (AppConfig, TempDir) {
        let dir = TempDir::new().expect("temp dir");
        let config = AppConfig::from_data_dir(dir.path().to_path_buf()).expect("config");
        (config, dir)
    }

    fn run(config: &AppConfig, command: CliCommand) -> String {
        let mut output = Vec::new();
        execute(config, command, &mut output).expect("execute");
        String::from_utf8(output).expect("utf8")
    }

    fn add(config: &AppConfig, text: &str, due: Option<&str>) -> String {
        run(
            config,
            CliCommand::Add(AddArgs {
                text: text.split_whitespace().map(str::to_string).collect(),
                due_time: due.map(str::to_string),
            }),
        )
    }

    fn first_id(config: &AppConfig) -> String {
        let store = TaskStore::open(SqliteStore::initialize(config).expect("store"));
        store.tasks()[0].id.clone()
    }

    #[test]
    fn add_then_list_reports_summary() {
        let (config, _dir) = temp_config();
        let added = add(&config, "Buy milk", Some("14:30"));
        assert!(added.starts_with("Added Buy milk"));

        let listed = run(&config, CliCommand::List(ListArgs { json: false }));
        assert!(listed.contains("[ ] Buy milk"));
        assert!(listed.contains("Due 02:30 PM"));
        assert!(listed.contains("1 remaining · 0 completed · 1 total"));
    }

    #[test]
    fn add_reports_rejected_due_time() {
        let (config, _dir) = temp_config();
        let added = add(&config, "Call mom", Some("7pm"));
        assert!(added.contains("Ignored due time '7pm'"));
    }

    #[test]
    fn toggle_and_clear_completed() {
        let (config, _dir) = temp_config();
        add(&config, "Ship it", None);
        let id = first_id(&config);

        let toggled = run(&config, CliCommand::Toggle(IdArg { id: id.clone() }));
        assert!(toggled.contains("complete"));

        let cleared = run(&config, CliCommand::ClearCompleted);
        assert!(cleared.contains("Cleared 1 completed task"));

        let listed = run(&config, CliCommand::List(ListArgs { json: false }));
        assert!(listed.contains(EMPTY_SUMMARY));

        let again = run(&config, CliCommand::ClearCompleted);
        assert!(again.contains("No completed tasks to clear"));
    }

    #[test]
    fn edit_with_empty_text_deletes() {
        let (config, _dir) = temp_config();
        add(&config, "Temporary", None);
        let id = first_id(&config);

        let edited = run(
            &config,
            CliCommand::Edit(EditArgs {
                id: id.clone(),
                text: vec![],
            }),
        );
        assert!(edited.contains("Deleted"));

        let missing = run(&config, CliCommand::Toggle(IdArg { id }));
        assert!(missing.contains("Not found"));
    }

    #[test]
    fn delete_command_reports_deleted_and_missing() {
        let (config, _dir) = temp_config();
        add(&config, "Test", None);
        let id = first_id(&config);

        let output = run(
            &config,
            CliCommand::Delete(DeleteArgs {
                ids: vec![id, "missing".into()],
            }),
        );

        assert!(output.contains("Deleted 1 task"));
        assert!(output.contains("Not found: missing"));
    }

    #[test]
    fn list_json_emits_stored_shape() {
        let (config, _dir) = temp_config();
        add(&config, "Json me", Some("09:00"));

        let output = run(&config, CliCommand::List(ListArgs { json: true }));
        let value: serde_json::Value = serde_json::from_str(&output).expect("json");
        assert_eq!(value[0]["text"], "Json me");
        assert_eq!(value[0]["dueTime"], "09:00");
        assert!(value[0]["createdAt"].is_i64());
    }

    #[test]
    fn reset_forgets_everything() {
        let (config, _dir) = temp_config();
        add(&config, "one", None);
        add(&config, "two", None);

        let output = run(&config, CliCommand::Reset);
        assert!(output.contains("Forgot 2 tasks"));

        let listed = run(&config, CliCommand::List(ListArgs { json: false }));
        assert!(listed.contains(EMPTY_SUMMARY));
    }

    #[test]
    fn unopenable_database_still_runs_commands_in_memory() {
        let (config, _dir) = temp_config();
        fs::write(config.db_path(), b"definitely not sqlite").unwrap();

        let added = add(&config, "Buy milk", None);
        assert!(added.starts_with("Added Buy milk"));

        // Nothing was kept, so a fresh invocation sees an empty list.
        let listed = run(&config, CliCommand::List(ListArgs { json: false }));
        assert!(listed.contains(EMPTY_SUMMARY));
    }
}
