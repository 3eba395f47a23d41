use anyhow::Result;
use clap::Parser;

use taskdeck::telemetry::{init_tracing, LogSink};

fn main() -> Result<()> {
    let cli = taskdeck::cli::Cli::parse();
    let config = taskdeck::config::from_cli(&cli)?;

    match cli.command.clone() {
        Some(taskdeck::cli::CliCommand::Tui) | None => {
            init_tracing(cli.log_filter.as_deref(), LogSink::File(config.log_path()))?;
            taskdeck::tui::run(config)?;
        }
        Some(command) => {
            // Only warnings reach stderr unless --log asks for more.
            init_tracing(
                Some(cli.log_filter.as_deref().unwrap_or("warn")),
                LogSink::Stderr,
            )?;
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            taskdeck::commands::execute(&config, command, &mut handle)?;
        }
    }

    Ok(())
}
