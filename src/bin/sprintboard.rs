//! Command-line front end for CSV task imports.
//!
//! Usage:
//!
//! ```text
//! sprintboard preview <csv-path>
//! sprintboard board <csv-path> [sprint-name]
//! ```
//!
//! `preview` parses the file and prints the task and sprint counts with any
//! warnings. `board` imports the file into a fresh in-memory backend and
//! prints the resulting kanban board: the named sprint's tasks, or every
//! task when no sprint is named.
//!
//! Log output goes to stderr and is filtered by `SPRINTBOARD_LOG`.

use std::io::{self, Write};

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use sprintboard::{
    backend::{Backend, BackendServices},
    board::{Board, RenderError, render_board, render_import_preview, render_import_summary},
    config::BackendConfig,
    import::{ImportError, parse_import_csv, run_import},
    logging::init_logging,
    tracker::services::{TrackerError, TrackerService},
};
use thiserror::Error;
use tokio::runtime::Builder;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that end a command.
#[derive(Debug, Error)]
enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("runtime init failed: {0}")]
    RuntimeInit(#[source] io::Error),
    #[error(transparent)]
    Import(#[from] ImportError),
    #[error(transparent)]
    Tracker(#[from] TrackerError),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error("no sprint named '{0}' in the import")]
    UnknownSprint(String),
    #[error("failed to write output: {0}")]
    Output(#[source] io::Error),
}

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Preview {
        csv_path: Utf8PathBuf,
    },
    Board {
        csv_path: Utf8PathBuf,
        sprint_name: Option<String>,
    },
}

fn main() -> Result<(), BoxError> {
    init_logging("info");
    let command = parse_args(collect_args()?.into_iter())?;
    let output = run(command)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").map_err(CliError::Output)?;
    Ok(())
}

fn collect_args() -> Result<Vec<String>, CliError> {
    std::env::args_os()
        .map(|arg_os| {
            arg_os
                .into_string()
                .map_err(|_| CliError::InvalidArgs("argument is not valid UTF-8".into()))
        })
        .collect()
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Command, CliError> {
    let _program = args.next();
    let operation = args
        .next()
        .ok_or_else(|| CliError::InvalidArgs("missing command; expected preview or board".into()))?;
    let csv_path = args
        .next()
        .map(Utf8PathBuf::from)
        .ok_or_else(|| CliError::InvalidArgs("missing CSV path argument".into()))?;
    let command = match operation.as_str() {
        "preview" => Command::Preview { csv_path },
        "board" => Command::Board {
            csv_path,
            sprint_name: args.next(),
        },
        other => {
            return Err(CliError::InvalidArgs(format!(
                "unknown command '{other}'; expected preview or board"
            )));
        }
    };
    if let Some(extra) = args.next() {
        return Err(CliError::InvalidArgs(format!(
            "unexpected extra argument: {extra}"
        )));
    }
    Ok(command)
}

fn run(command: Command) -> Result<String, CliError> {
    match command {
        Command::Preview { csv_path } => {
            let text = read_csv(&csv_path)?;
            Ok(render_import_preview(&parse_import_csv(&text))?)
        }
        Command::Board {
            csv_path,
            sprint_name,
        } => {
            let text = read_csv(&csv_path)?;
            let runtime = Builder::new_current_thread()
                .enable_all()
                .build()
                .map_err(CliError::RuntimeInit)?;
            runtime.block_on(import_and_render(&text, sprint_name.as_deref()))
        }
    }
}

fn local_backend() -> Backend {
    let services = BackendServices::in_memory();
    match BackendConfig::from_env() {
        Ok(config) => Backend::initialize(Ok(config), services),
        Err(err) => {
            tracing::info!(reason = %err, "using a local in-memory backend");
            Backend::connected(services)
        }
    }
}

async fn import_and_render(text: &str, sprint_name: Option<&str>) -> Result<String, CliError> {
    let tracker = TrackerService::new(&local_backend());
    let summary = run_import(&tracker, text, &[]).await?;
    let mut output = render_import_summary(&summary)?;

    let (title, tasks) = match sprint_name {
        Some(name) => {
            let sprints = tracker.list_sprints().await?;
            let sprint = sprints
                .iter()
                .find(|sprint| sprint.name == name)
                .ok_or_else(|| CliError::UnknownSprint(name.to_owned()))?;
            (name.to_owned(), tracker.list_tasks(Some(&sprint.id)).await?)
        }
        None => ("All tasks".to_owned(), tracker.list_all_tasks().await?),
    };
    let board = Board::from_tasks(tasks);
    if !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    output.push('\n');
    output.push_str(&render_board(&title, &board, &[])?);
    Ok(output)
}

fn read_csv(path: &Utf8Path) -> Result<String, CliError> {
    let read_error = |source: io::Error| CliError::Read {
        path: path.to_owned(),
        source,
    };
    let parent = match path.parent() {
        Some(dir) if !dir.as_str().is_empty() => dir,
        _ => Utf8Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(io::Error::new(
            io::ErrorKind::InvalidInput,
            "path has no file name",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read_to_string(file_name).map_err(read_error)
}
