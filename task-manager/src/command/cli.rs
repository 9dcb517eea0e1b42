use super::Request;
use crate::error::{Error, Result};
use crate::logging::Operation;
use crate::render::OutputFormat;
use crate::task::{NewTask, parse_task_id};
use clap::Parser;
use std::path::PathBuf;

/// Task Manager CLI
///
/// Runs one operation and exits, or starts the interactive shell when no
/// operation flag is given.
#[derive(Parser, Debug)]
#[command(
    name = "task-manager",
    version,
    after_help = "Example: task-manager --add --title 'Buy milk' --due_date 2025-02-10"
)]
pub struct Cli {
    /// Add a new task
    #[arg(long)]
    pub add: bool,

    /// Update a task's status
    #[arg(long, value_name = "TASK_ID", num_args = 0..=1)]
    pub update: Option<Option<String>>,

    /// Delete a task
    #[arg(long, value_name = "TASK_ID", num_args = 0..=1)]
    pub delete: Option<Option<String>>,

    /// List all tasks ordered by due date
    #[arg(long)]
    pub list: bool,

    /// Title of the task
    #[arg(long)]
    pub title: Option<String>,

    /// Description of the task
    #[arg(long)]
    pub description: Option<String>,

    /// Due date of the task
    #[arg(long = "due_date", visible_alias = "due-date", value_name = "YYYY-MM-DD")]
    pub due_date: Option<String>,

    /// pending, in_progress or completed (defaults to pending when adding)
    #[arg(long)]
    pub status: Option<String>,

    /// Database file, overrides the configured path
    #[arg(long, value_name = "PATH")]
    pub db: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// The operation the flags ask for, `None` when there is no single one.
    pub fn operation(&self) -> Option<Operation> {
        let mut selected = [
            (self.add, Operation::Add),
            (self.update.is_some(), Operation::Update),
            (self.delete.is_some(), Operation::Delete),
            (self.list, Operation::List),
        ]
        .into_iter()
        .filter_map(|(flag, operation)| flag.then_some(operation));
        match (selected.next(), selected.next()) {
            (Some(operation), None) => Some(operation),
            _ => None,
        }
    }

    /// Turns the parsed flags into a request.
    ///
    /// Returns `Ok(None)` when no operation flag was given, which selects
    /// interactive mode.
    pub fn into_request(self) -> Result<Option<Request>> {
        let selected = [
            self.add,
            self.update.is_some(),
            self.delete.is_some(),
            self.list,
        ]
        .into_iter()
        .filter(|flag| *flag)
        .count();
        if selected > 1 {
            return Err(Error::validation(
                "only one of --add, --update, --delete or --list may be given",
            ));
        }

        if self.add {
            let title = self
                .title
                .ok_or_else(|| Error::validation("--add requires --title"))?;
            let due_date = self
                .due_date
                .ok_or_else(|| Error::validation("--add requires --due_date"))?;
            let new_task = NewTask::parse(
                &title,
                self.description.as_deref(),
                &due_date,
                self.status.as_deref(),
            )?;
            return Ok(Some(Request::Add { new_task }));
        }

        if let Some(id) = self.update {
            let id = id.ok_or_else(|| Error::validation("--update requires a task ID"))?;
            let status = self
                .status
                .ok_or_else(|| Error::validation("--update requires --status"))?;
            return Ok(Some(Request::Update {
                id: parse_task_id(&id)?,
                status: status.parse()?,
            }));
        }

        if let Some(id) = self.delete {
            let id = id.ok_or_else(|| Error::validation("--delete requires a task ID"))?;
            return Ok(Some(Request::Delete {
                id: parse_task_id(&id)?,
            }));
        }

        if self.list {
            return Ok(Some(Request::List));
        }

        let stray = self.title.is_some()
            || self.description.is_some()
            || self.due_date.is_some()
            || self.status.is_some();
        if stray {
            return Err(Error::validation(
                "task fields were given without --add or --update",
            ));
        }
        Ok(None)
    }
}
