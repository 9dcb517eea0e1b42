use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type TaskId = i64;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub status: Status,
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = if self.description.is_empty() {
            "No description"
        } else {
            &self.description
        };
        write!(
            f,
            "[{}] {} (Due: {}, Status: {}) - {}",
            self.id,
            self.title,
            self.due_date.format(DATE_FORMAT),
            self.status,
            description
        )
    }
}

#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Pending, Status::InProgress, Status::Completed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in_progress",
            Status::Completed => "completed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == raw)
            .ok_or_else(|| {
                Error::Validation(format!(
                    "invalid status '{raw}', choose from pending, in_progress, completed"
                ))
            })
    }
}

/// A task that passed validation and is ready to be persisted.
///
/// The fields are private so the only way to obtain one is through
/// [`NewTask::new`] or [`NewTask::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    title: String,
    description: String,
    due_date: NaiveDate,
    status: Status,
}

impl NewTask {
    pub fn new(title: &str, description: &str, due_date: NaiveDate, status: Status) -> Result<Self> {
        Ok(Self {
            title: parse_title(title)?,
            description: description.trim().to_string(),
            due_date,
            status,
        })
    }

    /// Validates raw text fields, as they arrive from flags or prompts.
    ///
    /// A missing description becomes empty and a missing status becomes
    /// [`Status::Pending`].
    pub fn parse(
        title: &str,
        description: Option<&str>,
        due_date: &str,
        status: Option<&str>,
    ) -> Result<Self> {
        let status = match status {
            Some(raw) => raw.parse()?,
            None => Status::default(),
        };
        Self::new(
            title,
            description.unwrap_or_default(),
            parse_due_date(due_date)?,
            status,
        )
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn status(&self) -> Status {
        self.status
    }
}

pub fn parse_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(Error::validation("title is required"));
    }
    Ok(title.to_string())
}

pub fn parse_due_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|_| Error::Validation(format!("invalid due date '{raw}', use YYYY-MM-DD")))
}

/// Accepts only the canonical decimal form, so `+5` and `007` are refused.
pub fn parse_task_id(raw: &str) -> Result<TaskId> {
    let raw = raw.trim();
    raw.parse::<TaskId>()
        .ok()
        .filter(|id| id.to_string() == raw)
        .ok_or_else(|| Error::Validation(format!("invalid task ID '{raw}', it must be an integer")))
}
