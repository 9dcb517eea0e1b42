use crate::error::{Error, Result};
use crate::task::{NewTask, Status, Task, TaskId};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use std::path::Path;
use tracing::info;

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    due_date TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'pending'
        CHECK(status IN ('pending', 'in_progress', 'completed'))
)";
const INSERT_TASK: &str =
    "INSERT INTO tasks (title, description, due_date, status) VALUES (?1, ?2, ?3, ?4)";
const SELECT_TASK: &str =
    "SELECT id, title, description, due_date, status FROM tasks WHERE id = ?1";
const SELECT_TASKS: &str =
    "SELECT id, title, description, due_date, status FROM tasks ORDER BY due_date ASC, id ASC";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?1 WHERE id = ?2";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Durable storage of tasks.
///
/// Every write is visible to the next reader as soon as the call returns.
#[cfg_attr(test, mockall::automock)]
pub trait TaskStore {
    /// Persists a validated task and returns it with its assigned ID.
    fn add(&self, new_task: NewTask) -> Result<Task>;

    fn get(&self, id: TaskId) -> Result<Option<Task>>;

    /// Overwrites the status of a single task.
    ///
    /// # Returns
    ///
    /// The updated task, or [`Error::NotFound`] if no task has that ID.
    fn update_status(&self, id: TaskId, status: Status) -> Result<Task>;

    /// Removes a task permanently. Its ID is never handed out again.
    fn delete(&self, id: TaskId) -> Result<()>;

    /// All tasks, earliest due date first, ties broken by ID.
    fn list_all(&self) -> Result<Vec<Task>>;
}

pub struct SqliteTaskStore {
    conn: Connection,
}

impl SqliteTaskStore {
    /// Opens the database file at `path`, creating it and its schema if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let existed = path.exists();
        let store = Self::with_connection(Connection::open(path)?)?;
        if !existed {
            info!(path = %path.display(), "database initialized");
        }
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA_TASKS, [])?;
        Ok(Self { conn })
    }
}

impl TaskStore for SqliteTaskStore {
    #[tracing::instrument(skip(self))]
    fn add(&self, new_task: NewTask) -> Result<Task> {
        self.conn.execute(
            INSERT_TASK,
            params![
                new_task.title(),
                new_task.description(),
                new_task.due_date(),
                new_task.status()
            ],
        )?;
        Ok(Task {
            id: self.conn.last_insert_rowid(),
            title: new_task.title().to_string(),
            description: new_task.description().to_string(),
            due_date: new_task.due_date(),
            status: new_task.status(),
        })
    }

    fn get(&self, id: TaskId) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row(SELECT_TASK, params![id], task_from_row)
            .optional()?;
        Ok(task)
    }

    #[tracing::instrument(skip(self))]
    fn update_status(&self, id: TaskId, status: Status) -> Result<Task> {
        let changed = self.conn.execute(UPDATE_STATUS, params![status, id])?;
        if changed == 0 {
            return Err(Error::NotFound(id));
        }
        self.get(id)?.ok_or(Error::NotFound(id))
    }

    #[tracing::instrument(skip(self))]
    fn delete(&self, id: TaskId) -> Result<()> {
        let removed = self.conn.execute(DELETE_TASK, params![id])?;
        if removed == 0 {
            return Err(Error::NotFound(id));
        }
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(SELECT_TASKS)?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        due_date: row.get("due_date")?,
        status: row.get("status")?,
    })
}

impl ToSql for Status {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Status {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let raw = value.as_str()?;
        raw.parse()
            .map_err(|_| FromSqlError::Other(format!("unknown status '{raw}' in tasks table").into()))
    }
}
