use std::cell::RefCell;
use task_manager::error::Error;
use task_manager::logging::{Operation, OperationLog};
use task_manager::{NewTask, SqliteTaskStore, Status, Task, TaskId, TaskStore};

/// Keeps every operation event in memory, in order.
#[derive(Default)]
pub struct RecordingLog {
    entries: RefCell<Vec<String>>,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }
}

impl OperationLog for RecordingLog {
    fn attempted(&self, operation: Operation, detail: &str) {
        self.entries
            .borrow_mut()
            .push(format!("{operation} attempted: {detail}"));
    }

    fn succeeded(&self, operation: Operation, detail: &str) {
        self.entries
            .borrow_mut()
            .push(format!("{operation} succeeded: {detail}"));
    }

    fn failed(&self, operation: Operation, error: &Error) {
        self.entries
            .borrow_mut()
            .push(format!("{operation} failed: {error}"));
    }
}

/// Serves reads from an in-memory database and refuses every write the way
/// SQLite does for a read-only file.
pub struct ReadOnlyStore {
    inner: SqliteTaskStore,
}

impl ReadOnlyStore {
    pub fn new() -> Self {
        Self {
            inner: setup_store(),
        }
    }

    fn refuse<T>(&self) -> task_manager::Result<T> {
        Err(Error::Storage(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_READONLY),
            Some("attempt to write a readonly database".to_string()),
        )))
    }
}

impl TaskStore for ReadOnlyStore {
    fn add(&self, _new_task: NewTask) -> task_manager::Result<Task> {
        self.refuse()
    }

    fn get(&self, id: TaskId) -> task_manager::Result<Option<Task>> {
        self.inner.get(id)
    }

    fn update_status(&self, _id: TaskId, _status: Status) -> task_manager::Result<Task> {
        self.refuse()
    }

    fn delete(&self, _id: TaskId) -> task_manager::Result<()> {
        self.refuse()
    }

    fn list_all(&self) -> task_manager::Result<Vec<Task>> {
        self.inner.list_all()
    }
}

pub fn setup_store() -> SqliteTaskStore {
    SqliteTaskStore::open_in_memory().expect("Failed to open in-memory store")
}

pub fn new_task(title: &str, due_date: &str) -> NewTask {
    NewTask::parse(title, None, due_date, None).expect("Failed to build task")
}
