use crate::command::Request;
use crate::error::{Error, Result};
use crate::logging::{Operation, OperationLog};
use crate::store::TaskStore;
use crate::task::{Task, TaskId};

/// What a request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Task),
    Updated(Task),
    Deleted(TaskId),
    Listed(Vec<Task>),
    Help,
    Exit,
}

impl Outcome {
    fn summary(&self) -> String {
        match self {
            Outcome::Added(task) => format!("task {} '{}' added", task.id, task.title),
            Outcome::Updated(task) => {
                format!("task {} updated to status '{}'", task.id, task.status)
            }
            Outcome::Deleted(id) => format!("task {id} deleted"),
            Outcome::Listed(tasks) => format!("{} task(s) listed", tasks.len()),
            Outcome::Help => "help shown".to_string(),
            Outcome::Exit => "exit".to_string(),
        }
    }
}

/// Runs requests against a store, one at a time.
///
/// Every store operation is reported to the operation log before it runs
/// and again with its outcome.
pub struct TaskService<'a, S: TaskStore, L: OperationLog> {
    store: &'a S,
    log: &'a L,
}

impl<'a, S: TaskStore, L: OperationLog> TaskService<'a, S, L> {
    pub fn new(store: &'a S, log: &'a L) -> Self {
        Self { store, log }
    }

    pub fn execute(&self, request: Request) -> Result<Outcome> {
        let Some(operation) = request.operation() else {
            return self.perform(request);
        };
        self.log.attempted(operation, &request.to_string());
        let result = self.perform(request);
        match &result {
            Ok(outcome) => self.log.succeeded(operation, &outcome.summary()),
            Err(err) => self.log.failed(operation, err),
        }
        result
    }

    /// Records a request that was refused before it reached the store and
    /// hands the error back to the caller.
    pub fn reject(&self, operation: Operation, err: Error) -> Error {
        self.log.failed(operation, &err);
        err
    }

    fn perform(&self, request: Request) -> Result<Outcome> {
        match request {
            Request::Add { new_task } => self.store.add(new_task).map(Outcome::Added),
            Request::Update { id, status } => {
                self.store.update_status(id, status).map(Outcome::Updated)
            }
            Request::Delete { id } => self.store.delete(id).map(|()| Outcome::Deleted(id)),
            Request::List => self.store.list_all().map(Outcome::Listed),
            Request::Help => Ok(Outcome::Help),
            Request::Exit => Ok(Outcome::Exit),
        }
    }
}
