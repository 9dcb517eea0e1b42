pub mod cli;
pub mod interactive;

use crate::logging::Operation;
use crate::task::{NewTask, Status, TaskId};
use std::fmt;

pub const HELP: &str = "\
Commands:
  add     - Add a new task
  update  - Update task status
  delete  - Delete a task
  list    - List all tasks
  help    - Show this menu
  exit    - Exit the Task Manager";

/// One fully validated request, from either the command line or the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Add { new_task: NewTask },
    Update { id: TaskId, status: Status },
    Delete { id: TaskId },
    List,
    Help,
    Exit,
}

impl Request {
    /// The store operation this request performs, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Request::Add { .. } => Some(Operation::Add),
            Request::Update { .. } => Some(Operation::Update),
            Request::Delete { .. } => Some(Operation::Delete),
            Request::List => Some(Operation::List),
            Request::Help | Request::Exit => None,
        }
    }
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Request::Add { new_task } => write!(
                f,
                "add task '{}' due {} with status '{}'",
                new_task.title(),
                new_task.due_date(),
                new_task.status()
            ),
            Request::Update { id, status } => write!(f, "set task {id} to status '{status}'"),
            Request::Delete { id } => write!(f, "delete task {id}"),
            Request::List => f.write_str("list tasks"),
            Request::Help => f.write_str("help"),
            Request::Exit => f.write_str("exit"),
        }
    }
}
