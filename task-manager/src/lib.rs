pub mod command;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod service;
pub mod shell;
pub mod store;
pub mod task;

pub use error::{Error, Result};
pub use store::{SqliteTaskStore, TaskStore};
pub use task::{NewTask, Status, Task, TaskId};
