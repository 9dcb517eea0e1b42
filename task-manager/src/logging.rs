use crate::error::Error;
use std::fmt;
use tracing::{Level, error, info, warn};

/// The store operations that are reported to the operation log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Update,
    Delete,
    List,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Add => "add",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::List => "list",
        };
        f.write_str(name)
    }
}

/// Side channel that records every attempted operation and its outcome.
///
/// Components receive it at construction so tests can swap in a capturing
/// implementation.
#[cfg_attr(test, mockall::automock)]
pub trait OperationLog {
    fn attempted(&self, operation: Operation, detail: &str);
    fn succeeded(&self, operation: Operation, detail: &str);
    fn failed(&self, operation: Operation, error: &Error);
}

/// Writes operation events through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingOperationLog;

impl OperationLog for TracingOperationLog {
    fn attempted(&self, operation: Operation, detail: &str) {
        info!(%operation, "attempting: {detail}");
    }

    fn succeeded(&self, operation: Operation, detail: &str) {
        info!(%operation, outcome = "success", "{detail}");
    }

    fn failed(&self, operation: Operation, error: &Error) {
        match error {
            Error::Validation(_) | Error::NotFound(_) => {
                warn!(%operation, outcome = "failure", "{error}")
            }
            _ => error!(%operation, outcome = "failure", error = ?error, "{error}"),
        }
    }
}

/// Installs the global subscriber. Events go to stderr so stdout only
/// carries command output.
pub fn init_tracing(level: Level) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}
