use std::io::Cursor;
use task_manager::render::OutputFormat;
use task_manager::service::TaskService;
use task_manager::shell::Shell;
use task_manager::{SqliteTaskStore, Status, TaskStore};

mod common;

struct Session {
    store: SqliteTaskStore,
    log: common::RecordingLog,
}

impl Session {
    fn new() -> Self {
        Self {
            store: common::setup_store(),
            log: common::RecordingLog::default(),
        }
    }

    /// Feeds `input` to a fresh shell and returns everything it printed.
    fn run(&self, input: &str) -> String {
        let mut output = Vec::new();
        let service = TaskService::new(&self.store, &self.log);
        Shell::new(Cursor::new(input), &mut output, service, OutputFormat::Text)
            .run()
            .expect("shell ended with an error");
        String::from_utf8(output).unwrap()
    }
}

#[test]
fn exit_ends_the_loop() {
    let session = Session::new();

    let printed = session.run("exit\nlist\n");

    assert!(printed.contains("Welcome to Task Manager CLI!"));
    assert!(printed.ends_with("Exiting Task Manager. Goodbye!\n"));
    assert!(session.log.entries().is_empty(), "list after exit must not run");
}

#[test]
fn end_of_input_ends_the_loop() {
    let session = Session::new();

    let printed = session.run("");

    assert!(printed.ends_with("Exiting Task Manager. Goodbye!\n"));
}

#[test]
fn add_then_list_through_prompts() {
    let session = Session::new();

    let printed = session.run("add\nBuy milk\n2025-02-10\n\n\nlist\nexit\n");

    assert!(printed.contains("Task added with ID 1"));
    assert!(printed.contains("[1] Buy milk (Due: 2025-02-10, Status: pending) - No description"));
    assert_eq!(session.store.list_all().unwrap().len(), 1);
}

#[test]
fn unknown_command_keeps_the_loop_alive() {
    let session = Session::new();

    let printed = session.run("remove\nlist\nexit\n");

    assert!(printed.contains("unknown command 'remove', try `help`"));
    assert!(printed.contains("No tasks found."));
}

#[test]
fn help_lists_the_commands() {
    let session = Session::new();

    let printed = session.run("HELP\nexit\n");

    for command in ["add", "update", "delete", "list", "help", "exit"] {
        assert!(printed.contains(&format!("  {command}")), "missing {command}");
    }
}

#[test]
fn errors_are_reported_and_the_loop_continues() {
    let session = Session::new();

    let printed = session.run("delete\n99\nupdate\n1\ncompleted\nlist\nexit\n");

    assert_eq!(
        printed.matches("Error: task with ID").count(),
        2,
        "both failures are printed: {printed}"
    );
    assert!(printed.contains("No tasks found."));
    assert_eq!(
        session.log.entries(),
        vec![
            "delete attempted: delete task 99",
            "delete failed: task with ID 99 does not exist",
            "update attempted: set task 1 to status 'completed'",
            "update failed: task with ID 1 does not exist",
            "list attempted: list tasks",
            "list succeeded: 0 task(s) listed",
        ]
    );
}

#[test]
fn update_changes_the_stored_status() {
    let session = Session::new();
    session
        .store
        .add(common::new_task("Buy milk", "2025-02-10"))
        .unwrap();

    let printed = session.run("update\n1\nin_progress\nexit\n");

    assert!(printed.contains("Task 1 updated to status 'in_progress'"));
    assert_eq!(
        session.store.get(1).unwrap().map(|task| task.status),
        Some(Status::InProgress)
    );
}

#[test]
fn back_returns_to_the_command_prompt() {
    let session = Session::new();

    let printed = session.run("add\nback\nlist\nexit\n");

    assert!(printed.contains("No tasks found."));
    assert!(session.store.list_all().unwrap().is_empty());
}

#[test]
fn exhausted_retries_abandon_the_command_without_writing() {
    let session = Session::new();

    let printed = session.run("add\nBuy milk\nsoon\nlater\nnever\nlist\nexit\n");

    assert!(printed.contains("(attempt 2 of 3), please try again"));
    assert!(printed.contains("Error: validation failed: invalid due date 'never'"));
    assert!(printed.contains("No tasks found."));
    assert!(session.store.list_all().unwrap().is_empty());
    assert_eq!(
        session.log.entries(),
        vec![
            "add failed: validation failed: invalid due date 'never', use YYYY-MM-DD",
            "list attempted: list tasks",
            "list succeeded: 0 task(s) listed",
        ]
    );
}

#[test]
fn storage_failures_are_reported_and_the_loop_continues() {
    let store = common::ReadOnlyStore::new();
    let log = common::RecordingLog::default();
    let mut output = Vec::new();

    Shell::new(
        Cursor::new("add\nBuy milk\n2025-02-10\n\n\ndelete\n1\nlist\nexit\n"),
        &mut output,
        TaskService::new(&store, &log),
        OutputFormat::Text,
    )
    .run()
    .expect("a storage failure must not end the shell");

    let printed = String::from_utf8(output).unwrap();
    assert_eq!(
        printed
            .matches("Error: storage failure: attempt to write a readonly database")
            .count(),
        2,
        "{printed}"
    );
    assert!(printed.contains("No tasks found."));
    assert!(printed.ends_with("Exiting Task Manager. Goodbye!\n"));
    assert!(log.entries().contains(
        &"add failed: storage failure: attempt to write a readonly database".to_string()
    ));
}

#[test]
fn blank_lines_are_ignored() {
    let session = Session::new();

    let printed = session.run("\n   \nexit\n");

    assert!(!printed.contains("unknown command"));
}
