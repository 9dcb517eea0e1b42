use crate::command::HELP;
use crate::error::Result;
use crate::service::Outcome;
use clap::ValueEnum;
use serde_json::json;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Formats an outcome for the user.
pub fn render(outcome: &Outcome, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(outcome)),
        OutputFormat::Json => render_json(outcome),
    }
}

fn render_text(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Added(task) => format!("Task added with ID {}\n{task}", task.id),
        Outcome::Updated(task) => {
            format!("Task {} updated to status '{}'\n{task}", task.id, task.status)
        }
        Outcome::Deleted(id) => format!("Task {id} deleted."),
        Outcome::Listed(tasks) if tasks.is_empty() => "No tasks found.".to_string(),
        Outcome::Listed(tasks) => tasks
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        Outcome::Help => HELP.to_string(),
        Outcome::Exit => "Goodbye!".to_string(),
    }
}

fn render_json(outcome: &Outcome) -> Result<String> {
    let value = match outcome {
        Outcome::Added(task) | Outcome::Updated(task) => serde_json::to_value(task)?,
        Outcome::Deleted(id) => json!({ "deleted": id }),
        Outcome::Listed(tasks) => serde_json::to_value(tasks)?,
        Outcome::Help | Outcome::Exit => return Ok(render_text(outcome)),
    };
    Ok(serde_json::to_string_pretty(&value)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Status, Task};
    use chrono::NaiveDate;

    fn task(id: i64, title: &str, due_date: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            due_date: NaiveDate::parse_from_str(due_date, "%Y-%m-%d").unwrap(),
            status: Status::Pending,
        }
    }

    #[test]
    fn empty_list_says_so() {
        let text = render(&Outcome::Listed(vec![]), OutputFormat::Text).unwrap();
        assert_eq!(text, "No tasks found.");
    }

    #[test]
    fn list_prints_one_task_per_line() {
        let outcome = Outcome::Listed(vec![
            task(2, "B", "2025-01-01"),
            task(1, "A", "2025-03-01"),
        ]);

        let text = render(&outcome, OutputFormat::Text).unwrap();

        assert_eq!(
            text,
            "[2] B (Due: 2025-01-01, Status: pending) - No description\n\
             [1] A (Due: 2025-03-01, Status: pending) - No description"
        );
    }

    #[test]
    fn json_list_is_an_array_of_tasks() {
        let outcome = Outcome::Listed(vec![task(1, "Buy milk", "2025-02-10")]);

        let text = render(&outcome, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(
            parsed,
            json!([{
                "id": 1,
                "title": "Buy milk",
                "description": "",
                "due_date": "2025-02-10",
                "status": "pending"
            }])
        );
    }

    #[test]
    fn json_delete_names_the_id() {
        let text = render(&Outcome::Deleted(4), OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, json!({ "deleted": 4 }));
    }
}
