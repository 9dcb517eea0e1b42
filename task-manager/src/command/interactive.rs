use super::Request;
use crate::error::{Error, Result};
use crate::logging::Operation;
use crate::task::{NewTask, Status, parse_due_date, parse_task_id, parse_title};
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::debug;

/// How many times a single field is asked for before the command is dropped.
pub const MAX_FIELD_ATTEMPTS: usize = 3;

/// Typed at any prompt to abandon the current command.
pub const BACK: &str = "back";

/// Top-level words understood at the command prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Add,
    Update,
    Delete,
    List,
    Help,
    Exit,
}

impl Keyword {
    /// The store operation the keyword leads to, if any.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Keyword::Add => Some(Operation::Add),
            Keyword::Update => Some(Operation::Update),
            Keyword::Delete => Some(Operation::Delete),
            Keyword::List => Some(Operation::List),
            Keyword::Help | Keyword::Exit => None,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown command '{0}', try `help`")]
pub struct UnknownCommand(pub String);

impl FromStr for Keyword {
    type Err = UnknownCommand;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        match line.trim().to_ascii_lowercase().as_str() {
            "add" => Ok(Keyword::Add),
            "update" => Ok(Keyword::Update),
            "delete" => Ok(Keyword::Delete),
            "list" => Ok(Keyword::List),
            "help" => Ok(Keyword::Help),
            "exit" => Ok(Keyword::Exit),
            _ => Err(UnknownCommand(line.trim().to_string())),
        }
    }
}

/// Result of asking the user for something.
#[derive(Debug)]
pub enum Prompted<T> {
    Value(T),
    /// The user typed `back`.
    Back,
    /// Every attempt was rejected; carries the last rejection.
    GaveUp(Error),
    /// Input ended.
    Closed,
}

/// Unwraps a [`Prompted::Value`] or returns the other variants from the
/// enclosing function.
macro_rules! take {
    ($prompted:expr) => {
        match $prompted {
            Prompted::Value(value) => value,
            Prompted::Back => return Ok(Prompted::Back),
            Prompted::GaveUp(err) => return Ok(Prompted::GaveUp(err)),
            Prompted::Closed => return Ok(Prompted::Closed),
        }
    };
}

/// Line-oriented question and answer over any reader/writer pair.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Prints `prompt` and reads one trimmed line, `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks for one field until `parse` accepts it, at most
    /// [`MAX_FIELD_ATTEMPTS`] times.
    pub fn field<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> Result<Prompted<T>> {
        let mut attempt = 1;
        loop {
            let Some(answer) = self.read_line(prompt)? else {
                return Ok(Prompted::Closed);
            };
            if answer.eq_ignore_ascii_case(BACK) {
                return Ok(Prompted::Back);
            }
            match parse(&answer) {
                Ok(value) => return Ok(Prompted::Value(value)),
                Err(err) if attempt < MAX_FIELD_ATTEMPTS => {
                    self.reprompt(attempt, &err)?;
                    attempt += 1;
                }
                Err(err) => return Ok(Prompted::GaveUp(err)),
            }
        }
    }

    fn reprompt(&mut self, attempt: usize, err: &Error) -> Result<()> {
        debug!(attempt, "re-prompting after rejected input: {err}");
        writeln!(
            self.output,
            "{err} (attempt {attempt} of {MAX_FIELD_ATTEMPTS}), please try again"
        )?;
        Ok(())
    }
}

/// Collects the fields `keyword` needs and builds the request.
pub fn prompt_request<R: BufRead, W: Write>(
    keyword: Keyword,
    prompter: &mut Prompter<R, W>,
) -> Result<Prompted<Request>> {
    match keyword {
        Keyword::Add => prompt_add(prompter),
        Keyword::Update => prompt_update(prompter),
        Keyword::Delete => prompt_delete(prompter),
        Keyword::List => Ok(Prompted::Value(Request::List)),
        Keyword::Help => Ok(Prompted::Value(Request::Help)),
        Keyword::Exit => Ok(Prompted::Value(Request::Exit)),
    }
}

fn prompt_add<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> Result<Prompted<Request>> {
    let title = take!(prompter.field("Enter task title (or type 'back' to return): ", parse_title)?);
    let due_date = take!(prompter.field("Enter due date (YYYY-MM-DD): ", parse_due_date)?);
    let description = take!(prompter.field("Enter description (optional): ", |raw| Ok(raw.to_string()))?);
    let status = take!(prompter.field(
        "Enter status (pending, in_progress, completed) [pending]: ",
        parse_optional_status
    )?);
    let new_task = NewTask::new(&title, &description, due_date, status)?;
    Ok(Prompted::Value(Request::Add { new_task }))
}

fn prompt_update<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Prompted<Request>> {
    let id = take!(prompter.field("Enter task ID to update (or 'back' to return): ", parse_task_id)?);
    let status = take!(prompter.field(
        "Enter new status (pending, in_progress, completed): ",
        |raw| raw.parse::<Status>()
    )?);
    Ok(Prompted::Value(Request::Update { id, status }))
}

fn prompt_delete<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
) -> Result<Prompted<Request>> {
    let id = take!(prompter.field("Enter task ID to delete (or 'back' to return): ", parse_task_id)?);
    Ok(Prompted::Value(Request::Delete { id }))
}

fn parse_optional_status(raw: &str) -> Result<Status> {
    if raw.is_empty() {
        return Ok(Status::default());
    }
    raw.parse()
}
