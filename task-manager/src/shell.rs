use crate::command::interactive::{Keyword, Prompted, Prompter, prompt_request};
use crate::error::{Error, Result};
use crate::logging::OperationLog;
use crate::render::{OutputFormat, render};
use crate::service::{Outcome, TaskService};
use crate::store::TaskStore;
use std::io::{BufRead, Write};
use tracing::debug;

const COMMAND_PROMPT: &str = "\nEnter command (add, update, delete, list, exit, or help): ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    AwaitingCommand,
    Executing,
    Done,
}

/// The interactive read-evaluate-print loop.
///
/// Errors from a single command are printed and the loop carries on; only a
/// failure of the terminal itself ends it early.
pub struct Shell<'a, R, W, S: TaskStore, L: OperationLog> {
    prompter: Prompter<R, W>,
    service: TaskService<'a, S, L>,
    format: OutputFormat,
    state: ShellState,
}

impl<'a, R: BufRead, W: Write, S: TaskStore, L: OperationLog> Shell<'a, R, W, S, L> {
    pub fn new(input: R, output: W, service: TaskService<'a, S, L>, format: OutputFormat) -> Self {
        Self {
            prompter: Prompter::new(input, output),
            service,
            format,
            state: ShellState::AwaitingCommand,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Runs until `exit` or end of input.
    pub fn run(mut self) -> Result<()> {
        writeln!(self.prompter.output(), "\nWelcome to Task Manager CLI!")?;
        writeln!(
            self.prompter.output(),
            "Type 'help' to see available commands. Type 'exit' to quit."
        )?;
        while self.state != ShellState::Done {
            self.step()?;
        }
        writeln!(self.prompter.output(), "Exiting Task Manager. Goodbye!")?;
        Ok(())
    }

    /// Reads and handles one command line.
    pub fn step(&mut self) -> Result<()> {
        let Some(line) = self.prompter.read_line(COMMAND_PROMPT)? else {
            self.state = ShellState::Done;
            return Ok(());
        };
        if line.is_empty() {
            return Ok(());
        }

        self.state = ShellState::Executing;
        self.state = match self.execute_line(&line) {
            Ok(next) => next,
            Err(Error::Io(err)) => return Err(Error::Io(err)),
            Err(err) => {
                writeln!(self.prompter.output(), "Error: {err}")?;
                ShellState::AwaitingCommand
            }
        };
        Ok(())
    }

    fn execute_line(&mut self, line: &str) -> Result<ShellState> {
        let keyword = match line.parse::<Keyword>() {
            Ok(keyword) => keyword,
            Err(unknown) => {
                writeln!(self.prompter.output(), "{unknown}")?;
                return Ok(ShellState::AwaitingCommand);
            }
        };

        let request = match prompt_request(keyword, &mut self.prompter)? {
            Prompted::Value(request) => request,
            Prompted::Back => return Ok(ShellState::AwaitingCommand),
            Prompted::GaveUp(err) => {
                return Err(match keyword.operation() {
                    Some(operation) => self.service.reject(operation, err),
                    None => err,
                });
            }
            Prompted::Closed => return Ok(ShellState::Done),
        };
        debug!(%request, "executing");

        let outcome = self.service.execute(request)?;
        if outcome == Outcome::Exit {
            return Ok(ShellState::Done);
        }
        let text = render(&outcome, self.format)?;
        writeln!(self.prompter.output(), "{text}")?;
        Ok(ShellState::AwaitingCommand)
    }
}
