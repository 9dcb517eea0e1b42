use anyhow::Context;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use task_manager::command::cli::Cli;
use task_manager::config::Config;
use task_manager::logging::{OperationLog, TracingOperationLog, init_tracing};
use task_manager::render::render;
use task_manager::service::TaskService;
use task_manager::shell::Shell;
use task_manager::{Error, SqliteTaskStore};
use tracing::warn;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            let code = err.downcast_ref::<Error>().map_or(1, Error::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    init_tracing(config.log_level()?);

    let log = TracingOperationLog;
    let format = cli.format;
    let operation = cli.operation();
    let request = cli.into_request().inspect_err(|err| match operation {
        Some(operation) => log.failed(operation, err),
        None => warn!("rejected invocation: {err}"),
    })?;

    let store = SqliteTaskStore::open(&config.db_path).with_context(|| {
        format!("failed to open task database at {}", config.db_path.display())
    })?;
    let service = TaskService::new(&store, &log);

    match request {
        Some(request) => {
            let outcome = service.execute(request)?;
            println!("{}", render(&outcome, format)?);
        }
        None => {
            let stdin = io::stdin();
            Shell::new(stdin.lock(), io::stdout(), service, format).run()?;
        }
    }
    Ok(())
}
