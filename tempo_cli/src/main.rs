mod cli;
mod error_fmt;
mod host;
mod logging;

use clap::Parser;
use eyre::{Result, WrapErr};
use std::io::BufRead;
use std::process::ExitCode;

use crate::cli::{Cli, Commands};
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};
use crate::host::{ConsoleNotifier, FileStore, SimulatedRuntime};
use tempo_core::command::USAGE;
use tempo_core::{Reply, SpeedController, execute, execute_line};

type Controller = SpeedController<FileStore, SimulatedRuntime, ConsoleNotifier>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = color_eyre::install() {
        eprintln!("warning: failed to install error report handler: {e}");
    }
    let _guard = match logging::init(&cli.log_level, json, cli.log_file.as_deref()) {
        Ok(g) => g,
        Err(e) => {
            eprintln!("{}", humanize(&e));
            return ExitCode::from(exit_code_for_error(&e));
        }
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                eprintln!("{}", format_error_json(&err));
            } else {
                eprintln!("{}", humanize(&err));
            }
            ExitCode::from(exit_code_for_error(&err))
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    tracing::debug!(config = %cli.config.display(), "loading speed record");
    let mut ctl: Controller = SpeedController::load(
        FileStore::new(cli.config),
        SimulatedRuntime::from_env(),
        ConsoleNotifier,
    )?;

    let cmd = cli.cmd.unwrap_or(Commands::Show);
    match cmd.request() {
        Some(request) => report(execute(&mut ctl, request)),
        None => console(&mut ctl),
    }
}

/// One-shot commands: replies go to stdout, failures become the process error.
fn report(reply: Reply) -> Result<()> {
    match reply {
        Reply::Silent => Ok(()),
        Reply::Message(m) => {
            println!("{m}");
            Ok(())
        }
        Reply::Failure { message, error } => Err(eyre::Report::new(error).wrap_err(message)),
    }
}

/// Interactive dispatcher: one line, one request, until EOF or `quit`.
/// Failures are replied to and never end the session.
fn console(ctl: &mut Controller) -> Result<()> {
    if let Err(e) = ctl.start() {
        tracing::warn!(error = %e, "saved speed could not be applied at startup");
    }
    println!("tempo v{} console; 'help' lists commands, 'quit' exits", tempo_core::VERSION);

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line.wrap_err("read command from stdin")?;
        let line = line.trim();
        match line {
            "quit" | "exit" => break,
            "help" => {
                println!("{USAGE}");
                continue;
            }
            _ => {}
        }
        if let Some(text) = execute_line(ctl, line).text() {
            println!("{text}");
        }
    }
    Ok(())
}
