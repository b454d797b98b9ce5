//! Interactive session: drives the timer from typed commands and hands the
//! stopped session to the logger.

use crate::config::Config;
use crate::core::clock::Clock;
use crate::core::logger::{LogReport, SessionLogger};
use crate::core::timer::SessionTimer;
use crate::errors::AppResult;
use crate::ui::messages::{ask, error, info, success, warning};
use crate::utils::format_elapsed;
use std::io::BufRead;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    Pause,
    Resume,
    Stop,
    Status,
    Reset,
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "start" => Ok(Self::Start),
            "pause" => Ok(Self::Pause),
            "resume" => Ok(Self::Resume),
            "stop" => Ok(Self::Stop),
            "status" | "st" => Ok(Self::Status),
            "reset" | "discard" => Ok(Self::Reset),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(other.to_string()),
        }
    }
}

const HELP: &str = "Commands: start | pause | resume | stop | status | reset | help | quit";

pub struct SessionLogic;

impl SessionLogic {
    /// Read commands from `input` until `quit` or end of input.
    pub fn run<C: Clock, R: BufRead>(
        timer: &mut SessionTimer<C>,
        logger: &SessionLogger<C>,
        cfg: &Config,
        mut input: R,
    ) -> AppResult<()> {
        info(HELP);

        loop {
            let Some(line) = ask("worklogger>", &mut input)? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let cmd = match line.parse::<SessionCommand>() {
                Ok(cmd) => cmd,
                Err(unknown) => {
                    warning(format!("Unknown command '{unknown}'. {HELP}"));
                    continue;
                }
            };

            match cmd {
                SessionCommand::Start | SessionCommand::Resume => {
                    if timer.is_running() {
                        warning("Timer already running.");
                    } else {
                        timer.start();
                        success(format!("Timer running ({}).", format_elapsed(timer.elapsed())));
                    }
                }
                SessionCommand::Pause => {
                    if timer.is_running() {
                        timer.pause();
                        info(format!("Paused at {}.", format_elapsed(timer.elapsed())));
                    } else {
                        warning("Timer is not running.");
                    }
                }
                SessionCommand::Stop => {
                    Self::stop_and_log(timer, logger, cfg, &mut input)?;
                }
                SessionCommand::Status => {
                    let state = if timer.is_running() { "running" } else { "idle" };
                    info(format!("Elapsed: {} ({state})", format_elapsed(timer.elapsed())));
                }
                SessionCommand::Reset => {
                    timer.reset();
                    info("Session discarded.");
                }
                SessionCommand::Help => info(HELP),
                SessionCommand::Quit => break,
            }
        }

        if timer.elapsed() > 0.0 {
            warning(format!(
                "Quitting with {} not logged.",
                format_elapsed(timer.stop())
            ));
        }

        Ok(())
    }

    /// Stop the timer, ask for a description and log the session. The timer
    /// is reset once the session is discarded or reached at least one store;
    /// if every store failed the time is kept so `stop` can retry.
    fn stop_and_log<C: Clock, R: BufRead>(
        timer: &mut SessionTimer<C>,
        logger: &SessionLogger<C>,
        cfg: &Config,
        input: &mut R,
    ) -> AppResult<()> {
        let elapsed = timer.stop();
        if elapsed == 0.0 {
            warning("Timer was never started: nothing to log.");
            return Ok(());
        }
        info(format!("Session stopped at {}.", format_elapsed(elapsed)));

        let description = ask("Enter a description for the worklog:", input)?.unwrap_or_default();
        let description = description.trim();

        if description.is_empty() && cfg.skip_empty_description {
            warning("No description entered: session discarded.");
        } else {
            let outcome = logger.log_session(description, elapsed);
            report(&outcome);
            if outcome.tabular.is_err() && outcome.delimited.is_err() {
                warning(format!(
                    "Nothing was logged: {} kept, type 'stop' to retry.",
                    format_elapsed(elapsed)
                ));
                return Ok(());
            }
        }

        timer.reset();
        Ok(())
    }
}

/// Print the outcome of each store.
pub fn report(report: &LogReport) {
    let stores = [
        ("Workbook", &report.tabular),
        ("CSV", &report.delimited),
    ];
    for (label, outcome) in stores {
        match outcome {
            Ok(()) => success(format!(
                "{label}: logged '{}' ({})",
                report.record.description,
                format_elapsed(report.record.elapsed_seconds)
            )),
            Err(e) => error(format!("{label}: {e}")),
        }
    }
}
