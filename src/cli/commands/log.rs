use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::logger::SessionLogger;
use crate::core::session::report;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::warning;

/// Log an already measured session in one shot.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { desc, seconds } = cmd {
        if !seconds.is_finite() || *seconds < 0.0 {
            return Err(AppError::InvalidDuration(format!(
                "{seconds} (expected a non-negative number of seconds)"
            )));
        }

        let description = desc.trim();
        if description.is_empty() && cfg.skip_empty_description {
            warning("No description given: nothing logged.");
            return Ok(());
        }

        let outcome = SessionLogger::new(cfg.store_paths()).log_session(description, *seconds);
        report(&outcome);
        outcome.into_result()?;
    }

    Ok(())
}
