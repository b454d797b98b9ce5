use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clear::ClearLogic;
use crate::errors::AppResult;
use crate::ui::messages::{confirm, info, success};
use std::io;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clear { force } = cmd {
        let paths = cfg.store_paths();

        //
        // Confirmation prompt
        //
        if !*force {
            let prompt = format!(
                "Delete {} and {}? This action is irreversible.",
                paths.tabular.display(),
                paths.delimited.display()
            );
            if !confirm(prompt, &mut io::stdin().lock())? {
                info("Operation cancelled.");
                return Ok(());
            }
        }

        let report = ClearLogic::clear(&paths)?;
        if !report.removed.is_empty() {
            success("Log files cleared.");
        }
    }

    Ok(())
}
