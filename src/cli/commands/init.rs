use crate::cli::parser::Cli;
use crate::config::Config;
use crate::core::logger::SessionLogger;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the configuration file (skipped in test mode)
///  - the XLSX and CSV log files, with their header rows
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ CONFIGURAZIONE
    //
    if !cli.test {
        let path = cfg.save()?;
        success(format!("Config file : {}", path.display()));
    }

    //
    // 2️⃣ FILE DI LOG
    //
    let logger = SessionLogger::new(cfg.store_paths());
    let created = logger.ensure_stores_exist()?;

    for path in [&logger.paths().tabular, &logger.paths().delimited] {
        if created.contains(path) {
            success(format!("Created     : {}", path.display()));
        } else {
            info(format!("Existing    : {}", path.display()));
        }
    }

    println!("🎉 WorkLogger initialization completed!");
    Ok(())
}
