use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::record::HEADERS;
use crate::errors::AppResult;
use crate::store::delimited;
use crate::ui::messages::{header, info};
use crate::utils::table::Table;
use std::io;

/// Show the records of the CSV log.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { json } = cmd {
        let path = cfg.store_paths().delimited;

        if !path.exists() {
            info(format!("No log file yet: {}", path.display()));
            return Ok(());
        }

        let rows = delimited::read_rows(&path)?;

        if *json {
            let out = serde_json::to_string_pretty(&rows).map_err(io::Error::from)?;
            println!("{out}");
            return Ok(());
        }

        if rows.is_empty() {
            info("No sessions logged yet.");
            return Ok(());
        }

        header(format!("Work log ({})", path.display()));
        let mut table = Table::new(&HEADERS);
        for row in &rows {
            table.add_row(row.fields().to_vec());
        }
        print!("{}", table.render());
    }

    Ok(())
}
