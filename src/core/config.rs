use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration ({}):\n", Config::config_file().display());
        println!("{}", cfg.to_yaml()?);
        Ok(())
    }

    /// Open the config file in `editor`, else $EDITOR/$VISUAL, else a
    /// platform default. The file is written with defaults first if missing.
    pub fn edit(cfg: &Config, editor: &Option<String>) -> AppResult<()> {
        let path = Config::config_file();
        if !path.exists() {
            cfg.save()?;
        }

        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });
        let requested = editor.clone().unwrap_or_else(|| default_editor.clone());

        if Self::launch(&requested, &path) {
            success(format!("Configuration file edited using '{requested}'"));
            return Ok(());
        }

        warning(format!(
            "Editor '{requested}' not available, falling back to '{default_editor}'"
        ));
        if Self::launch(&default_editor, &path) {
            success(format!("Configuration file edited using fallback '{default_editor}'"));
            Ok(())
        } else {
            Err(AppError::Config(format!(
                "failed to edit configuration file using '{default_editor}'"
            )))
        }
    }

    fn launch(editor: &str, path: &Path) -> bool {
        Command::new(editor)
            .arg(path)
            .status()
            .is_ok_and(|s| s.success())
    }
}
