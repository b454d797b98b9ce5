use clap::{Parser, Subcommand};

/// Command-line interface definition for WorkLogger
/// CLI application to time work sessions and log them to XLSX and CSV
#[derive(Parser)]
#[command(
    name = "worklogger",
    version = env!("CARGO_PKG_VERSION"),
    about = "Time work sessions and log them to an XLSX workbook and a CSV file",
    long_about = None
)]
pub struct Cli {
    /// Override the XLSX log path
    #[arg(global = true, long = "xlsx", value_name = "FILE")]
    pub xlsx: Option<String>,

    /// Override the CSV log path
    #[arg(global = true, long = "csv", value_name = "FILE")]
    pub csv: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write the configuration file and create the log files
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(long = "editor", help = "Specify the editor to use (vim, nano, or custom path)")]
        editor: Option<String>,
    },

    /// Start an interactive timing session (start, pause, resume, stop, ...)
    Session,

    /// Log an already measured session
    Log {
        /// Description of the work done
        #[arg(long = "desc", short = 'd')]
        desc: String,

        /// Elapsed time in seconds (decimals allowed)
        #[arg(long = "seconds", short = 's', allow_negative_numbers = true)]
        seconds: f64,
    },

    /// Show the logged sessions
    List {
        #[arg(long = "json", help = "Print the records as JSON")]
        json: bool,
    },

    /// Delete both log files
    Clear {
        #[arg(long, short = 'f', help = "Do not ask for confirmation")]
        force: bool,
    },
}
