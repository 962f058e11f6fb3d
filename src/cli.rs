use crate::datekey::DateKey;
use crate::model::TaskStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "daymark", version, about = "Terminal month calendar with per-day tasks")]
pub struct Cli {
    /// Task file to use instead of the default data location
    #[arg(long, global = true)]
    pub data_file: Option<PathBuf>,
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print a month grid and the task list of one day
    Show {
        /// Day whose tasks to list (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<DateKey>,
        /// Month to draw (YYYY-MM), defaults to the month of --date
        #[arg(long)]
        month: Option<String>,
    },
    /// Add a task to a day
    Add {
        /// Title of the task
        title: String,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Change the status of a task
    Status {
        /// Task number as printed by `show`
        serial: usize,
        /// pending, partial or finished
        status: TaskStatus,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Delete a task
    Delete {
        /// Task number as printed by `show`
        serial: usize,
        /// Day (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<DateKey>,
    },
    /// Launch the interactive TUI
    Tui,
}
