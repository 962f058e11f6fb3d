mod calendar;
mod cli;
mod commands;
mod config;
mod datekey;
mod logging;
mod model;
mod selection;
mod session;
mod storage;
mod tasklist;
mod ui;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    let config = config::Config::load().merge(args.data_file, args.log_level);
    logging::init(&config)?;
    let command = args.command.unwrap_or(cli::Command::Tui);
    let result = match command {
        cli::Command::Show { date, month } => commands::show(&config, date, month),
        cli::Command::Add { title, date } => commands::add(&config, title, date),
        cli::Command::Status {
            serial,
            status,
            date,
        } => commands::set_status(&config, serial, status, date),
        cli::Command::Delete { serial, date } => commands::delete(&config, serial, date),
        cli::Command::Tui => commands::tui(&config),
    };
    if let Err(err) = &result {
        log::error!("{:#}", err);
    }
    result
}
