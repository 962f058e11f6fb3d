use crate::calendar::WEEKDAY_HEADINGS;
use crate::config::Config;
use crate::datekey::{DateKey, KEY_YEARS};
use crate::model::TaskStatus;
use crate::session::{Action, Clock, Session, SystemClock, View};
use crate::storage::locate_store;
use crate::ui;
use anyhow::{anyhow, bail, Context, Result};
use chrono::{Datelike, NaiveDate};

pub fn show(config: &Config, date: Option<DateKey>, month: Option<String>) -> Result<()> {
    let mut session = open_session(config)?;
    if let Some(date) = date {
        session.apply_and_render(Action::Select(date.clone()))?;
        let parts = date.decode()?;
        session.show_month(parts.year, parts.month0);
    }
    if let Some(raw) = month {
        let (year, month0) = parse_month(&raw)?;
        session.show_month(year, month0);
    }
    let view = session.render("");
    print_view(&view);
    Ok(())
}

pub fn add(config: &Config, title: String, date: Option<DateKey>) -> Result<()> {
    run_action(config, date, Action::AddTask(title))
}

pub fn set_status(
    config: &Config,
    serial: usize,
    status: TaskStatus,
    date: Option<DateKey>,
) -> Result<()> {
    let row = row_for(serial)?;
    run_action(config, date, Action::ChangeStatus { row, status })
}

pub fn delete(config: &Config, serial: usize, date: Option<DateKey>) -> Result<()> {
    let row = row_for(serial)?;
    run_action(config, date, Action::DeleteTask { row })
}

pub fn tui(config: &Config) -> Result<()> {
    let session = open_session(config)?;
    ui::run(session)
}

fn open_session(config: &Config) -> Result<Session<SystemClock>> {
    let location = locate_store(config.data_file.clone())?;
    Ok(Session::open(location, SystemClock))
}

fn run_action(config: &Config, date: Option<DateKey>, action: Action) -> Result<()> {
    let mut session = open_session(config)?;
    let date = date.unwrap_or_else(|| DateKey::from_date(SystemClock.today()));
    session.apply_and_render(Action::Select(date))?;
    let view = session.apply_and_render(action)?;
    println!("{}", view.message);
    print_tasks(&view);
    Ok(())
}

fn row_for(serial: usize) -> Result<usize> {
    serial
        .checked_sub(1)
        .ok_or_else(|| anyhow!("task numbers start at 1"))
}

fn parse_month(raw: &str) -> Result<(i32, u32)> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", raw.trim()), "%Y-%m-%d")
        .with_context(|| format!("invalid month (use YYYY-MM): {}", raw))?;
    if !KEY_YEARS.contains(&first.year()) {
        bail!("year out of range: {}", raw);
    }
    Ok((first.year(), first.month0()))
}

fn print_view(view: &View) {
    println!("{:^28}", view.grid.title);
    println!(
        "{}",
        WEEKDAY_HEADINGS
            .iter()
            .map(|h| format!(" {:>2} ", h))
            .collect::<String>()
    );
    for week in view.grid.weeks() {
        let line: String = week
            .iter()
            .map(|cell| {
                let day = if cell.is_other_month {
                    "  ".to_string()
                } else {
                    format!("{:>2}", cell.display_day)
                };
                let mark = if cell.is_selected {
                    ('[', ']')
                } else if cell.is_today {
                    ('(', ')')
                } else {
                    (' ', ' ')
                };
                let dot = if cell.is_other_month {
                    ' '
                } else {
                    cell.dot.map(|d| d.glyph()).unwrap_or(' ')
                };
                format!("{}{}{}{}", mark.0, day, dot, mark.1)
            })
            .collect();
        println!("{}", line.trim_end());
    }
    println!();
    println!("{}", view.selected_label);
    print_tasks(view);
}

fn print_tasks(view: &View) {
    if view.list.is_empty() {
        println!("  (no tasks)");
        return;
    }
    for row in &view.list.rows {
        println!("  {:>2}. [{}] {}", row.serial, status_char(row.status), row.title);
    }
}

fn status_char(status: TaskStatus) -> char {
    match status {
        TaskStatus::Pending => ' ',
        TaskStatus::Partial => '~',
        TaskStatus::Finished => 'x',
    }
}
