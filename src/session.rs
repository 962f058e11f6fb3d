use crate::calendar::{self, CalendarGrid};
use crate::datekey::DateKey;
use crate::model::{TaskStatus, TaskStore};
use crate::selection::SelectionState;
use crate::storage::{load_store, save_store, StoreLocation};
use crate::tasklist::{self, Outcome, TaskListView};
use anyhow::Result;
use chrono::{Local, NaiveDate};

/// Source of the local calendar date.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    PrevMonth,
    NextMonth,
    Select(DateKey),
    AddTask(String),
    ChangeStatus { row: usize, status: TaskStatus },
    DeleteTask { row: usize },
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub store: TaskStore,
    pub selection: SelectionState,
    pub outcome: Outcome,
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone)]
pub struct View {
    pub grid: CalendarGrid,
    pub list: TaskListView,
    pub selected_label: String,
    pub message: String,
    /// Whether producing this view wrote the store.
    pub persisted: bool,
}

/// Applies one action without touching the disk.
///
/// Task actions operate on the selected date, defaulting it first if the
/// selection has never been resolved.
pub fn transition(
    mut store: TaskStore,
    selection: SelectionState,
    action: Action,
    today: NaiveDate,
) -> Transition {
    let (selection, outcome) = match action {
        Action::PrevMonth => {
            let selection = selection.prev_month();
            let msg = selection.month_title();
            (selection, Outcome::Ignored(msg))
        }
        Action::NextMonth => {
            let selection = selection.next_month();
            let msg = selection.month_title();
            (selection, Outcome::Ignored(msg))
        }
        Action::Select(date) => {
            let msg = format!("Selected {}", date);
            (selection.select(date), Outcome::Ignored(msg))
        }
        Action::AddTask(raw) => {
            let selection = selection.resolve_default(today);
            let outcome = with_selected(&selection, |date| {
                tasklist::add_task(&mut store, date, &raw)
            });
            (selection, outcome)
        }
        Action::ChangeStatus { row, status } => {
            let selection = selection.resolve_default(today);
            let outcome = with_selected(&selection, |date| {
                tasklist::change_status(&mut store, date, row, status)
            });
            (selection, outcome)
        }
        Action::DeleteTask { row } => {
            let selection = selection.resolve_default(today);
            let outcome = with_selected(&selection, |date| {
                tasklist::delete_task(&mut store, date, row)
            });
            (selection, outcome)
        }
    };
    Transition {
        store,
        selection,
        outcome,
    }
}

fn with_selected<F>(selection: &SelectionState, f: F) -> Outcome
where
    F: FnOnce(&DateKey) -> Outcome,
{
    match &selection.selected {
        Some(date) => f(date),
        None => Outcome::Ignored("No date selected".into()),
    }
}

/// Owns the selection for one run of the program and the store as last read.
///
/// The file is re-read before every render and every action, so writes made
/// by another process (the CLI next to a running TUI) are never overwritten.
pub struct Session<C: Clock> {
    location: StoreLocation,
    clock: C,
    store: TaskStore,
    selection: SelectionState,
}

impl<C: Clock> Session<C> {
    pub fn open(location: StoreLocation, clock: C) -> Self {
        let store = load_store(&location);
        let selection = SelectionState::starting_at(clock.today());
        log::info!("opened {:?}", location.path);
        Session {
            location,
            clock,
            store,
            selection,
        }
    }

    pub fn location(&self) -> &StoreLocation {
        &self.location
    }

    #[cfg(test)]
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Shows `year`/`month0` without selecting anything in it.
    pub fn show_month(&mut self, year: i32, month0: u32) {
        self.selection.year = year;
        self.selection.month0 = month0;
    }

    /// Renders the current state without applying an action.
    pub fn render(&mut self, message: impl Into<String>) -> View {
        self.store = load_store(&self.location);
        let today = self.clock.today();
        let (selection, grid) = calendar::build(self.selection.clone(), today, &self.store);
        self.selection = selection;
        let list = match &self.selection.selected {
            Some(date) => tasklist::render(&self.store, date),
            None => TaskListView {
                date: DateKey::from_date(today),
                rows: Vec::new(),
            },
        };
        View {
            grid,
            list,
            selected_label: self.selection.selected_label(),
            message: message.into(),
            persisted: false,
        }
    }

    /// Mutates, persists, then rebuilds the grid and the task list.
    ///
    /// The action runs against a fresh read of the file; on a failed write
    /// the next render shows what is actually on disk.
    pub fn apply_and_render(&mut self, action: Action) -> Result<View> {
        log::debug!("applying {:?}", action);
        let today = self.clock.today();
        let current = load_store(&self.location);
        let next = transition(current, self.selection.clone(), action, today);
        let persisted = next.outcome.changed();
        if persisted {
            save_store(&self.location, &next.store)?;
        }
        self.selection = next.selection;
        let mut view = self.render(next.outcome.message().to_string());
        view.persisted = persisted;
        Ok(view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub struct FixedClock(pub NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn open_session(dir: &tempfile::TempDir) -> Session<FixedClock> {
        let location = StoreLocation::custom(dir.path().join("tasks.yml"));
        Session::open(location, FixedClock(today()))
    }

    #[test]
    fn transition_is_pure_for_navigation() {
        let selection = SelectionState::starting_at(today());
        let next = transition(TaskStore::default(), selection, Action::NextMonth, today());
        assert_eq!((next.selection.year, next.selection.month0), (2024, 3));
        assert!(!next.outcome.changed());
        assert!(next.store.is_empty());
    }

    #[test]
    fn add_without_selection_targets_today() {
        let selection = SelectionState::starting_at(today());
        let next = transition(
            TaskStore::default(),
            selection,
            Action::AddTask("  Buy milk ".into()),
            today(),
        );
        assert!(next.outcome.changed());
        let key = DateKey::from_date(today());
        assert_eq!(next.store.tasks_for(&key)[0].title, "Buy milk");
    }

    #[test]
    fn apply_persists_and_keeps_grid_in_sync() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir);
        let first = session.render("");
        assert!(first.list.is_empty());

        let view = session
            .apply_and_render(Action::AddTask("Buy milk".into()))
            .unwrap();
        assert_eq!(view.list.rows.len(), 1);
        let cell = view.grid.cells.iter().find(|c| c.is_selected).unwrap();
        assert_eq!(cell.dot, Some(crate::model::StatusDot::Pending));

        let view = session
            .apply_and_render(Action::ChangeStatus {
                row: 0,
                status: TaskStatus::Finished,
            })
            .unwrap();
        let cell = view.grid.cells.iter().find(|c| c.is_selected).unwrap();
        assert_eq!(cell.dot, Some(crate::model::StatusDot::AllDone));

        let reopened = open_session(&dir);
        assert_eq!(reopened.store(), session.store());
    }

    #[test]
    fn sessions_sharing_a_file_see_each_others_writes() {
        let dir = tempfile::tempdir().unwrap();
        let mut tui = open_session(&dir);
        tui.render("");

        let mut cli = open_session(&dir);
        cli.apply_and_render(Action::AddTask("from cli".into()))
            .unwrap();

        let view = tui.render("");
        let titles: Vec<_> = view.list.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["from cli"]);

        let view = tui
            .apply_and_render(Action::AddTask("from tui".into()))
            .unwrap();
        assert_eq!(view.list.rows.len(), 2);

        let on_disk = open_session(&dir).render("");
        let titles: Vec<_> = on_disk.list.rows.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["from cli", "from tui"]);
    }

    #[test]
    fn ignored_actions_do_not_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir);
        session
            .apply_and_render(Action::AddTask("   ".into()))
            .unwrap();
        session
            .apply_and_render(Action::DeleteTask { row: 3 })
            .unwrap();
        assert!(!dir.path().join("tasks.yml").exists());
    }

    #[test]
    fn selecting_another_day_switches_the_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir);
        session
            .apply_and_render(Action::AddTask("today".into()))
            .unwrap();
        let other = DateKey::encode(2024, 2, 20);
        let view = session.apply_and_render(Action::Select(other.clone())).unwrap();
        assert_eq!(view.list.date, other);
        assert!(view.list.is_empty());
        assert_eq!(view.grid.cells.iter().filter(|c| c.is_selected).count(), 1);

        let view = session
            .apply_and_render(Action::DeleteTask { row: 0 })
            .unwrap();
        assert_eq!(view.message, "no task at row 0 on 2024-03-20 (0 task(s))");
    }

    #[test]
    fn month_navigation_keeps_selected_list() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = open_session(&dir);
        session
            .apply_and_render(Action::AddTask("stay".into()))
            .unwrap();
        let view = session.apply_and_render(Action::NextMonth).unwrap();
        assert_eq!(view.grid.title, "April 2024");
        assert_eq!(view.list.rows.len(), 1);
        assert!(view.grid.cells.iter().all(|c| !c.is_selected));
    }
}
