use crate::datekey::DateKey;
use crate::model::{StatusDot, TaskStore};
use crate::selection::SelectionState;
use chrono::{Datelike, NaiveDate};

/// Six weeks of seven days.
pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_HEADINGS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date_key: DateKey,
    pub display_day: u32,
    pub is_other_month: bool,
    pub is_today: bool,
    pub is_selected: bool,
    pub dot: Option<StatusDot>,
}

#[derive(Debug, Clone)]
pub struct CalendarGrid {
    pub title: String,
    pub cells: Vec<DayCell>,
}

impl CalendarGrid {
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    #[cfg(test)]
    pub fn position_of(&self, key: &DateKey) -> Option<usize> {
        self.cells.iter().position(|c| &c.date_key == key)
    }
}

/// Builds the month view for `selection`, defaulting the selection first when
/// nothing is selected yet. Dots are derived from `store` on every call.
pub fn build(
    selection: SelectionState,
    today: NaiveDate,
    store: &TaskStore,
) -> (SelectionState, CalendarGrid) {
    let selection = selection.resolve_default(today);
    let (year, month0) = (selection.year, selection.month0);

    let first_weekday = first_weekday(year, month0) as usize;
    let days = days_in_month(year, month0) as usize;
    let (prev_year, prev_month0) = if month0 == 0 {
        (year - 1, 11)
    } else {
        (year, month0 - 1)
    };
    let (next_year, next_month0) = if month0 == 11 {
        (year + 1, 0)
    } else {
        (year, month0 + 1)
    };
    let prev_last_day = days_in_month(prev_year, prev_month0) as usize;

    let today_key = DateKey::from_date(today);
    let cells = (0..GRID_CELLS)
        .map(|i| {
            let (cell_year, cell_month0, display_day, is_other_month) = if i < first_weekday {
                (
                    prev_year,
                    prev_month0,
                    prev_last_day - (first_weekday - 1 - i),
                    true,
                )
            } else if i >= first_weekday + days {
                (next_year, next_month0, i - (first_weekday + days) + 1, true)
            } else {
                (year, month0, i - first_weekday + 1, false)
            };
            let date_key = DateKey::encode(cell_year, cell_month0, display_day as u32);
            DayCell {
                is_today: !is_other_month && date_key == today_key,
                is_selected: selection.selected.as_ref() == Some(&date_key),
                dot: store.status_dot(&date_key),
                display_day: display_day as u32,
                is_other_month,
                date_key,
            }
        })
        .collect();

    let grid = CalendarGrid {
        title: selection.month_title(),
        cells,
    };
    (selection, grid)
}

/// Weekday of the 1st, 0 = Sunday .. 6 = Saturday.
pub fn first_weekday(year: i32, month0: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month0 + 1, 1)
        .map(|d| d.weekday().num_days_from_sunday())
        .unwrap_or(0)
}

pub fn days_in_month(year: i32, month0: u32) -> u32 {
    let next = if month0 == 11 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month0 + 2, 1)
    };
    next.and_then(|d| d.pred_opt()).map(|d| d.day()).unwrap_or(28)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Task, TaskStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn grid_for(year: i32, month0: u32, today: NaiveDate) -> CalendarGrid {
        let selection = SelectionState {
            year,
            month0,
            selected: None,
        };
        build(selection, today, &TaskStore::default()).1
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2023, 1), 28);
        assert_eq!(days_in_month(1900, 1), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(2024, 11), 31);
        assert_eq!(days_in_month(2024, 3), 30);
    }

    #[test]
    fn every_month_has_42_cells_and_expected_overflow() {
        let today = date(2026, 10, 16);
        for year in [1999, 2015, 2024, 2026] {
            for month0 in 0..12 {
                let grid = grid_for(year, month0, today);
                assert_eq!(grid.cells.len(), GRID_CELLS);
                let other = grid.cells.iter().filter(|c| c.is_other_month).count();
                assert_eq!(other, GRID_CELLS - days_in_month(year, month0) as usize);
            }
        }
    }

    #[test]
    fn february_2015_starts_sunday_and_fills_two_overflow_weeks() {
        let grid = grid_for(2015, 1, date(2026, 1, 1));
        assert_eq!(first_weekday(2015, 1), 0);
        assert!(!grid.cells[0].is_other_month);
        assert_eq!(grid.cells[0].date_key.as_str(), "2015-02-01");
        assert_eq!(grid.cells[28].date_key.as_str(), "2015-03-01");
        assert_eq!(grid.cells.iter().filter(|c| c.is_other_month).count(), 14);
    }

    #[test]
    fn overflow_cells_wrap_years() {
        // January 2025 starts on a Wednesday.
        let jan = grid_for(2025, 0, date(2026, 1, 1));
        let lead: Vec<_> = jan.cells[..3].iter().map(|c| c.date_key.as_str()).collect();
        assert_eq!(lead, ["2024-12-29", "2024-12-30", "2024-12-31"]);
        assert_eq!(jan.cells[3].date_key.as_str(), "2025-01-01");

        // December 2024 ends on a Tuesday.
        let dec = grid_for(2024, 11, date(2026, 1, 1));
        let last = dec.cells.last().unwrap();
        assert!(last.is_other_month);
        assert_eq!(last.date_key.as_str(), "2025-01-11");
        assert_eq!(last.display_day, 11);
    }

    #[test]
    fn today_is_marked_once_and_never_on_overflow() {
        let today = date(2024, 3, 31);
        let march = grid_for(2024, 2, today);
        let marked: Vec<_> = march.cells.iter().filter(|c| c.is_today).collect();
        assert_eq!(marked.len(), 1);
        assert_eq!(marked[0].date_key.as_str(), "2024-03-31");
        assert!(!marked[0].is_other_month);

        // 31 March is an overflow day in April's grid.
        let april = grid_for(2024, 3, today);
        assert!(april.position_of(&DateKey::from_date(today)).is_some());
        assert!(april.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn selection_defaults_to_today_or_first_of_month() {
        let today = date(2024, 3, 15);
        let here = SelectionState::starting_at(today);
        let (sel, grid) = build(here, today, &TaskStore::default());
        assert_eq!(sel.selected, Some(DateKey::encode(2024, 2, 15)));
        let selected: Vec<_> = grid.cells.iter().filter(|c| c.is_selected).collect();
        assert_eq!(selected.len(), 1);
        assert!(selected[0].is_today);

        let elsewhere = SelectionState::starting_at(today).prev_month();
        let (sel, _) = build(elsewhere, today, &TaskStore::default());
        assert_eq!(sel.selected, Some(DateKey::encode(2024, 1, 1)));
    }

    #[test]
    fn dots_follow_the_store() {
        let mut store = TaskStore::default();
        let done = DateKey::encode(2024, 2, 4);
        let open = DateKey::encode(2024, 2, 5);
        let mixed = DateKey::encode(2024, 2, 6);
        let mut finished = Task::new("a").unwrap();
        finished.status = TaskStatus::Finished;
        store.append(&done, finished.clone());
        store.append(&open, Task::new("b").unwrap());
        store.append(&mixed, finished);
        store.append(&mixed, Task::new("c").unwrap());

        let selection = SelectionState::starting_at(date(2024, 3, 1));
        let (_, grid) = build(selection, date(2024, 3, 1), &store);
        let dot = |key: &DateKey| grid.cells[grid.position_of(key).unwrap()].dot;
        assert_eq!(dot(&done), Some(StatusDot::AllDone));
        assert_eq!(dot(&open), Some(StatusDot::Pending));
        assert_eq!(dot(&mixed), Some(StatusDot::Mixed));
        assert_eq!(dot(&DateKey::encode(2024, 2, 7)), None);
    }
}
