use crate::datekey::{DateKey, KEY_YEARS};
use chrono::{Datelike, NaiveDate};

/// Which month is on screen and which day the task list shows.
///
/// Lives only for the session; it is never written to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    pub year: i32,
    /// 0 = January .. 11 = December
    pub month0: u32,
    pub selected: Option<DateKey>,
}

impl SelectionState {
    pub fn starting_at(today: NaiveDate) -> Self {
        SelectionState {
            year: today.year(),
            month0: today.month0(),
            selected: None,
        }
    }

    /// Steps back one month. Stays put on January of the first key year.
    pub fn prev_month(mut self) -> Self {
        if self.month0 == 0 && self.year <= *KEY_YEARS.start() {
            return self;
        }
        if self.month0 == 0 {
            self.month0 = 11;
            self.year -= 1;
        } else {
            self.month0 -= 1;
        }
        self
    }

    /// Steps forward one month. Stays put on December of the last key year.
    pub fn next_month(mut self) -> Self {
        if self.month0 == 11 && self.year >= *KEY_YEARS.end() {
            return self;
        }
        if self.month0 == 11 {
            self.month0 = 0;
            self.year += 1;
        } else {
            self.month0 += 1;
        }
        self
    }

    pub fn select(mut self, date: DateKey) -> Self {
        self.selected = Some(date);
        self
    }

    /// Fills in a selection when none exists: today when it is one of the
    /// displayed month's own days, otherwise day 1 of that month.
    pub fn resolve_default(mut self, today: NaiveDate) -> Self {
        if self.selected.is_none() {
            let date = if self.shows_month_of(today) {
                DateKey::from_date(today)
            } else {
                DateKey::encode(self.year, self.month0, 1)
            };
            self.selected = Some(date);
        }
        self
    }

    pub fn shows_month_of(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    pub fn first_of_month(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1)
    }

    pub fn month_title(&self) -> String {
        self.first_of_month()
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_else(|| format!("{}-{:02}", self.year, self.month0 + 1))
    }

    pub fn selected_label(&self) -> String {
        match &self.selected {
            Some(key) => key
                .to_date()
                .map(|d| d.format("%a, %-d %b %Y").to_string())
                .unwrap_or_else(|| key.to_string()),
            None => "No date selected".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn starts_on_today_without_selection() {
        let state = SelectionState::starting_at(date(2026, 10, 16));
        assert_eq!((state.year, state.month0), (2026, 9));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn navigation_wraps_across_years() {
        let jan = SelectionState::starting_at(date(2024, 1, 10));
        let dec = jan.clone().prev_month();
        assert_eq!((dec.year, dec.month0), (2023, 11));
        let back = dec.next_month();
        assert_eq!((back.year, back.month0), (2024, 0));
    }

    #[test]
    fn navigation_stops_at_the_ends_of_the_key_range() {
        let first = SelectionState::starting_at(date(1, 1, 1)).prev_month();
        assert_eq!((first.year, first.month0), (1, 0));
        let last = SelectionState::starting_at(date(9999, 12, 31)).next_month();
        assert_eq!((last.year, last.month0), (9999, 11));
        let back = last.prev_month();
        assert_eq!((back.year, back.month0), (9999, 10));
    }

    #[test]
    fn navigation_keeps_selection() {
        let state = SelectionState::starting_at(date(2024, 5, 1))
            .select(DateKey::encode(2024, 4, 20))
            .next_month()
            .next_month();
        assert_eq!(state.selected, Some(DateKey::encode(2024, 4, 20)));
    }

    #[test]
    fn default_prefers_today_in_the_displayed_month() {
        let today = date(2024, 3, 15);
        let state = SelectionState::starting_at(today).resolve_default(today);
        assert_eq!(state.selected, Some(DateKey::encode(2024, 2, 15)));

        let other = SelectionState::starting_at(today)
            .next_month()
            .resolve_default(today);
        assert_eq!(other.selected, Some(DateKey::encode(2024, 3, 1)));
    }

    #[test]
    fn default_does_not_override_a_selection() {
        let today = date(2024, 3, 15);
        let picked = DateKey::encode(2024, 2, 2);
        let state = SelectionState::starting_at(today)
            .select(picked.clone())
            .resolve_default(today);
        assert_eq!(state.selected, Some(picked));
    }

    #[test]
    fn labels_format_month_and_day() {
        let state = SelectionState::starting_at(date(2024, 3, 15))
            .select(DateKey::encode(2024, 2, 5));
        assert_eq!(state.month_title(), "March 2024");
        assert_eq!(state.selected_label(), "Tue, 5 Mar 2024");
    }
}
