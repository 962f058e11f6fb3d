use crate::calendar::{DayCell, WEEKDAY_HEADINGS};
use crate::model::{StatusDot, TaskStatus};
use crate::session::{Action, Clock, Session, View};
use crate::storage::StoreScope;
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::{Alignment, Color, Modifier, Rect, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Terminal;
use std::io::{stdout, Stdout};
use std::time::{Duration, Instant};

pub fn run<C: Clock>(session: Session<C>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let mut app = App::new(session);
    let result = app.event_loop(&mut terminal);
    teardown_terminal(&mut terminal)?;
    result
}

struct App<C: Clock> {
    session: Session<C>,
    view: View,
    focus: Focus,
    selected_row: usize,
    last_save: Option<Instant>,
    status: String,
    mode: Mode,
}

enum Mode {
    Normal,
    Adding(FieldValue),
    ConfirmDelete { row: usize },
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Focus {
    Calendar,
    Tasks,
}

/// Single-line text input with a byte cursor on a char boundary.
#[derive(Clone)]
struct FieldValue {
    value: String,
    cursor: usize,
}

impl FieldValue {
    fn new(value: &str) -> Self {
        FieldValue {
            value: value.to_string(),
            cursor: value.len(),
        }
    }

    fn move_left(&mut self) {
        self.cursor = prev_char(self.cursor, &self.value);
    }

    fn move_right(&mut self) {
        self.cursor = next_char(self.cursor, &self.value);
    }

    fn home(&mut self) {
        self.cursor = 0;
    }

    fn end(&mut self) {
        self.cursor = self.value.len();
    }

    fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        let prev = prev_char(self.cursor, &self.value);
        self.value.drain(prev..self.cursor);
        self.cursor = prev;
    }

    fn delete(&mut self) {
        if self.cursor >= self.value.len() {
            return;
        }
        let next = next_char(self.cursor, &self.value);
        self.value.drain(self.cursor..next);
    }

    fn insert_char(&mut self, ch: char) {
        self.value.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    fn with_caret(&self) -> String {
        let mut text = self.value.clone();
        text.insert_str(self.cursor, "▌");
        text
    }
}

impl<C: Clock> App<C> {
    fn new(mut session: Session<C>) -> Self {
        let status = format!("Loaded tasks from {}", session.location().path.display());
        let view = session.render(status.clone());
        App {
            session,
            view,
            focus: Focus::Calendar,
            selected_row: 0,
            last_save: None,
            status,
            mode: Mode::Normal,
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        loop {
            terminal.draw(|f| self.draw(f))?;
            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key) {
                        break;
                    }
                }
            }
        }
        Ok(())
    }

    /// Returns true when the user asked to quit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Adding(_) => {
                self.handle_prompt_key(key);
                false
            }
            Mode::ConfirmDelete { .. } => {
                self.handle_confirm_key(key);
                false
            }
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) -> bool {
        if let Some(action) = month_key(key.code) {
            self.apply(action);
            return false;
        }
        match key.code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Char('a') => {
                self.mode = Mode::Adding(FieldValue::new(""));
                self.status = format!("New task for {}", self.view.selected_label);
            }
            KeyCode::Char('1') => self.set_row_status(TaskStatus::Pending),
            KeyCode::Char('2') => self.set_row_status(TaskStatus::Partial),
            KeyCode::Char('3') => self.set_row_status(TaskStatus::Finished),
            KeyCode::Char('s') | KeyCode::Char(' ') => self.cycle_row_status(),
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(row) = self.view.list.rows.get(self.selected_row) {
                    self.mode = Mode::ConfirmDelete {
                        row: row.row_index,
                    };
                    self.status = "Delete task? (y to confirm, n/Esc to cancel)".into();
                } else {
                    self.status = "No task selected to delete".into();
                }
            }
            _ => match self.focus {
                Focus::Calendar => self.handle_calendar_key(key),
                Focus::Tasks => self.handle_tasks_key(key),
            },
        }
        false
    }

    fn handle_calendar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => self.move_day(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_day(1),
            KeyCode::Up | KeyCode::Char('k') => self.move_day(-7),
            KeyCode::Down | KeyCode::Char('j') => self.move_day(7),
            KeyCode::Enter => self.toggle_focus(),
            _ => {}
        }
    }

    fn handle_tasks_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected_row = self.selected_row.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if self.selected_row + 1 < self.view.list.rows.len() {
                    self.selected_row += 1;
                }
            }
            KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => self.focus = Focus::Calendar,
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        let mut mode = std::mem::replace(&mut self.mode, Mode::Normal);
        let mut close = false;
        if let Mode::Adding(field) = &mut mode {
            match key.code {
                KeyCode::Esc => {
                    close = true;
                    self.status = "Canceled".into();
                }
                KeyCode::Enter => {
                    close = true;
                    let title = field.value.clone();
                    self.apply(Action::AddTask(title));
                    if self.view.persisted {
                        self.selected_row = self.view.list.rows.len().saturating_sub(1);
                    }
                }
                KeyCode::Left => field.move_left(),
                KeyCode::Right => field.move_right(),
                KeyCode::Home => field.home(),
                KeyCode::End => field.end(),
                KeyCode::Backspace => field.backspace(),
                KeyCode::Delete => field.delete(),
                KeyCode::Char(c) => {
                    if !key
                        .modifiers
                        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
                    {
                        field.insert_char(c);
                    }
                }
                _ => {}
            }
        }
        self.mode = if close { Mode::Normal } else { mode };
    }

    fn handle_confirm_key(&mut self, key: KeyEvent) {
        let row = match &self.mode {
            Mode::ConfirmDelete { row } => *row,
            _ => return,
        };
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                self.mode = Mode::Normal;
                self.apply(Action::DeleteTask { row });
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.status = "Delete canceled".into();
            }
            _ => {}
        }
    }

    /// Every user action goes through here: the session persists and both
    /// panes are rebuilt from the returned view.
    fn apply(&mut self, action: Action) {
        match self.session.apply_and_render(action) {
            Ok(view) => {
                if view.persisted {
                    self.last_save = Some(Instant::now());
                }
                self.status = view.message.clone();
                self.view = view;
            }
            Err(err) => {
                log::error!("save failed: {:#}", err);
                self.status = format!("Save failed: {}", err);
                self.view = self.session.render(self.status.clone());
            }
        }
        self.clamp_row();
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Calendar => Focus::Tasks,
            Focus::Tasks => Focus::Calendar,
        };
        self.clamp_row();
    }

    fn move_day(&mut self, delta: isize) {
        let cells = &self.view.grid.cells;
        let current = cells
            .iter()
            .position(|c| c.is_selected)
            .or_else(|| cells.iter().position(|c| !c.is_other_month));
        let Some(current) = current else {
            return;
        };
        let target = current as isize + delta;
        if target < 0 || target as usize >= cells.len() {
            self.status = "Use [ ] or p n to change month".into();
            return;
        }
        let key = cells[target as usize].date_key.clone();
        self.selected_row = 0;
        self.apply(Action::Select(key));
    }

    fn set_row_status(&mut self, status: TaskStatus) {
        match self.view.list.rows.get(self.selected_row) {
            Some(row) => {
                let row = row.row_index;
                self.apply(Action::ChangeStatus { row, status });
            }
            None => self.status = "No task selected".into(),
        }
    }

    fn cycle_row_status(&mut self) {
        if let Some(row) = self.view.list.rows.get(self.selected_row) {
            let status = row.status.next();
            self.set_row_status(status);
        } else {
            self.status = "No task selected".into();
        }
    }

    fn clamp_row(&mut self) {
        let len = self.view.list.rows.len();
        self.selected_row = self.selected_row.min(len.saturating_sub(1));
    }

    fn draw(&mut self, f: &mut ratatui::Frame<'_>) {
        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(4),
            ])
            .split(f.size());

        self.draw_header(f, layout[0]);
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(40), Constraint::Min(20)])
            .split(layout[1]);
        self.draw_calendar(f, body[0]);
        self.draw_tasks(f, body[1]);
        self.draw_footer(f, layout[2]);

        match &self.mode {
            Mode::Adding(field) => self.draw_prompt(f, field),
            Mode::ConfirmDelete { row } => self.draw_confirm(f, *row),
            Mode::Normal => {}
        }
    }

    fn draw_header(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let location = self.session.location();
        let scope = match location.scope {
            StoreScope::Default => "default",
            StoreScope::Custom => "custom",
        };
        let saved = match self.last_save {
            Some(at) => format!("saved {}", format_elapsed(at)),
            None => "no changes yet".into(),
        };
        let title = Line::from(vec![
            Span::styled(
                "daymark ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                self.view.grid.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  •  "),
            Span::styled(scope, Style::default().fg(Color::Green)),
            Span::raw("  •  "),
            Span::styled(
                format!("{}", location.path.display()),
                Style::default().fg(Color::DarkGray),
            ),
            Span::raw("  •  "),
            Span::styled(saved, Style::default().fg(Color::Gray)),
        ]);

        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray));
        let paragraph = Paragraph::new(title)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_calendar(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Calendar;
        let mut lines = Vec::new();
        lines.push(Line::from(Span::styled(
            self.view.grid.title.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        let headings: Vec<Span<'static>> = WEEKDAY_HEADINGS
            .iter()
            .map(|h| Span::styled(format!("{:^5}", h), Style::default().fg(Color::Gray)))
            .collect();
        lines.push(Line::from(headings));
        for week in self.view.grid.weeks() {
            let spans: Vec<Span<'static>> =
                week.iter().map(|cell| day_span(cell, focused)).collect();
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
        lines.push(dot_legend());

        let block = Block::default()
            .title(Span::styled(
                "Calendar",
                Style::default()
                    .fg(if focused { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
    }

    fn draw_tasks(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let focused = self.focus == Focus::Tasks;
        let block = Block::default()
            .title(Span::styled(
                format!("{} ({})", self.view.selected_label, self.view.list.rows.len()),
                Style::default()
                    .fg(if focused { Color::Cyan } else { Color::Gray })
                    .add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused {
                Color::Cyan
            } else {
                Color::DarkGray
            }));

        if self.view.list.is_empty() {
            let msg = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "No tasks for this day",
                    Style::default().fg(Color::Gray),
                )),
                Line::from(Span::styled(
                    "Press a to add one",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(msg, area);
            return;
        }

        let title_width = area.width.saturating_sub(30).max(8) as usize;
        let items: Vec<ListItem<'static>> = self
            .view
            .list
            .rows
            .iter()
            .map(|row| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{:>3}  ", row.serial),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::styled(
                        format!(
                            "{:width$}  ",
                            truncate_text(&row.title, title_width),
                            width = title_width
                        ),
                        title_style(row.status),
                    ),
                    Span::styled(
                        row.status.label(),
                        Style::default().fg(status_color(row.status)),
                    ),
                ]))
            })
            .collect();

        let mut state = ListState::default();
        if focused {
            state.select(Some(self.selected_row));
        }
        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .bg(Color::Rgb(40, 44, 52))
                .add_modifier(Modifier::BOLD),
        );
        f.render_stateful_widget(list, area, &mut state);
    }

    fn draw_footer(&self, f: &mut ratatui::Frame<'_>, area: Rect) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(2), Constraint::Length(2)])
            .split(area);

        let help_bar = Paragraph::new(self.footer_help_line())
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(help_bar, rows[0]);

        let status = Paragraph::new(self.status.clone())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(Color::DarkGray)),
            );
        f.render_widget(status, rows[1]);
    }

    fn footer_help_line(&self) -> Line<'static> {
        let mut spans = vec![
            Span::styled("Tab", Style::default().fg(Color::LightCyan)),
            Span::raw(" focus  "),
            Span::styled("[ ] / p n", Style::default().fg(Color::LightCyan)),
            Span::raw(" month  "),
        ];
        match self.focus {
            Focus::Calendar => spans.extend([
                Span::styled("←↑↓→ / h j k l", Style::default().fg(Color::LightCyan)),
                Span::raw(" day  "),
            ]),
            Focus::Tasks => spans.extend([
                Span::styled("↑↓ / j k", Style::default().fg(Color::LightCyan)),
                Span::raw(" task  "),
                Span::styled("1 2 3 / s", Style::default().fg(Color::LightGreen)),
                Span::raw(" status  "),
                Span::styled("d", Style::default().fg(Color::LightRed)),
                Span::raw(" delete  "),
            ]),
        }
        spans.extend([
            Span::styled("a", Style::default().fg(Color::LightMagenta)),
            Span::raw(" add  "),
            Span::styled("q", Style::default().fg(Color::LightRed)),
            Span::raw(" quit"),
        ]);
        Line::from(spans)
    }

    fn draw_prompt(&self, f: &mut ratatui::Frame<'_>, field: &FieldValue) {
        let area = centered_rect(60, 25, f.size());
        let body = vec![
            Line::from(vec![
                Span::styled(
                    "Title: ",
                    Style::default()
                        .fg(Color::Gray)
                        .add_modifier(Modifier::BOLD | Modifier::DIM),
                ),
                Span::styled(field.with_caret(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to add • Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ];
        let dialog = Paragraph::new(body)
            .block(
                Block::default()
                    .title(Span::styled(
                        format!("New task for {}", self.view.selected_label),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .wrap(Wrap { trim: false });

        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }

    fn draw_confirm(&self, f: &mut ratatui::Frame<'_>, row: usize) {
        let area = centered_rect(50, 30, f.size());
        let title = self
            .view
            .list
            .rows
            .get(row)
            .map(|r| r.title.clone())
            .unwrap_or_else(|| format!("task {}", row + 1));
        let body = vec![
            Line::from(Span::styled(
                format!("Delete \"{}\"?", title),
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press y to confirm, n or Esc to cancel"),
        ];
        let dialog = Paragraph::new(body).alignment(Alignment::Center).block(
            Block::default()
                .title(Span::styled(
                    "Confirm Delete",
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::LightRed)),
        );
        f.render_widget(Clear, area);
        f.render_widget(dialog, area);
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn teardown_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn month_key(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('[') | KeyCode::Char('<') | KeyCode::Char('p') | KeyCode::PageUp => {
            Some(Action::PrevMonth)
        }
        KeyCode::Char(']') | KeyCode::Char('>') | KeyCode::Char('n') | KeyCode::PageDown => {
            Some(Action::NextMonth)
        }
        _ => None,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn day_span(cell: &DayCell, focused: bool) -> Span<'static> {
    let dot = cell.dot.map(|d| d.glyph()).unwrap_or(' ');
    let text = format!(" {:>2}{} ", cell.display_day, dot);
    let mut style = if cell.is_other_month {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(cell.dot.map(dot_color).unwrap_or(Color::Gray))
    };
    if cell.is_today {
        style = style
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    if cell.is_selected {
        style = style
            .bg(if focused { Color::Cyan } else { Color::Blue })
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD);
    }
    Span::styled(text, style)
}

fn dot_legend() -> Line<'static> {
    let mut spans = Vec::new();
    for (dot, label) in [
        (StatusDot::AllDone, " done  "),
        (StatusDot::Pending, " pending  "),
        (StatusDot::Mixed, " mixed"),
    ] {
        spans.push(Span::styled(
            dot.glyph().to_string(),
            Style::default().fg(dot_color(dot)),
        ));
        spans.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans)
}

fn dot_color(dot: StatusDot) -> Color {
    match dot {
        StatusDot::AllDone => Color::LightGreen,
        StatusDot::Pending => Color::LightRed,
        StatusDot::Mixed => Color::LightYellow,
    }
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Pending => Color::LightRed,
        TaskStatus::Partial => Color::LightYellow,
        TaskStatus::Finished => Color::LightGreen,
    }
}

fn title_style(status: TaskStatus) -> Style {
    match status {
        TaskStatus::Finished => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT),
        _ => Style::default().fg(Color::White),
    }
}

fn prev_char(cursor: usize, text: &str) -> usize {
    text[..cursor]
        .char_indices()
        .next_back()
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}

fn next_char(cursor: usize, text: &str) -> usize {
    text[cursor..]
        .chars()
        .next()
        .map(|ch| cursor + ch.len_utf8())
        .unwrap_or(text.len())
}

fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let mut out: String = text.chars().take(max - 3).collect();
    out.push_str("...");
    out
}

fn format_elapsed(last: Instant) -> String {
    let secs = last.elapsed().as_secs();
    if secs < 60 {
        format!("{}s ago", secs)
    } else if secs < 3600 {
        format!("{}m ago", secs / 60)
    } else {
        format!("{}h ago", secs / 3600)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_keys_step_back_and_forward() {
        for code in [KeyCode::Char('['), KeyCode::Char('p'), KeyCode::PageUp] {
            assert_eq!(month_key(code), Some(Action::PrevMonth));
        }
        for code in [KeyCode::Char(']'), KeyCode::Char('n'), KeyCode::PageDown] {
            assert_eq!(month_key(code), Some(Action::NextMonth));
        }
        assert_eq!(month_key(KeyCode::Char('a')), None);
    }

    #[test]
    fn field_edits_respect_multibyte_chars() {
        let mut field = FieldValue::new("café");
        field.backspace();
        assert_eq!(field.value, "caf");
        field.insert_char('é');
        field.move_left();
        field.move_left();
        field.insert_char('X');
        assert_eq!(field.value, "caXfé");
        field.end();
        field.delete();
        field.home();
        field.delete();
        assert_eq!(field.value, "aXfé");
        assert_eq!(field.with_caret(), "▌aXfé");
    }

    #[test]
    fn truncate_keeps_short_text_and_marks_cuts() {
        assert_eq!(truncate_text("milk", 10), "milk");
        assert_eq!(truncate_text("buy oat milk", 8), "buy o...");
        assert_eq!(truncate_text("abcdef", 2), "ab");
    }
}
