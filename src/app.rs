use crate::help::Help;
use crate::jumpto::{JumpTo, JumpToInput, JumpToOutput, JumpToState};
use crate::theme::BASE_STYLE;
use crate::widget::MonthView;
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use monthgrid::{
    Calendar, CalendarDate, CalendarListener, DateData, DayEvent, InteractionOutcome, Notify,
    Swipe,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{StatefulWidget, Widget},
    DefaultTerminal,
};
use std::io::{self, Write};

#[derive(Debug)]
pub(crate) struct App {
    calendar: Calendar,
    cursor: CalendarDate,
    events: EventLog,
    state: AppState,
}

impl App {
    pub(crate) fn new(calendar: Calendar) -> App {
        let today = calendar.today();
        let cursor = if today.is_same_month(calendar.anchor()) {
            today
        } else {
            calendar.anchor()
        };
        App {
            calendar,
            cursor,
            events: EventLog::default(),
            state: AppState::Calendar,
        }
    }

    pub(crate) fn run(mut self, mut terminal: DefaultTerminal) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw(&mut self, terminal: &mut DefaultTerminal) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the key did nothing
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('h') | KeyCode::Left => self.move_cursor(-1),
                KeyCode::Char('l') | KeyCode::Right => self.move_cursor(1),
                KeyCode::Char('k') | KeyCode::Up => self.move_cursor(-7),
                KeyCode::Char('j') | KeyCode::Down => self.move_cursor(7),
                KeyCode::Enter => self.press(DayEvent::Press(self.cursor)),
                KeyCode::Char(' ') => self.press(DayEvent::LongPress(self.cursor)),
                KeyCode::Char('p' | '<') | KeyCode::PageUp => self.add_months(-1),
                KeyCode::Char('n' | '>') | KeyCode::PageDown => self.add_months(1),
                KeyCode::Char('H') => self.swipe(Swipe::Right),
                KeyCode::Char('L') => self.swipe(Swipe::Left),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.go_to(self.calendar.today());
                    true
                }
                KeyCode::Char('g') => {
                    self.state = AppState::Jumping(JumpToState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Jumping(state) => {
                if matches!(key, KeyCode::Char('q' | 'g') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).and_then(|d| u8::try_from(d).ok())
                        {
                            Some(d) => state.handle_input(JumpToInput::Digit(d)),
                            None => JumpToOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(JumpToInput::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(JumpToInput::Enter),
                        _ => JumpToOutput::Invalid,
                    };
                    match output {
                        JumpToOutput::Ok => true,
                        JumpToOutput::Invalid => false,
                        JumpToOutput::Jump(date) => {
                            self.state = AppState::Calendar;
                            self.go_to(date);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    /// Moves the cursor within the visible grid; hidden and off-grid days
    /// can't be reached
    fn move_cursor(&mut self, days: i64) -> bool {
        let target = self.cursor.add_days(days);
        if self.calendar.month().cell(target).is_some() {
            self.cursor = target;
            true
        } else {
            false
        }
    }

    fn press(&mut self, event: DayEvent) -> bool {
        let outcome = self.calendar.dispatch(event, &mut self.events);
        outcome != InteractionOutcome::Rejected
    }

    fn add_months(&mut self, count: i32) -> bool {
        let moved = self.calendar.add_months(count, &mut self.events);
        self.follow_anchor(moved);
        true
    }

    fn swipe(&mut self, direction: Swipe) -> bool {
        let moved = self.calendar.swipe(direction, &mut self.events);
        self.follow_anchor(moved);
        moved
    }

    fn go_to(&mut self, date: CalendarDate) {
        self.calendar
            .navigator_mut()
            .request_month(date, Notify::Listeners, &mut self.events);
        self.cursor = date;
    }

    /// After the month changes, puts the cursor on the same day of the new
    /// month
    fn follow_anchor(&mut self, moved: bool) {
        let anchor = self.calendar.anchor();
        if moved && !self.cursor.is_same_month(anchor) {
            self.cursor = anchor.set_day(self.cursor.day());
        }
    }
}

impl Widget for &mut App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let grid = self.calendar.month();
        let options = self.calendar.options();
        MonthView {
            grid: &grid,
            first_day: options.first_weekday(),
            variant: options.marking_type,
            cursor: self.cursor,
            loading: self.calendar.show_loading_indicator(),
            label: grid
                .cell(self.cursor)
                .map_or("", |c| c.accessibility_label.as_str()),
            event: self.events.last.as_deref().unwrap_or_default(),
        }
        .render(area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Jumping(ref mut state) = self.state {
            JumpTo.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Jumping(JumpToState),
    Quitting,
}

/// Keeps the most recent notification for the status line
#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct EventLog {
    last: Option<String>,
}

impl CalendarListener for EventLog {
    fn month_changed(&mut self, month: DateData) {
        tracing::info!(month = %month.date_string, "month changed");
        self.last = Some(format!("Month changed: {}", month.date_string));
    }

    fn day_pressed(&mut self, day: DateData) {
        tracing::info!(day = %day.date_string, "day pressed");
        self.last = Some(format!("Pressed {}", day.date_string));
    }

    fn day_long_pressed(&mut self, day: DateData) {
        tracing::info!(day = %day.date_string, "day long-pressed");
        self.last = Some(format!("Long-pressed {}", day.date_string));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthgrid::CalendarOptions;
    use ratatui::style::Modifier;

    fn cd(s: &str) -> CalendarDate {
        s.parse().unwrap()
    }

    fn app(options: CalendarOptions) -> App {
        App::new(Calendar::new(
            CalendarOptions {
                current: Some(cd("2024-03-01")),
                ..options
            },
            cd("2024-03-15"),
        ))
    }

    fn screen(app: &mut App) -> (Buffer, Vec<String>) {
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        let rows = (0..area.height)
            .map(|y| {
                (0..area.width)
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect();
        (buffer, rows)
    }

    #[test]
    fn test_render_month() {
        let mut app = app(CalendarOptions::default());
        let (buffer, rows) = screen(&mut app);
        assert!(rows.iter().any(|r| r.contains("<  March 2024  >")));
        assert!(rows
            .iter()
            .any(|r| r.contains(" Su   Mo   Tu   We   Th   Fr   Sa")));
        assert!(rows
            .iter()
            .any(|r| r.contains("25   26   27   28   29    1    2")));
        assert!(rows
            .iter()
            .any(|r| r.contains("31    1    2    3    4    5    6")));
        assert!(rows
            .iter()
            .any(|r| r.contains("today Friday 15 March 2024")));
        let y = rows.iter().position(|r| r.contains(" 15 ")).unwrap();
        let x = rows[y].find("15").unwrap();
        let style = buffer[(u16::try_from(x).unwrap(), u16::try_from(y).unwrap())].style();
        assert!(style.add_modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn test_render_monday_first_with_week_numbers() {
        let mut app = app(CalendarOptions {
            first_day: 1,
            show_week_numbers: true,
            ..CalendarOptions::default()
        });
        let (_, rows) = screen(&mut app);
        assert!(rows
            .iter()
            .any(|r| r.contains(" Wk   Mo   Tu   We   Th   Fr   Sa   Su")));
        assert!(rows
            .iter()
            .any(|r| r.contains("  9   26   27   28   29    1    2    3")));
    }

    #[test]
    fn test_month_keys() {
        let mut app = app(CalendarOptions::default());
        assert!(app.handle_key(KeyCode::Char('n')));
        assert_eq!(app.calendar.anchor(), cd("2024-04-01"));
        assert_eq!(app.cursor, cd("2024-04-15"));
        assert_eq!(
            app.events.last.as_deref(),
            Some("Month changed: 2024-04-01")
        );
        assert!(app.handle_key(KeyCode::Char('<')));
        assert_eq!(app.calendar.anchor(), cd("2024-03-01"));
        assert_eq!(app.cursor, cd("2024-03-15"));
        assert!(!app.handle_key(KeyCode::Char('H')));
        assert_eq!(app.calendar.anchor(), cd("2024-03-01"));
    }

    #[test]
    fn test_swipe_keys() {
        let mut app = app(CalendarOptions {
            enable_swipe_months: true,
            ..CalendarOptions::default()
        });
        assert!(app.handle_key(KeyCode::Char('L')));
        assert_eq!(app.calendar.anchor(), cd("2024-04-01"));
        assert!(app.handle_key(KeyCode::Char('H')));
        assert!(app.handle_key(KeyCode::Char('H')));
        assert_eq!(app.calendar.anchor(), cd("2024-02-01"));
    }

    #[test]
    fn test_cursor_and_press() {
        let mut app = app(CalendarOptions::default());
        assert!(app.handle_key(KeyCode::Char('h')));
        assert_eq!(app.cursor, cd("2024-03-14"));
        assert!(app.handle_key(KeyCode::Up));
        assert!(app.handle_key(KeyCode::Up));
        assert_eq!(app.cursor, cd("2024-02-29"));
        assert!(!app.handle_key(KeyCode::Up));
        assert_eq!(app.cursor, cd("2024-02-29"));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.calendar.anchor(), cd("2024-02-29"));
        assert_eq!(app.events.last.as_deref(), Some("Pressed 2024-02-29"));
        assert!(app.handle_key(KeyCode::Char(' ')));
        assert_eq!(app.events.last.as_deref(), Some("Long-pressed 2024-02-29"));
    }

    #[test]
    fn test_press_outside_range() {
        let mut app = app(CalendarOptions {
            min_date: Some(cd("2024-03-10")),
            ..CalendarOptions::default()
        });
        assert!(app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.cursor, cd("2024-03-08"));
        assert!(!app.handle_key(KeyCode::Enter));
        assert_eq!(app.events.last, None);
    }

    #[test]
    fn test_hidden_days_are_unreachable() {
        let mut app = app(CalendarOptions {
            hide_extra_days: true,
            ..CalendarOptions::default()
        });
        assert!(app.handle_key(KeyCode::Char('k')));
        assert!(app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.cursor, cd("2024-03-01"));
        assert!(!app.handle_key(KeyCode::Char('h')));
        assert!(!app.handle_key(KeyCode::Char('k')));
        assert_eq!(app.cursor, cd("2024-03-01"));
    }

    #[test]
    fn test_jump_to_date() {
        let mut app = app(CalendarOptions::default());
        assert!(app.handle_key(KeyCode::Char('g')));
        assert!(matches!(app.state, AppState::Jumping(_)));
        for c in "20240704".chars() {
            assert!(app.handle_key(KeyCode::Char(c)));
        }
        assert!(!app.handle_key(KeyCode::Char('x')));
        assert!(app.handle_key(KeyCode::Enter));
        assert_eq!(app.state, AppState::Calendar);
        assert_eq!(app.calendar.anchor(), cd("2024-07-04"));
        assert_eq!(app.cursor, cd("2024-07-04"));
        assert_eq!(
            app.events.last.as_deref(),
            Some("Month changed: 2024-07-04")
        );
    }

    #[test]
    fn test_back_to_today() {
        let mut app = app(CalendarOptions::default());
        app.handle_key(KeyCode::Char('n'));
        app.handle_key(KeyCode::Char('n'));
        assert!(app.handle_key(KeyCode::Home));
        assert_eq!(app.calendar.anchor(), cd("2024-03-15"));
        assert_eq!(app.cursor, cd("2024-03-15"));
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app(CalendarOptions::default());
        assert!(app.handle_key(KeyCode::Char('?')));
        assert_eq!(app.state, AppState::Helping);
        let (_, rows) = screen(&mut app);
        assert!(rows.iter().any(|r| r.contains(" Commands ")));
        assert!(app.handle_key(KeyCode::Char('x')));
        assert_eq!(app.state, AppState::Calendar);
        assert!(app.handle_key(KeyCode::Char('q')));
        assert!(app.quitting());
    }
}
