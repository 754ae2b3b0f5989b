use crate::theme::{
    day::{CURSOR_MODIFIER, DISABLED_STYLE, MARK_STYLE, PERIOD_STYLE, TODAY_STYLE},
    ARROW_STYLE, BASE_STYLE, STATUS_STYLE, TITLE_STYLE, WEEKDAY_STYLE, WEEK_NUMBER_STYLE,
};
use monthgrid::{CalendarDate, Cell, CellState, DayRenderer, DayVariant, Marking, MonthGrid, Slot};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Paragraph, Widget},
};
use time::Weekday;

/// Number of columns per day of week
const DAY_WIDTH: u16 = 5;

/// Number of lines above the first week: the title, a gap, the weekday names
/// and their rule
const HEADER_LINES: u16 = 4;

/// Number of lines taken up by each week of the calendar
const WEEK_LINES: u16 = 2;

/// Lines below the last week: the cursor's label and the last event
const STATUS_LINES: u16 = 2;

const ACS_HLINE: char = '─';

const LEFT_ARROW: &str = "<";
const RIGHT_ARROW: &str = ">";

/// Draws one month: header with arrows, weekday names, the week rows, and a
/// status area
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct MonthView<'a> {
    pub(crate) grid: &'a MonthGrid,
    pub(crate) first_day: Weekday,
    pub(crate) variant: DayVariant,
    pub(crate) cursor: CalendarDate,
    pub(crate) loading: bool,
    pub(crate) label: &'a str,
    pub(crate) event: &'a str,
}

impl MonthView<'_> {
    fn title(&self) -> Line<'static> {
        let anchor = self.grid.anchor;
        let mut spans = vec![
            Span::styled(LEFT_ARROW, ARROW_STYLE),
            Span::styled(
                format!("  {} {}  ", anchor.as_date().month(), anchor.year()),
                TITLE_STYLE,
            ),
            Span::styled(RIGHT_ARROW, ARROW_STYLE),
        ];
        if self.loading {
            spans.push(Span::styled(" …", STATUS_STYLE));
        }
        Line::from(spans).centered()
    }

    fn weekday_names(&self, week_numbers: bool) -> Line<'static> {
        let mut spans = Vec::with_capacity(8);
        if week_numbers {
            spans.push(Span::styled(format!("{:>3}  ", "Wk"), WEEK_NUMBER_STYLE));
        }
        let mut wd = self.first_day;
        for _ in 0..7 {
            let name = wd.to_string().chars().take(2).collect::<String>();
            spans.push(Span::styled(format!(" {name:>2}  "), WEEKDAY_STYLE));
            wd = wd.next();
        }
        Line::from(spans)
    }

    fn is_cursor(&self, slot: Option<&Slot>) -> bool {
        slot.and_then(Slot::cell)
            .is_some_and(|c| c.date == self.cursor)
    }
}

impl Widget for MonthView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let week_numbers = self
            .grid
            .weeks
            .first()
            .is_some_and(|w| w.week_number.is_some());
        let width = DAY_WIDTH * (7 + u16::from(week_numbers));
        let rows = u16::try_from(self.grid.weeks.len()).unwrap_or(u16::MAX);
        let height = rows
            .saturating_mul(WEEK_LINES)
            .saturating_add(HEADER_LINES + STATUS_LINES);
        let [area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [area] = Layout::vertical([height]).flex(Flex::Center).areas(area);
        let mut lines = vec![
            self.title(),
            Line::default(),
            self.weekday_names(week_numbers),
            Line::styled(String::from(ACS_HLINE).repeat(width.into()), BASE_STYLE),
        ];
        let renderer = TermDay::new(self.variant);
        for (week, spans) in std::iter::zip(&self.grid.weeks, self.grid.render(&renderer)) {
            let offset = usize::from(week.week_number.is_some());
            let spans = spans.into_iter().enumerate().map(|(i, span)| {
                let slot = i.checked_sub(offset).and_then(|j| week.slots.get(j));
                if self.is_cursor(slot) {
                    span.patch_style(Style::new().add_modifier(CURSOR_MODIFIER))
                } else {
                    span
                }
            });
            lines.push(Line::from_iter(spans));
            for _ in 1..WEEK_LINES {
                lines.push(Line::default());
            }
        }
        lines.push(Line::styled(self.label.to_owned(), STATUS_STYLE));
        lines.push(Line::styled(self.event.to_owned(), STATUS_STYLE));
        Paragraph::new(Text::from(lines))
            .style(BASE_STYLE)
            .render(area, buf);
    }
}

/// Day renderer for the terminal: the day number followed by a one-column
/// indicator whose meaning depends on the marking variant
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct TermDay {
    variant: DayVariant,
}

impl TermDay {
    pub(crate) fn new(variant: DayVariant) -> TermDay {
        TermDay { variant }
    }

    fn indicator(&self, marking: &Marking) -> char {
        match self.variant {
            DayVariant::Basic if marking.any(|e| e.marked) => '•',
            DayVariant::Period => {
                match (
                    marking.any(|e| e.starting_day),
                    marking.any(|e| e.ending_day),
                ) {
                    (true, true) => '|',
                    (true, false) => '[',
                    (false, true) => ']',
                    (false, false) if marking.any(|e| e.color.is_some() || e.selected) => '=',
                    (false, false) => ' ',
                }
            }
            DayVariant::MultiDot => match marking.entries().len() {
                0 => ' ',
                1 => '•',
                _ => ':',
            },
            DayVariant::MultiPeriod if !marking.is_empty() => '=',
            _ => ' ',
        }
    }

    fn style(&self, cell: &Cell, indicator: char) -> Style {
        let marking = cell.marking.as_ref();
        let mut style = match cell.state {
            CellState::Normal => BASE_STYLE,
            CellState::Disabled => DISABLED_STYLE,
            CellState::Today => TODAY_STYLE,
        };
        if marking.is_some_and(|m| m.any(|e| e.disabled)) {
            style = DISABLED_STYLE;
        } else if cell.state != CellState::Disabled && indicator != ' ' {
            style = style.patch(match self.variant {
                DayVariant::Period | DayVariant::MultiPeriod => PERIOD_STYLE,
                _ => MARK_STYLE,
            });
        }
        if marking.is_some_and(|m| m.any(|e| e.selected)) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }
}

impl DayRenderer for TermDay {
    type Output = Span<'static>;

    fn day(&self, cell: &Cell) -> Span<'static> {
        let indicator = cell
            .marking
            .as_ref()
            .map_or(' ', |m| self.indicator(m));
        Span::styled(
            format!(" {:>2}{indicator} ", cell.date.day()),
            self.style(cell, indicator),
        )
    }

    fn blank(&self) -> Span<'static> {
        Span::styled(" ".repeat(usize::from(DAY_WIDTH)), BASE_STYLE)
    }

    fn week_number(&self, number: u8) -> Span<'static> {
        Span::styled(format!("{number:>3}  "), WEEK_NUMBER_STYLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monthgrid::MarkingEntry;

    fn cell(marking: Option<Marking>, state: CellState) -> Cell {
        let mut marks = monthgrid::MarkingMap::new();
        let date = "2024-03-12".parse::<CalendarDate>().unwrap();
        if let Some(m) = marking {
            marks.insert(date, m);
        }
        let options = monthgrid::CalendarOptions {
            current: Some(date),
            disabled_by_default: state == CellState::Disabled,
            ..monthgrid::CalendarOptions::default()
        };
        let today = if state == CellState::Today {
            date
        } else {
            date.add_days(1)
        };
        monthgrid::Calendar::new(options, today)
            .with_marks(marks)
            .month()
            .cell(date)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_plain_day() {
        let span = TermDay::new(DayVariant::Basic).day(&cell(None, CellState::Normal));
        assert_eq!(span.content, " 12  ");
        assert_eq!(span.style, BASE_STYLE);
    }

    #[test]
    fn test_marked_dot() {
        let m = Marking::Single(MarkingEntry {
            marked: true,
            ..MarkingEntry::default()
        });
        let span = TermDay::new(DayVariant::Basic).day(&cell(Some(m), CellState::Today));
        assert_eq!(span.content, " 12• ");
        assert_eq!(span.style, TODAY_STYLE.patch(MARK_STYLE));
    }

    #[test]
    fn test_period_edges() {
        let start = Marking::Single(MarkingEntry {
            starting_day: true,
            color: Some(String::from("green")),
            ..MarkingEntry::default()
        });
        let day = TermDay::new(DayVariant::Period).day(&cell(Some(start), CellState::Normal));
        assert_eq!(day.content, " 12[ ");
    }

    #[test]
    fn test_multi_dot_count() {
        let dots = Marking::Multiple(vec![MarkingEntry::default(), MarkingEntry::default()]);
        let day = TermDay::new(DayVariant::MultiDot).day(&cell(Some(dots), CellState::Normal));
        assert_eq!(day.content, " 12: ");
    }

    #[test]
    fn test_disabled_ignores_mark_colors() {
        let m = Marking::Single(MarkingEntry {
            marked: true,
            ..MarkingEntry::default()
        });
        let span = TermDay::new(DayVariant::Basic).day(&cell(Some(m), CellState::Disabled));
        assert_eq!(span.content, " 12• ");
        assert_eq!(span.style, DISABLED_STYLE);
    }

    #[test]
    fn test_blank_and_week_number() {
        let r = TermDay::new(DayVariant::Custom);
        assert_eq!(r.blank().content, "     ");
        assert_eq!(r.week_number(9).content, "  9  ");
    }
}
