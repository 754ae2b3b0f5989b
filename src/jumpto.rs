use crate::theme::{
    jumpto::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use monthgrid::CalendarDate;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 16;
const OUTER_HEIGHT: u16 = 8;

/// Number of digits in a complete YYYYMMDD entry
const DIGITS: usize = 8;

/// Field boundaries within the digit buffer
const FIELDS: [(&str, usize, usize); 3] = [("Y", 0, 4), ("M", 4, 6), ("D", 6, 8)];

/// Dialog for typing in a date whose month should be shown
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct JumpTo;

impl StatefulWidget for JumpTo {
    type State = JumpToState;

    /*
     * ................
     * .┌─ Go To… ───┐.
     * .│            │.
     * .│ YYYY-MM-DD │.
     * .│            │.
     * .│  [ENTER]   │.
     * .└────────────┘.
     * ................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Go To… ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct JumpToState {
    digits: [Option<u8>; DIGITS],
    pos: usize,
}

impl JumpToState {
    pub(crate) fn new() -> JumpToState {
        JumpToState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Only the "[ENTER]" text, not its centering padding, gets the
            // ready style
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == DIGITS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::with_capacity(DIGITS + 2);
        for (i, (fallback, start, end)) in FIELDS.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("-", BASE_STYLE));
            }
            for dg in &self.digits[start..end] {
                spans.push(match dg {
                    Some(d) => Span::styled(d.to_string(), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    /// The number formed by the digits in `start..end`, if all are filled in
    fn field(&self, start: usize, end: usize) -> Option<u32> {
        self.digits[start..end]
            .iter()
            .try_fold(0u32, |acc, d| d.map(|d| acc * 10 + u32::from(d)))
    }

    fn date(&self) -> Option<CalendarDate> {
        let year = i32::try_from(self.field(0, 4)?).ok()?;
        let month = u8::try_from(self.field(4, 6)?).ok()?;
        let day = u8::try_from(self.field(6, 8)?).ok()?;
        CalendarDate::from_ymd(year, month, day).ok()
    }

    pub(crate) fn handle_input(&mut self, input: JumpToInput) -> JumpToOutput {
        match input {
            JumpToInput::Digit(d) if self.pos < DIGITS && d < 10 => {
                self.digits[self.pos] = Some(d);
                self.pos += 1;
                JumpToOutput::Ok
            }
            JumpToInput::Backspace if self.pos > 0 => {
                self.pos -= 1;
                self.digits[self.pos] = None;
                JumpToOutput::Ok
            }
            JumpToInput::Enter if self.pos == DIGITS => match self.date() {
                Some(date) => JumpToOutput::Jump(date),
                None => JumpToOutput::Invalid,
            },
            _ => JumpToOutput::Invalid,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToInput {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum JumpToOutput {
    Ok,
    Invalid,
    Jump(CalendarDate),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_digits(state: &mut JumpToState, digits: &str) {
        for c in digits.chars() {
            let d = c.to_digit(10).unwrap();
            assert_eq!(
                state.handle_input(JumpToInput::Digit(u8::try_from(d).unwrap())),
                JumpToOutput::Ok
            );
        }
    }

    #[test]
    fn test_complete_entry() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "20240704");
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump("2024-07-04".parse().unwrap())
        );
    }

    #[test]
    fn test_day_is_read_from_day_digits() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "20241129");
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump("2024-11-29".parse().unwrap())
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "202407");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn test_too_many_digits() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "20240704");
        assert_eq!(
            state.handle_input(JumpToInput::Digit(1)),
            JumpToOutput::Invalid
        );
    }

    #[test]
    fn test_invalid_dates() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "20230229");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
        let mut state = JumpToState::new();
        type_digits(&mut state, "20241301");
        assert_eq!(state.handle_input(JumpToInput::Enter), JumpToOutput::Invalid);
    }

    #[test]
    fn test_backspace() {
        let mut state = JumpToState::new();
        assert_eq!(
            state.handle_input(JumpToInput::Backspace),
            JumpToOutput::Invalid
        );
        type_digits(&mut state, "20240705");
        assert_eq!(state.handle_input(JumpToInput::Backspace), JumpToOutput::Ok);
        type_digits(&mut state, "4");
        assert_eq!(
            state.handle_input(JumpToInput::Enter),
            JumpToOutput::Jump("2024-07-04".parse().unwrap())
        );
    }

    #[test]
    fn test_partial_line() {
        let mut state = JumpToState::new();
        type_digits(&mut state, "20245");
        let line = state.to_line();
        let text = line
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect::<String>();
        assert_eq!(text, "2024-5M-DD");
    }
}
