use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Paragraph, Widget},
};

static TEXT: &[&str] = &[
    "h, LEFT         Move cursor back one day",
    "l, RIGHT        Move cursor forward one day",
    "k, UP           Move cursor back one week",
    "j, DOWN         Move cursor forward one week",
    "ENTER           Press the day under the cursor",
    "SPACE           Long-press the day under the cursor",
    "p, <, PAGE UP   Previous month",
    "n, >, PAGE DOWN Next month",
    "H               Swipe right",
    "L               Swipe left",
    "0, HOME         Go to today",
    "g               Input date to go to",
    "?               Show this help",
    "q, ESC          Quit",
    "",
    "Press the Any Key to dismiss.",
];

/// Centered, bordered list of key bindings drawn over the calendar
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct Help(pub(crate) Style);

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter(TEXT.iter().map(|&s| Line::raw(s)));
        let width = boxed(text.width(), area.width);
        let height = boxed(text.height(), area.height);
        let [help_area] = Layout::horizontal([width]).flex(Flex::Center).areas(area);
        let [help_area] = Layout::vertical([height])
            .flex(Flex::Center)
            .areas(help_area);
        Clear.render(help_area, buf);
        Paragraph::new(text)
            .block(
                Block::bordered()
                    .title(" Commands ")
                    .title_alignment(Alignment::Center),
            )
            .style(self.0)
            .render(help_area, buf);
    }
}

/// Length of `len` cells plus a border on each side, limited to `avail`
fn boxed(len: usize, avail: u16) -> u16 {
    u16::try_from(len)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(avail)
}
