use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const TITLE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEKDAY_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const WEEK_NUMBER_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const ARROW_STYLE: Style = BASE_STYLE.fg(Color::LightBlue);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.fg(Color::Gray);

pub(crate) mod day {
    use super::*;

    pub(crate) const DISABLED_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const TODAY_STYLE: Style = BASE_STYLE
        .fg(Color::LightYellow)
        .add_modifier(Modifier::BOLD);

    pub(crate) const MARK_STYLE: Style = Style::new().fg(Color::LightBlue);

    pub(crate) const PERIOD_STYLE: Style = Style::new().fg(Color::LightGreen);

    pub(crate) const CURSOR_MODIFIER: Modifier = Modifier::REVERSED;
}

pub(crate) mod jumpto {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
