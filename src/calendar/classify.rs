use crate::date::{CalendarDate, DateRange};
use serde::Serialize;

/// Display state of a day cell.  Renderers branch on this alone, never on
/// why a day is disabled.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Normal,
    Disabled,
    Today,
}

impl CellState {
    pub fn is_disabled(self) -> bool {
        self == CellState::Disabled
    }
}

/// The inputs shared by every cell of one grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Classifier {
    pub anchor: CalendarDate,
    pub today: CalendarDate,
    pub range: DateRange,
    pub disabled_by_default: bool,
}

impl Classifier {
    /// Administrative constraints (global disabling, the date range) come
    /// first so that they override the "today" highlight.
    pub fn classify(&self, date: CalendarDate) -> CellState {
        if self.disabled_by_default
            || !self.range.contains(date)
            || !date.is_same_month(self.anchor)
        {
            CellState::Disabled
        } else if date.is_same_date(self.today) {
            CellState::Today
        } else {
            CellState::Normal
        }
    }
}
