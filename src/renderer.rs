//! The narrow contracts between the engine and the presentational layer:
//! day renderers, the events they emit, and swipe gestures.
use crate::calendar::{Cell, MonthGrid, Slot};
use crate::date::CalendarDate;
use serde::{Deserialize, Serialize};

/// Which day renderer the host should bind.  Purely a selection switch; the
/// engine computes the same cells for every variant.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayVariant {
    /// Single dot / selection marking
    #[default]
    #[serde(alias = "dot")]
    Basic,
    Period,
    MultiDot,
    MultiPeriod,
    Custom,
}

/// A day renderer turns resolved cells into whatever the host draws with.
/// Interaction is reported back to the engine as [`DayEvent`]s.
pub trait DayRenderer {
    type Output;

    fn day(&self, cell: &Cell) -> Self::Output;

    /// Placeholder for a hidden extra day, occupying the same grid position
    fn blank(&self) -> Self::Output;

    fn week_number(&self, number: u8) -> Self::Output;
}

impl MonthGrid {
    /// Runs every slot of the grid through `renderer`, row by row.  The week
    /// number pseudo-cell, when present, leads each row.
    pub fn render<R: DayRenderer>(&self, renderer: &R) -> Vec<Vec<R::Output>> {
        self.weeks
            .iter()
            .map(|week| {
                week.week_number
                    .map(|n| renderer.week_number(n))
                    .into_iter()
                    .chain(week.slots.iter().map(|slot| match slot {
                        Slot::Day(cell) => renderer.day(cell),
                        Slot::Blank => renderer.blank(),
                    }))
                    .collect()
            })
            .collect()
    }
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DayEvent {
    Press(CalendarDate),
    LongPress(CalendarDate),
}

impl DayEvent {
    pub fn date(&self) -> CalendarDate {
        match self {
            DayEvent::Press(date) | DayEvent::LongPress(date) => *date,
        }
    }
}

/// Directions reported by the external gesture recognizer
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Swipe {
    Up,
    Down,
    Left,
    Right,
}
