//! Month-grid calendar engine.
//!
//! Given an anchor month, a [`CalendarOptions`] and an optional sparse
//! [`MarkingMap`], a [`Calendar`] produces the week rows of resolved day
//! cells for that month and owns the navigation state that moves the anchor
//! in response to day presses, header arrows and swipes.
pub mod calendar;
pub mod date;
pub mod marking;
pub mod navigation;
pub mod options;
pub mod renderer;
pub use crate::calendar::{Calendar, Cell, CellState, MonthGrid, Slot, WeekRow};
pub use crate::date::{CalendarDate, DateData, DateRange};
pub use crate::marking::{Marking, MarkingEntry, MarkingMap};
pub use crate::navigation::{CalendarListener, Callbacks, InteractionOutcome, Navigator, Notify};
pub use crate::options::CalendarOptions;
pub use crate::renderer::{DayEvent, DayRenderer, DayVariant, Swipe};
