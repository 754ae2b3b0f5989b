//! The month navigation state machine.  Its only state is the anchor month;
//! every transition runs to completion and notifies listeners at most once.
use crate::date::{CalendarDate, DateData, DateRange};
use crate::options::CalendarOptions;
use crate::renderer::{DayEvent, Swipe};
use std::fmt;

/// Receives notifications and interactions.  All methods default to doing
/// nothing.
pub trait CalendarListener {
    fn month_changed(&mut self, _month: DateData) {}

    /// Always given a single month by this calendar; the list form lets
    /// multi-month viewers share the contract
    fn visible_months_changed(&mut self, _months: Vec<DateData>) {}

    fn day_pressed(&mut self, _day: DateData) {}

    fn day_long_pressed(&mut self, _day: DateData) {}
}

impl CalendarListener for () {}

impl<L: CalendarListener + ?Sized> CalendarListener for &mut L {
    fn month_changed(&mut self, month: DateData) {
        (**self).month_changed(month);
    }

    fn visible_months_changed(&mut self, months: Vec<DateData>) {
        (**self).visible_months_changed(months);
    }

    fn day_pressed(&mut self, day: DateData) {
        (**self).day_pressed(day);
    }

    fn day_long_pressed(&mut self, day: DateData) {
        (**self).day_long_pressed(day);
    }
}

type Callback<T> = Box<dyn FnMut(T)>;

/// Adapts optional closures to [`CalendarListener`]
#[derive(Default)]
pub struct Callbacks {
    month_change: Option<Callback<DateData>>,
    visible_months_change: Option<Callback<Vec<DateData>>>,
    day_press: Option<Callback<DateData>>,
    day_long_press: Option<Callback<DateData>>,
}

impl Callbacks {
    pub fn new() -> Callbacks {
        Callbacks::default()
    }

    pub fn on_month_change<F: FnMut(DateData) + 'static>(mut self, f: F) -> Callbacks {
        self.month_change = Some(Box::new(f));
        self
    }

    pub fn on_visible_months_change<F: FnMut(Vec<DateData>) + 'static>(mut self, f: F) -> Callbacks {
        self.visible_months_change = Some(Box::new(f));
        self
    }

    pub fn on_day_press<F: FnMut(DateData) + 'static>(mut self, f: F) -> Callbacks {
        self.day_press = Some(Box::new(f));
        self
    }

    pub fn on_day_long_press<F: FnMut(DateData) + 'static>(mut self, f: F) -> Callbacks {
        self.day_long_press = Some(Box::new(f));
        self
    }
}

impl fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callbacks")
            .field("month_change", &self.month_change.is_some())
            .field("visible_months_change", &self.visible_months_change.is_some())
            .field("day_press", &self.day_press.is_some())
            .field("day_long_press", &self.day_long_press.is_some())
            .finish()
    }
}

impl CalendarListener for Callbacks {
    fn month_changed(&mut self, month: DateData) {
        if let Some(f) = self.month_change.as_mut() {
            f(month);
        }
    }

    fn visible_months_changed(&mut self, months: Vec<DateData>) {
        if let Some(f) = self.visible_months_change.as_mut() {
            f(months);
        }
    }

    fn day_pressed(&mut self, day: DateData) {
        if let Some(f) = self.day_press.as_mut() {
            f(day);
        }
    }

    fn day_long_pressed(&mut self, day: DateData) {
        if let Some(f) = self.day_long_press.as_mut() {
            f(day);
        }
    }
}

/// Whether a month change notifies listeners
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Notify {
    Listeners,
    Silently,
}

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum InteractionOutcome {
    /// The date was outside the allowed range; nothing happened
    Rejected,
    /// The callback fired and the anchor stayed put
    Handled,
    /// The callback fired after the anchor moved to the date's month
    MonthChanged,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Navigator {
    anchor: CalendarDate,
    range: DateRange,
    disable_month_change: bool,
    swipe_enabled: bool,
}

impl Navigator {
    /// Starts at the configured current date, or at `today` if there is none
    pub fn new(options: &CalendarOptions, today: CalendarDate) -> Navigator {
        Navigator {
            anchor: options.current.unwrap_or(today),
            range: options.range(),
            disable_month_change: options.disable_month_change,
            swipe_enabled: options.enable_swipe_months,
        }
    }

    pub fn anchor(&self) -> CalendarDate {
        self.anchor
    }

    /// Takes in changed options from the host.  Returns whether the anchor
    /// moved as a result of a new current date.
    pub fn apply_options(&mut self, options: &CalendarOptions) -> bool {
        self.range = options.range();
        self.disable_month_change = options.disable_month_change;
        self.swipe_enabled = options.enable_swipe_months;
        self.sync_current(options.current)
    }

    /// Adopts an externally supplied current date if it names a different
    /// month.  This reflects an outside fact rather than user navigation, so
    /// no listener is notified.
    pub fn sync_current(&mut self, current: Option<CalendarDate>) -> bool {
        match current {
            Some(date) if !date.is_same_month(self.anchor) => {
                tracing::debug!(from = %self.anchor, to = %date, "synced anchor to current date");
                self.anchor = date;
                true
            }
            _ => false,
        }
    }

    /// Moves the anchor to the month of `date`.  Requests for the month
    /// already shown are no-ops and never notify.
    pub fn request_month<L: CalendarListener + ?Sized>(
        &mut self,
        date: CalendarDate,
        notify: Notify,
        listener: &mut L,
    ) -> bool {
        if date.is_same_month(self.anchor) {
            tracing::trace!(month = %date, "month already shown");
            return false;
        }
        tracing::debug!(from = %self.anchor, to = %date, "month changed");
        self.anchor = date;
        if notify == Notify::Listeners {
            let month = DateData::from(date);
            listener.month_changed(month.clone());
            listener.visible_months_changed(vec![month]);
        }
        true
    }

    pub fn add_months<L: CalendarListener + ?Sized>(&mut self, count: i32, listener: &mut L) -> bool {
        self.request_month(self.anchor.add_months(count), Notify::Listeners, listener)
    }

    /// What the header's right arrow does
    pub fn next_month<L: CalendarListener + ?Sized>(&mut self, listener: &mut L) -> bool {
        self.add_months(1, listener)
    }

    /// What the header's left arrow does
    pub fn previous_month<L: CalendarListener + ?Sized>(&mut self, listener: &mut L) -> bool {
        self.add_months(-1, listener)
    }

    /// Handles a press or long press on a day.  Out-of-range days are
    /// rejected outright; otherwise the month follows the day (unless month
    /// changes are disabled) and the matching callback fires either way.
    pub fn interact<L: CalendarListener + ?Sized>(
        &mut self,
        event: DayEvent,
        listener: &mut L,
    ) -> InteractionOutcome {
        let date = event.date();
        if !self.range.contains(date) {
            tracing::debug!(%date, "ignoring interaction outside the date range");
            return InteractionOutcome::Rejected;
        }
        let changed =
            !self.disable_month_change && self.request_month(date, Notify::Listeners, listener);
        match event {
            DayEvent::Press(_) => listener.day_pressed(DateData::from(date)),
            DayEvent::LongPress(_) => listener.day_long_pressed(DateData::from(date)),
        }
        if changed {
            InteractionOutcome::MonthChanged
        } else {
            InteractionOutcome::Handled
        }
    }

    pub fn press_day<L: CalendarListener + ?Sized>(
        &mut self,
        date: CalendarDate,
        listener: &mut L,
    ) -> InteractionOutcome {
        self.interact(DayEvent::Press(date), listener)
    }

    pub fn long_press_day<L: CalendarListener + ?Sized>(
        &mut self,
        date: CalendarDate,
        listener: &mut L,
    ) -> InteractionOutcome {
        self.interact(DayEvent::LongPress(date), listener)
    }

    /// A left swipe advances a month and a right swipe goes back one, just
    /// like the header arrows.  Vertical swipes, and all swipes while swipe
    /// navigation is off, do nothing.
    pub fn swipe<L: CalendarListener + ?Sized>(&mut self, direction: Swipe, listener: &mut L) -> bool {
        if !self.swipe_enabled {
            return false;
        }
        match direction {
            Swipe::Left => self.next_month(listener),
            Swipe::Right => self.previous_month(listener),
            Swipe::Up | Swipe::Down => false,
        }
    }
}
