//! Turning an anchor month into rows of resolved day cells
pub mod classify;
pub mod label;
pub mod weeks;
pub use self::classify::{CellState, Classifier};
pub use self::label::{EnglishLabels, LabelFormatError, LabelFormatter, LocaleLabels};
use crate::date::{CalendarDate, DateData, DAYS_IN_WEEK};
use crate::marking::{self, Marking, MarkingMap};
use crate::navigation::{CalendarListener, InteractionOutcome, Navigator};
use crate::options::CalendarOptions;
use crate::renderer::{DayEvent, Swipe};

/// Prefix of every cell's test identifier
pub const SELECT_DATE_SLOT: &str = "native.calendar.SELECT_DATE_SLOT";

/// Everything a day renderer needs to draw one date
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cell {
    pub date: CalendarDate,
    pub state: CellState,
    pub marking: Option<Marking>,
    pub accessibility_label: String,
    pub test_id: String,
    touch_disabled: bool,
}

impl Cell {
    pub fn data(&self) -> DateData {
        DateData::from(self.date)
    }

    /// Whether presses on this cell should reach the engine at all
    pub fn accepts_touch(&self) -> bool {
        !self.touch_disabled
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Slot {
    Day(Box<Cell>),
    /// A hidden extra day
    Blank,
}

impl Slot {
    pub fn cell(&self) -> Option<&Cell> {
        match self {
            Slot::Day(cell) => Some(cell.as_ref()),
            Slot::Blank => None,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeekRow {
    /// ISO week number of the row's last date, when week numbers are shown
    pub week_number: Option<u8>,
    /// Always seven slots, in first-day-of-week order
    pub slots: Vec<Slot>,
}

impl WeekRow {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.slots.iter().filter_map(Slot::cell)
    }
}

/// One fully resolved month.  Building twice from the same inputs yields
/// equal grids.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MonthGrid {
    pub anchor: CalendarDate,
    pub weeks: Vec<WeekRow>,
}

impl MonthGrid {
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.weeks.iter().flat_map(WeekRow::cells)
    }

    pub fn cell(&self, date: CalendarDate) -> Option<&Cell> {
        self.cells().find(|c| c.date == date)
    }
}

/// A calendar instance: the options it was given, the marking map, and the
/// navigation state, with the grid derived from them on demand
#[derive(Debug)]
pub struct Calendar {
    options: CalendarOptions,
    navigator: Navigator,
    marks: Option<MarkingMap>,
    labels: Box<dyn LabelFormatter>,
    today: CalendarDate,
}

impl Calendar {
    pub fn new(options: CalendarOptions, today: CalendarDate) -> Calendar {
        let navigator = Navigator::new(&options, today);
        let labels = labels_for(&options);
        Calendar {
            options,
            navigator,
            marks: None,
            labels,
            today,
        }
    }

    pub fn with_marks(mut self, marks: MarkingMap) -> Calendar {
        self.marks = Some(marks);
        self
    }

    pub fn with_labels<F: LabelFormatter + 'static>(mut self, labels: F) -> Calendar {
        self.labels = Box::new(labels);
        self
    }

    pub fn set_marks(&mut self, marks: Option<MarkingMap>) {
        self.marks = marks;
    }

    pub fn marks(&self) -> Option<&MarkingMap> {
        self.marks.as_ref()
    }

    /// Replaces the options, re-syncing the anchor to a changed current
    /// date without notifying anyone
    pub fn set_options(&mut self, options: CalendarOptions) {
        self.navigator.apply_options(&options);
        if options.today_label != self.options.today_label
            || options.accessibility_date_format != self.options.accessibility_date_format
        {
            self.labels = labels_for(&options);
        }
        self.options = options;
    }

    pub fn options(&self) -> &CalendarOptions {
        &self.options
    }

    pub fn anchor(&self) -> CalendarDate {
        self.navigator.anchor()
    }

    pub fn today(&self) -> CalendarDate {
        self.today
    }

    /// Moves "today" forward, e.g. when the host notices midnight passed
    pub fn set_today(&mut self, today: CalendarDate) {
        self.today = today;
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Routes an event from a day renderer.  Presses on cells that refuse
    /// touch never reach the navigator.
    pub fn dispatch<L: CalendarListener + ?Sized>(
        &mut self,
        event: DayEvent,
        listener: &mut L,
    ) -> InteractionOutcome {
        let date = event.date();
        if self.touch_disabled(date, self.classifier().classify(date)) {
            tracing::debug!(%date, "ignoring interaction on a touch-disabled day");
            return InteractionOutcome::Rejected;
        }
        self.navigator.interact(event, listener)
    }

    pub fn add_months<L: CalendarListener + ?Sized>(&mut self, count: i32, listener: &mut L) -> bool {
        self.navigator.add_months(count, listener)
    }

    pub fn swipe<L: CalendarListener + ?Sized>(&mut self, direction: Swipe, listener: &mut L) -> bool {
        self.navigator.swipe(direction, listener)
    }

    pub fn classifier(&self) -> Classifier {
        Classifier {
            anchor: self.anchor(),
            today: self.today,
            range: self.options.range(),
            disabled_by_default: self.options.disabled_by_default,
        }
    }

    /// Builds the grid for the anchor month
    pub fn month(&self) -> MonthGrid {
        let anchor = self.anchor();
        let classifier = self.classifier();
        let dates = weeks::month_page(
            anchor,
            self.options.first_weekday(),
            self.options.six_weeks(),
        );
        let weeks = dates
            .chunks(DAYS_IN_WEEK)
            .map(|row| WeekRow {
                week_number: row
                    .last()
                    .filter(|_| self.options.show_week_numbers)
                    .map(CalendarDate::week_of_year),
                slots: row
                    .iter()
                    .map(|&date| {
                        if self.options.hide_extra_days && !date.is_same_month(anchor) {
                            Slot::Blank
                        } else {
                            Slot::Day(Box::new(self.cell(date, classifier.classify(date))))
                        }
                    })
                    .collect(),
            })
            .collect();
        MonthGrid { anchor, weeks }
    }

    /// Whether the header should show a loading indicator: the marking map
    /// has nothing yet for the last day of the current date's month
    pub fn show_loading_indicator(&self) -> bool {
        if !self.options.display_loading_indicator {
            return false;
        }
        self.options.current.is_some_and(|current| {
            !self
                .marks
                .as_ref()
                .is_some_and(|m| m.contains_date(current.last_of_month()))
        })
    }

    fn cell(&self, date: CalendarDate, state: CellState) -> Cell {
        let marking = marking::resolve(date, self.marks.as_ref());
        Cell {
            date,
            state,
            accessibility_label: label::compose(state, date, marking, self.labels.as_ref()),
            test_id: format!("{SELECT_DATE_SLOT}-{date}"),
            touch_disabled: self.touch_disabled(date, state),
            marking: marking.cloned(),
        }
    }

    fn touch_disabled(&self, date: CalendarDate, state: CellState) -> bool {
        let marking = marking::resolve(date, self.marks.as_ref());
        marking.is_some_and(|m| m.any(|e| e.disable_touch_event))
            || (state.is_disabled() && self.options.disable_all_touch_events_for_disabled_days)
    }
}

fn labels_for(options: &CalendarOptions) -> Box<dyn LabelFormatter> {
    if options.today_label.is_none() && options.accessibility_date_format.is_none() {
        return Box::new(EnglishLabels);
    }
    match LocaleLabels::new(
        options.today_label.clone(),
        options.accessibility_date_format.as_deref(),
    ) {
        Ok(labels) => Box::new(labels),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring accessibility date format");
            Box::new(LocaleLabels::with_today(options.today_label.clone()))
        }
    }
}
