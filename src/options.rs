//! The calendar's configuration surface
use crate::date::{deserialize_lenient, CalendarDate, DateRange, WeekdayExt};
use crate::renderer::DayVariant;
use serde::Deserialize;
use time::Weekday;

/// Options recognized by a calendar instance.  Deserializes from the
/// camelCase keys a host would pass as props; every key is optional, and
/// malformed dates are treated as absent.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct CalendarOptions {
    /// Seeds the displayed month and re-syncs it whenever it changes
    #[serde(deserialize_with = "deserialize_lenient")]
    pub current: Option<CalendarDate>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub min_date: Option<CalendarDate>,
    #[serde(deserialize_with = "deserialize_lenient")]
    pub max_date: Option<CalendarDate>,
    /// 0 = Sunday through 6 = Saturday
    pub first_day: u8,
    /// Always show six weeks.  Ignored when `hide_extra_days` is set.
    pub show_six_weeks: bool,
    pub hide_extra_days: bool,
    pub disabled_by_default: bool,
    /// Tapping a day of another month no longer switches to that month
    pub disable_month_change: bool,
    pub show_week_numbers: bool,
    #[serde(alias = "dayRendererVariant")]
    pub marking_type: DayVariant,
    #[serde(alias = "enableSwipeNavigation")]
    pub enable_swipe_months: bool,
    pub disable_all_touch_events_for_disabled_days: bool,
    pub display_loading_indicator: bool,
    /// Replaces the word "today" in accessibility labels
    pub today_label: Option<String>,
    /// A `time` format description replacing the date phrase of
    /// accessibility labels
    pub accessibility_date_format: Option<String>,
}

impl CalendarOptions {
    pub fn from_json(s: &str) -> Result<CalendarOptions, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn range(&self) -> DateRange {
        DateRange::new(self.min_date, self.max_date)
    }

    pub fn first_weekday(&self) -> Weekday {
        Weekday::from_index0(self.first_day)
    }

    /// Whether padding weeks up to six rows are added.  Hidden extra days
    /// would leave such weeks blank, so hiding wins.
    pub fn six_weeks(&self) -> bool {
        self.show_six_weeks && !self.hide_extra_days
    }
}
