use crate::date::{iter_days_after, iter_days_before, CalendarDate, WeekdayExt, DAYS_IN_WEEK};
use std::iter::once;
use time::Weekday;

/// Rows a six-week grid always has
pub const SIX_WEEKS: usize = 6;

/// Returns the dates shown for the month containing `anchor`, from the first
/// day of the week holding the 1st through the last day of the week holding
/// the month's last day.  With `six_weeks`, whole weeks are appended until
/// there are six rows.
///
/// The result's length is a multiple of seven, except at the very ends of
/// representable time where the surrounding weeks do not exist.
pub fn month_page(anchor: CalendarDate, first_day: Weekday, six_weeks: bool) -> Vec<CalendarDate> {
    let first = anchor.first_of_month();
    let last = anchor.last_of_month();
    let lead = usize::from((first.weekday().index0() + 7 - first_day.index0()) % 7);
    let mut dates = Vec::with_capacity(DAYS_IN_WEEK * SIX_WEEKS);
    dates.extend(iter_days_before(first).take(lead));
    dates.reverse();
    dates.extend(once(first).chain(iter_days_after(first)).take_while(|d| *d <= last));
    // Complete the final week
    dates.extend(iter_days_after(last).take_while(|d| d.weekday() != first_day));
    if six_weeks {
        if let Some(&end) = dates.last() {
            let missing = (DAYS_IN_WEEK * SIX_WEEKS).saturating_sub(dates.len());
            dates.extend(iter_days_after(end).take(missing));
        }
    }
    tracing::trace!(
        month = %first,
        %first_day,
        six_weeks,
        days = dates.len(),
        "built month page"
    );
    dates
}
