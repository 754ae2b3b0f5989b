//! Accessibility labels for day cells
use super::classify::CellState;
use crate::date::CalendarDate;
use crate::marking::Marking;
use std::fmt;
use thiserror::Error;
use time::format_description::{self, OwnedFormatItem};

const TODAY: &str = "today";

/// Supplies the locale-dependent parts of a label
pub trait LabelFormatter: fmt::Debug {
    /// The word prefixed to today's label
    fn today(&self) -> &str;

    /// Long-form phrase naming the date
    fn date_phrase(&self, date: CalendarDate) -> String;
}

/// Built-in English phrasing, e.g. "Friday 15 March 2024"
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EnglishLabels;

impl LabelFormatter for EnglishLabels {
    fn today(&self) -> &str {
        TODAY
    }

    fn date_phrase(&self, date: CalendarDate) -> String {
        format!(
            "{} {} {} {}",
            date.weekday(),
            date.day(),
            date.as_date().month(),
            date.year()
        )
    }
}

/// Overrides the "today" word and/or the date phrase with a `time` format
/// description; whatever is not overridden falls back to English.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LocaleLabels {
    today: Option<String>,
    format: Option<OwnedFormatItem>,
}

impl LocaleLabels {
    pub fn new(today: Option<String>, format: Option<&str>) -> Result<LocaleLabels, LabelFormatError> {
        let format = format
            .map(|f| {
                format_description::parse_owned::<2>(f).map_err(|e| LabelFormatError {
                    format: f.to_owned(),
                    reason: e.to_string(),
                })
            })
            .transpose()?;
        Ok(LocaleLabels { today, format })
    }

    pub fn with_today(today: Option<String>) -> LocaleLabels {
        LocaleLabels {
            today,
            format: None,
        }
    }
}

impl LabelFormatter for LocaleLabels {
    fn today(&self) -> &str {
        self.today.as_deref().unwrap_or(TODAY)
    }

    fn date_phrase(&self, date: CalendarDate) -> String {
        let Some(format) = self.format.as_ref() else {
            return EnglishLabels.date_phrase(date);
        };
        match date.as_date().format(format) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(error = %e, "accessibility date format failed; using English");
                EnglishLabels.date_phrase(date)
            }
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid accessibility date format {format:?}: {reason}")]
pub struct LabelFormatError {
    pub format: String,
    pub reason: String,
}

/// Builds the label for one cell.  An explicit label on the marking wins
/// outright; otherwise the label is the "today" word (for today), the date
/// phrase, and one phrase per marking flag in a fixed order.  Flags are
/// combined across all entries of a multi-entry marking, each phrase
/// appearing at most once.
pub fn compose(
    state: CellState,
    date: CalendarDate,
    marking: Option<&Marking>,
    formatter: &dyn LabelFormatter,
) -> String {
    if let Some(label) = marking.and_then(Marking::accessibility_label) {
        return label.to_owned();
    }
    let mut parts = Vec::new();
    if state == CellState::Today {
        parts.push(formatter.today().to_owned());
    }
    parts.push(formatter.date_phrase(date));
    if let Some(m) = marking {
        let marked = m.any(|e| e.marked);
        if m.any(|e| e.selected) {
            parts.push(String::from("selected"));
            if !marked {
                parts.push(String::from("You have no entries for this day"));
            }
        }
        if marked {
            parts.push(String::from("You have entries for this day"));
        }
        if m.any(|e| e.starting_day) {
            parts.push(String::from("period start"));
        }
        if m.any(|e| e.ending_day) {
            parts.push(String::from("period end"));
        }
        if m.any(|e| e.disabled || e.disable_touch_event) {
            parts.push(String::from("disabled"));
        }
    }
    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::marking::MarkingEntry;
    use time::macros::date;

    fn march15() -> CalendarDate {
        CalendarDate::from(date!(2024 - 03 - 15))
    }

    #[test]
    fn test_plain_label() {
        assert_eq!(
            compose(CellState::Normal, march15(), None, &EnglishLabels),
            "Friday 15 March 2024"
        );
        assert_eq!(
            compose(CellState::Today, march15(), None, &EnglishLabels),
            "today Friday 15 March 2024"
        );
    }

    #[test]
    fn test_selected_without_entries() {
        let m = Marking::Single(MarkingEntry {
            selected: true,
            ..MarkingEntry::default()
        });
        assert_eq!(
            compose(CellState::Normal, march15(), Some(&m), &EnglishLabels),
            "Friday 15 March 2024 selected You have no entries for this day"
        );
    }

    #[test]
    fn test_fixed_phrase_order() {
        let m = Marking::Single(MarkingEntry {
            disable_touch_event: true,
            ending_day: true,
            starting_day: true,
            marked: true,
            selected: true,
            ..MarkingEntry::default()
        });
        assert_eq!(
            compose(CellState::Today, march15(), Some(&m), &EnglishLabels),
            "today Friday 15 March 2024 selected You have entries for this day \
             period start period end disabled"
        );
    }

    #[test]
    fn test_multiple_entries_merge() {
        let m = Marking::Multiple(vec![
            MarkingEntry {
                starting_day: true,
                ..MarkingEntry::default()
            },
            MarkingEntry {
                ending_day: true,
                ..MarkingEntry::default()
            },
            MarkingEntry {
                starting_day: true,
                ..MarkingEntry::default()
            },
        ]);
        assert_eq!(
            compose(CellState::Normal, march15(), Some(&m), &EnglishLabels),
            "Friday 15 March 2024 period start period end"
        );
    }

    #[test]
    fn test_explicit_label_wins() {
        let m = Marking::Single(MarkingEntry {
            selected: true,
            accessibility_label: Some(String::from("Team offsite")),
            ..MarkingEntry::default()
        });
        assert_eq!(
            compose(CellState::Today, march15(), Some(&m), &EnglishLabels),
            "Team offsite"
        );
    }

    #[test]
    fn test_empty_explicit_label_is_ignored() {
        let m = Marking::Multiple(vec![
            MarkingEntry {
                selected: true,
                accessibility_label: Some(String::new()),
                ..MarkingEntry::default()
            },
            MarkingEntry {
                accessibility_label: Some(String::from("Dentist")),
                ..MarkingEntry::default()
            },
        ]);
        assert_eq!(
            compose(CellState::Normal, march15(), Some(&m), &EnglishLabels),
            "Dentist"
        );
        let m = Marking::Single(MarkingEntry {
            selected: true,
            accessibility_label: Some(String::new()),
            ..MarkingEntry::default()
        });
        assert_eq!(
            compose(CellState::Normal, march15(), Some(&m), &EnglishLabels),
            "Friday 15 March 2024 selected You have no entries for this day"
        );
    }

    #[test]
    fn test_locale_override() {
        let labels = LocaleLabels::new(
            Some(String::from("aujourd'hui")),
            Some("[day padding:none]/[month padding:none]/[year]"),
        )
        .unwrap();
        assert_eq!(
            compose(CellState::Today, march15(), None, &labels),
            "aujourd'hui 15/3/2024"
        );
    }

    #[test]
    fn test_locale_partial_override() {
        let labels = LocaleLabels::new(None, None).unwrap();
        assert_eq!(
            compose(CellState::Today, march15(), None, &labels),
            "today Friday 15 March 2024"
        );
    }

    #[test]
    fn test_bad_format() {
        assert!(LocaleLabels::new(None, Some("[bogus]")).is_err());
    }
}
