//! Sparse per-date annotations and their lookup
use crate::date::CalendarDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::slice;

/// One renderer-defined annotation.  The engine only looks at the named
/// flags when composing accessibility labels; everything else is passed
/// through to the day renderer untouched.
#[derive(Clone, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MarkingEntry {
    pub selected: bool,
    pub marked: bool,
    pub starting_day: bool,
    pub ending_day: bool,
    pub disabled: bool,
    pub disable_touch_event: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessibility_label: Option<String>,
    /// Identifies a dot or period among several on the same date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dot_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

/// Everything recorded for a single date: either one entry or an ordered
/// list of them (multi-dot and multi-period renderers)
#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Marking {
    Multiple(Vec<MarkingEntry>),
    Single(MarkingEntry),
}

impl Marking {
    pub fn entries(&self) -> &[MarkingEntry] {
        match self {
            Marking::Multiple(entries) => entries,
            Marking::Single(entry) => slice::from_ref(entry),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// The first non-empty explicit accessibility label among the entries
    pub fn accessibility_label(&self) -> Option<&str> {
        self.entries()
            .iter()
            .find_map(|e| e.accessibility_label.as_deref().filter(|s| !s.is_empty()))
    }

    pub fn any(&self, pred: fn(&MarkingEntry) -> bool) -> bool {
        self.entries().iter().any(pred)
    }
}

impl From<MarkingEntry> for Marking {
    fn from(entry: MarkingEntry) -> Marking {
        Marking::Single(entry)
    }
}

impl From<Vec<MarkingEntry>> for Marking {
    fn from(entries: Vec<MarkingEntry>) -> Marking {
        Marking::Multiple(entries)
    }
}

/// Mapping from ISO `yyyy-MM-dd` keys to markings.  Supplied by the host and
/// never modified by the engine.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MarkingMap(HashMap<String, Marking>);

impl MarkingMap {
    pub fn new() -> MarkingMap {
        MarkingMap::default()
    }

    pub fn from_json(s: &str) -> Result<MarkingMap, serde_json::Error> {
        serde_json::from_str(s)
    }

    pub fn insert<M: Into<Marking>>(&mut self, date: CalendarDate, marking: M) {
        self.0.insert(date.to_string(), marking.into());
    }

    pub fn get(&self, key: &str) -> Option<&Marking> {
        self.0.get(key)
    }

    pub fn contains_date(&self, date: CalendarDate) -> bool {
        self.0.contains_key(&date.to_string())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CalendarDate, Marking)> for MarkingMap {
    fn from_iter<I: IntoIterator<Item = (CalendarDate, Marking)>>(iter: I) -> MarkingMap {
        MarkingMap(
            iter.into_iter()
                .map(|(date, marking)| (date.to_string(), marking))
                .collect(),
        )
    }
}

/// Looks up the marking for `date`.  A missing map, a missing key and an
/// empty list of entries all mean "no marking".
pub fn resolve(date: CalendarDate, marks: Option<&MarkingMap>) -> Option<&Marking> {
    let marks = marks?;
    marks.get(&date.to_string()).filter(|m| !m.is_empty())
}
