/// Date-range selection of entries for a reflection
///
/// A range covers whole local calendar days: from the start day at 00:00:00
/// through the end day at 23:59:59, both included.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::{DateRange, JournalEntry};

/// The chosen range contains no entries
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("No entries between {start} and {end}")]
pub struct EmptyRangeSelection {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Entries whose local calendar day falls inside `range`, in collection order
pub fn entries_in_range<'a>(entries: &'a [JournalEntry], range: &DateRange) -> Vec<&'a JournalEntry> {
    entries
        .iter()
        .filter(|e| range.contains(e.local_day()))
        .collect()
}

/// Entries eligible for a reflection over `range`
///
/// An empty selection is an error the user fixes by widening the range.
pub fn select_for_reflection(
    entries: &[JournalEntry],
    range: &DateRange,
) -> Result<Vec<JournalEntry>, EmptyRangeSelection> {
    let selected: Vec<JournalEntry> = entries_in_range(entries, range)
        .into_iter()
        .cloned()
        .collect();

    if selected.is_empty() {
        return Err(EmptyRangeSelection {
            start: range.start,
            end: range.end,
        });
    }

    tracing::debug!(
        "Selected {} of {} entries for {}..={}",
        selected.len(),
        entries.len(),
        range.start,
        range.end
    );
    Ok(selected)
}
