/// Calendar month bucketing
///
/// Lays a month out as a Monday-first grid: a run of empty slots so the 1st
/// lands under its weekday column, then one slot per day carrying that day's
/// entries.

use chrono::{Datelike, NaiveDate};

use crate::domain::{DomainError, JournalEntry};

/// One populated day cell of the calendar grid
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay<'a> {
    /// Day of the month, starting at 1
    pub day: u32,
    pub date: NaiveDate,
    /// Entries written on this local day, in collection order
    pub entries: Vec<&'a JournalEntry>,
}

/// A month laid out for display
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth<'a> {
    pub year: i32,
    pub month: u32,
    /// Leading `None` placeholders followed by one slot per day
    pub slots: Vec<Option<CalendarDay<'a>>>,
}

impl<'a> CalendarMonth<'a> {
    /// Number of empty cells before the 1st
    pub fn leading_blanks(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_none()).count()
    }

    /// Populated day cells only
    pub fn days(&self) -> impl Iterator<Item = &CalendarDay<'a>> {
        self.slots.iter().flatten()
    }
}

/// Bucket `entries` into the grid for `year`/`month` (1-12)
pub fn bucket_month(
    entries: &[JournalEntry],
    year: i32,
    month: u32,
) -> Result<CalendarMonth<'_>, DomainError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| DomainError::InvalidDate(format!("No such month: {}-{}", year, month)))?;
    let days_in_month = days_in_month(first)?;

    let leading = first.weekday().num_days_from_monday() as usize;
    let mut slots: Vec<Option<CalendarDay<'_>>> = Vec::with_capacity(leading + days_in_month as usize);
    slots.extend(std::iter::repeat_with(|| None).take(leading));

    for day in 1..=days_in_month {
        let date = first
            .with_day(day)
            .ok_or_else(|| DomainError::InvalidDate(format!("No such day: {}-{}-{}", year, month, day)))?;

        slots.push(Some(CalendarDay {
            day,
            date,
            entries: entries_on_day(entries, date),
        }));
    }

    Ok(CalendarMonth { year, month, slots })
}

/// Entries whose local calendar day is `date`, in collection order
pub fn entries_on_day(entries: &[JournalEntry], date: NaiveDate) -> Vec<&JournalEntry> {
    entries.iter().filter(|e| e.local_day() == date).collect()
}

fn days_in_month(first: NaiveDate) -> Result<u32, DomainError> {
    let next_month = if first.month() == 12 {
        NaiveDate::from_ymd_opt(first.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(first.year(), first.month() + 1, 1)
    }
    .ok_or_else(|| DomainError::InvalidDate(format!("Month after {} is out of range", first)))?;

    Ok((next_month - first).num_days() as u32)
}
