/// Derived views over the journal
///
/// This module computes everything the app shows besides raw records:
/// the writing streak, the calendar grid, the mood map, the overview
/// metrics and the entry selection for a reflection. All functions are pure
/// and recomputed on every read.

pub mod calendar;
pub mod metrics;
pub mod mood_map;
pub mod range;

pub use calendar::{bucket_month, entries_on_day, CalendarDay, CalendarMonth};
pub use metrics::{daily_prompt, greeting, JournalMetrics, DAILY_PROMPTS};
pub use mood_map::{dominant_emotion, mood_map, MoodDay, MOOD_MAP_DAYS};
pub use range::{entries_in_range, select_for_reflection, EmptyRangeSelection};

use chrono::NaiveDate;

use crate::domain::{DateRange, DomainError, Goal, JournalEntry, Streak};

/// Analytics engine for the journal views
///
/// Holds no state; every call works on the collections it is given and the
/// `today` it is told, so results are deterministic.
#[derive(Debug, Default, Clone)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    /// Create a new analytics engine
    pub fn new() -> Self {
        Self {}
    }

    /// Current and longest writing streak
    pub fn streak(&self, entries: &[JournalEntry], today: NaiveDate) -> Streak {
        Streak::calculate_from_entries(entries, today)
    }

    /// Month grid with entries bucketed by day
    pub fn calendar<'a>(
        &self,
        entries: &'a [JournalEntry],
        year: i32,
        month: u32,
    ) -> Result<CalendarMonth<'a>, DomainError> {
        bucket_month(entries, year, month)
    }

    /// Entries of a single day
    pub fn day<'a>(&self, entries: &'a [JournalEntry], date: NaiveDate) -> Vec<&'a JournalEntry> {
        entries_on_day(entries, date)
    }

    /// Dominant emotion per day over the trailing window
    pub fn mood_map(&self, entries: &[JournalEntry], today: NaiveDate) -> Vec<MoodDay> {
        mood_map(entries, today)
    }

    /// Overview numbers
    pub fn metrics(&self, entries: &[JournalEntry], goals: &[Goal], today: NaiveDate) -> JournalMetrics {
        JournalMetrics::compute(entries, goals, today)
    }

    /// Entries to send to a reflection over `range`
    pub fn entries_for_reflection(
        &self,
        entries: &[JournalEntry],
        range: &DateRange,
    ) -> Result<Vec<JournalEntry>, EmptyRangeSelection> {
        select_for_reflection(entries, range)
    }
}
