/// Writing streak calculation
///
/// This module defines the Streak struct that holds streak information for the
/// journal and computes it from the entry collection. A streak counts
/// consecutive local calendar days with at least one entry, ending today or
/// yesterday.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use crate::domain::JournalEntry;

/// Calculated streak information for the journal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streak {
    /// Consecutive days written, ending today or yesterday
    pub current_streak: u32,
    /// Best run of consecutive days anywhere in the history
    pub longest_streak: u32,
    /// Most recent day with an entry (None if the journal is empty)
    pub last_entry_day: Option<NaiveDate>,
    /// Number of distinct days with at least one entry
    pub active_days: u32,
}

impl Streak {
    /// Create an empty streak record
    pub fn new() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            last_entry_day: None,
            active_days: 0,
        }
    }

    /// Calculate streak information from the journal entries
    ///
    /// `today` is the local calendar day the streak is evaluated on.
    pub fn calculate_from_entries(entries: &[JournalEntry], today: NaiveDate) -> Self {
        let days = Self::distinct_days(entries);
        if days.is_empty() {
            return Self::new();
        }

        let current_streak = Self::calculate_current_streak(&days, today);
        let longest_streak = Self::calculate_longest_streak(&days);

        Self {
            current_streak,
            longest_streak: longest_streak.max(current_streak),
            last_entry_day: days.iter().next_back().copied(),
            active_days: days.len() as u32,
        }
    }

    /// Whether writing today (or having written today) keeps the streak alive
    pub fn is_on_track(&self, today: NaiveDate) -> bool {
        match self.last_entry_day {
            None => false,
            Some(last_day) => (today - last_day).num_days() <= 1,
        }
    }

    /// Get an encouraging message based on the current streak
    pub fn motivational_message(&self) -> String {
        match self.current_streak {
            0 => "Todavía no hay racha. Una línea alcanza para empezar.".to_string(),
            1 => "Un día de racha. Volvé mañana a escribir.".to_string(),
            2..=6 => format!("{} días de racha. Se está armando un hábito.", self.current_streak),
            7..=29 => format!("{} días seguidos escribiendo. Ya es parte de tu rutina.", self.current_streak),
            _ => format!("{} días de racha. Tu diario te conoce bien.", self.current_streak),
        }
    }

    /// Distinct local calendar days with at least one entry
    fn distinct_days(entries: &[JournalEntry]) -> BTreeSet<NaiveDate> {
        entries.iter().map(JournalEntry::local_day).collect()
    }

    /// Count consecutive days walking back from today, or from yesterday when
    /// nothing was written today yet
    fn calculate_current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
        let yesterday = today - chrono::Duration::days(1);

        let mut checking_date = if days.contains(&today) {
            today
        } else if days.contains(&yesterday) {
            yesterday
        } else {
            return 0;
        };

        let mut current_streak = 0;
        while days.contains(&checking_date) {
            current_streak += 1;
            checking_date = match checking_date.pred_opt() {
                Some(previous) => previous,
                None => break,
            };
        }

        current_streak
    }

    /// Longest run of consecutive days in the whole history
    fn calculate_longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
        let mut longest_streak = 0;
        let mut current_streak = 0;
        let mut last_date: Option<NaiveDate> = None;

        // BTreeSet iterates oldest first
        for &day in days {
            match last_date {
                Some(last) if (day - last).num_days() == 1 => current_streak += 1,
                _ => {
                    longest_streak = longest_streak.max(current_streak);
                    current_streak = 1;
                }
            }
            last_date = Some(day);
        }

        longest_streak.max(current_streak)
    }
}

impl Default for Streak {
    fn default() -> Self {
        Self::new()
    }
}
