/// Read-only views: streak, calendar, mood map, metrics and the daily prompt

use chrono::NaiveDate;
use serde::Serialize;

use crate::analytics::{daily_prompt, greeting, mood_map, AnalyticsEngine, JournalMetrics, MOOD_MAP_DAYS};
use crate::storage::JournalStorage;
use crate::JournalError;

/// Response for the streak view
#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Best streak recorded at write time
    pub highest_recorded: u32,
    pub last_entry_day: Option<NaiveDate>,
    pub on_track: bool,
    pub message: String,
}

pub fn streak_status<S: JournalStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    today: NaiveDate,
) -> Result<StreakResponse, JournalError> {
    let entries = storage.list_entries()?;
    let streak = analytics.streak(&entries, today);
    let settings = storage.get_settings()?;

    Ok(StreakResponse {
        current_streak: streak.current_streak,
        longest_streak: streak.longest_streak,
        highest_recorded: settings.highest_streak.unwrap_or(0).max(streak.current_streak),
        last_entry_day: streak.last_entry_day,
        on_track: streak.is_on_track(today),
        message: streak.motivational_message(),
    })
}

/// One populated cell of the calendar
#[derive(Debug, Serialize)]
pub struct CalendarCell {
    pub day: u32,
    pub entry_count: usize,
    /// Emotion labels of the day's entries, in collection order
    pub emotions: Vec<&'static str>,
}

/// Response for the calendar view
#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    /// Empty cells before the 1st in a Monday-first grid
    pub leading_blanks: usize,
    pub days: Vec<CalendarCell>,
}

impl CalendarResponse {
    /// Render the month as a text grid, marking days with entries
    pub fn render(&self) -> String {
        let mut out = String::from(" Lu  Ma  Mi  Ju  Vi  Sá  Do\n");
        let mut column = 0;

        for _ in 0..self.leading_blanks {
            out.push_str("    ");
            column += 1;
        }
        for cell in &self.days {
            let mark = if cell.entry_count > 0 { '*' } else { ' ' };
            out.push_str(&format!("{:>3}{}", cell.day, mark));
            column += 1;
            if column % 7 == 0 {
                out.push('\n');
            }
        }
        if column % 7 != 0 {
            out.push('\n');
        }

        out
    }
}

pub fn calendar_view<S: JournalStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    year: i32,
    month: u32,
) -> Result<CalendarResponse, JournalError> {
    let entries = storage.list_entries()?;
    let grid = analytics.calendar(&entries, year, month)?;

    Ok(CalendarResponse {
        year,
        month,
        leading_blanks: grid.leading_blanks(),
        days: grid
            .days()
            .map(|d| CalendarCell {
                day: d.day,
                entry_count: d.entries.len(),
                emotions: d.entries.iter().filter_map(|e| e.emotion).map(|e| e.label()).collect(),
            })
            .collect(),
    })
}

/// One day of the mood map
#[derive(Debug, Serialize)]
pub struct MoodCell {
    pub date: NaiveDate,
    /// Persisted id of the dominant emotion
    pub dominant: Option<&'static str>,
    pub entry_count: usize,
}

#[derive(Debug, Serialize)]
pub struct MoodMapResponse {
    pub days: Vec<MoodCell>,
    pub tagged_days: usize,
}

/// Dominant emotion per day for the trailing window, oldest first
pub fn mood_map_view<S: JournalStorage>(
    storage: &S,
    today: NaiveDate,
) -> Result<MoodMapResponse, JournalError> {
    let entries = storage.list_entries()?;
    let days: Vec<MoodCell> = mood_map(&entries, today)
        .into_iter()
        .map(|d| MoodCell {
            date: d.date,
            dominant: d.dominant.map(|e| e.id()),
            entry_count: d.entry_count,
        })
        .collect();

    tracing::debug!("Mood map over {} days ending {}", MOOD_MAP_DAYS, today);

    Ok(MoodMapResponse {
        tagged_days: days.iter().filter(|d| d.dominant.is_some()).count(),
        days,
    })
}

pub fn metrics_view<S: JournalStorage>(
    storage: &S,
    analytics: &AnalyticsEngine,
    today: NaiveDate,
) -> Result<JournalMetrics, JournalError> {
    let entries = storage.list_entries()?;
    let goals = storage.list_goals()?;

    Ok(analytics.metrics(&entries, &goals, today))
}

/// Greeting and writing prompt for the editor
#[derive(Debug, Serialize)]
pub struct PromptResponse {
    pub greeting: &'static str,
    pub prompt: &'static str,
}

pub fn prompt_view(today: NaiveDate, hour: u32) -> PromptResponse {
    PromptResponse {
        greeting: greeting(hour),
        prompt: daily_prompt(today),
    }
}
