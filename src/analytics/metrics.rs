/// Journal overview numbers and the daily writing prompt

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::{Goal, JournalEntry, Streak};

/// Prompts offered on the editor, one per day in rotation
pub const DAILY_PROMPTS: [&str; 7] = [
    "¿Qué palabra hoy no pudiste decir?",
    "Escribí sobre ese sueño que todavía recordás.",
    "¿Qué parte de vos hoy se sintió ajena?",
    "Hoy, simplemente describí un objeto sin usar adjetivos.",
    "¿A quién le hablarías si el silencio no fuera una barrera?",
    "Identificá un deseo que hoy te dio miedo reconocer.",
    "¿Qué ruidos de tu rutina hoy te molestaron más?",
];

/// Headline numbers for the "process" view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalMetrics {
    pub total_entries: usize,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub active_days: u32,
    pub completed_goals: usize,
    pub total_goals: usize,
}

impl JournalMetrics {
    pub fn compute(entries: &[JournalEntry], goals: &[Goal], today: NaiveDate) -> Self {
        let streak = Streak::calculate_from_entries(entries, today);

        Self {
            total_entries: entries.len(),
            current_streak: streak.current_streak,
            longest_streak: streak.longest_streak,
            active_days: streak.active_days,
            completed_goals: goals.iter().filter(|g| g.completed).count(),
            total_goals: goals.len(),
        }
    }
}

/// Prompt of the day, rotating by day of the year
pub fn daily_prompt(today: NaiveDate) -> &'static str {
    DAILY_PROMPTS[today.ordinal() as usize % DAILY_PROMPTS.len()]
}

/// Greeting for the hour of day (0-23)
pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Buen día. ¿Qué despertó hoy?",
        12..=19 => "Buenas tardes. Hagamos una pausa.",
        _ => "Buenas noches. Calma antes de descansar.",
    }
}
