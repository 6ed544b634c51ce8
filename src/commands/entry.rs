/// Writing, listing and deleting journal entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::entries_on_day;
use crate::commands::{parse_day, parse_id};
use crate::domain::{DomainError, Emotion, EntryCategory, EntryId, JournalEntry, Streak};
use crate::storage::JournalStorage;
use crate::JournalError;

/// Parameters for writing a new entry
#[derive(Debug, Default, Deserialize)]
pub struct WriteEntryParams {
    pub text: String,
    pub emotion: Option<String>,
    /// Backdate to this `YYYY-MM-DD` day; defaults to now
    pub date: Option<String>,
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub favorite: bool,
}

/// Response from writing an entry
#[derive(Debug, Serialize)]
pub struct WriteEntryResponse {
    pub success: bool,
    pub entry_id: String,
    pub message: String,
    pub current_streak: u32,
    /// The write set a new highest streak
    pub new_record: bool,
}

fn parse_category(value: &str) -> Result<EntryCategory, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "personal" => Ok(EntryCategory::Personal),
        "trabajo" | "work" => Ok(EntryCategory::Trabajo),
        "reflexion" | "reflexión" | "reflection" => Ok(EntryCategory::Reflexion),
        "otro" | "other" => Ok(EntryCategory::Otro),
        _ => Err(DomainError::Validation {
            message: format!(
                "Categoría '{}' inválida. Opciones: personal, trabajo, reflexion, otro",
                value
            ),
        }),
    }
}

/// Write a new entry and record the streak it produces
///
/// `today` is the local calendar day the streak is evaluated on.
pub fn write_entry<S: JournalStorage>(
    storage: &S,
    params: WriteEntryParams,
    today: NaiveDate,
) -> Result<WriteEntryResponse, JournalError> {
    let emotion = params
        .emotion
        .as_deref()
        .map(str::parse::<Emotion>)
        .transpose()?;
    let category = params.category.as_deref().map(parse_category).transpose()?;

    let mut entry = match params.date.as_deref() {
        Some(day) => JournalEntry::written_on(params.text, parse_day(day)?, emotion)?,
        None => JournalEntry::written_now(params.text, emotion)?,
    }
    .with_category(category)
    .with_tags(params.tags);
    entry.is_favorite = params.favorite;

    // Read first so a store that cannot be read saves nothing
    let mut entries = storage.list_entries()?;
    let mut settings = storage.get_settings()?;

    storage.insert_entry(&entry)?;
    entries.insert(0, entry.clone());

    let streak = Streak::calculate_from_entries(&entries, today);
    let mut new_record = settings.record_streak(streak.current_streak);
    if new_record {
        match storage.save_settings(&settings) {
            Ok(()) => tracing::info!("New highest streak: {} days", streak.current_streak),
            Err(e) => {
                tracing::warn!("Entry {} saved but the highest streak was not: {}", entry.id, e);
                new_record = false;
            }
        }
    }

    Ok(WriteEntryResponse {
        success: true,
        entry_id: entry.id.to_string(),
        message: format!(
            "Entrada guardada para el {}. {}",
            entry.local_day().format("%d/%m/%Y"),
            streak.motivational_message()
        ),
        current_streak: streak.current_streak,
        new_record,
    })
}

/// Parameters for listing entries
#[derive(Debug, Default, Deserialize)]
pub struct ListEntriesParams {
    /// Only entries of this `YYYY-MM-DD` day
    pub day: Option<String>,
}

/// Compact view of one entry
#[derive(Debug, Serialize)]
pub struct EntrySummary {
    pub id: String,
    pub day: NaiveDate,
    pub time: String,
    pub emotion: Option<String>,
    pub text: String,
    pub media_count: usize,
    pub is_favorite: bool,
}

impl From<&JournalEntry> for EntrySummary {
    fn from(entry: &JournalEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            day: entry.local_day(),
            time: entry.created_at.format("%H:%M").to_string(),
            emotion: entry.emotion.map(|e| e.label().to_string()),
            text: entry.text.clone(),
            media_count: entry.media.len(),
            is_favorite: entry.is_favorite,
        }
    }
}

/// Response from listing entries
#[derive(Debug, Serialize)]
pub struct ListEntriesResponse {
    pub entries: Vec<EntrySummary>,
    pub total_count: usize,
    pub message: String,
}

/// List entries newest first, optionally for a single day
pub fn list_entries<S: JournalStorage>(
    storage: &S,
    params: ListEntriesParams,
) -> Result<ListEntriesResponse, JournalError> {
    let entries = storage.list_entries()?;

    let summaries: Vec<EntrySummary> = match params.day.as_deref() {
        Some(day) => entries_on_day(&entries, parse_day(day)?)
            .into_iter()
            .map(EntrySummary::from)
            .collect(),
        None => entries.iter().map(EntrySummary::from).collect(),
    };

    let message = if summaries.is_empty() {
        "Todavía no escribiste nada. Empezá hoy con unas líneas.".to_string()
    } else {
        format!("{} entradas", summaries.len())
    };

    Ok(ListEntriesResponse {
        total_count: summaries.len(),
        entries: summaries,
        message,
    })
}

/// Parameters for deleting an entry
#[derive(Debug, Deserialize)]
pub struct DeleteEntryParams {
    pub entry_id: String,
}

/// Outcome of a command that only changes state
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Delete an entry; unknown ids are ignored
pub fn delete_entry<S: JournalStorage>(
    storage: &S,
    params: DeleteEntryParams,
) -> Result<StatusResponse, JournalError> {
    let entry_id = parse_id(&params.entry_id, "entrada", EntryId::from_string)?;
    storage.delete_entry(&entry_id)?;

    Ok(StatusResponse {
        success: true,
        message: format!("Entrada {} borrada", entry_id),
    })
}
