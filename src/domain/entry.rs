/// JournalEntry entity for free-text mood notes
///
/// This module defines the JournalEntry struct that represents one journaled
/// note, with its timestamp, optional emotion tag and attached media.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset, Local, NaiveDate, TimeZone};
use crate::domain::{DomainError, Emotion, EntryCategory, EntryId, MediaKind};

/// A piece of media attached to an entry (photo, voice note, drawing)
///
/// `data` holds a base64 data URL such as `data:image/png;base64,iVBOR...`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub data: String,
    pub mime_type: String,
}

impl MediaItem {
    /// Create a new media item with validation
    pub fn new(kind: MediaKind, mime_type: String, data: String) -> Result<Self, DomainError> {
        if mime_type.trim().is_empty() {
            return Err(DomainError::InvalidMedia("MIME type cannot be empty".to_string()));
        }
        if data.trim().is_empty() {
            return Err(DomainError::InvalidMedia("Media payload cannot be empty".to_string()));
        }
        if kind.is_visual() && !mime_type.starts_with("image/") {
            return Err(DomainError::InvalidMedia(format!(
                "Images and drawings need an image/* MIME type, got {}",
                mime_type
            )));
        }

        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind,
            data,
            mime_type,
        })
    }

    /// The raw base64 payload without the `data:...;base64,` prefix
    pub fn base64_payload(&self) -> &str {
        match self.data.split_once(',') {
            Some((_, payload)) => payload,
            None => &self.data,
        }
    }
}

/// A single journaled note
///
/// Entries are immutable once created. `created_at` keeps the UTC offset the
/// note was written with, so its date portion is the writer's local calendar
/// day; every derived view buckets entries by that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Unique identifier for this entry
    pub id: EntryId,
    /// Free-text body
    pub text: String,
    /// When the entry was written (or backdated to)
    pub created_at: DateTime<FixedOffset>,
    /// Attached photos, voice notes and drawings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaItem>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_favorite: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<EntryCategory>,
    /// Optional emotion tag picked by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
}

impl JournalEntry {
    /// Create a new entry with validation
    ///
    /// The timestamp is taken as given; use [`JournalEntry::written_now`] or
    /// [`JournalEntry::written_on`] for the usual cases.
    pub fn new(
        text: String,
        created_at: DateTime<FixedOffset>,
        emotion: Option<Emotion>,
    ) -> Result<Self, DomainError> {
        Self::validate_text(&text)?;

        Ok(Self {
            id: EntryId::new(),
            text,
            created_at,
            media: Vec::new(),
            is_favorite: false,
            tags: Vec::new(),
            category: None,
            emotion,
        })
    }

    /// Create an entry stamped with the current local time
    pub fn written_now(text: String, emotion: Option<Emotion>) -> Result<Self, DomainError> {
        Self::new(text, Local::now().fixed_offset(), emotion)
    }

    /// Create an entry backdated to `day`, keeping the current time of day
    pub fn written_on(
        text: String,
        day: NaiveDate,
        emotion: Option<Emotion>,
    ) -> Result<Self, DomainError> {
        let now = Local::now().fixed_offset();
        if day > now.date_naive() {
            return Err(DomainError::InvalidDate(
                "Cannot write entries for future dates".to_string(),
            ));
        }

        let created_at = now
            .offset()
            .from_local_datetime(&day.and_time(now.time()))
            .single()
            .ok_or_else(|| DomainError::InvalidDate(format!("Cannot place entry on {}", day)))?;

        Self::new(text, created_at, emotion)
    }

    /// Attach media items
    pub fn with_media(mut self, media: Vec<MediaItem>) -> Self {
        self.media = media;
        self
    }

    pub fn with_category(mut self, category: Option<EntryCategory>) -> Self {
        self.category = category;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();
        self
    }

    /// The local calendar day this entry belongs to
    pub fn local_day(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Visual media forwarded to the reflection service
    pub fn visual_media(&self) -> impl Iterator<Item = &MediaItem> {
        self.media.iter().filter(|m| m.kind.is_visual())
    }

    /// Validate entry text
    fn validate_text(text: &str) -> Result<(), DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::InvalidText(
                "Entry text cannot be empty".to_string()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_create_valid_entry() {
        let entry = JournalEntry::new(
            "Hoy caminé por el parque".to_string(),
            at("2024-05-01T09:30:00-03:00"),
            Some(Emotion::Calm),
        )
        .unwrap();

        assert_eq!(entry.emotion, Some(Emotion::Calm));
        assert!(entry.media.is_empty());
        assert!(!entry.is_favorite);
    }

    #[test]
    fn test_empty_text_is_rejected() {
        let result = JournalEntry::new("   ".to_string(), at("2024-05-01T09:30:00Z"), None);
        assert!(matches!(result, Err(DomainError::InvalidText(_))));
    }

    #[test]
    fn test_local_day_uses_written_offset() {
        // 23:30 in Buenos Aires is already the next day in UTC
        let entry = JournalEntry::new(
            "Noche larga".to_string(),
            at("2024-05-01T23:30:00-03:00"),
            None,
        )
        .unwrap();

        assert_eq!(entry.local_day(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_backdated_entry_lands_on_day() {
        let day = Local::now().date_naive() - chrono::Duration::days(3);
        let entry = JournalEntry::written_on("Recuerdo".to_string(), day, None).unwrap();
        assert_eq!(entry.local_day(), day);

        let tomorrow = Local::now().date_naive() + chrono::Duration::days(1);
        assert!(JournalEntry::written_on("Futuro".to_string(), tomorrow, None).is_err());
    }

    #[test]
    fn test_media_payload_and_validation() {
        let item = MediaItem::new(
            MediaKind::Drawing,
            "image/png".to_string(),
            "data:image/png;base64,AAAA".to_string(),
        )
        .unwrap();
        assert_eq!(item.base64_payload(), "AAAA");

        let bad = MediaItem::new(MediaKind::Image, "audio/webm".to_string(), "AAAA".to_string());
        assert!(matches!(bad, Err(DomainError::InvalidMedia(_))));
    }

    #[test]
    fn test_serialized_shape() {
        let entry = JournalEntry::new(
            "Texto".to_string(),
            at("2024-05-01T09:30:00-03:00"),
            Some(Emotion::Anxiety),
        )
        .unwrap();
        let value = serde_json::to_value(&entry).unwrap();

        assert_eq!(value["createdAt"], "2024-05-01T09:30:00-03:00");
        assert_eq!(value["emotion"], "ansiedad");
        assert!(value.get("media").is_none());
    }
}
