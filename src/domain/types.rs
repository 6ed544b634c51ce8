/// Core types and enums used throughout the domain layer
///
/// This module defines the identifier newtypes and the fixed enumerations
/// (emotions, entry categories, media kinds, suggestion categories) shared by
/// entries, goals and reports.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::DomainError;

/// Unique identifier for a journal entry
///
/// This is a wrapper around UUID to provide type safety - you can't accidentally
/// pass a goal ID where an entry ID is expected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an entry ID from a string (useful for command input)
    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for a goal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GoalId(pub Uuid);

impl GoalId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Unique identifier for an archived analysis report
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReportId(pub Uuid);

impl ReportId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_string(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

impl fmt::Display for ReportId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// The emotion a user can tag an entry with
///
/// Stored with the app's original Spanish identifiers so existing journals
/// keep loading; the English names are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Emotion {
    #[serde(rename = "calma", alias = "calm")]
    Calm,
    #[serde(rename = "alegria", alias = "joy")]
    Joy,
    #[serde(rename = "ansiedad", alias = "anxiety")]
    Anxiety,
    #[serde(rename = "tristeza", alias = "sadness")]
    Sadness,
    #[serde(rename = "ira", alias = "anger")]
    Anger,
    #[serde(rename = "misterio", alias = "mystery")]
    Mystery,
}

impl Emotion {
    /// All emotions in the order the picker shows them
    pub const ALL: [Emotion; 6] = [
        Emotion::Calm,
        Emotion::Joy,
        Emotion::Anxiety,
        Emotion::Sadness,
        Emotion::Anger,
        Emotion::Mystery,
    ];

    /// Identifier used in the persisted store
    pub fn id(&self) -> &'static str {
        match self {
            Emotion::Calm => "calma",
            Emotion::Joy => "alegria",
            Emotion::Anxiety => "ansiedad",
            Emotion::Sadness => "tristeza",
            Emotion::Anger => "ira",
            Emotion::Mystery => "misterio",
        }
    }

    /// Get the display label for this emotion
    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Calm => "Calma",
            Emotion::Joy => "Alegría",
            Emotion::Anxiety => "Ansiedad",
            Emotion::Sadness => "Tristeza",
            Emotion::Anger => "Ira",
            Emotion::Mystery => "Misterio",
        }
    }
}

impl FromStr for Emotion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calma" | "calm" => Ok(Emotion::Calm),
            "alegria" | "alegría" | "joy" => Ok(Emotion::Joy),
            "ansiedad" | "anxiety" => Ok(Emotion::Anxiety),
            "tristeza" | "sadness" => Ok(Emotion::Sadness),
            "ira" | "anger" => Ok(Emotion::Anger),
            "misterio" | "mystery" => Ok(Emotion::Mystery),
            other => Err(DomainError::InvalidEmotion(other.to_string())),
        }
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Optional topical category of an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryCategory {
    Personal,
    Trabajo,
    Reflexion,
    Otro,
}

/// Kind of media attached to an entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Drawing,
}

impl MediaKind {
    /// Whether this media kind is forwarded to the reflection service
    pub fn is_visual(&self) -> bool {
        matches!(self, MediaKind::Image | MediaKind::Drawing)
    }
}

/// Category of a resource suggested by a reflection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum SuggestionCategory {
    #[serde(rename = "libro")]
    Book,
    #[serde(rename = "articulo")]
    Article,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "mindfulness")]
    Mindfulness,
    #[serde(rename = "gratitud")]
    Gratitude,
    #[serde(rename = "inspiracion")]
    Inspiration,
}
