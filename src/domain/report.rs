/// Reflections and archived analysis reports
///
/// A [`Reflection`] is what the reflection service hands back for a date
/// range. It only becomes an [`AnalysisReport`] when the user archives it,
/// at which point it gets an id and a save timestamp and never changes again.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DomainError, ReportId, SuggestionCategory};

/// Lowest emotional score a reflection can assign to a day
pub const MIN_EMOTIONAL_SCORE: f64 = -5.0;
/// Highest emotional score a reflection can assign to a day
pub const MAX_EMOTIONAL_SCORE: f64 = 5.0;

/// Inclusive range of local calendar days
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDate(format!(
                "Range start {} is after its end {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Whether `day` lies within the range, both ends included
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }

    /// Number of calendar days covered
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// Emotional score the reflection assigns to one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EmotionalPoint {
    /// The date as written by the service
    pub date: String,
    /// Signed score, nominally between -5 and 5
    pub score: f64,
}

/// A cultural resource recommended by a reflection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Suggestion {
    pub title: String,
    pub category: SuggestionCategory,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// A validated, not yet archived reflection over a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflection {
    pub range: DateRange,
    pub summary: String,
    pub evolution: String,
    pub emotional_points: Vec<EmotionalPoint>,
    pub guidance: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    /// Source citations attached by the service, passed through untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<Value>>,
}

impl Reflection {
    /// Turn this reflection into an archived report saved now
    pub fn archive(self) -> AnalysisReport {
        AnalysisReport {
            id: ReportId::new(),
            range: self.range,
            summary: self.summary,
            evolution: self.evolution,
            emotional_points: self.emotional_points,
            guidance: self.guidance,
            suggestions: self.suggestions,
            saved_at: Local::now().fixed_offset(),
            grounding_chunks: self.grounding_chunks,
        }
    }
}

/// An archived narrative reflection covering a date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Unique identifier for this report
    pub id: ReportId,
    /// Days the reflection covered
    pub range: DateRange,
    /// Narrative summary of the period
    pub summary: String,
    /// Narrative analysis of recurring themes
    pub evolution: String,
    /// One score per covered date, in the service's order
    pub emotional_points: Vec<EmotionalPoint>,
    /// Actionable next steps
    #[serde(default)]
    pub guidance: Vec<String>,
    pub suggestions: Vec<Suggestion>,
    /// When the user archived the reflection
    pub saved_at: DateTime<FixedOffset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<Value>>,
}
