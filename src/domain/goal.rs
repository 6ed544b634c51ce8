/// Goal entity
///
/// A goal is a short intention the user declares ("dormir mejor", "llamar a
/// mamá"). Its only mutable state is the completion flag.

use serde::{Deserialize, Serialize};
use chrono::{DateTime, FixedOffset, Local};
use crate::domain::{DomainError, GoalId};

/// A user-declared intention with a completion flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    /// Unique identifier for this goal
    pub id: GoalId,
    /// What the user wants to achieve
    pub text: String,
    /// Whether the goal has been marked as achieved
    pub completed: bool,
    /// When this goal was created
    pub created_at: DateTime<FixedOffset>,
}

impl Goal {
    /// Create a new, not yet completed goal
    pub fn new(text: String) -> Result<Self, DomainError> {
        Self::validate_text(&text)?;

        Ok(Self {
            id: GoalId::new(),
            text: text.trim().to_string(),
            completed: false,
            created_at: Local::now().fixed_offset(),
        })
    }

    /// Label used when summarising the goal for a reflection
    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Logrado"
        } else {
            "Pendiente"
        }
    }

    fn validate_text(text: &str) -> Result<(), DomainError> {
        let trimmed = text.trim();

        if trimmed.is_empty() {
            return Err(DomainError::InvalidText(
                "Goal text cannot be empty".to_string()
            ));
        }

        if trimmed.chars().count() > 200 {
            return Err(DomainError::InvalidText(
                "Goal text cannot be longer than 200 characters".to_string()
            ));
        }

        Ok(())
    }
}
