/// Storage layer for persisting journal data
///
/// This module handles durable storage of the four journal collections
/// (entries, goals, reports, settings). Each collection is kept as one
/// serialized document under its own key; every write rewrites the whole
/// document.

pub mod sqlite;
pub mod migrations;

// Re-export the main storage types
pub use sqlite::*;

use thiserror::Error;
use crate::domain::{
    AnalysisReport, EntryId, Goal, GoalId, JournalEntry, ReportId, UserSettings,
};

/// Errors that can occur during storage operations
///
/// Every variant means the local store could not be read or written; callers
/// surface it to the user and do not retry.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database connection error: {0}")]
    Connection(String),

    #[error("Database query error: {0}")]
    Query(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate id {id} in collection {collection}")]
    DuplicateId { collection: &'static str, id: String },

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Collection {collection} has schema version {found}, newer than supported {supported}")]
    UnsupportedVersion {
        collection: &'static str,
        found: u32,
        supported: u32,
    },
}

/// Trait defining the storage interface for the journal
///
/// Collections are independent: deleting a goal never touches entries or
/// reports. Deleting an id that is not present is a no-op.
pub trait JournalStorage {
    /// All entries, newest insertion first
    fn list_entries(&self) -> Result<Vec<JournalEntry>, StorageError>;

    /// Prepend a new entry
    fn insert_entry(&self, entry: &JournalEntry) -> Result<(), StorageError>;

    /// Remove an entry by id
    fn delete_entry(&self, entry_id: &EntryId) -> Result<(), StorageError>;

    /// All goals, newest insertion first
    fn list_goals(&self) -> Result<Vec<Goal>, StorageError>;

    /// Prepend a new goal
    fn insert_goal(&self, goal: &Goal) -> Result<(), StorageError>;

    /// Set the completion flag of a goal
    fn update_goal_completion(&self, goal_id: &GoalId, completed: bool) -> Result<(), StorageError>;

    /// Remove a goal by id
    fn delete_goal(&self, goal_id: &GoalId) -> Result<(), StorageError>;

    /// All archived reports, newest insertion first
    fn list_reports(&self) -> Result<Vec<AnalysisReport>, StorageError>;

    /// Prepend a newly archived report
    fn insert_report(&self, report: &AnalysisReport) -> Result<(), StorageError>;

    /// Remove a report by id
    fn delete_report(&self, report_id: &ReportId) -> Result<(), StorageError>;

    /// Current settings, or empty defaults if none were saved yet
    fn get_settings(&self) -> Result<UserSettings, StorageError>;

    /// Replace the settings record
    fn save_settings(&self, settings: &UserSettings) -> Result<(), StorageError>;

    /// Clear every collection
    fn reset(&self) -> Result<(), StorageError>;
}
