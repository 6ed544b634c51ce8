/// SQLite implementation of the journal storage interface
///
/// Each collection is stored as a single JSON document in the `collections`
/// table, wrapped in a small envelope carrying its schema version:
/// `{"schemaVersion": 1, "data": [...]}`. Documents written before the
/// envelope existed (a bare array or object) are read as version 1.

use std::path::PathBuf;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::domain::{
    AnalysisReport, EntryId, Goal, GoalId, JournalEntry, ReportId, UserSettings,
};
use crate::storage::{migrations, JournalStorage, StorageError};

/// Schema version written into every collection envelope
pub const COLLECTION_SCHEMA_VERSION: u32 = 1;

const ENTRIES_KEY: &str = "entries";
const GOALS_KEY: &str = "goals";
const REPORTS_KEY: &str = "reports";
const SETTINGS_KEY: &str = "settings";

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";
const DATA_FIELD: &str = "data";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a, T> {
    schema_version: u32,
    data: &'a T,
}

/// SQLite-based storage implementation
///
/// This struct holds a connection to the SQLite database and implements
/// all the storage operations defined in the JournalStorage trait.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Create a new SQLite storage instance
    ///
    /// This opens the database file and runs any necessary migrations
    /// to ensure the schema is up to date.
    pub fn new(db_path: PathBuf) -> Result<Self, StorageError> {
        let conn = Connection::open(&db_path)
            .map_err(|e| StorageError::Connection(format!("Failed to open database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        tracing::info!("SQLite storage initialized at: {:?}", db_path);

        Ok(Self { conn })
    }

    /// Open a throwaway in-memory store
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StorageError::Connection(format!("Failed to open in-memory database: {}", e)))?;

        migrations::initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Read and decode the document stored under `key`
    fn read_document<T: DeserializeOwned>(&self, key: &'static str) -> Result<Option<T>, StorageError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM collections WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => Ok(Some(Self::decode(key, &raw)?)),
            None => Ok(None),
        }
    }

    /// Encode `data` in its envelope and replace the document under `key`
    fn write_document<T: Serialize>(&self, key: &'static str, data: &T) -> Result<(), StorageError> {
        let value = serde_json::to_string(&Envelope {
            schema_version: COLLECTION_SCHEMA_VERSION,
            data,
        })?;

        self.conn.execute(
            "INSERT OR REPLACE INTO collections (key, value, updated_at) VALUES (?1, ?2, ?3)",
            params![key, value, Utc::now().to_rfc3339()],
        )?;

        Ok(())
    }

    /// Decode a stored document, accepting both enveloped and bare layouts
    fn decode<T: DeserializeOwned>(key: &'static str, raw: &str) -> Result<T, StorageError> {
        let value: Value = serde_json::from_str(raw)?;

        match value {
            Value::Object(mut map) if map.contains_key(SCHEMA_VERSION_FIELD) => {
                let found = map
                    .get(SCHEMA_VERSION_FIELD)
                    .and_then(Value::as_u64)
                    .ok_or_else(|| {
                        StorageError::Migration(format!("Collection {} has an invalid schema version", key))
                    })?;

                if found > u64::from(COLLECTION_SCHEMA_VERSION) {
                    return Err(StorageError::UnsupportedVersion {
                        collection: key,
                        found: u32::try_from(found).unwrap_or(u32::MAX),
                        supported: COLLECTION_SCHEMA_VERSION,
                    });
                }

                let data = map.remove(DATA_FIELD).unwrap_or(Value::Null);
                Ok(serde_json::from_value(data)?)
            }
            legacy => Ok(serde_json::from_value(legacy)?),
        }
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &'static str) -> Result<Vec<T>, StorageError> {
        Ok(self.read_document(key)?.unwrap_or_default())
    }

    /// Put `item` at the front of a collection, refusing duplicate ids
    fn prepend<T, F>(&self, key: &'static str, item: &T, id_of: F) -> Result<(), StorageError>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: Fn(&T) -> String,
    {
        let mut items: Vec<T> = self.read_collection(key)?;
        let id = id_of(item);

        if items.iter().any(|existing| id_of(existing) == id) {
            return Err(StorageError::DuplicateId { collection: key, id });
        }

        items.insert(0, item.clone());
        self.write_document(key, &items)
    }

    /// Drop every item whose id matches; returns whether anything was removed
    fn remove<T, F>(&self, key: &'static str, id: &str, id_of: F) -> Result<bool, StorageError>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> String,
    {
        let mut items: Vec<T> = self.read_collection(key)?;
        let before = items.len();
        items.retain(|item| id_of(item) != id);

        if items.len() == before {
            return Ok(false);
        }

        self.write_document(key, &items)?;
        Ok(true)
    }
}

impl JournalStorage for SqliteStorage {
    fn list_entries(&self) -> Result<Vec<JournalEntry>, StorageError> {
        self.read_collection(ENTRIES_KEY)
    }

    fn insert_entry(&self, entry: &JournalEntry) -> Result<(), StorageError> {
        self.prepend(ENTRIES_KEY, entry, |e: &JournalEntry| e.id.to_string())?;

        tracing::debug!("Created journal entry: {}", entry.id);
        Ok(())
    }

    fn delete_entry(&self, entry_id: &EntryId) -> Result<(), StorageError> {
        let removed = self.remove(ENTRIES_KEY, &entry_id.to_string(), |e: &JournalEntry| e.id.to_string())?;

        if removed {
            tracing::debug!("Deleted journal entry: {}", entry_id);
        }
        Ok(())
    }

    fn list_goals(&self) -> Result<Vec<Goal>, StorageError> {
        self.read_collection(GOALS_KEY)
    }

    fn insert_goal(&self, goal: &Goal) -> Result<(), StorageError> {
        self.prepend(GOALS_KEY, goal, |g: &Goal| g.id.to_string())?;

        tracing::debug!("Created goal: {} ({})", goal.text, goal.id);
        Ok(())
    }

    fn update_goal_completion(&self, goal_id: &GoalId, completed: bool) -> Result<(), StorageError> {
        let mut goals = self.list_goals()?;

        let Some(goal) = goals.iter_mut().find(|g| &g.id == goal_id) else {
            return Ok(());
        };
        goal.completed = completed;

        self.write_document(GOALS_KEY, &goals)?;

        tracing::debug!("Updated goal {} completed={}", goal_id, completed);
        Ok(())
    }

    fn delete_goal(&self, goal_id: &GoalId) -> Result<(), StorageError> {
        let removed = self.remove(GOALS_KEY, &goal_id.to_string(), |g: &Goal| g.id.to_string())?;

        if removed {
            tracing::debug!("Deleted goal: {}", goal_id);
        }
        Ok(())
    }

    fn list_reports(&self) -> Result<Vec<AnalysisReport>, StorageError> {
        self.read_collection(REPORTS_KEY)
    }

    fn insert_report(&self, report: &AnalysisReport) -> Result<(), StorageError> {
        self.prepend(REPORTS_KEY, report, |r: &AnalysisReport| r.id.to_string())?;

        tracing::debug!("Archived report: {}", report.id);
        Ok(())
    }

    fn delete_report(&self, report_id: &ReportId) -> Result<(), StorageError> {
        let removed = self.remove(REPORTS_KEY, &report_id.to_string(), |r: &AnalysisReport| r.id.to_string())?;

        if removed {
            tracing::debug!("Deleted report: {}", report_id);
        }
        Ok(())
    }

    fn get_settings(&self) -> Result<UserSettings, StorageError> {
        Ok(self.read_document(SETTINGS_KEY)?.unwrap_or_default())
    }

    fn save_settings(&self, settings: &UserSettings) -> Result<(), StorageError> {
        self.write_document(SETTINGS_KEY, settings)?;

        tracing::debug!("Saved user settings");
        Ok(())
    }

    fn reset(&self) -> Result<(), StorageError> {
        let tx = self.conn.unchecked_transaction()?;
        for key in [ENTRIES_KEY, GOALS_KEY, REPORTS_KEY, SETTINGS_KEY] {
            tx.execute("DELETE FROM collections WHERE key = ?1", params![key])?;
        }
        tx.commit()?;

        tracing::info!("Journal store reset: all collections cleared");
        Ok(())
    }
}
