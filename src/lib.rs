/// Public library interface for the Cafecito journal
///
/// This module exports the application object that owns the store, the
/// derived-view engine and the reflection client, plus the public types used
/// by the command line and by tests.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

pub mod analytics;
pub mod commands;
pub mod config;
pub mod domain;
pub mod reflection;
pub mod storage;

// Re-export public modules and types
pub use analytics::{AnalyticsEngine, EmptyRangeSelection};
pub use config::{ConfigError, JournalConfig};
pub use domain::*;
pub use reflection::{
    cancellation, CancelHandle, CancelToken, GeminiService, ReflectionClient, ReflectionError,
    ReflectionService,
};
pub use storage::{JournalStorage, SqliteStorage, StorageError};

/// Errors surfaced to the user
///
/// The display strings are the messages shown on screen.
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("No se pudo acceder al almacenamiento local: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error("No hay entradas entre {start} y {end}, elegí un rango más amplio")]
    EmptyRangeSelection { start: NaiveDate, end: NaiveDate },

    #[error("La sesión clínica falló, probá de nuevo ({0})")]
    ReflectionUnavailable(String),

    #[error("No se pudo estructurar la respuesta, probá de nuevo ({0})")]
    ReflectionMalformed(String),

    #[error("Se canceló la reflexión")]
    ReflectionCancelled,

    #[error("PIN incorrecto")]
    InvalidPin,

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Error de configuración: {0}")]
    Config(#[from] ConfigError),
}

impl From<EmptyRangeSelection> for JournalError {
    fn from(e: EmptyRangeSelection) -> Self {
        JournalError::EmptyRangeSelection {
            start: e.start,
            end: e.end,
        }
    }
}

impl From<ReflectionError> for JournalError {
    fn from(e: ReflectionError) -> Self {
        match e {
            ReflectionError::Unavailable(msg) => JournalError::ReflectionUnavailable(msg),
            ReflectionError::Malformed(msg) => JournalError::ReflectionMalformed(msg),
            ReflectionError::Cancelled => JournalError::ReflectionCancelled,
            ReflectionError::EmptyInput => JournalError::Domain(DomainError::Validation {
                message: "A reflection needs at least one entry".to_string(),
            }),
        }
    }
}

/// The journal application
///
/// Constructed once at startup and passed by reference to whatever needs it.
pub struct JournalApp {
    storage: SqliteStorage,
    analytics: AnalyticsEngine,
    reflection: Option<ReflectionClient>,
}

impl JournalApp {
    /// Open (or create) the journal at `db_path`
    pub fn new(db_path: PathBuf) -> Result<Self, JournalError> {
        tracing::info!("Opening journal at {:?}", db_path);
        let storage = SqliteStorage::new(db_path)?;
        Ok(Self::with_storage(storage))
    }

    /// Build the app around an already opened store
    pub fn with_storage(storage: SqliteStorage) -> Self {
        Self {
            storage,
            analytics: AnalyticsEngine::new(),
            reflection: None,
        }
    }

    /// Attach the reflection client used by [`JournalApp::reflect`]
    pub fn with_reflection(mut self, client: ReflectionClient) -> Self {
        self.reflection = Some(client);
        self
    }

    /// Get a reference to the storage layer
    pub fn storage(&self) -> &SqliteStorage {
        &self.storage
    }

    /// Get a reference to the analytics engine
    pub fn analytics(&self) -> &AnalyticsEngine {
        &self.analytics
    }

    /// Request a reflection over the entries written inside `range`
    ///
    /// Fails with `EmptyRangeSelection` before contacting the service when no
    /// entry falls in the range. The result is not saved; see
    /// [`JournalApp::archive`].
    pub async fn reflect(
        &self,
        range: DateRange,
        cancel: &CancelToken,
    ) -> Result<Reflection, JournalError> {
        let client = self.reflection.as_ref().ok_or_else(|| {
            JournalError::ReflectionUnavailable("no reflection service configured".to_string())
        })?;

        let entries = self.storage.list_entries()?;
        let selected = self.analytics.entries_for_reflection(&entries, &range)?;
        let goals = self.storage.list_goals()?;

        Ok(client.reflect(&selected, &goals, range, cancel).await?)
    }

    /// Save a reflection as a new report, newest first
    pub fn archive(&self, reflection: Reflection) -> Result<AnalysisReport, JournalError> {
        let report = reflection.archive();
        self.storage.insert_report(&report)?;
        tracing::info!("Archived report {}", report.id);
        Ok(report)
    }
}
