/// Reflection client
///
/// Turns a set of entries, the user's goals and a date range into a
/// validated [`Reflection`] by delegating to an external narrative
/// generation service. The client holds no state and caches nothing: every
/// call is a fresh request.

pub mod gemini;
pub mod request;
pub mod schema;

pub use gemini::GeminiService;
pub use request::{InlineMedia, ReflectionRequest};
pub use schema::{output_schema, ReflectionPayload};

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::watch;

use crate::domain::{DateRange, Goal, JournalEntry, Reflection};

/// Errors that can occur while requesting a reflection
#[derive(Error, Debug)]
pub enum ReflectionError {
    /// Transport failure, error status or empty answer from the service
    #[error("Reflection service unavailable: {0}")]
    Unavailable(String),

    /// The service answered but not in the required shape
    #[error("Malformed reflection: {0}")]
    Malformed(String),

    #[error("Reflection cancelled")]
    Cancelled,

    #[error("A reflection needs at least one entry")]
    EmptyInput,
}

/// Unvalidated output of the service
#[derive(Debug, Clone, PartialEq)]
pub struct RawReflection {
    /// The structured output as text, expected to be JSON
    pub text: String,
    /// Source citations, opaque to the journal
    pub grounding_chunks: Option<Vec<Value>>,
}

/// Boundary to the external narrative generation service
#[async_trait]
pub trait ReflectionService: Send + Sync {
    async fn generate(&self, request: &ReflectionRequest) -> Result<RawReflection, ReflectionError>;
}

/// Create a linked cancel handle and token
pub fn cancellation() -> (CancelHandle, CancelToken) {
    let (tx, rx) = watch::channel(false);
    (CancelHandle { tx }, CancelToken { rx })
}

/// Cancels the in-flight reflection its token is watching
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed by a running reflection to stop early
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// A token that is never cancelled
    pub fn never() -> Self {
        let (_tx, rx) = watch::channel(false);
        Self { rx }
    }

    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancelled; pends forever if the handle is dropped first
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        if rx.wait_for(|cancelled| *cancelled).await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}

/// Requests reflections from a [`ReflectionService`] and validates them
#[derive(Clone)]
pub struct ReflectionClient {
    service: Arc<dyn ReflectionService>,
}

impl ReflectionClient {
    pub fn new<S: ReflectionService + 'static>(service: S) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Request a reflection over `entries`
    ///
    /// `entries` must not be empty; `goals` may be. The request races
    /// against `cancel`, and a cancelled request yields no result.
    pub async fn reflect(
        &self,
        entries: &[JournalEntry],
        goals: &[Goal],
        range: DateRange,
        cancel: &CancelToken,
    ) -> Result<Reflection, ReflectionError> {
        if entries.is_empty() {
            return Err(ReflectionError::EmptyInput);
        }
        if cancel.is_cancelled() {
            return Err(ReflectionError::Cancelled);
        }

        let request = ReflectionRequest::build(entries, goals, range);
        tracing::info!(
            "Requesting reflection for {}..={} ({} days, {} entries, {} media, {} goals)",
            range.start,
            range.end,
            range.days(),
            entries.len(),
            request.media.len(),
            goals.len()
        );

        let raw = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!("Reflection cancelled before the service answered");
                return Err(ReflectionError::Cancelled);
            }
            result = self.service.generate(&request) => result?,
        };

        let reflection = schema::validate(raw, range)?;
        tracing::info!(
            "Reflection ready: {} emotional points, {} suggestions",
            reflection.emotional_points.len(),
            reflection.suggestions.len()
        );
        Ok(reflection)
    }
}
