/// PIN lock, preference toggles and the full reset

use serde::{Deserialize, Serialize};

use crate::commands::StatusResponse;
use crate::storage::JournalStorage;
use crate::JournalError;

/// Parameters for setting the PIN
#[derive(Debug, Deserialize)]
pub struct SetPinParams {
    pub pin: String,
    /// Required when a PIN is already set
    pub current: Option<String>,
}

/// Set or change the PIN
///
/// Changing an existing PIN requires the current one.
pub fn set_pin<S: JournalStorage>(
    storage: &S,
    params: SetPinParams,
) -> Result<StatusResponse, JournalError> {
    let mut settings = storage.get_settings()?;

    if settings.is_locked() {
        let current = params.current.as_deref().unwrap_or_default();
        if !settings.verify_pin(current) {
            return Err(JournalError::InvalidPin);
        }
    }

    settings.set_pin(&params.pin)?;
    storage.save_settings(&settings)?;

    Ok(StatusResponse {
        success: true,
        message: "PIN guardado".to_string(),
    })
}

/// Check an unlock attempt
pub fn unlock<S: JournalStorage>(storage: &S, attempt: &str) -> Result<StatusResponse, JournalError> {
    let settings = storage.get_settings()?;
    if !settings.verify_pin(attempt) {
        tracing::debug!("Rejected unlock attempt");
        return Err(JournalError::InvalidPin);
    }

    Ok(StatusResponse {
        success: true,
        message: "Diario desbloqueado".to_string(),
    })
}

/// Which preference to flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preference {
    Biometrics,
    AutoLock,
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub preference: &'static str,
    pub enabled: bool,
}

/// Flip a preference and persist it
pub fn toggle_preference<S: JournalStorage>(
    storage: &S,
    preference: Preference,
) -> Result<ToggleResponse, JournalError> {
    let mut settings = storage.get_settings()?;

    let (name, enabled) = match preference {
        Preference::Biometrics => ("biometrics", settings.toggle_biometrics()),
        Preference::AutoLock => ("auto_lock", settings.toggle_auto_lock()),
    };
    storage.save_settings(&settings)?;

    Ok(ToggleResponse {
        preference: name,
        enabled,
    })
}

/// Erase every collection
pub fn reset_journal<S: JournalStorage>(storage: &S) -> Result<StatusResponse, JournalError> {
    storage.reset()?;
    tracing::info!("Journal reset");

    Ok(StatusResponse {
        success: true,
        message: "Se borraron las entradas, las metas, los informes y los ajustes".to_string(),
    })
}
