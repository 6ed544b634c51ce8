/// User settings singleton
///
/// Holds the local PIN gate and a couple of preference flags. The PIN is kept
/// in cleartext: it is a privacy screen against a casual glance, not a
/// cryptographic protection.

use serde::{Deserialize, Serialize};
use crate::domain::DomainError;

/// Minimum number of digits a PIN must have
pub const MIN_PIN_LENGTH: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub highest_streak: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub biometrics_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_lock_enabled: Option<bool>,
}

impl UserSettings {
    /// Whether the journal is behind a PIN
    pub fn is_locked(&self) -> bool {
        self.pin.is_some()
    }

    /// Set the PIN for the first time
    pub fn set_pin(&mut self, pin: &str) -> Result<(), DomainError> {
        Self::validate_pin(pin)?;
        self.pin = Some(pin.to_string());
        Ok(())
    }

    /// Check an unlock attempt against the stored PIN
    ///
    /// A journal without a PIN is always unlocked.
    pub fn verify_pin(&self, attempt: &str) -> bool {
        match &self.pin {
            Some(pin) => pin == attempt,
            None => true,
        }
    }

    /// Record `streak` if it beats the best one seen so far
    ///
    /// Returns true when the stored record changed.
    pub fn record_streak(&mut self, streak: u32) -> bool {
        if streak > self.highest_streak.unwrap_or(0) {
            self.highest_streak = Some(streak);
            true
        } else {
            false
        }
    }

    /// Flip the biometric unlock preference and return the new value
    pub fn toggle_biometrics(&mut self) -> bool {
        let enabled = !self.biometrics_enabled.unwrap_or(false);
        self.biometrics_enabled = Some(enabled);
        enabled
    }

    /// Flip the auto-lock preference and return the new value
    pub fn toggle_auto_lock(&mut self) -> bool {
        let enabled = !self.auto_lock_enabled.unwrap_or(false);
        self.auto_lock_enabled = Some(enabled);
        enabled
    }

    fn validate_pin(pin: &str) -> Result<(), DomainError> {
        if pin.chars().count() < MIN_PIN_LENGTH {
            return Err(DomainError::InvalidPin(format!(
                "PIN must have at least {} digits",
                MIN_PIN_LENGTH
            )));
        }
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(DomainError::InvalidPin(
                "PIN can only contain digits".to_string()
            ));
        }
        Ok(())
    }
}
