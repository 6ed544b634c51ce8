/// Application-controller operations
///
/// Each function takes the store it works on plus a params struct and
/// returns a serializable response, so the command line (or any other front
/// end) stays a thin layer over them.

pub mod entry;
pub mod goal;
pub mod overview;
pub mod report;
pub mod settings;

// Re-export command functions for easy access
pub use entry::*;
pub use goal::*;
pub use overview::*;
pub use report::*;
pub use settings::*;

use chrono::NaiveDate;

use crate::domain::DomainError;

/// Parse a `YYYY-MM-DD` day given by the user
pub fn parse_day(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| DomainError::InvalidDate(format!("'{}' no es una fecha AAAA-MM-DD", value)))
}

/// Parse an identifier given by the user
pub(crate) fn parse_id<T>(
    value: &str,
    what: &str,
    parse: impl Fn(&str) -> Result<T, uuid::Error>,
) -> Result<T, DomainError> {
    parse(value.trim()).map_err(|_| DomainError::Validation {
        message: format!("Id de {} inválido: '{}'", what, value),
    })
}
