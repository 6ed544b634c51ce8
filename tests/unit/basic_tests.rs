/// Basic unit tests to verify core functionality
use cafecito_journal::*;
use chrono::{DateTime, NaiveDate};
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_unit_tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_entry_creation() {
        let entry = JournalEntry::new(
            "Hoy fue un buen día".to_string(),
            DateTime::parse_from_rfc3339("2024-06-01T23:30:00-03:00").unwrap(),
            Some(Emotion::Joy),
        );

        assert!(entry.is_ok());
        let entry = entry.unwrap();
        assert_eq!(entry.text, "Hoy fue un buen día");
        // Local day, not the UTC day (02:30 UTC on June 2nd)
        assert_eq!(entry.local_day(), day(2024, 6, 1));
    }

    #[test]
    fn test_goal_creation() {
        let goal = Goal::new("Meditar".to_string()).unwrap();
        assert!(!goal.completed);
        assert_eq!(goal.status_label(), "Pendiente");
    }

    #[test]
    fn test_emotion_wire_ids() {
        for emotion in Emotion::ALL {
            let json = serde_json::to_string(&emotion).unwrap();
            assert_eq!(json, format!("\"{}\"", emotion.id()));
        }
        assert_eq!("anxiety".parse::<Emotion>().unwrap(), Emotion::Anxiety);
    }

    #[test]
    fn test_storage_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let storage = SqliteStorage::new(temp_file.path().to_path_buf());
        assert!(storage.is_ok());
    }

    #[test]
    fn test_app_creation() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let app = JournalApp::new(temp_file.path().to_path_buf()).unwrap();

        let streak = app.analytics().streak(&app.storage().list_entries().unwrap(), day(2024, 1, 1));
        assert_eq!(streak.current_streak, 0);
    }

    #[test]
    fn test_error_messages() {
        let empty = JournalError::from(EmptyRangeSelection { start: day(2024, 1, 1), end: day(2024, 1, 7) });
        assert_eq!(
            empty.to_string(),
            "No hay entradas entre 2024-01-01 y 2024-01-07, elegí un rango más amplio"
        );

        let malformed = JournalError::from(ReflectionError::Malformed("missing field".to_string()));
        assert!(malformed.to_string().starts_with("No se pudo estructurar la respuesta, probá de nuevo"));

        let unavailable = JournalError::from(ReflectionError::Unavailable("503".to_string()));
        assert!(matches!(unavailable, JournalError::ReflectionUnavailable(_)));

        let cancelled = JournalError::from(ReflectionError::Cancelled);
        assert!(matches!(cancelled, JournalError::ReflectionCancelled));
    }
}
