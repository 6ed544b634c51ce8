/// Basic integration tests
use cafecito_journal::*;
use chrono::{DateTime, NaiveDate};
use tempfile::NamedTempFile;

#[cfg(test)]
mod basic_integration_tests {
    use super::*;

    fn entry(ts: &str, text: &str, emotion: Option<Emotion>) -> JournalEntry {
        JournalEntry::new(text.to_string(), DateTime::parse_from_rfc3339(ts).unwrap(), emotion).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_database_persistence() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let db_path = temp_file.path().to_path_buf();

        let first = entry("2024-03-01T10:00:00-03:00", "Primera", Some(Emotion::Calm));
        let goal = Goal::new("Escribir todos los días".to_string()).unwrap();
        {
            let storage = SqliteStorage::new(db_path.clone()).expect("Failed to create storage");
            storage.insert_entry(&first).unwrap();
            storage.insert_goal(&goal).unwrap();
            storage.update_goal_completion(&goal.id, true).unwrap();
        }

        // Reopen the same file
        let storage = SqliteStorage::new(db_path).expect("Failed to reopen storage");
        assert_eq!(storage.list_entries().unwrap(), vec![first]);

        let goals = storage.list_goals().unwrap();
        assert_eq!(goals.len(), 1);
        assert!(goals[0].completed);
    }

    #[test]
    fn test_archived_report_round_trip() {
        let temp_file = NamedTempFile::new().expect("Failed to create temp file");
        let app = JournalApp::new(temp_file.path().to_path_buf()).unwrap();

        let reflection = Reflection {
            range: DateRange::new(day(2024, 3, 1), day(2024, 3, 7)).unwrap(),
            summary: "Resumen.".to_string(),
            evolution: "Evolución.".to_string(),
            emotional_points: vec![EmotionalPoint { date: "2024-03-02".to_string(), score: -1.5 }],
            guidance: vec!["Uno.".to_string(), "Dos.".to_string(), "Tres.".to_string()],
            suggestions: vec![Suggestion {
                title: "Respirar".to_string(),
                category: SuggestionCategory::Mindfulness,
                description: "Cinco minutos por la mañana.".to_string(),
                link: None,
            }],
            grounding_chunks: Some(vec![serde_json::json!({"web": {"uri": "https://example.org"}})]),
        };

        let report = app.archive(reflection).unwrap();
        let reopened = SqliteStorage::new(temp_file.path().to_path_buf()).unwrap();
        assert_eq!(reopened.list_reports().unwrap(), vec![report]);
    }

    #[test]
    fn test_collections_are_independent() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let kept = entry("2024-03-01T10:00:00-03:00", "Se queda", None);
        let goal = Goal::new("Meta".to_string()).unwrap();
        storage.insert_entry(&kept).unwrap();
        storage.insert_goal(&goal).unwrap();

        storage.delete_goal(&goal.id).unwrap();
        storage.delete_entry(&EntryId::new()).unwrap();

        assert_eq!(storage.list_entries().unwrap(), vec![kept]);
        assert!(storage.list_goals().unwrap().is_empty());
    }

    #[test]
    fn test_views_over_stored_entries() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        for (ts, emotion) in [
            ("2025-01-10T08:00:00-03:00", Emotion::Anxiety),
            ("2025-01-10T21:00:00-03:00", Emotion::Calm),
            ("2025-01-11T09:00:00-03:00", Emotion::Calm),
            ("2025-01-12T23:59:59-03:00", Emotion::Joy),
        ] {
            storage.insert_entry(&entry(ts, "texto", Some(emotion))).unwrap();
        }
        let entries = storage.list_entries().unwrap();
        let analytics = AnalyticsEngine::new();

        let streak = analytics.streak(&entries, day(2025, 1, 13));
        assert_eq!(streak.current_streak, 3);

        let month = analytics.calendar(&entries, 2025, 1).unwrap();
        assert_eq!(month.leading_blanks(), 2);
        assert_eq!(month.days().find(|d| d.day == 10).unwrap().entries.len(), 2);

        // Newest first: Calm was inserted after Anxiety, so it is seen first
        let map = analytics.mood_map(&entries, day(2025, 1, 12));
        let jan_10 = map.iter().find(|d| d.date == day(2025, 1, 10)).unwrap();
        assert_eq!(jan_10.dominant, Some(Emotion::Calm));

        let range = DateRange::new(day(2025, 1, 11), day(2025, 1, 12)).unwrap();
        let selected = analytics.entries_for_reflection(&entries, &range).unwrap();
        assert_eq!(selected.len(), 2);

        let empty = DateRange::new(day(2025, 2, 1), day(2025, 2, 3)).unwrap();
        assert!(analytics.entries_for_reflection(&entries, &empty).is_err());
    }
}
