//! Property-based tests for the entry collection.
//!
//! Random sequences of inserts and deletes, including deletes of ids that are
//! not (or no longer) stored, must leave the store exactly where a plain
//! newest-first list would be.

use std::collections::HashSet;

use cafecito_journal::*;
use chrono::{DateTime, Duration};
use proptest::prelude::*;
use proptest::sample::Index;

// ============================================================================
// Strategies
// ============================================================================

#[derive(Debug, Clone)]
enum Op {
    /// Write an entry `days` after the base day, at `hour`, with an optional emotion
    Insert { days: i64, hour: i64, emotion: Option<usize> },
    /// Delete a stored entry, picked from the current list
    Delete(Index),
    /// Delete an entry that was already deleted
    Redelete(Index),
    /// Delete an id that was never stored
    DeleteUnknown,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0i64..365, 0i64..24, proptest::option::of(0usize..Emotion::ALL.len()))
            .prop_map(|(days, hour, emotion)| Op::Insert { days, hour, emotion }),
        3 => any::<Index>().prop_map(Op::Delete),
        1 => any::<Index>().prop_map(Op::Redelete),
        1 => Just(Op::DeleteUnknown),
    ]
}

fn written(n: usize, days: i64, hour: i64, emotion: Option<usize>) -> JournalEntry {
    let base = DateTime::parse_from_rfc3339("2024-01-01T00:00:00-03:00").unwrap();
    JournalEntry::new(
        format!("entrada {}", n),
        base + Duration::days(days) + Duration::hours(hour),
        emotion.map(|i| Emotion::ALL[i]),
    )
    .unwrap()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    /// The stored list always matches a newest-first model of the same operations.
    #[test]
    fn entry_collection_matches_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let mut model: Vec<JournalEntry> = Vec::new();
        let mut deleted: Vec<EntryId> = Vec::new();

        for (n, op) in ops.into_iter().enumerate() {
            match op {
                Op::Insert { days, hour, emotion } => {
                    let entry = written(n, days, hour, emotion);
                    storage.insert_entry(&entry).unwrap();
                    model.insert(0, entry);
                }
                Op::Delete(index) => {
                    if model.is_empty() {
                        storage.delete_entry(&EntryId::new()).unwrap();
                    } else {
                        let removed = model.remove(index.index(model.len()));
                        storage.delete_entry(&removed.id).unwrap();
                        deleted.push(removed.id);
                    }
                }
                Op::Redelete(index) => {
                    if !deleted.is_empty() {
                        let id = deleted[index.index(deleted.len())].clone();
                        storage.delete_entry(&id).unwrap();
                    }
                }
                Op::DeleteUnknown => {
                    storage.delete_entry(&EntryId::new()).unwrap();
                }
            }

            let stored = storage.list_entries().unwrap();
            let stored_ids: Vec<EntryId> = stored.iter().map(|e| e.id.clone()).collect();
            let model_ids: Vec<EntryId> = model.iter().map(|e| e.id.clone()).collect();
            prop_assert_eq!(&stored_ids, &model_ids);

            let unique: HashSet<&EntryId> = stored_ids.iter().collect();
            prop_assert_eq!(unique.len(), stored_ids.len(), "duplicate ids in {:?}", stored_ids);
        }

        prop_assert_eq!(storage.list_entries().unwrap(), model);
    }

    /// Entry operations never touch the other collections.
    #[test]
    fn entry_operations_leave_goals_alone(ops in prop::collection::vec(arb_op(), 1..20)) {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let goal = Goal::new("Escribir".to_string()).unwrap();
        storage.insert_goal(&goal).unwrap();
        let mut stored: Vec<EntryId> = Vec::new();

        for (n, op) in ops.into_iter().enumerate() {
            match op {
                Op::Insert { days, hour, emotion } => {
                    let entry = written(n, days, hour, emotion);
                    storage.insert_entry(&entry).unwrap();
                    stored.push(entry.id.clone());
                }
                Op::Delete(index) | Op::Redelete(index) if !stored.is_empty() => {
                    let id = stored[index.index(stored.len())].clone();
                    storage.delete_entry(&id).unwrap();
                }
                _ => storage.delete_entry(&EntryId::new()).unwrap(),
            }
        }

        prop_assert_eq!(storage.list_goals().unwrap(), vec![goal]);
        prop_assert!(storage.list_reports().unwrap().is_empty());
    }
}
