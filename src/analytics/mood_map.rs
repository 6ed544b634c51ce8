/// Mood map: dominant emotion per day over a trailing window
///
/// The dominant emotion of a day is the most frequent emotion tag among that
/// day's entries. Ties go to the emotion seen first while counting, in
/// collection order.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use crate::domain::{Emotion, JournalEntry};

/// Number of calendar days the mood map covers, ending today
pub const MOOD_MAP_DAYS: i64 = 120;

/// One cell of the mood map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodDay {
    pub date: NaiveDate,
    /// None when the day has no entries or none of them is tagged
    pub dominant: Option<Emotion>,
    pub entry_count: usize,
}

/// Build the mood map for the window ending on `today`, oldest day first
pub fn mood_map(entries: &[JournalEntry], today: NaiveDate) -> Vec<MoodDay> {
    let start = today - Duration::days(MOOD_MAP_DAYS - 1);

    let mut by_day: HashMap<NaiveDate, Vec<&JournalEntry>> = HashMap::new();
    for entry in entries {
        let day = entry.local_day();
        if day >= start && day <= today {
            by_day.entry(day).or_default().push(entry);
        }
    }

    (0..MOOD_MAP_DAYS)
        .map(|offset| {
            let date = start + Duration::days(offset);
            let day_entries = by_day.get(&date).map(Vec::as_slice).unwrap_or(&[]);
            MoodDay {
                date,
                dominant: dominant_emotion(day_entries.iter().copied()),
                entry_count: day_entries.len(),
            }
        })
        .collect()
}

/// Most frequent emotion tag among `entries`, first seen wins on a tie
pub fn dominant_emotion<'a, I>(entries: I) -> Option<Emotion>
where
    I: IntoIterator<Item = &'a JournalEntry>,
{
    // Vec keeps first-seen order, which decides ties
    let mut counts: Vec<(Emotion, usize)> = Vec::new();
    for emotion in entries.into_iter().filter_map(|e| e.emotion) {
        match counts.iter_mut().find(|(seen, _)| *seen == emotion) {
            Some((_, count)) => *count += 1,
            None => counts.push((emotion, 1)),
        }
    }

    let mut best: Option<(Emotion, usize)> = None;
    for (emotion, count) in counts {
        match best {
            Some((_, best_count)) if count <= best_count => {}
            _ => best = Some((emotion, count)),
        }
    }

    best.map(|(emotion, _)| emotion)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 9, 30).unwrap()
    }

    fn entry(day: NaiveDate, emotion: Option<Emotion>) -> JournalEntry {
        let created_at = FixedOffset::west_opt(3 * 3600)
            .unwrap()
            .from_local_datetime(&day.and_hms_opt(18, 0, 0).unwrap())
            .unwrap();
        JournalEntry::new("nota".to_string(), created_at, emotion).unwrap()
    }

    #[test]
    fn test_majority_wins() {
        let day = today();
        let entries = vec![
            entry(day, Some(Emotion::Anxiety)),
            entry(day, Some(Emotion::Calm)),
            entry(day, Some(Emotion::Calm)),
            entry(day, Some(Emotion::Calm)),
        ];

        assert_eq!(dominant_emotion(&entries), Some(Emotion::Calm));
    }

    #[test]
    fn test_tie_goes_to_first_seen() {
        let day = today();
        let entries = vec![
            entry(day, Some(Emotion::Sadness)),
            entry(day, Some(Emotion::Joy)),
            entry(day, Some(Emotion::Joy)),
            entry(day, Some(Emotion::Sadness)),
        ];

        assert_eq!(dominant_emotion(&entries), Some(Emotion::Sadness));
    }

    #[test]
    fn test_untagged_entries_have_no_dominant() {
        let entries = vec![entry(today(), None), entry(today(), None)];
        assert_eq!(dominant_emotion(&entries), None);
    }

    #[test]
    fn test_window_shape() {
        let map = mood_map(&[], today());
        assert_eq!(map.len(), MOOD_MAP_DAYS as usize);
        assert_eq!(map.last().unwrap().date, today());
        assert_eq!(map[0].date, today() - Duration::days(119));
        assert!(map.iter().all(|d| d.dominant.is_none() && d.entry_count == 0));
    }

    #[test]
    fn test_days_are_aggregated_separately() {
        let yesterday = today() - Duration::days(1);
        let entries = vec![
            entry(today(), Some(Emotion::Calm)),
            entry(today(), Some(Emotion::Calm)),
            entry(today(), Some(Emotion::Calm)),
            entry(today(), Some(Emotion::Anxiety)),
            entry(yesterday, Some(Emotion::Anger)),
            // Outside the window
            entry(today() - Duration::days(200), Some(Emotion::Mystery)),
        ];

        let map = mood_map(&entries, today());
        let last = &map[map.len() - 1];
        let before = &map[map.len() - 2];

        assert_eq!(last.dominant, Some(Emotion::Calm));
        assert_eq!(last.entry_count, 4);
        assert_eq!(before.dominant, Some(Emotion::Anger));
        assert_eq!(map.iter().filter(|d| d.dominant.is_some()).count(), 2);
        assert!(map.iter().all(|d| d.dominant != Some(Emotion::Mystery)));
    }
}
