//! Caller-side helpers around a parse: ids, duplicates, trip length and the
//! placeholder itinerary shown when nothing could be parsed.

use chrono::NaiveDate;
use std::collections::HashSet;

use crate::activity::{Activity, ActivityType, ParseResult, Priority};
use crate::error::{Result, TripError};
use crate::heuristics::resolve_destination;

/// Number the activities sequentially, in result order, starting at `start`.
pub fn assign_ids(activities: &mut [Activity], start: u64) {
    for (i, a) in activities.iter_mut().enumerate() {
        a.id = Some(start + i as u64);
    }
}

/// Drop repeated activities (same day, same title ignoring case and spacing).
/// The first occurrence wins, order is preserved.
pub fn dedupe_activities(activities: Vec<Activity>) -> Vec<Activity> {
    let mut seen: HashSet<(u32, String)> = HashSet::new();
    activities
        .into_iter()
        .filter(|a| seen.insert((a.day, normalize_title(&a.title))))
        .collect()
}

fn normalize_title(title: &str) -> String {
    title
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Inclusive day count between two dates: a trip starting and ending on the
/// same date lasts one day.
pub fn trip_days(start: NaiveDate, end: NaiveDate) -> Result<u32> {
    if end < start {
        return Err(TripError::InvalidDateRange { start, end });
    }
    let days = (end - start).num_days() + 1;
    u32::try_from(days).map_err(|_| TripError::InvalidDateRange { start, end })
}

/// Validate a caller-supplied day count.
pub fn require_days(total_days: u32) -> Result<u32> {
    if total_days == 0 {
        return Err(TripError::ZeroDays);
    }
    Ok(total_days)
}

/// Two placeholder activities used when a parse produced nothing.
pub fn sample_itinerary(destination: &str) -> ParseResult {
    let place = resolve_destination(destination);
    ParseResult {
        overview: format!("Your trip to {}", place),
        activities: vec![
            Activity {
                id: None,
                day: 1,
                title: "Arrival and Hotel Check-in".to_string(),
                kind: ActivityType::Accommodation,
                time: "3:00 PM - 4:00 PM".to_string(),
                location: place.to_string(),
                cost: 0.0,
                priority: Priority::High,
                description: format!("Arrive in {} and check in to your accommodation", place),
                tips: Some("Keep a copy of your booking confirmation handy".to_string()),
            },
            Activity {
                id: None,
                day: 1,
                title: "Explore the City".to_string(),
                kind: ActivityType::Activity,
                time: "5:00 PM - 8:00 PM".to_string(),
                location: place.to_string(),
                cost: 30.0,
                priority: Priority::Medium,
                description: format!("Take a first walk around {} and get oriented", place),
                tips: None,
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(day: u32, title: &str) -> Activity {
        let mut a = sample_itinerary("Kyoto").activities.remove(1);
        a.day = day;
        a.title = title.to_string();
        a
    }

    #[test]
    fn test_assign_ids_sequential() {
        let mut acts = vec![activity(1, "A"), activity(1, "B"), activity(2, "C")];
        assign_ids(&mut acts, 1);
        let ids: Vec<_> = acts.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_dedupe_same_day_only() {
        let acts = vec![
            activity(1, "Fushimi Inari"),
            activity(1, "fushimi  inari"),
            activity(2, "Fushimi Inari"),
        ];
        let out = dedupe_activities(acts);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].day, 1);
        assert_eq!(out[1].day, 2);
    }

    #[test]
    fn test_trip_days_inclusive() {
        let start = NaiveDate::from_ymd_opt(2026, 5, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        assert_eq!(trip_days(start, end).unwrap(), 4);
        assert_eq!(trip_days(start, start).unwrap(), 1);
        assert!(matches!(
            trip_days(end, start),
            Err(TripError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_require_days() {
        assert_eq!(require_days(0), Err(TripError::ZeroDays));
        assert_eq!(require_days(3), Ok(3));
    }

    #[test]
    fn test_sample_itinerary() {
        let sample = sample_itinerary("");
        assert_eq!(sample.activities.len(), 2);
        assert!(sample.activities.iter().all(|a| a.day == 1 && a.location == "Destination"));
    }
}
