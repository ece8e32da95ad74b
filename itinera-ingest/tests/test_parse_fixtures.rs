use itinera_core::{ActivityType, Priority, estimate_cost};
use itinera_ingest::{parse_itinerary, parse_or_sample};
use std::path::PathBuf;

fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("read {}: {}", path.display(), e))
}

/// Model-style itinerary with time periods, one day beyond the trip length
/// and a trailing budget section.
#[test]
fn test_lisbon_time_periods() {
    let text = fixture("lisbon.md");
    let result = parse_itinerary(&text, "Lisbon", 3);

    assert!(result.overview.starts_with("Three relaxed days in Lisbon"));
    assert!(!result.overview.contains("Day 1"));

    // Day 4 is outside the 3-day trip
    assert!(result.activities.iter().all(|a| (1..=3).contains(&a.day)));
    assert!(!result.activities.iter().any(|a| a.title == "Flight home"));

    assert_eq!(result.activities.len(), 10);
    assert_eq!(result.activities_on(1).count(), 3);
    assert_eq!(result.activities_on(2).count(), 4);
    assert_eq!(result.activities_on(3).count(), 3);

    let transfer = &result.activities[0];
    assert_eq!(transfer.title, "Airport Transfer");
    assert_eq!(transfer.kind, ActivityType::Transport);
    assert_eq!(transfer.priority, Priority::High);
    assert_eq!(transfer.cost, 20.0);
    assert_eq!(transfer.time, "9:00 AM - 12:00 PM");

    let alfama = &result.activities[1];
    assert_eq!(alfama.tips.as_deref(), Some("wear flat shoes, the cobbles are slippery."));
    assert_eq!(alfama.location, "Miradouro de Santa Luzia");

    let fado = &result.activities[2];
    assert_eq!(fado.kind, ActivityType::Restaurant);
    assert_eq!(fado.cost, 45.0);
    assert_eq!(fado.location, "Clube de Fado");

    let pena = result.activities.iter().find(|a| a.title == "Pena Palace").unwrap();
    assert_eq!(pena.priority, Priority::High);
    assert_eq!(pena.cost, estimate_cost("Pena Palace".len() as u64, ActivityType::Activity));

    let bairro = result.activities.iter().find(|a| a.title == "Bairro Alto").unwrap();
    assert_eq!(bairro.priority, Priority::Low);
    assert_eq!(bairro.time, "9:00 PM - 11:00 PM");

    let shopping = result.activities.iter().find(|a| a.title == "LX Factory Shopping").unwrap();
    assert_eq!(shopping.kind, ActivityType::Shopping);

    // Budget lines never become activities
    assert!(!result.activities.iter().any(|a| a.description.contains("$450")));
}

/// Plain notes with no day or period markers: everything lands on day 1.
#[test]
fn test_notes_without_markers() {
    let text = fixture("notes.txt");
    let result = parse_itinerary(&text, "Kyoto", 4);

    assert!(!result.activities.is_empty());
    assert!(result.activities.iter().all(|a| a.day == 1));
    assert!(result.activities.iter().any(|a| a.title == "Nishiki market food tour" && a.cost == 60.0));
    assert!(!result.activities.iter().any(|a| a.title == "ok"));
}

#[test]
fn test_reparse_is_stable() {
    let text = fixture("lisbon.md");
    assert_eq!(parse_itinerary(&text, "Lisbon", 3), parse_itinerary(&text, "Lisbon", 3));
}

#[test]
fn test_invariants_over_odd_inputs() {
    let inputs = [
        "",
        "Day",
        "Day 0\n- Sunrise yoga class",
        "**Day 99**:\nMorning: Lost - nowhere",
        "Morning:\nEvening:\n",
        "$$$ $-5 Day -1",
        "1. Day\n2. Day\n3. Day",
        "Tip: bring cash\nNote: none",
        "Día 1\n- Paella en la playa",
        "Day 1\r\n- Museum of Modern Art\r\n",
    ];
    for total_days in 1..=3 {
        for input in inputs {
            let result = parse_itinerary(input, "", total_days);
            for a in &result.activities {
                assert!(a.day >= 1 && a.day <= total_days, "{:?} -> day {}", input, a.day);
                assert!(a.cost >= 0.0);
                assert!(a.id.is_none());
            }
        }
    }
}

#[test]
fn test_sample_when_nothing_parses() {
    let result = parse_or_sample("ok\nhm", "Porto", 2);
    assert_eq!(result.activities.len(), 2);
    assert!(result.activities.iter().all(|a| a.location == "Porto"));
}
