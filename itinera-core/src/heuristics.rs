//! Field heuristics applied to every parsed activity.
//!
//! All rules are deterministic keyword/regex matches.

use regex::Regex;
use std::sync::LazyLock;

use crate::activity::{Activity, ActivityType, Priority};
use crate::cost::estimate_cost;

/// Location used when the caller gives an empty destination.
pub const DEFAULT_DESTINATION: &str = "Destination";

const MAX_LOCATION_CHARS: usize = 100;

const ACCOMMODATION_KEYWORDS: &[&str] = &["hotel", "check", "accommodation", "stay", "resort", "lodge"];
const RESTAURANT_KEYWORDS: &[&str] = &[
    "dinner", "lunch", "breakfast", "restaurant", "food", "eat", "meal", "cafe", "dining",
];
const TRANSPORT_KEYWORDS: &[&str] = &[
    "flight", "transport", "travel", "airport", "train", "bus", "taxi", "drive", "transfer",
];
const SHOPPING_KEYWORDS: &[&str] = &["shopping", "market", "boutique", "store"];

/// Label words that look like a `Place:` prefix but are not places.
const NON_PLACE_LABELS: &[&str] = &[
    "morning", "afternoon", "evening", "night", "tip", "tips", "note", "notes", "remember",
    "cost", "price", "time", "budget", "optional",
];

static COST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$(\d+(?:,\d{3})*(?:\.\d{2})?)").expect("cost regex")
});

static LOCATION_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\b(?:[Aa]t|[Ii]n|[Tt]o|[Vv]isit)\s+(?:the\s+)?",
        r"(?P<place>\p{Lu}[\w'’&\-]*(?:\s+(?:(?:of|the|de|la|le|del|du|di|and|&)\s+)*\p{Lu}[\w'’&\-]*)*)"
    ))
    .expect("location keyword regex")
});

static LOCATION_LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<place>\p{Lu}[\w'’&.\- ]{1,80}?)\s*:(?:\s|$)").expect("location label regex")
});

static TIPS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:tips?|note|remember|don't forget|don’t forget|be sure to)\b[:\s]+(?P<tip>[^.!?\n]+[.!?]?)")
        .expect("tips regex")
});

static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<h>\d{1,2})(?::(?P<m>\d{2}))?\s*(?P<ampm>am|pm|a\.m\.|p\.m\.)$").expect("clock regex")
});

/// Classify an activity by its title.
///
/// Order matters: accommodation > restaurant > transport > shopping.
pub fn infer_type(title: &str) -> ActivityType {
    let t = title.to_lowercase();
    let has_any = |words: &[&str]| words.iter().any(|w| t.contains(w));

    if has_any(ACCOMMODATION_KEYWORDS) {
        return ActivityType::Accommodation;
    }
    if has_any(RESTAURANT_KEYWORDS) {
        return ActivityType::Restaurant;
    }
    if has_any(TRANSPORT_KEYWORDS) {
        return ActivityType::Transport;
    }
    if has_any(SHOPPING_KEYWORDS) {
        return ActivityType::Shopping;
    }
    ActivityType::Activity
}

/// First `$N` literal in `text`, commas stripped.
pub fn extract_cost(text: &str) -> Option<f64> {
    let caps = COST_RE.captures(text)?;
    caps[1].replace(',', "").parse().ok()
}

/// Best-effort place name from `text`, or the destination.
pub fn infer_location(text: &str, destination: &str) -> String {
    let from_keyword = LOCATION_KEYWORD_RE
        .captures(text)
        .map(|c| clean_place(&c["place"]));

    let from_label = || {
        LOCATION_LABEL_RE
            .captures(text)
            .map(|c| clean_place(&c["place"]))
            .filter(|p| !NON_PLACE_LABELS.contains(&p.to_lowercase().as_str()))
    };

    match from_keyword.filter(|p| !p.is_empty()).or_else(from_label) {
        Some(place) if !place.is_empty() => truncate_chars(&place, MAX_LOCATION_CHARS),
        _ => resolve_destination(destination).to_string(),
    }
}

pub fn infer_priority(kind: ActivityType, text: &str) -> Priority {
    let t = text.to_lowercase();
    if matches!(kind, ActivityType::Accommodation | ActivityType::Transport)
        || t.contains("must")
        || t.contains("essential")
    {
        return Priority::High;
    }
    if t.contains("optional") || t.contains("if time") {
        return Priority::Low;
    }
    Priority::Medium
}

pub fn extract_tips(text: &str) -> Option<String> {
    let caps = TIPS_RE.captures(text)?;
    let tip = caps["tip"].trim();
    if tip.is_empty() { None } else { Some(tip.to_string()) }
}

/// Display window for a named part of the day.
pub fn period_window(period: &str) -> Option<&'static str> {
    match period.trim().to_lowercase().as_str() {
        "morning" => Some("9:00 AM - 12:00 PM"),
        "afternoon" => Some("1:00 PM - 5:00 PM"),
        "evening" => Some("6:00 PM - 9:00 PM"),
        "night" => Some("9:00 PM - 11:00 PM"),
        _ => None,
    }
}

/// Normalize `9am`, `9 AM`, `09:30 p.m.` to `9:00 AM` / `9:30 PM`.
pub fn normalize_clock(token: &str) -> Option<String> {
    let caps = CLOCK_RE.captures(token.trim())?;
    let hour: u32 = caps["h"].parse().ok()?;
    let minute: u32 = caps.name("m").map_or(Some(0), |m| m.as_str().parse().ok())?;
    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }
    let suffix = if caps["ampm"].to_lowercase().starts_with('p') { "PM" } else { "AM" };
    Some(format!("{}:{:02} {}", hour, minute, suffix))
}

/// Time token from the text (period name or clock) as a display string.
pub fn time_from_token(token: &str) -> Option<String> {
    period_window(token)
        .map(str::to_string)
        .or_else(|| normalize_clock(token))
}

/// Category default used when the text names no time.
pub fn default_time(kind: ActivityType, title: &str) -> &'static str {
    match kind {
        ActivityType::Accommodation => "3:00 PM - 4:00 PM",
        ActivityType::Restaurant => {
            let t = title.to_lowercase();
            if t.contains("breakfast") {
                "8:00 AM - 9:00 AM"
            } else if t.contains("lunch") {
                "12:00 PM - 1:30 PM"
            } else {
                "7:00 PM - 9:00 PM"
            }
        }
        ActivityType::Transport => "10:00 AM - 11:00 AM",
        ActivityType::Shopping => "2:00 PM - 4:00 PM",
        ActivityType::Activity => "10:00 AM - 1:00 PM",
    }
}

pub fn resolve_destination(destination: &str) -> &str {
    let d = destination.trim();
    if d.is_empty() { DEFAULT_DESTINATION } else { d }
}

/// Assemble a fully labelled activity.
///
/// `source` is the text the activity came from (title and description
/// together); cost, location, priority and tips are read from it.
pub fn build_activity(
    day: u32,
    title: &str,
    description: &str,
    time: Option<String>,
    source: &str,
    destination: &str,
) -> Activity {
    let kind = infer_type(title);
    let cost = extract_cost(source)
        .unwrap_or_else(|| estimate_cost(title.chars().count() as u64, kind))
        .max(0.0);

    Activity {
        id: None,
        day,
        title: title.to_string(),
        kind,
        time: time.unwrap_or_else(|| default_time(kind, title).to_string()),
        location: infer_location(source, destination),
        cost,
        priority: infer_priority(kind, source),
        description: description.to_string(),
        tips: extract_tips(source),
    }
}

fn clean_place(raw: &str) -> String {
    raw.trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | '!' | '?' | '-' | '&'))
        .trim()
        .to_string()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect::<String>().trim_end().to_string()
}
