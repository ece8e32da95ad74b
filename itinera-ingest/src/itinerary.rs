//! Free-text itinerary parser.
//!
//! Input is whatever the model (or a pasted document) produced, e.g.
//!
//!   **Trip Overview**: Four relaxed days in Lisbon...
//!
//!   **Day 1** (June 3):
//!   Morning: Alfama Walk - Wander the old quarter, tip: wear flat shoes
//!   Evening: Dinner - Fado show at Clube de Fado ($45)
//!
//!   Day 2
//!   - Train to Sintra
//!   - Pena Palace visit (must-see)
//!
//! Parsing never fails. It degrades through three strategies: named time
//! periods inside day sections, one activity per line inside day sections,
//! and finally one activity per line over the whole text.

use itinera_core::heuristics::{build_activity, period_window, time_from_token};
use itinera_core::{Activity, ParseResult};
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, trace};

const MIN_LINE_CHARS: usize = 5;
const MIN_TITLE_CHARS: usize = 3;
const MAX_TITLE_CHARS: usize = 60;

static DAY_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?im)^[ \t]*(?:#{1,6}[ \t]*)?(?:[-*•][ \t]+)?(?:\*\*|__)?[ \t]*",
        r"(?:day[ \t]*(?P<n>\d{1,3})|(?P<m>\d{1,3})\.[ \t]*day)\b",
        r"(?:\*\*|__)?[ \t]*(?:\([^)\n]*\))?[ \t]*(?:\*\*|__)?[ \t]*[:\-–—]?",
        r"(?P<rest>[^\n]*)$"
    ))
    .expect("day header regex")
});

static BUDGET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?im)^[ \t]*(?:#{1,6}[ \t]*)?(?:\*\*|__)?[ \t]*(?:estimated[ \t]+|total[ \t]+)?budget\b")
        .expect("budget regex")
});

static OVERVIEW_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)trip[ \t]+overview\b[ \t]*(?:\*\*|__)?[ \t]*:?[ \t]*(?:\*\*|__)?").expect("overview regex")
});

static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?im)^[ \t]*(?:[-*•+][ \t]+|\d{1,2}[.)][ \t]+)?(?:\*\*|__)?",
        r"(?P<period>morning|afternoon|evening|night)",
        r"(?:\*\*|__)?[ \t]*(?:\([^)\n]*\))?[ \t]*(?:\*\*|__)?[ \t]*(?::|[-–—][ \t]|[-–—](?:\*\*|__))",
        r"(?:\*\*|__)?[ \t]*(?P<rest>[^\n]*\S)"
    ))
    .expect("time period regex")
});

static LEADING_TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    let clock = r"\d{1,2}(?::\d{2})?[ \t]*(?:a\.m\.|p\.m\.|am|pm)";
    Regex::new(&format!(
        r"(?i)^(?:(?P<period>morning|afternoon|evening|night)|(?P<start>{clock})(?:[ \t]*(?:-|–|—|to)[ \t]*(?P<end>{clock}))?)(?:[ \t]*[:,][ \t]*|[ \t]*[-–—][ \t]+|[ \t]+|$)"
    ))
    .expect("leading time regex")
});

static TITLE_DELIM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s[-–—]\s|\s[-–—]$|:(?:\s|$)|\(").expect("title delimiter regex")
});

static LIST_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?:[-*•+]|\d{1,2}[.)])\s+").expect("list marker regex")
});

static LABEL_ONLY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^:]{1,40}:$").expect("label regex")
});

static DAY_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bday\b").expect("day word regex")
});

static DAY_MENTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bdays?\b").expect("day mention regex")
});

/// A `Day N` block of the source text.
#[derive(Debug, Clone, PartialEq)]
pub struct DaySection<'a> {
    pub day: u32,
    /// Text after the day marker on the header line, markup removed.
    pub heading: String,
    pub body: &'a str,
}

/// Parse free-form itinerary text into day-indexed activities.
///
/// Activities outside `1..=total_days` are dropped. An empty `destination`
/// becomes "Destination" wherever a location cannot be read from the text.
pub fn parse_itinerary(text: &str, destination: &str, total_days: u32) -> ParseResult {
    if text.trim().is_empty() {
        return ParseResult::empty();
    }

    let text = text.replace("\r\n", "\n");
    let overview = extract_overview(&text);

    let mut activities = Vec::new();
    for section in segment_days(&text) {
        if section.day == 0 || section.day > total_days {
            debug!(day = section.day, total_days, "skipping out-of-range day");
            continue;
        }
        activities.extend(extract_section(&section, destination));
    }

    if activities.is_empty() {
        debug!("no activities from day sections, scanning every line");
        activities = extract_lines_anywhere(&text, destination, total_days);
    }

    activities.sort_by_key(|a| a.day);
    debug!(activities = activities.len(), overview_chars = overview.len(), "parsed itinerary");

    ParseResult { overview, activities }
}

/// Same as [`parse_itinerary`] but never returns an empty itinerary: the
/// built-in sample stands in when nothing could be parsed.
pub fn parse_or_sample(text: &str, destination: &str, total_days: u32) -> ParseResult {
    let parsed = parse_itinerary(text, destination, total_days);
    if parsed.is_empty() {
        debug!("falling back to sample itinerary");
        return itinera_core::sample_itinerary(destination);
    }
    parsed
}

/// Trip overview: an explicit "Trip Overview" section, else the lines that
/// talk about the trip before the first day starts.
pub fn extract_overview(text: &str) -> String {
    if let Some(m) = OVERVIEW_HEADER_RE.find(text) {
        let start = m.end();
        let end = [
            DAY_HEADER_RE.find_at(text, start).map(|h| h.start()),
            BUDGET_RE.find_at(text, start).map(|b| b.start()),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(text.len());

        let body = join_clean_lines(&text[start..end]);
        if !body.is_empty() {
            return body;
        }
    }

    let head = match DAY_HEADER_RE.find(text) {
        Some(h) => &text[..h.start()],
        None => text,
    };

    let mut collected: Vec<String> = Vec::new();
    let mut collecting = false;
    for line in head.lines() {
        let lower = line.to_lowercase();
        if DAY_MENTION_RE.is_match(line) {
            if collecting {
                break;
            }
            continue;
        }
        if !collecting {
            if !(lower.contains("overview") || lower.contains("trip")) {
                continue;
            }
            collecting = true;
        }
        let cleaned = strip_overview_label(&clean_line(line));
        if !cleaned.is_empty() {
            collected.push(cleaned);
        }
    }
    collected.join(" ")
}

/// Split the text at day headers. Each section runs to the next header, a
/// budget marker, or the end of the text. Sections come back in source
/// order, out-of-range days included.
pub fn segment_days(text: &str) -> Vec<DaySection<'_>> {
    let headers: Vec<_> = DAY_HEADER_RE.captures_iter(text).collect();
    let mut sections = Vec::with_capacity(headers.len());

    for (i, caps) in headers.iter().enumerate() {
        let Some(whole) = caps.get(0) else { continue };
        let day = caps
            .name("n")
            .or_else(|| caps.name("m"))
            .and_then(|d| d.as_str().parse::<u32>().ok())
            .unwrap_or(0);

        let start = whole.end();
        let next = headers
            .get(i + 1)
            .and_then(|c| c.get(0))
            .map_or(text.len(), |m| m.start());
        let end = BUDGET_RE
            .find_at(text, start)
            .map(|b| b.start())
            .filter(|&b| b < next)
            .unwrap_or(next);

        sections.push(DaySection {
            day,
            heading: clean_line(caps.name("rest").map_or("", |r| r.as_str())),
            body: &text[start..end],
        });
    }

    trace!(sections = sections.len(), "segmented day headers");
    sections
}

/// Activities of one day section. Period entries (`Morning: ...`) win; the
/// line scan only runs for a section that has none. The choice is made per
/// section, so a plan mixing both styles across days keeps every day.
fn extract_section(section: &DaySection<'_>, destination: &str) -> Vec<Activity> {
    let periods = extract_time_periods(section, destination);
    if !periods.is_empty() {
        trace!(day = section.day, count = periods.len(), "time-period strategy");
        return periods;
    }
    let lines = extract_lines(section.body, section.day, destination);
    trace!(day = section.day, count = lines.len(), "line strategy");
    lines
}

/// `Morning: <title> - <description>` entries in the heading and body.
fn extract_time_periods(section: &DaySection<'_>, destination: &str) -> Vec<Activity> {
    let haystacks = [section.heading.as_str(), section.body];
    let mut out = Vec::new();

    for hay in haystacks {
        for caps in PERIOD_RE.captures_iter(hay) {
            let rest = clean_line(&caps["rest"]);
            let (title, description) = split_title(&rest);
            if title.chars().count() < MIN_TITLE_CHARS {
                continue;
            }
            let description = if description.is_empty() { rest.as_str() } else { description };
            let time = period_window(&caps["period"]).map(str::to_string);
            out.push(build_activity(
                section.day,
                &shorten_title(title),
                description,
                time,
                &rest,
                destination,
            ));
        }
    }
    out
}

/// One activity per qualifying line of `body`. A bare `Morning:` label line
/// sets the time for the lines under it.
fn extract_lines(body: &str, day: u32, destination: &str) -> Vec<Activity> {
    let mut out = Vec::new();
    let mut label_time: Option<String> = None;

    for line in body.lines() {
        if let Some(time) = period_label(line) {
            label_time = Some(time);
            continue;
        }
        if let Some(mut activity) = line_activity(line, day, destination) {
            if let Some(time) = &label_time {
                if !has_leading_time(line) {
                    activity.time = time.clone();
                }
            }
            out.push(activity);
        }
    }
    out
}

/// Last resort: every line of the text, day 1 until a day header moves the
/// cursor. Lines under an out-of-range header are skipped.
fn extract_lines_anywhere(text: &str, destination: &str, total_days: u32) -> Vec<Activity> {
    let mut day = 1;
    let mut out = Vec::new();

    for line in text.lines() {
        if let Some(caps) = DAY_HEADER_RE.captures(line.trim()) {
            day = caps
                .name("n")
                .or_else(|| caps.name("m"))
                .and_then(|d| d.as_str().parse().ok())
                .unwrap_or(0);
            continue;
        }
        if day == 0 || day > total_days {
            continue;
        }
        if let Some(activity) = line_activity(line, day, destination) {
            out.push(activity);
        }
    }
    out
}

fn line_activity(line: &str, day: u32, destination: &str) -> Option<Activity> {
    if is_header_line(line) {
        return None;
    }
    let cleaned = clean_line(line);
    if cleaned.chars().count() < MIN_LINE_CHARS {
        trace!(line = %cleaned, "rejected: too short");
        return None;
    }

    let (time, remainder) = match LEADING_TIME_RE.captures(&cleaned) {
        Some(caps) => {
            let time = match (caps.name("period"), caps.name("start"), caps.name("end")) {
                (Some(p), _, _) => time_from_token(p.as_str()),
                (None, Some(s), Some(e)) => match (time_from_token(s.as_str()), time_from_token(e.as_str())) {
                    (Some(s), Some(e)) => Some(format!("{} - {}", s, e)),
                    (s, _) => s,
                },
                (None, Some(s), None) => time_from_token(s.as_str()),
                _ => None,
            };
            let end = caps.get(0).map_or(0, |m| m.end());
            (time, &cleaned[end..])
        }
        None => (None, cleaned.as_str()),
    };

    let (title, _) = split_title(remainder);
    let title = title.trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | '!')).trim();
    if title.chars().count() < MIN_TITLE_CHARS || DAY_WORD_RE.is_match(title) {
        trace!(line = %cleaned, "rejected: no usable title");
        return None;
    }

    Some(build_activity(day, &shorten_title(title), &cleaned, time, &cleaned, destination))
}

fn is_header_line(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.starts_with('#')
        || DAY_HEADER_RE.is_match(trimmed)
        || BUDGET_RE.is_match(trimmed)
        || OVERVIEW_HEADER_RE.is_match(trimmed)
    {
        return true;
    }
    LABEL_ONLY_RE.is_match(&clean_line(trimmed))
}

/// Time window of a line that is only a period label, e.g. `**Afternoon:**`.
fn period_label(line: &str) -> Option<String> {
    let cleaned = clean_line(line);
    let label = cleaned.strip_suffix(':')?;
    period_window(label).map(str::to_string)
}

fn has_leading_time(line: &str) -> bool {
    LEADING_TIME_RE.is_match(&clean_line(line))
}

/// Title before the first ` - `, `: ` or `(`, and what follows the delimiter.
fn split_title(s: &str) -> (&str, &str) {
    match TITLE_DELIM_RE.find(s) {
        Some(m) => (s[..m.start()].trim(), s[m.end()..].trim()),
        None => (s.trim(), ""),
    }
}

fn shorten_title(title: &str) -> String {
    if title.chars().count() <= MAX_TITLE_CHARS {
        return title.to_string();
    }
    let mut out = String::new();
    for word in title.split_whitespace() {
        if out.chars().count() + word.chars().count() + 1 > MAX_TITLE_CHARS {
            break;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    if out.is_empty() {
        title.chars().take(MAX_TITLE_CHARS).collect()
    } else {
        out
    }
}

/// Drop bold/heading markup and a leading list marker.
fn clean_line(line: &str) -> String {
    let no_markup = line.replace("**", "").replace("__", "");
    let no_heading = no_markup.trim().trim_start_matches('#').trim();
    LIST_MARKER_RE.replace(no_heading, "").trim().to_string()
}

fn strip_overview_label(line: &str) -> String {
    if let Some((label, rest)) = line.split_once(':') {
        let l = label.to_lowercase();
        if label.chars().count() <= 40 && (l.contains("overview") || l.contains("trip")) {
            return rest.trim().to_string();
        }
    }
    line.to_string()
}

fn join_clean_lines(block: &str) -> String {
    block
        .lines()
        .map(clean_line)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
