use anyhow::{Context, Result};
use itinera_core::{Activity, ParseResult};
use serde::Serialize;
use std::fmt::Write as _;

use crate::config::OutputFormat;

/// Flat CSV row; optional fields become empty cells.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: Option<u64>,
    day: u32,
    title: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    time: &'a str,
    location: &'a str,
    cost: f64,
    priority: &'static str,
    description: &'a str,
    tips: &'a str,
}

impl<'a> From<&'a Activity> for CsvRow<'a> {
    fn from(a: &'a Activity) -> Self {
        Self {
            id: a.id,
            day: a.day,
            title: &a.title,
            kind: a.kind.as_str(),
            time: &a.time,
            location: &a.location,
            cost: a.cost,
            priority: a.priority.as_str(),
            description: &a.description,
            tips: a.tips.as_deref().unwrap_or(""),
        }
    }
}

pub fn render(result: &ParseResult, format: OutputFormat, pretty: bool) -> Result<String> {
    match format {
        OutputFormat::Json => to_json(result, pretty),
        OutputFormat::Csv => render_csv(result),
        OutputFormat::Text => Ok(render_text(result)),
    }
}

pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let s = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    s.context("serialize json")
}

fn render_csv(result: &ParseResult) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for a in &result.activities {
        wtr.serialize(CsvRow::from(a)).context("write csv row")?;
    }
    let bytes = wtr.into_inner().context("flush csv")?;
    String::from_utf8(bytes).context("csv output is not utf-8")
}

fn render_text(result: &ParseResult) -> String {
    let mut out = String::new();
    if !result.overview.is_empty() {
        let _ = writeln!(out, "{}\n", result.overview);
    }

    for (day, cost) in result.cost_by_day() {
        let _ = writeln!(out, "Day {} (est. ${:.2})", day, cost);
        for a in result.activities_on(day) {
            let _ = writeln!(
                out,
                "  {:<20} {} [{}, {}] @ {} ${:.2}",
                a.time, a.title, a.kind, a.priority, a.location, a.cost
            );
            if let Some(tip) = &a.tips {
                let _ = writeln!(out, "  {:<20} tip: {}", "", tip);
            }
        }
    }

    let _ = writeln!(
        out,
        "\n{} activities, total est. ${:.2}",
        result.activities.len(),
        result.total_cost()
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use itinera_ingest::parse_itinerary;

    fn sample() -> ParseResult {
        let mut r = parse_itinerary(
            "Day 1\n- Hotel Check-in at Grand Hotel\nDay 2\n- City Walking Tour ($25), tip: wear sneakers",
            "Rome",
            2,
        );
        itinera_core::assign_ids(&mut r.activities, 1);
        r
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let csv = render(&sample(), OutputFormat::Csv, false).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "id,day,title,type,time,location,cost,priority,description,tips"
        );
        assert!(lines[1].starts_with("1,1,Hotel Check-in at Grand Hotel,accommodation,"));
        assert!(lines[2].contains("wear sneakers"));
    }

    #[test]
    fn test_text_summary() {
        let text = render(&sample(), OutputFormat::Text, false).unwrap();
        assert!(text.contains("Day 1 (est. $0.00)"));
        assert!(text.contains("Day 2 (est. $25.00)"));
        assert!(text.contains("tip: wear sneakers"));
        assert!(text.contains("2 activities, total est. $25.00"));
    }

    #[test]
    fn test_json_compact() {
        let json = render(&sample(), OutputFormat::Json, false).unwrap();
        assert!(!json.contains('\n'));
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["activities"][1]["cost"], 25.0);
        assert_eq!(v["activities"][0]["id"], 1);
    }
}
