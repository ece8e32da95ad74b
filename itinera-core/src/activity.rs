//! Activity model produced by the itinerary parser.
//!
//! These are transient records: a `ParseResult` is built once per raw text,
//! handed to the caller (UI state, database rows) and dropped. The field names
//! match the JSON shape the frontend and persistence mapping already consume.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TripError;

/// Category of an activity, inferred from title keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Accommodation,
    Restaurant,
    Transport,
    Shopping,
    Activity,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Accommodation => "accommodation",
            ActivityType::Restaurant => "restaurant",
            ActivityType::Transport => "transport",
            ActivityType::Shopping => "shopping",
            ActivityType::Activity => "activity",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = TripError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "accommodation" => Ok(ActivityType::Accommodation),
            "restaurant" => Ok(ActivityType::Restaurant),
            "transport" => Ok(ActivityType::Transport),
            "shopping" => Ok(ActivityType::Shopping),
            "activity" => Ok(ActivityType::Activity),
            other => Err(TripError::UnknownActivityType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One parsed itinerary entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Assigned by the caller after parsing; the parser never sets it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// 1-based trip day.
    pub day: u32,
    pub title: String,

    #[serde(rename = "type")]
    pub kind: ActivityType,

    /// Display window, e.g. "9:00 AM - 12:00 PM".
    pub time: String,
    pub location: String,

    /// USD, never negative.
    pub cost: f64,
    pub priority: Priority,
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<String>,
}

/// Output of one parse: trip overview plus day-ordered activities.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ParseResult {
    pub overview: String,
    pub activities: Vec<Activity>,
}

impl ParseResult {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }

    /// Distinct days that have at least one activity, ascending.
    pub fn days(&self) -> Vec<u32> {
        let mut days: Vec<u32> = self.activities.iter().map(|a| a.day).collect();
        days.sort_unstable();
        days.dedup();
        days
    }

    pub fn activities_on(&self, day: u32) -> impl Iterator<Item = &Activity> {
        self.activities.iter().filter(move |a| a.day == day)
    }

    pub fn total_cost(&self) -> f64 {
        self.activities.iter().map(|a| a.cost).sum()
    }

    /// (day, summed cost) pairs in day order.
    pub fn cost_by_day(&self) -> Vec<(u32, f64)> {
        self.days()
            .into_iter()
            .map(|d| (d, self.activities_on(d).map(|a| a.cost).sum()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(day: u32, title: &str, cost: f64) -> Activity {
        Activity {
            id: None,
            day,
            title: title.to_string(),
            kind: ActivityType::Activity,
            time: "10:00 AM - 1:00 PM".to_string(),
            location: "Lisbon".to_string(),
            cost,
            priority: Priority::Medium,
            description: title.to_string(),
            tips: None,
        }
    }

    #[test]
    fn test_activity_json_shape() {
        let a = activity(1, "Tram 28", 3.0);
        let v = serde_json::to_value(&a).unwrap();
        assert_eq!(v["type"], "activity");
        assert_eq!(v["priority"], "medium");
        assert_eq!(v["day"], 1);
        assert!(v.get("id").is_none());
        assert!(v.get("tips").is_none());
    }

    #[test]
    fn test_activity_type_from_str() {
        assert_eq!("Restaurant".parse::<ActivityType>().unwrap(), ActivityType::Restaurant);
        assert!("museum".parse::<ActivityType>().is_err());
    }

    #[test]
    fn test_cost_by_day() {
        let result = ParseResult {
            overview: String::new(),
            activities: vec![
                activity(1, "A", 10.0),
                activity(2, "B", 5.0),
                activity(1, "C", 2.5),
            ],
        };
        assert_eq!(result.days(), vec![1, 2]);
        assert_eq!(result.cost_by_day(), vec![(1, 12.5), (2, 5.0)]);
        assert_eq!(result.total_cost(), 17.5);
    }
}
