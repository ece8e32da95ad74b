//! Response bodies of the two HTTP callers of the parser.
//!
//! The handlers themselves live in the web app; these types pin the JSON
//! field names so any Rust-side producer stays wire compatible.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::activity::ParseResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    pub destination: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub total_days: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travelers: Option<u32>,
}

/// Body returned after an itinerary was generated.
/// `itinerary` is the raw model text; clients parse it themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub success: bool,
    pub itinerary: String,
    pub trip_details: TripDetails,
}

impl GenerateResponse {
    pub fn new(itinerary: impl Into<String>, trip_details: TripDetails) -> Self {
        Self {
            success: true,
            itinerary: itinerary.into(),
            trip_details,
        }
    }
}

/// Body returned after a document was imported and parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub success: bool,
    pub document_title: String,
    pub text_content: String,
    pub itinerary: ParseResult,
}

impl ImportResponse {
    pub fn new(document_title: impl Into<String>, text_content: impl Into<String>, itinerary: ParseResult) -> Self {
        Self {
            success: true,
            document_title: document_title.into(),
            text_content: text_content.into(),
            itinerary,
        }
    }
}
