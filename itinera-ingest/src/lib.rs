//! itinera-ingest: itinerary text parsing and document import.

pub mod gdoc;
pub mod itinerary;

pub use gdoc::{extract_document, import_document, ImportedDocument};
pub use itinerary::{extract_overview, parse_itinerary, parse_or_sample, segment_days, DaySection};
