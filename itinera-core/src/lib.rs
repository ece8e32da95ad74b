//! itinera-core: itinerary data model, field heuristics and trip helpers

pub mod activity;
pub mod cost;
pub mod envelope;
pub mod error;
pub mod heuristics;
pub mod trip;

pub use activity::{Activity, ActivityType, ParseResult, Priority};
pub use cost::{estimate_cost, estimate_cost_for_label, pseudo_random};
pub use envelope::{GenerateResponse, ImportResponse, TripDetails};
pub use error::{Result, TripError};
pub use heuristics::{build_activity, infer_type, DEFAULT_DESTINATION};
pub use trip::{assign_ids, dedupe_activities, require_days, sample_itinerary, trip_days};
