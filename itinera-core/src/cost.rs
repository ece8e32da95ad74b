//! Deterministic cost estimation.
//!
//! When the text carries no `$N` literal we still want a stable number, so the
//! same itinerary re-parsed (server side, then again in the browser) renders
//! identical costs. The generator is a plain LCG and must stay bit-compatible
//! with stored itineraries: multiplier 9301, increment 49297, modulus 233280.

use crate::activity::ActivityType;

const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

/// Pseudo-random value in `[0, 1)` derived from `seed`.
pub fn pseudo_random(seed: u64) -> f64 {
    let next = (seed % LCG_MODULUS * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
    next as f64 / LCG_MODULUS as f64
}

/// Estimated USD cost for an activity of `kind`.
///
/// `seed` is the activity id when one exists, otherwise the title length.
pub fn estimate_cost(seed: u64, kind: ActivityType) -> f64 {
    let r = pseudo_random(seed);
    match kind {
        ActivityType::Accommodation => 0.0,
        ActivityType::Restaurant => scaled(r, 80.0, 25.0),
        ActivityType::Activity => scaled(r, 60.0, 20.0),
        ActivityType::Transport => scaled(r, 50.0, 15.0),
        ActivityType::Shopping => scaled(r, 100.0, 30.0),
    }
}

/// Same as [`estimate_cost`] for a free-form category label (e.g. a stored
/// row). Labels outside the known set use the generic range.
pub fn estimate_cost_for_label(seed: u64, label: &str) -> f64 {
    match label.parse::<ActivityType>() {
        Ok(kind) => estimate_cost(seed, kind),
        Err(_) => scaled(pseudo_random(seed), 40.0, 15.0),
    }
}

fn scaled(r: f64, span: f64, base: f64) -> f64 {
    (r * span).floor() + base
}
