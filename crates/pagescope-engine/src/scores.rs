//! # Simulated Audit Scores
//!
//! The panel's score gauges are **placeholders**: each value is drawn from a
//! plausible-looking range with no underlying measurement. They exist so the
//! gauges render something indicative; nothing should branch on them. The
//! [`ScoreEstimate`] type documents the same caveat on the data side.

use rand::Rng;

use pagescope_core::audit::ScoreEstimate;

/// Draw a fresh set of placeholder scores.
///
/// Non-deterministic: consecutive calls return different values.
pub fn simulate() -> ScoreEstimate {
    let mut rng = rand::thread_rng();
    ScoreEstimate {
        performance: rng.gen_range(70..=99),
        accessibility: rng.gen_range(75..=98),
        best_practices: rng.gen_range(80..=100),
        seo: rng.gen_range(72..=98),
        pwa: rng.gen_range(30..=80),
    }
}
