use crate::models::Pest;
use rand::seq::SliceRandom;
use rand::Rng;
use std::time::Duration;

/// How long a detection appears to take before the result is shown.
pub const ANALYSIS_DELAY: Duration = Duration::from_secs(2);

/// Simulated image analysis: no image is inspected, a library pest is
/// picked at random. `None` only for an empty library.
pub fn simulate_detection<'a, R: Rng + ?Sized>(library: &'a [Pest], rng: &mut R) -> Option<&'a Pest> {
    library.choose(rng)
}

pub fn detect(library: &[Pest]) -> Option<&Pest> {
    simulate_detection(library, &mut rand::thread_rng())
}
