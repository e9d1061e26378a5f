//! Choosing which visible object to follow next.

use crate::{
    geodesy::angular_gap,
    model::{OptimizeFor, Sighting},
};

/// Degrees knocked off a major body's score when major bodies are prioritized.
pub const MAJOR_BODY_BONUS_DEG: f64 = 30.0;

/// Degrees knocked off an object at the zenith under "least changes".
/// Scales linearly with altitude.
pub const ALTITUDE_BONUS_DEG: f64 = 20.0;

/// Lowest altitude a "comfortable" reference may have.
pub const COMFORTABLE_MIN_ALTITUDE_DEG: f64 = 20.0;

/// How candidates are scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectionPolicy {
    pub optimize_for: OptimizeFor,

    /// Give planets, sun, moon, and navigational stars a head start.
    pub prioritize_major: bool,
}

impl SelectionPolicy {
    /// Score of a candidate against the desired bearing. Lower is better.
    ///
    /// `None` when the candidate is ineligible: no azimuth, or too low for a
    /// comfortable route.
    pub fn score(&self, sighting: &Sighting, target_bearing: f64) -> Option<f64> {
        let azimuth = sighting.azimuth?;
        let gap = angular_gap(azimuth, target_bearing);

        match self.optimize_for {
            OptimizeFor::Shortest => Some(self.major_bonus(sighting, gap)),
            OptimizeFor::LeastChanges => {
                let altitude = sighting.altitude.unwrap_or(0.0);
                Some((gap - altitude / 90.0 * ALTITUDE_BONUS_DEG).max(0.0))
            }
            OptimizeFor::Comfortable => {
                let altitude = sighting.altitude?;
                if altitude < COMFORTABLE_MIN_ALTITUDE_DEG {
                    return None;
                }
                Some(self.major_bonus(sighting, gap))
            }
        }
    }

    fn major_bonus(&self, sighting: &Sighting, gap: f64) -> f64 {
        if self.prioritize_major && sighting.object.is_major() {
            (gap - MAJOR_BODY_BONUS_DEG).max(0.0)
        } else {
            gap
        }
    }
}

/// The best-scoring candidate for `target_bearing`.
///
/// Ties go to the earliest candidate, so the provider's ordering decides.
/// `None` when no candidate is eligible.
pub fn select_reference<'a>(
    target_bearing: f64,
    candidates: &'a [Sighting],
    policy: SelectionPolicy,
) -> Option<&'a Sighting> {
    let mut best: Option<(&Sighting, f64)> = None;
    for candidate in candidates {
        let Some(score) = policy.score(candidate, target_bearing) else {
            continue;
        };
        if best.is_none_or(|(_, best_score)| score < best_score) {
            best = Some((candidate, score));
        }
    }
    best.map(|(sighting, _)| sighting)
}
