//! Automatic frequency placement for new nodes
//!
//! Candidates are drawn uniformly on a log axis over [20, 20000] Hz and
//! rejected while they sit within 10% of an existing node's frequency.

use rand::Rng;

use crate::types::{FREQ_MAX, FREQ_MIN};

/// Maximum number of candidates drawn before giving up on spacing
pub const MAX_PLACEMENT_ATTEMPTS: usize = 100;

/// Relative distance under which two frequencies count as overlapping
pub const MIN_RELATIVE_SPACING: f64 = 0.1;

fn overlaps(candidate: f64, existing: &[f64]) -> bool {
    existing
        .iter()
        .any(|&f| (f - candidate).abs() / candidate < MIN_RELATIVE_SPACING)
}

/// Pick a whole-Hz frequency away from `existing`
///
/// After [`MAX_PLACEMENT_ATTEMPTS`] overlapping draws the last candidate is
/// kept anyway; the result is always inside the editable range.
pub fn pick_free_frequency<R: Rng + ?Sized>(rng: &mut R, existing: &[f64]) -> f64 {
    let log_min = FREQ_MIN.log10();
    let log_max = FREQ_MAX.log10();

    let mut candidate = FREQ_MIN;
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let log_f = log_min + rng.random::<f64>() * (log_max - log_min);
        candidate = 10.0_f64.powf(log_f).round();
        if !overlaps(candidate, existing) {
            break;
        }
    }
    candidate.clamp(FREQ_MIN, FREQ_MAX)
}
