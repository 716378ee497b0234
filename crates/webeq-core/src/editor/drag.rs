//! Pointer drag and wheel math
//!
//! Pure functions; the session applies the results to the node under edit.

use super::PlotGeometry;
use crate::bank::clamp_q;
use crate::types::{FilterType, FREQ_MAX, FREQ_MIN, GAIN_MAX_DB, GAIN_MIN_DB};

/// Log-even frequency steps across the range in precision mode
pub const LOG_SNAP_STEPS: u32 = 200;

/// Gain snap in precision mode (dB)
pub const GAIN_SNAP_DB: f64 = 0.5;

/// Snap a frequency to the nearest of [`LOG_SNAP_STEPS`] log steps
pub fn snap_freq(freq: f64) -> f64 {
    let log_min = FREQ_MIN.log10();
    let log_step = (FREQ_MAX.log10() - log_min) / LOG_SNAP_STEPS as f64;
    let steps = ((freq.log10() - log_min) / log_step).round();
    10.0_f64.powf(log_min + steps * log_step)
}

/// Snap a gain to the nearest [`GAIN_SNAP_DB`]
pub fn snap_gain(gain_db: f64) -> f64 {
    (gain_db / GAIN_SNAP_DB).round() * GAIN_SNAP_DB
}

/// Where a drag pointer puts the node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragTarget {
    pub freq: f64,
    pub gain_db: f64,
}

/// Map a pointer position on the plot to a frequency and gain
///
/// The pointer is clamped to the plot first. With `precision` both values
/// are snapped. Whether the gain is applied is up to the caller.
pub fn drag_target(plot: &PlotGeometry, x: f64, y: f64, precision: bool) -> DragTarget {
    let mut freq = plot.x_to_freq(x).clamp(FREQ_MIN, FREQ_MAX);
    let mut gain_db = plot.y_to_gain(y);

    if precision {
        freq = snap_freq(freq);
        gain_db = snap_gain(gain_db);
    }

    DragTarget {
        freq,
        gain_db: gain_db.clamp(GAIN_MIN_DB, GAIN_MAX_DB),
    }
}

/// Q change per wheel notch
pub fn wheel_q_step(filter_type: FilterType, precision: bool) -> f64 {
    if precision {
        0.05
    } else if filter_type == FilterType::Notch {
        1.0
    } else {
        0.1
    }
}

/// New Q after one wheel notch, or `None` for types with a fixed Q
///
/// Scrolling up (negative `delta_y`) raises Q.
pub fn wheel_adjust_q(filter_type: FilterType, q: f64, delta_y: f64, precision: bool) -> Option<f64> {
    if filter_type.is_pass() {
        return None;
    }
    let step = wheel_q_step(filter_type, precision);
    let delta = if delta_y < 0.0 { step } else { -step };
    Some(clamp_q(filter_type, q + delta))
}
