//! Interactive editing controller
//!
//! Screen mappings shared by drag handling and markers, the editing state
//! machine and the messages that drive it.
//!
//! # Plot layout
//!
//! ```text
//!  +15 dB ┌──────────────────────────────────────────────┐ y = 0
//!         │            ②                                 │
//!    0 dB │──────①───────────────────────③───────────────│
//!         │                                              │
//!  -15 dB └──────────────────────────────────────────────┘ y = height
//!        20Hz           (log frequency axis)          20kHz
//!        x = 0                                    x = width + 1
//! ```

mod drag;
mod message;
mod state;

pub use drag::{
    drag_target, snap_freq, snap_gain, wheel_adjust_q, wheel_q_step, DragTarget,
    GAIN_SNAP_DB, LOG_SNAP_STEPS,
};
pub use message::EditorMessage;
pub use state::{DetailView, EditorMode};

use crate::types::{FREQ_MAX, FREQ_MIN, GAIN_MAX_DB, GAIN_MIN_DB, GAIN_RANGE_DB};

/// Convert frequency to position (0.0-1.0) on log scale
pub fn freq_to_position(freq: f64) -> f64 {
    let log_min = FREQ_MIN.log10();
    let log_max = FREQ_MAX.log10();
    let log_freq = freq.clamp(FREQ_MIN, FREQ_MAX).log10();
    (log_freq - log_min) / (log_max - log_min)
}

/// Convert position (0.0-1.0) to frequency on log scale
pub fn position_to_freq(pos: f64) -> f64 {
    let log_min = FREQ_MIN.log10();
    let log_max = FREQ_MAX.log10();
    let log_freq = log_min + pos.clamp(0.0, 1.0) * (log_max - log_min);
    10.0_f64.powf(log_freq)
}

/// Convert gain to vertical position (0.0 at +15 dB, 1.0 at -15 dB)
///
/// Not clamped: a curve dipping below -15 dB maps past 1.0.
pub fn gain_to_position(gain_db: f64) -> f64 {
    (GAIN_MAX_DB - gain_db) / GAIN_RANGE_DB
}

/// Convert vertical position to gain, clamped to ±15 dB
pub fn position_to_gain(pos: f64) -> f64 {
    (GAIN_MAX_DB - pos.clamp(0.0, 1.0) * GAIN_RANGE_DB).clamp(GAIN_MIN_DB, GAIN_MAX_DB)
}

/// Format frequency for display
pub fn format_freq(freq: f64) -> String {
    if freq >= 1000.0 {
        format!("{:.1}kHz", freq / 1000.0)
    } else {
        format!("{:.0}Hz", freq)
    }
}

/// Pixel size of the response plot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub width: f64,
    pub height: f64,
}

impl Default for PlotGeometry {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 380.0,
        }
    }
}

impl PlotGeometry {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Horizontal extent; the canvas is one pixel wider than its client width
    pub fn x_span(&self) -> f64 {
        self.width + 1.0
    }

    pub fn freq_to_x(&self, freq: f64) -> f64 {
        self.x_span() * freq_to_position(freq)
    }

    /// Pointer x to frequency, clamping the pointer to the plot
    pub fn x_to_freq(&self, x: f64) -> f64 {
        let span = self.x_span();
        if span <= 0.0 {
            return FREQ_MIN;
        }
        position_to_freq(x.clamp(0.0, span) / span)
    }

    pub fn gain_to_y(&self, gain_db: f64) -> f64 {
        self.height * gain_to_position(gain_db)
    }

    /// Pointer y to gain, clamping the pointer to the plot
    pub fn y_to_gain(&self, y: f64) -> f64 {
        if self.height <= 0.0 {
            return 0.0;
        }
        position_to_gain(y.clamp(0.0, self.height) / self.height)
    }
}
