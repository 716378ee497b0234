//! Common types for WebEQ
//!
//! Parameter ranges, the closed set of filter shapes and the discrete
//! low/high-pass slopes shared by every other module.

use std::fmt;
use std::str::FromStr;

use crate::error::FieldError;

/// Modeling sample rate for the frequency-response evaluation.
/// No audio runs at this rate; it only fixes the digital frequency axis.
pub const SAMPLE_RATE: f64 = 48000.0;

/// Lowest editable frequency (Hz)
pub const FREQ_MIN: f64 = 20.0;

/// Highest editable frequency (Hz)
pub const FREQ_MAX: f64 = 20000.0;

/// Lowest gain (dB)
pub const GAIN_MIN_DB: f64 = -15.0;

/// Highest gain (dB)
pub const GAIN_MAX_DB: f64 = 15.0;

/// Gain span of the plot (dB)
pub const GAIN_RANGE_DB: f64 = GAIN_MAX_DB - GAIN_MIN_DB;

/// Lower Q bound for every type
pub const Q_MIN: f64 = 0.1;

/// Upper Q bound for everything except notch
pub const Q_MAX: f64 = 10.0;

/// Upper Q bound for notch filters
pub const NOTCH_Q_MAX: f64 = 100.0;

/// Q used for every low/high-pass section regardless of the stored value
pub const PASS_Q: f64 = 0.707;

/// Parametric filter shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    Peak,
    LowShelf,
    HighShelf,
    Notch,
    LowPass,
    HighPass,
}

impl FilterType {
    /// All types in selector order
    pub const ALL: [FilterType; 6] = [
        FilterType::Peak,
        FilterType::LowShelf,
        FilterType::HighShelf,
        FilterType::Notch,
        FilterType::LowPass,
        FilterType::HighPass,
    ];

    /// Peak and shelves: the only types whose gain is meaningful
    pub fn is_gain_bearing(self) -> bool {
        matches!(
            self,
            FilterType::Peak | FilterType::LowShelf | FilterType::HighShelf
        )
    }

    /// Low/high-pass: slope instead of gain, Q fixed internally
    pub fn is_pass(self) -> bool {
        matches!(self, FilterType::LowPass | FilterType::HighPass)
    }

    /// Types whose Q survives a type change among each other
    pub fn keeps_q_across_change(self) -> bool {
        !self.is_pass()
    }

    /// Valid (min, max) Q for this type
    pub fn q_bounds(self) -> (f64, f64) {
        match self {
            FilterType::Notch => (Q_MIN, NOTCH_Q_MAX),
            _ => (Q_MIN, Q_MAX),
        }
    }

    /// Code used in the text export
    pub fn export_code(self) -> &'static str {
        match self {
            FilterType::Peak => "PK",
            FilterType::LowShelf => "LS",
            FilterType::HighShelf => "HS",
            FilterType::Notch => "NOTCH",
            FilterType::LowPass => "LP",
            FilterType::HighPass => "HP",
        }
    }

    /// Short code shown on node cards
    pub fn card_code(self) -> &'static str {
        match self {
            FilterType::Notch => "NT",
            other => other.export_code(),
        }
    }

    /// Selector value (`"PEAK"`, `"LOW_SHELF"`, ...)
    pub fn key(self) -> &'static str {
        match self {
            FilterType::Peak => "PEAK",
            FilterType::LowShelf => "LOW_SHELF",
            FilterType::HighShelf => "HIGH_SHELF",
            FilterType::Notch => "NOTCH",
            FilterType::LowPass => "LOW_PASS",
            FilterType::HighPass => "HIGH_PASS",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterType::Peak => write!(f, "Peak"),
            FilterType::LowShelf => write!(f, "Low Shelf"),
            FilterType::HighShelf => write!(f, "High Shelf"),
            FilterType::Notch => write!(f, "Notch"),
            FilterType::LowPass => write!(f, "Low Pass"),
            FilterType::HighPass => write!(f, "High Pass"),
        }
    }
}

impl FromStr for FilterType {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        FilterType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(key) || t.export_code().eq_ignore_ascii_case(key))
            .ok_or_else(|| FieldError::UnknownFilterType(key.to_string()))
    }
}

/// Low/high-pass slope in dB/octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Slope {
    Db6,
    #[default]
    Db12,
    Db18,
    Db24,
}

impl Slope {
    pub const ALL: [Slope; 4] = [Slope::Db6, Slope::Db12, Slope::Db18, Slope::Db24];

    /// Slope in dB/octave
    pub fn db_per_octave(self) -> u32 {
        match self {
            Slope::Db6 => 6,
            Slope::Db12 => 12,
            Slope::Db18 => 18,
            Slope::Db24 => 24,
        }
    }

    /// Filter order (slope / 6)
    pub fn order(self) -> u32 {
        self.db_per_octave() / 6
    }

    /// Exact match on one of the four supported values
    pub fn from_db(db: u32) -> Option<Self> {
        Slope::ALL.into_iter().find(|s| s.db_per_octave() == db)
    }

    /// Closest supported slope to an arbitrary value
    pub fn nearest(db: f64) -> Self {
        let mut best = Slope::Db12;
        let mut best_dist = f64::INFINITY;
        for slope in Slope::ALL {
            let dist = (slope.db_per_octave() as f64 - db).abs();
            if dist < best_dist {
                best = slope;
                best_dist = dist;
            }
        }
        best
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}dB/oct", self.db_per_octave())
    }
}

/// Which cascade the response curve shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    PeqView,
    GeqView,
}
