//! PEQ filter node
//!
//! Every numeric write goes through a setter that clamps and rounds, so a
//! stored node is always inside its type's bounds.

use crate::error::FieldError;
use crate::types::{
    FilterType, Slope, FREQ_MAX, FREQ_MIN, GAIN_MAX_DB, GAIN_MIN_DB, PASS_Q,
};

/// Node identifier, unique within a bank
pub type NodeId = u32;

/// Per-type starting values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDefaults {
    pub freq: f64,
    pub gain: f64,
    pub q: f64,
    pub slope: Slope,
}

/// Default parameters for a freshly created or re-typed node
pub fn filter_defaults(filter_type: FilterType) -> FilterDefaults {
    let (freq, q) = match filter_type {
        FilterType::Peak => (1000.0, 1.0),
        FilterType::LowShelf => (100.0, 0.707),
        FilterType::HighShelf => (8000.0, 0.707),
        FilterType::Notch => (500.0, 10.0),
        FilterType::LowPass => (1000.0, 0.707),
        FilterType::HighPass => (100.0, 0.707),
    };
    FilterDefaults {
        freq,
        gain: 0.0,
        q,
        slope: Slope::Db12,
    }
}

/// Round to a fixed number of decimal places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10.0_f64.powi(decimals);
    (value * scale).round() / scale
}

/// Clamp to [20, 20000] Hz and round to whole Hz
pub fn clamp_freq(freq: f64) -> f64 {
    freq.round().clamp(FREQ_MIN, FREQ_MAX)
}

/// Clamp to ±15 dB with one decimal
pub fn clamp_gain(gain: f64) -> f64 {
    round_to(gain.clamp(GAIN_MIN_DB, GAIN_MAX_DB), 1)
}

/// Clamp to the type's Q bounds with three decimals
pub fn clamp_q(filter_type: FilterType, q: f64) -> f64 {
    let (min, max) = filter_type.q_bounds();
    round_to(q.clamp(min, max), 3)
}

/// Editable numeric fields of the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeField {
    Freq,
    Gain,
    Q,
    Slope,
}

impl NodeField {
    /// Whether the detail view shows this field for a type
    pub fn applies_to(self, filter_type: FilterType) -> bool {
        match self {
            NodeField::Freq => true,
            NodeField::Gain => filter_type.is_gain_bearing(),
            NodeField::Q => !filter_type.is_pass(),
            NodeField::Slope => filter_type.is_pass(),
        }
    }

    /// Fields shown for a type, in display order
    pub fn for_type(filter_type: FilterType) -> Vec<NodeField> {
        [NodeField::Freq, NodeField::Gain, NodeField::Q, NodeField::Slope]
            .into_iter()
            .filter(|field| field.applies_to(filter_type))
            .collect()
    }

    pub fn key(self) -> &'static str {
        match self {
            NodeField::Freq => "freq",
            NodeField::Gain => "gain",
            NodeField::Q => "qValue",
            NodeField::Slope => "slope",
        }
    }
}

/// Optional overrides for [`FilterBank::add_peq`](super::FilterBank::add_peq)
///
/// Anything left `None` comes from the type defaults; a missing frequency is
/// chosen automatically away from existing nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NodeParams {
    pub filter_type: Option<FilterType>,
    pub freq: Option<f64>,
    pub gain: Option<f64>,
    pub q: Option<f64>,
    pub slope: Option<Slope>,
}

impl NodeParams {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type: Some(filter_type),
            ..Default::default()
        }
    }

    pub fn with_freq(mut self, freq: f64) -> Self {
        self.freq = Some(freq);
        self
    }

    pub fn with_gain(mut self, gain: f64) -> Self {
        self.gain = Some(gain);
        self
    }

    pub fn with_q(mut self, q: f64) -> Self {
        self.q = Some(q);
        self
    }

    pub fn with_slope(mut self, slope: Slope) -> Self {
        self.slope = Some(slope);
        self
    }
}

/// One parametric filter
#[derive(Debug, Clone, PartialEq)]
pub struct FilterNode {
    id: NodeId,
    filter_type: FilterType,
    freq: f64,
    gain: f64,
    q: f64,
    slope: Slope,
    enabled: bool,
    temporary: bool,
}

impl FilterNode {
    pub(crate) fn new(id: NodeId, filter_type: FilterType, freq: f64, params: &NodeParams) -> Self {
        let defaults = filter_defaults(filter_type);
        let mut node = Self {
            id,
            filter_type,
            freq: defaults.freq,
            gain: defaults.gain,
            q: defaults.q,
            slope: params.slope.unwrap_or(defaults.slope),
            enabled: true,
            temporary: false,
        };
        node.set_freq(freq);
        node.set_gain(params.gain.unwrap_or(defaults.gain));
        node.set_q(params.q.unwrap_or(defaults.q));
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn filter_type(&self) -> FilterType {
        self.filter_type
    }

    pub fn freq(&self) -> f64 {
        self.freq
    }

    /// Stored gain; ignored by the evaluator for notch and pass types
    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Stored Q
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Q the evaluator actually uses (fixed for low/high-pass)
    pub fn effective_q(&self) -> f64 {
        if self.filter_type.is_pass() {
            PASS_Q
        } else {
            self.q
        }
    }

    pub fn slope(&self) -> Slope {
        self.slope
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Staged for creation, invisible to curve and export
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    pub(crate) fn set_temporary(&mut self, temporary: bool) {
        self.temporary = temporary;
    }

    // Non-finite input keeps the prior value

    pub fn set_freq(&mut self, freq: f64) {
        if freq.is_finite() {
            self.freq = clamp_freq(freq);
        }
    }

    pub fn set_gain(&mut self, gain: f64) {
        if gain.is_finite() {
            self.gain = clamp_gain(gain);
        }
    }

    pub fn set_q(&mut self, q: f64) {
        if q.is_finite() {
            self.q = clamp_q(self.filter_type, q);
        }
    }

    pub fn set_slope(&mut self, slope: Slope) {
        self.slope = slope;
    }

    /// Switch type, resetting parameters to the new type's defaults
    ///
    /// Q is carried over only when both the old and the new type use it
    /// (peak, shelves, notch); it is re-clamped to the new bounds.
    pub fn change_type(&mut self, new_type: FilterType) {
        let old_type = self.filter_type;
        let old_q = self.q;
        let defaults = filter_defaults(new_type);

        self.filter_type = new_type;
        self.freq = defaults.freq;
        self.gain = defaults.gain;
        self.q = defaults.q;
        self.slope = defaults.slope;

        if old_type.keeps_q_across_change() && new_type.keeps_q_across_change() {
            self.set_q(old_q);
        }
    }

    /// Apply raw text from a detail-view field
    ///
    /// Leaves the node untouched on error.
    pub fn apply_field(&mut self, field: NodeField, text: &str) -> Result<(), FieldError> {
        if !field.applies_to(self.filter_type) {
            return Err(FieldError::NotApplicable {
                field: field.key(),
                filter_type: self.filter_type.to_string(),
            });
        }

        let value = parse_number(text)?;
        match field {
            NodeField::Freq => self.set_freq(value),
            NodeField::Gain => self.set_gain(value),
            NodeField::Q => self.set_q(value),
            NodeField::Slope => self.set_slope(Slope::nearest(value)),
        }
        Ok(())
    }

    /// One-line card text: `#1 / PK / 1500Hz / +3.0dB / Q: 2.000`
    pub fn summary(&self) -> String {
        let gain_or_order = match self.filter_type {
            FilterType::Notch => "N/A".to_string(),
            FilterType::LowPass | FilterType::HighPass => self.slope.to_string(),
            _ => format!("{:+.1}dB", self.gain),
        };
        format!(
            "#{} / {} / {:.0}Hz / {} / Q: {:.3}",
            self.id + 1,
            self.filter_type.card_code(),
            self.freq,
            gain_or_order,
            self.q
        )
    }
}

/// Parse a finite number from field text
pub fn parse_number(text: &str) -> Result<f64, FieldError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| FieldError::NotANumber(text.to_string()))
}
