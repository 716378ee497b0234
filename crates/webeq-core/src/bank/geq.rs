//! Fixed 31-band graphic EQ

use super::node::clamp_gain;

/// ISO one-third-octave center frequencies (Hz)
pub const GEQ_FREQUENCIES: [f64; 31] = [
    20.0, 25.0, 31.5, 40.0, 50.0, 63.0, 80.0, 100.0, 125.0, 160.0, 200.0, 250.0, 315.0, 400.0,
    500.0, 630.0, 800.0, 1000.0, 1250.0, 1600.0, 2000.0, 2500.0, 3150.0, 4000.0, 5000.0, 6300.0,
    8000.0, 10000.0, 12500.0, 16000.0, 20000.0,
];

/// Q shared by every band
pub const GEQ_Q: f64 = 4.31;

/// One graphic EQ band; only the gain is mutable
#[derive(Debug, Clone, PartialEq)]
pub struct GeqBand {
    freq: f64,
    gain: f64,
}

impl GeqBand {
    fn new(freq: f64) -> Self {
        Self { freq, gain: 0.0 }
    }

    /// All 31 bands at 0 dB
    pub fn standard_set() -> Vec<GeqBand> {
        GEQ_FREQUENCIES.iter().map(|&f| GeqBand::new(f)).collect()
    }

    pub fn freq(&self) -> f64 {
        self.freq
    }

    pub fn gain(&self) -> f64 {
        self.gain
    }

    /// Set gain, clamped to ±15 dB with one decimal; non-finite input is ignored
    pub fn set_gain(&mut self, gain: f64) -> bool {
        if !gain.is_finite() {
            return false;
        }
        self.gain = clamp_gain(gain);
        true
    }

    /// Slider label: whole Hz below 1 kHz, otherwise kHz without trailing zeros
    pub fn label(&self) -> String {
        let rounded = self.freq.round();
        if rounded >= 1000.0 {
            let khz = format!("{:.2}", rounded / 1000.0);
            let trimmed = khz.trim_end_matches('0').trim_end_matches('.');
            format!("{}k", trimmed)
        } else {
            format!("{:.0}", rounded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_set() {
        let bands = GeqBand::standard_set();
        assert_eq!(bands.len(), 31);
        assert!(bands.iter().all(|b| b.gain() == 0.0));
        assert!(bands.windows(2).all(|w| w[0].freq() < w[1].freq()));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<String> = GeqBand::standard_set().iter().map(GeqBand::label).collect();
        assert_eq!(labels[0], "20");
        assert_eq!(labels[2], "32");
        assert_eq!(labels[17], "1k");
        assert_eq!(labels[18], "1.25k");
        assert_eq!(labels[19], "1.6k");
        assert_eq!(labels[28], "12.5k");
        assert_eq!(labels[30], "20k");
    }

    #[test]
    fn test_gain_clamped() {
        let mut band = GeqBand::new(1000.0);
        band.set_gain(22.0);
        assert_eq!(band.gain(), 15.0);
        band.set_gain(-3.27);
        assert_eq!(band.gain(), -3.3);
        assert!(!band.set_gain(f64::NAN));
        assert_eq!(band.gain(), -3.3);
    }
}
