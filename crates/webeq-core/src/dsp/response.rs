//! Magnitude response of a single section

use std::f64::consts::PI;

use super::biquad::BiquadCoeffs;
use crate::types::SAMPLE_RATE;

/// Floor for the squared denominator magnitude.
/// A section whose poles sit on the unit circle would otherwise divide by 0.
pub const MIN_DENOMINATOR_SQ: f64 = 1e-30;

/// Floor for magnitudes converted to dB (-300 dB)
pub const MIN_MAGNITUDE: f64 = 1e-15;

/// Linear magnitude `|H(e^jω)|` of one section at `freq` Hz
///
/// Numerator and denominator are evaluated in closed form from
/// `cos ω`, `cos 2ω`, `sin ω`, `sin 2ω`. Never negative, never NaN for
/// finite coefficients.
pub fn magnitude_at(freq: f64, coeffs: &BiquadCoeffs) -> f64 {
    let BiquadCoeffs { b0, b1, b2, a1, a2 } = *coeffs;
    let w = 2.0 * PI * freq / SAMPLE_RATE;

    let (sin_w, cos_w) = w.sin_cos();
    let (sin_2w, cos_2w) = (2.0 * w).sin_cos();

    let num_re = b0 + b1 * cos_w + b2 * cos_2w;
    let num_im = -b1 * sin_w - b2 * sin_2w;
    let num_mag_sq = num_re * num_re + num_im * num_im;

    let den_re = 1.0 + a1 * cos_w + a2 * cos_2w;
    let den_im = -a1 * sin_w - a2 * sin_2w;
    let den_mag_sq = (den_re * den_re + den_im * den_im).max(MIN_DENOMINATOR_SQ);

    (num_mag_sq / den_mag_sq).sqrt()
}

/// Convert a linear magnitude to dB, flooring at [`MIN_MAGNITUDE`]
pub fn magnitude_to_db(magnitude: f64) -> f64 {
    20.0 * magnitude.max(MIN_MAGNITUDE).log10()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_unity_everywhere() {
        for f in [20.0, 440.0, 12000.0, 20000.0] {
            assert!((magnitude_at(f, &BiquadCoeffs::IDENTITY) - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_degenerate_denominator_is_finite() {
        // Pole exactly at z = 1: denominator vanishes at DC
        let coeffs = BiquadCoeffs {
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: -1.0,
            a2: 0.0,
        };
        let mag = magnitude_at(0.0, &coeffs);
        assert!(mag.is_finite());
        assert!(mag > 1e10);
    }

    #[test]
    fn test_magnitude_to_db() {
        assert!((magnitude_to_db(1.0)).abs() < 1e-12);
        assert!((magnitude_to_db(10.0) - 20.0).abs() < 1e-12);
        assert!((magnitude_to_db(0.0) + 300.0).abs() < 1e-9);
    }
}
