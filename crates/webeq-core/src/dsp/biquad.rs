//! Biquad coefficient calculation using the RBJ Audio EQ Cookbook
//!
//! Coefficients are returned with `a0` divided out, in the standard sign
//! convention (`y = b0·x + b1·x1 + b2·x2 - a1·y1 - a2·y2`).
//!
//! Odd-order low/high-pass slopes need one first-order section. Those use the
//! bilinear form with `K = tan(ω/2)`, which keeps the pole inside the unit
//! circle; they are always returned with `b2 = a2 = 0`.

use std::f64::consts::PI;

use crate::types::{FilterType, SAMPLE_RATE};

/// Normalized biquad coefficients (`a0 == 1`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Pass-through section
    pub const IDENTITY: BiquadCoeffs = BiquadCoeffs {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Divide every coefficient by `a0`
    fn normalized(b0: f64, b1: f64, b2: f64, a0: f64, a1: f64, a2: f64) -> Self {
        let inv_a0 = 1.0 / a0;
        Self {
            b0: b0 * inv_a0,
            b1: b1 * inv_a0,
            b2: b2 * inv_a0,
            a1: a1 * inv_a0,
            a2: a2 * inv_a0,
        }
    }
}

impl Default for BiquadCoeffs {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One realizable section: a user-facing shape or an auxiliary first-order stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Peak,
    LowShelf,
    HighShelf,
    Notch,
    LowPass,
    HighPass,
    /// 6 dB/oct low-pass, only used inside odd-order cascades
    LowPassFirstOrder,
    /// 6 dB/oct high-pass, only used inside odd-order cascades
    HighPassFirstOrder,
}

impl SectionKind {
    /// First-order companion of a pass type (`None` for everything else)
    pub fn first_order_of(filter_type: FilterType) -> Option<Self> {
        match filter_type {
            FilterType::LowPass => Some(SectionKind::LowPassFirstOrder),
            FilterType::HighPass => Some(SectionKind::HighPassFirstOrder),
            _ => None,
        }
    }

    pub fn is_first_order(self) -> bool {
        matches!(
            self,
            SectionKind::LowPassFirstOrder | SectionKind::HighPassFirstOrder
        )
    }
}

impl From<FilterType> for SectionKind {
    fn from(filter_type: FilterType) -> Self {
        match filter_type {
            FilterType::Peak => SectionKind::Peak,
            FilterType::LowShelf => SectionKind::LowShelf,
            FilterType::HighShelf => SectionKind::HighShelf,
            FilterType::Notch => SectionKind::Notch,
            FilterType::LowPass => SectionKind::LowPass,
            FilterType::HighPass => SectionKind::HighPass,
        }
    }
}

/// Calculate normalized coefficients for one section
///
/// # Parameters
///
/// - `kind` -- section shape
/// - `freq` -- center or corner frequency in Hz
/// - `gain_db` -- gain in dB (only used by peak and shelves)
/// - `q` -- quality factor (ignored by first-order sections)
///
/// Returns [`BiquadCoeffs::IDENTITY`] when `freq <= 0` or `q <= 0`.
pub fn calc_coeffs(kind: SectionKind, freq: f64, gain_db: f64, q: f64) -> BiquadCoeffs {
    if freq <= 0.0 || q <= 0.0 {
        return BiquadCoeffs::IDENTITY;
    }

    let omega = 2.0 * PI * freq / SAMPLE_RATE;
    let cos_w = omega.cos();
    let alpha = omega.sin() / (2.0 * q);
    let a_lin = 10.0_f64.powf(gain_db / 40.0);

    match kind {
        SectionKind::Peak => BiquadCoeffs::normalized(
            1.0 + alpha * a_lin,
            -2.0 * cos_w,
            1.0 - alpha * a_lin,
            1.0 + alpha / a_lin,
            -2.0 * cos_w,
            1.0 - alpha / a_lin,
        ),

        SectionKind::LowShelf => {
            let two_sqrt_a_alpha = 2.0 * a_lin.sqrt() * alpha;
            let a_plus_1 = a_lin + 1.0;
            let a_minus_1 = a_lin - 1.0;
            BiquadCoeffs::normalized(
                a_lin * (a_plus_1 - a_minus_1 * cos_w + two_sqrt_a_alpha),
                2.0 * a_lin * (a_minus_1 - a_plus_1 * cos_w),
                a_lin * (a_plus_1 - a_minus_1 * cos_w - two_sqrt_a_alpha),
                a_plus_1 + a_minus_1 * cos_w + two_sqrt_a_alpha,
                -2.0 * (a_minus_1 + a_plus_1 * cos_w),
                a_plus_1 + a_minus_1 * cos_w - two_sqrt_a_alpha,
            )
        }

        SectionKind::HighShelf => {
            let two_sqrt_a_alpha = 2.0 * a_lin.sqrt() * alpha;
            let a_plus_1 = a_lin + 1.0;
            let a_minus_1 = a_lin - 1.0;
            BiquadCoeffs::normalized(
                a_lin * (a_plus_1 + a_minus_1 * cos_w + two_sqrt_a_alpha),
                -2.0 * a_lin * (a_minus_1 + a_plus_1 * cos_w),
                a_lin * (a_plus_1 + a_minus_1 * cos_w - two_sqrt_a_alpha),
                a_plus_1 - a_minus_1 * cos_w + two_sqrt_a_alpha,
                2.0 * (a_minus_1 - a_plus_1 * cos_w),
                a_plus_1 - a_minus_1 * cos_w - two_sqrt_a_alpha,
            )
        }

        SectionKind::Notch => BiquadCoeffs::normalized(
            1.0,
            -2.0 * cos_w,
            1.0,
            1.0 + alpha,
            -2.0 * cos_w,
            1.0 - alpha,
        ),

        SectionKind::LowPass => BiquadCoeffs::normalized(
            (1.0 - cos_w) / 2.0,
            1.0 - cos_w,
            (1.0 - cos_w) / 2.0,
            1.0 + alpha,
            -2.0 * cos_w,
            1.0 - alpha,
        ),

        SectionKind::HighPass => BiquadCoeffs::normalized(
            (1.0 + cos_w) / 2.0,
            -(1.0 + cos_w),
            (1.0 + cos_w) / 2.0,
            1.0 + alpha,
            -2.0 * cos_w,
            1.0 - alpha,
        ),

        SectionKind::LowPassFirstOrder => {
            let k = (omega / 2.0).tan();
            BiquadCoeffs::normalized(k, k, 0.0, k + 1.0, k - 1.0, 0.0)
        }

        SectionKind::HighPassFirstOrder => {
            let k = (omega / 2.0).tan();
            BiquadCoeffs::normalized(1.0, -1.0, 0.0, k + 1.0, k - 1.0, 0.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::response::magnitude_at;

    const PROBES: [f64; 6] = [20.0, 100.0, 640.0, 1000.0, 5000.0, 19000.0];

    #[test]
    fn test_invalid_inputs_return_identity() {
        assert_eq!(calc_coeffs(SectionKind::Peak, 0.0, 6.0, 1.0), BiquadCoeffs::IDENTITY);
        assert_eq!(calc_coeffs(SectionKind::Peak, -10.0, 6.0, 1.0), BiquadCoeffs::IDENTITY);
        assert_eq!(calc_coeffs(SectionKind::LowPass, 1000.0, 0.0, 0.0), BiquadCoeffs::IDENTITY);
    }

    #[test]
    fn test_zero_gain_is_flat_for_gain_bearing_types() {
        for kind in [SectionKind::Peak, SectionKind::LowShelf, SectionKind::HighShelf] {
            let coeffs = calc_coeffs(kind, 1000.0, 0.0, 0.9);
            for f in PROBES {
                let mag = magnitude_at(f, &coeffs);
                assert!((mag - 1.0).abs() < 1e-9, "{:?} at {}Hz: {}", kind, f, mag);
            }
        }
    }

    #[test]
    fn test_pass_types_are_not_flat() {
        let lp = calc_coeffs(SectionKind::LowPass, 1000.0, 0.0, 0.707);
        assert!(magnitude_at(15000.0, &lp) < 0.1);
        let hp = calc_coeffs(SectionKind::HighPass, 1000.0, 0.0, 0.707);
        assert!(magnitude_at(50.0, &hp) < 0.1);
    }

    #[test]
    fn test_peak_hits_gain_at_center() {
        let coeffs = calc_coeffs(SectionKind::Peak, 1000.0, 6.0, 1.0);
        let db = 20.0 * magnitude_at(1000.0, &coeffs).log10();
        assert!((db - 6.0).abs() < 1e-6, "peak center {}dB", db);
    }

    #[test]
    fn test_shelves_are_not_mirror_images() {
        let low = calc_coeffs(SectionKind::LowShelf, 1000.0, 6.0, 0.707);
        let high = calc_coeffs(SectionKind::HighShelf, 1000.0, 6.0, 0.707);
        assert!(magnitude_at(30.0, &low) > 1.9);
        assert!((magnitude_at(30.0, &high) - 1.0).abs() < 0.01);
        assert!(magnitude_at(18000.0, &high) > 1.9);
        assert!((magnitude_at(18000.0, &low) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_notch_ignores_gain() {
        let a = calc_coeffs(SectionKind::Notch, 500.0, 0.0, 10.0);
        let b = calc_coeffs(SectionKind::Notch, 500.0, 12.0, 10.0);
        assert_eq!(a, b);
        assert!(magnitude_at(500.0, &a) < 1e-6);
    }

    #[test]
    fn test_normalization_matches_unnormalized_response() {
        // Re-scaling b and a by a common factor must not change |H|; a0 == 1
        // after normalization means b0 at DC equals the raw ratio.
        let coeffs = calc_coeffs(SectionKind::LowPass, 1000.0, 0.0, 0.707);
        let dc_gain = (coeffs.b0 + coeffs.b1 + coeffs.b2) / (1.0 + coeffs.a1 + coeffs.a2);
        assert!((dc_gain - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_first_order_sections_have_no_second_order_terms() {
        for kind in [SectionKind::LowPassFirstOrder, SectionKind::HighPassFirstOrder] {
            let coeffs = calc_coeffs(kind, 2000.0, 0.0, 0.707);
            assert_eq!(coeffs.b2, 0.0);
            assert_eq!(coeffs.a2, 0.0);
            let at_corner = magnitude_at(2000.0, &coeffs);
            assert!((at_corner - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_order_high_pass_blocks_dc() {
        let coeffs = calc_coeffs(SectionKind::HighPassFirstOrder, 1000.0, 0.0, 0.707);
        assert!(magnitude_at(20.0, &coeffs) < 0.03);
        assert!((magnitude_at(20000.0, &coeffs) - 1.0).abs() < 0.05);
    }
}
