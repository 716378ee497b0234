//! Cascade aggregation for the PEQ and GEQ paths
//!
//! Sections multiply their linear magnitudes; the product is converted to dB
//! once at the end.

use super::biquad::{calc_coeffs, SectionKind};
use super::response::{magnitude_at, magnitude_to_db};
use crate::bank::{FilterNode, GeqBand, GEQ_Q};
use crate::types::{Slope, PASS_Q};

/// One stage of a cascade, ready for coefficient calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub freq: f64,
    pub gain_db: f64,
    pub q: f64,
}

impl Section {
    /// Linear magnitude of this stage at `freq` Hz
    pub fn magnitude(&self, freq: f64) -> f64 {
        magnitude_at(freq, &calc_coeffs(self.kind, self.freq, self.gain_db, self.q))
    }
}

/// Stage layout for a low/high-pass slope: (second-order count, has first-order)
///
/// 6 → (0, true), 12 → (1, false), 18 → (1, true), 24 → (2, false)
pub fn pass_sections(slope: Slope) -> (u32, bool) {
    let order = slope.order();
    (order / 2, order % 2 == 1)
}

/// Expand one node into its cascade stages
pub fn node_sections(node: &FilterNode) -> Vec<Section> {
    let filter_type = node.filter_type();

    match SectionKind::first_order_of(filter_type) {
        Some(first_order) => {
            let (num_biquads, has_first_order) = pass_sections(node.slope());
            let second_order = Section {
                kind: SectionKind::from(filter_type),
                freq: node.freq(),
                gain_db: 0.0,
                q: PASS_Q,
            };
            let mut sections = vec![second_order; num_biquads as usize];
            if has_first_order {
                sections.push(Section {
                    kind: first_order,
                    ..second_order
                });
            }
            sections
        }
        None => vec![Section {
            kind: SectionKind::from(filter_type),
            freq: node.freq(),
            gain_db: node.gain(),
            q: node.q(),
        }],
    }
}

/// Aggregate linear magnitude of the committed PEQ nodes at `freq`
///
/// Temporary nodes never contribute.
pub fn peq_magnitude<'a>(freq: f64, nodes: impl IntoIterator<Item = &'a FilterNode>) -> f64 {
    nodes
        .into_iter()
        .filter(|node| !node.is_temporary())
        .flat_map(node_sections)
        .map(|section| section.magnitude(freq))
        .product()
}

/// Aggregate PEQ response in dB at `freq`
pub fn peq_response_db<'a>(freq: f64, nodes: impl IntoIterator<Item = &'a FilterNode>) -> f64 {
    magnitude_to_db(peq_magnitude(freq, nodes))
}

/// Aggregate linear magnitude of the GEQ bands at `freq`
///
/// Bands at 0 dB are skipped; a 0 dB peak is a no-op anyway.
pub fn geq_magnitude<'a>(freq: f64, bands: impl IntoIterator<Item = &'a GeqBand>) -> f64 {
    bands
        .into_iter()
        .filter(|band| band.gain() != 0.0)
        .map(|band| {
            Section {
                kind: SectionKind::Peak,
                freq: band.freq(),
                gain_db: band.gain(),
                q: GEQ_Q,
            }
            .magnitude(freq)
        })
        .product()
}

/// Aggregate GEQ response in dB at `freq`
pub fn geq_response_db<'a>(freq: f64, bands: impl IntoIterator<Item = &'a GeqBand>) -> f64 {
    magnitude_to_db(geq_magnitude(freq, bands))
}
