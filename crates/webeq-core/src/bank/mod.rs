//! Filter bank: the PEQ nodes plus the fixed GEQ bands
//!
//! The bank is owned by one editing session and mutated only through the
//! methods here. Operations on ids that do not exist are no-ops returning
//! `false`; callers decide whether a recompute is needed from that flag.

mod geq;
mod node;
mod placement;

pub use geq::{GeqBand, GEQ_FREQUENCIES, GEQ_Q};
pub use node::{
    clamp_freq, clamp_gain, clamp_q, filter_defaults, parse_number, FilterDefaults, FilterNode,
    NodeField, NodeId, NodeParams,
};
pub use placement::{pick_free_frequency, MAX_PLACEMENT_ATTEMPTS, MIN_RELATIVE_SPACING};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::FieldError;
use crate::types::{FilterType, Slope};

/// PEQ nodes in insertion order and the 31 GEQ bands
#[derive(Debug)]
pub struct FilterBank {
    nodes: Vec<FilterNode>,
    geq: Vec<GeqBand>,
    rng: StdRng,
}

impl Default for FilterBank {
    fn default() -> Self {
        Self::new()
    }
}

impl FilterBank {
    /// Empty PEQ bank, flat GEQ
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Bank with a deterministic placement RNG
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            nodes: Vec::new(),
            geq: GeqBand::standard_set(),
            rng,
        }
    }

    /// Add the three startup filters (LP 15 kHz/24, Peak 1.5 kHz +3 dB, HP 50 Hz/12)
    pub fn seed_defaults(&mut self) {
        self.add_peq(
            NodeParams::new(FilterType::LowPass)
                .with_freq(15000.0)
                .with_slope(Slope::Db24),
            false,
        );
        self.add_peq(
            NodeParams::new(FilterType::Peak)
                .with_freq(1500.0)
                .with_gain(3.0)
                .with_q(2.0),
            false,
        );
        self.add_peq(
            NodeParams::new(FilterType::HighPass)
                .with_freq(50.0)
                .with_slope(Slope::Db12),
            false,
        );
    }

    // ── PEQ access ──────────────────────────────────────────────────────

    /// Every node, temporary ones included, in insertion order
    pub fn nodes(&self) -> &[FilterNode] {
        &self.nodes
    }

    /// Committed nodes in insertion order
    pub fn visible_nodes(&self) -> impl Iterator<Item = &FilterNode> {
        self.nodes.iter().filter(|n| !n.is_temporary())
    }

    pub fn node(&self, id: NodeId) -> Option<&FilterNode> {
        self.nodes.iter().find(|n| n.id() == id)
    }

    /// Mutable access; setters on the node keep it within bounds
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut FilterNode> {
        self.nodes.iter_mut().find(|n| n.id() == id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Id the next added node will get: max + 1, or 0 for an empty bank
    pub fn next_id(&self) -> NodeId {
        self.nodes.iter().map(|n| n.id() + 1).max().unwrap_or(0)
    }

    // ── PEQ mutation ────────────────────────────────────────────────────

    /// Add a node, filling gaps from the type defaults
    ///
    /// With `is_new` the node is staged as temporary: invisible to the curve
    /// and export until [`commit_temporary`](Self::commit_temporary).
    pub fn add_peq(&mut self, params: NodeParams, is_new: bool) -> NodeId {
        let id = self.next_id();
        let filter_type = params.filter_type.unwrap_or(FilterType::Peak);
        let freq = match params.freq {
            Some(freq) => freq,
            None => {
                let existing: Vec<f64> = self.nodes.iter().map(FilterNode::freq).collect();
                pick_free_frequency(&mut self.rng, &existing)
            }
        };

        let mut node = FilterNode::new(id, filter_type, freq, &params);
        node.set_temporary(is_new);
        log::debug!(
            "add_peq: #{} {} at {:.0}Hz{}",
            id,
            filter_type,
            node.freq(),
            if is_new { " (staged)" } else { "" }
        );
        self.nodes.push(node);
        id
    }

    pub fn remove_peq(&mut self, id: NodeId) -> bool {
        let before = self.nodes.len();
        self.nodes.retain(|n| n.id() != id);
        let removed = self.nodes.len() != before;
        if removed {
            log::debug!("remove_peq: #{}", id);
        }
        removed
    }

    /// Zero the gain of a peak or shelf; other types are left alone
    pub fn reset_gain(&mut self, id: NodeId) -> bool {
        match self.node_mut(id) {
            Some(node) if node.filter_type().is_gain_bearing() => {
                node.set_gain(0.0);
                true
            }
            _ => false,
        }
    }

    pub fn commit_temporary(&mut self, id: NodeId) -> bool {
        match self.node_mut(id) {
            Some(node) if node.is_temporary() => {
                node.set_temporary(false);
                log::debug!("commit_temporary: #{}", id);
                true
            }
            _ => false,
        }
    }

    /// Remove the node only if it is still staged
    pub fn discard_temporary(&mut self, id: NodeId) -> bool {
        let staged = self.node(id).is_some_and(FilterNode::is_temporary);
        if staged {
            self.nodes.retain(|n| n.id() != id);
            log::debug!("discard_temporary: #{}", id);
        }
        staged
    }

    pub fn reset_all_peq(&mut self) {
        log::debug!("reset_all_peq: clearing {} nodes", self.nodes.len());
        self.nodes.clear();
    }

    pub fn change_type(&mut self, id: NodeId, new_type: FilterType) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                log::debug!("change_type: #{} {} -> {}", id, node.filter_type(), new_type);
                node.change_type(new_type);
                true
            }
            None => false,
        }
    }

    /// Apply raw field text to a node
    ///
    /// `Ok(false)` when the id is unknown; `Err` leaves the node unchanged.
    pub fn edit_field(
        &mut self,
        id: NodeId,
        field: NodeField,
        text: &str,
    ) -> Result<bool, FieldError> {
        match self.node_mut(id) {
            Some(node) => node.apply_field(field, text).map(|()| true),
            None => Ok(false),
        }
    }

    // ── GEQ ─────────────────────────────────────────────────────────────

    pub fn geq_bands(&self) -> &[GeqBand] {
        &self.geq
    }

    pub fn set_geq_gain(&mut self, index: usize, gain: f64) -> bool {
        match self.geq.get_mut(index) {
            Some(band) => band.set_gain(gain),
            None => false,
        }
    }

    pub fn reset_geq_band(&mut self, index: usize) -> bool {
        self.set_geq_gain(index, 0.0)
    }

    pub fn reset_all_geq(&mut self) {
        log::debug!("reset_all_geq");
        for band in &mut self.geq {
            band.set_gain(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peak_at(freq: f64) -> NodeParams {
        NodeParams::new(FilterType::Peak).with_freq(freq)
    }

    #[test]
    fn test_id_assignment_uses_max_plus_one() {
        let mut bank = FilterBank::with_seed(0);
        assert_eq!(bank.add_peq(peak_at(100.0), false), 0);
        assert_eq!(bank.add_peq(peak_at(200.0), false), 1);
        assert_eq!(bank.add_peq(peak_at(300.0), false), 2);
        assert!(bank.remove_peq(1));
        assert_eq!(bank.add_peq(peak_at(400.0), false), 3);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut bank = FilterBank::with_seed(0);
        bank.add_peq(peak_at(100.0), false);
        assert!(!bank.remove_peq(42));
        assert_eq!(bank.len(), 1);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let mut bank = FilterBank::with_seed(0);
        let id = bank.add_peq(NodeParams::new(FilterType::Notch).with_freq(700.0), false);
        let node = bank.node(id).unwrap();
        assert_eq!(node.q(), 10.0);
        assert_eq!(node.gain(), 0.0);
        assert_eq!(node.slope(), Slope::Db12);
        assert!(node.is_enabled());
    }

    #[test]
    fn test_auto_frequency_avoids_existing() {
        let mut bank = FilterBank::with_seed(11);
        bank.add_peq(peak_at(1000.0), false);
        let id = bank.add_peq(NodeParams::new(FilterType::Peak), false);
        let f = bank.node(id).unwrap().freq();
        assert!((f - 1000.0).abs() / f >= MIN_RELATIVE_SPACING);
    }

    #[test]
    fn test_staging_round_trip() {
        let mut bank = FilterBank::with_seed(0);
        bank.add_peq(peak_at(100.0), false);
        let before: Vec<FilterNode> = bank.nodes().to_vec();

        let id = bank.add_peq(peak_at(1000.0), true);
        assert!(bank.node(id).unwrap().is_temporary());
        assert_eq!(bank.visible_nodes().count(), 1);

        assert!(bank.discard_temporary(id));
        assert_eq!(bank.nodes(), before.as_slice());
    }

    #[test]
    fn test_commit_then_discard_is_noop() {
        let mut bank = FilterBank::with_seed(0);
        let id = bank.add_peq(peak_at(1000.0), true);
        assert!(bank.commit_temporary(id));
        assert!(!bank.commit_temporary(id));
        assert!(!bank.discard_temporary(id));
        assert_eq!(bank.visible_nodes().count(), 1);
    }

    #[test]
    fn test_reset_gain_only_for_gain_types() {
        let mut bank = FilterBank::with_seed(0);
        let peak = bank.add_peq(peak_at(1000.0).with_gain(6.0), false);
        let notch = bank.add_peq(NodeParams::new(FilterType::Notch).with_freq(300.0), false);
        assert!(bank.reset_gain(peak));
        assert_eq!(bank.node(peak).unwrap().gain(), 0.0);
        assert!(!bank.reset_gain(notch));
        assert!(!bank.reset_gain(99));
    }

    #[test]
    fn test_edit_field() {
        let mut bank = FilterBank::with_seed(0);
        let id = bank.add_peq(peak_at(1000.0), false);
        assert_eq!(bank.edit_field(id, NodeField::Gain, "-50"), Ok(true));
        assert_eq!(bank.node(id).unwrap().gain(), -15.0);
        assert!(bank.edit_field(id, NodeField::Q, "wide").is_err());
        assert_eq!(bank.edit_field(77, NodeField::Q, "1"), Ok(false));
    }

    #[test]
    fn test_geq_editing() {
        let mut bank = FilterBank::with_seed(0);
        assert!(bank.set_geq_gain(3, 4.44));
        assert_eq!(bank.geq_bands()[3].gain(), 4.4);
        assert!(bank.reset_geq_band(3));
        assert_eq!(bank.geq_bands()[3].gain(), 0.0);
        assert!(!bank.set_geq_gain(31, 1.0));
        assert!(!bank.set_geq_gain(3, f64::NAN));
        assert_eq!(bank.geq_bands()[3].gain(), 0.0);

        bank.set_geq_gain(0, 2.0);
        bank.set_geq_gain(30, -2.0);
        bank.reset_all_geq();
        assert!(bank.geq_bands().iter().all(|b| b.gain() == 0.0));
        assert_eq!(bank.geq_bands().len(), 31);
    }

    #[test]
    fn test_seed_defaults() {
        let mut bank = FilterBank::with_seed(0);
        bank.seed_defaults();
        let types: Vec<FilterType> = bank.visible_nodes().map(FilterNode::filter_type).collect();
        assert_eq!(
            types,
            vec![FilterType::LowPass, FilterType::Peak, FilterType::HighPass]
        );
        assert_eq!(bank.node(0).unwrap().slope(), Slope::Db24);
        assert_eq!(bank.node(1).unwrap().gain(), 3.0);
    }
}
