//! Editing session
//!
//! Owns the filter bank, the editing mode, the active view and the last
//! computed response curve. Every input goes through [`EqSession::update`],
//! which applies it synchronously and recomputes the curve in-line when the
//! visible state changed. Staging a new node is the one mutation that does
//! not recompute; the node stays invisible until committed.

use std::fmt::Display;

use chrono::{DateTime, TimeZone};

use crate::bank::{FilterBank, FilterNode, NodeId, NodeParams};
use crate::config::EditorConfig;
use crate::curve::{build_curve, ResponseCurve};
use crate::editor::{drag_target, wheel_adjust_q, DetailView, EditorMessage, EditorMode, PlotGeometry};
use crate::export::{format_export, ExportStatus, PRODUCT_VERSION};
use crate::types::{FilterType, ViewMode};

/// One user's editing session
#[derive(Debug)]
pub struct EqSession {
    bank: FilterBank,
    mode: EditorMode,
    view: ViewMode,
    curve: ResponseCurve,
    geometry: PlotGeometry,
    product_name: String,
    export_status: ExportStatus,
    /// Bumped on every recompute
    revision: u64,
}

impl EqSession {
    /// Session over an existing bank, curve computed immediately
    pub fn new(bank: FilterBank, geometry: PlotGeometry) -> Self {
        let mut session = Self {
            bank,
            mode: EditorMode::Idle,
            view: ViewMode::PeqView,
            curve: ResponseCurve::default(),
            geometry,
            product_name: "WebEQ".to_string(),
            export_status: ExportStatus::NotSubmitted,
            revision: 0,
        };
        session.recompute();
        session
    }

    /// Session set up from config, seeded with the starter filters if enabled
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::from_config_with_bank(config, FilterBank::new())
    }

    /// Same as [`from_config`](Self::from_config) with a caller-supplied bank
    pub fn from_config_with_bank(config: &EditorConfig, mut bank: FilterBank) -> Self {
        if config.seed_default_filters {
            bank.seed_defaults();
        }
        let mut session = Self::new(bank, config.plot_geometry());
        session.product_name = config.product_name.clone();
        session
    }

    // ── Accessors ───────────────────────────────────────────────────────

    pub fn bank(&self) -> &FilterBank {
        &self.bank
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// Curve from the last recompute
    pub fn curve(&self) -> &ResponseCurve {
        &self.curve
    }

    pub fn geometry(&self) -> PlotGeometry {
        self.geometry
    }

    pub fn set_geometry(&mut self, geometry: PlotGeometry) {
        self.geometry = geometry;
    }

    pub fn export_status(&self) -> ExportStatus {
        self.export_status
    }

    /// Number of recomputes so far
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Card texts for the committed nodes
    pub fn node_summaries(&self) -> Vec<String> {
        self.bank.visible_nodes().map(FilterNode::summary).collect()
    }

    /// Contents of the open detail view, if any
    pub fn detail_view(&self) -> Option<DetailView> {
        match self.mode {
            EditorMode::DetailOpen { node, is_new } => self
                .bank
                .node(node)
                .map(|n| DetailView::for_node(n, is_new)),
            _ => None,
        }
    }

    // ── Export ──────────────────────────────────────────────────────────

    /// Export text for the committed nodes, dated `now`
    pub fn export_text<Tz>(&self, now: &DateTime<Tz>) -> String
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        format_export(&self.product_name, PRODUCT_VERSION, now, self.bank.nodes())
    }

    /// Export text dated with the local clock
    pub fn export_text_now(&self) -> String {
        self.export_text(&chrono::Local::now())
    }

    /// Record the outcome of an export submission; the bank is untouched
    pub fn record_export_result(&mut self, success: bool) {
        self.export_status = ExportStatus::from_success(success);
        if success {
            log::info!("Export saved");
        } else {
            log::warn!("Export failed");
        }
    }

    // ── Update ──────────────────────────────────────────────────────────

    /// Apply one input; returns whether the curve was recomputed
    pub fn update(&mut self, message: EditorMessage) -> bool {
        // A drag owns the pointer until release
        if self.mode.is_dragging()
            && !matches!(
                message,
                EditorMessage::DragTo { .. } | EditorMessage::EndDrag | EditorMessage::SwitchView(_)
            )
        {
            log::debug!("update: ignoring {:?} while dragging", message);
            return false;
        }

        let changed = match message {
            EditorMessage::AddFilter => self.add_filter(),
            EditorMessage::SelectNode(id) => self.select_node(id),
            EditorMessage::Commit => self.commit(),
            EditorMessage::Cancel | EditorMessage::ClickOutside => self.cancel(),
            EditorMessage::Delete => self.delete_active(),
            EditorMessage::ChangeType(filter_type) => self.change_active_type(filter_type),
            EditorMessage::EditField { field, text } => match self.mode.active_node() {
                Some(id) => match self.bank.edit_field(id, field, &text) {
                    Ok(changed) => changed,
                    Err(e) => {
                        log::debug!("update: dropped edit on #{}: {}", id, e);
                        false
                    }
                },
                None => false,
            },
            EditorMessage::StartDrag(id) => {
                self.start_drag(id);
                false
            }
            EditorMessage::DragTo { x, y, precision } => self.drag_to(x, y, precision),
            EditorMessage::EndDrag => {
                if self.mode.is_dragging() {
                    self.mode = EditorMode::Idle;
                }
                false
            }
            EditorMessage::Wheel {
                node,
                delta_y,
                precision,
            } => self.wheel(node, delta_y, precision),
            EditorMessage::ResetGain(id) => self.bank.reset_gain(id),
            EditorMessage::RemoveNode(id) => {
                self.bank.remove_peq(id);
                if self.mode.active_node() == Some(id) {
                    self.mode = EditorMode::Idle;
                }
                true
            }
            EditorMessage::ResetAllPeq => {
                self.bank.reset_all_peq();
                self.mode = EditorMode::Idle;
                true
            }
            EditorMessage::ResetAllGeq => {
                self.bank.reset_all_geq();
                true
            }
            EditorMessage::SetGeqGain { band, gain_db } => self.bank.set_geq_gain(band, gain_db),
            EditorMessage::ResetGeqBand(band) => self.bank.reset_geq_band(band),
            EditorMessage::SwitchView(view) => {
                self.close_detail();
                self.mode = EditorMode::Idle;
                self.view = view;
                true
            }
        };

        if changed {
            self.recompute();
        }
        changed
    }

    /// Rebuild the curve for the current view
    pub fn recompute(&mut self) {
        self.curve = build_curve(self.view, &self.bank);
        self.revision += 1;
    }

    // ── Transitions ─────────────────────────────────────────────────────

    /// Close the detail view; a staged node is discarded
    fn close_detail(&mut self) -> bool {
        let discarded = match self.mode {
            EditorMode::DetailOpen { node, is_new: true } => self.bank.discard_temporary(node),
            _ => false,
        };
        if self.mode.is_detail_open() {
            self.mode = EditorMode::Idle;
        }
        discarded
    }

    fn add_filter(&mut self) -> bool {
        let discarded = self.close_detail();
        let params = NodeParams::new(FilterType::Peak)
            .with_freq(1000.0)
            .with_gain(0.0)
            .with_q(1.0);
        let node = self.bank.add_peq(params, true);
        self.mode = EditorMode::DetailOpen { node, is_new: true };
        discarded
    }

    fn select_node(&mut self, id: NodeId) -> bool {
        let committed = self.bank.node(id).is_some_and(|n| !n.is_temporary());
        if !committed {
            return false;
        }
        let discarded = self.close_detail();
        self.mode = EditorMode::DetailOpen {
            node: id,
            is_new: false,
        };
        discarded
    }

    fn commit(&mut self) -> bool {
        match self.mode {
            EditorMode::DetailOpen { node, is_new } => {
                self.mode = EditorMode::Idle;
                is_new && self.bank.commit_temporary(node)
            }
            _ => false,
        }
    }

    fn cancel(&mut self) -> bool {
        self.close_detail()
    }

    fn delete_active(&mut self) -> bool {
        match self.mode {
            EditorMode::DetailOpen { is_new: true, .. } => self.close_detail(),
            EditorMode::DetailOpen { node, is_new: false } => {
                self.mode = EditorMode::Idle;
                self.bank.remove_peq(node)
            }
            _ => false,
        }
    }

    fn change_active_type(&mut self, filter_type: FilterType) -> bool {
        match self.mode.active_node() {
            Some(id) => self.bank.change_type(id, filter_type),
            None => false,
        }
    }

    fn start_drag(&mut self, id: NodeId) {
        let draggable = self.view == ViewMode::PeqView
            && self.mode == EditorMode::Idle
            && self.bank.node(id).is_some_and(|n| !n.is_temporary());
        if draggable {
            self.mode = EditorMode::Dragging { node: id };
        }
    }

    fn drag_to(&mut self, x: f64, y: f64, precision: bool) -> bool {
        let Some(id) = self.mode.drag_target() else {
            return false;
        };
        if self.view != ViewMode::PeqView || !x.is_finite() || !y.is_finite() {
            return false;
        }
        let target = drag_target(&self.geometry, x, y, precision);
        match self.bank.node_mut(id) {
            Some(node) => {
                node.set_freq(target.freq);
                if node.filter_type().is_gain_bearing() {
                    node.set_gain(target.gain_db);
                }
                true
            }
            None => false,
        }
    }

    fn wheel(&mut self, id: NodeId, delta_y: f64, precision: bool) -> bool {
        if self.view != ViewMode::PeqView || self.mode.is_dragging() {
            return false;
        }
        let Some(node) = self.bank.node_mut(id) else {
            return false;
        };
        if node.is_temporary() {
            return false;
        }
        match wheel_adjust_q(node.filter_type(), node.q(), delta_y, precision) {
            Some(q) => {
                node.set_q(q);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::NodeField;
    use crate::types::Slope;

    fn seeded() -> EqSession {
        let mut bank = FilterBank::with_seed(1);
        bank.seed_defaults();
        EqSession::new(bank, PlotGeometry::default())
    }

    #[test]
    fn test_new_session_has_curve() {
        let session = seeded();
        assert_eq!(session.revision(), 1);
        assert_eq!(session.curve().markers.len(), 3);
        assert_eq!(session.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_add_filter_stages_without_recompute() {
        let mut session = seeded();
        let revision = session.revision();
        assert!(!session.update(EditorMessage::AddFilter));
        assert_eq!(session.revision(), revision);

        let EditorMode::DetailOpen { node, is_new } = session.mode() else {
            panic!("detail view not open");
        };
        assert!(is_new);
        assert_eq!(node, 3);
        assert!(session.curve().marker(node).is_none());
        assert_eq!(session.node_summaries().len(), 3);
    }

    #[test]
    fn test_commit_makes_node_visible() {
        let mut session = seeded();
        session.update(EditorMessage::AddFilter);
        assert!(session.update(EditorMessage::Commit));
        assert_eq!(session.mode(), EditorMode::Idle);
        assert!(session.curve().marker(3).is_some());
        assert_eq!(session.node_summaries().len(), 4);
    }

    #[test]
    fn test_click_outside_cancels_staged_node() {
        let mut session = seeded();
        let before: Vec<FilterNode> = session.bank().nodes().to_vec();
        session.update(EditorMessage::AddFilter);
        session.update(EditorMessage::EditField {
            field: NodeField::Gain,
            text: "6".into(),
        });
        assert!(session.update(EditorMessage::ClickOutside));
        assert_eq!(session.bank().nodes(), before.as_slice());
        assert_eq!(session.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_click_outside_existing_node_is_plain_close() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(1));
        assert!(!session.update(EditorMessage::ClickOutside));
        assert_eq!(session.mode(), EditorMode::Idle);
        assert_eq!(session.bank().len(), 3);
    }

    #[test]
    fn test_change_type_rebuilds_detail_view() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(1));
        assert!(session.update(EditorMessage::ChangeType(FilterType::LowPass)));
        let view = session.detail_view().unwrap();
        assert_eq!(view.filter_type, FilterType::LowPass);
        assert_eq!(
            view.fields.iter().map(|(f, _)| *f).collect::<Vec<_>>(),
            vec![NodeField::Freq, NodeField::Slope]
        );
        assert!(session.mode().is_detail_open());
    }

    #[test]
    fn test_invalid_field_text_is_dropped() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(1));
        let revision = session.revision();
        assert!(!session.update(EditorMessage::EditField {
            field: NodeField::Freq,
            text: "loud".into(),
        }));
        assert_eq!(session.revision(), revision);
        assert_eq!(session.bank().node(1).unwrap().freq(), 1500.0);
    }

    #[test]
    fn test_delete_from_detail_view() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(2));
        assert!(session.update(EditorMessage::Delete));
        assert!(session.bank().node(2).is_none());
        assert_eq!(session.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_drag_moves_peak_frequency_and_gain() {
        let mut session = seeded();
        session.update(EditorMessage::StartDrag(1));
        assert_eq!(session.mode(), EditorMode::Dragging { node: 1 });

        let geometry = session.geometry();
        let x = geometry.freq_to_x(4000.0);
        let y = geometry.gain_to_y(-6.0);
        assert!(session.update(EditorMessage::DragTo {
            x,
            y,
            precision: true,
        }));
        let node = session.bank().node(1).unwrap();
        assert!((node.freq() - 4000.0).abs() / 4000.0 < 0.02);
        assert_eq!(node.gain(), -6.0);

        assert!(!session.update(EditorMessage::EndDrag));
        assert_eq!(session.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_non_finite_drag_is_dropped() {
        let mut session = seeded();
        let before = session.bank().node(1).unwrap().clone();
        session.update(EditorMessage::StartDrag(1));
        assert!(!session.update(EditorMessage::DragTo {
            x: f64::NAN,
            y: 10.0,
            precision: false,
        }));
        assert!(!session.update(EditorMessage::DragTo {
            x: 10.0,
            y: f64::INFINITY,
            precision: true,
        }));
        assert_eq!(session.bank().node(1).unwrap(), &before);
        assert!(session.curve().points.iter().all(|p| p.gain_db.is_finite()));
    }

    #[test]
    fn test_drag_ignores_gain_for_pass_types() {
        let mut session = seeded();
        session.update(EditorMessage::StartDrag(2));
        session.update(EditorMessage::DragTo {
            x: 0.0,
            y: 0.0,
            precision: false,
        });
        let node = session.bank().node(2).unwrap();
        assert_eq!(node.freq(), 20.0);
        assert_eq!(node.gain(), 0.0);
        assert_eq!(node.slope(), Slope::Db12);
    }

    #[test]
    fn test_release_without_move_returns_to_idle() {
        let mut session = seeded();
        session.update(EditorMessage::StartDrag(0));
        session.update(EditorMessage::EndDrag);
        assert_eq!(session.mode(), EditorMode::Idle);
    }

    #[test]
    fn test_no_drag_while_detail_open() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(1));
        session.update(EditorMessage::StartDrag(1));
        assert!(session.mode().is_detail_open());
    }

    #[test]
    fn test_wheel_adjusts_q() {
        let mut session = seeded();
        assert!(session.update(EditorMessage::Wheel {
            node: 1,
            delta_y: -100.0,
            precision: false,
        }));
        assert_eq!(session.bank().node(1).unwrap().q(), 2.1);

        // Low-pass never responds
        assert!(!session.update(EditorMessage::Wheel {
            node: 0,
            delta_y: -100.0,
            precision: false,
        }));

        // Not in the GEQ view
        session.update(EditorMessage::SwitchView(ViewMode::GeqView));
        assert!(!session.update(EditorMessage::Wheel {
            node: 1,
            delta_y: -100.0,
            precision: false,
        }));
    }

    #[test]
    fn test_switch_view_cancels_staged_node() {
        let mut session = seeded();
        session.update(EditorMessage::AddFilter);
        assert!(session.update(EditorMessage::SwitchView(ViewMode::GeqView)));
        assert_eq!(session.view(), ViewMode::GeqView);
        assert_eq!(session.bank().len(), 3);
        assert!(session.curve().markers.is_empty());
    }

    #[test]
    fn test_reset_all_peq_closes_detail() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(0));
        assert!(session.update(EditorMessage::ResetAllPeq));
        assert!(session.bank().is_empty());
        assert_eq!(session.mode(), EditorMode::Idle);
        assert!(session.curve().points.iter().all(|p| p.gain_db == 0.0));
    }

    #[test]
    fn test_reset_gain_noop_for_notch() {
        let mut session = seeded();
        session.update(EditorMessage::SelectNode(1));
        session.update(EditorMessage::ChangeType(FilterType::Notch));
        session.update(EditorMessage::Commit);
        assert!(!session.update(EditorMessage::ResetGain(1)));
    }

    #[test]
    fn test_geq_messages_recompute() {
        let mut session = seeded();
        session.update(EditorMessage::SwitchView(ViewMode::GeqView));
        assert!(session.update(EditorMessage::SetGeqGain {
            band: 17,
            gain_db: 5.0,
        }));
        assert!((session.curve().gain_near(1000.0).unwrap() - 5.0).abs() < 1e-6);
        assert!(!session.update(EditorMessage::SetGeqGain {
            band: 40,
            gain_db: 5.0,
        }));
        assert!(!session.update(EditorMessage::SetGeqGain {
            band: 17,
            gain_db: f64::NAN,
        }));
        assert_eq!(session.bank().geq_bands()[17].gain(), 5.0);
        assert!(session.update(EditorMessage::ResetGeqBand(17)));
        assert!(session.update(EditorMessage::ResetAllGeq));
    }

    #[test]
    fn test_export_result_leaves_bank_untouched() {
        let mut session = seeded();
        let before: Vec<FilterNode> = session.bank().nodes().to_vec();
        session.record_export_result(false);
        assert_eq!(session.export_status(), ExportStatus::Failed);
        assert_eq!(session.bank().nodes(), before.as_slice());
        session.record_export_result(true);
        assert_eq!(session.export_status(), ExportStatus::Saved);
    }
}
