//! Messages for the editing controller

use crate::bank::{NodeField, NodeId};
use crate::types::{FilterType, ViewMode};

/// Input events fed to [`EqSession::update`](crate::EqSession::update)
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMessage {
    // ─────────────────────────────────────────────────────────────────────
    // Detail view
    // ─────────────────────────────────────────────────────────────────────
    /// Stage a new Peak node and open it
    AddFilter,

    /// Open an existing node in the detail view
    SelectNode(NodeId),

    /// Confirm the open detail view (commits a staged node)
    Commit,

    /// Dismiss the open detail view (discards a staged node)
    Cancel,

    /// Click on the backdrop around the detail view
    ClickOutside,

    /// Delete the node open in the detail view
    Delete,

    /// Type selector changed in the detail view
    ChangeType(FilterType),

    /// Raw text from one of the detail view's number fields
    EditField { field: NodeField, text: String },

    // ─────────────────────────────────────────────────────────────────────
    // Plot interaction
    // ─────────────────────────────────────────────────────────────────────
    /// Pointer down on a node marker
    StartDrag(NodeId),

    /// Pointer moved while dragging (plot pixel coordinates)
    DragTo { x: f64, y: f64, precision: bool },

    /// Pointer released
    EndDrag,

    /// Wheel over a node marker
    Wheel {
        node: NodeId,
        delta_y: f64,
        precision: bool,
    },

    // ─────────────────────────────────────────────────────────────────────
    // Node cards and bank
    // ─────────────────────────────────────────────────────────────────────
    /// Double-click on a card or marker
    ResetGain(NodeId),

    /// Remove button on a card
    RemoveNode(NodeId),

    ResetAllPeq,

    ResetAllGeq,

    // ─────────────────────────────────────────────────────────────────────
    // GEQ and view
    // ─────────────────────────────────────────────────────────────────────
    /// GEQ slider moved (band index, dB)
    SetGeqGain { band: usize, gain_db: f64 },

    /// Double-click on a GEQ slider
    ResetGeqBand(usize),

    /// PEQ/GEQ tab switch
    SwitchView(ViewMode),
}
