//! Editing state machine
//!
//! ```text
//!            SelectNode / AddFilter
//!   Idle ───────────────────────────► DetailOpen { node, is_new }
//!    ▲  ◄─── Commit / Cancel / ClickOutside / Delete ───┘   │ ChangeType
//!    │                                                     ◄┘
//!    │  StartDrag           DragTo
//!    └───────► Dragging { node } ◄┐
//!    ◄──────── EndDrag ───────────┘
//! ```

use crate::bank::{FilterNode, NodeField, NodeId};
use crate::types::FilterType;

/// Current editing mode; at most one node is under edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Idle,
    /// Detail view open for `node`; `is_new` when it is still staged
    DetailOpen { node: NodeId, is_new: bool },
    /// Pointer drag in progress on `node`'s marker
    Dragging { node: NodeId },
}

impl EditorMode {
    /// Node shown in the detail view
    pub fn active_node(&self) -> Option<NodeId> {
        match *self {
            EditorMode::DetailOpen { node, .. } => Some(node),
            _ => None,
        }
    }

    pub fn is_new_node(&self) -> bool {
        matches!(self, EditorMode::DetailOpen { is_new: true, .. })
    }

    pub fn drag_target(&self) -> Option<NodeId> {
        match *self {
            EditorMode::Dragging { node } => Some(node),
            _ => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, EditorMode::Dragging { .. })
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self, EditorMode::DetailOpen { .. })
    }
}

/// What the detail view shows for the open node
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub node: NodeId,
    pub is_new: bool,
    pub filter_type: FilterType,
    /// Number fields in display order, each with its formatted value
    pub fields: Vec<(NodeField, String)>,
    /// Existing nodes offer delete; staged ones offer save/cancel
    pub can_delete: bool,
}

impl DetailView {
    pub fn for_node(node: &FilterNode, is_new: bool) -> Self {
        let fields = NodeField::for_type(node.filter_type())
            .into_iter()
            .map(|field| {
                let value = match field {
                    NodeField::Freq => format!("{:.0}", node.freq()),
                    NodeField::Gain => format!("{:.1}", node.gain()),
                    NodeField::Q => format!("{:.3}", node.q()),
                    NodeField::Slope => node.slope().db_per_octave().to_string(),
                };
                (field, value)
            })
            .collect();

        Self {
            node: node.id(),
            is_new,
            filter_type: node.filter_type(),
            fields,
            can_delete: !is_new,
        }
    }
}
