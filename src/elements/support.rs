//! Support conditions

use serde::{Deserialize, Serialize};

use super::NodeId;

/// Kind of support at a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportKind {
    /// All three DOFs restrained
    Fixed,
    /// Both translations restrained, rotation free
    Pinned,
    /// A single translation restrained, along the roller direction
    Roller,
}

/// Direction of the translation a roller restrains
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollerDirection {
    /// Restrains the vertical (Y) translation
    #[default]
    Vertical,
    /// Restrains the horizontal (X) translation
    Horizontal,
}

/// A support condition applied at a user node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Support {
    /// Node the support is attached to
    pub node_id: NodeId,
    /// Kind of restraint
    pub kind: SupportKind,
    /// Restraint direction for rollers; ignored for other kinds
    #[serde(default)]
    pub roller_direction: RollerDirection,
}

impl Support {
    /// Create a fully fixed support
    pub fn fixed(node_id: NodeId) -> Self {
        Self {
            node_id,
            kind: SupportKind::Fixed,
            roller_direction: RollerDirection::default(),
        }
    }

    /// Create a pinned support
    pub fn pinned(node_id: NodeId) -> Self {
        Self {
            node_id,
            kind: SupportKind::Pinned,
            roller_direction: RollerDirection::default(),
        }
    }

    /// Create a roller restraining the vertical translation
    pub fn roller(node_id: NodeId) -> Self {
        Self {
            node_id,
            kind: SupportKind::Roller,
            roller_direction: RollerDirection::Vertical,
        }
    }

    /// Create a roller with an explicit restraint direction
    pub fn roller_along(node_id: NodeId, direction: RollerDirection) -> Self {
        Self {
            node_id,
            kind: SupportKind::Roller,
            roller_direction: direction,
        }
    }

    /// Restrained node-local DOF indices (0 = x translation, 1 = y
    /// translation, 2 = rotation)
    pub fn restrained_dofs(&self) -> Vec<usize> {
        match self.kind {
            SupportKind::Fixed => vec![0, 1, 2],
            SupportKind::Pinned => vec![0, 1],
            SupportKind::Roller => match self.roller_direction {
                RollerDirection::Vertical => vec![1],
                RollerDirection::Horizontal => vec![0],
            },
        }
    }

    /// Count of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.restrained_dofs().len()
    }
}
