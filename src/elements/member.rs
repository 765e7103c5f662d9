//! Member - a prismatic 2D frame member between two nodes

use serde::{Deserialize, Serialize};

use super::{MemberId, NodeId};

/// A prismatic frame member connecting two user nodes.
///
/// Section and material properties are carried directly on the member
/// (`E`, `I`, `A`) in whatever coherent unit system the caller uses; the
/// solver performs no unit conversion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Member {
    /// User-assigned identifier
    pub id: MemberId,
    /// Start node id
    pub start_node_id: NodeId,
    /// End node id
    pub end_node_id: NodeId,
    /// Modulus of elasticity
    #[serde(rename = "E")]
    pub e: f64,
    /// Second moment of area about the bending axis
    #[serde(rename = "I")]
    pub i: f64,
    /// Cross-sectional area
    #[serde(rename = "A")]
    pub a: f64,
}

impl Member {
    /// Create a new member
    pub fn new(id: MemberId, start_node_id: NodeId, end_node_id: NodeId, e: f64, i: f64, a: f64) -> Self {
        Self {
            id,
            start_node_id,
            end_node_id,
            e,
            i,
            a,
        }
    }

    /// Axial rigidity EA
    pub fn ea(&self) -> f64 {
        self.e * self.a
    }

    /// Flexural rigidity EI
    pub fn ei(&self) -> f64 {
        self.e * self.i
    }
}
