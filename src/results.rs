//! Result types for a solve

use serde::{Deserialize, Serialize};

use crate::elements::{MemberId, NodeId};
use crate::error::FrameResult;

/// Displacement results at a user node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct NodeDisplacement {
    /// Node id
    pub node_id: NodeId,
    /// Translation in global X
    pub dx: f64,
    /// Translation in global Y
    pub dy: f64,
    /// Rotation about Z, counter-clockwise positive
    pub rotation: f64,
}

/// Reaction forces at a supported node
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reaction {
    /// Node id
    pub node_id: NodeId,
    /// Reaction force in global X
    pub fx: f64,
    /// Reaction force in global Y
    pub fy: f64,
    /// Reaction moment about Z
    pub m: f64,
}

/// One sampled point of a member's internal force and deflection curves
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DiagramSample {
    /// Distance from the member's start node
    pub position_from_start: f64,
    /// Axial force, tension positive
    pub axial: f64,
    /// Shear force in the member's local transverse direction
    pub shear: f64,
    /// Bending moment
    pub moment: f64,
    /// Transverse deflection in the member's local coordinates
    pub deflection: f64,
}

/// Sampled internal force diagrams for one user member. Split members are
/// re-aggregated: samples run the full member with positions measured from
/// its start node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDiagram {
    /// Member id
    pub member_id: MemberId,
    /// Samples in ascending position order
    pub samples: Vec<DiagramSample>,
}

impl MemberDiagram {
    /// Largest absolute bending moment over the sampled positions
    pub fn max_abs_moment(&self) -> f64 {
        self.samples
            .iter()
            .fold(0.0_f64, |m, s| m.max(s.moment.abs()))
    }

    /// Largest absolute shear over the sampled positions
    pub fn max_abs_shear(&self) -> f64 {
        self.samples
            .iter()
            .fold(0.0_f64, |m, s| m.max(s.shear.abs()))
    }

    /// Largest absolute deflection over the sampled positions
    pub fn max_abs_deflection(&self) -> f64 {
        self.samples
            .iter()
            .fold(0.0_f64, |m, s| m.max(s.deflection.abs()))
    }

    /// The sample closest to a given position from the member start
    pub fn sample_at(&self, position: f64) -> Option<&DiagramSample> {
        self.samples.iter().min_by(|a, b| {
            (a.position_from_start - position)
                .abs()
                .total_cmp(&(b.position_from_start - position).abs())
        })
    }
}

/// The complete, immutable outcome of one solve
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Per-node displacements, in definition order
    pub displacements: Vec<NodeDisplacement>,
    /// Per-supported-node reactions
    pub reactions: Vec<Reaction>,
    /// Per-member internal force diagrams, in definition order
    pub member_diagrams: Vec<MemberDiagram>,
}

impl ResultRecord {
    /// Displacement of a user node
    pub fn displacement(&self, node_id: NodeId) -> Option<&NodeDisplacement> {
        self.displacements.iter().find(|d| d.node_id == node_id)
    }

    /// Reaction at a supported node
    pub fn reaction(&self, node_id: NodeId) -> Option<&Reaction> {
        self.reactions.iter().find(|r| r.node_id == node_id)
    }

    /// Diagram for a user member
    pub fn diagram(&self, member_id: MemberId) -> Option<&MemberDiagram> {
        self.member_diagrams.iter().find(|d| d.member_id == member_id)
    }

    /// Sum of all reaction forces and moments `[fx, fy, m]`, moments taken
    /// about the origin
    pub fn total_reaction(&self) -> [f64; 3] {
        let mut total = [0.0; 3];
        for r in &self.reactions {
            total[0] += r.fx;
            total[1] += r.fy;
            total[2] += r.m;
        }
        total
    }

    /// Serialize the record to JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}
