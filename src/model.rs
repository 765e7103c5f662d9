//! Structure definition - the immutable input snapshot for a solve

use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::elements::{Member, MemberId, Node, NodeId, Support};
use crate::error::{FrameError, FrameResult};
use crate::loads::{DistributedLoad, Load, PointLoad};

/// A complete description of a planar structure: nodes, members, supports
/// and loads.
///
/// The definition is a passive value. Construction helpers below do not
/// validate; all checks run once in [`StructureDefinition::validate`], which
/// the solve pipeline calls before touching the data. The pipeline never
/// mutates the definition, so a single value can back any number of solves.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureDefinition {
    /// User nodes
    pub nodes: Vec<Node>,
    /// Prismatic members between nodes
    pub members: Vec<Member>,
    /// Support conditions
    pub supports: Vec<Support>,
    /// Point and distributed loads
    pub loads: Vec<Load>,
}

impl StructureDefinition {
    /// Create an empty structure definition
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node
    pub fn add_node(&mut self, id: NodeId, x: f64, y: f64) -> &mut Self {
        self.nodes.push(Node::new(id, x, y));
        self
    }

    /// Add a member with section properties (E, I, A)
    pub fn add_member(
        &mut self,
        id: MemberId,
        start_node_id: NodeId,
        end_node_id: NodeId,
        e: f64,
        i: f64,
        a: f64,
    ) -> &mut Self {
        self.members
            .push(Member::new(id, start_node_id, end_node_id, e, i, a));
        self
    }

    /// Add a support condition
    pub fn add_support(&mut self, support: Support) -> &mut Self {
        self.supports.push(support);
        self
    }

    /// Add a load
    pub fn add_load(&mut self, load: Load) -> &mut Self {
        self.loads.push(load);
        self
    }

    /// Convenience: add a point load
    pub fn add_point_load(&mut self, load: PointLoad) -> &mut Self {
        self.add_load(Load::Point(load))
    }

    /// Convenience: add a distributed load
    pub fn add_distributed_load(&mut self, load: DistributedLoad) -> &mut Self {
        self.add_load(Load::Distributed(load))
    }

    /// Look up a node by user id
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Look up a member by user id
    pub fn member(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Length of a member, from its endpoint coordinates
    pub fn member_length(&self, member: &Member) -> Option<f64> {
        let start = self.node(member.start_node_id)?;
        let end = self.node(member.end_node_id)?;
        Some(start.distance_to(end))
    }

    /// Parse a definition from JSON
    pub fn from_json(json: &str) -> FrameResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the definition to JSON
    pub fn to_json(&self) -> FrameResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Content hash of the definition, suitable as a cache key.
    ///
    /// Hashes the canonical JSON form, so two definitions with identical
    /// content hash alike regardless of how they were built. Callers caching
    /// solves should key on this rather than any session identifier.
    pub fn content_hash(&self) -> FrameResult<u64> {
        let canonical = self.to_json()?;
        let mut hasher = std::collections::hash_map::DefaultHasher::new();
        canonical.hash(&mut hasher);
        Ok(hasher.finish())
    }

    /// Validate the definition without mutating it.
    ///
    /// Checks geometry (unique ids, no degenerate or duplicate members, no
    /// dangling references) and load placement (point loads within `[0, L]`).
    /// `min_length` is the coincidence tolerance below which a member counts
    /// as zero-length.
    pub fn validate(&self, min_length: f64) -> FrameResult<()> {
        let mut node_ids = HashSet::new();
        for node in &self.nodes {
            if !node.x.is_finite() || !node.y.is_finite() {
                return Err(FrameError::InvalidGeometry(format!(
                    "node {} has non-finite coordinates",
                    node.id
                )));
            }
            if !node_ids.insert(node.id) {
                return Err(FrameError::InvalidGeometry(format!(
                    "duplicate node id {}",
                    node.id
                )));
            }
        }

        let mut member_ids = HashSet::new();
        let mut endpoint_pairs = HashSet::new();
        for member in &self.members {
            if !member_ids.insert(member.id) {
                return Err(FrameError::InvalidGeometry(format!(
                    "duplicate member id {}",
                    member.id
                )));
            }
            if member.start_node_id == member.end_node_id {
                return Err(FrameError::InvalidGeometry(format!(
                    "member {} starts and ends at node {}",
                    member.id, member.start_node_id
                )));
            }
            for node_id in [member.start_node_id, member.end_node_id] {
                if !node_ids.contains(&node_id) {
                    return Err(FrameError::InvalidGeometry(format!(
                        "member {} references missing node {}",
                        member.id, node_id
                    )));
                }
            }
            let pair = (
                member.start_node_id.min(member.end_node_id),
                member.start_node_id.max(member.end_node_id),
            );
            if !endpoint_pairs.insert(pair) {
                return Err(FrameError::InvalidGeometry(format!(
                    "member {} duplicates another member between nodes {} and {}",
                    member.id, pair.0, pair.1
                )));
            }
            if !(member.e.is_finite() && member.i.is_finite() && member.a.is_finite())
                || member.e <= 0.0
                || member.i <= 0.0
                || member.a <= 0.0
            {
                return Err(FrameError::InvalidGeometry(format!(
                    "member {} has non-positive section properties",
                    member.id
                )));
            }
            let length = self
                .member_length(member)
                .unwrap_or(0.0);
            if length <= min_length {
                return Err(FrameError::InvalidGeometry(format!(
                    "member {} has zero length (L = {:.3e})",
                    member.id, length
                )));
            }
        }

        for support in &self.supports {
            if !node_ids.contains(&support.node_id) {
                return Err(FrameError::InvalidGeometry(format!(
                    "support references missing node {}",
                    support.node_id
                )));
            }
        }

        for load in &self.loads {
            let member = self.member(load.member_id()).ok_or_else(|| {
                FrameError::InvalidGeometry(format!(
                    "load references missing member {}",
                    load.member_id()
                ))
            })?;
            if let Load::Point(point) = load {
                // member is validated above, so the length exists
                let length = self.member_length(member).unwrap_or(0.0);
                let d = point.location_from_start;
                if !d.is_finite() || d < 0.0 || d > length {
                    return Err(FrameError::InvalidLoad(format!(
                        "point load on member {} at d = {} is outside [0, {}]",
                        member.id, d, length
                    )));
                }
            }
        }

        Ok(())
    }
}
