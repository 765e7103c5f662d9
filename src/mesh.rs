//! Discretizer - turns the user structure into a solver mesh
//!
//! Members are split at interior point-load locations so every point load
//! lands exactly on a node. Node identity is resolved through a spatial
//! arena keyed by quantized coordinates: any two coordinates within the
//! coincidence tolerance refer to the same mesh node, so split points that
//! coincide with pre-existing nodes never create duplicate DOFs.

use std::collections::HashMap;

use log::debug;

use crate::elements::{MemberId, NodeId};
use crate::error::{FrameError, FrameResult};
use crate::loads::{Load, PointLoad};
use crate::model::StructureDefinition;

/// A solver-level node. Its index in [`Mesh::nodes`] is its identity; global
/// DOFs are `(3n, 3n + 1, 3n + 2)` for node index `n`.
#[derive(Debug, Clone, Copy)]
pub struct MeshNode {
    pub x: f64,
    pub y: f64,
}

/// A solver-level element generated from a member segment
#[derive(Debug, Clone, Copy)]
pub struct Element {
    /// Start mesh node index
    pub start: usize,
    /// End mesh node index
    pub end: usize,
    /// Parent member
    pub member_id: MemberId,
    /// Modulus of elasticity, inherited from the parent member
    pub e: f64,
    /// Second moment of area
    pub i: f64,
    /// Cross-sectional area
    pub a: f64,
    /// Segment length
    pub length: f64,
    /// Direction cosine of the member axis
    pub cos: f64,
    /// Direction sine of the member axis
    pub sin: f64,
    /// Uniform transverse load intensity carried by this element
    pub w: f64,
}

impl Element {
    /// Global DOF indices `[u1, v1, th1, u2, v2, th2]`
    pub fn dof_indices(&self) -> [usize; 6] {
        [
            3 * self.start,
            3 * self.start + 1,
            3 * self.start + 2,
            3 * self.end,
            3 * self.end + 1,
            3 * self.end + 2,
        ]
    }
}

/// The discretized structure: final node/element mesh with DOF numbering
#[derive(Debug, Clone)]
pub struct Mesh {
    /// Mesh nodes; immutable once built
    pub nodes: Vec<MeshNode>,
    /// Generated elements
    pub elements: Vec<Element>,
    /// Elements generated per member, in geometric order from the member
    /// start. Needed to re-aggregate diagrams onto user members.
    pub member_elements: HashMap<MemberId, Vec<usize>>,
    /// User node id to mesh node index
    pub user_nodes: HashMap<NodeId, usize>,
    /// Accumulated point forces `(node index, [fx, fy])` in global axes
    pub nodal_forces: Vec<(usize, [f64; 2])>,
}

impl Mesh {
    /// Total number of global DOFs
    pub fn dof_count(&self) -> usize {
        3 * self.nodes.len()
    }

    /// Element indices generated for a member, in geometric order
    pub fn elements_of(&self, member_id: MemberId) -> Option<&[usize]> {
        self.member_elements.get(&member_id).map(|v| v.as_slice())
    }
}

/// Spatial node lookup keyed by quantized coordinates. Probes the 3x3 key
/// neighborhood so coincidence holds across bucket boundaries.
struct NodeArena {
    epsilon: f64,
    nodes: Vec<MeshNode>,
    buckets: HashMap<(i64, i64), Vec<usize>>,
}

impl NodeArena {
    fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            nodes: Vec::new(),
            buckets: HashMap::new(),
        }
    }

    fn key(&self, x: f64, y: f64) -> (i64, i64) {
        (
            (x / self.epsilon).round() as i64,
            (y / self.epsilon).round() as i64,
        )
    }

    fn find(&self, x: f64, y: f64) -> Option<usize> {
        let (kx, ky) = self.key(x, y);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(indices) = self.buckets.get(&(kx + dx, ky + dy)) {
                    for &idx in indices {
                        let node = &self.nodes[idx];
                        if (node.x - x).hypot(node.y - y) <= self.epsilon {
                            return Some(idx);
                        }
                    }
                }
            }
        }
        None
    }

    fn find_or_insert(&mut self, x: f64, y: f64) -> usize {
        if let Some(idx) = self.find(x, y) {
            return idx;
        }
        let idx = self.nodes.len();
        self.nodes.push(MeshNode { x, y });
        self.buckets.entry(self.key(x, y)).or_default().push(idx);
        idx
    }
}

/// Discretize a validated structure definition into a solver mesh.
///
/// `epsilon` is the node coincidence tolerance. Point loads at interior
/// locations split their member into segments; loads at `d = 0` or `d = L`
/// attach to the existing end nodes. Two point loads within `epsilon` of the
/// same location share one split node and their magnitudes sum there.
pub fn discretize(def: &StructureDefinition, epsilon: f64) -> FrameResult<Mesh> {
    let mut arena = NodeArena::new(epsilon);

    // User nodes go in first so split points that coincide with them are
    // reused instead of duplicated.
    let mut user_nodes = HashMap::new();
    for node in &def.nodes {
        let idx = arena.find_or_insert(node.x, node.y);
        user_nodes.insert(node.id, idx);
    }

    let mut elements: Vec<Element> = Vec::new();
    let mut member_elements: HashMap<MemberId, Vec<usize>> = HashMap::new();
    let mut forces: HashMap<usize, [f64; 2]> = HashMap::new();

    for member in &def.members {
        let start = def.node(member.start_node_id).ok_or_else(|| {
            FrameError::InvalidGeometry(format!(
                "member {} references missing node {}",
                member.id, member.start_node_id
            ))
        })?;
        let end = def.node(member.end_node_id).ok_or_else(|| {
            FrameError::InvalidGeometry(format!(
                "member {} references missing node {}",
                member.id, member.end_node_id
            ))
        })?;

        let (dx, dy) = (end.x - start.x, end.y - start.y);
        let length = dx.hypot(dy);
        let (cos, sin) = (dx / length, dy / length);

        // All distributed intensities on the member act on every segment.
        let w: f64 = def
            .loads
            .iter()
            .filter_map(|load| match load {
                Load::Distributed(d) if d.member_id == member.id => Some(d.magnitude),
                _ => None,
            })
            .sum();

        let mut point_loads: Vec<&PointLoad> = def
            .loads
            .iter()
            .filter_map(|load| match load {
                Load::Point(p) if p.member_id == member.id => Some(p),
                _ => None,
            })
            .collect();
        point_loads.sort_by(|a, b| a.location_from_start.total_cmp(&b.location_from_start));

        // Cut distances: member ends plus every interior load location,
        // ascending, merged within epsilon.
        let mut cuts = vec![0.0];
        for load in &point_loads {
            let d = load.location_from_start;
            if d > epsilon && d < length - epsilon {
                let last = *cuts.last().unwrap_or(&0.0);
                if d - last > epsilon {
                    cuts.push(d);
                }
            }
        }
        cuts.push(length);

        let cut_nodes: Vec<usize> = cuts
            .iter()
            .map(|&d| {
                let t = d / length;
                arena.find_or_insert(start.x + t * dx, start.y + t * dy)
            })
            .collect();

        let mut generated = Vec::with_capacity(cuts.len() - 1);
        for k in 0..cuts.len() - 1 {
            elements.push(Element {
                start: cut_nodes[k],
                end: cut_nodes[k + 1],
                member_id: member.id,
                e: member.e,
                i: member.i,
                a: member.a,
                length: cuts[k + 1] - cuts[k],
                cos,
                sin,
                w,
            });
            generated.push(elements.len() - 1);
        }
        member_elements.insert(member.id, generated);

        // Every point load now lands on one of the cut nodes.
        for load in &point_loads {
            let d = load.location_from_start;
            let cut = cuts
                .iter()
                .position(|&c| (c - d).abs() <= epsilon)
                .ok_or_else(|| {
                    FrameError::InvalidLoad(format!(
                        "point load at d = {} on member {} does not fall on a mesh node",
                        d, member.id
                    ))
                })?;
            let [fx, fy] = load.components();
            let entry = forces.entry(cut_nodes[cut]).or_insert([0.0; 2]);
            entry[0] += fx;
            entry[1] += fy;
        }
    }

    let mut nodal_forces: Vec<(usize, [f64; 2])> = forces.into_iter().collect();
    nodal_forces.sort_by_key(|&(idx, _)| idx);

    debug!(
        "discretized {} members into {} elements over {} nodes",
        def.members.len(),
        elements.len(),
        arena.nodes.len()
    );

    Ok(Mesh {
        nodes: arena.nodes,
        elements,
        member_elements,
        user_nodes,
        nodal_forces,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::Support;
    use crate::loads::PointLoad;
    use approx::assert_relative_eq;

    fn beam(length: f64) -> StructureDefinition {
        let mut def = StructureDefinition::new();
        def.add_node(1, 0.0, 0.0)
            .add_node(2, length, 0.0)
            .add_member(1, 1, 2, 29000.0, 510.0, 14.6)
            .add_support(Support::pinned(1))
            .add_support(Support::roller(2));
        def
    }

    #[test]
    fn test_unsplit_member_is_one_element() {
        let def = beam(10.0);
        let mesh = discretize(&def, 1e-6).unwrap();
        assert_eq!(mesh.nodes.len(), 2);
        assert_eq!(mesh.elements.len(), 1);
        assert_eq!(mesh.elements_of(1).unwrap().len(), 1);
    }

    #[test]
    fn test_interior_load_splits_member() {
        let mut def = beam(10.0);
        def.add_point_load(PointLoad::downward(1, 10.0, 4.0));
        let mesh = discretize(&def, 1e-6).unwrap();

        assert_eq!(mesh.nodes.len(), 3);
        assert_eq!(mesh.elements.len(), 2);

        let ids = mesh.elements_of(1).unwrap();
        let first = &mesh.elements[ids[0]];
        let second = &mesh.elements[ids[1]];

        // Geometric order: first segment touches the member start, last
        // touches the member end, and they share the split node.
        assert_eq!(first.start, mesh.user_nodes[&1]);
        assert_eq!(second.end, mesh.user_nodes[&2]);
        assert_eq!(first.end, second.start);
        assert_relative_eq!(first.length, 4.0, epsilon = 1e-12);
        assert_relative_eq!(second.length, 6.0, epsilon = 1e-12);

        // The shared node carries exactly the applied load.
        assert_eq!(mesh.nodal_forces.len(), 1);
        let (node, [fx, fy]) = mesh.nodal_forces[0];
        assert_eq!(node, first.end);
        assert_relative_eq!(fx, 0.0);
        assert_relative_eq!(fy, -10.0);
    }

    #[test]
    fn test_multiple_interior_loads() {
        let mut def = beam(10.0);
        def.add_point_load(PointLoad::downward(1, 5.0, 7.5))
            .add_point_load(PointLoad::downward(1, 10.0, 2.5))
            .add_point_load(PointLoad::downward(1, 10.0, 5.0));
        let mesh = discretize(&def, 1e-6).unwrap();

        let ids = mesh.elements_of(1).unwrap();
        assert_eq!(ids.len(), 4);
        let lengths: Vec<f64> = ids.iter().map(|&i| mesh.elements[i].length).collect();
        for len in lengths {
            assert_relative_eq!(len, 2.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_coincident_loads_merge() {
        let mut def = beam(10.0);
        def.add_point_load(PointLoad::downward(1, 10.0, 5.0))
            .add_point_load(PointLoad::downward(1, 2.0, 5.0));
        let mesh = discretize(&def, 1e-6).unwrap();

        // One split node, magnitudes summed there.
        assert_eq!(mesh.elements.len(), 2);
        assert_eq!(mesh.nodal_forces.len(), 1);
        assert_relative_eq!(mesh.nodal_forces[0].1[1], -12.0);
    }

    #[test]
    fn test_end_loads_attach_without_splitting() {
        let mut def = beam(10.0);
        def.add_point_load(PointLoad::downward(1, 10.0, 0.0))
            .add_point_load(PointLoad::downward(1, 5.0, 10.0));
        let mesh = discretize(&def, 1e-6).unwrap();

        assert_eq!(mesh.elements.len(), 1);
        assert_eq!(mesh.nodal_forces.len(), 2);
        assert_relative_eq!(mesh.nodal_forces[0].1[1], -10.0);
        assert_relative_eq!(mesh.nodal_forces[1].1[1], -5.0);
    }

    #[test]
    fn test_split_reuses_coincident_user_node() {
        // A user node already sits at the split location; no new node may
        // be created there.
        let mut def = StructureDefinition::new();
        def.add_node(1, 0.0, 0.0)
            .add_node(2, 10.0, 0.0)
            .add_node(3, 4.0, 0.0)
            .add_member(1, 1, 2, 1.0, 1.0, 1.0)
            .add_point_load(PointLoad::downward(1, 10.0, 4.0));
        let mesh = discretize(&def, 1e-6).unwrap();

        assert_eq!(mesh.nodes.len(), 3);
        assert_eq!(mesh.nodal_forces[0].0, mesh.user_nodes[&3]);
    }

    #[test]
    fn test_coincident_user_nodes_deduplicate() {
        let mut def = StructureDefinition::new();
        def.add_node(1, 0.0, 0.0).add_node(2, 0.0, 0.0);
        let mesh = discretize(&def, 1e-6).unwrap();
        assert_eq!(mesh.nodes.len(), 1);
        assert_eq!(mesh.user_nodes[&1], mesh.user_nodes[&2]);
    }

    #[test]
    fn test_distributed_load_covers_all_segments() {
        let mut def = beam(10.0);
        def.add_distributed_load(crate::loads::DistributedLoad::new(1, -2.0))
            .add_point_load(PointLoad::downward(1, 10.0, 5.0));
        let mesh = discretize(&def, 1e-6).unwrap();

        assert_eq!(mesh.elements.len(), 2);
        for el in &mesh.elements {
            assert_relative_eq!(el.w, -2.0);
        }
    }

    #[test]
    fn test_inclined_member_direction() {
        let mut def = StructureDefinition::new();
        def.add_node(1, 0.0, 0.0)
            .add_node(2, 3.0, 4.0)
            .add_member(1, 1, 2, 1.0, 1.0, 1.0);
        let mesh = discretize(&def, 1e-6).unwrap();

        let el = &mesh.elements[0];
        assert_relative_eq!(el.length, 5.0, epsilon = 1e-12);
        assert_relative_eq!(el.cos, 0.6, epsilon = 1e-12);
        assert_relative_eq!(el.sin, 0.8, epsilon = 1e-12);
    }
}
