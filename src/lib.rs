//! frame2d - A native Rust 2D frame and truss analysis library
//!
//! This library implements the direct stiffness method for planar structures
//! made of nodes, prismatic members, supports and loads, inspired by
//! anastruct. It computes:
//! - Nodal displacements and rotations
//! - Support reactions
//! - Internal force diagrams (axial, shear, bending moment) and deflected
//!   shape per member
//!
//! Members are automatically split at interior point-load locations so every
//! point load lands exactly on a node; diagrams are re-aggregated back onto
//! the user-level members.
//!
//! ## Example
//! ```rust
//! use frame2d::prelude::*;
//!
//! // Simply supported 20 ft beam under a uniform downward load.
//! let mut structure = StructureDefinition::new();
//! structure.add_node(1, 0.0, 0.0);
//! structure.add_node(2, 20.0, 0.0);
//! structure.add_member(1, 1, 2, 29000.0, 510.0, 14.6);
//! structure.add_support(Support::pinned(1));
//! structure.add_support(Support::roller(2));
//! structure.add_distributed_load(DistributedLoad::new(1, -1.0));
//!
//! let results = frame2d::solve(&structure).unwrap();
//!
//! // Each support carries half the total load.
//! let r1 = results.reaction(1).unwrap();
//! assert!((r1.fy - 10.0).abs() < 1e-6);
//!
//! // Maximum moment wL^2/8 at midspan.
//! let diagram = results.diagram(1).unwrap();
//! assert!((diagram.max_abs_moment() - 50.0).abs() / 50.0 < 0.01);
//! ```

pub mod analysis;
pub mod elements;
pub mod error;
pub mod loads;
pub mod math;
pub mod mesh;
pub mod model;
pub mod results;

pub use analysis::{solve, solve_with_options, SolveOptions};

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{solve, solve_with_options, SolveOptions};
    pub use crate::elements::{
        Member, MemberId, Node, NodeId, RollerDirection, Support, SupportKind,
    };
    pub use crate::error::{FrameError, FrameResult};
    pub use crate::loads::{DistributedLoad, Load, LoadDirection, PointLoad};
    pub use crate::model::StructureDefinition;
    pub use crate::results::{
        DiagramSample, MemberDiagram, NodeDisplacement, Reaction, ResultRecord,
    };
}
