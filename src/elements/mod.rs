//! Structural entities of the user-level structure definition

pub mod member;
pub mod node;
pub mod support;

pub use member::Member;
pub use node::Node;
pub use support::{RollerDirection, Support, SupportKind};

/// Identifier for a user-defined node
pub type NodeId = usize;

/// Identifier for a user-defined member
pub type MemberId = usize;
