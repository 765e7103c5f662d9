//! Node - a point in the 2D structure

use serde::{Deserialize, Serialize};

use super::NodeId;

/// A user-defined node in the plane
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Node {
    /// User-assigned identifier
    pub id: NodeId,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
}

impl Node {
    /// Create a new node at the given coordinates
    pub fn new(id: NodeId, x: f64, y: f64) -> Self {
        Self { id, x, y }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 2] {
        [self.x, self.y]
    }

    /// Calculate distance to another node
    pub fn distance_to(&self, other: &Node) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}
