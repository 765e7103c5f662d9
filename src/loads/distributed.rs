//! Distributed loads on members

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;

/// A uniform transverse load over the full length of a member.
///
/// The intensity acts perpendicular to the member axis (local y), so for a
/// horizontal member a negative magnitude points downward. When a member is
/// split at point loads, every generated sub-element inherits the intensity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Host member
    pub member_id: MemberId,
    /// Intensity per unit length
    pub magnitude: f64,
}

impl DistributedLoad {
    /// Create a new uniform distributed load
    pub fn new(member_id: MemberId, magnitude: f64) -> Self {
        Self {
            member_id,
            magnitude,
        }
    }

    /// Create a downward (negative) uniform load
    pub fn downward(member_id: MemberId, magnitude: f64) -> Self {
        Self::new(member_id, -magnitude.abs())
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            ..*self
        }
    }

    /// Total force over a member of the given length
    pub fn total_force(&self, length: f64) -> f64 {
        self.magnitude * length
    }
}
