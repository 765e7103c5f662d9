//! Concentrated loads on members

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;

/// Global direction of a concentrated load
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadDirection {
    /// Force along global X
    X,
    /// Force along global Y (negative = downward)
    #[default]
    Y,
}

/// A concentrated load applied at a distance from the member start.
///
/// Interior locations (`0 < d < L`) split the host member during
/// discretization so the load lands exactly on a node; `d = 0` and `d = L`
/// attach to the existing end nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PointLoad {
    /// Host member
    pub member_id: MemberId,
    /// Load magnitude
    pub magnitude: f64,
    /// Distance from the member's start node
    pub location_from_start: f64,
    /// Global direction the magnitude acts in
    #[serde(default)]
    pub direction: LoadDirection,
}

impl PointLoad {
    /// Create a new point load
    pub fn new(
        member_id: MemberId,
        magnitude: f64,
        location_from_start: f64,
        direction: LoadDirection,
    ) -> Self {
        Self {
            member_id,
            magnitude,
            location_from_start,
            direction,
        }
    }

    /// Create a downward (negative global Y) point load
    pub fn downward(member_id: MemberId, magnitude: f64, location_from_start: f64) -> Self {
        Self::new(
            member_id,
            -magnitude.abs(),
            location_from_start,
            LoadDirection::Y,
        )
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            magnitude: self.magnitude * factor,
            ..*self
        }
    }

    /// Force components in global coordinates `[fx, fy]`
    pub fn components(&self) -> [f64; 2] {
        match self.direction {
            LoadDirection::X => [self.magnitude, 0.0],
            LoadDirection::Y => [0.0, self.magnitude],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downward_is_negative_y() {
        let load = PointLoad::downward(1, 10.0, 5.0);
        assert_eq!(load.components(), [0.0, -10.0]);
    }

    #[test]
    fn test_direction_defaults_to_y() {
        let json = r#"{"member_id":1,"magnitude":-5.0,"location_from_start":2.0}"#;
        let load: PointLoad = serde_json::from_str(json).unwrap();
        assert_eq!(load.direction, LoadDirection::Y);
    }
}
