//! Load definitions at member granularity

pub mod distributed;
pub mod point;

pub use distributed::DistributedLoad;
pub use point::{LoadDirection, PointLoad};

use serde::{Deserialize, Serialize};

use crate::elements::MemberId;

/// A load applied to a member, tagged by kind on the wire
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Load {
    /// Concentrated load at a distance from the member start
    Point(PointLoad),
    /// Uniform transverse load over the full member length
    Distributed(DistributedLoad),
}

impl Load {
    /// The member this load is applied to
    pub fn member_id(&self) -> MemberId {
        match self {
            Load::Point(p) => p.member_id,
            Load::Distributed(d) => d.member_id,
        }
    }

    /// Return the same load with its magnitude scaled by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        match self {
            Load::Point(p) => Load::Point(p.scaled(factor)),
            Load::Distributed(d) => Load::Distributed(d.scaled(factor)),
        }
    }
}
