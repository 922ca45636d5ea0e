//! Region entity: position, fixed-arity neighborhood, and typed attributes.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tectonics::PlateId;

/// Index of a region within its surface's region collection.
pub type RegionId = usize;

/// Fixed neighbor arity of the region graph (von Neumann neighborhood
/// on the cube-sphere grid).
pub const NEIGHBOR_COUNT: usize = 4;

/// Fixed-size neighbor list. `None` marks a missing neighbor.
pub type Neighborhood = [Option<RegionId>; NEIGHBOR_COUNT];

/// Typed attribute store for a region.
///
/// Presence is explicit: an attribute that has not been computed is `None`,
/// never a sentinel value.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RegionAttributes {
    elevation: Option<f32>,
    plate: Option<PlateId>,
}

impl RegionAttributes {
    /// Returns the computed elevation, if any.
    pub fn elevation(&self) -> Option<f32> {
        self.elevation
    }

    pub fn set_elevation(&mut self, value: f32) {
        self.elevation = Some(value);
    }

    pub fn clear_elevation(&mut self) {
        self.elevation = None;
    }

    /// Returns the id of the plate this region is assigned to, if any.
    pub fn plate(&self) -> Option<PlateId> {
        self.plate
    }

    pub fn set_plate(&mut self, plate: PlateId) {
        self.plate = Some(plate);
    }

    pub fn clear_plate(&mut self) {
        self.plate = None;
    }
}

/// Atomic unit of the world surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Region {
    /// Index of this region within its surface.
    pub id: RegionId,
    /// Position in global coordinates (on the unit sphere for grid-built
    /// surfaces; arbitrary for hand-built region graphs).
    pub position: Vec3,
    /// Adjacent region ids.
    pub neighbors: Neighborhood,
    /// Computed surface attributes.
    pub attributes: RegionAttributes,
}

impl Region {
    /// Creates a region with no computed attributes.
    pub fn new(id: RegionId, position: Vec3, neighbors: Neighborhood) -> Self {
        Self {
            id,
            position,
            neighbors,
            attributes: RegionAttributes::default(),
        }
    }
}
