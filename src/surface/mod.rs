//! Surface data structures: the region collection and its plates.

mod grid;
mod region;

pub use region::{Neighborhood, Region, RegionAttributes, RegionId, NEIGHBOR_COUNT};

use serde::{Deserialize, Serialize};

use crate::tectonics::TectonicPlate;

/// Per-face resolution used when a surface is requested without one.
pub const DEFAULT_RESOLUTION: u32 = 16;

/// A tessellated world surface: a fixed set of regions plus the plates
/// produced by partitioning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surface {
    resolution: u32,
    /// All regions of the surface, indexed by `RegionId`.
    pub regions: Vec<Region>,
    /// Plates produced by partitioning (empty until a partitioning step runs).
    pub plates: Vec<TectonicPlate>,
}

impl Surface {
    /// Builds a cube-sphere surface with the given per-face resolution.
    pub fn new(resolution: u32) -> Self {
        Self {
            resolution,
            regions: grid::build_regions(resolution),
            plates: Vec::new(),
        }
    }

    /// Wraps a hand-built region graph (irregular meshes, tests).
    ///
    /// The reported resolution is zero; region ids must match their index.
    pub fn from_regions(regions: Vec<Region>) -> Self {
        debug_assert!(regions.iter().enumerate().all(|(i, r)| r.id == i));
        Self {
            resolution: 0,
            regions,
            plates: Vec::new(),
        }
    }

    /// Returns the per-face grid resolution (zero for hand-built surfaces).
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn region_count(&self) -> usize {
        self.regions.len()
    }

    pub fn region(&self, id: RegionId) -> &Region {
        &self.regions[id]
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self::new(DEFAULT_RESOLUTION)
    }
}
