//! Tectonic plate entity and plate-to-region bookkeeping.
//!
//! A plate does not own its regions: regions are shared surface data and carry
//! the assignment as an attribute (a plate id, looked up in the surface's plate
//! list). The plate owns only its member/edge id sets and its kinematic state.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::surface::{Region, RegionId, Surface};

/// Index of a plate within its surface's plate list.
pub type PlateId = usize;

/// A growing partition of regions simulating a rigid tectonic fragment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TectonicPlate {
    /// Index of this plate within its surface's plate list.
    pub id: PlateId,
    /// Rigid-motion direction and magnitude of the plate.
    pub shift: Vec3,
    /// Baseline elevation, assigned lazily on first use.
    pub elevation: Option<f32>,
    member_regions: Vec<RegionId>,
    edge_regions: Vec<RegionId>,
    expansion_finished: bool,
}

impl TectonicPlate {
    /// Creates an empty plate with the given motion vector.
    pub fn new(id: PlateId, shift: Vec3) -> Self {
        Self {
            id,
            shift,
            elevation: None,
            member_regions: Vec::new(),
            edge_regions: Vec::new(),
            expansion_finished: false,
        }
    }

    /// All regions claimed by this plate.
    pub fn member_regions(&self) -> &[RegionId] {
        &self.member_regions
    }

    /// Members on the active growth frontier (adjacent to unclaimed or
    /// foreign-plate regions at the time they were claimed).
    pub fn edge_regions(&self) -> &[RegionId] {
        &self.edge_regions
    }

    /// True once `expand` found nothing left to claim.
    pub fn expansion_finished(&self) -> bool {
        self.expansion_finished
    }

    /// Returns the plate currently assigned to the region, if any.
    pub fn plate_of_region(region: &Region) -> Option<PlateId> {
        region.attributes.plate()
    }

    /// Writes the plate assignment attribute on the region.
    ///
    /// Succeeds if the region has no assigned plate, or if `force_override`
    /// is set. Fails without mutating the region otherwise.
    pub fn assign_plate_to_region(plate: PlateId, region: &mut Region, force_override: bool) -> bool {
        if region.attributes.plate().is_some() && !force_override {
            return false;
        }
        region.attributes.set_plate(plate);
        true
    }

    /// Clears the region's plate assignment unconditionally.
    pub fn remove_plate_from_region(region: &mut Region) {
        region.attributes.clear_plate();
    }

    /// Clears the plate assignment on every region and drops the surface's
    /// plate list.
    pub fn remove_plates_from_surface(surface: &mut Surface) {
        for region in &mut surface.regions {
            Self::remove_plate_from_region(region);
        }
        surface.plates.clear();
    }

    /// Claims the region for this plate if it belongs to no other plate.
    ///
    /// On success the region joins both the member set and the growth
    /// frontier. Returns false if the region is already assigned.
    pub fn add_region(&mut self, region: &mut Region) -> bool {
        if !Self::assign_plate_to_region(self.id, region, false) {
            return false;
        }
        self.member_regions.push(region.id);
        self.edge_regions.push(region.id);
        true
    }

    /// Grows the plate by one ring.
    ///
    /// Every unclaimed neighbor of a current edge region is claimed and forms
    /// the new frontier. Missing neighbors are skipped; regions claimed by any
    /// plate stop propagation on that side. When a round claims nothing, the
    /// frontier is kept as-is and the plate marks itself finished; further
    /// calls are no-ops.
    ///
    /// Callers partitioning a surface between competing plates drive this for
    /// every plate in lockstep rounds so each plate advances one ring at a
    /// time.
    ///
    /// Returns whether any region was claimed.
    pub fn expand(&mut self, regions: &mut [Region]) -> bool {
        if self.expansion_finished {
            return false;
        }

        let frontier = std::mem::take(&mut self.edge_regions);
        let mut grown = false;

        for &edge_id in &frontier {
            let neighborhood = regions[edge_id].neighbors;
            for neighbor_id in neighborhood.into_iter().flatten() {
                if Self::plate_of_region(&regions[neighbor_id]).is_none()
                    && self.add_region(&mut regions[neighbor_id])
                {
                    grown = true;
                }
            }
        }

        if !grown {
            self.edge_regions = frontier;
            self.expansion_finished = true;
        }
        grown
    }
}
