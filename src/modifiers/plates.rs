//! Plate partitioning modifier.
//!
//! Seeds a configured number of plates at random unclaimed regions, each with
//! a random shift vector, then grows every plate one ring per round until all
//! plates report their expansion finished. Lockstep rounds keep the partition
//! race-free and roughly Voronoi-like around the seeds.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{ModifierConfig, SurfaceModifier};
use crate::surface::Surface;
use crate::tectonics::TectonicPlate;

pub const DEFAULT_PLATE_COUNT: i64 = 12;
pub const DEFAULT_SHIFT_MAGNITUDE: f32 = 0.1;

/// Partitions a surface into tectonic plates.
///
/// Recognized options: `plateCount` (int), `shiftMagnitude` (float, upper
/// bound for plate motion magnitude), `seed` (int, optional; deterministic
/// partition when set).
#[derive(Debug, Default)]
pub struct PlateModifier {
    config: ModifierConfig,
}

impl PlateModifier {
    pub fn new(config: ModifierConfig) -> Self {
        Self { config }
    }
}

impl SurfaceModifier for PlateModifier {
    fn apply(&mut self, surface: &mut Surface) -> bool {
        let plate_count = self.config.get_i64("plateCount", DEFAULT_PLATE_COUNT).max(0) as usize;
        let shift_magnitude = self.config.get_f32("shiftMagnitude", DEFAULT_SHIFT_MAGNITUDE);
        let mut rng = match self.config.get_seed("seed") {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        // Repartitioning replaces any previous plate layout.
        TectonicPlate::remove_plates_from_surface(surface);

        let plate_count = plate_count.min(surface.regions.len());
        if plate_count == 0 {
            return true;
        }

        let mut plates: Vec<TectonicPlate> = Vec::with_capacity(plate_count);
        for id in 0..plate_count {
            let mut plate = TectonicPlate::new(id, random_shift(&mut rng, shift_magnitude));
            // Claimed seeds stay claimed, so each draw that lands on a taken
            // region just retries; plate_count <= region count guarantees a
            // free region exists.
            loop {
                let seed_region = rng.random_range(0..surface.regions.len());
                if plate.add_region(&mut surface.regions[seed_region]) {
                    break;
                }
            }
            plates.push(plate);
        }

        // Lockstep ring growth: every plate advances one ring per round.
        while plates.iter().any(|plate| !plate.expansion_finished()) {
            for plate in &mut plates {
                plate.expand(&mut surface.regions);
            }
        }

        surface.plates = plates;
        true
    }

    fn config(&self) -> &ModifierConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ModifierConfig {
        &mut self.config
    }
}

/// Random motion vector with magnitude up to `magnitude`.
fn random_shift(rng: &mut ChaCha8Rng, magnitude: f32) -> Vec3 {
    let direction = Vec3::new(
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
        rng.random::<f32>() * 2.0 - 1.0,
    );
    let scale = rng.random::<f32>() * magnitude;
    if direction.length() > 1e-6 {
        direction.normalize() * scale
    } else {
        Vec3::X * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tectonics::PlateId;

    fn partitioned_surface(seed: i64, plate_count: i64) -> Surface {
        let mut surface = Surface::new(8);
        let mut modifier = PlateModifier::default();
        modifier
            .config_mut()
            .set_i64("plateCount", plate_count)
            .set_i64("seed", seed);
        assert!(modifier.apply(&mut surface));
        surface
    }

    #[test]
    fn test_every_region_assigned() {
        let surface = partitioned_surface(42, 6);
        assert_eq!(surface.plates.len(), 6);
        for region in &surface.regions {
            let plate = TectonicPlate::plate_of_region(region);
            assert!(plate.is_some(), "region {} left unassigned", region.id);
            assert!(plate.unwrap() < surface.plates.len());
        }
    }

    #[test]
    fn test_members_match_assignments() {
        let surface = partitioned_surface(7, 4);
        let mut total = 0;
        for plate in &surface.plates {
            assert!(plate.expansion_finished());
            total += plate.member_regions().len();
            for &member in plate.member_regions() {
                assert_eq!(
                    TectonicPlate::plate_of_region(&surface.regions[member]),
                    Some(plate.id)
                );
            }
        }
        assert_eq!(total, surface.region_count());
    }

    #[test]
    fn test_partition_deterministic_under_seed() {
        let a = partitioned_surface(123, 5);
        let b = partitioned_surface(123, 5);
        let plates_of = |surface: &Surface| -> Vec<Option<PlateId>> {
            surface
                .regions
                .iter()
                .map(TectonicPlate::plate_of_region)
                .collect()
        };
        assert_eq!(plates_of(&a), plates_of(&b));
        for (pa, pb) in a.plates.iter().zip(&b.plates) {
            assert_eq!(pa.shift, pb.shift);
        }
    }

    #[test]
    fn test_repartition_replaces_previous_layout() {
        let mut surface = partitioned_surface(1, 3);
        let mut modifier = PlateModifier::default();
        modifier.config_mut().set_i64("plateCount", 5).set_i64("seed", 2);
        assert!(modifier.apply(&mut surface));
        assert_eq!(surface.plates.len(), 5);
    }

    #[test]
    fn test_zero_plates_is_a_noop_partition() {
        let mut surface = Surface::new(2);
        let mut modifier = PlateModifier::default();
        modifier.config_mut().set_i64("plateCount", 0);
        assert!(modifier.apply(&mut surface));
        assert!(surface.plates.is_empty());
        assert!(TectonicPlate::plate_of_region(&surface.regions[0]).is_none());
    }

    #[test]
    fn test_shift_magnitude_bounds() {
        let surface = partitioned_surface(9, 8);
        for plate in &surface.plates {
            assert!(plate.shift.length() <= DEFAULT_SHIFT_MAGNITUDE + 1e-6);
        }
    }
}
