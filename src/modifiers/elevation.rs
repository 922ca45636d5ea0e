//! Elevation synthesis from plate kinematics, boundary pressure, and noise.
//!
//! Two-stage model: a coarse per-plate signal (random baseline plus optional
//! octave noise) and, where a complete plate partition exists, a boundary
//! pressure term derived from the relative motion of adjacent plates, followed
//! by an optional neighbor-smoothing filter.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::{ModifierConfig, SurfaceModifier};
use crate::noise::octave_noise_3d;
use crate::surface::{Region, RegionId, Surface};
use crate::tectonics::TectonicPlate;

pub const DEFAULT_COLLISION_STRENGTH: f32 = 0.25;
pub const DEFAULT_PERLIN_FREQUENCY: f32 = 2.0;
pub const DEFAULT_PERLIN_OCTAVES: i64 = 4;
pub const DEFAULT_PERLIN_STRENGTH: f32 = 0.35;
pub const DEFAULT_ELEVATION_RANDOM_RANGE: f32 = 0.5;

/// Computes per-region elevation.
///
/// Recognized options: `usePerlin`, `useFilter`, `usePlateCollisions` (bools),
/// `collisionStrength`, `perlinFrequency`, `perlinStrength`,
/// `elevationRandomRange` (floats), `perlinOctaves` (int), and an optional
/// `seed` (int) for reproducible output.
#[derive(Debug, Default)]
pub struct ElevationModifier {
    config: ModifierConfig,
}

impl ElevationModifier {
    pub fn new(config: ModifierConfig) -> Self {
        Self { config }
    }
}

impl SurfaceModifier for ElevationModifier {
    /// Computes elevation for every region of the surface.
    ///
    /// When plate collisions are enabled and the partition is complete, the
    /// collision pass writes the final elevations. Otherwise every region
    /// falls back to the plate-baseline model; regions without a plate keep
    /// their elevation unset. This modifier has no hard failure mode and
    /// always reports success.
    fn apply(&mut self, surface: &mut Surface) -> bool {
        let mut pass = ElevationPass::from_config(&self.config);

        if !pass.calculate_plate_collisions(surface) {
            let Surface { regions, plates, .. } = surface;
            for id in 0..regions.len() {
                regions[id].attributes.clear_elevation();
                if let Some(elevation) = pass.elevation_of(regions, plates, id) {
                    regions[id].attributes.set_elevation(elevation);
                }
            }
        }
        true
    }

    fn config(&self) -> &ModifierConfig {
        &self.config
    }

    fn config_mut(&mut self) -> &mut ModifierConfig {
        &mut self.config
    }
}

/// Options snapshot plus RNG state for a single `apply` invocation.
struct ElevationPass {
    use_perlin: bool,
    use_filter: bool,
    use_plate_collisions: bool,
    collision_strength: f32,
    perlin_frequency: f32,
    perlin_octaves: u32,
    perlin_strength: f32,
    elevation_random_range: f32,
    rng: ChaCha8Rng,
    noise_seed: i32,
}

impl ElevationPass {
    /// Re-reads every option and re-seeds the RNG and noise generator.
    /// Without a `seed` option, each pass draws from process entropy.
    fn from_config(config: &ModifierConfig) -> Self {
        let mut rng = match config.get_seed("seed") {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        let noise_seed = rng.random::<i32>();

        Self {
            use_perlin: config.get_bool("usePerlin", true),
            use_filter: config.get_bool("useFilter", true),
            use_plate_collisions: config.get_bool("usePlateCollisions", true),
            collision_strength: config.get_f32("collisionStrength", DEFAULT_COLLISION_STRENGTH),
            perlin_frequency: config.get_f32("perlinFrequency", DEFAULT_PERLIN_FREQUENCY),
            perlin_octaves: config.get_i64("perlinOctaves", DEFAULT_PERLIN_OCTAVES).max(1) as u32,
            perlin_strength: config.get_f32("perlinStrength", DEFAULT_PERLIN_STRENGTH),
            elevation_random_range: config
                .get_f32("elevationRandomRange", DEFAULT_ELEVATION_RANDOM_RANGE),
            rng,
            noise_seed,
        }
    }

    /// Boundary-pressure elevation model.
    ///
    /// Accumulates collision pressure into every plate's edge regions, then
    /// runs a full-surface pass that materializes the remaining elevations and
    /// optionally folds in each neighbor's elevation as an order-dependent
    /// running average.
    ///
    /// Returns false — leaving the caller to the fallback baseline model —
    /// when disabled, or when any region encountered mid-pass has no plate
    /// assignment (partitioning incomplete).
    fn calculate_plate_collisions(&mut self, surface: &mut Surface) -> bool {
        if !self.use_plate_collisions {
            return false;
        }

        let Surface { regions, plates, .. } = surface;

        for plate_id in 0..plates.len() {
            let edges = plates[plate_id].edge_regions().to_vec();
            for region_id in edges {
                let Some(mut total) = self.elevation_of(regions, plates, region_id) else {
                    return false;
                };

                let neighborhood = regions[region_id].neighbors;
                for neighbor_id in neighborhood.into_iter().flatten() {
                    let neighbor = &regions[neighbor_id];
                    let Some(neighbor_plate) = TectonicPlate::plate_of_region(neighbor) else {
                        return false;
                    };

                    if neighbor_plate != plate_id {
                        let pressure = compute_pressure(
                            &plates[plate_id],
                            &plates[neighbor_plate],
                            &regions[region_id],
                            neighbor,
                        );
                        total += pressure * self.collision_strength;
                    }
                }

                regions[region_id].attributes.set_elevation(total);
            }
        }

        for region_id in 0..regions.len() {
            let Some(mut elevation) = self.elevation_of(regions, plates, region_id) else {
                return false;
            };

            if self.use_filter {
                let neighborhood = regions[region_id].neighbors;
                for neighbor_id in neighborhood.into_iter().flatten() {
                    let Some(increment) = self.elevation_of(regions, plates, neighbor_id) else {
                        return false;
                    };
                    // Earlier neighbors weigh more; neighbor order is the
                    // tie-break, and writes are visible to later regions.
                    elevation = (elevation + increment) * 0.5;
                }
            }

            regions[region_id].attributes.set_elevation(elevation);
        }

        true
    }

    /// Baseline elevation estimate for one region.
    ///
    /// An already-computed elevation attribute is returned as-is. Otherwise
    /// the region's plate supplies its baseline (drawn lazily, once per
    /// plate, from `[-elevationRandomRange, elevationRandomRange]`), plus the
    /// noise contribution when enabled. Returns `None` for unpartitioned
    /// regions.
    fn elevation_of(
        &mut self,
        regions: &[Region],
        plates: &mut [TectonicPlate],
        id: RegionId,
    ) -> Option<f32> {
        let region = &regions[id];
        if let Some(elevation) = region.attributes.elevation() {
            return Some(elevation);
        }

        let plate = &mut plates[TectonicPlate::plate_of_region(region)?];
        let baseline = match plate.elevation {
            Some(value) => value,
            None => {
                let range = self.elevation_random_range;
                let value = if range > 0.0 {
                    self.rng.random_range(-range..=range)
                } else {
                    0.0
                };
                plate.elevation = Some(value);
                value
            }
        };

        if self.use_perlin {
            let pos = region.position * self.perlin_frequency;
            let sample = octave_noise_3d(pos, self.perlin_octaves, self.noise_seed);
            return Some(baseline + sample * self.perlin_strength);
        }
        Some(baseline)
    }
}

/// Collision pressure between two plates at a shared boundary.
///
/// Each side contributes its local tangential motion (the unit-sphere
/// displacement produced by the plate's shift at that point) projected onto
/// the direction joining the two regions, scaled by the shift magnitude.
/// Positive pressure means the plates converge at this boundary; negative
/// means they diverge.
pub fn compute_pressure(
    plate_a: &TectonicPlate,
    plate_b: &TectonicPlate,
    region_a: &Region,
    region_b: &Region,
) -> f32 {
    let v1 = region_a.position;
    let v2 = region_b.position;

    let direction = (v2 - v1).normalize();
    let t1 = (v1 + plate_a.shift).normalize() - v1;
    let t2 = (v2 + plate_b.shift).normalize() - v2;

    let d1 = t1.dot(direction) * plate_a.shift.length();
    let d2 = t2.dot(-direction) * plate_b.shift.length();

    d1 + d2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifiers::PlateModifier;
    use crate::surface::NEIGHBOR_COUNT;
    use glam::Vec3;

    /// Two mutually adjacent regions on opposing plates whose shifts point
    /// straight at each other with magnitude `m`. The geometry is chosen so
    /// each side's tangential displacement projects fully onto the joining
    /// direction, making the expected pressure exactly `2 * m`.
    fn colliding_surface(m: f32) -> Surface {
        let mut surface = Surface::from_regions(vec![
            Region::new(0, Vec3::ZERO, [Some(1), None, None, None]),
            Region::new(1, Vec3::new(2.0, 0.0, 0.0), [Some(0), None, None, None]),
        ]);

        let mut plate_a = TectonicPlate::new(0, Vec3::new(m, 0.0, 0.0));
        let mut plate_b = TectonicPlate::new(1, Vec3::new(-m, 0.0, 0.0));
        assert!(plate_a.add_region(&mut surface.regions[0]));
        assert!(plate_b.add_region(&mut surface.regions[1]));
        surface.plates = vec![plate_a, plate_b];
        surface
    }

    fn collision_config() -> ModifierConfig {
        let mut config = ModifierConfig::new();
        config
            .set_bool("usePerlin", false)
            .set_bool("useFilter", false)
            .set_bool("usePlateCollisions", true)
            .set_f32("collisionStrength", 1.0)
            .set_f32("elevationRandomRange", 0.0);
        config
    }

    #[test]
    fn test_pressure_sign_convergent() {
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);
        let toward = (v2 - v1).normalize() * 0.2;

        let plate_a = TectonicPlate::new(0, toward);
        let plate_b = TectonicPlate::new(1, -toward);
        let region_a = Region::new(0, v1, [None; NEIGHBOR_COUNT]);
        let region_b = Region::new(1, v2, [None; NEIGHBOR_COUNT]);

        assert!(compute_pressure(&plate_a, &plate_b, &region_a, &region_b) > 0.0);
    }

    #[test]
    fn test_pressure_sign_divergent() {
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);
        let away = (v1 - v2).normalize() * 0.2;

        let plate_a = TectonicPlate::new(0, away);
        let plate_b = TectonicPlate::new(1, -away);
        let region_a = Region::new(0, v1, [None; NEIGHBOR_COUNT]);
        let region_b = Region::new(1, v2, [None; NEIGHBOR_COUNT]);

        assert!(compute_pressure(&plate_a, &plate_b, &region_a, &region_b) < 0.0);
    }

    #[test]
    fn test_pressure_zero_for_static_plates() {
        let plate_a = TectonicPlate::new(0, Vec3::ZERO);
        let plate_b = TectonicPlate::new(1, Vec3::ZERO);
        let region_a = Region::new(0, Vec3::X, [None; NEIGHBOR_COUNT]);
        let region_b = Region::new(1, Vec3::Y, [None; NEIGHBOR_COUNT]);

        assert_eq!(compute_pressure(&plate_a, &plate_b, &region_a, &region_b), 0.0);
    }

    #[test]
    fn test_head_on_collision_end_to_end() {
        let m = 0.5;
        let mut surface = colliding_surface(m);
        let mut modifier = ElevationModifier::new(collision_config());

        assert!(modifier.apply(&mut surface));

        for region in &surface.regions {
            let elevation = region.attributes.elevation().expect("elevation set");
            assert!(
                (elevation - 2.0 * m).abs() < 1e-6,
                "region {} expected {}, got {}",
                region.id,
                2.0 * m,
                elevation
            );
        }
    }

    #[test]
    fn test_divergent_boundary_lowers_elevation() {
        // Unit-sphere positions with shifts pulling the plates apart.
        let v1 = Vec3::new(1.0, 0.0, 0.0);
        let v2 = Vec3::new(0.0, 1.0, 0.0);
        let away = (v1 - v2).normalize() * 0.3;

        let mut surface = Surface::from_regions(vec![
            Region::new(0, v1, [Some(1), None, None, None]),
            Region::new(1, v2, [Some(0), None, None, None]),
        ]);
        let mut plate_a = TectonicPlate::new(0, away);
        let mut plate_b = TectonicPlate::new(1, -away);
        assert!(plate_a.add_region(&mut surface.regions[0]));
        assert!(plate_b.add_region(&mut surface.regions[1]));
        surface.plates = vec![plate_a, plate_b];

        let mut modifier = ElevationModifier::new(collision_config());
        assert!(modifier.apply(&mut surface));

        for region in &surface.regions {
            assert!(region.attributes.elevation().expect("elevation set") < 0.0);
        }
    }

    #[test]
    fn test_collision_starts_from_memoized_elevation() {
        let mut surface = colliding_surface(0.5);
        surface.regions[0].attributes.set_elevation(5.0);

        let mut modifier = ElevationModifier::new(collision_config());
        assert!(modifier.apply(&mut surface));

        // Region 0 keeps its pre-set estimate as the starting point.
        assert!((surface.regions[0].attributes.elevation().unwrap() - 6.0).abs() < 1e-6);
        assert!((surface.regions[1].attributes.elevation().unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_filter_is_order_dependent() {
        let mut surface = colliding_surface(0.5);
        surface.regions[0].attributes.set_elevation(4.0);

        let mut config = collision_config();
        config.set_bool("useFilter", true);
        let mut modifier = ElevationModifier::new(config);
        assert!(modifier.apply(&mut surface));

        // Edge pass: region 0 -> 4 + 1 = 5, region 1 -> 0 + 1 = 1.
        // Filter pass in region order: region 0 -> (5 + 1) / 2 = 3, then
        // region 1 sees the updated value: (1 + 3) / 2 = 2.
        assert!((surface.regions[0].attributes.elevation().unwrap() - 3.0).abs() < 1e-6);
        assert!((surface.regions[1].attributes.elevation().unwrap() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_when_partition_incomplete() {
        let mut surface = Surface::from_regions(vec![
            Region::new(0, Vec3::ZERO, [Some(1), None, None, None]),
            Region::new(1, Vec3::new(2.0, 0.0, 0.0), [Some(0), None, None, None]),
        ]);
        let mut plate = TectonicPlate::new(0, Vec3::new(0.5, 0.0, 0.0));
        assert!(plate.add_region(&mut surface.regions[0]));
        surface.plates = vec![plate];

        let mut modifier = ElevationModifier::new(collision_config());
        assert!(modifier.apply(&mut surface));

        // Baseline model, not a collision value: range 0 pins the plate
        // baseline at zero, and the unpartitioned region stays unset.
        assert_eq!(surface.regions[0].attributes.elevation(), Some(0.0));
        assert!(surface.regions[1].attributes.elevation().is_none());
    }

    #[test]
    fn test_collisions_disabled_uses_baseline_model() {
        let mut surface = colliding_surface(0.5);
        let mut config = collision_config();
        config.set_bool("usePlateCollisions", false);

        let mut modifier = ElevationModifier::new(config);
        assert!(modifier.apply(&mut surface));

        // No pressure contribution: both regions sit at their plate baseline.
        assert_eq!(surface.regions[0].attributes.elevation(), Some(0.0));
        assert_eq!(surface.regions[1].attributes.elevation(), Some(0.0));
    }

    #[test]
    fn test_baseline_shared_within_plate() {
        // Two regions, one plate, nonzero random range: both regions must get
        // the same lazily drawn baseline.
        let mut surface = Surface::from_regions(vec![
            Region::new(0, Vec3::X, [Some(1), None, None, None]),
            Region::new(1, Vec3::Y, [Some(0), None, None, None]),
        ]);
        let mut plate = TectonicPlate::new(0, Vec3::ZERO);
        assert!(plate.add_region(&mut surface.regions[0]));
        assert!(plate.add_region(&mut surface.regions[1]));
        surface.plates = vec![plate];

        let mut config = ModifierConfig::new();
        config
            .set_bool("usePerlin", false)
            .set_bool("useFilter", false)
            .set_bool("usePlateCollisions", false)
            .set_f32("elevationRandomRange", 2.0)
            .set_i64("seed", 11);

        let mut modifier = ElevationModifier::new(config);
        assert!(modifier.apply(&mut surface));

        let a = surface.regions[0].attributes.elevation().unwrap();
        let b = surface.regions[1].attributes.elevation().unwrap();
        assert_eq!(a, b);
        assert!(a.abs() <= 2.0);
        assert_eq!(surface.plates[0].elevation, Some(a));
    }

    #[test]
    fn test_deterministic_under_injected_seed() {
        let generate = || {
            let mut surface = Surface::new(4);

            let mut plates = PlateModifier::default();
            plates
                .config_mut()
                .set_i64("plateCount", 5)
                .set_i64("seed", 21);
            assert!(plates.apply(&mut surface));

            let mut config = ModifierConfig::new();
            config
                .set_bool("usePerlin", false)
                .set_bool("useFilter", true)
                .set_bool("usePlateCollisions", true)
                .set_f32("collisionStrength", 0.5)
                .set_f32("elevationRandomRange", 1.0)
                .set_i64("seed", 37);
            let mut elevation = ElevationModifier::new(config);
            assert!(elevation.apply(&mut surface));

            surface
                .regions
                .iter()
                .map(|r| r.attributes.elevation().expect("elevation set"))
                .collect::<Vec<f32>>()
        };

        assert_eq!(generate(), generate());
    }
}
