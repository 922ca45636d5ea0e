//! Seedable octave noise sampled at 3D points.
//!
//! Thin fractal wrapper over simdnoise's 4D simplex (w fixed at 0), which
//! samples seamlessly on spherical surfaces without UV distortion artifacts.

use glam::Vec3;
use simdnoise::NoiseBuilder;

const LACUNARITY: f32 = 2.0;
const PERSISTENCE: f32 = 0.5;

/// Samples normalized octave noise at a 3D position.
///
/// Octaves below one are clamped to one. The result is normalized by the
/// amplitude sum into approximately [-1, 1].
pub fn octave_noise_3d(pos: Vec3, octaves: u32, seed: i32) -> f32 {
    let mut total = 0.0f32;
    let mut amplitude = 1.0f32;
    let mut frequency = 1.0f32;
    let mut max_amplitude = 0.0f32;

    for octave in 0..octaves.max(1) {
        // Each octave gets its own seed offset for variation.
        let octave_seed = seed.wrapping_add(octave as i32 * 31337);

        let noise_value = NoiseBuilder::fbm_4d_offset(
            pos.x * frequency,
            1,
            pos.y * frequency,
            1,
            pos.z * frequency,
            1,
            0.0,
            1,
        )
        .with_seed(octave_seed)
        .with_freq(1.0)
        .with_octaves(1)
        .generate()
        .0[0];

        total += noise_value * amplitude;
        max_amplitude += amplitude;
        amplitude *= PERSISTENCE;
        frequency *= LACUNARITY;
    }

    total / max_amplitude
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sample() {
        let pos = Vec3::new(0.5, 0.3, 0.7);
        assert_eq!(octave_noise_3d(pos, 4, 99), octave_noise_3d(pos, 4, 99));
    }

    #[test]
    fn test_different_seeds_differ() {
        let pos = Vec3::new(0.5, 0.3, 0.7);
        assert_ne!(octave_noise_3d(pos, 4, 1), octave_noise_3d(pos, 4, 2));
    }

    #[test]
    fn test_sample_range() {
        let positions = [
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.577, 0.577, 0.577),
            Vec3::new(-0.5, 0.5, 0.707),
        ];
        for pos in positions {
            let value = octave_noise_3d(pos, 6, 42);
            assert!(
                (-1.5..=1.5).contains(&value),
                "sample {} at {:?} out of range",
                value,
                pos
            );
        }
    }

    #[test]
    fn test_zero_octaves_clamped() {
        let pos = Vec3::new(0.2, 0.4, 0.8);
        assert_eq!(octave_noise_3d(pos, 0, 7), octave_noise_3d(pos, 1, 7));
    }
}
