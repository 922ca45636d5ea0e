//! Surfacegen - Procedural planetary surface generator.
//!
//! Builds a cube-sphere surface of discrete regions, partitions it into
//! tectonic plates by randomized graph growth, and derives elevation from
//! plate collisions plus fractal noise. Generation is driven by an ordered,
//! configurable pipeline of surface modifiers.
//!
//! # Example
//!
//! ```
//! use surfacegen::SurfaceGenerator;
//!
//! let generator = SurfaceGenerator::new(&["plates", "elevation"]).unwrap();
//! let surface = generator.generate(8).unwrap();
//! assert_eq!(surface.region_count(), 6 * 8 * 8);
//! ```

pub mod generator;
pub mod modifiers;
pub mod noise;
pub mod surface;
pub mod tectonics;

pub use generator::{FailurePolicy, GeneratorError, ModifierListItem, SurfaceGenerator};
pub use modifiers::{
    compute_pressure, create_modifier, ConfigValue, ElevationModifier, ModifierConfig,
    PlateModifier, SharedModifier, SurfaceModifier,
};
pub use surface::{Region, RegionId, Surface};
pub use tectonics::{PlateId, TectonicPlate};
