//! Surface modifier capability and its class-name factory.
//!
//! Modifiers are the pluggable transformations a `SurfaceGenerator` runs
//! against a surface. Instances are shared (a modifier can sit in more than
//! one pipeline); the generation model is single-threaded, so shared state
//! uses `Rc<RefCell<_>>` rather than locks.

mod config;
mod elevation;
mod plates;

pub use config::{ConfigValue, ModifierConfig};
pub use elevation::{compute_pressure, ElevationModifier};
pub use plates::PlateModifier;

use std::cell::RefCell;
use std::rc::Rc;

use crate::surface::Surface;

/// Shared handle to a modifier instance.
pub type SharedModifier = Rc<RefCell<dyn SurfaceModifier>>;

/// A pluggable transformation applied to a surface's region attributes.
pub trait SurfaceModifier {
    /// Mutates the surface; returns false when the modifier failed and the
    /// pipeline should stop.
    fn apply(&mut self, surface: &mut Surface) -> bool;

    /// Options read by this modifier on each `apply`.
    fn config(&self) -> &ModifierConfig;

    fn config_mut(&mut self) -> &mut ModifierConfig;
}

/// Resolves a registered modifier class name to a fresh instance, or `None`
/// for unknown names.
pub fn create_modifier(class_name: &str) -> Option<SharedModifier> {
    match class_name {
        "plates" => Some(Rc::new(RefCell::new(PlateModifier::default()))),
        "elevation" => Some(Rc::new(RefCell::new(ElevationModifier::default()))),
        _ => None,
    }
}
