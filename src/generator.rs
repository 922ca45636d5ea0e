//! Ordered, named modifier pipeline and surface generation.

use thiserror::Error;

use crate::modifiers::{create_modifier, SharedModifier};
use crate::surface::{Surface, DEFAULT_RESOLUTION};

/// Errors surfaced by the generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// A modifier class name did not resolve at construction/registration.
    #[error("\"{0}\" is not a valid modifier class")]
    InvalidModifierClass(String),
    /// A modifier reported failure while the failure policy propagates it.
    #[error("modifier '{0}' failed")]
    ModifierFailed(String),
}

/// What `generate` does when a modifier reports failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Return the surface anyway (best-effort generation).
    #[default]
    BestEffort,
    /// Return an error naming the first failing modifier.
    Propagate,
}

/// One slot of the modifier pipeline.
#[derive(Clone)]
pub struct ModifierListItem {
    /// Unique key of this slot within the pipeline.
    pub ident: String,
    /// Disabled entries are skipped entirely by `apply_modifiers`.
    pub enabled: bool,
    /// The shared modifier instance.
    pub modifier: SharedModifier,
}

/// Runs an ordered, enable/disable-able list of modifiers against a surface.
///
/// Identifiers are unique: re-adding an existing identifier replaces the
/// entry in place, preserving its slot position. List order is execution
/// order.
#[derive(Default)]
pub struct SurfaceGenerator {
    modifier_list: Vec<ModifierListItem>,
    failure_policy: FailurePolicy,
}

impl SurfaceGenerator {
    /// Builds a pipeline from modifier class names; each entry is
    /// instantiated through the factory and enabled, with the class name as
    /// its identifier.
    pub fn new(modifier_classes: &[&str]) -> Result<Self, GeneratorError> {
        let mut generator = Self::default();
        for class_name in modifier_classes {
            generator.add_modifier_class(class_name, class_name, true)?;
        }
        Ok(generator)
    }

    pub fn set_failure_policy(&mut self, policy: FailurePolicy) {
        self.failure_policy = policy;
    }

    /// The pipeline in execution order.
    pub fn modifiers(&self) -> &[ModifierListItem] {
        &self.modifier_list
    }

    /// Non-throwing lookup of a pipeline entry.
    pub fn get_modifier(&self, ident: &str) -> Option<&ModifierListItem> {
        self.position_of(ident).map(|index| &self.modifier_list[index])
    }

    /// Upsert: replaces an existing entry in place (slot position preserved)
    /// or appends a new one.
    pub fn add_modifier(
        &mut self,
        ident: &str,
        modifier: SharedModifier,
        enabled: bool,
    ) -> &ModifierListItem {
        let item = ModifierListItem {
            ident: ident.to_string(),
            enabled,
            modifier,
        };
        let index = match self.position_of(ident) {
            Some(index) => {
                self.modifier_list[index] = item;
                index
            }
            None => {
                self.modifier_list.push(item);
                self.modifier_list.len() - 1
            }
        };
        &self.modifier_list[index]
    }

    /// Upsert by class name, resolved through the same factory used at
    /// construction.
    pub fn add_modifier_class(
        &mut self,
        ident: &str,
        class_name: &str,
        enabled: bool,
    ) -> Result<&ModifierListItem, GeneratorError> {
        let modifier = create_modifier(class_name)
            .ok_or_else(|| GeneratorError::InvalidModifierClass(class_name.to_string()))?;
        Ok(self.add_modifier(ident, modifier, enabled))
    }

    /// Removes the entry if present; returns whether something was removed.
    pub fn remove_modifier(&mut self, ident: &str) -> bool {
        match self.position_of(ident) {
            Some(index) => {
                self.modifier_list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Returns false if the identifier is unknown.
    pub fn enable_modifier(&mut self, ident: &str) -> bool {
        self.set_modifier_enabled(ident, true)
    }

    /// Returns false if the identifier is unknown.
    pub fn disable_modifier(&mut self, ident: &str) -> bool {
        self.set_modifier_enabled(ident, false)
    }

    /// Runs every enabled modifier in list order, stopping at the first one
    /// that reports failure. Returns true if all enabled modifiers succeed
    /// (or there are none).
    pub fn apply_modifiers(&self, surface: &mut Surface) -> bool {
        self.run_modifiers(surface).is_ok()
    }

    /// Builds a surface (default resolution when `resolution` is zero) and
    /// runs the pipeline against it. Whether a failing modifier is surfaced
    /// depends on the configured `FailurePolicy`; the default best-effort
    /// policy returns the surface regardless.
    pub fn generate(&self, resolution: u32) -> Result<Surface, GeneratorError> {
        let mut surface = if resolution > 0 {
            Surface::new(resolution)
        } else {
            Surface::new(DEFAULT_RESOLUTION)
        };

        match (self.run_modifiers(&mut surface), self.failure_policy) {
            (Err(error), FailurePolicy::Propagate) => Err(error),
            _ => Ok(surface),
        }
    }

    fn run_modifiers(&self, surface: &mut Surface) -> Result<(), GeneratorError> {
        for item in &self.modifier_list {
            if item.enabled && !item.modifier.borrow_mut().apply(surface) {
                return Err(GeneratorError::ModifierFailed(item.ident.clone()));
            }
        }
        Ok(())
    }

    fn set_modifier_enabled(&mut self, ident: &str, enabled: bool) -> bool {
        match self.position_of(ident) {
            Some(index) => {
                self.modifier_list[index].enabled = enabled;
                true
            }
            None => false,
        }
    }

    fn position_of(&self, ident: &str) -> Option<usize> {
        self.modifier_list.iter().position(|item| item.ident == ident)
    }
}
