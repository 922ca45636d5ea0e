//! Key/value configuration consumed by surface modifiers.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single typed option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConfigValue {
    Bool(bool),
    Float(f32),
    Int(i64),
    Text(String),
}

/// Option store with typed getters. Absent or mismatched keys fall back to
/// the default supplied at the call site.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModifierConfig {
    values: HashMap<String, ConfigValue>,
}

impl ModifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.values.get(key)
    }

    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.values.get(key) {
            Some(ConfigValue::Bool(value)) => *value,
            _ => default,
        }
    }

    pub fn get_f32(&self, key: &str, default: f32) -> f32 {
        match self.values.get(key) {
            Some(ConfigValue::Float(value)) => *value,
            _ => default,
        }
    }

    pub fn get_i64(&self, key: &str, default: i64) -> i64 {
        match self.values.get(key) {
            Some(ConfigValue::Int(value)) => *value,
            _ => default,
        }
    }

    pub fn get_str<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        match self.values.get(key) {
            Some(ConfigValue::Text(value)) => value,
            _ => default,
        }
    }

    /// Seed option helper: present and non-negative means "deterministic".
    pub fn get_seed(&self, key: &str) -> Option<u64> {
        match self.values.get(key) {
            Some(ConfigValue::Int(value)) if *value >= 0 => Some(*value as u64),
            _ => None,
        }
    }

    pub fn set_bool(&mut self, key: &str, value: bool) -> &mut Self {
        self.values.insert(key.to_string(), ConfigValue::Bool(value));
        self
    }

    pub fn set_f32(&mut self, key: &str, value: f32) -> &mut Self {
        self.values.insert(key.to_string(), ConfigValue::Float(value));
        self
    }

    pub fn set_i64(&mut self, key: &str, value: i64) -> &mut Self {
        self.values.insert(key.to_string(), ConfigValue::Int(value));
        self
    }

    pub fn set_str(&mut self, key: &str, value: &str) -> &mut Self {
        self.values
            .insert(key.to_string(), ConfigValue::Text(value.to_string()));
        self
    }
}
