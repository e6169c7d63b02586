//! Texture unit table: an ordered list of `(sampler name, unit, asset path)`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use relief_core::config::TextureSlotConfig;
use relief_core::constants::MAX_TEXTURE_UNITS;
use relief_core::error::{ReliefError, ReliefResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureSlot {
    pub name: String,
    pub unit: u32,
    pub path: PathBuf,
}

/// Validated slots, sorted by unit. Names and units are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureTable {
    slots: Vec<TextureSlot>,
}

impl TextureTable {
    pub fn new(mut slots: Vec<TextureSlot>) -> ReliefResult<Self> {
        Self::check_unique(&slots)?;
        slots.sort_by_key(|s| s.unit);
        Ok(Self { slots })
    }

    fn check_unique(slots: &[TextureSlot]) -> ReliefResult<()> {
        let mut names = HashSet::new();
        let mut units = HashSet::new();
        for slot in slots {
            if slot.name.is_empty() {
                return Err(ReliefError::texture_slot("sampler name must not be empty"));
            }
            if slot.unit >= MAX_TEXTURE_UNITS {
                return Err(ReliefError::texture_slot(format!(
                    "'{}' uses unit {}, only units 0..{} exist",
                    slot.name, slot.unit, MAX_TEXTURE_UNITS
                )));
            }
            if !names.insert(slot.name.as_str()) {
                return Err(ReliefError::texture_slot(format!(
                    "sampler '{}' is bound twice",
                    slot.name
                )));
            }
            if !units.insert(slot.unit) {
                return Err(ReliefError::texture_slot(format!(
                    "unit {} is bound twice",
                    slot.unit
                )));
            }
        }
        Ok(())
    }

    /// Build from configuration, resolving relative paths against `texture_dir`.
    pub fn from_config(configs: &[TextureSlotConfig], texture_dir: &Path) -> ReliefResult<Self> {
        let slots = configs
            .iter()
            .map(|c| TextureSlot {
                name: c.name.clone(),
                unit: c.unit,
                path: if c.path.is_absolute() {
                    c.path.clone()
                } else {
                    texture_dir.join(&c.path)
                },
            })
            .collect();
        Self::new(slots)
    }

    pub fn slots(&self) -> &[TextureSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn unit_of(&self, name: &str) -> Option<u32> {
        self.slots.iter().find(|s| s.name == name).map(|s| s.unit)
    }

    /// `(sampler uniform, unit)` pairs to set on the program.
    pub fn sampler_bindings(&self) -> impl Iterator<Item = (&str, u32)> {
        self.slots.iter().map(|s| (s.name.as_str(), s.unit))
    }

    /// Slots whose asset file does not exist.
    pub fn missing_assets(&self) -> Vec<&TextureSlot> {
        self.slots.iter().filter(|s| !s.path.is_file()).collect()
    }
}
