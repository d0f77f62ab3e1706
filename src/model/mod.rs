//! Immutable game data: weapons, infusions, attributes and saturation curves

mod attribute;
mod curve;
mod damage;
mod weapon;

pub use attribute::*;
pub use curve::*;
pub use damage::*;
pub use weapon::*;

use crate::error::{BuildError, Result};

/// Loaded weapon table plus the curve table its infusions were resolved against
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    weapons: Vec<Weapon>,
    curves: CurveTable,
}

impl Dataset {
    pub fn new(weapons: Vec<Weapon>, curves: CurveTable) -> Self {
        Self { weapons, curves }
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn curves(&self) -> &CurveTable {
        &self.curves
    }

    /// Resolve an infusion's back-reference
    #[inline]
    pub fn weapon(&self, id: WeaponId) -> Option<&Weapon> {
        self.weapons.get(id.0)
    }

    pub fn find(&self, name: &str) -> Result<&Weapon> {
        self.weapons
            .iter()
            .find(|w| w.name == name)
            .ok_or_else(|| BuildError::WeaponNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.weapons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weapons.is_empty()
    }
}
