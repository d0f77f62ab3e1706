//! Damage types and per-type values

use serde::{Deserialize, Serialize};

/// Number of damage types a weapon can deal
pub const DAMAGE_TYPE_COUNT: usize = 5;

/// Integer damage per type, in [`DamageType::ALL`] order
pub type DamageValues = [i32; DAMAGE_TYPE_COUNT];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Physical,
    Magic,
    Fire,
    Lightning,
    Dark,
}

impl DamageType {
    pub const ALL: [DamageType; DAMAGE_TYPE_COUNT] = [
        DamageType::Physical,
        DamageType::Magic,
        DamageType::Fire,
        DamageType::Lightning,
        DamageType::Dark,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Fractional value per damage type (base damage, defence)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Damage {
    pub physical: f64,
    pub magic: f64,
    pub fire: f64,
    pub lightning: f64,
    pub dark: f64,
}

impl Damage {
    pub fn from_array(values: [f64; DAMAGE_TYPE_COUNT]) -> Self {
        let [physical, magic, fire, lightning, dark] = values;
        Self {
            physical,
            magic,
            fire,
            lightning,
            dark,
        }
    }

    #[inline]
    pub fn get(&self, damage_type: DamageType) -> f64 {
        match damage_type {
            DamageType::Physical => self.physical,
            DamageType::Magic => self.magic,
            DamageType::Fire => self.fire,
            DamageType::Lightning => self.lightning,
            DamageType::Dark => self.dark,
        }
    }

    pub fn is_zero(&self) -> bool {
        DamageType::ALL.iter().all(|t| self.get(*t) == 0.0)
    }
}

/// Attack rating: the sum of every per-type damage value
#[inline]
pub fn attack_rating(damage: &DamageValues) -> i32 {
    damage.iter().sum()
}
