//! Weapons and their infusion variants

use crate::model::attribute::{Requirements, ScalingCoefficients};
use crate::model::curve::SaturationSet;
use crate::model::damage::Damage;
use crate::error::{BuildError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Weapon categories as named by the upstream data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum WeaponType {
    #[serde(rename = "Axe")]
    Axe,
    #[serde(rename = "Bow")]
    Bow,
    #[serde(rename = "Claw")]
    Claw,
    #[serde(rename = "Crossbow")]
    Crossbow,
    #[serde(rename = "Curved Greatsword")]
    CurvedGreatsword,
    #[serde(rename = "Curved Sword")]
    CurvedSword,
    #[serde(rename = "Dagger")]
    Dagger,
    #[serde(rename = "Fist")]
    Fist,
    #[serde(rename = "Flame")]
    Flame,
    #[serde(rename = "Great Hammer")]
    GreatHammer,
    #[serde(rename = "Greataxe")]
    Greataxe,
    #[serde(rename = "Greatbow")]
    Greatbow,
    #[serde(rename = "Greatsword")]
    Greatsword,
    #[serde(rename = "Halberd")]
    Halberd,
    #[serde(rename = "Hammer")]
    Hammer,
    #[serde(rename = "Katana")]
    Katana,
    #[serde(rename = "Piercing Sword")]
    PiercingSword,
    #[serde(rename = "Reaper")]
    Reaper,
    #[serde(rename = "Sacred Chime")]
    SacredChime,
    #[serde(rename = "Shield")]
    Shield,
    #[serde(rename = "Spear")]
    Spear,
    #[serde(rename = "Staff")]
    Staff,
    #[serde(rename = "Straight Sword")]
    StraightSword,
    #[serde(rename = "Talisman")]
    Talisman,
    #[serde(rename = "Ultra Greatsword")]
    UltraGreatsword,
    #[serde(rename = "Whip")]
    Whip,
}

impl WeaponType {
    pub const ALL: [WeaponType; 26] = [
        WeaponType::Axe,
        WeaponType::Bow,
        WeaponType::Claw,
        WeaponType::Crossbow,
        WeaponType::CurvedGreatsword,
        WeaponType::CurvedSword,
        WeaponType::Dagger,
        WeaponType::Fist,
        WeaponType::Flame,
        WeaponType::GreatHammer,
        WeaponType::Greataxe,
        WeaponType::Greatbow,
        WeaponType::Greatsword,
        WeaponType::Halberd,
        WeaponType::Hammer,
        WeaponType::Katana,
        WeaponType::PiercingSword,
        WeaponType::Reaper,
        WeaponType::SacredChime,
        WeaponType::Shield,
        WeaponType::Spear,
        WeaponType::Staff,
        WeaponType::StraightSword,
        WeaponType::Talisman,
        WeaponType::UltraGreatsword,
        WeaponType::Whip,
    ];

    /// Display name, identical to the upstream category string
    pub fn as_str(self) -> &'static str {
        match self {
            WeaponType::Axe => "Axe",
            WeaponType::Bow => "Bow",
            WeaponType::Claw => "Claw",
            WeaponType::Crossbow => "Crossbow",
            WeaponType::CurvedGreatsword => "Curved Greatsword",
            WeaponType::CurvedSword => "Curved Sword",
            WeaponType::Dagger => "Dagger",
            WeaponType::Fist => "Fist",
            WeaponType::Flame => "Flame",
            WeaponType::GreatHammer => "Great Hammer",
            WeaponType::Greataxe => "Greataxe",
            WeaponType::Greatbow => "Greatbow",
            WeaponType::Greatsword => "Greatsword",
            WeaponType::Halberd => "Halberd",
            WeaponType::Hammer => "Hammer",
            WeaponType::Katana => "Katana",
            WeaponType::PiercingSword => "Piercing Sword",
            WeaponType::Reaper => "Reaper",
            WeaponType::SacredChime => "Sacred Chime",
            WeaponType::Shield => "Shield",
            WeaponType::Spear => "Spear",
            WeaponType::Staff => "Staff",
            WeaponType::StraightSword => "Straight Sword",
            WeaponType::Talisman => "Talisman",
            WeaponType::UltraGreatsword => "Ultra Greatsword",
            WeaponType::Whip => "Whip",
        }
    }

}

impl FromStr for WeaponType {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| BuildError::UnknownWeaponType(s.to_string()))
    }
}

/// Number of infusion slots every weapon carries
pub const INFUSION_COUNT: usize = 16;

/// Infusion variants, in the fixed slot order of the source data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InfusionKind {
    Standard,
    Heavy,
    Sharp,
    Refined,
    Simple,
    Crystal,
    Fire,
    Chaos,
    Lightning,
    Deep,
    Dark,
    Poison,
    Blood,
    Raw,
    Blessed,
    Hollow,
}

impl InfusionKind {
    pub const ALL: [InfusionKind; INFUSION_COUNT] = [
        InfusionKind::Standard,
        InfusionKind::Heavy,
        InfusionKind::Sharp,
        InfusionKind::Refined,
        InfusionKind::Simple,
        InfusionKind::Crystal,
        InfusionKind::Fire,
        InfusionKind::Chaos,
        InfusionKind::Lightning,
        InfusionKind::Deep,
        InfusionKind::Dark,
        InfusionKind::Poison,
        InfusionKind::Blood,
        InfusionKind::Raw,
        InfusionKind::Blessed,
        InfusionKind::Hollow,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InfusionKind::Standard => "Standard",
            InfusionKind::Heavy => "Heavy",
            InfusionKind::Sharp => "Sharp",
            InfusionKind::Refined => "Refined",
            InfusionKind::Simple => "Simple",
            InfusionKind::Crystal => "Crystal",
            InfusionKind::Fire => "Fire",
            InfusionKind::Chaos => "Chaos",
            InfusionKind::Lightning => "Lightning",
            InfusionKind::Deep => "Deep",
            InfusionKind::Dark => "Dark",
            InfusionKind::Poison => "Poison",
            InfusionKind::Blood => "Blood",
            InfusionKind::Raw => "Raw",
            InfusionKind::Blessed => "Blessed",
            InfusionKind::Hollow => "Hollow",
        }
    }
}

/// Index of a weapon in its dataset's weapon table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WeaponId(pub usize);

/// One infusion variant of a weapon
#[derive(Debug, Clone, PartialEq)]
pub struct Infusion {
    /// Owning weapon (non-owning back-reference)
    pub weapon: WeaponId,
    pub kind: InfusionKind,
    pub scaling: ScalingCoefficients,
    pub damage: Damage,
    pub saturation: SaturationSet,
}

impl Infusion {
    /// Infusions with neither damage nor scaling are never materialized
    pub fn is_empty_profile(damage: &Damage, scaling: &ScalingCoefficients) -> bool {
        damage.is_zero() && scaling.is_zero()
    }
}

/// Fixed slot array of infusions keyed by [`InfusionKind`]
#[derive(Debug, Clone, PartialEq)]
pub struct InfusionSet {
    slots: [Option<Infusion>; INFUSION_COUNT],
}

impl Default for InfusionSet {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
        }
    }
}

impl InfusionSet {
    pub fn new(slots: [Option<Infusion>; INFUSION_COUNT]) -> Self {
        Self { slots }
    }

    #[inline]
    pub fn get(&self, kind: InfusionKind) -> Option<&Infusion> {
        self.slots[kind.index()].as_ref()
    }

    /// Present infusions in slot order
    pub fn iter(&self) -> impl Iterator<Item = &Infusion> {
        self.slots.iter().flatten()
    }

    pub fn present(&self) -> usize {
        self.iter().count()
    }
}

/// Weapon as loaded from source data; immutable after loading
#[derive(Debug, Clone, PartialEq)]
pub struct Weapon {
    pub id: WeaponId,
    pub source_id: String,
    pub name: String,
    pub weapon_type: WeaponType,
    pub weight: f64,
    pub bleed: f64,
    pub poison: f64,
    pub frost: f64,
    pub requirements: Requirements,
    pub defence: Damage,
    pub infusable: bool,
    pub dual_wield: bool,
    pub infusions: InfusionSet,
}
