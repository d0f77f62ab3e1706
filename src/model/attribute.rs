//! Character attributes and level tuples

use serde::{Deserialize, Serialize};

/// Number of attributes a build distributes points over
pub const ATTRIBUTE_COUNT: usize = 5;

/// Highest level any attribute can reach
pub const MAX_LEVEL: i32 = 99;

/// Attribute levels in [`Attribute::ALL`] order: STR, DEX, INT, FTH, LCK
pub type Levels = [i32; ATTRIBUTE_COUNT];

/// Attributes that feed weapon scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Dexterity,
    Intelligence,
    Faith,
    Luck,
}

impl Attribute {
    pub const ALL: [Attribute; ATTRIBUTE_COUNT] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Intelligence,
        Attribute::Faith,
        Attribute::Luck,
    ];

    /// Position of this attribute inside a [`Levels`] tuple
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Attribute::Strength => "STR",
            Attribute::Dexterity => "DEX",
            Attribute::Intelligence => "INT",
            Attribute::Faith => "FTH",
            Attribute::Luck => "LCK",
        }
    }
}

/// Minimum attribute levels needed to wield a weapon.
///
/// Luck never gates a weapon, so only four attributes carry a requirement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Requirements {
    pub str_: i32,
    pub dex: i32,
    pub int: i32,
    pub faith: i32,
}

impl Requirements {
    /// Requirement for an attribute (0 for luck)
    #[inline]
    pub fn get(&self, attribute: Attribute) -> i32 {
        match attribute {
            Attribute::Strength => self.str_,
            Attribute::Dexterity => self.dex,
            Attribute::Intelligence => self.int,
            Attribute::Faith => self.faith,
            Attribute::Luck => 0,
        }
    }

    /// Whether every requirement is met by `levels`
    #[inline]
    pub fn met_by(&self, levels: &Levels) -> bool {
        levels[0] >= self.str_
            && levels[1] >= self.dex
            && levels[2] >= self.int
            && levels[3] >= self.faith
    }
}

/// Per-attribute scaling coefficients (already divided down from percentages)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScalingCoefficients {
    pub str_: f64,
    pub dex: f64,
    pub int: f64,
    pub faith: f64,
    pub luck: f64,
}

impl ScalingCoefficients {
    #[inline]
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Strength => self.str_,
            Attribute::Dexterity => self.dex,
            Attribute::Intelligence => self.int,
            Attribute::Faith => self.faith,
            Attribute::Luck => self.luck,
        }
    }

    pub fn is_zero(&self) -> bool {
        Attribute::ALL.iter().all(|a| self.get(*a) == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_index_matches_all_order() {
        for (i, attribute) in Attribute::ALL.iter().enumerate() {
            assert_eq!(attribute.index(), i);
        }
    }

    #[test]
    fn test_requirements_met_by() {
        let req = Requirements {
            str_: 12,
            dex: 10,
            int: 0,
            faith: 5,
        };
        assert!(req.met_by(&[12, 10, 0, 5, 0]));
        assert!(!req.met_by(&[11, 10, 0, 5, 99]));
        assert_eq!(req.get(Attribute::Luck), 0);
    }

    #[test]
    fn test_scaling_is_zero() {
        assert!(ScalingCoefficients::default().is_zero());
        let scaling = ScalingCoefficients {
            luck: 0.3,
            ..Default::default()
        };
        assert!(!scaling.is_zero());
    }
}
