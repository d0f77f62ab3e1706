//! Flat ranking of every infusion by its best attack rating

use crate::model::{InfusionKind, Levels, Weapon, WeaponType};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedBuild {
    pub attack_rating: i32,
    pub weapon: String,
    pub weapon_type: WeaponType,
    pub infusion: InfusionKind,
    /// Every allocation reaching `attack_rating`
    pub levels: Vec<Levels>,
}

impl RankedBuild {
    /// `AR: name[infusion][type] -> [levels...]`
    pub fn summary(&self) -> String {
        format!(
            "{}: {}[{}][{}] -> {:?}",
            self.attack_rating,
            self.weapon,
            self.infusion.as_str(),
            self.weapon_type.as_str(),
            self.levels
        )
    }
}

/// All infusions of all weapons, ascending by attack rating.
///
/// Ties keep weapon then slot order.
pub fn rank_builds(weapons: &[Weapon], base: Levels, points: i32) -> Vec<RankedBuild> {
    let mut ranked: Vec<RankedBuild> = weapons
        .iter()
        .flat_map(|weapon| {
            weapon.max_level(base, points).map(move |best| RankedBuild {
                attack_rating: best.attack_rating,
                weapon: weapon.name.clone(),
                weapon_type: weapon.weapon_type,
                infusion: best.infusion.kind,
                levels: best.builds.into_iter().map(|b| b.levels).collect(),
            })
        })
        .collect();

    ranked.sort_by_key(|r| r.attack_rating);
    ranked
}
