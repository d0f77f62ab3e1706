//! Attack rating per budget, grouped by category, weapon and infusion

use crate::model::{InfusionKind, Levels, Weapon, WeaponId, WeaponType};
use crate::search::max_level;
use serde::Serialize;

/// One infusion's best AR at each budget; `None` where nothing scores
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InfusionSeries {
    pub infusion: InfusionKind,
    pub attack_ratings: Vec<Option<i32>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponSeries {
    pub weapon: WeaponId,
    pub name: String,
    pub infusions: Vec<InfusionSeries>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryLevels {
    pub category: WeaponType,
    pub weapons: Vec<WeaponSeries>,
}

/// Level table for a budget sweep; categories in first-seen order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelTable {
    pub budgets: Vec<i32>,
    pub categories: Vec<CategoryLevels>,
}

/// Upper and lower AR over a weapon's infusions at one budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Range {
    pub max: i32,
    pub min: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeaponRange {
    pub name: String,
    pub ranges: Vec<Option<Range>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRanges {
    pub category: WeaponType,
    pub weapons: Vec<WeaponRange>,
}

fn series(weapon: &Weapon, base: Levels, budgets: &[i32]) -> WeaponSeries {
    let infusions = weapon
        .infusions
        .iter()
        .map(|infusion| InfusionSeries {
            infusion: infusion.kind,
            attack_ratings: budgets
                .iter()
                .map(|&points| match max_level(weapon, infusion, base, points).0 {
                    0 => None,
                    ar => Some(ar),
                })
                .collect(),
        })
        .collect();

    WeaponSeries {
        weapon: weapon.id,
        name: weapon.name.clone(),
        infusions,
    }
}

/// Best AR of every infusion of every weapon across `budgets`
pub fn find_levels<I>(weapons: &[Weapon], base: Levels, budgets: I) -> LevelTable
where
    I: IntoIterator<Item = i32>,
{
    let budgets: Vec<i32> = budgets.into_iter().collect();
    let mut categories: Vec<CategoryLevels> = Vec::new();

    for weapon in weapons {
        let series = series(weapon, base, &budgets);
        match categories.iter_mut().find(|c| c.category == weapon.weapon_type) {
            Some(category) => category.weapons.push(series),
            None => categories.push(CategoryLevels {
                category: weapon.weapon_type,
                weapons: vec![series],
            }),
        }
    }

    tracing::debug!(
        weapons = weapons.len(),
        categories = categories.len(),
        budgets = budgets.len(),
        "computed level table"
    );
    LevelTable {
        budgets,
        categories,
    }
}

/// Every weapon's series, flattened across categories
pub fn item_series(table: &LevelTable) -> impl Iterator<Item = &WeaponSeries> {
    table.categories.iter().flat_map(|c| c.weapons.iter())
}

fn weapon_range(weapon: &WeaponSeries, budgets: usize) -> WeaponRange {
    let ranges = (0..budgets)
        .map(|i| {
            let ars = weapon
                .infusions
                .iter()
                .filter_map(|s| s.attack_ratings.get(i).copied().flatten());
            ars.fold(None, |range: Option<Range>, ar| {
                Some(match range {
                    Some(r) => Range {
                        max: r.max.max(ar),
                        min: r.min.min(ar),
                    },
                    None => Range { max: ar, min: ar },
                })
            })
        })
        .collect();

    WeaponRange {
        name: weapon.name.clone(),
        ranges,
    }
}

/// Per category, each weapon's spread over its infusions at every budget
pub fn group_ranges(table: &LevelTable) -> Vec<CategoryRanges> {
    table
        .categories
        .iter()
        .map(|category| CategoryRanges {
            category: category.category,
            weapons: category
                .weapons
                .iter()
                .map(|w| weapon_range(w, table.budgets.len()))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{infusion, linear_curve, quality_sword, uniform_saturation, weapon};
    use crate::model::{Damage, Requirements, ScalingCoefficients};

    fn heavy_club() -> Weapon {
        let curve = uniform_saturation(linear_curve("0", 1.0));
        let mut club = weapon(
            "Club",
            Requirements {
                str_: 14,
                ..Default::default()
            },
            vec![
                infusion(
                    InfusionKind::Standard,
                    Damage {
                        physical: 100.0,
                        ..Default::default()
                    },
                    ScalingCoefficients {
                        str_: 0.5,
                        ..Default::default()
                    },
                    curve.clone(),
                ),
                infusion(
                    InfusionKind::Heavy,
                    Damage {
                        physical: 120.0,
                        ..Default::default()
                    },
                    ScalingCoefficients {
                        str_: 1.0,
                        ..Default::default()
                    },
                    curve,
                ),
            ],
        );
        club.weapon_type = WeaponType::Hammer;
        club
    }

    #[test]
    fn test_unreachable_budgets_are_none() {
        let table = find_levels(&[heavy_club()], [10; 5], 0..=5);
        assert_eq!(table.budgets, vec![0, 1, 2, 3, 4, 5]);

        let club = &table.categories[0].weapons[0];
        for series in &club.infusions {
            // strength 14 needs four points
            assert_eq!(&series.attack_ratings[..4], &[None, None, None, None]);
            assert!(series.attack_ratings[4].is_some());
            assert!(series.attack_ratings[5] >= series.attack_ratings[4]);
        }
    }

    #[test]
    fn test_categories_in_first_seen_order() {
        let weapons = [quality_sword(), heavy_club(), quality_sword()];
        let table = find_levels(&weapons, [10; 5], [0, 3]);
        let categories: Vec<_> = table.categories.iter().map(|c| c.category).collect();
        assert_eq!(categories, vec![WeaponType::StraightSword, WeaponType::Hammer]);
        assert_eq!(table.categories[0].weapons.len(), 2);
        assert_eq!(item_series(&table).count(), 3);
    }

    #[test]
    fn test_group_ranges_span_infusions() {
        let table = find_levels(&[heavy_club()], [10; 5], 0..=6);
        let ranges = group_ranges(&table);
        assert_eq!(ranges.len(), 1);

        let club = &ranges[0].weapons[0];
        assert_eq!(club.name, "Club");
        assert_eq!(club.ranges[0], None);

        let series = &table.categories[0].weapons[0].infusions;
        let standard = series[0].attack_ratings[6].unwrap();
        let heavy = series[1].attack_ratings[6].unwrap();
        assert_eq!(
            club.ranges[6],
            Some(Range {
                max: standard.max(heavy),
                min: standard.min(heavy),
            })
        );
    }

    #[test]
    fn test_empty_weapon_list() {
        let table = find_levels(&[], [10; 5], 0..=3);
        assert!(table.categories.is_empty());
        assert!(group_ranges(&table).is_empty());
    }
}
