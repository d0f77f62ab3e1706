//! Best-build search: the highest attack rating reachable per infusion

use crate::formula::damages;
use crate::model::{attack_rating, DamageValues, Infusion, Levels, Weapon};
use crate::search::enumerator::allocations;
use serde::Serialize;

/// A concrete allocation together with the damage it produces
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Build {
    pub damage: DamageValues,
    pub levels: Levels,
}

impl Build {
    #[inline]
    pub fn attack_rating(&self) -> i32 {
        attack_rating(&self.damage)
    }
}

/// Best attack rating of one infusion and every build that reaches it
#[derive(Debug, Clone)]
pub struct InfusionBest<'a> {
    pub attack_rating: i32,
    pub builds: Vec<Build>,
    pub infusion: &'a Infusion,
}

/// Damage for every allocation reachable from `levels` with `points` to spend
pub fn level<'a>(
    weapon: &'a Weapon,
    infusion: &'a Infusion,
    levels: Levels,
    points: i32,
) -> impl Iterator<Item = Build> + 'a {
    allocations(weapon, infusion, levels, points).map(move |levels| Build {
        damage: damages(weapon, infusion, &levels),
        levels,
    })
}

/// Maximal attack rating for `infusion` and all builds tied at it, in
/// enumeration order.
///
/// Returns `(0, [])` when nothing reaches a non-zero attack rating.
pub fn max_level(
    weapon: &Weapon,
    infusion: &Infusion,
    levels: Levels,
    points: i32,
) -> (i32, Vec<Build>) {
    let mut best = 0;
    let mut builds = Vec::new();

    for build in level(weapon, infusion, levels, points) {
        let ar = build.attack_rating();
        if ar <= 0 || ar < best {
            continue;
        }
        if ar > best {
            best = ar;
            builds.clear();
        }
        builds.push(build);
    }

    (best, builds)
}

impl Weapon {
    /// Best builds for every present infusion, lazily and in slot order.
    ///
    /// No reduction across infusions happens here; absent infusions are
    /// skipped and unreachable ones report an attack rating of 0.
    pub fn max_level(&self, levels: Levels, points: i32) -> impl Iterator<Item = InfusionBest<'_>> {
        self.infusions.iter().map(move |infusion| {
            let (attack_rating, builds) = max_level(self, infusion, levels, points);
            tracing::trace!(
                weapon = %self.name,
                infusion = infusion.kind.as_str(),
                points,
                attack_rating,
                ties = builds.len(),
                "evaluated infusion"
            );
            InfusionBest {
                attack_rating,
                builds,
                infusion,
            }
        })
    }
}
