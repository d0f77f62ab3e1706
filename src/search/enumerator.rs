//! Allocation enumeration
//!
//! Spends points on unmet requirements first, then walks every way of
//! distributing what is left over the attributes that can change damage.

use crate::formula::relevant_attributes;
use crate::model::{
    Attribute, Infusion, Levels, Requirements, Weapon, ATTRIBUTE_COUNT, MAX_LEVEL,
};
use smallvec::SmallVec;

/// One weak composition; parts line up with the attributes being varied
pub type Parts = SmallVec<[i32; ATTRIBUTE_COUNT]>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Lazy bounded weak compositions of `points` into `n` parts, each part in
/// `0..=limit`.
///
/// Yields in the same order as choosing the first part from low to high and
/// recursing on the remainder, i.e. ascending lexicographic order.
#[derive(Debug, Clone)]
pub struct WeakCompositions {
    parts: Parts,
    points: i32,
    limit: i32,
    state: State,
}

impl WeakCompositions {
    pub fn new(points: i32, n: usize, limit: i32) -> Self {
        Self {
            parts: SmallVec::from_elem(0, n),
            points,
            limit,
            state: State::Fresh,
        }
    }

    fn is_feasible(&self) -> bool {
        let n = self.parts.len() as i64;
        let points = self.points as i64;
        if n == 0 {
            return points == 0;
        }
        self.limit >= 0 && points >= 0 && points <= n * self.limit as i64
    }

    /// Step to the next composition in lexicographic order
    fn advance(&mut self) -> bool {
        let n = self.parts.len();
        if n < 2 {
            return false;
        }
        let mut suffix = self.parts[n - 1];
        for i in (0..n - 1).rev() {
            if self.parts[i] < self.limit && suffix > 0 {
                self.parts[i] += 1;
                fill_smallest(&mut self.parts[i + 1..], suffix - 1, self.limit);
                return true;
            }
            suffix += self.parts[i];
        }
        false
    }
}

/// Lexicographically smallest fill: push everything as far right as it goes
fn fill_smallest(parts: &mut [i32], mut remaining: i32, limit: i32) {
    for part in parts.iter_mut().rev() {
        let take = remaining.min(limit);
        *part = take;
        remaining -= take;
    }
    debug_assert_eq!(remaining, 0);
}

impl Iterator for WeakCompositions {
    type Item = Parts;

    fn next(&mut self) -> Option<Self::Item> {
        match self.state {
            State::Done => None,
            State::Fresh => {
                if !self.is_feasible() {
                    self.state = State::Done;
                    return None;
                }
                let (points, limit) = (self.points, self.limit);
                fill_smallest(&mut self.parts, points, limit);
                self.state = State::Running;
                Some(self.parts.clone())
            }
            State::Running => {
                if self.advance() {
                    Some(self.parts.clone())
                } else {
                    self.state = State::Done;
                    None
                }
            }
        }
    }
}

/// Levels after buying unmet requirements in STR, DEX, INT, FTH order.
///
/// The returned budget goes negative when the points cannot cover them.
pub fn meet_requirements(levels: Levels, points: i32, requirements: &Requirements) -> (Levels, i32) {
    let mut levels = levels;
    let mut points = points;
    for attribute in &Attribute::ALL[..4] {
        let index = attribute.index();
        let required = requirements.get(*attribute);
        if levels[index] < required {
            points -= required - levels[index];
            levels[index] = required;
        }
    }
    (levels, points)
}

#[inline]
fn in_range(levels: &Levels) -> bool {
    levels.iter().all(|l| (0..=MAX_LEVEL).contains(l))
}

#[derive(Debug, Clone)]
enum Source {
    Single(Option<Levels>),
    Compositions(WeakCompositions),
}

/// Lazy sequence of allocations reachable from a starting level tuple
#[derive(Debug, Clone)]
pub struct Allocations {
    base: Levels,
    links: SmallVec<[Attribute; ATTRIBUTE_COUNT]>,
    source: Source,
}

impl Allocations {
    /// Allocations for `levels` plus `points`, varying only `relevant`
    pub fn new(
        levels: Levels,
        points: i32,
        requirements: &Requirements,
        relevant: &[Attribute],
    ) -> Self {
        let (base, remaining) = meet_requirements(levels, points, requirements);
        let links: SmallVec<[Attribute; ATTRIBUTE_COUNT]> = relevant.iter().copied().collect();

        let source = if links.is_empty() {
            Source::Single(Some(base))
        } else {
            let floor = links
                .iter()
                .map(|a| base[a.index()])
                .min()
                .unwrap_or(0);
            Source::Compositions(WeakCompositions::new(
                remaining,
                links.len(),
                MAX_LEVEL - floor,
            ))
        };

        Self {
            base,
            links,
            source,
        }
    }

    /// Starting levels after requirements were bought
    pub fn base(&self) -> &Levels {
        &self.base
    }
}

impl Iterator for Allocations {
    type Item = Levels;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let levels = match &mut self.source {
                Source::Single(single) => single.take()?,
                Source::Compositions(compositions) => {
                    let parts = compositions.next()?;
                    let mut levels = self.base;
                    for (attribute, value) in self.links.iter().zip(parts.iter()) {
                        levels[attribute.index()] += value;
                    }
                    levels
                }
            };
            if in_range(&levels) {
                return Some(levels);
            }
        }
    }
}

/// Every allocation of `points` extra levels worth trying for `infusion`
pub fn allocations(weapon: &Weapon, infusion: &Infusion, levels: Levels, points: i32) -> Allocations {
    let relevant = relevant_attributes(weapon, infusion);
    Allocations::new(levels, points, &weapon.requirements, &relevant)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::quality_sword;

    fn collect(points: i32, n: usize, limit: i32) -> Vec<Vec<i32>> {
        WeakCompositions::new(points, n, limit)
            .map(|p| p.to_vec())
            .collect()
    }

    #[test]
    fn test_compositions_order() {
        assert_eq!(
            collect(2, 2, 2),
            vec![vec![0, 2], vec![1, 1], vec![2, 0]]
        );
        assert_eq!(
            collect(2, 3, 5),
            vec![
                vec![0, 0, 2],
                vec![0, 1, 1],
                vec![0, 2, 0],
                vec![1, 0, 1],
                vec![1, 1, 0],
                vec![2, 0, 0],
            ]
        );
    }

    #[test]
    fn test_compositions_respect_limit() {
        assert_eq!(collect(5, 3, 2), vec![
            vec![1, 2, 2],
            vec![2, 1, 2],
            vec![2, 2, 1],
        ]);
        assert!(collect(7, 3, 2).is_empty());
    }

    #[test]
    fn test_compositions_edge_cases() {
        assert_eq!(collect(4, 1, 9), vec![vec![4]]);
        assert!(collect(4, 1, 3).is_empty());
        assert_eq!(collect(0, 3, 0), vec![vec![0, 0, 0]]);
        assert!(collect(-1, 2, 10).is_empty());
        assert_eq!(collect(0, 0, 10), vec![Vec::<i32>::new()]);
        assert!(collect(3, 0, 10).is_empty());
    }

    #[test]
    fn test_meet_requirements_deducts_in_order() {
        let req = Requirements {
            str_: 14,
            dex: 12,
            int: 0,
            faith: 9,
        };
        let (levels, points) = meet_requirements([10, 10, 10, 8, 7], 5, &req);
        assert_eq!(levels, [14, 12, 10, 9, 7]);
        assert_eq!(points, -2);
    }

    #[test]
    fn test_no_relevant_attributes_yields_start() {
        let all: Vec<Levels> =
            Allocations::new([10; 5], 7, &Requirements::default(), &[]).collect();
        assert_eq!(all, vec![[10; 5]]);
    }

    #[test]
    fn test_deficit_leaves_nothing_to_distribute() {
        let req = Requirements {
            str_: 30,
            ..Default::default()
        };
        assert_eq!(
            Allocations::new([10; 5], 5, &req, &[Attribute::Strength]).count(),
            0
        );
        // with nothing to vary, the raised levels still stand
        let single: Vec<Levels> = Allocations::new([10; 5], 5, &req, &[]).collect();
        assert_eq!(single, vec![[30, 10, 10, 10, 10]]);
    }

    #[test]
    fn test_over_limit_filtered() {
        // Luck starts at 95, strength at 10; the shared bound comes from the
        // lower level so luck can overflow and must be dropped.
        let all: Vec<Levels> = Allocations::new(
            [10, 10, 10, 10, 95],
            6,
            &Requirements::default(),
            &[Attribute::Strength, Attribute::Luck],
        )
        .collect();
        assert_eq!(all.len(), 5);
        assert!(all.iter().all(|l| l[4] <= 99));
        assert_eq!(all.first(), Some(&[12, 10, 10, 10, 99]));
        assert_eq!(all.last(), Some(&[16, 10, 10, 10, 95]));
    }

    #[test]
    fn test_weapon_allocations_vary_relevant_only() {
        let sword = quality_sword();
        let standard = sword.infusions.iter().next().unwrap();
        let all: Vec<Levels> = allocations(&sword, standard, [8, 10, 10, 10, 10], 4).collect();
        // two points go to STR's requirement, two are left for STR/DEX
        assert_eq!(all, vec![
            [10, 12, 10, 10, 10],
            [11, 11, 10, 10, 10],
            [12, 10, 10, 10, 10],
        ]);
    }
}
