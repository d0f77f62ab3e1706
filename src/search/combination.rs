//! Fast combination search over five additive curves
//!
//! Curves 1+2 and 3+4 are folded into best-value-per-index-sum tables, so a
//! budget only needs a scan over (pair sum, pair sum) with curve 0 taking
//! whatever is left. This avoids walking every weak composition.

use serde::Serialize;
use smallvec::SmallVec;

/// Best combined value for one index sum of two curves
#[derive(Debug, Clone, PartialEq)]
pub struct PairBest {
    pub value: f64,
    /// Every `(i, j)` with `i + j` equal to the sum that reaches `value`
    pub pairs: SmallVec<[(usize, usize); 4]>,
}

/// Best value and index split of two curves for every index sum
///
/// Entry `k` covers all `(i, j)` with `i + j == k`. Empty when either curve
/// is empty.
pub fn max_product(a: &[f64], b: &[f64]) -> Vec<PairBest> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let mut output: Vec<Option<PairBest>> = vec![None; a.len() + b.len() - 1];
    for (i, x) in a.iter().enumerate() {
        for (j, y) in b.iter().enumerate() {
            let value = x + y;
            match &mut output[i + j] {
                Some(best) if best.value == value => best.pairs.push((i, j)),
                Some(best) if best.value > value => {}
                slot => {
                    let mut pairs = SmallVec::new();
                    pairs.push((i, j));
                    *slot = Some(PairBest { value, pairs });
                }
            }
        }
    }

    // every index sum in range is reachable, so no slot stays empty
    output.into_iter().flatten().collect()
}

/// Best total for one budget and every index tuple that reaches it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CombinationBest {
    pub budget: usize,
    pub total: f64,
    pub levels: Vec<[usize; 5]>,
}

/// Pair tables for five curves, built once and reused for every budget
#[derive(Debug, Clone)]
pub struct CombinationSearch<'a> {
    first: &'a [f64],
    bc: Vec<PairBest>,
    de: Vec<PairBest>,
}

impl<'a> CombinationSearch<'a> {
    pub fn new(curves: [&'a [f64]; 5]) -> Self {
        let [first, b, c, d, e] = curves;
        Self {
            first,
            bc: max_product(b, c),
            de: max_product(d, e),
        }
    }

    /// Every feasible `(total, a, t, u)` split of `budget`, where `t` and
    /// `u` index the two pair tables and `a` indexes the first curve
    pub fn candidates(&self, budget: usize) -> impl Iterator<Item = (f64, usize, usize, usize)> + '_ {
        self.bc
            .iter()
            .enumerate()
            .take_while(move |(t, _)| *t <= budget)
            .flat_map(move |(t, bc)| {
                self.de
                    .iter()
                    .enumerate()
                    .take_while(move |(u, _)| t + u <= budget)
                    .filter_map(move |(u, de)| {
                        let a = budget - t - u;
                        self.first
                            .get(a)
                            .map(|first| (bc.value + de.value + first, a, t, u))
                    })
            })
    }

    /// Best total for `budget`; `None` when no split fits inside the curves
    pub fn best(&self, budget: usize) -> Option<CombinationBest> {
        let mut total: Option<f64> = None;
        let mut winners: SmallVec<[(usize, usize, usize); 4]> = SmallVec::new();

        for (value, a, t, u) in self.candidates(budget) {
            match total {
                Some(best) if value < best => continue,
                Some(best) if value == best => winners.push((a, t, u)),
                _ => {
                    total = Some(value);
                    winners.clear();
                    winners.push((a, t, u));
                }
            }
        }

        let total = total?;
        let levels = winners
            .iter()
            .flat_map(|&(a, t, u)| {
                let de = &self.de[u];
                self.bc[t].pairs.iter().flat_map(move |&(b, c)| {
                    de.pairs.iter().map(move |&(d, e)| [a, b, c, d, e])
                })
            })
            .collect();

        Some(CombinationBest {
            budget,
            total,
            levels,
        })
    }
}

/// Best totals for every budget `0..=levels`, lazily; the item at position
/// `n` is the result for budget `n`
pub fn max_levels<'a>(
    levels: usize,
    curves: [&'a [f64]; 5],
) -> impl Iterator<Item = Option<CombinationBest>> + 'a {
    let search = CombinationSearch::new(curves);
    (0..=levels).map(move |budget| search.best(budget))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_product_keeps_ties() {
        let table = max_product(&[0.0, 1.0, 2.0], &[0.0, 1.0]);
        assert_eq!(table.len(), 4);
        assert_eq!(table[0].value, 0.0);
        assert_eq!(table[1].value, 1.0);
        assert_eq!(table[1].pairs.as_slice(), &[(0, 1), (1, 0)]);
        assert_eq!(table[3].value, 3.0);
        assert_eq!(table[3].pairs.as_slice(), &[(2, 1)]);
    }

    #[test]
    fn test_max_product_replaces_lower_value() {
        let table = max_product(&[0.0, 5.0], &[0.0, 1.0]);
        assert_eq!(table[1].value, 5.0);
        assert_eq!(table[1].pairs.as_slice(), &[(1, 0)]);
    }

    #[test]
    fn test_max_product_empty() {
        assert!(max_product(&[], &[1.0]).is_empty());
    }

    #[test]
    fn test_single_point_goes_to_strongest_curve() {
        let curves: [&[f64]; 5] = [
            &[0.0, 5.0],
            &[0.0, 3.0],
            &[0.0, 2.0],
            &[0.0, 1.0],
            &[0.0, 0.0],
        ];
        let best = CombinationSearch::new(curves).best(1).unwrap();
        assert_eq!(best.total, 5.0);
        assert_eq!(best.levels, vec![[1, 0, 0, 0, 0]]);
    }

    #[test]
    fn test_budget_sequence() {
        let curves: [&[f64]; 5] = [
            &[0.0, 5.0],
            &[0.0, 3.0],
            &[0.0, 2.0],
            &[0.0, 1.0],
            &[0.0, 0.0],
        ];
        let totals: Vec<Option<f64>> = max_levels(6, curves)
            .map(|best| best.map(|b| b.total))
            .collect();
        assert_eq!(
            totals,
            vec![
                Some(0.0),
                Some(5.0),
                Some(8.0),
                Some(10.0),
                Some(11.0),
                Some(11.0),
                None
            ]
        );
    }

    #[test]
    fn test_ties_across_splits_are_all_reported() {
        let curves: [&[f64]; 5] = [&[0.0, 1.0], &[0.0, 1.0], &[0.0], &[0.0], &[0.0]];
        let best = CombinationSearch::new(curves).best(1).unwrap();
        assert_eq!(best.total, 1.0);
        assert_eq!(best.levels, vec![[1, 0, 0, 0, 0], [0, 1, 0, 0, 0]]);
    }
}
