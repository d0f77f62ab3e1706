//! Build search
//!
//! Allocation enumeration, the exhaustive best-build search built on it, and
//! the pairwise combination search for additive curves.

mod best_build;
pub mod combination;
pub mod enumerator;


pub use best_build::*;
pub use combination::{max_levels, max_product, CombinationBest, CombinationSearch, PairBest};
pub use enumerator::{allocations, meet_requirements, Allocations, WeakCompositions};
