//! Damage formula and attribute relevance
//!
//! Converts an attribute allocation into per-damage-type output for one
//! infusion, and decides which attributes are worth spending points on.

pub mod damage;
mod relevance;


pub use damage::*;
pub use relevance::*;
