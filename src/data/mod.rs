//! Data loading
//!
//! Upstream records and curve maps are parsed, resolved against each other
//! and frozen into a [`Dataset`](crate::model::Dataset). A small JSON cache
//! sits in front of whatever fetches the data.

pub mod cache;
pub mod curves;
mod loader;
pub mod records;

pub use cache::{load_or_fetch, DataCache, LoadPolicy};
pub use curves::{curves_from_json, curves_from_pages, curves_to_json};
pub use loader::*;
pub use records::{weapon_page_len, weapons_from_pages, WeaponRecord};
