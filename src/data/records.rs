//! Upstream record shapes
//!
//! The weapon API is loose about types: numbers can arrive as strings and the
//! per-infusion arrays are sometimes JSON-encoded strings. Everything here is
//! normalised on deserialization so the loader only sees plain values.

use crate::error::{BuildError, Result};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One weapon as served upstream (and as stored in the weapon cache)
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeaponRecord {
    pub name: String,
    #[serde(deserialize_with = "text")]
    pub id: String,
    pub weapon_type: String,
    #[serde(deserialize_with = "number")]
    pub weight: f64,
    #[serde(default, deserialize_with = "number")]
    pub bleed: f64,
    #[serde(default, deserialize_with = "number")]
    pub poison: f64,
    #[serde(default, deserialize_with = "number")]
    pub frost: f64,
    #[serde(deserialize_with = "integer")]
    pub strength_req: i32,
    #[serde(deserialize_with = "integer")]
    pub dex_req: i32,
    #[serde(deserialize_with = "integer")]
    pub intelligence_req: i32,
    #[serde(deserialize_with = "integer")]
    pub faith_req: i32,
    #[serde(default, deserialize_with = "number")]
    pub physical_def: f64,
    #[serde(default, deserialize_with = "number")]
    pub magic_def: f64,
    #[serde(default, deserialize_with = "number")]
    pub fire_def: f64,
    #[serde(default, deserialize_with = "number")]
    pub lightning_def: f64,
    #[serde(default, deserialize_with = "number")]
    pub dark_def: f64,
    #[serde(default, deserialize_with = "truthy")]
    pub infusable: bool,
    #[serde(default, deserialize_with = "truthy")]
    pub dual_wield: bool,
    /// Five damage values per infusion slot
    #[serde(default, deserialize_with = "number_list")]
    pub base_damage: Vec<f64>,
    /// Four (STR, DEX, FTH, LCK) percentages per slot, then one INT
    /// percentage per slot at the tail
    #[serde(default, deserialize_with = "number_list")]
    pub scaling_coefficients: Vec<f64>,
    /// Five curve ids per infusion slot
    #[serde(default, deserialize_with = "id_list")]
    pub stat_funcs: Vec<i64>,
}

/// Flatten paged weapon responses (`{"results": [{"key", "id"}], <key>: {<id>: record}}`)
pub fn weapons_from_pages(pages: &[Value]) -> Result<Vec<WeaponRecord>> {
    let mut weapons = Vec::new();
    for page in pages {
        let results = page
            .get("results")
            .and_then(Value::as_array)
            .ok_or_else(|| BuildError::DeserializationError("results not found".to_string()))?;

        for result in results {
            let key = result
                .get("key")
                .and_then(Value::as_str)
                .ok_or_else(|| BuildError::DeserializationError("result key not found".to_string()))?;
            let id = match result.get("id") {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => {
                    return Err(BuildError::DeserializationError(
                        "result id not found".to_string(),
                    ))
                }
            };
            let record = page.get(key).and_then(|group| group.get(&id)).ok_or_else(|| {
                BuildError::DeserializationError(format!("record {}/{} not found", key, id))
            })?;
            weapons.push(WeaponRecord::deserialize(record)?);
        }
    }
    Ok(weapons)
}

/// Number of entries on a weapon page, used by the fetcher to stop paging
pub fn weapon_page_len(page: &Value) -> usize {
    page.get("results")
        .and_then(Value::as_array)
        .map_or(0, Vec::len)
}

// ============================================================================
// Lenient field deserializers
// ============================================================================

fn value_to_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}

fn number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    value_to_f64(&value)
        .ok_or_else(|| de::Error::custom(format!("expected a number, got {}", value)))
}

fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i32, D::Error> {
    number(deserializer).map(|n| n.trunc() as i32)
}

fn text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected an id, got {}", other))),
    }
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !matches!(s.trim().to_ascii_lowercase().as_str(), "" | "0" | "false"),
        Value::Null => false,
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    })
}

/// Array of numbers, or a string holding one
fn list_values<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items),
        Value::String(s) => serde_json::from_str(&s).map_err(de::Error::custom),
        Value::Null => Ok(Vec::new()),
        other => Err(de::Error::custom(format!("expected a list, got {}", other))),
    }
}

fn number_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<f64>, D::Error> {
    list_values(deserializer)?
        .iter()
        .map(|v| {
            value_to_f64(v).ok_or_else(|| de::Error::custom(format!("expected a number, got {}", v)))
        })
        .collect()
}

fn id_list<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Vec<i64>, D::Error> {
    list_values(deserializer)?
        .iter()
        .map(|v| {
            value_to_f64(v)
                .map(|n| n.trunc() as i64)
                .ok_or_else(|| de::Error::custom(format!("expected a curve id, got {}", v)))
        })
        .collect()
}
