//! Saturation curve maps, upstream and cached

use crate::error::Result;
use crate::model::CurveTable;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Deserialize)]
struct MiscPage {
    dark_souls_3: MiscGame,
}

#[derive(Debug, Deserialize)]
struct MiscGame {
    #[serde(default)]
    scaling_saturation_curves: BTreeMap<String, Vec<f64>>,
}

/// Merge paged misc responses into one curve table.
///
/// Upstream multipliers are percentages; later pages win on duplicate ids.
pub fn curves_from_pages(pages: &[Value]) -> Result<CurveTable> {
    let mut percentages = BTreeMap::new();
    for page in pages {
        let page = MiscPage::deserialize(page)?;
        percentages.extend(page.dark_souls_3.scaling_saturation_curves);
    }
    CurveTable::from_percentages(percentages)
}

/// Parse the cached `{id: [fraction; 100]}` form
pub fn curves_from_json(json: &str) -> Result<CurveTable> {
    let fractions: BTreeMap<String, Vec<f64>> = serde_json::from_str(json)?;
    CurveTable::from_fractions(fractions)
}

/// Serialize to the cached form
pub fn curves_to_json(curves: &CurveTable) -> Result<String> {
    Ok(serde_json::to_string(&curves.to_fractions())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BuildError;
    use serde_json::json;

    fn percent_curve(top: f64) -> Vec<f64> {
        (0..100).map(|i| top * i as f64 / 99.0).collect()
    }

    #[test]
    fn test_pages_merge_and_scale() {
        let pages = [
            json!({"dark_souls_3": {"scaling_saturation_curves": {"0": percent_curve(100.0)}}}),
            json!({"dark_souls_3": {"scaling_saturation_curves": {"1": percent_curve(50.0)}}}),
        ];
        let table = curves_from_pages(&pages).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("0").unwrap().at(99), 1.0);
        assert_eq!(table.get("1").unwrap().at(99), 0.5);
    }

    #[test]
    fn test_short_upstream_curve_rejected() {
        let pages = [json!({"dark_souls_3": {"scaling_saturation_curves": {"7": [0, 10, 20]}}})];
        assert!(matches!(
            curves_from_pages(&pages),
            Err(BuildError::InvalidCurve { .. })
        ));
    }

    #[test]
    fn test_cached_form_is_fractional() {
        let pages = [json!({"dark_souls_3": {"scaling_saturation_curves": {"3": percent_curve(80.0)}}})];
        let table = curves_from_pages(&pages).unwrap();
        let json = curves_to_json(&table).unwrap();
        let cached = curves_from_json(&json).unwrap();
        assert_eq!(cached.get("3").unwrap().values(), table.get("3").unwrap().values());
    }

    #[test]
    fn test_cached_values_are_bit_exact() {
        let mut values: Vec<f64> = (0..100).map(|i| i as f64 / 330.0).collect();
        values[1] = 0.024242424242424242;
        values[2] = 0.36363636363636365;
        let mut table = CurveTable::new();
        table.insert("5".to_string(), values.clone()).unwrap();

        let cached = curves_from_json(&curves_to_json(&table).unwrap()).unwrap();
        let restored = cached.get("5").unwrap();
        for (i, (a, b)) in restored.values().iter().zip(values.iter()).enumerate() {
            assert_eq!(a.to_bits(), b.to_bits(), "entry {}", i);
        }
    }

    #[test]
    fn test_malformed_cache_is_deserialization_error() {
        assert!(matches!(
            curves_from_json("{\"0\": \"flat\"}"),
            Err(BuildError::DeserializationError(_))
        ));
    }
}
