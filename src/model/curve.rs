//! Saturation curves and the interned curve table

use crate::error::{BuildError, Result};
use crate::model::damage::{DamageType, DAMAGE_TYPE_COUNT};
use ahash::AHashMap;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Entries per curve: one multiplier for every level 0..=99
pub const CURVE_LEN: usize = 100;

/// Return multiplier per attribute level.
///
/// Cloning is cheap; every infusion that references the same curve id
/// shares one backing slice.
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationCurve {
    id: Arc<str>,
    values: Arc<[f64]>,
}

impl SaturationCurve {
    pub fn new(id: &str, mut values: Vec<f64>) -> Result<Self> {
        if values.len() < CURVE_LEN {
            return Err(BuildError::InvalidCurve {
                id: id.to_string(),
                expected: CURVE_LEN,
                len: values.len(),
            });
        }
        values.truncate(CURVE_LEN);
        Ok(Self {
            id: Arc::from(id),
            values: values.into(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Multiplier at `level`, clamped into 0..=99
    #[inline]
    pub fn at(&self, level: i32) -> f64 {
        let index = level.clamp(0, CURVE_LEN as i32 - 1) as usize;
        self.values[index]
    }
}

/// One curve per damage type, in [`DamageType::ALL`] order
#[derive(Debug, Clone, PartialEq)]
pub struct SaturationSet {
    curves: [SaturationCurve; DAMAGE_TYPE_COUNT],
}

impl SaturationSet {
    pub fn new(curves: [SaturationCurve; DAMAGE_TYPE_COUNT]) -> Self {
        Self { curves }
    }

    #[inline]
    pub fn get(&self, damage_type: DamageType) -> &SaturationCurve {
        &self.curves[damage_type.index()]
    }
}

/// Immutable lookup table of curves by id
#[derive(Debug, Clone, Default)]
pub struct CurveTable {
    curves: AHashMap<String, SaturationCurve>,
}

impl CurveTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-fractional multipliers (the cached form)
    pub fn from_fractions<I>(curves: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut table = Self::new();
        for (id, values) in curves {
            table.insert(id, values)?;
        }
        Ok(table)
    }

    /// Build from percentage multipliers as served upstream (divided by 100)
    pub fn from_percentages<I>(curves: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        Self::from_fractions(
            curves
                .into_iter()
                .map(|(id, values)| (id, values.into_iter().map(|v| v / 100.0).collect())),
        )
    }

    pub fn insert(&mut self, id: String, values: Vec<f64>) -> Result<()> {
        let curve = SaturationCurve::new(&id, values)?;
        self.curves.insert(id, curve);
        Ok(())
    }

    /// Look up a curve; an unknown id means the loaded data is inconsistent
    pub fn get(&self, id: &str) -> Result<SaturationCurve> {
        self.curves
            .get(id)
            .cloned()
            .ok_or_else(|| BuildError::CurveNotFound(id.to_string()))
    }

    /// Resolve one curve id per damage type
    pub fn resolve_set(&self, ids: &[i64; DAMAGE_TYPE_COUNT]) -> Result<SaturationSet> {
        let [physical, magic, fire, lightning, dark] = ids;
        Ok(SaturationSet::new([
            self.get(&physical.to_string())?,
            self.get(&magic.to_string())?,
            self.get(&fire.to_string())?,
            self.get(&lightning.to_string())?,
            self.get(&dark.to_string())?,
        ]))
    }

    pub fn len(&self) -> usize {
        self.curves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Sorted fractional form, as written to the cache
    pub fn to_fractions(&self) -> BTreeMap<String, Vec<f64>> {
        self.curves
            .iter()
            .map(|(id, curve)| (id.clone(), curve.values().to_vec()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(scale: f64) -> Vec<f64> {
        (0..CURVE_LEN).map(|i| i as f64 * scale).collect()
    }

    #[test]
    fn test_short_curve_rejected() {
        let err = SaturationCurve::new("7", vec![0.0; 40]).unwrap_err();
        assert!(matches!(err, BuildError::InvalidCurve { len: 40, .. }));
    }

    #[test]
    fn test_long_curve_truncated() {
        let curve = SaturationCurve::new("1", vec![0.5; 120]).unwrap();
        assert_eq!(curve.values().len(), CURVE_LEN);
    }

    #[test]
    fn test_at_clamps_level() {
        let curve = SaturationCurve::new("0", ramp(1.0)).unwrap();
        assert_eq!(curve.at(-3), 0.0);
        assert_eq!(curve.at(42), 42.0);
        assert_eq!(curve.at(150), 99.0);
    }

    #[test]
    fn test_percentages_divided() {
        let table = CurveTable::from_percentages(vec![("3".to_string(), ramp(1.0))]).unwrap();
        let curve = table.get("3").unwrap();
        assert!((curve.at(50) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_curve_is_error() {
        let table = CurveTable::new();
        assert!(matches!(
            table.get("12"),
            Err(BuildError::CurveNotFound(id)) if id == "12"
        ));
    }

    #[test]
    fn test_resolved_curves_share_storage() {
        let table = CurveTable::from_fractions(vec![("0".to_string(), ramp(0.01))]).unwrap();
        let set = table.resolve_set(&[0; 5]).unwrap();
        assert!(Arc::ptr_eq(
            &set.get(DamageType::Physical).values,
            &set.get(DamageType::Dark).values
        ));
    }
}
