//! Hand-built weapons and curves shared by unit and property tests

use crate::model::{
    CurveTable, Damage, Infusion, InfusionKind, InfusionSet, Requirements, SaturationCurve,
    SaturationSet, ScalingCoefficients, Weapon, WeaponId, WeaponType, CURVE_LEN,
};

/// Linear curve reaching `top` at level 99
pub fn linear_curve(id: &str, top: f64) -> SaturationCurve {
    let values = (0..CURVE_LEN)
        .map(|i| top * i as f64 / (CURVE_LEN - 1) as f64)
        .collect();
    SaturationCurve::new(id, values).unwrap()
}

/// Curve that rises quickly then flattens out past level 40
pub fn soft_cap_curve(id: &str) -> SaturationCurve {
    let values = (0..CURVE_LEN)
        .map(|i| {
            let level = i as f64;
            if level <= 40.0 {
                level / 40.0 * 0.8
            } else {
                0.8 + (level - 40.0) / 59.0 * 0.2
            }
        })
        .collect();
    SaturationCurve::new(id, values).unwrap()
}

pub fn uniform_saturation(curve: SaturationCurve) -> SaturationSet {
    SaturationSet::new(std::array::from_fn(|_| curve.clone()))
}

pub fn curve_table() -> CurveTable {
    let mut table = CurveTable::new();
    table
        .insert("0".to_string(), linear_curve("0", 1.0).values().to_vec())
        .unwrap();
    table
        .insert("1".to_string(), soft_cap_curve("1").values().to_vec())
        .unwrap();
    table
}

pub fn infusion(
    kind: InfusionKind,
    damage: Damage,
    scaling: ScalingCoefficients,
    saturation: SaturationSet,
) -> Infusion {
    Infusion {
        weapon: WeaponId(0),
        kind,
        scaling,
        damage,
        saturation,
    }
}

/// Weapon named `name` carrying the given infusions in their kind slots
pub fn weapon(name: &str, requirements: Requirements, infusions: Vec<Infusion>) -> Weapon {
    let mut slots: [Option<Infusion>; 16] = std::array::from_fn(|_| None);
    for infusion in infusions {
        let index = infusion.kind.index();
        slots[index] = Some(infusion);
    }
    Weapon {
        id: WeaponId(0),
        source_id: format!("{}-id", name.to_lowercase().replace(' ', "-")),
        name: name.to_string(),
        weapon_type: WeaponType::StraightSword,
        weight: 3.0,
        bleed: 0.0,
        poison: 0.0,
        frost: 0.0,
        requirements,
        defence: Damage::default(),
        infusable: true,
        dual_wield: false,
        infusions: InfusionSet::new(slots),
    }
}

/// A quality-style straight sword: physical damage scaling with STR and DEX
pub fn quality_sword() -> Weapon {
    weapon(
        "Long Sword",
        Requirements {
            str_: 10,
            dex: 10,
            int: 0,
            faith: 0,
        },
        vec![infusion(
            InfusionKind::Standard,
            Damage {
                physical: 110.0,
                ..Default::default()
            },
            ScalingCoefficients {
                str_: 0.4,
                dex: 0.4,
                ..Default::default()
            },
            uniform_saturation(soft_cap_curve("1")),
        )],
    )
}
