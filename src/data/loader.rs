//! Record → model conversion

use crate::data::records::WeaponRecord;
use crate::error::Result;
use crate::model::{
    CurveTable, Damage, Dataset, Infusion, InfusionKind, InfusionSet, Requirements,
    ScalingCoefficients, Weapon, WeaponId, WeaponType, DAMAGE_TYPE_COUNT, INFUSION_COUNT,
};

const SCALING_GROUP: usize = 4;

/// Build the immutable dataset; any unresolvable curve id aborts the load
pub fn build_dataset(records: &[WeaponRecord], curves: CurveTable) -> Result<Dataset> {
    let weapons = records
        .iter()
        .enumerate()
        .map(|(index, record)| build_weapon(WeaponId(index), record, &curves))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(
        weapons = weapons.len(),
        infusions = weapons.iter().map(|w| w.infusions.present()).sum::<usize>(),
        curves = curves.len(),
        "built dataset"
    );
    Ok(Dataset::new(weapons, curves))
}

pub fn build_weapon(id: WeaponId, record: &WeaponRecord, curves: &CurveTable) -> Result<Weapon> {
    let weapon_type: WeaponType = record.weapon_type.parse()?;

    Ok(Weapon {
        id,
        source_id: record.id.clone(),
        name: record.name.clone(),
        weapon_type,
        weight: record.weight,
        bleed: record.bleed,
        poison: record.poison,
        frost: record.frost,
        requirements: Requirements {
            str_: record.strength_req,
            dex: record.dex_req,
            int: record.intelligence_req,
            faith: record.faith_req,
        },
        defence: Damage {
            physical: record.physical_def,
            magic: record.magic_def,
            fire: record.fire_def,
            lightning: record.lightning_def,
            dark: record.dark_def,
        },
        infusable: record.infusable,
        dual_wield: record.dual_wield,
        infusions: build_infusions(id, record, curves)?,
    })
}

/// Number of infusion slots the record's arrays fully describe
fn slot_count(record: &WeaponRecord) -> usize {
    let scaling = record.scaling_coefficients.len();
    [
        record.base_damage.len() / DAMAGE_TYPE_COUNT,
        scaling / SCALING_GROUP,
        scaling.min(INFUSION_COUNT),
        record.stat_funcs.len() / DAMAGE_TYPE_COUNT,
        INFUSION_COUNT,
    ]
    .into_iter()
    .min()
    .unwrap_or(0)
}

fn build_infusions(id: WeaponId, record: &WeaponRecord, curves: &CurveTable) -> Result<InfusionSet> {
    let scaling = &record.scaling_coefficients;
    // intelligence coefficients sit in the last (up to) sixteen entries
    let intelligence = &scaling[scaling.len().saturating_sub(INFUSION_COUNT)..];

    let mut slots: [Option<Infusion>; INFUSION_COUNT] = std::array::from_fn(|_| None);
    for (k, kind) in InfusionKind::ALL.into_iter().enumerate().take(slot_count(record)) {
        let d = k * DAMAGE_TYPE_COUNT;
        let s = k * SCALING_GROUP;

        let damage = Damage {
            physical: record.base_damage[d],
            magic: record.base_damage[d + 1],
            fire: record.base_damage[d + 2],
            lightning: record.base_damage[d + 3],
            dark: record.base_damage[d + 4],
        };
        let coefficients = ScalingCoefficients {
            str_: scaling[s] / 100.0,
            dex: scaling[s + 1] / 100.0,
            int: intelligence[k] / 100.0,
            faith: scaling[s + 2] / 100.0,
            luck: scaling[s + 3] / 100.0,
        };
        if Infusion::is_empty_profile(&damage, &coefficients) {
            continue;
        }

        let ids: [i64; DAMAGE_TYPE_COUNT] = std::array::from_fn(|t| record.stat_funcs[d + t]);
        slots[k] = Some(Infusion {
            weapon: id,
            kind,
            scaling: coefficients,
            damage,
            saturation: curves.resolve_set(&ids)?,
        });
    }

    Ok(InfusionSet::new(slots))
}
