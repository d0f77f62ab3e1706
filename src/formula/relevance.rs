//! Which attributes can move an infusion's attack rating

use crate::formula::damage::{scaling_attributes, Blessing};
use crate::model::{Attribute, DamageType, Infusion, Weapon, ATTRIBUTE_COUNT};
use smallvec::SmallVec;

/// Attribute relevance mask, in [`Attribute::ALL`] order.
///
/// An attribute is relevant when it scales at least one damage type with a
/// non-zero base value and its own coefficient is non-zero. Faith only feeds
/// physical or magic damage on blessed weapons.
pub fn damage_increases(weapon: &Weapon, infusion: &Infusion) -> [bool; ATTRIBUTE_COUNT] {
    let blessing = Blessing::of(weapon, infusion);
    let mut increases = [false; ATTRIBUTE_COUNT];

    for damage_type in DamageType::ALL {
        if infusion.damage.get(damage_type) == 0.0 {
            continue;
        }
        for attribute in scaling_attributes(damage_type, blessing) {
            increases[attribute.index()] = true;
        }
    }

    for attribute in Attribute::ALL {
        if infusion.scaling.get(attribute) == 0.0 {
            increases[attribute.index()] = false;
        }
    }

    increases
}

/// Relevant attributes in [`Attribute::ALL`] order
pub fn relevant_attributes(weapon: &Weapon, infusion: &Infusion) -> SmallVec<[Attribute; ATTRIBUTE_COUNT]> {
    let increases = damage_increases(weapon, infusion);
    Attribute::ALL
        .into_iter()
        .filter(|a| increases[a.index()])
        .collect()
}
