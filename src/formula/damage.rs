//! Attack damage for a given attribute allocation

use crate::model::{
    Attribute, DamageType, DamageValues, Infusion, InfusionKind, Levels, Weapon,
};

/// Weapons whose physical damage also scales with faith
pub const PHYSICAL_BLESSED_WEAPONS: [&str; 5] = [
    "Anri’s Straight Sword",
    "Saint Bident",
    "Lothric’s Holy Sword",
    "Wolnir’s Holy Blade",
    "Morne’s Great Hammer",
];

/// The single weapon whose magic damage also scales with faith
pub const MAGIC_BLESSED_WEAPON: &str = "Golden Ritual Spear";

/// Which damage types pick up a faith contribution they normally lack
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Blessing {
    pub physical: bool,
    pub magic: bool,
}

impl Blessing {
    pub fn of(weapon: &Weapon, infusion: &Infusion) -> Self {
        Self {
            physical: is_physical_blessed(weapon, infusion),
            magic: is_magic_blessed(weapon),
        }
    }
}

#[inline]
pub fn is_physical_blessed(weapon: &Weapon, infusion: &Infusion) -> bool {
    infusion.kind == InfusionKind::Blessed
        || PHYSICAL_BLESSED_WEAPONS.contains(&weapon.name.as_str())
}

#[inline]
pub fn is_magic_blessed(weapon: &Weapon) -> bool {
    weapon.name == MAGIC_BLESSED_WEAPON
}

/// Attributes that scale `damage_type`, in summation order
pub fn scaling_attributes(damage_type: DamageType, blessing: Blessing) -> &'static [Attribute] {
    use Attribute::*;

    match damage_type {
        DamageType::Physical if blessing.physical => &[Strength, Dexterity, Luck, Faith],
        DamageType::Physical => &[Strength, Dexterity, Luck],
        DamageType::Magic if blessing.magic => &[Intelligence, Faith],
        DamageType::Magic => &[Intelligence],
        DamageType::Fire | DamageType::Dark => &[Intelligence, Faith],
        DamageType::Lightning => &[Faith],
    }
}

/// Per-type damage of `infusion` at `levels`.
///
/// Returns all zeros when any requirement of the owning weapon is unmet.
/// Each type is floored independently.
pub fn damages(weapon: &Weapon, infusion: &Infusion, levels: &Levels) -> DamageValues {
    debug_assert_eq!(weapon.id, infusion.weapon);

    let mut output = [0; 5];
    if !weapon.requirements.met_by(levels) {
        return output;
    }

    let blessing = Blessing::of(weapon, infusion);
    for damage_type in DamageType::ALL {
        let base = infusion.damage.get(damage_type);
        if base == 0.0 {
            continue;
        }
        let curve = infusion.saturation.get(damage_type);
        let multiplier = scaling_attributes(damage_type, blessing)
            .iter()
            .fold(1.0, |acc, attribute| {
                acc + infusion.scaling.get(*attribute) * curve.at(levels[attribute.index()])
            });
        output[damage_type.index()] = (base * multiplier).floor() as i32;
    }
    output
}
