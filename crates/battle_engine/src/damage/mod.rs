//! Damage engine.
//!
//! In scope here: the deterministic base formula plus the uniform 85-100%
//! variance roll. `DamageMods` is the extension point for the full formula
//! (type effectiveness, STAB, critical hits, weather): callers that have
//! those inputs pass them and they are applied through the 4096-scale
//! modifier chain; callers that do not pass `DamageMods::default()` and get
//! the baseline behavior.

pub mod formula;

pub use formula::{apply_modifier, apply_variance, base_damage};

use crate::core_data::{Combatant, MoveCategory, MoveRecord, StatName};
use crate::state::BattleContext;

/// 1.5x on the 4096 scale (STAB, critical hits).
pub const MOD_3_2: u16 = 6144;

/// Multipliers outside the baseline formula, all neutral by default.
#[derive(Debug, Clone, Copy)]
pub struct DamageMods {
    /// Type-effectiveness multiplier on the 4096 scale (4096 = neutral).
    /// Looked up by the caller from its type × type matrix.
    pub effectiveness: u16,
    /// Same-type attack bonus applies (1.5x).
    pub stab: bool,
    /// Critical hit (1.5x).
    pub is_crit: bool,
    /// Weather multiplier on the 4096 scale (4096 = neutral).
    pub weather: u16,
}

impl Default for DamageMods {
    fn default() -> Self {
        Self {
            effectiveness: 4096,
            stab: false,
            is_crit: false,
            weather: 4096,
        }
    }
}

/// Offensive/defensive stat pair selected by the move's damage class.
#[inline]
fn stat_pair(category: MoveCategory) -> Option<(StatName, StatName)> {
    match category {
        MoveCategory::Physical => Some((StatName::Attack, StatName::Defense)),
        MoveCategory::Special => Some((StatName::SpecialAttack, StatName::SpecialDefense)),
        MoveCategory::Status => None,
    }
}

/// Compute the damage one hit of `record` deals.
///
/// Consumes exactly one draw from the stream (the variance roll) for damaging
/// moves, and none for status moves or zero-power records.
pub fn calculate_damage(
    attacker: &Combatant,
    defender: &Combatant,
    record: &MoveRecord,
    mods: DamageMods,
    ctx: &mut BattleContext,
) -> u16 {
    let Some((atk_stat, def_stat)) = stat_pair(record.damage_class) else {
        return 0;
    };
    if record.power == 0 {
        return 0;
    }

    let base = formula::base_damage(
        attacker.level as u32,
        record.power as u32,
        attacker.stat(atk_stat) as u32,
        defender.stat(def_stat) as u32,
    );

    let roll = ctx.range_inclusive(85, 100);
    let mut damage = formula::apply_variance(base, roll);

    damage = formula::apply_modifier(damage, mods.effectiveness);
    if mods.stab {
        damage = formula::apply_modifier(damage, MOD_3_2);
    }
    if mods.is_crit {
        damage = formula::apply_modifier(damage, MOD_3_2);
    }
    damage = formula::apply_modifier(damage, mods.weather);

    damage.min(u16::MAX as u32) as u16
}
