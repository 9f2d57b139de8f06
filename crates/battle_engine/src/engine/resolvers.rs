//! Stochastic and derived sub-resolvers for a landed move.
//!
//! Draw behavior is part of the determinism contract: multi-hit draws only
//! when the configured range is open, flinch always draws, ailment and
//! stat-chance draw only when their chance is non-zero.

use crate::core_data::{MoveMeta, StatChange};
use crate::state::BattleContext;

/// Number of hits for a move with the given configured range.
///
/// Both zero means a plain single-hit move; an equal pair is a fixed count;
/// an open range samples the standard 35/35/15/15 split over 2-5 hits.
pub fn roll_multi_hit(min_hits: u8, max_hits: u8, ctx: &mut BattleContext) -> u8 {
    if min_hits == 0 && max_hits == 0 {
        return 1;
    }
    if min_hits == max_hits {
        return min_hits;
    }
    match ctx.percent() {
        0..=34 => 2,
        35..=69 => 3,
        70..=84 => 4,
        _ => 5,
    }
}

/// Independent Bernoulli flinch draw (0% never flinches).
#[inline]
pub fn roll_flinch(flinch_chance: u8, ctx: &mut BattleContext) -> bool {
    ctx.percent() < flinch_chance
}

/// Signed fraction of damage dealt returned to the user.
///
/// Positive = drain/heal, negative = recoil self-damage; the data layer's
/// `drain` percentage already carries the sign.
#[inline]
pub fn recoil_multiplier(drain: i8) -> f32 {
    drain as f32 / 100.0
}

/// Roll the move's ailment, returning the status name it inflicts.
///
/// A zero `ailment_chance` means the ailment is the move's primary effect
/// and always applies (no draw), same convention as `stat_chance`.
pub fn roll_ailment(meta: &MoveMeta, ctx: &mut BattleContext) -> Option<String> {
    if meta.ailment.is_empty() || meta.ailment == "none" {
        return None;
    }
    if meta.ailment_chance > 0 && ctx.percent() >= meta.ailment_chance {
        return None;
    }
    Some(meta.ailment.clone())
}

/// Roll whether the move's stat changes apply this turn.
///
/// A zero `stat_chance` means the changes are the move's primary effect and
/// always apply (no draw).
pub fn roll_stat_changes(
    stat_changes: &[StatChange],
    stat_chance: u8,
    ctx: &mut BattleContext,
) -> Vec<StatChange> {
    if stat_changes.is_empty() {
        return Vec::new();
    }
    if stat_chance > 0 && ctx.percent() >= stat_chance {
        return Vec::new();
    }
    stat_changes.to_vec()
}
