//! Hit/miss evaluation.
//!
//! Rules are checked in strict precedence order; each one short-circuits the
//! rest, and only the final numeric rule consumes a draw from the stream:
//!
//! 1. Type-based always-hit exemption (toxic from a poison type).
//! 2. Semi-invulnerability override: a hidden defender is hit only by the
//!    whitelist associated with its evasion move, never by accuracy math.
//! 3. Null base accuracy is a guaranteed hit (swift, aerial-ace, self- and
//!    field-targeted moves).
//! 4. Effective accuracy = base × stage(attacker acc) / stage(defender eva),
//!    capped at 100; a uniform draw over [0,100) must be strictly below it.

use crate::classify::{always_hits_for_poison, semi_invuln_counters};
use crate::core_data::{Combatant, MoveRecord, Type};
use crate::state::{ActiveState, BattleContext, CombatantId};

/// Exact accuracy/evasion stage ratio as (numerator, denominator).
///
/// Stage 0 is 3/3; the positive ramp is 4/3 .. 9/3 and the negative ramp
/// 3/4 .. 3/9. Stages outside [-6, +6] are clamped.
#[inline]
pub const fn stage_ratio(stage: i8) -> (u32, u32) {
    let stage = if stage > 6 {
        6
    } else if stage < -6 {
        -6
    } else {
        stage
    };
    if stage >= 0 {
        (3 + stage as u32, 3)
    } else {
        (3, 3 + (-stage) as u32)
    }
}

/// Stage ratio as a float, for the effective-accuracy product.
#[inline]
pub fn stage_multiplier(stage: i8) -> f64 {
    let (num, den) = stage_ratio(stage);
    num as f64 / den as f64
}

/// Decide whether `record` used by `attacker` hits `defender` this turn.
pub fn accuracy_check(
    attacker: &Combatant,
    defender: &Combatant,
    record: &MoveRecord,
    ctx: &mut BattleContext,
    defender_id: CombatantId,
) -> bool {
    // Rule 1: toxic never misses for a poison-typed user.
    if always_hits_for_poison(&record.name) && attacker.has_type(Type::Poison) {
        return true;
    }

    // Rule 2: a hidden defender is only reachable through the whitelist of
    // its own evasion move. No numeric accuracy applies either way.
    if let ActiveState::SemiInvulnerable {
        record: evasion, ..
    } = &ctx.state(defender_id).active
    {
        return semi_invuln_counters(&evasion.name).contains(&record.name.as_str());
    }

    // Rule 3: null accuracy means exempt from the accuracy calculation.
    let Some(base) = record.accuracy else {
        return true;
    };
    if base == 0 {
        return true;
    }

    // Rule 4: standard stage-scaled check.
    let effective = (base as f64 * stage_multiplier(attacker.accuracy_stage)
        / stage_multiplier(defender.evasion_stage))
    .min(100.0);

    (ctx.percent() as f64) < effective
}
