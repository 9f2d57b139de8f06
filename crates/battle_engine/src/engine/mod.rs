//! Move resolution: the per-combatant state machine and outcome aggregation.
//!
//! # Turn flow
//!
//! [`execute_move`] is the single entry point the external turn loop calls,
//! once per combatant per turn. One call resolves fully before the next
//! begins:
//!
//! 1. Orthogonal counters tick (trap, confusion, timed ailment).
//! 2. A pending recharge consumes the turn outright.
//! 3. An in-progress multi-turn state decides the turn: preparation turns
//!    produce flavor text only; completion and auto-repeat turns run the full
//!    pipeline with the *stored* record, ignoring the chosen slot.
//! 4. From idle, the chosen move either installs a preparation state or runs
//!    the pipeline: accuracy → state installation on hit (rampage, lock-in,
//!    trap, recharge) → multi-hit → flinch → ailment → stat changes → damage
//!    → recoil.
//!
//! Side effects are confined to the attacker's and defender's battle states
//! and the chosen slot's PP counter. HP application is the caller's job,
//! driven by the returned [`MoveOutcome`].

pub mod messages;
pub mod resolvers;

use std::sync::Arc;

use crate::accuracy::accuracy_check;
use crate::classify::{classify, sets_minimized, MoveClass};
use crate::core_data::{Combatant, MoveRecord, MoveTarget, StatChange};
use crate::damage::{calculate_damage, DamageMods};
use crate::state::{
    ActiveState, AilmentState, BattleContext, BattleState, CombatantId, ConfusedState,
    TrappedState,
};

use messages::{charge_message, semi_invuln_message};
use resolvers::{recoil_multiplier, roll_ailment, roll_flinch, roll_multi_hit, roll_stat_changes};

/// Everything one move execution produced, consumed immediately by the turn
/// loop. Not persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveOutcome {
    /// False only when the accuracy pipeline rejected the move.
    pub hit: bool,
    /// Total damage across all hits; the caller applies it to HP.
    pub damage: u16,
    /// Hits landed (0 on preparation, recharge, and miss turns).
    pub num_hits: u8,
    pub flinched: bool,
    /// Signed fraction of `damage` returned to the user: positive =
    /// drain/heal, negative = recoil self-damage.
    pub recoil: f32,
    /// Status ailment inflicted on the target, if any.
    pub caused_status: Option<String>,
    /// Stage deltas applied to the user this turn.
    pub user_stat_changes: Vec<StatChange>,
    /// Stage deltas applied to the target this turn.
    pub target_stat_changes: Vec<StatChange>,
    pub narration: String,
}

impl MoveOutcome {
    fn message_only(narration: String) -> Self {
        Self {
            hit: true,
            narration,
            ..Self::default()
        }
    }

    fn missed(attacker: &Combatant, record: &MoveRecord) -> Self {
        Self {
            hit: false,
            narration: format!("{}'s {} missed!", attacker.species, record.name),
            ..Self::default()
        }
    }
}

/// The move a combatant is compelled to repeat this turn, if any.
///
/// The turn loop consults this before offering a choice: a non-idle active
/// state (charge completion, rampage, lock-in) forces the stored move.
pub fn forced_move(ctx: &BattleContext, id: CombatantId) -> Option<Arc<MoveRecord>> {
    match &ctx.state(id).active {
        ActiveState::Idle => None,
        ActiveState::Charging { record, .. }
        | ActiveState::SemiInvulnerable { record, .. }
        | ActiveState::LockedIn { record, .. }
        | ActiveState::Rampaging { record, .. } => Some(record.clone()),
    }
}

/// Resolve one move use for `attacker` against `defender`.
///
/// `slot` indexes the attacker's move slots; an out-of-range index or an
/// unregistered handle is a caller bug and panics. The slot's PP counter is
/// decremented even on preparation and forced turns.
pub fn execute_move(
    ctx: &mut BattleContext,
    attacker: &mut Combatant,
    attacker_id: CombatantId,
    defender: &Combatant,
    defender_id: CombatantId,
    slot: usize,
) -> MoveOutcome {
    let chosen = attacker.moves[slot].record.clone();
    attacker.moves[slot].remaining_pp = attacker.moves[slot].remaining_pp.saturating_sub(1);

    tick_counters(ctx.state_mut(attacker_id));

    // A landed recharge-class move costs this whole turn.
    if ctx.state(attacker_id).recharging {
        ctx.state_mut(attacker_id).recharging = false;
        return MoveOutcome {
            hit: false,
            narration: format!("{} must recharge!", attacker.species),
            ..MoveOutcome::default()
        };
    }

    match std::mem::take(&mut ctx.state_mut(attacker_id).active) {
        ActiveState::Idle => {}

        // Preparation done (2-turn charge): the stored move executes now and
        // the state returns to idle whatever the accuracy pipeline says.
        ActiveState::Charging {
            record,
            turns_total,
            elapsed,
        } => {
            let elapsed = elapsed + 1;
            if elapsed < turns_total {
                ctx.state_mut(attacker_id).active = ActiveState::Charging {
                    record: record.clone(),
                    turns_total,
                    elapsed,
                };
                return MoveOutcome::message_only(charge_message(
                    &record.name,
                    &attacker.species,
                    &defender.species,
                ));
            }
            return resolve_attack(ctx, attacker, attacker_id, defender, defender_id, &record);
        }

        // The invulnerability window closes and the stored move strikes.
        ActiveState::SemiInvulnerable { record, .. } => {
            return resolve_attack(ctx, attacker, attacker_id, defender, defender_id, &record);
        }

        ActiveState::Rampaging {
            record,
            max_turns,
            elapsed,
            confuse_on_end,
        } => {
            let elapsed = elapsed + 1;
            let expiring = elapsed >= max_turns;
            if expiring {
                if confuse_on_end {
                    let duration = ctx.range_inclusive(2, 5);
                    ctx.state_mut(attacker_id).confused = Some(ConfusedState {
                        max_turns: duration,
                        elapsed: 1,
                    });
                }
            } else {
                ctx.state_mut(attacker_id).active = ActiveState::Rampaging {
                    record: record.clone(),
                    max_turns,
                    elapsed,
                    confuse_on_end,
                };
            }
            let mut outcome =
                resolve_attack(ctx, attacker, attacker_id, defender, defender_id, &record);
            if expiring && confuse_on_end {
                outcome
                    .narration
                    .push_str(&format!(" {} became confused!", attacker.species));
            }
            return outcome;
        }

        ActiveState::LockedIn {
            record,
            max_turns,
            elapsed,
        } => {
            let elapsed = elapsed + 1;
            if elapsed < max_turns {
                ctx.state_mut(attacker_id).active = ActiveState::LockedIn {
                    record: record.clone(),
                    max_turns,
                    elapsed,
                };
            }
            return resolve_attack(ctx, attacker, attacker_id, defender, defender_id, &record);
        }
    }

    // Free choice from idle.
    let class = classify(&chosen.name);

    if class.contains(MoveClass::SEMI_INVULNERABLE) {
        ctx.state_mut(attacker_id).active = ActiveState::SemiInvulnerable {
            record: chosen.clone(),
            elapsed: 1,
        };
        return MoveOutcome::message_only(semi_invuln_message(
            &chosen.name,
            &attacker.species,
            &defender.species,
        ));
    }
    if class.contains(MoveClass::CHARGE) {
        ctx.state_mut(attacker_id).active = ActiveState::Charging {
            record: chosen.clone(),
            turns_total: 2,
            elapsed: 1,
        };
        return MoveOutcome::message_only(charge_message(
            &chosen.name,
            &attacker.species,
            &defender.species,
        ));
    }

    if !accuracy_check(attacker, defender, &chosen, ctx, defender_id) {
        return MoveOutcome::missed(attacker, &chosen);
    }

    // The triggering turn of a forced-repeat move installs its lock only
    // after the accuracy check succeeds.
    if class.contains(MoveClass::RAMPAGE) {
        let max_turns = ctx.range_inclusive(2, 3);
        ctx.state_mut(attacker_id).active = ActiveState::Rampaging {
            record: chosen.clone(),
            max_turns,
            elapsed: 1,
            confuse_on_end: true,
        };
    } else if class.contains(MoveClass::LOCK_IN) {
        ctx.state_mut(attacker_id).active = ActiveState::LockedIn {
            record: chosen.clone(),
            max_turns: 5,
            elapsed: 1,
        };
    }

    if class.contains(MoveClass::TRAPPING) {
        let max_turns = ctx.range_inclusive(4, 5);
        let defender_state = ctx.state_mut(defender_id);
        defender_state.trapped = Some(TrappedState {
            record: chosen.clone(),
            max_turns,
            elapsed: 1,
        });
        defender_state.can_flee = false;
    }

    if class.contains(MoveClass::RECHARGE) {
        ctx.state_mut(attacker_id).recharging = true;
    }

    resolve_hit(ctx, attacker, attacker_id, defender, defender_id, &chosen)
}

/// Accuracy gate plus the hit pipeline, for completion and auto-repeat turns.
fn resolve_attack(
    ctx: &mut BattleContext,
    attacker: &Combatant,
    attacker_id: CombatantId,
    defender: &Combatant,
    defender_id: CombatantId,
    record: &MoveRecord,
) -> MoveOutcome {
    if !accuracy_check(attacker, defender, record, ctx, defender_id) {
        return MoveOutcome::missed(attacker, record);
    }
    resolve_hit(ctx, attacker, attacker_id, defender, defender_id, record)
}

/// Sub-resolvers for a move that passed accuracy, aggregated into one
/// outcome. Draw order: multi-hit → flinch → ailment → stat-chance →
/// damage variance.
fn resolve_hit(
    ctx: &mut BattleContext,
    attacker: &Combatant,
    attacker_id: CombatantId,
    defender: &Combatant,
    defender_id: CombatantId,
    record: &MoveRecord,
) -> MoveOutcome {
    let num_hits = roll_multi_hit(record.meta.min_hits, record.meta.max_hits, ctx);
    let flinched = roll_flinch(record.meta.flinch_chance, ctx);
    let caused_status = roll_ailment(&record.meta, ctx);
    let applied = roll_stat_changes(&record.stat_changes, record.meta.stat_chance, ctx);

    let (user_stat_changes, target_stat_changes) = match record.target {
        MoveTarget::User | MoveTarget::UsersField => (applied, Vec::new()),
        _ => (Vec::new(), applied),
    };
    apply_stages(ctx.state_mut(attacker_id), &user_stat_changes);
    apply_stages(ctx.state_mut(defender_id), &target_stat_changes);

    if let Some(status) = &caused_status {
        // Ailments follow the move's target like stat changes do.
        let recipient = match record.target {
            MoveTarget::User | MoveTarget::UsersField => attacker_id,
            _ => defender_id,
        };
        let recipient_state = ctx.state_mut(recipient);
        if recipient_state.ailment.is_none() {
            recipient_state.ailment = Some(AilmentState {
                name: status.clone(),
                elapsed: 1,
                max_turns: record.meta.max_turns,
            });
        }
    }
    if sets_minimized(&record.name) {
        ctx.state_mut(attacker_id).minimized = true;
    }

    let per_hit = calculate_damage(attacker, defender, record, DamageMods::default(), ctx);
    let damage = per_hit.saturating_mul(num_hits as u16);

    MoveOutcome {
        hit: true,
        damage,
        num_hits,
        flinched,
        recoil: recoil_multiplier(record.meta.drain),
        caused_status,
        user_stat_changes,
        target_stat_changes,
        narration: format!("{} used {}!", attacker.species, record.name),
    }
}

/// Advance the orthogonal per-turn counters of the acting combatant.
fn tick_counters(state: &mut BattleState) {
    let trap_expired = state
        .trapped
        .as_mut()
        .map(|trap| {
            trap.elapsed += 1;
            trap.elapsed > trap.max_turns
        })
        .unwrap_or(false);
    if trap_expired {
        state.trapped = None;
        state.can_flee = true;
    }

    let confusion_expired = state
        .confused
        .as_mut()
        .map(|confusion| {
            confusion.elapsed += 1;
            confusion.elapsed > confusion.max_turns
        })
        .unwrap_or(false);
    if confusion_expired {
        state.confused = None;
    }

    // Untimed ailments (max_turns == 0) persist until cured externally.
    let ailment_expired = state
        .ailment
        .as_mut()
        .map(|ailment| {
            if ailment.max_turns == 0 {
                return false;
            }
            ailment.elapsed += 1;
            ailment.elapsed > ailment.max_turns
        })
        .unwrap_or(false);
    if ailment_expired {
        state.ailment = None;
    }
}

/// Clamp-accumulate stage deltas into a battle state.
fn apply_stages(state: &mut BattleState, changes: &[StatChange]) {
    for change in changes {
        let slot = &mut state.stages[change.stat as usize];
        *slot = (*slot + change.change).clamp(-6, 6);
    }
}
