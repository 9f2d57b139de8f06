//! battle_engine - deterministic move-resolution engine for two-combatant
//! turn-based battles.
//!
//! The engine owns the hard part of a battle turn: a per-combatant state
//! machine for multi-turn moves (charging, semi-invulnerability, rampages,
//! lock-ins, trapping, recharging), a strict-precedence accuracy pipeline,
//! and the stochastic sub-resolvers behind a single seeded random stream, so
//! a battle replays bit-for-bit from its seed and choice sequence.
//!
//! Data acquisition, stat computation, the turn loop itself, and HP
//! bookkeeping live outside this crate: callers hand in fully-populated
//! [`Combatant`]s and apply the returned [`MoveOutcome`]s.

/// Elemental types, move records, and combatants
pub mod core_data;

/// Static move classification tables
pub mod classify;

/// Persistent battle state and the shared context
pub mod state;

/// Hit/miss evaluation
pub mod accuracy;

/// The move state machine and outcome aggregation
pub mod engine;

/// Damage formula and its extension point
pub mod damage;

// Re-export commonly used types
pub use accuracy::{accuracy_check, stage_multiplier, stage_ratio};
pub use classify::{classify, semi_invuln_counters, sets_minimized, MoveClass};
pub use core_data::{
    BoostStat, Combatant, MoveCategory, MoveMeta, MoveRecord, MoveSlot, MoveTarget, StatBundle,
    StatChange, StatName, StatTable, Type, MAX_MOVES,
};
pub use damage::{calculate_damage, DamageMods};
pub use engine::{execute_move, forced_move, MoveOutcome};
pub use state::{ActiveState, BattleContext, BattleState, CombatantId};
