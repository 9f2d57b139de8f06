//! Per-combatant persistent battle state and the shared battle context.
//!
//! The context owns one `BattleState` per registered combatant, addressed by
//! an opaque `CombatantId` handle issued at battle start, plus the single
//! sequential random stream every resolver draws from. Both live exactly as
//! long as the battle: the caller discards the context to end it.

use std::sync::Arc;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::core_data::{BoostStat, MoveRecord, BOOST_STATS};

// ============================================================================
// Sub-states
// ============================================================================

/// Defender-side escape prevention (wrap, bind, fire-spin, ...).
#[derive(Debug, Clone)]
pub struct TrappedState {
    pub record: Arc<MoveRecord>,
    pub max_turns: u8,
    pub elapsed: u8,
}

/// A non-volatile or volatile ailment with an optional duration.
#[derive(Debug, Clone)]
pub struct AilmentState {
    pub name: String,
    pub elapsed: u8,
    pub max_turns: u8,
}

/// Self-inflicted or move-inflicted confusion.
#[derive(Debug, Clone)]
pub struct ConfusedState {
    pub max_turns: u8,
    pub elapsed: u8,
}

// ============================================================================
// Active multi-turn state
// ============================================================================

/// The at-most-one multi-turn state a combatant's *own* move can put it in.
///
/// Modeled as a sum type so mutual exclusivity holds by construction; the
/// defender-side `TrappedState` is orthogonal and kept separate.
#[derive(Debug, Clone, Default)]
pub enum ActiveState {
    #[default]
    Idle,
    /// Turn 1 is preparation, turn `turns_total` executes.
    Charging {
        record: Arc<MoveRecord>,
        turns_total: u8,
        elapsed: u8,
    },
    /// Charging variant in which the user is untargetable except by the
    /// originating move's counter whitelist.
    SemiInvulnerable {
        record: Arc<MoveRecord>,
        elapsed: u8,
    },
    /// Forced repeat for a fixed duration (rollout family).
    LockedIn {
        record: Arc<MoveRecord>,
        max_turns: u8,
        elapsed: u8,
    },
    /// Forced repeat for 2-3 turns ending in confusion (outrage family).
    Rampaging {
        record: Arc<MoveRecord>,
        max_turns: u8,
        elapsed: u8,
        confuse_on_end: bool,
    },
}

impl ActiveState {
    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self, ActiveState::Idle)
    }

    /// Name of the in-progress move, if any.
    pub fn move_name(&self) -> Option<&str> {
        match self {
            ActiveState::Idle => None,
            ActiveState::Charging { record, .. }
            | ActiveState::SemiInvulnerable { record, .. }
            | ActiveState::LockedIn { record, .. }
            | ActiveState::Rampaging { record, .. } => Some(&record.name),
        }
    }
}

// ============================================================================
// Battle state
// ============================================================================

/// Persistent per-combatant effect data, mutated every turn by the engine.
#[derive(Debug, Clone, Default)]
pub struct BattleState {
    /// In-progress multi-turn move, if any.
    pub active: ActiveState,
    /// Defender-side trap; co-exists with any `active` state.
    pub trapped: Option<TrappedState>,
    pub ailment: Option<AilmentState>,
    pub confused: Option<ConfusedState>,
    /// Set after a hyper-beam-class move lands; consumes the next turn.
    pub recharging: bool,
    /// Stage deltas [Atk, Def, SpA, SpD, Spe, Acc, Eva], -6..=+6.
    pub stages: [i8; BOOST_STATS],
    /// Set after a minimize-class move. Read by callers that apply the
    /// stomp-family damage doubling through [`crate::DamageMods`].
    pub minimized: bool,
    pub can_flee: bool,
}

impl BattleState {
    /// Fresh idle state at battle start.
    pub fn new() -> Self {
        Self {
            can_flee: true,
            ..Self::default()
        }
    }

    #[inline]
    pub fn stage(&self, stat: BoostStat) -> i8 {
        self.stages[stat as usize]
    }

    /// Drop every multi-turn effect, e.g. when the combatant faints.
    pub fn clear_multi_turn(&mut self) {
        self.active = ActiveState::Idle;
        self.trapped = None;
        self.confused = None;
        self.recharging = false;
        self.can_flee = true;
    }
}

// ============================================================================
// Battle context
// ============================================================================

/// Opaque handle for a registered combatant.
///
/// Issued by [`BattleContext::register`] in registration order; stable for
/// the lifetime of the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CombatantId(pub(crate) u8);

/// Shared battle-wide state: the seeded random stream and every combatant's
/// `BattleState`.
///
/// # Determinism
///
/// The stream is single and strictly sequential. Within one move execution,
/// draws happen in a fixed order: confusion duration (on rampage expiry) →
/// accuracy → installed-state duration (rampage / trap) → multi-hit count →
/// flinch → ailment → stat-chance → damage variance. Replaying the same seed
/// and choice sequence reproduces outcomes bit-for-bit.
pub struct BattleContext {
    rng: SmallRng,
    states: Vec<BattleState>,
}

impl BattleContext {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            states: Vec::new(),
        }
    }

    /// Register a combatant at battle start, producing its idle state.
    pub fn register(&mut self) -> CombatantId {
        assert!(self.states.len() < u8::MAX as usize);
        let id = CombatantId(self.states.len() as u8);
        self.states.push(BattleState::new());
        id
    }

    /// Battle state for `id`. Panics on an unregistered handle: that is a
    /// caller bug, not a recoverable condition.
    #[inline]
    pub fn state(&self, id: CombatantId) -> &BattleState {
        &self.states[id.0 as usize]
    }

    #[inline]
    pub fn state_mut(&mut self, id: CombatantId) -> &mut BattleState {
        &mut self.states[id.0 as usize]
    }

    /// Clears every multi-turn effect of a fainted combatant.
    pub fn clear_on_faint(&mut self, id: CombatantId) {
        self.state_mut(id).clear_multi_turn();
    }

    /// Uniform draw over [0, 100).
    #[inline]
    pub(crate) fn percent(&mut self) -> u8 {
        self.rng.gen_range(0..100)
    }

    /// Uniform draw over [lo, hi], inclusive on both ends.
    #[inline]
    pub(crate) fn range_inclusive(&mut self, lo: u8, hi: u8) -> u8 {
        self.rng.gen_range(lo..=hi)
    }
}
