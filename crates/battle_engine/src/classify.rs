//! Static move classification tables.
//!
//! Moves with multi-turn behavior are partitioned into fixed categories,
//! built at compile time and queried by exact move-name lookup. Absence from
//! every table is the normal case, not an error: an unlisted move simply has
//! no special category.

use bitflags::bitflags;
use phf::{phf_map, phf_set, Map, Set};

bitflags! {
    /// Behavioral categories of a move. A move may carry several flags
    /// (every semi-invulnerable move is also a charging move).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct MoveClass: u8 {
        const CHARGE            = 1 << 0;
        const SEMI_INVULNERABLE = 1 << 1;
        const RECHARGE          = 1 << 2;
        const LOCK_IN           = 1 << 3;
        const TRAPPING          = 1 << 4;
        const RAMPAGE           = 1 << 5;
    }
}

/// Two-turn moves whose first turn is preparation.
static CHARGING_MOVES: Set<&'static str> = phf_set! {
    "solar-beam",
    "skull-bash",
    "sky-attack",
    "meteor-beam",
    "razor-wind",
    "bounce",
    "dig",
    "dive",
    "phantom-force",
    "electro-shot",
    "fly",
    "shadow-force",
    "freeze-shock",
    "sky-drop",
    "solar-blade",
    "geomancy",
    "ice-burn",
    "focus-punch",
};

/// Charging moves whose preparation turn also hides the user. Subset of
/// `CHARGING_MOVES`.
static SEMI_INVULNERABLE_MOVES: Set<&'static str> = phf_set! {
    "fly",
    "bounce",
    "sky-drop",
    "dig",
    "dive",
    "shadow-force",
    "phantom-force",
};

/// Moves that cost the following turn to recharge after landing.
static RECHARGING_MOVES: Set<&'static str> = phf_set! {
    "hyper-beam",
    "giga-impact",
    "blast-burn",
    "hydro-cannon",
    "frenzy-plant",
    "rock-wrecker",
    "roar-of-time",
    "meteor-assault",
};

/// Moves that lock the user into repeating them for a fixed duration.
static LOCK_IN_MOVES: Set<&'static str> = phf_set! {
    "rollout",
    "ice-ball",
};

/// Moves that trap the defender and prevent fleeing for a random duration.
static TRAPPING_MOVES: Set<&'static str> = phf_set! {
    "wrap",
    "bind",
    "clamp",
    "fire-spin",
    "whirlpool",
    "sand-tomb",
    "magma-storm",
    "infestation",
};

/// Forced multi-turn repeats that end in self-inflicted confusion.
static RAMPAGE_MOVES: Set<&'static str> = phf_set! {
    "outrage",
    "thrash",
    "petal-dance",
    "raging-fury",
};

/// Moves that never miss when the user's type set contains the matching type.
static ALWAYS_HITS_FOR_POISON: Set<&'static str> = phf_set! {
    "toxic",
};

/// Moves that mark their user as minimized.
static MINIMIZING_MOVES: Set<&'static str> = phf_set! {
    "minimize",
};

/// For each semi-invulnerable move, the whitelist of moves that can still
/// strike the hidden target. A semi-invulnerable move missing from this map
/// (shadow-force, phantom-force) has an empty whitelist: nothing reaches it.
static SEMI_INVULN_COUNTERS: Map<&'static str, &'static [&'static str]> = phf_map! {
    "fly" => &[
        "gust", "hurricane", "sky-uppercut", "smack-down", "thousand-arrows",
        "thunder", "twister",
    ],
    "bounce" => &[
        "gust", "hurricane", "sky-uppercut", "smack-down", "thousand-arrows",
        "thunder", "twister",
    ],
    "sky-drop" => &[
        "gust", "hurricane", "sky-uppercut", "smack-down", "thousand-arrows",
        "thunder", "twister",
    ],
    "dig" => &["earthquake", "magnitude", "fissure"],
    "dive" => &["surf", "whirlpool"],
};

/// Resolve a move name into its set of behavioral categories.
pub fn classify(name: &str) -> MoveClass {
    let mut class = MoveClass::empty();
    if CHARGING_MOVES.contains(name) {
        class |= MoveClass::CHARGE;
    }
    if SEMI_INVULNERABLE_MOVES.contains(name) {
        class |= MoveClass::SEMI_INVULNERABLE;
    }
    if RECHARGING_MOVES.contains(name) {
        class |= MoveClass::RECHARGE;
    }
    if LOCK_IN_MOVES.contains(name) {
        class |= MoveClass::LOCK_IN;
    }
    if TRAPPING_MOVES.contains(name) {
        class |= MoveClass::TRAPPING;
    }
    if RAMPAGE_MOVES.contains(name) {
        class |= MoveClass::RAMPAGE;
    }
    class
}

/// The moves able to strike a target hidden by `evasion_move`.
pub fn semi_invuln_counters(evasion_move: &str) -> &'static [&'static str] {
    SEMI_INVULN_COUNTERS
        .get(evasion_move)
        .copied()
        .unwrap_or(&[])
}

/// Whether `move_name` bypasses accuracy entirely for a poison-typed user.
#[inline]
pub fn always_hits_for_poison(move_name: &str) -> bool {
    ALWAYS_HITS_FOR_POISON.contains(move_name)
}

/// Whether using `move_name` marks its user as minimized.
#[inline]
pub fn sets_minimized(move_name: &str) -> bool {
    MINIMIZING_MOVES.contains(move_name)
}
