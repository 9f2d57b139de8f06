//! Core battle data: elemental types, move records, and combatants.
//!
//! Everything here is produced by the external data/cache layer (move lookup,
//! stat computation) and consumed read-only by the resolution engine, with two
//! exceptions: a combatant's current HP and stage fields, and the remaining-PP
//! counter on each move slot.

use std::ops::{Index, IndexMut};
use std::sync::Arc;

use serde::Deserialize;

// ============================================================================
// Elemental Types
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Type {
    Normal = 0,
    Fighting = 1,
    Flying = 2,
    Poison = 3,
    Ground = 4,
    Rock = 5,
    Bug = 6,
    Ghost = 7,
    Steel = 8,
    Fire = 9,
    Water = 10,
    Grass = 11,
    Electric = 12,
    Psychic = 13,
    Ice = 14,
    Dragon = 15,
    Dark = 16,
    Fairy = 17,
}

impl Type {
    /// Case-insensitive lookup from an API type name.
    pub fn from_str(name: &str) -> Option<Type> {
        match name.to_ascii_lowercase().as_str() {
            "normal" => Some(Type::Normal),
            "fighting" => Some(Type::Fighting),
            "flying" => Some(Type::Flying),
            "poison" => Some(Type::Poison),
            "ground" => Some(Type::Ground),
            "rock" => Some(Type::Rock),
            "bug" => Some(Type::Bug),
            "ghost" => Some(Type::Ghost),
            "steel" => Some(Type::Steel),
            "fire" => Some(Type::Fire),
            "water" => Some(Type::Water),
            "grass" => Some(Type::Grass),
            "electric" => Some(Type::Electric),
            "psychic" => Some(Type::Psychic),
            "ice" => Some(Type::Ice),
            "dragon" => Some(Type::Dragon),
            "dark" => Some(Type::Dark),
            "fairy" => Some(Type::Fairy),
            _ => None,
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Type::Normal
    }
}

// ============================================================================
// Move Records
// ============================================================================

/// Damage class of a move (the API's `damage_class`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

/// Targeting mode, as produced by the data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MoveTarget {
    SelectedPokemon,
    User,
    AllOpponents,
    AllOtherPokemon,
    RandomOpponent,
    EntireField,
    UsersField,
    OpponentsField,
}

impl Default for MoveTarget {
    fn default() -> Self {
        MoveTarget::SelectedPokemon
    }
}

/// A boostable stat, in the stage-array layout's order.
///
/// Distinct from [`StatName`]: stage changes can target accuracy and evasion,
/// which have no computed stat value, and never HP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum BoostStat {
    Attack = 0,
    Defense = 1,
    SpecialAttack = 2,
    SpecialDefense = 3,
    Speed = 4,
    Accuracy = 5,
    Evasion = 6,
}

/// Number of boostable stats.
pub const BOOST_STATS: usize = 7;

/// A single stat-stage change carried by a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StatChange {
    pub stat: BoostStat,
    pub change: i8,
}

/// Secondary-effect metadata block of a move record.
///
/// All fields default to zero / "none" so sparse records from the data layer
/// deserialize cleanly.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MoveMeta {
    /// Ailment identifier ("paralysis", "burn", ...; "none" when absent).
    pub ailment: String,
    /// Chance in percent that the ailment is inflicted (0 = never).
    pub ailment_chance: u8,
    pub crit_rate: u8,
    /// Signed percentage of damage dealt returned to the user:
    /// positive = drain/heal, negative = recoil self-damage.
    pub drain: i8,
    pub flinch_chance: u8,
    pub healing: i8,
    pub min_hits: u8,
    pub max_hits: u8,
    pub min_turns: u8,
    pub max_turns: u8,
    /// Chance in percent that the move's stat changes apply (0 = always,
    /// for moves whose stat change is the primary effect).
    pub stat_chance: u8,
}

/// Immutable move data resolved by name from the external data layer.
///
/// Shared as `Arc<MoveRecord>` across move slots and battle states; never
/// mutated after load.
#[derive(Debug, Clone, Deserialize)]
pub struct MoveRecord {
    pub name: String,
    #[serde(default)]
    pub power: u16,
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    /// `None` models the API's null accuracy: the move is exempt from the
    /// numeric accuracy pipeline and always hits.
    #[serde(default)]
    pub accuracy: Option<u8>,
    pub damage_class: MoveCategory,
    #[serde(rename = "type")]
    pub type_: Type,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default)]
    pub stat_changes: Vec<StatChange>,
    #[serde(default)]
    pub meta: MoveMeta,
}

/// One of a combatant's four move slots: a shared record plus its
/// remaining-use counter.
#[derive(Debug, Clone)]
pub struct MoveSlot {
    pub remaining_pp: u8,
    pub record: Arc<MoveRecord>,
}

impl MoveSlot {
    pub fn new(record: Arc<MoveRecord>) -> Self {
        Self {
            remaining_pp: record.pp,
            record,
        }
    }
}

// ============================================================================
// Stats
// ============================================================================

/// The six computed stats, in the data layer's canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum StatName {
    Hp = 0,
    Attack = 1,
    Defense = 2,
    SpecialAttack = 3,
    SpecialDefense = 4,
    Speed = 5,
}

pub const STAT_COUNT: usize = 6;

/// A computed stat: base value, individual/effort contributions, and the
/// final value used in battle. Stat computation itself is external.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct StatBundle {
    pub base: u16,
    pub iv: u8,
    pub ev: u8,
    pub value: u16,
}

/// Fixed-size stat table indexed by `StatName`.
///
/// Replaces a string-keyed map so a missing stat is unrepresentable rather
/// than a runtime lookup failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatTable(pub [StatBundle; STAT_COUNT]);

impl Index<StatName> for StatTable {
    type Output = StatBundle;

    #[inline]
    fn index(&self, stat: StatName) -> &StatBundle {
        &self.0[stat as usize]
    }
}

impl IndexMut<StatName> for StatTable {
    #[inline]
    fn index_mut(&mut self, stat: StatName) -> &mut StatBundle {
        &mut self.0[stat as usize]
    }
}

// ============================================================================
// Combatants
// ============================================================================

/// Number of move slots per combatant.
pub const MAX_MOVES: usize = 4;

/// A fully-populated battle participant.
///
/// Created once per battle by the caller (species/stat resolution is
/// external); during battle only `current_hp`, the stage fields, and the move
/// slots' PP counters change.
#[derive(Debug, Clone)]
pub struct Combatant {
    pub species: String,
    pub level: u8,
    pub current_hp: u16,
    pub moves: [MoveSlot; MAX_MOVES],
    pub ability: String,
    /// One or two elemental types.
    pub types: Vec<Type>,
    pub nature: String,
    pub stats: StatTable,
    pub accuracy_stage: i8,
    pub evasion_stage: i8,
    pub weight: f32,
}

impl Combatant {
    #[inline]
    pub fn has_type(&self, type_: Type) -> bool {
        self.types.contains(&type_)
    }

    /// Final computed value of a stat.
    #[inline]
    pub fn stat(&self, stat: StatName) -> u16 {
        self.stats[stat].value
    }

    #[inline]
    pub fn is_fainted(&self) -> bool {
        self.current_hp == 0
    }
}
