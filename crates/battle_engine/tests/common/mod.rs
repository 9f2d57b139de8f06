//! Shared builders for engine integration tests.

use std::sync::Arc;

use battle_engine::{
    Combatant, MoveCategory, MoveMeta, MoveRecord, MoveSlot, MoveTarget, StatBundle, StatTable,
    Type,
};

/// A damaging move with 100 base accuracy and no metadata.
pub fn basic_record(name: &str, power: u16, class: MoveCategory, type_: Type) -> Arc<MoveRecord> {
    Arc::new(MoveRecord {
        name: name.to_string(),
        power,
        pp: 20,
        priority: 0,
        accuracy: Some(100),
        damage_class: class,
        type_,
        target: MoveTarget::SelectedPokemon,
        stat_changes: Vec::new(),
        meta: MoveMeta::default(),
    })
}

/// Like [`basic_record`], with a closure to tweak accuracy/meta/targeting.
pub fn record_with(
    name: &str,
    power: u16,
    class: MoveCategory,
    type_: Type,
    customize: impl FnOnce(&mut MoveRecord),
) -> Arc<MoveRecord> {
    let mut record = MoveRecord {
        name: name.to_string(),
        power,
        pp: 20,
        priority: 0,
        accuracy: Some(100),
        damage_class: class,
        type_,
        target: MoveTarget::SelectedPokemon,
        stat_changes: Vec::new(),
        meta: MoveMeta::default(),
    };
    customize(&mut record);
    Arc::new(record)
}

/// Level-50 combatant with flat 100 stats and the given moves (cycled into
/// the four slots).
pub fn combatant(species: &str, types: &[Type], records: &[Arc<MoveRecord>]) -> Combatant {
    assert!(!records.is_empty());
    let mut stats = StatTable::default();
    for bundle in stats.0.iter_mut() {
        *bundle = StatBundle {
            base: 80,
            iv: 31,
            ev: 0,
            value: 100,
        };
    }
    Combatant {
        species: species.to_string(),
        level: 50,
        current_hp: 200,
        moves: std::array::from_fn(|i| MoveSlot::new(records[i % records.len()].clone())),
        ability: "none".to_string(),
        types: types.to_vec(),
        nature: "hardy".to_string(),
        stats,
        accuracy_stage: 0,
        evasion_stage: 0,
        weight: 30.0,
    }
}
