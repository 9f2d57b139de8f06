//! Multi-turn state machine scenarios and the replay-determinism contract.

mod common;

use battle_engine::{
    execute_move, forced_move, ActiveState, BattleContext, BoostStat, MoveCategory, MoveTarget,
    StatChange, Type,
};
use common::{basic_record, combatant, record_with};

#[test]
fn charging_move_prepares_then_fires() {
    let solar_beam = basic_record("solar-beam", 120, MoveCategory::Special, Type::Grass);
    let mut attacker = combatant("venusaur", &[Type::Grass, Type::Poison], &[solar_beam]);
    let defender = combatant(
        "blastoise",
        &[Type::Water],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(11);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    // Turn 1: preparation only.
    let prep = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert_eq!(prep.damage, 0);
    assert_eq!(prep.num_hits, 0);
    assert_eq!(prep.narration, "venusaur absorbed light!");
    assert!(matches!(
        ctx.state(attacker_id).active,
        ActiveState::Charging { elapsed: 1, .. }
    ));

    // Turn 2: the stored move executes and the state returns to idle.
    let strike = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(strike.hit);
    assert!(strike.damage > 0);
    assert!(ctx.state(attacker_id).active.is_idle());
}

#[test]
fn semi_invulnerable_move_hides_then_strikes() {
    let dig = basic_record("dig", 80, MoveCategory::Physical, Type::Ground);
    let mut attacker = combatant("sandslash", &[Type::Ground], &[dig]);
    let defender = combatant(
        "raichu",
        &[Type::Electric],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(12);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let prep = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert_eq!(prep.narration, "sandslash burrowed its way under the ground!");
    assert_eq!(prep.damage, 0);
    assert!(matches!(
        ctx.state(attacker_id).active,
        ActiveState::SemiInvulnerable { .. }
    ));

    let strike = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(strike.hit);
    assert!(strike.damage > 0);
    assert!(ctx.state(attacker_id).active.is_idle());
}

#[test]
fn rampage_locks_repeats_and_ends_in_confusion() {
    let outrage = basic_record("outrage", 120, MoveCategory::Physical, Type::Dragon);
    let mut attacker = combatant("dragonite", &[Type::Dragon, Type::Flying], &[outrage]);
    let defender = combatant(
        "steelix",
        &[Type::Steel, Type::Ground],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(13);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let first = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(first.hit);
    let max_turns = match &ctx.state(attacker_id).active {
        ActiveState::Rampaging {
            max_turns,
            elapsed: 1,
            confuse_on_end: true,
            ..
        } => *max_turns,
        other => panic!("expected rampage, got {other:?}"),
    };
    assert!((2..=3).contains(&max_turns));
    assert!(forced_move(&ctx, attacker_id).is_some());

    // The remaining turns repeat automatically, then confusion sets in.
    let mut executions = 1;
    while !ctx.state(attacker_id).active.is_idle() {
        let outcome =
            execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
        assert!(outcome.hit);
        executions += 1;
        assert!(executions <= 3, "rampage ran past its maximum");
    }
    assert_eq!(executions, max_turns);
    assert!(ctx.state(attacker_id).confused.is_some());
}

#[test]
fn lock_in_repeats_for_five_turns() {
    let rollout = basic_record("rollout", 30, MoveCategory::Physical, Type::Rock);
    let mut attacker = combatant("golem", &[Type::Rock, Type::Ground], &[rollout]);
    let defender = combatant(
        "snorlax",
        &[Type::Normal],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(14);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(matches!(
        ctx.state(attacker_id).active,
        ActiveState::LockedIn {
            max_turns: 5,
            elapsed: 1,
            ..
        }
    ));

    for _ in 0..3 {
        assert!(forced_move(&ctx, attacker_id).is_some());
        execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
        assert!(!ctx.state(attacker_id).active.is_idle());
    }
    execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(ctx.state(attacker_id).active.is_idle());
    // Lock-in does not confuse its user.
    assert!(ctx.state(attacker_id).confused.is_none());
}

#[test]
fn trapping_move_traps_the_defender_only() {
    let fire_spin = record_with("fire-spin", 35, MoveCategory::Special, Type::Fire, |r| {
        r.accuracy = Some(100);
        r.meta.min_turns = 4;
        r.meta.max_turns = 5;
    });
    let tackle = basic_record("tackle", 40, MoveCategory::Physical, Type::Normal);
    let mut attacker = combatant("magmar", &[Type::Fire], &[fire_spin]);
    let mut defender = combatant("tangela", &[Type::Grass], &[tackle]);

    let mut ctx = BattleContext::new(15);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(outcome.hit);
    assert!(outcome.damage > 0);

    let trap = ctx
        .state(defender_id)
        .trapped
        .as_ref()
        .expect("defender should be trapped");
    assert!((4..=5).contains(&trap.max_turns));
    assert_eq!(trap.record.name, "fire-spin");
    assert!(!ctx.state(defender_id).can_flee);

    // The attacker's own state is untouched.
    assert!(ctx.state(attacker_id).trapped.is_none());
    assert!(ctx.state(attacker_id).can_flee);
    assert!(ctx.state(attacker_id).active.is_idle());

    // The trap wears off after its duration of the defender's own turns.
    let mut turns = 0;
    while ctx.state(defender_id).trapped.is_some() {
        execute_move(&mut ctx, &mut defender, defender_id, &attacker, attacker_id, 0);
        turns += 1;
        assert!(turns <= 5, "trap never expired");
    }
    assert!(ctx.state(defender_id).can_flee);
}

#[test]
fn recharge_move_costs_the_following_turn() {
    let hyper_beam = basic_record("hyper-beam", 150, MoveCategory::Special, Type::Normal);
    let mut attacker = combatant("tauros", &[Type::Normal], &[hyper_beam]);
    let defender = combatant(
        "slowbro",
        &[Type::Water, Type::Psychic],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(16);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let strike = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(strike.hit);
    assert!(strike.damage > 0);
    assert!(ctx.state(attacker_id).recharging);

    let idle_turn = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(!idle_turn.hit);
    assert_eq!(idle_turn.damage, 0);
    assert_eq!(idle_turn.narration, "tauros must recharge!");
    assert!(!ctx.state(attacker_id).recharging);

    let next = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(next.hit);
}

#[test]
fn fixed_multi_hit_move_lands_that_many_hits() {
    let double_kick = record_with("double-kick", 30, MoveCategory::Physical, Type::Fighting, |r| {
        r.meta.min_hits = 2;
        r.meta.max_hits = 2;
    });
    let mut attacker = combatant("hitmonlee", &[Type::Fighting], &[double_kick]);
    let defender = combatant(
        "persian",
        &[Type::Normal],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(18);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert_eq!(outcome.num_hits, 2);
    assert!(outcome.damage > 0);
    assert_eq!(outcome.damage % 2, 0, "total damage is per-hit times hits");
}

#[test]
fn guaranteed_flinch_and_ailment_reach_the_outcome() {
    let nuzzle = record_with("nuzzle", 20, MoveCategory::Physical, Type::Electric, |r| {
        r.meta.flinch_chance = 100;
        r.meta.ailment = "paralysis".to_string();
        r.meta.ailment_chance = 100;
    });
    let mut attacker = combatant("pikachu", &[Type::Electric], &[nuzzle]);
    let defender = combatant(
        "rattata",
        &[Type::Normal],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(19);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(outcome.flinched);
    assert_eq!(outcome.caused_status.as_deref(), Some("paralysis"));
    assert_eq!(
        ctx.state(defender_id).ailment.as_ref().map(|a| a.name.as_str()),
        Some("paralysis")
    );
}

#[test]
fn primary_ailment_with_zero_chance_poisons_the_target() {
    let toxic = record_with("toxic", 0, MoveCategory::Status, Type::Poison, |r| {
        r.accuracy = Some(90);
        r.meta.ailment = "poison".to_string();
    });
    let mut attacker = combatant("muk", &[Type::Poison], &[toxic]);
    let defender = combatant(
        "snorlax",
        &[Type::Normal],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(25);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(outcome.hit);
    assert_eq!(outcome.caused_status.as_deref(), Some("poison"));
    assert_eq!(
        ctx.state(defender_id).ailment.as_ref().map(|a| a.name.as_str()),
        Some("poison")
    );
    assert!(ctx.state(attacker_id).ailment.is_none());
}

#[test]
fn self_targeted_ailment_stays_on_the_user() {
    let rest = record_with("rest", 0, MoveCategory::Status, Type::Psychic, |r| {
        r.accuracy = None;
        r.target = MoveTarget::User;
        r.meta.ailment = "sleep".to_string();
        r.meta.max_turns = 3;
    });
    let mut attacker = combatant("snorlax", &[Type::Normal], &[rest]);
    let defender = combatant(
        "gengar",
        &[Type::Ghost, Type::Poison],
        &[basic_record("lick", 30, MoveCategory::Physical, Type::Ghost)],
    );

    let mut ctx = BattleContext::new(26);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert_eq!(outcome.caused_status.as_deref(), Some("sleep"));
    assert_eq!(
        ctx.state(attacker_id).ailment.as_ref().map(|a| a.name.as_str()),
        Some("sleep")
    );
    assert!(ctx.state(defender_id).ailment.is_none());
}

#[test]
fn minimize_marks_its_user() {
    let minimize = record_with("minimize", 0, MoveCategory::Status, Type::Normal, |r| {
        r.accuracy = None;
        r.target = MoveTarget::User;
        r.stat_changes = vec![StatChange {
            stat: BoostStat::Evasion,
            change: 2,
        }];
    });
    let mut attacker = combatant("clefable", &[Type::Fairy], &[minimize]);
    let defender = combatant(
        "dusknoir",
        &[Type::Ghost],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(27);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(ctx.state(attacker_id).minimized);
    assert!(!ctx.state(defender_id).minimized);
    assert_eq!(ctx.state(attacker_id).stage(BoostStat::Evasion), 2);
}

#[test]
fn primary_stat_change_applies_to_the_target_state() {
    let growl = record_with("growl", 0, MoveCategory::Status, Type::Normal, |r| {
        r.stat_changes = vec![StatChange {
            stat: BoostStat::Attack,
            change: -1,
        }];
    });
    let mut attacker = combatant("eevee", &[Type::Normal], &[growl]);
    let defender = combatant(
        "machop",
        &[Type::Fighting],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(20);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert!(outcome.hit);
    assert_eq!(outcome.damage, 0);
    assert_eq!(outcome.target_stat_changes.len(), 1);
    assert!(outcome.user_stat_changes.is_empty());
    assert_eq!(ctx.state(defender_id).stage(BoostStat::Attack), -1);
    assert_eq!(ctx.state(attacker_id).stage(BoostStat::Attack), 0);
}

#[test]
fn self_targeted_stat_change_applies_to_the_user_state() {
    let swords_dance = record_with("swords-dance", 0, MoveCategory::Status, Type::Normal, |r| {
        r.accuracy = None;
        r.target = MoveTarget::User;
        r.stat_changes = vec![StatChange {
            stat: BoostStat::Attack,
            change: 2,
        }];
    });
    let mut attacker = combatant("scyther", &[Type::Bug, Type::Flying], &[swords_dance]);
    let defender = combatant(
        "pinsir",
        &[Type::Bug],
        &[basic_record("tackle", 40, MoveCategory::Physical, Type::Normal)],
    );

    let mut ctx = BattleContext::new(22);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    let outcome = execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert_eq!(outcome.user_stat_changes.len(), 1);
    assert_eq!(ctx.state(attacker_id).stage(BoostStat::Attack), 2);
    assert_eq!(ctx.state(defender_id).stage(BoostStat::Attack), 0);
}

#[test]
fn pp_decrements_on_every_use() {
    let tackle = basic_record("tackle", 40, MoveCategory::Physical, Type::Normal);
    let mut attacker = combatant("rattata", &[Type::Normal], &[tackle.clone()]);
    let defender = combatant("pidgey", &[Type::Normal, Type::Flying], &[tackle]);

    let mut ctx = BattleContext::new(23);
    let attacker_id = ctx.register();
    let defender_id = ctx.register();

    assert_eq!(attacker.moves[0].remaining_pp, 20);
    execute_move(&mut ctx, &mut attacker, attacker_id, &defender, defender_id, 0);
    assert_eq!(attacker.moves[0].remaining_pp, 19);
}

/// Runs a small scripted battle and returns the Debug rendering of every
/// outcome, in order.
fn scripted_battle(seed: u64) -> Vec<String> {
    let outrage = basic_record("outrage", 120, MoveCategory::Physical, Type::Dragon);
    let fire_spin = record_with("fire-spin", 35, MoveCategory::Special, Type::Fire, |r| {
        r.accuracy = Some(85);
    });
    let hyper_beam = basic_record("hyper-beam", 150, MoveCategory::Special, Type::Normal);
    let fury_swipes = record_with("fury-swipes", 18, MoveCategory::Physical, Type::Normal, |r| {
        r.accuracy = Some(80);
        r.meta.min_hits = 2;
        r.meta.max_hits = 5;
    });

    let mut left = combatant(
        "charizard",
        &[Type::Fire, Type::Flying],
        &[fire_spin, hyper_beam],
    );
    let mut right = combatant("dragonite", &[Type::Dragon, Type::Flying], &[outrage, fury_swipes]);

    let mut ctx = BattleContext::new(seed);
    let left_id = ctx.register();
    let right_id = ctx.register();

    let script: [(bool, usize); 12] = [
        (true, 0),
        (false, 0),
        (true, 1),
        (false, 0),
        (true, 0),
        (false, 0),
        (true, 1),
        (false, 1),
        (true, 0),
        (false, 1),
        (true, 1),
        (false, 0),
    ];

    let mut log = Vec::new();
    for (left_acts, slot) in script {
        let outcome = if left_acts {
            execute_move(&mut ctx, &mut left, left_id, &right, right_id, slot)
        } else {
            execute_move(&mut ctx, &mut right, right_id, &left, left_id, slot)
        };
        log.push(format!("{outcome:?}"));
    }
    log
}

#[test]
fn same_seed_and_choices_replay_identically() {
    assert_eq!(scripted_battle(777), scripted_battle(777));
    assert_eq!(scripted_battle(31337), scripted_battle(31337));
}

#[test]
fn different_seeds_diverge() {
    // Not a strict guarantee for any pair of seeds, but these two differ in
    // their very first accuracy draw.
    assert_ne!(scripted_battle(1), scripted_battle(2));
}
