//! Tests for the combat rules: damage formulas, mana, crits, dodges,
//! defending, fleeing, victory, and defeat.

use nusantara::{
    ActionError, AttackKind, ClassKind, Direction, EnemyInstance, EnemyTemplate, GameSession,
    MoveOutcome, Phase, Position, ScriptedDice, TurnOutcome,
};

fn into_battle(dice: ScriptedDice, class: ClassKind) -> GameSession<ScriptedDice> {
    let mut session = GameSession::with_dice(dice);
    session.create_character(class).expect("creation");
    assert_eq!(
        session.move_player(Direction::Right).expect("move"),
        MoveOutcome::Encounter
    );
    session
}

#[test]
fn normal_attack_deals_atk_minus_enemy_def() {
    // Ksatria atk 6 vs Siluman Hutan def 0: enemy hp drops by exactly 6.
    let dice = ScriptedDice::new()
        .with_chances([true])
        .with_picks([0])
        .with_jitters([0]);
    let mut session = into_battle(dice, ClassKind::Ksatria);
    assert_eq!(session.enemy().expect("enemy").hp, 12);

    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::BattleContinues
    );
    assert_eq!(session.enemy().expect("enemy").hp, 6);
    // The survivor struck back: 4 atk against 2 def.
    assert_eq!(session.player().expect("player").hp, 28);
}

#[test]
fn critical_hits_apply_the_multiplier() {
    // Pemanah atk 7: crit damage floor((7+2) * 1.8) = 16, minus Naga def 1.
    let dice = ScriptedDice::new()
        .with_chances([true, true]) // encounter, crit
        .with_picks([1])
        .with_jitters([0]);
    let mut session = into_battle(dice, ClassKind::Pemanah);
    assert_eq!(session.enemy().expect("enemy").hp, 18);

    session.attack(AttackKind::Normal).expect("attack");
    assert_eq!(session.enemy().expect("enemy").hp, 3);
    assert!(session.log().iter().any(|e| e.contains("Critical")));
    // Enemy turn: 6 atk against 1 def.
    assert_eq!(session.player().expect("player").hp, 19);
}

#[test]
fn magic_costs_mana_and_adds_its_bonus() {
    // Penyihir atk 8 -> magic 12, minus Raksasa def 2 nets 10.
    let dice = ScriptedDice::new()
        .with_chances([true])
        .with_picks([3])
        .with_jitters([3]);
    let mut session = into_battle(dice, ClassKind::Penyihir);
    assert_eq!(session.enemy().expect("enemy").hp, 27);

    session.attack(AttackKind::Magic).expect("attack");
    assert_eq!(session.enemy().expect("enemy").hp, 17);
    assert_eq!(session.player().expect("player").mana, Some(7));
    assert_eq!(session.player().expect("player").hp, 16);
}

#[test]
fn magic_without_mana_is_rejected_and_the_enemy_stands_still() {
    // Drain the pool across two battles (10 -> 1), then cast once more.
    let dice = ScriptedDice::new()
        .with_chances([true, true, true]) // encounter, flee success, encounter
        .with_picks([3, 3])
        .with_jitters([3, 3]);
    let mut session = into_battle(dice, ClassKind::Penyihir);

    session.attack(AttackKind::Magic).expect("cast 1"); // mana 7
    session.attack(AttackKind::Magic).expect("cast 2"); // mana 4
    assert_eq!(session.flee().expect("flee"), TurnOutcome::Escaped);
    assert_eq!(
        session.move_player(Direction::Right).expect("move"),
        MoveOutcome::Encounter
    );
    session.attack(AttackKind::Magic).expect("cast 3"); // mana 1

    let enemy_hp = session.enemy().expect("enemy").hp;
    let player_hp = session.player().expect("player").hp;
    assert_eq!(
        session.attack(AttackKind::Magic),
        Err(ActionError::InsufficientMana)
    );
    // The failed cast changed nothing and cost the enemy no turn.
    assert_eq!(session.enemy().expect("enemy").hp, enemy_hp);
    assert_eq!(session.player().expect("player").hp, player_hp);
    assert_eq!(session.player().expect("player").mana, Some(1));
    assert_eq!(session.phase(), Phase::InBattle);
    assert!(session.log().iter().any(|e| e.contains("Not enough mana")));
}

#[test]
fn defend_mitigates_exactly_one_enemy_turn() {
    // Siluman atk 4 vs Ksatria def 2+2 while defending: zero damage.
    let dice = ScriptedDice::new()
        .with_chances([true])
        .with_picks([0])
        .with_jitters([0]);
    let mut session = into_battle(dice, ClassKind::Ksatria);

    assert_eq!(
        session.defend().expect("defend"),
        TurnOutcome::BattleContinues
    );
    assert_eq!(session.player().expect("player").hp, 30);
    // The bonus does not leak past the one turn.
    assert_eq!(session.player().expect("player").def, 2);

    session.attack(AttackKind::Normal).expect("attack");
    assert_eq!(session.player().expect("player").hp, 28);
}

#[test]
fn dodge_negates_the_enemy_attack_entirely() {
    let dice = ScriptedDice::new()
        .with_chances([true, true]) // encounter, dodge
        .with_picks([0])
        .with_jitters([0]);
    let mut session = into_battle(dice, ClassKind::Penjelajah);

    session.attack(AttackKind::Normal).expect("attack");
    assert_eq!(session.enemy().expect("enemy").hp, 7);
    assert_eq!(session.player().expect("player").hp, 26);
    assert!(session.log().iter().any(|e| e.contains("dodge")));
}

#[test]
fn victory_clears_the_battle_and_awards_exp() {
    // Leak Nakal at 8 hp falls to the second strike.
    let dice = ScriptedDice::new()
        .with_chances([true])
        .with_picks([2])
        .with_jitters([-2]);
    let mut session = into_battle(dice, ClassKind::Ksatria);

    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::BattleContinues
    );
    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::Victory {
            exp_gained: 8,
            leveled_up: false,
        }
    );
    assert_eq!(session.phase(), Phase::Exploring);
    assert!(session.enemy().is_none());
    assert_eq!(session.player().expect("player").exp, 8);
}

#[test]
fn level_threshold_triggers_exactly_one_level() {
    // Raksasa (18 exp) then Leak (8 exp) crosses 20; one level, not two.
    let dice = ScriptedDice::new()
        .with_chances([true, true])
        .with_picks([3, 2])
        .with_jitters([-2, -2]);
    let mut session = into_battle(dice, ClassKind::Ksatria);

    // Raksasa at 22 hp, 4 net damage per strike: six strikes.
    for _ in 0..5 {
        assert_eq!(
            session.attack(AttackKind::Normal).expect("attack"),
            TurnOutcome::BattleContinues
        );
    }
    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::Victory {
            exp_gained: 18,
            leveled_up: false,
        }
    );
    assert_eq!(session.player().expect("player").level, 1);

    assert_eq!(
        session.move_player(Direction::Right).expect("move"),
        MoveOutcome::Encounter
    );
    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::BattleContinues
    );
    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::Victory {
            exp_gained: 8,
            leveled_up: true,
        }
    );

    let player = session.player().expect("player");
    assert_eq!(player.level, 2);
    assert_eq!(player.exp, 26);
    assert_eq!(player.atk, 7); // 6 + 1
    assert_eq!(player.hp, 8); // 2 left + 6
    assert_eq!(player.exp_to_next(), 40);
}

#[test]
fn defeat_respawns_at_origin_with_half_base_hp() {
    // Raksasa at 27 hp outlasts the Ksatria: the sixth enemy turn lands
    // the killing blow (30 hp, 5 damage per turn).
    let dice = ScriptedDice::new()
        .with_chances([true])
        .with_picks([3])
        .with_jitters([3]);
    let mut session = into_battle(dice, ClassKind::Ksatria);

    for _ in 0..5 {
        assert_eq!(
            session.attack(AttackKind::Normal).expect("attack"),
            TurnOutcome::BattleContinues
        );
    }
    assert_eq!(
        session.attack(AttackKind::Normal).expect("attack"),
        TurnOutcome::Defeat
    );

    assert_eq!(session.phase(), Phase::Exploring);
    assert!(session.enemy().is_none());
    assert_eq!(session.position(), Position::ORIGIN);
    assert_eq!(session.player().expect("player").hp, 15); // max(1, 30 / 2)
    assert!(session.log().iter().any(|e| e.contains("respawn")));
}

#[test]
fn successful_flee_clears_battle_without_reward() {
    let dice = ScriptedDice::new()
        .with_chances([true, true]) // encounter, flee
        .with_picks([0])
        .with_jitters([0]);
    let mut session = into_battle(dice, ClassKind::Ksatria);

    assert_eq!(session.flee().expect("flee"), TurnOutcome::Escaped);
    assert_eq!(session.phase(), Phase::Exploring);
    assert!(session.enemy().is_none());
    assert_eq!(session.player().expect("player").exp, 0);
    assert!(session.log().iter().any(|e| e.contains("got away")));
}

#[test]
fn failed_flee_gives_the_enemy_a_turn() {
    let dice = ScriptedDice::new()
        .with_chances([true, false]) // encounter, flee fails
        .with_picks([0])
        .with_jitters([0]);
    let mut session = into_battle(dice, ClassKind::Ksatria);

    assert_eq!(
        session.flee().expect("flee"),
        TurnOutcome::BattleContinues
    );
    assert_eq!(session.phase(), Phase::InBattle);
    // Siluman atk 4 against def 2.
    assert_eq!(session.player().expect("player").hp, 28);
}

#[test]
fn spawned_enemy_hp_never_drops_below_one() {
    let template = EnemyTemplate {
        name: "Training Dummy",
        hp: 2,
        atk: 1,
        def: 0,
        exp: 1,
    };
    let enemy = EnemyInstance::from_template(&template, -5);
    assert_eq!(enemy.hp, 1);
}
