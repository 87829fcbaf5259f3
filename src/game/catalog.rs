//! Static balance tables.
//!
//! Every tunable number in the game lives here: class and enemy stat lines,
//! map dimensions, and the combat constants. Centralizing them keeps the
//! session logic free of magic numbers.

use super::types::{ClassDefinition, ClassKind, EnemyTemplate};

/// Map width in cells.
pub const MAP_WIDTH: i32 = 7;
/// Map height in cells.
pub const MAP_HEIGHT: i32 = 5;

/// Probability that a successful move triggers an encounter.
pub const ENCOUNTER_CHANCE: f64 = 0.25;
/// Per-encounter hp jitter, inclusive lower bound.
pub const HP_JITTER_MIN: i32 = -2;
/// Per-encounter hp jitter, inclusive upper bound.
pub const HP_JITTER_MAX: i32 = 3;

/// Mana cost of a magic attack.
pub const MANA_COST: i32 = 3;
/// Flat damage bonus of a magic attack.
pub const MAGIC_BONUS: i32 = 4;
/// Flat attack bonus applied before the critical multiplier.
pub const CRIT_BONUS: i32 = 2;
/// Critical-hit damage multiplier.
pub const CRIT_MULTIPLIER: f64 = 1.8;
/// Temporary defense bonus while defending.
pub const DEFEND_BONUS: i32 = 2;
/// Probability that fleeing succeeds.
pub const FLEE_CHANCE: f64 = 0.5;

/// Experience needed per level: `level * LEVEL_EXP_STEP`.
pub const LEVEL_EXP_STEP: u32 = 20;
/// Permanent hp gained on level-up.
pub const LEVEL_HP_BONUS: i32 = 6;
/// Permanent attack gained on level-up.
pub const LEVEL_ATK_BONUS: i32 = 1;

/// Maximum retained event-log entries; oldest are evicted first.
pub const LOG_CAPACITY: usize = 30;

const KSATRIA: ClassDefinition = ClassDefinition {
    name: "Ksatria",
    hp: 30,
    atk: 6,
    def: 2,
    mana: None,
    crit: None,
    dodge: None,
};

const PENYIHIR: ClassDefinition = ClassDefinition {
    name: "Penyihir",
    hp: 22,
    atk: 8,
    def: 1,
    mana: Some(10),
    crit: None,
    dodge: None,
};

const PEMANAH: ClassDefinition = ClassDefinition {
    name: "Pemanah",
    hp: 24,
    atk: 7,
    def: 1,
    mana: None,
    crit: Some(0.15),
    dodge: None,
};

const PENJELAJAH: ClassDefinition = ClassDefinition {
    name: "Penjelajah",
    hp: 26,
    atk: 5,
    def: 2,
    mana: None,
    crit: None,
    dodge: Some(0.12),
};

/// Looks up the static definition for a class.
pub fn class_definition(kind: ClassKind) -> &'static ClassDefinition {
    match kind {
        ClassKind::Ksatria => &KSATRIA,
        ClassKind::Penyihir => &PENYIHIR,
        ClassKind::Pemanah => &PEMANAH,
        ClassKind::Penjelajah => &PENJELAJAH,
    }
}

static ENEMIES: [EnemyTemplate; 4] = [
    EnemyTemplate {
        name: "Siluman Hutan",
        hp: 12,
        atk: 4,
        def: 0,
        exp: 6,
    },
    EnemyTemplate {
        name: "Naga Kecil",
        hp: 18,
        atk: 6,
        def: 1,
        exp: 12,
    },
    EnemyTemplate {
        name: "Leak Nakal",
        hp: 10,
        atk: 5,
        def: 0,
        exp: 8,
    },
    EnemyTemplate {
        name: "Raksasa Batu",
        hp: 24,
        atk: 7,
        def: 2,
        exp: 18,
    },
];

/// The full enemy catalog; encounters pick uniformly from it.
pub fn enemy_catalog() -> &'static [EnemyTemplate] {
    &ENEMIES
}
