//! Core domain types for the game session.

use super::action::ActionError;
use super::catalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Playable character class.
///
/// A closed set, so an "unknown class" is unrepresentable in the typed API.
/// String-driven frontends go through [`FromStr`], which rejects anything
/// outside the catalog.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
pub enum ClassKind {
    /// Knight: sturdy melee fighter (high hp, solid def).
    Ksatria,
    /// Sorcerer: hits hard and casts magic from a mana pool.
    Penyihir,
    /// Archer: lighter frame with a chance to land critical hits.
    Pemanah,
    /// Wanderer: modest attack but a chance to dodge entirely.
    Penjelajah,
}

impl ClassKind {
    /// Returns the static definition this class was built from.
    pub fn definition(self) -> &'static ClassDefinition {
        catalog::class_definition(self)
    }
}

impl FromStr for ClassKind {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Ksatria" => Ok(ClassKind::Ksatria),
            "Penyihir" => Ok(ClassKind::Penyihir),
            "Pemanah" => Ok(ClassKind::Pemanah),
            "Penjelajah" => Ok(ClassKind::Penjelajah),
            other => Err(ActionError::UnknownClass(other.to_string())),
        }
    }
}

/// Static template a character is instantiated from.
///
/// Immutable; looked up by [`ClassKind`] at character creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDefinition {
    /// Display name (matches the `ClassKind` variant).
    pub name: &'static str,
    /// Starting and respawn-reference hit points.
    pub hp: i32,
    /// Base attack.
    pub atk: i32,
    /// Base defense.
    pub def: i32,
    /// Mana pool, for classes that cast.
    pub mana: Option<i32>,
    /// Probability of a critical hit on a normal attack.
    pub crit: Option<f64>,
    /// Probability of dodging an enemy attack outright.
    pub dodge: Option<f64>,
}

/// Static enemy template; the catalog holds four of these.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTemplate {
    /// Display name.
    pub name: &'static str,
    /// Base hit points, before per-encounter jitter.
    pub hp: i32,
    /// Attack.
    pub atk: i32,
    /// Defense.
    pub def: i32,
    /// Experience awarded on victory.
    pub exp: u32,
}

/// A live enemy in an active battle.
///
/// Created from an [`EnemyTemplate`] when an encounter triggers, destroyed
/// when the battle ends (victory, flight, or loss).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    /// Display name.
    pub name: String,
    /// Current hit points.
    pub hp: i32,
    /// Attack.
    pub atk: i32,
    /// Defense.
    pub def: i32,
    /// Experience awarded on victory.
    pub exp: u32,
}

impl EnemyInstance {
    /// Instantiates an enemy from a template with the given hp jitter.
    ///
    /// The jittered hp is clamped to a minimum of 1 so an encounter never
    /// spawns an already-dead enemy.
    pub fn from_template(template: &EnemyTemplate, jitter: i32) -> Self {
        Self {
            name: template.name.to_string(),
            hp: (template.hp + jitter).max(1),
            atk: template.atk,
            def: template.def,
            exp: template.exp,
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Class this character was created from.
    pub class: ClassKind,
    /// Current hit points.
    pub hp: i32,
    /// Attack; grows on level-up.
    pub atk: i32,
    /// Defense; temporarily raised while defending.
    pub def: i32,
    /// Remaining mana, for classes that cast.
    pub mana: Option<i32>,
    /// Critical-hit probability, for classes that have one.
    pub crit: Option<f64>,
    /// Dodge probability, for classes that have one.
    pub dodge: Option<f64>,
    /// Current level.
    pub level: u32,
    /// Accumulated experience.
    pub exp: u32,
    /// Carried items. Always empty in this prototype, but part of the
    /// snapshot the presentation layer renders.
    pub inventory: BTreeSet<String>,
}

impl Player {
    /// Creates a level-1 character from a class definition.
    pub fn from_class(class: ClassKind) -> Self {
        let def = class.definition();
        Self {
            class,
            hp: def.hp,
            atk: def.atk,
            def: def.def,
            mana: def.mana,
            crit: def.crit,
            dodge: def.dodge,
            level: 1,
            exp: 0,
            inventory: BTreeSet::new(),
        }
    }

    /// Experience required to reach the next level.
    pub fn exp_to_next(&self) -> u32 {
        self.level * catalog::LEVEL_EXP_STEP
    }
}

/// Movement direction on the grid.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Direction {
    /// Decrease y.
    Up,
    /// Increase y.
    Down,
    /// Decrease x.
    Left,
    /// Increase x.
    Right,
}

impl Direction {
    /// Unit offset on the (x, y) axes.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// A cell on the exploration grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
pub struct Position {
    /// Column, in `[0, MAP_WIDTH)`.
    pub x: i32,
    /// Row, in `[0, MAP_HEIGHT)`.
    pub y: i32,
}

impl Position {
    /// The starting cell (0, 0).
    pub const ORIGIN: Position = Position { x: 0, y: 0 };

    /// The neighboring cell in the given direction, unclamped.
    pub fn step(self, direction: Direction) -> Position {
        let (dx, dy) = direction.delta();
        Position {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Whether this cell lies on the map.
    pub fn in_bounds(self) -> bool {
        self.x >= 0 && self.x < catalog::MAP_WIDTH && self.y >= 0 && self.y < catalog::MAP_HEIGHT
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coarse phase of the session, derived from its state.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display,
)]
pub enum Phase {
    /// No character yet; only `create_character` is valid.
    CharacterSelect,
    /// Walking the map; movement is valid, battle actions are not.
    Exploring,
    /// An enemy is attached; battle actions are valid, movement is not.
    InBattle,
}
