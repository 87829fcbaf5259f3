//! The game-session state machine and its supporting types.

mod action;
mod catalog;
mod dice;
mod log;
mod session;
mod types;

pub use action::{ActionError, AttackKind, MoveOutcome, TurnOutcome};
pub use catalog::{MAP_HEIGHT, MAP_WIDTH, class_definition, enemy_catalog};
pub use dice::{Dice, RandDice, ScriptedDice};
pub use log::EventLog;
pub use session::{GameSession, Snapshot};
pub use types::{
    ClassDefinition, ClassKind, Direction, EnemyInstance, EnemyTemplate, Phase, Player, Position,
};
