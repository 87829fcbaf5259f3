//! Nusantara - a turn-based RPG prototype core
//!
//! This library implements a single-player game session: pick a class, walk
//! a small grid map, run into random encounters, and fight them turn by turn
//! until victory, flight, or defeat.
//!
//! # Architecture
//!
//! - **Session**: the game-session state machine (`NoCharacter -> Exploring
//!   <-> InBattle`); owns all mutable state and exposes discrete action
//!   handlers.
//! - **Catalog**: static balance tables (classes, enemies, map size, combat
//!   constants).
//! - **Dice**: injectable randomness so tests can script every roll.
//! - **Tui**: a thin terminal front-end; it reads session state and issues
//!   actions, but holds no game rules of its own.
//!
//! # Example
//!
//! ```
//! use nusantara::{AttackKind, ClassKind, Direction, GameSession, MoveOutcome};
//!
//! let mut session = GameSession::seeded(7);
//! session.create_character(ClassKind::Ksatria)?;
//!
//! // One step east; fight back if something jumps us.
//! if session.move_player(Direction::Right)? == MoveOutcome::Encounter {
//!     session.attack(AttackKind::Normal)?;
//! }
//! # Ok::<(), nusantara::ActionError>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod game;
pub mod tui;

// Crate-level exports - actions and outcomes
pub use game::{ActionError, AttackKind, MoveOutcome, TurnOutcome};

// Crate-level exports - balance tables
pub use game::{MAP_HEIGHT, MAP_WIDTH, class_definition, enemy_catalog};

// Crate-level exports - randomness seam
pub use game::{Dice, RandDice, ScriptedDice};

// Crate-level exports - session state machine
pub use game::{EventLog, GameSession, Snapshot};

// Crate-level exports - domain types
pub use game::{
    ClassDefinition, ClassKind, Direction, EnemyInstance, EnemyTemplate, Phase, Player, Position,
};
