//! First-class action and outcome types.
//!
//! Actions are domain events, not side effects: the presentation layer
//! expresses intent with these types, the session validates and applies
//! them, and the outcome enums report what the turn did.

use serde::{Deserialize, Serialize};

/// How the player attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum AttackKind {
    /// A plain weapon attack; may crit for classes that can.
    Normal,
    /// A magic attack; costs mana, hits harder, never crits.
    Magic,
}

/// What a movement action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// The player stepped to a new cell.
    Moved,
    /// The move pointed off the map; position unchanged, no encounter roll.
    Blocked,
    /// The player stepped to a new cell and an enemy appeared.
    Encounter,
}

/// What a battle action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// Both sides still stand; the battle continues.
    BattleContinues,
    /// The enemy fell; the battle is over and the reward applied.
    Victory {
        /// Experience gained from the kill.
        exp_gained: u32,
        /// Whether the reward pushed the player over the level threshold.
        leveled_up: bool,
    },
    /// The player escaped; battle cleared, no reward.
    Escaped,
    /// The player's hp hit zero; respawned at the start with half hp.
    Defeat,
}

/// Error that can occur when validating or applying an action.
///
/// All variants are recoverable: the action is rejected and no game state
/// mutates. The worst thing that can happen to a session is a respawn.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum ActionError {
    /// No character exists yet; create one first.
    #[display("No character has been created yet")]
    NoCharacter,

    /// A character already exists for this session.
    #[display("A character already exists")]
    CharacterExists,

    /// A battle action was issued outside of battle.
    #[display("Not in battle")]
    NotInBattle,

    /// An exploration action was issued mid-battle.
    #[display("Cannot do that during battle")]
    InBattle,

    /// A magic attack was issued without enough mana.
    #[display("Not enough mana")]
    InsufficientMana,

    /// A class name that is not in the catalog.
    #[display("Unknown class: {}", _0)]
    UnknownClass(String),
}

impl std::error::Error for ActionError {}
