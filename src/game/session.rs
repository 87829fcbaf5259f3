//! The game-session state machine.
//!
//! One [`GameSession`] owns all mutable game state for a single player and
//! exposes the discrete action handlers the presentation layer calls. The
//! session moves between three phases (`CharacterSelect -> Exploring <->
//! InBattle`); there is no terminal state, because defeat triggers an
//! in-place respawn rather than a game-over.

use super::action::{ActionError, AttackKind, MoveOutcome, TurnOutcome};
use super::catalog;
use super::dice::{Dice, RandDice};
use super::log::EventLog;
use super::types::{ClassKind, Direction, EnemyInstance, Phase, Player, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, instrument, warn};

/// A single in-memory game session.
///
/// Generic over its dice so tests can script every roll; production code
/// uses the [`RandDice`] default via [`GameSession::new`] or
/// [`GameSession::seeded`].
#[derive(Debug, Clone)]
pub struct GameSession<D: Dice = RandDice> {
    dice: D,
    player: Option<Player>,
    position: Position,
    visited: HashSet<Position>,
    enemy: Option<EnemyInstance>,
    log: EventLog,
}

impl GameSession<RandDice> {
    /// Creates a session with entropy-seeded dice.
    #[instrument]
    pub fn new() -> Self {
        info!("creating game session");
        Self::with_dice(RandDice::new())
    }

    /// Creates a session with fixed-seed dice, for reproducible runs.
    #[instrument]
    pub fn seeded(seed: u64) -> Self {
        info!(seed, "creating seeded game session");
        Self::with_dice(RandDice::seeded(seed))
    }
}

impl Default for GameSession<RandDice> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Dice> GameSession<D> {
    /// Creates a session that rolls through the given dice.
    pub fn with_dice(dice: D) -> Self {
        Self {
            dice,
            player: None,
            position: Position::ORIGIN,
            visited: HashSet::new(),
            enemy: None,
            log: EventLog::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Actions
    // ─────────────────────────────────────────────────────────────

    /// Instantiates the player from a class template and starts exploring.
    ///
    /// Resets position to the origin and the visited set to just the
    /// origin. Valid only before a character exists.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::CharacterExists`] if called twice.
    #[instrument(skip(self))]
    pub fn create_character(&mut self, class: ClassKind) -> Result<(), ActionError> {
        if self.player.is_some() {
            warn!("character creation attempted twice");
            return Err(ActionError::CharacterExists);
        }

        let player = Player::from_class(class);
        self.position = Position::ORIGIN;
        self.visited.clear();
        self.visited.insert(Position::ORIGIN);
        self.enemy = None;
        self.log.push(format!(
            "Character created: {class} (HP {}, ATK {})",
            player.hp, player.atk
        ));
        info!(%class, hp = player.hp, atk = player.atk, "character created");
        self.player = Some(player);
        Ok(())
    }

    /// Steps one cell in the given direction.
    ///
    /// A move pointing off the map is a no-op ([`MoveOutcome::Blocked`]),
    /// not an error. A successful move marks the cell visited and then
    /// rolls the encounter check; on a hit, an enemy spawns and the session
    /// enters battle.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::NoCharacter`] before character creation and
    /// [`ActionError::InBattle`] while an enemy is attached.
    #[instrument(skip(self))]
    pub fn move_player(&mut self, direction: Direction) -> Result<MoveOutcome, ActionError> {
        if self.player.is_none() {
            return Err(ActionError::NoCharacter);
        }
        if self.enemy.is_some() {
            warn!("movement attempted during battle");
            return Err(ActionError::InBattle);
        }

        let target = self.position.step(direction);
        if !target.in_bounds() {
            debug!(%target, "move blocked at map edge");
            return Ok(MoveOutcome::Blocked);
        }

        self.position = target;
        self.visited.insert(target);
        debug!(%target, "moved");

        if self.dice.chance(catalog::ENCOUNTER_CHANCE) {
            self.start_battle();
            return Ok(MoveOutcome::Encounter);
        }
        Ok(MoveOutcome::Moved)
    }

    /// Attacks the enemy, normally or with magic.
    ///
    /// Magic costs mana and hits for `atk + 4`; a normal attack may crit
    /// for classes with a crit chance. Damage is mitigated by the enemy's
    /// defense, floored at zero. If the enemy survives, it strikes back
    /// before this returns.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InsufficientMana`] for a magic attack without
    /// the mana to pay for it; the enemy does not get a turn. Also the
    /// usual phase errors outside of battle.
    #[instrument(skip(self))]
    pub fn attack(&mut self, kind: AttackKind) -> Result<TurnOutcome, ActionError> {
        self.require_battle()?;

        let raw = match kind {
            AttackKind::Magic => {
                let mana = self.player.as_ref().and_then(|p| p.mana).unwrap_or(0);
                if mana < catalog::MANA_COST {
                    warn!(mana, "magic attack without enough mana");
                    self.log.push("Not enough mana!");
                    return Err(ActionError::InsufficientMana);
                }
                if let Some(p) = self.player.as_mut() {
                    if let Some(m) = p.mana.as_mut() {
                        *m -= catalog::MANA_COST;
                    }
                }
                let dmg = self.player_atk() + catalog::MAGIC_BONUS;
                self.log.push(format!("You unleash magic for {dmg} damage."));
                dmg
            }
            AttackKind::Normal => {
                let atk = self.player_atk();
                let crit_chance = self.player.as_ref().and_then(|p| p.crit);
                match crit_chance {
                    Some(p) if self.dice.chance(p) => {
                        let dmg = ((atk + catalog::CRIT_BONUS) as f64 * catalog::CRIT_MULTIPLIER)
                            .floor() as i32;
                        self.log.push(format!("Critical! You deal {dmg} damage."));
                        dmg
                    }
                    _ => {
                        self.log.push(format!("You strike for {atk} damage."));
                        atk
                    }
                }
            }
        };

        let enemy_def = self.enemy.as_ref().map_or(0, |e| e.def);
        let net = (raw - enemy_def).max(0);
        let enemy_down = match self.enemy.as_mut() {
            Some(e) => {
                e.hp -= net;
                debug!(net, enemy_hp = e.hp, "damage dealt");
                e.hp <= 0
            }
            None => false,
        };

        if enemy_down {
            return Ok(self.resolve_victory());
        }
        self.enemy_turn();
        Ok(self.battle_fallout())
    }

    /// Braces for the enemy's attack.
    ///
    /// Raises defense by 2 for exactly the one enemy turn this triggers,
    /// then reverts the bonus (floored at zero).
    ///
    /// # Errors
    ///
    /// Phase errors outside of battle.
    #[instrument(skip(self))]
    pub fn defend(&mut self) -> Result<TurnOutcome, ActionError> {
        self.require_battle()?;

        if let Some(p) = self.player.as_mut() {
            p.def += catalog::DEFEND_BONUS;
        }
        self.log.push("You brace yourself. DEF raised for a moment.");
        self.enemy_turn();
        if let Some(p) = self.player.as_mut() {
            p.def = (p.def - catalog::DEFEND_BONUS).max(0);
        }
        Ok(self.battle_fallout())
    }

    /// Attempts to run from the battle.
    ///
    /// Succeeds half the time, clearing the battle with no reward. On
    /// failure the enemy gets its turn.
    ///
    /// # Errors
    ///
    /// Phase errors outside of battle.
    #[instrument(skip(self))]
    pub fn flee(&mut self) -> Result<TurnOutcome, ActionError> {
        self.require_battle()?;

        if self.dice.chance(catalog::FLEE_CHANCE) {
            self.enemy = None;
            self.log.push("You got away!");
            info!("fled battle");
            return Ok(TurnOutcome::Escaped);
        }
        self.log.push("Failed to get away!");
        self.enemy_turn();
        Ok(self.battle_fallout())
    }

    // ─────────────────────────────────────────────────────────────
    //  Observers
    // ─────────────────────────────────────────────────────────────

    /// Coarse phase of the session.
    pub fn phase(&self) -> Phase {
        match (&self.player, &self.enemy) {
            (None, _) => Phase::CharacterSelect,
            (Some(_), None) => Phase::Exploring,
            (Some(_), Some(_)) => Phase::InBattle,
        }
    }

    /// The player, once created.
    pub fn player(&self) -> Option<&Player> {
        self.player.as_ref()
    }

    /// Current position on the grid.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Every cell the player has ever occupied. Grows monotonically.
    pub fn visited(&self) -> &HashSet<Position> {
        &self.visited
    }

    /// The enemy of the active battle, if any.
    pub fn enemy(&self) -> Option<&EnemyInstance> {
        self.enemy.as_ref()
    }

    /// The bounded event log, oldest to newest.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// A serializable copy of everything the presentation layer renders.
    pub fn snapshot(&self) -> Snapshot {
        let mut visited: Vec<Position> = self.visited.iter().copied().collect();
        visited.sort_unstable();
        Snapshot {
            phase: self.phase(),
            player: self.player.clone(),
            position: self.position,
            visited,
            enemy: self.enemy.clone(),
            log: self.log.iter().map(str::to_string).collect(),
        }
    }

    // ─────────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────────

    fn require_battle(&self) -> Result<(), ActionError> {
        if self.player.is_none() {
            return Err(ActionError::NoCharacter);
        }
        if self.enemy.is_none() {
            return Err(ActionError::NotInBattle);
        }
        Ok(())
    }

    fn player_atk(&self) -> i32 {
        self.player.as_ref().map_or(0, |p| p.atk)
    }

    fn start_battle(&mut self) {
        let templates = catalog::enemy_catalog();
        let idx = self.dice.pick(templates.len());
        let jitter = self
            .dice
            .jitter(catalog::HP_JITTER_MIN, catalog::HP_JITTER_MAX);
        let enemy = EnemyInstance::from_template(&templates[idx], jitter);
        self.log
            .push(format!("An enemy appears: {} (HP {})", enemy.name, enemy.hp));
        info!(name = %enemy.name, hp = enemy.hp, "encounter started");
        self.enemy = Some(enemy);
    }

    /// The enemy's single retaliation. Not player-invocable.
    fn enemy_turn(&mut self) {
        let (name, atk) = match self.enemy.as_ref() {
            Some(e) => (e.name.clone(), e.atk),
            None => return,
        };
        let (def, dodge) = match self.player.as_ref() {
            Some(p) => (p.def, p.dodge),
            None => return,
        };

        let dmg = (atk - def).max(0);
        if let Some(p) = dodge {
            if self.dice.chance(p) {
                self.log.push("You slip clear of the enemy's attack (dodge)!");
                debug!("enemy attack dodged");
                return;
            }
        }
        if let Some(p) = self.player.as_mut() {
            p.hp -= dmg;
            let hp = p.hp;
            self.log
                .push(format!("{name} attacks and deals {dmg} damage. (Your HP: {hp})"));
            debug!(dmg, player_hp = hp, "enemy turn resolved");
        }
    }

    /// Applies the reward, runs the single level-up check, clears the battle.
    fn resolve_victory(&mut self) -> TurnOutcome {
        let exp_gained = self.enemy.take().map_or(0, |e| e.exp);
        self.log.push(format!("You won! Gained {exp_gained} EXP."));

        let mut leveled_up = false;
        if let Some(p) = self.player.as_mut() {
            p.exp += exp_gained;
            // One increment per victory; leftover exp carries forward.
            if p.exp >= p.level * catalog::LEVEL_EXP_STEP {
                p.level += 1;
                p.hp += catalog::LEVEL_HP_BONUS;
                p.atk += catalog::LEVEL_ATK_BONUS;
                leveled_up = true;
            }
        }
        if leveled_up {
            let level = self.player.as_ref().map_or(0, |p| p.level);
            self.log
                .push(format!("Level up! Now level {level}. HP and ATK increased."));
        }
        info!(exp_gained, leveled_up, "battle won");
        TurnOutcome::Victory {
            exp_gained,
            leveled_up,
        }
    }

    /// Runs the defeat check after an enemy turn.
    fn battle_fallout(&mut self) -> TurnOutcome {
        if self.player.as_ref().is_some_and(|p| p.hp <= 0) {
            self.respawn();
            return TurnOutcome::Defeat;
        }
        TurnOutcome::BattleContinues
    }

    /// Partial reset after defeat: back to the origin with half the class
    /// base hp (floored at 1). The session itself survives.
    fn respawn(&mut self) {
        self.log.push("Your HP is gone! You fall...");
        self.enemy = None;
        self.position = Position::ORIGIN;
        if let Some(p) = self.player.as_mut() {
            p.hp = (p.class.definition().hp / 2).max(1);
        }
        self.log
            .push("You respawn at the start with part of your HP restored.");
        warn!("player defeated; respawned at origin");
    }
}

/// Serializable view of the session for the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Current phase.
    pub phase: Phase,
    /// The player, once created.
    pub player: Option<Player>,
    /// Current position.
    pub position: Position,
    /// Visited cells in stable (x, y) order.
    pub visited: Vec<Position>,
    /// The active enemy, if any.
    pub enemy: Option<EnemyInstance>,
    /// Event-log entries, oldest to newest.
    pub log: Vec<String>,
}
