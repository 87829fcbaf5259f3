//! Application state and key handling.

use crate::game::{
    AttackKind, ClassKind, Direction, GameSession, MoveOutcome, Phase, TurnOutcome,
};
use crossterm::event::KeyCode;
use strum::IntoEnumIterator;
use tracing::debug;

/// Main application state: the session plus a status line.
pub struct App {
    session: GameSession,
    classes: Vec<ClassKind>,
    cursor: usize,
    status: String,
}

impl App {
    /// Creates the application around a session.
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            classes: ClassKind::iter().collect(),
            cursor: 0,
            status: "Pick a class with Up/Down, confirm with Enter.".to_string(),
        }
    }

    /// The underlying game session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// The selectable classes, in menu order.
    pub fn classes(&self) -> &[ClassKind] {
        &self.classes
    }

    /// Index of the highlighted class on the selection screen.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The current status line.
    pub fn status_message(&self) -> &str {
        &self.status
    }

    /// Routes a key press according to the session phase.
    pub fn handle_key(&mut self, code: KeyCode) {
        debug!(?code, phase = %self.session.phase(), "key");
        match self.session.phase() {
            Phase::CharacterSelect => self.handle_select_key(code),
            Phase::Exploring => self.handle_explore_key(code),
            Phase::InBattle => self.handle_battle_key(code),
        }
    }

    fn handle_select_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(self.classes.len() - 1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.cursor = (self.cursor + 1) % self.classes.len();
            }
            KeyCode::Enter => self.confirm_class(),
            _ => {}
        }
    }

    fn confirm_class(&mut self) {
        let class = self.classes[self.cursor];
        match self.session.create_character(class) {
            Ok(()) => {
                self.status = format!("{class} steps onto the map. Arrows/hjkl to move, q to quit.");
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn handle_explore_key(&mut self, code: KeyCode) {
        let direction = match code {
            KeyCode::Up | KeyCode::Char('k') => Direction::Up,
            KeyCode::Down | KeyCode::Char('j') => Direction::Down,
            KeyCode::Left | KeyCode::Char('h') => Direction::Left,
            KeyCode::Right | KeyCode::Char('l') => Direction::Right,
            _ => return,
        };
        match self.session.move_player(direction) {
            Ok(MoveOutcome::Encounter) => {
                let name = self
                    .session
                    .enemy()
                    .map(|e| e.name.clone())
                    .unwrap_or_default();
                self.status = format!("{name} blocks your path! a/m/d/f to act.");
            }
            Ok(MoveOutcome::Moved) => {
                self.status = format!("You walk to {}.", self.session.position());
            }
            Ok(MoveOutcome::Blocked) => {
                self.status = "The edge of the map blocks your path.".to_string();
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn handle_battle_key(&mut self, code: KeyCode) {
        let result = match code {
            KeyCode::Char('a') => self.session.attack(AttackKind::Normal),
            KeyCode::Char('m') => self.session.attack(AttackKind::Magic),
            KeyCode::Char('d') => self.session.defend(),
            KeyCode::Char('f') => self.session.flee(),
            _ => return,
        };
        self.status = match result {
            Ok(TurnOutcome::BattleContinues) => "The battle rages on.".to_string(),
            Ok(TurnOutcome::Victory {
                exp_gained,
                leveled_up,
            }) => {
                if leveled_up {
                    format!("Victory! {exp_gained} EXP - and a new level.")
                } else {
                    format!("Victory! {exp_gained} EXP.")
                }
            }
            Ok(TurnOutcome::Escaped) => "You slipped away safely.".to_string(),
            Ok(TurnOutcome::Defeat) => "You were defeated and wake at the start.".to_string(),
            Err(e) => e.to_string(),
        };
    }
}
