//! Per-level game state.

use rand::Rng;

use crate::config::{GameConfig, level_config};
use crate::error::{BoardError, CombatError};
use crate::game::{
    AttackOutcome, AttackPercentage, HUMAN_ID, Interaction, Planet, PlanetId, Player, PlayerId,
    create_players, generate_board, resolve_attack,
};

/// Complete state of one level.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Level number, 1-based.
    pub level: u32,
    /// All planets, indexed by id.
    pub planets: Vec<Planet>,
    /// Turn order: the human first, then the AIs.
    pub players: Vec<Player>,
    /// Index into `players` of whose turn it is.
    pub current: usize,
    /// The human's selection state.
    pub interaction: Interaction,
    /// Set once exactly one player owns planets.
    pub is_game_over: bool,
    /// Set when the game ended with the human as sole owner.
    pub level_completed: bool,
    /// Sole remaining owner, if any.
    pub winner: Option<PlayerId>,
}

impl GameState {
    /// Create a state from an existing roster and board. The human moves first.
    #[must_use]
    pub fn new(level: u32, players: Vec<Player>, planets: Vec<Planet>) -> Self {
        Self {
            level,
            planets,
            players,
            current: 0,
            interaction: Interaction::new(),
            is_game_over: false,
            level_completed: false,
            winner: None,
        }
    }

    /// Roll a fresh level from the level table.
    ///
    /// # Errors
    ///
    /// Returns an error if the level table asks for more players than planets.
    pub fn generate<R: Rng + ?Sized>(
        level: u32,
        username: &str,
        config: &GameConfig,
        rng: &mut R,
        now_ms: u64,
    ) -> Result<Self, BoardError> {
        let table = level_config(level);
        let players = create_players(username, table.ai_players, table.ai_difficulty);
        let planets = generate_board(level, &players, config, rng, now_ms)?;
        Ok(Self::new(level, players, planets))
    }

    /// Player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current)
    }

    /// Check whether it is the human's turn.
    #[must_use]
    pub fn is_human_turn(&self) -> bool {
        self.current_player().is_some_and(|p| !p.is_ai)
    }

    /// Get a player by ID.
    #[must_use]
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Get a planet by ID.
    #[must_use]
    pub fn get_planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets.iter().find(|p| p.id == id)
    }

    /// Resolve a planet's owner through the player table.
    #[must_use]
    pub fn owner_of(&self, planet: &Planet) -> Option<&Player> {
        planet.owner.and_then(|id| self.get_player(id))
    }

    /// Rename the human. Planets only store ids, so nothing else changes.
    pub fn rename_human(&mut self, name: &str) {
        if let Some(human) = self.players.iter_mut().find(|p| p.id == HUMAN_ID) {
            human.name = name.to_string();
        }
    }

    /// Number of planets `player` owns.
    #[must_use]
    pub fn planet_count(&self, player: PlayerId) -> usize {
        self.planets.iter().filter(|p| p.is_owned_by(player)).count()
    }

    /// Players that still own at least one planet, in turn order.
    pub fn remaining_players(&self) -> impl Iterator<Item = &Player> {
        self.players
            .iter()
            .filter(|player| self.planets.iter().any(|p| p.is_owned_by(player.id)))
    }

    /// Update the game-over flags. Returns `true` if the level just ended.
    ///
    /// The level ends when exactly one player still owns planets.
    pub fn check_game_over(&mut self) -> bool {
        if self.is_game_over {
            return false;
        }
        let (Some(winner), None) = ({
            let mut remaining = self.remaining_players().map(|p| p.id);
            (remaining.next(), remaining.next())
        }) else {
            return false;
        };

        self.is_game_over = true;
        self.winner = Some(winner);
        self.level_completed = winner == HUMAN_ID;
        self.interaction.finish(self.level_completed);
        tracing::info!(level = self.level, winner, "level over");
        true
    }

    /// Hand the turn to the next player in roster order.
    pub fn advance_turn(&mut self) {
        if !self.players.is_empty() {
            self.current = (self.current + 1) % self.players.len();
        }
    }

    /// Resolve an attack by the current player, then run the win check and
    /// advance the turn.
    ///
    /// # Errors
    ///
    /// Rejects the attack, leaving the state untouched, if the level is over,
    /// the sources are not the current player's or the combat order is invalid.
    pub fn attack(
        &mut self,
        sources: &[PlanetId],
        target: PlanetId,
        pct: AttackPercentage,
    ) -> Result<AttackOutcome, CombatError> {
        if self.is_game_over {
            return Err(CombatError::LevelOver);
        }
        let current = self.current_player().map(|p| p.id);
        if let Some(owner) = sources
            .iter()
            .filter_map(|&id| self.get_planet(id)?.owner)
            .find(|&owner| Some(owner) != current)
        {
            return Err(CombatError::OutOfTurn(owner));
        }

        let outcome = resolve_attack(&mut self.planets, sources, target, pct)?;
        tracing::info!(
            attacker = outcome.attacker,
            target,
            force = outcome.attacking_force,
            defense = outcome.defending_force,
            captured = outcome.captured,
            "attack resolved"
        );
        self.check_game_over();
        self.advance_turn();
        Ok(outcome)
    }
}
