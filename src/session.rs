//! Game session: the single owner of all mutable game state.
//!
//! Everything that changes the game goes through the session, either as a
//! command from the presentation layer or as a timer on the session's own
//! game clock. The clock only moves when the caller advances it, and timers
//! run one at a time in due order, so a command never observes a half-applied
//! tick.
//!
//! Timers:
//! - production, every `production_interval_ms`, whoever's turn it is
//! - animation sweep, every second
//! - the automatic turn, `ai_thinking_ms` after control reaches an AI (or a
//!   human with no planets left)
//! - attack settling, `attack_settle_ms` after an attack, touching only ships
//!
//! Starting a level invalidates every queued timer, and turn timers also
//! carry the turn serial they were scheduled for, so nothing scheduled for an
//! earlier turn or level ever fires.

mod scheduler;
mod snapshot;

pub use scheduler::{Fired, Scheduler};
pub use snapshot::Snapshot;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::config::{GameConfig, LEVEL_COUNT, level_config};
use crate::error::{BoardError, CombatError};
use crate::game::{
    AttackAnimation, AttackOutcome, AttackPercentage, ClickEffect, Fleet, GameState, PlanetId,
    ShipId, apply_production, attack_ship_count, decide,
};
use crate::scores::{ScoreRecord, ScoreStore};

/// How long an attack animates.
pub const ATTACK_ANIMATION_MS: u64 = 2000;

/// How long a finished animation stays in the snapshot.
pub const ANIMATION_LINGER_MS: u64 = 1000;

/// Interval of the animation sweep.
pub const ANIMATION_SWEEP_MS: u64 = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Timer {
    Production,
    AnimationSweep,
    Turn { serial: u64 },
    AttackSettled { ships: Vec<ShipId>, target: PlanetId },
}

/// A running game: one human run through the level table.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    state: GameState,
    username: String,
    store: Box<dyn ScoreStore>,
    rng: ChaCha8Rng,
    fleet: Fleet,
    animations: Vec<AttackAnimation>,
    next_animation_id: u64,
    timers: Scheduler<Timer>,
    turn_serial: u64,
    turn_started_ms: u64,
    now_ms: u64,
    level_started_ms: u64,
    run_started_ms: u64,
    run_complete: bool,
    attacks: u64,
}

impl GameSession {
    /// Start a run at level 1.
    ///
    /// Pass a seed for a reproducible run; `None` draws one from entropy.
    ///
    /// # Errors
    ///
    /// Returns an error if the first board cannot be generated.
    pub fn new(
        config: GameConfig,
        username: &str,
        store: Box<dyn ScoreStore>,
        seed: Option<u64>,
    ) -> Result<Self, BoardError> {
        Self::starting_at(1, config, username, store, seed)
    }

    /// Start a run at `level`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board cannot be generated.
    pub fn starting_at(
        level: u32,
        config: GameConfig,
        username: &str,
        store: Box<dyn ScoreStore>,
        seed: Option<u64>,
    ) -> Result<Self, BoardError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed.unwrap_or_else(rand::random));
        let state = GameState::generate(level, username, &config, &mut rng, 0)?;
        Ok(Self::assemble(state, config, username, store, rng))
    }

    /// Run a hand-built level state.
    ///
    /// Level advances and restarts still generate boards from `seed`.
    #[must_use]
    pub fn with_state(
        mut state: GameState,
        config: GameConfig,
        username: &str,
        store: Box<dyn ScoreStore>,
        seed: u64,
    ) -> Self {
        state.rename_human(username);
        Self::assemble(state, config, username, store, ChaCha8Rng::seed_from_u64(seed))
    }

    fn assemble(
        state: GameState,
        config: GameConfig,
        username: &str,
        store: Box<dyn ScoreStore>,
        rng: ChaCha8Rng,
    ) -> Self {
        let mut session = Self {
            config,
            state,
            username: username.to_string(),
            store,
            rng,
            fleet: Fleet::new(),
            animations: Vec::new(),
            next_animation_id: 0,
            timers: Scheduler::new(),
            turn_serial: 0,
            turn_started_ms: 0,
            now_ms: 0,
            level_started_ms: 0,
            run_started_ms: 0,
            run_complete: false,
            attacks: 0,
        };
        session.install_level();
        session
    }

    // --- Accessors ---

    /// Current level state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Engine configuration.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Human display name.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Game clock in milliseconds.
    #[must_use]
    pub const fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Time spent in the current level.
    #[must_use]
    pub const fn game_time_ms(&self) -> u64 {
        self.now_ms.saturating_sub(self.level_started_ms)
    }

    /// Whole seconds since the run started.
    #[must_use]
    pub const fn total_time_secs(&self) -> u64 {
        self.now_ms.saturating_sub(self.run_started_ms) / 1000
    }

    /// When control last changed hands.
    #[must_use]
    pub const fn turn_started_ms(&self) -> u64 {
        self.turn_started_ms
    }

    /// Whether the final level was completed and advanced past.
    #[must_use]
    pub const fn is_run_complete(&self) -> bool {
        self.run_complete
    }

    /// Attacks resolved since the run started.
    #[must_use]
    pub const fn attacks(&self) -> u64 {
        self.attacks
    }

    /// Visual units.
    #[must_use]
    pub const fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    /// Attacks still animating.
    #[must_use]
    pub fn animations(&self) -> &[AttackAnimation] {
        &self.animations
    }

    /// The score store.
    #[must_use]
    pub fn store(&self) -> &dyn ScoreStore {
        self.store.as_ref()
    }

    /// Borrow the state for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        let ui = &self.state.interaction;
        Snapshot {
            level: self.state.level,
            phase: ui.phase(),
            planets: &self.state.planets,
            players: &self.state.players,
            current_player: self.state.current_player().map(|p| p.id),
            selected_planets: ui.selected(),
            target_planet: ui.target(),
            is_game_over: self.state.is_game_over,
            level_completed: self.state.level_completed,
            winner: self.state.winner,
            run_complete: self.run_complete,
            username: &self.username,
            game_time_ms: self.game_time_ms(),
            total_time_secs: self.total_time_secs(),
            ships: self.fleet.ships(),
            attack_animations: &self.animations,
        }
    }

    // --- Commands ---

    /// Click a planet on the human's turn. Returns `false` if nothing changed.
    pub fn select_planet(&mut self, planet: PlanetId) -> bool {
        if self.state.is_game_over || !self.state.is_human_turn() {
            tracing::debug!(planet, "selection outside the human turn ignored");
            return false;
        }
        let Some(current) = self.state.current_player().map(|p| p.id) else {
            return false;
        };
        let Some(own) = self.state.get_planet(planet).map(|p| p.is_owned_by(current)) else {
            tracing::debug!(planet, "selection of unknown planet ignored");
            return false;
        };
        self.state.interaction.click(planet, own) != ClickEffect::Ignored
    }

    /// Drop the selection. Returns `false` once the level ended.
    pub fn clear_selection(&mut self) -> bool {
        if self.state.interaction.phase().is_terminal() {
            return false;
        }
        self.state.interaction.clear();
        true
    }

    /// Launch the selected attack. Returns `false` if it was rejected.
    pub fn execute_attack(&mut self, pct: AttackPercentage) -> bool {
        if !self.state.is_human_turn() {
            tracing::debug!("attack outside the human turn ignored");
            return false;
        }
        let Some((sources, target)) = self
            .state
            .interaction
            .order()
            .map(|(sources, target)| (sources.to_vec(), target))
        else {
            tracing::debug!("attack without a target ignored");
            return false;
        };

        match self.perform_attack(&sources, target, pct) {
            Ok(_) => {
                self.state.interaction.clear();
                true
            }
            Err(e) => {
                tracing::debug!(error = %e, "attack rejected");
                false
            }
        }
    }

    /// Move on from a completed level. Past the final level this saves the
    /// full-completion score and ends the run.
    pub fn advance_level(&mut self) -> bool {
        if !self.state.level_completed || self.run_complete {
            tracing::debug!(level = self.state.level, "advance ignored");
            return false;
        }
        if self.state.level >= LEVEL_COUNT {
            self.save_score(LEVEL_COUNT);
            self.run_complete = true;
            tracing::info!(username = %self.username, "run complete");
            return true;
        }
        self.start_level(self.state.level + 1)
    }

    /// Start a new run at level 1 for `username`.
    ///
    /// If the first board cannot be generated the current run is left as it was.
    pub fn restart(&mut self, username: &str) -> bool {
        let next = GameState::generate(1, username, &self.config, &mut self.rng, self.now_ms);
        self.begin_run(username, next)
    }

    /// Change the human's display name.
    pub fn set_username(&mut self, username: &str) {
        self.username = username.to_string();
        self.state.rename_human(username);
    }

    // --- Clock ---

    /// Advance the game clock by `delta_ms`.
    pub fn advance(&mut self, delta_ms: u64) {
        self.advance_to(self.now_ms.saturating_add(delta_ms));
    }

    /// Advance the game clock to `now_ms`, firing every timer due on the way.
    pub fn advance_to(&mut self, now_ms: u64) {
        while let Some(fired) = self.timers.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(fired.due_ms);
            self.fire(fired.event);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }

    fn fire(&mut self, timer: Timer) {
        match timer {
            Timer::Production => {
                let result = apply_production(
                    &mut self.state.planets,
                    self.now_ms,
                    self.config.production_interval_ms,
                    self.config.neighbor_radius,
                );
                tracing::trace!(
                    credited = result.planets_credited,
                    added = result.soldiers_added,
                    "production"
                );
                self.fleet.reconcile(&self.state.planets);
                self.timers
                    .schedule(self.now_ms + self.config.production_interval_ms, Timer::Production);
            }
            Timer::AnimationSweep => {
                let now = self.now_ms;
                self.animations
                    .retain(|a| !a.is_expired(now, ANIMATION_LINGER_MS));
                self.timers
                    .schedule(now + ANIMATION_SWEEP_MS, Timer::AnimationSweep);
            }
            Timer::Turn { serial } if serial == self.turn_serial => self.automatic_turn(),
            Timer::Turn { serial } => {
                tracing::trace!(serial, current = self.turn_serial, "stale turn timer dropped");
            }
            Timer::AttackSettled { ships, target } => {
                self.fleet.land(&ships, target);
                self.fleet.reconcile(&self.state.planets);
            }
        }
    }

    // --- Turn flow ---

    /// Play the current seat if no human can: AI seats decide, stranded
    /// humans pass.
    fn automatic_turn(&mut self) {
        if self.state.is_game_over {
            return;
        }
        let Some(player) = self.state.current_player().cloned() else {
            return;
        };

        if player.is_ai {
            let choice = decide(
                &self.state.planets,
                player.id,
                player.difficulty(),
                self.state.level,
            );
            let attacked = choice.is_some_and(|mv| {
                self.perform_attack(&[mv.source], mv.target, mv.percentage)
                    .inspect_err(|e| tracing::debug!(player = player.id, error = %e, "ai attack rejected"))
                    .is_ok()
            });
            if !attacked {
                tracing::debug!(player = player.id, "ai passes");
                self.pass_turn();
            }
        } else if self.state.planet_count(player.id) == 0 {
            tracing::debug!(player = player.id, "player without planets passes");
            self.pass_turn();
        }
    }

    fn perform_attack(
        &mut self,
        sources: &[PlanetId],
        target: PlanetId,
        pct: AttackPercentage,
    ) -> Result<AttackOutcome, CombatError> {
        let outcome = self.state.attack(sources, target, pct)?;

        let ships = self.fleet.launch(
            outcome.lead_source,
            target,
            attack_ship_count(outcome.attacking_force),
        );
        self.animations.push(AttackAnimation {
            id: self.next_animation_id,
            from_planet: outcome.lead_source,
            to_planet: target,
            soldiers: outcome.attacking_force,
            start_ms: self.now_ms,
            duration_ms: ATTACK_ANIMATION_MS,
            ship_ids: ships.clone(),
        });
        self.next_animation_id += 1;
        self.timers.schedule(
            self.now_ms + self.config.attack_settle_ms,
            Timer::AttackSettled { ships, target },
        );
        self.attacks += 1;

        if self.state.level_completed {
            tracing::info!(level = self.state.level, "level complete");
            self.save_score(self.state.level);
        }
        self.begin_turn();
        Ok(outcome)
    }

    fn pass_turn(&mut self) {
        self.state.advance_turn();
        self.begin_turn();
    }

    /// Record that control changed hands and arm the turn timer if the new
    /// seat plays automatically.
    fn begin_turn(&mut self) {
        self.turn_serial += 1;
        self.turn_started_ms = self.now_ms;
        if self.state.is_game_over {
            return;
        }
        let Some(player) = self.state.current_player() else {
            return;
        };
        if player.is_ai || self.state.planet_count(player.id) == 0 {
            let delay = level_config(self.state.level).ai_thinking_ms;
            self.timers.schedule(
                self.now_ms + delay,
                Timer::Turn {
                    serial: self.turn_serial,
                },
            );
        }
    }

    // --- Levels ---

    fn start_level(&mut self, level: u32) -> bool {
        match GameState::generate(level, &self.username, &self.config, &mut self.rng, self.now_ms) {
            Ok(state) => {
                self.state = state;
                self.install_level();
                true
            }
            Err(e) => {
                tracing::error!(level, error = %e, "level generation failed");
                false
            }
        }
    }

    fn begin_run(&mut self, username: &str, next: Result<GameState, BoardError>) -> bool {
        let state = match next {
            Ok(state) => state,
            Err(e) => {
                tracing::error!(username, error = %e, "restart failed");
                return false;
            }
        };
        self.username = username.to_string();
        self.run_started_ms = self.now_ms;
        self.run_complete = false;
        self.attacks = 0;
        self.state = state;
        self.install_level();
        true
    }

    /// Reset per-level bookkeeping and arm the level's timers.
    fn install_level(&mut self) {
        self.timers.invalidate();
        self.fleet.clear();
        self.fleet.reconcile(&self.state.planets);
        self.animations.clear();
        self.level_started_ms = self.now_ms;
        tracing::info!(
            level = self.state.level,
            planets = self.state.planets.len(),
            players = self.state.players.len(),
            "level started"
        );

        self.timers.schedule(
            self.now_ms + self.config.production_interval_ms,
            Timer::Production,
        );
        self.timers
            .schedule(self.now_ms + ANIMATION_SWEEP_MS, Timer::AnimationSweep);
        self.begin_turn();
    }

    fn save_score(&mut self, completed_levels: u32) {
        let record = ScoreRecord::new(
            self.username.clone(),
            self.state.level,
            completed_levels,
            self.total_time_secs(),
        );
        tracing::info!(
            username = %record.username,
            completed_levels,
            total_time = record.total_time,
            "saving score"
        );
        self.store.save_score(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{
        AiDifficulty, HUMAN_ID, Phase, Planet, PlanetSize, SpecialType, create_players,
    };
    use crate::scores::MemoryScoreStore;

    fn planet(id: PlanetId, x: f64, owner: Option<u8>, soldiers: u32) -> Planet {
        Planet::new(id, (x, 300.0), PlanetSize::Large, owner, SpecialType::Normal, 0)
            .with_soldiers(soldiers)
    }

    fn session(level: u32, ai_count: usize, planets: Vec<Planet>, config: GameConfig) -> GameSession {
        let players = create_players("tester", ai_count, AiDifficulty::Medium);
        let state = GameState::new(level, players, planets);
        GameSession::with_state(state, config, "tester", Box::new(MemoryScoreStore::new()), 1)
    }

    /// Human on planet 0, the only AI on planet 1, a neutral on planet 2.
    fn duel(level: u32, human: u32, ai: u32) -> GameSession {
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), human),
            planet(1, 400.0, Some(2), ai),
            planet(2, 700.0, None, 40),
        ];
        session(level, 1, planets, GameConfig::default())
    }

    fn attack(session: &mut GameSession, from: PlanetId, to: PlanetId, pct: AttackPercentage) -> bool {
        session.select_planet(from) && session.select_planet(to) && session.execute_attack(pct)
    }

    #[test]
    fn test_new_session_starts_on_human_turn() {
        let session = GameSession::new(
            GameConfig::default(),
            "ada",
            Box::new(MemoryScoreStore::new()),
            Some(9),
        )
        .unwrap();
        assert_eq!(session.state().level, 1);
        assert!(session.state().is_human_turn());
        assert_eq!(session.state().planets.len(), 6);
        assert_eq!(session.username(), "ada");
        assert_eq!(session.now_ms(), 0);
    }

    #[test]
    fn test_production_runs_every_interval() {
        let mut session = duel(1, 0, 0);
        session.advance(999);
        assert_eq!(session.state().planets[0].soldier_count, 0);
        session.advance(1);
        assert_eq!(session.state().planets[0].soldier_count, 4);
        session.advance(2000);
        assert_eq!(session.state().planets[0].soldier_count, 12);
        // Neutral planets never produce
        assert_eq!(session.state().planets[2].soldier_count, 40);
    }

    #[test]
    fn test_ai_turn_fires_after_thinking_time() {
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), 100),
            planet(1, 400.0, Some(2), 20),
            planet(2, 700.0, None, 40),
            planet(3, 550.0, Some(2), 5),
        ];
        let mut session = session(1, 1, planets, GameConfig::default());
        assert!(attack(&mut session, 0, 1, AttackPercentage::Quarter));
        // 25 against 20 captures with 5 left
        assert_eq!(session.state().planets[1].owner, Some(HUMAN_ID));
        assert_eq!(session.state().planets[1].soldier_count, 5);
        assert_eq!(session.state().current, 1);
        assert_eq!(session.state().interaction.phase(), Phase::Selection);

        session.advance(level_config(1).ai_thinking_ms - 1);
        assert_eq!(session.state().current, 1);
        session.advance(1);
        assert_eq!(session.state().current, 0);
        assert_eq!(session.turn_started_ms(), level_config(1).ai_thinking_ms);
    }

    #[test]
    fn test_ai_attacks_on_its_turn() {
        let mut session = duel(1, 60, 30);
        assert!(attack(&mut session, 0, 2, AttackPercentage::Full));
        assert_eq!(session.state().planets[2].owner, Some(HUMAN_ID));
        assert_eq!(session.state().current, 1);

        session.advance(level_config(1).ai_thinking_ms);
        assert_eq!(session.attacks(), 2);
        assert_eq!(session.state().current, 0);
        assert_eq!(session.animations().len(), 2);
    }

    #[test]
    fn test_commands_rejected_outside_human_turn() {
        let mut session = duel(1, 60, 30);
        assert!(attack(&mut session, 0, 2, AttackPercentage::Full));
        assert!(!session.select_planet(0));
        assert!(!session.execute_attack(AttackPercentage::Full));
    }

    #[test]
    fn test_rejected_attack_keeps_selection() {
        let mut session = duel(1, 3, 30);
        assert!(session.select_planet(0));
        assert!(session.select_planet(1));
        assert!(!session.execute_attack(AttackPercentage::Quarter));
        assert_eq!(session.state().interaction.phase(), Phase::Attack);
        assert_eq!(session.state().current, 0);
        assert!(session.clear_selection());
        assert_eq!(session.state().interaction.phase(), Phase::Selection);
    }

    #[test]
    fn test_level_complete_saves_score() {
        let config = GameConfig {
            production_interval_ms: 1_000_000,
            ..GameConfig::default()
        };
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), 100),
            planet(1, 400.0, Some(2), 10),
        ];
        let mut session = session(3, 1, planets, config);
        session.advance(61_000);
        assert!(attack(&mut session, 0, 1, AttackPercentage::Full));
        assert!(session.state().is_game_over);
        assert!(session.state().level_completed);

        let scores = session.store().scores();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].completed_levels, 3);
        assert_eq!(scores[0].level, 3);
        assert_eq!(scores[0].total_time, 61);

        assert!(session.advance_level());
        assert_eq!(session.state().level, 4);
        assert!(!session.state().is_game_over);
        assert_eq!(session.game_time_ms(), 0);
        assert_eq!(session.state().players[0].name, "tester");
    }

    #[test]
    fn test_advance_requires_completion() {
        let mut session = duel(1, 10, 10);
        assert!(!session.advance_level());
        assert_eq!(session.state().level, 1);
    }

    #[test]
    fn test_final_level_completes_run() {
        let mut session = duel(LEVEL_COUNT, 100, 10);
        assert!(attack(&mut session, 0, 1, AttackPercentage::Full));
        assert!(session.advance_level());
        assert!(session.is_run_complete());
        assert_eq!(session.state().level, LEVEL_COUNT);
        assert_eq!(session.store().scores()[0].completed_levels, LEVEL_COUNT);
        assert!(!session.advance_level());
    }

    #[test]
    fn test_restart_drops_pending_timers() {
        let mut session = duel(1, 60, 30);
        assert!(attack(&mut session, 0, 2, AttackPercentage::Full));
        assert!(session.restart("zoe"));

        // The AI turn queued before the restart never fires
        session.advance(5_000);
        assert_eq!(session.attacks(), 0);
        assert_eq!(session.state().level, 1);
        assert_eq!(session.state().players[0].name, "zoe");
        assert!(session.animations().is_empty());
        assert!(session.state().is_human_turn());
    }

    #[test]
    fn test_failed_restart_keeps_run() {
        let mut session = duel(1, 60, 30);
        session.advance(4_000);
        assert!(attack(&mut session, 0, 2, AttackPercentage::Full));
        let attacks = session.attacks();
        let board = session.state().planets.clone();

        assert!(!session.begin_run("zoe", Err(BoardError::MissingHuman)));
        assert_eq!(session.username(), "tester");
        assert_eq!(session.attacks(), attacks);
        assert_eq!(session.run_started_ms, 0);
        assert_eq!(session.state().planets, board);
        assert_eq!(session.state().players[0].name, "tester");
    }

    #[test]
    fn test_stranded_human_passes() {
        let planets = vec![planet(0, 100.0, Some(2), 10), planet(1, 400.0, Some(3), 10)];
        let mut session = session(5, 2, planets, GameConfig::default());
        assert_eq!(session.state().current, 0);
        session.advance(level_config(5).ai_thinking_ms);
        assert_eq!(session.state().current, 1);
    }

    #[test]
    fn test_animations_are_swept() {
        let mut session = duel(1, 60, 30);
        assert!(attack(&mut session, 0, 2, AttackPercentage::Full));
        assert_eq!(session.animations().len(), 1);
        // The AI's reply adds a second animation
        session.advance(2_999);
        assert_eq!(session.animations().len(), 2);
        session.advance(1);
        assert_eq!(session.animations().len(), 1);
    }

    #[test]
    fn test_settled_ships_land_on_target() {
        let config = GameConfig {
            production_interval_ms: 1_000_000,
            attack_settle_ms: 1_000,
            ..GameConfig::default()
        };
        let planets = vec![
            planet(0, 100.0, Some(HUMAN_ID), 100),
            planet(1, 400.0, Some(2), 10),
            planet(2, 700.0, None, 10),
        ];
        let mut session = session(1, 1, planets, config);
        assert!(attack(&mut session, 0, 2, AttackPercentage::Half));
        assert!(session.fleet().in_flight().count() > 0);

        session.advance(config.attack_settle_ms);
        assert_eq!(session.fleet().in_flight().count(), 0);
        assert!(session.fleet().orbiting(2).count() > 0);
    }

    #[test]
    fn test_rename_keeps_ownership() {
        let mut session = duel(1, 60, 30);
        session.set_username("zoe");
        let state = session.state();
        assert_eq!(state.owner_of(&state.planets[0]).map(|p| p.name.as_str()), Some("zoe"));
        assert_eq!(session.snapshot().username, "zoe");
    }

    #[test]
    fn test_snapshot_serializes() {
        let session = duel(1, 60, 30);
        let json = session.snapshot().to_json().unwrap();
        assert!(json.contains("\"phase\": \"selection\""));
        assert!(json.contains("\"soldierCount\""));
        assert!(json.contains("\"attackAnimations\""));
    }
}
