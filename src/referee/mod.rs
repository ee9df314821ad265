mod config;

use color_eyre::{eyre::ensure, Result};
use itertools::Itertools;
use log::{debug, info, warn};
use rand::{rngs::StdRng, RngCore, SeedableRng};

pub use self::config::MatchConfig;
use crate::{
    pit::{
        constants::SNAKE_COLORS,
        food::FoodPool,
        game::Game,
        models::{MatchEvent, Phase, SnakeView, Snapshot},
        snake::{Motion, Personality, Snake},
        SnakeID,
    },
    strategies::{Greedy, Strategy},
};

/// Owns one match: the board, the scores and the clock.
pub struct Match<R: RngCore = StdRng> {
    config:        MatchConfig,
    game:          Game,
    scores:        Vec<u64>,
    elapsed_ticks: u64,
    phase:         Phase,
    winner:        Option<SnakeID>,
    strategy:      Box<dyn Strategy>,
    rng:           R,
}

impl Match<StdRng> {
    /// # Errors
    ///
    /// Fails if `config` does not describe a playable match.
    pub fn from_entropy(config: MatchConfig) -> Result<Self> {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: RngCore> Match<R> {
    /// # Errors
    ///
    /// Fails if `config` does not describe a playable match.
    pub fn new(config: MatchConfig, rng: R) -> Result<Self> {
        Self::with_strategy(config, Box::new(Greedy), rng)
    }

    /// # Errors
    ///
    /// Fails if `config` does not describe a playable match.
    pub fn with_strategy(
        config: MatchConfig,
        strategy: Box<dyn Strategy>,
        mut rng: R,
    ) -> Result<Self> {
        config.validate()?;
        let game = Self::spawn(&config, &mut rng);
        Ok(Self::assemble(config, game, strategy, rng))
    }

    /// Starts from a hand-built board instead of the configured start
    /// positions. The food pool takes its capacity and attempt budget from
    /// `config`. A later `reset` goes back to the configured layout.
    ///
    /// # Errors
    ///
    /// Fails if `config` is invalid or the board does not fit it.
    pub fn from_game(
        config: MatchConfig,
        mut game: Game,
        strategy: Box<dyn Strategy>,
        rng: R,
    ) -> Result<Self> {
        config.validate()?;
        ensure!(!game.snakes.is_empty(), "a match needs at least one snake");
        ensure!(
            game.grid == config.grid(),
            "board is {}x{} but the match is configured for {}x{}",
            game.grid.width,
            game.grid.height,
            config.width,
            config.height
        );
        for (index, snake) in game.snakes.iter().enumerate() {
            ensure!(
                snake.id == index,
                "snake at index {index} has id {}",
                snake.id
            );
            ensure!(!snake.body.is_empty(), "snake {index} has no body");
            ensure!(
                snake.body.iter().all(|c| game.grid.contains(*c)),
                "snake {index} is not entirely on the board"
            );
        }
        ensure!(
            game.food.len() <= config.max_food,
            "board holds {} food but the match allows {}",
            game.food.len(),
            config.max_food
        );
        game.food.capacity = config.max_food;
        game.food.spawn_attempts = config.spawn_attempts;
        Ok(Self::assemble(config, game, strategy, rng))
    }

    fn assemble(
        config: MatchConfig,
        game: Game,
        strategy: Box<dyn Strategy>,
        rng: R,
    ) -> Self {
        let scores = vec![0; game.snakes.len()];
        Self {
            config,
            game,
            scores,
            elapsed_ticks: 0,
            phase: Phase::Running,
            winner: None,
            strategy,
            rng,
        }
    }

    fn spawn(config: &MatchConfig, rng: &mut R) -> Game {
        let snakes = config
            .start_positions
            .iter()
            .enumerate()
            .map(|(id, start)| {
                Snake::new(
                    id,
                    SNAKE_COLORS[id % SNAKE_COLORS.len()],
                    *start,
                    config.initial_growth,
                    Personality::random(id, &mut *rng),
                )
            })
            .collect();

        let mut game = Game::new(config.grid(), snakes).with_food(
            FoodPool::new(config.max_food, config.spawn_attempts),
        );
        game.food.maintain(&game.grid, &game.snakes, rng);

        info!(
            "new {}x{} match with {} snakes and {} food",
            config.width,
            config.height,
            game.snakes.len(),
            game.food.len()
        );

        game
    }

    /// Advances the match by one tick. Does nothing unless running.
    pub fn tick(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Running {
            return events;
        }

        self.elapsed_ticks += 1;

        // every snake decides against the same, untouched board
        let mut headings = Vec::with_capacity(self.game.snakes.len());
        for snake in self.game.snakes.iter().filter(|snake| snake.alive) {
            let direction =
                self.strategy.get_movement(&self.game, snake, &mut self.rng);
            headings.push((snake.id, direction));
        }

        for (id, direction) in headings {
            let snake = &mut self.game.snakes[id];
            if direction == snake.heading.opposite() {
                warn!(
                    "snake {id} asked to reverse into {direction}, holding {}",
                    snake.heading
                );
                continue;
            }
            snake.heading = direction;
        }

        // moves are checked against the pre-motion bodies, so two heads may
        // share a cell for a tick. deaths still free up space immediately.
        let mut board = self.game.clone();
        for id in 0..self.game.snakes.len() {
            if !self.game.snakes[id].alive {
                continue;
            }

            match self.game.snakes[id].advance(
                &board,
                &mut self.game.food,
                self.config.growth_per_food,
            ) {
                Motion::Died => {
                    info!(
                        "snake {id} died on tick {} with {} points",
                        self.elapsed_ticks, self.scores[id]
                    );
                    board.snakes[id].alive = false;
                },
                Motion::Ate => {
                    self.scores[id] += 1;
                    events.push(MatchEvent::FoodEaten { snake_id: id });
                },
                Motion::Moved => {},
            }
        }

        let placed =
            self.game
                .food
                .maintain(&self.game.grid, &self.game.snakes, &mut self.rng);
        if placed > 0 {
            debug!("placed {placed} food on tick {}", self.elapsed_ticks);
        }

        if self.elapsed_ticks >= self.config.match_duration_ticks()
            || self.game.all_dead()
        {
            events.push(self.finish());
        }

        events
    }

    fn finish(&mut self) -> MatchEvent {
        // first snake with the top score wins
        let mut winner = 0;
        for (id, score) in self.scores.iter().enumerate() {
            if *score > self.scores[winner] {
                winner = id;
            }
        }

        self.phase = Phase::Over;
        self.winner = Some(winner);

        info!(
            "match over after {} ticks: snake {winner} wins with {} points \
             (scores: {})",
            self.elapsed_ticks,
            self.scores[winner],
            self.scores.iter().join(", ")
        );

        MatchEvent::MatchOver {
            winner,
            winner_alive: self.game.snakes[winner].alive,
            scores: self.scores.clone(),
        }
    }

    /// Ticks until the match is over. Returns immediately if paused.
    pub fn run_to_completion(&mut self) -> Vec<MatchEvent> {
        let mut events = Vec::new();
        while self.phase == Phase::Running {
            events.extend(self.tick());
        }
        events
    }

    pub fn pause(&mut self) {
        if self.phase == Phase::Running {
            info!("paused on tick {}", self.elapsed_ticks);
            self.phase = Phase::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.phase == Phase::Paused {
            info!("resumed on tick {}", self.elapsed_ticks);
            self.phase = Phase::Running;
        }
    }

    pub fn toggle_pause(&mut self) {
        match self.phase {
            Phase::Running => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Over => {},
        }
    }

    /// Throws the whole match away and starts a fresh one: new snakes and
    /// personalities, new food, zeroed scores and clock.
    pub fn reset(&mut self) {
        self.game = Self::spawn(&self.config, &mut self.rng);
        self.scores = vec![0; self.game.snakes.len()];
        self.elapsed_ticks = 0;
        self.phase = Phase::Running;
        self.winner = None;
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let duration = self.config.match_duration_ticks();
        Snapshot {
            width:                self.game.grid.width,
            height:               self.game.grid.height,
            snakes:               self
                .game
                .snakes
                .iter()
                .map(|snake| SnakeView {
                    id:      snake.id,
                    color:   snake.color,
                    body:    snake.body.clone(),
                    heading: snake.heading,
                    alive:   snake.alive,
                    length:  snake.body.len(),
                })
                .collect(),
            food:                 self.game.food.items.clone(),
            scores:               self.scores.clone(),
            elapsed_ticks:        self.elapsed_ticks,
            match_duration_ticks: duration,
            seconds_left:         duration.saturating_sub(self.elapsed_ticks)
                / self.config.frame_rate,
            phase:                self.phase,
            winner:               self.winner,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn scores(&self) -> &[u64] {
        &self.scores
    }

    #[must_use]
    pub const fn elapsed_ticks(&self) -> u64 {
        self.elapsed_ticks
    }

    #[must_use]
    pub const fn winner(&self) -> Option<SnakeID> {
        self.winner
    }

    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    #[must_use]
    pub const fn config(&self) -> &MatchConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> Match {
        Match::new(MatchConfig::default(), StdRng::seed_from_u64(seed))
            .expect("default config is valid")
    }

    #[test]
    fn starts_running_with_full_food() {
        let m = seeded(1);
        assert_eq!(m.phase(), Phase::Running);
        assert_eq!(m.game().snakes.len(), 5);
        assert_eq!(m.game().food.len(), 3);
        assert!(m.game().snakes.iter().all(|s| s.body.len() == 1));
        assert_eq!(m.scores(), &[0, 0, 0, 0, 0]);
    }

    #[test]
    fn snakes_grow_into_their_starting_length() {
        let mut m = seeded(2);
        m.tick();
        m.tick();
        m.tick();
        for snake in m.game().snakes.iter().filter(|s| s.alive) {
            assert!(snake.body.len() >= 3);
        }
    }

    #[test]
    fn pause_withholds_ticks() {
        let mut m = seeded(3);
        m.tick();
        m.pause();
        m.pause();
        assert_eq!(m.phase(), Phase::Paused);
        assert!(m.tick().is_empty());
        assert_eq!(m.elapsed_ticks(), 1);

        m.resume();
        m.resume();
        assert_eq!(m.phase(), Phase::Running);
        m.tick();
        assert_eq!(m.elapsed_ticks(), 2);

        m.toggle_pause();
        assert_eq!(m.phase(), Phase::Paused);
        m.toggle_pause();
        assert_eq!(m.phase(), Phase::Running);
    }

    #[test]
    fn over_is_terminal_until_reset() {
        let mut m = seeded(4);
        m.run_to_completion();
        assert_eq!(m.phase(), Phase::Over);

        m.resume();
        m.toggle_pause();
        assert_eq!(m.phase(), Phase::Over);
        let ticks = m.elapsed_ticks();
        assert!(m.tick().is_empty());
        assert_eq!(m.elapsed_ticks(), ticks);

        m.reset();
        assert_eq!(m.phase(), Phase::Running);
        assert_eq!(m.elapsed_ticks(), 0);
        assert_eq!(m.winner(), None);
        assert!(m.scores().iter().all(|s| *s == 0));
        assert!(m.game().snakes.iter().all(|s| s.alive));
        assert_eq!(m.game().food.len(), 3);
    }

    #[test]
    fn snapshot_counts_down_in_seconds() {
        let mut m = seeded(5);
        assert_eq!(m.snapshot().seconds_left, 60);
        m.tick();
        let snapshot = m.snapshot();
        assert_eq!(snapshot.seconds_left, 59);
        assert_eq!(snapshot.elapsed_ticks, 1);
        assert_eq!(snapshot.match_duration_ticks, 900);
        assert_eq!(snapshot.snakes.len(), 5);
    }

    #[test]
    fn invalid_config_is_rejected_up_front() {
        let config = MatchConfig::sized(4, 4);
        assert!(Match::new(config, StdRng::seed_from_u64(0)).is_err());
    }
}
