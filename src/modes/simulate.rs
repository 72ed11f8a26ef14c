//! Headless simulation mode
//!
//! Runs the engine for a fixed number of ticks with a simple autopilot and
//! reports aggregate statistics. Useful for checking pacing and obstacle
//! settings for a seed without a terminal.
//!
//! # Example
//!
//! ```rust
//! use toroid_snake::game::{GameConfig, GameEngine};
//! use toroid_snake::modes::SimulateMode;
//!
//! let engine = GameEngine::new(GameConfig::small(), 7).unwrap();
//! let mut mode = SimulateMode::new(engine, 500);
//! let stats = mode.run();
//! assert_eq!(stats.ticks(), 500);
//! ```

use tracing::info;

use crate::game::{Direction, GameEngine, GameState, Position};
use crate::metrics::SimulationStats;

/// Runs kept in the rolling averages
const STATS_WINDOW: usize = 100;

pub struct SimulateMode {
    engine: GameEngine,
    state: GameState,
    stats: SimulationStats,
    ticks: u64,
    /// Log progress every N ticks
    log_frequency: u64,
}

impl SimulateMode {
    pub fn new(mut engine: GameEngine, ticks: u64) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            stats: SimulationStats::new(STATS_WINDOW),
            ticks,
            log_frequency: 10_000,
        }
    }

    pub fn with_log_frequency(mut self, log_frequency: u64) -> Self {
        self.log_frequency = log_frequency.max(1);
        self
    }

    pub fn run(&mut self) -> &SimulationStats {
        info!(
            ticks = self.ticks,
            seed = self.engine.seed(),
            width = self.state.grid_width,
            height = self.state.grid_height,
            "starting simulation"
        );

        for tick in 1..=self.ticks {
            self.state.apply_input(autopilot(&self.state));

            let steps_before = self.state.steps;
            let score_before = self.state.score();
            let result = self.engine.step(&mut self.state);

            if result.reset.is_some() {
                self.stats.record_run(steps_before + 1, score_before);
            }
            self.stats
                .record_tick(&result, self.state.snake.len(), self.state.move_interval());

            if tick % self.log_frequency == 0 {
                info!(tick, summary = %self.stats.format_summary(), "progress");
            }
        }

        &self.stats
    }

    pub fn print_summary(&self) {
        let config = self.engine.config();
        println!("{}", "=".repeat(70));
        println!("Simulation - seed {}", self.engine.seed());
        println!("{}", "=".repeat(70));
        println!("Grid: {}x{}", config.grid_width, config.grid_height);
        println!("Ticks: {}", self.ticks);
        println!(
            "Obstacle spawn probability: {}",
            config.obstacle_spawn_probability
        );
        println!("{}", self.stats.format_summary());
        println!(
            "Current run: score {}, {} obstacles on the board",
            self.state.score(),
            self.state.obstacles.len()
        );
    }
}

/// Shortest distance between two coordinates on a ring of `size` cells
fn ring_distance(from: i32, to: i32, size: usize) -> i32 {
    let size = size as i32;
    let forward = (to - from).rem_euclid(size);
    forward.min(size - forward)
}

fn toroidal_distance(a: Position, b: Position, width: usize, height: usize) -> i32 {
    ring_distance(a.x, b.x, width) + ring_distance(a.y, b.y, height)
}

/// Greedy steering toward the food that refuses moves into occupied cells
///
/// Keeps the current heading when every option is blocked.
pub fn autopilot(state: &GameState) -> Direction {
    let current = state.snake.direction;
    let head = state.snake.head();

    Direction::ALL
        .into_iter()
        .filter(|dir| !current.is_opposite(*dir))
        .filter_map(|dir| {
            let next = head.stepped(dir, state.grid_width, state.grid_height);
            if state.is_blocked(next) {
                return None;
            }
            let distance = toroidal_distance(next, state.food, state.grid_width, state.grid_height);
            // Prefer the current heading on ties
            Some((distance, dir != current, dir))
        })
        .min_by_key(|&(distance, turn, _)| (distance, turn))
        .map(|(_, _, dir)| dir)
        .unwrap_or(current)
}
