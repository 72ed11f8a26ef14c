use tracing::{debug, info};

use super::{
    action::Direction,
    config::GameConfig,
    error::ConfigError,
    placement::PlacementPolicy,
    rng::GameRng,
    state::{CollisionType, GameState, Position, Snake},
};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// The obstacle roll after eating succeeded, even if nothing could be placed
    pub obstacle_roll: bool,
    /// Obstacles actually placed this step
    pub obstacles_spawned: u32,
    /// Set when the step hit something and the game was reset
    pub reset: Option<CollisionType>,
}

impl StepResult {
    fn moved(ate_food: bool, obstacle_roll: bool, obstacles_spawned: u32) -> Self {
        Self {
            ate_food,
            obstacle_roll,
            obstacles_spawned,
            reset: None,
        }
    }

    fn collided(collision: CollisionType) -> Self {
        Self {
            ate_food: false,
            obstacle_roll: false,
            obstacles_spawned: 0,
            reset: Some(collision),
        }
    }
}

/// The game engine that handles all game logic
///
/// The engine owns the configuration and the only random source; the caller
/// owns the [`GameState`] and lends it to [`step`](Self::step).
pub struct GameEngine {
    config: GameConfig,
    placement: PlacementPolicy,
    rng: GameRng,
}

impl GameEngine {
    /// Create an engine, rejecting an invalid configuration up front
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, GameRng::new(seed))
    }

    pub fn with_rng(config: GameConfig, rng: GameRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let placement = PlacementPolicy::new(
            config.grid_width,
            config.grid_height,
            config.placement_attempts,
        );

        Ok(Self {
            config,
            placement,
            rng,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Build the canonical starting state
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
            self.config.grid_width,
            self.config.grid_height,
        );

        let food = self.placement.place_food(&mut self.rng, &[&snake]);

        GameState::new(&self.config, snake, food)
    }

    /// Reinitialize `state` in place; only the reset counter survives
    pub fn reset_state(&mut self, state: &mut GameState) {
        let resets = state.resets;
        *state = self.reset();
        state.resets = resets;
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState) -> StepResult {
        let new_head = state.snake.head().stepped(
            state.snake.direction,
            state.grid_width,
            state.grid_height,
        );

        // The tail has not moved yet, so its cell still counts as occupied
        if let Some(collision) = Self::check_collision(state, new_head) {
            info!(
                ?collision,
                score = state.score(),
                steps = state.steps,
                "collision, resetting"
            );
            state.resets += 1;
            self.reset_state(state);
            return StepResult::collided(collision);
        }

        let ate_food = new_head == state.food;
        let mut obstacle_roll = false;
        let mut obstacles_spawned = 0;

        // The head joins the body before anything is placed so spawns avoid it
        state.snake.push_head(new_head);

        if ate_food {
            state.pending_growth += 1;
            state.food_eaten += 1;
            (obstacle_roll, obstacles_spawned) = self.maybe_spawn_obstacles(state);
            state.move_interval = (state.move_interval - self.config.move_interval_decrement)
                .max(self.config.move_interval_floor);
            state.food = self
                .placement
                .place_food(&mut self.rng, &[&state.snake, &state.obstacles]);
        }

        if state.pending_growth > 0 {
            state.pending_growth -= 1;
        } else {
            state.snake.drop_tail();
        }

        state.steps += 1;

        StepResult::moved(ate_food, obstacle_roll, obstacles_spawned)
    }

    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if state.snake.contains(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if state.obstacles.contains(&pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }

    /// Roll for an obstacle spawn after eating
    ///
    /// Returns whether the roll succeeded and how many obstacles were placed.
    fn maybe_spawn_obstacles(&mut self, state: &mut GameState) -> (bool, u32) {
        if !self.rng.gen_bool(self.config.obstacle_spawn_probability) {
            return (false, 0);
        }

        let wanted = self
            .rng
            .gen_range(self.config.obstacle_count_min..=self.config.obstacle_count_max);
        let mut placed = 0;

        for _ in 0..wanted {
            let spot = self.placement.place_obstacle(
                &mut self.rng,
                &[&state.snake, &state.obstacles, &state.food],
            );
            if let Some(pos) = spot {
                state.obstacles.insert(pos);
                placed += 1;
            }
        }

        debug!(wanted, placed, total = state.obstacles.len(), "obstacles spawned");
        (true, placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn engine(config: GameConfig) -> GameEngine {
        GameEngine::new(config, 0xC0FFEE).unwrap()
    }

    fn cells(coords: &[(i32, i32)]) -> Vec<Position> {
        coords.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    fn assert_distinct(state: &GameState) {
        let unique: HashSet<_> = state.snake.body.iter().collect();
        assert_eq!(unique.len(), state.snake.len(), "snake overlaps itself");
    }

    fn assert_canonical_reset(state: &GameState, config: &GameConfig) {
        let cx = (config.grid_width / 2) as i32;
        let cy = (config.grid_height / 2) as i32;
        let expected: Vec<Position> = (0..config.initial_snake_length as i32)
            .map(|i| Position::new(cx - i, cy).wrapped(config.grid_width, config.grid_height))
            .collect();

        assert_eq!(state.snake.body, expected);
        assert_eq!(state.snake.direction, Direction::Right);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.pending_growth, 0);
        assert_eq!(state.move_interval, config.base_move_interval);
        assert_eq!(state.steps, 0);
        assert_eq!(state.food_eaten, 0);
        assert!(!state.snake.contains(state.food));
    }

    #[test]
    fn test_rejects_invalid_config() {
        let result = GameEngine::new(GameConfig::new(0, 5), 1);
        assert!(matches!(result, Err(ConfigError::EmptyGrid { .. })));
    }

    #[test]
    fn test_rejects_unrepresentable_interval_before_first_tick() {
        let mut config = GameConfig::small();
        config.base_move_interval = 1e30;

        let result = GameEngine::new(config, 1);
        assert!(matches!(result, Err(ConfigError::InvalidInterval { .. })));
    }

    #[test]
    fn test_reset() {
        let config = GameConfig::default();
        let mut engine = engine(config.clone());
        let state = engine.reset();

        assert_canonical_reset(&state, &config);
        assert_eq!(state.snake.head(), Position::new(15, 12));
        assert_eq!(state.score(), 0);
        assert_eq!(state.resets, 0);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();
        let initial_head = state.snake.head();

        let result = engine.step(&mut state);

        assert_eq!(result.reset, None);
        assert!(!result.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.head(), initial_head.moved_by(1, 0));
    }

    #[test]
    fn test_growth_on_food() {
        let config = GameConfig::new(5, 5);
        let mut engine = engine(config.clone());
        let snake = Snake::from_cells(cells(&[(2, 2), (1, 2), (0, 2)]), Direction::Right);
        let mut state = GameState::new(&config, snake, Position::new(3, 2));

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert_eq!(result.reset, None);
        assert_eq!(state.snake.body, cells(&[(3, 2), (2, 2), (1, 2), (0, 2)]));
        assert_eq!(state.pending_growth, 0);
        assert_eq!(state.score(), 1);
        assert!(!state.snake.contains(state.food));
        assert!(!state.obstacles.contains(&state.food));
        for obstacle in &state.obstacles {
            assert!(!state.snake.contains(*obstacle));
        }
    }

    #[test]
    fn test_pending_growth_is_paid_one_segment_per_tick() {
        let config = GameConfig::new(10, 10);
        let mut engine = engine(config.clone());
        let snake = Snake::from_cells(cells(&[(2, 2), (1, 2), (0, 2)]), Direction::Right);
        let mut state = GameState::new(&config, snake, Position::new(9, 9));
        state.pending_growth = 2;

        engine.step(&mut state);
        assert_eq!(state.snake.len(), 4);
        assert_eq!(state.pending_growth, 1);

        engine.step(&mut state);
        assert_eq!(state.snake.len(), 5);
        assert_eq!(state.pending_growth, 0);

        engine.step(&mut state);
        assert_eq!(state.snake.len(), 5);
    }

    #[test]
    fn test_self_collision_resets() {
        let config = GameConfig::new(5, 5);
        let mut engine = engine(config.clone());
        let snake = Snake::from_cells(cells(&[(1, 1), (0, 1), (0, 0)]), Direction::Left);
        let mut state = GameState::new(&config, snake, Position::new(4, 4));
        state.obstacles.insert(Position::new(3, 3));
        state.move_interval = 0.05;

        let result = engine.step(&mut state);

        assert_eq!(result.reset, Some(CollisionType::SelfCollision));
        assert_canonical_reset(&state, &config);
        assert_eq!(state.resets, 1);
    }

    #[test]
    fn test_obstacle_collision_resets() {
        let config = GameConfig::small();
        let mut engine = engine(config.clone());
        let mut state = engine.reset();
        let ahead = state.snake.head().moved_by(1, 0);
        state.obstacles.insert(ahead);

        let result = engine.step(&mut state);

        assert_eq!(result.reset, Some(CollisionType::Obstacle));
        assert_canonical_reset(&state, &config);
    }

    #[test]
    fn test_moving_into_vacating_tail_is_a_collision() {
        // 2x2 loop: the head's next cell is the tail, which would move away this tick
        let config = GameConfig::new(4, 4);
        let mut engine = engine(config.clone());
        let snake = Snake::from_cells(cells(&[(0, 1), (1, 1), (1, 0), (0, 0)]), Direction::Up);
        let mut state = GameState::new(&config, snake, Position::new(3, 3));

        let result = engine.step(&mut state);

        assert_eq!(result.reset, Some(CollisionType::SelfCollision));
    }

    #[test]
    fn test_wrap_around_every_edge() {
        let config = GameConfig::new(6, 4);
        let mut engine = engine(config.clone());

        let cases = [
            ((5, 2), Direction::Right, (0, 2)),
            ((0, 2), Direction::Left, (5, 2)),
            ((3, 3), Direction::Down, (3, 0)),
            ((3, 0), Direction::Up, (3, 3)),
        ];

        for (start, direction, expected) in cases {
            let snake = Snake::from_cells(cells(&[start]), direction);
            let mut state = GameState::new(&config, snake, Position::new(1, 1));
            let result = engine.step(&mut state);

            assert_eq!(result.reset, None);
            assert_eq!(state.snake.head(), Position::new(expected.0, expected.1));
        }
    }

    #[test]
    fn test_reversal_rejected_before_step() {
        let mut engine = engine(GameConfig::small());
        let mut state = engine.reset();
        let head = state.snake.head();

        assert!(!state.apply_input(Direction::Left));
        let result = engine.step(&mut state);

        assert_eq!(result.reset, None);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), head.moved_by(1, 0));
    }

    #[test]
    fn test_interval_never_drops_below_floor() {
        let config = GameConfig::new(40, 40);
        let mut engine = engine(config.clone());
        let mut state = engine.reset();
        let mut previous = state.move_interval;

        for _ in 0..40 {
            // Keep the snake short and clear of obstacles so every tick eats
            state.snake = Snake::from_cells(cells(&[(0, 0)]), Direction::Right);
            state.obstacles.clear();
            state.food = Position::new(1, 0);
            state.pending_growth = 0;

            let result = engine.step(&mut state);
            assert!(result.ate_food);
            assert!(state.move_interval <= previous);
            assert!(state.move_interval >= config.move_interval_floor);
            previous = state.move_interval;
        }

        assert_eq!(state.move_interval, config.move_interval_floor);
    }

    #[test]
    fn test_obstacle_spawn_fraction_converges() {
        let config = GameConfig::new(40, 40);
        let mut engine = engine(config.clone());
        let mut state = engine.reset();
        let events = 5000;
        let mut spawns = 0;

        for _ in 0..events {
            state.snake = Snake::from_cells(cells(&[(0, 0)]), Direction::Right);
            state.obstacles.clear();
            state.food = Position::new(1, 0);
            state.pending_growth = 0;

            let result = engine.step(&mut state);
            assert!(result.ate_food);
            if result.obstacle_roll {
                assert!((1..=3).contains(&result.obstacles_spawned));
                spawns += 1;
            } else {
                assert_eq!(result.obstacles_spawned, 0);
            }
        }

        let fraction = spawns as f64 / events as f64;
        assert!((fraction - 0.3).abs() < 0.03, "fraction was {fraction}");
    }

    #[test]
    fn test_obstacle_roll_reported_when_board_is_full() {
        // Eating the last free cell of a 2x2 board leaves nowhere to put an obstacle
        let mut config = GameConfig::new(2, 2);
        config.initial_snake_length = 1;
        config.obstacle_spawn_probability = 1.0;
        let mut engine = engine(config.clone());
        let snake = Snake::from_cells(cells(&[(0, 0), (0, 1), (1, 1)]), Direction::Right);
        let mut state = GameState::new(&config, snake, Position::new(1, 0));

        let result = engine.step(&mut state);

        assert!(result.ate_food);
        assert!(result.obstacle_roll);
        assert_eq!(result.obstacles_spawned, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_spawned_obstacles_avoid_snake_and_food() {
        let mut config = GameConfig::new(8, 8);
        config.obstacle_spawn_probability = 1.0;
        let mut engine = engine(config.clone());
        let mut state = engine.reset();

        for _ in 0..8 {
            let ahead = state
                .snake
                .head()
                .stepped(state.snake.direction, state.grid_width, state.grid_height);
            if state.is_blocked(ahead) {
                break;
            }
            state.food = ahead;
            let result = engine.step(&mut state);
            assert!(result.ate_food);

            for obstacle in &state.obstacles {
                assert!(!state.snake.contains(*obstacle));
                assert_ne!(*obstacle, state.food);
            }
        }
    }

    #[test]
    fn test_length_invariants_over_long_run() {
        let config = GameConfig::new(12, 9);
        let mut engine = engine(config.clone());
        let mut state = engine.reset();
        let turns = [
            Direction::Up,
            Direction::Left,
            Direction::Down,
            Direction::Right,
        ];

        for tick in 0..3000 {
            if tick % 7 == 0 {
                state.apply_input(turns[(tick / 7) % turns.len()]);
            }
            let before = state.snake.len();
            let result = engine.step(&mut state);
            let after = state.snake.len();

            if result.reset.is_some() {
                assert_eq!(after, config.initial_snake_length);
            } else {
                assert!(after == before || after == before + 1);
            }
            assert_distinct(&state);
            assert!(!state.is_blocked(state.food));
        }
    }

    #[test]
    fn test_same_seed_replays_identically() {
        let config = GameConfig::small();
        let run = || {
            let mut engine = GameEngine::new(config.clone(), 99).unwrap();
            let mut state = engine.reset();
            for tick in 0..500 {
                if tick % 5 == 0 {
                    state.apply_input(if tick % 10 == 0 {
                        Direction::Down
                    } else {
                        Direction::Right
                    });
                }
                engine.step(&mut state);
            }
            state
        };

        assert_eq!(run(), run());
    }

    #[test]
    fn test_reset_state_keeps_reset_count() {
        let config = GameConfig::small();
        let mut engine = engine(config.clone());
        let mut state = engine.reset();
        state.resets = 4;
        state.steps = 10;

        engine.reset_state(&mut state);

        assert_eq!(state.resets, 4);
        assert_canonical_reset(&state, &config);
    }
}
