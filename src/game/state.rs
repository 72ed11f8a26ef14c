use std::collections::HashSet;
use std::time::Duration;

use super::action::Direction;
use super::config::GameConfig;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Bring each axis back into `0..width` / `0..height`
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }

    /// One cell in `direction` on a toroidal grid
    pub fn stepped(&self, direction: Direction, width: usize, height: usize) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy).wrapped(width, height)
    }
}

/// Anything that claims grid cells
pub trait Occupancy {
    fn occupies(&self, pos: Position) -> bool;
}

impl Occupancy for Position {
    fn occupies(&self, pos: Position) -> bool {
        *self == pos
    }
}

impl Occupancy for HashSet<Position> {
    fn occupies(&self, pos: Position) -> bool {
        self.contains(&pos)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current heading
    pub direction: Direction,
}

impl Snake {
    /// A straight snake of `length` cells trailing behind `head`, wrapped onto the grid
    pub fn new(
        head: Position,
        direction: Direction,
        length: usize,
        width: usize,
        height: usize,
    ) -> Self {
        let back = direction.opposite();
        let mut body = Vec::with_capacity(length);
        body.push(head);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.stepped(back, width, height));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one cell");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (never true for a constructed snake)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    pub fn push_head(&mut self, new_head: Position) {
        self.body.insert(0, new_head);
    }

    /// Remove the last segment; the head is never removed
    pub fn drop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop();
        }
    }
}

impl Occupancy for Snake {
    fn occupies(&self, pos: Position) -> bool {
        self.contains(pos)
    }
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head ran into the snake's own body
    SelfCollision,
    /// Head ran into an obstacle
    Obstacle,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub obstacles: HashSet<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub initial_length: usize,
    /// Segments still owed from food already eaten
    pub pending_growth: u32,
    /// Seconds between moves
    pub move_interval: f64,
    /// Ticks survived in the current run
    pub steps: u32,
    /// Food eaten in the current run
    pub food_eaten: u32,
    /// Terminal collisions since the engine was created
    pub resets: u32,
}

impl GameState {
    /// Fresh state for `snake` and `food` on the grid described by `config`
    pub fn new(config: &GameConfig, snake: Snake, food: Position) -> Self {
        Self {
            snake,
            food,
            obstacles: HashSet::new(),
            grid_width: config.grid_width,
            grid_height: config.grid_height,
            initial_length: config.initial_snake_length,
            pending_growth: 0,
            move_interval: config.base_move_interval,
            steps: 0,
            food_eaten: 0,
            resets: 0,
        }
    }

    /// Turn toward `direction` on the next step
    ///
    /// A request for the exact opposite of the current heading is ignored and
    /// returns `false`.
    pub fn apply_input(&mut self, direction: Direction) -> bool {
        if self.snake.direction.is_opposite(direction) {
            return false;
        }
        self.snake.direction = direction;
        true
    }

    pub fn score(&self) -> usize {
        self.snake.len().saturating_sub(self.initial_length)
    }

    pub fn move_interval(&self) -> Duration {
        Duration::from_secs_f64(self.move_interval)
    }

    /// Check if a position is occupied by the snake or an obstacle
    pub fn is_blocked(&self, pos: Position) -> bool {
        self.snake.contains(pos) || self.obstacles.contains(&pos)
    }

    /// Read-only view for drawing
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            snake: &self.snake.body,
            food: self.food,
            obstacles: &self.obstacles,
            score: self.score(),
            move_interval: self.move_interval(),
            steps: self.steps,
            resets: self.resets,
        }
    }
}

/// Borrowed view of a [`GameState`] handed to renderers
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Head first
    pub snake: &'a [Position],
    pub food: Position,
    pub obstacles: &'a HashSet<Position>,
    pub score: usize,
    pub move_interval: Duration,
    pub steps: u32,
    pub resets: u32,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Position {
        self.snake[0]
    }
}
