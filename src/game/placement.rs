//! Random free-cell selection with a bounded number of draws
//!
//! Food and obstacles use the same search but react differently when it gives
//! up: food falls back to the last candidate drawn, an obstacle is skipped.

use tracing::debug;

use super::rng::GameRng;
use super::state::{Occupancy, Position};

/// Outcome of a bounded search for a free cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Free(Position),
    /// Every draw landed on an occupied cell; `last` is the final candidate
    Exhausted { last: Position },
}

#[derive(Debug, Clone, Copy)]
pub struct PlacementPolicy {
    pub grid_width: usize,
    pub grid_height: usize,
    pub max_attempts: u32,
}

impl PlacementPolicy {
    pub fn new(grid_width: usize, grid_height: usize, max_attempts: u32) -> Self {
        Self {
            grid_width,
            grid_height,
            max_attempts,
        }
    }

    fn random_cell(&self, rng: &mut GameRng) -> Position {
        let x = rng.gen_range(0..self.grid_width) as i32;
        let y = rng.gen_range(0..self.grid_height) as i32;
        Position::new(x, y)
    }

    /// Draw uniform cells until one is outside every set in `avoid`
    pub fn pick_free_cell(&self, rng: &mut GameRng, avoid: &[&dyn Occupancy]) -> Placement {
        let mut candidate = self.random_cell(rng);
        let mut attempts = 1;

        while avoid.iter().any(|set| set.occupies(candidate)) {
            if attempts >= self.max_attempts {
                return Placement::Exhausted { last: candidate };
            }
            candidate = self.random_cell(rng);
            attempts += 1;
        }

        Placement::Free(candidate)
    }

    /// Food always lands somewhere, even on a saturated grid
    pub fn place_food(&self, rng: &mut GameRng, avoid: &[&dyn Occupancy]) -> Position {
        match self.pick_free_cell(rng, avoid) {
            Placement::Free(pos) => pos,
            Placement::Exhausted { last } => {
                debug!(
                    x = last.x,
                    y = last.y,
                    attempts = self.max_attempts,
                    "no free cell for food, using last candidate"
                );
                last
            }
        }
    }

    /// `None` when no free cell turned up; the spawn is simply dropped
    pub fn place_obstacle(&self, rng: &mut GameRng, avoid: &[&dyn Occupancy]) -> Option<Position> {
        match self.pick_free_cell(rng, avoid) {
            Placement::Free(pos) => Some(pos),
            Placement::Exhausted { .. } => {
                debug!(attempts = self.max_attempts, "no free cell for obstacle, skipping");
                None
            }
        }
    }
}
