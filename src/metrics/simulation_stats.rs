//! Aggregate counters for headless runs
//!
//! Collects what happened over many ticks so seeds and config tweaks can be
//! compared without watching the board.

use std::collections::VecDeque;
use std::time::Duration;

use crate::game::StepResult;

/// Simulation statistics with a rolling window over finished runs
///
/// # Example
///
/// ```rust
/// use toroid_snake::metrics::SimulationStats;
///
/// let mut stats = SimulationStats::new(10);
/// stats.record_run(120, 4);
/// stats.record_run(80, 2);
///
/// assert_eq!(stats.runs_finished(), 2);
/// assert_eq!(stats.mean_run_score(), 3.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulationStats {
    run_lengths: VecDeque<u32>,
    run_scores: VecDeque<usize>,
    window_size: usize,

    ticks: u64,
    food_eaten: u64,
    /// Food events whose obstacle roll succeeded
    spawn_events: u64,
    obstacles_placed: u64,
    runs_finished: u64,
    longest_snake: usize,
    fastest_interval: Option<Duration>,
}

impl SimulationStats {
    pub fn new(window_size: usize) -> Self {
        Self {
            run_lengths: VecDeque::with_capacity(window_size),
            run_scores: VecDeque::with_capacity(window_size),
            window_size,
            ticks: 0,
            food_eaten: 0,
            spawn_events: 0,
            obstacles_placed: 0,
            runs_finished: 0,
            longest_snake: 0,
            fastest_interval: None,
        }
    }

    /// Fold in one tick
    ///
    /// `snake_len` and `interval` are read after the step, so a reset tick
    /// reports the fresh snake.
    pub fn record_tick(&mut self, result: &StepResult, snake_len: usize, interval: Duration) {
        self.ticks += 1;

        if result.ate_food {
            self.food_eaten += 1;
        }
        if result.obstacle_roll {
            self.spawn_events += 1;
        }
        self.obstacles_placed += u64::from(result.obstacles_spawned);

        self.longest_snake = self.longest_snake.max(snake_len);
        self.fastest_interval = Some(match self.fastest_interval {
            Some(fastest) => fastest.min(interval),
            None => interval,
        });
    }

    /// A run ended after `steps` ticks with `score`
    pub fn record_run(&mut self, steps: u32, score: usize) {
        Self::push_deque(&mut self.run_lengths, steps, self.window_size);
        Self::push_deque(&mut self.run_scores, score, self.window_size);
        self.runs_finished += 1;
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn food_eaten(&self) -> u64 {
        self.food_eaten
    }

    pub fn runs_finished(&self) -> u64 {
        self.runs_finished
    }

    pub fn longest_snake(&self) -> usize {
        self.longest_snake
    }

    pub fn obstacles_placed(&self) -> u64 {
        self.obstacles_placed
    }

    pub fn fastest_interval(&self) -> Option<Duration> {
        self.fastest_interval
    }

    /// Fraction of food events whose obstacle roll succeeded
    pub fn spawn_rate(&self) -> f64 {
        if self.food_eaten == 0 {
            return 0.0;
        }
        self.spawn_events as f64 / self.food_eaten as f64
    }

    pub fn mean_run_length(&self) -> f64 {
        Self::mean(self.run_lengths.iter().map(|&n| n as f64))
    }

    pub fn mean_run_score(&self) -> f64 {
        Self::mean(self.run_scores.iter().map(|&n| n as f64))
    }

    pub fn format_summary(&self) -> String {
        let fastest = self
            .fastest_interval
            .map(|d| format!("{}ms", d.as_millis()))
            .unwrap_or_else(|| "-".to_string());

        format!(
            "ticks: {} | food: {} | runs: {} | mean score: {:.2} | mean length: {:.1} | \
             longest: {} | spawn rate: {:.3} | obstacles: {} | fastest: {}",
            self.ticks,
            self.food_eaten,
            self.runs_finished,
            self.mean_run_score(),
            self.mean_run_length(),
            self.longest_snake,
            self.spawn_rate(),
            self.obstacles_placed,
            fastest,
        )
    }

    fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
        let len = values.len();
        if len == 0 {
            return 0.0;
        }
        values.sum::<f64>() / len as f64
    }

    fn push_deque<T>(deque: &mut VecDeque<T>, value: T, window_size: usize) {
        if deque.len() >= window_size {
            deque.pop_front();
        }
        deque.push_back(value);
    }
}
