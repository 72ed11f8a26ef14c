pub mod game_metrics;
pub mod simulation_stats;

pub use game_metrics::GameMetrics;
pub use simulation_stats::SimulationStats;
