use std::time::Duration;

/// Accumulates frame time and says when a move is due
///
/// At most one move fires per call and the remainder is discarded, so a slow
/// frame never produces a burst of catch-up moves.
#[derive(Debug, Clone, Default)]
pub struct MoveTimer {
    accumulated: Duration,
}

impl MoveTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, elapsed: Duration, interval: Duration) -> bool {
        self.accumulated += elapsed;
        if self.accumulated >= interval {
            self.accumulated = Duration::ZERO;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.accumulated = Duration::ZERO;
    }
}
