use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

use crate::game::{GameEngine, GameState, MoveTimer};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Frames are sampled at roughly 60 Hz; moves happen on the game's own cadence
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    timer: MoveTimer,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Self {
        let state = engine.reset();

        Self {
            engine,
            state,
            timer: MoveTimer::new(),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        info!(
            width = self.state.grid_width,
            height = self.state.grid_height,
            seed = self.engine.seed(),
            "starting interactive game"
        );

        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_game_loop(&mut terminal).await;

        // Restore the terminal even when the loop failed
        self.cleanup_terminal(&mut terminal)?;

        info!(
            best_score = self.metrics.best_score,
            runs = self.metrics.runs_finished,
            "session over"
        );
        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut frame_timer = interval(FRAME_INTERVAL);
        frame_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut last_frame = Instant::now();

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = frame_timer.tick() => {
                    let now = Instant::now();
                    self.advance_clock(now - last_frame);
                    last_frame = now;

                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state.snapshot(), &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => {
                if !self.state.apply_input(direction) {
                    debug!(?direction, "reversal ignored");
                }
            }
            KeyAction::Restart => self.restart(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    /// Feed frame time to the move timer and step when a move is due
    fn advance_clock(&mut self, elapsed: Duration) {
        if self.timer.advance(elapsed, self.state.move_interval()) {
            self.tick();
        }
    }

    fn tick(&mut self) {
        let score_before = self.state.score();
        let result = self.engine.step(&mut self.state);

        if result.reset.is_some() {
            self.metrics.on_run_end(score_before);
            self.renderer.reset_body_color();
        } else if result.ate_food {
            self.renderer.next_body_color();
        }
    }

    fn restart(&mut self) {
        self.metrics.on_run_end(self.state.score());
        self.engine.reset_state(&mut self.state);
        self.renderer.reset_body_color();
        self.timer.clear();
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
