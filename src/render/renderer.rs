use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Position, Snapshot};
use crate::metrics::GameMetrics;

/// Body colours cycled through as food is eaten
const BODY_PALETTE: [Color; 6] = [
    Color::Green,
    Color::LightGreen,
    Color::Yellow,
    Color::LightBlue,
    Color::Magenta,
    Color::LightCyan,
];

#[derive(Debug, Default)]
pub struct Renderer {
    palette_index: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the snake to the next body colour
    pub fn next_body_color(&mut self) {
        self.palette_index = (self.palette_index + 1) % BODY_PALETTE.len();
    }

    pub fn reset_body_color(&mut self) {
        self.palette_index = 0;
    }

    pub fn body_color(&self) -> Color {
        BODY_PALETTE[self.palette_index]
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot<'_>, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);
        frame.render_widget(self.render_grid(snapshot), chunks[1]);
        frame.render_widget(self.render_controls(), chunks[2]);
    }

    /// One text line per grid row
    pub fn grid_lines(&self, snapshot: &Snapshot<'_>) -> Vec<Line<'static>> {
        let head = snapshot.head();
        let body = Style::default().fg(self.body_color());

        (0..snapshot.grid_height)
            .map(|y| {
                let spans: Vec<Span<'static>> = (0..snapshot.grid_width)
                    .map(|x| {
                        let pos = Position::new(x as i32, y as i32);

                        if pos == head {
                            Span::styled(
                                "■ ",
                                body.add_modifier(Modifier::BOLD | Modifier::REVERSED),
                            )
                        } else if snapshot.snake.contains(&pos) {
                            Span::styled("■ ", body)
                        } else if snapshot.obstacles.contains(&pos) {
                            Span::styled("▓ ", Style::default().fg(Color::Gray))
                        } else if pos == snapshot.food {
                            Span::styled(
                                "● ",
                                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled("· ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn render_grid(&self, snapshot: &Snapshot<'_>) -> Paragraph<'static> {
        Paragraph::new(self.grid_lines(snapshot))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot<'_>, metrics: &GameMetrics) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(snapshot.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(metrics.best_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Obstacles: ", label),
            Span::styled(snapshot.obstacles.len().to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            Span::styled(
                format!("{}ms", snapshot.move_interval.as_millis()),
                value,
            ),
            Span::raw("    "),
            Span::styled("Deaths: ", label),
            Span::styled(snapshot.resets.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self) -> Paragraph<'static> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}
