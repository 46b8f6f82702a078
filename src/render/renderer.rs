use ratatui::{
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Direction, GameState, Position};
use crate::metrics::GameMetrics;
use crate::path::Cycle;

/// Box-drawing glyph for a cycle cell with the given two links
pub fn path_glyph(a: Direction, b: Direction) -> char {
    use Direction::*;
    match (a, b) {
        (Up, Down) | (Down, Up) => '│',
        (Left, Right) | (Right, Left) => '─',
        (Up, Right) | (Right, Up) => '└',
        (Right, Down) | (Down, Right) => '┌',
        (Down, Left) | (Left, Down) => '┐',
        (Left, Up) | (Up, Left) => '┘',
        _ => '·',
    }
}

/// What the front end is currently doing, shown in the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewStatus {
    pub paused: bool,
    pub step_ms: u64,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame; `path` is drawn under the snake when present
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        path: Option<&Cycle>,
        metrics: &GameMetrics,
        view: ViewStatus,
    ) {
        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(chunks[0], state, metrics, view);
        frame.render_widget(stats, chunks[0]);

        let game_area = Layout::default()
            .direction(LayoutDirection::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        if state.is_alive {
            let grid = self.render_grid(game_area, state, path);
            frame.render_widget(grid, game_area);
        } else {
            let game_over = self.render_game_over(game_area, state);
            frame.render_widget(game_over, game_area);
        }

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn path_cell(cycle: &Cycle, pos: Position) -> [Span<'static>; 2] {
        let style = Style::default().fg(Color::DarkGray);
        let (back, forward) = cycle.links(pos);
        let joins_right = back == Direction::Right || forward == Direction::Right;
        [
            Span::styled(path_glyph(back, forward).to_string(), style),
            Span::styled(if joins_right { "─" } else { " " }, style),
        ]
    }

    fn render_grid(&self, _area: Rect, state: &GameState, path: Option<&Cycle>) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid.height {
            let mut spans = Vec::new();

            for x in 0..state.grid.width {
                let pos = Position::new(x as i32, y as i32);

                if pos == state.snake.head() {
                    spans.push(Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ));
                } else if state.snake.occupies(pos) {
                    spans.push(Span::styled("□ ", Style::default().fg(Color::Green)));
                } else if state.food == Some(pos) {
                    spans.push(Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    ));
                } else if let Some(cycle) = path {
                    spans.extend(Self::path_cell(cycle, pos));
                } else {
                    spans.push(Span::styled(". ", Style::default().fg(Color::DarkGray)));
                }
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(" Hamiltonian Snake "),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(
        &self,
        _area: Rect,
        state: &GameState,
        metrics: &GameMetrics,
        view: ViewStatus,
    ) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);
        let mut spans = vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value.add_modifier(Modifier::BOLD)),
            Span::raw("    "),
            Span::styled("Length: ", label),
            Span::styled(
                format!("{}/{}", state.snake.len(), state.grid.cell_count()),
                value,
            ),
            Span::raw("    "),
            Span::styled("Ticks: ", label),
            Span::styled(state.ticks.to_string(), value),
            Span::raw("    "),
            Span::styled("Shortcuts: ", label),
            Span::styled(format!("{:.0}%", metrics.shortcut_ratio() * 100.0), value),
            Span::raw("    "),
            Span::styled("Step: ", label),
            Span::styled(format!("{}ms", view.step_ms), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
        ];
        if view.paused {
            spans.push(Span::raw("    "));
            spans.push(Span::styled(
                "PAUSED",
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_game_over(&self, _area: Rect, state: &GameState) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled("  after ", Style::default().fg(Color::Gray)),
                Span::styled(state.ticks.to_string(), Style::default().fg(Color::White)),
                Span::styled(" ticks", Style::default().fg(Color::Gray)),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("P", Style::default().fg(Color::Cyan)),
            Span::raw(" path | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("+/-", Style::default().fg(Color::Cyan)),
            Span::raw(" speed | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
