use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io::{stderr, Stderr},
    thread,
    time::Duration,
};

use crate::game::{FieldState, Position};

/// Delay after each frame so a run is watchable
const FRAME_DELAY: Duration = Duration::from_millis(125);

/// Terminal backend drawing the field to the alternate screen
pub struct TuiRenderer {
    terminal: Terminal<CrosstermBackend<Stderr>>,
}

impl TuiRenderer {
    pub fn new() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        Ok(Self { terminal })
    }
}

impl super::Render for TuiRenderer {
    fn draw(&mut self, field: &FieldState, points: u32, step_n: u32) -> Result<()> {
        self.terminal
            .draw(|frame| render_frame(frame, field, points, step_n))
            .context("Failed to draw frame")?;

        thread::sleep(FRAME_DELAY);
        Ok(())
    }
}

impl Drop for TuiRenderer {
    fn drop(&mut self) {
        // Terminal restoration failures have no recovery path here
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

fn render_frame(frame: &mut Frame, field: &FieldState, points: u32, step_n: u32) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(0),    // Field area
    ])
    .split(frame.area());

    let stats = stats_line(points, step_n);
    frame.render_widget(stats, chunks[0]);

    // Center the field horizontally
    let field_area = Layout::horizontal([
        Constraint::Percentage(10),
        Constraint::Percentage(80),
        Constraint::Percentage(10),
    ])
    .split(chunks[1])[1];

    if field.alive {
        frame.render_widget(field_grid(field), field_area);
    } else {
        frame.render_widget(game_over(points), field_area);
    }
}

fn stats_line(points: u32, step_n: u32) -> Paragraph<'static> {
    let text = vec![Line::from(vec![
        Span::styled("Points: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            points.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("    "),
        Span::styled("Step: ", Style::default().fg(Color::Yellow)),
        Span::styled(step_n.to_string(), Style::default().fg(Color::White)),
    ])];

    Paragraph::new(text).alignment(Alignment::Center)
}

fn field_grid(field: &FieldState) -> Paragraph<'_> {
    let mut lines = Vec::with_capacity(field.height);

    for y in 0..field.height {
        let mut spans = Vec::with_capacity(field.width);

        for x in 0..field.width {
            let pos = Position::new(x as i32, y as i32);

            let cell = if pos == field.snake.head() {
                Span::styled(
                    "■ ",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
            } else if field.snake.occupies(pos) {
                Span::styled("□ ", Style::default().fg(Color::Green))
            } else if pos == field.apple {
                Span::styled(
                    "O ",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else {
                Span::styled(". ", Style::default().fg(Color::DarkGray))
            };

            spans.push(cell);
        }

        lines.push(Line::from(spans));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Snake "),
        )
        .alignment(Alignment::Center)
}

fn game_over(points: u32) -> Paragraph<'static> {
    let text = vec![
        Line::from(""),
        Line::from(vec![Span::styled(
            "GAME OVER",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Final Points: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                points.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red)),
    )
}
