use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Sparkline},
};

use crate::env::RenderView;
use crate::game::Position;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let mut constraints = vec![
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Board
        ];
        if view.flags.show_history {
            constraints.push(Constraint::Length(8)); // Score overlay
        }
        constraints.push(Constraint::Length(3)); // Footer

        let chunks = Layout::default()
            .direction(LayoutDirection::Vertical)
            .constraints(constraints)
            .split(frame.area());

        frame.render_widget(self.render_header(view), chunks[0]);

        if view.paused {
            frame.render_widget(self.render_paused(), chunks[1]);
        } else if view.alive {
            frame.render_widget(self.render_board(view), chunks[1]);
        } else {
            frame.render_widget(self.render_game_over(view), chunks[1]);
        }

        let mut next = 2;
        if view.flags.show_history {
            self.render_history(frame, view, chunks[next]);
            next += 1;
        }

        frame.render_widget(self.render_controls(), chunks[next]);
    }

    fn render_header(&self, view: &RenderView) -> Paragraph<'_> {
        let mut spans = vec![
            Span::raw(" Score: "),
            Span::styled(
                view.score.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ];

        if view.flags.show_stats {
            let (idx, best) = view.high_score;
            spans.push(Span::raw(format!(
                "  |  Episodes: {}  |  Best in window: {} (#{})",
                view.episodes, best, idx
            )));
        }

        if view.paused {
            spans.push(Span::styled(
                "  PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }

        Paragraph::new(Line::from(spans)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_board(&self, view: &RenderView) -> Paragraph<'_> {
        let cols = view.width / view.cell_size;
        let rows = view.height / view.cell_size;
        let head = view.body.front().copied();

        let mut lines = Vec::with_capacity(rows as usize);
        for y in 0..rows {
            let mut spans = Vec::with_capacity(cols as usize);
            for x in 0..cols {
                let pos = Position::new(x * view.cell_size, y * view.cell_size);

                let cell = if Some(pos) == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if view.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == view.food {
                    Span::styled(
                        "● ",
                        Style::default()
                            .fg(Color::Red)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("· ", Style::default().fg(Color::DarkGray))
                };
                spans.push(cell);
            }
            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .title(" Snake "),
        )
    }

    fn render_history(&self, frame: &mut Frame, view: &RenderView, area: Rect) {
        let data: Vec<u64> = view.history.iter().map(|&s| u64::from(s)).collect();
        let (idx, best) = view.high_score;
        let title = format!(" Scores: best {} @ {}/{} ", best, idx, view.episodes);

        let sparkline = Sparkline::default()
            .block(Block::default().borders(Borders::ALL).title(title))
            .data(&data)
            .style(Style::default().fg(Color::Gray));

        frame.render_widget(sparkline, area);
    }

    fn render_paused(&self) -> Paragraph<'_> {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from("Press SPACE to continue..."),
        ];

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_game_over(&self, view: &RenderView) -> Paragraph<'_> {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "GAME OVER",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(format!("Final score: {}", view.score)),
            Line::from("Press R to restart"),
        ];

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let controls = " SPACE pause | F1/H history | F2/T stats | R restart | Q quit ";
        Paragraph::new(controls)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
