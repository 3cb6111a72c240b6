use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::state::{AppState, FinishedSession, NameEntry};
use crate::audio::AudioMixer;
use crate::game::{Cell, GameConfig, GameOverCause, GameSession};
use crate::metrics::GameMetrics;
use crate::scores::{Leaderboard, MAX_NAME_LEN};

/// Read-only snapshot of everything one frame can show.
pub struct FrameView<'a> {
    pub state: &'a AppState,
    pub board: &'a Leaderboard,
    pub mixer: &'a AudioMixer,
    pub metrics: &'a GameMetrics,
    pub config: &'a GameConfig,
    /// Frame counter since startup, drives the cursor blink.
    pub frame_no: u64,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, view: &FrameView) {
        match view.state {
            AppState::Menu => self.render_menu(frame, view),
            AppState::Playing(session) => self.render_play(frame, view, session, Overlay::None),
            AppState::Paused(session) => self.render_play(frame, view, session, Overlay::Paused),
            AppState::AudioSettings(session) => {
                self.render_play(frame, view, session, Overlay::AudioSettings)
            }
            AppState::GameOver(finished) => self.render_game_over(frame, view, finished),
            AppState::HighScoreEntry(entry) => self.render_name_entry(frame, view, entry),
            AppState::HighScoreView(_) => self.render_high_scores(frame, view),
        }
    }

    fn render_menu(&self, frame: &mut Frame, view: &FrameView) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "S N A K E",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if let Some(best) = view.board.best() {
            lines.push(Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} by {}", best.score, best.name),
                    Style::default().fg(Color::White),
                ),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Enter",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to play", Style::default().fg(Color::Gray)),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Press ", Style::default().fg(Color::Gray)),
            Span::styled(
                "Q",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" to quit", Style::default().fg(Color::Gray)),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Eat food, grow and speed up. Don't bite yourself.",
            Style::default().fg(Color::DarkGray),
        )));

        let menu = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Snake Arcade "),
        );
        frame.render_widget(menu, frame.area());
    }

    fn render_play(
        &self,
        frame: &mut Frame,
        view: &FrameView,
        session: &GameSession,
        overlay: Overlay,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(2), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(view, session), chunks[0]);

        // The grid draws two characters per cell plus the border.
        let grid_rect = centered_rect(
            chunks[1],
            session.grid.width() as u16 * 2 + 2,
            session.grid.height() as u16 + 2,
        );
        frame.render_widget(self.render_grid(session), grid_rect);

        frame.render_widget(self.render_controls(view, session), chunks[2]);

        match overlay {
            Overlay::None => {}
            Overlay::Paused => self.render_pause_overlay(frame, chunks[1]),
            Overlay::AudioSettings => self.render_audio_overlay(frame, view, chunks[1]),
        }
    }

    fn render_grid(&self, session: &GameSession) -> Paragraph<'_> {
        let head = session.snake.head();
        let mut lines = Vec::with_capacity(session.grid.height() as usize);

        for y in 0..session.grid.height() {
            let mut spans = Vec::with_capacity(session.grid.width() as usize);

            for x in 0..session.grid.width() {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if session.snake.occupies(cell) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if cell == session.food {
                    Span::styled(
                        "O ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, view: &FrameView, session: &GameSession) -> Paragraph<'_> {
        let audio = if !view.mixer.has_device() {
            Span::styled("n/a", Style::default().fg(Color::DarkGray))
        } else if view.mixer.is_muted() {
            Span::styled("off", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled("on", Style::default().fg(Color::White))
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Level: ", Style::default().fg(Color::Yellow)),
            Span::styled(session.level.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(view.metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Sound: ", Style::default().fg(Color::Yellow)),
            audio,
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_controls(&self, view: &FrameView, session: &GameSession) -> Paragraph<'_> {
        let curve = &view.config.curve;
        let speed = if curve.tick_interval(session.score) <= curve.min_interval {
            "maximum speed".to_string()
        } else {
            let threshold = curve.level_threshold.max(1);
            format!("speed up in {} pts", threshold - session.score % threshold)
        };

        let text = vec![
            Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("M", Style::default().fg(Color::Cyan)),
                Span::raw(" audio | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
            Line::from(Span::styled(speed, Style::default().fg(Color::DarkGray))),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_pause_overlay(&self, frame: &mut Frame, area: Rect) {
        let rect = centered_rect(area, 30, 5);
        frame.render_widget(Clear, rect);

        let text = vec![
            Line::from(Span::styled(
                "PAUSED",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Space to resume",
                Style::default().fg(Color::Gray),
            )),
        ];

        let overlay = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
        frame.render_widget(overlay, rect);
    }

    fn render_audio_overlay(&self, frame: &mut Frame, view: &FrameView, area: Rect) {
        let rect = centered_rect(area, 46, 9);
        frame.render_widget(Clear, rect);

        let mixer = view.mixer;
        let status = if !mixer.has_device() {
            Span::styled("no audio device", Style::default().fg(Color::DarkGray))
        } else if mixer.is_muted() {
            Span::styled("OFF", Style::default().fg(Color::Red))
        } else {
            Span::styled("ON", Style::default().fg(Color::Green))
        };

        let text = vec![
            Line::from(vec![
                Span::styled("Sound: ", Style::default().fg(Color::Yellow)),
                status,
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Music   ", Style::default().fg(Color::Yellow)),
                Span::raw(volume_bar(mixer.music_volume())),
                Span::raw(format!(" {:.1}", mixer.music_volume())),
            ]),
            Line::from(vec![
                Span::styled("Effects ", Style::default().fg(Color::Yellow)),
                Span::raw(volume_bar(mixer.effects_volume())),
                Span::raw(format!(" {:.1}", mixer.effects_volume())),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "S sound | ↑↓ music | Shift+↑↓ effects | M close",
                Style::default().fg(Color::Gray),
            )),
        ];

        let overlay = Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Audio Settings "),
        );
        frame.render_widget(overlay, rect);
    }

    fn render_game_over(&self, frame: &mut Frame, view: &FrameView, finished: &FinishedSession) {
        let (title, reason, color) = match finished.cause {
            GameOverCause::WallCollision => ("GAME OVER", "You hit the wall.", Color::Red),
            GameOverCause::SelfCollision => ("GAME OVER", "You ran into yourself.", Color::Red),
            GameOverCause::GridFull => {
                ("YOU WIN!", "The snake filled the whole board.", Color::Green)
            }
        };

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                title,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    finished.session.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        if let Some(best) = view.board.best() {
            lines.push(Line::from(vec![
                Span::styled("Top score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    format!("{} by {}", best.score, best.name),
                    Style::default().fg(Color::White),
                ),
            ]));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("Space", Style::default().fg(Color::Green)),
            Span::styled(" menu | ", Style::default().fg(Color::Gray)),
            Span::styled("H", Style::default().fg(Color::Cyan)),
            Span::styled(" high scores | ", Style::default().fg(Color::Gray)),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::styled(" quit", Style::default().fg(Color::Gray)),
        ]));

        let screen = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        );
        frame.render_widget(screen, frame.area());
    }

    fn render_name_entry(&self, frame: &mut Frame, view: &FrameView, entry: &NameEntry) {
        // Block cursor flips roughly twice a second at the frame rate.
        let cursor = if (view.frame_no / 15) % 2 == 0 { "█" } else { " " };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "NEW HIGH SCORE!",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    entry.finished.session.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "Enter your name:",
                Style::default().fg(Color::Gray),
            )),
            Line::from(vec![
                Span::styled(
                    entry.buffer.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(cursor, Style::default().fg(Color::White)),
            ]),
            Line::from(Span::styled(
                format!("{}/{}", entry.buffer.chars().count(), MAX_NAME_LEN),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::styled(" confirm | ", Style::default().fg(Color::Gray)),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::styled(" skip", Style::default().fg(Color::Gray)),
            ]),
        ];

        let screen = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Well Played "),
        );
        frame.render_widget(screen, frame.area());
    }

    fn render_high_scores(&self, frame: &mut Frame, view: &FrameView) {
        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "HIGH SCORES",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
        ];

        if view.board.is_empty() {
            lines.push(Line::from(Span::styled(
                "No scores yet.",
                Style::default().fg(Color::Gray),
            )));
        } else {
            for (rank, entry) in view.board.entries().iter().enumerate() {
                let style = match rank {
                    0 => Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                    1 => Style::default().fg(Color::White),
                    2 => Style::default().fg(Color::LightRed),
                    _ => Style::default().fg(Color::Gray),
                };
                lines.push(Line::from(Span::styled(
                    format!(
                        "{}. {:>6}  {:<12}  {}",
                        rank + 1,
                        entry.score,
                        entry.name,
                        entry.date
                    ),
                    style,
                )));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("H", Style::default().fg(Color::Cyan)),
            Span::styled(" back", Style::default().fg(Color::Gray)),
        ]));

        let screen = Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .title(" Leaderboard "),
        );
        frame.render_widget(screen, frame.area());
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

enum Overlay {
    None,
    Paused,
    AudioSettings,
}

/// A `width` x `height` rect centered in `area`, clamped to fit.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Ten-step meter, filled in proportion to `volume`.
fn volume_bar(volume: f32) -> String {
    let filled = (volume * 10.0).round() as usize;
    let filled = filled.min(10);
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}
