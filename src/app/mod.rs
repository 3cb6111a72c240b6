//! Application shell
//!
//! Owns the terminal and the frame loop. Simulation ticks and render
//! frames run on independent timers; all game state changes go through
//! the [`state::Machine`].

pub mod state;

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant};

use crate::audio::AudioMixer;
use crate::game::GameConfig;
use crate::render::{FrameView, Renderer};
use crate::scores::HighScoreStore;
use state::Machine;

/// Render cadence, independent of the simulation tick rate.
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct App {
    machine: Machine,
    renderer: Renderer,
    frame_no: u64,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, store: HighScoreStore, mixer: AudioMixer) -> Self {
        Self {
            machine: Machine::new(config, store, mixer),
            renderer: Renderer::new(),
            frame_no: 0,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run the frame loop with cleanup
        let result = self.run_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        info!(
            "exiting after {} game(s)",
            self.machine.metrics().games_played
        );
        result
    }

    async fn run_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_len = self.machine.tick_interval();
        let mut tick_timer = interval(tick_len);
        let mut render_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Simulation tick
                _ = tick_timer.tick() => {
                    let fx = self.machine.advance_tick();
                    self.machine.play(&fx);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.machine.update_metrics();
                    self.frame_no += 1;
                    let view = FrameView {
                        state: self.machine.state(),
                        board: self.machine.leaderboard(),
                        mixer: self.machine.mixer(),
                        metrics: self.machine.metrics(),
                        config: self.machine.config(),
                        frame_no: self.frame_no,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            // Speed changes re-arm the tick timer at the new cadence to
            // avoid the immediate fire of a fresh interval.
            let wanted = self.machine.tick_interval();
            if wanted != tick_len {
                tick_len = wanted;
                tick_timer = interval_at(Instant::now() + wanted, wanted);
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let fx = self.machine.handle_key(key);
            self.machine.play(&fx);
            if fx.quit {
                self.should_quit = true;
            }
        }
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

#[cfg(test)]
mod tests {
    use super::*;
    use state::AppState;
    use tempfile::TempDir;

    #[test]
    fn new_app_starts_on_the_menu() {
        let dir = TempDir::new().unwrap();
        let store = HighScoreStore::new(dir.path().join("scores.json"));
        let app = App::new(GameConfig::small(), store, AudioMixer::disabled());

        assert_eq!(app.machine.state(), &AppState::Menu);
        assert!(!app.should_quit);
        assert_eq!(
            app.machine.tick_interval(),
            app.machine.config().curve.initial_interval
        );
    }
}
