use std::time::Duration;

use crossterm::event::KeyEvent;
use log::info;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::audio::{AudioEvent, AudioMixer, VOLUME_STEP};
use crate::game::{GameConfig, GameEngine, GameOverCause, GameSession};
use crate::input::{
    AudioAction, GameOverAction, InputHandler, MenuAction, NameAction, PauseAction, PlayAction,
    ScoreViewAction,
};
use crate::metrics::GameMetrics;
use crate::scores::{self, HighScoreStore, Leaderboard, NameError};

/// A finished run, kept around for the game over screens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSession {
    pub session: GameSession,
    pub cause: GameOverCause,
}

/// Name entry in progress for a score that made the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    pub finished: FinishedSession,
    pub buffer: String,
}

/// The screens of the game. Each variant owns what its screen shows,
/// so a session outlives play exactly as long as something displays it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppState {
    #[default]
    Menu,
    Playing(GameSession),
    Paused(GameSession),
    AudioSettings(GameSession),
    GameOver(FinishedSession),
    HighScoreEntry(NameEntry),
    HighScoreView(FinishedSession),
}

/// Side effects one dispatch asks the caller to perform.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Effects {
    /// Audio cues raised, in order.
    pub events: Vec<AudioEvent>,
    /// The player asked to leave the game.
    pub quit: bool,
}

/// The state machine. Owns the current screen and everything the
/// screens act on: the engine, the leaderboard and its store, the
/// audio mixer and the session metrics.
pub struct Machine<R: Rng = ThreadRng> {
    state: AppState,
    engine: GameEngine<R>,
    input: InputHandler,
    leaderboard: Leaderboard,
    store: HighScoreStore,
    mixer: AudioMixer,
    metrics: GameMetrics,
}

impl Machine {
    pub fn new(config: GameConfig, store: HighScoreStore, mixer: AudioMixer) -> Self {
        Self::with_engine(GameEngine::new(config), store, mixer)
    }
}

impl<R: Rng> Machine<R> {
    pub fn with_engine(engine: GameEngine<R>, store: HighScoreStore, mixer: AudioMixer) -> Self {
        let leaderboard = store.load();
        info!(
            "loaded {} high score entries from {}",
            leaderboard.len(),
            store.path().display()
        );

        Self {
            state: AppState::Menu,
            engine,
            input: InputHandler::new(),
            leaderboard,
            store,
            mixer,
            metrics: GameMetrics::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn mixer(&self) -> &AudioMixer {
        &self.mixer
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &GameConfig {
        self.engine.config()
    }

    /// Refresh the wall-clock metrics, once per rendered frame.
    pub fn update_metrics(&mut self) {
        self.metrics.update();
    }

    /// Interval between simulation ticks for the current screen. Menus
    /// run at the relaxed initial rate; live sessions follow the curve.
    pub fn tick_interval(&self) -> Duration {
        let score = match &self.state {
            AppState::Playing(session)
            | AppState::Paused(session)
            | AppState::AudioSettings(session) => session.score,
            _ => 0,
        };
        self.engine.config().curve.tick_interval(score)
    }

    /// Send this dispatch's audio cues to the mixer.
    pub fn play(&self, fx: &Effects) {
        for event in &fx.events {
            self.mixer.play(*event);
        }
    }

    /// One simulation tick. Only the Playing screen advances; every
    /// other screen leaves the tick on the floor.
    pub fn advance_tick(&mut self) -> Effects {
        let mut fx = Effects::default();

        match std::mem::take(&mut self.state) {
            AppState::Playing(mut session) => {
                let result = self.engine.step(&mut session);
                if result.ate_food {
                    fx.events.push(AudioEvent::FoodEaten);
                }
                if result.leveled_up {
                    info!("level {} reached at {} points", session.level, session.score);
                    fx.events.push(AudioEvent::LevelUp);
                }
                self.state = match result.ended {
                    Some(cause) => self.finish_session(session, cause, &mut fx),
                    None => AppState::Playing(session),
                };
            }
            other => self.state = other,
        }

        fx
    }

    /// Key dispatch for the active screen.
    pub fn handle_key(&mut self, key: KeyEvent) -> Effects {
        let mut fx = Effects::default();

        self.state = match std::mem::take(&mut self.state) {
            AppState::Menu => self.on_menu(key, &mut fx),
            AppState::Playing(session) => self.on_playing(session, key, &mut fx),
            AppState::Paused(session) => self.on_paused(session, key, &mut fx),
            AppState::AudioSettings(session) => self.on_audio_settings(session, key, &mut fx),
            AppState::GameOver(finished) => self.on_game_over(finished, key, &mut fx),
            AppState::HighScoreEntry(entry) => self.on_name_entry(entry, key, &mut fx),
            AppState::HighScoreView(finished) => self.on_score_view(finished, key, &mut fx),
        };

        fx
    }

    fn on_menu(&mut self, key: KeyEvent, fx: &mut Effects) -> AppState {
        match self.input.menu_action(key) {
            Some(MenuAction::Start) => self.start_session(),
            Some(MenuAction::Quit) => {
                fx.quit = true;
                AppState::Menu
            }
            None => AppState::Menu,
        }
    }

    fn on_playing(&mut self, mut session: GameSession, key: KeyEvent, fx: &mut Effects) -> AppState {
        match self.input.play_action(key) {
            Some(PlayAction::Steer(direction)) => {
                session.snake.buffer_turn(direction);
                AppState::Playing(session)
            }
            Some(PlayAction::Pause) => AppState::Paused(session),
            Some(PlayAction::AudioSettings) => AppState::AudioSettings(session),
            Some(PlayAction::Quit) => {
                fx.quit = true;
                AppState::Playing(session)
            }
            None => AppState::Playing(session),
        }
    }

    fn on_paused(&mut self, session: GameSession, key: KeyEvent, fx: &mut Effects) -> AppState {
        match self.input.pause_action(key) {
            Some(PauseAction::Resume) => AppState::Playing(session),
            Some(PauseAction::Quit) => {
                fx.quit = true;
                AppState::Paused(session)
            }
            None => AppState::Paused(session),
        }
    }

    fn on_audio_settings(
        &mut self,
        session: GameSession,
        key: KeyEvent,
        fx: &mut Effects,
    ) -> AppState {
        match self.input.audio_action(key) {
            Some(AudioAction::ToggleMute) => {
                self.mixer.toggle_mute();
                AppState::AudioSettings(session)
            }
            Some(AudioAction::MusicUp) => {
                self.mixer.adjust_music_volume(VOLUME_STEP);
                AppState::AudioSettings(session)
            }
            Some(AudioAction::MusicDown) => {
                self.mixer.adjust_music_volume(-VOLUME_STEP);
                AppState::AudioSettings(session)
            }
            Some(AudioAction::EffectsUp) => {
                self.mixer.adjust_effects_volume(VOLUME_STEP);
                AppState::AudioSettings(session)
            }
            Some(AudioAction::EffectsDown) => {
                self.mixer.adjust_effects_volume(-VOLUME_STEP);
                AppState::AudioSettings(session)
            }
            Some(AudioAction::Close) => AppState::Playing(session),
            Some(AudioAction::Quit) => {
                fx.quit = true;
                AppState::AudioSettings(session)
            }
            None => AppState::AudioSettings(session),
        }
    }

    fn on_game_over(
        &mut self,
        finished: FinishedSession,
        key: KeyEvent,
        fx: &mut Effects,
    ) -> AppState {
        match self.input.game_over_action(key) {
            Some(GameOverAction::ToMenu) => AppState::Menu,
            Some(GameOverAction::ViewScores) => AppState::HighScoreView(finished),
            Some(GameOverAction::Quit) => {
                fx.quit = true;
                AppState::GameOver(finished)
            }
            None => AppState::GameOver(finished),
        }
    }

    fn on_score_view(
        &mut self,
        finished: FinishedSession,
        key: KeyEvent,
        fx: &mut Effects,
    ) -> AppState {
        match self.input.score_view_action(key) {
            Some(ScoreViewAction::Back) => AppState::GameOver(finished),
            Some(ScoreViewAction::Quit) => {
                fx.quit = true;
                AppState::HighScoreView(finished)
            }
            None => AppState::HighScoreView(finished),
        }
    }

    fn on_name_entry(&mut self, mut entry: NameEntry, key: KeyEvent, fx: &mut Effects) -> AppState {
        match self.input.name_action(key) {
            Some(NameAction::Push(c)) => {
                if entry.buffer.chars().count() < scores::MAX_NAME_LEN {
                    entry.buffer.push(c);
                }
                AppState::HighScoreEntry(entry)
            }
            Some(NameAction::Backspace) => {
                entry.buffer.pop();
                AppState::HighScoreEntry(entry)
            }
            Some(NameAction::Submit) => self.submit_score(entry),
            Some(NameAction::Cancel) => {
                entry.buffer.clear();
                self.submit_score(entry)
            }
            Some(NameAction::Quit) => {
                // Record the score before honoring the quit so it is
                // never lost to an impatient Ctrl+C.
                let next = self.submit_score(entry);
                fx.quit = true;
                next
            }
            None => AppState::HighScoreEntry(entry),
        }
    }

    fn start_session(&mut self) -> AppState {
        let session = self.engine.new_session();
        self.metrics.on_game_start();
        info!(
            "session started on a {}x{} grid",
            session.grid.width(),
            session.grid.height()
        );
        AppState::Playing(session)
    }

    /// Close out a finished run: count it, raise the cues, and decide
    /// between the game over screen and name entry for the board.
    fn finish_session(
        &mut self,
        session: GameSession,
        cause: GameOverCause,
        fx: &mut Effects,
    ) -> AppState {
        self.metrics.on_game_over();
        info!("session over: {:?} with {} points", cause, session.score);
        fx.events.push(AudioEvent::GameOver);

        let finished = FinishedSession { session, cause };
        if self.leaderboard.qualifies(finished.session.score) {
            fx.events.push(AudioEvent::NewHighScore);
            AppState::HighScoreEntry(NameEntry {
                finished,
                buffer: String::new(),
            })
        } else {
            AppState::GameOver(finished)
        }
    }

    fn submit_score(&mut self, entry: NameEntry) -> AppState {
        let trimmed = entry.buffer.trim();
        let name = match scores::validate_name(trimmed) {
            Ok(()) => trimmed,
            Err(NameError::Empty) => scores::DEFAULT_NAME,
            // The key handler caps the buffer, but a too-long name is
            // re-prompted rather than truncated behind the player.
            Err(NameError::TooLong) => return AppState::HighScoreEntry(entry),
        };

        let record = scores::HighScoreEntry::now(name, entry.finished.session.score);
        info!("leaderboard entry: {} points by {}", record.score, record.name);
        if self.leaderboard.insert(record) {
            self.store.persist(&self.leaderboard);
        }

        AppState::Menu
    }
}
