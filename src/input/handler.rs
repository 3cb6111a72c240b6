use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Direction;

/// Inputs understood on the menu screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Start,
    Quit,
}

/// Inputs understood while the simulation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayAction {
    Steer(Direction),
    Pause,
    AudioSettings,
    Quit,
}

/// Inputs understood while paused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseAction {
    Resume,
    Quit,
}

/// Inputs understood on the audio settings screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioAction {
    ToggleMute,
    MusicUp,
    MusicDown,
    EffectsUp,
    EffectsDown,
    Close,
    Quit,
}

/// Inputs understood on the game over screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverAction {
    ToMenu,
    ViewScores,
    Quit,
}

/// Inputs understood while the leaderboard is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreViewAction {
    Back,
    Quit,
}

/// Inputs understood while typing a name for the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameAction {
    Push(char),
    Backspace,
    Submit,
    /// Give up typing; the score is recorded under the default name.
    Cancel,
    Quit,
}

/// Maps raw key events to per-screen actions. Purely a lookup; all
/// state lives in the state machine.
pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn menu_action(&self, key: KeyEvent) -> Option<MenuAction> {
        if is_ctrl_c(key) {
            return Some(MenuAction::Quit);
        }
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Some(MenuAction::Start),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(MenuAction::Quit),
            _ => None,
        }
    }

    pub fn play_action(&self, key: KeyEvent) -> Option<PlayAction> {
        if is_ctrl_c(key) {
            return Some(PlayAction::Quit);
        }
        match key.code {
            // Arrow keys
            KeyCode::Up => Some(PlayAction::Steer(Direction::Up)),
            KeyCode::Down => Some(PlayAction::Steer(Direction::Down)),
            KeyCode::Left => Some(PlayAction::Steer(Direction::Left)),
            KeyCode::Right => Some(PlayAction::Steer(Direction::Right)),

            // WASD
            KeyCode::Char('w') | KeyCode::Char('W') => Some(PlayAction::Steer(Direction::Up)),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(PlayAction::Steer(Direction::Down)),
            KeyCode::Char('a') | KeyCode::Char('A') => Some(PlayAction::Steer(Direction::Left)),
            KeyCode::Char('d') | KeyCode::Char('D') => Some(PlayAction::Steer(Direction::Right)),

            KeyCode::Char(' ') => Some(PlayAction::Pause),
            KeyCode::Char('m') | KeyCode::Char('M') => Some(PlayAction::AudioSettings),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(PlayAction::Quit),
            _ => None,
        }
    }

    pub fn pause_action(&self, key: KeyEvent) -> Option<PauseAction> {
        if is_ctrl_c(key) {
            return Some(PauseAction::Quit);
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(PauseAction::Resume),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(PauseAction::Quit),
            _ => None,
        }
    }

    pub fn audio_action(&self, key: KeyEvent) -> Option<AudioAction> {
        if is_ctrl_c(key) {
            return Some(AudioAction::Quit);
        }
        let shifted = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Up if shifted => Some(AudioAction::EffectsUp),
            KeyCode::Down if shifted => Some(AudioAction::EffectsDown),
            KeyCode::Up => Some(AudioAction::MusicUp),
            KeyCode::Down => Some(AudioAction::MusicDown),
            KeyCode::Char('s') | KeyCode::Char('S') => Some(AudioAction::ToggleMute),
            KeyCode::Char('m') | KeyCode::Char('M') | KeyCode::Esc | KeyCode::Enter => {
                Some(AudioAction::Close)
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(AudioAction::Quit),
            _ => None,
        }
    }

    pub fn game_over_action(&self, key: KeyEvent) -> Option<GameOverAction> {
        if is_ctrl_c(key) {
            return Some(GameOverAction::Quit);
        }
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => Some(GameOverAction::ToMenu),
            KeyCode::Char('h') | KeyCode::Char('H') => Some(GameOverAction::ViewScores),
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(GameOverAction::Quit),
            _ => None,
        }
    }

    pub fn score_view_action(&self, key: KeyEvent) -> Option<ScoreViewAction> {
        if is_ctrl_c(key) {
            return Some(ScoreViewAction::Quit);
        }
        match key.code {
            KeyCode::Char('h')
            | KeyCode::Char('H')
            | KeyCode::Char(' ')
            | KeyCode::Enter
            | KeyCode::Esc => Some(ScoreViewAction::Back),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(ScoreViewAction::Quit),
            _ => None,
        }
    }

    pub fn name_action(&self, key: KeyEvent) -> Option<NameAction> {
        if is_ctrl_c(key) {
            return Some(NameAction::Quit);
        }
        match key.code {
            KeyCode::Enter => Some(NameAction::Submit),
            KeyCode::Backspace => Some(NameAction::Backspace),
            KeyCode::Esc => Some(NameAction::Cancel),
            KeyCode::Char(c) if !c.is_control() => Some(NameAction::Push(c)),
            _ => None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn is_ctrl_c(key: KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}
