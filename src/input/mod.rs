//! Keyboard handling
//!
//! One mapper per screen, so each state only sees the actions that
//! mean something there.

pub mod handler;

pub use handler::{
    AudioAction, GameOverAction, InputHandler, MenuAction, NameAction, PauseAction, PlayAction,
    ScoreViewAction,
};
