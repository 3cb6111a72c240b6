//! Snake Arcade - classic snake for the terminal
//!
//! This library provides:
//! - Core game rules (game module)
//! - The screen state machine and frame loop (app module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Synthesized sound (audio module)
//! - The persistent top-5 leaderboard (scores module)

pub mod app;
pub mod audio;
pub mod game;
pub mod input;
pub mod metrics;
pub mod render;
pub mod scores;
