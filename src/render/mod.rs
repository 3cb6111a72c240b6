//! Terminal drawing
//!
//! The renderer gets a read-only [`FrameView`] snapshot each frame and
//! never touches simulation state.

pub mod renderer;

pub use renderer::{FrameView, Renderer};
