//! Terminal game renderer.
//!
//! Renders into a plain framebuffer (no widget toolkit) that is then flushed
//! to the terminal, two columns per board cell to keep cells roughly square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{FrameLayout, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
