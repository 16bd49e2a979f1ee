//! Terminal front end for blockfall.
//!
//! [`GameView`] draws a [`GameSnapshot`](blockfall_core::GameSnapshot) into a
//! [`FrameBuffer`] without doing any I/O, and [`TerminalRenderer`] puts
//! framebuffers on screen, sending only what changed since the last frame.
//! Board cells are two columns wide so they look square in most fonts.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, RecordsView, Viewport};
pub use renderer::{encode_frame, FrameStats, TerminalRenderer};
