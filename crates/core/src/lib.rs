//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the game rules, session state and simulation logic.
//! It performs **no I/O** and knows nothing about terminals or files, making it:
//!
//! - **Deterministic**: The same seed produces identical games
//! - **Testable**: Every rule is covered by unit tests beside the code
//! - **Portable**: Any host (terminal, test harness, headless simulation) drives it
//!
//! # Module Structure
//!
//! - [`board`]: Fixed-size grid with row removal and line clearing
//! - [`pieces`]: The seven piece definitions and their square matrices
//! - [`tetromino`]: The falling piece (matrix plus board origin)
//! - [`collision`]: Bounds and overlap tests for a piece at an offset
//! - [`rotation`]: Clockwise matrix rotation with ordered wall kicks
//! - [`rng`]: Seeded randomizers (uniform by default, optional 7-bag)
//! - [`scoring`]: Line clear points, drop bonuses, levels and gravity
//! - [`game_state`]: Session state machine tying everything together
//! - [`snapshot`]: Read-only copy of a session for renderers
//! - [`stats`]: End-of-session report
//!
//! # Game Rules
//!
//! - **Randomizer**: Each piece is drawn independently and uniformly
//! - **Rotation**: Clockwise only; kicks tried in order left 1, right 1, up 1, left 2, right 2
//! - **Locking**: Immediate when a downward step is blocked (no lock delay)
//! - **Scoring**: `[0, 40, 100, 300, 1200][lines] * level`, +1 per soft drop row, +2 per hard drop row
//! - **Levels**: `lines / 10 + 1`
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameState;
//! use blockfall_types::GameAction;
//!
//! // Create and start a game
//! let mut game = GameState::with_seed(12345);
//! game.start();
//!
//! // Apply game actions
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! // Check game state
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.pieces_locked(), 1);
//! ```
//!
//! # Timing
//!
//! The engine has no clock of its own. The host calls
//! [`GameState::tick`](game_state::GameState::tick) with the elapsed time:
//! - **Gravity**: 1000ms at level 1, 50ms faster per level, never below 50ms
//! - **Accumulator**: One gravity step when the interval is reached, then reset to zero
//! - **Play time**: Counts only running time; pauses are excluded

pub mod board;
pub mod collision;
pub mod config;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod rotation;
pub mod scoring;
pub mod snapshot;
pub mod stats;
pub mod tetromino;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use collision::{collides, drop_distance};
pub use config::{EngineConfig, GravityConfig};
pub use game_state::GameState;
pub use pieces::{canonical_matrix, definition, random_piece_type, Matrix, PieceDef};
pub use rng::{Randomizer, SimpleRng};
pub use rotation::try_rotate;
pub use scoring::{calculate_drop_score, calculate_score, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot, NextSnapshot};
pub use stats::{format_play_time, GameOverReport};
pub use tetromino::Tetromino;
