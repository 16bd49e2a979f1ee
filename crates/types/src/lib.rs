//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, stat records).
//!
//! # Board Dimensions
//!
//! The reference playfield:
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! Sessions may use other dimensions; these are only the defaults.
//!
//! # Gravity
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Host frame interval used by the terminal runner |
//! | `INITIAL_DROP_MS` | 1000 | Gravity interval at level 1 |
//! | `DROP_STEP_MS` | 50 | Interval reduction per level |
//! | `MIN_DROP_MS` | 50 | Gravity interval floor |
//!
//! The interval at level `n` is `max(MIN_DROP_MS, INITIAL_DROP_MS - (n - 1) * DROP_STEP_MS)`,
//! so the floor is reached at level 20.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let piece = PieceKind::from_str("t").unwrap();
//! assert_eq!(piece, PieceKind::T);
//! assert_eq!(piece.color().hex(), "#800080");
//!
//! let action = GameAction::from_str("hardDrop").unwrap();
//! assert_eq!(action, GameAction::HardDrop);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Largest board dimension a session accepts (piece coordinates are `i8`).
pub const MAX_BOARD_DIM: u8 = 64;

/// Smallest board dimension a session accepts (fits the 4x4 I matrix).
pub const MIN_BOARD_DIM: u8 = 4;

/// Frame interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const INITIAL_DROP_MS: u32 = 1000;

/// Gravity interval reduction per level gained
pub const DROP_STEP_MS: u32 = 50;

/// Gravity interval floor; speed never reaches zero
pub const MIN_DROP_MS: u32 = 50;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Points per cell for a manual soft drop
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per cell for a hard drop
pub const HARD_DROP_POINTS: u32 = 2;

/// Line clear scoring table, indexed by rows cleared in one lock
///
/// - 0 lines: 0 points
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the (1-based) level in effect when the piece locked.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Wall kick offsets `(dx, dy)` tried in order after a rotation collides:
/// left 1, right 1, up 1, left 2, right 2.
pub const WALL_KICKS: [(i8, i8); 5] = [(-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// The seven tetromino piece kinds
///
/// Each piece has a distinct shape and color:
/// - **I**: Cyan, horizontal bar
/// - **O**: Yellow, 2x2 square
/// - **T**: Purple, T-shaped
/// - **S**: Green, S-shaped
/// - **Z**: Red, Z-shaped (mirror of S)
/// - **J**: Blue, J-shaped
/// - **L**: Orange, L-shaped (mirror of J)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Stable non-zero id, used as the board cell token in snapshots.
    pub fn id(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::O => 2,
            PieceKind::T => 3,
            PieceKind::S => 4,
            PieceKind::Z => 5,
            PieceKind::J => 6,
            PieceKind::L => 7,
        }
    }

    /// Inverse of [`PieceKind::id`]; `0` and unknown ids map to `None`.
    pub fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::I),
            2 => Some(PieceKind::O),
            3 => Some(PieceKind::T),
            4 => Some(PieceKind::S),
            5 => Some(PieceKind::Z),
            6 => Some(PieceKind::J),
            7 => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Display color
    pub fn color(&self) -> Color {
        match self {
            PieceKind::I => Color::new(0x00, 0xf5, 0xff),
            PieceKind::O => Color::new(0xff, 0xff, 0x00),
            PieceKind::T => Color::new(0x80, 0x00, 0x80),
            PieceKind::S => Color::new(0x00, 0xff, 0x00),
            PieceKind::Z => Color::new(0xff, 0x00, 0x00),
            PieceKind::J => Color::new(0x00, 0x00, 0xff),
            PieceKind::L => Color::new(0xff, 0xa5, 0x00),
        }
    }
}

/// 24-bit display color of a piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb` form
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Session lifecycle
///
/// ```text
/// Ready --start--> Running <--pause toggle--> Paused
///                     |
///                     +--blocked spawn--> GameOver
/// any --reset--> Ready
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    /// Board empty, first piece spawned, clock stopped
    #[default]
    Ready,
    /// Gravity and input active
    Running,
    /// Gravity and movement suspended; only the pause toggle is live
    Paused,
    /// Terminal; board kept for display until restart
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "game_over",
        }
    }
}

/// Piece randomizer selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RandomizerKind {
    /// Each piece drawn independently and uniformly; repeats are unbounded.
    #[default]
    Uniform,
    /// Shuffled bags containing each kind once.
    SevenBag,
}

impl RandomizerKind {
    /// Parse from string (case-insensitive): "uniform", "bag" / "7bag" / "sevenbag"
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "uniform" => Some(RandomizerKind::Uniform),
            "bag" | "7bag" | "7-bag" | "sevenbag" => Some(RandomizerKind::SevenBag),
            _ => None,
        }
    }
}

/// Game actions that can be applied to modify game state
///
/// Each action corresponds to one discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (with soft drop scoring); locks when blocked
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock
    HardDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Leave the ready state
    Start,
    /// Toggle pause state
    Pause,
    /// Reinitialize the session and start again
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotate"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotate" => Some(GameAction::Rotate),
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::Rotate => "rotate",
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }

    /// Whether the action moves or rotates the current piece.
    pub fn is_piece_action(&self) -> bool {
        matches!(
            self,
            GameAction::MoveLeft
                | GameAction::MoveRight
                | GameAction::SoftDrop
                | GameAction::HardDrop
                | GameAction::Rotate
        )
    }
}

/// Core-side event emitted after a piece locks.
///
/// Consumed by hosts that want to flash cleared lines or play a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    pub lines_cleared: u32,
    /// Line clear points awarded by this lock (drop bonuses excluded).
    pub points: u32,
    pub combo: u32,
    pub level_up: bool,
}
