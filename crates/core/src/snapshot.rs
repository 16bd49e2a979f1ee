use crate::pieces::Matrix;
use crate::tetromino::Tetromino;
use crate::types::{Cell, Color, PieceKind, Phase, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub x: i8,
    pub y: i8,
    pub color: Color,
}

impl From<Tetromino> for ActiveSnapshot {
    fn from(value: Tetromino) -> Self {
        Self {
            kind: value.kind,
            matrix: value.matrix,
            x: value.x,
            y: value.y,
            color: value.color(),
        }
    }
}

impl ActiveSnapshot {
    /// Occupied cells in board coordinates
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.matrix
            .cells()
            .into_iter()
            .map(move |(c, r)| (self.x + c, self.y + r))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub color: Color,
}

impl From<PieceKind> for NextSnapshot {
    fn from(kind: PieceKind) -> Self {
        let def = crate::pieces::definition(kind);
        Self {
            kind,
            matrix: def.matrix,
            color: def.color,
        }
    }
}

/// Read-only copy of everything a renderer or stat tracker needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub width: u8,
    pub height: u8,
    /// Row-major cells, `width * height` long
    pub board: Vec<Cell>,
    pub active: Option<ActiveSnapshot>,
    pub next: Option<NextSnapshot>,
    pub phase: Phase,
    pub episode_id: u32,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    pub max_combo: u32,
    pub pieces_locked: u32,
    pub play_time_ms: u64,
    pub drop_interval_ms: u32,
    pub drop_timer_ms: u32,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        self.width = BOARD_WIDTH;
        self.height = BOARD_HEIGHT;
        self.board.clear();
        self.board
            .resize((BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize), None);
        self.active = None;
        self.next = None;
        self.phase = Phase::Ready;
        self.episode_id = 0;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.max_combo = 0;
        self.pieces_locked = 0;
        self.play_time_ms = 0;
        self.drop_interval_ms = 0;
        self.drop_timer_ms = 0;
    }

    /// Board cell at (x, y); `None` for empty or out of bounds
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        self.board
            .get(y * self.width as usize + x)
            .copied()
            .flatten()
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        let mut s = Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            board: Vec::new(),
            active: None,
            next: None,
            phase: Phase::Ready,
            episode_id: 0,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            max_combo: 0,
            pieces_locked: 0,
            play_time_ms: 0,
            drop_interval_ms: 0,
            drop_timer_ms: 0,
        };
        s.clear();
        s
    }
}
