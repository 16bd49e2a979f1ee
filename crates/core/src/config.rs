//! Session configuration

use crate::types::{
    RandomizerKind, BOARD_HEIGHT, BOARD_WIDTH, DROP_STEP_MS, INITIAL_DROP_MS, MAX_BOARD_DIM,
    MIN_BOARD_DIM, MIN_DROP_MS,
};

/// Gravity timing: interval at level 1, reduction per level, and the floor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GravityConfig {
    pub initial_ms: u32,
    pub step_ms: u32,
    pub min_ms: u32,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            initial_ms: INITIAL_DROP_MS,
            step_ms: DROP_STEP_MS,
            min_ms: MIN_DROP_MS,
        }
    }
}

/// Everything needed to create a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    pub width: u8,
    pub height: u8,
    pub gravity: GravityConfig,
    pub randomizer: RandomizerKind,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            gravity: GravityConfig::default(),
            randomizer: RandomizerKind::Uniform,
            seed: 1,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Clamp values into the range the engine supports.
    ///
    /// Dimensions are kept within `MIN_BOARD_DIM..=MAX_BOARD_DIM`; the gravity
    /// floor is at least 1ms and the initial interval never below the floor.
    pub fn sanitized(self) -> Self {
        let min_ms = self.gravity.min_ms.max(1);
        Self {
            width: self.width.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM),
            height: self.height.clamp(MIN_BOARD_DIM, MAX_BOARD_DIM),
            gravity: GravityConfig {
                initial_ms: self.gravity.initial_ms.max(min_ms),
                step_ms: self.gravity.step_ms,
                min_ms,
            },
            ..self
        }
    }
}
