//! Persistent player records
//!
//! Tracks best statistics across games and the achievements a player has
//! earned, stored as a small JSON file:
//!
//! ```json
//! {
//!   "best": { "score": 4210, "level": 4, "lines": 38, "max_combo": 4 },
//!   "achievements": ["first_game", "score_1000", "tetris"],
//!   "games_played": 12
//! }
//! ```
//!
//! Missing fields default to zero/empty, so older files keep loading.

pub mod achievements;
pub mod record;
pub mod store;

pub use achievements::{Achievement, ACHIEVEMENTS};
pub use record::{BestStats, StatsRecord};
pub use store::{RecordOutcome, RecordStore};
