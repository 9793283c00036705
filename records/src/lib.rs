//! Score log shared by both games: one text line per finished round.
//!
//! ```text
//! Matching Game - Level: 1, Remaining Attempts: 4, Completed: 2026-10-15 09:30:00
//! Matching Game - Level: 2, Remaining Attempts: 0, Failed: 2026-10-15 09:31:10
//! Math Game - Level: 3, Correct Answers: 4/5, Completed: 2026-10-15 09:35:42
//! ```

pub use entry::*;
pub use error::*;
pub use score_log::*;

mod entry;
mod error;
mod score_log;
