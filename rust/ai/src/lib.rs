//! # holdem-ai: computer seats
//!
//! Decision sources for the engine's [`Decider`] seam. Each computer seat
//! owns a seeded RNG so a session replays exactly from its seed.
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_ai;
//! use holdem_engine::decision::Decider;
//! use holdem_engine::engine::Engine;
//! use holdem_engine::table::TableConfig;
//!
//! let mut seats: Vec<Box<dyn Decider>> = (0..3)
//!     .map(|i| create_ai("safe", 42 + i).unwrap())
//!     .collect();
//! let mut engine = Engine::new(&["a", "b", "c"], TableConfig::default(), Some(42));
//! let record = engine.play_hand(&mut seats).unwrap();
//! assert_eq!(record.deltas.iter().sum::<i64>(), 0);
//! ```
//!
//! ## AI Types
//!
//! - `"safe"` - mostly checks and calls
//! - `"risky"` - bets and raises half the time
//! - `"random"` - roughly even odds between folding, staying and pushing
//! - `"hand_aware"` - acts on estimated hand strength
//! - `"passive"` - always checks or calls

use holdem_engine::decision::Decider;
use thiserror::Error;

pub mod styles;

pub use styles::{Style, StyledAi};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AiError {
    #[error("Unknown AI type: {0} (expected safe, risky, random, hand_aware or passive)")]
    UnknownAi(String),
}

/// Builds a computer seat by style name.
///
/// ```rust
/// use holdem_ai::{create_ai, AiError};
///
/// let ai = create_ai("risky", 7).unwrap();
/// assert_eq!(ai.name(), "risky");
/// assert!(matches!(create_ai("shark", 7), Err(AiError::UnknownAi(_))));
/// ```
pub fn create_ai(ai_type: &str, seed: u64) -> Result<Box<dyn Decider>, AiError> {
    let style: Style = ai_type.parse()?;
    Ok(Box::new(StyledAi::new(style, seed)))
}
