//! # holdem-engine: Texas Hold'em table engine
//!
//! Rules, chip accounting and hand evaluation for a no-limit-style Texas
//! Hold'em table of 2 to 10 seats with a fixed raise increment and a cap of
//! four bets or raises per street. Decision sources (humans, scripted
//! policies) plug in through the [`decision::Decider`] trait.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation and text parsing
//! - [`deck`] - Seeded 52-card deck with deal and burn
//! - [`hand`] - Five-of-seven hand ranking and strength estimates
//! - [`player`] - Per-seat state and the [`player::Action`] vocabulary
//! - [`rules`] - Legal-move computation and validation
//! - [`pot`] - Side pots and showdown payouts
//! - [`table`] - Seats, board, blinds and settlement
//! - [`betting`] - Turn order and action application for one street
//! - [`decision`] - The view a decision source gets, and the trait it implements
//! - [`engine`] - Hand controller tying the deck to the table
//! - [`logger`] - JSONL hand records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{score, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! let rank = score(&cards).unwrap();
//! assert_eq!(rank.category, Category::StraightFlush);
//! ```
//!
//! ## Driving a hand step by step
//!
//! ```rust
//! use holdem_engine::engine::Engine;
//! use holdem_engine::player::Action;
//! use holdem_engine::table::TableConfig;
//!
//! let mut engine = Engine::new(&["a", "b"], TableConfig::default(), Some(1));
//! engine.start_hand().unwrap();
//! engine.post_blinds().unwrap();
//! engine.deal_hole().unwrap();
//!
//! let seat = engine.current_player().unwrap();
//! engine.apply_action(seat, Action::Fold).unwrap();
//! assert!(engine.is_hand_over());
//!
//! let settlement = engine.settle_hand().unwrap();
//! assert_eq!(settlement.deltas.iter().sum::<i64>(), 0);
//! ```

pub mod betting;
pub mod cards;
pub mod decision;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod hand;
pub mod logger;
pub mod player;
pub mod pot;
pub mod rules;
pub mod table;
