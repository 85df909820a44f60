//! The seam between the engine and whoever picks the moves.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::Action;
use crate::table::{Street, Table};

/// Public facts about another seat. Hole cards are never included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub seat: usize,
    pub name: String,
    pub chips: u32,
    pub current_bet: u32,
    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
}

/// Everything a decision source may look at when choosing a move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionContext {
    pub seat: usize,
    pub street: Street,
    /// Moves the engine will accept, never empty
    pub legal: Vec<Action>,
    pub to_call: u32,
    /// Size of one bet or raise
    pub raise_increment: u32,
    /// Table bet after a bet or raise
    pub raise_to: u32,
    pub raise_count: u32,
    pub raise_cap: u32,
    pub last_bet: u32,
    pub chips: u32,
    pub current_bet: u32,
    pub hole: Vec<Card>,
    pub community: Vec<Card>,
    pub pot: u64,
    pub seats: Vec<SeatView>,
}

impl DecisionContext {
    /// Snapshot for the seat whose turn it is.
    pub fn for_seat(table: &Table, seat: usize) -> Option<Self> {
        let legal = table.legal_actions(seat);
        if legal.is_empty() {
            return None;
        }
        let ctx = table.betting_context(seat)?;
        let me = table.player(seat)?;
        let seats = table
            .players()
            .iter()
            .enumerate()
            .map(|(i, p)| SeatView {
                seat: i,
                name: p.name().to_string(),
                chips: p.chips(),
                current_bet: p.current_bet(),
                folded: p.is_folded(),
                all_in: p.is_all_in(),
                is_dealer: p.is_dealer(),
            })
            .collect();
        Some(Self {
            seat,
            street: table.street(),
            legal,
            to_call: ctx.to_call(),
            raise_increment: ctx.raise_increment,
            raise_to: ctx.raise_to(),
            raise_count: ctx.raise_count,
            raise_cap: ctx.raise_cap,
            last_bet: ctx.last_bet,
            chips: me.chips(),
            current_bet: me.current_bet(),
            hole: me.hand().to_vec(),
            community: table.community().to_vec(),
            pot: table.pot_total(),
            seats,
        })
    }

    pub fn can(&self, action: Action) -> bool {
        self.legal.contains(&action)
    }

    /// Check when free, otherwise call, otherwise the first legal move.
    pub fn passive(&self) -> Action {
        [Action::Check, Action::Call]
            .into_iter()
            .find(|a| self.can(*a))
            .unwrap_or(self.legal[0])
    }
}

/// A source of moves: a human at a prompt, a scripted policy, a search.
///
/// The engine calls [`Decider::choose_move`] once per turn and blocks until
/// it returns. Returning a move outside `ctx.legal` makes the engine reject
/// it with [`crate::errors::GameError::InvalidAction`].
pub trait Decider: Send {
    fn choose_move(&mut self, ctx: &DecisionContext) -> Action;

    fn name(&self) -> &str;
}

/// Plays a fixed list of moves, then checks or calls.
#[derive(Debug, Clone, Default)]
pub struct Scripted {
    moves: VecDeque<Action>,
}

impl Scripted {
    pub fn new(moves: impl IntoIterator<Item = Action>) -> Self {
        Self {
            moves: moves.into_iter().collect(),
        }
    }
}

impl Decider for Scripted {
    fn choose_move(&mut self, ctx: &DecisionContext) -> Action {
        self.moves.pop_front().unwrap_or_else(|| ctx.passive())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
