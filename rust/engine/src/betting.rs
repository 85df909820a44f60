//! One street of betting: turn order, legality, raise cap and lock-in.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::GameError;
use crate::player::{Action, Player};
use crate::rules::{legal_actions, validate_action, BettingContext, ValidatedAction};
use crate::table::{Street, Table};

/// What an accepted action left behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub seat: usize,
    pub action: Action,
    /// Chips moved from the seat's stack
    pub chips: u32,
    pub round_over: bool,
    pub hand_over: bool,
}

impl Table {
    /// Resets per-street state and picks the first seat to act. Pre-flop
    /// bets (the blinds) stay in place.
    pub(crate) fn open_street(&mut self, street: Street) {
        self.street = street;
        self.raise_count = 0;
        if street != Street::Preflop {
            self.last_bet = 0;
        }
        let last_bet = self.last_bet;
        for p in &mut self.players {
            if street != Street::Preflop {
                p.reset_for_street();
            } else {
                p.set_locked(!p.can_act());
            }
        }
        // a lone seat with chips behind has nobody to bet against
        if self.players.iter().filter(|p| p.can_act()).count() <= 1 {
            for p in self.players.iter_mut().filter(|p| p.can_act()) {
                if p.current_bet() >= last_bet {
                    p.set_locked(true);
                }
            }
        }

        let anchor = match street {
            Street::Preflop => self.big_blind_seat(),
            _ => self.dealer,
        };
        self.to_act = anchor.and_then(|a| self.next_seat(a, Player::needs_to_act));
        if self.is_round_over() {
            self.to_act = None;
        }
        debug!(?street, to_act = ?self.to_act, "street opened");
    }

    /// Street is done: one live seat left, or every live seat is locked or
    /// all-in.
    pub fn is_round_over(&self) -> bool {
        let live = self.players.iter().filter(|p| p.is_live());
        live.clone().count() <= 1 || live.clone().all(|p| p.is_locked() || p.is_all_in())
    }

    /// Moves the turn to the next seat that still owes a decision. Once the
    /// round is over this returns `None` and changes nothing.
    pub fn advance_turn(&mut self) -> Option<usize> {
        if self.is_round_over() {
            self.to_act = None;
            return None;
        }
        let from = self.to_act.or(self.dealer)?;
        self.to_act = self.next_seat(from, Player::needs_to_act);
        self.to_act
    }

    /// The raw numbers behind a seat's legal moves.
    pub fn betting_context(&self, seat: usize) -> Option<BettingContext> {
        let p = self.players.get(seat)?;
        Some(BettingContext {
            chips: p.chips(),
            current_bet: p.current_bet(),
            last_bet: self.last_bet,
            raise_increment: self.raise_increment(),
            raise_count: self.raise_count,
            raise_cap: self.raise_cap,
        })
    }

    /// Moves available to `seat`. Empty unless it is that seat's turn.
    pub fn legal_actions(&self, seat: usize) -> Vec<Action> {
        if self.to_act != Some(seat) {
            return Vec::new();
        }
        self.betting_context(seat)
            .map(|ctx| legal_actions(&ctx))
            .unwrap_or_default()
    }

    /// Applies one move in place and passes the turn on.
    ///
    /// # Errors
    ///
    /// - [`GameError::NotPlayersTurn`] if `seat` is not the seat to act
    /// - [`GameError::InvalidAction`] if the move is not legal; the table is
    ///   left untouched
    /// - [`GameError::IllegalState`] if chip accounting breaks
    pub fn apply_action(&mut self, seat: usize, action: Action) -> Result<ActionOutcome, GameError> {
        if !self.in_hand {
            return Err(GameError::NoHandInProgress);
        }
        if self.to_act != Some(seat) {
            return Err(GameError::NotPlayersTurn {
                expected: self.to_act,
                actual: seat,
            });
        }
        let ctx = self
            .betting_context(seat)
            .ok_or(GameError::NotPlayersTurn {
                expected: self.to_act,
                actual: seat,
            })?;
        let validated = validate_action(&ctx, seat, action).inspect_err(|e| {
            warn!(seat, ?action, error = %e, "action rejected");
        })?;

        let before = self.players[seat].chips();
        match validated {
            ValidatedAction::Fold => self.players[seat].fold(),
            ValidatedAction::Check => self.players[seat].set_locked(true),
            ValidatedAction::Call(amount) => {
                self.players[seat].commit(amount)?;
                self.players[seat].set_locked(true);
            }
            ValidatedAction::Raise { to, cost } => {
                self.players[seat].commit(cost)?;
                self.raise_to(seat, to);
            }
            ValidatedAction::AllIn(amount) => {
                self.players[seat].commit(amount)?;
                self.players[seat].set_locked(true);
                let total = self.players[seat].current_bet();
                if total > self.last_bet {
                    self.raise_to(seat, total);
                }
            }
        }
        self.sync_pots()?;

        let chips = before - self.players[seat].chips();
        debug!(
            seat,
            ?action,
            chips,
            last_bet = self.last_bet,
            raises = self.raise_count,
            "action applied"
        );

        self.advance_turn();
        Ok(ActionOutcome {
            seat,
            action,
            chips,
            round_over: self.is_round_over(),
            hand_over: self.is_hand_over(),
        })
    }

    /// Lifts the table bet and reopens action for everyone else still able
    /// to bet.
    fn raise_to(&mut self, seat: usize, to: u32) {
        self.last_bet = to;
        self.raise_count += 1;
        for (i, p) in self.players.iter_mut().enumerate() {
            if i != seat && p.can_act() {
                p.set_locked(false);
            }
        }
        self.players[seat].set_locked(true);
    }
}

/// Pure transition: the state after `seat` plays `action`, leaving `state`
/// untouched. Meant for search-style policies working on their own copy.
pub fn apply(state: &Table, seat: usize, action: Action) -> Result<Table, GameError> {
    let mut next = state.clone();
    next.apply_action(seat, action)?;
    Ok(next)
}
