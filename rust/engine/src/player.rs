use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::HandRank;

/// A move requested by a decision source.
///
/// `Bet` and `Raise` carry no amount: both raise the table bet to
/// `last_bet + raise increment`, the increment being a table setting.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Give up the hand
    Fold,
    /// Pass with nothing to call
    Check,
    /// Match the outstanding bet
    Call,
    /// Open the betting on an unopened street
    Bet,
    /// Raise an existing bet
    Raise,
    /// Commit every remaining chip
    AllIn,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Fold => "fold",
            Action::Check => "check",
            Action::Call => "call",
            Action::Bet => "bet",
            Action::Raise => "raise",
            Action::AllIn => "all-in",
        }
    }
}

/// One seat's chips, commitments, cards and per-hand flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    name: String,
    chips: u32,
    /// Committed on the current street
    current_bet: u32,
    /// Committed over the whole hand, all streets
    contributed: u32,
    hand: Vec<Card>,
    folded: bool,
    all_in: bool,
    locked: bool,
    is_dealer: bool,
    is_small_blind: bool,
    is_big_blind: bool,
    in_game: bool,
    /// Last showdown evaluation, kept for display only
    last_rank: Option<HandRank>,
}

impl Player {
    pub fn new(name: impl Into<String>, chips: u32) -> Self {
        Self {
            name: name.into(),
            chips,
            current_bet: 0,
            contributed: 0,
            hand: Vec::with_capacity(2),
            folded: false,
            all_in: false,
            locked: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            in_game: chips > 0,
            last_rank: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn chips(&self) -> u32 {
        self.chips
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn contributed(&self) -> u32 {
        self.contributed
    }
    pub fn hand(&self) -> &[Card] {
        &self.hand
    }
    pub fn is_folded(&self) -> bool {
        self.folded
    }
    pub fn is_all_in(&self) -> bool {
        self.all_in
    }
    pub fn is_locked(&self) -> bool {
        self.locked
    }
    pub fn is_dealer(&self) -> bool {
        self.is_dealer
    }
    pub fn is_small_blind(&self) -> bool {
        self.is_small_blind
    }
    pub fn is_big_blind(&self) -> bool {
        self.is_big_blind
    }
    pub fn in_game(&self) -> bool {
        self.in_game
    }
    pub fn last_rank(&self) -> Option<HandRank> {
        self.last_rank
    }

    /// Still contesting the current hand.
    pub fn is_live(&self) -> bool {
        self.in_game && !self.folded
    }

    /// Live and able to put more chips in.
    pub fn can_act(&self) -> bool {
        self.is_live() && !self.all_in
    }

    /// Needs input before the street can close.
    pub fn needs_to_act(&self) -> bool {
        self.can_act() && !self.locked
    }

    /// Clears everything but the chip count. Seats without chips sit the
    /// hand out.
    pub(crate) fn reset_for_hand(&mut self) {
        self.current_bet = 0;
        self.contributed = 0;
        self.hand.clear();
        self.all_in = false;
        self.locked = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.last_rank = None;
        self.in_game = self.chips > 0;
        // sitting out is modelled as a permanent fold
        self.folded = !self.in_game;
    }

    pub(crate) fn reset_for_street(&mut self) {
        self.current_bet = 0;
        self.locked = !self.can_act();
    }

    pub(crate) fn give_cards(&mut self, cards: &[Card]) -> Result<(), GameError> {
        if self.hand.len() + cards.len() > 2 {
            return Err(GameError::IllegalState(format!(
                "{} would hold more than two hole cards",
                self.name
            )));
        }
        self.hand.extend_from_slice(cards);
        Ok(())
    }

    /// Moves `amount` from the stack into this street's bet. Marks the player
    /// all-in when the stack empties.
    pub(crate) fn commit(&mut self, amount: u32) -> Result<(), GameError> {
        if amount > self.chips {
            return Err(GameError::IllegalState(format!(
                "{} cannot commit {} with {} chips",
                self.name, amount, self.chips
            )));
        }
        self.chips -= amount;
        self.current_bet += amount;
        self.contributed += amount;
        if self.chips == 0 {
            self.all_in = true;
        }
        Ok(())
    }

    pub(crate) fn award(&mut self, amount: u64) -> Result<(), GameError> {
        self.chips = u32::try_from(amount)
            .ok()
            .and_then(|a| self.chips.checked_add(a))
            .ok_or_else(|| {
                GameError::IllegalState(format!(
                    "{} cannot hold {} more chips on top of {}",
                    self.name, amount, self.chips
                ))
            })?;
        Ok(())
    }

    pub(crate) fn fold(&mut self) {
        self.folded = true;
        self.locked = true;
    }

    pub(crate) fn set_locked(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub(crate) fn set_positions(&mut self, dealer: bool, small_blind: bool, big_blind: bool) {
        self.is_dealer = dealer;
        self.is_small_blind = small_blind;
        self.is_big_blind = big_blind;
    }

    pub(crate) fn set_last_rank(&mut self, rank: HandRank) {
        self.last_rank = Some(rank);
    }

    /// Called once the hand is settled.
    pub(crate) fn finish_hand(&mut self) {
        if self.chips == 0 {
            self.in_game = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_moves_chips_and_flags_all_in() {
        let mut p = Player::new("ann", 100);
        p.commit(40).unwrap();
        assert_eq!(p.chips(), 60);
        assert_eq!(p.current_bet(), 40);
        assert!(!p.is_all_in());
        p.commit(60).unwrap();
        assert!(p.is_all_in());
        assert_eq!(p.contributed(), 100);
        assert!(p.commit(1).unwrap_err().is_fatal());
    }

    #[test]
    fn busted_player_sits_out_next_hand() {
        let mut p = Player::new("bob", 10);
        p.commit(10).unwrap();
        p.finish_hand();
        assert!(!p.in_game());
        p.reset_for_hand();
        assert!(p.is_folded());
        assert!(!p.can_act());
    }

    #[test]
    fn third_hole_card_is_rejected() {
        let mut p = Player::new("cy", 10);
        let cards = crate::cards::parse_cards("Ah Kd Qc").unwrap();
        p.give_cards(&cards[..2]).unwrap();
        assert!(p.give_cards(&cards[2..]).is_err());
    }
}
