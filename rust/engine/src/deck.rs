use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// An ordered 52-card sequence dealt from the front.
///
/// Cards leave the deck when dealt or burned and only come back through
/// [`Deck::refill`] or [`Deck::shuffle`], so a card is never in the deck and in
/// a hand at the same time.
///
/// # Examples
///
/// ```
/// use holdem_engine::deck::Deck;
///
/// let mut deck = Deck::new_with_seed(7);
/// deck.shuffle();
/// let hole = deck.deal(2).unwrap();
/// deck.burn().unwrap();
/// assert_eq!(hole.len(), 2);
/// assert_eq!(deck.remaining(), 49);
/// ```
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Restores all 52 cards and reorders them.
    pub fn shuffle(&mut self) {
        self.refill();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns `n` cards from the front.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        let remaining = self.remaining();
        if n > remaining {
            return Err(GameError::DeckExhausted {
                requested: n,
                remaining,
            });
        }
        let out = self.cards[self.position..self.position + n].to_vec();
        self.position += n;
        Ok(out)
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.deal(1).map(|_| ())
    }

    /// Resets to the full, unshuffled 52 cards.
    pub fn refill(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }
}
