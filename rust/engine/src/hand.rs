use serde::{Deserialize, Serialize};

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "high card",
            Category::OnePair => "pair",
            Category::TwoPair => "two pair",
            Category::ThreeOfAKind => "three of a kind",
            Category::Straight => "straight",
            Category::Flush => "flush",
            Category::FullHouse => "full house",
            Category::FourOfAKind => "four of a kind",
            Category::StraightFlush => "straight flush",
        }
    }
}

/// Strength of a five-card hand.
///
/// Ordering is category first, then `tiebreak` element by element. The
/// tiebreak holds rank values high to low (kickers included), zero padded.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandRank {
    pub category: Category,
    pub tiebreak: [u8; 5],
}

const SCORE_BASE: u64 = 10_000_000_000;

impl HandRank {
    /// Monotone scalar form: category in the top digits, two decimal digits
    /// per tiebreak rank below it.
    pub fn score(&self) -> u64 {
        let mut s = self.category as u64 * SCORE_BASE;
        let mut place = SCORE_BASE / 100;
        for &r in &self.tiebreak {
            s += r as u64 * place;
            place /= 100;
        }
        s
    }

    /// Score of the royal flush.
    pub fn max_score() -> u64 {
        HandRank {
            category: Category::StraightFlush,
            tiebreak: [14, 0, 0, 0, 0],
        }
        .score()
    }
}

/// Ranks exactly five cards.
pub fn rank_five(cards: &[Card; 5]) -> HandRank {
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let first_suit = cards[0].suit;
    let mut flush = true;
    for c in cards {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
        flush &= c.suit == first_suit;
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        let category = if flush {
            Category::StraightFlush
        } else {
            Category::Straight
        };
        return HandRank {
            category,
            tiebreak: [high, 0, 0, 0, 0],
        };
    }

    // (count, rank) groups, biggest group first, then highest rank
    let mut groups: Vec<(u8, u8)> = (2..=14u8)
        .filter(|&r| rank_counts[r as usize] > 0)
        .map(|r| (rank_counts[r as usize], r))
        .collect();
    groups.sort_unstable_by(|a, b| b.cmp(a));

    let mut tiebreak = [0u8; 5];
    for (slot, &(_, r)) in tiebreak.iter_mut().zip(groups.iter()) {
        *slot = r;
    }

    let category = match (groups[0].0, groups.get(1).map(|g| g.0)) {
        (4, _) => Category::FourOfAKind,
        (3, Some(2)) => Category::FullHouse,
        _ if flush => Category::Flush,
        (3, _) => Category::ThreeOfAKind,
        (2, Some(2)) => Category::TwoPair,
        (2, _) => Category::OnePair,
        _ => Category::HighCard,
    };
    HandRank { category, tiebreak }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    let mut m = mask;
    // Ace also plays low
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    (5..=14u8).rev().find(|&high| {
        let window = 0b1_1111u16 << (high - 4);
        m & window == window
    })
}

/// Best hand among every five-card subset of `cards` (5 to 7 cards), along
/// with the subset that produced it.
pub fn best_hand(cards: &[Card]) -> Result<(HandRank, [Card; 5]), GameError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(GameError::InvalidCardCount(n));
    }
    let mut best: Option<(HandRank, [Card; 5])> = None;
    for a in 0..n {
        for b in a + 1..n {
            for c in b + 1..n {
                for d in c + 1..n {
                    for e in d + 1..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let rank = rank_five(&five);
                        if best.as_ref().is_none_or(|(r, _)| rank > *r) {
                            best = Some((rank, five));
                        }
                    }
                }
            }
        }
    }
    best.ok_or(GameError::InvalidCardCount(n))
}

/// Scores 5 to 7 cards: the maximum [`HandRank`] over all C(n,5) subsets.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::hand::{score, Category};
///
/// let cards = parse_cards("2h 2d 2c 2s 5h 7h 9h").unwrap();
/// assert_eq!(score(&cards).unwrap().category, Category::FourOfAKind);
/// ```
pub fn score(cards: &[Card]) -> Result<HandRank, GameError> {
    best_hand(cards).map(|(rank, _)| rank)
}

/// Heuristic strength in `[0, 1]` for decision policies. Never used for
/// showdown.
///
/// With fewer than five known cards the result is the exact mean normalized
/// score over every way to complete the hand to five cards from the unseen
/// deck; with five or more it is the normalized score of the best subset.
pub fn estimate_strength(hole: &[Card], community: &[Card]) -> Result<f64, GameError> {
    let mut known: Vec<Card> = hole.iter().chain(community.iter()).copied().collect();
    let n = known.len();
    if !(2..=7).contains(&n) {
        return Err(GameError::InvalidCardCount(n));
    }
    let max = HandRank::max_score() as f64;
    if n >= 5 {
        return Ok(score(&known)?.score() as f64 / max);
    }

    let unseen: Vec<Card> = full_deck()
        .into_iter()
        .filter(|c| !known.contains(c))
        .collect();
    let missing = 5 - n;
    let mut total = 0f64;
    let mut count = 0u64;
    let mut picked = Vec::with_capacity(missing);
    for_each_combination(&unseen, missing, 0, &mut picked, &mut |extra| {
        known.truncate(n);
        known.extend_from_slice(extra);
        let mut five = [known[0]; 5];
        five.copy_from_slice(&known[..5]);
        total += rank_five(&five).score() as f64;
        count += 1;
    });
    Ok(total / count as f64 / max)
}

fn for_each_combination<F: FnMut(&[Card])>(
    pool: &[Card],
    k: usize,
    start: usize,
    picked: &mut Vec<Card>,
    f: &mut F,
) {
    if picked.len() == k {
        f(picked);
        return;
    }
    for i in start..pool.len() {
        picked.push(pool[i]);
        for_each_combination(pool, k, i + 1, picked, f);
        picked.pop();
    }
}
