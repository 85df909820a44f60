//! Side-pot construction and settlement.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::cards::Card;
use crate::errors::GameError;
use crate::hand::{score, HandRank};
use crate::player::Player;

/// A slice of the money in the middle and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u64,
    /// Seats, ascending
    pub eligible: Vec<usize>,
}

/// What one seat has put in over the hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contribution {
    pub seat: usize,
    pub amount: u32,
    pub folded: bool,
}

impl From<(usize, &Player)> for Contribution {
    fn from((seat, p): (usize, &Player)) -> Self {
        Self {
            seat,
            amount: p.contributed(),
            folded: p.is_folded(),
        }
    }
}

/// Splits hand contributions into a main pot and side pots.
///
/// One pot per distinct non-zero contribution level, smallest first. Folded
/// seats pay into every level they reached but are never eligible. A level
/// nobody live reached is merged into the pot before it.
///
/// ```
/// use holdem_engine::pot::{build_side_pots, Contribution};
///
/// let pots = build_side_pots(&[
///     Contribution { seat: 0, amount: 500, folded: false },
///     Contribution { seat: 1, amount: 1500, folded: false },
///     Contribution { seat: 2, amount: 1500, folded: false },
/// ]);
/// assert_eq!(pots.len(), 2);
/// assert_eq!((pots[0].amount, pots[0].eligible.clone()), (1500, vec![0, 1, 2]));
/// assert_eq!((pots[1].amount, pots[1].eligible.clone()), (2000, vec![1, 2]));
/// ```
pub fn build_side_pots(contributions: &[Contribution]) -> Vec<Pot> {
    let mut levels: Vec<u32> = contributions
        .iter()
        .map(|c| c.amount)
        .filter(|&a| a > 0)
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut prev_level = 0u32;
    for level in levels {
        let reached: Vec<&Contribution> = contributions
            .iter()
            .filter(|c| c.amount >= level)
            .collect();
        let amount = u64::from(level - prev_level) * reached.len() as u64;
        let mut eligible: Vec<usize> = reached
            .iter()
            .filter(|c| !c.folded)
            .map(|c| c.seat)
            .collect();
        eligible.sort_unstable();
        prev_level = level;

        match pots.last_mut() {
            Some(last) if eligible.is_empty() => last.amount += amount,
            _ => pots.push(Pot { amount, eligible }),
        }
    }
    pots
}

pub fn total(pots: &[Pot]) -> u64 {
    pots.iter().map(|p| p.amount).sum()
}

/// Seats sharing the best hand among the live players. Needs the full
/// five-card board.
pub fn determine_showdown_winner(
    players: &[Player],
    community: &[Card],
) -> Result<Vec<usize>, GameError> {
    showdown_winners(players, &live_seats(players), community)
}

/// Seats in `seats` sharing the best hand, ascending. Empty when `seats` is.
pub fn showdown_winners(
    players: &[Player],
    seats: &[usize],
    community: &[Card],
) -> Result<Vec<usize>, GameError> {
    let ranks = showdown_ranks(players, seats, community)?;
    Ok(best_of(&ranks, seats))
}

fn live_seats(players: &[Player]) -> Vec<usize> {
    (0..players.len()).filter(|&i| players[i].is_live()).collect()
}

fn showdown_ranks(
    players: &[Player],
    seats: &[usize],
    community: &[Card],
) -> Result<Vec<Option<HandRank>>, GameError> {
    if community.len() != 5 {
        error!(board = community.len(), "showdown attempted before the river");
        return Err(GameError::IllegalState(format!(
            "showdown needs 5 community cards, have {}",
            community.len()
        )));
    }
    let mut ranks = vec![None; players.len()];
    for &seat in seats {
        let mut cards: Vec<Card> = players[seat].hand().to_vec();
        if cards.len() != 2 {
            return Err(GameError::IllegalState(format!(
                "seat {} reached showdown holding {} cards",
                seat,
                cards.len()
            )));
        }
        cards.extend_from_slice(community);
        ranks[seat] = Some(score(&cards)?);
    }
    Ok(ranks)
}

fn best_of(ranks: &[Option<HandRank>], eligible: &[usize]) -> Vec<usize> {
    let best = eligible.iter().filter_map(|&s| ranks[s]).max();
    eligible
        .iter()
        .copied()
        .filter(|&s| best.is_some() && ranks[s] == best)
        .collect()
}

/// How one pot was paid out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    pub amount: u64,
    pub winners: Vec<usize>,
    /// `None` when the pot was won without a showdown
    pub rank: Option<HandRank>,
}

/// Pays every pot and returns one [`Payout`] per pot, main pot first.
///
/// A lone live player takes everything without evaluation. Otherwise pots
/// are resolved from the last side pot down to the main pot, each split
/// evenly between the seats tied for the best hand. Odd chips go one at a
/// time to the tied winners in seat order starting left of the dealer.
pub fn settle(
    players: &mut [Player],
    pots: &[Pot],
    community: &[Card],
    dealer: usize,
) -> Result<Vec<Payout>, GameError> {
    let live = live_seats(players);
    let mut payouts = Vec::with_capacity(pots.len());

    match live.as_slice() {
        [] => {
            error!("no live player left to award the pot");
            return Err(GameError::IllegalState("every player folded".into()));
        }
        [winner] => {
            for pot in pots {
                players[*winner].award(pot.amount)?;
                payouts.push(Payout {
                    amount: pot.amount,
                    winners: vec![*winner],
                    rank: None,
                });
            }
            return Ok(payouts);
        }
        _ => {}
    }

    let ranks = showdown_ranks(players, &live, community)?;
    for &seat in &live {
        if let Some(rank) = ranks[seat] {
            players[seat].set_last_rank(rank);
        }
    }

    let seats = players.len();
    for pot in pots.iter().rev() {
        let mut winners = showdown_winners(players, &pot.eligible, community)?;
        let Some(rank) = winners.first().and_then(|&w| ranks[w]) else {
            error!(amount = pot.amount, "pot has no eligible winner");
            return Err(GameError::IllegalState(format!(
                "pot of {} has no eligible live player",
                pot.amount
            )));
        };
        winners.sort_by_key(|&s| (s + seats - dealer - 1) % seats);
        let share = pot.amount / winners.len() as u64;
        let odd = (pot.amount % winners.len() as u64) as usize;
        for (i, &seat) in winners.iter().enumerate() {
            players[seat].award(share + u64::from(i < odd))?;
        }
        debug!(amount = pot.amount, ?winners, "pot awarded");
        winners.sort_unstable();
        payouts.push(Payout {
            amount: pot.amount,
            winners,
            rank: Some(rank),
        });
    }
    payouts.reverse();
    Ok(payouts)
}
