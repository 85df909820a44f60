use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::cards::Card;
use crate::errors::GameError;
use crate::player::Player;
use crate::pot::{self, build_side_pots, Contribution, Payout, Pot};
use crate::rules::{RaiseSize, RAISE_CAP};

/// A betting round of Texas Hold'em.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards dealt, no board
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
}

impl Street {
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    fn after_board(len: usize) -> Option<Street> {
        match len {
            3 => Some(Street::Flop),
            4 => Some(Street::Turn),
            5 => Some(Street::River),
            _ => None,
        }
    }
}

/// Stakes and betting structure for a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub raise_size: RaiseSize,
    /// Bets plus raises allowed per street
    pub raise_cap: u32,
    /// Blinds double every this many hands; 0 keeps them fixed
    pub hands_per_level: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: 1_000,
            small_blind: 5,
            big_blind: 10,
            raise_size: RaiseSize::default(),
            raise_cap: RAISE_CAP,
            hands_per_level: 0,
        }
    }
}

/// Chips moved by a settled hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// Per seat: chips after settlement minus chips before the blinds
    pub deltas: Vec<i64>,
    /// One entry per pot, main pot first
    pub payouts: Vec<Payout>,
}

/// Everything on the felt: seats, board, pots and the betting round state.
///
/// Owned by one controller. Decision sources never see it directly; they get
/// a [`crate::decision::DecisionContext`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) players: Vec<Player>,
    pub(crate) community: Vec<Card>,
    pub(crate) pots: Vec<Pot>,
    pub(crate) last_bet: u32,
    pub(crate) raise_count: u32,
    pub(crate) small_blind: u32,
    pub(crate) big_blind: u32,
    pub(crate) raise_size: RaiseSize,
    pub(crate) raise_cap: u32,
    pub(crate) hands_played: u32,
    pub(crate) dealer: Option<usize>,
    pub(crate) street: Street,
    pub(crate) to_act: Option<usize>,
    pub(crate) in_hand: bool,
    pub(crate) blinds_posted: bool,
    /// Chip counts when the hand started, before blinds
    pub(crate) start_chips: Vec<u32>,
}

impl Table {
    pub fn new(players: Vec<Player>, config: &TableConfig) -> Self {
        let start_chips = players.iter().map(Player::chips).collect();
        Self {
            players,
            community: Vec::with_capacity(5),
            pots: Vec::new(),
            last_bet: 0,
            raise_count: 0,
            small_blind: config.small_blind,
            big_blind: config.big_blind,
            raise_size: config.raise_size,
            raise_cap: config.raise_cap,
            hands_played: 0,
            dealer: None,
            street: Street::Preflop,
            to_act: None,
            in_hand: false,
            blinds_posted: false,
            start_chips,
        }
    }

    /// Seats named `names`, each with the configured starting stack.
    pub fn with_names<S: AsRef<str>>(names: &[S], config: &TableConfig) -> Self {
        let players = names
            .iter()
            .map(|n| Player::new(n.as_ref(), config.starting_stack))
            .collect();
        Self::new(players, config)
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }
    pub fn pot_total(&self) -> u64 {
        pot::total(&self.pots)
    }
    pub fn last_bet(&self) -> u32 {
        self.last_bet
    }
    pub fn raise_count(&self) -> u32 {
        self.raise_count
    }
    pub fn raise_cap(&self) -> u32 {
        self.raise_cap
    }
    pub fn blinds(&self) -> (u32, u32) {
        (self.small_blind, self.big_blind)
    }
    pub fn raise_increment(&self) -> u32 {
        self.raise_size.increment(self.big_blind)
    }
    pub fn hands_played(&self) -> u32 {
        self.hands_played
    }
    pub fn dealer(&self) -> Option<usize> {
        self.dealer
    }
    pub fn street(&self) -> Street {
        self.street
    }
    pub fn to_act(&self) -> Option<usize> {
        self.to_act
    }
    pub fn in_hand(&self) -> bool {
        self.in_hand
    }

    pub fn set_blinds(&mut self, small_blind: u32, big_blind: u32) {
        self.small_blind = small_blind;
        self.big_blind = big_blind;
    }

    /// Seats still contesting the hand.
    pub fn live_seats(&self) -> Vec<usize> {
        (0..self.players.len())
            .filter(|&i| self.players[i].is_live())
            .collect()
    }

    /// True when at most one seat still has chips. Seats that bust are only
    /// dropped once their hand is settled.
    pub fn is_session_over(&self) -> bool {
        self.players.iter().filter(|p| p.chips() > 0).count() <= 1
    }

    /// Next seat after `from`, clockwise, that satisfies `pred`. `from`
    /// itself is checked last.
    pub(crate) fn next_seat(&self, from: usize, pred: impl Fn(&Player) -> bool) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (from + step) % n)
            .find(|&i| pred(&self.players[i]))
    }

    /// Resets every seat, moves the button and assigns the blinds.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.in_hand {
            return Err(GameError::HandInProgress);
        }
        for p in &mut self.players {
            p.reset_for_hand();
        }
        if self.players.iter().filter(|p| p.in_game()).count() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        let n = self.players.len();
        let from = self.dealer.unwrap_or(n - 1);
        let dealer = self
            .next_seat(from, Player::in_game)
            .ok_or(GameError::NotEnoughPlayers)?;
        let (sb, bb) = if self.players.iter().filter(|p| p.in_game()).count() == 2 {
            // heads-up: the button posts the small blind
            let bb = self
                .next_seat(dealer, Player::in_game)
                .ok_or(GameError::NotEnoughPlayers)?;
            (dealer, bb)
        } else {
            let sb = self
                .next_seat(dealer, Player::in_game)
                .ok_or(GameError::NotEnoughPlayers)?;
            let bb = self
                .next_seat(sb, Player::in_game)
                .ok_or(GameError::NotEnoughPlayers)?;
            (sb, bb)
        };
        for (i, p) in self.players.iter_mut().enumerate() {
            p.set_positions(i == dealer, i == sb, i == bb);
        }

        self.dealer = Some(dealer);
        self.community.clear();
        self.pots.clear();
        self.last_bet = 0;
        self.raise_count = 0;
        self.street = Street::Preflop;
        self.to_act = None;
        self.blinds_posted = false;
        self.in_hand = true;
        self.start_chips = self.players.iter().map(Player::chips).collect();
        Ok(())
    }

    pub fn small_blind_seat(&self) -> Option<usize> {
        self.players.iter().position(Player::is_small_blind)
    }

    pub fn big_blind_seat(&self) -> Option<usize> {
        self.players.iter().position(Player::is_big_blind)
    }

    /// Forces the blinds in and opens pre-flop betting. A stack smaller
    /// than its blind goes all-in for what it has.
    pub fn post_blinds(&mut self) -> Result<(), GameError> {
        if !self.in_hand {
            return Err(GameError::NoHandInProgress);
        }
        if self.blinds_posted {
            return Err(GameError::IllegalState("blinds already posted".into()));
        }
        let sb_seat = self.small_blind_seat().ok_or(GameError::NoHandInProgress)?;
        let bb_seat = self.big_blind_seat().ok_or(GameError::NoHandInProgress)?;
        for (seat, blind) in [(sb_seat, self.small_blind), (bb_seat, self.big_blind)] {
            let p = &mut self.players[seat];
            let amount = blind.min(p.chips());
            p.commit(amount)?;
        }
        self.blinds_posted = true;
        self.last_bet = self.big_blind;
        self.open_street(Street::Preflop);
        self.sync_pots()
    }

    pub(crate) fn deal_hole(&mut self, seat: usize, cards: &[Card]) -> Result<(), GameError> {
        self.players[seat].give_cards(cards)
    }

    /// Lays new community cards and opens the next street.
    ///
    /// # Errors
    ///
    /// [`GameError::IllegalState`] when the board would not read 3, 4 or 5
    /// cards, or when betting on the current street is still open.
    pub fn add_community(&mut self, cards: &[Card]) -> Result<(), GameError> {
        if !self.in_hand {
            return Err(GameError::NoHandInProgress);
        }
        if !self.is_round_over() {
            return Err(GameError::IllegalState(
                "community cards dealt while betting is open".into(),
            ));
        }
        let street = match (self.community.len(), cards.len()) {
            (0, 3) | (3, 1) | (4, 1) => Street::after_board(self.community.len() + cards.len()),
            _ => None,
        }
        .ok_or_else(|| {
            GameError::IllegalState(format!(
                "board of {} cards plus {} new is not a street",
                self.community.len(),
                cards.len()
            ))
        })?;
        self.community.extend_from_slice(cards);
        self.open_street(street);
        Ok(())
    }

    /// Whether the hand needs no more betting decisions: one live seat is
    /// left, or the river round has closed.
    pub fn is_hand_over(&self) -> bool {
        if !self.in_hand {
            return true;
        }
        self.live_seats().len() <= 1
            || (self.street == Street::River && self.community.len() == 5 && self.is_round_over())
    }

    /// No later street can have betting: fewer than two live seats have
    /// chips behind.
    pub fn betting_closed(&self) -> bool {
        self.players.iter().filter(|p| p.can_act()).count() < 2 && self.is_round_over()
    }

    pub(crate) fn sync_pots(&mut self) -> Result<(), GameError> {
        let contributions: Vec<Contribution> = self
            .players
            .iter()
            .enumerate()
            .map(Contribution::from)
            .collect();
        self.pots = build_side_pots(&contributions);
        self.check_conservation()
    }

    /// Stacks plus pots must equal the stacks the hand started with.
    pub fn check_conservation(&self) -> Result<(), GameError> {
        let now: u64 = self.players.iter().map(|p| p.chips() as u64).sum::<u64>()
            + pot::total(&self.pots);
        let start: u64 = self.start_chips.iter().map(|&c| c as u64).sum();
        if now != start {
            error!(now, start, "chip conservation violated");
            return Err(GameError::IllegalState(format!(
                "chips on table {now} differ from {start} at hand start"
            )));
        }
        Ok(())
    }

    /// Pays out the pots and closes the hand.
    pub fn settle_hand(&mut self) -> Result<Settlement, GameError> {
        if !self.in_hand {
            return Err(GameError::NoHandInProgress);
        }
        self.sync_pots()?;
        let dealer = self.dealer.ok_or(GameError::NoHandInProgress)?;
        let pots = std::mem::take(&mut self.pots);
        let payouts = pot::settle(&mut self.players, &pots, &self.community, dealer)?;

        for p in &mut self.players {
            p.finish_hand();
        }
        let deltas: Vec<i64> = self
            .players
            .iter()
            .zip(&self.start_chips)
            .map(|(p, &start)| p.chips() as i64 - start as i64)
            .collect();
        if deltas.iter().sum::<i64>() != 0 {
            error!(?deltas, "settlement created or destroyed chips");
            return Err(GameError::IllegalState("settlement deltas do not sum to zero".into()));
        }

        self.in_hand = false;
        self.to_act = None;
        self.hands_played += 1;
        info!(
            hand = self.hands_played,
            pots = payouts.len(),
            total = pot::total(&pots),
            ?deltas,
            "hand settled"
        );
        Ok(Settlement { deltas, payouts })
    }
}
