use tracing::{debug, info};

use crate::betting::ActionOutcome;
use crate::cards::Card;
use crate::decision::{Decider, DecisionContext};
use crate::deck::Deck;
use crate::errors::GameError;
use crate::logger::{ActionRecord, HandRecord, ShownHand};
use crate::player::{Action, Player};
use crate::rules::blinds_for_level;
use crate::table::{Settlement, Table, TableConfig};

/// The hand-in-progress controller: owns the table and the deck and runs
/// hands from the button move to the payout.
///
/// # Examples
///
/// ```
/// use holdem_engine::decision::{Decider, Scripted};
/// use holdem_engine::engine::Engine;
/// use holdem_engine::table::TableConfig;
///
/// let mut engine = Engine::new(&["ann", "bob", "cy"], TableConfig::default(), Some(42));
/// let mut seats: Vec<Box<dyn Decider>> = (0..3)
///     .map(|_| Box::new(Scripted::default()) as Box<dyn Decider>)
///     .collect();
///
/// let record = engine.play_hand(&mut seats).unwrap();
/// assert_eq!(record.deltas.iter().sum::<i64>(), 0);
/// assert_eq!(engine.table().hands_played(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    table: Table,
    deck: Deck,
    config: TableConfig,
    seed: u64,
    level: u32,
    /// Moves of the hand in progress
    actions: Vec<ActionRecord>,
}

impl Engine {
    pub fn new<S: AsRef<str>>(names: &[S], config: TableConfig, seed: Option<u64>) -> Self {
        let table = Table::with_names(names, &config);
        Self::from_table(table, config, seed)
    }

    /// Seats with their own stacks.
    pub fn with_players(players: Vec<Player>, config: TableConfig, seed: Option<u64>) -> Self {
        let table = Table::new(players, &config);
        Self::from_table(table, config, seed)
    }

    fn from_table(table: Table, config: TableConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or(0xA1A2_A3A4);
        Self {
            table,
            deck: Deck::new_with_seed(seed),
            config,
            seed,
            level: 1,
            actions: Vec::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }
    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn level(&self) -> u32 {
        self.level
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Moves the button, raises the blinds when a level is complete and
    /// shuffles a fresh deck.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.config.hands_per_level > 0 {
            self.level = 1 + self.table.hands_played() / self.config.hands_per_level;
        }
        let (sb, bb) = blinds_for_level(self.config.small_blind, self.config.big_blind, self.level);
        self.table.set_blinds(sb, bb);
        self.table.start_hand()?;
        self.deck.shuffle();
        self.actions.clear();
        info!(
            hand = self.table.hands_played() + 1,
            level = self.level,
            sb,
            bb,
            dealer = ?self.table.dealer(),
            "hand started"
        );
        Ok(())
    }

    pub fn post_blinds(&mut self) -> Result<(), GameError> {
        self.table.post_blinds()
    }

    /// Two cards to every seat in the hand, one at a time, starting left of
    /// the button.
    pub fn deal_hole(&mut self) -> Result<(), GameError> {
        let dealer = self.table.dealer().ok_or(GameError::NoHandInProgress)?;
        let n = self.table.players().len();
        let order: Vec<usize> = (1..=n)
            .map(|step| (dealer + step) % n)
            .filter(|&i| self.table.players()[i].in_game())
            .collect();
        for _ in 0..2 {
            for &seat in &order {
                let card = self.deck.deal(1)?;
                self.table.deal_hole(seat, &card)?;
            }
        }
        Ok(())
    }

    /// Burns one card, then lays `n` community cards and opens the street.
    pub fn deal_community(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if !self.table.in_hand() {
            return Err(GameError::NoHandInProgress);
        }
        if !self.table.is_round_over() {
            return Err(GameError::IllegalState(
                "community cards dealt while betting is open".into(),
            ));
        }
        self.deck.burn()?;
        let cards = self.deck.deal(n)?;
        self.table.add_community(&cards)?;
        debug!(board = ?self.table.community(), street = ?self.table.street(), "community dealt");
        Ok(cards)
    }

    pub fn current_player(&self) -> Option<usize> {
        self.table.to_act()
    }

    pub fn legal_actions(&self, seat: usize) -> Vec<Action> {
        self.table.legal_actions(seat)
    }

    pub fn decision_context(&self, seat: usize) -> Option<DecisionContext> {
        DecisionContext::for_seat(&self.table, seat)
    }

    /// Applies one move for the seat to act and records it.
    pub fn apply_action(&mut self, seat: usize, action: Action) -> Result<ActionOutcome, GameError> {
        let street = self.table.street();
        let outcome = self.table.apply_action(seat, action)?;
        self.actions.push(ActionRecord {
            seat,
            street,
            action,
            chips: outcome.chips,
        });
        Ok(outcome)
    }

    /// Asks the seat to act for a move until the street closes. `deciders`
    /// is indexed by seat.
    pub fn run_betting_street(&mut self, deciders: &mut [Box<dyn Decider>]) -> Result<(), GameError> {
        let seats = self.table.players().len();
        if deciders.len() != seats {
            return Err(GameError::DeciderCount {
                expected: seats,
                actual: deciders.len(),
            });
        }
        while let Some(seat) = self.table.to_act() {
            let ctx = DecisionContext::for_seat(&self.table, seat).ok_or_else(|| {
                GameError::IllegalState(format!("seat {seat} is to act with no legal move"))
            })?;
            let action = deciders[seat].choose_move(&ctx);
            self.apply_action(seat, action)?;
        }
        Ok(())
    }

    pub fn is_hand_over(&self) -> bool {
        self.table.is_hand_over()
    }

    pub fn settle_hand(&mut self) -> Result<Settlement, GameError> {
        self.table.settle_hand()
    }

    pub fn is_session_over(&self) -> bool {
        self.table.is_session_over()
    }

    /// Plays a complete hand. When betting can no longer happen the rest of
    /// the board is still dealt so the showdown has five cards.
    pub fn play_hand(&mut self, deciders: &mut [Box<dyn Decider>]) -> Result<HandRecord, GameError> {
        self.start_hand()?;
        self.post_blinds()?;
        self.deal_hole()?;
        self.run_betting_street(deciders)?;
        for n in [3, 1, 1] {
            if self.table.live_seats().len() <= 1 {
                break;
            }
            self.deal_community(n)?;
            self.run_betting_street(deciders)?;
        }
        self.finish_hand()
    }

    fn finish_hand(&mut self) -> Result<HandRecord, GameError> {
        let dealer = self.table.dealer().ok_or(GameError::NoHandInProgress)?;
        let blinds = self.table.blinds();
        let live = self.table.live_seats();
        let settlement = self.settle_hand()?;

        let showdown = if live.len() > 1 {
            live.iter()
                .filter_map(|&seat| {
                    let p = &self.table.players()[seat];
                    p.last_rank().map(|rank| ShownHand {
                        seat,
                        hole: p.hand().to_vec(),
                        rank,
                    })
                })
                .collect()
        } else {
            Vec::new()
        };

        Ok(HandRecord {
            hand_id: String::new(),
            seed: Some(self.seed),
            players: self.table.players().iter().map(|p| p.name().to_string()).collect(),
            dealer,
            blinds,
            actions: std::mem::take(&mut self.actions),
            board: self.table.community().to_vec(),
            payouts: settlement.payouts,
            deltas: settlement.deltas,
            showdown,
            ts: None,
        })
    }
}
