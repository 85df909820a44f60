//! Computer playing styles.
//!
//! Every style first classifies the spot it is in (see [`Situation`]), picks
//! an [`Intent`] and only then maps the intent onto one of the legal moves,
//! so a style can never produce a move the engine would reject.
//!
//! The chance-based styles (`safe`, `risky`, `random`) draw a uniform number
//! from their own seeded RNG and walk a cumulative probability table. The
//! `hand_aware` style replaces the draw with the normalized hand strength from
//! [`holdem_engine::hand::estimate_strength`].

use std::fmt;
use std::str::FromStr;

use holdem_engine::decision::{Decider, DecisionContext};
use holdem_engine::hand::estimate_strength;
use holdem_engine::player::Action;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use crate::AiError;

/// The five spots every style distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Situation {
    /// Cannot afford a raise nor the call
    ShortCannotCall,
    /// Cannot afford a raise but can check or call
    ShortCanCall,
    /// Can bet; nothing to call
    Unopened,
    /// Can raise; facing a bet
    FacingBet,
    /// Bets and raises used up for this street
    Capped,
}

impl Situation {
    pub fn of(ctx: &DecisionContext) -> Self {
        let raise_cost = ctx.raise_to.saturating_sub(ctx.current_bet);
        if ctx.chips <= raise_cost {
            if ctx.can(Action::Check) || ctx.can(Action::Call) {
                Situation::ShortCanCall
            } else {
                Situation::ShortCannotCall
            }
        } else if ctx.raise_count >= ctx.raise_cap {
            Situation::Capped
        } else if ctx.to_call == 0 {
            Situation::Unopened
        } else {
            Situation::FacingBet
        }
    }
}

/// A move before it is fitted to the legal set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Fold,
    /// Check, or call when facing a bet
    Stay,
    /// Bet, or raise when facing a bet
    Push,
    AllIn,
}

impl Intent {
    /// The legal move closest to the intent. Folding is never chosen when a
    /// check is free.
    pub fn resolve(self, ctx: &DecisionContext) -> Action {
        let pick = |candidates: &[Action]| candidates.iter().copied().find(|a| ctx.can(*a));
        let chosen = match self {
            Intent::Fold => pick(&[Action::Check, Action::Fold]),
            Intent::Stay => pick(&[Action::Check, Action::Call]),
            Intent::Push => pick(&[Action::Bet, Action::Raise, Action::Check, Action::Call]),
            Intent::AllIn => pick(&[Action::AllIn, Action::Raise, Action::Bet, Action::Call]),
        };
        chosen.unwrap_or_else(|| ctx.passive())
    }
}

/// Cumulative thresholds: the first entry whose bound is at least the draw
/// wins.
type Table = &'static [(f64, Intent)];

struct Odds {
    short_cannot_call: Table,
    short_can_call: Table,
    open: Table,
    capped: Table,
}

impl Odds {
    fn table(&self, situation: Situation) -> Table {
        match situation {
            Situation::ShortCannotCall => self.short_cannot_call,
            Situation::ShortCanCall => self.short_can_call,
            Situation::Unopened | Situation::FacingBet => self.open,
            Situation::Capped => self.capped,
        }
    }

    fn draw(&self, situation: Situation, x: f64) -> Intent {
        let table = self.table(situation);
        table
            .iter()
            .find(|(bound, _)| x <= *bound)
            .or(table.last())
            .map(|(_, intent)| *intent)
            .unwrap_or(Intent::Stay)
    }
}

use Intent::{AllIn, Fold, Push, Stay};

const SAFE: Odds = Odds {
    short_cannot_call: &[(0.60, AllIn), (1.0, Fold)],
    short_can_call: &[(0.60, Stay), (0.80, AllIn), (1.0, Fold)],
    open: &[(0.70, Stay), (0.90, Push), (1.0, Fold)],
    capped: &[(0.90, Stay), (1.0, Fold)],
};

const RISKY: Odds = Odds {
    short_cannot_call: &[(0.90, AllIn), (1.0, Fold)],
    short_can_call: &[(0.40, Stay), (0.90, AllIn), (1.0, Fold)],
    open: &[(0.40, Stay), (0.90, Push), (1.0, Fold)],
    capped: &[(0.90, Stay), (1.0, Fold)],
};

const RANDOM: Odds = Odds {
    short_cannot_call: &[(0.50, AllIn), (1.0, Fold)],
    short_can_call: &[(0.30, Stay), (0.66, AllIn), (1.0, Fold)],
    open: &[(0.33, Stay), (0.66, Push), (1.0, Fold)],
    capped: &[(0.66, Stay), (1.0, Fold)],
};

/// Intent from hand strength alone; stronger hands act more boldly.
pub fn hand_aware_intent(situation: Situation, strength: f64) -> Intent {
    match situation {
        Situation::ShortCannotCall if strength >= 0.50 => AllIn,
        Situation::ShortCannotCall => Fold,
        Situation::ShortCanCall if strength >= 0.70 => AllIn,
        Situation::Unopened | Situation::FacingBet if strength >= 0.70 => Push,
        Situation::ShortCanCall | Situation::Unopened | Situation::FacingBet
            if strength >= 0.40 =>
        {
            Stay
        }
        Situation::Capped if strength >= 0.50 => Stay,
        _ => Fold,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Safe,
    Risky,
    Random,
    HandAware,
    Passive,
}

impl Style {
    pub const ALL: [Style; 5] = [
        Style::Safe,
        Style::Risky,
        Style::Random,
        Style::HandAware,
        Style::Passive,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Style::Safe => "safe",
            Style::Risky => "risky",
            Style::Random => "random",
            Style::HandAware => "hand_aware",
            Style::Passive => "passive",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = AiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Style::ALL
            .into_iter()
            .find(|style| style.as_str() == key)
            .ok_or_else(|| AiError::UnknownAi(s.to_string()))
    }
}

/// A computer seat playing one [`Style`].
#[derive(Debug, Clone)]
pub struct StyledAi {
    style: Style,
    rng: ChaCha20Rng,
}

impl StyledAi {
    pub fn new(style: Style, seed: u64) -> Self {
        Self {
            style,
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    pub fn style(&self) -> Style {
        self.style
    }

    /// The intent for this turn, before fitting it to the legal moves.
    pub fn intent(&mut self, ctx: &DecisionContext) -> Intent {
        let situation = Situation::of(ctx);
        match self.style {
            Style::Safe => SAFE.draw(situation, self.rng.random::<f64>()),
            Style::Risky => RISKY.draw(situation, self.rng.random::<f64>()),
            Style::Random => RANDOM.draw(situation, self.rng.random::<f64>()),
            Style::HandAware => {
                let strength = estimate_strength(&ctx.hole, &ctx.community).unwrap_or(0.0);
                hand_aware_intent(situation, strength)
            }
            Style::Passive => Stay,
        }
    }
}

impl Decider for StyledAi {
    fn choose_move(&mut self, ctx: &DecisionContext) -> Action {
        self.intent(ctx).resolve(ctx)
    }

    fn name(&self) -> &str {
        self.style.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;
    use holdem_engine::rules::{legal_actions, BettingContext};
    use holdem_engine::table::Street;

    fn ctx(chips: u32, current_bet: u32, last_bet: u32, raise_count: u32) -> DecisionContext {
        let betting = BettingContext {
            chips,
            current_bet,
            last_bet,
            raise_increment: 10,
            raise_count,
            raise_cap: 4,
        };
        DecisionContext {
            seat: 0,
            street: Street::Preflop,
            legal: legal_actions(&betting),
            to_call: betting.to_call(),
            raise_increment: 10,
            raise_to: betting.raise_to(),
            raise_count,
            raise_cap: 4,
            last_bet,
            chips,
            current_bet,
            hole: parse_cards("7c 2d").unwrap(),
            community: Vec::new(),
            pot: 30,
            seats: Vec::new(),
        }
    }

    #[test]
    fn situations_follow_stack_and_cap() {
        assert_eq!(Situation::of(&ctx(5, 0, 20, 1)), Situation::ShortCannotCall);
        assert_eq!(Situation::of(&ctx(25, 0, 20, 1)), Situation::ShortCanCall);
        assert_eq!(Situation::of(&ctx(500, 0, 0, 0)), Situation::Unopened);
        assert_eq!(Situation::of(&ctx(500, 0, 20, 1)), Situation::FacingBet);
        assert_eq!(Situation::of(&ctx(500, 0, 40, 4)), Situation::Capped);
    }

    #[test]
    fn intents_fit_the_legal_set() {
        let unopened = ctx(500, 0, 0, 0);
        assert_eq!(Push.resolve(&unopened), Action::Bet);
        assert_eq!(Fold.resolve(&unopened), Action::Check);

        let capped = ctx(500, 0, 40, 4);
        assert_eq!(Push.resolve(&capped), Action::Call);
        assert_eq!(AllIn.resolve(&capped), Action::AllIn);
        assert_eq!(Fold.resolve(&capped), Action::Fold);

        let deep = ctx(500, 0, 20, 1);
        assert_eq!(AllIn.resolve(&deep), Action::Raise);
    }

    #[test]
    fn every_style_stays_legal() {
        let spots = [
            ctx(5, 0, 20, 1),
            ctx(25, 0, 20, 1),
            ctx(500, 0, 0, 0),
            ctx(500, 10, 20, 1),
            ctx(500, 0, 40, 4),
        ]
        .map(|mut c| {
            c.community = parse_cards("Ks 9d 4h").unwrap();
            c
        });
        for style in Style::ALL {
            let mut ai = StyledAi::new(style, 17);
            for _ in 0..200 {
                for spot in &spots {
                    let a = ai.choose_move(spot);
                    assert!(spot.can(a), "{style} chose {a:?} from {:?}", spot.legal);
                }
            }
        }
    }

    #[test]
    fn same_seed_same_choices() {
        let spot = ctx(500, 0, 20, 1);
        let mut a = StyledAi::new(Style::Random, 4);
        let mut b = StyledAi::new(Style::Random, 4);
        let xs: Vec<Action> = (0..50).map(|_| a.choose_move(&spot)).collect();
        let ys: Vec<Action> = (0..50).map(|_| b.choose_move(&spot)).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn draw_walks_cumulative_bounds() {
        assert_eq!(SAFE.draw(Situation::FacingBet, 0.10), Stay);
        assert_eq!(SAFE.draw(Situation::FacingBet, 0.85), Push);
        assert_eq!(SAFE.draw(Situation::FacingBet, 0.95), Fold);
        assert_eq!(RISKY.draw(Situation::ShortCannotCall, 0.5), AllIn);
    }

    #[test]
    fn hand_aware_pushes_monsters_and_folds_trash() {
        let mut ai = StyledAi::new(Style::HandAware, 0);

        let mut made = ctx(500, 0, 0, 0);
        made.hole = parse_cards("Ah Kh").unwrap();
        made.community = parse_cards("Qh Jh Th").unwrap();
        assert_eq!(ai.choose_move(&made), Action::Bet);

        let trash = ctx(500, 0, 20, 1);
        assert_eq!(ai.choose_move(&trash), Action::Fold);
    }

    #[test]
    fn style_names_parse() {
        assert_eq!("hand-aware".parse::<Style>().unwrap(), Style::HandAware);
        assert_eq!(" SAFE ".parse::<Style>().unwrap(), Style::Safe);
        assert!("shark".parse::<Style>().is_err());
    }
}
