use serde::{Deserialize, Serialize};

use crate::errors::GameError;
use crate::player::Action as A;

/// Default number of bets and raises allowed per street.
pub const RAISE_CAP: u32 = 4;

/// How far a bet or raise lifts the table bet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RaiseSize {
    /// A multiple of the current big blind
    BigBlinds(u32),
    /// A flat number of chips
    Fixed(u32),
}

impl RaiseSize {
    pub fn increment(&self, big_blind: u32) -> u32 {
        match *self {
            RaiseSize::BigBlinds(n) => big_blind.saturating_mul(n).max(1),
            RaiseSize::Fixed(n) => n.max(1),
        }
    }
}

impl Default for RaiseSize {
    fn default() -> Self {
        RaiseSize::BigBlinds(1)
    }
}

/// The numbers that decide which moves a seat may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BettingContext {
    pub chips: u32,
    pub current_bet: u32,
    pub last_bet: u32,
    pub raise_increment: u32,
    pub raise_count: u32,
    pub raise_cap: u32,
}

impl BettingContext {
    pub fn to_call(&self) -> u32 {
        self.last_bet.saturating_sub(self.current_bet)
    }

    /// Table bet after a full bet or raise. Saturates at `u32::MAX`.
    pub fn raise_to(&self) -> u32 {
        self.last_bet.saturating_add(self.raise_increment)
    }

    /// Chips a full bet or raise costs this seat.
    pub fn raise_cost(&self) -> u32 {
        self.raise_to().saturating_sub(self.current_bet)
    }

    pub fn capped(&self) -> bool {
        self.raise_count >= self.raise_cap
    }
}

/// Legal moves for a seat that still has chips, in a stable order.
///
/// ```
/// use holdem_engine::player::Action;
/// use holdem_engine::rules::{legal_actions, BettingContext};
///
/// let ctx = BettingContext {
///     chips: 1000,
///     current_bet: 0,
///     last_bet: 40,
///     raise_increment: 20,
///     raise_count: 4,
///     raise_cap: 4,
/// };
/// assert_eq!(legal_actions(&ctx), vec![Action::Fold, Action::Call, Action::AllIn]);
/// ```
pub fn legal_actions(ctx: &BettingContext) -> Vec<A> {
    if ctx.chips == 0 {
        return Vec::new();
    }
    let to_call = ctx.to_call();
    let can_raise = !ctx.capped() && ctx.chips > ctx.raise_cost();

    let mut legal = vec![A::Fold];
    if to_call == 0 {
        legal.push(A::Check);
    } else if ctx.chips >= to_call {
        legal.push(A::Call);
    }
    if can_raise {
        legal.push(if to_call == 0 { A::Bet } else { A::Raise });
    } else {
        legal.push(A::AllIn);
    }
    legal
}

/// An accepted move with its chip cost resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    /// Lift the table bet to `to`, paying `cost`
    Raise { to: u32, cost: u32 },
    AllIn(u32),
}

/// Checks `action` against the legal set and prices it.
///
/// # Errors
///
/// [`GameError::InvalidAction`] when the move is not legal for the seat. The
/// move is never coerced into a different one.
///
/// ```
/// use holdem_engine::errors::GameError;
/// use holdem_engine::player::Action;
/// use holdem_engine::rules::{validate_action, BettingContext, ValidatedAction};
///
/// let ctx = BettingContext {
///     chips: 1000,
///     current_bet: 10,
///     last_bet: 20,
///     raise_increment: 20,
///     raise_count: 1,
///     raise_cap: 4,
/// };
/// assert_eq!(validate_action(&ctx, 0, Action::Call), Ok(ValidatedAction::Call(10)));
/// assert_eq!(
///     validate_action(&ctx, 0, Action::Raise),
///     Ok(ValidatedAction::Raise { to: 40, cost: 30 })
/// );
/// assert!(matches!(
///     validate_action(&ctx, 0, Action::Check),
///     Err(GameError::InvalidAction { .. })
/// ));
/// ```
pub fn validate_action(
    ctx: &BettingContext,
    seat: usize,
    action: A,
) -> Result<ValidatedAction, GameError> {
    let legal = legal_actions(ctx);
    if !legal.contains(&action) {
        return Err(GameError::InvalidAction {
            seat,
            action,
            legal,
        });
    }
    Ok(match action {
        A::Fold => ValidatedAction::Fold,
        A::Check => ValidatedAction::Check,
        A::Call => ValidatedAction::Call(ctx.to_call()),
        A::Bet | A::Raise => ValidatedAction::Raise {
            to: ctx.raise_to(),
            cost: ctx.raise_cost(),
        },
        A::AllIn => ValidatedAction::AllIn(ctx.chips),
    })
}

/// Blinds for a 1-based level; each level doubles the base blinds.
pub fn blinds_for_level(small_blind: u32, big_blind: u32, level: u32) -> (u32, u32) {
    let factor = 1u32
        .checked_shl(level.saturating_sub(1))
        .unwrap_or(u32::MAX);
    (
        small_blind.saturating_mul(factor),
        big_blind.saturating_mul(factor),
    )
}
