//! Text forms of cards, boards, moves and hand ranks for the terminal.
//!
//! Cards use unicode suit symbols (`A♠`) where the terminal is expected to
//! render them and fall back to letters (`As`) elsewhere.
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_cli::formatters::{format_board, format_card};
//!
//! let ace = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace) == "A♠" || format_card(&ace) == "As");
//! assert_eq!(format_board(&[]), "[]");
//! ```

use holdem_engine::cards::{Card, Rank};
use holdem_engine::hand::HandRank;
use holdem_engine::player::Action;

/// Windows consoles only render suit symbols in modern terminals.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

pub fn format_card(card: &Card) -> String {
    if supports_unicode() {
        card.pretty()
    } else {
        card.to_string()
    }
}

pub fn format_cards(cards: &[Card]) -> String {
    cards.iter().map(format_card).collect::<Vec<_>>().join(" ")
}

pub fn format_board(cards: &[Card]) -> String {
    format!("[{}]", format_cards(cards))
}

/// `"fold"`, `"check"`, `"call 10"`, `"raise 20"`, `"all-in 350"`.
pub fn format_action(action: Action, chips: u32) -> String {
    match action {
        Action::Fold | Action::Check => action.as_str().to_string(),
        _ => format!("{} {}", action.as_str(), chips),
    }
}

/// Category name with the ranks that decide ties, e.g. `two pair (K 9 4)`.
pub fn format_hand_rank(rank: &HandRank) -> String {
    let ranks: Vec<String> = rank
        .tiebreak
        .iter()
        .filter_map(|&v| Rank::from_u8(v))
        .map(|r| r.letter().to_string())
        .collect();
    format!("{} ({})", rank.category.name(), ranks.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::cards::parse_cards;
    use holdem_engine::hand::score;

    #[test]
    fn test_format_board_with_cards() {
        let board = parse_cards("Ah Kd 7c").unwrap();
        let s = format_board(&board);
        assert!(s.starts_with("[A"));
        assert!(s.ends_with(']'));
        assert_eq!(s.split_whitespace().count(), 3);
    }

    #[test]
    fn test_format_action_amounts() {
        assert_eq!(format_action(Action::Fold, 0), "fold");
        assert_eq!(format_action(Action::Check, 0), "check");
        assert_eq!(format_action(Action::Call, 10), "call 10");
        assert_eq!(format_action(Action::AllIn, 350), "all-in 350");
    }

    #[test]
    fn test_format_hand_rank_drops_padding() {
        let rank = score(&parse_cards("Kh Kd 9s 9c 4h").unwrap()).unwrap();
        assert_eq!(format_hand_rank(&rank), "two pair (K 9 4)");
    }
}
