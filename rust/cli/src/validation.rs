//! Parsing of the human seat's typed moves.

use holdem_engine::player::Action;

#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Action(Action),
    /// `q` or `quit`
    Quit,
    Invalid(String),
}

/// Parses one line of input, case-insensitive.
///
/// Single letters `f c k b r a q` or the words `fold`, `check`, `call`,
/// `bet`, `raise`, `allin`/`all-in`, `quit`. Amounts are not accepted: bets
/// and raises always add the table's raise increment.
///
/// ```rust
/// use holdem_cli::validation::{parse_player_action, ParseResult};
/// use holdem_engine::player::Action;
///
/// assert_eq!(parse_player_action("R"), ParseResult::Action(Action::Raise));
/// assert_eq!(parse_player_action("all-in"), ParseResult::Action(Action::AllIn));
/// assert_eq!(parse_player_action("quit"), ParseResult::Quit);
/// assert!(matches!(parse_player_action("bet 50"), ParseResult::Invalid(_)));
/// ```
pub fn parse_player_action(input: &str) -> ParseResult {
    let input = input.trim().to_lowercase();
    let parts: Vec<&str> = input.split_whitespace().collect();

    match parts.as_slice() {
        [] => ParseResult::Invalid("Empty input".to_string()),
        ["q" | "quit"] => ParseResult::Quit,
        ["f" | "fold"] => ParseResult::Action(Action::Fold),
        ["k" | "check"] => ParseResult::Action(Action::Check),
        ["c" | "call"] => ParseResult::Action(Action::Call),
        ["b" | "bet"] => ParseResult::Action(Action::Bet),
        ["r" | "raise"] => ParseResult::Action(Action::Raise),
        ["a" | "allin" | "all-in" | "all_in"] => ParseResult::Action(Action::AllIn),
        ["all", "in"] => ParseResult::Action(Action::AllIn),
        [verb @ ("b" | "bet" | "r" | "raise"), _] => ParseResult::Invalid(format!(
            "'{}' takes no amount; every raise adds the table increment",
            verb
        )),
        _ => ParseResult::Invalid(format!(
            "Unrecognized action: '{}'. Use f, c, k, b, r, a or q",
            input
        )),
    }
}

/// Maps a move onto its legal twin: `c` checks when nothing is owed, and `b`
/// and `r` stand in for each other. A check is never turned into a call.
/// Anything else is returned unchanged for the engine to judge.
pub fn fit_to_legal(action: Action, legal: &[Action]) -> Action {
    if legal.contains(&action) {
        return action;
    }
    let twin = match action {
        Action::Call => Action::Check,
        Action::Bet => Action::Raise,
        Action::Raise => Action::Bet,
        other => other,
    };
    if legal.contains(&twin) { twin } else { action }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_words_agree() {
        for (letter, word) in [
            ("f", "fold"),
            ("k", "check"),
            ("c", "call"),
            ("b", "bet"),
            ("r", "raise"),
            ("a", "allin"),
        ] {
            assert_eq!(parse_player_action(letter), parse_player_action(word));
        }
    }

    #[test]
    fn empty_and_unknown_are_invalid() {
        assert_eq!(
            parse_player_action("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
        match parse_player_action("shove") {
            ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn c_checks_when_nothing_is_owed() {
        let legal = [Action::Fold, Action::Check, Action::Bet];
        assert_eq!(fit_to_legal(Action::Call, &legal), Action::Check);
        assert_eq!(fit_to_legal(Action::Raise, &legal), Action::Bet);
    }

    #[test]
    fn b_raises_but_k_stays_a_check_facing_a_bet() {
        let legal = [Action::Fold, Action::Call, Action::Raise];
        assert_eq!(fit_to_legal(Action::Bet, &legal), Action::Raise);
        assert_eq!(fit_to_legal(Action::Check, &legal), Action::Check);
    }

    #[test]
    fn no_twin_leaves_the_move_alone() {
        let legal = [Action::Fold, Action::AllIn];
        assert_eq!(fit_to_legal(Action::Raise, &legal), Action::Raise);
        assert_eq!(fit_to_legal(Action::Call, &legal), Action::Call);
    }
}
