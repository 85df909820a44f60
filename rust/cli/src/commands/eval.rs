//! Scores a hand given on the command line.

use std::io::Write;

use holdem_engine::cards::parse_cards;
use holdem_engine::hand::best_hand;

use crate::error::CliError;
use crate::formatters::{format_board, format_cards, format_hand_rank};

/// Prints the category, tiebreak ranks and best five of 5 to 7 cards.
pub fn handle_eval_command(cards: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let cards = parse_cards(cards).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    if !(5..=7).contains(&cards.len()) {
        return Err(CliError::InvalidInput(format!(
            "eval needs 5 to 7 cards, got {}",
            cards.len()
        )));
    }
    if let Some(dup) = cards
        .iter()
        .enumerate()
        .find_map(|(i, c)| cards[..i].contains(c).then_some(c))
    {
        return Err(CliError::InvalidInput(format!("card {} given twice", dup)));
    }

    let (rank, five) = best_hand(&cards)?;
    writeln!(out, "Cards:     {}", format_cards(&cards))?;
    writeln!(out, "Hand:      {}", format_hand_rank(&rank))?;
    writeln!(out, "Best five: {}", format_board(&five))?;
    writeln!(out, "Score:     {}", rank.score())?;
    Ok(())
}
