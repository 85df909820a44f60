//! Terminal output shared by the commands.

use std::io::Write;

use holdem_engine::table::{Settlement, Table};

use crate::formatters::{format_board, format_cards, format_hand_rank};

pub fn write_error(err: &mut dyn Write, msg: &str) -> std::io::Result<()> {
    writeln!(err, "Error: {}", msg)
}

/// Display a warning message to stderr with "WARNING:" prefix
pub fn display_warning(err: &mut dyn Write, message: &str) -> std::io::Result<()> {
    writeln!(err, "WARNING: {}", message)
}

/// The public table: board, pot and one line per seat. Only `reveal`'s hole
/// cards are printed.
pub fn write_table(out: &mut dyn Write, table: &Table, reveal: Option<usize>) -> std::io::Result<()> {
    writeln!(
        out,
        "Board: {}  Pot: {}  Bet: {}",
        format_board(table.community()),
        table.pot_total(),
        table.last_bet()
    )?;
    for (seat, p) in table.players().iter().enumerate() {
        let marker = if table.to_act() == Some(seat) { '>' } else { ' ' };
        let button = if p.is_dealer() { " (D)" } else { "" };
        let status = if !p.in_game() {
            "  out"
        } else if p.is_folded() {
            "  folded"
        } else if p.is_all_in() {
            "  all-in"
        } else {
            ""
        };
        write!(
            out,
            "{} {:<2} {:<12} chips {:>6}  bet {:>5}{}{}",
            marker,
            seat,
            p.name(),
            p.chips(),
            p.current_bet(),
            button,
            status
        )?;
        if reveal == Some(seat) && !p.hand().is_empty() {
            write!(out, "  {}", format_cards(p.hand()))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Shown hands and who took each pot.
pub fn write_settlement(
    out: &mut dyn Write,
    table: &Table,
    settlement: &Settlement,
) -> std::io::Result<()> {
    for (seat, p) in table.players().iter().enumerate() {
        if let Some(rank) = p.last_rank() {
            writeln!(
                out,
                "  {} ({}) shows {}: {}",
                p.name(),
                seat,
                format_cards(p.hand()),
                format_hand_rank(&rank)
            )?;
        }
    }
    for (i, payout) in settlement.payouts.iter().enumerate() {
        let pot = if i == 0 {
            "main pot".to_string()
        } else {
            format!("side pot {}", i)
        };
        let names: Vec<&str> = payout
            .winners
            .iter()
            .filter_map(|&w| table.player(w).map(|p| p.name()))
            .collect();
        match &payout.rank {
            Some(rank) => writeln!(
                out,
                "  {} wins {} of {} with {}",
                names.join(" and "),
                pot,
                payout.amount,
                rank.category.name()
            )?,
            None => writeln!(out, "  {} wins {} of {}", names.join(" and "), pot, payout.amount)?,
        }
    }
    Ok(())
}

/// Seats ordered by chips, most first.
pub fn write_standings(out: &mut dyn Write, table: &Table) -> std::io::Result<()> {
    let mut order: Vec<usize> = (0..table.players().len()).collect();
    order.sort_by_key(|&i| std::cmp::Reverse(table.players()[i].chips()));
    writeln!(out, "Final standings:")?;
    for (place, seat) in order.into_iter().enumerate() {
        let p = &table.players()[seat];
        writeln!(out, "  {}. {:<12} {}", place + 1, p.name(), p.chips())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdem_engine::table::TableConfig;

    #[test]
    fn table_lists_every_seat() {
        let table = Table::with_names(&["you", "safe-1", "risky-2"], &TableConfig::default());
        let mut out = Vec::new();
        write_table(&mut out, &table, Some(0)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("Board: []  Pot: 0"));
        assert_eq!(text.lines().count(), 4);
        assert!(text.contains("risky-2"));
    }

    #[test]
    fn standings_put_the_biggest_stack_first() {
        let players = vec![
            holdem_engine::player::Player::new("small", 10),
            holdem_engine::player::Player::new("big", 500),
        ];
        let table = Table::new(players, &TableConfig::default());
        let mut out = Vec::new();
        write_standings(&mut out, &table).unwrap();
        let text = String::from_utf8(out).unwrap();
        let big = text.find("big").unwrap();
        let small = text.find("small").unwrap();
        assert!(big < small);
    }
}
