//! Computer-only sessions with an optional JSONL hand history.

use std::io::Write;

use holdem_engine::decision::Decider;
use holdem_engine::engine::Engine;
use holdem_engine::logger::{HandLogger, HandRecord};
use tracing::info;

use super::{computer_name, computer_seat, styles_for};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::format_board;
use crate::ui;

/// Plays up to `hands` hands between computer seats. Each hand prints one
/// summary line; `output` receives one JSON record per hand.
pub fn handle_sim_command(
    cfg: &Config,
    hands: u32,
    output: Option<&str>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let seed = cfg.seed.unwrap_or_else(rand::random);
    let styles = styles_for(&cfg.styles()?, 0..cfg.players);
    let names: Vec<String> = styles
        .iter()
        .enumerate()
        .map(|(seat, &style)| computer_name(style, seat))
        .collect();
    let mut deciders = styles
        .iter()
        .enumerate()
        .map(|(seat, &style)| computer_seat(style, seat, seed))
        .collect::<Result<Vec<Box<dyn Decider>>, CliError>>()?;

    let mut logger = match output {
        Some(path) => HandLogger::create(path)?,
        None => HandLogger::detached(&chrono::Utc::now().format("%Y%m%d").to_string()),
    };

    let mut engine = Engine::new(&names, cfg.table_config(), Some(seed));
    writeln!(
        out,
        "sim: players={} hands={} seed={} ai={}",
        cfg.players, hands, seed, cfg.ai
    )?;

    let mut played = 0u32;
    while played < hands && !engine.is_session_over() {
        let mut record = engine.play_hand(&mut deciders)?;
        record.hand_id = logger.next_id();
        logger.write(&record)?;
        writeln!(out, "{}", summarize(&record))?;
        played += 1;
    }

    info!(played, seed, "simulation finished");
    if played < hands {
        ui::display_warning(
            err,
            &format!("session ended after {} of {} hands: one seat holds every chip", played, hands),
        )?;
    }
    writeln!(out, "Hands played: {}", played)?;
    if let Some(path) = output {
        writeln!(out, "History written to {}", path)?;
    }
    ui::write_standings(out, engine.table())?;
    Ok(())
}

/// `20250101-000003 board [..] risky-1 +40 safe-2 +15`, one entry per pot.
fn summarize(record: &HandRecord) -> String {
    let mut line = format!("{} board {}", record.hand_id, format_board(&record.board));
    for payout in &record.payouts {
        let names: Vec<&str> = payout
            .winners
            .iter()
            .filter_map(|&w| record.players.get(w).map(String::as_str))
            .collect();
        line.push_str(&format!(" {} +{}", names.join("/"), payout.amount));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(players: usize, ai: &str) -> Config {
        Config {
            players,
            ai: ai.to_string(),
            seed: Some(9),
            ..Config::default()
        }
    }

    #[test]
    fn one_summary_line_per_hand() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        handle_sim_command(&config(3, "passive"), 4, None, &mut out, &mut err).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().filter(|l| l.contains(" board [")).count(), 4);
        assert!(text.contains("Hands played: 4"));
        assert!(err.is_empty());
    }

    #[test]
    fn zero_hands_is_rejected() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let res = handle_sim_command(&config(2, "safe"), 0, None, &mut out, &mut err);
        assert!(matches!(res, Err(CliError::InvalidInput(ref m)) if m == "hands must be >= 1"));
        assert!(out.is_empty());
    }
}
