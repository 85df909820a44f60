//! One module per subcommand. Each exposes a `handle_*_command` function
//! taking its output streams as `&mut dyn Write` and returning
//! `Result<(), CliError>`.

pub mod cfg;
pub mod eval;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use eval::handle_eval_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use holdem_ai::{Style, create_ai};
use holdem_engine::decision::Decider;

use crate::error::CliError;

/// Seat name for a computer player, e.g. `risky-3`.
pub(crate) fn computer_name(style: Style, seat: usize) -> String {
    format!("{}-{}", style, seat)
}

/// Style of each seat in `seats`, cycling through `styles`.
pub(crate) fn styles_for(styles: &[Style], seats: std::ops::Range<usize>) -> Vec<Style> {
    seats
        .enumerate()
        .map(|(i, _)| styles[i % styles.len()])
        .collect()
}

/// A computer decider per seat, each seeded from the session seed.
pub(crate) fn computer_seat(style: Style, seat: usize, seed: u64) -> Result<Box<dyn Decider>, CliError> {
    Ok(create_ai(style.as_str(), seed.wrapping_add(seat as u64))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_cycle_over_seats() {
        let styles = [Style::Safe, Style::Risky];
        assert_eq!(
            styles_for(&styles, 1..4),
            vec![Style::Safe, Style::Risky, Style::Safe]
        );
        assert_eq!(computer_name(Style::HandAware, 2), "hand_aware-2");
    }
}
