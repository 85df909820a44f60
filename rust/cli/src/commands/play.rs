//! # Play Command
//!
//! One human seat (seat 0) against computer seats. The human types a
//! letter per turn; the public table is printed after every move.
//!
//! - `q` ends the session after the current prompt; the unfinished hand is
//!   abandoned without moving chips
//! - input closing mid-hand is reported as [`CliError::Interrupted`]
//! - illegal or unreadable input re-prompts

use std::io::{BufRead, Write};

use holdem_engine::decision::{Decider, DecisionContext};
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::player::Action;
use tracing::debug;

use super::{computer_name, computer_seat, styles_for};
use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{format_action, format_board, format_cards};
use crate::io_utils::read_stdin_line;
use crate::ui;
use crate::validation::{ParseResult, fit_to_legal, parse_player_action};

const HUMAN: usize = 0;

enum Seat {
    Human,
    Computer(Box<dyn Decider>),
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Plays up to `hands` hands, stopping early when the human busts, one
/// seat holds every chip or the human quits.
pub fn handle_play_command(
    cfg: &Config,
    hands: u32,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }

    let seed = cfg.seed.unwrap_or_else(rand::random);
    let styles = styles_for(&cfg.styles()?, 1..cfg.players);

    let mut names = vec!["you".to_string()];
    let mut seats = vec![Seat::Human];
    for (i, style) in styles.into_iter().enumerate() {
        let seat = i + 1;
        names.push(computer_name(style, seat));
        seats.push(Seat::Computer(computer_seat(style, seat, seed)?));
    }

    let mut engine = Engine::new(&names, cfg.table_config(), Some(seed));
    writeln!(
        out,
        "play: players={} hands={} seed={} stack={}",
        cfg.players, hands, seed, cfg.starting_stack
    )?;
    writeln!(out, "Keys: f=fold k=check c=call b=bet r=raise a=all-in q=quit")?;

    let mut played = 0u32;
    for n in 1..=hands {
        if engine.is_session_over() {
            break;
        }
        if engine.table().players()[HUMAN].chips() == 0 {
            writeln!(out, "You are out of chips.")?;
            break;
        }

        writeln!(out)?;
        writeln!(out, "Hand {}", n)?;
        if play_hand(&mut engine, &mut seats, out, err, stdin)? == Flow::Quit {
            writeln!(out, "Hand abandoned.")?;
            break;
        }
        played += 1;
    }

    writeln!(out)?;
    writeln!(out, "Session completed. Hands played: {}", played)?;
    ui::write_standings(out, engine.table())?;
    Ok(())
}

fn play_hand(
    engine: &mut Engine,
    seats: &mut [Seat],
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Flow, CliError> {
    engine.start_hand()?;
    engine.post_blinds()?;
    engine.deal_hole()?;
    let (sb, bb) = engine.table().blinds();
    writeln!(out, "Blinds: SB={} BB={}", sb, bb)?;
    ui::write_table(out, engine.table(), Some(HUMAN))?;

    if play_street(engine, seats, out, err, stdin)? == Flow::Quit {
        return Ok(Flow::Quit);
    }
    let mut running_out = false;
    for n in [3, 1, 1] {
        if engine.table().live_seats().len() <= 1 {
            break;
        }
        if !running_out && engine.table().betting_closed() {
            writeln!(out, "No more betting; running out the board.")?;
            running_out = true;
        }
        engine.deal_community(n)?;
        writeln!(
            out,
            "{:?}: {}",
            engine.table().street(),
            format_board(engine.table().community())
        )?;
        if play_street(engine, seats, out, err, stdin)? == Flow::Quit {
            return Ok(Flow::Quit);
        }
    }

    let settlement = engine.settle_hand()?;
    writeln!(out, "Result:")?;
    ui::write_settlement(out, engine.table(), &settlement)?;
    Ok(Flow::Continue)
}

fn play_street(
    engine: &mut Engine,
    seats: &mut [Seat],
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Flow, CliError> {
    while let Some(seat) = engine.current_player() {
        let ctx = engine.decision_context(seat).ok_or_else(|| {
            GameError::IllegalState(format!("seat {} is to act with no legal move", seat))
        })?;
        let is_human = matches!(seats[seat], Seat::Human);
        let action = match &mut seats[seat] {
            Seat::Human => match prompt_human(&ctx, out, err, stdin)? {
                Some(action) => action,
                None => return Ok(Flow::Quit),
            },
            Seat::Computer(ai) => ai.choose_move(&ctx),
        };

        match engine.apply_action(seat, action) {
            Ok(outcome) => {
                let name = engine.table().players()[seat].name().to_string();
                writeln!(out, "{}: {}", name, format_action(outcome.action, outcome.chips))?;
                ui::write_table(out, engine.table(), Some(HUMAN))?;
            }
            Err(e) if is_human && !e.is_fatal() => ui::write_error(err, &e.to_string())?,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(Flow::Continue)
}

fn key(action: Action) -> &'static str {
    match action {
        Action::Fold => "f",
        Action::Check => "k",
        Action::Call => "c",
        Action::Bet => "b",
        Action::Raise => "r",
        Action::AllIn => "a",
    }
}

fn options(ctx: &DecisionContext) -> String {
    ctx.legal
        .iter()
        .map(|&a| match a {
            Action::Call => format!("{}={} {}", key(a), a.as_str(), ctx.to_call),
            Action::Bet | Action::Raise => format!("{}={} to {}", key(a), a.as_str(), ctx.raise_to),
            Action::AllIn => format!("{}={} {}", key(a), a.as_str(), ctx.chips),
            _ => format!("{}={}", key(a), a.as_str()),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Asks until the input names a legal move. `None` means quit.
fn prompt_human(
    ctx: &DecisionContext,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<Option<Action>, CliError> {
    let choices = options(ctx);
    loop {
        write!(
            out,
            "Your cards {}  pot {}  [{}]: ",
            format_cards(&ctx.hole),
            ctx.pot,
            choices
        )?;
        out.flush()?;

        let Some(line) = read_stdin_line(stdin) else {
            return Err(CliError::Interrupted(
                "input closed while waiting for your move".to_string(),
            ));
        };
        match parse_player_action(&line) {
            ParseResult::Action(action) => {
                let action = fit_to_legal(action, &ctx.legal);
                if ctx.can(action) {
                    debug!(seat = ctx.seat, ?action, "human move");
                    return Ok(Some(action));
                }
                ui::write_error(
                    err,
                    &format!("{} is not allowed now; choose from {}", action.as_str(), choices),
                )?;
            }
            ParseResult::Quit => return Ok(None),
            ParseResult::Invalid(msg) => ui::write_error(err, &msg)?,
        }
    }
}
