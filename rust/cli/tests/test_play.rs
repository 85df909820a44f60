use std::io::Cursor;

use holdem_cli::CliError;
use holdem_cli::commands::handle_play_command;
use holdem_cli::config::Config;

fn table(players: usize) -> Config {
    Config {
        players,
        ai: "passive".to_string(),
        seed: Some(17),
        ..Config::default()
    }
}

fn play(cfg: &Config, hands: u32, input: &str) -> (Result<(), CliError>, String, String) {
    let mut out: Vec<u8> = Vec::new();
    let mut err: Vec<u8> = Vec::new();
    let mut stdin = Cursor::new(input.as_bytes().to_vec());
    let res = handle_play_command(cfg, hands, &mut out, &mut err, &mut stdin);
    (
        res,
        String::from_utf8_lossy(&out).into_owned(),
        String::from_utf8_lossy(&err).into_owned(),
    )
}

#[test]
fn quit_at_first_prompt_abandons_the_hand() {
    let (res, out, _) = play(&table(3), 5, "q\n");
    assert!(res.is_ok());
    assert!(out.contains("Hand 1"));
    assert!(out.contains("Hand abandoned."));
    assert!(out.contains("Hands played: 0"));
    assert!(!out.contains("Result:"));
}

#[test]
fn bad_input_reprompts_until_a_legal_move() {
    // three-handed, seat 0 acts first facing the big blind
    let (res, out, err) = play(&table(3), 1, "zz\na\nf\n");
    assert!(res.is_ok(), "{res:?}");
    assert!(err.contains("Unrecognized action: 'zz'"));
    assert!(err.contains("all-in is not allowed now"));
    assert!(out.contains("you: fold"));
    assert!(out.contains("Hands played: 1"));
}

#[test]
fn k_facing_the_big_blind_is_refused_not_called() {
    let (res, out, err) = play(&table(3), 1, "k\nf\n");
    assert!(res.is_ok(), "{res:?}");
    assert!(err.contains("check is not allowed now"), "{err}");
    assert!(!out.contains("you: call"));
    assert!(out.contains("you: fold"));
    assert!(out.contains("Hands played: 1"));
}

#[test]
fn c_calls_then_checks_through_to_showdown() {
    let input = "c\n".repeat(20);
    let (res, out, err) = play(&table(3), 2, &input);
    assert!(res.is_ok(), "{res:?}");
    assert!(err.is_empty(), "{err}");
    assert!(out.contains("you: call 10"));
    assert!(out.contains("you: check"));
    assert_eq!(out.matches("Result:").count(), 2);
    assert!(out.contains(" shows "));
    assert!(out.contains("Hands played: 2"));
}

#[test]
fn closed_input_mid_hand_is_an_interruption() {
    let (res, out, _) = play(&table(2), 1, "");
    assert!(matches!(res, Err(CliError::Interrupted(_))));
    assert!(out.contains("Your cards"));
}

#[test]
fn zero_hands_is_rejected() {
    let (res, out, _) = play(&table(2), 0, "c\n");
    assert!(matches!(res, Err(CliError::InvalidInput(_))));
    assert!(out.is_empty());
}
