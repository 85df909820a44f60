use holdem_engine::betting::apply;
use holdem_engine::errors::GameError;
use holdem_engine::player::Action;
use holdem_engine::table::{Street, Table, TableConfig};

fn table(n: usize) -> Table {
    let names: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
    let mut t = Table::with_names(&names, &TableConfig::default());
    t.start_hand().unwrap();
    t.post_blinds().unwrap();
    t
}

#[test]
fn first_to_act_preflop_is_left_of_big_blind() {
    let t = table(4);
    assert_eq!(t.dealer(), Some(0));
    assert_eq!(t.small_blind_seat(), Some(1));
    assert_eq!(t.big_blind_seat(), Some(2));
    assert_eq!(t.to_act(), Some(3));
    assert_eq!(t.pot_total(), 15);
    assert_eq!(t.legal_actions(3), vec![Action::Fold, Action::Call, Action::Raise]);
    assert!(t.legal_actions(0).is_empty());
}

#[test]
fn heads_up_button_posts_small_blind_and_acts_first() {
    let mut t = table(2);
    assert_eq!(t.dealer(), Some(0));
    assert_eq!(t.small_blind_seat(), Some(0));
    assert_eq!(t.big_blind_seat(), Some(1));
    assert_eq!(t.to_act(), Some(0));

    t.apply_action(0, Action::Call).unwrap();
    assert_eq!(t.to_act(), Some(1));
    let out = t.apply_action(1, Action::Check).unwrap();
    assert!(out.round_over);
    assert_eq!(t.to_act(), None);
}

#[test]
fn fifth_raise_is_rejected_at_the_cap() {
    let mut t = table(3);
    // dealer 0, blinds 1 and 2: seat 0 opens
    for (seat, to) in [(0, 20), (1, 30), (2, 40), (0, 50)] {
        t.apply_action(seat, Action::Raise).unwrap();
        assert_eq!(t.last_bet(), to);
    }
    assert_eq!(t.raise_count(), 4);
    assert_eq!(t.to_act(), Some(1));
    assert_eq!(t.legal_actions(1), vec![Action::Fold, Action::Call, Action::AllIn]);

    let before = t.clone();
    let err = t.apply_action(1, Action::Raise).unwrap_err();
    assert!(matches!(err, GameError::InvalidAction { seat: 1, .. }));
    assert!(!err.is_fatal());
    assert_eq!(t, before);
}

#[test]
fn all_in_over_the_cap_reopens_action() {
    let mut t = table(3);
    for seat in [0, 1, 2, 0] {
        t.apply_action(seat, Action::Raise).unwrap();
    }
    let out = t.apply_action(1, Action::AllIn).unwrap();
    assert_eq!(out.chips, 970);
    assert_eq!(t.last_bet(), 1000);
    assert_eq!(t.raise_count(), 5);
    assert_eq!(t.to_act(), Some(2));
    assert_eq!(t.legal_actions(2), vec![Action::Fold, Action::Call, Action::AllIn]);
}

#[test]
fn call_locks_and_bet_unlocks_others() {
    let mut t = table(3);
    t.apply_action(0, Action::Call).unwrap();
    t.apply_action(1, Action::Call).unwrap();
    t.apply_action(2, Action::Bet).unwrap();
    // both callers owe a decision again
    assert_eq!(t.to_act(), Some(0));
    t.apply_action(0, Action::Call).unwrap();
    assert_eq!(t.to_act(), Some(1));
    let out = t.apply_action(1, Action::Fold).unwrap();
    assert!(out.round_over);
    assert!(!out.hand_over);
    assert_eq!(t.pot_total(), 20 + 20 + 10);
}

#[test]
fn advance_turn_is_idempotent_once_round_closes() {
    let mut t = table(2);
    t.apply_action(0, Action::Call).unwrap();
    t.apply_action(1, Action::Check).unwrap();
    let snapshot = t.clone();
    assert_eq!(t.advance_turn(), None);
    assert_eq!(t.advance_turn(), None);
    assert_eq!(t, snapshot);
}

#[test]
fn acting_out_of_turn_is_refused() {
    let mut t = table(3);
    let err = t.apply_action(2, Action::Check).unwrap_err();
    assert_eq!(
        err,
        GameError::NotPlayersTurn {
            expected: Some(0),
            actual: 2
        }
    );
}

#[test]
fn betting_open_blocks_the_flop() {
    let mut t = table(2);
    let err = t.add_community(&[]).unwrap_err();
    assert!(matches!(err, GameError::IllegalState(_)));
    assert_eq!(t.street(), Street::Preflop);
}

#[test]
fn pure_apply_leaves_input_untouched() {
    let t = table(3);
    let next = apply(&t, 0, Action::Fold).unwrap();
    assert!(!t.players()[0].is_folded());
    assert!(next.players()[0].is_folded());
    assert_eq!(next.to_act(), Some(1));
    assert!(apply(&t, 0, Action::Check).is_err());
}

#[test]
fn chips_are_conserved_through_a_street() {
    let mut t = table(3);
    for (seat, action) in [(0, Action::Raise), (1, Action::Call), (2, Action::Call)] {
        t.apply_action(seat, action).unwrap();
        let on_table: u64 = t.players().iter().map(|p| u64::from(p.chips())).sum::<u64>() + t.pot_total();
        assert_eq!(on_table, 3000);
        t.check_conservation().unwrap();
    }
}

fn deep_table(n: usize, stack: u32, small_blind: u32, big_blind: u32) -> Table {
    let names: Vec<String> = (0..n).map(|i| format!("p{i}")).collect();
    let cfg = TableConfig {
        starting_stack: stack,
        small_blind,
        big_blind,
        ..TableConfig::default()
    };
    let mut t = Table::with_names(&names, &cfg);
    t.start_hand().unwrap();
    t.post_blinds().unwrap();
    t
}

#[test]
fn billion_chip_shoves_build_pots_past_u32() {
    let mut t = deep_table(5, 1_000_000_000, 250_000_000, 500_000_000);
    while let Some(seat) = t.to_act() {
        t.apply_action(seat, Action::AllIn).unwrap();
    }
    assert_eq!(t.pot_total(), 5_000_000_000);
    assert_eq!(t.pots().len(), 1);
    assert!(t.players().iter().all(|p| p.chips() == 0));
    t.check_conservation().unwrap();
}

#[test]
fn blind_above_half_of_u32_still_lists_moves() {
    let mut t = deep_table(3, u32::MAX, 1_500_000_000, 3_000_000_000);
    let seat = t.to_act().unwrap();
    assert_eq!(t.legal_actions(seat), vec![Action::Fold, Action::Call, Action::AllIn]);
    t.apply_action(seat, Action::Call).unwrap();
    t.check_conservation().unwrap();
}
