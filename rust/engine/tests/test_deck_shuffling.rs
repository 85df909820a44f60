use std::collections::HashSet;

use holdem_engine::deck::Deck;
use holdem_engine::errors::GameError;

#[test]
fn same_seed_same_order() {
    let mut a = Deck::new_with_seed(42);
    let mut b = Deck::new_with_seed(42);
    a.shuffle();
    b.shuffle();
    assert_eq!(a.deal(52).unwrap(), b.deal(52).unwrap());
}

#[test]
fn different_seeds_differ() {
    let mut a = Deck::new_with_seed(1);
    let mut b = Deck::new_with_seed(2);
    a.shuffle();
    b.shuffle();
    assert_ne!(a.deal(52).unwrap(), b.deal(52).unwrap());
}

#[test]
fn full_deal_has_no_duplicates() {
    let mut d = Deck::new_with_seed(9);
    d.shuffle();
    let cards = d.deal(52).unwrap();
    let unique: HashSet<_> = cards.iter().collect();
    assert_eq!(unique.len(), 52);
    assert_eq!(d.remaining(), 0);
    assert!(d.deal(1).is_err());
}

#[test]
fn overdraw_reports_what_is_left() {
    let mut d = Deck::new_with_seed(3);
    d.shuffle();
    d.deal(50).unwrap();
    d.burn().unwrap();
    assert_eq!(
        d.deal(2),
        Err(GameError::DeckExhausted {
            requested: 2,
            remaining: 1
        })
    );
    // a failed deal removes nothing
    assert_eq!(d.remaining(), 1);
}

#[test]
fn shuffle_restores_all_cards() {
    let mut d = Deck::new_with_seed(5);
    d.shuffle();
    d.deal(20).unwrap();
    d.shuffle();
    assert_eq!(d.remaining(), 52);
}
