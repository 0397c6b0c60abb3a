use super::*;

#[test]
fn first_card_in_front_at_start() {
    let deck = StackedDeck::new(4);
    assert_eq!(deck.offset(0, 0.0), 0.0);
    assert_eq!(deck.offset(1, 0.0), 1.0);
    assert_eq!(deck.offset(3, 0.0), 1.0);
    assert_eq!(deck.front(0.0), Some(0));
}

#[test]
fn neighbours_trade_places_together() {
    let deck = StackedDeck::new(4);
    // s = 1.5: card 1 halfway out, card 2 halfway in.
    let p = 0.5;
    assert!((deck.offset(1, p) + 0.5).abs() < 1e-12);
    assert!((deck.offset(2, p) - 0.5).abs() < 1e-12);
    assert_eq!(deck.offset(0, p), -1.0);
    assert!((deck.offset(2, p) - deck.offset(1, p) - 1.0).abs() < 1e-12);
}

#[test]
fn last_card_in_front_at_end() {
    let deck = StackedDeck::new(4);
    assert_eq!(deck.offset(3, 1.0), 0.0);
    assert_eq!(deck.front(1.0), Some(3));
    assert_eq!(StackedDeck::new(0).front(0.5), None);
    assert_eq!(StackedDeck::new(1).offset(0, 0.7), 0.0);
}
