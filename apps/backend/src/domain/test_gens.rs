// Proptest generators for domain types.
// Rosters are generated unique by construction rather than filtered.

use proptest::prelude::*;

use crate::domain::cards::{Card, CardValue, Color};
use crate::domain::game::{TurnDirection, UserId};

/// Unique player ids, between `min` and `max` of them.
pub fn roster(min: usize, max: usize) -> impl Strategy<Value = Vec<UserId>> {
    proptest::collection::btree_set(1i64..100_000, min..=max)
        .prop_map(|ids| ids.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
}

/// A roster together with one of its members.
pub fn roster_and_member(min: usize, max: usize) -> impl Strategy<Value = (Vec<UserId>, UserId)> {
    roster(min, max).prop_flat_map(|ids| {
        let len = ids.len();
        (Just(ids), 0..len).prop_map(|(ids, i)| {
            let member = ids[i];
            (ids, member)
        })
    })
}

pub fn direction() -> impl Strategy<Value = TurnDirection> {
    prop_oneof![Just(TurnDirection::Forward), Just(TurnDirection::Reverse)]
}

pub fn colored() -> impl Strategy<Value = Color> {
    prop_oneof![
        Just(Color::Red),
        Just(Color::Blue),
        Just(Color::Green),
        Just(Color::Yellow),
    ]
}

pub fn colored_value() -> impl Strategy<Value = CardValue> {
    prop_oneof![
        (0u8..=9).prop_map(CardValue::Number),
        Just(CardValue::Skip),
        Just(CardValue::Reverse),
        Just(CardValue::Draw2),
    ]
}

/// Any valid card, wilds included.
pub fn card() -> impl Strategy<Value = Card> {
    prop_oneof![
        4 => (colored(), colored_value())
            .prop_map(|(c, v)| Card::new(c, v).expect("colored card is valid")),
        1 => prop_oneof![Just(CardValue::Wild), Just(CardValue::WildDraw4)]
            .prop_map(|v| Card::new(Color::Wild, v).expect("wild card is valid")),
    ]
}
