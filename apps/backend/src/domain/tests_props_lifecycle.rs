/// Property-based tests for lifecycle invariants
use proptest::prelude::*;

use crate::domain::cards::{can_play_card, CardType};
use crate::domain::game::TurnDirection;
use crate::domain::lifecycle::{
    advance_turn, determine_post_abandonment_action, get_current_player,
    remove_player_from_game, start_game, AbandonmentAction,
};
use crate::domain::test_state_helpers::{active_game, positions, roster, waiting_game};
use crate::domain::{test_gens, test_prelude};

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// After start: index 0, forward, positions exactly 1..N.
    #[test]
    fn prop_start_normalizes_turn_state(ids in test_gens::roster(1, 10)) {
        let mut game = waiting_game(&ids);
        game.current_player_index = ids.len() - 1;
        game.turn_direction = TurnDirection::Reverse;
        start_game(&mut game);

        prop_assert_eq!(game.current_player_index, 0);
        prop_assert_eq!(game.turn_direction, TurnDirection::Forward);
        let expected: Vec<u32> = (1..=ids.len() as u32).collect();
        prop_assert_eq!(positions(&game), expected);
    }

    /// N advances return to the start; reverse visits the exact reverse order.
    #[test]
    fn prop_advance_cycles(ids in test_gens::roster(2, 10), start in 0usize..10) {
        let n = ids.len();
        let mut forward = active_game(&ids);
        forward.current_player_index = start % n;

        let mut visited_forward = Vec::new();
        for _ in 0..n {
            visited_forward.push(advance_turn(&mut forward).unwrap());
        }
        prop_assert_eq!(forward.current_player_index, start % n);

        let mut backward = active_game(&ids);
        backward.turn_direction = TurnDirection::Forward.flipped();
        backward.current_player_index = start % n;

        let mut visited_backward = vec![ids[start % n]];
        for _ in 0..n - 1 {
            visited_backward.push(advance_turn(&mut backward).unwrap());
        }
        visited_backward.reverse();
        prop_assert_eq!(visited_backward, visited_forward);
    }

    /// Positions stay contiguous 1..M after any removal.
    #[test]
    fn prop_removal_keeps_positions_contiguous(
        (ids, leaving) in test_gens::roster_and_member(1, 10),
    ) {
        let mut game = active_game(&ids);
        remove_player_from_game(&mut game, leaving);

        let remaining = ids.len() - 1;
        let expected: Vec<u32> = (1..=remaining as u32).collect();
        prop_assert_eq!(positions(&game), expected);
        prop_assert!(!roster(&game).contains(&leaving));
    }

    /// The turn follows identity across removal.
    #[test]
    fn prop_removal_reanchors_turn(
        (ids, leaving) in test_gens::roster_and_member(3, 10),
        current in 0usize..10,
        direction in test_gens::direction(),
    ) {
        let n = ids.len();
        let mut game = active_game(&ids);
        game.turn_direction = direction;
        game.current_player_index = current % n;
        let holder = get_current_player(&game).unwrap().player_id;

        let expected_holder = if holder == leaving {
            let mut lookahead = game.clone();
            advance_turn(&mut lookahead).unwrap()
        } else {
            holder
        };

        remove_player_from_game(&mut game, leaving);
        prop_assert_eq!(get_current_player(&game).unwrap().player_id, expected_holder);
    }

    /// Classification depends only on the remaining count.
    #[test]
    fn prop_post_abandonment_classification(ids in test_gens::roster(1, 10)) {
        let mut game = active_game(&ids);
        let (&last, others) = ids.split_last().unwrap();
        for id in others {
            let action = determine_post_abandonment_action(&game);
            prop_assert_eq!(action, AbandonmentAction::SaveGame);
            remove_player_from_game(&mut game, *id);
        }
        prop_assert_eq!(
            determine_post_abandonment_action(&game),
            AbandonmentAction::EndGameWithWinner { winner_id: last }
        );
        remove_player_from_game(&mut game, last);
        prop_assert_eq!(
            determine_post_abandonment_action(&game),
            AbandonmentAction::EndGameNoWinner
        );
    }

    /// Legality is exactly: wild, same color, or same value.
    #[test]
    fn prop_card_legality(candidate in test_gens::card(), top in test_gens::card()) {
        let expected = candidate.card_type() == CardType::Wild
            || candidate.color() == top.color()
            || candidate.value() == top.value();
        prop_assert_eq!(can_play_card(&candidate, &top).is_ok(), expected);
    }
}
