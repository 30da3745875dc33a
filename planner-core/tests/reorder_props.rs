use std::collections::HashSet;

use planner_core::{Board, BoardStore, InsertionAnchor, StoreConfig};
use proptest::prelude::*;

fn board_with(lists: &[usize]) -> (BoardStore, Vec<String>) {
    let (mut store, _) = BoardStore::from_board(Board::new("Props"), StoreConfig::default());
    let ids = lists
        .iter()
        .enumerate()
        .map(|(n, cards)| {
            let list = store.add_list(&format!("list {}", n)).unwrap();
            for c in 0..*cards {
                store.add_card(&list, &format!("card {}-{}", n, c)).unwrap();
            }
            list
        })
        .collect();
    (store, ids)
}

fn card_ids(store: &BoardStore) -> Vec<String> {
    store.board().all_cards().map(|c| c.id.clone()).collect()
}

#[derive(Debug, Clone)]
enum Op {
    Card { from: usize, card: usize, to: usize, anchor: Option<usize> },
    List { list: usize, anchor: Option<usize> },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3usize, 0..6usize, 0..3usize, proptest::option::of(0..6usize))
            .prop_map(|(from, card, to, anchor)| Op::Card { from, card, to, anchor }),
        (0..3usize, proptest::option::of(0..3usize)).prop_map(|(list, anchor)| Op::List { list, anchor }),
    ]
}

fn apply(store: &mut BoardStore, op: &Op) {
    let lists: Vec<(String, Vec<String>)> = store
        .board()
        .lists
        .iter()
        .map(|l| (l.id.clone(), l.cards.iter().map(|c| c.id.clone()).collect()))
        .collect();
    match op {
        Op::Card { from, card, to, anchor } => {
            let (from_id, cards) = &lists[*from];
            let (to_id, target_cards) = &lists[*to];
            let Some(card_id) = cards.get(*card) else {
                return;
            };
            let anchor = anchor
                .and_then(|a| target_cards.get(a))
                .map_or(InsertionAnchor::End, |id| InsertionAnchor::before(id.clone()));
            store.move_card(from_id, card_id, to_id, &anchor).unwrap();
        }
        Op::List { list, anchor } => {
            let anchor = anchor
                .and_then(|a| lists.get(a))
                .map_or(InsertionAnchor::End, |(id, _)| InsertionAnchor::before(id.clone()));
            store.move_list(&lists[*list].0, &anchor).unwrap();
        }
    }
}

proptest! {
    #[test]
    fn test_moves_never_duplicate_or_lose(
        sizes in proptest::collection::vec(0..6usize, 3),
        ops in proptest::collection::vec(op(), 1..30),
    ) {
        let (mut store, _) = board_with(&sizes);
        let before: HashSet<String> = card_ids(&store).into_iter().collect();
        let list_ids: HashSet<String> = store.board().lists.iter().map(|l| l.id.clone()).collect();

        for op in &ops {
            apply(&mut store, op);
            let now = card_ids(&store);
            prop_assert_eq!(now.len(), before.len());
            prop_assert_eq!(now.into_iter().collect::<HashSet<_>>(), before.clone());
            let lists_now: HashSet<String> = store.board().lists.iter().map(|l| l.id.clone()).collect();
            prop_assert_eq!(&lists_now, &list_ids);
        }
    }

    #[test]
    fn test_card_lands_before_its_anchor(
        size in 2..8usize,
        from in 0..8usize,
        anchor in 0..8usize,
    ) {
        let (mut store, lists) = board_with(&[size]);
        let ids: Vec<String> = card_ids(&store);
        let from = from % size;
        let anchor = anchor % size;
        prop_assume!(from != anchor);

        store
            .move_card(&lists[0], &ids[from], &lists[0], &InsertionAnchor::before(ids[anchor].clone()))
            .unwrap();
        let order = card_ids(&store);
        let moved = order.iter().position(|id| *id == ids[from]).unwrap();
        prop_assert_eq!(&order[moved + 1], &ids[anchor]);
    }
}
