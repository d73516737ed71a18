#![cfg(test)]

// Property tests for TreeMap. They live inside the crate so every step can
// check parent/child links, which are not visible through the public API.

use crate::cursor::BidirectionalCursor;
use crate::error::{InsertError, MapError};
use crate::tree_map::TreeMap;
use proptest::prelude::*;
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Index(usize, i32),
    Remove(usize),
    RemoveAt(usize),
    RemoveViaCursor(usize),
    Find(usize),
    Mutate(usize, i32),
    Iterate,
    WalkBack,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u16>, Vec<Op>)> {
    proptest::collection::vec(any::<u16>(), 1..=16).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Index(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::RemoveAt),
            idx.clone().prop_map(Op::RemoveViaCursor),
            idx.clone().prop_map(Op::Find),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            Just(Op::Iterate),
            Just(Op::WalkBack),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// After every step:
// - links are consistent (parent back-pointers, BST ordering, reachability);
// - `len`/`is_empty` match the model;
// - first and last entries match the model's.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: TreeMap<u16, i32> = TreeMap::new();
        let mut model: BTreeMap<u16, i32> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Insert(i, v) => {
                    let k = pool[i];
                    match sut.insert(k, v) {
                        Ok(pos) => {
                            prop_assert!(!model.contains_key(&k));
                            prop_assert_eq!(sut.cursor_at(pos).key_value(), Ok((&k, &v)));
                            model.insert(k, v);
                        }
                        Err(InsertError::DuplicateKey) => prop_assert!(model.contains_key(&k)),
                    }
                }
                Op::Index(i, v) => {
                    let k = pool[i];
                    let before = model.get(&k).copied().unwrap_or_default();
                    let slot = sut.get_or_insert_default(k);
                    prop_assert_eq!(*slot, before);
                    *slot = v;
                    model.insert(k, v);
                }
                Op::Remove(i) => {
                    let k = pool[i];
                    match model.remove(&k) {
                        Some(mv) => prop_assert_eq!(sut.remove(&k), Ok((k, mv))),
                        None => prop_assert_eq!(sut.remove(&k), Err(MapError::NotFound)),
                    }
                }
                Op::RemoveAt(i) => {
                    let k = pool[i];
                    let pos = sut.find(&k).position();
                    match model.remove(&k) {
                        Some(mv) => {
                            prop_assert_eq!(sut.remove_at(pos), Ok((k, mv)));
                            // The node is gone; its position must not resolve again.
                            prop_assert_eq!(sut.remove_at(pos), Err(MapError::NotFound));
                        }
                        None => prop_assert_eq!(sut.remove_at(pos), Err(MapError::NotFound)),
                    }
                }
                Op::RemoveViaCursor(i) => {
                    let k = pool[i];
                    let expected_next = model.range(k..).nth(1).map(|(nk, _)| *nk);
                    let mut c = sut.find_mut(&k);
                    match model.remove(&k) {
                        Some(mv) => {
                            prop_assert_eq!(c.remove_current(), Ok((k, mv)));
                            prop_assert_eq!(c.key().ok().copied(), expected_next);
                        }
                        None => {
                            prop_assert!(c.is_end());
                            prop_assert_eq!(c.remove_current(), Err(MapError::NotFound));
                        }
                    }
                }
                Op::Find(i) => {
                    let k = pool[i];
                    let c = sut.find(&k);
                    match model.get(&k) {
                        Some(mv) => prop_assert_eq!(c.key_value(), Ok((&k, mv))),
                        None => {
                            prop_assert!(c.is_end());
                            prop_assert_eq!(c, sut.end());
                        }
                    }
                }
                Op::Mutate(i, d) => {
                    let k = pool[i];
                    if let Some(mv) = model.get_mut(&k) {
                        let v = sut.value_of_mut(&k).expect("present in model");
                        *v = v.wrapping_add(d);
                        *mv = mv.wrapping_add(d);
                    } else {
                        prop_assert_eq!(sut.value_of_mut(&k), Err(MapError::NotFound));
                    }
                }
                Op::Iterate => {
                    let got: Vec<(u16, i32)> = sut.iter().map(|(k, v)| (*k, *v)).collect();
                    let want: Vec<(u16, i32)> = model.iter().map(|(k, v)| (*k, *v)).collect();
                    prop_assert_eq!(&got, &want);
                    let back: Vec<u16> = sut.keys().rev().copied().collect();
                    let want_back: Vec<u16> = model.keys().rev().copied().collect();
                    prop_assert_eq!(back, want_back);
                }
                Op::WalkBack => {
                    let mut c = sut.end();
                    let mut seen = Vec::new();
                    while c.move_prev().is_ok() {
                        seen.push(*c.key().expect("cursor on an entry after a successful step"));
                    }
                    let want: Vec<u16> = model.keys().rev().copied().collect();
                    prop_assert_eq!(seen, want);
                    prop_assert_eq!(c, sut.begin());
                }
            }

            sut.assert_links();
            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            prop_assert_eq!(sut.first_key_value(), model.first_key_value());
            prop_assert_eq!(sut.last_key_value(), model.last_key_value());
        }
    }

    // Property: equality depends on the entries, not on the insertion order
    // that shaped the tree.
    #[test]
    fn prop_equality_ignores_insertion_order(keys in proptest::collection::vec(any::<u8>(), 0..48)) {
        let forward: TreeMap<u8, u32> = keys.iter().map(|&k| (k, u32::from(k) * 3)).collect();
        let sorted: TreeMap<u8, u32> = {
            let mut ks = keys.clone();
            ks.sort_unstable();
            ks.into_iter().map(|k| (k, u32::from(k) * 3)).collect()
        };
        prop_assert_eq!(&forward, &sorted);
        prop_assert!(forward.height() <= sorted.height());
    }

    // Property: removing every key, in any order, empties the tree and
    // keeps it consistent along the way.
    #[test]
    fn prop_removal_order_drains(
        keys in proptest::collection::btree_set(any::<u16>(), 0..48),
        seed in any::<u64>()
    ) {
        let mut sut: TreeMap<u16, ()> = keys.iter().map(|&k| (k, ())).collect();
        let mut order: Vec<u16> = keys.iter().copied().collect();
        // Deterministic shuffle from the seed.
        let mut s = seed;
        for i in (1..order.len()).rev() {
            s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
            order.swap(i, (s >> 33) as usize % (i + 1));
        }
        for k in order {
            prop_assert_eq!(sut.remove(&k), Ok((k, ())));
            sut.assert_links();
        }
        prop_assert!(sut.is_empty());
        prop_assert_eq!(sut.height(), 0);
        prop_assert_eq!(sut.begin(), sut.end());
    }
}
