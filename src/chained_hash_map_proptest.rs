#![cfg(test)]

// Property tests for ChainedHashMap kept inside the crate so they can use
// the occupied-range rescan oracle without feature gates.

use crate::bucket_hasher::BuildBucketHasher;
use crate::chained_hash_map::ChainedHashMap;
use crate::cursor::BidirectionalCursor;
use crate::error::{InsertError, MapError};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum Op {
    Insert(usize, i32),
    Index(usize, i32),
    Remove(usize),
    RemoveAt(usize),
    Find(usize),
    ValueOf(usize),
    Mutate(usize, i32),
    Iterate,
    WalkBack,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<Op>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Insert(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| Op::Index(i, v)),
            idx.clone().prop_map(Op::Remove),
            idx.clone().prop_map(Op::RemoveAt),
            idx.clone().prop_map(Op::Find),
            idx.clone().prop_map(Op::ValueOf),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| Op::Mutate(i, d)),
            Just(Op::Iterate),
            Just(Op::WalkBack),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Drives one operation sequence against a BTreeMap model.
// Invariants exercised after every step:
// - `len`/`is_empty` parity with the model.
// - Cached occupied range equals a full rescan of the buckets.
// - Failing calls (`remove`, `value_of`) report `NotFound` and leave the map unchanged.
// - Iteration and a backward cursor walk each visit exactly `len` entries.
fn run<S, const N: usize>(
    mut sut: ChainedHashMap<String, i32, S, N>,
    pool: &[String],
    ops: Vec<Op>,
) -> Result<(), TestCaseError>
where
    S: BuildHasher,
{
    let mut model: BTreeMap<String, i32> = BTreeMap::new();
    for op in ops {
        match op {
            Op::Insert(i, v) => {
                let k = pool[i].clone();
                let already = model.contains_key(&k);
                match sut.insert(k.clone(), v) {
                    Ok(pos) => {
                        prop_assert!(!already, "insert must fail on duplicate");
                        prop_assert_eq!(sut.cursor_at(pos).key_value().map(|(key, _)| key), Ok(&k));
                        model.insert(k, v);
                    }
                    Err(InsertError::DuplicateKey) => {
                        prop_assert!(already, "duplicate error only when key exists");
                    }
                }
            }
            Op::Index(i, v) => {
                let k = pool[i].clone();
                let before = model.get(&k).copied().unwrap_or_default();
                let slot = sut.get_or_insert_default(k.clone());
                prop_assert_eq!(*slot, before);
                *slot = v;
                model.insert(k, v);
            }
            Op::Remove(i) => {
                let k = &pool[i];
                match model.remove(k) {
                    Some(mv) => prop_assert_eq!(sut.remove(k.as_str()), Ok((k.clone(), mv))),
                    None => {
                        let len = sut.len();
                        prop_assert_eq!(sut.remove(k.as_str()), Err(MapError::NotFound));
                        prop_assert_eq!(sut.len(), len);
                    }
                }
            }
            Op::RemoveAt(i) => {
                let k = &pool[i];
                let pos = sut.find(k.as_str()).position();
                match model.remove(k) {
                    Some(mv) => prop_assert_eq!(sut.remove_at(pos), Ok((k.clone(), mv))),
                    None => {
                        prop_assert!(pos.is_end());
                        prop_assert_eq!(sut.remove_at(pos), Err(MapError::NotFound));
                    }
                }
            }
            Op::Find(i) => {
                let k = &pool[i];
                let c = sut.find(k.as_str());
                prop_assert_eq!(c.is_end(), !model.contains_key(k));
                if let Some(mv) = model.get(k) {
                    prop_assert_eq!(c.key_value(), Ok((k, mv)));
                    prop_assert_eq!(c.position().bucket(), Some(sut.bucket_index(k.as_str())));
                }
            }
            Op::ValueOf(i) => {
                let k = &pool[i];
                match model.get(k) {
                    Some(mv) => prop_assert_eq!(sut.value_of(k.as_str()), Ok(mv)),
                    None => prop_assert_eq!(sut.value_of(k.as_str()), Err(MapError::NotFound)),
                }
            }
            Op::Mutate(i, d) => {
                let k = &pool[i];
                if let Some(mv) = model.get_mut(k) {
                    let mut c = sut.find_mut(k.as_str());
                    let v = c.value_mut().expect("cursor on a live entry");
                    *v = v.saturating_add(d);
                    *mv = mv.saturating_add(d);
                }
            }
            Op::Iterate => {
                let seen: BTreeSet<&String> = sut.keys().collect();
                let expected: BTreeSet<&String> = model.keys().collect();
                prop_assert_eq!(seen, expected);
                prop_assert_eq!(sut.iter().count(), model.len());
                let entries: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(&entries, &model);
            }
            Op::WalkBack => {
                let mut c = sut.end();
                prop_assert_eq!(c.seek_begin(), model.len());
                prop_assert_eq!(c, sut.begin());
                prop_assert_eq!(c.move_prev(), Err(MapError::InvalidOperation));
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert_eq!(sut.occupied_range(), sut.rescan_occupied_range());
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run(ChainedHashMap::new(), &pool, ops)?;
    }

    // Few buckets: chains hold several keys and boundary buckets empty often.
    #[test]
    fn prop_state_machine_small_capacity((pool, ops) in arb_scenario()) {
        let sut: ChainedHashMap<String, i32, BuildBucketHasher, 5> = ChainedHashMap::default();
        run(sut, &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress chain ordering.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same state machine under worst-case collisions; every entry
// shares bucket 0, whose chain must stay in descending key order.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let sut: ChainedHashMap<String, i32, ConstBuildHasher> =
            ChainedHashMap::with_hasher(ConstBuildHasher);
        run(sut, &pool, ops)?;
    }

    #[test]
    fn prop_single_chain_is_descending(keys in proptest::collection::vec(any::<u16>(), 0..64)) {
        let mut sut: ChainedHashMap<u16, (), ConstBuildHasher> =
            ChainedHashMap::with_hasher(ConstBuildHasher);
        sut.extend(keys.iter().map(|&k| (k, ())));
        let got: Vec<u16> = sut.keys().copied().collect();
        let mut want: Vec<u16> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        want.reverse();
        prop_assert_eq!(got, want);
        prop_assert!(sut.occupied_range().map_or(true, |r| r == (0, 0)));
    }
}

// Property: small non-negative integer keys land in bucket `k`, so traversal
// is ascending and equality does not depend on insertion order.
proptest! {
    #[test]
    fn prop_integer_keys_iterate_ascending(keys in proptest::collection::vec(0u32..50_003, 0..64)) {
        let forward: ChainedHashMap<u32, u32> = keys.iter().map(|&k| (k, k)).collect();
        let backward: ChainedHashMap<u32, u32> = keys.iter().rev().map(|&k| (k, k)).collect();
        prop_assert_eq!(&forward, &backward);
        let got: Vec<u32> = forward.keys().copied().collect();
        let want: Vec<u32> = keys.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(got, want);
    }
}
