// ChainedHashMap integration tests (public API only).
//
// Core behaviors exercised:
// - Uniqueness: `insert` rejects a present key; the indexing accessor
//   returns the stored value instead of inserting.
// - Occupied range: bounds follow inserts and boundary removals, and are
//   cleared when the map empties.
// - Failure model: `value_of`/`remove`/`remove_at` report `NotFound`,
//   cursor misuse reports `InvalidOperation`, and neither mutates.
// - Lifecycle: clone is deep, `mem::take` leaves an empty reusable map.
use twin_maps::chained_hash_map::Position;
use twin_maps::{BidirectionalCursor, BuildBucketHasher, ChainedHashMap, InsertError, MapError};

type Small<K, V> = ChainedHashMap<K, V, BuildBucketHasher, 7>;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

// Test: distinct-key inserts are all findable.
// Assumes: keys are unique within the batch.
// Verifies: len equals the number of keys; find never returns end for them.
#[test]
fn unique_inserts_are_findable() {
    let mut m: ChainedHashMap<String, u64> = ChainedHashMap::new();
    let keys: Vec<String> = (0..500).map(|i| format!("key-{i}")).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k.clone(), i as u64).expect("fresh key");
    }
    assert_eq!(m.len(), keys.len());
    for (i, k) in keys.iter().enumerate() {
        let c = m.find(k.as_str());
        assert!(!c.is_end());
        assert_eq!(c.value(), Ok(&(i as u64)));
    }
}

// Test: insert N then remove all N in a shuffled order.
// Assumes: removal order is independent of insertion order.
// Verifies: the map ends empty, every key then finds end, occupied range is None.
#[test]
fn round_trip_insert_then_remove_all() {
    let mut m: Small<u64, u64> = Small::default();
    let mut keys: Vec<u64> = lcg(7).take(200).map(|x| x >> 40).collect();
    keys.sort_unstable();
    keys.dedup();
    for &k in &keys {
        m.insert(k, k * 2).unwrap();
    }
    let mut order = keys.clone();
    for (i, r) in (1..order.len()).rev().zip(lcg(11)) {
        order.swap(i, (r >> 33) as usize % (i + 1));
    }
    for k in order {
        assert_eq!(m.remove(&k), Ok((k, k * 2)));
    }
    assert!(m.is_empty());
    assert_eq!(m.occupied_range(), None);
    for k in keys {
        assert!(m.find(&k).is_end());
        assert_eq!(m.find(&k), m.end());
    }
}

// Test: the indexing accessor is insert-if-absent.
// Assumes: V: Default provides the value on a miss.
// Verifies: a second access neither grows the map nor resets the value.
#[test]
fn indexing_accessor_is_idempotent() {
    let mut m: ChainedHashMap<&str, Vec<u32>> = ChainedHashMap::new();
    m.get_or_insert_default("a").push(1);
    m.get_or_insert_default("a").push(2);
    assert_eq!(m.len(), 1);
    assert_eq!(m.value_of(&"a"), Ok(&vec![1, 2]));
    assert_eq!(m.insert("a", Vec::new()), Err(InsertError::DuplicateKey));
    assert_eq!(m.value_of(&"a").map(Vec::len), Ok(2));
}

// Test: bounds follow boundary removals.
// Assumes: small integer keys hash to their own bucket.
// Verifies: (5, 10) after two inserts, (10, 10) after removing the minimum.
#[test]
fn occupied_range_scenario() {
    let mut m: ChainedHashMap<u32, &str> = ChainedHashMap::new();
    m.insert(10, "k1").unwrap();
    m.insert(5, "k2").unwrap();
    assert_eq!(m.bucket_index(&10), 10);
    assert_eq!(m.bucket_index(&5), 5);
    assert_eq!(m.occupied_range(), Some((5, 10)));
    m.remove(&5).unwrap();
    assert_eq!(m.occupied_range(), Some((10, 10)));
    assert_eq!(m.begin().key(), Ok(&10));
    m.remove(&10).unwrap();
    assert_eq!(m.occupied_range(), None);
    assert_eq!(m.begin(), m.end());
}

// Test: checked failures at the boundaries.
// Assumes: nothing is inserted before the first group of checks.
// Verifies: NotFound for lookups/removals; InvalidOperation for cursor misuse.
#[test]
fn boundary_failures() {
    let mut m: ChainedHashMap<u32, u32> = ChainedHashMap::new();
    assert_eq!(m.value_of(&1), Err(MapError::NotFound));
    assert_eq!(m.value_of_mut(&1), Err(MapError::NotFound));
    assert_eq!(m.remove(&1), Err(MapError::NotFound));
    assert_eq!(m.remove_at(Position::END), Err(MapError::NotFound));

    m.insert(1, 10).unwrap();
    let end = m.end().position();
    assert_eq!(m.remove_at(end), Err(MapError::NotFound));
    assert_eq!(m.len(), 1);

    let mut b = m.begin();
    assert_eq!(b.move_prev(), Err(MapError::InvalidOperation));
    assert_eq!(b.key(), Ok(&1), "a failed step leaves the cursor in place");
    let mut e = m.end();
    assert_eq!(e.current(), Err(MapError::InvalidOperation));
    assert_eq!(e.move_next(), Err(MapError::InvalidOperation));
}

// Test: begin and end are exactly len steps apart.
// Assumes: keys spread over several buckets with gaps.
// Verifies: seek_end from begin and seek_begin from end both take len steps.
#[test]
fn begin_end_distance_is_len() {
    let m: Small<u32, ()> = [0, 1, 8, 15, 22, 4, 11].into_iter().map(|k| (k, ())).collect();
    let mut c = m.begin();
    assert_eq!(c.seek_end(), m.len());
    assert!(c.is_end());
    assert_eq!(c.seek_begin(), m.len());
    assert_eq!(c, m.begin());
}

// Test: post-increment returns the previous cursor.
// Assumes: Cursor is Clone.
// Verifies: the returned cursor still points at the old entry.
#[test]
fn post_increment_and_decrement() {
    let m: Small<u32, char> = Small::from_iter([(1, 'x'), (2, 'y')]);
    let mut c = m.begin();
    let old = c.post_next().unwrap();
    assert_eq!(old.key(), Ok(&1));
    assert_eq!(c.key(), Ok(&2));
    let old = c.post_prev().unwrap();
    assert_eq!(old.key(), Ok(&2));
    assert_eq!(c, m.begin());
    assert_eq!(c.post_prev().map(|_| ()), Err(MapError::InvalidOperation));
}

// Test: removal through a position found by a shared cursor.
// Assumes: the position is used before any other mutation.
// Verifies: remove_at returns the entry and the map shrinks.
#[test]
fn remove_via_position() {
    let mut m: ChainedHashMap<String, i32> = ChainedHashMap::new();
    m.insert("a".into(), 1).unwrap();
    m.insert("b".into(), 2).unwrap();
    let pos = m.find("b").position();
    assert_eq!(pos.bucket(), Some(m.bucket_index("b")));
    assert_eq!(m.remove_at(pos), Ok(("b".to_string(), 2)));
    assert_eq!(m.len(), 1);
    assert!(!m.contains_key("b"));
}

// Test: lifecycle (clone, move).
// Assumes: clone copies bucket by bucket.
// Verifies: clones are independent and equal; take leaves an empty map.
#[test]
fn clone_and_take() {
    let mut a: ChainedHashMap<u32, String> = (0..20).map(|k| (k, k.to_string())).collect();
    let b = a.clone();
    assert_eq!(a, b);
    a.value_of_mut(&3).unwrap().push('!');
    assert_ne!(a, b);
    assert_eq!(b.value_of(&3).map(String::as_str), Ok("3"));

    let moved = std::mem::take(&mut a);
    assert!(a.is_empty());
    assert_eq!(moved.len(), 20);
    a.insert(1, "again".into()).unwrap();
    assert_eq!(a.len(), 1);
}

// Test: equality is membership-sensitive and insertion-order-insensitive.
// Assumes: chains are kept in descending key order.
// Verifies: same entries in any order compare equal; value or key changes do not.
#[test]
fn equality_semantics() {
    let a: Small<u32, u32> = (0..30).map(|k| (k, k)).collect();
    let b: Small<u32, u32> = (0..30).rev().map(|k| (k, k)).collect();
    assert_eq!(a, a);
    assert_eq!(a, b);
    assert_eq!(b, a);

    let mut c = b.clone();
    *c.get_or_insert_default(0) = 99;
    assert_ne!(a, c);
    let mut d = b.clone();
    d.remove(&29).unwrap();
    assert_ne!(a, d);
}
