// TreeMap integration tests (public API only).
//
// Core behaviors exercised:
// - Ordering: traversal is ascending regardless of insertion order.
// - Deletion: leaf, one-child and two-children removals keep the order.
// - Failure model mirrors the hash map: NotFound for lookups/removals,
//   InvalidOperation for cursor misuse.
// - Equality depends only on the in-order sequence.
use twin_maps::tree_map::Position;
use twin_maps::{BidirectionalCursor, InsertError, MapError, TreeMap};

fn sample() -> TreeMap<u32, &'static str> {
    TreeMap::from([(5, "a"), (3, "b"), (8, "c"), (1, "d"), (4, "e")])
}

// Test: sorted traversal and two-children root removal.
// Assumes: 5 is the root with children 3 and 8.
// Verifies: [1,3,4,5,8] before, [1,3,4,8] after removing 5, len 4.
#[test]
fn scenario_remove_root() {
    let mut m = sample();
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 8]);
    assert_eq!(m.remove(&5), Ok((5, "a")));
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 8]);
    assert_eq!(m.len(), 4);
    assert_eq!(m.value_of(&4), Ok(&"e"));
}

// Test: insert N then remove all N in mixed order.
// Assumes: keys are distinct.
// Verifies: the tree empties and find returns end for each removed key.
#[test]
fn round_trip_insert_then_remove_all() {
    let keys: Vec<u32> = (0..64).map(|i| (i * 37) % 101).collect();
    let mut m: TreeMap<u32, u32> = keys.iter().map(|&k| (k, k + 1)).collect();
    assert_eq!(m.len(), keys.len());
    for &k in keys.iter().rev().step_by(2).chain(keys.iter().step_by(2)) {
        let _ = m.remove(&k);
    }
    assert!(m.is_empty());
    assert_eq!(m.height(), 0);
    for k in keys {
        assert!(m.find(&k).is_end());
    }
}

// Test: duplicate insert and the indexing accessor.
// Assumes: an equal key is found during descent.
// Verifies: insert is rejected; the accessor returns the existing value.
#[test]
fn duplicates_and_indexing() {
    let mut m = sample();
    assert_eq!(m.insert(4, "z"), Err(InsertError::DuplicateKey));
    assert_eq!(*m.get_or_insert_default(4), "e");
    assert_eq!(m.len(), 5);
    assert_eq!(*m.get_or_insert_default(6), "");
    assert_eq!(m.len(), 6);
    assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![1, 3, 4, 5, 6, 8]);
}

// Test: checked failures at the boundaries.
// Assumes: an empty tree, then a populated one.
// Verifies: NotFound for lookups/removals; InvalidOperation for cursor misuse.
#[test]
fn boundary_failures() {
    let mut empty: TreeMap<u32, u32> = TreeMap::new();
    assert_eq!(empty.value_of(&1), Err(MapError::NotFound));
    assert_eq!(empty.remove(&1), Err(MapError::NotFound));
    assert_eq!(empty.remove_at(Position::END), Err(MapError::NotFound));
    assert_eq!(empty.end().move_prev(), Err(MapError::InvalidOperation));

    let m = sample();
    let mut b = m.begin();
    assert_eq!(b.move_prev(), Err(MapError::InvalidOperation));
    let mut e = m.end();
    assert_eq!(e.current(), Err(MapError::InvalidOperation));
    assert_eq!(e.move_next(), Err(MapError::InvalidOperation));
    assert_eq!(e.value(), Err(MapError::InvalidOperation));
}

// Test: bidirectional walk.
// Assumes: Cursor is Copy.
// Verifies: end reaches begin in len decrements, visiting keys descending.
#[test]
fn walk_back_from_end() {
    let m = sample();
    let mut c = m.end();
    let mut seen = Vec::new();
    while c.move_prev().is_ok() {
        seen.push(*c.key().unwrap());
    }
    assert_eq!(seen, vec![8, 5, 4, 3, 1]);
    assert_eq!(c, m.begin());
    let mut f = c;
    assert_eq!(f.seek_end(), m.len());
}

// Test: mutation through cursors.
// Assumes: CursorMut gives mutable access to the value only.
// Verifies: value_mut writes through; remove_current advances to the successor.
#[test]
fn cursor_mut_edits() {
    let mut m = sample();
    {
        let mut c = m.begin_mut();
        *c.value_mut().unwrap() = "first";
        c.move_next().unwrap();
        assert_eq!(c.remove_current(), Ok((3, "b")));
        assert_eq!(c.as_cursor().key(), Ok(&4));
    }
    assert_eq!(m.value_of(&1), Ok(&"first"));
    assert!(!m.contains_key(&3));
    assert_eq!(m.end_mut().value_mut(), Err(MapError::InvalidOperation));
}

// Test: equality ignores tree shape.
// Assumes: different insertion orders produce different shapes.
// Verifies: same entries compare equal; a changed value does not.
#[test]
fn equality_and_clone() {
    let a: TreeMap<u32, u32> = (0..16).map(|k| (k, k)).collect();
    let b: TreeMap<u32, u32> = [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7, 9, 11, 13, 15, 0]
        .into_iter()
        .map(|k| (k, k))
        .collect();
    assert!(a.height() > b.height());
    assert_eq!(a, b);
    let mut c = b.clone();
    *c.value_of_mut(&7).unwrap() = 70;
    assert_ne!(b, c);
    assert_eq!(b.value_of(&7), Ok(&7));

    let mut d = a.clone();
    let taken = std::mem::take(&mut d);
    assert!(d.is_empty());
    assert_eq!(taken, a);
}
