//! ChainedHashMap: fixed bucket array with separate chaining and a cached
//! occupied range.
//!
//! Layout
//! - `N` buckets, allocated once; the map never rehashes or grows.
//! - Each bucket is a chain of entries sorted by key in strictly
//!   descending order. Keys are unique across the map.
//! - `occupied` caches the lowest and highest non-empty bucket. It is
//!   `None` exactly when the map is empty and is maintained
//!   incrementally by insert and remove; nothing rescans the buckets on
//!   the mutation path.
//!
//! Traversal order is bucket order, then chain order. Two maps compare
//! equal when their lengths, occupied ranges and every chain in the range
//! match. Since chains are kept sorted, the insertion order of a given
//! set of entries does not affect equality.

use crate::bucket_hasher::BuildBucketHasher;
use crate::cursor::BidirectionalCursor;
use crate::error::{InsertError, MapError};
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::ptr;
use std::slice;
use tracing::trace;

/// Bucket count used when none is given: a prime, so integer keys spread
/// well under a plain modulus.
pub const DEFAULT_CAPACITY: usize = 50_003;

#[derive(Clone, Debug, PartialEq, Eq)]
struct Entry<K, V> {
    key: K,
    value: V,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
struct Slot {
    bucket: usize,
    index: usize,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct OccupiedRange {
    min: usize,
    max: usize,
}

/// Location of an entry, or the end sentinel.
///
/// A position stays meaningful until the bucket it points into is
/// modified; using it afterwards may resolve to a neighbouring entry or
/// fail with `NotFound`/`InvalidOperation`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position(Option<Slot>);

impl Position {
    pub const END: Position = Position(None);

    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }

    /// Bucket holding the entry; `None` for the end sentinel.
    pub fn bucket(&self) -> Option<usize> {
        self.0.map(|s| s.bucket)
    }
}

pub struct ChainedHashMap<K, V, S = BuildBucketHasher, const N: usize = DEFAULT_CAPACITY> {
    hasher: S,
    buckets: Box<[Vec<Entry<K, V>>]>,
    len: usize,
    occupied: Option<OccupiedRange>,
}

impl<K, V> ChainedHashMap<K, V>
where
    K: Hash + Ord,
{
    pub fn new() -> Self {
        Self::with_hasher(BuildBucketHasher)
    }
}

impl<K, V, S, const N: usize> Default for ChainedHashMap<K, V, S, N>
where
    K: Hash + Ord,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

// Structural operations: no hashing, no key comparisons.
impl<K, V, S, const N: usize> ChainedHashMap<K, V, S, N> {
    const NONZERO_CAPACITY: () = assert!(N > 0, "ChainedHashMap needs at least one bucket");

    pub fn with_hasher(hasher: S) -> Self {
        let _: () = Self::NONZERO_CAPACITY;
        Self {
            hasher,
            buckets: (0..N).map(|_| Vec::new()).collect(),
            len: 0,
            occupied: None,
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Lowest and highest non-empty bucket, or `None` when empty.
    pub fn occupied_range(&self) -> Option<(usize, usize)> {
        self.occupied.map(|r| (r.min, r.max))
    }

    /// Recomputes the occupied range by scanning every bucket. Test and
    /// benchmark oracle for `occupied_range`; never used on the mutation path.
    #[cfg(any(test, feature = "bench_internal"))]
    pub fn rescan_occupied_range(&self) -> Option<(usize, usize)> {
        let min = self.buckets.iter().position(|b| !b.is_empty())?;
        let max = self.buckets.iter().rposition(|b| !b.is_empty())?;
        Some((min, max))
    }

    pub fn clear(&mut self) {
        if let Some(range) = self.occupied.take() {
            for bucket in &mut self.buckets[range.min..=range.max] {
                bucket.clear();
            }
        }
        self.len = 0;
    }

    pub fn begin(&self) -> Cursor<'_, K, V, S, N> {
        Cursor {
            map: self,
            pos: Position(self.first_slot()),
        }
    }

    pub fn end(&self) -> Cursor<'_, K, V, S, N> {
        Cursor {
            map: self,
            pos: Position::END,
        }
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, S, N> {
        let pos = Position(self.first_slot());
        CursorMut { map: self, pos }
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, S, N> {
        CursorMut {
            map: self,
            pos: Position::END,
        }
    }

    pub fn cursor_at(&self, pos: Position) -> Cursor<'_, K, V, S, N> {
        Cursor { map: self, pos }
    }

    pub fn cursor_mut_at(&mut self, pos: Position) -> CursorMut<'_, K, V, S, N> {
        CursorMut { map: self, pos }
    }

    /// Removes the entry at `pos`. Fails with `NotFound` for the end
    /// sentinel or a position that no longer names an entry.
    pub fn remove_at(&mut self, pos: Position) -> Result<(K, V), MapError> {
        let slot = pos.0.ok_or(MapError::NotFound)?;
        if self.entry(slot).is_none() {
            return Err(MapError::NotFound);
        }
        Ok(self.remove_slot(slot))
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: &self.buckets,
            occupied: self.occupied,
            front: self.first_slot(),
            back: self.last_slot(),
            remaining: self.len,
        }
    }

    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let chains: &mut [Vec<Entry<K, V>>] = match self.occupied {
            Some(r) => &mut self.buckets[r.min..=r.max],
            None => &mut [],
        };
        IterMut {
            chains: chains.iter_mut(),
            front: Default::default(),
            back: Default::default(),
            remaining: self.len,
        }
    }

    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &K> + ExactSizeIterator + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator + '_ {
        self.iter().map(|(_, v)| v)
    }

    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator + '_ {
        self.iter_mut().map(|(_, v)| v)
    }

    fn entry(&self, slot: Slot) -> Option<&Entry<K, V>> {
        self.buckets.get(slot.bucket)?.get(slot.index)
    }

    fn entry_mut(&mut self, slot: Slot) -> Option<&mut Entry<K, V>> {
        self.buckets.get_mut(slot.bucket)?.get_mut(slot.index)
    }

    fn first_slot(&self) -> Option<Slot> {
        self.occupied.map(|r| Slot {
            bucket: r.min,
            index: 0,
        })
    }

    fn last_slot(&self) -> Option<Slot> {
        let r = self.occupied?;
        let index = self.buckets[r.max].len().checked_sub(1)?;
        Some(Slot {
            bucket: r.max,
            index,
        })
    }

    /// `slot` itself if it names an entry, otherwise the first entry of the
    /// next occupied bucket.
    fn slot_at_or_after(&self, slot: Slot) -> Option<Slot> {
        first_at_or_after(&self.buckets, self.occupied, slot)
    }

    fn slot_after(&self, slot: Slot) -> Option<Slot> {
        first_at_or_after(
            &self.buckets,
            self.occupied,
            Slot {
                index: slot.index + 1,
                ..slot
            },
        )
    }

    fn slot_before(&self, slot: Slot) -> Option<Slot> {
        last_before(&self.buckets, self.occupied, slot)
    }

    // Cursor capability: checked stepping over positions.

    fn entry_at(&self, pos: Position) -> Result<(&K, &V), MapError> {
        let slot = pos.0.ok_or(MapError::InvalidOperation)?;
        self.entry(slot)
            .map(|e| (&e.key, &e.value))
            .ok_or(MapError::InvalidOperation)
    }

    fn step_forward(&self, pos: Position) -> Result<Position, MapError> {
        let slot = pos.0.ok_or(MapError::InvalidOperation)?;
        if self.entry(slot).is_none() {
            return Err(MapError::InvalidOperation);
        }
        Ok(Position(self.slot_after(slot)))
    }

    fn step_backward(&self, pos: Position) -> Result<Position, MapError> {
        let target = match pos.0 {
            None => self.last_slot(),
            Some(slot) => {
                if self.entry(slot).is_none() {
                    return Err(MapError::InvalidOperation);
                }
                self.slot_before(slot)
            }
        };
        target.map(|s| Position(Some(s))).ok_or(MapError::InvalidOperation)
    }

    fn remove_slot(&mut self, slot: Slot) -> (K, V) {
        let Entry { key, value } = self.buckets[slot.bucket].remove(slot.index);
        self.len -= 1;
        if self.buckets[slot.bucket].is_empty() {
            self.release_bucket(slot.bucket);
        }
        (key, value)
    }

    /// Shrinks the occupied range after `bucket` became empty.
    fn release_bucket(&mut self, bucket: usize) {
        let Some(mut range) = self.occupied else {
            return;
        };
        if self.len == 0 {
            trace!(bucket, "last entry removed, occupied range cleared");
            self.occupied = None;
            return;
        }
        if range.min == bucket {
            if let Some(next) = (bucket + 1..=range.max).find(|&b| !self.buckets[b].is_empty()) {
                trace!(from = bucket, to = next, "min occupied bucket advanced");
                range.min = next;
            }
        }
        if range.max == bucket {
            if let Some(prev) = (range.min..bucket).rev().find(|&b| !self.buckets[b].is_empty()) {
                trace!(from = bucket, to = prev, "max occupied bucket retreated");
                range.max = prev;
            }
        }
        self.occupied = Some(range);
    }
}

impl<K, V, S, const N: usize> ChainedHashMap<K, V, S, N>
where
    K: Hash + Ord,
    S: BuildHasher,
{
    /// Bucket that `key` hashes to, in `[0, N)`.
    pub fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash,
    {
        (self.hasher.hash_one(key) % N as u64) as usize
    }

    fn locate<Q>(&self, key: &Q) -> Option<Slot>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(key);
        self.buckets[bucket]
            .iter()
            .position(|e| e.key.borrow() == key)
            .map(|index| Slot { bucket, index })
    }

    /// Shared insert path. Places the entry before the first strictly
    /// smaller key of its chain and widens the occupied range. An equal key
    /// short-circuits with its slot and `make` is never called.
    fn insert_slot<F>(&mut self, key: K, make: F) -> Result<Slot, Slot>
    where
        F: FnOnce() -> V,
    {
        let bucket = self.bucket_index(&key);
        let chain = &mut self.buckets[bucket];
        let index = match chain.binary_search_by(|probe| key.cmp(&probe.key)) {
            Ok(index) => return Err(Slot { bucket, index }),
            Err(index) => index,
        };
        chain.insert(index, Entry { key, value: make() });
        self.len += 1;
        self.occupied = Some(match self.occupied {
            None => OccupiedRange {
                min: bucket,
                max: bucket,
            },
            Some(r) => OccupiedRange {
                min: r.min.min(bucket),
                max: r.max.max(bucket),
            },
        });
        Ok(Slot { bucket, index })
    }

    /// Inserts a new entry. A key that is already present is rejected and
    /// its stored value is left as it was.
    pub fn insert(&mut self, key: K, value: V) -> Result<Position, InsertError> {
        self.insert_slot(key, || value)
            .map(|slot| Position(Some(slot)))
            .map_err(|_| InsertError::DuplicateKey)
    }

    /// Value for `key`, inserting `make()` first if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let slot = match self.insert_slot(key, make) {
            Ok(slot) | Err(slot) => slot,
        };
        &mut self.buckets[slot.bucket][slot.index].value
    }

    /// Indexing accessor: value for `key`, inserting `V::default()` if absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.get_or_insert_with(key, V::default)
    }

    pub fn value_of<Q>(&self, key: &Q) -> Result<&V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.is_empty() {
            return Err(MapError::NotFound);
        }
        let slot = self.locate(key).ok_or(MapError::NotFound)?;
        Ok(&self.buckets[slot.bucket][slot.index].value)
    }

    pub fn value_of_mut<Q>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.is_empty() {
            return Err(MapError::NotFound);
        }
        let slot = self.locate(key).ok_or(MapError::NotFound)?;
        Ok(&mut self.buckets[slot.bucket][slot.index].value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.value_of(key).ok()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.value_of_mut(key).ok()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key).is_some()
    }

    /// Cursor on `key`, or the end cursor if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V, S, N>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let pos = Position(self.locate(key));
        Cursor { map: self, pos }
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, S, N>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let pos = Position(self.locate(key));
        CursorMut { map: self, pos }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V), MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        if self.is_empty() {
            return Err(MapError::NotFound);
        }
        let slot = self.locate(key).ok_or(MapError::NotFound)?;
        Ok(self.remove_slot(slot))
    }
}

fn first_at_or_after<K, V>(
    buckets: &[Vec<Entry<K, V>>],
    occupied: Option<OccupiedRange>,
    slot: Slot,
) -> Option<Slot> {
    let range = occupied?;
    if slot.index < buckets.get(slot.bucket)?.len() {
        return Some(slot);
    }
    (slot.bucket + 1..=range.max)
        .find(|&b| !buckets[b].is_empty())
        .map(|bucket| Slot { bucket, index: 0 })
}

fn last_before<K, V>(
    buckets: &[Vec<Entry<K, V>>],
    occupied: Option<OccupiedRange>,
    slot: Slot,
) -> Option<Slot> {
    let range = occupied?;
    if slot.index > 0 {
        return Some(Slot {
            index: slot.index - 1,
            ..slot
        });
    }
    (range.min..slot.bucket)
        .rev()
        .find(|&b| !buckets[b].is_empty())
        .map(|bucket| Slot {
            bucket,
            index: buckets[bucket].len() - 1,
        })
}

impl<K, V, S, const N: usize> Clone for ChainedHashMap<K, V, S, N>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            hasher: self.hasher.clone(),
            buckets: self.buckets.clone(),
            len: self.len,
            occupied: self.occupied,
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.hasher.clone_from(&source.hasher);
        self.buckets.clone_from(&source.buckets);
        self.len = source.len;
        self.occupied = source.occupied;
    }
}

impl<K, V, S, const N: usize> PartialEq for ChainedHashMap<K, V, S, N>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len || self.occupied != other.occupied {
            return false;
        }
        match self.occupied {
            None => true,
            Some(r) => self.buckets[r.min..=r.max] == other.buckets[r.min..=r.max],
        }
    }
}

impl<K: Eq, V: Eq, S, const N: usize> Eq for ChainedHashMap<K, V, S, N> {}

impl<K, V, S, const N: usize> fmt::Debug for ChainedHashMap<K, V, S, N>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, const N: usize> Extend<(K, V)> for ChainedHashMap<K, V, S, N>
where
    K: Hash + Ord,
    S: BuildHasher,
{
    /// Keeps the first occurrence of a repeated key.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            let _ = self.insert(k, v);
        }
    }
}

impl<K, V, S, const N: usize> FromIterator<(K, V)> for ChainedHashMap<K, V, S, N>
where
    K: Hash + Ord,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, const M: usize> From<[(K, V); M]> for ChainedHashMap<K, V>
where
    K: Hash + Ord,
{
    fn from(entries: [(K, V); M]) -> Self {
        entries.into_iter().collect()
    }
}

/// Read-only cursor over a `ChainedHashMap`.
pub struct Cursor<'a, K, V, S = BuildBucketHasher, const N: usize = DEFAULT_CAPACITY> {
    map: &'a ChainedHashMap<K, V, S, N>,
    pos: Position,
}

impl<'a, K, V, S, const N: usize> Cursor<'a, K, V, S, N> {
    /// Entry under the cursor, borrowed for the map's lifetime.
    pub fn key_value(&self) -> Result<(&'a K, &'a V), MapError> {
        self.map.entry_at(self.pos)
    }
}

impl<K, V, S, const N: usize> Clone for Cursor<'_, K, V, S, N> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, S, const N: usize> Copy for Cursor<'_, K, V, S, N> {}

impl<K, V, S, const N: usize> PartialEq for Cursor<'_, K, V, S, N> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.pos == other.pos
    }
}

impl<K, V, S, const N: usize> Eq for Cursor<'_, K, V, S, N> {}

impl<K, V, S, const N: usize> fmt::Debug for Cursor<'_, K, V, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}

impl<K, V, S, const N: usize> BidirectionalCursor for Cursor<'_, K, V, S, N> {
    type Key = K;
    type Value = V;
    type Position = Position;

    fn current(&self) -> Result<(&K, &V), MapError> {
        self.map.entry_at(self.pos)
    }

    fn move_next(&mut self) -> Result<(), MapError> {
        self.pos = self.map.step_forward(self.pos)?;
        Ok(())
    }

    fn move_prev(&mut self) -> Result<(), MapError> {
        self.pos = self.map.step_backward(self.pos)?;
        Ok(())
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn is_end(&self) -> bool {
        self.pos.is_end()
    }
}

/// Cursor with mutable access to values and removal of the current entry.
pub struct CursorMut<'a, K, V, S = BuildBucketHasher, const N: usize = DEFAULT_CAPACITY> {
    map: &'a mut ChainedHashMap<K, V, S, N>,
    pos: Position,
}

impl<K, V, S, const N: usize> CursorMut<'_, K, V, S, N> {
    pub fn value_mut(&mut self) -> Result<&mut V, MapError> {
        let slot = self.pos.0.ok_or(MapError::InvalidOperation)?;
        self.map
            .entry_mut(slot)
            .map(|e| &mut e.value)
            .ok_or(MapError::InvalidOperation)
    }

    /// Removes the current entry and moves to the entry that followed it.
    pub fn remove_current(&mut self) -> Result<(K, V), MapError> {
        let slot = self.pos.0.ok_or(MapError::NotFound)?;
        let removed = self.map.remove_at(self.pos)?;
        self.pos = Position(self.map.slot_at_or_after(slot));
        Ok(removed)
    }

    /// Read-only view at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, S, N> {
        Cursor {
            map: self.map,
            pos: self.pos,
        }
    }
}

impl<K, V, S, const N: usize> fmt::Debug for CursorMut<'_, K, V, S, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("pos", &self.pos).finish()
    }
}

impl<K, V, S, const N: usize> BidirectionalCursor for CursorMut<'_, K, V, S, N> {
    type Key = K;
    type Value = V;
    type Position = Position;

    fn current(&self) -> Result<(&K, &V), MapError> {
        self.map.entry_at(self.pos)
    }

    fn move_next(&mut self) -> Result<(), MapError> {
        self.pos = self.map.step_forward(self.pos)?;
        Ok(())
    }

    fn move_prev(&mut self) -> Result<(), MapError> {
        self.pos = self.map.step_backward(self.pos)?;
        Ok(())
    }

    fn position(&self) -> Position {
        self.pos
    }

    fn is_end(&self) -> bool {
        self.pos.is_end()
    }
}

/// Iterator over entries in traversal order.
pub struct Iter<'a, K, V> {
    buckets: &'a [Vec<Entry<K, V>>],
    occupied: Option<OccupiedRange>,
    front: Option<Slot>,
    back: Option<Slot>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let buckets = self.buckets;
        let slot = self.front?;
        let e = &buckets[slot.bucket][slot.index];
        self.remaining -= 1;
        self.front = first_at_or_after(
            buckets,
            self.occupied,
            Slot {
                index: slot.index + 1,
                ..slot
            },
        );
        Some((&e.key, &e.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let buckets = self.buckets;
        let slot = self.back?;
        let e = &buckets[slot.bucket][slot.index];
        self.remaining -= 1;
        self.back = last_before(buckets, self.occupied, slot);
        Some((&e.key, &e.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over entries with mutable values, in traversal order.
pub struct IterMut<'a, K, V> {
    chains: slice::IterMut<'a, Vec<Entry<K, V>>>,
    front: slice::IterMut<'a, Entry<K, V>>,
    back: slice::IterMut<'a, Entry<K, V>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.front.next() {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
            match self.chains.next() {
                Some(chain) => self.front = chain.iter_mut(),
                None => {
                    let e = self.back.next()?;
                    self.remaining -= 1;
                    return Some((&e.key, &mut e.value));
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.back.next_back() {
                self.remaining -= 1;
                return Some((&e.key, &mut e.value));
            }
            match self.chains.next_back() {
                Some(chain) => self.back = chain.iter_mut(),
                None => {
                    let e = self.front.next_back()?;
                    self.remaining -= 1;
                    return Some((&e.key, &mut e.value));
                }
            }
        }
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}
impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// Owning iterator in traversal order.
pub struct IntoIter<K, V> {
    inner: core::iter::Flatten<std::vec::IntoIter<Vec<Entry<K, V>>>>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let Entry { key, value } = self.inner.next()?;
        self.remaining -= 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let Entry { key, value } = self.inner.next_back()?;
        self.remaining -= 1;
        Some((key, value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V, S, const N: usize> IntoIterator for ChainedHashMap<K, V, S, N> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let mut chains = self.buckets.into_vec();
        match self.occupied {
            Some(r) => {
                chains.truncate(r.max + 1);
                chains.drain(..r.min);
            }
            None => chains.clear(),
        }
        IntoIter {
            inner: chains.into_iter().flatten(),
            remaining: self.len,
        }
    }
}

impl<'a, K, V, S, const N: usize> IntoIterator for &'a ChainedHashMap<K, V, S, N> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S, const N: usize> IntoIterator for &'a mut ChainedHashMap<K, V, S, N> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
