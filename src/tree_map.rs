//! TreeMap: unbalanced binary search tree stored in a slot arena.
//!
//! Nodes live in a `SlotMap`; `parent`, `left` and `right` are optional
//! generational keys into it, so parent lookup is O(1) and there is no
//! shared ownership between nodes. A key to a removed node never resolves
//! again, even if its slot is reused, so stale positions fail cleanly
//! instead of aliasing a newer entry.
//!
//! No rebalancing is done: depth depends on insertion order and sorted
//! input degrades the tree into a list.

use crate::cursor::BidirectionalCursor;
use crate::error::{InsertError, MapError};
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::iter::FusedIterator;
use core::ptr;
use slotmap::{new_key_type, SecondaryMap, SlotMap};
use tracing::trace;

new_key_type! {
    struct NodeKey;
}

#[derive(Clone, Debug)]
struct Node<K, V> {
    key: K,
    value: V,
    parent: Option<NodeKey>,
    left: Option<NodeKey>,
    right: Option<NodeKey>,
}

type Arena<K, V> = SlotMap<NodeKey, Node<K, V>>;

/// Location of a node, or the end sentinel.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Position(Option<NodeKey>);

impl Position {
    pub const END: Position = Position(None);

    pub fn is_end(&self) -> bool {
        self.0.is_none()
    }
}

#[derive(Clone)]
pub struct TreeMap<K, V> {
    nodes: Arena<K, V>,
    root: Option<NodeKey>,
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

fn leftmost<K, V>(nodes: &Arena<K, V>, mut k: NodeKey) -> NodeKey {
    while let Some(l) = nodes[k].left {
        k = l;
    }
    k
}

fn rightmost<K, V>(nodes: &Arena<K, V>, mut k: NodeKey) -> NodeKey {
    while let Some(r) = nodes[k].right {
        k = r;
    }
    k
}

/// In-order successor: leftmost of the right subtree, or the first
/// ancestor reached from its left side.
fn successor<K, V>(nodes: &Arena<K, V>, k: NodeKey) -> Option<NodeKey> {
    if let Some(r) = nodes[k].right {
        return Some(leftmost(nodes, r));
    }
    let mut cur = k;
    while let Some(p) = nodes[cur].parent {
        if nodes[p].left == Some(cur) {
            return Some(p);
        }
        cur = p;
    }
    None
}

fn predecessor<K, V>(nodes: &Arena<K, V>, k: NodeKey) -> Option<NodeKey> {
    if let Some(l) = nodes[k].left {
        return Some(rightmost(nodes, l));
    }
    let mut cur = k;
    while let Some(p) = nodes[cur].parent {
        if nodes[p].right == Some(cur) {
            return Some(p);
        }
        cur = p;
    }
    None
}

// Structural operations: no key comparisons.
impl<K, V> TreeMap<K, V> {
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeKey, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();
        while let Some((k, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.nodes[k];
            stack.extend(node.left.map(|c| (c, depth + 1)));
            stack.extend(node.right.map(|c| (c, depth + 1)));
        }
        height
    }

    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let n = &self.nodes[self.first()?];
        Some((&n.key, &n.value))
    }

    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let n = &self.nodes[self.last()?];
        Some((&n.key, &n.value))
    }

    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            map: self,
            pos: Position(self.first()),
        }
    }

    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor {
            map: self,
            pos: Position::END,
        }
    }

    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V> {
        let pos = Position(self.first());
        CursorMut { map: self, pos }
    }

    pub fn end_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut {
            map: self,
            pos: Position::END,
        }
    }

    pub fn cursor_at(&self, pos: Position) -> Cursor<'_, K, V> {
        Cursor { map: self, pos }
    }

    pub fn cursor_mut_at(&mut self, pos: Position) -> CursorMut<'_, K, V> {
        CursorMut { map: self, pos }
    }

    /// Removes the node at `pos`. Fails with `NotFound` for the end
    /// sentinel or a stale position.
    pub fn remove_at(&mut self, pos: Position) -> Result<(K, V), MapError> {
        let k = pos.0.ok_or(MapError::NotFound)?;
        self.remove_node(k).ok_or(MapError::NotFound)
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            nodes: &self.nodes,
            front: self.first(),
            back: self.last(),
            remaining: self.len(),
        }
    }

    /// Mutable iteration in key order. Ranks every node first, so setup is
    /// O(n) before the first item.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let mut rank: SecondaryMap<NodeKey, usize> = SecondaryMap::with_capacity(self.nodes.len());
        let mut cur = self.first();
        let mut n = 0;
        while let Some(k) = cur {
            rank.insert(k, n);
            n += 1;
            cur = successor(&self.nodes, k);
        }
        let mut ordered: Vec<Option<(&K, &mut V)>> = (0..n).map(|_| None).collect();
        for (k, node) in self.nodes.iter_mut() {
            if let Some(&r) = rank.get(k) {
                ordered[r] = Some((&node.key, &mut node.value));
            }
        }
        IterMut {
            inner: ordered.into_iter().flatten(),
            remaining: n,
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

    fn first(&self) -> Option<NodeKey> {
        self.root.map(|r| leftmost(&self.nodes, r))
    }

    fn last(&self) -> Option<NodeKey> {
        self.root.map(|r| rightmost(&self.nodes, r))
    }

    // Cursor capability: checked stepping over positions.

    fn entry_at(&self, pos: Position) -> Result<(&K, &V), MapError> {
        let k = pos.0.ok_or(MapError::InvalidOperation)?;
        self.nodes
            .get(k)
            .map(|n| (&n.key, &n.value))
            .ok_or(MapError::InvalidOperation)
    }

    fn step_forward(&self, pos: Position) -> Result<Position, MapError> {
        let k = pos.0.ok_or(MapError::InvalidOperation)?;
        if !self.nodes.contains_key(k) {
            return Err(MapError::InvalidOperation);
        }
        Ok(Position(successor(&self.nodes, k)))
    }

    fn step_backward(&self, pos: Position) -> Result<Position, MapError> {
        let target = match pos.0 {
            None => self.last(),
            Some(k) => {
                if !self.nodes.contains_key(k) {
                    return Err(MapError::InvalidOperation);
                }
                predecessor(&self.nodes, k)
            }
        };
        target.map(|k| Position(Some(k))).ok_or(MapError::InvalidOperation)
    }

    /// Points `parent`'s link to `old` (or the root) at `new`.
    fn replace_child(&mut self, parent: Option<NodeKey>, old: NodeKey, new: Option<NodeKey>) {
        match parent {
            None => self.root = new,
            Some(p) => {
                let p = &mut self.nodes[p];
                if p.left == Some(old) {
                    p.left = new;
                } else {
                    p.right = new;
                }
            }
        }
    }

    /// Unlinks node `z` and releases it. Returns `None` if `z` is stale.
    fn remove_node(&mut self, z: NodeKey) -> Option<(K, V)> {
        let (parent, left, right) = {
            let n = self.nodes.get(z)?;
            (n.parent, n.left, n.right)
        };
        match (left, right) {
            (None, None) => {
                trace!("removing leaf");
                self.replace_child(parent, z, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("removing node with one child");
                self.replace_child(parent, z, Some(child));
                self.nodes[child].parent = parent;
            }
            (Some(l), Some(r)) => {
                let s = leftmost(&self.nodes, r);
                trace!(adjacent = s == r, "removing node with two children");
                if s != r {
                    // Splice the successor out; it has no left child.
                    let s_parent = self.nodes[s].parent;
                    let s_right = self.nodes[s].right;
                    if let Some(sp) = s_parent {
                        self.nodes[sp].left = s_right;
                    }
                    if let Some(sr) = s_right {
                        self.nodes[sr].parent = s_parent;
                    }
                    self.nodes[s].right = Some(r);
                    self.nodes[r].parent = Some(s);
                }
                self.nodes[s].left = Some(l);
                self.nodes[l].parent = Some(s);
                self.nodes[s].parent = parent;
                self.replace_child(parent, z, Some(s));
            }
        }
        self.nodes.remove(z).map(|n| (n.key, n.value))
    }

    #[cfg(test)]
    pub(crate) fn assert_links(&self)
    where
        K: Ord,
    {
        if let Some(r) = self.root {
            assert_eq!(self.nodes[r].parent, None, "root must have no parent");
        }
        let mut reachable = 0;
        let mut stack: Vec<NodeKey> = self.root.into_iter().collect();
        while let Some(k) = stack.pop() {
            reachable += 1;
            let n = &self.nodes[k];
            if let Some(l) = n.left {
                assert_eq!(self.nodes[l].parent, Some(k));
                assert!(self.nodes[l].key < n.key);
                stack.push(l);
            }
            if let Some(r) = n.right {
                assert_eq!(self.nodes[r].parent, Some(k));
                assert!(self.nodes[r].key > n.key);
                stack.push(r);
            }
        }
        assert_eq!(reachable, self.nodes.len(), "every node must hang off the root");
        assert!(self.keys().zip(self.keys().skip(1)).all(|(a, b)| a < b));
    }
}

impl<K, V> TreeMap<K, V>
where
    K: Ord,
{
    fn locate<Q>(&self, key: &Q) -> Option<NodeKey>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut cur = self.root;
        while let Some(k) = cur {
            let n = &self.nodes[k];
            cur = match key.cmp(n.key.borrow()) {
                Ordering::Less => n.left,
                Ordering::Greater => n.right,
                Ordering::Equal => return Some(k),
            };
        }
        None
    }

    /// Shared insert path: links a new leaf at the first free slot on the
    /// search path. An equal key short-circuits with its node and `make` is
    /// never called.
    fn insert_node<F>(&mut self, key: K, make: F) -> Result<NodeKey, NodeKey>
    where
        F: FnOnce() -> V,
    {
        let mut parent = None;
        let mut go_left = false;
        let mut cur = self.root;
        while let Some(k) = cur {
            let n = &self.nodes[k];
            parent = Some(k);
            cur = match key.cmp(&n.key) {
                Ordering::Less => {
                    go_left = true;
                    n.left
                }
                Ordering::Greater => {
                    go_left = false;
                    n.right
                }
                Ordering::Equal => return Err(k),
            };
        }
        let new = self.nodes.insert(Node {
            key,
            value: make(),
            parent,
            left: None,
            right: None,
        });
        match parent {
            None => self.root = Some(new),
            Some(p) if go_left => self.nodes[p].left = Some(new),
            Some(p) => self.nodes[p].right = Some(new),
        }
        Ok(new)
    }

    /// Inserts a new entry. A key that is already present is rejected and
    /// its stored value is left as it was.
    pub fn insert(&mut self, key: K, value: V) -> Result<Position, InsertError> {
        self.insert_node(key, || value)
            .map(|k| Position(Some(k)))
            .map_err(|_| InsertError::DuplicateKey)
    }

    /// Value for `key`, inserting `make()` first if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let k = match self.insert_node(key, make) {
            Ok(k) | Err(k) => k,
        };
        &mut self.nodes[k].value
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
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(MapError::NotFound);
        }
        let k = self.locate(key).ok_or(MapError::NotFound)?;
        Ok(&self.nodes[k].value)
    }

    pub fn value_of_mut<Q>(&mut self, key: &Q) -> Result<&mut V, MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(MapError::NotFound);
        }
        let k = self.locate(key).ok_or(MapError::NotFound)?;
        Ok(&mut self.nodes[k].value)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.value_of(key).ok()
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.value_of_mut(key).ok()
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.locate(key).is_some()
    }

    /// Cursor on `key`, or the end cursor if it is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let pos = Position(self.locate(key));
        Cursor { map: self, pos }
    }

    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let pos = Position(self.locate(key));
        CursorMut { map: self, pos }
    }

    pub fn remove<Q>(&mut self, key: &Q) -> Result<(K, V), MapError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        if self.is_empty() {
            return Err(MapError::NotFound);
        }
        let k = self.locate(key).ok_or(MapError::NotFound)?;
        self.remove_node(k).ok_or(MapError::NotFound)
    }
}

impl<K, V> PartialEq for TreeMap<K, V>
where
    K: PartialEq,
    V: PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq, V: Eq> Eq for TreeMap<K, V> {}

impl<K, V> fmt::Debug for TreeMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    /// Keeps the first occurrence of a repeated key.
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            let _ = self.insert(k, v);
        }
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V, const M: usize> From<[(K, V); M]> for TreeMap<K, V> {
    fn from(entries: [(K, V); M]) -> Self {
        entries.into_iter().collect()
    }
}

/// Read-only cursor over a `TreeMap`.
pub struct Cursor<'a, K, V> {
    map: &'a TreeMap<K, V>,
    pos: Position,
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Entry under the cursor, borrowed for the map's lifetime.
    pub fn key_value(&self) -> Result<(&'a K, &'a V), MapError> {
        self.map.entry_at(self.pos)
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.map, other.map) && self.pos == other.pos
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K, V> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("pos", &self.pos).finish()
    }
}

impl<K, V> BidirectionalCursor for Cursor<'_, K, V> {
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
pub struct CursorMut<'a, K, V> {
    map: &'a mut TreeMap<K, V>,
    pos: Position,
}

impl<K, V> CursorMut<'_, K, V> {
    pub fn value_mut(&mut self) -> Result<&mut V, MapError> {
        let k = self.pos.0.ok_or(MapError::InvalidOperation)?;
        self.map
            .nodes
            .get_mut(k)
            .map(|n| &mut n.value)
            .ok_or(MapError::InvalidOperation)
    }

    /// Removes the current entry and moves to its in-order successor.
    pub fn remove_current(&mut self) -> Result<(K, V), MapError> {
        let next = self.map.step_forward(self.pos).map_err(|_| MapError::NotFound)?;
        let removed = self.map.remove_at(self.pos)?;
        // The successor node survives the splice, so its key stays valid.
        self.pos = next;
        Ok(removed)
    }

    /// Read-only view at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor {
            map: self.map,
            pos: self.pos,
        }
    }
}

impl<K, V> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut").field("pos", &self.pos).finish()
    }
}

impl<K, V> BidirectionalCursor for CursorMut<'_, K, V> {
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

/// Iterator over entries in ascending key order.
pub struct Iter<'a, K, V> {
    nodes: &'a Arena<K, V>,
    front: Option<NodeKey>,
    back: Option<NodeKey>,
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
        let nodes = self.nodes;
        let k = self.front?;
        self.remaining -= 1;
        self.front = successor(nodes, k);
        let n = &nodes[k];
        Some((&n.key, &n.value))
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
        let nodes = self.nodes;
        let k = self.back?;
        self.remaining -= 1;
        self.back = predecessor(nodes, k);
        let n = &nodes[k];
        Some((&n.key, &n.value))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over entries with mutable values, in ascending key order.
pub struct IterMut<'a, K, V> {
    inner: core::iter::Flatten<std::vec::IntoIter<Option<(&'a K, &'a mut V)>>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.inner.next()?;
        self.remaining -= 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let item = self.inner.next_back()?;
        self.remaining -= 1;
        Some(item)
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

/// Owning iterator in ascending key order.
pub struct IntoIter<K, V> {
    nodes: Arena<K, V>,
    order: std::vec::IntoIter<NodeKey>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        let k = self.order.next()?;
        self.nodes.remove(k).map(|n| (n.key, n.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let k = self.order.next_back()?;
        self.nodes.remove(k).map(|n| (n.key, n.value))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        let mut order = Vec::with_capacity(self.len());
        let mut cur = self.first();
        while let Some(k) = cur {
            order.push(k);
            cur = successor(&self.nodes, k);
        }
        IntoIter {
            nodes: self.nodes,
            order: order.into_iter(),
        }
    }
}

impl<'a, K, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V> IntoIterator for &'a mut TreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}
