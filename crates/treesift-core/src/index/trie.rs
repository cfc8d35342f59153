//! Byte-keyed radix trie with suffix compression.
//!
//! Every node is reached through a one-byte edge and has one of two shapes:
//!
//! - **Leaf**: the rest of the key is stored verbatim as a suffix. There is
//!   no branching below it.
//! - **Branch**: children are kept in a `Vec` ordered by edge byte and
//!   addressed through a [`ByteRankIndex`], so finding a child is a bit test
//!   plus a rank instead of a scan.
//!
//! A key runs along branch edges until it either ends at a branch (whose
//! value slot it uses) or reaches a leaf (whose suffix must equal the rest
//! of the key). Inserting a key that diverges inside a stored suffix splits
//! the leaf: the shared bytes become single-edge branches and both
//! remainders hang off the divergence point.
//!
//! ```text
//! put "cat", "cap", "car", "dog"
//!
//! root ─c─ (branch) ─a─ (branch) ┬─p─ leaf ""
//!   │                            ├─r─ leaf ""
//!   │                            └─t─ leaf ""
//!   └─d─ leaf "og"
//! ```
//!
//! Deleting clears a value slot but keeps the nodes. A later `put` of the
//! same key reuses them.

use std::fmt;
use std::iter::FusedIterator;
use std::mem;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::storage::succinct::ByteRankIndex;

/// Children of a branch node, ordered by edge byte.
#[derive(Clone)]
struct Children<V> {
    index: ByteRankIndex,
    nodes: Vec<TrieNode<V>>,
}

impl<V> Default for Children<V> {
    fn default() -> Self {
        Self {
            index: ByteRankIndex::new(),
            nodes: Vec::new(),
        }
    }
}

impl<V> Children<V> {
    fn single(node: TrieNode<V>) -> Self {
        let mut children = Self::default();
        children.insert(node);
        children
    }

    fn get(&self, byte: u8) -> Option<&TrieNode<V>> {
        let pos = usize::from(byte);
        self.index
            .is_set(pos)
            .then(|| &self.nodes[self.index.rank(pos)])
    }

    fn get_mut(&mut self, byte: u8) -> Option<&mut TrieNode<V>> {
        let pos = usize::from(byte);
        if self.index.is_set(pos) {
            let slot = self.index.rank(pos);
            Some(&mut self.nodes[slot])
        } else {
            None
        }
    }

    /// Inserts a child whose edge byte is not yet present. The rank of the
    /// new byte is the slot that keeps `nodes` in byte order; everything
    /// from that slot on shifts right by one.
    fn insert(&mut self, node: TrieNode<V>) {
        let pos = usize::from(node.key);
        debug_assert!(!self.index.is_set(pos), "edge {pos} already present");
        let slot = self.index.rank(pos);
        self.index.set(pos);
        self.nodes.insert(slot, node);
    }
}

#[derive(Clone)]
enum Shape<V> {
    /// Remaining key bytes below this node, stored verbatim.
    Leaf(Box<[u8]>),
    Branch(Children<V>),
}

#[derive(Clone)]
struct TrieNode<V> {
    /// Edge byte from the parent. Unused on the root.
    key: u8,
    value: Option<V>,
    shape: Shape<V>,
}

impl<V> TrieNode<V> {
    fn leaf(key: u8, suffix: &[u8], value: Option<V>) -> Self {
        Self {
            key,
            value,
            shape: Shape::Leaf(suffix.into()),
        }
    }

    fn put(&mut self, rest: &[u8], value: V) -> Option<V> {
        let children = match &mut self.shape {
            Shape::Branch(children) => children,
            Shape::Leaf(suffix) => {
                if **suffix == *rest {
                    return self.value.replace(value);
                }
                if self.value.is_none() {
                    // a vacated leaf holds nothing and can take the new key as is
                    *suffix = rest.into();
                    self.value = Some(value);
                    return None;
                }
                let shared = common_prefix_len(suffix, rest);
                self.split_branch(shared);
                return self.put(rest, value);
            }
        };

        match rest.split_first() {
            None => self.value.replace(value),
            Some((&byte, tail)) => match children.get_mut(byte) {
                Some(child) => child.put(tail, value),
                None => {
                    children.insert(Self::leaf(byte, tail, Some(value)));
                    None
                }
            },
        }
    }

    /// Turns this leaf into a branch whose first `shared` suffix bytes are
    /// expanded into single-edge nodes. The node at the end of that chain
    /// receives the rest of the old suffix through [`Self::fork_suffix`].
    fn split_branch(&mut self, shared: usize) {
        let suffix = match mem::replace(&mut self.shape, Shape::Branch(Children::default())) {
            Shape::Leaf(suffix) => suffix,
            branch => {
                self.shape = branch;
                return;
            }
        };
        let (mut value, mut children) = Self::fork_suffix(&suffix[shared..], self.value.take());
        for &byte in suffix[..shared].iter().rev() {
            let node = Self {
                key: byte,
                value: value.take(),
                shape: Shape::Branch(children),
            };
            children = Children::single(node);
        }
        self.value = value;
        self.shape = Shape::Branch(children);
    }

    /// Places the remainder of a displaced suffix. An empty remainder keeps
    /// the value on the node itself; otherwise the value moves down into a
    /// one-edge leaf child.
    fn fork_suffix(rest: &[u8], value: Option<V>) -> (Option<V>, Children<V>) {
        match rest.split_first() {
            None => (value, Children::default()),
            Some((&byte, tail)) => (None, Children::single(Self::leaf(byte, tail, value))),
        }
    }

    fn delete(&mut self, rest: &[u8]) -> Option<V> {
        match &mut self.shape {
            Shape::Leaf(suffix) => {
                if **suffix == *rest {
                    self.value.take()
                } else {
                    None
                }
            }
            Shape::Branch(children) => match rest.split_first() {
                None => self.value.take(),
                Some((&byte, tail)) => children.get_mut(byte)?.delete(tail),
            },
        }
    }

    /// Finds the rightmost live value below this node, appending the bytes
    /// that lead to it onto `key`.
    fn last_live<'a>(&'a self, key: &mut Vec<u8>) -> Option<&'a V> {
        match &self.shape {
            Shape::Leaf(suffix) => {
                let value = self.value.as_ref()?;
                key.extend_from_slice(suffix);
                Some(value)
            }
            Shape::Branch(children) => {
                for child in children.nodes.iter().rev() {
                    key.push(child.key);
                    if let Some(value) = child.last_live(key) {
                        return Some(value);
                    }
                    key.pop();
                }
                self.value.as_ref()
            }
        }
    }

    fn node_count(&self) -> usize {
        match &self.shape {
            Shape::Leaf(_) => 1,
            Shape::Branch(children) => {
                1 + children.nodes.iter().map(Self::node_count).sum::<usize>()
            }
        }
    }

    fn size_bytes(&self) -> usize {
        mem::size_of::<Self>()
            + match &self.shape {
                Shape::Leaf(suffix) => suffix.len(),
                Shape::Branch(children) => {
                    children.nodes.iter().map(Self::size_bytes).sum::<usize>()
                }
            }
    }
}

fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

/// Ordered map from byte strings to values, stored as a compressed trie.
///
/// Keys iterate in lexicographic byte order. The empty key is a valid key.
///
/// # Example
///
/// ```
/// use treesift_core::index::CompressedTrie;
///
/// let mut trie = CompressedTrie::new();
/// trie.put("cat", 1);
/// trie.put("cap", 2);
/// trie.put("dog", 3);
///
/// assert_eq!(trie.find("cap"), Some(&2));
/// assert_eq!(trie.find("ca"), None);
///
/// let under_ca: Vec<_> = trie.iter_prefix("ca").map(|(k, _)| k).collect();
/// assert_eq!(under_ca, vec![b"cap".to_vec(), b"cat".to_vec()]);
/// ```
#[derive(Clone)]
pub struct CompressedTrie<V> {
    root: TrieNode<V>,
    len: usize,
}

impl<V> Default for CompressedTrie<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> CompressedTrie<V> {
    /// Creates an empty trie.
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: TrieNode::leaf(0, &[], None),
            len: 0,
        }
    }

    /// Returns the number of keys with a value.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no key has a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` under `key`, returning the value it replaced.
    pub fn put(&mut self, key: impl AsRef<[u8]>, value: V) -> Option<V> {
        let previous = self.root.put(key.as_ref(), value);
        if previous.is_none() {
            self.len += 1;
        }
        previous
    }

    /// Looks up `key`.
    #[must_use]
    pub fn find(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        let mut node = &self.root;
        let mut rest = key.as_ref();
        loop {
            match &node.shape {
                Shape::Leaf(suffix) => {
                    return if **suffix == *rest {
                        node.value.as_ref()
                    } else {
                        None
                    };
                }
                Shape::Branch(children) => match rest.split_first() {
                    None => return node.value.as_ref(),
                    Some((&byte, tail)) => {
                        node = children.get(byte)?;
                        rest = tail;
                    }
                },
            }
        }
    }

    /// Same as [`find`](Self::find), under the usual map name.
    #[must_use]
    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&V> {
        self.find(key)
    }

    /// Returns `true` if `key` has a value.
    #[must_use]
    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.find(key).is_some()
    }

    /// Removes the value stored under `key` and returns it.
    ///
    /// Nodes are not reclaimed.
    pub fn delete(&mut self, key: impl AsRef<[u8]>) -> Option<V> {
        let removed = self.root.delete(key.as_ref());
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Iterates all entries in lexicographic key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::subtree(&self.root, Vec::new())
    }

    /// Iterates the entries whose key starts with `prefix`, in lexicographic
    /// key order.
    #[must_use]
    pub fn iter_prefix(&self, prefix: impl AsRef<[u8]>) -> Iter<'_, V> {
        let prefix = prefix.as_ref();
        match self.descend(prefix) {
            Some((node, depth)) => Iter::subtree(node, prefix[..depth].to_vec()),
            None => Iter::empty(),
        }
    }

    /// Calls `visit` for every entry in lexicographic key order, stopping at
    /// the first error.
    pub fn walk<E>(&self, mut visit: impl FnMut(&[u8], &V) -> Result<(), E>) -> Result<(), E> {
        self.iter().try_for_each(|(key, value)| visit(&key, value))
    }

    /// Like [`walk`](Self::walk), restricted to keys starting with `prefix`.
    pub fn walk_prefix<E>(
        &self,
        prefix: impl AsRef<[u8]>,
        mut visit: impl FnMut(&[u8], &V) -> Result<(), E>,
    ) -> Result<(), E> {
        self.iter_prefix(prefix)
            .try_for_each(|(key, value)| visit(&key, value))
    }

    /// Returns the lexicographically first entry under `prefix`.
    ///
    /// When values are ranks assigned in walk order this is also the entry
    /// with the smallest value.
    #[must_use]
    pub fn find_first_by_prefix(&self, prefix: impl AsRef<[u8]>) -> Option<(Vec<u8>, &V)> {
        self.iter_prefix(prefix).next()
    }

    /// Returns the lexicographically last entry under `prefix`, following
    /// the rightmost live path instead of enumerating the subtree.
    #[must_use]
    pub fn find_last_by_prefix(&self, prefix: impl AsRef<[u8]>) -> Option<(Vec<u8>, &V)> {
        let prefix = prefix.as_ref();
        let (node, depth) = self.descend(prefix)?;
        let mut key = prefix[..depth].to_vec();
        let value = node.last_live(&mut key)?;
        Some((key, value))
    }

    /// Follows `prefix` down the trie.
    ///
    /// Returns the node covering every key with that prefix and how many
    /// prefix bytes were consumed by edges on the way. When the walk ends on
    /// a leaf, the unconsumed part of the prefix is a prefix of its suffix.
    fn descend(&self, prefix: &[u8]) -> Option<(&TrieNode<V>, usize)> {
        let mut node = &self.root;
        let mut depth = 0;
        loop {
            match &node.shape {
                Shape::Leaf(suffix) => {
                    return suffix.starts_with(&prefix[depth..]).then_some((node, depth));
                }
                Shape::Branch(children) => {
                    let Some(&byte) = prefix.get(depth) else {
                        return Some((node, depth));
                    };
                    node = children.get(byte)?;
                    depth += 1;
                }
            }
        }
    }

    /// Returns the number of allocated nodes, including vacated ones.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Returns the approximate memory footprint in bytes.
    #[must_use]
    pub fn size_bytes(&self) -> usize {
        mem::size_of::<Self>() - mem::size_of::<TrieNode<V>>() + self.root.size_bytes()
    }
}

impl<K: AsRef<[u8]>, V> Extend<(K, V)> for CompressedTrie<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K: AsRef<[u8]>, V> FromIterator<(K, V)> for CompressedTrie<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<'a, V> IntoIterator for &'a CompressedTrie<V> {
    type Item = (Vec<u8>, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<V: fmt::Debug> fmt::Debug for CompressedTrie<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.iter()
                    .map(|(key, value)| (String::from_utf8_lossy(&key).into_owned(), value)),
            )
            .finish()
    }
}

/// Renders the trie as a `{key: value}` map in walk order. Keys that are
/// not valid UTF-8 are converted lossily.
impl<V: Serialize> Serialize for CompressedTrie<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len))?;
        for (key, value) in self {
            map.serialize_entry(&String::from_utf8_lossy(&key), value)?;
        }
        map.end()
    }
}

/// Lexicographic iterator over trie entries.
///
/// Created by [`CompressedTrie::iter`] and [`CompressedTrie::iter_prefix`].
/// Keys are yielded as owned byte vectors.
pub struct Iter<'a, V> {
    /// Entry of the subtree root, yielded before its children.
    first: Option<(Vec<u8>, &'a V)>,
    /// Pending siblings per level, with the key length above them.
    stack: Vec<(std::slice::Iter<'a, TrieNode<V>>, usize)>,
    key: Vec<u8>,
}

impl<'a, V> Iter<'a, V> {
    fn empty() -> Self {
        Self {
            first: None,
            stack: Vec::new(),
            key: Vec::new(),
        }
    }

    fn subtree(node: &'a TrieNode<V>, key: Vec<u8>) -> Self {
        let mut iter = Self::empty();
        match &node.shape {
            Shape::Leaf(suffix) => {
                iter.first = node
                    .value
                    .as_ref()
                    .map(|value| ([key.as_slice(), &suffix[..]].concat(), value));
            }
            Shape::Branch(children) => {
                iter.first = node.value.as_ref().map(|value| (key.clone(), value));
                iter.stack.push((children.nodes.iter(), key.len()));
                iter.key = key;
            }
        }
        iter
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (Vec<u8>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(entry) = self.first.take() {
            return Some(entry);
        }
        loop {
            let (siblings, depth) = self.stack.last_mut()?;
            let depth = *depth;
            let Some(node) = siblings.next() else {
                self.stack.pop();
                continue;
            };
            self.key.truncate(depth);
            self.key.push(node.key);
            match &node.shape {
                Shape::Leaf(suffix) => {
                    if let Some(value) = &node.value {
                        return Some(([self.key.as_slice(), &suffix[..]].concat(), value));
                    }
                }
                Shape::Branch(children) => {
                    self.stack.push((children.nodes.iter(), self.key.len()));
                    if let Some(value) = &node.value {
                        return Some((self.key.clone(), value));
                    }
                }
            }
        }
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<V>(iter: Iter<'_, V>) -> Vec<String> {
        iter.map(|(key, _)| String::from_utf8(key).unwrap()).collect()
    }

    #[test]
    fn test_basic() {
        let mut items = CompressedTrie::new();
        items.put("alpha", 1);
        items.put("beta", 2);
        items.put("gamma", 3);
        items.put("delta", 4);
        items.delete("beta");
        items.put("beta", 5);
        items.put("cap", 6);
        items.put("cat", 7);
        items.put("car", 8);
        items.delete("delta");
        items.delete("delta");
        items.delete("unknown");

        assert_eq!(items.len(), 6);
        assert_eq!(items.find("alpha"), Some(&1));
        assert_eq!(items.find("beta"), Some(&5));
        assert_eq!(items.find("gamma"), Some(&3));
        assert_eq!(items.find("cap"), Some(&6));
        assert_eq!(items.find("cat"), Some(&7));
        assert_eq!(items.find("car"), Some(&8));
        assert_eq!(items.find("delta"), None);
    }

    #[test]
    fn test_put_splits_suffixes() {
        let cases: Vec<(&str, Vec<Vec<u8>>)> = vec![
            ("split by last byte of suffix", vec![vec![1, 2, 3, 4, 5], vec![1, 2, 3, 4, 6]]),
            ("split with long suffix", vec![vec![1, 2, 3, 4, 5], vec![1, 2, 3, 4, 5, 6, 7, 8]]),
            ("split by prefix", vec![vec![1, 2, 3, 4], vec![1, 2]]),
            ("small key", vec![vec![1, 2, 3], vec![1]]),
            ("diverge at first byte", vec![vec![1, 2, 3], vec![2, 2, 3]]),
        ];
        for (name, keys) in cases {
            let mut trie = CompressedTrie::new();
            for (i, key) in keys.iter().enumerate() {
                assert_eq!(trie.put(key, i + 1), None, "{name}");
            }
            assert_eq!(trie.len(), keys.len(), "{name}");
            for (i, key) in keys.iter().enumerate() {
                assert_eq!(trie.find(key), Some(&(i + 1)), "{name}: key {key:?}");
            }
        }
    }

    #[test]
    fn test_branch_split_expands_shared_prefix() {
        let mut trie = CompressedTrie::new();
        trie.put([1u8, 2, 3, 4, 5], 'a');
        assert_eq!(trie.node_count(), 1);

        trie.put([1u8, 2, 3, 4, 6], 'b');
        // root, four shared single-edge nodes, two leaves
        assert_eq!(trie.node_count(), 7);
        assert_eq!(trie.find([1u8, 2, 3, 4, 5]), Some(&'a'));
        assert_eq!(trie.find([1u8, 2, 3, 4, 6]), Some(&'b'));
        assert_eq!(trie.find([1u8, 2, 3, 4]), None);
    }

    #[test]
    fn test_key_ending_at_stored_leaf_forks_suffix() {
        let mut trie = CompressedTrie::new();
        trie.put("capacity", 1);
        trie.put("cap", 2);
        trie.put("capital", 3);

        assert_eq!(trie.find("capacity"), Some(&1));
        assert_eq!(trie.find("cap"), Some(&2));
        assert_eq!(trie.find("capital"), Some(&3));
        assert_eq!(trie.find("capa"), None);
        assert_eq!(keys(trie.iter()), vec!["cap", "capacity", "capital"]);
    }

    #[test]
    fn test_empty_key() {
        let mut trie = CompressedTrie::new();
        assert_eq!(trie.find(""), None);

        trie.put("abc", 1);
        trie.put("", 0);
        assert_eq!(trie.find(""), Some(&0));
        assert_eq!(trie.find("abc"), Some(&1));
        assert_eq!(keys(trie.iter()), vec!["", "abc"]);

        assert_eq!(trie.delete(""), Some(0));
        assert_eq!(trie.find(""), None);
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_overwrite_keeps_len() {
        let mut trie = CompressedTrie::new();
        assert_eq!(trie.put("key", 1), None);
        assert_eq!(trie.put("key", 2), Some(1));
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.find("key"), Some(&2));
    }

    #[test]
    fn test_delete_then_reinsert() {
        let mut trie = CompressedTrie::new();
        trie.put("car", 1);
        trie.put("cart", 2);
        let nodes = trie.node_count();

        assert_eq!(trie.delete("car"), Some(1));
        assert_eq!(trie.delete("car"), None);
        assert_eq!(trie.len(), 1);
        assert_eq!(trie.node_count(), nodes);
        assert_eq!(keys(trie.iter()), vec!["cart"]);

        assert_eq!(trie.put("car", 3), None);
        assert_eq!(trie.len(), 2);
        assert_eq!(trie.find("car"), Some(&3));
        assert_eq!(trie.find("cart"), Some(&2));
    }

    #[test]
    fn test_vacated_leaf_is_reused() {
        let mut trie = CompressedTrie::new();
        trie.put("dog", 1);
        trie.delete("dog");
        trie.put("cat", 2);

        assert_eq!(trie.find("dog"), None);
        assert_eq!(trie.find("cat"), Some(&2));
        assert_eq!(trie.len(), 1);
    }

    #[test]
    fn test_walk_is_lexicographic() {
        let trie: CompressedTrie<usize> = ["gamma", "alpha", "delta", "beta", "al", "alp", "b"]
            .into_iter()
            .enumerate()
            .map(|(i, key)| (key, i))
            .collect();

        let mut visited = Vec::new();
        trie.walk(|key, _| {
            visited.push(String::from_utf8_lossy(key).into_owned());
            Ok::<_, ()>(())
        })
        .unwrap();
        assert_eq!(visited, vec!["al", "alp", "alpha", "b", "beta", "delta", "gamma"]);
    }

    #[test]
    fn test_walk_stops_on_error() {
        let trie: CompressedTrie<u32> = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        let mut seen = 0;
        let result = trie.walk(|_, &value| {
            seen += 1;
            if value == 2 { Err(value) } else { Ok(()) }
        });
        assert_eq!(result, Err(2));
        assert_eq!(seen, 2);
    }

    #[test]
    fn test_walk_prefix() {
        let cases: [(&str, &[&str], &str, &[&str]); 7] = [
            ("single value", &["foo"], "fo", &["foo"]),
            ("not existing prefix", &["foo"], "fos", &[]),
            ("no suffixes", &["cat", "cap", "car", "foo", "bar"], "ca", &["cap", "car", "cat"]),
            ("too long prefix", &["cap", "car", "cat"], "catapult", &[]),
            ("empty prefix", &["cat", "cap", "car", "foo", "bar"], "", &["bar", "cap", "car", "cat", "foo"]),
            ("suffix case", &["capacity"], "cap", &["capacity"]),
            (
                "mixed",
                &["QtGgCdh8S", "QjelrTqoqGZV", "QNaEhkK9E", "Q1iq coOLuBe5c", "GQE9WruzR1p8"],
                "Qj",
                &["QjelrTqoqGZV"],
            ),
        ];
        for (name, values, prefix, want) in cases {
            let trie: CompressedTrie<usize> =
                values.iter().enumerate().map(|(i, v)| (*v, i)).collect();

            let mut got = Vec::new();
            trie.walk_prefix(prefix, |key, _| {
                got.push(String::from_utf8_lossy(key).into_owned());
                Ok::<_, ()>(())
            })
            .unwrap();
            assert_eq!(got, want, "{name}");
        }
    }

    #[test]
    fn test_iter_prefix_includes_exact_key() {
        let trie: CompressedTrie<u32> = [("car", 1), ("cart", 2), ("cab", 3)].into_iter().collect();
        assert_eq!(keys(trie.iter_prefix("car")), vec!["car", "cart"]);
        assert_eq!(keys(trie.iter_prefix("cart")), vec!["cart"]);
        assert_eq!(keys(trie.iter_prefix("carts")), Vec::<String>::new());
    }

    #[test]
    fn test_find_first_and_last_by_prefix() {
        let words = ["apple", "apply", "apricot", "banana", "band", "bandage", "can"];
        let trie: CompressedTrie<usize> =
            words.iter().enumerate().map(|(i, w)| (*w, i + 1)).collect();

        assert_eq!(trie.find_first_by_prefix("ap"), Some((b"apple".to_vec(), &1)));
        assert_eq!(trie.find_last_by_prefix("ap"), Some((b"apricot".to_vec(), &3)));
        assert_eq!(trie.find_first_by_prefix("band"), Some((b"band".to_vec(), &5)));
        assert_eq!(trie.find_last_by_prefix("band"), Some((b"bandage".to_vec(), &6)));
        assert_eq!(trie.find_first_by_prefix("c"), Some((b"can".to_vec(), &7)));
        assert_eq!(trie.find_last_by_prefix("c"), Some((b"can".to_vec(), &7)));
        assert_eq!(trie.find_first_by_prefix(""), Some((b"apple".to_vec(), &1)));
        assert_eq!(trie.find_last_by_prefix(""), Some((b"can".to_vec(), &7)));
        assert_eq!(trie.find_first_by_prefix("x"), None);
        assert_eq!(trie.find_last_by_prefix("cane"), None);
    }

    #[test]
    fn test_find_last_skips_deleted() {
        let mut trie: CompressedTrie<u32> =
            [("ab", 1), ("abc", 2), ("abd", 3)].into_iter().collect();
        trie.delete("abd");
        assert_eq!(trie.find_last_by_prefix("ab"), Some((b"abc".to_vec(), &2)));
        trie.delete("abc");
        assert_eq!(trie.find_last_by_prefix("ab"), Some((b"ab".to_vec(), &1)));
        trie.delete("ab");
        assert_eq!(trie.find_last_by_prefix("ab"), None);
        assert_eq!(trie.find_first_by_prefix("ab"), None);
    }

    #[test]
    fn test_serialize_as_map() {
        let trie: CompressedTrie<u32> = [("alpha", 1), ("beta", 2), ("gamma", 3), ("delta", 4)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&trie).unwrap();
        assert_eq!(json, r#"{"alpha":1,"beta":2,"delta":4,"gamma":3}"#);
    }

    #[test]
    fn test_debug_lists_entries() {
        let trie: CompressedTrie<u32> = [("b", 2), ("a", 1)].into_iter().collect();
        assert_eq!(format!("{trie:?}"), r#"{"a": 1, "b": 2}"#);
    }

    #[test]
    fn test_size_grows_with_content() {
        let empty = CompressedTrie::<u32>::new();
        let mut trie = CompressedTrie::new();
        trie.put("classification", 1);
        assert!(trie.size_bytes() > empty.size_bytes());
        trie.put("class", 2);
        assert!(trie.node_count() > 1);
    }
}
