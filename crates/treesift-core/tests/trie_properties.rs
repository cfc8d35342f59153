//! Randomized checks of the compressed trie and the sparse bit-set against
//! `std::collections` models.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use treesift_core::index::CompressedTrie;
use treesift_core::storage::SparseBitSet;

/// Short keys over a tiny alphabet, so that keys share prefixes and end
/// inside each other's suffixes.
fn random_key(rng: &mut StdRng) -> Vec<u8> {
    let len = rng.random_range(0..7);
    (0..len).map(|_| b"abc\xff"[rng.random_range(0..4usize)]).collect()
}

fn prefixed<'a>(model: &'a BTreeMap<Vec<u8>, u32>, prefix: &'a [u8]) -> Vec<(Vec<u8>, u32)> {
    model
        .iter()
        .filter(|(key, _)| key.starts_with(prefix))
        .map(|(key, value)| (key.clone(), *value))
        .collect()
}

fn entries(iter: treesift_core::index::Iter<'_, u32>) -> Vec<(Vec<u8>, u32)> {
    iter.map(|(key, value)| (key, *value)).collect()
}

#[test]
fn test_matches_btreemap_under_random_operations() {
    for seed in 0..20 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut trie: CompressedTrie<u32> = CompressedTrie::new();
        let mut model: BTreeMap<Vec<u8>, u32> = BTreeMap::new();

        for step in 0..400u32 {
            let key = random_key(&mut rng);
            if rng.random_bool(0.3) {
                assert_eq!(trie.delete(&key), model.remove(&key), "seed {seed} step {step}");
            } else {
                assert_eq!(trie.put(&key, step), model.insert(key, step), "seed {seed} step {step}");
            }
            assert_eq!(trie.len(), model.len(), "seed {seed} step {step}");
        }

        let all: Vec<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
        assert_eq!(entries(trie.iter()), all, "seed {seed}");

        for _ in 0..100 {
            let key = random_key(&mut rng);
            assert_eq!(trie.find(&key), model.get(&key), "seed {seed} key {key:?}");
        }

        for _ in 0..50 {
            let prefix = random_key(&mut rng);
            let expected = prefixed(&model, &prefix);
            assert_eq!(entries(trie.iter_prefix(&prefix)), expected, "seed {seed} prefix {prefix:?}");

            let first = trie.find_first_by_prefix(&prefix).map(|(k, v)| (k, *v));
            let last = trie.find_last_by_prefix(&prefix).map(|(k, v)| (k, *v));
            assert_eq!(first, expected.first().cloned(), "seed {seed} prefix {prefix:?}");
            assert_eq!(last, expected.last().cloned(), "seed {seed} prefix {prefix:?}");
        }
    }
}

#[test]
fn test_walk_order_for_words() {
    let words = [
        "Kenya", "Kazakhstan", "Kiribati", "Korea", "Kuwait", "Kyrgyz Republic", "Jamaica",
        "Japan", "Jersey", "Jordan", "Iceland", "India", "Indonesia", "Iran", "Iraq", "Ireland",
        "Isle of Man", "Israel", "Italy",
    ];
    let trie: CompressedTrie<usize> = words.iter().enumerate().map(|(i, w)| (*w, i)).collect();

    let mut sorted: Vec<_> = words.to_vec();
    sorted.sort_unstable();
    let mut walked = Vec::new();
    trie.walk(|key, _| {
        walked.push(String::from_utf8(key.to_vec()).unwrap());
        Ok::<_, ()>(())
    })
    .unwrap();

    assert_eq!(walked, sorted);
    for (i, word) in words.iter().enumerate() {
        assert_eq!(trie.find(word), Some(&i));
    }
}

#[test]
fn test_delete_reinsert_restores_lookups() {
    let mut rng = StdRng::seed_from_u64(7);
    let keys: BTreeSet<Vec<u8>> = (0..200).map(|_| random_key(&mut rng)).collect();
    let mut trie: CompressedTrie<u32> = keys.iter().map(|k| (k.clone(), 1)).collect();

    for key in &keys {
        assert_eq!(trie.delete(key), Some(1));
    }
    assert!(trie.is_empty());
    assert_eq!(trie.iter().count(), 0);

    for key in &keys {
        assert_eq!(trie.put(key, 2), None);
    }
    assert_eq!(trie.len(), keys.len());
    for key in &keys {
        assert_eq!(trie.find(key), Some(&2));
    }
}

#[test]
fn test_bitset_union_matches_btreeset() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..10 {
        let left: BTreeSet<u32> = (0..300).map(|_| rng.random_range(0..262_144)).collect();
        let right: BTreeSet<u32> = (0..300).map(|_| rng.random_range(0..5_000)).collect();

        let a = SparseBitSet::from_ids(left.iter().copied()).unwrap();
        let b = SparseBitSet::from_ids(right.iter().copied()).unwrap();
        let union = a.union(&b);

        let expected: Vec<u32> = left.union(&right).copied().collect();
        assert_eq!(union.iter().collect::<Vec<_>>(), expected);
        assert_eq!(union.len(), expected.len());
        assert_eq!(a.intersects(&b), !left.is_disjoint(&right));
    }
}

#[test]
fn test_bitset_range_probe_matches_btreeset() {
    let mut rng = StdRng::seed_from_u64(3);
    let ids: BTreeSet<u32> = (0..200).map(|_| rng.random_range(0..20_000)).collect();
    let set = SparseBitSet::from_ids(ids.iter().copied()).unwrap();

    for _ in 0..500 {
        let first = rng.random_range(0..20_000u32);
        let last = first + rng.random_range(0..300u32);
        let expected = ids.range(first..=last).next().is_some();
        assert_eq!(set.intersects_range(first..=last), expected, "{first}..={last}");
    }
}
