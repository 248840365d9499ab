// A generic bidirectional map `K -> V` (many keys may share one value).
// Drives the Assembly's fingerprint -> component and read-id -> component
// indices: the forward direction is a plain lookup, the reverse direction
// answers "which keys currently point at this value" (e.g. which
// fingerprints belong to a component), which a component merge needs in
// order to re-home every fingerprint it absorbs.

// Copyright 2026 Ryan Wick (rrwick@gmail.com)
// https://github.com/rrwick/dbg-assembler

// This file is part of dbg-assembler. dbg-assembler is free software: you can redistribute it
// and/or modify it under the terms of the GNU General Public License as published by the Free
// Software Foundation, either version 3 of the License, or (at your option) any later version.
// dbg-assembler is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU General Public License for more details. You should have received a copy of the
// GNU General Public License along with dbg-assembler. If not, see
// <http://www.gnu.org/licenses/>.

use std::hash::Hash;

use fxhash::{FxHashMap, FxHashSet};

#[derive(Debug)]
pub struct BigraphLookup<K, V> {
    key_to_value: FxHashMap<K, V>,
    value_to_keys: FxHashMap<V, FxHashSet<K>>,
}

impl<K, V> BigraphLookup<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    pub fn new() -> BigraphLookup<K, V> {
        BigraphLookup { key_to_value: FxHashMap::default(), value_to_keys: FxHashMap::default() }
    }

    /// Associates `key` with `value`. If `key` was already associated with a
    /// different value, that stale reverse-index entry is cleaned up first.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(old_value) = self.key_to_value.insert(key.clone(), value.clone()) {
            if old_value != value {
                if let Some(keys) = self.value_to_keys.get_mut(&old_value) {
                    keys.remove(&key);
                    if keys.is_empty() {
                        self.value_to_keys.remove(&old_value);
                    }
                }
            }
        }
        self.value_to_keys.entry(value).or_default().insert(key);
    }

    pub fn get_by_key(&self, key: &K) -> Option<&V> {
        self.key_to_value.get(key)
    }

    pub fn keys_for_value(&self, value: &V) -> Option<&FxHashSet<K>> {
        self.value_to_keys.get(value)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.key_to_value.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.value_to_keys.contains_key(value)
    }

    pub fn key_count(&self) -> usize {
        self.key_to_value.len()
    }

    pub fn value_count(&self) -> usize {
        self.value_to_keys.len()
    }

    /// Removes `key` and its reverse-index entry entirely.
    pub fn clear_key(&mut self, key: &K) {
        if let Some(value) = self.key_to_value.remove(key) {
            if let Some(keys) = self.value_to_keys.get_mut(&value) {
                keys.remove(key);
                if keys.is_empty() {
                    self.value_to_keys.remove(&value);
                }
            }
        }
    }

    /// Removes `value` and every key currently pointing at it.
    pub fn clear_value(&mut self, value: &V) {
        if let Some(keys) = self.value_to_keys.remove(value) {
            for key in keys {
                self.key_to_value.remove(&key);
            }
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.key_to_value.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.value_to_keys.keys()
    }
}

impl<K, V> Default for BigraphLookup<K, V>
where
    K: Eq + Hash + Clone,
    V: Eq + Hash + Clone,
{
    fn default() -> Self {
        BigraphLookup::new()
    }
}
