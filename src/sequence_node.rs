// An ordered run of kmers forming one maximal unambiguous chain, plus a
// fingerprint -> position index so any kmer in the node can be located in
// O(1). Invariant: for i > 0, kmers[i]'s window is kmers[i-1]'s window
// shifted left by one base and extended with kmers[i]'s trailing base.

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

use fxhash::FxHashMap;

use crate::kmer::{Fingerprint, Kmer};

#[derive(Debug, Default)]
pub struct SequenceNode {
    kmers: Vec<Kmer>,
    index: FxHashMap<Fingerprint, usize>,
}

impl SequenceNode {
    pub fn new() -> SequenceNode {
        SequenceNode { kmers: Vec::new(), index: FxHashMap::default() }
    }

    pub fn with_first_kmer(kmer: Kmer) -> SequenceNode {
        let mut node = SequenceNode::new();
        node.append(kmer);
        node
    }

    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    pub fn kmers(&self) -> &[Kmer] {
        &self.kmers
    }

    pub fn kmer_at(&self, i: usize) -> &Kmer {
        &self.kmers[i]
    }

    pub fn kmer_at_mut(&mut self, i: usize) -> &mut Kmer {
        &mut self.kmers[i]
    }

    pub fn first_kmer(&self) -> &Kmer {
        &self.kmers[0]
    }

    pub fn last_kmer(&self) -> &Kmer {
        &self.kmers[self.kmers.len() - 1]
    }

    /// O(1) lookup of a kmer's position in this node by fingerprint.
    pub fn find(&self, fp: Fingerprint) -> Option<usize> {
        self.index.get(&fp).copied()
    }

    pub fn append(&mut self, kmer: Kmer) {
        let pos = self.kmers.len();
        self.index.insert(kmer.fingerprint(), pos);
        self.kmers.push(kmer);
    }

    pub fn prepend(&mut self, kmer: Kmer) {
        self.kmers.insert(0, kmer);
        self.reindex();
    }

    /// Inserts a kmer at position `i`, re-indexing every position from `i`
    /// onward (including the newly inserted kmer).
    pub fn insert_at(&mut self, kmer: Kmer, i: usize) {
        self.kmers.insert(i, kmer);
        self.reindex_from(i);
    }

    /// Prepends `other`'s kmers (preserving their relative order), then
    /// re-indexes the whole node.
    pub fn merge_from(&mut self, other: SequenceNode) {
        let mut merged = other.kmers;
        merged.append(&mut self.kmers);
        self.kmers = merged;
        self.reindex();
    }

    /// Appends `other`'s kmers (preserving their relative order) after this
    /// node's existing kmers, then re-indexes the newly added range.
    pub fn append_node(&mut self, other: SequenceNode) {
        let start = self.kmers.len();
        self.kmers.extend(other.kmers);
        self.reindex_from(start);
    }

    fn reindex(&mut self) {
        self.reindex_from(0);
    }

    fn reindex_from(&mut self, start: usize) {
        for i in start..self.kmers.len() {
            self.index.insert(self.kmers[i].fingerprint(), i);
        }
    }

    /// `first_kmer.full_window ++ base(kmers[1..])`.
    pub fn full_sequence(&self) -> Vec<u8> {
        let mut seq = self.first_kmer().full_window()
            .expect("node's first kmer must carry its full window")
            .to_vec();
        for k in &self.kmers[1..] {
            seq.push(k.base());
        }
        seq
    }

    /// `base(kmers[0..])` — used when appending this node's contribution
    /// after a predecessor node's full or tail sequence.
    pub fn tail_sequence(&self) -> Vec<u8> {
        self.kmers.iter().map(|k| k.base()).collect()
    }

    /// Splits off kmers `[at, end)` into a new node, leaving `[0, at)` in
    /// `self`. Both halves keep their original kmers (positions are
    /// re-indexed within each half).
    pub fn split_off(&mut self, at: usize) -> SequenceNode {
        let tail_kmers = self.kmers.split_off(at);
        self.reindex();
        let mut back = SequenceNode::new();
        back.kmers = tail_kmers;
        back.reindex();
        back
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;

    fn kmer(fp: u64, base: u8) -> Kmer {
        Kmer::new(fp, base, 0, 0, Strand::Forward)
    }

    #[test]
    fn test_append_and_find() {
        let mut node = SequenceNode::new();
        node.append(Kmer::new_first(1, b"ACG".to_vec(), 0, 0, Strand::Forward));
        node.append(kmer(2, b'T'));
        assert_eq!(node.len(), 2);
        assert_eq!(node.find(1), Some(0));
        assert_eq!(node.find(2), Some(1));
        assert_eq!(node.find(99), None);
    }

    #[test]
    fn test_full_and_tail_sequence() {
        let mut node = SequenceNode::new();
        node.append(Kmer::new_first(1, b"ACG".to_vec(), 0, 0, Strand::Forward));
        node.append(kmer(2, b'T'));
        node.append(kmer(3, b'A'));
        assert_eq!(node.full_sequence(), b"ACGTA".to_vec());
        assert_eq!(node.tail_sequence(), b"GTA".to_vec());
        // invariant 2: full sequence length == k + |kmers| - 1 for k=3
        assert_eq!(node.full_sequence().len(), 3 + node.len() - 1);
    }

    #[test]
    fn test_prepend_reindexes() {
        let mut node = SequenceNode::new();
        node.append(kmer(2, b'T'));
        node.append(kmer(3, b'A'));
        node.prepend(Kmer::new_first(1, b"ACG".to_vec(), 0, 0, Strand::Forward));
        assert_eq!(node.find(1), Some(0));
        assert_eq!(node.find(2), Some(1));
        assert_eq!(node.find(3), Some(2));
    }

    #[test]
    fn test_merge_from_prepends_other() {
        let mut front = SequenceNode::new();
        front.append(Kmer::new_first(1, b"ACG".to_vec(), 0, 0, Strand::Forward));
        front.append(kmer(2, b'T'));
        let mut back = SequenceNode::new();
        back.append(kmer(3, b'A'));
        back.append(kmer(4, b'C'));
        back.merge_from(front);
        assert_eq!(back.len(), 4);
        assert_eq!(back.find(1), Some(0));
        assert_eq!(back.find(4), Some(3));
    }

    #[test]
    fn test_append_node() {
        let mut front = SequenceNode::new();
        front.append(Kmer::new_first(1, b"ACG".to_vec(), 0, 0, Strand::Forward));
        front.append(kmer(2, b'T'));
        let mut back = SequenceNode::new();
        back.append(kmer(3, b'A'));
        back.append(kmer(4, b'C'));
        front.append_node(back);
        assert_eq!(front.len(), 4);
        assert_eq!(front.find(1), Some(0));
        assert_eq!(front.find(4), Some(3));
    }

    #[test]
    fn test_split_off() {
        let mut node = SequenceNode::new();
        node.append(Kmer::new_first(1, b"ACG".to_vec(), 0, 0, Strand::Forward));
        node.append(kmer(2, b'T'));
        node.append(kmer(3, b'A'));
        let back = node.split_off(1);
        assert_eq!(node.len(), 1);
        assert_eq!(back.len(), 2);
        assert_eq!(back.find(2), Some(0));
        assert_eq!(back.find(3), Some(1));
    }
}
