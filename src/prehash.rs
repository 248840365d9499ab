// A first pass over the read set that indexes which reads touch each k-mer
// fingerprint, before any graph is built. When enabled, the assembler uses
// this index to skip creating edges for k-mers that will be removed as
// noise anyway, which keeps memory down on large read sets.

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

use fxhash::{FxHashMap, FxHashSet};

use crate::kmer::{fingerprint_of, Fingerprint};
use crate::sequence::Strand;

/// A two-sided `fingerprint <-> read-id` index: for every k-mer window seen
/// while scanning the read set, records which (read, strand) pairs touched
/// it, and the inverse.
pub struct PreHash {
    min_count: u32,
    fp_to_reads: FxHashMap<Fingerprint, FxHashSet<(u32, Strand)>>,
    read_to_fps: FxHashMap<(u32, Strand), FxHashSet<Fingerprint>>,
}

impl PreHash {
    pub fn new(min_count: u32) -> PreHash {
        PreHash {
            min_count,
            fp_to_reads: FxHashMap::default(),
            read_to_fps: FxHashMap::default(),
        }
    }

    /// Records one observation of `fp` at `_position` within `read_id`'s
    /// `strand`. The position is accepted for call-site symmetry with the
    /// per-read traversal but is not otherwise used.
    pub fn observe(&mut self, fp: Fingerprint, read_id: u32, strand: Strand, _position: usize) {
        self.fp_to_reads.entry(fp).or_default().insert((read_id, strand));
        self.read_to_fps.entry((read_id, strand)).or_default().insert(fp);
    }

    /// Number of distinct (read, strand) pairs in which `fp` was observed.
    pub fn hash_count(&self, fp: Fingerprint) -> usize {
        self.fp_to_reads.get(&fp).map(|reads| reads.len()).unwrap_or(0)
    }

    /// Number of distinct reads containing the k-mer window `w`.
    pub fn kmer_count(&self, w: &[u8]) -> usize {
        self.hash_count(fingerprint_of(w))
    }

    /// Every (read, strand) pair that touched `fp`.
    pub fn reads_containing(&self, fp: Fingerprint) -> Vec<(u32, Strand)> {
        self.fp_to_reads.get(&fp).map(|reads| reads.iter().copied().collect()).unwrap_or_default()
    }

    /// Every fingerprint observed in `read_id`'s `strand`.
    pub fn hashes_of(&self, read_id: u32, strand: Strand) -> Vec<Fingerprint> {
        self.read_to_fps.get(&(read_id, strand)).map(|fps| fps.iter().copied().collect()).unwrap_or_default()
    }

    /// A fingerprint is "trusted" once it has been seen in at least
    /// `min_count` reads; untrusted fingerprints may be skipped when the
    /// caller wants pre-hash-guided edge suppression.
    pub fn is_trusted(&self, fp: Fingerprint) -> bool {
        self.hash_count(fp) as u32 >= self.min_count
    }

    pub fn fingerprint_count(&self) -> usize {
        self.fp_to_reads.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observe_and_count() {
        let mut ph = PreHash::new(2);
        ph.observe(1, 0, Strand::Forward, 0);
        assert_eq!(ph.hash_count(1), 1);
        assert!(!ph.is_trusted(1));
        ph.observe(1, 1, Strand::Forward, 5);
        assert_eq!(ph.hash_count(1), 2);
        assert!(ph.is_trusted(1));
    }

    #[test]
    fn test_reobserving_same_read_does_not_double_count() {
        let mut ph = PreHash::new(1);
        ph.observe(1, 0, Strand::Forward, 0);
        ph.observe(1, 0, Strand::Forward, 5);
        assert_eq!(ph.hash_count(1), 1);
    }

    #[test]
    fn test_reads_containing_and_hashes_of_are_inverse() {
        let mut ph = PreHash::new(1);
        ph.observe(7, 3, Strand::Reverse, 2);
        assert_eq!(ph.reads_containing(7), vec![(3, Strand::Reverse)]);
        assert_eq!(ph.hashes_of(3, Strand::Reverse), vec![7]);
        assert!(ph.hashes_of(3, Strand::Forward).is_empty());
    }

    #[test]
    fn test_unobserved_fingerprint_is_untrusted() {
        let ph = PreHash::new(1);
        assert_eq!(ph.hash_count(99), 0);
        assert!(!ph.is_trusted(99));
    }
}
