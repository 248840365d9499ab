// A fixed-length nucleotide window. Most kmers store only their trailing
// base (the window itself is reconstructed from the owning SequenceNode);
// the leading kmer of a node additionally carries the full k-length prefix
// so the node's start can be reconstructed without walking back further.

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

use crate::sequence::Strand;

pub type Fingerprint = u64;

/// Hashes a raw nucleotide window down to its 64-bit fingerprint.
pub fn fingerprint_of(window: &[u8]) -> Fingerprint {
    fxhash::hash64(window)
}

#[derive(Debug, Clone)]
pub struct Kmer {
    fingerprint: Fingerprint,
    base: u8,
    full_window: Option<Vec<u8>>,
    observations: FxHashMap<u32, (usize, Strand)>,
    transitions: FxHashMap<u8, u32>,
}

impl Kmer {
    pub fn new(fingerprint: Fingerprint, base: u8, read: u32, offset: usize, strand: Strand) -> Kmer {
        let mut observations = FxHashMap::default();
        observations.insert(read, (offset, strand));
        Kmer { fingerprint, base, full_window: None, observations, transitions: FxHashMap::default() }
    }

    pub fn new_first(fingerprint: Fingerprint, full_window: Vec<u8>, read: u32, offset: usize,
                      strand: Strand) -> Kmer {
        let base = *full_window.last().expect("full_window is non-empty");
        let mut observations = FxHashMap::default();
        observations.insert(read, (offset, strand));
        Kmer { fingerprint, base, full_window: Some(full_window), observations,
               transitions: FxHashMap::default() }
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }

    /// The trailing nucleotide of this kmer's window.
    pub fn base(&self) -> u8 {
        match &self.full_window {
            Some(w) => *w.last().expect("full_window is non-empty"),
            None => self.base,
        }
    }

    pub fn full_window(&self) -> Option<&[u8]> {
        self.full_window.as_deref()
    }

    pub fn is_first_kmer(&self) -> bool {
        self.full_window.is_some()
    }

    pub fn add_observation(&mut self, read: u32, offset: usize, strand: Strand) {
        // Later observations for the same read-id overwrite earlier ones.
        self.observations.insert(read, (offset, strand));
    }

    pub fn count(&self) -> usize {
        self.observations.len()
    }

    pub fn add_transition(&mut self, next_base: u8) {
        *self.transitions.entry(next_base).or_insert(0) += 1;
    }

    pub fn transition_count(&self, base: u8) -> u32 {
        *self.transitions.get(&base).unwrap_or(&0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_of_is_deterministic() {
        assert_eq!(fingerprint_of(b"ACGTA"), fingerprint_of(b"ACGTA"));
        assert_ne!(fingerprint_of(b"ACGTA"), fingerprint_of(b"ACGTC"));
    }

    #[test]
    fn test_new_and_base() {
        let k = Kmer::new(42, b'T', 1, 0, Strand::Forward);
        assert_eq!(k.base(), b'T');
        assert!(!k.is_first_kmer());
        assert_eq!(k.count(), 1);
    }

    #[test]
    fn test_first_kmer_base_is_last_byte_of_window() {
        let k = Kmer::new_first(42, b"ACGTA".to_vec(), 1, 0, Strand::Forward);
        assert_eq!(k.base(), b'A');
        assert_eq!(k.full_window(), Some(b"ACGTA".as_slice()));
        assert!(k.is_first_kmer());
    }

    #[test]
    fn test_observation_overwrite() {
        let mut k = Kmer::new(1, b'A', 7, 3, Strand::Forward);
        assert_eq!(k.count(), 1);
        k.add_observation(7, 99, Strand::Reverse);
        assert_eq!(k.count(), 1);
        k.add_observation(8, 0, Strand::Forward);
        assert_eq!(k.count(), 2);
    }

    #[test]
    fn test_transitions() {
        let mut k = Kmer::new(1, b'A', 0, 0, Strand::Forward);
        assert_eq!(k.transition_count(b'C'), 0);
        k.add_transition(b'C');
        k.add_transition(b'C');
        k.add_transition(b'G');
        assert_eq!(k.transition_count(b'C'), 2);
        assert_eq!(k.transition_count(b'G'), 1);
        assert_eq!(k.transition_count(b'T'), 0);
    }
}
