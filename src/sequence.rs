// A single input read, normalized to upper case with its reverse complement
// computed eagerly so both strands can be pushed through the same insertion
// pipeline.

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

use crate::error::{AssemblerError, Result};
use crate::misc::reverse_complement;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    Forward,
    Reverse,
}

#[derive(Debug, Clone)]
pub struct Sequence {
    pub id: u32,
    pub name: String,
    pub comment: String,
    pub quality: Option<String>,
    pub forward_seq: Vec<u8>,
    pub reverse_seq: Vec<u8>,
    pub length: usize,
}

impl Sequence {
    pub fn new(id: u32, name: String, comment: String, seq: &[u8], quality: Option<String>) -> Result<Sequence> {
        let forward_seq: Vec<u8> = seq.iter().map(u8::to_ascii_uppercase).collect();
        let reverse_seq = reverse_complement(&forward_seq)
            .map_err(|b| AssemblerError::InvalidNucleotide(b as char))?;
        let length = forward_seq.len();
        Ok(Sequence { id, name, comment, quality, forward_seq, reverse_seq, length })
    }

    pub fn seq(&self, strand: Strand) -> &[u8] {
        match strand {
            Strand::Forward => &self.forward_seq,
            Strand::Reverse => &self.reverse_seq,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uppercases_and_revcomps() {
        let seq = Sequence::new(1, "r1".to_string(), String::new(), b"acct", None).unwrap();
        assert_eq!(seq.forward_seq, b"ACCT".to_vec());
        assert_eq!(seq.reverse_seq, b"AGGT".to_vec());
        assert_eq!(seq.length, 4);
    }

    #[test]
    fn test_new_rejects_invalid_nucleotide() {
        let err = Sequence::new(1, "r1".to_string(), String::new(), b"ACXT", None).unwrap_err();
        assert!(matches!(err, AssemblerError::InvalidNucleotide('X')));
    }
}
