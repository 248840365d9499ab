// Writes one FASTA file of emitted path sequences per component (§6),
// with a run-wide 1-based sequence counter and an optional abundance
// annotation in the header.

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

use std::io::Write;
use std::path::Path;

use crate::error::Result;

pub struct PathRecord {
    pub sequence: Vec<u8>,
    pub score: Option<(String, f64)>,
}

/// Writes `records` to `path`, numbering headers starting at `start_n`.
/// Returns the next unused counter value, so callers can chain across
/// multiple components in one run.
pub fn write_fasta_paths(records: &[PathRecord], path: &Path, start_n: u64) -> Result<u64> {
    let mut out = String::new();
    let mut n = start_n;
    for record in records {
        let len = record.sequence.len();
        match &record.score {
            Some((method, score)) => {
                out.push_str(&format!(">{}({}bp) ({}: {:.4})\n", n, len, method, score));
            }
            None => {
                out.push_str(&format!(">{}({}bp)\n", n, len));
            }
        }
        out.push_str(&String::from_utf8_lossy(&record.sequence));
        out.push_str("\n\n");
        n += 1;
    }

    let mut file = std::fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    Ok(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_fasta_paths_format_without_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.fna");
        let records = vec![PathRecord { sequence: b"ACGT".to_vec(), score: None }];
        let next = write_fasta_paths(&records, &path, 1).unwrap();
        assert_eq!(next, 2);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, ">1(4bp)\nACGT\n\n");
    }

    #[test]
    fn test_write_fasta_paths_format_with_score() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.fna");
        let records = vec![PathRecord {
            sequence: b"ACGT".to_vec(),
            score: Some(("markov-chain".to_string(), -1.5)),
        }];
        write_fasta_paths(&records, &path, 1).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, ">1(4bp) (markov-chain: -1.5000)\nACGT\n\n");
    }
}
