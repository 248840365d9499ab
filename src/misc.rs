// Small utility helpers shared across the CLI: directory checks, duration and
// float formatting, a progress spinner, and the IUPAC reverse-complement.

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

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

pub fn quit_with_error(message: &str) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

pub fn check_if_dir_exists(dir: &Path) {
    if !dir.is_dir() {
        quit_with_error(&format!("{} is not a directory", dir.display()));
    }
}

pub fn check_if_dir_is_not_dir(dir: &Path) {
    if dir.exists() && !dir.is_dir() {
        quit_with_error(&format!("{} already exists and is not a directory", dir.display()));
    }
}

pub fn create_dir(dir: &Path) {
    if let Err(e) = std::fs::create_dir_all(dir) {
        quit_with_error(&format!("could not create directory {}: {}", dir.display(), e));
    }
}

pub fn format_duration(duration: Duration) -> String {
    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub fn format_float(value: f64) -> String {
    format!("{:.4}", value)
}

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner:.green} {msg}").unwrap());
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Maps one IUPAC nucleotide byte to its complement. Accepts upper or lower
/// case; returns `None` for any byte outside the 15-symbol alphabet.
pub fn complement_base(base: u8) -> Option<u8> {
    let upper = base.to_ascii_uppercase();
    let complement = match upper {
        b'A' => b'T',
        b'T' | b'U' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'R' => b'Y',
        b'Y' => b'R',
        b'S' => b'S',
        b'W' => b'W',
        b'K' => b'M',
        b'M' => b'K',
        b'B' => b'V',
        b'V' => b'B',
        b'D' => b'H',
        b'H' => b'D',
        b'N' => b'N',
        _ => return None,
    };
    Some(complement)
}

pub fn is_valid_nucleotide(base: u8) -> bool {
    complement_base(base).is_some()
}

/// Reverse-complements a nucleotide sequence per the IUPAC table in the
/// specification. Returns `Err` with the offending byte on the first
/// non-IUPAC character encountered.
pub fn reverse_complement(seq: &[u8]) -> Result<Vec<u8>, u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &base in seq.iter().rev() {
        match complement_base(base) {
            Some(c) => out.push(c),
            None => return Err(base),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complement_base() {
        assert_eq!(complement_base(b'A'), Some(b'T'));
        assert_eq!(complement_base(b'c'), Some(b'G'));
        assert_eq!(complement_base(b'N'), Some(b'N'));
        assert_eq!(complement_base(b'Z'), None);
    }

    #[test]
    fn test_reverse_complement_s9() {
        // S9 — IUPAC reverse complement.
        let forward = b"ACGTRYSWKMBDHVN";
        let reverse = reverse_complement(forward).unwrap();
        assert_eq!(reverse, b"NBDHVKMWSRYACGT".to_vec());
    }

    #[test]
    fn test_reverse_complement_invalid() {
        assert_eq!(reverse_complement(b"ACGZ"), Err(b'Z'));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(5)), "5s");
        assert_eq!(format_duration(Duration::from_secs(65)), "1m 5s");
        assert_eq!(format_duration(Duration::from_secs(3665)), "1h 1m 5s");
    }
}
