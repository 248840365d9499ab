// Error types for the assembler. One exhaustive enum covers every failure mode
// named by the design: per-read and per-path errors are recoverable by the
// caller, structural invariant violations are not.

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

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblerError {
    #[error("read is shorter than k-mer size ({len} < {k})")]
    ReadTooShort { len: usize, k: usize },

    #[error("invalid nucleotide byte '{0}' encountered")]
    InvalidNucleotide(char),

    #[error("k-mer size must be odd, got {0}")]
    InvalidKmerLength(usize),

    #[error("missing required input: {0}")]
    MissingInput(String),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("path spans multiple components")]
    PathSpansMultipleComponents,

    #[error("internal state invariant violated: {0}")]
    StateInvariantViolation(String),

    #[error("not implemented: {0}")]
    NotImplemented(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AssemblerError>;
