// Command-line surface (§6), parsed with clap's derive API.

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

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PathMethod {
    Proportional,
    Markov,
    Random,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AbundanceMethod {
    MarkovChain,
    ForwardAlgorithm,
}

#[derive(Debug, Parser)]
#[command(name = "dbg-assembler", about = "A short-read genome assembler built on a compressed de Bruijn graph")]
pub struct Cli {
    /// Input reads (FASTA or FASTQ, optionally gzip-compressed).
    #[arg(short = 'i', long = "input-sequences")]
    pub input_sequences: PathBuf,

    /// K-mer size (must be odd).
    #[arg(short = 'k', long = "kmer-size", default_value_t = 31)]
    pub kmer_size: usize,

    /// Build a PreHash first and use it as a guide.
    #[arg(short = 'p', long = "pre-hash")]
    pub pre_hash: bool,

    /// Post-build edge-weight filter threshold (ignored when pre-hash is enabled).
    #[arg(short = 'a', long = "aggressive-edge-removal", default_value_t = 0)]
    pub aggressive_edge_removal: u64,

    /// Drop single-vertex components shorter than this many bases.
    #[arg(short = 'm', long = "minimum-bases", default_value_t = 0)]
    pub minimum_bases: usize,

    /// Emit one DOT file per component.
    #[arg(short = 'g', long = "print-graphs")]
    pub print_graphs: bool,

    #[arg(long = "graph-dir", default_value = "graphs")]
    pub graph_dir: PathBuf,

    /// Emit one FASTA path file per component.
    #[arg(short = 's', long = "sequences")]
    pub sequences: bool,

    #[arg(long = "sequence-dir", default_value = "sequences")]
    pub sequence_dir: PathBuf,

    #[arg(long = "path-method", value_enum, default_value_t = PathMethod::Proportional)]
    pub path_method: PathMethod,

    /// Proportional builder's epsilon.
    #[arg(short = 'e', long = "epsilon", default_value_t = 0.01)]
    pub epsilon: f64,

    /// Drop emitted paths shorter than this length.
    #[arg(short = 'l', long = "minimum-length", default_value_t = 0)]
    pub minimum_length: usize,

    #[arg(long = "abundance-method", value_enum)]
    pub abundance_method: Option<AbundanceMethod>,

    /// Raise log verbosity.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_minimal_required_args() {
        let cli = Cli::parse_from(["dbg-assembler", "-i", "reads.fasta"]);
        assert_eq!(cli.kmer_size, 31);
        assert_eq!(cli.path_method, PathMethod::Proportional);
        assert!(!cli.pre_hash);
    }

    #[test]
    fn test_parses_full_flag_set() {
        let cli = Cli::parse_from([
            "dbg-assembler", "-i", "reads.fastq.gz", "-k", "21", "-p",
            "-a", "2", "-m", "100", "-g", "-s", "--path-method", "markov",
            "-e", "0.05", "-l", "50", "--abundance-method", "forward-algorithm", "-v",
        ]);
        assert_eq!(cli.kmer_size, 21);
        assert!(cli.pre_hash);
        assert_eq!(cli.aggressive_edge_removal, 2);
        assert_eq!(cli.minimum_bases, 100);
        assert!(cli.print_graphs);
        assert!(cli.sequences);
        assert_eq!(cli.path_method, PathMethod::Markov);
        assert_eq!(cli.abundance_method, Some(AbundanceMethod::ForwardAlgorithm));
        assert!(cli.verbose);
    }
}
