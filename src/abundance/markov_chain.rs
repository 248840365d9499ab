// Markov-chain log-probability scoring (§4.8.1): the initial term compares
// the first k-mer's observation count against the combined count of every
// source vertex's first k-mer; each subsequent vertex change contributes
// the log of the edge's share of its source vertex's total out-weight.

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

use crate::component_graph::ComponentGraph;
use crate::error::{AssemblerError, Result};
use crate::kmer::fingerprint_of;

/// Scores `path` against `graph`. `path` must be at least `k` bases long
/// and must stay within `graph`'s component, or `PathSpansMultipleComponents`
/// is returned.
pub fn score(graph: &ComponentGraph, path: &[u8], k: usize) -> Result<f64> {
    if path.len() < k {
        return Err(AssemblerError::InvalidParameter(
            format!("path length {} is shorter than k={}", path.len(), k)));
    }

    let fp0 = fingerprint_of(&path[0..k]);
    let v0 = graph.vertex_of(fp0).ok_or(AssemblerError::PathSpansMultipleComponents)?;
    let pos0 = graph.position_of(v0, fp0).expect("fingerprint resolves within its own vertex");
    let count0 = graph.node(v0).kmer_at(pos0).count() as f64;

    let total_source_count: usize = graph.vertex_ids().into_iter()
        .filter(|&v| graph.in_degree(v) == 0)
        .map(|v| graph.node(v).first_kmer().count())
        .sum();
    if total_source_count == 0 {
        return Err(AssemblerError::StateInvariantViolation(
            "no source vertices with observed first kmers".to_string()));
    }

    let mut log_prob = count0.ln() - (total_source_count as f64).ln();
    let mut prev_vertex = v0;

    let n_windows = path.len() + 1 - k;
    for j in 1..n_windows {
        let window = &path[j..j + k];
        let fp = fingerprint_of(window);
        let v = graph.vertex_of(fp).ok_or(AssemblerError::PathSpansMultipleComponents)?;
        if v != prev_vertex {
            let weight = graph.edge_weight(prev_vertex, v)
                .ok_or_else(|| AssemblerError::StateInvariantViolation(
                    "no edge found along markov-chain path".to_string()))?;
            let s_out = graph.sum_out_weight(prev_vertex);
            log_prob += (weight as f64).ln() - (s_out as f64).ln();
            prev_vertex = v;
        }
    }

    Ok(log_prob)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;

    #[test]
    fn test_rejects_short_path() {
        let g = ComponentGraph::new(0, 5);
        let err = score(&g, b"ACG", 5).unwrap_err();
        assert!(matches!(err, AssemblerError::InvalidParameter(_)));
    }

    #[test]
    fn test_scores_simple_two_vertex_path() {
        let mut g = ComponentGraph::new(0, 3);
        let a = g.create_vertex_with_first_kmer(fingerprint_of(b"ACG"), b"ACG".to_vec(), 0, 0, Strand::Forward);
        let b = g.create_vertex_with_first_kmer(fingerprint_of(b"CGT"), b"CGT".to_vec(), 0, 1, Strand::Forward);
        g.add_edge(a, b);
        let result = score(&g, b"ACGT", 3).unwrap();
        assert!(result.is_finite());
        assert!(result <= 0.0);
    }

    #[test]
    fn test_unknown_kmer_reports_path_spans_multiple_components() {
        let g = ComponentGraph::new(0, 3);
        let err = score(&g, b"ACGT", 3).unwrap_err();
        assert!(matches!(err, AssemblerError::PathSpansMultipleComponents));
    }
}
