// Forward-algorithm scoring (§4.8.2): a standard forward DP over k-mer
// positions. Positions interior to a vertex pass probability mass through
// unchanged; positions at the head of a vertex multiply by the edge's
// share of the predecessor's total out-weight. The initial state (the
// path's first k-mer) seeds the recursion with probability 1.

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

pub fn score(graph: &ComponentGraph, path: &[u8], k: usize) -> Result<f64> {
    if path.len() < k {
        return Err(AssemblerError::InvalidParameter(
            format!("path length {} is shorter than k={}", path.len(), k)));
    }

    let fp0 = fingerprint_of(&path[0..k]);
    let v0 = graph.vertex_of(fp0).ok_or(AssemblerError::PathSpansMultipleComponents)?;

    let mut alpha = 1.0_f64;
    let mut prev_vertex = v0;

    let n_windows = path.len() + 1 - k;
    for j in 1..n_windows {
        let window = &path[j..j + k];
        let fp = fingerprint_of(window);
        let v = graph.vertex_of(fp).ok_or(AssemblerError::PathSpansMultipleComponents)?;
        let pos = graph.position_of(v, fp)
            .ok_or_else(|| AssemblerError::StateInvariantViolation(
                "fingerprint missing from its own vertex".to_string()))?;

        if pos == 0 {
            let weight = graph.edge_weight(prev_vertex, v)
                .ok_or_else(|| AssemblerError::StateInvariantViolation(
                    "no edge found along forward-algorithm path".to_string()))?;
            let s_out = graph.sum_out_weight(prev_vertex);
            alpha *= weight as f64 / s_out as f64;
        }
        prev_vertex = v;
    }

    Ok(alpha)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;

    #[test]
    fn test_single_vertex_path_has_probability_one() {
        let mut g = ComponentGraph::new(0, 3);
        g.create_vertex_with_first_kmer(fingerprint_of(b"ACG"), b"ACG".to_vec(), 0, 0, Strand::Forward);
        let result = score(&g, b"ACG", 3).unwrap();
        assert_eq!(result, 1.0);
    }

    #[test]
    fn test_self_loop_applies_its_weight_fraction_when_its_head_is_reached_again() {
        let mut g = ComponentGraph::new(0, 1);
        let a = g.create_vertex_with_first_kmer(fingerprint_of(b"A"), b"A".to_vec(), 0, 0, Strand::Forward);
        let b = g.create_vertex_with_first_kmer(fingerprint_of(b"G"), b"G".to_vec(), 0, 0, Strand::Forward);
        g.add_edge(a, a);
        g.add_edge(a, a);
        g.add_edge(a, a);
        g.add_edge(a, b);

        // "AAG": the middle window lands back on vertex a's own head by way
        // of the self-loop. That step must still multiply in the self-loop's
        // share of a's total out-weight (3/4) even though the vertex didn't
        // change; only then does the final window's a->b share (1/4) apply.
        let result = score(&g, b"AAG", 1).unwrap();
        assert!((result - 0.75 * 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_two_vertex_path_multiplies_branch_fraction() {
        let mut g = ComponentGraph::new(0, 3);
        let a = g.create_vertex_with_first_kmer(fingerprint_of(b"ACG"), b"ACG".to_vec(), 0, 0, Strand::Forward);
        let b = g.create_vertex_with_first_kmer(fingerprint_of(b"CGT"), b"CGT".to_vec(), 0, 1, Strand::Forward);
        let c = g.create_vertex_with_first_kmer(fingerprint_of(b"CGA"), b"CGA".to_vec(), 0, 1, Strand::Forward);
        g.add_edge(a, b);
        g.add_edge(a, b);
        g.add_edge(a, b);
        g.add_edge(a, c);

        let result = score(&g, b"ACGT", 3).unwrap();
        assert!((result - 0.75).abs() < 1e-9);
    }
}
