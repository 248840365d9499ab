// Markov path builder (§4.7.2): at each branch, draws a uniform random
// number from a seeded Mersenne Twister and picks the out-edge whose
// cumulative probability (summed ascending) first exceeds the draw. No
// cycle guard: the random draw is allowed to revisit a vertex.

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

use rand::Rng;
use rand_mt::Mt19937GenRand32;

use crate::component_graph::{ComponentGraph, VertexId};
use crate::path_builder::{consume_walk, emit, live_out_edges, sources, Walk};

const SEED: u32 = 42;

pub struct MarkovBuilder {
    rng: Mt19937GenRand32,
}

impl MarkovBuilder {
    pub fn new() -> MarkovBuilder {
        MarkovBuilder { rng: Mt19937GenRand32::new(SEED) }
    }

    pub fn build_paths(&mut self, graph: &mut ComponentGraph, min_length: usize) -> Vec<Vec<u8>> {
        let mut results = Vec::new();
        let mut active = sources(graph);
        let k = graph.k_size();
        let mut i = 0;
        while i < active.len() {
            let src = active[i];
            let walk = self.walk_from(graph, src);
            let discard = consume_walk(graph, &walk);
            let seq = emit(graph, &walk);
            if seq.len() > k && seq.len() >= min_length {
                results.push(seq);
            }
            if discard {
                active.remove(i);
            } else {
                i += 1;
            }
        }
        results
    }

    fn walk_from(&mut self, graph: &ComponentGraph, start: VertexId) -> Walk {
        let mut walk = Walk::starting_at(start);
        let mut current = start;

        loop {
            let mut out_edges = live_out_edges(graph, current);
            if out_edges.is_empty() {
                break;
            }

            let next = if out_edges.len() == 1 {
                out_edges[0].0
            } else {
                let s_out: f64 = out_edges.iter().map(|(_, e)| e.weight() as f64).sum();
                out_edges.sort_by(|(_, a), (_, b)| a.weight().cmp(&b.weight()));
                let draw: f64 = self.rng.gen();
                let mut cumulative = 0.0;
                let mut chosen = None;
                for &(v, e) in &out_edges {
                    cumulative += e.weight() as f64 / s_out;
                    if cumulative > draw {
                        chosen = Some(v);
                        break;
                    }
                }
                chosen.unwrap_or_else(|| out_edges.last().expect("at least one out-edge").0)
            };

            walk.push(next);
            current = next;
        }
        walk
    }
}

impl Default for MarkovBuilder {
    fn default() -> Self {
        MarkovBuilder::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;

    #[test]
    fn test_single_chain_emits_full_sequence() {
        let mut g = ComponentGraph::new(0, 3);
        let a = g.create_vertex_with_first_kmer(1, b"ACG".to_vec(), 0, 0, Strand::Forward);
        let b = g.create_vertex_with_first_kmer(2, b"CGT".to_vec(), 0, 1, Strand::Forward);
        g.add_edge(a, b);
        g.lock_edge_weights();

        let mut builder = MarkovBuilder::new();
        let paths = builder.build_paths(&mut g, 1);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[0], b"ACGT".to_vec());
    }

    #[test]
    fn test_is_deterministic_given_fixed_seed() {
        let build = || {
            let mut g = ComponentGraph::new(0, 3);
            let a = g.create_vertex_with_first_kmer(1, b"ACG".to_vec(), 0, 0, Strand::Forward);
            let b = g.create_vertex_with_first_kmer(2, b"CGT".to_vec(), 0, 1, Strand::Forward);
            let c = g.create_vertex_with_first_kmer(3, b"CGA".to_vec(), 0, 1, Strand::Forward);
            g.add_edge(a, b);
            g.add_edge(a, c);
            g.add_edge(a, b);
            g.lock_edge_weights();
            let mut builder = MarkovBuilder::new();
            builder.build_paths(&mut g, 1)
        };
        assert_eq!(build(), build());
    }
}
