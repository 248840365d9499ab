// Shared framework for both path-enumeration strategies: source discovery,
// walk emission, and the destructive post-walk weight consumption rule both
// builders share (§4.7).

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

pub mod markov;
pub mod proportional;

use crate::component_graph::{ComponentGraph, VertexId};
use crate::weighted_edge::WeightedEdge;

/// Vertices with in-degree 0, sorted by id for stable iteration.
pub fn sources(graph: &ComponentGraph) -> Vec<VertexId> {
    graph.vertex_ids().into_iter().filter(|&v| graph.in_degree(v) == 0).collect()
}

/// Out-edges of `v` that haven't been driven to zero by an earlier walk.
/// Both builders treat an exhausted edge as no longer present, matching how
/// many alternatives a walk actually has left to choose from.
pub fn live_out_edges(graph: &ComponentGraph, v: VertexId) -> Vec<(VertexId, WeightedEdge)> {
    graph.out_edges_sorted(v).into_iter().filter(|(_, e)| !e.removed()).collect()
}

/// Count of `v`'s in-neighbours whose edge into `v` hasn't been driven to
/// zero by an earlier walk.
pub fn live_in_degree(graph: &ComponentGraph, v: VertexId) -> usize {
    graph.in_neighbors_of(v).into_iter()
        .filter(|&u| graph.edge_weight(u, v).map(|w| w > 0).unwrap_or(false))
        .count()
}

/// Sum of `v`'s incoming edge weights, excluding edges driven to zero.
pub fn live_sum_in_weight(graph: &ComponentGraph, v: VertexId) -> u64 {
    graph.in_neighbors_of(v).into_iter()
        .filter_map(|u| graph.edge_weight(u, v))
        .filter(|&w| w > 0)
        .sum()
}

/// One completed walk: the ordered vertices visited and the edges followed
/// between them. `branched` records whether the builder ever had to make a
/// genuine branching decision while constructing this walk (as opposed to
/// following a single unambiguous out-edge the whole way); builders that
/// key their discard rule on "did we ever decide anything" read this field
/// after the walk completes.
pub struct Walk {
    pub vertices: Vec<VertexId>,
    pub edges: Vec<(VertexId, VertexId)>,
    pub branched: bool,
}

impl Walk {
    pub fn starting_at(v: VertexId) -> Walk {
        Walk { vertices: vec![v], edges: Vec::new(), branched: false }
    }

    pub fn push(&mut self, next: VertexId) {
        let last = *self.vertices.last().expect("walk has a starting vertex");
        self.edges.push((last, next));
        self.vertices.push(next);
    }

    pub fn contains(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }
}

/// Consumes capacity along a finished walk: finds the smallest followed
/// edge weight strictly greater than 1 and subtracts it from every edge on
/// the walk. Returns `true` if any followed edge was driven to exactly
/// zero — the criterion the Markov builder uses to decide whether a source
/// should be discarded (the proportional builder uses a different rule;
/// see `Walk::branched`).
pub fn consume_walk(graph: &mut ComponentGraph, walk: &Walk) -> bool {
    if walk.edges.is_empty() {
        return true;
    }
    let delta = walk.edges.iter()
        .filter_map(|&(u, v)| graph.edge_weight(u, v))
        .filter(|&w| w > 1)
        .min()
        .unwrap_or(1);
    let mut any_removed = false;
    for &(u, v) in &walk.edges {
        graph.decrease_edge(u, v, delta);
        if graph.edge_weight(u, v) == Some(0) {
            any_removed = true;
        }
    }
    any_removed
}

/// `nodes[0].full_sequence ++ nodes[1..].tail_sequence`.
pub fn emit(graph: &ComponentGraph, walk: &Walk) -> Vec<u8> {
    let mut seq = graph.node(walk.vertices[0]).full_sequence();
    for &v in &walk.vertices[1..] {
        seq.extend(graph.node(v).tail_sequence());
    }
    seq
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;

    fn linear_graph() -> ComponentGraph {
        let mut g = ComponentGraph::new(0, 3);
        let a = g.create_vertex_with_first_kmer(1, b"ACG".to_vec(), 0, 0, Strand::Forward);
        let b = g.create_vertex_with_first_kmer(2, b"CGT".to_vec(), 0, 1, Strand::Forward);
        g.add_edge(a, b);
        g
    }

    #[test]
    fn test_sources_finds_in_degree_zero_vertices() {
        let g = linear_graph();
        let srcs = sources(&g);
        assert_eq!(srcs.len(), 1);
    }

    #[test]
    fn test_consume_walk_removes_exhausted_edge() {
        let mut g = linear_graph();
        let srcs = sources(&g);
        let a = srcs[0];
        let b = g.out_edges_sorted(a)[0].0;
        let mut walk = Walk::starting_at(a);
        walk.push(b);
        let discard = consume_walk(&mut g, &walk);
        assert!(discard);
        assert_eq!(g.edge_weight(a, b), Some(0));
    }
}
