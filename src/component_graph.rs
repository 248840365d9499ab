// One connected directed multigraph: vertices are SequenceNodes, edges carry
// WeightedEdges. Vertices and edges are arena-allocated and addressed by
// typed integer indices rather than reference-counted pointers, so a
// component merge or split is an index rewrite, not pointer chasing.

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

use crate::error::{AssemblerError, Result};
use crate::kmer::{Fingerprint, Kmer};
use crate::sequence::Strand;
use crate::sequence_node::SequenceNode;
use crate::weighted_edge::WeightedEdge;

pub type VertexId = usize;

pub struct ComponentGraph {
    id: usize,
    k_size: usize,
    next_vertex_id: VertexId,
    vertices: FxHashMap<VertexId, SequenceNode>,
    fingerprint_index: FxHashMap<Fingerprint, VertexId>,
    out_edges: FxHashMap<VertexId, FxHashMap<VertexId, WeightedEdge>>,
    in_neighbors: FxHashMap<VertexId, FxHashMap<VertexId, ()>>,
}

impl ComponentGraph {
    pub fn new(id: usize, k_size: usize) -> ComponentGraph {
        ComponentGraph {
            id,
            k_size,
            next_vertex_id: 0,
            vertices: FxHashMap::default(),
            fingerprint_index: FxHashMap::default(),
            out_edges: FxHashMap::default(),
            in_neighbors: FxHashMap::default(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn k_size(&self) -> usize {
        self.k_size
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn kmer_count(&self) -> usize {
        self.vertices.values().map(|n| n.len()).sum()
    }

    pub fn vertex_ids(&self) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.vertices.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn node(&self, v: VertexId) -> &SequenceNode {
        self.vertices.get(&v).expect("vertex exists")
    }

    pub fn node_mut(&mut self, v: VertexId) -> &mut SequenceNode {
        self.vertices.get_mut(&v).expect("vertex exists")
    }

    fn alloc_vertex_with_node(&mut self, node: SequenceNode) -> VertexId {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        self.out_edges.insert(id, FxHashMap::default());
        self.in_neighbors.insert(id, FxHashMap::default());
        self.vertices.insert(id, node);
        id
    }

    pub fn create_vertex_with_first_kmer(&mut self, fp: Fingerprint, full_window: Vec<u8>,
                                          read: u32, offset: usize, strand: Strand) -> VertexId {
        let kmer = Kmer::new_first(fp, full_window, read, offset, strand);
        let node = SequenceNode::with_first_kmer(kmer);
        let v = self.alloc_vertex_with_node(node);
        self.fingerprint_index.insert(fp, v);
        v
    }

    /// Absorbs a whole SequenceNode (e.g. cloned during a component merge),
    /// registering every fingerprint it carries.
    pub fn create_vertex_from(&mut self, node: SequenceNode) -> VertexId {
        let fps: Vec<Fingerprint> = node.kmers().iter().map(|k| k.fingerprint()).collect();
        let v = self.alloc_vertex_with_node(node);
        for fp in fps {
            self.fingerprint_index.insert(fp, v);
        }
        v
    }

    pub fn vertex_of(&self, fp: Fingerprint) -> Option<VertexId> {
        self.fingerprint_index.get(&fp).copied()
    }

    pub fn position_of(&self, v: VertexId, fp: Fingerprint) -> Option<usize> {
        self.vertices.get(&v).and_then(|n| n.find(fp))
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.in_neighbors.get(&v).map(|m| m.len()).unwrap_or(0)
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.out_edges.get(&v).map(|m| m.len()).unwrap_or(0)
    }

    pub fn edge_exists(&self, u: VertexId, v: VertexId) -> bool {
        self.out_edges.get(&u).map(|m| m.contains_key(&v)).unwrap_or(false)
    }

    pub fn edge_weight(&self, u: VertexId, v: VertexId) -> Option<u64> {
        self.out_edges.get(&u).and_then(|m| m.get(&v)).map(|e| e.weight())
    }

    /// Out-edges of `v`, sorted by target vertex id for deterministic
    /// iteration order (the path builders depend on this).
    pub fn out_edges_sorted(&self, v: VertexId) -> Vec<(VertexId, WeightedEdge)> {
        let mut edges: Vec<(VertexId, WeightedEdge)> = self.out_edges.get(&v)
            .map(|m| m.iter().map(|(&k, &e)| (k, e)).collect())
            .unwrap_or_default();
        edges.sort_unstable_by_key(|(id, _)| *id);
        edges
    }

    pub fn in_neighbors_of(&self, v: VertexId) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.in_neighbors.get(&v)
            .map(|m| m.keys().copied().collect()).unwrap_or_default();
        ids.sort_unstable();
        ids
    }

    pub fn sum_out_weight(&self, v: VertexId) -> u64 {
        self.out_edges.get(&v).map(|m| m.values().map(|e| e.weight()).sum()).unwrap_or(0)
    }

    pub fn sum_in_weight(&self, v: VertexId) -> u64 {
        self.in_neighbors.get(&v).map(|neighbors| {
            neighbors.keys().filter_map(|u| self.edge_weight(*u, v)).sum()
        }).unwrap_or(0)
    }

    /// Creates an edge `u -> v` with weight 1, or increments an existing
    /// one's weight by 1.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) {
        let edges = self.out_edges.entry(u).or_default();
        match edges.get_mut(&v) {
            Some(e) => e.increase(1),
            None => { edges.insert(v, WeightedEdge::new()); }
        }
        self.in_neighbors.entry(v).or_default().insert(u, ());
    }

    fn set_edge_weight(&mut self, u: VertexId, v: VertexId, weight: u64) {
        self.out_edges.entry(u).or_default().insert(v, WeightedEdge::with_weight(weight));
        self.in_neighbors.entry(v).or_default().insert(u, ());
    }

    fn remove_edge(&mut self, u: VertexId, v: VertexId) -> Option<WeightedEdge> {
        let removed = self.out_edges.get_mut(&u).and_then(|m| m.remove(&v));
        if removed.is_some() {
            if let Some(s) = self.in_neighbors.get_mut(&v) {
                s.remove(&u);
            }
        }
        removed
    }

    /// Drops every edge with `weight <= threshold`.
    pub fn remove_small_edges(&mut self, threshold: u64) {
        let mut to_remove = Vec::new();
        for (&u, neighbors) in self.out_edges.iter() {
            for (&v, edge) in neighbors.iter() {
                if edge.weight() <= threshold {
                    to_remove.push((u, v));
                }
            }
        }
        for (u, v) in to_remove {
            self.remove_edge(u, v);
        }
    }

    pub fn lock_edge_weights(&mut self) {
        for neighbors in self.out_edges.values_mut() {
            for edge in neighbors.values_mut() {
                edge.lock();
            }
        }
    }

    pub fn reset_edge_weights(&mut self) {
        for neighbors in self.out_edges.values_mut() {
            for edge in neighbors.values_mut() {
                edge.reset();
            }
        }
    }

    pub fn decrease_edge(&mut self, u: VertexId, v: VertexId, amount: u64) {
        if let Some(edge) = self.out_edges.get_mut(&u).and_then(|m| m.get_mut(&v)) {
            edge.decrease(amount);
        }
    }

    /// `split(v, p)`: partitions `v` at position `p` into `front` (kmers
    /// `[0, p)`) and `back` (kmers `[p, end)`), reusing an existing
    /// neighbour for either half when the reuse rule in §4.4.1 applies.
    /// Degenerate cases (`p == 0` or `p == len`) are a no-op.
    pub fn split(&mut self, v: VertexId, p: usize) -> (VertexId, VertexId) {
        let len = self.vertices.get(&v).expect("vertex exists").len();
        if p == 0 || p == len {
            return (v, v);
        }

        let in_neighbors_of_v = self.in_neighbors_of(v);
        let out_neighbors_of_v: Vec<VertexId> = self.out_edges.get(&v)
            .map(|m| m.keys().copied().collect()).unwrap_or_default();

        let front_reuse = if in_neighbors_of_v.len() == 1 {
            let n = in_neighbors_of_v[0];
            if self.out_degree(n) == 1 { Some(n) } else { None }
        } else {
            None
        };
        let back_reuse = if out_neighbors_of_v.len() == 1 {
            let n = out_neighbors_of_v[0];
            if self.in_degree(n) == 1 { Some(n) } else { None }
        } else {
            None
        };

        let mut v_node = self.vertices.remove(&v).expect("vertex exists");
        let back_part = v_node.split_off(p);
        let front_part = v_node;
        let split_weight = front_part.last_kmer()
            .transition_count(back_part.first_kmer().base()) as u64;

        let front = match front_reuse {
            Some(n) => {
                self.remove_edge(n, v);
                let node = self.vertices.remove(&n).expect("vertex exists");
                let mut node = node;
                node.append_node(front_part);
                for k in node.kmers() {
                    self.fingerprint_index.insert(k.fingerprint(), n);
                }
                self.vertices.insert(n, node);
                n
            }
            None => {
                let new_front = self.alloc_vertex_with_node(front_part);
                for fp in self.vertices[&new_front].kmers().iter().map(|k| k.fingerprint())
                    .collect::<Vec<_>>() {
                    self.fingerprint_index.insert(fp, new_front);
                }
                for n in &in_neighbors_of_v {
                    if let Some(w) = self.remove_edge(*n, v) {
                        self.set_edge_weight(*n, new_front, w.weight());
                    }
                }
                new_front
            }
        };

        let back = match back_reuse {
            Some(n) => {
                self.remove_edge(v, n);
                let mut node = self.vertices.remove(&n).expect("vertex exists");
                node.merge_from(back_part);
                for k in node.kmers() {
                    self.fingerprint_index.insert(k.fingerprint(), n);
                }
                self.vertices.insert(n, node);
                n
            }
            None => {
                let new_back = self.alloc_vertex_with_node(back_part);
                for fp in self.vertices[&new_back].kmers().iter().map(|k| k.fingerprint())
                    .collect::<Vec<_>>() {
                    self.fingerprint_index.insert(fp, new_back);
                }
                for n in &out_neighbors_of_v {
                    if let Some(w) = self.remove_edge(v, *n) {
                        self.set_edge_weight(new_back, *n, w.weight());
                    }
                }
                new_back
            }
        };

        // Any remaining bookkeeping for v (it was fully drained into front/back).
        self.out_edges.remove(&v);
        self.in_neighbors.remove(&v);

        if split_weight > 0 {
            self.add_edge_weighted(front, back, split_weight);
        }

        (front, back)
    }

    fn add_edge_weighted(&mut self, u: VertexId, v: VertexId, amount: u64) {
        let edges = self.out_edges.entry(u).or_default();
        match edges.get_mut(&v) {
            Some(e) => e.increase(amount),
            None => { edges.insert(v, WeightedEdge::with_weight(amount)); }
        }
        self.in_neighbors.entry(v).or_default().insert(u, ());
    }

    /// The combined split-and-link primitive invoked for every observed
    /// k-mer pair (§4.4.2).
    pub fn add_edge_between(&mut self, src: VertexId, dst: VertexId, src_pos: usize, dst_pos: usize) {
        let (src_front, _) = self.split(src, src_pos + 1);
        let (_, dst_back) = self.split(dst, dst_pos);

        let distinct = src_front != dst_back;
        let src_front_out = self.out_degree(src_front);
        let dst_back_in = self.in_degree(dst_back);
        let only_shared_edge = distinct
            && src_front_out == 1
            && dst_back_in == 1
            && self.edge_exists(src_front, dst_back);
        let no_neighbours = distinct && src_front_out == 0 && dst_back_in == 0;

        if no_neighbours || only_shared_edge {
            self.merge_vertex_into(src_front, dst_back);
        } else {
            self.add_edge(src_front, dst_back);
        }
    }

    /// Merges `src` wholesale into `dst`: prepends `src`'s kmers onto
    /// `dst`, re-targets every fingerprint, and re-homes `src`'s in-edges
    /// onto `dst`.
    fn merge_vertex_into(&mut self, src: VertexId, dst: VertexId) {
        self.remove_edge(src, dst);

        let in_neighbors = self.in_neighbors_of(src);
        for u in in_neighbors {
            if let Some(w) = self.remove_edge(u, src) {
                let edges = self.out_edges.entry(u).or_default();
                match edges.get_mut(&dst) {
                    Some(existing) => existing.increase(w.weight()),
                    None => { edges.insert(dst, w); }
                }
                self.in_neighbors.entry(dst).or_default().insert(u, ());
            }
        }

        let src_node = self.vertices.remove(&src).expect("vertex exists");
        let fps: Vec<Fingerprint> = src_node.kmers().iter().map(|k| k.fingerprint()).collect();
        let dst_node = self.vertices.get_mut(&dst).expect("vertex exists");
        dst_node.merge_from(src_node);
        for fp in fps {
            self.fingerprint_index.insert(fp, dst);
        }

        self.out_edges.remove(&src);
        self.in_neighbors.remove(&src);
    }

    fn clone_vertex_from(&mut self, other: &mut ComponentGraph, old_id: VertexId,
                          old_to_new: &mut FxHashMap<VertexId, VertexId>,
                          absorbed_fps: &mut Vec<Fingerprint>) -> VertexId {
        if let Some(&new_id) = old_to_new.get(&old_id) {
            return new_id;
        }
        let node = other.vertices.remove(&old_id).expect("vertex exists in source component");
        let fps: Vec<Fingerprint> = node.kmers().iter().map(|k| k.fingerprint()).collect();
        let new_id = self.alloc_vertex_with_node(node);
        for fp in &fps {
            self.fingerprint_index.insert(*fp, new_id);
        }
        absorbed_fps.extend(fps);
        old_to_new.insert(old_id, new_id);
        new_id
    }

    /// Absorbs `other`'s vertices and edges wholesale (§4.4.3). Returns the
    /// fingerprints absorbed, so the caller (Assembly) can re-point its own
    /// fingerprint -> component index at `self`.
    pub fn merge_from(&mut self, mut other: ComponentGraph) -> Result<Vec<Fingerprint>> {
        let mut old_to_new = FxHashMap::default();
        let mut absorbed_fps = Vec::new();

        let mut edges: Vec<(VertexId, VertexId, u64)> = Vec::new();
        for (&u, neighbors) in other.out_edges.iter() {
            for (&v, edge) in neighbors.iter() {
                edges.push((u, v, edge.weight()));
            }
        }

        if edges.is_empty() {
            if other.vertices.len() != 1 {
                return Err(AssemblerError::StateInvariantViolation(
                    "component merge with no edges must have exactly one vertex".to_string()));
            }
            let old_id = *other.vertices.keys().next().expect("exactly one vertex");
            self.clone_vertex_from(&mut other, old_id, &mut old_to_new, &mut absorbed_fps);
        } else {
            for (u, v, weight) in edges {
                let new_u = self.clone_vertex_from(&mut other, u, &mut old_to_new, &mut absorbed_fps);
                let new_v = self.clone_vertex_from(&mut other, v, &mut old_to_new, &mut absorbed_fps);
                self.set_edge_weight(new_u, new_v, weight);
            }
        }

        Ok(absorbed_fps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_single_kmer(g: &mut ComponentGraph, fp: u64, seq: &[u8]) -> VertexId {
        g.create_vertex_with_first_kmer(fp, seq.to_vec(), 0, 0, Strand::Forward)
    }

    #[test]
    fn test_add_edge_creates_and_increments() {
        let mut g = ComponentGraph::new(0, 3);
        let a = add_single_kmer(&mut g, 1, b"ACC");
        let b = add_single_kmer(&mut g, 2, b"CCT");
        g.add_edge(a, b);
        assert_eq!(g.edge_weight(a, b), Some(1));
        g.add_edge(a, b);
        assert_eq!(g.edge_weight(a, b), Some(2));
        assert_eq!(g.out_degree(a), 1);
        assert_eq!(g.in_degree(b), 1);
    }

    #[test]
    fn test_split_degenerate_cases_are_noop() {
        let mut g = ComponentGraph::new(0, 3);
        let v = add_single_kmer(&mut g, 1, b"ACC");
        let len = g.node(v).len();
        let (front, back) = g.split(v, 0);
        assert_eq!((front, back), (v, v));
        let (front, back) = g.split(v, len);
        assert_eq!((front, back), (v, v));
    }

    #[test]
    fn test_split_creates_fresh_vertices_when_no_reuse() {
        let mut g = ComponentGraph::new(0, 3);
        let v = add_single_kmer(&mut g, 1, b"ACC");
        g.node_mut_for_test(v).append(Kmer::new(2, b'T', 0, 0, Strand::Forward));
        let (front, back) = g.split(v, 1);
        assert_ne!(front, back);
        assert_eq!(g.node(front).len(), 1);
        assert_eq!(g.node(back).len(), 1);
    }

    impl ComponentGraph {
        fn node_mut_for_test(&mut self, v: VertexId) -> &mut SequenceNode {
            self.vertices.get_mut(&v).unwrap()
        }
    }

    #[test]
    fn test_remove_small_edges() {
        let mut g = ComponentGraph::new(0, 3);
        let a = add_single_kmer(&mut g, 1, b"ACC");
        let b = add_single_kmer(&mut g, 2, b"CCT");
        g.add_edge(a, b);
        g.add_edge(a, b);
        assert_eq!(g.edge_weight(a, b), Some(2));
        g.remove_small_edges(2);
        assert_eq!(g.edge_weight(a, b), None);
    }

    #[test]
    fn test_lock_and_reset() {
        let mut g = ComponentGraph::new(0, 3);
        let a = add_single_kmer(&mut g, 1, b"ACC");
        let b = add_single_kmer(&mut g, 2, b"CCT");
        g.add_edge(a, b);
        g.add_edge(a, b);
        g.lock_edge_weights();
        g.decrease_edge(a, b, 100);
        assert_eq!(g.edge_weight(a, b), Some(0));
        g.reset_edge_weights();
        assert_eq!(g.edge_weight(a, b), Some(2));
    }

    #[test]
    fn test_merge_from_single_vertex_no_edges() {
        let mut g1 = ComponentGraph::new(0, 3);
        add_single_kmer(&mut g1, 1, b"ACC");
        let mut g2 = ComponentGraph::new(1, 3);
        add_single_kmer(&mut g2, 2, b"CCT");
        let absorbed = g1.merge_from(g2).unwrap();
        assert_eq!(absorbed, vec![2]);
        assert_eq!(g1.vertex_count(), 2);
        assert_eq!(g1.vertex_of(2), Some(1));
    }

    #[test]
    fn test_merge_from_rejects_multi_vertex_no_edges() {
        let mut g1 = ComponentGraph::new(0, 3);
        add_single_kmer(&mut g1, 1, b"ACC");
        let mut g2 = ComponentGraph::new(1, 3);
        add_single_kmer(&mut g2, 2, b"CCT");
        add_single_kmer(&mut g2, 3, b"CTA");
        let err = g1.merge_from(g2).unwrap_err();
        assert!(matches!(err, AssemblerError::StateInvariantViolation(_)));
    }
}
