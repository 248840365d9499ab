// Writes one Graphviz DOT file per component (§6): a vertex line per
// vertex carrying its kmer count and average coverage, an edge line per
// edge carrying its weight.

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

use crate::component_graph::ComponentGraph;
use crate::error::Result;

pub fn write_dot(graph: &ComponentGraph, path: &Path) -> Result<()> {
    let mut out = String::new();
    out.push_str("digraph G { rankdir=LR;\n");

    for v in graph.vertex_ids() {
        let node = graph.node(v);
        let n = node.len();
        let total_count: usize = node.kmers().iter().map(|k| k.count()).sum();
        let avg_coverage = if n > 0 { total_count as f64 / n as f64 } else { 0.0 };
        out.push_str(&format!(
            "{} [label=\"{}: kmers({}), avg coverage({:.2})\"];\n",
            v, v, n, avg_coverage));
    }

    for u in graph.vertex_ids() {
        for (v, edge) in graph.out_edges_sorted(u) {
            out.push_str(&format!("{}->{} [label=\"{}\"];\n", u, v, edge.weight()));
        }
    }

    out.push_str("}\n");

    let mut file = std::fs::File::create(path)?;
    file.write_all(out.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::Strand;

    #[test]
    fn test_write_dot_matches_expected_format() {
        let mut g = ComponentGraph::new(0, 3);
        let a = g.create_vertex_with_first_kmer(1, b"ACG".to_vec(), 0, 0, Strand::Forward);
        let b = g.create_vertex_with_first_kmer(2, b"CGT".to_vec(), 0, 1, Strand::Forward);
        g.add_edge(a, b);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("0.dot");
        write_dot(&g, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("digraph G { rankdir=LR;\n"));
        assert!(contents.contains("kmers(1), avg coverage(1.00)"));
        assert!(contents.contains("0->1 [label=\"1\"];"));
        assert!(contents.trim_end().ends_with('}'));
    }
}
