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

pub mod abundance;
pub mod assembly;
pub mod bigraph_lookup;
pub mod cli;
pub mod component_graph;
pub mod error;
pub mod io;
pub mod kmer;
pub mod log;
pub mod metrics;
pub mod misc;
pub mod path_builder;
pub mod prehash;
pub mod sequence;
pub mod sequence_node;
pub mod weighted_edge;
