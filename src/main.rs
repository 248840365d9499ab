// Orchestration: parse CLI, validate settings, optionally run a PreHash
// pass, build the Assembly, apply post-build filters, then optionally emit
// DOT graphs, FASTA paths, and run metrics.

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

use std::time::Instant;

use clap::Parser;
use log::{error, info};

use dbg_assembler::abundance::{forward_algorithm, markov_chain};
use dbg_assembler::assembly::Assembly;
use dbg_assembler::cli::{AbundanceMethod, Cli, PathMethod};
use dbg_assembler::error::AssemblerError;
use dbg_assembler::io::dot::write_dot;
use dbg_assembler::io::fasta_out::{write_fasta_paths, PathRecord};
use dbg_assembler::io::reads::load_reads;
use dbg_assembler::log::{explanation, init_logging, section_header};
use dbg_assembler::metrics::RunMetrics;
use dbg_assembler::misc::{create_dir, quit_with_error};
use dbg_assembler::path_builder::markov::MarkovBuilder;
use dbg_assembler::path_builder::proportional::ProportionalBuilder;
use dbg_assembler::prehash::PreHash;
use dbg_assembler::sequence::Strand;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        quit_with_error(&e.to_string());
    }
}

fn run(cli: &Cli) -> dbg_assembler::error::Result<()> {
    let start = Instant::now();

    if cli.kmer_size % 2 == 0 {
        return Err(AssemblerError::InvalidKmerLength(cli.kmer_size));
    }
    if matches!(cli.path_method, PathMethod::Random) {
        return Err(AssemblerError::NotImplemented("random path method".to_string()));
    }

    section_header("Loading reads");
    explanation("Reading the input sequence file and normalizing every record to upper case.");
    let reads = load_reads(&cli.input_sequences)?;
    let input_base_count: usize = reads.iter().map(|r| r.length).sum();
    info!("loaded {} reads ({} bases)", reads.len(), input_base_count);

    let guide = if cli.pre_hash {
        section_header("Building pre-hash guide");
        let mut ph = PreHash::new(cli.aggressive_edge_removal as u32 + 1);
        for read in &reads {
            for strand in [Strand::Forward, Strand::Reverse] {
                let seq = read.seq(strand);
                if seq.len() >= cli.kmer_size {
                    for i in 0..=(seq.len() - cli.kmer_size) {
                        let window = &seq[i..i + cli.kmer_size];
                        ph.observe(dbg_assembler::kmer::fingerprint_of(window), read.id, strand, i);
                    }
                }
            }
        }
        info!("pre-hash indexed {} distinct kmers", ph.fingerprint_count());
        Some(ph)
    } else {
        None
    };
    if cli.pre_hash && cli.aggressive_edge_removal > 0 {
        info!("--aggressive-edge-removal is ignored while --pre-hash is enabled");
    }

    section_header("Building graph");
    explanation("Inserting every read (and its reverse complement) into the compressed de Bruijn graph.");
    let min_edge_weight = if cli.pre_hash { 0 } else { cli.aggressive_edge_removal as u32 };
    let mut assembly = Assembly::new(cli.kmer_size, cli.sequences, guide, min_edge_weight);
    for read in &reads {
        if let Err(e) = assembly.add_read(read.id, &read.forward_seq) {
            error!("skipping read {}: {}", read.name, e);
        }
    }
    let components_before_filters = assembly.component_count();

    section_header("Applying post-build filters");
    if !cli.pre_hash && cli.aggressive_edge_removal > 0 {
        assembly.remove_edges_below_threshold(cli.aggressive_edge_removal);
    }
    if cli.minimum_bases > 0 {
        assembly.remove_graphs_shorter_than(cli.minimum_bases);
    }
    let components_after_filters = assembly.component_count();
    info!("{} components before filters, {} after", components_before_filters, components_after_filters);

    if cli.print_graphs {
        create_dir(&cli.graph_dir);
        for component in assembly.components() {
            let path = cli.graph_dir.join(format!("{}.dot", component.id()));
            write_dot(component, &path)?;
        }
    }

    let mut sequences_emitted = 0usize;
    if cli.sequences {
        create_dir(&cli.sequence_dir);
        assembly.lock_edge_weights();
        let mut next_n = 1u64;
        for component in assembly.components_mut() {
            let paths = build_paths(cli, component);
            let records: Vec<PathRecord> = paths.iter().map(|seq| {
                let score = cli.abundance_method.and_then(|m| score_path(m, component, seq, cli.kmer_size));
                PathRecord { sequence: seq.clone(), score }
            }).collect();
            sequences_emitted += records.len();
            let path = cli.sequence_dir.join(format!("{}.fna", component.id()));
            next_n = write_fasta_paths(&records, &path, next_n)?;
        }
    }

    let metrics = RunMetrics {
        input_read_count: reads.len(),
        input_base_count,
        components_before_filters,
        components_after_filters,
        sequences_emitted,
        wall_clock_seconds: start.elapsed().as_secs_f64(),
    };
    metrics.write_yaml(&std::path::PathBuf::from("metrics.yaml"))?;

    section_header("Done");
    info!("wall clock: {}", dbg_assembler::misc::format_duration(start.elapsed()));
    Ok(())
}

fn build_paths(cli: &Cli, component: &mut dbg_assembler::component_graph::ComponentGraph) -> Vec<Vec<u8>> {
    // Builders destructively consume edge weight while walking; the graph
    // was locked beforehand so weights can be restored once the walk ends.
    let paths = match cli.path_method {
        PathMethod::Proportional => {
            let builder = ProportionalBuilder::new(cli.epsilon);
            builder.build_paths(component, cli.minimum_length)
        }
        PathMethod::Markov => {
            let mut builder = MarkovBuilder::new();
            builder.build_paths(component, cli.minimum_length)
        }
        PathMethod::Random => unreachable!("validated before reaching build_paths"),
    };
    component.reset_edge_weights();
    paths
}

fn score_path(method: AbundanceMethod, component: &dbg_assembler::component_graph::ComponentGraph,
              path: &[u8], k: usize) -> Option<(String, f64)> {
    let result = match method {
        AbundanceMethod::MarkovChain => markov_chain::score(component, path, k).map(|v| ("markov-chain".to_string(), v)),
        AbundanceMethod::ForwardAlgorithm => forward_algorithm::score(component, path, k).map(|v| ("forward-algorithm".to_string(), v)),
    };
    match result {
        Ok(scored) => Some(scored),
        Err(e) => {
            error!("abundance scoring failed: {}", e);
            None
        }
    }
}
