// Reads a FASTA or FASTQ input file, transparently decoding gzip when the
// path ends in `.gz`. FASTQ parsing goes through `seq_io`; FASTA uses a
// small hand-rolled reader since `seq_io` only targets FASTQ-shaped records
// with mandatory quality strings.

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

use std::fs::File;
use std::io::{BufRead, BufReader, Read as IoRead};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::error::{AssemblerError, Result};
use crate::sequence::Sequence;

fn open_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)?;
    if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Ok(Box::new(BufReader::new(GzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

fn is_fastq(path: &Path) -> bool {
    let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    matches!(
        Path::new(name).extension().and_then(|e| e.to_str()),
        Some("fastq") | Some("fq")
    )
}

/// Reads every record from `path`, assigning sequential ids starting at 0.
pub fn load_reads(path: &Path) -> Result<Vec<Sequence>> {
    if is_fastq(path) {
        load_fastq(path)
    } else {
        load_fasta(path)
    }
}

fn load_fastq(path: &Path) -> Result<Vec<Sequence>> {
    let file = File::open(path)?;
    let reader: Box<dyn IoRead> = if path.extension().and_then(|e| e.to_str()) == Some("gz") {
        Box::new(GzDecoder::new(file))
    } else {
        Box::new(file)
    };
    let mut fq_reader = seq_io::fastq::Reader::new(reader);
    let mut records = Vec::new();
    let mut id = 0u32;
    while let Some(result) = fq_reader.next() {
        let record = result.map_err(|e| AssemblerError::Io(
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())))?;
        let name = String::from_utf8_lossy(record.head()).to_string();
        let (name, comment) = split_header(&name);
        let quality = Some(String::from_utf8_lossy(record.qual()).to_string());
        let seq = Sequence::new(id, name, comment, record.seq(), quality)?;
        records.push(seq);
        id += 1;
    }
    Ok(records)
}

fn load_fasta(path: &Path) -> Result<Vec<Sequence>> {
    let reader = open_reader(path)?;
    let mut records = Vec::new();
    let mut id = 0u32;
    let mut current_header: Option<String> = None;
    let mut current_seq = Vec::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(header) = line.strip_prefix('>') {
            if let Some(prev_header) = current_header.take() {
                push_fasta_record(&mut records, id, &prev_header, &current_seq)?;
                id += 1;
                current_seq.clear();
            }
            current_header = Some(header.to_string());
        } else {
            current_seq.extend(line.trim_end().bytes());
        }
    }
    if let Some(header) = current_header {
        push_fasta_record(&mut records, id, &header, &current_seq)?;
    }
    Ok(records)
}

fn push_fasta_record(records: &mut Vec<Sequence>, id: u32, header: &str, seq: &[u8]) -> Result<()> {
    let (name, comment) = split_header(header);
    records.push(Sequence::new(id, name, comment, seq, None)?);
    Ok(())
}

fn split_header(header: &str) -> (String, String) {
    match header.split_once(char::is_whitespace) {
        Some((name, comment)) => (name.to_string(), comment.trim().to_string()),
        None => (header.to_string(), String::new()),
    }
}
