// Human-facing progress output: a leveled `log`/`env_logger` backend for
// diagnostic detail, plus a couple of pretty-print helpers for the banner text
// printed to stderr at the start of each phase.

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

use log::LevelFilter;

pub fn init_logging(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Info };
    let _ = env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}

pub fn section_header(text: &str) {
    eprintln!();
    eprintln!("{}", "-".repeat(text.len() + 4));
    eprintln!("| {} |", text);
    eprintln!("{}", "-".repeat(text.len() + 4));
    eprintln!();
}

pub fn explanation(text: &str) {
    for line in wrap(text, 80) {
        eprintln!("{}", line);
    }
    eprintln!();
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if !current.is_empty() && current.len() + 1 + word.len() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
