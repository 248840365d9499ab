// Run-wide summary written to `metrics.yaml` at the end of a run, in the
// vein of the teacher's own per-subcommand metrics files.

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

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RunMetrics {
    pub input_read_count: usize,
    pub input_base_count: usize,
    pub components_before_filters: usize,
    pub components_after_filters: usize,
    pub sequences_emitted: usize,
    pub wall_clock_seconds: f64,
}

impl RunMetrics {
    pub fn write_yaml(&self, path: &Path) -> Result<()> {
        let yaml = serde_yaml::to_string(self)
            .expect("RunMetrics always serializes");
        std::fs::write(path, yaml)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_yaml() {
        let metrics = RunMetrics {
            input_read_count: 10,
            input_base_count: 1000,
            components_before_filters: 5,
            components_after_filters: 3,
            sequences_emitted: 4,
            wall_clock_seconds: 1.25,
        };
        let yaml = serde_yaml::to_string(&metrics).unwrap();
        let parsed: RunMetrics = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.input_read_count, 10);
        assert_eq!(parsed.components_after_filters, 3);
    }

    #[test]
    fn test_write_yaml_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.yaml");
        let metrics = RunMetrics::default();
        metrics.write_yaml(&path).unwrap();
        assert!(path.exists());
    }
}
