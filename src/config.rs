//src/config.rs

use std::path::PathBuf;

use crate::call_genes::CallThresholds;
use crate::coverage::CoverageParams;
use crate::error::{GeneCallError, Result};

pub const DEFAULT_KMER_LENGTH: usize = 19;
pub const DEFAULT_GENE_FILE: &str = "resistance_genes.fsa";
pub const DEFAULT_READ_FILE: &str = "Unknown3_raw_reads_1.txt.gz";
/// Reads handed to the worker pool at a time when streaming a FASTQ file.
pub const DEFAULT_BATCH_SIZE: usize = 16_384;

/// Everything one gene-calling run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub kmer_length: usize,
    pub gene_file: PathBuf,
    pub read_file: PathBuf,
    pub coverage: CoverageParams,
    pub thresholds: CallThresholds,
    /// Worker threads; `None` uses rayon's global pool.
    pub threads: Option<usize>,
    pub batch_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kmer_length: DEFAULT_KMER_LENGTH,
            gene_file: PathBuf::from(DEFAULT_GENE_FILE),
            read_file: PathBuf::from(DEFAULT_READ_FILE),
            coverage: CoverageParams::default(),
            thresholds: CallThresholds::default(),
            threads: None,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

fn check_fraction(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(GeneCallError::Config(format!(
            "{name} must be in (0, 1], got {value}"
        )))
    }
}

impl Config {
    /// Reject values that would make the run meaningless before any file is opened.
    pub fn validate(&self) -> Result<()> {
        if self.kmer_length == 0 {
            return Err(GeneCallError::Config(
                "k-mer length must be a positive integer".to_string(),
            ));
        }
        if self.threads == Some(0) {
            return Err(GeneCallError::Config(
                "thread count must be at least 1".to_string(),
            ));
        }
        if self.batch_size == 0 {
            return Err(GeneCallError::Config(
                "batch size must be at least 1".to_string(),
            ));
        }
        check_fraction("side bonus fraction", self.coverage.side_bonus_fraction)?;
        check_fraction("score threshold fraction", self.coverage.threshold_fraction)?;
        // coverage can never exceed 1, so a threshold of 1 would call nothing
        if !(self.thresholds.min_coverage >= 0.0 && self.thresholds.min_coverage < 1.0) {
            return Err(GeneCallError::Config(format!(
                "minimum coverage must be in [0, 1), got {}",
                self.thresholds.min_coverage
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.kmer_length, 19);
        assert_eq!(config.gene_file, PathBuf::from("resistance_genes.fsa"));
        assert_eq!(config.read_file, PathBuf::from("Unknown3_raw_reads_1.txt.gz"));
        assert_eq!(config.coverage.max_gap, 1);
        assert_eq!(config.thresholds.min_depth, 10);
        config.validate().unwrap();
    }

    #[test]
    fn rejects_bad_values() {
        let bad = [
            Config { kmer_length: 0, ..Config::default() },
            Config { threads: Some(0), ..Config::default() },
            Config { batch_size: 0, ..Config::default() },
            Config {
                coverage: CoverageParams {
                    threshold_fraction: 1.5,
                    ..CoverageParams::default()
                },
                ..Config::default()
            },
            Config {
                thresholds: CallThresholds {
                    min_coverage: f64::NAN,
                    min_depth: 10,
                },
                ..Config::default()
            },
        ];
        for config in bad {
            assert!(matches!(config.validate(), Err(GeneCallError::Config(_))));
        }
    }
}
