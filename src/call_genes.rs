//src/call_genes.rs

use std::cmp::Ordering;

use crate::aggregate::GeneDepths;
use crate::types::{split_header, GeneCallRecord};

/// Minimum evidence for reporting a gene. Both comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CallThresholds {
    pub min_coverage: f64,
    pub min_depth: u32,
}

impl Default for CallThresholds {
    fn default() -> Self {
        Self {
            min_coverage: 0.95,
            min_depth: 10,
        }
    }
}

/// Summary of one gene's aggregate depth array.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneStats {
    /// Fraction of positions with depth > 0
    pub coverage: f64,
    /// Total depth divided by gene length
    pub avg_depth: f64,
    pub min_depth: u32,
}

impl GeneStats {
    pub fn passes(&self, thresholds: &CallThresholds) -> bool {
        self.coverage > thresholds.min_coverage && self.min_depth > thresholds.min_depth
    }
}

/// From a depth array return coverage, average depth and minimum depth.
pub fn coverage_stats(depth: &[u32]) -> GeneStats {
    if depth.is_empty() {
        return GeneStats {
            coverage: 0.0,
            avg_depth: 0.0,
            min_depth: 0,
        };
    }

    let len = depth.len() as f64;
    let covered = depth.iter().filter(|&&d| d > 0).count();
    let total: u64 = depth.iter().map(|&d| u64::from(d)).sum();
    let min_depth = depth.iter().copied().min().unwrap_or(0);

    GeneStats {
        coverage: covered as f64 / len,
        avg_depth: total as f64 / len,
        min_depth,
    }
}

/// Descending by (coverage, avg_depth); gene id ascending for full ties so
/// output does not depend on hash map order.
fn rank(a: &GeneCallRecord, b: &GeneCallRecord) -> Ordering {
    b.coverage
        .total_cmp(&a.coverage)
        .then_with(|| b.avg_depth.total_cmp(&a.avg_depth))
        .then_with(|| a.gene_id.cmp(&b.gene_id))
}

/// Compute statistics for every aggregated gene, keep those that pass the
/// thresholds and rank them for reporting.
pub fn call_genes(depths: &GeneDepths, thresholds: &CallThresholds) -> Vec<GeneCallRecord> {
    let mut calls: Vec<GeneCallRecord> = depths
        .iter()
        .filter_map(|(gene_id, depth)| {
            let stats = coverage_stats(depth);
            log::debug!(
                "{}: coverage={:.4} avg_depth={:.2} min_depth={}",
                gene_id,
                stats.coverage,
                stats.avg_depth,
                stats.min_depth
            );
            if !stats.passes(thresholds) {
                return None;
            }
            let (gene, resistance) = split_header(gene_id);
            Some(GeneCallRecord {
                gene_id: gene_id.clone(),
                gene,
                resistance,
                coverage: stats.coverage,
                avg_depth: stats.avg_depth,
                min_depth: stats.min_depth,
            })
        })
        .collect();

    calls.sort_by(rank);
    calls
}
