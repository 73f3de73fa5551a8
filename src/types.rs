//src/types.rs

use std::sync::Arc;

/// Gene identifier: the full reference header, e.g. `">blaTEM-1 beta-lactam"`.
/// Shared between the index and every depth array keyed by it.
pub type GeneId = Arc<str>;

/// A minimal representation of one reference gene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneRecord {
    pub header: String,
    /// Raw bases; the FASTA loader already uppercases and validates them.
    pub seq: Vec<u8>,
}

impl GeneRecord {
    pub fn new(header: impl Into<String>, seq: impl Into<Vec<u8>>) -> Self {
        Self {
            header: header.into(),
            seq: seq.into(),
        }
    }
}

/// A structured representation of one row in the gene report.
/// For example:
///  gene  resistence  coverage  avg_depht
#[derive(Debug, Clone, PartialEq)]
pub struct GeneCallRecord {
    pub gene_id: GeneId,
    pub gene: String,        // short name, header token without '>'
    pub resistance: String,  // rest of the header
    pub coverage: f64,
    pub avg_depth: f64,
    pub min_depth: u32,
}

impl GeneCallRecord {
    pub fn rounded_coverage(&self) -> f64 {
        round2(self.coverage)
    }

    pub fn rounded_avg_depth(&self) -> f64 {
        round2(self.avg_depth)
    }
}

/// Round to two decimals for reporting.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Split a reference header into the short gene name and the resistance text.
pub fn split_header(header: &str) -> (String, String) {
    let trimmed = header.trim();
    let (name, rest) = match trimmed.find(char::is_whitespace) {
        Some(pos) => (&trimmed[..pos], trimmed[pos..].trim()),
        None => (trimmed, ""),
    };
    let name = name.strip_prefix('>').unwrap_or(name);
    (name.to_string(), rest.to_string())
}
