//src/genedb.rs

use ahash::{AHashMap, AHashSet};

use crate::error::{GeneCallError, Result};
use crate::sequence::{enumerate_kmers, normalize, orientations};
use crate::types::{GeneId, GeneRecord};

/// Where one k-mer sits inside one gene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KmerHit {
    /// Start offset of the k-mer in the orientation that produced it.
    pub offset: usize,
    /// Length of that orientation (same for all four strands).
    pub gene_length: usize,
}

/// Genes that contain a given k-mer.
pub type GeneHits = AHashMap<GeneId, KmerHit>;

/// k-mer -> gene -> (position, gene length), built once and read-only afterwards.
///
/// Every reference gene is indexed in four orientations under the same gene id.
/// When a k-mer occurs more than once in a gene (any strand), the position of the
/// last occurrence seen during the build wins. A k-mer that is ambiguous within
/// one gene therefore loses all but one of its positions.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneIndex {
    k: usize,
    kmers: AHashMap<Box<[u8]>, GeneHits>,
    genes: Vec<GeneId>,
}

impl GeneIndex {
    /// Build the index from reference records.
    ///
    /// Sequences are uppercased before indexing. An empty sequence, a
    /// character outside ACGT or a header seen before aborts the build; no
    /// partial index is returned.
    pub fn build(records: &[GeneRecord], k: usize) -> Result<Self> {
        if k == 0 {
            return Err(GeneCallError::Config(
                "k-mer length must be a positive integer".to_string(),
            ));
        }

        let mut kmers: AHashMap<Box<[u8]>, GeneHits> = AHashMap::new();
        let mut genes = Vec::with_capacity(records.len());
        let mut seen: AHashSet<&str> = AHashSet::with_capacity(records.len());

        for record in records {
            // one gene id must map to one gene length
            if !seen.insert(record.header.as_str()) {
                return Err(GeneCallError::DuplicateHeader {
                    header: record.header.clone(),
                });
            }

            // records built outside the FASTA loader are not validated yet
            let seq = normalize(&record.seq).ok_or_else(|| invalid(record))?;
            if seq.is_empty() {
                return Err(GeneCallError::EmptySequence {
                    header: record.header.clone(),
                });
            }
            let strands = orientations(&seq).ok_or_else(|| invalid(record))?;

            let gene_id: GeneId = GeneId::from(record.header.as_str());
            for strand in &strands {
                let gene_length = strand.len();
                for (kmer, offset) in enumerate_kmers(strand, k) {
                    let hit = KmerHit { offset, gene_length };
                    match kmers.get_mut(kmer) {
                        Some(hits) => {
                            hits.insert(gene_id.clone(), hit);
                        }
                        None => {
                            let mut hits = GeneHits::with_capacity(1);
                            hits.insert(gene_id.clone(), hit);
                            kmers.insert(kmer.into(), hits);
                        }
                    }
                }
            }
            genes.push(gene_id);
        }

        log::info!(
            "Indexed {} genes into {} distinct k-mers, k={}",
            genes.len(),
            kmers.len(),
            k
        );

        Ok(Self { k, kmers, genes })
    }

    /// The k-mer length the index was built with.
    pub fn k(&self) -> usize {
        self.k
    }

    /// All genes containing `kmer`, or `None` if it is not in the index.
    #[inline]
    pub fn lookup(&self, kmer: &[u8]) -> Option<&GeneHits> {
        self.kmers.get(kmer)
    }

    /// Number of distinct k-mers.
    pub fn len(&self) -> usize {
        self.kmers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kmers.is_empty()
    }

    /// Gene ids in reference order.
    pub fn genes(&self) -> &[GeneId] {
        &self.genes
    }
}

fn invalid(record: &GeneRecord) -> GeneCallError {
    GeneCallError::InvalidSequence {
        header: record.header.clone(),
        line: String::from_utf8_lossy(&record.seq).into_owned(),
    }
}

/// Convenience wrapper around [`GeneIndex::build`].
pub fn build_index(records: &[GeneRecord], kmer_length: usize) -> Result<GeneIndex> {
    GeneIndex::build(records, kmer_length)
}
