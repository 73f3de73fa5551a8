//src/aggregate.rs

use ahash::AHashMap;
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::coverage::CoverageParams;
use crate::error::Result;
use crate::genedb::GeneIndex;
use crate::match_read::match_read;
use crate::types::GeneId;

/// Per-gene sum of all accepted per-read depth arrays.
pub type GeneDepths = AHashMap<GeneId, Vec<u32>>;

/// Fold one accepted per-read array into the running totals.
///
/// A new gene takes ownership of the read's array; an existing gene gets an
/// elementwise add. Array lengths are fixed per gene by the index.
pub fn accumulate(aggregate: &mut GeneDepths, gene_id: GeneId, depth: Vec<u8>) {
    match aggregate.get_mut(&gene_id) {
        Some(total) => {
            debug_assert_eq!(total.len(), depth.len());
            for (t, d) in total.iter_mut().zip(depth) {
                *t += u32::from(d);
            }
        }
        None => {
            let total = depth.into_iter().map(u32::from).collect();
            aggregate.insert(gene_id, total);
        }
    }
}

/// Elementwise add of two total arrays for the same gene.
fn add_totals(total: &mut [u32], other: &[u32]) {
    debug_assert_eq!(total.len(), other.len());
    for (t, o) in total.iter_mut().zip(other) {
        *t += *o;
    }
}

/// Running depth totals for a sample, plus read counters for logging.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct DepthAggregate {
    pub depths: GeneDepths,
    pub reads_seen: u64,
    /// Reads shorter than k, which cannot produce any k-mer
    pub reads_too_short: u64,
    /// Reads accepted for at least one gene
    pub reads_accepted: u64,
}

impl DepthAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Match one read, validate it against every gene it touched and fold
    /// the accepted arrays in.
    pub fn add_read(&mut self, read: &[u8], index: &GeneIndex, params: &CoverageParams) {
        self.reads_seen += 1;
        if read.len() < index.k() {
            self.reads_too_short += 1;
            return;
        }

        let mut accepted = false;
        for (gene_id, depth) in match_read(read, index) {
            if params.is_valid(&depth, read.len()) {
                accumulate(&mut self.depths, gene_id, depth);
                accepted = true;
            }
        }
        if accepted {
            self.reads_accepted += 1;
        }
    }

    /// Merge another partial aggregate into this one.
    pub fn merge(&mut self, other: DepthAggregate) {
        self.reads_seen += other.reads_seen;
        self.reads_too_short += other.reads_too_short;
        self.reads_accepted += other.reads_accepted;

        self.depths.reserve(other.depths.len());
        for (gene_id, depth) in other.depths {
            match self.depths.get_mut(&gene_id) {
                Some(total) => add_totals(total, &depth),
                None => {
                    self.depths.insert(gene_id, depth);
                }
            }
        }
    }

    /// Number of genes with accepted depth.
    pub fn len(&self) -> usize {
        self.depths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.depths.is_empty()
    }
}

/// Parallel processing of reads already in memory.
///
/// Each rayon worker folds into its own `DepthAggregate`; the partial results
/// are then reduced pairwise. Order does not matter since elementwise addition
/// is commutative.
pub fn accumulate_reads_parallel<S: AsRef<[u8]> + Sync>(
    index: &GeneIndex,
    reads: &[S],
    params: &CoverageParams,
) -> DepthAggregate {
    reads
        .par_iter()
        .fold(DepthAggregate::new, |mut acc, read| {
            acc.add_read(read.as_ref(), index, params);
            acc
        })
        .reduce(DepthAggregate::new, |mut a, b| {
            a.merge(b);
            a
        })
}

/// Streaming variant: reads are pulled from `reads` in batches of
/// `batch_size`, each batch is processed in parallel and the per-worker
/// partials are merged into one shared aggregate behind a mutex.
///
/// The first read error stops processing and is returned.
pub fn accumulate_read_stream<I>(
    index: &GeneIndex,
    reads: I,
    params: &CoverageParams,
    batch_size: usize,
) -> Result<DepthAggregate>
where
    I: IntoIterator<Item = Result<Vec<u8>>>,
{
    let batch_size = batch_size.max(1);
    let shared = Mutex::new(DepthAggregate::new());
    let mut batch: Vec<Vec<u8>> = Vec::with_capacity(batch_size);

    let process = |batch: &[Vec<u8>]| {
        batch
            .par_iter()
            .fold(DepthAggregate::new, |mut acc, read| {
                acc.add_read(read, index, params);
                acc
            })
            .for_each(|partial| shared.lock().merge(partial));
    };

    for read in reads {
        batch.push(read?);
        if batch.len() == batch_size {
            process(&batch);
            batch.clear();
            log::debug!("Processed {} reads", shared.lock().reads_seen);
        }
    }
    if !batch.is_empty() {
        process(&batch);
    }

    Ok(shared.into_inner())
}
