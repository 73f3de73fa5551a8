// src/lib.rs
pub mod types;
pub mod error;
pub mod config;
pub mod sequence;
pub mod fasta;
pub mod fastq;
pub mod genedb;
pub mod match_read;
pub mod coverage;
pub mod aggregate;
pub mod call_genes;

use std::fmt::Write as FmtWrite;

use crate::aggregate::{accumulate_read_stream, DepthAggregate};
use crate::call_genes::call_genes;
use crate::config::Config;
use crate::error::Result;
use crate::fasta::read_fasta_records;
use crate::fastq::open_fastq;
use crate::genedb::GeneIndex;
use crate::types::{GeneCallRecord, GeneRecord};

pub use crate::error::GeneCallError;

/// Header line of the tab-separated gene report.
pub const REPORT_HEADER: &str = "gene\tresistence\tcoverage\tavg_depht";

/// Results of one run. Only structured data is stored; the report text is
/// generated on demand.
#[derive(Debug, Clone)]
pub struct CallResults {
    /// Called genes, best first
    pub calls: Vec<GeneCallRecord>,

    /// Aggregate depth of every gene that received at least one accepted read
    pub aggregate: DepthAggregate,

    /// Reference genes and distinct k-mers in the index
    pub genes_indexed: usize,
    pub kmers_indexed: usize,
}

/// Render a reported number like `1.0`, `0.97` or `12.5`: rounded to two
/// decimals, shortest form, at least one fractional digit.
fn format_value(value: f64) -> String {
    format!("{:?}", types::round2(value))
}

impl CallResults {
    /// Generate the gene report text on demand
    pub fn get_report(&self) -> String {
        let mut output = String::new();
        output.push_str(REPORT_HEADER);
        output.push('\n');
        for call in &self.calls {
            writeln!(
                output,
                "{}\t{}\t{}\t{}",
                call.gene,
                call.resistance,
                format_value(call.coverage),
                format_value(call.avg_depth)
            )
            .unwrap();
        }
        output
    }
}

/// Run the pipeline on reference records already in memory and a stream of
/// read sequences.
///
/// The index is fully built before the first read is looked at; reads are then
/// matched and validated in parallel and folded into one aggregate.
pub fn call_from_records<I>(records: &[GeneRecord], reads: I, config: &Config) -> Result<CallResults>
where
    I: IntoIterator<Item = Result<Vec<u8>>>,
{
    config.validate()?;

    // 1. Build the immutable k-mer index
    let index = GeneIndex::build(records, config.kmer_length)?;

    // 2. Match, validate and aggregate every read
    let aggregate = accumulate_read_stream(&index, reads, &config.coverage, config.batch_size)?;
    if aggregate.reads_too_short > 0 {
        log::warn!(
            "{} of {} reads were shorter than k={} and were skipped",
            aggregate.reads_too_short,
            aggregate.reads_seen,
            config.kmer_length
        );
    }

    // 3. Call genes from the aggregated depth
    let calls = call_genes(&aggregate.depths, &config.thresholds);
    log::info!(
        "Processed {} reads: {} accepted, {} genes with depth, {} called",
        aggregate.reads_seen,
        aggregate.reads_accepted,
        aggregate.len(),
        calls.len()
    );

    Ok(CallResults {
        calls,
        aggregate,
        genes_indexed: index.genes().len(),
        kmers_indexed: index.len(),
    })
}

/// Unified function to call resistance genes from the files named in `config`.
///
/// Runs on a dedicated rayon pool when `config.threads` is set.
pub fn call_resistance_genes(config: &Config) -> Result<CallResults> {
    config.validate()?;

    let run = || -> Result<CallResults> {
        let records = read_fasta_records(&config.gene_file)?;
        let reads = open_fastq(&config.read_file)?;
        call_from_records(&records, reads, config)
    };

    match config.threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?
            .install(run),
        None => run(),
    }
}
