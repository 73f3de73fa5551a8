use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};

use resgenes_rs::call_genes::CallThresholds;
use resgenes_rs::config::{Config, DEFAULT_GENE_FILE, DEFAULT_KMER_LENGTH, DEFAULT_READ_FILE};
use resgenes_rs::call_resistance_genes;

#[derive(Parser, Debug)]
#[command(name = "resgenes-rs")]
#[command(version)]
#[command(about = "Find antibiotic resistance genes in a read sample by k-mer coverage")]
struct Cli {
    /// k-mer length used for the index and the reads
    #[arg(short = 'k', long = "kmer-length", default_value_t = DEFAULT_KMER_LENGTH)]
    kmer_length: usize,

    /// FASTA file with resistance gene references
    #[arg(short = 'g', long = "genes", default_value = DEFAULT_GENE_FILE)]
    gene_file: PathBuf,

    /// FASTQ file with sample reads (plain or gzip, detected from content)
    #[arg(short = 'r', long = "reads", default_value = DEFAULT_READ_FILE)]
    read_file: PathBuf,

    /// Worker threads (default: all cores)
    #[arg(short = 't', long = "threads")]
    threads: Option<usize>,

    /// Report genes whose coverage is above this fraction
    #[arg(long = "min-coverage", default_value_t = 0.95)]
    min_coverage: f64,

    /// Report genes whose minimum depth is above this value
    #[arg(long = "min-depth", default_value_t = 10)]
    min_depth: u32,
}

impl Cli {
    fn into_config(self) -> Config {
        Config {
            kmer_length: self.kmer_length,
            gene_file: self.gene_file,
            read_file: self.read_file,
            threads: self.threads,
            thresholds: CallThresholds {
                min_coverage: self.min_coverage,
                min_depth: self.min_depth,
            },
            ..Config::default()
        }
    }
}

fn spinner(color: &str, msg: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    spinner.set_message(msg);
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parsing errors (missing value, non-integer k) exit here, before any work
    let config = Cli::parse().into_config();

    // 1. Index genes and classify reads
    let progress = spinner("green", "Indexing genes and scanning reads...");
    let results = match call_resistance_genes(&config) {
        Ok(results) => results,
        Err(e) => {
            progress.abandon_with_message("Failed.");
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };
    progress.finish_with_message(format!(
        "Scanned {} reads against {} genes ({} k-mers).",
        results.aggregate.reads_seen, results.genes_indexed, results.kmers_indexed
    ));

    // 2. Report
    let progress = spinner("cyan", "Writing report...");
    print!("{}", results.get_report());
    progress.finish_with_message(format!("{} genes called.", results.calls.len()));

    ExitCode::SUCCESS
}
