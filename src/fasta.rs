//src/fasta.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{GeneCallError, Result};
use crate::sequence::normalize;
use crate::types::GeneRecord;

/// Read every `(header, sequence)` record from a FASTA file of reference genes.
pub fn read_fasta_records<P: AsRef<Path>>(path: P) -> Result<Vec<GeneRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| GeneCallError::io(path, e))?;
    parse_fasta(BufReader::new(file), path)
}

/// Parse FASTA records from any reader. `source` is only used in error messages.
///
/// Headers are kept verbatim (including the leading '>'). Sequence lines are
/// stripped of whitespace, uppercased and checked against the ACGT alphabet;
/// the first offending line aborts the whole parse.
pub fn parse_fasta<R: BufRead>(mut reader: R, source: &Path) -> Result<Vec<GeneRecord>> {
    let mut records = Vec::new();
    let mut current: Option<(String, Vec<u8>)> = None;
    let mut line = String::new();

    loop {
        line.clear();
        if reader
            .read_line(&mut line)
            .map_err(|e| GeneCallError::io(source, e))?
            == 0
        {
            break; // EOF
        }
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('>') {
            if let Some((header, seq)) = current.take() {
                records.push(finish_record(header, seq)?);
            }
            current = Some((trimmed.to_string(), Vec::new()));
            continue;
        }

        let Some((header, seq)) = current.as_mut() else {
            return Err(GeneCallError::MissingHeader {
                line: trimmed.to_string(),
            });
        };
        match normalize(trimmed.as_bytes()) {
            Some(bases) => seq.extend_from_slice(&bases),
            None => {
                return Err(GeneCallError::InvalidSequence {
                    header: header.clone(),
                    line: trimmed.to_string(),
                })
            }
        }
    }

    if let Some((header, seq)) = current.take() {
        records.push(finish_record(header, seq)?);
    }

    log::info!("Read {} reference records from {}", records.len(), source.display());
    Ok(records)
}

fn finish_record(header: String, seq: Vec<u8>) -> Result<GeneRecord> {
    if seq.is_empty() {
        return Err(GeneCallError::EmptySequence { header });
    }
    Ok(GeneRecord { header, seq })
}
