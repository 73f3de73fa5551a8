//src/fastq.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::error::{GeneCallError, Result};

/// Streaming FASTQ reader that yields only the (uppercased) sequence line of
/// each 4-line record. Supports gzip input.
pub struct FastqSequences<R: BufRead> {
    reader: R,
    path: PathBuf,
    line: String,
    done: bool,
}

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Open a FASTQ file, wrapping it in a `MultiGzDecoder` if it starts with the
/// gzip magic bytes. The file name does not matter.
pub fn open_fastq<P: AsRef<Path>>(path: P) -> Result<FastqSequences<Box<dyn BufRead>>> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|e| GeneCallError::io(path, e))?;
    let mut buffered = BufReader::new(f);

    let is_gz = buffered
        .fill_buf()
        .map_err(|e| GeneCallError::io(path, e))?
        .starts_with(&GZIP_MAGIC);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(buffered)))
    } else {
        Box::new(buffered)
    };

    Ok(FastqSequences::new(reader, path))
}

/// Minimal FASTQ read function: all read sequences of a file, in order.
pub fn read_fastq_sequences<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>> {
    open_fastq(path)?.collect()
}

impl<R: BufRead> FastqSequences<R> {
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self {
            reader,
            path: path.into(),
            line: String::new(),
            done: false,
        }
    }

    /// Returns `Ok(false)` on EOF.
    fn read_line(&mut self) -> Result<bool> {
        self.line.clear();
        let n = self
            .reader
            .read_line(&mut self.line)
            .map_err(|e| GeneCallError::io(&self.path, e))?;
        Ok(n != 0)
    }

    fn next_sequence(&mut self) -> Result<Option<Vec<u8>>> {
        loop {
            // 1) read header
            if !self.read_line()? {
                return Ok(None); // EOF
            }
            if !self.line.starts_with('@') {
                // Not a valid FASTQ header; skip
                continue;
            }

            // 2) read sequence
            if !self.read_line()? {
                // truncated record
                return Ok(None);
            }
            let seq: Vec<u8> = self
                .line
                .trim_end()
                .bytes()
                .map(|b| b.to_ascii_uppercase())
                .collect();

            // 3) plus line, 4) quality; a truncated tail still yields its sequence
            for _ in 0..2 {
                if !self.read_line()? {
                    break;
                }
            }
            return Ok(Some(seq));
        }
    }
}

impl<R: BufRead> Iterator for FastqSequences<R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_sequence() {
            Ok(Some(seq)) => Some(Ok(seq)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
