//src/match_read.rs

use ahash::AHashMap;

use crate::genedb::GeneIndex;
use crate::sequence::enumerate_kmers;
use crate::types::GeneId;

/// Per-read coverage indicator for each gene the read touched: 1 where any
/// k-mer of the read landed, 0 elsewhere. Sized to the gene's indexed length.
pub type ReadDepths = AHashMap<GeneId, Vec<u8>>;

/// Single-thread matching of one read against the gene index.
/// - Uses the index's k-mer length
/// - A read shorter than k yields an empty map
/// - Repeated hits on a position are idempotent (set, not incremented)
pub fn match_read(read: &[u8], index: &GeneIndex) -> ReadDepths {
    let k = index.k();
    let mut depths = ReadDepths::new();

    for (kmer, _) in enumerate_kmers(read, k) {
        // 1) Look the k-mer up; most k-mers of a sample miss
        let Some(hits) = index.lookup(kmer) else {
            continue;
        };

        // 2) Mark the covered window in every gene that contains the k-mer
        for (gene_id, hit) in hits {
            let depth = depths
                .entry(gene_id.clone())
                .or_insert_with(|| vec![0u8; hit.gene_length]);

            // Never write past the array allocated on first hit
            let end = (hit.offset + k).min(depth.len());
            if hit.offset < end {
                depth[hit.offset..end].fill(1);
            }
        }
    }

    depths
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genedb::build_index;
    use crate::types::GeneRecord;

    fn index(k: usize) -> GeneIndex {
        build_index(&[GeneRecord::new(">g1 res", "GTGTTATCCATT")], k).unwrap()
    }

    #[test]
    fn exact_read_covers_whole_gene() {
        let depths = match_read(b"GTGTTATCCATT", &index(4));
        assert_eq!(depths.len(), 1);
        assert_eq!(depths[">g1 res"], vec![1u8; 12]);
    }

    #[test]
    fn partial_read_marks_only_its_window() {
        let depths = match_read(b"GTTATC", &index(4));
        let d = &depths[">g1 res"];
        assert_eq!(d.len(), 12);
        assert_eq!(d, &vec![0, 0, 1, 1, 1, 1, 1, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn reverse_complement_read_hits_same_gene() {
        // reverse complement of GTGTTATCCATT
        let depths = match_read(b"AATGGATAACAC", &index(4));
        assert_eq!(depths[">g1 res"], vec![1u8; 12]);
    }

    #[test]
    fn short_or_foreign_reads_yield_nothing() {
        assert!(match_read(b"AAC", &index(4)).is_empty());
        assert!(match_read(b"", &index(4)).is_empty());
        assert!(match_read(b"NNNNNNNN", &index(4)).is_empty());
    }

    #[test]
    fn repeated_hits_stay_binary() {
        let depths = match_read(b"GTGTTATCCATTGTGTTATCCATT", &index(4));
        assert!(depths[">g1 res"].iter().all(|&v| v == 1));
    }
}
