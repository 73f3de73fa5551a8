//src/sequence.rs

/// Complement of a single uppercase base. `None` for anything outside ACGT.
#[inline]
pub fn complement_base(b: u8) -> Option<u8> {
    match b {
        b'A' => Some(b'T'),
        b'T' => Some(b'A'),
        b'C' => Some(b'G'),
        b'G' => Some(b'C'),
        _ => None,
    }
}

#[inline]
fn is_nucleotide(b: u8) -> bool {
    matches!(b, b'A' | b'C' | b'G' | b'T')
}

/// Strip whitespace and uppercase a sequence line.
/// Returns `None` if any remaining character is not one of ACGT.
pub fn normalize(line: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::with_capacity(line.len());
    for &b in line {
        if b.is_ascii_whitespace() {
            continue;
        }
        let up = b.to_ascii_uppercase();
        if !is_nucleotide(up) {
            return None;
        }
        out.push(up);
    }
    Some(out)
}

/// Iterator over all `(kmer, start)` windows of a sequence, left to right.
/// Cheap to clone, so it can be restarted from any point.
#[derive(Debug, Clone)]
pub struct Kmers<'a> {
    seq: &'a [u8],
    k: usize,
    pos: usize,
}

impl<'a> Iterator for Kmers<'a> {
    type Item = (&'a [u8], usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.k == 0 || self.pos + self.k > self.seq.len() {
            return None;
        }
        let start = self.pos;
        self.pos += 1;
        Some((&self.seq[start..start + self.k], start))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.k == 0 {
            0
        } else {
            (self.seq.len() + 1).saturating_sub(self.pos + self.k)
        };
        (n, Some(n))
    }
}

impl ExactSizeIterator for Kmers<'_> {}

/// Enumerate every length-`k` substring with its 0-based offset.
/// Empty when `k` is 0 or longer than the sequence.
pub fn enumerate_kmers(seq: &[u8], k: usize) -> Kmers<'_> {
    Kmers { seq, k, pos: 0 }
}

/// Base-wise complement (not reversed). `None` if any base is outside ACGT.
pub fn complement(seq: &[u8]) -> Option<Vec<u8>> {
    seq.iter().map(|&b| complement_base(b)).collect()
}

pub fn reverse(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().copied().collect()
}

/// Reverse of the complement, which is the same as the complement of the reverse.
pub fn reverse_complement(seq: &[u8]) -> Option<Vec<u8>> {
    seq.iter().rev().map(|&b| complement_base(b)).collect()
}

/// The four strands indexed for every reference gene, in build order:
/// original, complement, reverse, reverse of complement.
pub fn orientations(seq: &[u8]) -> Option<[Vec<u8>; 4]> {
    let comp = complement(seq)?;
    let rev = reverse(seq);
    let rev_comp = reverse(&comp);
    Some([seq.to_vec(), comp, rev, rev_comp])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn kmers_of_short_sequence() {
        let got: Vec<_> = enumerate_kmers(b"ACGTA", 3).collect();
        assert_eq!(
            got,
            vec![(&b"ACG"[..], 0), (&b"CGT"[..], 1), (&b"GTA"[..], 2)]
        );
    }

    #[test]
    fn kmer_longer_than_sequence_is_empty() {
        assert_eq!(enumerate_kmers(b"ACG", 4).count(), 0);
        assert_eq!(enumerate_kmers(b"", 1).count(), 0);
        assert_eq!(enumerate_kmers(b"ACG", 0).count(), 0);
    }

    #[test]
    fn kmer_equal_to_sequence_length() {
        let got: Vec<_> = enumerate_kmers(b"ACGT", 4).collect();
        assert_eq!(got, vec![(&b"ACGT"[..], 0)]);
    }

    #[test]
    fn kmers_are_restartable() {
        let it = enumerate_kmers(b"ACGTTG", 2);
        let first: Vec<_> = it.clone().collect();
        let second: Vec<_> = it.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn orientation_order() {
        let [fwd, comp, rev, rev_comp] = orientations(b"AACG").unwrap();
        assert_eq!(fwd, b"AACG");
        assert_eq!(comp, b"TTGC");
        assert_eq!(rev, b"GCAA");
        assert_eq!(rev_comp, b"CGTT");
        assert_eq!(reverse_complement(b"AACG").unwrap(), rev_comp);
    }

    #[test]
    fn complement_rejects_unknown_bases() {
        assert_eq!(complement(b"ACNT"), None);
        assert_eq!(orientations(b"acgt"), None);
    }

    #[test]
    fn normalize_uppercases_and_validates() {
        assert_eq!(normalize(b" acgT \t"), Some(b"ACGT".to_vec()));
        assert_eq!(normalize(b"ACGN"), None);
        assert_eq!(normalize(b""), Some(Vec::new()));
    }

    fn dna() -> impl Strategy<Value = Vec<u8>> {
        proptest::collection::vec(
            prop_oneof![Just(b'A'), Just(b'C'), Just(b'G'), Just(b'T')],
            0..64,
        )
    }

    proptest! {
        #[test]
        fn kmer_count_and_offsets(seq in dna(), k in 1usize..70) {
            let kmers: Vec<_> = enumerate_kmers(&seq, k).collect();
            if k > seq.len() {
                prop_assert!(kmers.is_empty());
            } else {
                prop_assert_eq!(kmers.len(), seq.len() - k + 1);
                for (i, (kmer, offset)) in kmers.iter().enumerate() {
                    prop_assert_eq!(*offset, i);
                    prop_assert_eq!(*kmer, &seq[*offset..*offset + k]);
                }
            }
        }

        #[test]
        fn complement_is_self_inverse(seq in dna()) {
            let twice = complement(&complement(&seq).unwrap()).unwrap();
            prop_assert_eq!(twice, seq);
        }

        #[test]
        fn reverse_is_self_inverse(seq in dna()) {
            prop_assert_eq!(reverse(&reverse(&seq)), seq);
        }

        #[test]
        fn reverse_complement_commutes(seq in dna()) {
            let a = reverse(&complement(&seq).unwrap());
            let b = complement(&reverse(&seq)).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
