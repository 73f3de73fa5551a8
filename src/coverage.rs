//src/coverage.rs

/// Tunable knobs of the read validity score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoverageParams {
    /// Uncovered positions tolerated inside a run before it is abandoned.
    pub max_gap: usize,
    /// Bonus for touching a position next to either gene end, as a fraction of read length.
    pub side_bonus_fraction: f64,
    /// Score needed to accept the read, as a fraction of read length.
    pub threshold_fraction: f64,
}

impl Default for CoverageParams {
    fn default() -> Self {
        Self {
            max_gap: 1,
            side_bonus_fraction: 0.70,
            threshold_fraction: 0.95,
        }
    }
}

impl CoverageParams {
    #[inline]
    pub fn side_bonus(&self, read_length: usize) -> usize {
        (self.side_bonus_fraction * read_length as f64).floor() as usize
    }

    #[inline]
    pub fn threshold(&self, read_length: usize) -> usize {
        (self.threshold_fraction * read_length as f64).floor() as usize
    }

    /// Highest run score reached while scanning `depth`.
    ///
    /// A run starts at the first position with depth 1. Inside a run, covered
    /// positions add 1 and uncovered ones count towards the gap limit; when the
    /// limit is reached the run (and its score) is dropped until the next
    /// covered position. Positions 1 and `len - 2` add the side bonus on top,
    /// once even when they coincide, so reads hanging over a gene end can
    /// still reach the threshold.
    pub fn score(&self, depth: &[u8], read_length: usize) -> usize {
        let side_bonus = self.side_bonus(read_length);
        let near_end = depth.len().checked_sub(2);

        let mut max_score = 0usize;
        let mut score = 0usize;
        let mut gap = 0usize;
        let mut in_run = false;

        for (pos, &value) in depth.iter().enumerate() {
            if value == 1 {
                in_run = true;
            }
            if !in_run {
                continue;
            }

            if value == 0 {
                gap += 1;
            } else {
                score += 1;
            }
            if pos == 1 || Some(pos) == near_end {
                score += side_bonus;
            }
            max_score = max_score.max(score);

            if gap >= self.max_gap {
                score = 0;
                gap = 0;
                in_run = false;
            }
        }

        max_score
    }

    /// Whether a read's coverage of one gene is continuous enough to count.
    pub fn is_valid(&self, depth: &[u8], read_length: usize) -> bool {
        self.score(depth, read_length) >= self.threshold(read_length)
    }
}

/// [`CoverageParams::is_valid`] with default parameters.
pub fn is_valid(depth: &[u8], read_length: usize) -> bool {
    CoverageParams::default().is_valid(depth, read_length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn derived_parameters_are_floored() {
        let p = CoverageParams::default();
        assert_eq!(p.side_bonus(100), 70);
        assert_eq!(p.threshold(100), 95);
        assert_eq!(p.side_bonus(19), 13);
        assert_eq!(p.threshold(19), 18);
    }

    #[test]
    fn all_zero_is_rejected() {
        assert!(!is_valid(&[0u8; 50], 50));
        assert!(!is_valid(&[], 50));
    }

    #[test]
    fn read_inside_long_gene_needs_near_full_run() {
        // 100 bp read fully inside a 300 bp gene: 100 covered positions
        let mut depth = vec![0u8; 300];
        depth[100..200].fill(1);
        assert!(is_valid(&depth, 100));

        // a single hole splits the run, neither half reaches 95
        depth[150] = 0;
        assert!(!is_valid(&depth, 100));
    }

    #[test]
    fn gene_edge_earns_the_side_bonus() {
        // read of 100 hanging off the start, only 30 positions inside the gene
        let mut depth = vec![0u8; 300];
        depth[..30].fill(1);
        // 30 covered + 70 bonus at position 1
        assert_eq!(CoverageParams::default().score(&depth, 100), 100);
        assert!(is_valid(&depth, 100));

        let mut tail = vec![0u8; 300];
        tail[270..].fill(1);
        assert!(is_valid(&tail, 100));
    }

    #[test]
    fn bonus_needs_an_active_run() {
        // run starts at position 2, after the bonus position has been passed
        let mut depth = vec![0u8; 300];
        depth[2..32].fill(1);
        assert!(!is_valid(&depth, 100));
    }

    #[test]
    fn gap_with_larger_tolerance() {
        let params = CoverageParams {
            max_gap: 2,
            ..CoverageParams::default()
        };
        let mut depth = vec![0u8; 300];
        depth[100..200].fill(1);
        depth[150] = 0;
        // the hole counts towards the gap but does not reset the run
        assert_eq!(params.score(&depth, 100), 99);
        assert!(params.is_valid(&depth, 100));
    }

    #[test]
    fn gene_as_long_as_the_kmer() {
        // one k-mer covers a 19 bp gene; both bonus positions fire
        let depth = vec![1u8; 19];
        assert_eq!(CoverageParams::default().score(&depth, 19), 19 + 2 * 13);
        assert!(is_valid(&depth, 19));
    }

    #[test]
    fn tiny_arrays_do_not_underflow() {
        assert!(is_valid(&[1], 1));
        assert!(is_valid(&[1, 1], 2));
        // length 3: position 1 is both bonus positions, counted once
        assert_eq!(CoverageParams::default().score(&[1, 1, 1], 10), 3 + 7);
    }

    proptest! {
        #[test]
        fn perfect_coverage_always_passes(len in 2usize..500) {
            let depth = vec![1u8; len];
            prop_assert!(is_valid(&depth, len));
        }

        #[test]
        fn no_coverage_never_passes(len in 1usize..500, read_length in 2usize..300) {
            let depth = vec![0u8; len];
            prop_assert!(!is_valid(&depth, read_length));
        }
    }
}
