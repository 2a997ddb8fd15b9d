//! Suffix array construction by parallel suffix sort.
//!
//! Sorts the array of all suffix start positions by comparing the suffixes
//! they point to. The terminal sentinel makes every suffix distinct, so a
//! plain slice comparison is a total order and the empty (sentinel) suffix
//! sorts first. Large texts sort in parallel.

use crate::error::Result;
use crate::index::int_vec::IntVec;
use crate::index::registry::{BuildEnv, Provider};
use crate::index::types::StructureKind;
use log::debug;
use rayon::prelude::*;

/// Texts above this size sort in parallel.
const PARALLEL_THRESHOLD: usize = 100_000;

/// Builds the suffix array; populates a joint sink when one is present so a
/// second structure can be written in the same pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixArrayProvider;

impl Provider for SuffixArrayProvider {
    fn provides(&self) -> StructureKind {
        StructureKind::SuffixArray
    }

    fn strategy(&self) -> &'static str {
        "parallel_sort"
    }

    fn build(&self, env: &mut BuildEnv<'_>) -> Result<IntVec> {
        let text = env.text();
        let n = text.len();
        let sorted = sort_suffixes(text);

        let mut joint = env.take_joint();
        if let Some(sink) = joint.as_mut() {
            debug!("joint construction: allocating secondary structure");
            sink.init(n);
        }

        let mut sa = IntVec::with_width(n, env.initial_width());
        for (rank, &pos) in sorted.iter().enumerate() {
            sa.set(rank, pos);
            if let Some(sink) = joint.as_mut() {
                sink.write(rank as u64, pos);
            }
        }
        Ok(sa)
    }
}

/// Sorts all suffix start positions lexicographically.
fn sort_suffixes(text: &[u8]) -> Vec<u64> {
    let n = text.len();
    let mut positions: Vec<u64> = (0..n as u64).collect();
    if n > PARALLEL_THRESHOLD {
        positions.par_sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    } else {
        positions.sort_unstable_by(|&a, &b| text[a as usize..].cmp(&text[b as usize..]));
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_banana() {
        // standard suffix order for "banana" with the sentinel smallest:
        // 6: \0
        // 5: a\0
        // 3: ana\0
        // 1: anana\0
        // 0: banana\0
        // 4: na\0
        // 2: nana\0
        assert_eq!(sort_suffixes(b"banana\x00"), vec![6, 5, 3, 1, 0, 4, 2]);
    }

    #[test]
    fn test_sentinel_suffix_sorts_first() {
        for text in [&b"banana\x00"[..], b"zzzz\x00", b"\x00"] {
            let sa = sort_suffixes(text);
            assert_eq!(sa[0] as usize, text.len() - 1);
        }
    }

    #[test]
    fn test_run_of_identical_bytes() {
        // shorter suffixes of a run sort before longer ones
        assert_eq!(sort_suffixes(b"aaaa\x00"), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_is_a_sorted_permutation() {
        let text = b"abracadabra\x00";
        let sa = sort_suffixes(text);
        let mut seen = vec![false; text.len()];
        for &pos in &sa {
            assert!(!seen[pos as usize]);
            seen[pos as usize] = true;
        }
        for pair in sa.windows(2) {
            assert!(text[pair[0] as usize..] < text[pair[1] as usize..]);
        }
    }
}
