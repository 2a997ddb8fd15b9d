//! Phi array: maps each text position to the position of its lexicographic
//! predecessor suffix.
//!
//! The first-ranked suffix has no predecessor; it wraps around to the
//! last-ranked one so the mapping is total and the PLCP scan needs no
//! special case.

use crate::error::Result;
use crate::index::int_vec::IntVec;
use crate::index::registry::{BuildEnv, Provider};
use crate::index::types::StructureKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct PhiProvider;

impl Provider for PhiProvider {
    fn provides(&self) -> StructureKind {
        StructureKind::PhiArray
    }

    fn strategy(&self) -> &'static str {
        "from_sa"
    }

    fn build(&self, env: &mut BuildEnv<'_>) -> Result<IntVec> {
        let sa = env.dep(StructureKind::SuffixArray);
        let n = sa.len();
        let mut phi = IntVec::with_width(n, env.initial_width());
        if let Some(words) = sa.as_native() {
            // word-aligned fast path while the suffix array is uncompressed
            let mut prev = words[n - 1];
            for &cur in words {
                phi.set(cur as usize, prev);
                prev = cur;
            }
        } else {
            let mut prev = sa.get(n - 1);
            for rank in 0..n {
                let cur = sa.get(rank);
                phi.set(cur as usize, prev);
                prev = cur;
            }
        }
        Ok(phi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::manager::SlotTable;
    use crate::index::providers::SuffixArrayProvider;
    use crate::index::types::BatchMode;

    fn build_phi(text: &[u8], compress_sa: bool) -> IntVec {
        let mut table = SlotTable::new();
        let mut sa = {
            let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
            SuffixArrayProvider.build(&mut env).unwrap()
        };
        if compress_sa {
            sa.compress_to(crate::utils::width_for_text(text.len()));
        }
        table.insert_built(StructureKind::SuffixArray, sa);

        let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
        PhiProvider.build(&mut env).unwrap()
    }

    #[test]
    fn test_banana_phi() {
        // SA = [6,5,3,1,0,4,2]: each position maps to its predecessor's
        // position, with SA[0] wrapping to SA[n-1]
        let phi = build_phi(b"banana\x00", false);
        assert_eq!(phi.to_vec(), vec![1, 3, 4, 5, 0, 6, 2]);
    }

    #[test]
    fn test_both_access_paths_agree() {
        let native = build_phi(b"abracadabra\x00", false);
        let packed = build_phi(b"abracadabra\x00", true);
        assert_eq!(native, packed);
    }
}
