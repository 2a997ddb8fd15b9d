//! LCP array: longest-common-prefix lengths in suffix-rank order.
//!
//! Permutes the position-indexed PLCP values into rank order through the
//! suffix array, in one linear pass.

use crate::error::Result;
use crate::index::int_vec::IntVec;
use crate::index::registry::{BuildEnv, Provider};
use crate::index::types::StructureKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct LcpProvider;

impl Provider for LcpProvider {
    fn provides(&self) -> StructureKind {
        StructureKind::LcpArray
    }

    fn strategy(&self) -> &'static str {
        "from_plcp"
    }

    fn build(&self, env: &mut BuildEnv<'_>) -> Result<IntVec> {
        let sa = env.dep(StructureKind::SuffixArray);
        let plcp = env.dep(StructureKind::PlcpArray);
        let n = sa.len();
        let mut lcp = IntVec::with_width(n, env.initial_width());
        // the first-ranked suffix has no predecessor
        lcp.set(0, 0);
        for rank in 1..n {
            lcp.set(rank, plcp.get(sa.get(rank) as usize));
        }
        Ok(lcp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::manager::SlotTable;
    use crate::index::providers::{PhiProvider, PlcpProvider, SuffixArrayProvider};
    use crate::index::types::BatchMode;

    fn build_lcp(text: &[u8]) -> IntVec {
        let mut table = SlotTable::new();
        for provider in [
            &SuffixArrayProvider as &dyn Provider,
            &PhiProvider,
            &PlcpProvider,
        ] {
            let built = {
                let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
                provider.build(&mut env).unwrap()
            };
            table.insert_built(provider.provides(), built);
        }

        let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
        LcpProvider.build(&mut env).unwrap()
    }

    #[test]
    fn test_banana_lcp() {
        // suffixes in rank order: \0, a\0, ana\0, anana\0, banana\0, na\0, nana\0
        // adjacent common prefixes:  -, 0,  1,    3,      0,       0,   2
        assert_eq!(build_lcp(b"banana\x00").to_vec(), vec![0, 0, 1, 3, 0, 0, 2]);
    }

    #[test]
    fn test_run_of_identical_bytes() {
        assert_eq!(build_lcp(b"aaaa\x00").to_vec(), vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_first_rank_is_zero() {
        for text in [&b"banana\x00"[..], b"mississippi\x00", b"\x00"] {
            assert_eq!(build_lcp(text).get(0), 0);
        }
    }
}
