//! PLCP array: longest-common-prefix lengths indexed by text position.
//!
//! Uses the irreducible-lcp scan over Phi: walking positions left to right,
//! the lcp value can drop by at most one per step, so the total matching
//! work is linear in the text length.

use crate::error::Result;
use crate::index::int_vec::IntVec;
use crate::index::registry::{BuildEnv, Provider};
use crate::index::types::StructureKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct PlcpProvider;

impl Provider for PlcpProvider {
    fn provides(&self) -> StructureKind {
        StructureKind::PlcpArray
    }

    fn strategy(&self) -> &'static str {
        "from_phi"
    }

    fn build(&self, env: &mut BuildEnv<'_>) -> Result<IntVec> {
        let phi = env.dep(StructureKind::PhiArray);
        let text = env.text();
        let n = text.len();
        let mut plcp = IntVec::with_width(n, env.initial_width());
        let mut l = 0usize;
        for i in 0..n {
            let j = phi.get(i) as usize;
            if j == i {
                // single-byte text: the wrap maps the position to itself
                plcp.set(i, 0);
                l = 0;
                continue;
            }
            while i + l < n && j + l < n && text[i + l] == text[j + l] {
                l += 1;
            }
            plcp.set(i, l as u64);
            l = l.saturating_sub(1);
        }
        Ok(plcp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::manager::SlotTable;
    use crate::index::providers::{PhiProvider, SuffixArrayProvider};
    use crate::index::types::BatchMode;

    fn build_plcp(text: &[u8]) -> IntVec {
        let mut table = SlotTable::new();
        let sa = {
            let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
            SuffixArrayProvider.build(&mut env).unwrap()
        };
        table.insert_built(StructureKind::SuffixArray, sa);
        let phi = {
            let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
            PhiProvider.build(&mut env).unwrap()
        };
        table.insert_built(StructureKind::PhiArray, phi);

        let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
        PlcpProvider.build(&mut env).unwrap()
    }

    #[test]
    fn test_banana_plcp() {
        // lcp of each suffix with its lexicographic predecessor, by position
        assert_eq!(build_plcp(b"banana\x00").to_vec(), vec![0, 3, 2, 1, 0, 0, 0]);
    }

    #[test]
    fn test_run_of_identical_bytes() {
        // suffix "aa..a" at position i shares i fewer characters with its
        // predecessor as i grows: PLCP = [3, 2, 1, 0, 0] for "aaaa\0"
        assert_eq!(build_plcp(b"aaaa\x00").to_vec(), vec![3, 2, 1, 0, 0]);
    }

    #[test]
    fn test_sentinel_only() {
        assert_eq!(build_plcp(b"\x00").to_vec(), vec![0]);
    }
}
