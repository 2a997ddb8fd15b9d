//! Inverse suffix array as the inverse permutation of the suffix array.
//!
//! This provider only runs when the inverse was not already populated
//! jointly during the suffix array's own write pass (e.g. when the suffix
//! array survives from an earlier batch).

use crate::error::Result;
use crate::index::int_vec::IntVec;
use crate::index::registry::{BuildEnv, Provider};
use crate::index::types::StructureKind;

#[derive(Debug, Clone, Copy, Default)]
pub struct InverseProvider;

impl Provider for InverseProvider {
    fn provides(&self) -> StructureKind {
        StructureKind::InverseSuffixArray
    }

    fn strategy(&self) -> &'static str {
        "from_sa"
    }

    fn build(&self, env: &mut BuildEnv<'_>) -> Result<IntVec> {
        let sa = env.dep(StructureKind::SuffixArray);
        let n = sa.len();
        let mut inverse = IntVec::with_width(n, env.initial_width());
        for rank in 0..n {
            inverse.set(sa.get(rank) as usize, rank as u64);
        }
        Ok(inverse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::manager::SlotTable;
    use crate::index::providers::SuffixArrayProvider;
    use crate::index::types::BatchMode;

    #[test]
    fn test_inverts_the_suffix_array() {
        let text = b"banana\x00";
        let mut table = SlotTable::new();
        let sa = {
            let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
            SuffixArrayProvider.build(&mut env).unwrap()
        };
        table.insert_built(StructureKind::SuffixArray, sa);

        let mut env = BuildEnv::new(text, BatchMode::Plain, &table, None);
        let isa = InverseProvider.build(&mut env).unwrap();
        assert_eq!(isa.to_vec(), vec![4, 3, 6, 2, 5, 1, 0]);

        // composing both permutations yields the identity
        let sa = env.dep(StructureKind::SuffixArray);
        for i in 0..text.len() {
            assert_eq!(sa.get(isa.get(i) as usize) as usize, i);
        }
    }
}
