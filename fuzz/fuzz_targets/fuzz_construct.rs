#![no_main]

use libfuzzer_sys::fuzz_target;
use txi::{CompressMode, EngineConfig, IndexManager, KindSet, StructureKind};

fuzz_target!(|data: &[u8]| {
    // Fuzz full construction over arbitrary bytes with the sentinel appended,
    // then check the structural invariants of the results.
    if data.len() > 1 << 14 {
        return;
    }
    let mut text = data.to_vec();
    text.push(0);
    let n = text.len();

    let mut manager = IndexManager::new(&text, &EngineConfig::default()).unwrap();
    let requested = KindSet::of(&[
        StructureKind::SuffixArray,
        StructureKind::InverseSuffixArray,
        StructureKind::LcpArray,
    ]);
    manager.require_set(requested, CompressMode::Select).unwrap();

    // the suffix array is a permutation in strict suffix order
    let sa = manager.get(StructureKind::SuffixArray);
    let mut seen = vec![false; n];
    for rank in 0..n {
        let pos = sa.get(rank) as usize;
        assert!(pos < n && !seen[pos]);
        seen[pos] = true;
    }
    for rank in 1..n {
        assert!(text[sa.get(rank - 1) as usize..] < text[sa.get(rank) as usize..]);
    }

    // the inverse really inverts
    let isa = manager.get(StructureKind::InverseSuffixArray);
    for pos in 0..n {
        assert_eq!(sa.get(isa.get(pos) as usize) as usize, pos);
    }

    // every LCP value is an actual common prefix length of adjacent suffixes
    let lcp = manager.get(StructureKind::LcpArray);
    for rank in 1..n {
        let a = &text[sa.get(rank - 1) as usize..];
        let b = &text[sa.get(rank) as usize..];
        let expected = a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count();
        assert_eq!(lcp.get(rank) as usize, expected);
    }
});
