//! Core types for the construction engine.
//!
//! This module defines the structure kinds the engine can build, the small
//! bit-set used for request sets, the compress-mode policy types, and the
//! engine configuration surface.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel byte terminating every input text.
///
/// 0x00 sorts below every content byte, so the sentinel suffix is always
/// lexicographically smallest and every suffix comparison terminates.
pub const SENTINEL_BYTE: u8 = 0x00;

/// The structure kinds the engine can construct.
///
/// The discriminant doubles as the slot index and as the deterministic
/// tie-break order between independent kinds in a construction plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum StructureKind {
    /// Text offsets sorted by the suffix starting at each offset.
    SuffixArray = 0,
    /// Maps a text offset to its rank in suffix order.
    InverseSuffixArray = 1,
    /// Maps a text position to the position of its lexicographic
    /// predecessor suffix.
    PhiArray = 2,
    /// Longest-common-prefix lengths indexed by text position.
    PlcpArray = 3,
    /// Longest-common-prefix lengths indexed by suffix rank.
    LcpArray = 4,
}

impl StructureKind {
    /// All kinds in ascending index order.
    pub const ALL: [StructureKind; 5] = [
        StructureKind::SuffixArray,
        StructureKind::InverseSuffixArray,
        StructureKind::PhiArray,
        StructureKind::PlcpArray,
        StructureKind::LcpArray,
    ];

    /// Number of structure kinds.
    pub const COUNT: usize = 5;

    /// Stable slot index of this kind.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Kinds that must be resident while this kind builds.
    ///
    /// The LCP provider permutes PLCP values through the suffix array, so
    /// the suffix array must survive until the LCP array is built.
    pub fn dependencies(self) -> &'static [StructureKind] {
        use StructureKind::*;
        match self {
            SuffixArray => &[],
            InverseSuffixArray => &[SuffixArray],
            PhiArray => &[SuffixArray],
            PlcpArray => &[PhiArray],
            LcpArray => &[PlcpArray, SuffixArray],
        }
    }

    /// Short name used in configuration and CLI arguments.
    pub fn name(self) -> &'static str {
        match self {
            StructureKind::SuffixArray => "sa",
            StructureKind::InverseSuffixArray => "isa",
            StructureKind::PhiArray => "phi",
            StructureKind::PlcpArray => "plcp",
            StructureKind::LcpArray => "lcp",
        }
    }

    /// Display label, as used in diagnostic table headers.
    pub fn label(self) -> &'static str {
        match self {
            StructureKind::SuffixArray => "SA",
            StructureKind::InverseSuffixArray => "ISA",
            StructureKind::PhiArray => "Phi",
            StructureKind::PlcpArray => "PLCP",
            StructureKind::LcpArray => "LCP",
        }
    }

    /// Whether this kind stores text positions or ranks (rebased for
    /// display) rather than lengths.
    pub fn holds_positions(self) -> bool {
        matches!(
            self,
            StructureKind::SuffixArray
                | StructureKind::InverseSuffixArray
                | StructureKind::PhiArray
        )
    }
}

impl fmt::Display for StructureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for StructureKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StructureKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| {
                format!("unknown structure kind `{s}` (expected sa, isa, phi, plcp or lcp)")
            })
    }
}

/// A set of structure kinds, one bit per kind.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct KindSet(u8);

impl KindSet {
    /// The empty set.
    pub const EMPTY: KindSet = KindSet(0);

    /// Builds a set from a slice of kinds.
    pub fn of(kinds: &[StructureKind]) -> Self {
        kinds.iter().copied().collect()
    }

    /// This set with `kind` added.
    #[inline]
    pub fn with(self, kind: StructureKind) -> Self {
        KindSet(self.0 | (1 << kind.index()))
    }

    #[inline]
    pub fn contains(self, kind: StructureKind) -> bool {
        self.0 & (1 << kind.index()) != 0
    }

    /// Union of two sets.
    #[inline]
    pub fn union(self, other: KindSet) -> Self {
        KindSet(self.0 | other.0)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of kinds in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the members in ascending index order.
    pub fn iter(self) -> impl Iterator<Item = StructureKind> {
        StructureKind::ALL.into_iter().filter(move |k| self.contains(*k))
    }
}

impl FromIterator<StructureKind> for KindSet {
    fn from_iter<I: IntoIterator<Item = StructureKind>>(iter: I) -> Self {
        iter.into_iter().fold(KindSet::EMPTY, KindSet::with)
    }
}

impl fmt::Debug for KindSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Space/time tradeoff for structure storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompressMode {
    /// Structures stay at native width (fastest).
    #[serde(rename = "none")]
    Plain,
    /// Bit-compress each structure once nothing still under construction
    /// reads it (balanced).
    #[default]
    Delayed,
    /// Construct directly in bit-compressed space (lowest peak memory,
    /// slower without word-aligned access).
    Compressed,
    /// Defer to the ambient batch default. Call-site only; never valid in
    /// configuration.
    #[serde(skip)]
    Select,
}

impl CompressMode {
    /// Resolves a per-call override against the ambient default.
    #[inline]
    pub fn resolve(self, ambient: CompressMode) -> CompressMode {
        match self {
            CompressMode::Select => ambient,
            mode => mode,
        }
    }
}

impl FromStr for CompressMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(CompressMode::Plain),
            "delayed" => Ok(CompressMode::Delayed),
            "compressed" => Ok(CompressMode::Compressed),
            _ => Err(format!(
                "unknown compress mode `{s}` (expected none, delayed or compressed)"
            )),
        }
    }
}

/// Batch-wide mode derived from the resolved [`CompressMode`].
///
/// `CoherentDelayed` marks a batch whose construction order contains
/// interdependent kinds: bit-compression of a structure must wait until the
/// last kind that reads it during its own build has finished building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchMode {
    Plain,
    Delayed,
    CoherentDelayed,
    Compressed,
}

/// Configuration for the construction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Ambient compress mode, applied whenever a call passes
    /// [`CompressMode::Select`].
    pub compress: CompressMode,
    /// Strategy selection, one provider per structure kind.
    pub providers: ProvidersConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            compress: CompressMode::Delayed,
            providers: ProvidersConfig::default(),
        }
    }
}

/// One strategy name per structure kind.
///
/// Exactly one provider is registered per kind; the names exist so a
/// surrounding configuration layer can swap implementations without code
/// changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub suffix_array: String,
    pub inverse_suffix_array: String,
    pub phi_array: String,
    pub plcp_array: String,
    pub lcp_array: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            suffix_array: "parallel_sort".to_string(),
            inverse_suffix_array: "from_sa".to_string(),
            phi_array: "from_sa".to_string(),
            plcp_array: "from_phi".to_string(),
            lcp_array: "from_plcp".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_set_basics() {
        let set = KindSet::of(&[StructureKind::SuffixArray, StructureKind::LcpArray]);
        assert!(set.contains(StructureKind::SuffixArray));
        assert!(set.contains(StructureKind::LcpArray));
        assert!(!set.contains(StructureKind::PhiArray));
        assert_eq!(set.len(), 2);
        assert!(!set.is_empty());
        assert!(KindSet::EMPTY.is_empty());
    }

    #[test]
    fn test_kind_set_iterates_in_index_order() {
        let set = KindSet::of(&[StructureKind::LcpArray, StructureKind::SuffixArray]);
        let kinds: Vec<_> = set.iter().collect();
        assert_eq!(kinds, vec![StructureKind::SuffixArray, StructureKind::LcpArray]);
    }

    #[test]
    fn test_kind_set_union() {
        let a = KindSet::of(&[StructureKind::SuffixArray]);
        let b = KindSet::of(&[StructureKind::PhiArray]);
        let u = a.union(b);
        assert_eq!(u.len(), 2);
        assert!(u.contains(StructureKind::SuffixArray));
        assert!(u.contains(StructureKind::PhiArray));
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("sa".parse::<StructureKind>().unwrap(), StructureKind::SuffixArray);
        assert_eq!("plcp".parse::<StructureKind>().unwrap(), StructureKind::PlcpArray);
        assert!("suffix".parse::<StructureKind>().is_err());
    }

    #[test]
    fn test_resolve_select_defers_to_ambient() {
        assert_eq!(
            CompressMode::Select.resolve(CompressMode::Compressed),
            CompressMode::Compressed
        );
        assert_eq!(
            CompressMode::Plain.resolve(CompressMode::Compressed),
            CompressMode::Plain
        );
    }

    #[test]
    fn test_compress_mode_from_str() {
        assert_eq!("none".parse::<CompressMode>().unwrap(), CompressMode::Plain);
        assert_eq!("delayed".parse::<CompressMode>().unwrap(), CompressMode::Delayed);
        assert!("select".parse::<CompressMode>().is_err());
    }

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.compress, CompressMode::Delayed);
        assert_eq!(config.providers.suffix_array, "parallel_sort");
    }

    #[test]
    fn test_config_serde_round_trip() {
        let json = r#"{"compress":"compressed","providers":{"lcp_array":"from_plcp"}}"#;
        let config: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.compress, CompressMode::Compressed);
        // omitted provider entries fall back to defaults
        assert_eq!(config.providers.phi_array, "from_sa");

        let back = serde_json::to_string(&config).unwrap();
        assert!(back.contains("\"compressed\""));
    }

    #[test]
    fn test_dependencies_are_acyclic() {
        // every dependency has a strictly smaller index
        for kind in StructureKind::ALL {
            for dep in kind.dependencies() {
                assert!(dep.index() < kind.index(), "{dep} must precede {kind}");
            }
        }
    }
}
