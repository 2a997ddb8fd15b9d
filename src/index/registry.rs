//! Provider capability interface and the structure registry.
//!
//! A provider is one concrete construction algorithm for one structure
//! kind. The registry holds exactly one provider instance per registered
//! kind, resolved once at engine start from configuration; lookups are a
//! plain array indexed by the kind.

use crate::error::{Error, Result};
use crate::index::int_vec::{IntVec, NATIVE_WIDTH};
use crate::index::manager::SlotTable;
use crate::index::providers::{
    InverseProvider, LcpProvider, PhiProvider, PlcpProvider, SuffixArrayProvider,
};
use crate::index::types::{BatchMode, ProvidersConfig, StructureKind};
use crate::utils::width_for_text;
use log::debug;

/// Everything a provider may touch during one build call.
///
/// The context is passed explicitly into every build; providers hold no
/// ambient state. Dependencies are read through [`BuildEnv::dep`]; the
/// scheduler guarantees they stay resident for the whole call.
pub struct BuildEnv<'a> {
    text: &'a [u8],
    mode: BatchMode,
    slots: &'a SlotTable,
    joint: Option<&'a mut (dyn JointSink + 'a)>,
}

impl<'a> BuildEnv<'a> {
    pub(crate) fn new(
        text: &'a [u8],
        mode: BatchMode,
        slots: &'a SlotTable,
        joint: Option<&'a mut (dyn JointSink + 'a)>,
    ) -> Self {
        Self {
            text,
            mode,
            slots,
            joint,
        }
    }

    /// The input text, sentinel included.
    #[inline]
    pub fn text(&self) -> &'a [u8] {
        self.text
    }

    /// Batch-wide compress mode.
    #[inline]
    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// Element width a provider should allocate its output at: the minimum
    /// width for the text under `Compressed`, native word width otherwise.
    pub fn initial_width(&self) -> u32 {
        match self.mode {
            BatchMode::Compressed => width_for_text(self.text.len()),
            _ => NATIVE_WIDTH,
        }
    }

    /// A dependency structure, resident for the duration of the build.
    ///
    /// Panics if the scheduler failed to make the dependency resident
    /// first; that is an engine bug, not a caller error.
    pub fn dep(&self, kind: StructureKind) -> &IntVec {
        self.slots
            .built(kind)
            .unwrap_or_else(|| panic!("dependency {kind} not resident during build"))
    }

    /// Takes the optional joint sink out of the context.
    ///
    /// The sink, when present, is populated during the provider's primary
    /// write pass (see the suffix-array provider). At most one consumer.
    pub fn take_joint(&mut self) -> Option<&'a mut (dyn JointSink + 'a)> {
        self.joint.take()
    }
}

/// Hooks for building a second structure inside another provider's write
/// pass, avoiding a separate linear scan over the finished result.
pub trait JointSink {
    /// Called once before the first write, with the output length.
    fn init(&mut self, len: usize);

    /// Called for every slot written as `primary[rank] = pos`.
    fn write(&mut self, rank: u64, pos: u64);
}

/// One concrete construction algorithm for one structure kind.
pub trait Provider {
    /// The kind this provider constructs.
    fn provides(&self) -> StructureKind;

    /// Strategy name as it appears in configuration.
    fn strategy(&self) -> &'static str;

    /// Builds the structure. Dependencies are resident in `env`.
    fn build(&self, env: &mut BuildEnv<'_>) -> Result<IntVec>;
}

/// Holds one provider instance per registered structure kind.
pub struct Registry {
    providers: [Option<Box<dyn Provider>>; StructureKind::COUNT],
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry").finish_non_exhaustive()
    }
}

impl Registry {
    /// A registry with no providers.
    pub fn empty() -> Self {
        Self {
            providers: std::array::from_fn(|_| None),
        }
    }

    /// The default provider set.
    pub fn with_defaults() -> Self {
        let mut registry = Self::empty();
        registry.register(Box::new(SuffixArrayProvider));
        registry.register(Box::new(InverseProvider));
        registry.register(Box::new(PhiProvider));
        registry.register(Box::new(PlcpProvider));
        registry.register(Box::new(LcpProvider));
        registry
    }

    /// Resolves the configured strategy names into provider instances.
    ///
    /// Fails with [`Error::UnknownStrategy`] before any construction when a
    /// name does not match a known provider.
    pub fn from_config(config: &ProvidersConfig) -> Result<Self> {
        let mut registry = Self::empty();
        registry.register(resolve_strategy(
            StructureKind::SuffixArray,
            &config.suffix_array,
        )?);
        registry.register(resolve_strategy(
            StructureKind::InverseSuffixArray,
            &config.inverse_suffix_array,
        )?);
        registry.register(resolve_strategy(StructureKind::PhiArray, &config.phi_array)?);
        registry.register(resolve_strategy(
            StructureKind::PlcpArray,
            &config.plcp_array,
        )?);
        registry.register(resolve_strategy(StructureKind::LcpArray, &config.lcp_array)?);
        Ok(registry)
    }

    /// Registers `provider`, replacing any previous provider for its kind.
    pub fn register(&mut self, provider: Box<dyn Provider>) {
        debug!(
            "registering provider `{}` for {}",
            provider.strategy(),
            provider.provides()
        );
        let slot = provider.provides().index();
        self.providers[slot] = Some(provider);
    }

    /// Whether a provider is registered for `kind`.
    pub fn contains(&self, kind: StructureKind) -> bool {
        self.providers[kind.index()].is_some()
    }

    /// The provider for `kind`, or [`Error::NoProvider`].
    pub fn get(&self, kind: StructureKind) -> Result<&dyn Provider> {
        self.providers[kind.index()]
            .as_deref()
            .ok_or(Error::NoProvider(kind))
    }
}

fn resolve_strategy(kind: StructureKind, name: &str) -> Result<Box<dyn Provider>> {
    use crate::index::types::StructureKind::*;
    match (kind, name) {
        (SuffixArray, "parallel_sort") => Ok(Box::new(SuffixArrayProvider)),
        (InverseSuffixArray, "from_sa") => Ok(Box::new(InverseProvider)),
        (PhiArray, "from_sa") => Ok(Box::new(PhiProvider)),
        (PlcpArray, "from_phi") => Ok(Box::new(PlcpProvider)),
        (LcpArray, "from_plcp") => Ok(Box::new(LcpProvider)),
        _ => Err(Error::UnknownStrategy {
            kind,
            name: name.to_string(),
        }),
    }
}
