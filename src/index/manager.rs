//! The index manager: the façade compressors use.
//!
//! The manager owns the live set of constructed structures and drives the
//! scheduler and compress-mode policy for each construction batch.
//! Structures are exclusively owned by the manager until released or
//! discarded; the input text is borrowed read-only for the manager's
//! lifetime. Everything runs synchronously on the calling thread: a build
//! either completes or fails the whole batch.

use crate::error::{Error, Result};
use crate::index::int_vec::{IntVec, NATIVE_WIDTH};
use crate::index::registry::{BuildEnv, JointSink, Registry};
use crate::index::scheduler;
use crate::index::types::{
    BatchMode, CompressMode, EngineConfig, KindSet, StructureKind, SENTINEL_BYTE,
};
use crate::utils::{decimal_digits, width_for_text};
use log::debug;
use std::io::{self, Write};

/// Observable lifecycle state of one structure slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotStatus {
    /// Never constructed (or not since the last discard/release).
    Unbuilt,
    /// Resident and readable.
    Built { compressed: bool },
    /// Dropped; readable again only after a rebuild.
    Discarded,
    /// Ownership transferred out; readable again only after a rebuild.
    Released,
}

/// Data extracted by [`IndexManager::take_in_place`].
#[derive(Debug)]
pub enum TakenData {
    /// The structure is in the batch's request set: the caller gets a copy
    /// and the slot stays live.
    Copied(IntVec),
    /// The structure is not requested: the data moved out and the slot was
    /// discarded.
    Moved(IntVec),
}

impl TakenData {
    /// The extracted data, however it was obtained.
    pub fn into_inner(self) -> IntVec {
        match self {
            TakenData::Copied(data) | TakenData::Moved(data) => data,
        }
    }
}

/// Statistics for one structure slot.
#[derive(Debug, Clone)]
pub struct StructureStats {
    pub kind: StructureKind,
    pub status: SlotStatus,
    pub len: usize,
    pub width: u32,
    pub heap_bytes: usize,
}

enum Slot {
    Unbuilt,
    Built { data: IntVec, compressed: bool },
    Discarded,
    Released,
}

impl Slot {
    fn is_built(&self) -> bool {
        matches!(self, Slot::Built { .. })
    }
}

/// Read view over the built slots, handed to providers during builds.
pub(crate) struct SlotTable {
    slots: [Slot; StructureKind::COUNT],
}

impl SlotTable {
    pub(crate) fn new() -> Self {
        Self {
            slots: std::array::from_fn(|_| Slot::Unbuilt),
        }
    }

    /// The built structure for `kind`, if resident.
    pub(crate) fn built(&self, kind: StructureKind) -> Option<&IntVec> {
        match &self.slots[kind.index()] {
            Slot::Built { data, .. } => Some(data),
            _ => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn insert_built(&mut self, kind: StructureKind, data: IntVec) {
        self.slots[kind.index()] = Slot::Built {
            data,
            compressed: false,
        };
    }
}

/// Populates the inverse suffix array inside the suffix-array write pass.
struct InverseSink<'a> {
    out: &'a mut Option<IntVec>,
    width: u32,
}

impl JointSink for InverseSink<'_> {
    fn init(&mut self, len: usize) {
        *self.out = Some(IntVec::with_width(len, self.width));
    }

    fn write(&mut self, rank: u64, pos: u64) {
        if let Some(inverse) = self.out.as_mut() {
            inverse.set(pos as usize, rank);
        }
    }
}

/// Manages text index structures and their construction.
pub struct IndexManager<'t> {
    text: &'t [u8],
    registry: Registry,
    ambient: CompressMode,
    requested: KindSet,
    table: SlotTable,
}

impl std::fmt::Debug for IndexManager<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexManager").finish_non_exhaustive()
    }
}

impl<'t> IndexManager<'t> {
    /// Creates a manager over `text` with providers resolved from `config`.
    ///
    /// Fails fast with [`Error::MissingSentinel`] unless `text` ends with
    /// the sentinel terminator; nothing is constructed before that check.
    pub fn new(text: &'t [u8], config: &EngineConfig) -> Result<Self> {
        let registry = Registry::from_config(&config.providers)?;
        Self::with_registry(text, config.compress, registry)
    }

    /// Creates a manager with an explicit provider registry.
    pub fn with_registry(
        text: &'t [u8],
        ambient: CompressMode,
        registry: Registry,
    ) -> Result<Self> {
        if text.last() != Some(&SENTINEL_BYTE) {
            return Err(Error::MissingSentinel);
        }
        debug_assert!(
            ambient != CompressMode::Select,
            "ambient mode must be concrete"
        );
        Ok(Self {
            text,
            registry,
            ambient,
            requested: KindSet::EMPTY,
            table: SlotTable::new(),
        })
    }

    /// The input text, sentinel included.
    #[inline]
    pub fn text(&self) -> &'t [u8] {
        self.text
    }

    /// Text length in bytes, sentinel included. Every structure built by
    /// this manager has exactly this many elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte of the input text at position `i`.
    #[inline]
    pub fn byte(&self, i: usize) -> u8 {
        self.text[i]
    }

    /// The request set of the current batch.
    pub fn requested(&self) -> KindSet {
        self.requested
    }

    /// Lifecycle state of `kind`'s slot.
    pub fn status(&self, kind: StructureKind) -> SlotStatus {
        match self.slot(kind) {
            Slot::Unbuilt => SlotStatus::Unbuilt,
            Slot::Built { compressed, .. } => SlotStatus::Built {
                compressed: *compressed,
            },
            Slot::Discarded => SlotStatus::Discarded,
            Slot::Released => SlotStatus::Released,
        }
    }

    /// Ensures `kind` is built and returns it.
    ///
    /// When the slot is not resident, this runs one construction batch for
    /// `kind` together with everything currently retained, so structures a
    /// previous batch kept alive stay alive. A discarded or released slot
    /// is rebuilt from scratch.
    pub fn require(&mut self, kind: StructureKind, mode: CompressMode) -> Result<&IntVec> {
        if !self.slot(kind).is_built() {
            self.requested = self.retained().with(kind);
            let requested = self.requested;
            self.run_batch(requested, mode)?;
        }
        Ok(self.get(kind))
    }

    /// Runs one construction batch for an explicit request set.
    ///
    /// Structures built only to satisfy dependencies are discarded as soon
    /// as their last in-batch reader finishes building, bounding peak
    /// memory to the requested structures plus live dependencies.
    pub fn require_set(&mut self, requested: KindSet, mode: CompressMode) -> Result<()> {
        self.requested = requested;
        self.run_batch(requested, mode)
    }

    /// Read access to a built structure without triggering construction.
    ///
    /// Panics on a slot that is unbuilt, discarded, or released: reading a
    /// structure after giving it up is a programming error. Use
    /// [`IndexManager::require`] to (re)build lazily instead.
    pub fn get(&self, kind: StructureKind) -> &IntVec {
        match self.slot(kind) {
            Slot::Built { data, .. } => data,
            Slot::Unbuilt => panic!("{kind} was never built"),
            Slot::Discarded | Slot::Released => {
                panic!("use after release: {kind} was given up without a rebuild")
            }
        }
    }

    /// Takes the data of `kind`: a copy when the kind is in the current
    /// request set (the slot stays live), the moved-out data otherwise
    /// (the slot is discarded).
    ///
    /// Building `kind` on demand does not alter the batch's request set —
    /// a structure extracted this way without being requested stays an
    /// intermediate.
    pub fn take_in_place(&mut self, kind: StructureKind, mode: CompressMode) -> Result<TakenData> {
        if !self.slot(kind).is_built() {
            let keep = self.retained().with(kind);
            self.run_batch(keep, mode)?;
        }
        if self.requested.contains(kind) {
            Ok(TakenData::Copied(self.get(kind).clone()))
        } else {
            Ok(TakenData::Moved(self.take_slot(kind)))
        }
    }

    /// Moves the whole structure out of the manager.
    ///
    /// Panics when `kind` was never built: releasing an unbuilt structure
    /// is a programming error, not a recoverable condition.
    pub fn release(&mut self, kind: StructureKind) -> IntVec {
        assert!(
            self.slot(kind).is_built(),
            "release of unbuilt structure {kind}"
        );
        match std::mem::replace(&mut self.table.slots[kind.index()], Slot::Released) {
            Slot::Built { data, .. } => data,
            _ => unreachable!(),
        }
    }

    /// Moves `kind`'s data out and marks the slot discarded.
    fn take_slot(&mut self, kind: StructureKind) -> IntVec {
        match std::mem::replace(&mut self.table.slots[kind.index()], Slot::Discarded) {
            Slot::Built { data, .. } => data,
            _ => unreachable!(),
        }
    }

    /// Drops `kind` early, regardless of request-set membership.
    pub fn discard(&mut self, kind: StructureKind) {
        if self.slot(kind).is_built() {
            debug!("discarding {kind}");
            self.table.slots[kind.index()] = Slot::Discarded;
        }
    }

    /// Per-structure statistics for all slots.
    pub fn stats(&self) -> Vec<StructureStats> {
        StructureKind::ALL
            .into_iter()
            .map(|kind| {
                let (len, width, heap_bytes) = match self.table.built(kind) {
                    Some(data) => (data.len(), data.width(), data.heap_bytes()),
                    None => (0, 0, 0),
                };
                StructureStats {
                    kind,
                    status: self.status(kind),
                    len,
                    width,
                    heap_bytes,
                }
            })
            .collect()
    }

    /// Writes an aligned table of all currently built structures.
    ///
    /// Position values (i, SA, ISA, Phi) are rebased by `base` for display
    /// (e.g. `base = 1` for 1-indexed output); length values (PLCP, LCP)
    /// print as stored. Columns for unbuilt structures are omitted.
    pub fn print(&self, out: &mut dyn Write, base: u64) -> io::Result<()> {
        let n = self.len();
        let w = decimal_digits(n as u64 + base).max(8);
        let built: Vec<(StructureKind, &IntVec)> = StructureKind::ALL
            .into_iter()
            .filter_map(|kind| self.table.built(kind).map(|data| (kind, data)))
            .collect();

        // heading
        write!(out, "{:>w$} | ", "i")?;
        for (kind, _) in &built {
            write!(out, "{:>w$} | ", format!("{}[i]", kind.label()))?;
        }
        writeln!(out)?;

        // separator
        let dash = "-".repeat(w);
        write!(out, "{dash}-|-")?;
        for _ in &built {
            write!(out, "{dash}-|-")?;
        }
        writeln!(out)?;

        // body
        for i in 0..n {
            write!(out, "{:>w$} | ", i as u64 + base)?;
            for (kind, data) in &built {
                let value = data.get(i);
                let shown = if kind.holds_positions() { value + base } else { value };
                write!(out, "{shown:>w$} | ")?;
            }
            writeln!(out)?;
        }
        Ok(())
    }

    // batch machinery

    fn slot(&self, kind: StructureKind) -> &Slot {
        &self.table.slots[kind.index()]
    }

    /// Kinds currently built and part of the request set.
    fn retained(&self) -> KindSet {
        self.requested
            .iter()
            .filter(|kind| self.slot(*kind).is_built())
            .collect()
    }

    /// Builds everything in the dependency order of `keep`, discarding or
    /// compressing structures as their last pending reader finishes.
    fn run_batch(&mut self, keep: KindSet, mode: CompressMode) -> Result<()> {
        let resolved = mode.resolve(self.ambient);
        let order = scheduler::schedule(&self.registry, keep)?;
        let batch = scheduler::promote(resolved, &order);
        debug!("construction order {order:?} under {batch:?}");
        for step in 0..order.len() {
            let kind = order[step];
            if !self.slot(kind).is_built() {
                self.construct(kind, batch, &order[step + 1..])?;
            }
            self.reclaim(&order[step + 1..], keep, batch);
        }
        Ok(())
    }

    /// Builds one structure via its provider.
    ///
    /// When the suffix array is being built and the inverse is scheduled
    /// later in the same batch, the inverse is populated just in time in
    /// the suffix array's own write pass and the separate inverse build is
    /// skipped entirely.
    fn construct(
        &mut self,
        kind: StructureKind,
        batch: BatchMode,
        rest: &[StructureKind],
    ) -> Result<()> {
        debug!("constructing {kind}");
        let want_joint = kind == StructureKind::SuffixArray
            && rest.contains(&StructureKind::InverseSuffixArray)
            && !self.slot(StructureKind::InverseSuffixArray).is_built();
        let width = match batch {
            BatchMode::Compressed => width_for_text(self.text.len()),
            _ => NATIVE_WIDTH,
        };

        let mut joint_out: Option<IntVec> = None;
        let provider = self.registry.get(kind)?;
        let data = {
            let mut sink = want_joint.then(|| InverseSink {
                out: &mut joint_out,
                width,
            });
            let joint = sink
                .as_mut()
                .map(|sink| sink as &mut (dyn JointSink + '_));
            let mut env = BuildEnv::new(self.text, batch, &self.table, joint);
            provider.build(&mut env)?
        };

        self.store(kind, data, batch);
        if let Some(inverse) = joint_out.take() {
            debug!("inverse suffix array built just in time");
            self.store(StructureKind::InverseSuffixArray, inverse, batch);
        }
        Ok(())
    }

    fn store(&mut self, kind: StructureKind, data: IntVec, batch: BatchMode) {
        // under Compressed the provider already wrote minimum-width storage
        let compressed = batch == BatchMode::Compressed;
        self.table.slots[kind.index()] = Slot::Built { data, compressed };
    }

    /// Discards or compresses resident structures with no pending reader.
    fn reclaim(&mut self, rest: &[StructureKind], keep: KindSet, batch: BatchMode) {
        let pending: KindSet = rest
            .iter()
            .copied()
            .filter(|kind| !self.slot(*kind).is_built())
            .collect();
        for kind in StructureKind::ALL {
            if !self.slot(kind).is_built() {
                continue;
            }
            if !scheduler::no_pending_reader(kind, pending) {
                continue;
            }
            if !keep.contains(kind) {
                debug!("reclaiming intermediate {kind}");
                self.discard(kind);
            } else if matches!(batch, BatchMode::Delayed | BatchMode::CoherentDelayed) {
                self.compress_slot(kind);
            }
        }
    }

    /// Bit-compresses a built structure once; later calls are no-ops.
    fn compress_slot(&mut self, kind: StructureKind) {
        let width = width_for_text(self.text.len());
        if let Slot::Built { data, compressed } = &mut self.table.slots[kind.index()] {
            if !*compressed {
                debug!("bit-compressing {kind} to {width} bits");
                data.compress_to(width);
                *compressed = true;
            }
        }
    }
}
