//! Dependency-ordered construction planning.
//!
//! [`schedule`] expands a request set to its transitive dependency closure
//! and orders it so every kind appears after everything it depends on; ties
//! between independent kinds break by ascending kind index, so plans are
//! reproducible. The reclaim rule ([`no_pending_reader`]) bounds peak
//! memory: after every build step, a resident structure with no pending
//! reader is either discarded (not requested) or handed to compression
//! (requested, delayed modes).

use crate::error::{Error, Result};
use crate::index::registry::Registry;
use crate::index::types::{BatchMode, CompressMode, KindSet, StructureKind};

/// Computes the construction order for `requested`.
///
/// The order contains the transitive dependency closure of the request set,
/// topologically sorted. Fails with [`Error::NoProvider`] when any kind in
/// the closure has no registered provider.
pub fn schedule(registry: &Registry, requested: KindSet) -> Result<Vec<StructureKind>> {
    // transitive dependency closure
    let mut closure = requested;
    loop {
        let mut grew = false;
        for kind in closure.iter() {
            for &dep in kind.dependencies() {
                if !closure.contains(dep) {
                    closure = closure.with(dep);
                    grew = true;
                }
            }
        }
        if !grew {
            break;
        }
    }

    for kind in closure.iter() {
        if !registry.contains(kind) {
            return Err(Error::NoProvider(kind));
        }
    }

    // topological order; sweeping in ascending kind index yields the
    // deterministic tie-break between independent kinds
    let mut order = Vec::with_capacity(closure.len());
    let mut placed = KindSet::EMPTY;
    while placed != closure {
        for kind in closure.iter() {
            if placed.contains(kind) {
                continue;
            }
            if kind.dependencies().iter().all(|dep| placed.contains(*dep)) {
                order.push(kind);
                placed = placed.with(kind);
            }
        }
    }
    Ok(order)
}

/// Derives the batch-wide mode from the resolved compress mode.
///
/// `Delayed` is promoted to `CoherentDelayed` when the construction order
/// contains interdependent kinds: compressing a dependency while a
/// dependent still reads it during construction would break the width
/// assumptions of the dependent's build.
pub(crate) fn promote(resolved: CompressMode, order: &[StructureKind]) -> BatchMode {
    match resolved {
        CompressMode::Plain => BatchMode::Plain,
        CompressMode::Compressed => BatchMode::Compressed,
        CompressMode::Delayed => {
            let members: KindSet = order.iter().copied().collect();
            let interdependent = order
                .iter()
                .any(|kind| kind.dependencies().iter().any(|dep| members.contains(*dep)));
            if interdependent {
                BatchMode::CoherentDelayed
            } else {
                BatchMode::Delayed
            }
        }
        CompressMode::Select => unreachable!("Select must be resolved before promotion"),
    }
}

/// True when no kind in `pending` still reads `kind` during its own build.
pub(crate) fn no_pending_reader(kind: StructureKind, pending: KindSet) -> bool {
    pending.iter().all(|p| !p.dependencies().contains(&kind))
}
