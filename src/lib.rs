//! # TXI - Text Index Construction Engine
//!
//! TXI is an in-memory construction engine for the succinct full-text index
//! structures compressors build on: the suffix array, its inverse, the Phi
//! array, and the position- and rank-indexed longest-common-prefix arrays.
//! It builds exactly the structures a caller requests, in dependency order,
//! and keeps peak memory low by discarding intermediates the moment their
//! last reader has finished and bit-compressing what remains.
//!
//! ## Architecture
//!
//! The crate is organized into these main modules:
//!
//! - [`index::types`] - Structure kinds, request sets, compress modes
//! - [`index::int_vec`] - Native-or-packed integer vectors
//! - [`index::registry`] - Provider interface and registry
//! - [`index::scheduler`] - Dependency-ordered construction planning
//! - [`index::manager`] - Lifecycle façade (`require`, take, release, print)
//! - [`index::providers`] - Default construction algorithms per kind
//!
//! ## Quick Start
//!
//! ```
//! use txi::{CompressMode, EngineConfig, IndexManager, KindSet, StructureKind};
//!
//! // every input ends with the 0x00 sentinel
//! let text = b"banana\x00";
//! let mut manager = IndexManager::new(text, &EngineConfig::default()).unwrap();
//!
//! // one batch: request the LCP array, dependencies are handled internally
//! let requested = KindSet::of(&[StructureKind::LcpArray]);
//! manager.require_set(requested, CompressMode::Select).unwrap();
//!
//! let lcp = manager.get(StructureKind::LcpArray);
//! assert_eq!(lcp.to_vec(), vec![0, 0, 1, 3, 0, 0, 2]);
//! ```
//!
//! ## Memory Behavior
//!
//! Requesting only the LCP array constructs the suffix array, Phi, and PLCP
//! as intermediates and discards each one as soon as the chain no longer
//! needs it; under the default `delayed` compress mode the retained result
//! is re-encoded at the minimum bit width for the text.

pub mod error;
pub mod index;
pub mod utils;

pub use error::{Error, Result};
pub use index::int_vec::{IntVec, NATIVE_WIDTH};
pub use index::manager::{IndexManager, SlotStatus, StructureStats, TakenData};
pub use index::providers::{
    InverseProvider, LcpProvider, PhiProvider, PlcpProvider, SuffixArrayProvider,
};
pub use index::registry::{BuildEnv, JointSink, Provider, Registry};
pub use index::types::{
    BatchMode, CompressMode, EngineConfig, KindSet, ProvidersConfig, StructureKind, SENTINEL_BYTE,
};
