//! The crate-wide error type.
//!
//! Every failure the engine reports is fatal for its construction batch:
//! there are no retries and no partial success. Programming errors (reading
//! a released structure, releasing an unbuilt one) panic instead of
//! returning an error; see [`crate::index::manager::IndexManager`].

use crate::index::types::StructureKind;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the construction engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The input text does not end with the sentinel terminator. Raised by
    /// the manager constructor, before any structure is built.
    #[error("input text does not end with the sentinel terminator (0x00)")]
    MissingSentinel,

    /// A requested structure kind, or one of its transitive dependencies,
    /// has no registered provider. Raised at schedule time.
    #[error("no provider registered for {0}")]
    NoProvider(StructureKind),

    /// A configured strategy name does not match any known provider for its
    /// structure kind. Raised when the registry is resolved from
    /// configuration.
    #[error("unknown {kind} strategy `{name}`")]
    UnknownStrategy {
        kind: StructureKind,
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_the_kind() {
        let err = Error::NoProvider(StructureKind::PlcpArray);
        assert!(err.to_string().contains("PLCP"));

        let err = Error::UnknownStrategy {
            kind: StructureKind::SuffixArray,
            name: "induced".to_string(),
        };
        assert!(err.to_string().contains("SA"));
        assert!(err.to_string().contains("induced"));
    }
}
