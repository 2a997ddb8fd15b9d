//! Default construction providers, one per structure kind.
//!
//! - `suffix_array`: parallel suffix sort with optional joint inverse
//! - `inverse`: inverse permutation from the suffix array
//! - `phi`: lexicographic-predecessor map from the suffix array
//! - `plcp`: position-indexed LCP values from Phi
//! - `lcp`: rank-indexed LCP values permuted from PLCP

pub mod inverse;
pub mod lcp;
pub mod phi;
pub mod plcp;
pub mod suffix_array;

pub use inverse::InverseProvider;
pub use lcp::LcpProvider;
pub use phi::PhiProvider;
pub use plcp::PlcpProvider;
pub use suffix_array::SuffixArrayProvider;
