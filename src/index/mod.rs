pub mod int_vec;
pub mod manager;
pub mod providers;
pub mod registry;
pub mod scheduler;
pub mod types;

pub use int_vec::IntVec;
pub use manager::{IndexManager, SlotStatus, StructureStats, TakenData};
pub use registry::{BuildEnv, JointSink, Provider, Registry};
pub use types::*;
