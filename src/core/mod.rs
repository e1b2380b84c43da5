// mod.rs - Core inference module

pub mod distribution;
pub mod evaluator;
pub mod inference;
pub mod network;
pub mod subsets;

// Re-export main types for convenience
pub use distribution::{Accumulator, Distribution, PersonPosterior, Posteriors};
pub use evaluator::{inheritance_probability, joint_probability, transmission_probability, Assignment, World};
pub use inference::{
    hypothesis_space_size, is_consistent, InferenceEngine, InferenceOptions, InferenceStats,
    DEFAULT_MAX_PERSONS,
};
pub use network::{GeneCount, NetworkParams};
pub use subsets::{PersonSet, MAX_SET_SIZE};
