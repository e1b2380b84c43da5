// mod.rs - Data structures module

pub mod loaders;
pub mod person;

// Re-export main types for convenience
pub use person::{Family, Parents, Person};
