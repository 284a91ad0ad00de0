//! Game registry: sporting events and their lifecycle

pub mod registry;
pub mod types;

pub use registry::GameRegistry;
pub use types::*;
