//! Model artifact management.

pub mod reference;
pub mod resolver;

pub use reference::ModelReference;
pub use resolver::{ModelResolutionError, ModelResolver, ResolveOptions, ResolvedModel};
