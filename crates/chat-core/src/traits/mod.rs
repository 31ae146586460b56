//! Traits (ports) the domain layer consumes

mod resolution;

pub use resolution::{ContextHandle, ContextSource, ResolutionContext};
