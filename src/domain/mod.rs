//! Domain types for DevisDiff.
//! Defines the core data structures the comparison client works with:
//! versions, the registry, selection pairs and diff results.

pub mod diff;
pub mod error;
pub mod registry;
pub mod selection;
pub mod version;

pub use diff::*;
pub use error::*;
pub use registry::*;
pub use selection::*;
pub use version::*;
