//! Application layer (use-cases, policies).
//!
//! Presentation policies over domain data, free of UI frameworks and
//! transport concerns.

pub mod compare;
