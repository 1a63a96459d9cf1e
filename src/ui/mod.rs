//! UI layer - the application store and the terminal shell.

pub mod app;
pub mod shell;
