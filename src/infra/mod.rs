//! Infrastructure layer (adapters/implementations).
//!
//! This module contains IO-heavy integrations: configuration on disk and
//! the HTTP client for the comparison service.

pub mod app_config;
pub mod service;
