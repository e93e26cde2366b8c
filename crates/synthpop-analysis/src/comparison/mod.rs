//! Cross-simulation comparison.

pub mod service;

pub use service::ComparisonService;
