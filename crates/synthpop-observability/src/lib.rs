//! # synthpop-observability
//!
//! Tracing subscriber setup, span macros per operation (simulation, regions,
//! sensitivity, comparison), and structured lifecycle events emitted by the
//! engine and analyzers.

pub mod tracing_setup;

pub use tracing_setup::{events, init_from_config, init_tracing, init_tracing_json, spans};
