//! # synthpop-service
//!
//! Transport-agnostic facade over the simulation engine, the analyzers, and
//! the stores. One method per REST endpoint; request bodies reject unknown
//! fields; errors render to [`ApiError`] with a stable code and HTTP status.
//!
//! | Endpoint | Method |
//! |----------|--------|
//! | `GET /scenarios[/{id}]` | `list_scenarios`, `get_scenario` |
//! | `POST /scorecards` | `create_scorecard` |
//! | `GET /scorecards[/{id}]` | `list_scorecards`, `get_scorecard` |
//! | `POST /simulations` | `create_simulation` |
//! | `GET /simulations[/{id}]` | `list_simulations`, `get_simulation` |
//! | `GET /simulations/{id}/outcomes` | `get_outcomes` |
//! | `GET /simulations/{id}/regions` | `get_regions` |
//! | `GET /simulations/{id}/sensitivity` | `get_sensitivity` |
//! | `POST /simulations/compare` | `compare` |

pub mod error;
pub mod pagination;
pub mod requests;
pub mod service;

pub use error::ApiError;
pub use pagination::{Page, PageRequest};
pub use requests::{
    parse_deltas, CompareRequest, CreateScorecardRequest, CreateSimulationRequest, RegionQuery,
};
pub use service::{ServiceOptions, Stores, SynthpopService};
