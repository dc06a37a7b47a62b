//! chart-state: renderer-agnostic chart state pipeline.
//!
//! A validated [`core::ChartConfiguration`] plus fetched observations and
//! component metadata are turned into a [`api::UniversalChartState`]
//! (accessors, ordered categories and segments, colors). Adapters looked up
//! in an [`api::AdapterRegistry`] transform that state into declarative
//! renderer options.

pub mod adapters;
pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use adapters::register_builtin_adapters;
pub use api::{
    AdapterRegistry, UniversalChartState, UniversalStateInput, assemble_universal_state,
    global_registry,
};
pub use error::{ChartError, ChartResult};
