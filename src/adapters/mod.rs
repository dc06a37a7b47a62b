//! Built-in adapters turning a [`crate::api::UniversalChartState`] into
//! renderer options.
//!
//! Nothing is registered implicitly: hosts call [`register_builtin_adapters`]
//! on the registry they resolve against, and may overwrite any entry
//! afterwards.

pub mod axis;
pub mod boxplot;
pub mod heatmap;
pub mod hierarchy;
pub mod pie;
pub mod radial;
pub mod sankey;
mod support;
pub mod table;
pub mod waterfall;
pub mod wordcloud;

use tracing::debug;

use crate::api::AdapterRegistry;

pub use table::TableAdapter;

/// Registers an adapter for every chart type except `map`.
pub fn register_builtin_adapters(registry: &AdapterRegistry) {
    axis::register(registry);
    pie::register(registry);
    heatmap::register(registry);
    sankey::register(registry);
    boxplot::register(registry);
    waterfall::register(registry);
    radial::register(registry);
    wordcloud::register(registry);
    hierarchy::register(registry);
    table::register(registry);
    debug!(
        adapters = registry.list_registered().len(),
        stateful = registry.list_registered_stateful().len(),
        "registered built-in chart adapters"
    );
}
