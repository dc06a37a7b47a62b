use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use tracing::{debug, warn};

use crate::core::ChartType;
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartOptions, RenderContext, StatefulChartAdapter};

use super::universal_state::UniversalChartState;

pub type ChartAdapterFn =
    Arc<dyn Fn(&UniversalChartState) -> ChartOptions + Send + Sync + 'static>;

/// Outcome of a registration call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Inserted,
    /// An earlier entry for the same chart type was overwritten.
    Replaced,
}

/// Chart type → adapter table.
///
/// Registration is an initialization-time write; resolution takes a read
/// lock only long enough to clone the adapter handle, so adapters may call
/// back into the registry. Pure and stateful adapters live in separate
/// tables and may coexist for one chart type.
#[derive(Default)]
pub struct AdapterRegistry {
    adapters: RwLock<HashMap<ChartType, ChartAdapterFn>>,
    stateful: RwLock<HashMap<ChartType, Arc<dyn StatefulChartAdapter>>>,
}

impl AdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pure state → options adapter. Overwriting an existing
    /// entry is allowed but logged.
    pub fn register<F>(&self, chart_type: ChartType, adapter: F) -> Registration
    where
        F: Fn(&UniversalChartState) -> ChartOptions + Send + Sync + 'static,
    {
        let previous = self
            .adapters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chart_type, Arc::new(adapter));
        registration_outcome(chart_type, previous.is_some(), "chart adapter")
    }

    /// Registers a context-consuming renderer for `chart_type`.
    pub fn register_stateful(
        &self,
        chart_type: ChartType,
        component: Arc<dyn StatefulChartAdapter>,
    ) -> Registration {
        let previous = self
            .stateful
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(chart_type, component);
        registration_outcome(chart_type, previous.is_some(), "stateful chart adapter")
    }

    /// Builds renderer options for `state` with its registered pure adapter.
    ///
    /// A missing registration is a deployment gap, reported as
    /// [`ChartError::AdapterNotRegistered`].
    pub fn resolve(&self, state: &UniversalChartState) -> ChartResult<ChartOptions> {
        let chart_type = state.chart_type();
        let adapter = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&chart_type)
            .cloned()
            .ok_or(ChartError::AdapterNotRegistered { chart_type })?;
        Ok(adapter(state))
    }

    #[must_use]
    pub fn resolve_stateful(&self, chart_type: ChartType) -> Option<Arc<dyn StatefulChartAdapter>> {
        self.stateful
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&chart_type)
            .cloned()
    }

    /// Runs the stateful adapter registered for `state`'s chart type.
    pub fn render_stateful(
        &self,
        state: &UniversalChartState,
        context: &mut RenderContext,
    ) -> ChartResult<ChartOptions> {
        let chart_type = state.chart_type();
        let component = self
            .resolve_stateful(chart_type)
            .ok_or(ChartError::AdapterNotRegistered { chart_type })?;
        component.render(state, context)
    }

    #[must_use]
    pub fn has(&self, chart_type: ChartType) -> bool {
        self.adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&chart_type)
    }

    #[must_use]
    pub fn has_stateful(&self, chart_type: ChartType) -> bool {
        self.stateful
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&chart_type)
    }

    /// Chart types with a pure adapter, in declaration order.
    #[must_use]
    pub fn list_registered(&self) -> Vec<ChartType> {
        let mut chart_types: Vec<ChartType> = self
            .adapters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        chart_types.sort_unstable();
        chart_types
    }

    #[must_use]
    pub fn list_registered_stateful(&self) -> Vec<ChartType> {
        let mut chart_types: Vec<ChartType> = self
            .stateful
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        chart_types.sort_unstable();
        chart_types
    }

    /// Drops every registration. Intended for test isolation.
    pub fn clear(&self) {
        self.adapters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        self.stateful
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
        debug!("cleared adapter registry");
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("adapters", &self.list_registered())
            .field("stateful", &self.list_registered_stateful())
            .finish()
    }
}

fn registration_outcome(chart_type: ChartType, replaced: bool, kind: &str) -> Registration {
    if replaced {
        warn!(
            chart_type = %chart_type,
            kind,
            "overwriting existing registration"
        );
        Registration::Replaced
    } else {
        debug!(chart_type = %chart_type, kind, "registered");
        Registration::Inserted
    }
}

/// Process-wide registry. Starts empty; hosts populate it once at startup
/// (typically with [`crate::adapters::register_builtin_adapters`]).
#[must_use]
pub fn global_registry() -> &'static AdapterRegistry {
    static REGISTRY: OnceLock<AdapterRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AdapterRegistry::new)
}
