mod context;

pub use context::{ColumnSort, RenderContext};

use serde_json::Value;

use crate::api::UniversalChartState;
use crate::error::ChartResult;

/// Declarative options handed to the external rendering library.
pub type ChartOptions = Value;

/// Contract for chart types whose rendering needs UI-side state instead of
/// a pure state → options transformation.
///
/// The adapter reads the immutable chart state and may read and update the
/// host-owned [`RenderContext`] (pagination, sort, hover).
pub trait StatefulChartAdapter: Send + Sync {
    fn render(
        &self,
        state: &UniversalChartState,
        context: &mut RenderContext,
    ) -> ChartResult<ChartOptions>;
}
