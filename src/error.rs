use thiserror::Error;

use crate::core::ChartType;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error(
        "no chart adapter registered for chart type `{chart_type}`; \
         call `AdapterRegistry::register({chart_type:?}, ..)` (or the chart module's \
         `register` function) before resolving options"
    )]
    AdapterNotRegistered { chart_type: ChartType },

    #[error("invalid chart bounds: width={width}, height={height}")]
    InvalidBounds { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
