use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(40.0, 40.0, 50.0, 60.0)
    }
}

/// Outer size of the chart plus the plot area left after margins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartBounds {
    pub width: f64,
    pub height: f64,
    pub margins: Margins,
    pub chart_width: f64,
    pub chart_height: f64,
}

impl ChartBounds {
    /// Derives the plot area; fails when the outer size is not finite and
    /// positive. A plot area eaten up by margins is clamped to zero.
    pub fn new(width: f64, height: f64, margins: Margins) -> ChartResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidBounds { width, height });
        }
        Ok(Self {
            width,
            height,
            margins,
            chart_width: (width - margins.left - margins.right).max(0.0),
            chart_height: (height - margins.top - margins.bottom).max(0.0),
        })
    }

    pub fn with_default_margins(width: f64, height: f64) -> ChartResult<Self> {
        Self::new(width, height, Margins::default())
    }
}

impl Default for ChartBounds {
    fn default() -> Self {
        let margins = Margins::default();
        Self {
            width: 800.0,
            height: 450.0,
            margins,
            chart_width: 800.0 - margins.left - margins.right,
            chart_height: 450.0 - margins.top - margins.bottom,
        }
    }
}
