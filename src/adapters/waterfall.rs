use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::{grid, measure_axis_name, sum_by_category, tooltip, value_label};

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Waterfall, waterfall_options);
}

/// Floating step of one waterfall bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterfallStep {
    /// Invisible offset below the visible bar.
    pub base: f64,
    /// Visible bar height, always non-negative.
    pub height: f64,
    /// Running total after this step.
    pub end: f64,
}

/// Running-total steps for `deltas` in order.
#[must_use]
pub fn waterfall_steps(deltas: &[f64]) -> Vec<WaterfallStep> {
    let mut running = 0.0;
    deltas
        .iter()
        .map(|delta| {
            let start = running;
            running += delta;
            WaterfallStep {
                base: start.min(running),
                height: delta.abs(),
                end: running,
            }
        })
        .collect()
}

/// Two stacked bar series: a transparent base and the visible delta.
#[must_use]
pub fn waterfall_options(state: &UniversalChartState) -> ChartOptions {
    let sums = sum_by_category(state);
    let colors = state.colors();
    let deltas: Vec<f64> = state
        .categories()
        .iter()
        .map(|category| sums.get(category).copied().unwrap_or(0.0))
        .collect();
    let steps = waterfall_steps(&deltas);

    let bases: Vec<Value> = steps.iter().map(|step| json!(step.base)).collect();
    let bars: Vec<Value> = state
        .categories()
        .iter()
        .zip(steps.iter().zip(&deltas))
        .map(|(category, (step, delta))| {
            json!({
                "value": step.height,
                "delta": delta,
                "total": step.end,
                "itemStyle": { "color": colors.get_color(category) },
            })
        })
        .collect();

    json!({
        "grid": grid(state),
        "tooltip": tooltip(state, "axis"),
        "xAxis": {
            "type": "category",
            "name": state.fields().x_label,
            "data": state.categories(),
        },
        "yAxis": { "type": "value", "name": measure_axis_name(state) },
        "series": [
            {
                "type": "bar",
                "name": "base",
                "stack": "waterfall",
                "silent": true,
                "itemStyle": { "color": "transparent", "borderColor": "transparent" },
                "data": bases,
            },
            {
                "type": "bar",
                "name": state.fields().y_label,
                "stack": "waterfall",
                "label": value_label(state),
                "data": bars,
            },
        ],
    })
}
