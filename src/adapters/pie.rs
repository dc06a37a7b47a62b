//! Pie and donut adapters.

use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::{ChartConfiguration, ChartType};
use crate::render::ChartOptions;

use super::support::{legend, sum_by_segment, tooltip};

const OUTER_RADIUS_PERCENT: f64 = 70.0;

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Pie, pie_options);
    registry.register(ChartType::Donut, pie_options);
}

/// One slice per segment with data, in segment order.
#[must_use]
pub fn pie_options(state: &UniversalChartState) -> ChartOptions {
    let sums = sum_by_segment(state);
    let colors = state.colors();

    let data: Vec<Value> = state
        .segments()
        .iter()
        .filter_map(|segment| {
            let value = sums.get(segment)?;
            Some(json!({
                "name": segment,
                "value": value,
                "itemStyle": { "color": colors.get_color(segment) },
            }))
        })
        .collect();

    let outer = format!("{OUTER_RADIUS_PERCENT}%");
    let radius = match state.configuration() {
        ChartConfiguration::Donut { inner_radius, .. } => {
            let inner = (inner_radius.clamp(0.0, 0.95) * OUTER_RADIUS_PERCENT).round();
            json!([format!("{inner}%"), outer])
        }
        _ => json!(outer),
    };

    json!({
        "legend": legend(state),
        "tooltip": tooltip(state, "item"),
        "series": [{
            "type": "pie",
            "name": state.fields().segment_label,
            "radius": radius,
            "data": data,
            "label": {
                "show": state.display().show_values,
                "formatter": "{b}: {d}%",
            },
        }],
    })
}
