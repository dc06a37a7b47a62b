//! Treemap and sunburst adapters.

use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::{cell_value, sum_by_category_and_segment, tooltip};

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Treemap, treemap_options);
    registry.register(ChartType::Sunburst, sunburst_options);
}

/// Parents per category; children per segment when the chart is segmented.
///
/// Nodes without data are pruned so the renderer never sizes an empty leaf.
#[must_use]
pub fn hierarchy_nodes(state: &UniversalChartState) -> Vec<Value> {
    let sums = sum_by_category_and_segment(state);
    let colors = state.colors();
    let segmented = !state.segments().is_empty();

    state
        .categories()
        .iter()
        .filter_map(|category| {
            if !segmented {
                let value = cell_value(&sums, category, None)?;
                return Some(json!({
                    "name": category,
                    "value": value,
                    "itemStyle": { "color": colors.get_color(category) },
                }));
            }
            let children: Vec<Value> = state
                .segments()
                .iter()
                .filter_map(|segment| {
                    let value = cell_value(&sums, category, Some(segment.as_str()))?;
                    Some(json!({
                        "name": segment,
                        "value": value,
                        "itemStyle": { "color": colors.get_color(segment) },
                    }))
                })
                .collect();
            (!children.is_empty()).then(|| json!({ "name": category, "children": children }))
        })
        .collect()
}

#[must_use]
pub fn treemap_options(state: &UniversalChartState) -> ChartOptions {
    json!({
        "tooltip": tooltip(state, "item"),
        "series": [{
            "type": "treemap",
            "name": state.fields().y_label,
            "roam": false,
            "breadcrumb": { "show": !state.segments().is_empty() },
            "label": { "show": true },
            "data": hierarchy_nodes(state),
        }],
    })
}

#[must_use]
pub fn sunburst_options(state: &UniversalChartState) -> ChartOptions {
    json!({
        "tooltip": tooltip(state, "item"),
        "series": [{
            "type": "sunburst",
            "name": state.fields().y_label,
            "radius": ["15%", "80%"],
            "label": { "rotate": "radial", "show": state.display().show_values },
            "data": hierarchy_nodes(state),
        }],
    })
}
