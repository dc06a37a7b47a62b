use indexmap::IndexMap;
use serde_json::{Value, json};
use tracing::debug;

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::tooltip;

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Sankey, sankey_options);
}

/// Nodes come from the color domain (sources then targets); links sum the
/// value per source/target pair. Self links are dropped since the renderer
/// rejects cycles.
#[must_use]
pub fn sankey_options(state: &UniversalChartState) -> ChartOptions {
    let fields = state.fields();
    let colors = state.colors();

    let mut links: IndexMap<(String, String), f64> = IndexMap::new();
    if let (Some(get_source), Some(get_target), Some(get_value)) = (
        fields.get_source.as_ref(),
        fields.get_target.as_ref(),
        fields.get_value.as_ref(),
    ) {
        for observation in state.observations() {
            let (source, target) = (get_source(observation), get_target(observation));
            let Some(value) = get_value(observation) else {
                continue;
            };
            if source.is_empty() || target.is_empty() {
                continue;
            }
            if source == target {
                debug!(node = %source, "dropping self link from sankey");
                continue;
            }
            *links.entry((source, target)).or_insert(0.0) += value;
        }
    }

    let nodes: Vec<Value> = colors
        .color_domain()
        .iter()
        .map(|node| json!({ "name": node, "itemStyle": { "color": colors.get_color(node) } }))
        .collect();
    let links: Vec<Value> = links
        .into_iter()
        .map(|((source, target), value)| {
            json!({ "source": source, "target": target, "value": value })
        })
        .collect();

    json!({
        "tooltip": tooltip(state, "item"),
        "series": [{
            "type": "sankey",
            "name": fields.value_label,
            "data": nodes,
            "links": links,
            "emphasis": { "focus": "adjacency" },
            "label": { "show": true },
        }],
    })
}
