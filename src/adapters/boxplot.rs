use std::collections::HashMap;

use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::{grid, measure_axis_name, tooltip};

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Boxplot, boxplot_options);
}

/// `[min, q1, median, q3, max]` of a sorted, non-empty sample.
///
/// Quantiles interpolate linearly between closest ranks.
#[must_use]
pub fn five_number_summary(sorted: &[f64]) -> Option<[f64; 5]> {
    let first = *sorted.first()?;
    let last = *sorted.last()?;
    Some([
        first,
        quantile(sorted, 0.25),
        quantile(sorted, 0.5),
        quantile(sorted, 0.75),
        last,
    ])
}

fn quantile(sorted: &[f64], p: f64) -> f64 {
    let rank = p * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// One box per category; categories without numeric values get an empty box.
#[must_use]
pub fn boxplot_options(state: &UniversalChartState) -> ChartOptions {
    let fields = state.fields();
    let mut samples: HashMap<String, Vec<f64>> = HashMap::new();
    for observation in state.observations() {
        if let Some(value) = fields.y(observation) {
            samples.entry(fields.x(observation)).or_default().push(value);
        }
    }

    let data: Vec<Value> = state
        .categories()
        .iter()
        .map(|category| {
            let mut sample = samples.remove(category).unwrap_or_default();
            sample.sort_by(f64::total_cmp);
            five_number_summary(&sample).map_or_else(|| json!([]), |summary| json!(summary))
        })
        .collect();

    json!({
        "grid": grid(state),
        "tooltip": tooltip(state, "item"),
        "xAxis": { "type": "category", "name": fields.x_label, "data": state.categories() },
        "yAxis": { "type": "value", "name": measure_axis_name(state), "scale": true },
        "series": [{
            "type": "boxplot",
            "name": fields.y_label,
            "data": data,
            "itemStyle": { "color": state.colors().series_color(None) },
        }],
    })
}
