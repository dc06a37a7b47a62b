//! Polar bar and radar adapters.

use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::{
    cell_value, legend, number_or_null, series_keys, series_legend, series_name,
    sum_by_category_and_segment, tooltip, value_label,
};

/// Headroom above the largest value on radar spokes.
const RADAR_HEADROOM: f64 = 1.1;

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Polar, polar_options);
    registry.register(ChartType::Radar, radar_options);
}

/// Bars on a polar grid: angle categories, one series per segment.
#[must_use]
pub fn polar_options(state: &UniversalChartState) -> ChartOptions {
    let sums = sum_by_category_and_segment(state);
    let colors = state.colors();
    let stacked = state.configuration().is_stacked();

    let series: Vec<Value> = series_keys(state)
        .into_iter()
        .map(|key| {
            let data: Vec<Value> = state
                .categories()
                .iter()
                .map(|category| {
                    let value = number_or_null(cell_value(&sums, category, key));
                    match key {
                        Some(_) => value,
                        None => json!({
                            "value": value,
                            "itemStyle": { "color": colors.get_color(category) },
                        }),
                    }
                })
                .collect();
            let mut series = json!({
                "type": "bar",
                "coordinateSystem": "polar",
                "name": series_name(state, key),
                "data": data,
                "label": value_label(state),
            });
            if let Some(key) = key {
                series["itemStyle"] = json!({ "color": colors.get_color(key) });
            }
            if stacked {
                series["stack"] = json!("total");
            }
            series
        })
        .collect();

    json!({
        "polar": {},
        "legend": if state.segments().is_empty() { legend(state) } else { series_legend(state) },
        "tooltip": tooltip(state, "item"),
        "angleAxis": {
            "type": "category",
            "name": state.fields().x_label,
            "data": state.categories(),
        },
        "radiusAxis": { "type": "value", "name": state.fields().y_label },
        "series": series,
    })
}

/// One radar polygon per segment over the category spokes.
#[must_use]
pub fn radar_options(state: &UniversalChartState) -> ChartOptions {
    let sums = sum_by_category_and_segment(state);
    let colors = state.colors();
    let keys = series_keys(state);

    let indicator: Vec<Value> = state
        .categories()
        .iter()
        .map(|category| {
            let max = keys
                .iter()
                .filter_map(|key| cell_value(&sums, category, *key))
                .fold(0.0_f64, f64::max);
            json!({ "name": category, "max": (max * RADAR_HEADROOM).max(1.0) })
        })
        .collect();

    let data: Vec<Value> = keys
        .iter()
        .map(|key| {
            let values: Vec<f64> = state
                .categories()
                .iter()
                .map(|category| cell_value(&sums, category, *key).unwrap_or(0.0))
                .collect();
            json!({
                "name": series_name(state, *key),
                "value": values,
                "itemStyle": { "color": colors.series_color(*key) },
            })
        })
        .collect();

    json!({
        "legend": series_legend(state),
        "tooltip": tooltip(state, "item"),
        "radar": { "indicator": indicator },
        "series": [{
            "type": "radar",
            "name": state.fields().y_label,
            "data": data,
            "label": value_label(state),
        }],
    })
}
