use std::collections::HashMap;

use serde_json::{Value, json};

use crate::api::{AdapterRegistry, CategorySorter, UniversalChartState, extract_categories};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::{grid, tooltip};

const LOW_COLOR: &str = "#f7fbff";

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Heatmap, heatmap_options);
}

/// Cells `[x_index, y_index, value]` over the ordered column and row
/// categories, with a continuous visual map spanning the value extent.
#[must_use]
pub fn heatmap_options(state: &UniversalChartState) -> ChartOptions {
    let fields = state.fields();
    let rows = fields.get_y_category.as_ref().map_or_else(Vec::new, |get_row| {
        let sorter = state
            .configuration()
            .row_sorting()
            .and_then(|option| CategorySorter::from_option(option, fields.get_value.clone()));
        extract_categories(
            state.observations(),
            get_row,
            fields.y_dimension.as_ref(),
            sorter.as_ref(),
        )
    });

    let column_index: HashMap<&str, usize> = state
        .categories()
        .iter()
        .enumerate()
        .map(|(index, category)| (category.as_str(), index))
        .collect();
    let row_index: HashMap<&str, usize> = rows
        .iter()
        .enumerate()
        .map(|(index, row)| (row.as_str(), index))
        .collect();

    let mut cells: HashMap<(usize, usize), f64> = HashMap::new();
    if let Some(get_row) = fields.get_y_category.as_ref() {
        for observation in state.observations() {
            let Some(value) = fields.get_value.as_ref().and_then(|get| get(observation)) else {
                continue;
            };
            let column = column_index.get(fields.x(observation).as_str()).copied();
            let row = row_index.get(get_row(observation).as_str()).copied();
            if let (Some(column), Some(row)) = (column, row) {
                *cells.entry((column, row)).or_insert(0.0) += value;
            }
        }
    }

    let mut ordered: Vec<((usize, usize), f64)> = cells.into_iter().collect();
    ordered.sort_by_key(|(cell, _)| *cell);
    let (min, max) = ordered
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), (_, value)| {
            (min.min(*value), max.max(*value))
        });
    let (min, max) = if ordered.is_empty() { (0.0, 0.0) } else { (min, max) };
    let data: Vec<Value> = ordered
        .iter()
        .map(|((column, row), value)| json!([column, row, value]))
        .collect();

    json!({
        "grid": grid(state),
        "tooltip": tooltip(state, "item"),
        "xAxis": { "type": "category", "name": fields.x_label, "data": state.categories() },
        "yAxis": { "type": "category", "name": fields.y_label, "data": rows },
        "visualMap": {
            "min": min,
            "max": max,
            "calculable": true,
            "orient": "horizontal",
            "inRange": { "color": [LOW_COLOR, state.colors().series_color(None)] },
        },
        "series": [{
            "type": "heatmap",
            "name": fields.value_label,
            "data": data,
            "label": { "show": state.display().show_values },
        }],
    })
}
