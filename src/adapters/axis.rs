//! Cartesian adapters: column, bar, line, area and scatterplot.

use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::core::primitives::datetime_to_unix_millis;
use crate::render::ChartOptions;

use super::support::{
    cell_value, grid, measure_axis_name, number_or_null, series_keys, series_legend, series_name,
    sum_by_category_and_segment, tooltip, value_label,
};

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Column, column_options);
    registry.register(ChartType::Bar, bar_options);
    registry.register(ChartType::Line, line_options);
    registry.register(ChartType::Area, area_options);
    registry.register(ChartType::Scatterplot, scatterplot_options);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BarOrientation {
    Vertical,
    Horizontal,
}

#[must_use]
pub fn column_options(state: &UniversalChartState) -> ChartOptions {
    category_bar_options(state, BarOrientation::Vertical)
}

/// Horizontal bars: categories run along `yAxis`.
#[must_use]
pub fn bar_options(state: &UniversalChartState) -> ChartOptions {
    category_bar_options(state, BarOrientation::Horizontal)
}

fn category_bar_options(state: &UniversalChartState, orientation: BarOrientation) -> ChartOptions {
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

    let category_axis = json!({
        "type": "category",
        "name": state.fields().x_label,
        "data": state.categories(),
    });
    let value_axis = json!({
        "type": "value",
        "name": measure_axis_name(state),
    });
    let (x_axis, y_axis) = match orientation {
        BarOrientation::Vertical => (category_axis, value_axis),
        BarOrientation::Horizontal => (value_axis, category_axis),
    };

    json!({
        "grid": grid(state),
        "legend": series_legend(state),
        "tooltip": tooltip(state, "axis"),
        "xAxis": x_axis,
        "yAxis": y_axis,
        "series": series,
    })
}

#[must_use]
pub fn line_options(state: &UniversalChartState) -> ChartOptions {
    temporal_series_options(state, false)
}

#[must_use]
pub fn area_options(state: &UniversalChartState) -> ChartOptions {
    temporal_series_options(state, true)
}

/// One series per segment of `[timestamp_ms, value]` pairs sorted by time.
fn temporal_series_options(state: &UniversalChartState, filled: bool) -> ChartOptions {
    let fields = state.fields();
    let colors = state.colors();
    let stacked = state.configuration().is_stacked();
    let Some(get_date) = fields.get_x_as_date.as_ref() else {
        return empty_cartesian(state);
    };

    let series: Vec<Value> = series_keys(state)
        .into_iter()
        .map(|key| {
            let mut points: Vec<(i64, f64)> = state
                .observations()
                .iter()
                .filter(|observation| key.is_none_or(|key| fields.segment(observation) == key))
                .filter_map(|observation| {
                    let time = get_date(observation)?;
                    let value = fields.y(observation)?;
                    Some((datetime_to_unix_millis(time), value))
                })
                .collect();
            points.sort_by_key(|(time, _)| *time);

            let mut series = json!({
                "type": "line",
                "name": series_name(state, key),
                "data": points.iter().map(|(time, value)| json!([time, value])).collect::<Vec<_>>(),
                "showSymbol": state.display().show_dots,
                "label": value_label(state),
                "itemStyle": { "color": colors.series_color(key) },
            });
            if filled {
                series["areaStyle"] = json!({ "opacity": 0.7 });
            }
            if stacked || (filled && key.is_some()) {
                series["stack"] = json!("total");
            }
            series
        })
        .collect();

    json!({
        "grid": grid(state),
        "legend": series_legend(state),
        "tooltip": tooltip(state, "axis"),
        "xAxis": { "type": "time", "name": fields.x_label },
        "yAxis": { "type": "value", "name": measure_axis_name(state) },
        "series": series,
    })
}

/// Points where both coordinates are numeric; one series per segment.
#[must_use]
pub fn scatterplot_options(state: &UniversalChartState) -> ChartOptions {
    let fields = state.fields();
    let colors = state.colors();
    let Some(get_x) = fields.get_x_as_number.as_ref() else {
        return empty_cartesian(state);
    };

    let series: Vec<Value> = series_keys(state)
        .into_iter()
        .map(|key| {
            let data: Vec<Value> = state
                .observations()
                .iter()
                .filter(|observation| key.is_none_or(|key| fields.segment(observation) == key))
                .filter_map(|observation| {
                    let x = get_x(observation)?;
                    let y = fields.y(observation)?;
                    Some(json!([x, y]))
                })
                .collect();
            json!({
                "type": "scatter",
                "name": series_name(state, key),
                "data": data,
                "itemStyle": { "color": colors.series_color(key) },
            })
        })
        .collect();

    json!({
        "grid": grid(state),
        "legend": series_legend(state),
        "tooltip": tooltip(state, "item"),
        "xAxis": { "type": "value", "name": fields.x_label, "scale": true },
        "yAxis": { "type": "value", "name": measure_axis_name(state), "scale": true },
        "series": series,
    })
}

fn empty_cartesian(state: &UniversalChartState) -> ChartOptions {
    json!({
        "grid": grid(state),
        "legend": series_legend(state),
        "tooltip": tooltip(state, "axis"),
        "xAxis": {},
        "yAxis": {},
        "series": [],
    })
}
