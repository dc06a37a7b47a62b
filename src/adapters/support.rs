use std::collections::HashMap;

use serde_json::{Value, json};

use crate::api::UniversalChartState;

/// Series keys in legend order; a single unnamed series when the chart is
/// not segmented.
pub(super) fn series_keys(state: &UniversalChartState) -> Vec<Option<&str>> {
    if state.segments().is_empty() {
        vec![None]
    } else {
        state.segments().iter().map(|segment| Some(segment.as_str())).collect()
    }
}

pub(super) fn series_name(state: &UniversalChartState, key: Option<&str>) -> String {
    key.map_or_else(|| state.fields().y_label.clone(), str::to_owned)
}

/// Sums `y` per (category, segment). Observations without a numeric value
/// do not contribute, so a cell with no data stays absent rather than zero.
pub(super) fn sum_by_category_and_segment(
    state: &UniversalChartState,
) -> HashMap<(String, String), f64> {
    let fields = state.fields();
    let mut sums = HashMap::new();
    for observation in state.observations() {
        let Some(value) = fields.y(observation) else {
            continue;
        };
        let key = (fields.x(observation), fields.segment(observation));
        *sums.entry(key).or_insert(0.0) += value;
    }
    sums
}

pub(super) fn cell_value(
    sums: &HashMap<(String, String), f64>,
    category: &str,
    segment: Option<&str>,
) -> Option<f64> {
    sums.get(&(category.to_owned(), segment.unwrap_or_default().to_owned()))
        .copied()
}

/// Sums `y` per segment (pie slices, word sizes without a category axis).
pub(super) fn sum_by_segment(state: &UniversalChartState) -> HashMap<String, f64> {
    let fields = state.fields();
    let mut sums = HashMap::new();
    for observation in state.observations() {
        if let Some(value) = fields.y(observation) {
            *sums.entry(fields.segment(observation)).or_insert(0.0) += value;
        }
    }
    sums
}

/// Sums `y` per category.
pub(super) fn sum_by_category(state: &UniversalChartState) -> HashMap<String, f64> {
    let fields = state.fields();
    let mut sums = HashMap::new();
    for observation in state.observations() {
        if let Some(value) = fields.y(observation) {
            *sums.entry(fields.x(observation)).or_insert(0.0) += value;
        }
    }
    sums
}

pub(super) fn number_or_null(value: Option<f64>) -> Value {
    value.map_or(Value::Null, |value| json!(value))
}

pub(super) fn legend(state: &UniversalChartState) -> Value {
    let domain = state.colors().color_domain();
    json!({
        "show": state.display().show_legend && !domain.is_empty(),
        "data": domain,
    })
}

/// Legend listing one entry per series (segments, or the measure label).
pub(super) fn series_legend(state: &UniversalChartState) -> Value {
    let names: Vec<String> = series_keys(state)
        .into_iter()
        .map(|key| series_name(state, key))
        .collect();
    json!({
        "show": state.display().show_legend && !state.segments().is_empty(),
        "data": names,
    })
}

pub(super) fn tooltip(state: &UniversalChartState, trigger: &str) -> Value {
    json!({
        "show": state.display().show_tooltip,
        "trigger": trigger,
    })
}

pub(super) fn grid(state: &UniversalChartState) -> Value {
    let margins = state.bounds().margins;
    json!({
        "left": margins.left,
        "right": margins.right,
        "top": margins.top,
        "bottom": margins.bottom,
        "containLabel": true,
    })
}

pub(super) fn value_label(state: &UniversalChartState) -> Value {
    json!({ "show": state.display().show_values })
}

/// Axis title: measure label with unit when the role is a measure.
pub(super) fn measure_axis_name(state: &UniversalChartState) -> String {
    let fields = state.fields();
    fields
        .y_measure
        .as_ref()
        .map_or_else(|| fields.y_label.clone(), |measure| measure.label_with_unit())
}
