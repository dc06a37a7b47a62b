use serde_json::{Value, json};

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::ChartType;
use crate::render::ChartOptions;

use super::support::{sum_by_category, tooltip};

const FONT_SIZE_RANGE: [u32; 2] = [12, 60];

pub fn register(registry: &AdapterRegistry) {
    registry.register(ChartType::Wordcloud, wordcloud_options);
}

/// Words in category order, sized by their summed measure; words without a
/// value are left out.
#[must_use]
pub fn wordcloud_options(state: &UniversalChartState) -> ChartOptions {
    let sums = sum_by_category(state);
    let colors = state.colors();

    let data: Vec<Value> = state
        .categories()
        .iter()
        .filter_map(|word| {
            let size = sums.get(word)?;
            Some(json!({
                "name": word,
                "value": size,
                "textStyle": { "color": colors.get_color(word) },
            }))
        })
        .collect();

    json!({
        "tooltip": tooltip(state, "item"),
        "series": [{
            "type": "wordCloud",
            "name": state.fields().y_label,
            "shape": "circle",
            "sizeRange": FONT_SIZE_RANGE,
            "rotationRange": [0, 0],
            "width": state.bounds().chart_width,
            "height": state.bounds().chart_height,
            "data": data,
        }],
    })
}
