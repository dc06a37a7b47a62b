use chart_state::core::{ChartConfiguration, ChartType, SortingOrder, SortingType};

#[test]
fn every_chart_type_tag_parses() {
    for chart_type in ChartType::ALL {
        let fields = match chart_type {
            ChartType::Pie | ChartType::Donut => {
                r#"{ "y": { "componentId": "v" }, "segment": { "componentId": "s" } }"#
            }
            ChartType::Heatmap => {
                r#"{ "x": { "componentId": "a" }, "y": { "componentId": "b" }, "value": { "componentId": "v" } }"#
            }
            ChartType::Sankey => {
                r#"{ "source": { "componentId": "a" }, "target": { "componentId": "b" }, "value": { "componentId": "v" } }"#
            }
            ChartType::Polar => {
                r#"{ "angle": { "componentId": "a" }, "radius": { "componentId": "v" } }"#
            }
            ChartType::Wordcloud => {
                r#"{ "word": { "componentId": "a" }, "size": { "componentId": "v" } }"#
            }
            ChartType::Table => r#"{ "columns": [{ "componentId": "a" }] }"#,
            ChartType::Map => r#"{ "area": { "componentId": "a" } }"#,
            _ => r#"{ "x": { "componentId": "a" }, "y": { "componentId": "v" } }"#,
        };
        let json = format!(r#"{{ "chartType": "{chart_type}", "fields": {fields} }}"#);

        let config = ChartConfiguration::from_json_str(&json)
            .unwrap_or_else(|error| panic!("{chart_type} failed to parse: {error}"));
        assert_eq!(config.chart_type(), chart_type);
    }
}

#[test]
fn unknown_chart_type_is_rejected() {
    let parsed = ChartConfiguration::from_json_str(r#"{ "chartType": "gauge", "fields": {} }"#);
    let error = parsed.expect_err("gauge is not a chart type");
    assert!(error.to_string().contains("invalid data"));
}

#[test]
fn segment_sorting_is_read_from_the_segment_role() {
    let config = ChartConfiguration::from_json_str(
        r#"{ "chartType": "line", "fields": {
            "x": { "componentId": "date" },
            "y": { "componentId": "v" },
            "segment": {
                "componentId": "s",
                "sorting": { "sortingType": "byTotalSize", "sortingOrder": "desc" }
            } } }"#,
    )
    .expect("line");

    let sorting = config.segment_sorting().expect("segment sorting");
    assert_eq!(sorting.sorting_type, SortingType::ByTotalSize);
    assert_eq!(sorting.sorting_order, SortingOrder::Desc);
    assert!(!config.is_stacked());
}

#[test]
fn bypassing_types_are_flagged() {
    let bypassing: Vec<ChartType> = ChartType::ALL
        .into_iter()
        .filter(|chart_type| chart_type.bypasses_pipeline())
        .collect();
    assert_eq!(bypassing, vec![ChartType::Table, ChartType::Map]);
}

#[test]
fn role_sorting_is_read_for_heatmap_rows_and_sankey_targets() {
    let heatmap = ChartConfiguration::from_json_str(
        r#"{ "chartType": "heatmap", "fields": {
            "x": { "componentId": "a" },
            "y": {
                "componentId": "b",
                "sorting": { "sortingType": "byDimensionLabel", "sortingOrder": "desc" }
            },
            "value": { "componentId": "v" } } }"#,
    )
    .expect("heatmap");
    let rows = heatmap.row_sorting().expect("row sorting");
    assert_eq!(rows.sorting_type, SortingType::ByDimensionLabel);
    assert_eq!(rows.sorting_order, SortingOrder::Desc);
    assert!(heatmap.segment_sorting().is_none());

    let sankey = ChartConfiguration::from_json_str(
        r#"{ "chartType": "sankey", "fields": {
            "source": { "componentId": "a" },
            "target": {
                "componentId": "b",
                "sorting": { "sortingType": "byMeasure", "sortingOrder": "asc" }
            },
            "value": { "componentId": "v" } } }"#,
    )
    .expect("sankey");
    let targets = sankey.segment_sorting().expect("target sorting");
    assert_eq!(targets.sorting_type, SortingType::ByMeasure);
    assert!(sankey.row_sorting().is_none());
}
