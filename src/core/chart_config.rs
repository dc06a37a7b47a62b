use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Chart-type tag shared by configurations, states and the adapter registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartType {
    Column,
    Bar,
    Line,
    Area,
    Scatterplot,
    Pie,
    Donut,
    Heatmap,
    Sankey,
    Boxplot,
    Waterfall,
    Polar,
    Radar,
    Wordcloud,
    Treemap,
    Sunburst,
    Table,
    Map,
}

impl ChartType {
    pub const ALL: [ChartType; 18] = [
        ChartType::Column,
        ChartType::Bar,
        ChartType::Line,
        ChartType::Area,
        ChartType::Scatterplot,
        ChartType::Pie,
        ChartType::Donut,
        ChartType::Heatmap,
        ChartType::Sankey,
        ChartType::Boxplot,
        ChartType::Waterfall,
        ChartType::Polar,
        ChartType::Radar,
        ChartType::Wordcloud,
        ChartType::Treemap,
        ChartType::Sunburst,
        ChartType::Table,
        ChartType::Map,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Column => "column",
            Self::Bar => "bar",
            Self::Line => "line",
            Self::Area => "area",
            Self::Scatterplot => "scatterplot",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Heatmap => "heatmap",
            Self::Sankey => "sankey",
            Self::Boxplot => "boxplot",
            Self::Waterfall => "waterfall",
            Self::Polar => "polar",
            Self::Radar => "radar",
            Self::Wordcloud => "wordcloud",
            Self::Treemap => "treemap",
            Self::Sunburst => "sunburst",
            Self::Table => "table",
            Self::Map => "map",
        }
    }

    /// Chart types rendered without the accessor/category/color pipeline.
    #[must_use]
    pub const fn bypasses_pipeline(self) -> bool {
        matches!(self, Self::Table | Self::Map)
    }
}

impl fmt::Display for ChartType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortingType {
    /// Use the dimension/year/numeric ordering rules.
    #[default]
    ByAuto,
    ByDimensionLabel,
    ByMeasure,
    ByTotalSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SortingOrder {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SortingOption {
    pub sorting_type: SortingType,
    #[serde(default)]
    pub sorting_order: SortingOrder,
}

impl SortingOption {
    #[must_use]
    pub const fn new(sorting_type: SortingType, sorting_order: SortingOrder) -> Self {
        Self {
            sorting_type,
            sorting_order,
        }
    }
}

/// A semantic role bound to one component.
///
/// An empty `component_id` means the role is present but not configured yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ComponentField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortingOption>,
}

impl ComponentField {
    #[must_use]
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            sorting: None,
        }
    }

    #[must_use]
    pub fn unset() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sorting(mut self, sorting: SortingOption) -> Self {
        self.sorting = Some(sorting);
        self
    }

    #[must_use]
    pub fn is_set(&self) -> bool {
        !self.component_id.is_empty()
    }

    /// Component id, or `None` while the role is unset.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.is_set().then_some(self.component_id.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SegmentLayout {
    #[default]
    Grouped,
    Stacked,
}

/// Grouping role that splits a chart into series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SegmentField {
    pub component_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sorting: Option<SortingOption>,
    #[serde(default)]
    pub layout: SegmentLayout,
}

impl SegmentField {
    #[must_use]
    pub fn new(component_id: impl Into<String>) -> Self {
        Self {
            component_id: component_id.into(),
            sorting: None,
            layout: SegmentLayout::Grouped,
        }
    }

    #[must_use]
    pub fn stacked(mut self) -> Self {
        self.layout = SegmentLayout::Stacked;
        self
    }

    #[must_use]
    pub fn with_sorting(mut self, sorting: SortingOption) -> Self {
        self.sorting = Some(sorting);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        (!self.component_id.is_empty()).then_some(self.component_id.as_str())
    }
}

/// How category colors are chosen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ColorField {
    /// One flat color for every category.
    Single { color: String },
    /// Explicit canonical-id → color table.
    Mapping {
        color_mapping: IndexMap<String, String>,
    },
    /// Colors assigned from a named palette in domain order.
    Palette { palette: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ColumnFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Horizontal bars: `x` names the measure and `y` the categorical dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct BarFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Line and area charts over a temporal `x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LineFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Both axes are measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScatterplotFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Pie and donut: the segment role is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PieFields {
    pub y: ComponentField,
    pub segment: SegmentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapFields {
    pub x: ComponentField,
    pub y: ComponentField,
    pub value: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SankeyFields {
    pub source: ComponentField,
    pub target: ComponentField,
    pub value: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Boxplot and waterfall: categorical `x`, numeric `y`, no segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CategoryValueFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PolarFields {
    pub angle: ComponentField,
    pub radius: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Radar: `x` names the spoke dimension, `y` the measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RadarFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WordcloudFields {
    pub word: ComponentField,
    pub size: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

/// Treemap and sunburst: `x` groups parents, the optional segment nests
/// children below them, `y` sizes the leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HierarchyFields {
    pub x: ComponentField,
    pub y: ComponentField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segment: Option<SegmentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub component_id: String,
    #[serde(default)]
    pub hidden: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TableFields {
    pub columns: Vec<TableColumn>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MapFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<ComponentField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<ComponentField>,
}

fn default_donut_inner_radius() -> f64 {
    0.5
}

fn default_table_page_size() -> usize {
    25
}

/// Validated chart configuration, one variant per chart type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "chartType", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ChartConfiguration {
    Column {
        fields: ColumnFields,
    },
    Bar {
        fields: BarFields,
    },
    Line {
        fields: LineFields,
    },
    Area {
        fields: LineFields,
    },
    Scatterplot {
        fields: ScatterplotFields,
    },
    Pie {
        fields: PieFields,
    },
    Donut {
        fields: PieFields,
        /// Inner radius as a fraction of the outer radius.
        #[serde(default = "default_donut_inner_radius")]
        inner_radius: f64,
    },
    Heatmap {
        fields: HeatmapFields,
    },
    Sankey {
        fields: SankeyFields,
    },
    Boxplot {
        fields: CategoryValueFields,
    },
    Waterfall {
        fields: CategoryValueFields,
    },
    Polar {
        fields: PolarFields,
    },
    Radar {
        fields: RadarFields,
    },
    Wordcloud {
        fields: WordcloudFields,
    },
    Treemap {
        fields: HierarchyFields,
    },
    Sunburst {
        fields: HierarchyFields,
    },
    Table {
        fields: TableFields,
        #[serde(default = "default_table_page_size")]
        page_size: usize,
    },
    Map {
        fields: MapFields,
    },
}

impl ChartConfiguration {
    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        match self {
            Self::Column { .. } => ChartType::Column,
            Self::Bar { .. } => ChartType::Bar,
            Self::Line { .. } => ChartType::Line,
            Self::Area { .. } => ChartType::Area,
            Self::Scatterplot { .. } => ChartType::Scatterplot,
            Self::Pie { .. } => ChartType::Pie,
            Self::Donut { .. } => ChartType::Donut,
            Self::Heatmap { .. } => ChartType::Heatmap,
            Self::Sankey { .. } => ChartType::Sankey,
            Self::Boxplot { .. } => ChartType::Boxplot,
            Self::Waterfall { .. } => ChartType::Waterfall,
            Self::Polar { .. } => ChartType::Polar,
            Self::Radar { .. } => ChartType::Radar,
            Self::Wordcloud { .. } => ChartType::Wordcloud,
            Self::Treemap { .. } => ChartType::Treemap,
            Self::Sunburst { .. } => ChartType::Sunburst,
            Self::Table { .. } => ChartType::Table,
            Self::Map { .. } => ChartType::Map,
        }
    }

    #[must_use]
    pub fn color_field(&self) -> Option<&ColorField> {
        match self {
            Self::Column { fields } => fields.color.as_ref(),
            Self::Bar { fields } => fields.color.as_ref(),
            Self::Line { fields } | Self::Area { fields } => fields.color.as_ref(),
            Self::Scatterplot { fields } => fields.color.as_ref(),
            Self::Pie { fields } | Self::Donut { fields, .. } => fields.color.as_ref(),
            Self::Heatmap { fields } => fields.color.as_ref(),
            Self::Sankey { fields } => fields.color.as_ref(),
            Self::Boxplot { fields } | Self::Waterfall { fields } => fields.color.as_ref(),
            Self::Polar { fields } => fields.color.as_ref(),
            Self::Radar { fields } => fields.color.as_ref(),
            Self::Wordcloud { fields } => fields.color.as_ref(),
            Self::Treemap { fields } | Self::Sunburst { fields } => fields.color.as_ref(),
            Self::Table { .. } | Self::Map { .. } => None,
        }
    }

    /// Segment role, when the variant declares one.
    #[must_use]
    pub fn segment_field(&self) -> Option<&SegmentField> {
        match self {
            Self::Column { fields } => fields.segment.as_ref(),
            Self::Bar { fields } => fields.segment.as_ref(),
            Self::Line { fields } | Self::Area { fields } => fields.segment.as_ref(),
            Self::Scatterplot { fields } => fields.segment.as_ref(),
            Self::Pie { fields } | Self::Donut { fields, .. } => Some(&fields.segment),
            Self::Polar { fields } => fields.segment.as_ref(),
            Self::Radar { fields } => fields.segment.as_ref(),
            Self::Treemap { fields } | Self::Sunburst { fields } => fields.segment.as_ref(),
            Self::Heatmap { .. }
            | Self::Sankey { .. }
            | Self::Boxplot { .. }
            | Self::Waterfall { .. }
            | Self::Wordcloud { .. }
            | Self::Table { .. }
            | Self::Map { .. } => None,
        }
    }

    /// Sorting configured for the categorical role (the role that `get_x`
    /// reads after any axis swap).
    #[must_use]
    pub fn category_sorting(&self) -> Option<SortingOption> {
        match self {
            Self::Column { fields } => fields.x.sorting,
            Self::Bar { fields } => fields.y.sorting,
            Self::Line { fields } | Self::Area { fields } => fields.x.sorting,
            Self::Heatmap { fields } => fields.x.sorting,
            Self::Boxplot { fields } | Self::Waterfall { fields } => fields.x.sorting,
            Self::Polar { fields } => fields.angle.sorting,
            Self::Radar { fields } => fields.x.sorting,
            Self::Wordcloud { fields } => fields.word.sorting,
            Self::Treemap { fields } | Self::Sunburst { fields } => fields.x.sorting,
            Self::Sankey { fields } => fields.source.sorting,
            Self::Scatterplot { .. }
            | Self::Pie { .. }
            | Self::Donut { .. }
            | Self::Table { .. }
            | Self::Map { .. } => None,
        }
    }

    /// Sorting for the segment role. Sankey targets fill the segment slot.
    #[must_use]
    pub fn segment_sorting(&self) -> Option<SortingOption> {
        match self {
            Self::Sankey { fields } => fields.target.sorting,
            _ => self.segment_field().and_then(|segment| segment.sorting),
        }
    }

    /// Sorting for the heatmap's row role.
    #[must_use]
    pub fn row_sorting(&self) -> Option<SortingOption> {
        match self {
            Self::Heatmap { fields } => fields.y.sorting,
            _ => None,
        }
    }

    #[must_use]
    pub fn is_stacked(&self) -> bool {
        self.segment_field()
            .is_some_and(|segment| segment.layout == SegmentLayout::Stacked)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse chart configuration json: {e}"))
        })
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::Serialization(format!("failed to serialize chart configuration: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfiguration, ChartType, ColorField, SegmentLayout, SortingType};

    #[test]
    fn bar_configuration_parses_with_camel_case_tags() {
        let config = ChartConfiguration::from_json_str(
            r#"{
                "chartType": "bar",
                "fields": {
                    "x": { "componentId": "amount" },
                    "y": {
                        "componentId": "canton",
                        "sorting": { "sortingType": "byMeasure", "sortingOrder": "desc" }
                    },
                    "segment": { "componentId": "sector", "layout": "stacked" },
                    "color": { "type": "palette", "palette": "dark2" }
                }
            }"#,
        )
        .expect("bar config");

        assert_eq!(config.chart_type(), ChartType::Bar);
        assert!(config.is_stacked());
        assert_eq!(
            config.category_sorting().map(|sorting| sorting.sorting_type),
            Some(SortingType::ByMeasure)
        );
        assert_eq!(
            config.color_field(),
            Some(&ColorField::Palette {
                palette: "dark2".to_owned()
            })
        );
        assert_eq!(
            config.segment_field().map(|segment| segment.layout),
            Some(SegmentLayout::Stacked)
        );
    }

    #[test]
    fn pie_without_segment_is_rejected() {
        let parsed = ChartConfiguration::from_json_str(
            r#"{ "chartType": "pie", "fields": { "y": { "componentId": "amount" } } }"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn donut_and_table_fill_defaults() {
        let donut = ChartConfiguration::from_json_str(
            r#"{ "chartType": "donut", "fields": {
                "y": { "componentId": "amount" },
                "segment": { "componentId": "sector" } } }"#,
        )
        .expect("donut");
        assert!(matches!(donut, ChartConfiguration::Donut { inner_radius, .. } if inner_radius == 0.5));

        let table = ChartConfiguration::from_json_str(
            r#"{ "chartType": "table", "fields": { "columns": [] } }"#,
        )
        .expect("table");
        assert!(matches!(table, ChartConfiguration::Table { page_size: 25, .. }));
    }

    #[test]
    fn explicit_color_mapping_round_trips_through_json() {
        let config = ChartConfiguration::from_json_str(
            r##"{ "chartType": "column", "fields": {
                "x": { "componentId": "year" },
                "y": { "componentId": "amount" },
                "color": { "type": "mapping", "colorMapping": { "https://ex.org/a": "#111111" } } } }"##,
        )
        .expect("column");
        let json = config.to_json_pretty().expect("serialize");
        let back = ChartConfiguration::from_json_str(&json).expect("reparse");
        assert_eq!(back, config);
        assert!(json.contains("colorMapping"));
    }

    #[test]
    fn chart_type_display_matches_serde_tag() {
        for chart_type in ChartType::ALL {
            let tag = serde_json::to_value(chart_type).expect("tag");
            assert_eq!(tag.as_str(), Some(chart_type.as_str()));
        }
    }
}
