use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::core::primitives::parse_temporal;
use crate::core::{
    BarFields, CategoryValueFields, ChartConfiguration, ColumnFields, ComponentField,
    ComponentLookup, Dimension, DimensionKind, HeatmapFields, HierarchyFields, LineFields,
    Measure, Observation, PieFields, PolarFields, RadarFields, SankeyFields, ScatterplotFields,
    SegmentField, WordcloudFields,
};

pub type StringAccessor = Arc<dyn Fn(&Observation) -> String + Send + Sync + 'static>;
pub type NumberAccessor = Arc<dyn Fn(&Observation) -> Option<f64> + Send + Sync + 'static>;
pub type DateAccessor = Arc<dyn Fn(&Observation) -> Option<DateTime<Utc>> + Send + Sync + 'static>;

/// Separator between the category and segment parts of a rendering key.
pub const RENDERING_KEY_SEPARATOR: &str = "/";

/// Typed field-extraction closures for one chart configuration.
///
/// Whatever the configuration calls its roles, `get_x` is always the
/// categorical (or temporal/positional) accessor and `get_y` the numeric one.
/// Role-named accessors (`get_angle`, `get_word`, ...) alias the same
/// closures for adapters that prefer the chart's own vocabulary.
#[derive(Clone, Default)]
pub struct FieldAccessors {
    pub get_x: Option<StringAccessor>,
    pub get_x_as_date: Option<DateAccessor>,
    pub get_x_as_number: Option<NumberAccessor>,
    pub get_y: Option<NumberAccessor>,
    /// Row category of a heatmap.
    pub get_y_category: Option<StringAccessor>,
    pub get_segment: Option<StringAccessor>,
    pub get_value: Option<NumberAccessor>,
    pub get_source: Option<StringAccessor>,
    pub get_target: Option<StringAccessor>,
    pub get_angle: Option<StringAccessor>,
    pub get_radius: Option<NumberAccessor>,
    pub get_word: Option<StringAccessor>,
    pub get_size: Option<NumberAccessor>,
    pub get_rendering_key: Option<StringAccessor>,
    pub x_label: String,
    pub y_label: String,
    pub segment_label: String,
    pub value_label: String,
    pub x_dimension: Option<Dimension>,
    pub y_dimension: Option<Dimension>,
    pub y_measure: Option<Measure>,
    pub segment_dimension: Option<Dimension>,
    pub value_measure: Option<Measure>,
}

impl FieldAccessors {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when no accessor was built (pipeline-bypassing chart types).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.get_x.is_none()
            && self.get_y.is_none()
            && self.get_segment.is_none()
            && self.get_value.is_none()
            && self.get_source.is_none()
            && self.get_word.is_none()
    }

    #[must_use]
    pub fn x(&self, observation: &Observation) -> String {
        self.get_x
            .as_ref()
            .map(|get| get(observation))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn y(&self, observation: &Observation) -> Option<f64> {
        self.get_y.as_ref().and_then(|get| get(observation))
    }

    #[must_use]
    pub fn segment(&self, observation: &Observation) -> String {
        self.get_segment
            .as_ref()
            .map(|get| get(observation))
            .unwrap_or_default()
    }

    #[must_use]
    pub fn rendering_key(&self, observation: &Observation) -> String {
        self.get_rendering_key
            .as_ref()
            .map(|get| get(observation))
            .unwrap_or_default()
    }
}

impl fmt::Debug for FieldAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldAccessors")
            .field("get_x", &self.get_x.is_some())
            .field("get_x_as_date", &self.get_x_as_date.is_some())
            .field("get_x_as_number", &self.get_x_as_number.is_some())
            .field("get_y", &self.get_y.is_some())
            .field("get_y_category", &self.get_y_category.is_some())
            .field("get_segment", &self.get_segment.is_some())
            .field("get_value", &self.get_value.is_some())
            .field("get_source", &self.get_source.is_some())
            .field("get_target", &self.get_target.is_some())
            .field("get_word", &self.get_word.is_some())
            .field("get_angle", &self.get_angle.is_some())
            .field("get_radius", &self.get_radius.is_some())
            .field("get_size", &self.get_size.is_some())
            .field("get_rendering_key", &self.get_rendering_key.is_some())
            .field("x_label", &self.x_label)
            .field("y_label", &self.y_label)
            .field("segment_label", &self.segment_label)
            .field("value_label", &self.value_label)
            .finish_non_exhaustive()
    }
}

/// Accessor builder attached to each chart variant's field set.
pub trait BuildFieldAccessors {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors;
}

impl ChartConfiguration {
    /// Derives the accessor set for this configuration.
    ///
    /// Chart types that bypass the pipeline get an empty set.
    #[must_use]
    pub fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let accessors = match self {
            Self::Column { fields } => fields.build_field_accessors(lookup),
            Self::Bar { fields } => fields.build_field_accessors(lookup),
            Self::Line { fields } | Self::Area { fields } => fields.build_field_accessors(lookup),
            Self::Scatterplot { fields } => fields.build_field_accessors(lookup),
            Self::Pie { fields } | Self::Donut { fields, .. } => {
                fields.build_field_accessors(lookup)
            }
            Self::Heatmap { fields } => fields.build_field_accessors(lookup),
            Self::Sankey { fields } => fields.build_field_accessors(lookup),
            Self::Boxplot { fields } | Self::Waterfall { fields } => {
                fields.build_field_accessors(lookup)
            }
            Self::Polar { fields } => fields.build_field_accessors(lookup),
            Self::Radar { fields } => fields.build_field_accessors(lookup),
            Self::Wordcloud { fields } => fields.build_field_accessors(lookup),
            Self::Treemap { fields } | Self::Sunburst { fields } => {
                fields.build_field_accessors(lookup)
            }
            Self::Table { .. } | Self::Map { .. } => {
                debug!(
                    chart_type = %self.chart_type(),
                    "chart type bypasses field accessors; returning empty set"
                );
                return FieldAccessors::empty();
            }
        };
        trace!(chart_type = %self.chart_type(), accessors = ?accessors, "built field accessors");
        accessors
    }
}

/// Free-function form of [`ChartConfiguration::build_field_accessors`].
#[must_use]
pub fn build_field_accessors(
    config: &ChartConfiguration,
    lookup: &ComponentLookup,
) -> FieldAccessors {
    config.build_field_accessors(lookup)
}

/// Stringified field value; `""` while the role is unset.
#[must_use]
pub fn string_accessor(component_id: Option<&str>) -> StringAccessor {
    match component_id {
        Some(id) => {
            let id = id.to_owned();
            Arc::new(move |observation: &Observation| observation.text(&id))
        }
        None => Arc::new(|_: &Observation| String::new()),
    }
}

/// Parsed numeric field value; `None` while unset, missing or unparseable.
#[must_use]
pub fn number_accessor(component_id: Option<&str>) -> NumberAccessor {
    match component_id {
        Some(id) => {
            let id = id.to_owned();
            Arc::new(move |observation: &Observation| observation.number(&id))
        }
        None => Arc::new(|_: &Observation| None),
    }
}

/// Temporal accessor.
///
/// Temporal-entity dimensions resolve through a table built from their
/// declared values (keyed by raw value and by label) and fall back to direct
/// parsing for values the table does not know.
#[must_use]
pub fn temporal_accessor(
    component_id: Option<&str>,
    dimension: Option<&Dimension>,
) -> DateAccessor {
    let Some(id) = component_id.map(str::to_owned) else {
        return Arc::new(|_: &Observation| None);
    };

    let entity_table = dimension
        .filter(|dimension| dimension.kind == DimensionKind::TemporalEntity)
        .map(|dimension| {
            let mut table: HashMap<String, DateTime<Utc>> = HashMap::new();
            for value in &dimension.values {
                let parsed = parse_temporal(&value.label).or_else(|| parse_temporal(&value.value));
                if let Some(parsed) = parsed {
                    table.insert(value.value.clone(), parsed);
                    table.insert(value.label.clone(), parsed);
                }
            }
            table
        });

    match entity_table {
        Some(table) => Arc::new(move |observation: &Observation| {
            let raw = observation.text(&id);
            table
                .get(&raw)
                .copied()
                .or_else(|| parse_temporal(&raw))
        }),
        None => Arc::new(move |observation: &Observation| parse_temporal(&observation.text(&id))),
    }
}

/// Identity string from the category and the optional segment value.
#[must_use]
pub fn rendering_key_accessor(
    get_category: StringAccessor,
    get_segment: Option<StringAccessor>,
) -> StringAccessor {
    Arc::new(move |observation: &Observation| {
        let mut parts: SmallVec<[String; 2]> = SmallVec::new();
        parts.push(get_category(observation));
        if let Some(get_segment) = &get_segment {
            parts.push(get_segment(observation));
        }
        parts.retain(|part| !part.is_empty());
        parts.join(RENDERING_KEY_SEPARATOR)
    })
}

fn dimension_for(lookup: &ComponentLookup, field: &ComponentField) -> Option<Dimension> {
    field.id().and_then(|id| lookup.dimension(id)).cloned()
}

fn measure_for(lookup: &ComponentLookup, field: &ComponentField) -> Option<Measure> {
    field.id().and_then(|id| lookup.measure(id)).cloned()
}

fn label_for(lookup: &ComponentLookup, component_id: Option<&str>) -> String {
    component_id.map(|id| lookup.label(id)).unwrap_or_default()
}

/// Shared builder for charts with one categorical role, one numeric role and
/// an optional segment.
fn category_value_accessors(
    lookup: &ComponentLookup,
    category: &ComponentField,
    value: &ComponentField,
    segment: Option<&SegmentField>,
) -> FieldAccessors {
    let get_x = string_accessor(category.id());
    let get_segment = segment.map(|segment| string_accessor(segment.id()));
    let segment_id = segment.and_then(SegmentField::id);

    FieldAccessors {
        get_rendering_key: Some(rendering_key_accessor(get_x.clone(), get_segment.clone())),
        get_x: Some(get_x),
        get_y: Some(number_accessor(value.id())),
        get_segment,
        x_label: label_for(lookup, category.id()),
        y_label: label_for(lookup, value.id()),
        segment_label: label_for(lookup, segment_id),
        x_dimension: dimension_for(lookup, category),
        y_measure: measure_for(lookup, value),
        segment_dimension: segment_id.and_then(|id| lookup.dimension(id)).cloned(),
        ..FieldAccessors::default()
    }
}

impl BuildFieldAccessors for ColumnFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        category_value_accessors(lookup, &self.x, &self.y, self.segment.as_ref())
    }
}

impl BuildFieldAccessors for BarFields {
    /// Horizontal bars name the measure `x` and the dimension `y`; swap so
    /// `get_x` stays categorical.
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        category_value_accessors(lookup, &self.y, &self.x, self.segment.as_ref())
    }
}

impl BuildFieldAccessors for LineFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let mut accessors =
            category_value_accessors(lookup, &self.x, &self.y, self.segment.as_ref());
        accessors.get_x_as_date = Some(temporal_accessor(
            self.x.id(),
            accessors.x_dimension.as_ref(),
        ));
        accessors
    }
}

impl BuildFieldAccessors for ScatterplotFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let mut accessors =
            category_value_accessors(lookup, &self.x, &self.y, self.segment.as_ref());
        accessors.get_x_as_number = Some(number_accessor(self.x.id()));
        accessors.x_dimension = None;
        accessors
    }
}

impl BuildFieldAccessors for PieFields {
    /// Pie slices are segments; there is no categorical axis.
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let get_segment = string_accessor(self.segment.id());
        FieldAccessors {
            get_rendering_key: Some(rendering_key_accessor(get_segment.clone(), None)),
            get_segment: Some(get_segment),
            get_y: Some(number_accessor(self.y.id())),
            y_label: label_for(lookup, self.y.id()),
            segment_label: label_for(lookup, self.segment.id()),
            y_measure: measure_for(lookup, &self.y),
            segment_dimension: self.segment.id().and_then(|id| lookup.dimension(id)).cloned(),
            ..FieldAccessors::default()
        }
    }
}

impl BuildFieldAccessors for HeatmapFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let get_x = string_accessor(self.x.id());
        let get_y_category = string_accessor(self.y.id());
        let get_value = number_accessor(self.value.id());
        FieldAccessors {
            get_rendering_key: Some(rendering_key_accessor(
                get_x.clone(),
                Some(get_y_category.clone()),
            )),
            get_x: Some(get_x),
            get_y_category: Some(get_y_category),
            get_y: Some(get_value.clone()),
            get_value: Some(get_value),
            x_label: label_for(lookup, self.x.id()),
            y_label: label_for(lookup, self.y.id()),
            value_label: label_for(lookup, self.value.id()),
            x_dimension: dimension_for(lookup, &self.x),
            y_dimension: dimension_for(lookup, &self.y),
            value_measure: measure_for(lookup, &self.value),
            ..FieldAccessors::default()
        }
    }
}

impl BuildFieldAccessors for SankeyFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let get_source = string_accessor(self.source.id());
        let get_target = string_accessor(self.target.id());
        let get_value = number_accessor(self.value.id());
        FieldAccessors {
            get_rendering_key: Some(rendering_key_accessor(
                get_source.clone(),
                Some(get_target.clone()),
            )),
            get_x: Some(get_source.clone()),
            get_y: Some(get_value.clone()),
            get_source: Some(get_source),
            get_target: Some(get_target),
            get_value: Some(get_value),
            x_label: label_for(lookup, self.source.id()),
            segment_label: label_for(lookup, self.target.id()),
            value_label: label_for(lookup, self.value.id()),
            x_dimension: dimension_for(lookup, &self.source),
            segment_dimension: dimension_for(lookup, &self.target),
            value_measure: measure_for(lookup, &self.value),
            ..FieldAccessors::default()
        }
    }
}

impl BuildFieldAccessors for CategoryValueFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        category_value_accessors(lookup, &self.x, &self.y, None)
    }
}

impl BuildFieldAccessors for PolarFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let mut accessors =
            category_value_accessors(lookup, &self.angle, &self.radius, self.segment.as_ref());
        accessors.get_angle = accessors.get_x.clone();
        accessors.get_radius = accessors.get_y.clone();
        accessors
    }
}

impl BuildFieldAccessors for RadarFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        category_value_accessors(lookup, &self.x, &self.y, self.segment.as_ref())
    }
}

impl BuildFieldAccessors for WordcloudFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        let mut accessors = category_value_accessors(lookup, &self.word, &self.size, None);
        accessors.get_word = accessors.get_x.clone();
        accessors.get_size = accessors.get_y.clone();
        accessors
    }
}

impl BuildFieldAccessors for HierarchyFields {
    fn build_field_accessors(&self, lookup: &ComponentLookup) -> FieldAccessors {
        category_value_accessors(lookup, &self.x, &self.y, self.segment.as_ref())
    }
}
