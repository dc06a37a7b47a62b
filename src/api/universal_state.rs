use std::sync::Arc;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    ChartBounds, ChartConfiguration, ChartType, ComponentLookup, Dimension, Measure, Observation,
};

use super::accessors::{FieldAccessors, StringAccessor};
use super::categories::{CategorySorter, extract_categories, extract_segments};
use super::colors::{ColorAccessors, build_color_accessors};
use super::formatting::Formatters;

/// Presentation switches shared by all adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    #[serde(default = "default_true")]
    pub show_legend: bool,
    #[serde(default = "default_true")]
    pub show_tooltip: bool,
    #[serde(default)]
    pub show_values: bool,
    #[serde(default)]
    pub show_dots: bool,
}

fn default_true() -> bool {
    true
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_legend: true,
            show_tooltip: true,
            show_values: false,
            show_dots: false,
        }
    }
}

impl DisplayOptions {
    #[must_use]
    pub fn with_legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, show: bool) -> Self {
        self.show_tooltip = show;
        self
    }

    #[must_use]
    pub fn with_values(mut self, show: bool) -> Self {
        self.show_values = show;
        self
    }

    #[must_use]
    pub fn with_dots(mut self, show: bool) -> Self {
        self.show_dots = show;
        self
    }
}

/// Everything the assembler reads.
///
/// Shared inputs are reference counted so callers can memoize on identity
/// (see [`super::UniversalStateMemo`]).
#[derive(Debug, Clone)]
pub struct UniversalStateInput {
    pub configuration: Arc<ChartConfiguration>,
    pub observations: Arc<Vec<Observation>>,
    pub dimensions: Arc<Vec<Dimension>>,
    pub measures: Arc<Vec<Measure>>,
    pub bounds: ChartBounds,
    pub formatters: Formatters,
    pub display: DisplayOptions,
}

impl UniversalStateInput {
    #[must_use]
    pub fn new(
        configuration: Arc<ChartConfiguration>,
        observations: Arc<Vec<Observation>>,
        dimensions: Arc<Vec<Dimension>>,
        measures: Arc<Vec<Measure>>,
    ) -> Self {
        Self {
            configuration,
            observations,
            dimensions,
            measures,
            bounds: ChartBounds::default(),
            formatters: Formatters::default(),
            display: DisplayOptions::default(),
        }
    }

    #[must_use]
    pub fn with_bounds(mut self, bounds: ChartBounds) -> Self {
        self.bounds = bounds;
        self
    }

    #[must_use]
    pub fn with_formatters(mut self, formatters: Formatters) -> Self {
        self.formatters = formatters;
        self
    }

    #[must_use]
    pub fn with_display(mut self, display: DisplayOptions) -> Self {
        self.display = display;
        self
    }

    /// `true` when both inputs point at the same shared data and carry equal
    /// layout/display values.
    #[must_use]
    pub fn same_identity(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.configuration, &other.configuration)
            && Arc::ptr_eq(&self.observations, &other.observations)
            && Arc::ptr_eq(&self.dimensions, &other.dimensions)
            && Arc::ptr_eq(&self.measures, &other.measures)
            && Arc::ptr_eq(&self.formatters.number, &other.formatters.number)
            && Arc::ptr_eq(&self.formatters.date, &other.formatters.date)
            && self.bounds == other.bounds
            && self.display == other.display
    }

    /// Pure aggregation of accessors, ordered categories/segments and colors.
    #[must_use]
    pub fn assemble(&self) -> UniversalChartState {
        let configuration = &self.configuration;
        let observations = self.observations.as_slice();
        let lookup = ComponentLookup::new(&self.dimensions, &self.measures);
        let fields = configuration.build_field_accessors(&lookup);

        let categories = fields.get_x.as_ref().map_or_else(Vec::new, |get_x| {
            let sorter = configuration
                .category_sorting()
                .and_then(|option| CategorySorter::from_option(option, fields.get_y.clone()));
            extract_categories(
                observations,
                get_x,
                fields.x_dimension.as_ref(),
                sorter.as_ref(),
            )
        });

        let segment_accessor = match configuration.chart_type() {
            ChartType::Sankey => fields.get_target.as_ref(),
            _ => fields.get_segment.as_ref(),
        };
        let segments = segment_accessor.map_or_else(Vec::new, |get_segment| {
            let sorter = configuration
                .segment_sorting()
                .and_then(|option| CategorySorter::from_option(option, fields.get_y.clone()));
            extract_segments(
                observations,
                get_segment,
                fields.segment_dimension.as_ref(),
                sorter.as_ref(),
            )
        });

        let colors = color_accessors_for(configuration, &fields, &categories, &segments);

        debug!(
            chart_type = %configuration.chart_type(),
            observations = observations.len(),
            categories = categories.len(),
            segments = segments.len(),
            "assembled universal chart state"
        );

        UniversalChartState {
            chart_type: configuration.chart_type(),
            configuration: Arc::clone(configuration),
            observations: Arc::clone(&self.observations),
            dimensions: Arc::clone(&self.dimensions),
            measures: Arc::clone(&self.measures),
            lookup,
            fields,
            colors,
            categories,
            segments,
            bounds: self.bounds,
            formatters: self.formatters.clone(),
            display: self.display,
        }
    }
}

/// Picks the color domain: segments when the chart is segmented, the union
/// of nodes for sankey, categories otherwise.
fn color_accessors_for(
    configuration: &ChartConfiguration,
    fields: &FieldAccessors,
    categories: &[String],
    segments: &[String],
) -> ColorAccessors {
    let color_field = configuration.color_field();
    if configuration.chart_type() == ChartType::Sankey {
        let nodes: Vec<String> = categories
            .iter()
            .chain(segments)
            .cloned()
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect();
        return build_color_accessors(color_field, &nodes, fields.x_dimension.as_ref(), None);
    }

    let segmented = configuration
        .segment_field()
        .and_then(|segment| segment.id())
        .is_some();
    if segmented {
        return build_color_accessors(
            color_field,
            segments,
            fields.segment_dimension.as_ref(),
            fields.get_segment.clone(),
        );
    }
    build_color_accessors(
        color_field,
        categories,
        fields.x_dimension.as_ref(),
        fields.get_x.clone(),
    )
}

/// Convenience wrapper around [`UniversalStateInput::assemble`].
#[must_use]
pub fn assemble_universal_state(input: &UniversalStateInput) -> UniversalChartState {
    input.assemble()
}

/// Immutable, renderer-agnostic snapshot of one chart.
///
/// Rebuilt whenever any input changes; adapters only read it.
#[derive(Debug, Clone)]
pub struct UniversalChartState {
    chart_type: ChartType,
    configuration: Arc<ChartConfiguration>,
    observations: Arc<Vec<Observation>>,
    dimensions: Arc<Vec<Dimension>>,
    measures: Arc<Vec<Measure>>,
    lookup: ComponentLookup,
    fields: FieldAccessors,
    colors: ColorAccessors,
    categories: Vec<String>,
    segments: Vec<String>,
    bounds: ChartBounds,
    formatters: Formatters,
    display: DisplayOptions,
}

impl UniversalChartState {
    #[must_use]
    pub fn chart_type(&self) -> ChartType {
        self.chart_type
    }

    #[must_use]
    pub fn configuration(&self) -> &ChartConfiguration {
        &self.configuration
    }

    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    #[must_use]
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    #[must_use]
    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    /// Dimension/measure metadata keyed by component id.
    #[must_use]
    pub fn lookup(&self) -> &ComponentLookup {
        &self.lookup
    }

    #[must_use]
    pub fn fields(&self) -> &FieldAccessors {
        &self.fields
    }

    #[must_use]
    pub fn colors(&self) -> &ColorAccessors {
        &self.colors
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[must_use]
    pub fn bounds(&self) -> ChartBounds {
        self.bounds
    }

    #[must_use]
    pub fn formatters(&self) -> &Formatters {
        &self.formatters
    }

    #[must_use]
    pub fn display(&self) -> DisplayOptions {
        self.display
    }

    /// Category accessor when the chart has one.
    #[must_use]
    pub fn category_accessor(&self) -> Option<&StringAccessor> {
        self.fields.get_x.as_ref()
    }
}
