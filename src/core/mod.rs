pub mod chart_config;
pub mod layout;
pub mod metadata;
pub mod observation;
pub mod primitives;

pub use chart_config::{
    BarFields, CategoryValueFields, ChartConfiguration, ChartType, ColorField, ColumnFields,
    ComponentField, HeatmapFields, HierarchyFields, LineFields, MapFields, PieFields,
    PolarFields, RadarFields, SankeyFields, ScatterplotFields, SegmentField, SegmentLayout,
    SortingOption, SortingOrder, SortingType, TableColumn, TableFields, WordcloudFields,
};
pub use layout::{ChartBounds, Margins};
pub use metadata::{ComponentLookup, Dimension, DimensionKind, DimensionValue, Measure};
pub use observation::{Observation, ObservationValue};
