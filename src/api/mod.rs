//! State pipeline: accessors → categories/segments → colors → universal
//! state → adapter dispatch.

pub mod accessors;
pub mod adapter_registry;
pub mod categories;
pub mod colors;
pub mod formatting;
pub mod palettes;
mod state_memo;
mod universal_state;

pub use accessors::{
    BuildFieldAccessors, DateAccessor, FieldAccessors, NumberAccessor, RENDERING_KEY_SEPARATOR,
    StringAccessor, build_field_accessors, number_accessor, rendering_key_accessor,
    string_accessor, temporal_accessor,
};
pub use adapter_registry::{AdapterRegistry, ChartAdapterFn, Registration, global_registry};
pub use categories::{CategorySorter, extract_categories, extract_segments};
pub use colors::{ColorAccessors, ColorScale, ColorStrategy, build_color_accessors};
pub use formatting::{
    DateFormatterFn, FormatLocale, Formatters, NumberFormatterFn, TimeUnit, format_date,
    format_number,
};
pub use state_memo::{StateMemoStats, UniversalStateMemo};
pub use universal_state::{
    DisplayOptions, UniversalChartState, UniversalStateInput, assemble_universal_state,
};
