use std::io;
use std::sync::{Arc, Mutex};

use chart_state::ChartError;
use chart_state::api::{AdapterRegistry, Registration, UniversalStateInput};
use chart_state::core::{
    ChartConfiguration, ChartType, ColumnFields, ComponentField, MapFields, Observation,
    TableColumn, TableFields,
};
use chart_state::render::{ChartOptions, RenderContext, StatefulChartAdapter};
use chart_state::{UniversalChartState, register_builtin_adapters};
use serde_json::json;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("log buffer").clone();
        String::from_utf8(bytes).expect("utf-8 logs")
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("log buffer").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn column_state() -> UniversalChartState {
    let configuration = ChartConfiguration::Column {
        fields: ColumnFields {
            x: ComponentField::new("year"),
            y: ComponentField::new("amount"),
            segment: None,
            color: None,
        },
    };
    UniversalStateInput::new(
        Arc::new(configuration),
        Arc::new(vec![Observation::new().with("year", "2020").with("amount", 1.0)]),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
    )
    .assemble()
}

fn tagged_adapter(
    tag: &'static str,
) -> impl Fn(&UniversalChartState) -> ChartOptions + Send + Sync + 'static {
    move |_state| json!({ "tag": tag })
}

#[test]
fn resolve_invokes_the_registered_adapter() {
    let registry = AdapterRegistry::new();
    assert_eq!(
        registry.register(ChartType::Column, tagged_adapter("first")),
        Registration::Inserted
    );

    let options = registry.resolve(&column_state()).expect("column registered");
    assert_eq!(options, json!({ "tag": "first" }));
}

#[test]
fn overwriting_replaces_the_adapter_and_warns_once() {
    let registry = AdapterRegistry::new();
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::WARN)
        .finish();

    let (first, second) = tracing::subscriber::with_default(subscriber, || {
        (
            registry.register(ChartType::Column, tagged_adapter("first")),
            registry.register(ChartType::Column, tagged_adapter("second")),
        )
    });

    assert_eq!(first, Registration::Inserted);
    assert_eq!(second, Registration::Replaced);
    let options = registry.resolve(&column_state()).expect("column registered");
    assert_eq!(options, json!({ "tag": "second" }));

    let output = logs.contents();
    assert_eq!(output.matches("overwriting existing registration").count(), 1);
    assert!(output.contains("column"));
}

#[test]
fn resolving_an_unregistered_type_names_it() {
    let registry = AdapterRegistry::new();
    let error = registry
        .resolve(&column_state())
        .expect_err("nothing registered");

    assert!(matches!(
        error,
        ChartError::AdapterNotRegistered {
            chart_type: ChartType::Column
        }
    ));
    assert!(error.to_string().contains("column"));
}

#[test]
fn has_list_and_clear_reflect_registrations() {
    let registry = AdapterRegistry::new();
    registry.register(ChartType::Pie, tagged_adapter("pie"));
    registry.register(ChartType::Bar, tagged_adapter("bar"));

    assert!(registry.has(ChartType::Pie));
    assert!(!registry.has(ChartType::Line));
    assert_eq!(registry.list_registered(), vec![ChartType::Bar, ChartType::Pie]);

    registry.clear();
    assert!(registry.list_registered().is_empty());
    assert!(!registry.has(ChartType::Pie));
}

#[test]
fn builtin_registration_covers_every_type_but_map() {
    let registry = AdapterRegistry::new();
    register_builtin_adapters(&registry);

    for chart_type in ChartType::ALL {
        match chart_type {
            ChartType::Map => {
                assert!(!registry.has(chart_type));
                assert!(!registry.has_stateful(chart_type));
            }
            ChartType::Table => assert!(registry.has_stateful(chart_type)),
            _ => assert!(registry.has(chart_type), "missing adapter for {chart_type}"),
        }
    }
}

#[test]
fn map_states_resolve_to_a_registration_error() {
    let registry = AdapterRegistry::new();
    register_builtin_adapters(&registry);
    let state = UniversalStateInput::new(
        Arc::new(ChartConfiguration::Map {
            fields: MapFields::default(),
        }),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
    )
    .assemble();

    assert!(matches!(
        registry.resolve(&state),
        Err(ChartError::AdapterNotRegistered {
            chart_type: ChartType::Map
        })
    ));
}

struct CountingTable {
    renders: Mutex<usize>,
}

impl StatefulChartAdapter for CountingTable {
    fn render(
        &self,
        _state: &UniversalChartState,
        context: &mut RenderContext,
    ) -> chart_state::ChartResult<ChartOptions> {
        *self.renders.lock().expect("counter") += 1;
        context.page_count = 7;
        Ok(json!({ "custom": true }))
    }
}

#[test]
fn stateful_adapters_live_beside_pure_ones() {
    let registry = AdapterRegistry::new();
    let adapter = Arc::new(CountingTable {
        renders: Mutex::new(0),
    });
    assert_eq!(
        registry.register_stateful(ChartType::Table, adapter.clone()),
        Registration::Inserted
    );
    assert!(registry.has_stateful(ChartType::Table));
    assert!(!registry.has(ChartType::Table));
    assert_eq!(registry.list_registered_stateful(), vec![ChartType::Table]);

    let state = UniversalStateInput::new(
        Arc::new(ChartConfiguration::Table {
            fields: TableFields {
                columns: vec![TableColumn {
                    component_id: "year".to_owned(),
                    hidden: false,
                }],
            },
            page_size: 10,
        }),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
        Arc::new(Vec::new()),
    )
    .assemble();

    let mut context = RenderContext::new();
    let options = registry
        .render_stateful(&state, &mut context)
        .expect("table registered");
    assert_eq!(options, json!({ "custom": true }));
    assert_eq!(context.page_count, 7);
    assert_eq!(*adapter.renders.lock().expect("counter"), 1);
    assert!(registry.resolve_stateful(ChartType::Table).is_some());
    assert!(registry.resolve(&state).is_err());
}

#[test]
fn adapters_may_reenter_the_registry() {
    let registry = Arc::new(AdapterRegistry::new());
    let inner = Arc::clone(&registry);
    registry.register(ChartType::Column, move |state| {
        json!({ "registered": inner.has(state.chart_type()) })
    });

    let options = registry.resolve(&column_state()).expect("column registered");
    assert_eq!(options, json!({ "registered": true }));
}
