//! Paginated, sortable table rendered through the stateful adapter contract.

use std::sync::Arc;

use ordered_float::OrderedFloat;
use serde_json::{Value, json};
use tracing::debug;

use crate::api::{AdapterRegistry, UniversalChartState};
use crate::core::{ChartConfiguration, ChartType, Observation, SortingOrder, TableColumn};
use crate::error::{ChartError, ChartResult};
use crate::render::{ChartOptions, RenderContext, StatefulChartAdapter};

pub fn register(registry: &AdapterRegistry) {
    registry.register_stateful(ChartType::Table, Arc::new(TableAdapter));
}

/// Table adapter; pagination and sort live in the host's [`RenderContext`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableAdapter;

impl StatefulChartAdapter for TableAdapter {
    fn render(
        &self,
        state: &UniversalChartState,
        context: &mut RenderContext,
    ) -> ChartResult<ChartOptions> {
        let ChartConfiguration::Table { fields, page_size } = state.configuration() else {
            return Err(ChartError::InvalidData(format!(
                "table adapter cannot render {} charts",
                state.chart_type()
            )));
        };
        let columns: Vec<&TableColumn> =
            fields.columns.iter().filter(|column| !column.hidden).collect();

        let mut rows: Vec<&Observation> = state.observations().iter().collect();
        if let Some(sort) = context.sort.as_ref() {
            if !columns
                .iter()
                .any(|column| column.component_id == sort.component_id)
            {
                return Err(ChartError::InvalidData(format!(
                    "cannot sort by `{}`: not a visible table column",
                    sort.component_id
                )));
            }
            let mut keyed: Vec<(CellKey, &Observation)> = rows
                .into_iter()
                .map(|observation| (CellKey::of(observation, &sort.component_id), observation))
                .collect();
            keyed.sort_by(|(left, _), (right, _)| match sort.order {
                SortingOrder::Asc => left.cmp(right),
                SortingOrder::Desc => right.cmp(left),
            });
            rows = keyed.into_iter().map(|(_, observation)| observation).collect();
        }

        let page_size = (*page_size).max(1);
        let total_rows = rows.len();
        let page_count = total_rows.div_ceil(page_size).max(1);
        let page = context.page.min(page_count - 1);
        context.page = page;
        context.page_count = page_count;

        let body: Vec<Value> = rows
            .iter()
            .skip(page * page_size)
            .take(page_size)
            .map(|observation| {
                let cells: Vec<String> = columns
                    .iter()
                    .map(|column| format_cell(state, observation, &column.component_id))
                    .collect();
                json!(cells)
            })
            .collect();
        let header: Vec<Value> = columns
            .iter()
            .map(|column| {
                json!({
                    "id": column.component_id,
                    "label": state.lookup().label(&column.component_id),
                })
            })
            .collect();

        debug!(
            total_rows,
            page, page_count, sorted = context.sort.is_some(), "rendered table page"
        );

        Ok(json!({
            "columns": header,
            "rows": body,
            "page": page,
            "pageCount": page_count,
            "totalRows": total_rows,
        }))
    }
}

/// Sort key for one cell. Numeric cells rank before text cells, so a column
/// mixing both still sorts under a total order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum CellKey {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl CellKey {
    fn of(observation: &Observation, component_id: &str) -> Self {
        match observation.number(component_id) {
            Some(value) => Self::Number(OrderedFloat(value)),
            None => Self::Text(observation.text(component_id)),
        }
    }
}

/// Measures go through the state's number formatter; everything else is
/// shown as its raw display string.
fn format_cell(state: &UniversalChartState, observation: &Observation, component_id: &str) -> String {
    if state.lookup().measure(component_id).is_some() {
        if let Some(value) = observation.number(component_id) {
            return state.formatters().format_number(value);
        }
    }
    observation.text(component_id)
}
