use std::collections::HashMap;

use indexmap::IndexSet;
use ordered_float::OrderedFloat;
use tracing::trace;

use crate::core::primitives::{parse_plain_number, parse_year_label};
use crate::core::{Dimension, Observation, SortingOption, SortingOrder, SortingType};

use super::accessors::{NumberAccessor, StringAccessor};

/// Externally configured ordering for one role.
///
/// Built from the configuration's [`SortingOption`]; measure-based sorting
/// types aggregate through `get_measure` and fall back to encounter order
/// when it is absent.
#[derive(Clone)]
pub struct CategorySorter {
    option: SortingOption,
    get_measure: Option<NumberAccessor>,
}

impl CategorySorter {
    /// Returns `None` for `byAuto`, which defers to the built-in rules.
    #[must_use]
    pub fn from_option(option: SortingOption, get_measure: Option<NumberAccessor>) -> Option<Self> {
        if option.sorting_type == SortingType::ByAuto {
            return None;
        }
        Some(Self {
            option,
            get_measure,
        })
    }

    #[must_use]
    pub fn option(&self) -> SortingOption {
        self.option
    }

    fn sort(
        &self,
        values: Vec<String>,
        observations: &[Observation],
        get_key: &StringAccessor,
        dimension: Option<&Dimension>,
    ) -> Vec<String> {
        let mut keyed: Vec<(String, SortKey)> = match self.option.sorting_type {
            SortingType::ByAuto => return values,
            SortingType::ByDimensionLabel => values
                .into_iter()
                .map(|value| {
                    let label = dimension
                        .and_then(|dimension| dimension.find_value(&value))
                        .map_or_else(|| value.clone(), |found| found.label.clone());
                    (value, SortKey::Label(label))
                })
                .collect(),
            SortingType::ByMeasure | SortingType::ByTotalSize => {
                let totals = self.totals(observations, get_key);
                values
                    .into_iter()
                    .map(|value| {
                        let total = totals.get(&value).copied().unwrap_or(0.0);
                        (value, SortKey::Total(OrderedFloat(total)))
                    })
                    .collect()
            }
        };

        keyed.sort_by(|(_, a), (_, b)| {
            let ordering = a.cmp(b);
            match self.option.sorting_order {
                SortingOrder::Asc => ordering,
                SortingOrder::Desc => ordering.reverse(),
            }
        });
        keyed.into_iter().map(|(value, _)| value).collect()
    }

    fn totals(&self, observations: &[Observation], get_key: &StringAccessor) -> HashMap<String, f64> {
        let mut totals = HashMap::new();
        let Some(get_measure) = &self.get_measure else {
            return totals;
        };
        for observation in observations {
            if let Some(value) = get_measure(observation) {
                *totals.entry(get_key(observation)).or_insert(0.0) += value;
            }
        }
        totals
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortKey {
    Label(String),
    Total(OrderedFloat<f64>),
}

/// Distinct, deterministically ordered category values.
///
/// Precedence: configured sorter, explicit dimension order, year labels,
/// plain numbers, first occurrence. Empty values are treated as missing data.
#[must_use]
pub fn extract_categories(
    observations: &[Observation],
    get_x: &StringAccessor,
    x_dimension: Option<&Dimension>,
    sorter: Option<&CategorySorter>,
) -> Vec<String> {
    let ordered = extract_ordered(observations, get_x, x_dimension, sorter);
    trace!(count = ordered.len(), "extracted categories");
    ordered
}

/// Same ordering rules as [`extract_categories`], applied to segment values.
#[must_use]
pub fn extract_segments(
    observations: &[Observation],
    get_segment: &StringAccessor,
    segment_dimension: Option<&Dimension>,
    sorter: Option<&CategorySorter>,
) -> Vec<String> {
    let ordered = extract_ordered(observations, get_segment, segment_dimension, sorter);
    trace!(count = ordered.len(), "extracted segments");
    ordered
}

fn extract_ordered(
    observations: &[Observation],
    get_key: &StringAccessor,
    dimension: Option<&Dimension>,
    sorter: Option<&CategorySorter>,
) -> Vec<String> {
    let distinct: IndexSet<String> = observations
        .iter()
        .map(|observation| get_key(observation))
        .filter(|value| !value.is_empty())
        .collect();
    let values: Vec<String> = distinct.into_iter().collect();

    if let Some(sorter) = sorter {
        return sorter.sort(values, observations, get_key, dimension);
    }
    if let Some(dimension) = dimension.filter(|dimension| !dimension.values.is_empty()) {
        return sort_by_dimension_order(values, dimension);
    }
    if let Some(sorted) = sort_by_year(&values) {
        return sorted;
    }
    if let Some(sorted) = sort_numerically(&values) {
        return sorted;
    }
    values
}

/// Position in the dimension's declared values, by raw value or label.
/// Unknown values go last and keep their encounter order.
#[must_use]
pub fn sort_by_dimension_order(values: Vec<String>, dimension: &Dimension) -> Vec<String> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (position, value) in dimension.values.iter().enumerate() {
        positions.entry(value.value.as_str()).or_insert(position);
        positions.entry(value.label.as_str()).or_insert(position);
    }
    let mut keyed: Vec<(usize, String)> = values
        .into_iter()
        .map(|value| {
            let position = positions.get(value.as_str()).copied().unwrap_or(usize::MAX);
            (position, value)
        })
        .collect();
    keyed.sort_by_key(|(position, _)| *position);
    keyed.into_iter().map(|(_, value)| value).collect()
}

fn sort_by_year(values: &[String]) -> Option<Vec<String>> {
    sort_when_all_parse(values, |value| parse_year_label(value).map(f64::from))
}

fn sort_numerically(values: &[String]) -> Option<Vec<String>> {
    sort_when_all_parse(values, parse_plain_number)
}

fn sort_when_all_parse(
    values: &[String],
    parse: impl Fn(&str) -> Option<f64>,
) -> Option<Vec<String>> {
    if values.is_empty() {
        return None;
    }
    let mut keyed = values
        .iter()
        .map(|value| parse(value.as_str()).map(|key| (OrderedFloat(key), value.clone())))
        .collect::<Option<Vec<_>>>()?;
    keyed.sort_by(|(a, _), (b, _)| a.cmp(b));
    Some(keyed.into_iter().map(|(_, value)| value).collect())
}
