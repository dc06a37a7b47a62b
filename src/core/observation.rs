use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{format_plain_number, parse_plain_number};

/// One raw cell of fetched data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum ObservationValue {
    #[default]
    Null,
    Number(f64),
    Text(String),
}

impl ObservationValue {
    /// Returns the display string for this value; `Null` becomes `""`.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(value) => format_plain_number(*value),
            Self::Text(text) => text.clone(),
        }
    }

    /// Numeric interpretation: `None` for null, empty, non-finite or
    /// unparseable values. A legitimate zero stays `Some(0.0)`.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Null => None,
            Self::Number(value) => value.is_finite().then_some(*value),
            Self::Text(text) => parse_plain_number(text),
        }
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<f64> for ObservationValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for ObservationValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for ObservationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ObservationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl<T: Into<ObservationValue>> From<Option<T>> for ObservationValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

/// One row of fetched data: a sparse record keyed by component id.
///
/// `IndexMap` keeps the column order the data-fetch layer produced so
/// serialized snapshots stay stable.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Observation {
    values: IndexMap<String, ObservationValue>,
}

impl Observation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, component_id: impl Into<String>, value: impl Into<ObservationValue>) -> Self {
        self.insert(component_id, value);
        self
    }

    pub fn insert(&mut self, component_id: impl Into<String>, value: impl Into<ObservationValue>) {
        self.values.insert(component_id.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, component_id: &str) -> Option<&ObservationValue> {
        self.values.get(component_id)
    }

    /// Stringified field value, `""` when the key is absent or null.
    #[must_use]
    pub fn text(&self, component_id: &str) -> String {
        self.get(component_id)
            .map(ObservationValue::to_display_string)
            .unwrap_or_default()
    }

    #[must_use]
    pub fn number(&self, component_id: &str) -> Option<f64> {
        self.get(component_id).and_then(ObservationValue::as_number)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObservationValue)> {
        self.values.iter().map(|(key, value)| (key.as_str(), value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Observation
where
    K: Into<String>,
    V: Into<ObservationValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Observation, ObservationValue};

    #[test]
    fn untagged_values_deserialize_from_mixed_json() {
        let observation: Observation =
            serde_json::from_str(r#"{"year":"2020","count":12,"missing":null}"#)
                .expect("observation json");
        assert_eq!(observation.get("year"), Some(&ObservationValue::Text("2020".to_owned())));
        assert_eq!(observation.number("count"), Some(12.0));
        assert!(observation.get("missing").is_some_and(ObservationValue::is_null));
        assert_eq!(observation.text("missing"), "");
    }

    #[test]
    fn numeric_view_keeps_zero_and_rejects_garbage() {
        let observation = Observation::new()
            .with("zero", 0.0)
            .with("text_zero", "0")
            .with("empty", "")
            .with("garbage", "n/a");
        assert_eq!(observation.number("zero"), Some(0.0));
        assert_eq!(observation.number("text_zero"), Some(0.0));
        assert_eq!(observation.number("empty"), None);
        assert_eq!(observation.number("garbage"), None);
        assert_eq!(observation.number("absent"), None);
    }
}
