use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Classification of a dimension's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DimensionKind {
    #[default]
    Nominal,
    Ordinal,
    /// Values are timestamps parsed directly from the raw cell.
    Temporal,
    /// Values are a fixed enumerated list of time entities (e.g. year IRIs
    /// labelled `2020`) rather than ISO timestamps.
    TemporalEntity,
}

impl DimensionKind {
    #[must_use]
    pub fn is_temporal(self) -> bool {
        matches!(self, Self::Temporal | Self::TemporalEntity)
    }
}

/// One declared value of a dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionValue {
    /// Raw value, usually an IRI.
    pub value: String,
    pub label: String,
    /// Stable identifier used for color mappings when it differs from `value`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
}

impl DimensionValue {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            identifier: None,
        }
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Canonical identifier: explicit identifier, otherwise the raw value.
    #[must_use]
    pub fn canonical_id(&self) -> &str {
        self.identifier.as_deref().unwrap_or(&self.value)
    }

    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        self.value == key || self.label == key
    }
}

/// Categorical axis or grouping descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub id: String,
    pub label: String,
    /// Canonical value order; empty when the cube declares none.
    #[serde(default)]
    pub values: Vec<DimensionValue>,
    #[serde(default)]
    pub kind: DimensionKind,
}

impl Dimension {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            values: Vec::new(),
            kind: DimensionKind::Nominal,
        }
    }

    #[must_use]
    pub fn with_values(mut self, values: Vec<DimensionValue>) -> Self {
        self.values = values;
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: DimensionKind) -> Self {
        self.kind = kind;
        self
    }

    /// Finds the declared value whose raw value or label equals `key`.
    ///
    /// Raw-value matches win over label matches.
    #[must_use]
    pub fn find_value(&self, key: &str) -> Option<&DimensionValue> {
        self.values
            .iter()
            .find(|value| value.value == key)
            .or_else(|| self.values.iter().find(|value| value.label == key))
    }
}

/// Numeric quantity descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl Measure {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            unit: None,
        }
    }

    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Label with the unit appended in parentheses when present.
    #[must_use]
    pub fn label_with_unit(&self) -> String {
        match &self.unit {
            Some(unit) if !unit.is_empty() => format!("{} ({unit})", self.label),
            _ => self.label.clone(),
        }
    }
}

/// Dimension and measure metadata indexed by component id.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ComponentLookup {
    pub dimensions: IndexMap<String, Dimension>,
    pub measures: IndexMap<String, Measure>,
}

impl ComponentLookup {
    #[must_use]
    pub fn new(dimensions: &[Dimension], measures: &[Measure]) -> Self {
        Self {
            dimensions: dimensions
                .iter()
                .map(|dimension| (dimension.id.clone(), dimension.clone()))
                .collect(),
            measures: measures
                .iter()
                .map(|measure| (measure.id.clone(), measure.clone()))
                .collect(),
        }
    }

    #[must_use]
    pub fn dimension(&self, component_id: &str) -> Option<&Dimension> {
        self.dimensions.get(component_id)
    }

    #[must_use]
    pub fn measure(&self, component_id: &str) -> Option<&Measure> {
        self.measures.get(component_id)
    }

    /// Human label of any component; falls back to the id itself.
    #[must_use]
    pub fn label(&self, component_id: &str) -> String {
        if let Some(dimension) = self.dimension(component_id) {
            return dimension.label.clone();
        }
        if let Some(measure) = self.measure(component_id) {
            return measure.label_with_unit();
        }
        component_id.to_owned()
    }
}
