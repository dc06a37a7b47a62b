use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use tracing::trace;

use crate::core::{ColorField, Dimension, Observation};

use super::accessors::StringAccessor;
use super::palettes::{DEFAULT_PALETTE, default_color, default_palette, palette_or_default};

/// Strategy that produced a [`ColorScale`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ColorStrategy {
    Mapping,
    Single,
    Palette { name: String },
    /// No color field configured.
    DefaultPalette,
}

/// Ordinal category → color scale with a domain frozen at construction.
///
/// Unlike auto-extending ordinal scales, asking for a key outside the domain
/// never grows it; the scale answers with its `unknown` color instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorScale {
    domain: Vec<String>,
    range: Vec<String>,
    unknown: String,
    #[serde(skip)]
    positions: HashMap<String, usize>,
}

impl ColorScale {
    fn new(domain: Vec<String>, range: Vec<String>, unknown: String) -> Self {
        let mut positions = HashMap::with_capacity(domain.len());
        for (position, key) in domain.iter().enumerate() {
            positions.entry(key.clone()).or_insert(position);
        }
        Self {
            domain,
            range,
            unknown,
            positions,
        }
    }

    #[must_use]
    pub fn color(&self, key: &str) -> &str {
        self.positions
            .get(key)
            .and_then(|position| self.range.get(*position))
            .map_or(self.unknown.as_str(), String::as_str)
    }

    #[must_use]
    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    /// Colors aligned with [`ColorScale::domain`].
    #[must_use]
    pub fn range(&self) -> &[String] {
        &self.range
    }

    #[must_use]
    pub fn unknown(&self) -> &str {
        &self.unknown
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.positions.contains_key(key)
    }
}

/// Category colors for one chart state.
#[derive(Clone)]
pub struct ColorAccessors {
    scale: ColorScale,
    strategy: ColorStrategy,
    get_category: Option<StringAccessor>,
}

impl ColorAccessors {
    #[must_use]
    pub fn get_color(&self, key: &str) -> &str {
        self.scale.color(key)
    }

    #[must_use]
    pub fn color_domain(&self) -> &[String] {
        self.scale.domain()
    }

    #[must_use]
    pub fn color_scale(&self) -> &ColorScale {
        &self.scale
    }

    #[must_use]
    pub fn strategy(&self) -> &ColorStrategy {
        &self.strategy
    }

    /// Whether [`ColorAccessors::color_for_observation`] is available.
    #[must_use]
    pub fn has_observation_colors(&self) -> bool {
        self.get_category.is_some()
    }

    /// Color of the category an observation belongs to; `None` when the
    /// accessors were built without a category accessor.
    #[must_use]
    pub fn color_for_observation(&self, observation: &Observation) -> Option<&str> {
        let get_category = self.get_category.as_ref()?;
        Some(self.get_color(&get_category(observation)))
    }

    /// Color for a series key, or the scale's fallback for unsegmented
    /// series.
    #[must_use]
    pub fn series_color(&self, key: Option<&str>) -> &str {
        match key {
            Some(key) => self.get_color(key),
            None => self.scale.unknown(),
        }
    }
}

impl fmt::Debug for ColorAccessors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorAccessors")
            .field("scale", &self.scale)
            .field("strategy", &self.strategy)
            .field("get_category", &self.get_category.is_some())
            .finish()
    }
}

/// Builds category colors for `ordered_categories`.
///
/// `category_dimension` resolves categories to canonical identifiers for
/// explicit mappings; `get_category` enables per-observation lookups.
#[must_use]
pub fn build_color_accessors(
    color_field: Option<&ColorField>,
    ordered_categories: &[String],
    category_dimension: Option<&Dimension>,
    get_category: Option<StringAccessor>,
) -> ColorAccessors {
    let domain = ordered_categories.to_vec();
    let (strategy, range, unknown) = match color_field {
        Some(ColorField::Mapping { color_mapping }) => {
            let range = domain
                .iter()
                .map(|category| {
                    let identifier = category_dimension
                        .and_then(|dimension| dimension.find_value(category))
                        .map_or(category.as_str(), |value| value.canonical_id());
                    color_mapping
                        .get(identifier)
                        .cloned()
                        .unwrap_or_else(|| default_color().to_owned())
                })
                .collect();
            (ColorStrategy::Mapping, range, default_color().to_owned())
        }
        Some(ColorField::Single { color }) => (
            ColorStrategy::Single,
            vec![color.clone(); domain.len()],
            color.clone(),
        ),
        Some(ColorField::Palette { palette }) => (
            ColorStrategy::Palette {
                name: palette.clone(),
            },
            cycle_palette(palette_or_default(palette), domain.len()),
            default_color().to_owned(),
        ),
        None => (
            ColorStrategy::DefaultPalette,
            cycle_palette(default_palette(), domain.len()),
            default_color().to_owned(),
        ),
    };

    trace!(
        strategy = ?strategy,
        domain_len = domain.len(),
        default_palette = DEFAULT_PALETTE,
        "built color accessors"
    );
    ColorAccessors {
        scale: ColorScale::new(domain, range, unknown),
        strategy,
        get_category,
    }
}

fn cycle_palette(palette: &[&str], len: usize) -> Vec<String> {
    palette
        .iter()
        .cycle()
        .take(len)
        .map(|color| (*color).to_owned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::cycle_palette;

    #[test]
    fn palette_cycles_when_domain_is_longer() {
        let colors = cycle_palette(&["#000000", "#ffffff"], 5);
        assert_eq!(
            colors,
            vec!["#000000", "#ffffff", "#000000", "#ffffff", "#000000"]
        );
    }

    #[test]
    fn empty_palette_yields_no_colors() {
        assert!(cycle_palette(&[], 3).is_empty());
    }
}
