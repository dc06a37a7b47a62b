//! Named categorical palettes.

use tracing::debug;

pub const DEFAULT_PALETTE: &str = "category10";

const CATEGORY10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];
const ACCENT: &[&str] = &[
    "#7fc97f", "#beaed4", "#fdc086", "#ffff99", "#386cb0", "#f0027f", "#bf5b17", "#666666",
];
const DARK2: &[&str] = &[
    "#1b9e77", "#d95f02", "#7570b3", "#e7298a", "#66a61e", "#e6ab02", "#a6761d", "#666666",
];
const PAIRED: &[&str] = &[
    "#a6cee3", "#1f78b4", "#b2df8a", "#33a02c", "#fb9a99", "#e31a1c", "#fdbf6f", "#ff7f00",
    "#cab2d6", "#6a3d9a", "#ffff99", "#b15928",
];
const PASTEL1: &[&str] = &[
    "#fbb4ae", "#b3cde3", "#ccebc5", "#decbe4", "#fed9a6", "#ffffcc", "#e5d8bd", "#fddaec",
    "#f2f2f2",
];
const PASTEL2: &[&str] = &[
    "#b3e2cd", "#fdcdac", "#cbd5e8", "#f4cae4", "#e6f5c9", "#fff2ae", "#f1e2cc", "#cccccc",
];
const SET1: &[&str] = &[
    "#e41a1c", "#377eb8", "#4daf4a", "#984ea3", "#ff7f00", "#ffff33", "#a65628", "#f781bf",
    "#999999",
];
const SET2: &[&str] = &[
    "#66c2a5", "#fc8d62", "#8da0cb", "#e78ac3", "#a6d854", "#ffd92f", "#e5c494", "#b3b3b3",
];
const SET3: &[&str] = &[
    "#8dd3c7", "#ffffb3", "#bebada", "#fb8072", "#80b1d3", "#fdb462", "#b3de69", "#fccde5",
    "#d9d9d9", "#bc80bd", "#ccebc5", "#ffed6f",
];
const TABLEAU10: &[&str] = &[
    "#4e79a7", "#f28e2c", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#af7aa1", "#ff9da7",
    "#9c755f", "#bab0ab",
];

pub const PALETTE_NAMES: [&str; 10] = [
    "category10",
    "accent",
    "dark2",
    "paired",
    "pastel1",
    "pastel2",
    "set1",
    "set2",
    "set3",
    "tableau10",
];

/// Looks up a palette by name.
#[must_use]
pub fn named_palette(name: &str) -> Option<&'static [&'static str]> {
    match name {
        "category10" => Some(CATEGORY10),
        "accent" => Some(ACCENT),
        "dark2" => Some(DARK2),
        "paired" => Some(PAIRED),
        "pastel1" => Some(PASTEL1),
        "pastel2" => Some(PASTEL2),
        "set1" => Some(SET1),
        "set2" => Some(SET2),
        "set3" => Some(SET3),
        "tableau10" => Some(TABLEAU10),
        _ => None,
    }
}

/// Like [`named_palette`] but unknown names fall back to the default palette.
#[must_use]
pub fn palette_or_default(name: &str) -> &'static [&'static str] {
    named_palette(name).unwrap_or_else(|| {
        debug!(palette = name, "unknown palette; using {DEFAULT_PALETTE}");
        CATEGORY10
    })
}

#[must_use]
pub fn default_palette() -> &'static [&'static str] {
    CATEGORY10
}

/// First color of the default palette, the last-resort fallback.
#[must_use]
pub fn default_color() -> &'static str {
    CATEGORY10[0]
}

#[cfg(test)]
mod tests {
    use super::{PALETTE_NAMES, default_color, named_palette, palette_or_default};

    #[test]
    fn every_listed_palette_resolves_to_hex_colors() {
        for name in PALETTE_NAMES {
            let palette = named_palette(name).expect("listed palette");
            assert!(!palette.is_empty());
            assert!(palette.iter().all(|color| color.len() == 7 && color.starts_with('#')));
        }
    }

    #[test]
    fn unknown_palette_falls_back_to_default() {
        assert_eq!(palette_or_default("rainbow")[0], default_color());
    }
}
