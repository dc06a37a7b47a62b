use chart_state::api::palettes::{default_color, named_palette};
use chart_state::api::{ColorStrategy, build_color_accessors, string_accessor};
use chart_state::core::{ColorField, Dimension, DimensionValue, Observation};
use indexmap::IndexMap;

fn categories(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| (*value).to_owned()).collect()
}

#[test]
fn mapping_falls_back_to_default_color_for_unmapped_categories() {
    let mut mapping = IndexMap::new();
    mapping.insert("a".to_owned(), "#111".to_owned());
    let field = ColorField::Mapping {
        color_mapping: mapping,
    };

    let colors = build_color_accessors(Some(&field), &categories(&["a", "b"]), None, None);

    assert_eq!(colors.get_color("a"), "#111");
    assert_eq!(colors.get_color("b"), default_color());
    assert_eq!(colors.color_domain(), ["a", "b"]);
    assert_eq!(colors.strategy(), &ColorStrategy::Mapping);
}

#[test]
fn mapping_resolves_labels_through_canonical_identifiers() {
    let dimension = Dimension::new("canton", "Canton").with_values(vec![
        DimensionValue::new("Zurich", "Zurich").with_identifier("https://ld.example.org/canton/1"),
    ]);
    let mut mapping = IndexMap::new();
    mapping.insert("https://ld.example.org/canton/1".to_owned(), "#ff0000".to_owned());
    let field = ColorField::Mapping {
        color_mapping: mapping,
    };

    let colors =
        build_color_accessors(Some(&field), &categories(&["Zurich"]), Some(&dimension), None);
    assert_eq!(colors.get_color("Zurich"), "#ff0000");
}

#[test]
fn single_color_applies_to_every_key() {
    let field = ColorField::Single {
        color: "#abcdef".to_owned(),
    };
    let colors = build_color_accessors(Some(&field), &categories(&["a", "b"]), None, None);

    assert_eq!(colors.get_color("a"), "#abcdef");
    assert_eq!(colors.get_color("b"), "#abcdef");
    assert_eq!(colors.get_color("never-seen"), "#abcdef");
}

#[test]
fn named_palette_is_assigned_in_domain_order() {
    let field = ColorField::Palette {
        palette: "dark2".to_owned(),
    };
    let colors = build_color_accessors(Some(&field), &categories(&["x", "y"]), None, None);
    let palette = named_palette("dark2").expect("dark2 is a built-in palette");

    assert_eq!(colors.get_color("x"), palette[0]);
    assert_eq!(colors.get_color("y"), palette[1]);
}

#[test]
fn unknown_palette_name_falls_back_to_default_palette() {
    let field = ColorField::Palette {
        palette: "no-such-palette".to_owned(),
    };
    let colors = build_color_accessors(Some(&field), &categories(&["x"]), None, None);
    let default = named_palette("category10").expect("category10");
    assert_eq!(colors.get_color("x"), default[0]);
}

#[test]
fn missing_color_field_uses_default_palette() {
    let colors = build_color_accessors(None, &categories(&["x", "y"]), None, None);
    let default = named_palette("category10").expect("category10");

    assert_eq!(colors.strategy(), &ColorStrategy::DefaultPalette);
    assert_eq!(colors.get_color("x"), default[0]);
    assert_eq!(colors.get_color("y"), default[1]);
}

#[test]
fn lookups_outside_the_domain_never_extend_it() {
    let colors = build_color_accessors(None, &categories(&["a", "b"]), None, None);

    assert_eq!(colors.get_color("c"), default_color());
    assert_eq!(colors.get_color("d"), default_color());
    assert_eq!(colors.color_domain(), ["a", "b"]);
    assert!(!colors.color_scale().contains("c"));
}

#[test]
fn empty_domain_produces_no_colors() {
    let colors = build_color_accessors(None, &[], None, None);
    assert!(colors.color_domain().is_empty());
    assert_eq!(colors.get_color("anything"), default_color());
}

#[test]
fn observation_colors_need_a_category_accessor() {
    let with_accessor = build_color_accessors(
        None,
        &categories(&["a"]),
        None,
        Some(string_accessor(Some("x"))),
    );
    let without = build_color_accessors(None, &categories(&["a"]), None, None);
    let observation = Observation::new().with("x", "a");

    assert!(with_accessor.has_observation_colors());
    assert_eq!(
        with_accessor.color_for_observation(&observation),
        Some(with_accessor.get_color("a"))
    );
    assert_eq!(without.color_for_observation(&observation), None);
}
