use chart_state::api::build_field_accessors;
use chart_state::core::{
    BarFields, ChartConfiguration, ColumnFields, ComponentField, ComponentLookup, Dimension,
    HeatmapFields, LineFields, MapFields, Measure, Observation, PieFields, SankeyFields,
    SegmentField, TableFields,
};

fn lookup() -> ComponentLookup {
    ComponentLookup::new(
        &[
            Dimension::new("year", "Year"),
            Dimension::new("canton", "Canton"),
            Dimension::new("sector", "Sector"),
        ],
        &[Measure::new("amount", "Amount").with_unit("CHF")],
    )
}

fn row() -> Observation {
    Observation::new()
        .with("year", "2020")
        .with("canton", "ZH")
        .with("sector", "energy")
        .with("amount", 12.5)
}

#[test]
fn column_accessors_read_configured_components() {
    let config = ChartConfiguration::Column {
        fields: ColumnFields {
            x: ComponentField::new("year"),
            y: ComponentField::new("amount"),
            segment: Some(SegmentField::new("sector")),
            color: None,
        },
    };
    let fields = build_field_accessors(&config, &lookup());
    let observation = row();

    assert_eq!(fields.x(&observation), "2020");
    assert_eq!(fields.y(&observation), Some(12.5));
    assert_eq!(fields.segment(&observation), "energy");
    assert_eq!(fields.rendering_key(&observation), "2020/energy");
    assert_eq!(fields.x_label, "Year");
    assert_eq!(fields.y_label, "Amount (CHF)");
    assert_eq!(fields.segment_label, "Sector");
    assert_eq!(fields.x_dimension.as_ref().map(|d| d.id.as_str()), Some("year"));
    assert_eq!(fields.y_measure.as_ref().map(|m| m.id.as_str()), Some("amount"));
}

#[test]
fn unset_roles_yield_neutral_values() {
    let config = ChartConfiguration::Column {
        fields: ColumnFields {
            x: ComponentField::unset(),
            y: ComponentField::unset(),
            segment: Some(SegmentField::new("")),
            color: None,
        },
    };
    let fields = build_field_accessors(&config, &lookup());
    let observation = row();

    assert_eq!(fields.x(&observation), "");
    assert_eq!(fields.y(&observation), None);
    assert_eq!(fields.segment(&observation), "");
    assert_eq!(fields.rendering_key(&observation), "");
    assert!(fields.x_dimension.is_none());
}

#[test]
fn missing_or_unparseable_numbers_are_absent_but_zero_is_kept() {
    let config = ChartConfiguration::Column {
        fields: ColumnFields {
            x: ComponentField::new("year"),
            y: ComponentField::new("amount"),
            segment: None,
            color: None,
        },
    };
    let fields = build_field_accessors(&config, &lookup());

    let zero = Observation::new().with("year", "2020").with("amount", 0.0);
    let text = Observation::new().with("year", "2020").with("amount", "n/a");
    let missing = Observation::new().with("year", "2020");

    assert_eq!(fields.y(&zero), Some(0.0));
    assert_eq!(fields.y(&text), None);
    assert_eq!(fields.y(&missing), None);
}

#[test]
fn bar_accessors_keep_x_categorical() {
    let config = ChartConfiguration::Bar {
        fields: BarFields {
            x: ComponentField::new("amount"),
            y: ComponentField::new("canton"),
            segment: None,
            color: None,
        },
    };
    let fields = build_field_accessors(&config, &lookup());
    let observation = row();

    assert_eq!(fields.x(&observation), "ZH");
    assert_eq!(fields.y(&observation), Some(12.5));
    assert_eq!(fields.x_label, "Canton");
    assert_eq!(fields.y_label, "Amount (CHF)");
}

#[test]
fn line_accessors_parse_dates() {
    let config = ChartConfiguration::Line {
        fields: LineFields {
            x: ComponentField::new("year"),
            y: ComponentField::new("amount"),
            segment: None,
            color: None,
        },
    };
    let fields = build_field_accessors(&config, &lookup());
    let get_date = fields.get_x_as_date.as_ref().expect("line has a date accessor");

    let parsed = get_date(&row()).expect("year parses as a date");
    assert_eq!(parsed.format("%Y-%m-%d").to_string(), "2020-01-01");
    assert!(get_date(&Observation::new().with("year", "later")).is_none());
}

#[test]
fn pie_exposes_segment_and_value_only() {
    let config = ChartConfiguration::Pie {
        fields: PieFields {
            y: ComponentField::new("amount"),
            segment: SegmentField::new("sector"),
            color: None,
        },
    };
    let fields = build_field_accessors(&config, &lookup());

    assert!(fields.get_x.is_none());
    assert_eq!(fields.segment(&row()), "energy");
    assert_eq!(fields.y(&row()), Some(12.5));
    assert_eq!(fields.rendering_key(&row()), "energy");
}

#[test]
fn heatmap_and_sankey_expose_role_accessors() {
    let heatmap = ChartConfiguration::Heatmap {
        fields: HeatmapFields {
            x: ComponentField::new("year"),
            y: ComponentField::new("canton"),
            value: ComponentField::new("amount"),
            color: None,
        },
    };
    let fields = build_field_accessors(&heatmap, &lookup());
    let get_row = fields.get_y_category.as_ref().expect("row accessor");
    assert_eq!(get_row(&row()), "ZH");
    assert_eq!(fields.y(&row()), Some(12.5));
    assert_eq!(fields.value_label, "Amount (CHF)");

    let sankey = ChartConfiguration::Sankey {
        fields: SankeyFields {
            source: ComponentField::new("canton"),
            target: ComponentField::new("sector"),
            value: ComponentField::new("amount"),
            color: None,
        },
    };
    let fields = build_field_accessors(&sankey, &lookup());
    let get_target = fields.get_target.as_ref().expect("target accessor");
    assert_eq!(fields.x(&row()), "ZH");
    assert_eq!(get_target(&row()), "energy");
    assert_eq!(fields.rendering_key(&row()), "ZH/energy");
}

#[test]
fn bypassing_chart_types_build_no_accessors() {
    let table = ChartConfiguration::Table {
        fields: TableFields::default(),
        page_size: 10,
    };
    let map = ChartConfiguration::Map {
        fields: MapFields::default(),
    };

    assert!(build_field_accessors(&table, &lookup()).is_empty());
    assert!(build_field_accessors(&map, &lookup()).is_empty());
}
