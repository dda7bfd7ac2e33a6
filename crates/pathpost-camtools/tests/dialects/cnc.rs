use pathpost_camtools::GcodeGenerator;
use pathpost_core::{GcodeConfig, PathItem, ToolpathDescriptor};

fn generate(tp: &ToolpathDescriptor, config: &GcodeConfig) -> Vec<String> {
    GcodeGenerator::default().generate(tp, config).unwrap()
}

#[test]
fn test_line_count_matches_items() {
    let mut tp = ToolpathDescriptor::new("cnc");
    for i in 0..25 {
        tp.push(PathItem::new().with("G", 1).with("X", i as f64).with("Y", 0.0));
    }
    let lines = generate(&tp, &GcodeConfig::new());
    assert_eq!(lines.len(), 25);
    for (i, line) in lines.iter().enumerate() {
        assert_eq!(line, &format!("G1 X{}.00 Y0.00", i));
    }
}

#[test]
fn test_position_offset() {
    let item = PathItem::new().with("X", 5.0);

    let tp = ToolpathDescriptor::new("cnc")
        .with_position(10.0, 0.0)
        .with_item(item.clone());
    assert_eq!(generate(&tp, &GcodeConfig::new()), vec!["X15.00"]);

    let tp = ToolpathDescriptor::new("cnc").with_item(item);
    assert_eq!(generate(&tp, &GcodeConfig::new()), vec!["X5.00"]);
}

#[test]
fn test_rotation_offset_applies_to_b_only() {
    let tp = ToolpathDescriptor::new("cnc")
        .with_rotation_b(90.0)
        .with_item(PathItem::new().with("G", 1).with("Z", -1.0).with("B", 45.0));
    assert_eq!(
        generate(&tp, &GcodeConfig::new()),
        vec!["G1 Z-1.00 B135.00"]
    );
}

#[test]
fn test_symbolic_resolution() {
    let config = GcodeConfig::new().with("workSpeed", 800);
    let tp = ToolpathDescriptor::new("cnc").with_item(PathItem::new().with("F", "workSpeed"));
    assert_eq!(generate(&tp, &config), vec!["F800"]);
}

#[test]
fn test_plunge_and_dwell_from_config() {
    let config = GcodeConfig::new()
        .with("plungeSpeed", 300)
        .with("dwellTime", 0.5);
    let tp = ToolpathDescriptor::new("cnc")
        .with_item(
            PathItem::new()
                .with("G", 1)
                .with("Z", -0.8)
                .with("F", "plungeSpeed"),
        )
        .with_item(PathItem::new().with("G", 4).with("P", "dwellTime"));
    assert_eq!(generate(&tp, &config), vec!["G1 Z-0.80 F300", "G4 P0.5"]);
}

#[test]
fn test_comment_only_items() {
    let tp = ToolpathDescriptor::new("cnc")
        .with_item(PathItem::new().with("C", ";Header"))
        .with_item(PathItem::new().with("N", ""))
        .with_item(PathItem::new().with("G", 0).with("C", " ;rapid"));
    assert_eq!(
        generate(&tp, &GcodeConfig::new()),
        vec![";Header", "", "G0 ;rapid"]
    );
}

#[test]
fn test_printing_head_uses_cnc_rules() {
    let tp = ToolpathDescriptor::new("printing")
        .with_position(1.0, 1.0)
        .with_item(PathItem::new().with("G", 1).with("X", 1.0).with("Y", 2.0));
    assert_eq!(generate(&tp, &GcodeConfig::new()), vec!["G1 X2.00 Y3.00"]);
}

#[test]
fn test_unrecognized_head_type() {
    let tp: ToolpathDescriptor =
        serde_json::from_str(r#"{"headType": "sculpt", "data": []}"#).unwrap();
    assert_eq!(
        GcodeGenerator::default().generate(&tp, &GcodeConfig::new()),
        None
    );
}

#[test]
fn test_malformed_keys_are_stringified() {
    let tp = ToolpathDescriptor::new("cnc")
        .with_item(PathItem::new().with("G", 1).with("feed", 100).with("Q", "x"));
    assert_eq!(
        generate(&tp, &GcodeConfig::new()),
        vec!["G1 feed100 Qx"]
    );
}

#[test]
fn test_nan_coordinate_formats_as_nan() {
    let tp = ToolpathDescriptor::new("cnc").with_item(PathItem::new().with("X", f64::NAN));
    assert_eq!(generate(&tp, &GcodeConfig::new()), vec!["XNaN"]);
}
