use pathpost_camtools::{join_lines, GcodeGenerator};
use pathpost_core::{keys, GcodeConfig, PathItem, ToolpathDescriptor};

fn engrave_line() -> ToolpathDescriptor {
    serde_json::from_str(
        r#"{
            "headType": "laser",
            "positionX": 50,
            "positionY": 25,
            "data": [
                {"G": 0, "X": 0, "Y": 0, "F": "jogSpeed"},
                {"M": 3, "S": 255, "C": " ;laser on"},
                {"G": 1, "X": 12.347, "Y": -3.2, "F": "workSpeed"},
                {"M": 5}
            ]
        }"#,
    )
    .unwrap()
}

fn speeds() -> GcodeConfig {
    GcodeConfig::new()
        .with(keys::JOG_SPEED, 3000)
        .with(keys::WORK_SPEED, 800)
}

#[test]
fn test_laser_single_pass() {
    let lines = GcodeGenerator::default()
        .generate(&engrave_line(), &speeds())
        .unwrap();
    assert_eq!(
        lines,
        vec![
            "G0 X50.00 Y25.00 F3000",
            "M3 S255 ;laser on",
            "G1 X62.35 Y21.80 F800",
            "M5",
        ]
    );
}

#[test]
fn test_laser_multi_pass_wraps_base_block() {
    let config = speeds()
        .with(keys::MULTI_PASS_ENABLED, true)
        .with(keys::MULTI_PASSES, 2)
        .with(keys::MULTI_PASS_DEPTH, 0.4);
    let lines = GcodeGenerator::default()
        .generate(&engrave_line(), &config)
        .unwrap();

    assert_eq!(lines.len(), 4 * 2 + 3 + 2);
    assert_eq!(lines[..4], lines[7..11]);
    assert_eq!(lines[4], ";Laser multi-pass, pass 2 with Z = -0.4");
    assert_eq!(lines[5], "G91 G0 Z-0.40 F150");
    assert_eq!(lines[6], "G90");
    assert_eq!(lines[11], "G91 G0 Z0.40 F150");
    assert_eq!(lines[12], "G90");
}

#[test]
fn test_laser_initial_height_offset_without_multi_pass() {
    let config = speeds()
        .with(keys::PATH_TYPE, "path")
        .with(keys::INITIAL_HEIGHT_OFFSET, 1.5);
    let lines = GcodeGenerator::default()
        .generate(&engrave_line(), &config)
        .unwrap();
    assert_eq!(lines.len(), 2 + 4);
    assert_eq!(lines[0], "G91 G0 Z1.50 F150");
    assert_eq!(lines[1], "G90");
    assert_eq!(lines[2], "G0 X50.00 Y25.00 F3000");
}

#[test]
fn test_laser_output_joins_with_newlines() {
    let tp = ToolpathDescriptor::new("laser")
        .with_item(PathItem::new().with("G", 0).with("X", 1.0))
        .with_item(PathItem::new().with("G", 1).with("X", 2.0));
    let lines = GcodeGenerator::default()
        .generate(&tp, &GcodeConfig::new())
        .unwrap();
    assert_eq!(join_lines(&lines), "G0 X1.00\nG1 X2.00");
}

#[test]
fn test_batch_concatenates_models_in_order() {
    let first = ToolpathDescriptor::new("laser").with_item(PathItem::new().with("C", ";model 1"));
    let skipped = ToolpathDescriptor::new("sculpt").with_item(PathItem::new().with("G", 0));
    let second = ToolpathDescriptor::new("laser").with_item(PathItem::new().with("C", ";model 2"));

    let lines = GcodeGenerator::default()
        .generate_batch(&[first, skipped, second], &GcodeConfig::new())
        .unwrap();
    assert_eq!(lines, vec![";model 1", ";model 2"]);
}

#[test]
fn test_generator_is_shareable_across_threads() {
    let gen = std::sync::Arc::new(GcodeGenerator::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let gen = gen.clone();
            std::thread::spawn(move || {
                let tp = ToolpathDescriptor::new("laser")
                    .with_position(i as f64, 0.0)
                    .with_item(PathItem::new().with("X", 1.0));
                gen.generate(&tp, &GcodeConfig::new()).unwrap()
            })
        })
        .collect();
    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), vec![format!("X{}.00", i + 1)]);
    }
}
