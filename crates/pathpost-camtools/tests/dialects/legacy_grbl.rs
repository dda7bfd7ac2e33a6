use pathpost_camtools::{GcodeGenerator, GeneratorOptions, LaserFirmware};
use pathpost_core::{keys, GcodeConfig, PathItem, ToolpathDescriptor};

fn legacy() -> GcodeGenerator {
    GcodeGenerator::new(GeneratorOptions {
        laser_firmware: LaserFirmware::LegacyGrbl,
        ..GeneratorOptions::default()
    })
}

#[test]
fn test_power_rescale() {
    let tp = ToolpathDescriptor::new("laser").with_item(PathItem::new().with("G", 1).with("S", 255));
    assert_eq!(
        legacy().generate(&tp, &GcodeConfig::new()).unwrap(),
        vec!["G1 S1000.00"]
    );
}

#[test]
fn test_fan_words_dropped_other_words_kept() {
    let tp = ToolpathDescriptor::new("laser")
        .with_item(PathItem::new().with("M", 106).with("S", 51))
        .with_item(PathItem::new().with("M", 107).with("C", ";fan off"));
    assert_eq!(
        legacy().generate(&tp, &GcodeConfig::new()).unwrap(),
        vec!["S200.00", ";fan off"]
    );
}

#[test]
fn test_m3_becomes_m4() {
    let tp = ToolpathDescriptor::new("laser").with_item(PathItem::new().with("M", 3));
    assert_eq!(
        legacy().generate(&tp, &GcodeConfig::new()).unwrap(),
        vec!["M4"]
    );
}

#[test]
fn test_coordinates_need_a_command_word() {
    let tp = ToolpathDescriptor::new("laser")
        .with_position(1.0, 2.0)
        .with_item(PathItem::new().with("X", 5.0).with("Y", 5.0))
        .with_item(PathItem::new().with("G", 1).with("X", 5.0).with("Y", 5.0));
    assert_eq!(
        legacy().generate(&tp, &GcodeConfig::new()).unwrap(),
        vec!["", "G1 X6.000 Y7.000"]
    );
}

#[test]
fn test_symbolic_feed() {
    let config = GcodeConfig::new().with(keys::WORK_SPEED, 1200);
    let tp = ToolpathDescriptor::new("laser")
        .with_item(PathItem::new().with("G", 1).with("X", 0.5).with("F", "workSpeed"));
    assert_eq!(
        legacy().generate(&tp, &config).unwrap(),
        vec!["G1 X0.500 F1200"]
    );
}

#[test]
fn test_legacy_multi_pass_has_no_z_moves() {
    let config = GcodeConfig::new()
        .with(keys::MULTI_PASS_ENABLED, true)
        .with(keys::MULTI_PASSES, 2)
        .with(keys::MULTI_PASS_DEPTH, 1.0)
        .with(keys::PATH_TYPE, "path")
        .with(keys::INITIAL_HEIGHT_OFFSET, 2.0);
    let tp = ToolpathDescriptor::new("laser")
        .with_item(PathItem::new().with("G", 1).with("X", 1.0));
    assert_eq!(
        legacy().generate(&tp, &config).unwrap(),
        vec![
            "G1 X1.000",
            ";Laser multi-pass, pass 2 with Z = -1",
            "G91",
            "G90",
            "G1 X1.000",
        ]
    );
}

#[test]
fn test_cnc_unaffected_by_laser_firmware() {
    let tp = ToolpathDescriptor::new("cnc").with_item(PathItem::new().with("M", 3).with("S", 255));
    assert_eq!(
        legacy().generate(&tp, &GcodeConfig::new()).unwrap(),
        vec!["M3 S255"]
    );
}
