use pathpost_camtools::{join_lines, process_for_fixed_power, GcodeGenerator};
use pathpost_core::{keys, GcodeConfig, PathItem, ToolpathDescriptor};

fn fixed_power(power: f64) -> GcodeConfig {
    GcodeConfig::new()
        .with(keys::FIXED_POWER_ENABLED, true)
        .with(keys::FIXED_POWER, power)
}

#[test]
fn test_preamble_precedes_all_passes() {
    let config = fixed_power(40.0)
        .with(keys::MULTI_PASS_ENABLED, true)
        .with(keys::MULTI_PASSES, 2)
        .with(keys::MULTI_PASS_DEPTH, 1.0);
    let tp = ToolpathDescriptor::new("laser").with_item(PathItem::new().with("G", 1).with("X", 1.0));
    let lines = GcodeGenerator::default().generate(&tp, &config).unwrap();
    let text = process_for_fixed_power(&join_lines(&lines), &config);

    let body: Vec<&str> = text.lines().collect();
    assert_eq!(body[0], ";Laser fixed power: 40%");
    assert_eq!(body[1], "M3 P40 S102");
    assert_eq!(body[2], "G4 P1");
    assert_eq!(body[3], "M5");
    assert_eq!(body[4], "");
    assert_eq!(body[5], "G1 X1.00");
    assert_eq!(body.len(), 5 + lines.len());
}

#[test]
fn test_not_idempotent() {
    let config = fixed_power(100.0);
    let once = process_for_fixed_power("G1 X1.00", &config);
    let twice = process_for_fixed_power(&once, &config);

    assert_eq!(twice.matches("M3 P100 S255").count(), 2);
    assert_eq!(
        twice,
        format!(";Laser fixed power: 100%\nM3 P100 S255\nG4 P1\nM5\n\n{}", once)
    );
}

#[test]
fn test_disabled_leaves_text_alone() {
    let config = GcodeConfig::new().with(keys::FIXED_POWER, 80.0);
    assert_eq!(process_for_fixed_power("M5", &config), "M5");
}

#[test]
fn test_fractional_power() {
    let text = process_for_fixed_power("", &fixed_power(33.3));
    assert!(text.contains("M3 P33.3 S84"));
}
