use pathpost_camtools::{process_multi_pass, MultiPassPlan};
use pathpost_core::{keys, GcodeConfig};

fn base() -> Vec<String> {
    vec!["G1 X0.00 Y0.00".to_string(), "G1 X5.00 Y0.00".to_string()]
}

fn multi_pass(passes: i32, depth: f64) -> GcodeConfig {
    GcodeConfig::new()
        .with(keys::MULTI_PASS_ENABLED, true)
        .with(keys::MULTI_PASSES, passes)
        .with(keys::MULTI_PASS_DEPTH, depth)
}

#[test]
fn test_three_pass_line_count() {
    let out = process_multi_pass(base(), &multi_pass(3, 1.0));
    // 3 copies, 2 gaps of comment + Z step + G90, return move + G90
    assert_eq!(out.len(), 2 * 3 + 3 * 2 + 2);
}

#[test]
fn test_no_step_before_first_pass() {
    let out = process_multi_pass(base(), &multi_pass(3, 1.0));
    assert_eq!(out[0], "G1 X0.00 Y0.00");
    assert_eq!(out[1], "G1 X5.00 Y0.00");
}

#[test]
fn test_passes_keep_internal_order() {
    let out = process_multi_pass(base(), &multi_pass(4, 0.25));
    let copies: Vec<&[String]> = out
        .windows(2)
        .filter(|w| w[0] == "G1 X0.00 Y0.00")
        .collect();
    assert_eq!(copies.len(), 4);
    for copy in copies {
        assert_eq!(copy[1], "G1 X5.00 Y0.00");
    }
}

#[test]
fn test_cumulative_z_in_comments() {
    let out = process_multi_pass(base(), &multi_pass(3, 0.5));
    let comments: Vec<&String> = out.iter().filter(|l| l.starts_with(';')).collect();
    assert_eq!(
        comments,
        vec![
            ";Laser multi-pass, pass 2 with Z = -0.5",
            ";Laser multi-pass, pass 3 with Z = -1",
        ]
    );
}

#[test]
fn test_return_move_accounts_for_height_offset() {
    let config = multi_pass(3, 1.0)
        .with(keys::PATH_TYPE, "path")
        .with(keys::INITIAL_HEIGHT_OFFSET, 0.5);
    let out = process_multi_pass(base(), &config);
    assert_eq!(out[0], "G91 G0 Z0.50 F150");
    assert_eq!(out[out.len() - 2], "G91 G0 Z1.50 F150");
    assert_eq!(out[out.len() - 1], "G90");
}

#[test]
fn test_height_offset_ignored_for_other_path_types() {
    let config = multi_pass(2, 1.0)
        .with(keys::PATH_TYPE, "pocket")
        .with(keys::INITIAL_HEIGHT_OFFSET, 0.5);
    let out = process_multi_pass(base(), &config);
    assert_eq!(out[0], "G1 X0.00 Y0.00");
    assert_eq!(out[out.len() - 2], "G91 G0 Z1.00 F150");
}

#[test]
fn test_enabled_with_zero_passes_is_disabled() {
    assert_eq!(process_multi_pass(base(), &multi_pass(0, 1.0)), base());
}

#[test]
fn test_plan_from_json_config() {
    let config: GcodeConfig = serde_json::from_str(
        r#"{"multiPassEnabled": true, "multiPasses": 5, "multiPassDepth": 0.2}"#,
    )
    .unwrap();
    let plan = MultiPassPlan::from_config(&config);
    assert!(plan.is_enabled());
    assert_eq!(plan.passes, 5);
    assert_eq!(plan.pass_z(2), -0.4);
}

#[test]
fn test_comment_z_in_shortest_form() {
    let out = process_multi_pass(base(), &multi_pass(3, 0.25));
    assert_eq!(out[2], ";Laser multi-pass, pass 2 with Z = -0.25");
    assert_eq!(out[7], ";Laser multi-pass, pass 3 with Z = -0.5");
    // the Z step itself keeps two decimals
    assert_eq!(out[3], "G91 G0 Z-0.25 F150");
}
