use super::*;

const FADE_B: [f64; 4] = [0.45, 0.52, 0.85, 0.95];
const FADE_V: [f64; 4] = [0.0, 1.0, 1.0, 0.0];

fn sweep() -> impl Iterator<Item = f64> {
    (0..=1000).map(|i| i as f64 / 1000.0)
}

#[test]
fn four_point_fade_scenario() {
    let v = interpolate(0.5, &FADE_B, &FADE_V).unwrap();
    assert!((v - 5.0 / 7.0).abs() < 1e-9);
    assert!((v - 0.71).abs() < 0.01);

    let v = interpolate(0.9, &FADE_B, &FADE_V).unwrap();
    assert!((v - 0.5).abs() < 1e-9);
}

#[test]
fn clamps_outside_the_breakpoints() {
    assert_eq!(interpolate(0.0, &FADE_B, &FADE_V), Some(0.0));
    assert_eq!(interpolate(0.7, &FADE_B, &FADE_V), Some(1.0));
    assert_eq!(interpolate(1.0, &FADE_B, &FADE_V), Some(0.0));
    assert_eq!(interpolate(f64::NAN, &FADE_B, &FADE_V), Some(0.0));
}

#[test]
fn boundary_values_are_exact() {
    let b = [0.1, 0.3, 0.6, 0.9];
    let v: [f64; 4] = [12.5, -3.0, 7.25, 40.0];
    assert_eq!(interpolate(0.1, &b, &v), Some(12.5));
    assert_eq!(interpolate(0.9, &b, &v), Some(40.0));
    assert_eq!(interpolate(0.3, &b, &v), Some(-3.0));
}

#[test]
fn output_stays_within_value_bounds() {
    let b = [0.0, 0.2, 0.5, 0.55, 1.0];
    let v = [-4.0, 9.0, 1.5, 3.0, -2.0];
    let lo = v.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = v.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    for p in sweep() {
        let out = interpolate(p, &b, &v).unwrap();
        assert!(out >= lo && out <= hi, "p={p} out={out}");
    }
}

#[test]
fn repeated_and_out_of_order_queries_agree() {
    let forward: Vec<f64> = sweep()
        .map(|p| interpolate(p, &FADE_B, &FADE_V).unwrap())
        .collect();
    let backward: Vec<f64> = sweep()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .map(|p| interpolate(p, &FADE_B, &FADE_V).unwrap())
        .collect();
    let backward: Vec<f64> = backward.into_iter().rev().collect();
    assert_eq!(forward, backward);
}

#[test]
fn duplicate_breakpoints_never_divide_by_zero() {
    let b = [0.2, 0.2, 0.8];
    let v: [f64; 3] = [1.0, 5.0, 9.0];
    assert_eq!(interpolate(0.2, &b, &v), Some(5.0));
    let mid: f64 = interpolate(0.5, &b, &v).unwrap();
    assert!((mid - 7.0).abs() < 1e-9);
    assert_eq!(interpolate(0.1, &[0.5, 0.5], &[2.0, 4.0]), Some(2.0));
}

#[test]
fn mismatched_or_empty_input_yields_none() {
    assert_eq!(interpolate::<f64>(0.5, &[], &[]), None);
    assert_eq!(interpolate(0.5, &[0.0, 1.0], &[1.0]), None);
}

#[test]
fn vec2_and_color_interpolate_per_component() {
    let off = interpolate(
        0.5,
        &[0.0, 1.0],
        &[Vec2::new(0.0, 100.0), Vec2::new(-40.0, 0.0)],
    )
    .unwrap();
    assert_eq!(off, Vec2::new(-20.0, 50.0));

    let c = interpolate(
        0.5,
        &[0.0, 1.0],
        &[Rgba8::new(0, 100, 255, 255), Rgba8::new(255, 0, 0, 0)],
    )
    .unwrap();
    assert_eq!(c, Rgba8::new(128, 50, 128, 128));
}

#[test]
fn timeline_rejects_malformed_definitions() {
    assert!(Timeline::<f64>::new(vec![], vec![]).is_err());
    assert!(Timeline::<f64>::new(vec![0.0, 1.0], vec![1.0]).is_err());
    assert!(Timeline::<f64>::new(vec![0.5, 0.5], vec![1.0, 2.0]).is_err());
    assert!(Timeline::<f64>::new(vec![0.6, 0.2], vec![1.0, 2.0]).is_err());
    assert!(Timeline::<f64>::new(vec![0.0, 1.5], vec![1.0, 2.0]).is_err());
    assert!(Timeline::<f64>::new(vec![f64::NAN, 1.0], vec![1.0, 2.0]).is_err());
}

#[test]
fn malformed_timeline_falls_back_to_identity() {
    let tl = Timeline::<f64>::or_identity(vec![0.8, 0.2], vec![1.0, 0.0]);
    assert!(tl.is_identity());
    assert_eq!(tl.sample(0.37), 0.37);
    assert!(tl.breakpoints().is_empty());
}

#[test]
fn ramp_and_enter_hold_exit_shapes() {
    let ramp = Timeline::<f64>::ramp(0.2, 0.4, 0.0, 1.0).unwrap();
    assert_eq!(ramp.sample(0.0), 0.0);
    assert!((ramp.sample(0.3) - 0.5).abs() < 1e-9);
    assert_eq!(ramp.sample(0.9), 1.0);

    let ehe = Timeline::enter_hold_exit(FADE_B, FADE_V).unwrap();
    assert_eq!(ehe.values(), &FADE_V);
    assert_eq!(ehe.sample(0.6), 1.0);
}

#[test]
fn eased_timeline_keeps_endpoints() {
    let tl = Timeline::<f64>::ramp(0.0, 1.0, 0.0, 10.0)
        .unwrap()
        .with_ease(Ease::InQuad);
    assert_eq!(tl.sample(0.0), 0.0);
    assert_eq!(tl.sample(1.0), 10.0);
    assert!((tl.sample(0.5) - 2.5).abs() < 1e-9);
}

#[test]
fn timeline_def_builds_from_json() {
    let def: TimelineDef<f64> = serde_json::from_str(
        r#"{ "breakpoints": [0.45, 0.52, 0.85, 0.95], "values": [0, 1, 1, 0] }"#,
    )
    .unwrap();
    assert_eq!(def.ease, Ease::Linear);
    let tl = def.build().unwrap();
    assert!((tl.sample(0.9) - 0.5).abs() < 1e-9);

    let bad: TimelineDef<f64> =
        serde_json::from_str(r#"{ "breakpoints": [0.5, 0.1], "values": [0, 1] }"#).unwrap();
    assert!(bad.build().is_err());
    assert!(bad.build_or_identity().is_identity());
}
