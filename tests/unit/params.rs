use super::*;

#[test]
fn partial_json_loads_over_defaults() {
    let p = GlassParams::from_json(r#"{"edge-width": 24, "blur-px": 6.5}"#).unwrap();
    assert_eq!(p.edge_width, 24.0);
    assert_eq!(p.blur_px, 6.5);
    assert_eq!(p.saturation_pct, GlassParams::default().saturation_pct);
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = GlassParams::from_json("{").unwrap_err();
    assert!(matches!(err, GlassError::Serde(_)));
}

#[test]
fn sanitize_falls_back_and_clamps() {
    let p = GlassParams {
        blur_px: f64::NAN,
        aberration: -3.0,
        highlight_angle: -90.0,
        highlight_intensity: 4.0,
        flat_area_scale: 7.0,
        edge_hardness: 0.0,
        ..GlassParams::default()
    }
    .sanitized();
    assert_eq!(p.blur_px, 3.0);
    assert_eq!(p.aberration, 0.0);
    assert_eq!(p.highlight_angle, 270.0);
    assert_eq!(p.highlight_intensity, 1.0);
    assert_eq!(p.flat_area_scale, 1.0);
    assert_eq!(p.edge_hardness, ShapeParams::DEFAULT_EDGE_HARDNESS);
}

#[test]
fn debug_toggles_are_mutually_exclusive() {
    let mut p = GlassParams::default();
    p.set_debug_displacement(true);
    p.set_debug_mask(true);
    assert!(p.debug_mask);
    assert!(!p.debug_displacement);
    p.set_debug_displacement(true);
    assert!(p.debug_displacement);
    assert!(!p.debug_mask);

    p.set_attribute("debug-mask", Some("")).unwrap();
    assert!(p.debug_mask);
    assert!(!p.debug_displacement);
}

#[test]
fn disabling_one_toggle_leaves_the_other() {
    let mut p = GlassParams::default();
    p.set_debug_mask(true);
    p.set_debug_displacement(false);
    assert!(p.debug_mask);
}

#[test]
fn attributes_use_presence_for_booleans() {
    let mut p = GlassParams::default();
    let attrs = p.attributes();
    assert!(attrs.iter().all(|(n, _)| *n != "debug-mask"));
    assert!(attrs.contains(&("edge-width", "18".to_string())));
    assert!(attrs.contains(&("flat-area-scale", "0.6".to_string())));

    p.set_debug_mask(true);
    assert!(p.attributes().contains(&("debug-mask", String::new())));
}

#[test]
fn attributes_apply_back_to_an_equal_bag() {
    let src = GlassParams {
        edge_width: 9.0,
        shadow_level: 1.25,
        background_color: "#123".to_string(),
        debug_displacement: true,
        ..GlassParams::default()
    };
    let mut dst = GlassParams::default();
    for (name, value) in src.attributes() {
        dst.set_attribute(name, Some(&value)).unwrap();
    }
    assert_eq!(dst, src);
}

#[test]
fn unknown_attribute_is_rejected() {
    let mut p = GlassParams::default();
    assert!(p.set_attribute("refraction-index", Some("1.5")).is_err());
}

#[test]
fn garbage_or_removed_number_resets_to_default() {
    let mut p = GlassParams {
        edge_width: 40.0,
        ..GlassParams::default()
    };
    p.set_attribute("edge-width", Some("wide")).unwrap();
    assert_eq!(p.edge_width, 18.0);
    p.edge_width = 40.0;
    p.set_attribute("edge-width", None).unwrap();
    assert_eq!(p.edge_width, 18.0);
}

#[test]
fn params_split_into_shape_and_ring() {
    let p = GlassParams::default();
    assert_eq!(p.shape(), ShapeParams::default());
    assert_eq!(p.ring(), RingParams::default());
}

#[test]
fn blur_values_are_capped() {
    let p = GlassParams::from_json(r#"{"blur-px": 1e7, "edge-blur": 250}"#).unwrap();
    assert_eq!(p.blur_px, GlassParams::MAX_BLUR_PX);
    assert_eq!(p.edge_blur, GlassParams::MAX_BLUR_PX);

    let mut p = GlassParams::default();
    p.set_attribute("blur-px", Some("99999")).unwrap();
    assert_eq!(p.blur_px, GlassParams::MAX_BLUR_PX);
}
