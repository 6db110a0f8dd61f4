use std::sync::Arc;

use super::*;
use crate::texture::raster::{ImageResource, Raster};

fn resource(uri: &str) -> Arc<ImageResource> {
    Arc::new(ImageResource {
        id: 1,
        width: 1,
        height: 1,
        uri: uri.to_string(),
        raster: Raster::new(1, 1),
    })
}

fn snapshot(field: bool, mask: bool) -> ResourceSnapshot {
    ResourceSnapshot {
        displacement: field.then(|| resource("data:field")),
        mask: mask.then(|| resource("data:mask")),
        ..ResourceSnapshot::default()
    }
}

fn displace_scales(p: &FilterPipeline) -> Vec<f64> {
    p.ops
        .iter()
        .filter_map(|op| match op {
            FilterOp::Displace { scale, .. } => Some(*scale),
            _ => None,
        })
        .collect()
}

#[test]
fn channel_scales_step_down_with_aberration() {
    assert_eq!(channel_scales(100.0, 2.0), [100.0, 90.0, 80.0]);
    assert_eq!(channel_scales(100.0, 0.0), [100.0, 100.0, 100.0]);
}

#[test]
fn pipeline_runs_three_displacements_then_recombines() {
    let p = layer_pipeline("x", "data:field", 60.0, 1.0);
    assert_eq!(displace_scales(&p), vec![60.0, 57.0, 54.0]);
    assert_eq!(p.output(), Some("output"));

    let screens = p
        .ops
        .iter()
        .filter(|op| matches!(op, FilterOp::Blend { mode: BlendMode::Screen, .. }))
        .count();
    assert_eq!(screens, 2);

    assert!(matches!(&p.ops[0], FilterOp::Image { href, .. } if href == "data:field"));
    match p.ops.last() {
        Some(FilterOp::Composite {
            input2, operator, ..
        }) => {
            assert_eq!(input2, SOURCE);
            assert_eq!(*operator, CompositeOp::Over);
        }
        other => panic!("unexpected tail op {other:?}"),
    }
}

#[test]
fn every_input_refers_to_an_earlier_result() {
    let p = layer_pipeline("x", "data:field", 60.0, 2.0);
    let mut known = vec![SOURCE.to_string()];
    for op in &p.ops {
        let inputs: Vec<&String> = match op {
            FilterOp::Image { .. } => vec![],
            FilterOp::ColorMatrix { input, .. }
            | FilterOp::ComponentTable { input, .. }
            | FilterOp::Blur { input, .. } => vec![input],
            FilterOp::Displace { input, map, .. } => vec![input, map],
            FilterOp::Blend { input, input2, .. } | FilterOp::Composite { input, input2, .. } => {
                vec![input, input2]
            }
        };
        for i in inputs {
            assert!(known.contains(i), "{i} used before defined");
        }
        known.push(op.result().to_string());
    }
}

#[test]
fn blur_weakens_as_aberration_grows() {
    assert!(aberration_blur(0.0) > aberration_blur(1.0));
    assert!(aberration_blur(1.0) > aberration_blur(5.0));
    assert!(aberration_blur(f64::NAN) == aberration_blur(0.0));
}

#[test]
fn edge_table_is_scaled_and_clamped() {
    assert_eq!(edge_table_level(2.0), 0.1);
    assert_eq!(edge_table_level(100.0), 1.0);
    assert_eq!(edge_table_level(-1.0), 0.0);
}

#[test]
fn missing_field_falls_back_to_plain_backdrop() {
    let p = GlassParams::default();
    match map_filters(&p, &snapshot(false, true)) {
        FilterSet::Fallback { backdrop } => {
            assert_eq!(backdrop.css(), "blur(3px) saturate(140%)");
        }
        other => panic!("expected fallback, got {other:?}"),
    }
}

#[test]
fn edge_layer_uses_its_own_parameters() {
    let p = GlassParams::default();
    let FilterSet::Refractive { center, edge } = map_filters(&p, &snapshot(true, true)) else {
        panic!("expected refractive set");
    };
    let edge = edge.expect("edge layer");
    assert_eq!(center.pipeline.id, CENTER_FILTER_ID);
    assert_eq!(edge.layer.pipeline.id, EDGE_FILTER_ID);
    assert_eq!(edge.mask_href, "data:mask");
    assert_eq!(displace_scales(&center.pipeline)[0], p.displacement_scale);
    assert_eq!(displace_scales(&edge.layer.pipeline)[0], p.edge_displacement);
    assert_eq!(edge.layer.backdrop.blur_px, p.edge_blur);
}

#[test]
fn absent_mask_means_no_edge_layer() {
    let set = map_filters(&GlassParams::default(), &snapshot(true, false));
    assert!(matches!(set, FilterSet::Refractive { edge: None, .. }));
}

#[test]
fn filter_set_serializes_with_tags() {
    let set = map_filters(&GlassParams::default(), &snapshot(true, true));
    let json = serde_json::to_value(&set).unwrap();
    assert_eq!(json["mode"], "refractive");
    assert_eq!(json["center"]["pipeline"]["ops"][3]["op"], "displace");
}

#[test]
fn debug_overlay_picks_the_enabled_view() {
    let res = snapshot(true, true);
    let mut p = GlassParams::default();
    assert_eq!(debug_overlay(&p, &res), None);
    p.set_debug_mask(true);
    assert_eq!(debug_overlay(&p, &res).as_deref(), Some("data:mask"));
    p.set_debug_displacement(true);
    assert_eq!(debug_overlay(&p, &res).as_deref(), Some("data:field"));
}
