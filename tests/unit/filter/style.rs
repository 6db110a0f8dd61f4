use super::*;

fn close(a: Point, b: (f64, f64)) -> bool {
    (a.x - b.0).abs() < 1e-9 && (a.y - b.1).abs() < 1e-9
}

#[test]
fn shadow_scales_with_level() {
    assert_eq!(shadow_css(1.0), "0 18px 60px rgba(0,0,0,0.35)");
    assert_eq!(shadow_css(0.5), "0 9px 30px rgba(0,0,0,0.175)");
    assert_eq!(shadow_css(0.0), "0 0px 0px rgba(0,0,0,0)");
    assert_eq!(shadow_css(f64::NAN), shadow_css(0.0));
}

#[test]
fn gradient_cardinal_angles() {
    let up = gradient_endpoints(0.0);
    assert!(close(up.start, (0.5, 1.0)));
    assert!(close(up.end, (0.5, 0.0)));

    let right = gradient_endpoints(90.0);
    assert!(close(right.start, (0.0, 0.5)));
    assert!(close(right.end, (1.0, 0.5)));
}

#[test]
fn gradient_diagonal_reaches_corners() {
    let g = gradient_endpoints(135.0);
    assert!(close(g.start, (0.0, 0.0)));
    assert!(close(g.end, (1.0, 1.0)));
}

#[test]
fn gradient_off_axis_touches_boundary() {
    let g = gradient_endpoints(30.0);
    let on_edge = |p: Point| {
        (p.x.abs() < 1e-9 || (p.x - 1.0).abs() < 1e-9)
            || (p.y.abs() < 1e-9 || (p.y - 1.0).abs() < 1e-9)
    };
    assert!(on_edge(g.start));
    assert!(on_edge(g.end));
}

#[test]
fn fallback_css_formats_blur_and_saturation() {
    assert_eq!(fallback_filter_css(3.0, 140.0), "blur(3px) saturate(140%)");
    assert_eq!(fallback_filter_css(-1.0, f64::NAN), "blur(0px) saturate(100%)");
}

#[test]
fn surface_style_follows_params() {
    let p = GlassParams {
        shadow_level: 1.0,
        highlight_angle: 90.0,
        ..GlassParams::default()
    };
    let s = SurfaceStyle::from_params(&p);
    assert_eq!(s.shadow, "0 18px 60px rgba(0,0,0,0.35)");
    assert!(close(s.highlight.end, (1.0, 0.5)));
    assert_eq!(s.background, p.background_color);
}
