//! Reference CPU execution of filter pipelines on straight-alpha RGBA8 rasters.
//!
//! Hosts normally hand [`FilterSet`] to their own compositor; this executor exists for
//! previews and for checking that a chain behaves as intended.

use std::collections::HashMap;

use crate::controller::recompute::ResourceSnapshot;
use crate::filter::chain::{
    Backdrop, BlendMode, Channel, CompositeOp, FilterOp, FilterPipeline, FilterSet, SOURCE,
};
use crate::foundation::error::{GlassError, GlassResult};
use crate::foundation::math::clamp_byte;
use crate::texture::raster::Raster;

/// Run one pipeline. `images` resolves `Image` hrefs.
pub fn apply_pipeline(
    pipeline: &FilterPipeline,
    source: &Raster,
    images: &[(&str, &Raster)],
) -> GlassResult<Raster> {
    let mut results: HashMap<&str, Raster> = HashMap::new();
    let lookup = |results: &HashMap<&str, Raster>, name: &str| -> GlassResult<Raster> {
        if name == SOURCE {
            return Ok(source.clone());
        }
        results
            .get(name)
            .cloned()
            .ok_or_else(|| GlassError::validation(format!("unknown filter input '{name}'")))
    };

    for op in &pipeline.ops {
        let out = match op {
            FilterOp::Image { href, .. } => {
                let img = images
                    .iter()
                    .find(|(h, _)| *h == href.as_str())
                    .map(|(_, r)| *r)
                    .ok_or_else(|| GlassError::validation("filter image href not provided"))?;
                ensure_same_size(img, source)?;
                img.clone()
            }
            FilterOp::ColorMatrix { input, matrix, .. } => {
                color_matrix(&lookup(&results, input)?, matrix)
            }
            FilterOp::ComponentTable {
                input,
                channel,
                table,
                ..
            } => discrete_table(&lookup(&results, input)?, *channel, table),
            FilterOp::Displace {
                input,
                map,
                scale,
                x_channel,
                y_channel,
                ..
            } => {
                let src = lookup(&results, input)?;
                let map = lookup(&results, map)?;
                ensure_same_size(&src, &map)?;
                displace(&src, &map, *scale, *x_channel, *y_channel)
            }
            FilterOp::Blend {
                input,
                input2,
                mode: BlendMode::Screen,
                ..
            } => {
                let a = lookup(&results, input)?;
                let b = lookup(&results, input2)?;
                ensure_same_size(&a, &b)?;
                screen(&a, &b)
            }
            FilterOp::Blur { input, std_dev, .. } => {
                gaussian_blur(&lookup(&results, input)?, *std_dev)?
            }
            FilterOp::Composite {
                input,
                input2,
                operator,
                ..
            } => {
                let a = lookup(&results, input)?;
                let b = lookup(&results, input2)?;
                ensure_same_size(&a, &b)?;
                match operator {
                    CompositeOp::In => composite_in(&a, &b),
                    CompositeOp::Over => composite_over(&a, &b),
                }
            }
        };
        results.insert(op.result(), out);
    }

    match pipeline.output() {
        Some(name) => lookup(&results, name),
        None => Ok(source.clone()),
    }
}

/// Render a whole filter set over `source` the way the rendering layer would stack it:
/// center layer, then the edge layer masked by the ring mask on top.
pub fn apply_filter_set(
    set: &FilterSet,
    source: &Raster,
    resources: &ResourceSnapshot,
) -> GlassResult<Raster> {
    match set {
        FilterSet::Fallback { backdrop } => apply_backdrop(source, backdrop),
        FilterSet::Refractive { center, edge } => {
            let field = resources
                .displacement
                .as_ref()
                .ok_or_else(|| GlassError::validation("refractive set without displacement"))?;
            let images = [(field.uri.as_str(), &field.raster)];

            let base = apply_backdrop(source, &center.backdrop)?;
            let mut out = apply_pipeline(&center.pipeline, &base, &images)?;

            if let Some(edge) = edge {
                let mask = resources
                    .mask
                    .as_ref()
                    .filter(|m| m.uri == edge.mask_href)
                    .ok_or_else(|| GlassError::validation("edge layer mask not provided"))?;
                let base = apply_backdrop(source, &edge.layer.backdrop)?;
                let rim = apply_pipeline(&edge.layer.pipeline, &base, &images)?;
                ensure_same_size(&rim, &mask.raster)?;
                out = composite_over(&composite_in(&rim, &mask.raster), &out);
            }
            Ok(out)
        }
    }
}

/// Blur then saturate.
pub fn apply_backdrop(source: &Raster, backdrop: &Backdrop) -> GlassResult<Raster> {
    let blurred = gaussian_blur(source, backdrop.blur_px)?;
    Ok(color_matrix(
        &blurred,
        &saturate_matrix(backdrop.saturation_pct / 100.0),
    ))
}

fn ensure_same_size(a: &Raster, b: &Raster) -> GlassResult<()> {
    if a.width != b.width || a.height != b.height {
        return Err(GlassError::raster(format!(
            "filter inputs differ in size: {}x{} vs {}x{}",
            a.width, a.height, b.width, b.height
        )));
    }
    Ok(())
}

fn channel_index(c: Channel) -> usize {
    match c {
        Channel::R => 0,
        Channel::G => 1,
        Channel::B => 2,
        Channel::A => 3,
    }
}

fn map_pixels(src: &Raster, mut f: impl FnMut([f64; 4]) -> [f64; 4]) -> Raster {
    let mut out = src.clone();
    for px in out.data.chunks_exact_mut(4) {
        let v = [0, 1, 2, 3].map(|i| f64::from(px[i]) / 255.0);
        let r = f(v);
        for i in 0..4 {
            px[i] = clamp_byte(r[i] * 255.0);
        }
    }
    out
}

fn color_matrix(src: &Raster, m: &[f64; 20]) -> Raster {
    map_pixels(src, |v| {
        let mut out = [0.0; 4];
        for (row, o) in out.iter_mut().enumerate() {
            let k = &m[row * 5..row * 5 + 5];
            *o = k[0] * v[0] + k[1] * v[1] + k[2] * v[2] + k[3] * v[3] + k[4];
        }
        out
    })
}

/// Standard luminance-preserving saturation matrix.
fn saturate_matrix(s: f64) -> [f64; 20] {
    let s = s.max(0.0);
    let (r, g, b) = (0.213, 0.715, 0.072);
    [
        r + (1.0 - r) * s,
        g - g * s,
        b - b * s,
        0.0,
        0.0,
        r - r * s,
        g + (1.0 - g) * s,
        b - b * s,
        0.0,
        0.0,
        r - r * s,
        g - g * s,
        b + (1.0 - b) * s,
        0.0,
        0.0,
        0.0,
        0.0,
        0.0,
        1.0,
        0.0,
    ]
}

fn discrete_table(src: &Raster, channel: Channel, table: &[f64]) -> Raster {
    if table.is_empty() {
        return src.clone();
    }
    let ci = channel_index(channel);
    let n = table.len();
    map_pixels(src, |mut v| {
        let k = ((v[ci] * n as f64).floor() as usize).min(n - 1);
        v[ci] = table[k];
        v
    })
}

fn displace(src: &Raster, map: &Raster, scale: f64, xc: Channel, yc: Channel) -> Raster {
    let (xi, yi) = (channel_index(xc), channel_index(yc));
    let (w, h) = (src.width, src.height);
    let mut out = Raster::new(w, h);
    for y in 0..h {
        for x in 0..w {
            let m = map.pixel(x, y);
            let dx = scale * (f64::from(m[xi]) / 255.0 - 0.5);
            let dy = scale * (f64::from(m[yi]) / 255.0 - 0.5);
            let sx = (f64::from(x) + dx).round().clamp(0.0, f64::from(w - 1)) as u32;
            let sy = (f64::from(y) + dy).round().clamp(0.0, f64::from(h - 1)) as u32;
            out.put(x, y, src.pixel(sx, sy));
        }
    }
    out
}

fn screen(a: &Raster, b: &Raster) -> Raster {
    let mut out = a.clone();
    for (o, s) in out.data.iter_mut().zip(b.data.iter()) {
        let (x, y) = (f64::from(*o) / 255.0, f64::from(*s) / 255.0);
        *o = clamp_byte((x + y - x * y) * 255.0);
    }
    out
}

fn composite_in(a: &Raster, mask: &Raster) -> Raster {
    let mut out = a.clone();
    for (px, m) in out.data.chunks_exact_mut(4).zip(mask.data.chunks_exact(4)) {
        px[3] = clamp_byte(f64::from(px[3]) * f64::from(m[3]) / 255.0);
    }
    out
}

fn composite_over(top: &Raster, bottom: &Raster) -> Raster {
    let mut out = bottom.clone();
    for (px, t) in out.data.chunks_exact_mut(4).zip(top.data.chunks_exact(4)) {
        let ta = f64::from(t[3]) / 255.0;
        let ba = f64::from(px[3]) / 255.0;
        let oa = ta + ba * (1.0 - ta);
        if oa <= 0.0 {
            px.copy_from_slice(&[0, 0, 0, 0]);
            continue;
        }
        for i in 0..3 {
            let c = (f64::from(t[i]) * ta + f64::from(px[i]) * ba * (1.0 - ta)) / oa;
            px[i] = clamp_byte(c);
        }
        px[3] = clamp_byte(oa * 255.0);
    }
    out
}

/// Separable Gaussian blur with a Q16 fixed-point kernel and clamp-to-edge sampling.
pub fn gaussian_blur(src: &Raster, std_dev: f64) -> GlassResult<Raster> {
    if !std_dev.is_finite() || std_dev <= 0.0 {
        return Ok(src.clone());
    }
    // Taps past the raster extent only resample clamped edge pixels.
    let extent = f64::from(src.width.max(src.height));
    let radius = (std_dev * 3.0).ceil().min(extent) as u32;
    if radius == 0 {
        return Ok(src.clone());
    }
    let kernel = gaussian_kernel_q16(radius, std_dev)?;
    let mut tmp = Raster::new(src.width, src.height);
    let mut out = Raster::new(src.width, src.height);
    blur_pass(src, &mut tmp, &kernel, true);
    blur_pass(&tmp, &mut out, &kernel, false);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f64) -> GlassResult<Vec<u32>> {
    let r = radius as i32;
    let denom = 2.0 * sigma * sigma;
    let weights_f: Vec<f64> = (-r..=r)
        .map(|i| {
            let x = f64::from(i);
            (-x * x / denom).exp()
        })
        .collect();
    let sum: f64 = weights_f.iter().sum();
    if sum <= 0.0 {
        return Err(GlassError::raster("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = (((wf / sum) * 65536.0).round() as i64).clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }
    Ok(weights)
}

fn blur_pass(src: &Raster, dst: &mut Raster, k: &[u32], horizontal: bool) {
    let radius = (k.len() / 2) as i64;
    let (w, h) = (i64::from(src.width), i64::from(src.height));
    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in k.iter().enumerate() {
                let d = ki as i64 - radius;
                let (sx, sy) = if horizontal {
                    ((x + d).clamp(0, w - 1), y)
                } else {
                    (x, (y + d).clamp(0, h - 1))
                };
                let idx = ((sy * w + sx) as usize) * 4;
                for c in 0..4 {
                    acc[c] += u64::from(kw) * u64::from(src.data[idx + c]);
                }
            }
            let out_idx = ((y * w + x) as usize) * 4;
            for c in 0..4 {
                dst.data[out_idx + c] = q16_to_u8(acc[c]);
            }
        }
    }
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + 32768) >> 16).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/filter/preview.rs"]
mod tests;
