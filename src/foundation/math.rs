/// FNV-1a 64-bit hasher used to derive stable resource identifiers from pixel data.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self::new(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// Cubic Hermite interpolation of `t` between `edge0` and `edge1`, clamped to `[0, 1]`.
///
/// `edge0 > edge1` is allowed and yields a falling ramp. Equal edges degrade to a step.
pub fn smoothstep(edge0: f64, edge1: f64, t: f64) -> f64 {
    let span = edge1 - edge0;
    if span == 0.0 {
        return if t < edge0 { 0.0 } else { 1.0 };
    }
    let x = ((t - edge0) / span).clamp(0.0, 1.0);
    x * x * (3.0 - 2.0 * x)
}

/// Round and saturate into a byte, NaN maps to 0.
pub fn clamp_byte(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// `v` when finite, otherwise `fallback`.
pub(crate) fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

/// Format a number for CSS output: at most 3 decimals, trailing zeros trimmed.
pub(crate) fn fmt_css_number(v: f64) -> String {
    let v = if v.abs() < 0.0005 { 0.0 } else { v };
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    s.to_string()
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
