//! Minimal CSS length parsing for computed `border-radius` values.

use crate::foundation::core::CornerRadii;

/// A CSS length as it appears in computed style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CssLength {
    /// Absolute pixels (`px` or unitless).
    Px(f64),
    /// Percentage of a reference extent.
    Pct(f64),
}

impl CssLength {
    /// Resolve to pixels. Percentages are taken of `reference`.
    pub fn resolve(self, reference: f64) -> f64 {
        match self {
            Self::Px(v) => v,
            Self::Pct(p) => reference * p / 100.0,
        }
    }
}

/// Parse `"24px"`, `"24"` or `"50%"`. Anything else (including non-finite numbers) is `None`.
pub fn parse_css_length(input: &str) -> Option<CssLength> {
    let input = input.trim();

    if let Some(pct) = input.strip_suffix('%') {
        return parse_finite(pct).map(CssLength::Pct);
    }

    let num = input.strip_suffix("px").unwrap_or(input);
    parse_finite(num).map(CssLength::Px)
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Resolve a computed corner radius (`"12px"`, `"50%"`, `"24px 12px"`) against the box size.
///
/// The first component is horizontal (percent of width), the optional second vertical
/// (percent of height). Unparsable or negative components resolve to `0`.
pub fn parse_corner_radius(value: &str, width: f64, height: f64) -> CornerRadii {
    let mut parts = value.split_whitespace();
    let first = parts.next();
    let second = parts.next().or(first);

    let resolve = |part: Option<&str>, reference: f64| {
        part.and_then(parse_css_length)
            .map(|len| len.resolve(reference))
            .filter(|v| v.is_finite())
            .map_or(0.0, |v| v.max(0.0))
    };

    CornerRadii::new(resolve(first, width), resolve(second, height))
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/css.rs"]
mod tests;
