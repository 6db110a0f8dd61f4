//! Signed distance fields, container geometry and the CSS radius parser.

pub(crate) mod container;
pub(crate) mod css;
/// Distance-field primitives.
pub mod sdf;
