//! Filter-chain parameters for the rendering layer, derived style values, and a reference
//! CPU executor for previews.

pub(crate) mod chain;
pub(crate) mod preview;
pub(crate) mod style;
