//! Reactive recompute controller: coalesces geometry/style triggers into one texture
//! regeneration per animation frame.

pub(crate) mod recompute;
pub(crate) mod scheduler;
