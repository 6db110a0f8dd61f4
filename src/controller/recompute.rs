use std::sync::Arc;

use crate::controller::scheduler::{FrameScheduler, FrameToken, ManualScheduler};
use crate::foundation::core::{PIXEL_BUDGET, RingParams, ShapeParams};
use crate::foundation::error::{GlassError, GlassResult};
use crate::geometry::container::{ContainerGeometry, ContainerMeasurement};
use crate::params::GlassParams;
use crate::texture::displacement::{DisplacementKey, generate_displacement};
use crate::texture::raster::{ImageResource, RasterBackend};
use crate::texture::ring_mask::{MaskKey, generate_ring_mask};

/// Reads the container's current size and computed corner radius.
pub trait ContainerProbe {
    /// Measure the container now.
    fn measure(&mut self) -> ContainerMeasurement;
}

impl<F> ContainerProbe for F
where
    F: FnMut() -> ContainerMeasurement,
{
    fn measure(&mut self) -> ContainerMeasurement {
        self()
    }
}

/// Element an observer is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    /// The glass container itself.
    Container,
    /// The host element in shadow-isolated deployments.
    Host,
}

/// What the observer saw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerKind {
    /// Size change.
    Resize,
    /// Attribute or style change (corner radius lives in computed style).
    StyleMutation,
}

/// Controller state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Nothing scheduled.
    Idle,
    /// One frame requested; later triggers replace it.
    PendingFrame(FrameToken),
    /// Regenerating textures.
    Computing,
    /// Torn down: observers detached, resources released.
    Detached,
}

/// Read-only view of the current generated resources.
///
/// Valid for one generation cycle; re-fetch after every change notification.
#[derive(Clone, Debug, Default)]
pub struct ResourceSnapshot {
    /// Displacement field, absent when degraded or not yet computed.
    pub displacement: Option<Arc<ImageResource>>,
    /// Edge-ring mask, absent when the ring width resolves to zero.
    pub mask: Option<Arc<ImageResource>>,
    /// Geometry of the last computed cycle.
    pub geometry: Option<ContainerGeometry>,
    /// `true` while the container exceeds the pixel budget.
    pub degraded: bool,
}

/// Counters for observing controller work.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecomputeStats {
    /// Frames that ran a compute cycle.
    pub frames_run: u64,
    /// Frame callbacks ignored because a newer request superseded them.
    pub stale_frames: u64,
    /// Displacement fields rasterized.
    pub displacement_generations: u64,
    /// Cycles that reused the previous displacement field.
    pub displacement_reuses: u64,
    /// Edge masks rasterized.
    pub mask_generations: u64,
    /// Cycles that reused the previous edge mask.
    pub mask_reuses: u64,
    /// Cycles that hit the pixel budget and skipped generation.
    pub budget_degrades: u64,
}

type ChangeHook = Box<dyn FnMut(&ResourceSnapshot)>;

/// Owns the generated textures and keeps them in sync with the container.
///
/// Triggers are coalesced into at most one compute per frame. Each resource is regenerated
/// only when its generation key changed, its parameters were explicitly changed, or it does
/// not exist yet.
pub struct RecomputeController<S: FrameScheduler = ManualScheduler> {
    backend: Box<dyn RasterBackend>,
    probe: Box<dyn ContainerProbe>,
    scheduler: S,
    phase: Phase,

    observe_container: bool,
    observe_host: bool,

    shape: ShapeParams,
    ring: RingParams,
    force_displacement: bool,
    force_mask: bool,

    displacement: Option<Arc<ImageResource>>,
    mask: Option<Arc<ImageResource>>,
    displacement_key: Option<DisplacementKey>,
    mask_key: Option<MaskKey>,
    geometry: Option<ContainerGeometry>,
    over_budget: bool,

    stats: RecomputeStats,
    on_change: Option<ChangeHook>,
}

impl<S: FrameScheduler> RecomputeController<S> {
    /// Construct a controller. Fails once, here, if the backend cannot rasterize.
    pub fn new(
        backend: Box<dyn RasterBackend>,
        probe: impl ContainerProbe + 'static,
        scheduler: S,
        shape: ShapeParams,
        ring: RingParams,
    ) -> GlassResult<Self> {
        backend
            .probe()
            .map_err(|e| GlassError::backend(format!("raster backend unavailable: {e}")))?;
        Ok(Self {
            backend,
            probe: Box::new(probe),
            scheduler,
            phase: Phase::Idle,
            observe_container: false,
            observe_host: false,
            shape: shape.sanitized(),
            ring: ring.sanitized(),
            force_displacement: false,
            force_mask: false,
            displacement: None,
            mask: None,
            displacement_key: None,
            mask_key: None,
            geometry: None,
            over_budget: false,
            stats: RecomputeStats::default(),
            on_change: None,
        })
    }

    /// Register a hook fired after every cycle that changed a resource.
    pub fn set_on_change(&mut self, hook: impl FnMut(&ResourceSnapshot) + 'static) {
        self.on_change = Some(Box::new(hook));
    }

    /// Attach an observer. Like a resize observer, attaching reports the initial state.
    pub fn observe(&mut self, target: Target) {
        if self.phase == Phase::Detached {
            self.phase = Phase::Idle;
        }
        match target {
            Target::Container => self.observe_container = true,
            Target::Host => self.observe_host = true,
        }
        self.schedule();
    }

    /// Detach one observer.
    pub fn unobserve(&mut self, target: Target) {
        match target {
            Target::Container => self.observe_container = false,
            Target::Host => self.observe_host = false,
        }
    }

    /// Feed an observer event. Events for unobserved targets are dropped.
    pub fn notify(&mut self, target: Target, kind: TriggerKind) {
        let observed = match target {
            Target::Container => self.observe_container,
            Target::Host => self.observe_host,
        };
        if !observed {
            return;
        }
        tracing::trace!(?target, ?kind, "recompute trigger");
        self.schedule();
    }

    /// Change displacement shape parameters; forces the field on the next cycle.
    pub fn set_shape_params(&mut self, shape: ShapeParams) {
        let shape = shape.sanitized();
        if shape == self.shape {
            return;
        }
        self.shape = shape;
        self.force_displacement = true;
        self.schedule();
    }

    /// Change ring parameters; forces only the mask on the next cycle.
    pub fn set_ring_params(&mut self, ring: RingParams) {
        let ring = ring.sanitized();
        if ring == self.ring {
            return;
        }
        self.ring = ring;
        self.force_mask = true;
        self.schedule();
    }

    /// Apply the texture-relevant part of a full parameter bag.
    pub fn apply_params(&mut self, params: &GlassParams) {
        self.set_shape_params(params.shape());
        self.set_ring_params(params.ring());
    }

    /// Frame callback. Tokens other than the current pending one are stale and ignored.
    pub fn on_frame(&mut self, token: FrameToken) {
        match self.phase {
            Phase::PendingFrame(pending) if pending == token => {}
            _ => {
                self.stats.stale_frames = self.stats.stale_frames.saturating_add(1);
                return;
            }
        }

        self.phase = Phase::Computing;
        let changed = self.compute();
        self.phase = Phase::Idle;

        if changed {
            let snapshot = self.snapshot();
            if let Some(hook) = self.on_change.as_mut() {
                hook(&snapshot);
            }
        }
    }

    /// Cancel the pending frame, detach observers and release both resources.
    pub fn teardown(&mut self) {
        if let Phase::PendingFrame(token) = self.phase {
            self.scheduler.cancel_frame(token);
        }
        self.observe_container = false;
        self.observe_host = false;
        self.displacement = None;
        self.mask = None;
        self.displacement_key = None;
        self.mask_key = None;
        self.geometry = None;
        self.phase = Phase::Detached;
        tracing::debug!("recompute controller torn down");
    }

    /// Current state.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current resources.
    pub fn snapshot(&self) -> ResourceSnapshot {
        ResourceSnapshot {
            displacement: self.displacement.clone(),
            mask: self.mask.clone(),
            geometry: self.geometry,
            degraded: self.over_budget,
        }
    }

    /// Work counters.
    pub fn stats(&self) -> RecomputeStats {
        self.stats
    }

    /// Active shape parameters.
    pub fn shape_params(&self) -> ShapeParams {
        self.shape
    }

    /// Active ring parameters.
    pub fn ring_params(&self) -> RingParams {
        self.ring
    }

    /// Scheduler, for hosts that drive frames themselves.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler access.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    fn schedule(&mut self) {
        match self.phase {
            // Single-threaded: triggers never arrive mid-compute.
            Phase::Detached | Phase::Computing => {}
            Phase::Idle => {
                self.phase = Phase::PendingFrame(self.scheduler.request_frame());
            }
            Phase::PendingFrame(prev) => {
                self.scheduler.cancel_frame(prev);
                self.phase = Phase::PendingFrame(self.scheduler.request_frame());
            }
        }
    }

    fn compute(&mut self) -> bool {
        let geom = ContainerGeometry::from_measurement(&self.probe.measure());
        self.geometry = Some(geom);
        self.stats.frames_run = self.stats.frames_run.saturating_add(1);

        if geom.exceeds_budget() {
            let had = self.displacement.take().is_some() | self.mask.take().is_some();
            self.displacement_key = None;
            self.mask_key = None;
            self.stats.budget_degrades = self.stats.budget_degrades.saturating_add(1);
            if !self.over_budget {
                tracing::warn!(
                    width = geom.width(),
                    height = geom.height(),
                    pixels = geom.pixel_count(),
                    budget = PIXEL_BUDGET,
                    "container exceeds pixel budget, disabling refraction textures"
                );
            }
            let entered = !self.over_budget;
            self.over_budget = true;
            return had || entered;
        }
        let left_degrade = std::mem::replace(&mut self.over_budget, false);

        let d = self.refresh_displacement(&geom);
        let m = self.refresh_mask(&geom);
        d || m || left_degrade
    }

    fn refresh_displacement(&mut self, geom: &ContainerGeometry) -> bool {
        let key = DisplacementKey::new(geom, self.shape);
        if !self.force_displacement
            && self.displacement.is_some()
            && self.displacement_key == Some(key)
        {
            self.stats.displacement_reuses = self.stats.displacement_reuses.saturating_add(1);
            tracing::debug!("displacement field unchanged, reusing");
            return false;
        }
        self.force_displacement = false;

        match generate_displacement(self.backend.as_ref(), geom, self.shape) {
            Ok(res) => {
                self.stats.displacement_generations =
                    self.stats.displacement_generations.saturating_add(1);
                tracing::debug!(id = res.id, ?key, "displacement field regenerated");
                self.displacement = Some(Arc::new(res));
                self.displacement_key = Some(key);
            }
            Err(e) => {
                tracing::error!(error = %e, "displacement field encode failed");
                self.displacement = None;
                self.displacement_key = None;
            }
        }
        true
    }

    fn refresh_mask(&mut self, geom: &ContainerGeometry) -> bool {
        let Some(ring) = self
            .ring
            .resolve(f64::from(geom.width()), f64::from(geom.height()))
        else {
            self.force_mask = false;
            self.mask_key = None;
            return self.mask.take().is_some();
        };

        let key = MaskKey::new(geom, ring);
        if !self.force_mask && self.mask.is_some() && self.mask_key == Some(key) {
            self.stats.mask_reuses = self.stats.mask_reuses.saturating_add(1);
            tracing::debug!("edge mask unchanged, reusing");
            return false;
        }
        self.force_mask = false;

        match generate_ring_mask(self.backend.as_ref(), geom, ring) {
            Ok(res) => {
                self.stats.mask_generations = self.stats.mask_generations.saturating_add(1);
                tracing::debug!(id = res.id, ?key, "edge mask regenerated");
                self.mask = Some(Arc::new(res));
                self.mask_key = Some(key);
            }
            Err(e) => {
                tracing::error!(error = %e, "edge mask encode failed");
                self.mask = None;
                self.mask_key = None;
            }
        }
        true
    }
}

impl RecomputeController<ManualScheduler> {
    /// Fire every due frame. Returns the number of compute cycles that ran.
    pub fn tick(&mut self) -> u64 {
        let before = self.stats.frames_run;
        for token in self.scheduler.take_due() {
            self.on_frame(token);
        }
        self.stats.frames_run - before
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/recompute.rs"]
mod tests;
