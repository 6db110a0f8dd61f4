use std::collections::BTreeSet;

/// Handle for one requested animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FrameToken(pub u64);

/// Source of animation-frame callbacks.
///
/// The host calls back into the controller with the token once the frame fires.
pub trait FrameScheduler {
    /// Request a callback on the next frame.
    fn request_frame(&mut self) -> FrameToken;

    /// Cancel a previously requested frame. Unknown or already-fired tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// In-process scheduler driven explicitly by the host loop (or by tests).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next: u64,
    pending: BTreeSet<FrameToken>,
    cancelled: u64,
}

impl ManualScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain every live request in request order.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending).into_iter().collect()
    }

    /// Number of requests currently waiting.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number of requests cancelled before firing.
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameToken {
        let token = FrameToken(self.next);
        self.next = self.next.wrapping_add(1);
        self.pending.insert(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        if self.pending.remove(&token) {
            self.cancelled = self.cancelled.saturating_add(1);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/controller/scheduler.rs"]
mod tests;
