//! Frame callback scheduling.
//!
//! Models the host's "request a callback on the next display refresh" as an
//! explicit handle. At most one request is pending at a time. Cancelling
//! revokes the pending handle and bumps the generation, so a handle issued
//! before a scene rebuild can never run against the rebuilt scene.

/// A pending frame request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle {
    pub id: u64,
    pub generation: u64,
}

#[derive(Debug, Default)]
pub struct FrameScheduler {
    next_id: u64,
    generation: u64,
    pending: Option<FrameHandle>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request the next frame. Replaces any request already pending.
    pub fn request(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle {
            id: self.next_id,
            generation: self.generation,
        };
        self.pending = Some(handle);
        handle
    }

    /// Revoke the pending request and invalidate every handle issued so far.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.generation += 1;
    }

    /// Take the pending request if it is still live.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        let handle = self.pending.take()?;
        self.is_live(handle).then_some(handle)
    }

    /// Whether `handle` belongs to the current generation.
    pub fn is_live(&self, handle: FrameHandle) -> bool {
        handle.generation == self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
