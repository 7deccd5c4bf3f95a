use kurbo::Point;

/// Idle window after the last lease is released before buffered pointer
/// state is dropped.
pub(crate) const IDLE_TEARDOWN_MS: f64 = 1_000.0;

/// Lease on the pointer sampler.
///
/// Deliberately not `Copy` or `Clone`: releasing consumes the token, so a
/// lease cannot be released twice and ownership of the sampler's lifetime is
/// visible in the type signature.
#[derive(Debug)]
pub(crate) struct SamplerLease {
    #[allow(dead_code)]
    id: u64,
}

/// Buffers raw pointer input and commits one frame-consistent position.
///
/// Raw moves land in `next`; the read phase calls [`PointerSampler::commit`]
/// once, after which every same-frame consumer observes the identical
/// committed coordinate; no two reads in one frame can see different
/// in-flight values.
#[derive(Debug, Default)]
pub(crate) struct PointerSampler {
    next: Option<Point>,
    committed: Option<Point>,
    leases: u32,
    issued: u64,
    teardown_at: Option<f64>,
}

impl PointerSampler {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Buffer the latest raw position; picked up at the next read phase.
    /// Ignored while nothing holds a lease.
    pub(crate) fn buffer(&mut self, position: Point) {
        if self.leases > 0 {
            self.next = Some(position);
        }
    }

    /// Read phase: commit the buffered position if it differs from the
    /// committed one. Returns whether the committed value changed.
    pub(crate) fn commit(&mut self) -> bool {
        match self.next.take() {
            Some(p) if self.committed != Some(p) => {
                self.committed = Some(p);
                true
            }
            _ => false,
        }
    }

    /// The frame-consistent pointer position; `None` before any input.
    pub(crate) fn position(&self) -> Option<Point> {
        self.committed
    }

    /// Take a lease, cancelling any pending idle teardown.
    pub(crate) fn acquire(&mut self) -> SamplerLease {
        self.leases += 1;
        self.teardown_at = None;
        self.issued += 1;
        SamplerLease { id: self.issued }
    }

    /// Return a lease. When the last one goes, teardown is debounced by
    /// [`IDLE_TEARDOWN_MS`] so rapid acquire/release cycles do not thrash
    /// buffered state.
    pub(crate) fn release(&mut self, lease: SamplerLease, now_ms: f64) {
        drop(lease);
        self.leases = self.leases.saturating_sub(1);
        if self.leases == 0 {
            self.teardown_at = Some(now_ms + IDLE_TEARDOWN_MS);
        }
    }

    /// Tick maintenance: drop buffered state once the idle window elapses.
    pub(crate) fn maintain(&mut self, now_ms: f64) {
        if let Some(at) = self.teardown_at {
            if now_ms >= at {
                self.next = None;
                self.committed = None;
                self.teardown_at = None;
                tracing::debug!("pointer sampler idle teardown");
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/input/pointer.rs"]
mod tests;
