pub use kurbo::{Point, Rect, Vec2};

/// Opaque handle to an element owned by the embedding host.
///
/// The embedder issues ids and keeps the mapping to its real elements; the
/// engine only ever compares and stores them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u64);

/// Handle to a carousel registered on an [`Engine`](crate::Engine).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CarouselId(pub u32);

/// One of the three ordered phases executed on every frame tick.
///
/// All read-phase work runs before any write-phase work, which runs before
/// any post-write work. This ordering is the backbone invariant the rest of
/// the engine relies on to avoid reading mid-mutation host state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum FramePhase {
    /// Geometry and input reads; no host mutation.
    Read,
    /// Batched host mutations (transform attribute writes, slide state).
    Write,
    /// Frame-scoped cache invalidation.
    PostWrite,
}

impl FramePhase {
    pub(crate) const COUNT: usize = 3;

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Read => 0,
            Self::Write => 1,
            Self::PostWrite => 2,
        }
    }
}
