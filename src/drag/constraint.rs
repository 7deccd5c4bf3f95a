use kurbo::Vec2;

use crate::foundation::core::ElementId;

/// Per-frame context handed to drag constraints.
#[derive(Clone, Copy, Debug)]
pub struct DragContext {
    /// Element whose motion is being constrained.
    pub element: ElementId,
    /// The element's transform translation as scheduled this frame, i.e.
    /// where the element will sit once the frame's writes land.
    pub translation: Vec2,
}

/// Pure filter applied to a drag delta before it is propagated.
///
/// Constraints run in registration order; each sees the previous one's
/// output. Returning `Vec2::ZERO` suppresses the frame's motion entirely.
pub trait DragConstraint {
    /// Return the adjusted delta.
    fn apply(&self, ctx: &DragContext, delta: Vec2) -> Vec2;
}

/// Zero out one axis of the drag delta, pinning the element on that axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockAxis {
    /// Zero the X component; the element only moves vertically.
    X,
    /// Zero the Y component; the element only moves horizontally.
    Y,
}

impl DragConstraint for LockAxis {
    fn apply(&self, _ctx: &DragContext, delta: Vec2) -> Vec2 {
        match self {
            Self::X => Vec2::new(0.0, delta.y),
            Self::Y => Vec2::new(delta.x, 0.0),
        }
    }
}

/// Clamp the element's cumulative translation to a closed interval per axis.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TranslationBounds {
    /// Minimum translation, inclusive.
    pub min: Vec2,
    /// Maximum translation, inclusive.
    pub max: Vec2,
}

impl DragConstraint for TranslationBounds {
    fn apply(&self, ctx: &DragContext, delta: Vec2) -> Vec2 {
        let next = ctx.translation + delta;
        Vec2::new(
            next.x.clamp(self.min.x, self.max.x) - ctx.translation.x,
            next.y.clamp(self.min.y, self.max.y) - ctx.translation.y,
        )
    }
}
