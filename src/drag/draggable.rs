use kurbo::{Point, Vec2};

use crate::drag::constraint::{DragConstraint, DragContext};
use crate::foundation::core::ElementId;

/// Summary of a finished interaction, produced when the deferred end is
/// processed in the read phase.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DragSummary {
    pub(crate) duration_ms: f64,
    /// Net pointer displacement over the whole interaction.
    pub(crate) displacement: Vec2,
}

#[derive(Clone, Copy, Debug)]
struct Session {
    start_ms: f64,
    start_position: Point,
    last_position: Point,
}

#[derive(Clone, Copy, Debug)]
enum DragState {
    Idle,
    Dragging(Session),
    /// Release seen; the end is deferred through the read phase so consumers
    /// observe the final position before the end event.
    Ending { session: Session, released_ms: f64 },
}

/// Per-element drag state machine: `Idle → Dragging → Idle`.
///
/// The machine converts committed pointer positions into motion deltas,
/// filtered through an ordered constraint pipeline. It never writes
/// transforms itself; the engine fans its deltas out through the draggable
/// sync groups into the transform coordinator.
pub(crate) struct Draggable {
    element: ElementId,
    constraints: Vec<Box<dyn DragConstraint>>,
    state: DragState,
}

impl std::fmt::Debug for Draggable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Draggable")
            .field("element", &self.element)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Draggable {
    pub(crate) fn new(element: ElementId, constraints: Vec<Box<dyn DragConstraint>>) -> Self {
        Self {
            element,
            constraints,
            state: DragState::Idle,
        }
    }

    /// `Idle → Dragging`. Returns whether the press was accepted; a press
    /// mid-drag is a spurious event and a no-op.
    pub(crate) fn press(&mut self, position: Point, now_ms: f64) -> bool {
        if !matches!(self.state, DragState::Idle) {
            return false;
        }
        self.state = DragState::Dragging(Session {
            start_ms: now_ms,
            start_position: position,
            last_position: position,
        });
        true
    }

    /// Global release. Returns whether an interaction was actually in
    /// progress; releases with nothing in flight are no-ops.
    pub(crate) fn release(&mut self, now_ms: f64) -> bool {
        match self.state {
            DragState::Dragging(session) => {
                self.state = DragState::Ending {
                    session,
                    released_ms: now_ms,
                };
                true
            }
            _ => false,
        }
    }

    /// Read phase while dragging: the constrained delta for this frame, or
    /// `None` when the pointer has not moved (or a constraint zeroed the
    /// motion out).
    ///
    /// A machine whose release is still pending keeps producing its final
    /// delta here; the deferred end runs afterwards in the same read phase,
    /// so consumers always see the final position before the end.
    pub(crate) fn frame_delta(&mut self, pointer: Point, translation: Vec2) -> Option<Vec2> {
        let (DragState::Dragging(session) | DragState::Ending { session, .. }) = &mut self.state
        else {
            return None;
        };
        let raw = pointer - session.last_position;
        if raw.x == 0.0 && raw.y == 0.0 {
            return None;
        }
        session.last_position = pointer;

        let ctx = DragContext {
            element: self.element,
            translation,
        };
        let mut delta = raw;
        for constraint in &self.constraints {
            delta = constraint.apply(&ctx, delta);
        }
        (delta.x != 0.0 || delta.y != 0.0).then_some(delta)
    }

    /// Read phase after a release: consume the pending end, `Ending → Idle`.
    pub(crate) fn take_end(&mut self) -> Option<DragSummary> {
        match self.state {
            DragState::Ending {
                session,
                released_ms,
            } => {
                self.state = DragState::Idle;
                Some(DragSummary {
                    duration_ms: released_ms - session.start_ms,
                    displacement: session.last_position - session.start_position,
                })
            }
            _ => None,
        }
    }

    pub(crate) fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/drag/draggable.rs"]
mod tests;
