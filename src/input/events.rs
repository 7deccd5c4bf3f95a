use kurbo::Point;

use crate::foundation::core::{CarouselId, ElementId};

/// Environment input fed to [`Engine::dispatch`](crate::Engine::dispatch).
///
/// The embedder maps its native listeners onto these: `mousedown`/
/// `touchstart` on a draggable becomes [`InputEvent::PointerDown`], global
/// `mousemove`/`touchmove` become [`InputEvent::PointerMove`], global
/// `mouseup`/`touchend` become [`InputEvent::PointerUp`], and global
/// `contextmenu`/`dragstart` become [`InputEvent::PointerCancel`] (the
/// pointer can leave the element mid-drag, so releases are never scoped to
/// the element). Events are serializable so an interaction session can be
/// recorded and replayed deterministically.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// A press on a registered draggable element.
    PointerDown {
        /// The pressed element.
        element: ElementId,
        /// Pointer position at the press.
        position: Point,
        /// Event timestamp in milliseconds.
        now_ms: f64,
    },
    /// A global pointer move; only buffers the sampler.
    PointerMove {
        /// Latest raw pointer position.
        position: Point,
    },
    /// A global release.
    PointerUp {
        /// Pointer position at the release.
        position: Point,
        /// Event timestamp in milliseconds.
        now_ms: f64,
    },
    /// A global gesture interruption; handled like a release.
    PointerCancel {
        /// Pointer position at the interruption.
        position: Point,
        /// Event timestamp in milliseconds.
        now_ms: f64,
    },
    /// A viewport resize; carousel re-centering is debounced.
    Resize {
        /// Event timestamp in milliseconds.
        now_ms: f64,
    },
}

/// Events the engine hands back to the embedder, in emission order.
///
/// The embedder re-dispatches these however its environment expects: as DOM
/// custom events on the subject element, as framework callbacks, or straight
/// into test assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineEvent {
    /// A drag began on `element`.
    DragStart {
        /// The dragged element.
        element: ElementId,
    },
    /// A drag ended.
    ///
    /// Emitted through the read phase of the following tick, so every
    /// consumer has observed the final position first.
    DragEnd {
        /// The previously dragged element.
        element: ElementId,
    },
    /// A carousel's active slide changed.
    CarouselTransition {
        /// The carousel whose active slide changed.
        carousel: CarouselId,
        /// New active slide index.
        index: usize,
        /// New active slide element.
        slide: ElementId,
    },
}
