//! Slideway is a frame-coordinated motion engine for draggable elements and
//! physical carousels.
//!
//! The engine is headless: the embedder owns the real environment (a DOM, a
//! scene graph, a test fixture) behind the [`Host`] trait, maps its native
//! input onto [`InputEvent`]s, and drives frames by calling [`Engine::tick`]
//! with the animation-frame timestamp. Every tick runs three ordered phases
//! (read, write, post-write) so geometry is never read mid-mutation and each
//! element's transform attribute is written at most once per frame.
//!
//! - Implement [`Host`] (or start with [`MemoryHost`])
//! - Register draggables and carousels on an [`Engine`]
//! - Feed input with [`Engine::dispatch`], drive frames with [`Engine::tick`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod frame;
pub(crate) mod sync;
pub(crate) mod util;

/// Carousel options, slide state constants, and transition strategies.
pub mod carousel;
/// Drag motion constraints.
pub mod drag;
/// Engine root that owns the host and every per-frame service.
pub mod engine;
/// Host boundary trait and the in-memory reference implementation.
pub mod host;
/// Input and output event types.
pub mod input;
/// Transform matrices and the per-frame write coordinator.
pub mod transform;

pub use crate::foundation::core::{CarouselId, ElementId, FramePhase, Point, Rect, Vec2};
pub use crate::foundation::error::{SlidewayError, SlidewayResult};

pub use crate::animation::ease::Ease;
pub use crate::carousel::{CarouselOptions, TransitionMode};
pub use crate::drag::constraint::{DragConstraint, DragContext, LockAxis, TranslationBounds};
pub use crate::engine::Engine;
pub use crate::host::{Host, MemoryHost};
pub use crate::input::events::{EngineEvent, InputEvent};
pub use crate::transform::matrix::TransformMatrix;
