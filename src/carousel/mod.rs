//! Carousel records and slide transition strategies.

pub(crate) mod physical;
pub(crate) mod transition;

use kurbo::Vec2;

use crate::animation::ease::Ease;
use crate::drag::draggable::DragSummary;
use crate::foundation::core::{CarouselId, ElementId};
use crate::host::Host;
use crate::transform::coordinator::TransformCoordinator;
use crate::util::debounce::Debouncer;

use self::transition::Transition;

/// Class set on the active slide.
pub const ACTIVE_CLASS: &str = "active";
/// Class set on slides ordered before the active one.
pub const BEFORE_CLASS: &str = "before";
/// Class set on slides ordered after the active one.
pub const AFTER_CLASS: &str = "after";
/// Attribute carrying the signed index distance from the active slide.
pub const DISTANCE_ATTR: &str = "data-distance-from-active";

/// Options for registering a carousel on an
/// [`Engine`](crate::Engine).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CarouselOptions {
    /// Root (viewport) element; slide distances are measured to its center.
    pub root: ElementId,
    /// Ordered slide elements. Identity is stable for the carousel lifetime.
    pub slides: Vec<ElementId>,
    /// Wrap slide order at the ends instead of clamping.
    #[serde(default)]
    pub looping: bool,
    /// Slide transition behavior.
    #[serde(default)]
    pub transition: TransitionMode,
    /// Duration of animated centering transitions, in milliseconds.
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: f64,
    /// Easing applied to centering transitions.
    #[serde(default)]
    pub ease: Ease,
}

fn default_transition_duration_ms() -> f64 {
    physical::DEFAULT_TRANSITION_MS
}

/// Which transition strategy a carousel runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionMode {
    /// Class/attribute updates only; index changes are instant and no
    /// transforms are written.
    Classes,
    /// Physically translate slides: animated centering, even left/right
    /// redistribution, seamless wraparound when looping.
    #[default]
    Physical,
}

/// Read-phase working set handed into carousel and strategy code.
///
/// Holds the host read-only; all motion goes through the coordinator so the
/// write phase can flush it in one batch.
pub(crate) struct FrameCtx<'a, H: Host> {
    pub(crate) host: &'a H,
    pub(crate) transforms: &'a mut TransformCoordinator,
    pub(crate) now_ms: f64,
}

impl<H: Host> FrameCtx<'_, H> {
    pub(crate) fn width(&self, el: ElementId) -> f64 {
        self.host.offset_width(el)
    }

    /// Visible center x of `el`, including motion already scheduled this
    /// frame.
    pub(crate) fn visible_center_x(&self, el: ElementId) -> f64 {
        self.host.bounds(el).center().x + self.transforms.pending_translation(el).x
    }

    /// Signed distance from `el`'s visible center to the container center;
    /// negative when the slide sits left of center.
    pub(crate) fn distance_to_center(&self, root: ElementId, el: ElementId) -> f64 {
        self.visible_center_x(el) - self.host.bounds(root).center().x
    }

    pub(crate) fn translate_x(&mut self, el: ElementId, dx: f64) {
        self.transforms.translate(self.host, el, Vec2::new(dx, 0.0));
    }
}

/// An active-slide change observed during a carousel's frame pass.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActiveChange {
    pub(crate) index: usize,
    pub(crate) slide: ElementId,
    pub(crate) driven_by_sync: bool,
}

/// One registered carousel: an ordered slide strip plus its transition
/// strategy.
#[derive(Debug)]
pub(crate) struct Carousel {
    id: CarouselId,
    root: ElementId,
    slides: Vec<ElementId>,
    looping: bool,
    transition: Transition,
    last_active: usize,
    /// Index whose arrival must not re-notify the carousel sync set.
    sync_target: Option<usize>,
    resize: Debouncer,
}

impl Carousel {
    pub(crate) fn new(id: CarouselId, options: CarouselOptions, resize_debounce_ms: f64) -> Self {
        Self {
            id,
            root: options.root,
            slides: options.slides,
            looping: options.looping,
            transition: Transition::from_mode(
                options.transition,
                options.transition_duration_ms,
                options.ease,
            ),
            last_active: 0,
            sync_target: None,
            resize: Debouncer::new(resize_debounce_ms),
        }
    }

    pub(crate) fn id(&self) -> CarouselId {
        self.id
    }

    pub(crate) fn slides(&self) -> &[ElementId] {
        &self.slides
    }

    pub(crate) fn slide_index(&self, el: ElementId) -> Option<usize> {
        self.slides.iter().position(|s| *s == el)
    }

    pub(crate) fn active_index(&self) -> usize {
        self.last_active
    }

    pub(crate) fn active_slide(&self) -> ElementId {
        self.slides[self.last_active]
    }

    pub(crate) fn is_transitioning(&self) -> bool {
        match &self.transition {
            Transition::Classes(_) => false,
            Transition::Physical(p) => p.is_transitioning(),
        }
    }

    pub(crate) fn is_interacting(&self) -> bool {
        match &self.transition {
            Transition::Classes(_) => false,
            Transition::Physical(p) => p.is_interacting(),
        }
    }

    /// Arm the debounced re-centering and drop any in-flight transition;
    /// its start distance is stale once layout shifts.
    pub(crate) fn on_resize(&mut self, now_ms: f64) {
        self.resize.arm(now_ms);
        if let Transition::Physical(p) = &mut self.transition {
            p.cancel_transition();
        }
    }

    /// A press landed on one of this carousel's slides. Interacting always
    /// preempts a transition in flight.
    pub(crate) fn begin_interaction(&mut self, slide: ElementId) {
        let Some(index) = self.slide_index(slide) else {
            return;
        };
        if let Transition::Physical(p) = &mut self.transition {
            p.begin_interaction(index);
            self.sync_target = None;
        }
    }

    /// The deferred end of a slide drag: decide between settling and moving
    /// to a neighbor, then start that transition.
    pub(crate) fn end_interaction<H: Host>(&mut self, ctx: &FrameCtx<'_, H>, summary: DragSummary) {
        if let Transition::Physical(p) = &mut self.transition {
            p.end_interaction(
                ctx,
                self.root,
                &self.slides,
                self.looping,
                self.last_active,
                summary,
            );
        }
    }

    /// Transition to `index` (clamped to the slide range). A no-op while an
    /// interaction is in progress.
    pub(crate) fn transition_to_index<H: Host>(
        &mut self,
        ctx: &FrameCtx<'_, H>,
        index: usize,
        driven_by_sync: bool,
    ) {
        if self.is_interacting() {
            return;
        }
        let index = index.min(self.slides.len() - 1);
        match &mut self.transition {
            Transition::Classes(c) => c.set_index(index),
            Transition::Physical(p) => p.begin_transition(ctx, self.root, &self.slides, index),
        }
        self.sync_target = driven_by_sync.then_some(index);
    }

    pub(crate) fn next<H: Host>(&mut self, ctx: &FrameCtx<'_, H>) {
        let n = self.slides.len();
        let target = if self.looping {
            (self.last_active + 1) % n
        } else {
            (self.last_active + 1).min(n - 1)
        };
        self.transition_to_index(ctx, target, false);
    }

    pub(crate) fn previous<H: Host>(&mut self, ctx: &FrameCtx<'_, H>) {
        let n = self.slides.len();
        let target = if self.looping {
            (self.last_active + n - 1) % n
        } else {
            self.last_active.saturating_sub(1)
        };
        self.transition_to_index(ctx, target, false);
    }

    /// Read-phase pass: fire a due re-centering, advance the strategy, then
    /// recompute the active slide. Returns the change when it differs from
    /// the last known one.
    pub(crate) fn frame<H: Host>(&mut self, ctx: &mut FrameCtx<'_, H>) -> Option<ActiveChange> {
        if self.resize.fire(ctx.now_ms) {
            let index = self.last_active;
            tracing::debug!(id = ?self.id, index, "re-centering after resize");
            self.transition_to_index(ctx, index, false);
        }

        match &mut self.transition {
            Transition::Classes(_) => {}
            Transition::Physical(p) => {
                p.frame(ctx, self.root, &self.slides, self.looping, self.last_active);
            }
        }

        let active = match &self.transition {
            Transition::Classes(c) => c.index().min(self.slides.len() - 1),
            Transition::Physical(p) => {
                p.active_index(ctx, self.root, &self.slides, self.last_active)
            }
        };
        if active == self.last_active {
            return None;
        }
        self.last_active = active;
        let driven_by_sync = self.sync_target == Some(active);
        if driven_by_sync {
            self.sync_target = None;
        }
        Some(ActiveChange {
            index: active,
            slide: self.slides[active],
            driven_by_sync,
        })
    }

    /// Write phase: publish active/before/after classes and the signed
    /// index-distance attribute on every slide.
    pub(crate) fn publish_slide_state<H: Host>(&self, host: &mut H) {
        let active = self.last_active;
        for (i, slide) in self.slides.iter().enumerate() {
            let keep = match i.cmp(&active) {
                std::cmp::Ordering::Less => BEFORE_CLASS,
                std::cmp::Ordering::Equal => ACTIVE_CLASS,
                std::cmp::Ordering::Greater => AFTER_CLASS,
            };
            for class in [ACTIVE_CLASS, BEFORE_CLASS, AFTER_CLASS] {
                if class != keep {
                    host.remove_class(*slide, class);
                }
            }
            host.add_class(*slide, keep);
            host.set_attribute(
                *slide,
                DISTANCE_ATTR,
                &(i as i64 - active as i64).to_string(),
            );
        }
    }
}
