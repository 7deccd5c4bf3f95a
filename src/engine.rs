use std::collections::BTreeMap;

use crate::carousel::{ActiveChange, Carousel, CarouselOptions, FrameCtx, TransitionMode};
use crate::drag::constraint::{DragConstraint, LockAxis};
use crate::drag::draggable::Draggable;
use crate::foundation::core::{CarouselId, ElementId, FramePhase};
use crate::foundation::error::{SlidewayError, SlidewayResult};
use crate::frame::scheduler::FrameScheduler;
use crate::host::Host;
use crate::input::events::{EngineEvent, InputEvent};
use crate::input::pointer::{PointerSampler, SamplerLease};
use crate::sync::groups::SyncGroups;
use crate::transform::coordinator::TransformCoordinator;

/// Quiet window after the last resize event before carousels re-center.
const RESIZE_DEBOUNCE_MS: f64 = 250.0;

/// Work deferred into a later frame phase.
#[derive(Clone, Copy, Debug)]
enum Deferred {
    /// Process a drag release: the end event and the carousel settle/fling
    /// decision, after the final delta has been consumed.
    EndDrag(ElementId),
    /// Publish a carousel's slide classes and attributes.
    PublishSlides(CarouselId),
}

/// Application root owning the host and every per-frame service.
///
/// There are no global singletons: the scheduler, pointer sampler, transform
/// coordinator, and both sync-group instances live here and are passed by
/// reference into the subsystems. The embedder drives the engine with
/// [`Engine::dispatch`] for input and [`Engine::tick`] once per animation
/// frame; both return the [`EngineEvent`]s they produced, in order.
pub struct Engine<H: Host> {
    host: H,
    scheduler: FrameScheduler<Deferred>,
    transforms: TransformCoordinator,
    pointer: PointerSampler,
    draggables: BTreeMap<ElementId, Draggable>,
    leases: BTreeMap<ElementId, SamplerLease>,
    draggable_sync: SyncGroups<ElementId>,
    carousels: Vec<Option<Carousel>>,
    carousel_sync: SyncGroups<CarouselId>,
    slide_owner: BTreeMap<ElementId, CarouselId>,
    now_ms: f64,
    frame: u64,
}

impl<H: Host> Engine<H> {
    /// Create a stopped engine around `host`. Call [`Engine::start`] before
    /// ticking.
    pub fn new(host: H) -> Self {
        Self {
            host,
            scheduler: FrameScheduler::new(),
            transforms: TransformCoordinator::new(),
            pointer: PointerSampler::new(),
            draggables: BTreeMap::new(),
            leases: BTreeMap::new(),
            draggable_sync: SyncGroups::new(),
            carousels: Vec::new(),
            carousel_sync: SyncGroups::new(),
            slide_owner: BTreeMap::new(),
            now_ms: 0.0,
            frame: 0,
        }
    }

    /// The embedding host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the embedding host, e.g. to apply layout changes
    /// between frames.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Begin running frames. Idempotent.
    pub fn start(&mut self) {
        self.scheduler.start();
    }

    /// Stop running frames. Idempotent; [`Engine::tick`] becomes a no-op
    /// until restarted, and deferred work is retained.
    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    /// Whether the engine is currently running frames.
    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Register `element` as a standalone draggable with an ordered
    /// constraint pipeline.
    ///
    /// Registering an element that is already draggable is a misuse error.
    pub fn add_draggable(
        &mut self,
        element: ElementId,
        constraints: Vec<Box<dyn DragConstraint>>,
    ) -> SlidewayResult<()> {
        if self.draggables.contains_key(&element) {
            return Err(SlidewayError::misuse(format!(
                "element {element:?} is already draggable"
            )));
        }
        self.insert_draggable(element, constraints);
        Ok(())
    }

    /// Unregister a draggable, pruning it from its sync set and returning
    /// its sampler lease. Unknown elements are a no-op.
    pub fn remove_draggable(&mut self, element: ElementId) {
        if self.draggables.remove(&element).is_some() {
            self.draggable_sync.remove(element);
            if let Some(lease) = self.leases.remove(&element) {
                self.pointer.release(lease, self.now_ms);
            }
        }
    }

    /// Link draggables so a delta on any member moves every member.
    pub fn sync_draggables(&mut self, elements: &[ElementId]) {
        self.draggable_sync.sync(elements);
    }

    /// Link carousels so an index change on any member transitions every
    /// member.
    pub fn sync_carousels(&mut self, ids: &[CarouselId]) {
        self.carousel_sync.sync(ids);
    }

    /// Register a carousel.
    ///
    /// Physical carousels make every slide a draggable locked to the x axis
    /// and sync them into one strip, so dragging any slide moves all of
    /// them. An empty slide list is a validation error; a slide that is
    /// already draggable is a misuse error.
    pub fn add_carousel(&mut self, options: CarouselOptions) -> SlidewayResult<CarouselId> {
        if options.slides.is_empty() {
            return Err(SlidewayError::validation(
                "carousel needs at least one slide",
            ));
        }
        let physical = options.transition == TransitionMode::Physical;
        if physical {
            let mut seen = std::collections::BTreeSet::new();
            for slide in &options.slides {
                if self.draggables.contains_key(slide) || !seen.insert(*slide) {
                    return Err(SlidewayError::misuse(format!(
                        "element {slide:?} is already draggable"
                    )));
                }
            }
        }

        let id = CarouselId(self.carousels.len() as u32);
        if physical {
            for slide in &options.slides {
                self.insert_draggable(*slide, vec![Box::new(LockAxis::Y)]);
                self.slide_owner.insert(*slide, id);
            }
            self.draggable_sync.sync(&options.slides);
        }
        self.carousels
            .push(Some(Carousel::new(id, options, RESIZE_DEBOUNCE_MS)));
        self.scheduler
            .schedule(FramePhase::Write, Deferred::PublishSlides(id));
        tracing::debug!(?id, "carousel registered");
        Ok(id)
    }

    /// Dispose a carousel: prune it from the carousel sync set and
    /// unregister its slide draggables. Idempotent.
    pub fn dispose_carousel(&mut self, id: CarouselId) {
        let Some(slot) = self.carousels.get_mut(id.0 as usize) else {
            return;
        };
        let Some(carousel) = slot.take() else {
            return;
        };
        self.carousel_sync.remove(id);
        for slide in carousel.slides().to_vec() {
            self.slide_owner.remove(&slide);
            self.remove_draggable(slide);
        }
        tracing::debug!(?id, "carousel disposed");
    }

    /// The carousel's active slide element.
    pub fn active_slide(&self, id: CarouselId) -> Option<ElementId> {
        self.carousel(id).map(Carousel::active_slide)
    }

    /// The carousel's active slide index.
    pub fn active_index(&self, id: CarouselId) -> Option<usize> {
        self.carousel(id).map(Carousel::active_index)
    }

    /// Whether the carousel has an animated transition in flight.
    pub fn is_transitioning(&self, id: CarouselId) -> bool {
        self.carousel(id).is_some_and(Carousel::is_transitioning)
    }

    /// Whether a pointer interaction is in progress on the carousel.
    pub fn is_being_interacted_with(&self, id: CarouselId) -> bool {
        self.carousel(id).is_some_and(Carousel::is_interacting)
    }

    /// Transition the carousel forward by one slide.
    pub fn next(&mut self, id: CarouselId) {
        self.with_carousel(id, |carousel, ctx| carousel.next(ctx));
    }

    /// Transition the carousel back by one slide.
    pub fn previous(&mut self, id: CarouselId) {
        self.with_carousel(id, |carousel, ctx| carousel.previous(ctx));
    }

    /// Transition the carousel to `index` (clamped to the slide range).
    /// A no-op while the carousel is being interacted with.
    pub fn transition_to_index(&mut self, id: CarouselId, index: usize) {
        self.with_carousel(id, |carousel, ctx| {
            carousel.transition_to_index(ctx, index, false);
        });
    }

    /// Transition the carousel to `slide`. Unknown slides are a no-op.
    pub fn transition_to_slide(&mut self, id: CarouselId, slide: ElementId) {
        self.with_carousel(id, |carousel, ctx| {
            if let Some(index) = carousel.slide_index(slide) {
                carousel.transition_to_index(ctx, index, false);
            }
        });
    }

    /// Feed one input event. Move events only buffer the pointer sampler;
    /// presses start drag machines; releases are global and schedule the
    /// deferred drag end through the read phase.
    pub fn dispatch(&mut self, event: InputEvent) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        match event {
            InputEvent::PointerDown {
                element,
                position,
                now_ms,
            } => {
                self.now_ms = self.now_ms.max(now_ms);
                self.pointer.buffer(position);
                if let Some(draggable) = self.draggables.get_mut(&element) {
                    if draggable.press(position, now_ms) {
                        tracing::debug!(?element, "drag started");
                        events.push(EngineEvent::DragStart { element });
                        if let Some(owner) = self.slide_owner.get(&element).copied() {
                            if let Some(Some(carousel)) =
                                self.carousels.get_mut(owner.0 as usize)
                            {
                                carousel.begin_interaction(element);
                            }
                        }
                    }
                }
            }
            InputEvent::PointerMove { position } => {
                self.pointer.buffer(position);
            }
            InputEvent::PointerUp { position, now_ms }
            | InputEvent::PointerCancel { position, now_ms } => {
                self.now_ms = self.now_ms.max(now_ms);
                self.pointer.buffer(position);
                for (element, draggable) in &mut self.draggables {
                    if draggable.release(now_ms) {
                        self.scheduler
                            .schedule(FramePhase::Read, Deferred::EndDrag(*element));
                    }
                }
            }
            InputEvent::Resize { now_ms } => {
                self.now_ms = self.now_ms.max(now_ms);
                for carousel in self.carousels.iter_mut().flatten() {
                    carousel.on_resize(now_ms);
                }
            }
        }
        events
    }

    /// Run one frame at `now_ms`: the read phase (pointer commit, drag
    /// deltas, deferred ends, carousel passes), the write phase (slide state,
    /// coalesced transform flush), then post-write cache invalidation.
    /// Returns the events produced this frame. A no-op while stopped.
    #[tracing::instrument(level = "trace", skip(self), fields(frame = self.frame))]
    pub fn tick(&mut self, now_ms: f64) -> Vec<EngineEvent> {
        if !self.scheduler.begin_tick() {
            return Vec::new();
        }
        self.now_ms = now_ms;
        self.frame += 1;
        let mut events = Vec::new();

        // Read phase.
        self.pointer.maintain(now_ms);
        self.pointer.commit();
        self.run_drag_frames();
        for item in self.scheduler.drain(FramePhase::Read) {
            match item {
                Deferred::EndDrag(element) => self.process_drag_end(element, &mut events),
                Deferred::PublishSlides(id) => {
                    // Publication is write-phase work; keep it there.
                    self.scheduler
                        .schedule(FramePhase::Write, Deferred::PublishSlides(id));
                }
            }
        }
        self.run_carousel_frames(&mut events);

        // Write phase.
        for item in self.scheduler.drain(FramePhase::Write) {
            match item {
                Deferred::PublishSlides(id) => {
                    if let Some(Some(carousel)) = self.carousels.get(id.0 as usize) {
                        carousel.publish_slide_state(&mut self.host);
                    }
                }
                Deferred::EndDrag(element) => {
                    self.scheduler
                        .schedule(FramePhase::Read, Deferred::EndDrag(element));
                }
            }
        }
        self.transforms.flush(&mut self.host);

        // Post-write phase.
        self.scheduler.drain(FramePhase::PostWrite);
        self.transforms.clear();
        self.scheduler.end_tick();
        events
    }

    fn insert_draggable(&mut self, element: ElementId, constraints: Vec<Box<dyn DragConstraint>>) {
        let lease = self.pointer.acquire();
        self.leases.insert(element, lease);
        self.draggables
            .insert(element, Draggable::new(element, constraints));
    }

    fn carousel(&self, id: CarouselId) -> Option<&Carousel> {
        self.carousels.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn with_carousel(
        &mut self,
        id: CarouselId,
        f: impl FnOnce(&mut Carousel, &FrameCtx<'_, H>),
    ) {
        let now_ms = self.now_ms;
        let Self {
            host,
            transforms,
            carousels,
            ..
        } = self;
        let Some(Some(carousel)) = carousels.get_mut(id.0 as usize) else {
            return;
        };
        let ctx = FrameCtx {
            host: &*host,
            transforms,
            now_ms,
        };
        f(carousel, &ctx);
    }

    /// Read phase: convert committed pointer motion into constrained deltas
    /// and fan each delta out to the whole sync set of the dragged element.
    fn run_drag_frames(&mut self) {
        let Some(pointer) = self.pointer.position() else {
            return;
        };
        let Self {
            host,
            transforms,
            draggables,
            draggable_sync,
            ..
        } = self;
        for (element, draggable) in draggables.iter_mut() {
            let translation = transforms.altered(&*host, *element).translation();
            let Some(delta) = draggable.frame_delta(pointer, translation) else {
                continue;
            };
            for member in draggable_sync.members(*element) {
                transforms.translate(&*host, member, delta);
            }
        }
    }

    fn process_drag_end(&mut self, element: ElementId, events: &mut Vec<EngineEvent>) {
        let Some(draggable) = self.draggables.get_mut(&element) else {
            return;
        };
        let Some(summary) = draggable.take_end() else {
            return;
        };
        tracing::debug!(?element, duration_ms = summary.duration_ms, "drag ended");
        events.push(EngineEvent::DragEnd { element });
        if let Some(owner) = self.slide_owner.get(&element).copied() {
            let now_ms = self.now_ms;
            let Self {
                host,
                transforms,
                carousels,
                ..
            } = self;
            if let Some(Some(carousel)) = carousels.get_mut(owner.0 as usize) {
                let ctx = FrameCtx {
                    host: &*host,
                    transforms,
                    now_ms,
                };
                carousel.end_interaction(&ctx, summary);
            }
        }
    }

    /// Read phase: per-carousel strategy pass, then fan active-slide changes
    /// out as events, write-phase publications, and sync propagation.
    fn run_carousel_frames(&mut self, events: &mut Vec<EngineEvent>) {
        let now_ms = self.now_ms;
        let mut changes: Vec<(CarouselId, ActiveChange)> = Vec::new();
        {
            let Self {
                host,
                transforms,
                carousels,
                ..
            } = self;
            for slot in carousels.iter_mut() {
                let Some(carousel) = slot else {
                    continue;
                };
                let id = carousel.id();
                let mut ctx = FrameCtx {
                    host: &*host,
                    transforms: &mut *transforms,
                    now_ms,
                };
                if let Some(change) = carousel.frame(&mut ctx) {
                    changes.push((id, change));
                }
            }
        }
        for (id, change) in changes {
            events.push(EngineEvent::CarouselTransition {
                carousel: id,
                index: change.index,
                slide: change.slide,
            });
            self.scheduler
                .schedule(FramePhase::Write, Deferred::PublishSlides(id));
            if !change.driven_by_sync {
                for sibling in self.carousel_sync.members(id) {
                    if sibling == id {
                        continue;
                    }
                    self.with_carousel(sibling, |carousel, ctx| {
                        carousel.transition_to_index(ctx, change.index, true);
                    });
                }
            }
        }
    }
}
