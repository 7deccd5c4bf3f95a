use crate::animation::ease::Ease;
use crate::carousel::FrameCtx;
use crate::drag::draggable::DragSummary;
use crate::foundation::core::ElementId;
use crate::foundation::math::{DISTANCE_EPSILON, approx_eq, inverse_lerp, lerp};
use crate::host::Host;

/// Default duration of an animated centering transition.
pub(crate) const DEFAULT_TRANSITION_MS: f64 = 500.0;

/// Interactions longer than this are deliberate positioning, not flings;
/// their release velocity is ignored.
const SLOW_DRAG_CUTOFF_MS: f64 = 700.0;

/// A centering transition in flight.
#[derive(Clone, Copy, Debug)]
struct TransitionTarget {
    index: usize,
    /// `[start, end]` timestamps in milliseconds.
    time_range: (f64, f64),
    /// Distance of the target slide to the container center when the
    /// transition began.
    start_distance: f64,
}

/// A pointer interaction in flight; mutually exclusive with a transition
/// target.
#[derive(Clone, Copy, Debug)]
struct Interaction {
    index: usize,
}

/// The physical slide strategy: animated centering transitions, even
/// left/right redistribution of slides around an anchor, and seamless
/// wraparound for looping carousels.
///
/// State machine: `Idle ⇄ Transitioning ⇄ Interacting`. Starting an
/// interaction clears any transition target; a transition can never start
/// while an interaction is in progress.
#[derive(Debug)]
pub(crate) struct PhysicalSlide {
    duration_ms: f64,
    ease: Ease,
    target: Option<TransitionTarget>,
    interaction: Option<Interaction>,
}

impl PhysicalSlide {
    pub(crate) fn new(duration_ms: f64, ease: Ease) -> Self {
        Self {
            duration_ms,
            ease,
            target: None,
            interaction: None,
        }
    }

    pub(crate) fn is_transitioning(&self) -> bool {
        self.target.is_some()
    }

    pub(crate) fn is_interacting(&self) -> bool {
        self.interaction.is_some()
    }

    pub(crate) fn cancel_transition(&mut self) {
        self.target = None;
    }

    /// Start an animated transition toward `index`. Ignored while an
    /// interaction is in progress or when already headed to that index.
    pub(crate) fn begin_transition<H: Host>(
        &mut self,
        ctx: &FrameCtx<'_, H>,
        root: ElementId,
        slides: &[ElementId],
        index: usize,
    ) {
        if self.interaction.is_some() {
            return;
        }
        if self.target.is_some_and(|t| t.index == index) {
            return;
        }
        let start_distance = ctx.distance_to_center(root, slides[index]);
        tracing::debug!(index, start_distance, "slide transition");
        self.target = Some(TransitionTarget {
            index,
            time_range: (ctx.now_ms, ctx.now_ms + self.duration_ms),
            start_distance,
        });
    }

    /// A press on slide `index`; preempts any transition in flight.
    pub(crate) fn begin_interaction(&mut self, index: usize) {
        self.target = None;
        self.interaction = Some(Interaction { index });
    }

    /// Release decision: settle on the recomputed active slide, or move one
    /// slide in the fling direction. Ending with no interaction in progress
    /// is a no-op.
    pub(crate) fn end_interaction<H: Host>(
        &mut self,
        ctx: &FrameCtx<'_, H>,
        root: ElementId,
        slides: &[ElementId],
        looping: bool,
        last_active: usize,
        summary: DragSummary,
    ) {
        if self.interaction.take().is_none() {
            return;
        }
        let n = slides.len();
        let active = self.active_index(ctx, root, slides, last_active);
        let distance = ctx.distance_to_center(root, slides[active]);

        let mut velocity = summary.displacement.x;
        if summary.displacement.y.abs() > summary.displacement.x.abs() {
            // Predominantly vertical: a scroll, not a fling.
            velocity = 0.0;
        }
        if summary.duration_ms > SLOW_DRAG_CUTOFF_MS {
            velocity = 0.0;
        }

        let settle = distance == 0.0
            || velocity == 0.0
            || -distance.signum() == velocity.signum();
        let target = if settle {
            active
        } else if velocity > 0.0 {
            // Rightward fling reveals the previous slide.
            if active == 0 && !looping {
                active
            } else {
                (active + n - 1) % n
            }
        } else if active + 1 == n && !looping {
            active
        } else {
            (active + 1) % n
        };
        self.begin_transition(ctx, root, slides, target);
    }

    /// Per-frame work: advance the transition, wrap the anchor when looping,
    /// and re-split the strip so it stays gap-free around the anchor.
    pub(crate) fn frame<H: Host>(
        &mut self,
        ctx: &mut FrameCtx<'_, H>,
        root: ElementId,
        slides: &[ElementId],
        looping: bool,
        last_active: usize,
    ) {
        self.render_transition(ctx, root, slides);
        let anchor = self
            .interaction
            .map(|i| i.index)
            .or_else(|| self.target.map(|t| t.index))
            .unwrap_or(last_active);
        if looping {
            wrap_anchor(ctx, root, slides, anchor);
        }
        split(ctx, root, slides, looping, anchor);
    }

    /// The slide minimizing absolute visible-center distance to the container
    /// center. Ties within epsilon break to the previously active slide,
    /// then to the lowest index.
    pub(crate) fn active_index<H: Host>(
        &self,
        ctx: &FrameCtx<'_, H>,
        root: ElementId,
        slides: &[ElementId],
        last_active: usize,
    ) -> usize {
        let mut best_index = 0;
        let mut best_distance = f64::INFINITY;
        for (i, slide) in slides.iter().enumerate() {
            let d = ctx.distance_to_center(root, *slide).abs();
            if d + DISTANCE_EPSILON < best_distance {
                best_index = i;
                best_distance = d;
            } else if approx_eq(d, best_distance) && i == last_active {
                best_index = i;
                best_distance = best_distance.min(d);
            }
        }
        best_index
    }

    /// Apply this frame's share of an eased centering transition to every
    /// slide, preserving relative spacing. Consumes the target at progress 1.
    fn render_transition<H: Host>(
        &mut self,
        ctx: &mut FrameCtx<'_, H>,
        root: ElementId,
        slides: &[ElementId],
    ) {
        if self.interaction.is_some() {
            return;
        }
        let Some(target) = self.target else {
            return;
        };
        let eased = self
            .ease
            .apply(inverse_lerp(target.time_range.0, target.time_range.1, ctx.now_ms));
        let target_distance = lerp(target.start_distance, 0.0, eased);
        let current = ctx.distance_to_center(root, slides[target.index]);
        if current != 0.0 {
            let delta = (target_distance.abs() - current.abs()) * current.signum();
            if delta != 0.0 {
                for slide in slides {
                    ctx.translate_x(*slide, delta);
                }
            }
        }
        if eased >= 1.0 {
            self.target = None;
        }
    }
}

/// Translate the anchor by a full strip width when that strictly shortens its
/// apparent distance to center. Fires at most once per qualifying frame and
/// never increases drift; without intervening movement a second application
/// is a no-op.
fn wrap_anchor<H: Host>(
    ctx: &mut FrameCtx<'_, H>,
    root: ElementId,
    slides: &[ElementId],
    anchor: usize,
) {
    let total: f64 = slides.iter().map(|s| ctx.width(*s)).sum();
    if total <= 0.0 {
        return;
    }
    let distance = ctx.distance_to_center(root, slides[anchor]);
    if distance.abs() > total / 2.0 {
        let shift = -distance.signum() * total;
        if (distance + shift).abs() < distance.abs() {
            ctx.translate_x(slides[anchor], shift);
        }
    }
}

/// Redistribute the non-anchor slides to either side of the anchor so the
/// strip is gap-free and overlap-free: each placed slide's center-to-center
/// distance from the anchor is the sum of the widths of the slides strictly
/// between, plus half its own and half the anchor's width.
///
/// Assignment is greedy: walking outward by index (wrapping when looping),
/// the next untouched slide goes to whichever side has more uncovered
/// viewport distance left to fill.
fn split<H: Host>(
    ctx: &mut FrameCtx<'_, H>,
    root: ElementId,
    slides: &[ElementId],
    looping: bool,
    anchor: usize,
) {
    let n = slides.len();
    if n <= 1 {
        return;
    }
    let root_bounds = ctx.host.bounds(root);
    let anchor_center = ctx.visible_center_x(slides[anchor]);
    let half_anchor = ctx.width(slides[anchor]) / 2.0;

    let mut left_edge = anchor_center - half_anchor;
    let mut right_edge = anchor_center + half_anchor;
    let mut left_uncovered = left_edge - root_bounds.x0;
    let mut right_uncovered = root_bounds.x1 - right_edge;

    let mut placed = vec![false; n];
    placed[anchor] = true;
    let mut left_cursor = anchor;
    let mut right_cursor = anchor;

    for _ in 1..n {
        let left_candidate = next_left(left_cursor, n, looping, &placed);
        let right_candidate = next_right(right_cursor, n, looping, &placed);
        let (index, to_left) = match (left_candidate, right_candidate) {
            (None, None) => break,
            (Some(i), None) => (i, true),
            (None, Some(i)) => (i, false),
            (Some(l), Some(r)) => {
                if left_uncovered >= right_uncovered {
                    (l, true)
                } else {
                    (r, false)
                }
            }
        };

        let el = slides[index];
        let width = ctx.width(el);
        let desired_center = if to_left {
            left_edge - width / 2.0
        } else {
            right_edge + width / 2.0
        };
        let delta = desired_center - ctx.visible_center_x(el);
        if delta != 0.0 {
            ctx.translate_x(el, delta);
        }
        placed[index] = true;
        if to_left {
            left_cursor = index;
            left_edge -= width;
            left_uncovered -= width;
        } else {
            right_cursor = index;
            right_edge += width;
            right_uncovered -= width;
        }
    }
}

fn next_left(cursor: usize, n: usize, looping: bool, placed: &[bool]) -> Option<usize> {
    if looping {
        let candidate = (cursor + n - 1) % n;
        (!placed[candidate]).then_some(candidate)
    } else if cursor > 0 && !placed[cursor - 1] {
        Some(cursor - 1)
    } else {
        None
    }
}

fn next_right(cursor: usize, n: usize, looping: bool, placed: &[bool]) -> Option<usize> {
    if looping {
        let candidate = (cursor + 1) % n;
        (!placed[candidate]).then_some(candidate)
    } else if cursor + 1 < n && !placed[cursor + 1] {
        Some(cursor + 1)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/carousel/physical.rs"]
mod tests;
