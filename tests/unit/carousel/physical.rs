use super::*;
use crate::host::MemoryHost;
use crate::transform::coordinator::TransformCoordinator;
use kurbo::{Rect, Vec2};

const ROOT: ElementId = ElementId(100);

fn slide_ids(n: usize) -> Vec<ElementId> {
    (0..n as u64).map(ElementId).collect()
}

fn host_with_slides(container_width: f64, centers_and_widths: &[(f64, f64)]) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.insert(ROOT, Rect::new(0.0, 0.0, container_width, 100.0));
    for (i, (center, width)) in centers_and_widths.iter().enumerate() {
        host.insert(
            ElementId(i as u64),
            Rect::new(center - width / 2.0, 0.0, center + width / 2.0, 100.0),
        );
    }
    host
}

fn end_frame(host: &mut MemoryHost, transforms: &mut TransformCoordinator) {
    transforms.flush(host);
    transforms.clear();
}

#[test]
fn split_distributes_looping_slides_evenly_around_the_anchor() {
    // Five stacked 200px slides in a 1000px container, anchored on index 2.
    let host = host_with_slides(
        1000.0,
        &[(500.0, 200.0); 5],
    );
    let slides = slide_ids(5);
    let mut transforms = TransformCoordinator::new();
    let mut ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };

    split(&mut ctx, ROOT, &slides, true, 2);

    assert_eq!(ctx.visible_center_x(ElementId(2)), 500.0);
    assert_eq!(ctx.visible_center_x(ElementId(1)), 300.0);
    assert_eq!(ctx.visible_center_x(ElementId(0)), 100.0);
    assert_eq!(ctx.visible_center_x(ElementId(3)), 700.0);
    assert_eq!(ctx.visible_center_x(ElementId(4)), 900.0);
}

#[test]
fn split_without_looping_keeps_index_order_on_each_side() {
    let host = host_with_slides(300.0, &[(150.0, 300.0); 3]);
    let slides = slide_ids(3);
    let mut transforms = TransformCoordinator::new();
    let mut ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };

    split(&mut ctx, ROOT, &slides, false, 1);

    assert_eq!(ctx.visible_center_x(ElementId(0)), -150.0);
    assert_eq!(ctx.visible_center_x(ElementId(1)), 150.0);
    assert_eq!(ctx.visible_center_x(ElementId(2)), 450.0);
}

#[test]
fn wraparound_applies_only_when_it_strictly_reduces_distance() {
    // Three 300px slides, 900px strip, container center at 150.
    let host = host_with_slides(300.0, &[(650.0, 300.0), (950.0, 300.0), (1250.0, 300.0)]);
    let slides = slide_ids(3);
    let mut transforms = TransformCoordinator::new();
    let mut ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };

    // Distance 500 exceeds half the strip (450): wrap a full strip left.
    wrap_anchor(&mut ctx, ROOT, &slides, 0);
    assert_eq!(ctx.transforms.pending_translation(ElementId(0)).x, -900.0);
    assert_eq!(ctx.distance_to_center(ROOT, ElementId(0)), -400.0);

    // Without intervening movement the second application is a no-op.
    wrap_anchor(&mut ctx, ROOT, &slides, 0);
    assert_eq!(ctx.transforms.pending_translation(ElementId(0)).x, -900.0);
}

#[test]
fn wraparound_ignores_distances_at_exactly_half_the_strip() {
    let host = host_with_slides(300.0, &[(600.0, 300.0), (900.0, 300.0), (1200.0, 300.0)]);
    let slides = slide_ids(3);
    let mut transforms = TransformCoordinator::new();
    let mut ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };

    wrap_anchor(&mut ctx, ROOT, &slides, 0);
    assert_eq!(ctx.transforms.pending_translation(ElementId(0)), Vec2::ZERO);
}

#[test]
fn transition_applies_eased_incremental_deltas_to_every_slide() {
    let mut host = host_with_slides(300.0, &[(100.0, 300.0), (400.0, 300.0)]);
    let slides = slide_ids(2);
    let mut transforms = TransformCoordinator::new();
    let mut strategy = PhysicalSlide::new(500.0, Ease::Linear);

    let ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };
    strategy.begin_transition(&ctx, ROOT, &slides, 0);
    assert!(strategy.is_transitioning());

    // Halfway through, half the 50px start distance has been recovered.
    let mut ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 250.0,
    };
    strategy.frame(&mut ctx, ROOT, &slides, false, 0);
    assert_eq!(ctx.transforms.pending_translation(ElementId(0)).x, 25.0);
    assert_eq!(ctx.transforms.pending_translation(ElementId(1)).x, 25.0);
    end_frame(&mut host, &mut transforms);

    // At the end of the time range the target is consumed and the slide is
    // exactly centered.
    let mut ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 500.0,
    };
    strategy.frame(&mut ctx, ROOT, &slides, false, 0);
    end_frame(&mut host, &mut transforms);
    assert!(!strategy.is_transitioning());
    assert_eq!(host.center_x(ElementId(0)), 150.0);
}

#[test]
fn active_slide_tie_breaks_to_last_active_then_lowest_index() {
    let host = host_with_slides(
        300.0,
        &[(140.0, 100.0), (160.0, 100.0), (400.0, 100.0)],
    );
    let slides = slide_ids(3);
    let mut transforms = TransformCoordinator::new();
    let strategy = PhysicalSlide::new(500.0, Ease::Linear);
    let ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };

    // Slides 0 and 1 are both 10px from center.
    assert_eq!(strategy.active_index(&ctx, ROOT, &slides, 1), 1);
    assert_eq!(strategy.active_index(&ctx, ROOT, &slides, 0), 0);
    // Neither tied slide was active: the lower index wins.
    assert_eq!(strategy.active_index(&ctx, ROOT, &slides, 2), 0);
}

fn fling_fixture() -> (MemoryHost, Vec<ElementId>) {
    // Active slide 1 sits 70px right of the container center.
    let host = host_with_slides(
        300.0,
        &[(-80.0, 300.0), (220.0, 300.0), (520.0, 300.0)],
    );
    (host, slide_ids(3))
}

fn summary(duration_ms: f64, dx: f64, dy: f64) -> DragSummary {
    DragSummary {
        duration_ms,
        displacement: Vec2::new(dx, dy),
    }
}

fn ended_target(
    host: &MemoryHost,
    slides: &[ElementId],
    looping: bool,
    summary: DragSummary,
) -> Option<usize> {
    let mut transforms = TransformCoordinator::new();
    let mut strategy = PhysicalSlide::new(500.0, Ease::Linear);
    strategy.begin_interaction(1);
    let ctx = FrameCtx {
        host,
        transforms: &mut transforms,
        now_ms: 1_000.0,
    };
    strategy.end_interaction(&ctx, ROOT, slides, looping, 1, summary);
    strategy.target.map(|t| t.index)
}

#[test]
fn slow_drags_settle_on_the_active_slide() {
    let (host, slides) = fling_fixture();
    assert_eq!(
        ended_target(&host, &slides, false, summary(800.0, 120.0, 8.0)),
        Some(1)
    );
}

#[test]
fn vertical_gestures_settle_on_the_active_slide() {
    let (host, slides) = fling_fixture();
    assert_eq!(
        ended_target(&host, &slides, false, summary(200.0, 30.0, 80.0)),
        Some(1)
    );
}

#[test]
fn rightward_flings_move_to_the_previous_slide() {
    let (host, slides) = fling_fixture();
    assert_eq!(
        ended_target(&host, &slides, false, summary(200.0, 120.0, 4.0)),
        Some(0)
    );
}

#[test]
fn flings_toward_center_settle() {
    let (host, slides) = fling_fixture();
    // Active slide is right of center; a leftward fling is already bringing
    // it home.
    assert_eq!(
        ended_target(&host, &slides, false, summary(200.0, -120.0, 4.0)),
        Some(1)
    );
}

#[test]
fn boundary_flings_clamp_unless_looping() {
    // Active slide 0 sits 70px right of center.
    let host = host_with_slides(
        300.0,
        &[(220.0, 300.0), (520.0, 300.0), (820.0, 300.0)],
    );
    let slides = slide_ids(3);

    let target = {
        let mut transforms = TransformCoordinator::new();
        let mut strategy = PhysicalSlide::new(500.0, Ease::Linear);
        strategy.begin_interaction(0);
        let ctx = FrameCtx {
            host: &host,
            transforms: &mut transforms,
            now_ms: 0.0,
        };
        strategy.end_interaction(&ctx, ROOT, &slides, false, 0, summary(200.0, 120.0, 0.0));
        strategy.target.map(|t| t.index)
    };
    assert_eq!(target, Some(0));

    let target = {
        let mut transforms = TransformCoordinator::new();
        let mut strategy = PhysicalSlide::new(500.0, Ease::Linear);
        strategy.begin_interaction(0);
        let ctx = FrameCtx {
            host: &host,
            transforms: &mut transforms,
            now_ms: 0.0,
        };
        strategy.end_interaction(&ctx, ROOT, &slides, true, 0, summary(200.0, 120.0, 0.0));
        strategy.target.map(|t| t.index)
    };
    assert_eq!(target, Some(2));
}

#[test]
fn ending_without_an_interaction_is_a_no_op() {
    let (host, slides) = fling_fixture();
    let mut transforms = TransformCoordinator::new();
    let mut strategy = PhysicalSlide::new(500.0, Ease::Linear);
    let ctx = FrameCtx {
        host: &host,
        transforms: &mut transforms,
        now_ms: 0.0,
    };
    strategy.end_interaction(&ctx, ROOT, &slides, false, 1, summary(200.0, 120.0, 0.0));
    assert!(strategy.target.is_none());
}
