use super::*;
use crate::host::MemoryHost;
use kurbo::Rect;

fn host_with(el: ElementId) -> MemoryHost {
    let mut host = MemoryHost::new();
    host.insert(el, Rect::new(0.0, 0.0, 100.0, 100.0));
    host
}

#[test]
fn many_translates_coalesce_into_one_write() {
    let el = ElementId(1);
    let mut host = host_with(el);
    let mut coordinator = TransformCoordinator::new();

    let clean = coordinator.clean(&host, el);
    coordinator.translate(&host, el, Vec2::new(10.0, 0.0));
    coordinator.translate(&host, el, Vec2::new(-3.0, 4.0));
    coordinator.translate(&host, el, Vec2::new(0.5, 0.5));
    coordinator.flush(&mut host);

    assert_eq!(host.write_count(el), 1);
    let expected = clean.translated(Vec2::new(7.5, 4.5)).to_attr();
    assert_eq!(host.write_log()[0].1, expected);
}

#[test]
fn clean_is_memoized_for_the_frame() {
    let el = ElementId(1);
    let mut host = host_with(el);
    let mut coordinator = TransformCoordinator::new();

    let first = coordinator.clean(&host, el);
    // A write landing behind the coordinator's back must not leak into the
    // frame's snapshot.
    host.set_transform_attr(el, "matrix(1, 0, 0, 1, 99, 99)");
    assert_eq!(coordinator.clean(&host, el), first);
}

#[test]
fn pending_translation_tracks_scheduled_motion_only() {
    let el = ElementId(1);
    let host = host_with(el);
    let mut coordinator = TransformCoordinator::new();

    assert_eq!(coordinator.pending_translation(el), Vec2::ZERO);
    coordinator.translate(&host, el, Vec2::new(5.0, -2.0));
    coordinator.translate(&host, el, Vec2::new(1.0, 0.0));
    assert_eq!(coordinator.pending_translation(el), Vec2::new(6.0, -2.0));
}

#[test]
fn reads_without_translation_do_not_write() {
    let el = ElementId(1);
    let mut host = host_with(el);
    let mut coordinator = TransformCoordinator::new();

    coordinator.clean(&host, el);
    coordinator.altered(&host, el);
    coordinator.flush(&mut host);
    assert_eq!(host.write_count(el), 0);
}

#[test]
fn clear_drops_all_frame_state() {
    let el = ElementId(1);
    let mut host = host_with(el);
    let mut coordinator = TransformCoordinator::new();

    coordinator.translate(&host, el, Vec2::new(5.0, 0.0));
    coordinator.flush(&mut host);
    coordinator.clear();
    assert_eq!(coordinator.pending_translation(el), Vec2::ZERO);

    // The next frame's clean snapshot re-reads the flushed value.
    let clean = coordinator.clean(&host, el);
    assert_eq!(clean.translation(), Vec2::new(5.0, 0.0));
}
