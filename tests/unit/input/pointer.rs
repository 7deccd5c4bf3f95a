use super::*;

#[test]
fn commit_exposes_one_frame_consistent_position() {
    let mut sampler = PointerSampler::new();
    let lease = sampler.acquire();

    sampler.buffer(Point::new(10.0, 10.0));
    sampler.buffer(Point::new(12.0, 11.0));
    assert!(sampler.commit());
    // Only the latest buffered value is visible, and it stays stable until
    // the next commit.
    assert_eq!(sampler.position(), Some(Point::new(12.0, 11.0)));
    assert!(!sampler.commit());
    assert_eq!(sampler.position(), Some(Point::new(12.0, 11.0)));

    sampler.release(lease, 0.0);
}

#[test]
fn recommitting_the_same_position_reports_no_change() {
    let mut sampler = PointerSampler::new();
    let _lease = sampler.acquire();
    sampler.buffer(Point::new(5.0, 5.0));
    assert!(sampler.commit());
    sampler.buffer(Point::new(5.0, 5.0));
    assert!(!sampler.commit());
}

#[test]
fn buffering_without_a_lease_is_ignored() {
    let mut sampler = PointerSampler::new();
    sampler.buffer(Point::new(1.0, 1.0));
    assert!(!sampler.commit());
    assert_eq!(sampler.position(), None);
}

#[test]
fn teardown_is_debounced_and_cancelled_by_reacquire() {
    let mut sampler = PointerSampler::new();
    let lease = sampler.acquire();
    sampler.buffer(Point::new(3.0, 3.0));
    sampler.commit();

    sampler.release(lease, 1_000.0);
    sampler.maintain(1_500.0);
    assert_eq!(sampler.position(), Some(Point::new(3.0, 3.0)));

    // Re-acquiring inside the idle window keeps the committed state alive.
    let lease = sampler.acquire();
    sampler.maintain(10_000.0);
    assert_eq!(sampler.position(), Some(Point::new(3.0, 3.0)));

    sampler.release(lease, 10_000.0);
    sampler.maintain(10_000.0 + IDLE_TEARDOWN_MS);
    assert_eq!(sampler.position(), None);
}
