//! Tests for cancellable one-shot debounce timers

use std::time::{Duration, Instant};

use fitview::debounce::Debouncer;

#[test]
fn test_fires_once_after_delay() {
    let mut d = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();
    d.schedule(t0);

    assert!(!d.fire(t0 + Duration::from_millis(50)));
    assert!(d.is_pending());
    assert!(d.fire(t0 + Duration::from_millis(150)));
    // One-shot: a second poll does not fire again
    assert!(!d.fire(t0 + Duration::from_millis(300)));
    assert!(!d.is_pending());
}

#[test]
fn test_reschedule_pushes_deadline() {
    let mut d = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();
    d.schedule(t0);
    d.schedule(t0 + Duration::from_millis(80));

    // Original deadline passes without firing
    assert!(!d.fire(t0 + Duration::from_millis(120)));
    assert!(d.fire(t0 + Duration::from_millis(200)));
}

#[test]
fn test_cancel_prevents_fire() {
    let mut d = Debouncer::new(Duration::from_millis(100));
    let t0 = Instant::now();
    d.schedule(t0);
    d.cancel();
    assert!(!d.is_pending());
    assert!(!d.fire(t0 + Duration::from_millis(500)));
}

#[test]
fn test_unscheduled_never_fires() {
    let mut d = Debouncer::new(Duration::from_millis(10));
    assert!(!d.is_pending());
    assert!(!d.fire(Instant::now() + Duration::from_secs(1)));
}
