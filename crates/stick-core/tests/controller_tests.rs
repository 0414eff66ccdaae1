// Host-side integration tests: touch batches in, snapshots out.

use std::cell::Cell;
use std::f64::consts::FRAC_PI_2;
use std::rc::Rc;
use stick_core::{
    deliver_while, Controller, ManualScheduler, RectBox, SliceKey, StateSnapshot, StickConfig,
    StickError, Touch, TouchEvent, TouchId, TrackedBox,
};

// 200x200 pad at the page origin; its center sits at (100, 100)
fn pad() -> Rc<TrackedBox> {
    Rc::new(TrackedBox::new(RectBox::new(0.0, 0.0, 200.0, 200.0)))
}

fn unthrottled() -> StickConfig {
    StickConfig::default().with_throttle(None)
}

fn make(config: StickConfig) -> (Controller<ManualScheduler>, ManualScheduler) {
    let clock = ManualScheduler::new();
    let controller = Controller::new(config, pad(), clock.clone()).unwrap();
    (controller, clock)
}

fn direction(s: &StateSnapshot) -> SliceKey {
    s.direction.clone().expect("active snapshot carries a direction")
}

#[test]
fn touch_on_start_angle_lands_in_first_slice() {
    let (mut stick, _) = make(unthrottled());
    // directly below center in page space: -π/2 once Y is inverted
    let out = stick.dispatch(&TouchEvent::start(&[Touch::new(1, 100.0, 180.0)]));
    assert_eq!(out.len(), 1);
    assert!(out[0].is_active);
    assert_eq!(direction(&out[0]), SliceKey::Index(1));
    assert!((out[0].angle.unwrap() - 3.0 * FRAC_PI_2).abs() < 1e-12);
}

#[test]
fn eight_way_directions_walk_with_angle() {
    let (mut stick, _) = make(unthrottled());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 100.0, 180.0)]));
    let cases = [
        ((180.0, 100.0), 3), // right
        ((100.0, 20.0), 5),  // above
        ((20.0, 100.0), 7),  // left
        ((160.0, 160.0), 2), // below-right
    ];
    for ((x, y), key) in cases {
        let out = stick.dispatch(&TouchEvent::moved(&[Touch::new(1, x, y)]));
        assert_eq!(direction(&out[0]), SliceKey::Index(key), "point ({x},{y})");
    }
}

#[test]
fn snapshot_carries_cos_and_sin_of_angle() {
    let (mut stick, _) = make(unthrottled());
    let out = stick.dispatch(&TouchEvent::start(&[Touch::new(1, 150.0, 50.0)]));
    let s = &out[0];
    let angle = s.angle.unwrap();
    assert!((s.cos.unwrap() - angle.cos()).abs() < 1e-12);
    assert!((s.sin.unwrap() - angle.sin()).abs() < 1e-12);
    assert!(s.sin.unwrap() > 0.0 && s.cos.unwrap() > 0.0);
}

#[test]
fn release_emits_bare_inactive_snapshot() {
    let (mut stick, _) = make(unthrottled());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 150.0, 100.0)]));
    stick.dispatch(&TouchEvent::moved(&[Touch::new(1, 160.0, 100.0)]));
    let out = stick.dispatch(&TouchEvent::end(&[Touch::new(1, 160.0, 100.0)], &[]));
    assert_eq!(out.as_slice(), &[StateSnapshot::inactive()]);
    assert!(out[0].direction.is_none() && out[0].angle.is_none());
    assert_eq!(stick.tracking(), None);
}

#[test]
fn handoff_keeps_gesture_active() {
    let (mut stick, _) = make(unthrottled());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    let out = stick.dispatch(&TouchEvent::end(
        &[Touch::new(1, 180.0, 100.0)],
        &[Touch::new(2, 20.0, 100.0)],
    ));
    assert_eq!(out.len(), 1);
    assert!(out[0].is_active);
    assert_eq!(direction(&out[0]), SliceKey::Index(7));
    assert_eq!(stick.tracking(), Some(TouchId(2)));

    let out = stick.dispatch(&TouchEvent::end(&[Touch::new(2, 20.0, 100.0)], &[]));
    assert!(!out[0].is_active);
}

#[test]
fn foreign_touches_are_filtered() {
    let (mut stick, _) = make(unthrottled());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    assert!(stick
        .dispatch(&TouchEvent::moved(&[Touch::new(99, 20.0, 100.0)]))
        .is_empty());
    assert!(stick
        .dispatch(&TouchEvent::end(&[Touch::new(99, 20.0, 100.0)], &[]))
        .is_empty());
}

#[test]
fn moves_are_throttled_but_release_is_not() {
    let (mut stick, clock) = make(StickConfig::default());
    let start = stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    assert_eq!(start.len(), 1);

    clock.advance_ms(50);
    assert!(stick
        .dispatch(&TouchEvent::moved(&[Touch::new(1, 100.0, 20.0)]))
        .is_empty());

    clock.advance_ms(100);
    let out = stick.dispatch(&TouchEvent::moved(&[Touch::new(1, 100.0, 20.0)]));
    assert_eq!(direction(&out[0]), SliceKey::Index(5));

    // gate is closed again, release still goes out
    let out = stick.dispatch(&TouchEvent::end(&[Touch::new(1, 100.0, 20.0)], &[]));
    assert_eq!(out.as_slice(), &[StateSnapshot::inactive()]);
}

#[test]
fn handle_delivers_in_dispatch_order() {
    let (mut stick, _) = make(unthrottled());
    let mut seen = Vec::new();
    stick.handle(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]), |s| {
        seen.push(s)
    });
    stick.handle(
        &TouchEvent::end(&[Touch::new(1, 180.0, 100.0)], &[]),
        |s| seen.push(s),
    );
    assert_eq!(seen.len(), 2);
    assert!(seen[0].is_active);
    assert!(!seen[1].is_active);
}

#[test]
fn disable_silences_and_cancels_timers() {
    let (mut stick, clock) = make(StickConfig::default());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    assert_eq!(clock.pending(), 1);

    stick.disable();
    assert!(!stick.is_enabled());
    assert_eq!(clock.pending(), 0);
    assert_eq!(stick.tracking(), None);
    assert!(stick
        .dispatch(&TouchEvent::start(&[Touch::new(2, 180.0, 100.0)]))
        .is_empty());

    stick.enable();
    let out = stick.dispatch(&TouchEvent::start(&[Touch::new(3, 180.0, 100.0)]));
    assert_eq!(out.len(), 1);
    assert_eq!(stick.tracking(), Some(TouchId(3)));
}

#[test]
fn invalid_reconfiguration_keeps_previous_table() {
    let (mut stick, _) = make(unthrottled());
    assert_eq!(
        stick.set_direction_count(0),
        Err(StickError::InvalidConfiguration(0))
    );
    assert_eq!(stick.table().len(), 8);
    assert_eq!(stick.config().direction_count, 8);

    stick.set_direction_count(4).unwrap();
    assert_eq!(stick.table().len(), 4);
}

#[test]
fn changing_throttle_installs_a_fresh_gate() {
    let (mut stick, clock) = make(StickConfig::default());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));

    stick.set_throttle(None).unwrap();
    assert_eq!(clock.pending(), 0);
    for _ in 0..3 {
        let out = stick.dispatch(&TouchEvent::moved(&[Touch::new(1, 20.0, 100.0)]));
        assert_eq!(out.len(), 1);
    }

    stick.set_throttle(Some(300)).unwrap();
    assert_eq!(
        stick
            .dispatch(&TouchEvent::moved(&[Touch::new(1, 20.0, 100.0)]))
            .len(),
        1
    );
    clock.advance_ms(150);
    assert!(stick
        .dispatch(&TouchEvent::moved(&[Touch::new(1, 20.0, 100.0)]))
        .is_empty());
}

#[test]
fn named_keys_show_up_in_snapshots() {
    let keys = ["up", "left", "down", "right"].map(SliceKey::from).to_vec();
    let config = unthrottled().with_keys(keys).with_start_angle(FRAC_PI_2);
    let (mut stick, _) = make(config);
    let out = stick.dispatch(&TouchEvent::start(&[Touch::new(1, 100.0, 10.0)]));
    assert_eq!(direction(&out[0]), SliceKey::from("up"));
    let out = stick.dispatch(&TouchEvent::moved(&[Touch::new(1, 190.0, 100.0)]));
    assert_eq!(direction(&out[0]), SliceKey::from("right"));
}

#[test]
fn bad_config_is_rejected_at_construction() {
    let clock = ManualScheduler::new();
    let zero = StickConfig::default().with_direction_count(0);
    assert_eq!(
        Controller::new(zero, pad(), clock.clone()).err(),
        Some(StickError::InvalidConfiguration(0))
    );
    let no_interval = StickConfig::default().with_throttle(Some(0));
    assert_eq!(
        Controller::new(no_interval, pad(), clock).err(),
        Some(StickError::ZeroThrottleInterval)
    );
}

#[test]
fn quick_repress_after_release_still_reports_start() {
    let (mut stick, clock) = make(StickConfig::default());
    let first = stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    assert_eq!(first.len(), 1);

    clock.advance_ms(40);
    let release = stick.dispatch(&TouchEvent::end(&[Touch::new(1, 180.0, 100.0)], &[]));
    assert_eq!(release.as_slice(), &[StateSnapshot::inactive()]);

    clock.advance_ms(40);
    let again = stick.dispatch(&TouchEvent::start(&[Touch::new(2, 20.0, 100.0)]));
    assert_eq!(again.len(), 1);
    assert!(again[0].is_active);
    assert_eq!(direction(&again[0]), SliceKey::Index(7));
    assert_eq!(stick.tracking(), Some(TouchId(2)));

    // the new gesture is throttled from its own start
    assert!(stick
        .dispatch(&TouchEvent::moved(&[Touch::new(2, 20.0, 100.0)]))
        .is_empty());
}

#[test]
fn delivery_stops_once_consumer_disables_mid_batch() {
    let (mut stick, _) = make(unthrottled());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    let batch = stick.dispatch(&TouchEvent::end(
        &[Touch::new(1, 180.0, 100.0)],
        &[Touch::new(2, 20.0, 100.0), Touch::new(3, 100.0, 20.0)],
    ));
    assert_eq!(batch.len(), 2);

    let enabled = Cell::new(true);
    let mut seen = Vec::new();
    deliver_while(
        batch,
        || enabled.get(),
        |s| {
            seen.push(s);
            // consumer turns the stick off from inside its callback
            enabled.set(false);
        },
    );
    assert_eq!(seen.len(), 1);
    assert_eq!(direction(&seen[0]), SliceKey::Index(7));
}

#[test]
fn full_batch_is_delivered_while_enabled() {
    let (mut stick, _) = make(unthrottled());
    stick.dispatch(&TouchEvent::start(&[Touch::new(1, 180.0, 100.0)]));
    let batch = stick.dispatch(&TouchEvent::end(
        &[Touch::new(1, 180.0, 100.0)],
        &[Touch::new(2, 20.0, 100.0), Touch::new(3, 100.0, 20.0)],
    ));
    let mut keys = Vec::new();
    deliver_while(batch, || true, |s| keys.push(direction(&s)));
    assert_eq!(keys, vec![SliceKey::Index(7), SliceKey::Index(5)]);
}

#[test]
fn half_pi_start_angle_puts_first_slice_on_top() {
    let (mut stick, _) = make(unthrottled().with_start_angle(FRAC_PI_2));
    let up = stick.dispatch(&TouchEvent::start(&[Touch::new(1, 100.0, 20.0)]));
    assert_eq!(direction(&up[0]), SliceKey::Index(1));
    let down = stick.dispatch(&TouchEvent::moved(&[Touch::new(1, 100.0, 180.0)]));
    assert_eq!(direction(&down[0]), SliceKey::Index(5));
}
