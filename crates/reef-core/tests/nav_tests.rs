use reef_core::nav::{NavController, NAV_DEBOUNCE_SEC, TOUCH_THRESHOLD, WHEEL_THRESHOLD};
use reef_core::sections::SECTIONS;

fn unlocked() -> NavController {
    let mut nav = NavController::new();
    nav.unlock();
    nav
}

#[test]
fn input_is_inert_until_unlocked() {
    let mut nav = NavController::new();
    assert!(nav.step(1, 0.1).is_none(), "step accepted while locked");
    assert!(nav.request(3, 0.1).is_none(), "request accepted while locked");
    assert!(
        nav.on_wheel(WHEEL_THRESHOLD * 3.0, 0.1).is_none(),
        "wheel accepted while locked"
    );
    nav.on_touch_start(500.0);
    assert!(nav.on_touch_end(200.0, 0.2).is_none(), "swipe accepted while locked");
    assert_eq!(nav.active(), 0);

    // unlocking opens the same inputs, with no residual debounce
    nav.unlock();
    let change = nav.step(1, 0.3).expect("step after unlock");
    assert_eq!(change.to, 1);
}

#[test]
fn step_clamps_at_both_ends() {
    let mut nav = unlocked();
    assert!(nav.step(-1, 0.0).is_none());
    assert_eq!(nav.active(), 0);

    // walk to the last section, well spaced
    let mut now = 0.0;
    for _ in 0..SECTIONS.len() - 1 {
        assert!(nav.step(1, now).is_some());
        now += NAV_DEBOUNCE_SEC + 0.1;
    }
    assert_eq!(nav.active(), SECTIONS.len() - 1);
    assert!(nav.step(1, now).is_none());
    assert_eq!(nav.active(), SECTIONS.len() - 1);
}

#[test]
fn request_ignores_out_of_range_and_same_index() {
    let mut nav = unlocked();
    assert!(nav.request(SECTIONS.len(), 0.0).is_none());
    assert!(nav.request(0, 0.0).is_none());
    assert_eq!(nav.active(), 0);

    let change = nav.request(3, 0.0).expect("valid jump");
    assert_eq!(change.from, 0);
    assert_eq!(change.to, 3);
}

#[test]
fn debounce_swallows_rapid_steps() {
    let mut nav = unlocked();
    assert!(nav.step(1, 0.0).is_some());
    assert!(nav.step(1, 0.5).is_none(), "step inside debounce window");
    assert!(nav.step(1, NAV_DEBOUNCE_SEC + 0.01).is_some());
    assert_eq!(nav.active(), 2);
}

#[test]
fn wheel_accumulates_to_threshold() {
    let mut nav = unlocked();
    let small = WHEEL_THRESHOLD / 3.0;
    assert!(nav.on_wheel(small, 0.0).is_none());
    assert!(nav.on_wheel(small, 0.01).is_none());
    let change = nav.on_wheel(small * 1.5, 0.02).expect("threshold crossed");
    assert_eq!(change.to, 1);
}

#[test]
fn wheel_deltas_during_debounce_are_dropped() {
    let mut nav = unlocked();
    assert!(nav.on_wheel(WHEEL_THRESHOLD + 1.0, 0.0).is_some());
    // a fling right after the step must not queue a second one
    for i in 0..10 {
        assert!(nav.on_wheel(200.0, 0.1 + i as f64 * 0.01).is_none());
    }
    // once the window passes, a fresh threshold is required
    assert!(nav
        .on_wheel(WHEEL_THRESHOLD / 2.0, NAV_DEBOUNCE_SEC + 0.2)
        .is_none());
}

#[test]
fn touch_swipe_up_navigates_forward() {
    let mut nav = unlocked();
    nav.on_touch_start(500.0);
    let change = nav
        .on_touch_end(500.0 - TOUCH_THRESHOLD - 1.0, 0.0)
        .expect("swipe past threshold");
    assert_eq!(change.to, 1);

    // short swipe does nothing
    nav.on_touch_start(500.0);
    assert!(nav
        .on_touch_end(500.0 - TOUCH_THRESHOLD / 2.0, NAV_DEBOUNCE_SEC + 1.0)
        .is_none());
}

#[test]
fn three_next_requests_walk_in_order() {
    let mut nav = unlocked();
    let mut visited = Vec::new();
    let mut now = 0.0;
    for _ in 0..3 {
        if let Some(change) = nav.step(1, now) {
            visited.push(change.to);
        }
        now += NAV_DEBOUNCE_SEC + 0.1;
    }
    assert_eq!(visited, vec![1, 2, 3]);
}
