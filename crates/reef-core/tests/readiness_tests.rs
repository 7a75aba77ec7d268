use reef_core::constants::LOADER_FALLBACK_SEC;
use reef_core::readiness::{GateState, ReadinessGate};

#[test]
fn completes_once_every_component_reports() {
    let mut gate = ReadinessGate::new(&["gpu", "content"], 0.0);
    assert_eq!(gate.poll(0.1), GateState::Waiting);

    gate.mark_ready("gpu");
    assert_eq!(gate.poll(0.2), GateState::Waiting);

    gate.mark_ready("content");
    assert_eq!(gate.poll(0.3), GateState::Complete { timed_out: false });
}

#[test]
fn repeat_and_unknown_reports_are_harmless() {
    let mut gate = ReadinessGate::new(&["gpu"], 0.0);
    gate.mark_ready("content");
    gate.mark_ready("content");
    assert_eq!(gate.poll(0.1), GateState::Waiting);
    gate.mark_ready("gpu");
    gate.mark_ready("gpu");
    assert_eq!(gate.poll(0.2), GateState::Complete { timed_out: false });
}

#[test]
fn deadline_forces_completion() {
    let mut gate = ReadinessGate::new(&["gpu", "content"], 10.0);
    gate.mark_ready("gpu");
    assert_eq!(gate.poll(10.0 + LOADER_FALLBACK_SEC - 0.01), GateState::Waiting);
    assert_eq!(
        gate.poll(10.0 + LOADER_FALLBACK_SEC),
        GateState::Complete { timed_out: true }
    );
}

#[test]
fn completion_latches() {
    let mut gate = ReadinessGate::new(&["gpu"], 0.0);
    gate.mark_ready("gpu");
    assert_eq!(gate.poll(0.1), GateState::Complete { timed_out: false });
    // later polls keep reporting the same state, even past the deadline
    assert_eq!(
        gate.poll(LOADER_FALLBACK_SEC + 5.0),
        GateState::Complete { timed_out: false }
    );

    let mut late = ReadinessGate::new(&["gpu"], 0.0);
    assert_eq!(
        late.poll(LOADER_FALLBACK_SEC),
        GateState::Complete { timed_out: true }
    );
    // a straggler reporting after timeout does not rewrite history
    late.mark_ready("gpu");
    assert_eq!(
        late.poll(LOADER_FALLBACK_SEC + 1.0),
        GateState::Complete { timed_out: true }
    );
}
