// Tests for the session state machine in isolation: transitions and the
// ordered effect lists that carry the lifecycle-hook guarantees.

use screencastd::{Effect, Machine, SessionEvent, SessionState};

fn emitted_hooks(effects: &[Effect]) -> Vec<Effect> {
    effects
        .iter()
        .copied()
        .filter(|e| {
            matches!(
                e,
                Effect::EmitPrepare | Effect::EmitStart | Effect::EmitStop | Effect::EmitEnd
            )
        })
        .collect()
}

#[test]
fn construction_emits_prepare_first() {
    let (machine, effects) = Machine::new(false, false);
    assert_eq!(effects, [Effect::EmitPrepare]);
    assert_eq!(machine.state(), SessionState::PreparingOverlay);
}

#[test]
fn happy_path_without_countdown() {
    let (mut machine, _) = Machine::new(false, false);

    let effects = machine.handle(SessionEvent::ShowOverlay);
    assert_eq!(effects, [Effect::ShowOverlayUi]);
    assert_eq!(machine.state(), SessionState::AwaitingUserStart);

    let effects = machine.handle(SessionEvent::Confirm);
    assert_eq!(effects, [Effect::HideOverlayUi, Effect::AcquireCapture]);

    let effects = machine.handle(SessionEvent::CaptureStarted);
    assert_eq!(effects, [Effect::EmitStart]);
    assert_eq!(machine.state(), SessionState::Capturing);

    let effects = machine.handle(SessionEvent::Stop);
    assert_eq!(
        effects,
        [Effect::ReleaseCapture, Effect::EmitStop, Effect::EmitEnd]
    );
    assert_eq!(machine.state(), SessionState::Stopping);

    machine.finish();
    assert_eq!(machine.state(), SessionState::Ended);
}

#[test]
fn confirm_with_countdown_goes_through_countdown_state() {
    let (mut machine, _) = Machine::new(true, false);
    machine.handle(SessionEvent::ShowOverlay);

    let effects = machine.handle(SessionEvent::Confirm);
    assert_eq!(effects, [Effect::HideOverlayUi, Effect::StartCountdown]);
    assert_eq!(machine.state(), SessionState::Countdown);

    let effects = machine.handle(SessionEvent::CountdownFinished);
    assert_eq!(effects, [Effect::AcquireCapture]);

    let effects = machine.handle(SessionEvent::CaptureStarted);
    assert_eq!(effects, [Effect::EmitStart]);
    assert_eq!(machine.state(), SessionState::Capturing);
}

#[test]
fn destroy_mid_countdown_with_demo_mode_fires_stop_and_end() {
    let (mut machine, _) = Machine::new(true, true);
    machine.handle(SessionEvent::ShowOverlay);
    machine.handle(SessionEvent::Confirm);

    let effects = machine.handle(SessionEvent::Destroy);
    assert_eq!(
        effects,
        [Effect::CancelCountdown, Effect::EmitStop, Effect::EmitEnd]
    );
    assert_eq!(emitted_hooks(&effects), [Effect::EmitStop, Effect::EmitEnd]);
}

#[test]
fn destroy_mid_countdown_without_demo_mode_skips_stop() {
    let (mut machine, _) = Machine::new(true, false);
    machine.handle(SessionEvent::ShowOverlay);
    machine.handle(SessionEvent::Confirm);

    let effects = machine.handle(SessionEvent::Destroy);
    assert_eq!(effects, [Effect::CancelCountdown, Effect::EmitEnd]);
}

#[test]
fn capture_failure_unwinds_without_start() {
    let (mut machine, _) = Machine::new(true, true);
    machine.handle(SessionEvent::ShowOverlay);
    machine.handle(SessionEvent::Confirm);
    machine.handle(SessionEvent::CountdownFinished);

    let effects = machine.handle(SessionEvent::CaptureFailed);
    assert!(!effects.contains(&Effect::EmitStart));
    assert_eq!(emitted_hooks(&effects), [Effect::EmitStop, Effect::EmitEnd]);
}

#[test]
fn destroy_is_idempotent() {
    let (mut machine, _) = Machine::new(false, true);
    machine.handle(SessionEvent::ShowOverlay);

    let first = machine.handle(SessionEvent::Destroy);
    assert!(first.contains(&Effect::EmitEnd));

    // Unwind in flight: further destroys do nothing.
    assert!(machine.handle(SessionEvent::Destroy).is_empty());
    machine.finish();
    assert_eq!(machine.state(), SessionState::Ended);
    assert!(machine.handle(SessionEvent::Destroy).is_empty());
}

#[test]
fn unexpected_events_are_ignored() {
    let (mut machine, _) = Machine::new(false, false);

    // Not shown yet: confirm and stop mean nothing.
    assert!(machine.handle(SessionEvent::Confirm).is_empty());
    assert!(machine.handle(SessionEvent::Stop).is_empty());
    assert_eq!(machine.state(), SessionState::PreparingOverlay);

    machine.handle(SessionEvent::ShowOverlay);
    // Overlay can only be shown once.
    assert!(machine.handle(SessionEvent::ShowOverlay).is_empty());
    assert_eq!(machine.state(), SessionState::AwaitingUserStart);
}

#[test]
fn hooks_form_a_prepare_start_stop_end_subsequence() {
    // Collect hook effects across a few full runs and check the global order.
    let scripts: Vec<(bool, bool, Vec<SessionEvent>)> = vec![
        (
            false,
            false,
            vec![
                SessionEvent::ShowOverlay,
                SessionEvent::Confirm,
                SessionEvent::CaptureStarted,
                SessionEvent::Stop,
            ],
        ),
        (true, true, vec![SessionEvent::ShowOverlay, SessionEvent::Destroy]),
        (
            true,
            true,
            vec![
                SessionEvent::ShowOverlay,
                SessionEvent::Confirm,
                SessionEvent::CountdownFinished,
                SessionEvent::CaptureFailed,
            ],
        ),
        (false, false, vec![SessionEvent::Destroy]),
    ];

    let order = [
        Effect::EmitPrepare,
        Effect::EmitStart,
        Effect::EmitStop,
        Effect::EmitEnd,
    ];

    for (show_countdown, use_demo_mode, events) in scripts {
        let (mut machine, initial) = Machine::new(show_countdown, use_demo_mode);
        let mut hooks = emitted_hooks(&initial);
        for event in events {
            hooks.extend(emitted_hooks(&machine.handle(event)));
        }
        machine.finish();

        assert_eq!(hooks.first(), Some(&Effect::EmitPrepare));
        assert_eq!(hooks.last(), Some(&Effect::EmitEnd));
        // Subsequence check: positions in the canonical order never go back.
        let positions: Vec<usize> = hooks
            .iter()
            .map(|h| order.iter().position(|o| o == h).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "hooks repeated or out of order: {hooks:?}");
    }
}
