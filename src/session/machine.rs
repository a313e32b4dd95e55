use serde::Serialize;

/// Lifecycle phase of a recording session.
///
/// Owned exclusively by the session controller; observers see it through the
/// listener hooks or the read-only stats snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SessionState {
    Idle,
    PreparingOverlay,
    AwaitingUserStart,
    Countdown,
    Capturing,
    Stopping,
    Ended,
}

/// Inputs driving the session forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The controller was asked to render its setup overlay.
    ShowOverlay,
    /// The user confirmed the start control on the overlay.
    Confirm,
    /// The pre-recording countdown elapsed.
    CountdownFinished,
    /// The capture surface was acquired and the encoder is running.
    CaptureStarted,
    /// Capture-surface or encoder acquisition failed.
    CaptureFailed,
    /// The user stopped an active recording.
    Stop,
    /// Forced teardown, valid from any state.
    Destroy,
}

/// Side effects the driver must execute, in order, after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    EmitPrepare,
    ShowOverlayUi,
    HideOverlayUi,
    StartCountdown,
    CancelCountdown,
    AcquireCapture,
    ReleaseCapture,
    EmitStart,
    EmitStop,
    EmitEnd,
}

/// The session state machine, free of I/O.
///
/// Every transition returns the ordered side effects to run, which keeps the
/// hook-ordering guarantees testable without any platform collaborator:
/// prepare always comes first, start at most once and only on entering
/// Capturing, stop at most once on the way down, end exactly once and last.
pub struct Machine {
    state: SessionState,
    show_countdown: bool,
    /// Sampled at prepare time; decides whether the unwind owes a stop hook
    /// even when capture itself never started.
    demo_armed: bool,
    started: bool,
}

impl Machine {
    /// Build a machine already past Idle, together with its initial effects.
    ///
    /// The prepare hook is part of construction so it runs before any UI work.
    pub fn new(show_countdown: bool, use_demo_mode: bool) -> (Self, Vec<Effect>) {
        let machine = Self {
            state: SessionState::PreparingOverlay,
            show_countdown,
            demo_armed: use_demo_mode,
            started: false,
        };
        (machine, vec![Effect::EmitPrepare])
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Advance the machine. Unexpected events in the current state produce no
    /// effects and leave the state untouched.
    pub fn handle(&mut self, event: SessionEvent) -> Vec<Effect> {
        use SessionEvent::*;
        use SessionState::*;

        match (self.state, event) {
            (PreparingOverlay, ShowOverlay) => {
                self.state = AwaitingUserStart;
                vec![Effect::ShowOverlayUi]
            }
            (AwaitingUserStart, Confirm) => {
                if self.show_countdown {
                    self.state = Countdown;
                    vec![Effect::HideOverlayUi, Effect::StartCountdown]
                } else {
                    // No intermediate state: a capture event follows, and the
                    // driver releases an orphaned surface itself when a
                    // teardown wins the race against acquisition.
                    vec![Effect::HideOverlayUi, Effect::AcquireCapture]
                }
            }
            (Countdown, CountdownFinished) => vec![Effect::AcquireCapture],
            (AwaitingUserStart | Countdown, CaptureStarted) => {
                self.state = Capturing;
                self.started = true;
                vec![Effect::EmitStart]
            }
            (AwaitingUserStart | Countdown, CaptureFailed) => self.unwind(),
            (Capturing, Stop) => self.unwind(),
            (Stopping | Ended, Destroy) => Vec::new(),
            (_, Destroy) => self.unwind(),
            _ => Vec::new(),
        }
    }

    /// Mark the unwind complete. Called by the driver once the end hook has
    /// been delivered.
    pub fn finish(&mut self) {
        if self.state == SessionState::Stopping {
            self.state = SessionState::Ended;
        }
    }

    fn unwind(&mut self) -> Vec<Effect> {
        let mut effects = Vec::new();
        match self.state {
            SessionState::Countdown => effects.push(Effect::CancelCountdown),
            SessionState::AwaitingUserStart => effects.push(Effect::HideOverlayUi),
            SessionState::Capturing => effects.push(Effect::ReleaseCapture),
            _ => {}
        }
        self.state = SessionState::Stopping;
        // Stop must undo whatever prepare armed, whether or not capture ever
        // ran; a session that armed nothing skips the hook entirely.
        if self.started || self.demo_armed {
            effects.push(Effect::EmitStop);
        }
        effects.push(Effect::EmitEnd);
        effects
    }
}
