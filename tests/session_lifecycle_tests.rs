// Integration tests for the RecordingSession controller: hook ordering,
// countdown cancellation, forced teardown, and capture-failure unwinding
// against real (virtual) collaborators.

use anyhow::Result;
use screencastd::overlay::{LoggingOverlay, OverlayController};
use screencastd::{
    CaptureBackend, CaptureGrant, CaptureRequest, CaptureToken, DisplayInfo, RecordingSession,
    SessionConfig, SessionListener, SessionState, VirtualCaptureBackend,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

#[derive(Default)]
struct HookRecorder {
    calls: Mutex<Vec<&'static str>>,
}

impl HookRecorder {
    fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }
}

impl SessionListener for HookRecorder {
    fn on_prepare(&self) {
        self.push("prepare");
    }
    fn on_start(&self) {
        self.push("start");
    }
    fn on_stop(&self) {
        self.push("stop");
    }
    fn on_end(&self) {
        self.push("end");
    }
}

/// Backend whose acquisition always fails, as if the permission was revoked
/// between grant and use.
struct FailingBackend;

#[async_trait::async_trait]
impl CaptureBackend for FailingBackend {
    async fn display_info(&self) -> Result<DisplayInfo> {
        Ok(DisplayInfo { width: 1080, height: 1920 })
    }

    async fn start(&mut self, _request: CaptureRequest) -> Result<()> {
        anyhow::bail!("capture surface revoked")
    }

    async fn stop(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        false
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Backend whose acquisition takes a while, with a shared flag so tests can
/// observe the surface state after the session is gone.
struct SlowBackend {
    delay: Duration,
    capturing: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl CaptureBackend for SlowBackend {
    async fn display_info(&self) -> Result<DisplayInfo> {
        Ok(DisplayInfo { width: 1080, height: 1920 })
    }

    async fn start(&mut self, _request: CaptureRequest) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.capturing.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&mut self) -> Result<()> {
        self.capturing.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_capturing(&self) -> bool {
        self.capturing.load(Ordering::SeqCst)
    }

    fn name(&self) -> &str {
        "slow"
    }
}

fn grant() -> CaptureGrant {
    CaptureGrant::new(-1, Some(CaptureToken::new("projection-token")))
}

fn config(output_dir: &TempDir) -> SessionConfig {
    SessionConfig {
        output_dir: output_dir.path().to_path_buf(),
        ..SessionConfig::default()
    }
}

fn overlay() -> Arc<dyn OverlayController> {
    Arc::new(LoggingOverlay)
}

#[tokio::test]
async fn prepare_fires_synchronously_at_construction() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());

    let session = RecordingSession::create(
        grant(),
        config(&output),
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(VirtualCaptureBackend::new()),
        overlay(),
    );

    // No awaits yet: prepare already happened.
    assert_eq!(listener.calls(), ["prepare"]);
    assert_eq!(session.state(), SessionState::PreparingOverlay);
    Ok(())
}

#[tokio::test]
async fn full_lifecycle_without_countdown() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());
    let session_config = SessionConfig {
        show_countdown: false,
        video_size_percentage: 50,
        ..config(&output)
    };

    let session = RecordingSession::create(
        grant(),
        session_config,
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(VirtualCaptureBackend::new()),
        overlay(),
    );

    session.show_overlay().await;
    assert_eq!(session.state(), SessionState::AwaitingUserStart);

    session.confirm().await;
    assert_eq!(session.state(), SessionState::Capturing);
    assert_eq!(listener.calls(), ["prepare", "start"]);

    let stats = session.stats();
    let size = stats.capture_size.expect("size derived on acquisition");
    assert_eq!((size.width, size.height), (540, 960));
    let path = stats.output_path.expect("output path chosen on acquisition");
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("Screencast_") && name.ends_with(".mp4"), "{name}");
    assert!(path.parent().unwrap().exists());

    session.stop().await;
    assert_eq!(listener.calls(), ["prepare", "start", "stop", "end"]);
    assert_eq!(session.state(), SessionState::Ended);
    Ok(())
}

#[tokio::test]
async fn countdown_elapses_into_capture() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());
    let session_config = SessionConfig {
        show_countdown: true,
        countdown_seconds: 0,
        ..config(&output)
    };

    let session = RecordingSession::create(
        grant(),
        session_config,
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(VirtualCaptureBackend::new()),
        overlay(),
    );

    session.show_overlay().await;
    session.confirm().await;

    // The countdown task runs on its own; give it a moment to fire.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(session.state(), SessionState::Capturing);
    assert_eq!(listener.calls(), ["prepare", "start"]);
    Ok(())
}

#[tokio::test]
async fn destroy_mid_countdown_skips_start_but_unwinds() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());
    let session_config = SessionConfig {
        show_countdown: true,
        countdown_seconds: 60,
        use_demo_mode: true,
        ..config(&output)
    };

    let session = RecordingSession::create(
        grant(),
        session_config,
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(VirtualCaptureBackend::new()),
        overlay(),
    );

    session.show_overlay().await;
    session.confirm().await;
    assert_eq!(session.state(), SessionState::Countdown);

    session.destroy().await;
    assert_eq!(listener.calls(), ["prepare", "stop", "end"]);
    assert_eq!(session.state(), SessionState::Ended);

    // A second destroy observes the same world.
    session.destroy().await;
    assert_eq!(listener.calls(), ["prepare", "stop", "end"]);
    assert_eq!(session.state(), SessionState::Ended);
    Ok(())
}

#[tokio::test]
async fn destroy_without_armed_state_skips_stop() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());

    let session = RecordingSession::create(
        grant(),
        config(&output),
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(VirtualCaptureBackend::new()),
        overlay(),
    );

    session.show_overlay().await;
    session.destroy().await;

    // Nothing was armed and capture never ran: no stop hook owed.
    assert_eq!(listener.calls(), ["prepare", "end"]);
    Ok(())
}

#[tokio::test]
async fn capture_failure_runs_full_unwind() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());
    let session_config = SessionConfig {
        show_countdown: false,
        use_demo_mode: true,
        ..config(&output)
    };

    let session = RecordingSession::create(
        grant(),
        session_config,
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(FailingBackend),
        overlay(),
    );

    session.show_overlay().await;
    session.confirm().await;

    // Acquisition failed: no start, but stop/end still restore prepare state.
    assert_eq!(listener.calls(), ["prepare", "stop", "end"]);
    assert_eq!(session.state(), SessionState::Ended);
    Ok(())
}

#[tokio::test]
async fn destroy_during_acquisition_still_releases_the_surface() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());
    let capturing = Arc::new(AtomicBool::new(false));
    let backend = SlowBackend {
        delay: Duration::from_millis(200),
        capturing: Arc::clone(&capturing),
    };
    let session_config = SessionConfig {
        show_countdown: false,
        ..config(&output)
    };

    let session = RecordingSession::create(
        grant(),
        session_config,
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(backend),
        overlay(),
    );

    session.show_overlay().await;

    // Confirm kicks off the slow acquisition; tear down while it is in flight.
    let confirm = tokio::spawn({
        let session = Arc::clone(&session);
        async move { session.confirm().await }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;
    session.destroy().await;
    assert_eq!(session.state(), SessionState::Ended);
    assert_eq!(listener.calls(), ["prepare", "end"]);

    // Once the acquisition lands on the ended session, the surface it
    // acquired must be released rather than left recording forever.
    confirm.await?;
    assert!(!capturing.load(Ordering::SeqCst), "capture surface released after teardown");
    assert_eq!(listener.calls(), ["prepare", "end"], "no start hook for an orphaned surface");
    Ok(())
}

#[tokio::test]
async fn stop_before_capture_is_a_cancellation() -> Result<()> {
    let output = TempDir::new()?;
    let listener = Arc::new(HookRecorder::default());
    let session_config = SessionConfig {
        show_countdown: true,
        countdown_seconds: 60,
        ..config(&output)
    };

    let session = RecordingSession::create(
        grant(),
        session_config,
        Arc::clone(&listener) as Arc<dyn SessionListener>,
        Box::new(VirtualCaptureBackend::new()),
        overlay(),
    );

    session.show_overlay().await;
    session.confirm().await;
    session.stop().await;

    assert_eq!(listener.calls(), ["prepare", "end"]);
    assert_eq!(session.state(), SessionState::Ended);
    Ok(())
}
