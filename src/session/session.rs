use super::config::SessionConfig;
use super::listener::SessionListener;
use super::machine::{Effect, Machine, SessionEvent, SessionState};
use super::stats::SessionStats;
use crate::capture::{derive_capture_size, CaptureBackend, CaptureGrant, CaptureRequest, CaptureSize};
use crate::overlay::OverlayController;
use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// A recording session: the state machine plus the collaborators its effects
/// run against.
///
/// One instance drives exactly one recording from overlay setup through
/// capture to teardown. The machine itself is pure; this type executes its
/// effect lists against the overlay, the capture backend, the countdown
/// timer, and the listener.
pub struct RecordingSession {
    id: uuid::Uuid,
    config: SessionConfig,
    grant: CaptureGrant,
    listener: Arc<dyn SessionListener>,
    overlay: Arc<dyn OverlayController>,
    backend: tokio::sync::Mutex<Box<dyn CaptureBackend>>,
    machine: Mutex<Machine>,
    countdown_task: Mutex<Option<JoinHandle<()>>>,
    started_at: chrono::DateTime<Utc>,
    capture_size: Mutex<Option<CaptureSize>>,
    output_path: Mutex<Option<PathBuf>>,
    weak_self: Weak<RecordingSession>,
}

impl RecordingSession {
    /// Create the session and fire the prepare hook, synchronously, before
    /// returning and before any overlay work.
    pub fn create(
        grant: CaptureGrant,
        config: SessionConfig,
        listener: Arc<dyn SessionListener>,
        backend: Box<dyn CaptureBackend>,
        overlay: Arc<dyn OverlayController>,
    ) -> Arc<Self> {
        let (machine, initial_effects) = Machine::new(config.show_countdown, config.use_demo_mode);
        let session = Arc::new_cyclic(|weak| Self {
            id: uuid::Uuid::new_v4(),
            config,
            grant,
            listener,
            overlay,
            backend: tokio::sync::Mutex::new(backend),
            machine: Mutex::new(machine),
            countdown_task: Mutex::new(None),
            started_at: Utc::now(),
            capture_size: Mutex::new(None),
            output_path: Mutex::new(None),
            weak_self: weak.clone(),
        });
        info!("Created recording session {}", session.id);
        for effect in initial_effects {
            match effect {
                Effect::EmitPrepare => session.listener.on_prepare(),
                other => debug!("Deferring construction effect {:?}", other),
            }
        }
        session
    }

    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        self.machine.lock().expect("machine lock poisoned").state()
    }

    /// Render the capture-configuration overlay. Called exactly once after
    /// construction; repeated calls are ignored by the machine.
    pub async fn show_overlay(&self) {
        self.apply(SessionEvent::ShowOverlay).await;
    }

    /// The overlay's user-start callback.
    pub async fn confirm(&self) {
        self.apply(SessionEvent::Confirm).await;
    }

    /// User stop action. Before capture is running this is a cancellation and
    /// behaves like [`destroy`](Self::destroy).
    pub async fn stop(&self) {
        if self.state() == SessionState::Capturing {
            self.apply(SessionEvent::Stop).await;
        } else {
            self.destroy().await;
        }
    }

    /// Force the session to Ended from any state, cancelling a pending
    /// countdown and running the full unwind. Safe to call repeatedly; once
    /// the session has ended further calls do nothing.
    pub async fn destroy(&self) {
        self.apply(SessionEvent::Destroy).await;
    }

    pub fn stats(&self) -> SessionStats {
        let duration = Utc::now().signed_duration_since(self.started_at);
        SessionStats {
            session_id: self.id,
            state: self.state(),
            started_at: self.started_at,
            duration_secs: duration.num_milliseconds() as f64 / 1000.0,
            capture_size: *self.capture_size.lock().expect("size lock poisoned"),
            output_path: self.output_path.lock().expect("path lock poisoned").clone(),
        }
    }

    /// Feed one event through the machine and execute the resulting effects.
    ///
    /// Effects run outside the machine lock; an effect that produces a
    /// follow-up event (capture acquisition) queues it behind the current
    /// batch, so the ordering the machine decided is preserved.
    async fn apply(&self, event: SessionEvent) {
        let mut queue = VecDeque::new();
        queue.push_back(event);
        while let Some(event) = queue.pop_front() {
            let effects = {
                let mut machine = self.machine.lock().expect("machine lock poisoned");
                let effects = machine.handle(event);
                if effects.is_empty() {
                    debug!("Ignoring {:?} in state {:?}", event, machine.state());
                }
                effects
            };
            // A dropped CaptureStarted means teardown won the race against an
            // in-flight acquisition: the surface it acquired has no owner and
            // must be released here, since the unwind already ran without it.
            if effects.is_empty() && event == SessionEvent::CaptureStarted {
                info!("Session tore down during capture acquisition, releasing surface");
                self.release_capture().await;
                continue;
            }
            for effect in effects {
                if let Some(next) = self.run_effect(effect).await {
                    queue.push_back(next);
                }
            }
        }
    }

    async fn run_effect(&self, effect: Effect) -> Option<SessionEvent> {
        match effect {
            Effect::EmitPrepare => self.listener.on_prepare(),
            Effect::ShowOverlayUi => self.overlay.show(),
            Effect::HideOverlayUi => self.overlay.hide(),
            Effect::StartCountdown => self.start_countdown(),
            Effect::CancelCountdown => self.cancel_countdown(),
            Effect::AcquireCapture => return Some(self.acquire_capture().await),
            Effect::ReleaseCapture => self.release_capture().await,
            Effect::EmitStart => self.listener.on_start(),
            Effect::EmitStop => self.listener.on_stop(),
            Effect::EmitEnd => {
                self.listener.on_end();
                self.machine.lock().expect("machine lock poisoned").finish();
                info!("Recording session {} ended", self.id);
            }
        }
        None
    }

    fn start_countdown(&self) {
        let delay = Duration::from_secs(self.config.countdown_seconds);
        info!("Starting {}s countdown", self.config.countdown_seconds);
        let weak = self.weak_self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Some(session) = weak.upgrade() {
                session.apply(SessionEvent::CountdownFinished).await;
            }
        });
        *self.countdown_task.lock().expect("countdown lock poisoned") = Some(handle);
    }

    fn cancel_countdown(&self) {
        if let Some(handle) = self.countdown_task.lock().expect("countdown lock poisoned").take() {
            handle.abort();
            info!("Countdown cancelled");
        }
    }

    async fn acquire_capture(&self) -> SessionEvent {
        match self.try_acquire().await {
            Ok(size) => {
                info!("Capture running at {}x{}", size.width, size.height);
                SessionEvent::CaptureStarted
            }
            Err(e) => {
                // Treated as a normal stop: the unwind still runs so nothing
                // armed at prepare time is left applied.
                error!("Capture acquisition failed: {:#}", e);
                SessionEvent::CaptureFailed
            }
        }
    }

    async fn try_acquire(&self) -> Result<CaptureSize> {
        let mut backend = self.backend.lock().await;
        let display = backend
            .display_info()
            .await
            .context("Failed to read display info")?;
        let size = derive_capture_size(display, self.config.video_size_percentage);
        let output_path = self.new_output_path()?;
        *self.capture_size.lock().expect("size lock poisoned") = Some(size);
        *self.output_path.lock().expect("path lock poisoned") = Some(output_path.clone());
        backend
            .start(CaptureRequest {
                grant: self.grant.clone(),
                output_path,
                size,
                show_touches: self.config.show_touches,
            })
            .await
            .context("Failed to start capture")?;
        Ok(size)
    }

    async fn release_capture(&self) {
        // Fire-and-forget: the encoder finishes the file on its own time.
        if let Err(e) = self.backend.lock().await.stop().await {
            error!("Failed to release capture surface: {:#}", e);
        }
    }

    fn new_output_path(&self) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir).with_context(|| {
            format!(
                "Failed to create output directory {}",
                self.config.output_dir.display()
            )
        })?;
        let name = format!("Screencast_{}.mp4", Utc::now().format("%Y-%m-%d-%H-%M-%S"));
        Ok(self.config.output_dir.join(name))
    }
}
