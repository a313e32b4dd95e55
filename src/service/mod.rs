//! The host coordinator: a long-lived background unit owning at most one
//! recording session.
//!
//! `RecordingService` accepts start requests from the launch surfaces,
//! rejects them while a session is running, and reacts to the session's
//! lifecycle hooks: demo-mode overrides around prepare/stop, the recording
//! notification and foreground promotion around capture, teardown on end.

use crate::capture::{CaptureBackend, CaptureBackendFactory, CaptureGrant};
use crate::demomode::{self, Broadcaster};
use crate::error::ServiceError;
use crate::notify::{ChannelSpec, Notifier, RecordingNotification, NOTIFICATION_ID};
use crate::overlay::OverlayController;
use crate::session::{
    RecordingConfig, RecordingSession, SessionConfig, SessionListener, SessionStats,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, info};
use uuid::Uuid;

/// Restart policy reported to the host for every start request, accepted or
/// rejected: the service decides its own lifecycle, the host never restarts
/// it automatically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartDisposition {
    NotSticky,
}

impl StartDisposition {
    pub fn as_str(self) -> &'static str {
        match self {
            StartDisposition::NotSticky => "not-sticky",
        }
    }
}

pub struct RecordingService {
    config: RecordingConfig,
    broadcaster: Arc<dyn Broadcaster>,
    notifier: Arc<dyn Notifier>,
    overlay: Arc<dyn OverlayController>,
    /// True from the moment a start request is accepted until the session's
    /// end hook has run. The single guard against double starts.
    running: AtomicBool,
    /// Whether the current session's prepare hook sent demo-mode overrides
    /// that still need restoring.
    demo_armed: AtomicBool,
    session: Mutex<Option<Arc<RecordingSession>>>,
    weak_self: Weak<RecordingService>,
}

impl RecordingService {
    pub fn new(
        config: RecordingConfig,
        broadcaster: Arc<dyn Broadcaster>,
        notifier: Arc<dyn Notifier>,
        overlay: Arc<dyn OverlayController>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|weak| Self {
            config,
            broadcaster,
            notifier,
            overlay,
            running: AtomicBool::new(false),
            demo_armed: AtomicBool::new(false),
            session: Mutex::new(None),
            weak_self: weak.clone(),
        })
    }

    /// Handle a start request from a launch surface.
    ///
    /// A request while a session is running is expected (double-taps on the
    /// tile are common) and rejected with no side effects. A grant the
    /// permission flow never approved aborts before any state changes.
    /// Whatever the outcome, the caller reports [`StartDisposition::NotSticky`]
    /// to the host.
    pub async fn handle_start_request(&self, grant: CaptureGrant) -> Result<Uuid, ServiceError> {
        if self.running.load(Ordering::SeqCst) {
            info!("Already running! Ignoring start request");
            return Err(ServiceError::SessionBusy);
        }
        grant.validate()?;
        let backend = CaptureBackendFactory::create(self.config.capture_source)
            .map_err(|e| ServiceError::CaptureAcquisitionFailure(e.to_string()))?;
        self.start_with_backend(grant, backend).await
    }

    /// Start a session against a caller-supplied capture backend.
    pub async fn start_with_backend(
        &self,
        grant: CaptureGrant,
        backend: Box<dyn CaptureBackend>,
    ) -> Result<Uuid, ServiceError> {
        grant.validate()?;

        // Claim the flag atomically: parallel launch requests race for it and
        // exactly one wins. Nothing fallible happens between the claim and the
        // session being stored, so the loser path never has to release it.
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("Already running! Ignoring start request");
            return Err(ServiceError::SessionBusy);
        }

        info!("Starting up!");

        // Settings are sampled here, once; later changes apply to the next
        // session.
        let session_config = SessionConfig::from(&self.config);
        let listener = self.as_listener();
        let session = RecordingSession::create(
            grant,
            session_config,
            listener,
            backend,
            Arc::clone(&self.overlay),
        );
        let id = session.id();
        *self.session.lock().expect("session lock poisoned") = Some(Arc::clone(&session));
        session.show_overlay().await;
        Ok(id)
    }

    /// The overlay's user-start callback. Returns false when no session is
    /// active.
    pub async fn confirm(&self) -> bool {
        match self.active_session() {
            Some(session) => {
                session.confirm().await;
                true
            }
            None => false,
        }
    }

    /// User stop action. Returns false when no session is active.
    pub async fn stop(&self) -> bool {
        match self.active_session() {
            Some(session) => {
                session.stop().await;
                true
            }
            None => false,
        }
    }

    /// Tear down the active session, if any, as part of host shutdown.
    /// A missing session makes this a no-op.
    pub async fn destroy(&self) {
        if let Some(session) = self.active_session() {
            session.destroy().await;
        }
    }

    /// This unit supports direct start commands only; there is no bound
    /// connection protocol.
    pub fn bind(&self) -> Result<(), ServiceError> {
        Err(ServiceError::Unsupported("bind"))
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stats(&self) -> Option<SessionStats> {
        self.active_session().map(|session| session.stats())
    }

    fn active_session(&self) -> Option<Arc<RecordingSession>> {
        self.session.lock().expect("session lock poisoned").clone()
    }

    fn as_listener(&self) -> Arc<dyn SessionListener> {
        self.weak_self
            .upgrade()
            .expect("service alive while handling its own request")
    }
}

impl SessionListener for RecordingService {
    fn on_prepare(&self) {
        // use_demo_mode is sampled exactly once, here; the stop hook restores
        // based on what was actually armed, not on the current setting.
        if self.config.use_demo_mode {
            for command in demomode::enter_sequence() {
                self.broadcaster.send(command);
            }
            self.demo_armed.store(true, Ordering::SeqCst);
        }
    }

    fn on_start(&self) {
        if !self.config.recording_notification {
            debug!("No recording notification requested");
            return;
        }
        self.notifier.ensure_channel(&ChannelSpec::recording());
        self.notifier.show(NOTIFICATION_ID, &RecordingNotification::recording());
        info!("Moving service into the foreground with recording notification");
        self.notifier.promote_foreground(NOTIFICATION_ID);
    }

    fn on_stop(&self) {
        if self.demo_armed.swap(false, Ordering::SeqCst) {
            self.broadcaster.send(demomode::exit());
        }
    }

    fn on_end(&self) {
        info!("Shutting down");
        self.session.lock().expect("session lock poisoned").take();
        if self.config.recording_notification {
            self.notifier.demote_foreground();
            self.notifier.cancel(NOTIFICATION_ID);
        }
        self.running.store(false, Ordering::SeqCst);
    }
}
