/// Lifecycle hooks a recording session delivers to its owner.
///
/// For any session the calls form a subsequence of
/// `on_prepare, on_start, on_stop, on_end`: prepare is always first and
/// synchronous with construction, end is always last, start only happens on
/// entering capture, and stop only happens when there is something to undo.
pub trait SessionListener: Send + Sync {
    /// The session exists; arm anything that must be in place before capture.
    fn on_prepare(&self);

    /// Capture is running.
    fn on_start(&self);

    /// Capture stopped, or the session is being torn down after prepare
    /// armed state that needs restoring.
    fn on_stop(&self);

    /// The session is gone; release the controller reference.
    fn on_end(&self);
}
