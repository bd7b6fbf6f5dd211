//! The `Progress` capability: the external collaborator the core consumes
//! for cooperative cancellation and status messages. This trait is the
//! narrow interface the core calls into; it carries no knowledge of threads,
//! UI widgets, or tree/packet containers.

/// Cooperative cancellation and status reporting, implemented by the
/// consumer. The core never spawns threads or blocks on this trait; it only
/// polls `is_cancelled` between backtrack steps and pushes status strings.
pub trait Progress {
    /// Polled at each backtrack step; once `true`, the search drains to its
    /// end-of-stream callback and returns.
    fn is_cancelled(&self) -> bool {
        false
    }

    /// Advisory human-readable status, e.g. the facet pairing currently
    /// being explored. Default implementation discards it.
    fn set_message(&self, _msg: &str) {}

    /// Called once, when the search completes (whether by exhaustion or
    /// cancellation).
    fn set_finished(&self) {}
}

/// A `Progress` that never cancels and discards every message, the default
/// for callers that don't need cancellation or status reporting.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullProgress;

impl Progress for NullProgress {}

/// A `Progress` backed by an `AtomicBool` flag, for callers (tests, a
/// future CLI `Ctrl-C` handler) that want to cancel a running search from
/// another thread or scope without implementing the trait themselves.
#[derive(Debug, Default)]
pub struct FlagProgress {
    cancelled: std::sync::atomic::AtomicBool,
    last_message: std::sync::Mutex<String>,
    finished: std::sync::atomic::AtomicBool,
}

impl FlagProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(std::sync::atomic::Ordering::SeqCst)
    }

    pub fn last_message(&self) -> String {
        self.last_message.lock().unwrap().clone()
    }
}

impl Progress for FlagProgress {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn set_message(&self, msg: &str) {
        *self.last_message.lock().unwrap() = msg.to_string();
    }

    fn set_finished(&self) {
        self.finished.store(true, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_progress_reports_cancellation() {
        let p = FlagProgress::new();
        assert!(!p.is_cancelled());
        p.cancel();
        assert!(p.is_cancelled());
    }

    #[test]
    fn flag_progress_tracks_last_message_and_finished() {
        let p = FlagProgress::new();
        p.set_message("hello");
        assert_eq!(p.last_message(), "hello");
        assert!(!p.is_finished());
        p.set_finished();
        assert!(p.is_finished());
    }
}
