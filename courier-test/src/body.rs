//! Response bodies that record their release.

use courier_service::Body;
use std::sync::{Arc, Mutex};

/// Records the reasons a [`probe`] body was canceled with.
#[derive(Debug, Clone, Default)]
pub struct ReleaseLog {
    reasons: Arc<Mutex<Vec<String>>>,
}

impl ReleaseLog {
    /// Every reason passed to the release hook, in order.
    pub fn reasons(&self) -> Vec<String> {
        self.reasons.lock().unwrap().clone()
    }

    /// The number of times a probed body was released.
    pub fn count(&self) -> usize {
        self.reasons.lock().unwrap().len()
    }

    fn record(&self, reason: &str) {
        self.reasons.lock().unwrap().push(reason.to_owned());
    }
}

/// A body holding `content` whose release is recorded in the returned log.
pub fn probe(content: impl Into<Body>) -> (Body, ReleaseLog) {
    let log = ReleaseLog::default();
    (probe_into(content, &log, false), log)
}

/// Like [`probe`], but the release hook fails after recording the reason.
pub fn failing_probe(content: impl Into<Body>) -> (Body, ReleaseLog) {
    let log = ReleaseLog::default();
    (probe_into(content, &log, true), log)
}

/// A probed body recording into an existing `log`, so one log can cover the
/// bodies of several attempts.
pub fn probe_into(content: impl Into<Body>, log: &ReleaseLog, fail: bool) -> Body {
    let log = log.clone();
    content.into().on_cancel(move |reason| {
        log.record(reason);
        if fail {
            Err("release failed".into())
        } else {
            Ok(())
        }
    })
}
