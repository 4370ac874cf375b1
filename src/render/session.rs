//! Last-write-wins bookkeeping for streaming input.
//!
//! Every new candidate tree starts a pass. A pass may only commit its output
//! while it is still the newest pass begun; output of superseded passes is
//! dropped.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

use super::output::RenderedNode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassId(u64);

impl PassId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct RenderSession {
    latest: AtomicU64,
    committed: Mutex<Option<(PassId, RenderedNode)>>,
}

impl RenderSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a pass; every earlier pass becomes stale.
    pub fn begin(&self) -> PassId {
        PassId(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, pass: PassId) -> bool {
        self.latest.load(Ordering::SeqCst) == pass.0
    }

    /// Store `node` if `pass` is still the newest pass. Returns whether it was
    /// stored.
    pub fn commit(&self, pass: PassId, node: RenderedNode) -> bool {
        let mut committed = self.committed.lock().unwrap_or_else(|e| e.into_inner());
        // Checked under the lock so a stale pass cannot overwrite a newer commit.
        if !self.is_current(pass) {
            debug!(pass = pass.0, latest = self.latest.load(Ordering::SeqCst), "Discarding stale render pass");
            return false;
        }
        *committed = Some((pass, node));
        true
    }

    /// Output of the most recent committed pass.
    pub fn latest(&self) -> Option<RenderedNode> {
        self.committed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|(_, node)| node.clone())
    }

    pub fn latest_pass(&self) -> Option<PassId> {
        self.committed
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|(pass, _)| *pass)
    }
}
