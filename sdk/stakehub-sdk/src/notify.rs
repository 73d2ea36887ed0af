use crate::core::constants::NOTICE_TTL;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

struct Board {
    message: Option<String>,
    generation: u64,
    expiry: Option<JoinHandle<()>>,
}

/// Single-slot, self-expiring user-facing status message.
///
/// At most one notice is visible at a time. Posting replaces the current
/// notice and restarts the expiry clock; the previous expiry timer is
/// cancelled explicitly so it cannot clear the newer message. The
/// generation counter is a second guard against a stale timer that already
/// fired but has not run yet.
#[derive(Clone)]
pub struct NoticeBoard {
    inner: Arc<Mutex<Board>>,
}

impl NoticeBoard {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Board {
                message: None,
                generation: 0,
                expiry: None,
            })),
        }
    }

    /// Replace the visible notice and schedule its expiry.
    pub async fn post(&self, message: impl Into<String>) {
        let mut board = self.inner.lock().await;
        if let Some(timer) = board.expiry.take() {
            timer.abort();
        }
        board.generation += 1;
        board.message = Some(message.into());

        let generation = board.generation;
        let inner = Arc::clone(&self.inner);
        board.expiry = Some(tokio::spawn(async move {
            tokio::time::sleep(NOTICE_TTL).await;
            let mut board = inner.lock().await;
            if board.generation == generation {
                board.message = None;
                board.expiry = None;
            }
        }));
    }

    /// The live notice, if one has not expired yet.
    pub async fn current(&self) -> Option<String> {
        self.inner.lock().await.message.clone()
    }
}

impl Default for NoticeBoard {
    fn default() -> Self {
        Self::new()
    }
}
