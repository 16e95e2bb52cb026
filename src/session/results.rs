use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Mutex;

/// Unbounded FIFO handoff of finalized translations from the pump task to
/// polling clients
///
/// Lives for the whole process, so results queued before a stop or a history
/// clear still surface on later polls.
pub struct ResultChannel {
    tx: UnboundedSender<String>,
    rx: Mutex<UnboundedReceiver<String>>,
}

impl ResultChannel {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Mutex::new(rx),
        }
    }

    /// Producer side, cloned into each pump task
    pub fn sender(&self) -> UnboundedSender<String> {
        self.tx.clone()
    }

    /// Remove at most one queued result without blocking
    pub async fn try_drain_one(&self) -> Option<String> {
        self.rx.lock().await.try_recv().ok()
    }
}

impl Default for ResultChannel {
    fn default() -> Self {
        Self::new()
    }
}
