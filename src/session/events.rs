//! Process-wide input events and the click-outside listener

use crate::autocomplete::SuggestionPanel;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tracing::debug;

const BUS_CAPACITY: usize = 32;

/// Pointer input relevant to the search box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Click inside the search input region
    ClickInside,
    /// Click anywhere else
    ClickOutside,
}

/// Broadcasts input events to every mounted view
#[derive(Debug, Clone)]
pub struct InputBus {
    sender: broadcast::Sender<InputEvent>,
}

impl InputBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(BUS_CAPACITY);
        Self { sender }
    }

    pub fn publish(&self, event: InputEvent) {
        let _ = self.sender.send(event);
    }

    /// Number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.sender.receiver_count()
    }

    fn subscribe(&self) -> broadcast::Receiver<InputEvent> {
        self.sender.subscribe()
    }
}

impl Default for InputBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Registration that closes the suggestion panel on outside clicks
///
/// Released by [`ClickOutsideListener::release`] or on drop.
pub struct ClickOutsideListener {
    task: Option<JoinHandle<()>>,
}

impl ClickOutsideListener {
    pub fn register(bus: &InputBus, panel: SuggestionPanel) -> Self {
        let mut rx = bus.subscribe();

        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(InputEvent::ClickOutside) => panel.hide(),
                    Ok(InputEvent::ClickInside) => {}
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        debug!(skipped, "Click-outside listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        Self { task: Some(task) }
    }

    /// Stop listening and wait until the subscription is gone
    pub async fn release(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let _ = task.await;
        }
    }
}

impl Drop for ClickOutsideListener {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
