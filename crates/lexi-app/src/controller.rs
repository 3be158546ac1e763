use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use lexi_types::{AppEvent, Mode};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::state::AppState;
use crate::ui::{ViewUpdate, view_loop};

/// Centralized channel management
pub struct ChannelSet {
    /// Commands and lookup results into the event loop
    pub events: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    /// Screens and messages out to the terminal
    pub view: (AsyncSender<ViewUpdate>, AsyncReceiver<ViewUpdate>),
}

impl ChannelSet {
    pub fn new(event_capacity: usize, view_capacity: usize) -> Self {
        Self {
            events: kanal::bounded_async(event_capacity),
            view: kanal::bounded_async(view_capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub async fn new(state: Arc<AppState>) -> Self {
        let channels = {
            let config = state.config.read().await;
            ChannelSet::new(config.event_capacity, config.input_capacity)
        };

        Self {
            channels,
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self, mode: Mode) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            mode,
            self.channels.events.1.clone(),
            self.channels.events.0.clone(),
            self.channels.view.0.clone(),
            self.cancel_token.clone(),
        ));

        // Terminal view
        tasks.spawn(view_loop(
            self.channels.view.1.clone(),
            self.cancel_token.child_token(),
        ));

        // Stdin commands
        tasks.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.events.0.clone(),
            self.channels.view.0.clone(),
        ));

        tasks
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
