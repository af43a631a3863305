use color_eyre::eyre::OptionExt;
use futures::{FutureExt, StreamExt};
use ratatui::crossterm::event::Event as CrosstermEvent;
use std::time::Duration;
use tokio::sync::mpsc;

/// The frequency at which tick events are emitted.
const TICK_FPS: f64 = 30.0;

/// Representation of all possible events.
#[derive(Clone, Debug)]
pub enum Event {
    /// An event that is emitted on a regular schedule.
    Tick,
    /// Crossterm events.
    ///
    /// These events are emitted by the terminal.
    Crossterm(CrosstermEvent),
    /// Application events.
    App(AppEvent),
}

/// Application events.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppEvent {
    /// Quit the application.
    Quit,
    /// Confirm the active dialog or open the selected history entry
    Confirm,
    /// Close the active dialog or popup
    Cancel,
    /// Move selection up
    MoveUp,
    /// Move selection down
    MoveDown,
    /// Page up
    PageUp,
    /// Page down
    PageDown,
    /// Show the open file dialog
    OpenFile,
    /// Save the document to its current path
    SaveFile,
    /// Show the save-as prompt
    SaveFileAs,
    /// Toggle the history sidebar
    ToggleHistory,
    /// Move focus between the editor and the history sidebar
    SwitchFocus,
    /// Start typing a history search query
    ActivateHistorySearch,
    /// Remove the selected history entry
    RemoveHistoryEntry,
    /// Copy the selected history path to the clipboard
    CopyHistoryPath,
    /// Switch to the next file type filter in the open dialog
    CycleFileFilter,
    /// Go to the parent directory in the open dialog
    ParentDirectory,
    /// Toggle help popup
    ToggleHelp,
    /// A background history save failed
    HistorySaveFailed(String),
}

/// Terminal event handler.
#[derive(Debug)]
pub struct EventHandler {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver channel.
    receiver: mpsc::UnboundedReceiver<Event>,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler {
    /// Constructs a new instance of [`EventHandler`] and spawns a task reading terminal events.
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let actor = EventTask::new(sender.clone());
        tokio::spawn(async { actor.run().await });
        Self { sender, receiver }
    }

    /// Constructs a handler without the terminal task. Only app events are delivered.
    pub fn detached() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self { sender, receiver }
    }

    /// Receives an event from the sender.
    ///
    /// # Errors
    ///
    /// This function returns an error if the sender channel is disconnected.
    pub async fn next(&mut self) -> color_eyre::Result<Event> {
        self.receiver
            .recv()
            .await
            .ok_or_eyre("Failed to receive event")
    }

    /// Returns a queued event without waiting.
    pub fn try_next(&mut self) -> Option<Event> {
        self.receiver.try_recv().ok()
    }

    /// Queue an app event to be processed by the next iteration of the event loop.
    pub fn send(&self, app_event: AppEvent) {
        // The receiver lives in this struct, so sending cannot fail while it exists
        let _ = self.sender.send(Event::App(app_event));
    }

    /// Returns an [`AppSender`] usable from other tasks and callbacks.
    pub fn app_sender(&self) -> AppSender {
        AppSender {
            sender: self.sender.clone(),
        }
    }
}

/// Cloneable handle for queuing app events from outside the event loop.
#[derive(Clone, Debug)]
pub struct AppSender {
    sender: mpsc::UnboundedSender<Event>,
}

impl AppSender {
    pub fn send(&self, app_event: AppEvent) {
        // Fails only after the app shut down, when nobody is listening anymore
        let _ = self.sender.send(Event::App(app_event));
    }
}

/// A task that reads crossterm events and emits tick events on a regular schedule.
struct EventTask {
    /// Event sender channel.
    sender: mpsc::UnboundedSender<Event>,
}

impl EventTask {
    fn new(sender: mpsc::UnboundedSender<Event>) -> Self {
        Self { sender }
    }

    /// Runs the event task.
    ///
    /// This function emits tick events at a fixed rate and polls for crossterm events in between.
    async fn run(self) -> color_eyre::Result<()> {
        let tick_rate = Duration::from_secs_f64(1.0 / TICK_FPS);
        let mut reader = crossterm::event::EventStream::new();
        let mut tick = tokio::time::interval(tick_rate);
        loop {
            let tick_delay = tick.tick();
            let crossterm_event = reader.next().fuse();
            tokio::select! {
              _ = self.sender.closed() => {
                break;
              }
              _ = tick_delay => {
                self.send(Event::Tick);
              }
              Some(Ok(evt)) = crossterm_event => {
                self.send(Event::Crossterm(evt));
              }
            };
        }
        Ok(())
    }

    /// Sends an event to the receiver.
    fn send(&self, event: Event) {
        // Shutting down the app drops the receiver, so failures here are expected
        let _ = self.sender.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_sender_delivers_events() {
        let mut events = EventHandler::detached();
        let sender = events.app_sender();

        sender.send(AppEvent::OpenFile);
        events.send(AppEvent::Quit);

        assert!(matches!(events.next().await.unwrap(), Event::App(AppEvent::OpenFile)));
        assert!(matches!(events.try_next(), Some(Event::App(AppEvent::Quit))));
        assert!(events.try_next().is_none());
    }
}
