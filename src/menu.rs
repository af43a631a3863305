use std::sync::{Arc, Mutex, MutexGuard, Weak};
use tracing::debug;

/// Commands offered by the application's file menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuCommand {
    Open,
    Save,
    SaveAs,
    Quit,
}

impl MenuCommand {
    /// Event name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            MenuCommand::Open => "menu:file:open",
            MenuCommand::Save => "menu:file:save",
            MenuCommand::SaveAs => "menu:file:saveas",
            MenuCommand::Quit => "menu:file:quit",
        }
    }
}

type Listener = Box<dyn Fn() + Send>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    entries: Vec<(u64, MenuCommand, Listener)>,
}

/// Delivers menu commands to the listeners subscribed to them.
///
/// Listeners are called with the bus locked and must not subscribe or emit themselves.
#[derive(Clone, Default)]
pub struct MenuBus {
    listeners: Arc<Mutex<Listeners>>,
}

impl std::fmt::Debug for MenuBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl MenuBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Listeners> {
        self.listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers `listener` for `command`. The listener stays registered until
    /// the returned [`Subscription`] is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, command: MenuCommand, listener: F) -> Subscription
    where
        F: Fn() + Send + 'static,
    {
        let mut listeners = self.lock();
        let id = listeners.next_id;
        listeners.next_id += 1;
        listeners.entries.push((id, command, Box::new(listener)));
        debug!("Subscribed #{} to {}", id, command.name());

        Subscription {
            id,
            listeners: Arc::downgrade(&self.listeners),
        }
    }

    /// Fires `command`, returning how many listeners received it.
    pub fn emit(&self, command: MenuCommand) -> usize {
        let listeners = self.lock();
        let mut delivered = 0;
        for (_, _, listener) in listeners.entries.iter().filter(|(_, cmd, _)| *cmd == command) {
            listener();
            delivered += 1;
        }
        debug!("Emitted {} to {} listener(s)", command.name(), delivered);
        delivered
    }

    pub fn listener_count(&self) -> usize {
        self.lock().entries.len()
    }
}

/// Handle to a menu listener. Dropping it unsubscribes the listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<Listeners>>,
}

impl Subscription {
    /// Unsubscribes explicitly. Same as dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(listeners) = self.listeners.upgrade() {
            let mut listeners = listeners.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            listeners.entries.retain(|(id, _, _)| *id != self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter(bus: &MenuBus, command: MenuCommand) -> (Arc<AtomicUsize>, Subscription) {
        let count = Arc::new(AtomicUsize::new(0));
        let inner = count.clone();
        let subscription = bus.subscribe(command, move || {
            inner.fetch_add(1, Ordering::SeqCst);
        });
        (count, subscription)
    }

    #[test]
    fn test_emit_reaches_matching_listeners_only() {
        let bus = MenuBus::new();
        let (opens, _open_sub) = counter(&bus, MenuCommand::Open);
        let (saves, _save_sub) = counter(&bus, MenuCommand::Save);

        assert_eq!(bus.emit(MenuCommand::Open), 1);
        assert_eq!(bus.emit(MenuCommand::Open), 1);

        assert_eq!(opens.load(Ordering::SeqCst), 2);
        assert_eq!(saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let bus = MenuBus::new();
        let (opens, subscription) = counter(&bus, MenuCommand::Open);
        assert_eq!(bus.listener_count(), 1);

        drop(subscription);

        assert_eq!(bus.listener_count(), 0);
        assert_eq!(bus.emit(MenuCommand::Open), 0);
        assert_eq!(opens.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_unsubscribe_keeps_other_listeners() {
        let bus = MenuBus::new();
        let (first, first_sub) = counter(&bus, MenuCommand::SaveAs);
        let (second, _second_sub) = counter(&bus, MenuCommand::SaveAs);

        first_sub.unsubscribe();
        bus.emit(MenuCommand::SaveAs);

        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscription_outliving_bus_is_harmless() {
        let bus = MenuBus::new();
        let (_, subscription) = counter(&bus, MenuCommand::Quit);
        drop(bus);
        drop(subscription);
    }

    #[test]
    fn test_subscriptions_released_on_scope_exit() {
        let bus = MenuBus::new();
        {
            let _subs: Vec<Subscription> = [MenuCommand::Open, MenuCommand::Save, MenuCommand::SaveAs]
                .into_iter()
                .map(|cmd| bus.subscribe(cmd, || {}))
                .collect();
            assert_eq!(bus.listener_count(), 3);
        }
        assert_eq!(bus.listener_count(), 0);
    }
}
