//! Observable wrapper around [`TableSettings`]
//!
//! Writes mutate the record and notify every observer as one atomic
//! step with respect to setters on other threads. Observers run
//! synchronously on the writing thread; a callback that writes back
//! into the store it is being notified by gets a
//! [`EditorError::ReentrantSettingsUpdate`] instead of a deadlock.
//! Subscribing from inside a callback is allowed and takes effect from
//! the next write.

use std::sync::Arc;
use std::thread::{self, ThreadId};

use parking_lot::Mutex;
use statement_tables_shared::{EditorError, EditorResult};

use crate::settings::{SettingKey, SettingValue, TableSettings};

type SettingsObserver = Arc<dyn Fn(SettingKey, &TableSettings) + Send + Sync>;

/// Handle returned by [`ObservableSettings::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct ObserverRegistry {
    next_id: u64,
    entries: Vec<(u64, SettingsObserver)>,
}

/// A settings record with change observers
pub struct ObservableSettings {
    /// Serializes mutate+notify sequences across threads
    write_gate: Mutex<()>,
    /// Thread currently dispatching notifications, for reentrancy checks
    notifying: Mutex<Option<ThreadId>>,
    settings: Mutex<TableSettings>,
    observers: Mutex<ObserverRegistry>,
}

impl Default for ObservableSettings {
    fn default() -> Self {
        Self::new(TableSettings::default())
    }
}

impl ObservableSettings {
    pub fn new(settings: TableSettings) -> Self {
        Self {
            write_gate: Mutex::new(()),
            notifying: Mutex::new(None),
            settings: Mutex::new(settings),
            observers: Mutex::new(ObserverRegistry::default()),
        }
    }

    /// Snapshot of the current settings
    pub fn get(&self) -> TableSettings {
        self.settings.lock().clone()
    }

    /// Write one setting and notify every observer.
    ///
    /// The write and the notifications are atomic with respect to `set`
    /// calls from other threads. A reentrant `set` from an observer
    /// callback fails with [`EditorError::ReentrantSettingsUpdate`];
    /// nothing is modified on any error.
    pub fn set(&self, key: SettingKey, value: SettingValue) -> EditorResult<()> {
        if *self.notifying.lock() == Some(thread::current().id()) {
            return Err(EditorError::ReentrantSettingsUpdate {
                key: key.to_string(),
            });
        }

        let _gate = self.write_gate.lock();

        self.settings.lock().apply(key, value)?;
        log::debug!("setting {key} updated");

        let snapshot = self.settings.lock().clone();
        let observers: Vec<SettingsObserver> = self
            .observers
            .lock()
            .entries
            .iter()
            .map(|(_, observer)| observer.clone())
            .collect();

        *self.notifying.lock() = Some(thread::current().id());
        for observer in observers {
            observer(key, &snapshot);
        }
        *self.notifying.lock() = None;

        Ok(())
    }

    /// Register an observer; it is invoked after every successful write
    pub fn subscribe(
        &self,
        observer: impl Fn(SettingKey, &TableSettings) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let mut registry = self.observers.lock();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(observer)));
        SubscriptionId(id)
    }

    /// Remove an observer; returns whether it was registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut registry = self.observers.lock();
        let before = registry.entries.len();
        registry.entries.retain(|(entry_id, _)| *entry_id != id.0);
        registry.entries.len() != before
    }
}
