//! Record-access contract over the hosted backend.
//!
//! Persistence, querying, and consistency all live in the external store;
//! this module only fixes the operation set the rest of the crate is
//! allowed to assume. The host application constructs one implementation
//! per session and passes it down; nothing in this crate holds a client
//! globally.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::{
    Advertisement, AdvertisementData, AdvertisementStatus, Blog, BlogData, Event, EventData,
    RecordId,
};

pub mod memory;

/// Opaque failure from the record store. The controllers never interpret
/// anything beyond "succeeded" / "failed"; the message is for the operator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct StoreError {
    pub message: String,
}

impl StoreError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Blog collection operations. `list_blogs` returns newest first
/// (descending `created_at`).
pub trait BlogStore {
    fn list_blogs(&self) -> Result<Vec<Blog>, StoreError>;
    fn get_blog(&self, id: RecordId) -> Result<Option<Blog>, StoreError>;
    fn insert_blog(&self, data: BlogData) -> Result<Blog, StoreError>;
    fn update_blog(&self, id: RecordId, data: BlogData) -> Result<Blog, StoreError>;
    fn delete_blog(&self, id: RecordId) -> Result<(), StoreError>;
    fn count_blogs(&self) -> Result<u64, StoreError>;
}

/// Event collection operations. `list_events` returns most recent event
/// date first.
pub trait EventStore {
    fn list_events(&self) -> Result<Vec<Event>, StoreError>;
    fn get_event(&self, id: RecordId) -> Result<Option<Event>, StoreError>;
    fn insert_event(&self, data: EventData) -> Result<Event, StoreError>;
    fn update_event(&self, id: RecordId, data: EventData) -> Result<Event, StoreError>;
    fn delete_event(&self, id: RecordId) -> Result<(), StoreError>;
    fn count_events(&self) -> Result<u64, StoreError>;
}

/// Advertisement collection operations. Lists return newest first.
pub trait AdvertisementStore {
    fn list_advertisements(
        &self,
        status: Option<AdvertisementStatus>,
    ) -> Result<Vec<Advertisement>, StoreError>;
    fn get_advertisement(&self, id: RecordId) -> Result<Option<Advertisement>, StoreError>;
    fn insert_advertisement(&self, data: AdvertisementData) -> Result<Advertisement, StoreError>;
    fn update_advertisement(
        &self,
        id: RecordId,
        data: AdvertisementData,
    ) -> Result<Advertisement, StoreError>;
    fn delete_advertisement(&self, id: RecordId) -> Result<(), StoreError>;
    fn count_advertisements(
        &self,
        status: Option<AdvertisementStatus>,
    ) -> Result<u64, StoreError>;

    /// Marks every currently active advertisement inactive and returns how
    /// many rows changed. Best-effort: this write and the activation that
    /// follows it are two separate round trips, so a concurrent session can
    /// interleave between them and leave zero or two active rows.
    fn deactivate_all_active(&self) -> Result<u64, StoreError>;
}

/// Settings collection operations. Keys pre-exist; updating an unknown key
/// is an error.
pub trait SettingsStore {
    fn get_settings_by_keys(&self, keys: &[&str]) -> Result<HashMap<String, String>, StoreError>;
    fn update_setting_value(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// The full collaborator surface a session needs. Implemented for free by
/// anything that covers the four collections.
pub trait RecordStore: BlogStore + EventStore + AdvertisementStore + SettingsStore {}

impl<T: BlogStore + EventStore + AdvertisementStore + SettingsStore> RecordStore for T {}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;
    use std::collections::HashSet;

    use super::memory::MemoryStore;
    use super::*;

    /// Wraps a `MemoryStore`, journaling every call and optionally failing
    /// named operations. Controller tests assert call presence and order
    /// against the journal.
    pub(crate) struct RecordingStore {
        pub inner: MemoryStore,
        journal: RefCell<Vec<&'static str>>,
        failing: RefCell<HashSet<&'static str>>,
    }

    impl RecordingStore {
        pub fn new() -> Self {
            Self {
                inner: MemoryStore::new(),
                journal: RefCell::new(Vec::new()),
                failing: RefCell::new(HashSet::new()),
            }
        }

        pub fn fail_on(&self, op: &'static str) {
            self.failing.borrow_mut().insert(op);
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.journal.borrow().clone()
        }

        fn enter(&self, op: &'static str) -> Result<(), StoreError> {
            self.journal.borrow_mut().push(op);
            if self.failing.borrow().contains(op) {
                Err(StoreError::new(format!("injected failure in {op}")))
            } else {
                Ok(())
            }
        }
    }

    impl BlogStore for RecordingStore {
        fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
            self.enter("list_blogs")?;
            self.inner.list_blogs()
        }
        fn get_blog(&self, id: RecordId) -> Result<Option<Blog>, StoreError> {
            self.enter("get_blog")?;
            self.inner.get_blog(id)
        }
        fn insert_blog(&self, data: BlogData) -> Result<Blog, StoreError> {
            self.enter("insert_blog")?;
            self.inner.insert_blog(data)
        }
        fn update_blog(&self, id: RecordId, data: BlogData) -> Result<Blog, StoreError> {
            self.enter("update_blog")?;
            self.inner.update_blog(id, data)
        }
        fn delete_blog(&self, id: RecordId) -> Result<(), StoreError> {
            self.enter("delete_blog")?;
            self.inner.delete_blog(id)
        }
        fn count_blogs(&self) -> Result<u64, StoreError> {
            self.enter("count_blogs")?;
            self.inner.count_blogs()
        }
    }

    impl EventStore for RecordingStore {
        fn list_events(&self) -> Result<Vec<Event>, StoreError> {
            self.enter("list_events")?;
            self.inner.list_events()
        }
        fn get_event(&self, id: RecordId) -> Result<Option<Event>, StoreError> {
            self.enter("get_event")?;
            self.inner.get_event(id)
        }
        fn insert_event(&self, data: EventData) -> Result<Event, StoreError> {
            self.enter("insert_event")?;
            self.inner.insert_event(data)
        }
        fn update_event(&self, id: RecordId, data: EventData) -> Result<Event, StoreError> {
            self.enter("update_event")?;
            self.inner.update_event(id, data)
        }
        fn delete_event(&self, id: RecordId) -> Result<(), StoreError> {
            self.enter("delete_event")?;
            self.inner.delete_event(id)
        }
        fn count_events(&self) -> Result<u64, StoreError> {
            self.enter("count_events")?;
            self.inner.count_events()
        }
    }

    impl AdvertisementStore for RecordingStore {
        fn list_advertisements(
            &self,
            status: Option<AdvertisementStatus>,
        ) -> Result<Vec<Advertisement>, StoreError> {
            self.enter("list_advertisements")?;
            self.inner.list_advertisements(status)
        }
        fn get_advertisement(&self, id: RecordId) -> Result<Option<Advertisement>, StoreError> {
            self.enter("get_advertisement")?;
            self.inner.get_advertisement(id)
        }
        fn insert_advertisement(
            &self,
            data: AdvertisementData,
        ) -> Result<Advertisement, StoreError> {
            self.enter("insert_advertisement")?;
            self.inner.insert_advertisement(data)
        }
        fn update_advertisement(
            &self,
            id: RecordId,
            data: AdvertisementData,
        ) -> Result<Advertisement, StoreError> {
            self.enter("update_advertisement")?;
            self.inner.update_advertisement(id, data)
        }
        fn delete_advertisement(&self, id: RecordId) -> Result<(), StoreError> {
            self.enter("delete_advertisement")?;
            self.inner.delete_advertisement(id)
        }
        fn count_advertisements(
            &self,
            status: Option<AdvertisementStatus>,
        ) -> Result<u64, StoreError> {
            self.enter("count_advertisements")?;
            self.inner.count_advertisements(status)
        }
        fn deactivate_all_active(&self) -> Result<u64, StoreError> {
            self.enter("deactivate_all_active")?;
            self.inner.deactivate_all_active()
        }
    }

    impl SettingsStore for RecordingStore {
        fn get_settings_by_keys(
            &self,
            keys: &[&str],
        ) -> Result<HashMap<String, String>, StoreError> {
            self.enter("get_settings_by_keys")?;
            self.inner.get_settings_by_keys(keys)
        }
        fn update_setting_value(&self, key: &str, value: &str) -> Result<(), StoreError> {
            self.enter("update_setting_value")?;
            self.inner.update_setting_value(key, value)
        }
    }
}
