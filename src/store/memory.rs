//! In-memory reference implementation of the record-access contract.
//!
//! Used by tests and by hosts that want to run the admin flows against a
//! scratch store. Ordering and filter semantics follow the hosted backend
//! queries the site issues: blogs and advertisements list newest first,
//! events list by event date descending.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;

use crate::models::{
    Advertisement, AdvertisementData, AdvertisementStatus, Blog, BlogData, Event, EventData,
    RecordId, SETTING_GLOBAL_POPUP_ENABLED, SETTING_JOIN_FORM_ENABLED, SETTING_JOIN_FORM_URL,
};
use crate::store::{AdvertisementStore, BlogStore, EventStore, SettingsStore, StoreError};

#[derive(Debug, Default)]
struct State {
    blogs: Vec<Blog>,
    events: Vec<Event>,
    advertisements: Vec<Advertisement>,
    settings: HashMap<String, String>,
    next_blog_id: RecordId,
    next_event_id: RecordId,
    next_advertisement_id: RecordId,
}

#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Creates an empty store with the settings rows seeded the way a fresh
    /// deployment ships them: join form disabled and blank, popups enabled.
    pub fn new() -> Self {
        let mut settings = HashMap::new();
        settings.insert(SETTING_JOIN_FORM_URL.to_string(), String::new());
        settings.insert(SETTING_JOIN_FORM_ENABLED.to_string(), "false".to_string());
        settings.insert(SETTING_GLOBAL_POPUP_ENABLED.to_string(), "true".to_string());

        Self {
            state: Mutex::new(State {
                settings,
                next_blog_id: 1,
                next_event_id: 1,
                next_advertisement_id: 1,
                ..State::default()
            }),
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // Recover a poisoned lock rather than wedging every later call.
        self.state.lock().unwrap_or_else(|poisoned| {
            log::error!("MemoryStore lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlogStore for MemoryStore {
    fn list_blogs(&self) -> Result<Vec<Blog>, StoreError> {
        let state = self.state();
        let mut blogs = state.blogs.clone();
        blogs.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(blogs)
    }

    fn get_blog(&self, id: RecordId) -> Result<Option<Blog>, StoreError> {
        Ok(self.state().blogs.iter().find(|b| b.id == id).cloned())
    }

    fn insert_blog(&self, data: BlogData) -> Result<Blog, StoreError> {
        let mut state = self.state();
        let blog = Blog {
            id: state.next_blog_id,
            created_at: Utc::now(),
            data,
        };
        state.next_blog_id += 1;
        state.blogs.push(blog.clone());
        Ok(blog)
    }

    fn update_blog(&self, id: RecordId, data: BlogData) -> Result<Blog, StoreError> {
        let mut state = self.state();
        let blog = state
            .blogs
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StoreError::new(format!("No blog with id {id}")))?;
        blog.data = data;
        Ok(blog.clone())
    }

    fn delete_blog(&self, id: RecordId) -> Result<(), StoreError> {
        let mut state = self.state();
        let before = state.blogs.len();
        state.blogs.retain(|b| b.id != id);
        if state.blogs.len() == before {
            return Err(StoreError::new(format!("No blog with id {id}")));
        }
        Ok(())
    }

    fn count_blogs(&self) -> Result<u64, StoreError> {
        Ok(self.state().blogs.len() as u64)
    }
}

impl EventStore for MemoryStore {
    fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        let state = self.state();
        let mut events = state.events.clone();
        // ISO dates compare correctly as strings.
        events.sort_by(|a, b| (&b.data.date, b.id).cmp(&(&a.data.date, a.id)));
        Ok(events)
    }

    fn get_event(&self, id: RecordId) -> Result<Option<Event>, StoreError> {
        Ok(self.state().events.iter().find(|e| e.id == id).cloned())
    }

    fn insert_event(&self, data: EventData) -> Result<Event, StoreError> {
        let mut state = self.state();
        let event = Event {
            id: state.next_event_id,
            created_at: Utc::now(),
            data,
        };
        state.next_event_id += 1;
        state.events.push(event.clone());
        Ok(event)
    }

    fn update_event(&self, id: RecordId, data: EventData) -> Result<Event, StoreError> {
        let mut state = self.state();
        let event = state
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| StoreError::new(format!("No event with id {id}")))?;
        event.data = data;
        Ok(event.clone())
    }

    fn delete_event(&self, id: RecordId) -> Result<(), StoreError> {
        let mut state = self.state();
        let before = state.events.len();
        state.events.retain(|e| e.id != id);
        if state.events.len() == before {
            return Err(StoreError::new(format!("No event with id {id}")));
        }
        Ok(())
    }

    fn count_events(&self) -> Result<u64, StoreError> {
        Ok(self.state().events.len() as u64)
    }
}

impl AdvertisementStore for MemoryStore {
    fn list_advertisements(
        &self,
        status: Option<AdvertisementStatus>,
    ) -> Result<Vec<Advertisement>, StoreError> {
        let state = self.state();
        let mut ads: Vec<Advertisement> = state
            .advertisements
            .iter()
            .filter(|ad| status.map_or(true, |s| ad.data.status == s))
            .cloned()
            .collect();
        ads.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(ads)
    }

    fn get_advertisement(&self, id: RecordId) -> Result<Option<Advertisement>, StoreError> {
        Ok(self
            .state()
            .advertisements
            .iter()
            .find(|ad| ad.id == id)
            .cloned())
    }

    fn insert_advertisement(&self, data: AdvertisementData) -> Result<Advertisement, StoreError> {
        let mut state = self.state();
        let ad = Advertisement {
            id: state.next_advertisement_id,
            created_at: Utc::now(),
            data,
        };
        state.next_advertisement_id += 1;
        state.advertisements.push(ad.clone());
        Ok(ad)
    }

    fn update_advertisement(
        &self,
        id: RecordId,
        data: AdvertisementData,
    ) -> Result<Advertisement, StoreError> {
        let mut state = self.state();
        let ad = state
            .advertisements
            .iter_mut()
            .find(|ad| ad.id == id)
            .ok_or_else(|| StoreError::new(format!("No advertisement with id {id}")))?;
        ad.data = data;
        Ok(ad.clone())
    }

    fn delete_advertisement(&self, id: RecordId) -> Result<(), StoreError> {
        let mut state = self.state();
        let before = state.advertisements.len();
        state.advertisements.retain(|ad| ad.id != id);
        if state.advertisements.len() == before {
            return Err(StoreError::new(format!("No advertisement with id {id}")));
        }
        Ok(())
    }

    fn count_advertisements(
        &self,
        status: Option<AdvertisementStatus>,
    ) -> Result<u64, StoreError> {
        let state = self.state();
        Ok(state
            .advertisements
            .iter()
            .filter(|ad| status.map_or(true, |s| ad.data.status == s))
            .count() as u64)
    }

    fn deactivate_all_active(&self) -> Result<u64, StoreError> {
        let mut state = self.state();
        let mut changed = 0;
        for ad in state
            .advertisements
            .iter_mut()
            .filter(|ad| ad.data.status == AdvertisementStatus::Active)
        {
            ad.data.status = AdvertisementStatus::Inactive;
            changed += 1;
        }
        Ok(changed)
    }
}

impl SettingsStore for MemoryStore {
    fn get_settings_by_keys(&self, keys: &[&str]) -> Result<HashMap<String, String>, StoreError> {
        let state = self.state();
        Ok(keys
            .iter()
            .filter_map(|key| {
                state
                    .settings
                    .get(*key)
                    .map(|value| (key.to_string(), value.clone()))
            })
            .collect())
    }

    fn update_setting_value(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut state = self.state();
        match state.settings.get_mut(key) {
            Some(slot) => {
                *slot = value.to_string();
                Ok(())
            }
            None => Err(StoreError::new(format!("Unknown setting key '{key}'"))),
        }
    }
}
