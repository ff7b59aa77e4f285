use crate::models::{
    Advertisement, AdvertisementStatus, RecordId, SETTING_GLOBAL_POPUP_ENABLED,
};
use crate::store::{AdvertisementStore, SettingsStore, StoreError};

/// What kind of page the visitor is on. Detail pages never show the popup;
/// it would cover the content the visitor deliberately navigated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    General,
    BlogDetails,
    EventDetails,
}

impl PageKind {
    pub fn is_details(self) -> bool {
        !matches!(self, Self::General)
    }
}

/// Where a click on the popup image goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupClick {
    GoToEvent(RecordId),
    Dismiss,
}

/// Whether the popup should appear on this page. Detail pages suppress it
/// outright; otherwise the `global_popup_enabled` setting governs, and an
/// absent key or a failed fetch defaults to showing.
pub fn should_show(store: &dyn SettingsStore, page: PageKind) -> bool {
    if page.is_details() {
        return false;
    }
    match store.get_settings_by_keys(&[SETTING_GLOBAL_POPUP_ENABLED]) {
        Ok(values) => match values.get(SETTING_GLOBAL_POPUP_ENABLED) {
            Some(value) => value == "true",
            None => {
                log::debug!("Popup setting absent, defaulting to enabled");
                true
            }
        },
        Err(e) => {
            log::error!("Failed to check popup settings: {}", e);
            true
        }
    }
}

/// The advertisement to show: the newest active one, if any.
pub fn active_advertisement(
    store: &dyn AdvertisementStore,
) -> Result<Option<Advertisement>, StoreError> {
    let mut active = store.list_advertisements(Some(AdvertisementStatus::Active))?;
    Ok(if active.is_empty() {
        None
    } else {
        Some(active.remove(0))
    })
}

/// Resolves a click on the popup: through to the linked event when there
/// is one, otherwise just dismiss.
pub fn click_destination(advertisement: &Advertisement) -> PopupClick {
    match advertisement.data.event_id {
        Some(event_id) => PopupClick::GoToEvent(event_id),
        None => PopupClick::Dismiss,
    }
}
