use url::Url;

use crate::admin::{EditorError, ValidationError};
use crate::models::{SETTING_JOIN_FORM_ENABLED, SETTING_JOIN_FORM_URL};
use crate::store::{RecordStore, StoreError};

/// The join-form settings pair as the admin section edits it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinFormSettings {
    pub link: String,
    pub enabled: bool,
}

/// Loads the two join-form keys. Missing keys fall back to a blank,
/// disabled form rather than failing the section.
pub fn load_join_form_settings(store: &dyn RecordStore) -> Result<JoinFormSettings, StoreError> {
    let values = store.get_settings_by_keys(&[SETTING_JOIN_FORM_URL, SETTING_JOIN_FORM_ENABLED])?;
    Ok(JoinFormSettings {
        link: values.get(SETTING_JOIN_FORM_URL).cloned().unwrap_or_default(),
        enabled: values
            .get(SETTING_JOIN_FORM_ENABLED)
            .map(|v| v == "true")
            .unwrap_or(false),
    })
}

/// Validates and writes the join-form settings. A non-blank link must
/// parse as a URL before anything is written; the two keys are updated
/// sequentially and the first failure aborts.
pub fn save_join_form_settings(
    store: &dyn RecordStore,
    settings: &JoinFormSettings,
) -> Result<(), EditorError> {
    let link = settings.link.trim();
    if !link.is_empty() && Url::parse(link).is_err() {
        return Err(ValidationError::InvalidLink.into());
    }

    store.update_setting_value(SETTING_JOIN_FORM_URL, link)?;
    store.update_setting_value(
        SETTING_JOIN_FORM_ENABLED,
        if settings.enabled { "true" } else { "false" },
    )?;
    Ok(())
}
