use url::Url;

use crate::models::{SETTING_JOIN_FORM_ENABLED, SETTING_JOIN_FORM_URL};
use crate::store::RecordStore;

/// Where a join-button click goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinDestination {
    /// Open the external form in a new browsing context.
    OpenExternal(Url),
    /// Navigate to the local fallback page.
    Fallback(String),
}

/// Decides join-button routing from the two remotely stored settings.
///
/// The settings are fetched once at construction and cached for the
/// session; there is no live invalidation, only an explicit [`refresh`].
/// The raw setting strings are kept as stored; interpretation happens at
/// resolve time.
///
/// [`refresh`]: JoinRedirect::refresh
#[derive(Debug, Clone)]
pub struct JoinRedirect {
    fallback_page: String,
    form_link: String,
    form_enabled: String,
}

impl JoinRedirect {
    /// Fetches the settings and builds the policy. A failed fetch logs and
    /// falls back to the disabled defaults; the buttons still work, they
    /// just route to the fallback page.
    pub fn load(store: &dyn RecordStore, fallback_page: impl Into<String>) -> Self {
        let mut policy = Self {
            fallback_page: fallback_page.into(),
            form_link: String::new(),
            form_enabled: "false".to_string(),
        };
        policy.apply_settings(store);
        policy
    }

    /// Re-fetches the settings and re-applies them. Keys missing from the
    /// response keep their current values.
    pub fn refresh(&mut self, store: &dyn RecordStore) {
        self.apply_settings(store);
    }

    fn apply_settings(&mut self, store: &dyn RecordStore) {
        match store.get_settings_by_keys(&[SETTING_JOIN_FORM_URL, SETTING_JOIN_FORM_ENABLED]) {
            Ok(values) => {
                if let Some(link) = values.get(SETTING_JOIN_FORM_URL) {
                    self.form_link = link.clone();
                }
                if let Some(enabled) = values.get(SETTING_JOIN_FORM_ENABLED) {
                    self.form_enabled = enabled.clone();
                }
            }
            Err(e) => {
                log::error!("Failed to load join form settings: {}", e);
            }
        }
    }

    /// Resolves a click: the external form wins only when the flag is
    /// enabled AND a link is set AND it parses as an absolute URL. A
    /// malformed link is logged and treated as "use the fallback"; it
    /// never surfaces to the caller.
    pub fn resolve(&self) -> JoinDestination {
        let link = self.form_link.trim();
        if self.form_enabled == "true" && !link.is_empty() {
            match Url::parse(link) {
                Ok(url) => return JoinDestination::OpenExternal(url),
                Err(e) => {
                    log::error!("Invalid join form URL {:?}: {}", link, e);
                }
            }
        }
        JoinDestination::Fallback(self.fallback_page.clone())
    }
}
