use serde::Serialize;

use crate::models::AdvertisementStatus;
use crate::store::{RecordStore, StoreError};

/// The aggregate counters shown on the dashboard landing section. Only
/// active advertisements count; drafts and past events still count toward
/// their totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DashboardCounts {
    pub blogs: u64,
    pub events: u64,
    pub active_ads: u64,
}

pub fn load_counts(store: &dyn RecordStore) -> Result<DashboardCounts, StoreError> {
    Ok(DashboardCounts {
        blogs: store.count_blogs()?,
        events: store.count_events()?,
        active_ads: store.count_advertisements(Some(AdvertisementStatus::Active))?,
    })
}
