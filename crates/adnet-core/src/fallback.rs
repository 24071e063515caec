//! Default priorities for countries without stored data.

use adnet_types::{AdType, PriorityRecord};

/// Fixed record used when the store has no data for a country, or to fill
/// ad types missing from a partial record. Never mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackTable {
    record: PriorityRecord,
}

impl FallbackTable {
    pub fn new() -> Self {
        Self {
            record: PriorityRecord::from_lists(
                ["AdMob", "AdX", "Unity Ads"],
                ["AdMob", "AdX", "IronSource"],
                ["Unity Ads", "IronSource", "AdMob"],
            ),
        }
    }

    pub fn networks(&self, ad_type: AdType) -> &[String] {
        self.record.get(ad_type).unwrap_or_default()
    }

    pub fn record(&self) -> &PriorityRecord {
        &self.record
    }
}

impl Default for FallbackTable {
    fn default() -> Self {
        Self::new()
    }
}
