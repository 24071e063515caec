//! Per-ad-type network priority records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ad_type::AdType;

/// Ordered network identifiers; position is mediation priority.
pub type NetworkList = Vec<String>;

/// Mapping from ad type to its network list.
///
/// Serialized as `{"banner": [...], "interstitial": [...], "rewarded": [...]}`.
/// Records coming from the store may be partial; resolved records always
/// carry every [`AdType`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityRecord {
    networks: BTreeMap<AdType, NetworkList>,
}

impl PriorityRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a fully populated record.
    pub fn from_lists<B, I, R, S>(banner: B, interstitial: I, rewarded: R) -> Self
    where
        B: IntoIterator<Item = S>,
        I: IntoIterator<Item = S>,
        R: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut record = Self::new();
        record.insert(AdType::Banner, banner.into_iter().map(Into::into).collect());
        record.insert(AdType::Interstitial, interstitial.into_iter().map(Into::into).collect());
        record.insert(AdType::Rewarded, rewarded.into_iter().map(Into::into).collect());
        record
    }

    pub fn get(&self, ad_type: AdType) -> Option<&[String]> {
        self.networks.get(&ad_type).map(Vec::as_slice)
    }

    pub fn insert(&mut self, ad_type: AdType, networks: NetworkList) -> Option<NetworkList> {
        self.networks.insert(ad_type, networks)
    }

    pub fn contains(&self, ad_type: AdType) -> bool {
        self.networks.contains_key(&ad_type)
    }

    /// True when every ad type has a list.
    pub fn is_complete(&self) -> bool {
        AdType::ALL.iter().all(|t| self.contains(*t))
    }

    /// Ad types with no list in this record.
    pub fn missing(&self) -> Vec<AdType> {
        AdType::ALL.into_iter().filter(|t| !self.contains(*t)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AdType, &[String])> {
        self.networks.iter().map(|(t, n)| (*t, n.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.networks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }
}

impl FromIterator<(AdType, NetworkList)> for PriorityRecord {
    fn from_iter<T: IntoIterator<Item = (AdType, NetworkList)>>(iter: T) -> Self {
        Self { networks: iter.into_iter().collect() }
    }
}
