//! Filter pipeline applied to every resolved network list.
//!
//! Rules run in this order on a copy of the list:
//! 1. Android with an OS version starting with `9.` drops `AdMob`.
//! 2. Requests for `CN` drop `Facebook`.
//! 3. A list without `AdMob` gets `AdMob-OptOut` appended.
//!
//! Matching is exact string equality; only the first occurrence is removed.

use adnet_types::{CountryCode, NetworkList, Platform};

pub const ADMOB: &str = "AdMob";
pub const FACEBOOK: &str = "Facebook";
pub const ADMOB_OPT_OUT: &str = "AdMob-OptOut";

const LEGACY_ANDROID_PREFIX: &str = "9.";
const FACEBOOK_BLOCKED_COUNTRY: &str = "CN";

/// Request attributes the rules look at.
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    pub country: &'a CountryCode,
    pub platform: Option<Platform>,
    pub os_version: Option<&'a str>,
}

impl FilterContext<'_> {
    fn is_legacy_android(&self) -> bool {
        self.platform == Some(Platform::Android)
            && self.os_version.is_some_and(|v| v.starts_with(LEGACY_ANDROID_PREFIX))
    }

    fn blocks_facebook(&self) -> bool {
        self.country.as_str() == FACEBOOK_BLOCKED_COUNTRY
    }
}

/// Run the pipeline over `networks`, returning a new list.
pub fn filter_networks(ctx: &FilterContext<'_>, networks: &[String]) -> NetworkList {
    let mut filtered = networks.to_vec();

    if ctx.is_legacy_android() {
        remove_first(&mut filtered, ADMOB);
    }

    if ctx.blocks_facebook() {
        remove_first(&mut filtered, FACEBOOK);
    }

    if !filtered.iter().any(|n| n == ADMOB) {
        filtered.push(ADMOB_OPT_OUT.to_string());
    }

    filtered
}

fn remove_first(networks: &mut NetworkList, name: &str) {
    if let Some(pos) = networks.iter().position(|n| n == name) {
        networks.remove(pos);
    }
}
