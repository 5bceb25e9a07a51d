use log::{info, warn};
use tags_business::BusinessConfig;

/// Id of the `<script type="application/json">` element holding the page
/// configuration.
pub const CONFIG_SCRIPT_ID: &str = "tags-config";

/// Configuration from the embedded script's text. A missing or broken blob
/// leaves the page on its defaults.
pub fn config_from_script(text: Option<&str>) -> BusinessConfig {
    let Some(text) = text.map(str::trim).filter(|text| !text.is_empty()) else {
        info!("no #{CONFIG_SCRIPT_ID} on the page, using defaults");
        return BusinessConfig::default();
    };

    BusinessConfig::from_json(text).unwrap_or_else(|e| {
        warn!("ignoring #{CONFIG_SCRIPT_ID}: {e}");
        BusinessConfig::default()
    })
}

/// Anchors a same-origin API on the page's origin; the HTTP client only
/// takes absolute URLs.
pub fn anchor_api(mut config: BusinessConfig, origin: &str) -> BusinessConfig {
    if config.api_base_url.is_empty() {
        config.api_base_url = origin.to_owned();
    }
    config
}
